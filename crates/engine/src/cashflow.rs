//! The cashflow ledger.
//!
//! Entries are appended either by the ledger projector (with a
//! `reference_id` pointing at the originating record) or manually. The
//! reference is weak: nothing dereferences it for ownership and deleting the
//! source record leaves its entries in place.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError,
    util::{model_currency, string_enum},
};

string_enum! {
    pub enum FlowType {
        Inflow => "inflow",
        Outflow => "outflow",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashflowEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub reference_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a ledger entry before it gets an id and timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCashflowEntry {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub reference_id: Option<Uuid>,
}

impl CashflowEntry {
    #[must_use]
    pub fn new(entry: NewCashflowEntry) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date: entry.date,
            flow_type: entry.flow_type,
            category: entry.category,
            description: entry.description,
            amount: entry.amount,
            currency: entry.currency,
            reference_id: entry.reference_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_inflow(&self) -> bool {
        self.flow_type == FlowType::Inflow
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cashflow")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: NaiveDate,
    pub flow_type: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub reference_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CashflowEntry> for ActiveModel {
    fn from(entry: &CashflowEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id),
            date: ActiveValue::Set(entry.date),
            flow_type: ActiveValue::Set(entry.flow_type.as_str().to_string()),
            category: ActiveValue::Set(entry.category.clone()),
            description: ActiveValue::Set(entry.description.clone()),
            amount: ActiveValue::Set(entry.amount),
            currency: ActiveValue::Set(entry.currency.code().to_string()),
            reference_id: ActiveValue::Set(entry.reference_id),
            created_at: ActiveValue::Set(entry.created_at),
            updated_at: ActiveValue::Set(entry.updated_at),
        }
    }
}

impl TryFrom<Model> for CashflowEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            date: model.date,
            flow_type: FlowType::try_from(model.flow_type.as_str())?,
            category: model.category,
            description: model.description,
            amount: model.amount,
            currency: model_currency(&model.currency)?,
            reference_id: model.reference_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
