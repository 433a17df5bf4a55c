//! Planned purchases. These never touch the ledger.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError, YearMonth,
    util::{model_currency, model_month, string_enum},
};

string_enum! {
    pub enum NeedStatus {
        Recurring => "recurring",
        OneTime => "one-time",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FutureNeed {
    pub id: Uuid,
    pub month: YearMonth,
    pub description: String,
    pub quantity: f64,
    /// Unit amount.
    pub amount: f64,
    pub status: NeedStatus,
    pub currency: Currency,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FutureNeed {
    /// `amount * quantity`, computed on read and never stored.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.amount * self.quantity
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "future_needs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub month: String,
    pub description: String,
    pub quantity: f64,
    pub amount: f64,
    pub status: String,
    pub currency: String,
    pub remarks: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&FutureNeed> for ActiveModel {
    fn from(need: &FutureNeed) -> Self {
        Self {
            id: ActiveValue::Set(need.id),
            month: ActiveValue::Set(need.month.to_string()),
            description: ActiveValue::Set(need.description.clone()),
            quantity: ActiveValue::Set(need.quantity),
            amount: ActiveValue::Set(need.amount),
            status: ActiveValue::Set(need.status.as_str().to_string()),
            currency: ActiveValue::Set(need.currency.code().to_string()),
            remarks: ActiveValue::Set(need.remarks.clone()),
            created_at: ActiveValue::Set(need.created_at),
            updated_at: ActiveValue::Set(need.updated_at),
        }
    }
}

impl TryFrom<Model> for FutureNeed {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            month: model_month(&model.month)?,
            description: model.description,
            quantity: model.quantity,
            amount: model.amount,
            status: NeedStatus::try_from(model.status.as_str())?,
            currency: model_currency(&model.currency)?,
            remarks: model.remarks,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
