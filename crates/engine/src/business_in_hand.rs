//! Revenue pipeline: purchase orders in hand, pending invoices and expected
//! revenue.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError,
    util::{model_currency, string_enum},
};

string_enum! {
    pub enum PipelineType {
        PoInHand => "po_in_hand",
        PendingInvoice => "pending_invoice",
        ExpectedRevenue => "expected_revenue",
    }
}

string_enum! {
    pub enum PipelineStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Received => "received",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessInHand {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: PipelineType,
    pub description: String,
    pub amount: f64,
    pub expected_date: NaiveDate,
    pub status: PipelineStatus,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessInHand {
    #[must_use]
    pub fn is_received(&self) -> bool {
        self.status == PipelineStatus::Received
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "business_in_hand")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub description: String,
    pub amount: f64,
    pub expected_date: NaiveDate,
    pub status: String,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&BusinessInHand> for ActiveModel {
    fn from(item: &BusinessInHand) -> Self {
        Self {
            id: ActiveValue::Set(item.id),
            kind: ActiveValue::Set(item.kind.as_str().to_string()),
            description: ActiveValue::Set(item.description.clone()),
            amount: ActiveValue::Set(item.amount),
            expected_date: ActiveValue::Set(item.expected_date),
            status: ActiveValue::Set(item.status.as_str().to_string()),
            currency: ActiveValue::Set(item.currency.code().to_string()),
            created_at: ActiveValue::Set(item.created_at),
            updated_at: ActiveValue::Set(item.updated_at),
        }
    }
}

impl TryFrom<Model> for BusinessInHand {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            kind: PipelineType::try_from(model.kind.as_str())?,
            description: model.description,
            amount: model.amount,
            expected_date: model.expected_date,
            status: PipelineStatus::try_from(model.status.as_str())?,
            currency: model_currency(&model.currency)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
