//! Post-dated cheques issued to suppliers.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError,
    util::{model_currency, string_enum},
};

string_enum! {
    pub enum PdcStatus {
        Pending => "pending",
        Cleared => "cleared",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankPdc {
    pub id: Uuid,
    pub code: String,
    /// Date the cheque is due to be presented.
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub status: PdcStatus,
    pub bank: String,
    pub cheque_number: String,
    pub supplier: String,
    /// Day the record was entered.
    pub creation_date: NaiveDate,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bank_pdc")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub status: String,
    pub bank: String,
    pub cheque_number: String,
    pub supplier: String,
    pub creation_date: NaiveDate,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&BankPdc> for ActiveModel {
    fn from(pdc: &BankPdc) -> Self {
        Self {
            id: ActiveValue::Set(pdc.id),
            code: ActiveValue::Set(pdc.code.clone()),
            date: ActiveValue::Set(pdc.date),
            description: ActiveValue::Set(pdc.description.clone()),
            amount: ActiveValue::Set(pdc.amount),
            status: ActiveValue::Set(pdc.status.as_str().to_string()),
            bank: ActiveValue::Set(pdc.bank.clone()),
            cheque_number: ActiveValue::Set(pdc.cheque_number.clone()),
            supplier: ActiveValue::Set(pdc.supplier.clone()),
            creation_date: ActiveValue::Set(pdc.creation_date),
            currency: ActiveValue::Set(pdc.currency.code().to_string()),
            created_at: ActiveValue::Set(pdc.created_at),
            updated_at: ActiveValue::Set(pdc.updated_at),
        }
    }
}

impl TryFrom<Model> for BankPdc {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            code: model.code,
            date: model.date,
            description: model.description,
            amount: model.amount,
            status: PdcStatus::try_from(model.status.as_str())?,
            bank: model.bank,
            cheque_number: model.cheque_number,
            supplier: model.supplier,
            creation_date: model.creation_date,
            currency: model_currency(&model.currency)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
