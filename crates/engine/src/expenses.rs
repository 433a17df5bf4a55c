//! Expense records.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError,
    util::{model_currency, string_enum},
};

string_enum! {
    pub enum ExpenseStatus {
        Paid => "paid",
        Unpaid => "unpaid",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub vendor: String,
    pub amount: f64,
    pub status: ExpenseStatus,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub vendor: String,
    pub amount: f64,
    pub status: String,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id),
            date: ActiveValue::Set(expense.date),
            category: ActiveValue::Set(expense.category.clone()),
            description: ActiveValue::Set(expense.description.clone()),
            vendor: ActiveValue::Set(expense.vendor.clone()),
            amount: ActiveValue::Set(expense.amount),
            status: ActiveValue::Set(expense.status.as_str().to_string()),
            currency: ActiveValue::Set(expense.currency.code().to_string()),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            date: model.date,
            category: model.category,
            description: model.description,
            vendor: model.vendor,
            amount: model.amount,
            status: ExpenseStatus::try_from(model.status.as_str())?,
            currency: model_currency(&model.currency)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
