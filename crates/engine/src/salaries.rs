//! Monthly salary records.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError, YearMonth,
    util::{model_currency, model_month, string_enum},
};

string_enum! {
    pub enum SalaryStatus {
        Paid => "paid",
        Pending => "pending",
    }
}

impl Default for SalaryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub id: Uuid,
    pub employee_name: String,
    pub role: String,
    pub net_salary: f64,
    pub payment_status: SalaryStatus,
    pub payment_date: Option<NaiveDate>,
    pub month: YearMonth,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Salary {
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == SalaryStatus::Paid
    }

    /// Date used when the salary shows up in activity feeds.
    #[must_use]
    pub fn activity_date(&self) -> NaiveDate {
        self.payment_date.unwrap_or_else(|| self.month.first_day())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_name: String,
    pub role: String,
    pub net_salary: f64,
    pub payment_status: String,
    pub payment_date: Option<NaiveDate>,
    pub month: String,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Salary> for ActiveModel {
    fn from(salary: &Salary) -> Self {
        Self {
            id: ActiveValue::Set(salary.id),
            employee_name: ActiveValue::Set(salary.employee_name.clone()),
            role: ActiveValue::Set(salary.role.clone()),
            net_salary: ActiveValue::Set(salary.net_salary),
            payment_status: ActiveValue::Set(salary.payment_status.as_str().to_string()),
            payment_date: ActiveValue::Set(salary.payment_date),
            month: ActiveValue::Set(salary.month.to_string()),
            currency: ActiveValue::Set(salary.currency.code().to_string()),
            created_at: ActiveValue::Set(salary.created_at),
            updated_at: ActiveValue::Set(salary.updated_at),
        }
    }
}

impl TryFrom<Model> for Salary {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            employee_name: model.employee_name,
            role: model.role,
            net_salary: model.net_salary,
            payment_status: SalaryStatus::try_from(model.payment_status.as_str())?,
            payment_date: model.payment_date,
            month: model_month(&model.month)?,
            currency: model_currency(&model.currency)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
