//! Liabilities (loans, credit lines, payables).
//!
//! Invariant: `0 <= outstanding_balance <= original_amount`. A liability is
//! created fully outstanding and only payments move the balance down.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError, ResultEngine, util::model_currency};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub id: Uuid,
    pub lender_party: String,
    pub liability_type: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub original_amount: f64,
    pub outstanding_balance: f64,
    pub currency: Currency,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Liability {
    /// Amount already repaid.
    #[must_use]
    pub fn paid_amount(&self) -> f64 {
        self.original_amount - self.outstanding_balance
    }

    /// Overdue means past due with a balance left.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.outstanding_balance > 0.0
    }

    pub(crate) fn check_balance(&self) -> ResultEngine<()> {
        if self.outstanding_balance < 0.0 {
            return Err(EngineError::InvalidAmount(
                "outstanding_balance must be >= 0".to_string(),
            ));
        }
        if self.outstanding_balance > self.original_amount {
            return Err(EngineError::InvalidAmount(
                "outstanding_balance exceeds original_amount".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "liabilities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub lender_party: String,
    pub liability_type: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub original_amount: f64,
    pub outstanding_balance: f64,
    pub currency: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Liability> for ActiveModel {
    fn from(liability: &Liability) -> Self {
        Self {
            id: ActiveValue::Set(liability.id),
            lender_party: ActiveValue::Set(liability.lender_party.clone()),
            liability_type: ActiveValue::Set(liability.liability_type.clone()),
            start_date: ActiveValue::Set(liability.start_date),
            due_date: ActiveValue::Set(liability.due_date),
            original_amount: ActiveValue::Set(liability.original_amount),
            outstanding_balance: ActiveValue::Set(liability.outstanding_balance),
            currency: ActiveValue::Set(liability.currency.code().to_string()),
            description: ActiveValue::Set(liability.description.clone()),
            created_at: ActiveValue::Set(liability.created_at),
            updated_at: ActiveValue::Set(liability.updated_at),
        }
    }
}

impl TryFrom<Model> for Liability {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            lender_party: model.lender_party,
            liability_type: model.liability_type,
            start_date: model.start_date,
            due_date: model.due_date,
            original_amount: model.original_amount,
            outstanding_balance: model.outstanding_balance,
            currency: model_currency(&model.currency)?,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
