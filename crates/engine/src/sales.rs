//! Sales records.
//!
//! A sale stores its inputs (`cost`, `selling_price`, `expenses`) next to the
//! profit figures derived from them. The figures are persisted so reads never
//! recompute them, and writes always recompute all four together.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError,
    derived::{SaleFigures, SaleInputs},
    util::model_currency,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub cost: f64,
    pub selling_price: f64,
    pub expenses: f64,
    #[serde(flatten)]
    pub figures: SaleFigures,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    #[must_use]
    pub fn inputs(&self) -> SaleInputs {
        SaleInputs {
            cost: self.cost,
            selling_price: self.selling_price,
            expenses: self.expenses,
        }
    }

    /// Replaces the inputs and recomputes every derived figure.
    pub fn set_inputs(&mut self, inputs: SaleInputs) {
        self.cost = inputs.cost;
        self.selling_price = inputs.selling_price;
        self.expenses = inputs.expenses;
        self.figures = inputs.figures();
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub cost: f64,
    pub selling_price: f64,
    pub gross_profit: f64,
    pub gross_profit_margin: f64,
    pub expenses: f64,
    pub net_profit: f64,
    pub net_profit_margin: f64,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Sale> for ActiveModel {
    fn from(sale: &Sale) -> Self {
        Self {
            id: ActiveValue::Set(sale.id),
            date: ActiveValue::Set(sale.date),
            description: ActiveValue::Set(sale.description.clone()),
            cost: ActiveValue::Set(sale.cost),
            selling_price: ActiveValue::Set(sale.selling_price),
            gross_profit: ActiveValue::Set(sale.figures.gross_profit),
            gross_profit_margin: ActiveValue::Set(sale.figures.gross_profit_margin),
            expenses: ActiveValue::Set(sale.expenses),
            net_profit: ActiveValue::Set(sale.figures.net_profit),
            net_profit_margin: ActiveValue::Set(sale.figures.net_profit_margin),
            currency: ActiveValue::Set(sale.currency.code().to_string()),
            created_at: ActiveValue::Set(sale.created_at),
            updated_at: ActiveValue::Set(sale.updated_at),
        }
    }
}

impl TryFrom<Model> for Sale {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            date: model.date,
            description: model.description,
            cost: model.cost,
            selling_price: model.selling_price,
            expenses: model.expenses,
            figures: SaleFigures {
                gross_profit: model.gross_profit,
                gross_profit_margin: model.gross_profit_margin,
                net_profit: model.net_profit,
                net_profit_margin: model.net_profit_margin,
            },
            currency: model_currency(&model.currency)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
