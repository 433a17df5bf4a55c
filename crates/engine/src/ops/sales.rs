use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    Currency, DateRange, ResultEngine, Sale,
    commands::{CreateSaleCmd, UpdateSaleCmd},
    derived::SaleInputs,
    ledger, sales,
    summary::SalesSummary,
    util::non_negative,
};

use super::{Engine, collect, within_dates};

impl Engine {
    /// All sales, most recently created first.
    pub async fn sales(&self) -> ResultEngine<Vec<Sale>> {
        self.sales_in(DateRange::all()).await
    }

    pub(crate) async fn sales_in(&self, range: DateRange) -> ResultEngine<Vec<Sale>> {
        let models = within_dates(sales::Entity::find(), sales::Column::Date, range)
            .order_by_desc(sales::Column::CreatedAt)
            .order_by_asc(sales::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn sale(&self, id: Uuid) -> ResultEngine<Sale> {
        Sale::try_from(self.require::<sales::Entity>(id, "sale").await?)
    }

    /// Record a sale and its inflow.
    pub async fn create_sale(&self, cmd: CreateSaleCmd) -> ResultEngine<Uuid> {
        let inputs = SaleInputs::new(
            non_negative(cmd.cost, "cost")?,
            non_negative(cmd.selling_price, "selling_price")?,
            non_negative(cmd.expenses, "expenses")?,
        );
        let now = Utc::now();
        let sale = Sale {
            id: Uuid::new_v4(),
            date: cmd.date,
            description: cmd.description,
            cost: inputs.cost,
            selling_price: inputs.selling_price,
            expenses: inputs.expenses,
            figures: inputs.figures(),
            currency: cmd.currency,
            created_at: now,
            updated_at: now,
        };
        let model: sales::ActiveModel = (&sale).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %sale.id, "sale created");

        self.publish(sale.id, Some(ledger::sale_created(&sale)))
            .await?;
        Ok(sale.id)
    }

    /// Patch a sale. Supplying any of cost, selling price or expenses
    /// recomputes all profit figures from the merged inputs.
    pub async fn update_sale(&self, id: Uuid, cmd: UpdateSaleCmd) -> ResultEngine<()> {
        let mut sale = self.sale(id).await?;
        if let Some(date) = cmd.date {
            sale.date = date;
        }
        if let Some(description) = cmd.description {
            sale.description = description;
        }
        if let Some(currency) = cmd.currency {
            sale.currency = currency;
        }
        let cost = cmd.cost.map(|v| non_negative(v, "cost")).transpose()?;
        let selling_price = cmd
            .selling_price
            .map(|v| non_negative(v, "selling_price"))
            .transpose()?;
        let expenses = cmd
            .expenses
            .map(|v| non_negative(v, "expenses"))
            .transpose()?;
        if let Some(inputs) = sale.inputs().merge(cost, selling_price, expenses) {
            sale.set_inputs(inputs);
        }
        sale.updated_at = Utc::now();

        let model: sales::ActiveModel = (&sale).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "sale updated");
        Ok(())
    }

    /// Delete a sale. Its ledger entry stays.
    pub async fn delete_sale(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<sales::Entity>(id, "sale").await
    }

    pub async fn sales_summary(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<SalesSummary> {
        let sales = self.sales_in(range).await?;
        Ok(SalesSummary::build(&sales, target))
    }
}
