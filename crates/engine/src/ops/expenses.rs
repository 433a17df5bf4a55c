use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    Currency, DateRange, Expense, ResultEngine,
    commands::{CreateExpenseCmd, UpdateExpenseCmd},
    expenses, ledger,
    summary::{CategoryTotal, ExpenseSummary, expenses_by_category},
    util::{distinct_sorted, non_negative},
};

use super::{Engine, collect, within_dates};

impl Engine {
    /// All expenses, newest date first.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        self.expenses_in(DateRange::all()).await
    }

    pub(crate) async fn expenses_in(&self, range: DateRange) -> ResultEngine<Vec<Expense>> {
        let models = within_dates(expenses::Entity::find(), expenses::Column::Date, range)
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn expense(&self, id: Uuid) -> ResultEngine<Expense> {
        Expense::try_from(self.require::<expenses::Entity>(id, "expense").await?)
    }

    /// Record an expense and its outflow, whatever its status.
    pub async fn create_expense(&self, cmd: CreateExpenseCmd) -> ResultEngine<Uuid> {
        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            date: cmd.date,
            category: cmd.category.trim().to_string(),
            description: cmd.description,
            vendor: cmd.vendor,
            amount: non_negative(cmd.amount, "amount")?,
            status: cmd.status,
            currency: cmd.currency,
            created_at: now,
            updated_at: now,
        };
        let model: expenses::ActiveModel = (&expense).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %expense.id, "expense created");

        self.publish(expense.id, Some(ledger::expense_created(&expense)))
            .await?;
        Ok(expense.id)
    }

    pub async fn update_expense(&self, id: Uuid, cmd: UpdateExpenseCmd) -> ResultEngine<()> {
        let mut expense = self.expense(id).await?;
        if let Some(date) = cmd.date {
            expense.date = date;
        }
        if let Some(category) = cmd.category {
            expense.category = category.trim().to_string();
        }
        if let Some(description) = cmd.description {
            expense.description = description;
        }
        if let Some(vendor) = cmd.vendor {
            expense.vendor = vendor;
        }
        if let Some(amount) = cmd.amount {
            expense.amount = non_negative(amount, "amount")?;
        }
        if let Some(status) = cmd.status {
            expense.status = status;
        }
        if let Some(currency) = cmd.currency {
            expense.currency = currency;
        }
        expense.updated_at = Utc::now();

        let model: expenses::ActiveModel = (&expense).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "expense updated");
        Ok(())
    }

    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<expenses::Entity>(id, "expense").await
    }

    pub async fn expense_summary(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<ExpenseSummary> {
        let expenses = self.expenses_in(range).await?;
        Ok(ExpenseSummary::build(&expenses, target))
    }

    /// Totals per category, largest first.
    pub async fn expenses_by_category(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<Vec<CategoryTotal>> {
        let expenses = self.expenses_in(range).await?;
        Ok(expenses_by_category(&expenses, target))
    }

    /// Every category in use, sorted.
    pub async fn expense_categories(&self) -> ResultEngine<Vec<String>> {
        let expenses = self.expenses().await?;
        Ok(distinct_sorted(expenses.iter().map(|e| e.category.as_str())))
    }
}
