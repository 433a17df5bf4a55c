use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    CashflowEntry, Currency, DateRange, EngineError, ResultEngine, YearMonth,
    aggregate::MAX_TREND_MONTHS,
    cashflow::{self, NewCashflowEntry},
    commands::{CreateCashflowCmd, UpdateCashflowCmd},
    summary::{
        CashflowCategoryTotal, CashflowPoint, CashflowSummary, cashflow_by_category,
        cashflow_trend,
    },
    util::{distinct_sorted, non_negative},
};

use super::{Engine, collect, within_dates};

impl Engine {
    /// The ledger, latest date first.
    pub async fn cashflow(&self) -> ResultEngine<Vec<CashflowEntry>> {
        self.cashflow_in(DateRange::all()).await
    }

    pub(crate) async fn cashflow_in(&self, range: DateRange) -> ResultEngine<Vec<CashflowEntry>> {
        let models = within_dates(cashflow::Entity::find(), cashflow::Column::Date, range)
            .order_by_desc(cashflow::Column::Date)
            .order_by_desc(cashflow::Column::CreatedAt)
            .order_by_asc(cashflow::Column::Id)
            .all(&self.database)
            .await?;
        collect(models)
    }

    pub async fn cashflow_entry(&self, id: Uuid) -> ResultEngine<CashflowEntry> {
        CashflowEntry::try_from(self.require::<cashflow::Entity>(id, "cashflow entry").await?)
    }

    /// Entries projected from the record `reference_id`.
    pub async fn cashflow_for_reference(
        &self,
        reference_id: Uuid,
    ) -> ResultEngine<Vec<CashflowEntry>> {
        let models = cashflow::Entity::find()
            .filter(cashflow::Column::ReferenceId.eq(reference_id))
            .order_by_asc(cashflow::Column::Date)
            .order_by_asc(cashflow::Column::CreatedAt)
            .all(&self.database)
            .await?;
        collect(models)
    }

    /// Append a manual entry.
    pub async fn create_cashflow(&self, cmd: CreateCashflowCmd) -> ResultEngine<Uuid> {
        let entry = CashflowEntry::new(NewCashflowEntry {
            date: cmd.date,
            flow_type: cmd.flow_type,
            category: cmd.category.trim().to_string(),
            description: cmd.description,
            amount: non_negative(cmd.amount, "amount")?,
            currency: cmd.currency,
            reference_id: None,
        });
        let model: cashflow::ActiveModel = (&entry).into();
        model.insert(&self.database).await?;
        tracing::debug!(id = %entry.id, "cashflow entry created");
        Ok(entry.id)
    }

    /// Correct an entry. The reference id is never changed.
    pub async fn update_cashflow(&self, id: Uuid, cmd: UpdateCashflowCmd) -> ResultEngine<()> {
        let mut entry = self.cashflow_entry(id).await?;
        if let Some(date) = cmd.date {
            entry.date = date;
        }
        if let Some(flow_type) = cmd.flow_type {
            entry.flow_type = flow_type;
        }
        if let Some(category) = cmd.category {
            entry.category = category.trim().to_string();
        }
        if let Some(description) = cmd.description {
            entry.description = description;
        }
        if let Some(amount) = cmd.amount {
            entry.amount = non_negative(amount, "amount")?;
        }
        if let Some(currency) = cmd.currency {
            entry.currency = currency;
        }
        entry.updated_at = Utc::now();

        let model: cashflow::ActiveModel = (&entry).into();
        model.update(&self.database).await?;
        tracing::debug!(%id, "cashflow entry updated");
        Ok(())
    }

    pub async fn delete_cashflow(&self, id: Uuid) -> ResultEngine<()> {
        self.delete_record::<cashflow::Entity>(id, "cashflow entry")
            .await
    }

    pub async fn cashflow_summary(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<CashflowSummary> {
        let entries = self.cashflow_in(range).await?;
        Ok(CashflowSummary::build(&entries, target))
    }

    pub async fn cashflow_by_category(
        &self,
        range: DateRange,
        target: Currency,
    ) -> ResultEngine<Vec<CashflowCategoryTotal>> {
        let entries = self.cashflow_in(range).await?;
        Ok(cashflow_by_category(&entries, target))
    }

    /// Ledger movement over the `months` months ending at `current`.
    ///
    /// `months` must lie in `1..=MAX_TREND_MONTHS`.
    pub async fn cashflow_trend(
        &self,
        months: u32,
        current: YearMonth,
        target: Currency,
    ) -> ResultEngine<Vec<CashflowPoint>> {
        if !(1..=MAX_TREND_MONTHS).contains(&months) {
            return Err(EngineError::InvalidDate(format!(
                "months must be between 1 and {MAX_TREND_MONTHS}"
            )));
        }
        let range = DateRange {
            start: Some(current.shift(1 - months as i32).first_day()),
            end: None,
        };
        let entries = self.cashflow_in(range).await?;
        Ok(cashflow_trend(&entries, target, current, months))
    }

    pub async fn cashflow_categories(&self) -> ResultEngine<Vec<String>> {
        let entries = self.cashflow().await?;
        Ok(distinct_sorted(entries.iter().map(|e| e.category.as_str())))
    }
}
