use chrono::NaiveDate;

use crate::{
    Currency, DateRange, ResultEngine,
    aggregate::{Dashboard, Snapshot},
    range::MonthRange,
};

use super::Engine;

/// Inputs of [`Engine::dashboard`]. The target currency is always explicit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashboardQuery {
    pub currency: Currency,
    pub range: DateRange,
    pub today: NaiveDate,
}

impl Engine {
    /// Load every module concurrently, then fold them into a dashboard.
    ///
    /// Reads do not depend on each other; the first failing read fails the
    /// whole call.
    pub async fn dashboard(&self, query: DashboardQuery) -> ResultEngine<Dashboard> {
        let (sales, expenses, liabilities, salaries, business_in_hand, cashflow) = tokio::try_join!(
            self.sales_in(DateRange::all()),
            self.expenses_in(DateRange::all()),
            self.liabilities(),
            self.salaries_in(MonthRange::default()),
            self.business_in_hand(),
            self.cashflow_in(DateRange::all()),
        )?;
        let snapshot = Snapshot {
            sales,
            expenses,
            liabilities,
            salaries,
            business_in_hand,
            cashflow,
        };
        tracing::debug!(currency = %query.currency, "dashboard snapshot loaded");

        Ok(Dashboard::build(
            &snapshot,
            query.currency,
            query.range,
            query.today,
        ))
    }
}
