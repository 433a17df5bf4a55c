//! Dashboard aggregation.
//!
//! [`Dashboard::build`] is a pure fold over a [`Snapshot`] of the modules it reads.
//! The target currency and "today" are inputs, so the same snapshot always
//! yields the same dashboard. Loading the snapshot concurrently is the job of
//! [`Engine::dashboard`](crate::Engine::dashboard).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    BusinessInHand, CashflowEntry, Currency, DateRange, Expense, Liability, Sale, Salary,
    YearMonth,
    currency::convert,
    salaries::SalaryStatus,
    summary::{CashflowPoint, cashflow_trend},
};

/// Months covered by the trend charts.
pub const TREND_MONTHS: u32 = 12;
/// Longest trailing window a cashflow trend may ask for.
pub const MAX_TREND_MONTHS: u32 = 120;
/// Length of the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
const RECENT_SALES: usize = 3;
const RECENT_EXPENSES: usize = 3;
const RECENT_SALARIES: usize = 2;

/// Every record the dashboard reads. Cheques and planned needs have no
/// dashboard figure.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub liabilities: Vec<Liability>,
    pub salaries: Vec<Salary>,
    pub business_in_hand: Vec<BusinessInHand>,
    pub cashflow: Vec<CashflowEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_expenses: f64,
    pub outstanding_liabilities: f64,
    pub salaries_paid: f64,
    pub salaries_pending: f64,
    pub total_inflows: f64,
    pub total_outflows: f64,
    pub net_cashflow: f64,
    pub business_in_hand_value: f64,
    pub total_sales: f64,
    pub total_profit: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DueMonth {
    pub month: YearMonth,
    pub amount: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub month: YearMonth,
    pub sales: f64,
    pub profit: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Charts {
    pub cashflow_trend: Vec<CashflowPoint>,
    pub expenses_by_category: Vec<CategorySlice>,
    pub liabilities_by_due_date: Vec<DueMonth>,
    pub sales_trend: Vec<SalesPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Sale,
    Expense,
    Salary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    /// Amount in the dashboard currency.
    pub amount: f64,
    pub original_amount: f64,
    pub original_currency: Currency,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub currency: Currency,
    pub summary: DashboardSummary,
    pub charts: Charts,
    pub recent_activity: Vec<Activity>,
}

impl Dashboard {
    /// Fold `snapshot` into a dashboard expressed in `target`.
    ///
    /// `range` filters expenses, salaries (by month overlap), cashflow and
    /// sales. Liabilities and pipeline values are point-in-time balances and
    /// are never filtered. Trend charts always cover the
    /// [`TREND_MONTHS`] months ending with the month of `today`.
    #[must_use]
    pub fn build(snapshot: &Snapshot, target: Currency, range: DateRange, today: NaiveDate) -> Self {
        let expenses: Vec<&Expense> = snapshot
            .expenses
            .iter()
            .filter(|e| range.contains(e.date))
            .collect();
        let salaries: Vec<&Salary> = snapshot
            .salaries
            .iter()
            .filter(|s| range.contains_month(s.month))
            .collect();
        let cashflow: Vec<CashflowEntry> = snapshot
            .cashflow
            .iter()
            .filter(|c| range.contains(c.date))
            .cloned()
            .collect();
        let sales: Vec<&Sale> = snapshot
            .sales
            .iter()
            .filter(|s| range.contains(s.date))
            .collect();

        let summary = summarize(snapshot, &expenses, &salaries, &cashflow, &sales, target);
        let current = YearMonth::of(today);
        let charts = Charts {
            cashflow_trend: cashflow_trend(&snapshot.cashflow, target, current, TREND_MONTHS),
            expenses_by_category: category_slices(&expenses, target),
            liabilities_by_due_date: due_months(&snapshot.liabilities, target),
            sales_trend: sales_trend(&snapshot.sales, target, current),
        };

        Self {
            currency: target,
            summary,
            charts,
            recent_activity: recent_activity(snapshot, target),
        }
    }
}

fn summarize(
    snapshot: &Snapshot,
    expenses: &[&Expense],
    salaries: &[&Salary],
    cashflow: &[CashflowEntry],
    sales: &[&Sale],
    target: Currency,
) -> DashboardSummary {
    let salaries_with = |status: SalaryStatus| -> f64 {
        salaries
            .iter()
            .filter(|s| s.payment_status == status)
            .map(|s| convert(s.net_salary, s.currency, target))
            .sum()
    };
    let flows = crate::summary::CashflowSummary::build(cashflow, target);

    DashboardSummary {
        total_expenses: expenses
            .iter()
            .map(|e| convert(e.amount, e.currency, target))
            .sum(),
        outstanding_liabilities: snapshot
            .liabilities
            .iter()
            .map(|l| convert(l.outstanding_balance, l.currency, target))
            .sum(),
        salaries_paid: salaries_with(SalaryStatus::Paid),
        salaries_pending: salaries_with(SalaryStatus::Pending),
        total_inflows: flows.total_inflows,
        total_outflows: flows.total_outflows,
        net_cashflow: flows.net_cashflow,
        business_in_hand_value: snapshot
            .business_in_hand
            .iter()
            .filter(|b| !b.is_received())
            .map(|b| convert(b.amount, b.currency, target))
            .sum(),
        total_sales: sales
            .iter()
            .map(|s| convert(s.selling_price, s.currency, target))
            .sum(),
        total_profit: sales
            .iter()
            .map(|s| convert(s.figures.net_profit, s.currency, target))
            .sum(),
    }
}

/// Category share of the filtered expense total, largest first.
fn category_slices(expenses: &[&Expense], target: Currency) -> Vec<CategorySlice> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        *groups.entry(expense.category.as_str()).or_default() +=
            convert(expense.amount, expense.currency, target);
    }
    let total: f64 = groups.values().sum();
    let mut slices: Vec<CategorySlice> = groups
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            category: category.to_string(),
            amount,
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    slices.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    slices
}

/// Outstanding balances grouped by due month, ascending.
fn due_months(liabilities: &[Liability], target: Currency) -> Vec<DueMonth> {
    let mut groups: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for liability in liabilities.iter().filter(|l| l.outstanding_balance > 0.0) {
        let slot = groups.entry(YearMonth::of(liability.due_date)).or_default();
        slot.0 += convert(liability.outstanding_balance, liability.currency, target);
        slot.1 += 1;
    }
    groups
        .into_iter()
        .map(|(month, (amount, count))| DueMonth {
            month,
            amount,
            count,
        })
        .collect()
}

fn sales_trend(sales: &[Sale], target: Currency, current: YearMonth) -> Vec<SalesPoint> {
    let mut points: BTreeMap<YearMonth, (f64, f64)> = current
        .trailing(TREND_MONTHS)
        .into_iter()
        .map(|month| (month, (0.0, 0.0)))
        .collect();
    for sale in sales {
        if let Some(slot) = points.get_mut(&YearMonth::of(sale.date)) {
            slot.0 += convert(sale.selling_price, sale.currency, target);
            slot.1 += convert(sale.figures.net_profit, sale.currency, target);
        }
    }
    points
        .into_iter()
        .map(|(month, (sales, profit))| SalesPoint {
            month,
            sales,
            profit,
        })
        .collect()
}

fn recent_activity(snapshot: &Snapshot, target: Currency) -> Vec<Activity> {
    let activity = |kind, description: String, amount: f64, currency, date| Activity {
        kind,
        description,
        amount: convert(amount, currency, target),
        original_amount: amount,
        original_currency: currency,
        date,
    };

    let mut sales: Vec<&Sale> = snapshot.sales.iter().collect();
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    let mut expenses: Vec<&Expense> = snapshot.expenses.iter().collect();
    expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    let mut paid: Vec<&Salary> = snapshot.salaries.iter().filter(|s| s.is_paid()).collect();
    paid.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

    let mut feed: Vec<Activity> = sales
        .into_iter()
        .take(RECENT_SALES)
        .map(|s| {
            activity(
                ActivityKind::Sale,
                s.description.clone(),
                s.selling_price,
                s.currency,
                s.date,
            )
        })
        .chain(expenses.into_iter().take(RECENT_EXPENSES).map(|e| {
            activity(
                ActivityKind::Expense,
                e.description.clone(),
                e.amount,
                e.currency,
                e.date,
            )
        }))
        .chain(paid.into_iter().take(RECENT_SALARIES).map(|s| {
            activity(
                ActivityKind::Salary,
                format!("{} - {}", s.employee_name, s.month),
                s.net_salary,
                s.currency,
                s.activity_date(),
            )
        }))
        .collect();
    feed.sort_by(|a, b| b.date.cmp(&a.date));
    feed.truncate(RECENT_ACTIVITY_LIMIT);
    feed
}
