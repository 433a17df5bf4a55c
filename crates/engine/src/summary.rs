//! Per-module totals.
//!
//! Every fold takes records already filtered by the caller plus an explicit
//! target currency, and converts each record before adding it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    BankPdc, BusinessInHand, CashflowEntry, Currency, Expense, FutureNeed, Liability, Sale, Salary,
    YearMonth,
    bank_pdc::PdcStatus,
    business_in_hand::{PipelineStatus, PipelineType},
    cashflow::FlowType,
    currency::convert,
    expenses::ExpenseStatus,
    future_needs::NeedStatus,
    salaries::SalaryStatus,
};

fn sum<T>(records: &[T], target: Currency, value: impl Fn(&T) -> (f64, Currency)) -> f64 {
    records
        .iter()
        .map(|record| {
            let (amount, currency) = value(record);
            convert(amount, currency, target)
        })
        .sum()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub total_cost: f64,
    pub total_gross_profit: f64,
    pub total_net_profit: f64,
    /// Plain mean of the stored margins (percentages need no conversion).
    pub average_gross_margin: f64,
    pub average_net_margin: f64,
    pub sales_count: usize,
}

impl SalesSummary {
    #[must_use]
    pub fn build(sales: &[Sale], target: Currency) -> Self {
        let count = sales.len();
        let mean = |margin: fn(&Sale) -> f64| {
            if count == 0 {
                0.0
            } else {
                sales.iter().map(margin).sum::<f64>() / count as f64
            }
        };
        Self {
            total_sales: sum(sales, target, |s| (s.selling_price, s.currency)),
            total_cost: sum(sales, target, |s| (s.cost, s.currency)),
            total_gross_profit: sum(sales, target, |s| (s.figures.gross_profit, s.currency)),
            total_net_profit: sum(sales, target, |s| (s.figures.net_profit, s.currency)),
            average_gross_margin: mean(|s| s.figures.gross_profit_margin),
            average_net_margin: mean(|s| s.figures.net_profit_margin),
            sales_count: count,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total_expenses: f64,
    pub paid_expenses: f64,
    pub unpaid_expenses: f64,
    pub expense_count: usize,
}

impl ExpenseSummary {
    #[must_use]
    pub fn build(expenses: &[Expense], target: Currency) -> Self {
        let by_status = |status: ExpenseStatus| {
            sum(expenses, target, |e| {
                let amount = if e.status == status { e.amount } else { 0.0 };
                (amount, e.currency)
            })
        };
        Self {
            total_expenses: sum(expenses, target, |e| (e.amount, e.currency)),
            paid_expenses: by_status(ExpenseStatus::Paid),
            unpaid_expenses: by_status(ExpenseStatus::Unpaid),
            expense_count: expenses.len(),
        }
    }
}

/// One category of [`ExpenseSummary`], sorted by total descending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

#[must_use]
pub fn expenses_by_category(expenses: &[Expense], target: Currency) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for expense in expenses {
        let slot = groups.entry(expense.category.as_str()).or_default();
        slot.0 += convert(expense.amount, expense.currency, target);
        slot.1 += 1;
    }
    let mut out: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    // Equal totals keep category order.
    out.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    out
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiabilitySummary {
    pub total_original_amount: f64,
    pub total_outstanding_balance: f64,
    pub total_paid_amount: f64,
    pub liability_count: usize,
    pub overdue_count: usize,
}

impl LiabilitySummary {
    #[must_use]
    pub fn build(liabilities: &[Liability], target: Currency, today: NaiveDate) -> Self {
        let total_original_amount = sum(liabilities, target, |l| (l.original_amount, l.currency));
        let total_outstanding_balance =
            sum(liabilities, target, |l| (l.outstanding_balance, l.currency));
        Self {
            total_original_amount,
            total_outstanding_balance,
            total_paid_amount: total_original_amount - total_outstanding_balance,
            liability_count: liabilities.len(),
            overdue_count: liabilities.iter().filter(|l| l.is_overdue(today)).count(),
        }
    }
}

/// A liability still owed, with the signed number of days until it is due.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpcomingLiability {
    #[serde(flatten)]
    pub liability: Liability,
    /// Negative once overdue.
    pub days_until_due: i64,
}

/// Outstanding liabilities due within `days` of `today` (overdue included),
/// soonest first.
#[must_use]
pub fn upcoming_liabilities(
    liabilities: Vec<Liability>,
    today: NaiveDate,
    days: i64,
) -> Vec<UpcomingLiability> {
    let mut out: Vec<UpcomingLiability> = liabilities
        .into_iter()
        .filter(|l| l.outstanding_balance > 0.0)
        .map(|liability| UpcomingLiability {
            days_until_due: (liability.due_date - today).num_days(),
            liability,
        })
        .filter(|u| u.days_until_due <= days)
        .collect();
    out.sort_by_key(|u| (u.days_until_due, u.liability.id));
    out
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    pub total_salaries: f64,
    pub paid_salaries: f64,
    pub pending_salaries: f64,
    pub employee_count: usize,
    pub paid_employee_count: usize,
    pub pending_employee_count: usize,
}

impl SalarySummary {
    #[must_use]
    pub fn build(salaries: &[Salary], target: Currency) -> Self {
        let by_status = |status: SalaryStatus| {
            sum(salaries, target, |s| {
                let amount = if s.payment_status == status {
                    s.net_salary
                } else {
                    0.0
                };
                (amount, s.currency)
            })
        };
        let count = |status: SalaryStatus| {
            salaries
                .iter()
                .filter(|s| s.payment_status == status)
                .count()
        };
        Self {
            total_salaries: sum(salaries, target, |s| (s.net_salary, s.currency)),
            paid_salaries: by_status(SalaryStatus::Paid),
            pending_salaries: by_status(SalaryStatus::Pending),
            employee_count: salaries.len(),
            paid_employee_count: count(SalaryStatus::Paid),
            pending_employee_count: count(SalaryStatus::Pending),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySalaries {
    pub month: YearMonth,
    #[serde(flatten)]
    pub summary: SalarySummary,
}

/// One [`SalarySummary`] per month present, oldest first.
#[must_use]
pub fn salaries_by_month(salaries: &[Salary], target: Currency) -> Vec<MonthlySalaries> {
    let mut groups: BTreeMap<YearMonth, Vec<Salary>> = BTreeMap::new();
    for salary in salaries {
        groups.entry(salary.month).or_default().push(salary.clone());
    }
    groups
        .into_iter()
        .map(|(month, salaries)| MonthlySalaries {
            month,
            summary: SalarySummary::build(&salaries, target),
        })
        .collect()
}

/// Employee name with the role of their most recent salary month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_name: String,
    pub role: String,
}

#[must_use]
pub fn employees(salaries: &[Salary]) -> Vec<Employee> {
    let mut latest: BTreeMap<&str, &Salary> = BTreeMap::new();
    for salary in salaries {
        latest
            .entry(salary.employee_name.as_str())
            .and_modify(|current| {
                if salary.month > current.month {
                    *current = salary;
                }
            })
            .or_insert(salary);
    }
    latest
        .into_iter()
        .map(|(name, salary)| Employee {
            employee_name: name.to_string(),
            role: salary.role.clone(),
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PdcSummary {
    pub total_amount: f64,
    pub cleared_amount: f64,
    pub pending_amount: f64,
    pub total_count: usize,
    pub cleared_count: usize,
    pub pending_count: usize,
}

impl PdcSummary {
    #[must_use]
    pub fn build(cheques: &[BankPdc], target: Currency) -> Self {
        let by_status = |status: PdcStatus| {
            sum(cheques, target, |c| {
                let amount = if c.status == status { c.amount } else { 0.0 };
                (amount, c.currency)
            })
        };
        let count = |status: PdcStatus| cheques.iter().filter(|c| c.status == status).count();
        Self {
            total_amount: sum(cheques, target, |c| (c.amount, c.currency)),
            cleared_amount: by_status(PdcStatus::Cleared),
            pending_amount: by_status(PdcStatus::Pending),
            total_count: cheques.len(),
            cleared_count: count(PdcStatus::Cleared),
            pending_count: count(PdcStatus::Pending),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankTotal {
    pub bank: String,
    #[serde(flatten)]
    pub summary: PdcSummary,
}

/// One [`PdcSummary`] per bank, sorted by bank name.
#[must_use]
pub fn pdc_by_bank(cheques: &[BankPdc], target: Currency) -> Vec<BankTotal> {
    let mut groups: BTreeMap<&str, Vec<BankPdc>> = BTreeMap::new();
    for cheque in cheques {
        groups
            .entry(cheque.bank.as_str())
            .or_default()
            .push(cheque.clone());
    }
    groups
        .into_iter()
        .map(|(bank, cheques)| BankTotal {
            bank: bank.to_string(),
            summary: PdcSummary::build(&cheques, target),
        })
        .collect()
}

/// A pending cheque with the signed number of days until its date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpcomingCheque {
    #[serde(flatten)]
    pub cheque: BankPdc,
    pub days_until_due: i64,
}

/// Pending cheques dated between `today` and `today + days`, soonest first.
#[must_use]
pub fn upcoming_cheques(cheques: Vec<BankPdc>, today: NaiveDate, days: i64) -> Vec<UpcomingCheque> {
    let mut out: Vec<UpcomingCheque> = cheques
        .into_iter()
        .filter(|c| c.status == PdcStatus::Pending)
        .map(|cheque| UpcomingCheque {
            days_until_due: (cheque.date - today).num_days(),
            cheque,
        })
        .filter(|u| (0..=days).contains(&u.days_until_due))
        .collect();
    out.sort_by_key(|u| (u.days_until_due, u.cheque.id));
    out
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FutureNeedSummary {
    pub total_amount: f64,
    pub recurring_amount: f64,
    pub one_time_amount: f64,
    pub total_count: usize,
    pub recurring_count: usize,
    pub one_time_count: usize,
}

impl FutureNeedSummary {
    #[must_use]
    pub fn build(needs: &[FutureNeed], target: Currency) -> Self {
        let by_status = |status: NeedStatus| {
            sum(needs, target, |n| {
                let cost = if n.status == status {
                    n.total_cost()
                } else {
                    0.0
                };
                (cost, n.currency)
            })
        };
        let count = |status: NeedStatus| needs.iter().filter(|n| n.status == status).count();
        Self {
            total_amount: sum(needs, target, |n| (n.total_cost(), n.currency)),
            recurring_amount: by_status(NeedStatus::Recurring),
            one_time_amount: by_status(NeedStatus::OneTime),
            total_count: needs.len(),
            recurring_count: count(NeedStatus::Recurring),
            one_time_count: count(NeedStatus::OneTime),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyNeeds {
    pub month: YearMonth,
    pub total_amount: f64,
    pub count: usize,
}

#[must_use]
pub fn needs_by_month(needs: &[FutureNeed], target: Currency) -> Vec<MonthlyNeeds> {
    let mut groups: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for need in needs {
        let slot = groups.entry(need.month).or_default();
        slot.0 += convert(need.total_cost(), need.currency, target);
        slot.1 += 1;
    }
    groups
        .into_iter()
        .map(|(month, (total_amount, count))| MonthlyNeeds {
            month,
            total_amount,
            count,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpcomingNeed {
    #[serde(flatten)]
    pub need: FutureNeed,
    pub months_until: i32,
    pub total_cost: f64,
}

/// Needs planned between the current month and `months` ahead, soonest first.
#[must_use]
pub fn upcoming_needs(needs: Vec<FutureNeed>, current: YearMonth, months: i32) -> Vec<UpcomingNeed> {
    let mut out: Vec<UpcomingNeed> = needs
        .into_iter()
        .map(|need| UpcomingNeed {
            months_until: current.months_until(need.month),
            total_cost: need.total_cost(),
            need,
        })
        .filter(|u| (0..=months).contains(&u.months_until))
        .collect();
    out.sort_by_key(|u| (u.months_until, u.need.id));
    out
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub total_amount: f64,
    pub confirmed_amount: f64,
    pub pending_amount: f64,
    pub received_amount: f64,
    pub total_count: usize,
    pub confirmed_count: usize,
    pub pending_count: usize,
    pub received_count: usize,
}

impl PipelineSummary {
    #[must_use]
    pub fn build(items: &[BusinessInHand], target: Currency) -> Self {
        let by_status = |status: PipelineStatus| {
            sum(items, target, |i| {
                let amount = if i.status == status { i.amount } else { 0.0 };
                (amount, i.currency)
            })
        };
        let count = |status: PipelineStatus| items.iter().filter(|i| i.status == status).count();
        Self {
            total_amount: sum(items, target, |i| (i.amount, i.currency)),
            confirmed_amount: by_status(PipelineStatus::Confirmed),
            pending_amount: by_status(PipelineStatus::Pending),
            received_amount: by_status(PipelineStatus::Received),
            total_count: items.len(),
            confirmed_count: count(PipelineStatus::Confirmed),
            pending_count: count(PipelineStatus::Pending),
            received_count: count(PipelineStatus::Received),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineTypeTotal {
    #[serde(rename = "type")]
    pub kind: PipelineType,
    pub total_amount: f64,
    pub count: usize,
}

/// Totals for every pipeline type, zero rows included.
#[must_use]
pub fn pipeline_by_type(items: &[BusinessInHand], target: Currency) -> Vec<PipelineTypeTotal> {
    PipelineType::ALL
        .iter()
        .map(|&kind| {
            let of_kind: Vec<&BusinessInHand> = items.iter().filter(|i| i.kind == kind).collect();
            PipelineTypeTotal {
                kind,
                total_amount: of_kind
                    .iter()
                    .map(|i| convert(i.amount, i.currency, target))
                    .sum(),
                count: of_kind.len(),
            }
        })
        .collect()
}

/// A pipeline item with the signed number of days until its expected date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatedPipelineItem {
    #[serde(flatten)]
    pub item: BusinessInHand,
    pub days_until_expected: i64,
}

fn open_items(items: Vec<BusinessInHand>, today: NaiveDate) -> Vec<DatedPipelineItem> {
    items
        .into_iter()
        .filter(|i| !i.is_received())
        .map(|item| DatedPipelineItem {
            days_until_expected: (item.expected_date - today).num_days(),
            item,
        })
        .collect()
}

/// Open items expected between `today` and `today + days`, soonest first.
#[must_use]
pub fn upcoming_pipeline(
    items: Vec<BusinessInHand>,
    today: NaiveDate,
    days: i64,
) -> Vec<DatedPipelineItem> {
    let mut out: Vec<DatedPipelineItem> = open_items(items, today)
        .into_iter()
        .filter(|d| (0..=days).contains(&d.days_until_expected))
        .collect();
    out.sort_by_key(|d| (d.days_until_expected, d.item.id));
    out
}

/// Open items past their expected date, most overdue first.
#[must_use]
pub fn overdue_pipeline(items: Vec<BusinessInHand>, today: NaiveDate) -> Vec<DatedPipelineItem> {
    let mut out: Vec<DatedPipelineItem> = open_items(items, today)
        .into_iter()
        .filter(|d| d.days_until_expected < 0)
        .collect();
    out.sort_by_key(|d| (d.days_until_expected, d.item.id));
    out
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowSummary {
    pub total_inflows: f64,
    pub total_outflows: f64,
    pub net_cashflow: f64,
    pub inflow_count: usize,
    pub outflow_count: usize,
}

impl CashflowSummary {
    #[must_use]
    pub fn build(entries: &[CashflowEntry], target: Currency) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            let amount = convert(entry.amount, entry.currency, target);
            match entry.flow_type {
                FlowType::Inflow => {
                    summary.total_inflows += amount;
                    summary.inflow_count += 1;
                }
                FlowType::Outflow => {
                    summary.total_outflows += amount;
                    summary.outflow_count += 1;
                }
            }
        }
        summary.net_cashflow = summary.total_inflows - summary.total_outflows;
        summary
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashflowCategoryTotal {
    pub category: String,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub total: f64,
    pub count: usize,
}

/// Ledger totals per (category, type), sorted by category then type.
#[must_use]
pub fn cashflow_by_category(
    entries: &[CashflowEntry],
    target: Currency,
) -> Vec<CashflowCategoryTotal> {
    let mut groups: BTreeMap<(&str, &str), (FlowType, f64, usize)> = BTreeMap::new();
    for entry in entries {
        let key = (entry.category.as_str(), entry.flow_type.as_str());
        let slot = groups.entry(key).or_insert((entry.flow_type, 0.0, 0));
        slot.1 += convert(entry.amount, entry.currency, target);
        slot.2 += 1;
    }
    groups
        .into_iter()
        .map(|((category, _), (flow_type, total, count))| CashflowCategoryTotal {
            category: category.to_string(),
            flow_type,
            total,
            count,
        })
        .collect()
}

/// One month of ledger movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashflowPoint {
    pub month: YearMonth,
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
}

/// Ledger movement for the `count` months ending at `current`, oldest first.
/// Months without entries are present with zeros.
#[must_use]
pub fn cashflow_trend(
    entries: &[CashflowEntry],
    target: Currency,
    current: YearMonth,
    count: u32,
) -> Vec<CashflowPoint> {
    let mut points: BTreeMap<YearMonth, (f64, f64)> = current
        .trailing(count)
        .into_iter()
        .map(|month| (month, (0.0, 0.0)))
        .collect();
    for entry in entries {
        if let Some(slot) = points.get_mut(&YearMonth::of(entry.date)) {
            let amount = convert(entry.amount, entry.currency, target);
            match entry.flow_type {
                FlowType::Inflow => slot.0 += amount,
                FlowType::Outflow => slot.1 += amount,
            }
        }
    }
    points
        .into_iter()
        .map(|(month, (inflow, outflow))| CashflowPoint {
            month,
            inflow,
            outflow,
            net: inflow - outflow,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::derived::SaleInputs;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn sale(cost: f64, price: f64, currency: Currency) -> Sale {
        let inputs = SaleInputs::new(cost, price, 0.0);
        Sale {
            id: Uuid::new_v4(),
            date: date("2024-01-10"),
            description: "item".to_string(),
            cost,
            selling_price: price,
            expenses: 0.0,
            figures: inputs.figures(),
            currency,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expense(category: &str, amount: f64, status: ExpenseStatus, currency: Currency) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            date: date("2024-01-10"),
            category: category.to_string(),
            description: "x".to_string(),
            vendor: "v".to_string(),
            amount,
            status,
            currency,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn liability(original: f64, outstanding: f64, due: &str) -> Liability {
        Liability {
            id: Uuid::new_v4(),
            lender_party: "Bank".to_string(),
            liability_type: "loan".to_string(),
            start_date: date("2024-01-01"),
            due_date: date(due),
            original_amount: original,
            outstanding_balance: outstanding,
            currency: Currency::Usd,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entry(day: &str, flow_type: FlowType, amount: f64, currency: Currency) -> CashflowEntry {
        CashflowEntry::new(crate::cashflow::NewCashflowEntry {
            date: date(day),
            flow_type,
            category: "misc".to_string(),
            description: "x".to_string(),
            amount,
            currency,
            reference_id: None,
        })
    }

    #[test]
    fn sales_summary_converts_each_sale() {
        let sales = vec![
            sale(100.0, 200.0, Currency::Usd),
            sale(375.0, 750.0, Currency::Sar),
        ];
        let summary = SalesSummary::build(&sales, Currency::Usd);
        assert!((summary.total_sales - 400.0).abs() < 1e-9);
        assert!((summary.total_cost - 200.0).abs() < 1e-9);
        assert!((summary.average_gross_margin - 50.0).abs() < 1e-9);
        assert_eq!(summary.sales_count, 2);
    }

    #[test]
    fn empty_sales_have_zero_margins() {
        let summary = SalesSummary::build(&[], Currency::Sar);
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn expense_summary_partitions_by_status() {
        let expenses = vec![
            expense("rent", 100.0, ExpenseStatus::Paid, Currency::Usd),
            expense("fuel", 50.0, ExpenseStatus::Unpaid, Currency::Usd),
        ];
        let summary = ExpenseSummary::build(&expenses, Currency::Usd);
        assert_eq!(summary.total_expenses, 150.0);
        assert_eq!(summary.paid_expenses, 100.0);
        assert_eq!(summary.unpaid_expenses, 50.0);
        assert_eq!(summary.expense_count, 2);
    }

    #[test]
    fn categories_sorted_by_total() {
        let expenses = vec![
            expense("fuel", 10.0, ExpenseStatus::Paid, Currency::Usd),
            expense("rent", 100.0, ExpenseStatus::Paid, Currency::Usd),
            expense("fuel", 15.0, ExpenseStatus::Paid, Currency::Usd),
        ];
        let groups = expenses_by_category(&expenses, Currency::Usd);
        assert_eq!(groups[0].category, "rent");
        assert_eq!(groups[1].total, 25.0);
        assert_eq!(groups[1].count, 2);
    }

    #[test]
    fn liability_summary_counts_overdue_with_balance() {
        let liabilities = vec![
            liability(1000.0, 400.0, "2024-01-01"),
            liability(500.0, 0.0, "2024-01-01"),
            liability(300.0, 300.0, "2030-01-01"),
        ];
        let summary = LiabilitySummary::build(&liabilities, Currency::Usd, date("2024-06-01"));
        assert_eq!(summary.total_original_amount, 1800.0);
        assert_eq!(summary.total_outstanding_balance, 700.0);
        assert_eq!(summary.total_paid_amount, 1100.0);
        assert_eq!(summary.overdue_count, 1);
    }

    #[test]
    fn upcoming_liabilities_include_overdue_first() {
        let today = date("2024-06-01");
        let upcoming = upcoming_liabilities(
            vec![
                liability(100.0, 100.0, "2024-06-20"),
                liability(100.0, 100.0, "2024-05-30"),
                liability(100.0, 100.0, "2024-09-01"),
                liability(100.0, 0.0, "2024-06-02"),
            ],
            today,
            30,
        );
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].days_until_due, -2);
        assert_eq!(upcoming[1].days_until_due, 19);
    }

    #[test]
    fn trend_is_never_sparse() {
        let entries = vec![
            entry("2024-03-05", FlowType::Inflow, 100.0, Currency::Usd),
            entry("2024-03-09", FlowType::Outflow, 37.5, Currency::Sar),
            entry("2020-01-01", FlowType::Inflow, 999.0, Currency::Usd),
        ];
        let trend = cashflow_trend(&entries, Currency::Usd, month("2024-06"), 12);
        assert_eq!(trend.len(), 12);
        assert_eq!(trend[0].month, month("2023-07"));
        assert_eq!(trend[11].month, month("2024-06"));
        let march = trend.iter().find(|p| p.month == month("2024-03")).unwrap();
        assert!((march.net - 90.0).abs() < 1e-9);
        assert_eq!(trend.iter().filter(|p| p.inflow == 0.0).count(), 11);
    }

    #[test]
    fn cashflow_summary_nets() {
        let entries = vec![
            entry("2024-03-05", FlowType::Inflow, 100.0, Currency::Usd),
            entry("2024-03-09", FlowType::Outflow, 40.0, Currency::Usd),
        ];
        let summary = CashflowSummary::build(&entries, Currency::Usd);
        assert_eq!(summary.net_cashflow, 60.0);
        assert_eq!(summary.inflow_count, 1);
        assert_eq!(summary.outflow_count, 1);
    }

    #[test]
    fn employees_keep_latest_role() {
        let base = Salary {
            id: Uuid::new_v4(),
            employee_name: "Sara".to_string(),
            role: "Clerk".to_string(),
            net_salary: 1.0,
            payment_status: SalaryStatus::Paid,
            payment_date: None,
            month: month("2024-01"),
            currency: Currency::Usd,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut promoted = base.clone();
        promoted.month = month("2024-02");
        promoted.role = "Manager".to_string();
        let list = employees(&[promoted, base]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].role, "Manager");
    }
}
