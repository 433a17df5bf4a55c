//! Flat export sheets.
//!
//! A sheet is a header row, one row per record with money already converted
//! into the target currency, and a few labelled totals. Rendering it into a
//! file format is left to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    BankPdc, BusinessInHand, CashflowEntry, Currency, Expense, FutureNeed, Liability, Sale, Salary,
    currency::convert,
    summary::{
        CashflowSummary, ExpenseSummary, FutureNeedSummary, LiabilitySummary, PdcSummary,
        PipelineSummary, SalarySummary, SalesSummary,
    },
    util::string_enum,
};

string_enum! {
    pub enum ExportModule {
        Sales => "sales",
        Expenses => "expenses",
        Liabilities => "liabilities",
        Salaries => "salaries",
        BankPdc => "bank-pdc",
        FutureNeeds => "future-needs",
        BusinessInHand => "business-in-hand",
        Cashflow => "cashflow",
    }
}

/// One labelled total printed under the rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryFigure {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSheet {
    pub title: String,
    pub currency: Currency,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub summary: Vec<SummaryFigure>,
}

impl ExportSheet {
    fn new(title: &str, currency: Currency, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            currency,
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
            summary: Vec::new(),
        }
    }

    fn figure(mut self, label: &str, value: String) -> Self {
        self.summary.push(SummaryFigure {
            label: label.to_string(),
            value,
        });
        self
    }

    /// Base file name, e.g. `sales_2024-06-01`.
    #[must_use]
    pub fn file_stem(&self, module: ExportModule, today: NaiveDate) -> String {
        format!("{}_{today}", module.as_str().replace('-', "_"))
    }
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn converted(amount: f64, from: Currency, target: Currency) -> String {
    money(convert(amount, from, target))
}

#[must_use]
pub fn sales_sheet(sales: &[Sale], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Sales",
        target,
        &[
            "Date",
            "Description",
            "Cost",
            "Selling Price",
            "Gross Profit",
            "GP Margin %",
            "Expenses",
            "Net Profit",
            "NP Margin %",
            "Original Currency",
        ],
    );
    sheet.rows = sales
        .iter()
        .map(|s| {
            vec![
                s.date.to_string(),
                s.description.clone(),
                converted(s.cost, s.currency, target),
                converted(s.selling_price, s.currency, target),
                converted(s.figures.gross_profit, s.currency, target),
                percent(s.figures.gross_profit_margin),
                converted(s.expenses, s.currency, target),
                converted(s.figures.net_profit, s.currency, target),
                percent(s.figures.net_profit_margin),
                s.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = SalesSummary::build(sales, target);
    sheet
        .figure("Total Sales", money(totals.total_sales))
        .figure("Total Cost", money(totals.total_cost))
        .figure("Total Gross Profit", money(totals.total_gross_profit))
        .figure("Total Net Profit", money(totals.total_net_profit))
        .figure("Average GP Margin", percent(totals.average_gross_margin))
        .figure("Average NP Margin", percent(totals.average_net_margin))
        .figure("Total Records", totals.sales_count.to_string())
}

#[must_use]
pub fn expenses_sheet(expenses: &[Expense], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Expenses",
        target,
        &[
            "Date",
            "Description",
            "Category",
            "Vendor",
            "Amount",
            "Status",
            "Original Currency",
        ],
    );
    sheet.rows = expenses
        .iter()
        .map(|e| {
            vec![
                e.date.to_string(),
                e.description.clone(),
                e.category.clone(),
                e.vendor.clone(),
                converted(e.amount, e.currency, target),
                e.status.to_string(),
                e.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = ExpenseSummary::build(expenses, target);
    sheet
        .figure("Total Expenses", money(totals.total_expenses))
        .figure("Paid Expenses", money(totals.paid_expenses))
        .figure("Unpaid Expenses", money(totals.unpaid_expenses))
        .figure("Total Records", totals.expense_count.to_string())
}

#[must_use]
pub fn liabilities_sheet(
    liabilities: &[Liability],
    target: Currency,
    today: NaiveDate,
) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Liabilities",
        target,
        &[
            "Lender",
            "Type",
            "Start Date",
            "Due Date",
            "Original Amount",
            "Outstanding Balance",
            "Original Currency",
        ],
    );
    sheet.rows = liabilities
        .iter()
        .map(|l| {
            vec![
                l.lender_party.clone(),
                l.liability_type.clone(),
                l.start_date.to_string(),
                l.due_date.to_string(),
                converted(l.original_amount, l.currency, target),
                converted(l.outstanding_balance, l.currency, target),
                l.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = LiabilitySummary::build(liabilities, target, today);
    sheet
        .figure("Total Original Amount", money(totals.total_original_amount))
        .figure(
            "Total Outstanding Balance",
            money(totals.total_outstanding_balance),
        )
        .figure("Total Paid", money(totals.total_paid_amount))
        .figure("Overdue Liabilities", totals.overdue_count.to_string())
        .figure("Total Records", totals.liability_count.to_string())
}

#[must_use]
pub fn salaries_sheet(salaries: &[Salary], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Salaries",
        target,
        &[
            "Month",
            "Employee Name",
            "Role",
            "Net Salary",
            "Status",
            "Payment Date",
            "Original Currency",
        ],
    );
    sheet.rows = salaries
        .iter()
        .map(|s| {
            vec![
                s.month.to_string(),
                s.employee_name.clone(),
                s.role.clone(),
                converted(s.net_salary, s.currency, target),
                s.payment_status.to_string(),
                s.payment_date.map(|d| d.to_string()).unwrap_or_default(),
                s.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = SalarySummary::build(salaries, target);
    sheet
        .figure("Total Salaries", money(totals.total_salaries))
        .figure("Paid Salaries", money(totals.paid_salaries))
        .figure("Pending Salaries", money(totals.pending_salaries))
        .figure("Total Records", totals.employee_count.to_string())
}

#[must_use]
pub fn bank_pdc_sheet(cheques: &[BankPdc], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Bank PDC",
        target,
        &[
            "Date",
            "Code",
            "Description",
            "Bank",
            "Cheque Number",
            "Supplier",
            "Amount",
            "Status",
            "Original Currency",
        ],
    );
    sheet.rows = cheques
        .iter()
        .map(|c| {
            vec![
                c.date.to_string(),
                c.code.clone(),
                c.description.clone(),
                c.bank.clone(),
                c.cheque_number.clone(),
                c.supplier.clone(),
                converted(c.amount, c.currency, target),
                c.status.to_string(),
                c.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = PdcSummary::build(cheques, target);
    sheet
        .figure("Total Amount", money(totals.total_amount))
        .figure("Pending Amount", money(totals.pending_amount))
        .figure("Cleared Amount", money(totals.cleared_amount))
        .figure("Total Records", totals.total_count.to_string())
}

#[must_use]
pub fn future_needs_sheet(needs: &[FutureNeed], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Future Needs",
        target,
        &[
            "Month",
            "Description",
            "Quantity",
            "Unit Amount",
            "Total Cost",
            "Status",
            "Remarks",
            "Original Currency",
        ],
    );
    sheet.rows = needs
        .iter()
        .map(|n| {
            vec![
                n.month.to_string(),
                n.description.clone(),
                n.quantity.to_string(),
                converted(n.amount, n.currency, target),
                converted(n.total_cost(), n.currency, target),
                n.status.to_string(),
                n.remarks.clone().unwrap_or_default(),
                n.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = FutureNeedSummary::build(needs, target);
    sheet
        .figure("Total Amount", money(totals.total_amount))
        .figure("Recurring Amount", money(totals.recurring_amount))
        .figure("One-time Amount", money(totals.one_time_amount))
        .figure("Total Records", totals.total_count.to_string())
}

#[must_use]
pub fn business_in_hand_sheet(items: &[BusinessInHand], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Business in Hand",
        target,
        &[
            "Expected Date",
            "Type",
            "Description",
            "Amount",
            "Status",
            "Original Currency",
        ],
    );
    sheet.rows = items
        .iter()
        .map(|i| {
            vec![
                i.expected_date.to_string(),
                i.kind.to_string(),
                i.description.clone(),
                converted(i.amount, i.currency, target),
                i.status.to_string(),
                i.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = PipelineSummary::build(items, target);
    sheet
        .figure("Total Amount", money(totals.total_amount))
        .figure("Confirmed Amount", money(totals.confirmed_amount))
        .figure("Received Amount", money(totals.received_amount))
        .figure("Pending Amount", money(totals.pending_amount))
        .figure("Total Records", totals.total_count.to_string())
}

#[must_use]
pub fn cashflow_sheet(entries: &[CashflowEntry], target: Currency) -> ExportSheet {
    let mut sheet = ExportSheet::new(
        "Cash Flow",
        target,
        &[
            "Date",
            "Type",
            "Category",
            "Description",
            "Amount",
            "Original Currency",
        ],
    );
    sheet.rows = entries
        .iter()
        .map(|e| {
            vec![
                e.date.to_string(),
                e.flow_type.to_string(),
                e.category.clone(),
                e.description.clone(),
                converted(e.amount, e.currency, target),
                e.currency.code().to_string(),
            ]
        })
        .collect();
    let totals = CashflowSummary::build(entries, target);
    sheet
        .figure("Total Inflow", money(totals.total_inflows))
        .figure("Total Outflow", money(totals.total_outflows))
        .figure("Net Cash Flow", money(totals.net_cashflow))
        .figure(
            "Total Records",
            (totals.inflow_count + totals.outflow_count).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::expenses::ExpenseStatus;

    #[test]
    fn rows_are_converted_and_rounded() {
        let expense = Expense {
            id: Uuid::new_v4(),
            date: "2024-02-01".parse().unwrap(),
            category: "rent".to_string(),
            description: "office".to_string(),
            vendor: "landlord".to_string(),
            amount: 50.0,
            status: ExpenseStatus::Paid,
            currency: Currency::Aed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let sheet = expenses_sheet(&[expense], Currency::Usd);
        assert_eq!(sheet.headers.len(), sheet.rows[0].len());
        assert_eq!(sheet.rows[0][4], "13.62");
        assert_eq!(sheet.rows[0][6], "AED");
        assert_eq!(sheet.summary[0].label, "Total Expenses");
        assert_eq!(sheet.summary[0].value, "13.62");
    }

    #[test]
    fn module_names_parse() {
        assert_eq!(
            ExportModule::try_from("bank-pdc").unwrap(),
            ExportModule::BankPdc
        );
        assert!(ExportModule::try_from("payroll").is_err());
    }

    #[test]
    fn file_stem_uses_underscores() {
        let sheet = cashflow_sheet(&[], Currency::Sar);
        let today = "2024-06-01".parse().unwrap();
        assert_eq!(
            sheet.file_stem(ExportModule::FutureNeeds, today),
            "future_needs_2024-06-01"
        );
        assert_eq!(sheet.summary[3].value, "0");
    }
}
