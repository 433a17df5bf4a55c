//! Projection of business events into the cashflow ledger.
//!
//! Module writes never insert ledger rows themselves. They describe what
//! happened as a [`LedgerEvent`] (the detection functions below are pure and
//! only look at the record before and after the write), and the [`Ledger`]
//! projector turns each event into exactly one [`CashflowEntry`].
//!
//! | Event | Type | Category |
//! |---|---|---|
//! | [`LedgerEvent::SaleCreated`] | inflow | `sales` |
//! | [`LedgerEvent::ExpenseCreated`] | outflow | `expenses` |
//! | [`LedgerEvent::LiabilityFunded`] | inflow | `liabilities` |
//! | [`LedgerEvent::LiabilityPaid`] | outflow | `liabilities` |
//! | [`LedgerEvent::SalaryPaid`] | outflow | `salaries` |
//! | [`LedgerEvent::ChequeCleared`] | outflow | `pdc` |
//! | [`LedgerEvent::BusinessReceived`] | inflow | `receivables` |

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    BankPdc, BusinessInHand, Currency, Expense, Liability, ResultEngine, Sale, Salary, YearMonth,
    bank_pdc::PdcStatus,
    cashflow::{self, CashflowEntry, FlowType, NewCashflowEntry},
};

pub const CATEGORY_SALES: &str = "sales";
pub const CATEGORY_EXPENSES: &str = "expenses";
pub const CATEGORY_LIABILITIES: &str = "liabilities";
pub const CATEGORY_SALARIES: &str = "salaries";
pub const CATEGORY_PDC: &str = "pdc";
pub const CATEGORY_RECEIVABLES: &str = "receivables";

/// A business fact with a cash effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    SaleCreated {
        sale_id: Uuid,
        date: NaiveDate,
        description: String,
        selling_price: f64,
        currency: Currency,
    },
    ExpenseCreated {
        expense_id: Uuid,
        date: NaiveDate,
        description: String,
        amount: f64,
        currency: Currency,
    },
    LiabilityFunded {
        liability_id: Uuid,
        start_date: NaiveDate,
        lender_party: String,
        liability_type: String,
        original_amount: f64,
        currency: Currency,
    },
    LiabilityPaid {
        liability_id: Uuid,
        payment_date: NaiveDate,
        lender_party: String,
        liability_type: String,
        payment_amount: f64,
        currency: Currency,
    },
    SalaryPaid {
        salary_id: Uuid,
        payment_date: NaiveDate,
        employee_name: String,
        month: YearMonth,
        net_salary: f64,
        currency: Currency,
    },
    ChequeCleared {
        pdc_id: Uuid,
        date: NaiveDate,
        supplier: String,
        cheque_number: String,
        amount: f64,
        currency: Currency,
    },
    BusinessReceived {
        item_id: Uuid,
        received_on: NaiveDate,
        description: String,
        amount: f64,
        currency: Currency,
    },
}

impl LedgerEvent {
    /// Id of the record the event originates from.
    #[must_use]
    pub fn reference_id(&self) -> Uuid {
        match self {
            Self::SaleCreated { sale_id, .. } => *sale_id,
            Self::ExpenseCreated { expense_id, .. } => *expense_id,
            Self::LiabilityFunded { liability_id, .. }
            | Self::LiabilityPaid { liability_id, .. } => *liability_id,
            Self::SalaryPaid { salary_id, .. } => *salary_id,
            Self::ChequeCleared { pdc_id, .. } => *pdc_id,
            Self::BusinessReceived { item_id, .. } => *item_id,
        }
    }

    /// The ledger row this event projects to.
    #[must_use]
    pub fn entry(&self) -> NewCashflowEntry {
        let (date, flow_type, category, description, amount, currency) = match self {
            Self::SaleCreated {
                date,
                description,
                selling_price,
                currency,
                ..
            } => (
                *date,
                FlowType::Inflow,
                CATEGORY_SALES,
                format!("Sale: {description}"),
                *selling_price,
                *currency,
            ),
            Self::ExpenseCreated {
                date,
                description,
                amount,
                currency,
                ..
            } => (
                *date,
                FlowType::Outflow,
                CATEGORY_EXPENSES,
                format!("Expense: {description}"),
                *amount,
                *currency,
            ),
            Self::LiabilityFunded {
                start_date,
                lender_party,
                liability_type,
                original_amount,
                currency,
                ..
            } => (
                *start_date,
                FlowType::Inflow,
                CATEGORY_LIABILITIES,
                format!("Liability: {lender_party} - {liability_type}"),
                *original_amount,
                *currency,
            ),
            Self::LiabilityPaid {
                payment_date,
                lender_party,
                liability_type,
                payment_amount,
                currency,
                ..
            } => (
                *payment_date,
                FlowType::Outflow,
                CATEGORY_LIABILITIES,
                format!("Payment to {lender_party} - {liability_type}"),
                *payment_amount,
                *currency,
            ),
            Self::SalaryPaid {
                payment_date,
                employee_name,
                month,
                net_salary,
                currency,
                ..
            } => (
                *payment_date,
                FlowType::Outflow,
                CATEGORY_SALARIES,
                format!("Salary: {employee_name} - {month}"),
                *net_salary,
                *currency,
            ),
            Self::ChequeCleared {
                date,
                supplier,
                cheque_number,
                amount,
                currency,
                ..
            } => (
                *date,
                FlowType::Outflow,
                CATEGORY_PDC,
                format!("PDC: {supplier} - {cheque_number}"),
                *amount,
                *currency,
            ),
            Self::BusinessReceived {
                received_on,
                description,
                amount,
                currency,
                ..
            } => (
                *received_on,
                FlowType::Inflow,
                CATEGORY_RECEIVABLES,
                format!("Received: {description}"),
                *amount,
                *currency,
            ),
        };
        NewCashflowEntry {
            date,
            flow_type,
            category: category.to_string(),
            description,
            amount,
            currency,
            reference_id: Some(self.reference_id()),
        }
    }
}

#[must_use]
pub fn sale_created(sale: &Sale) -> LedgerEvent {
    LedgerEvent::SaleCreated {
        sale_id: sale.id,
        date: sale.date,
        description: sale.description.clone(),
        selling_price: sale.selling_price,
        currency: sale.currency,
    }
}

#[must_use]
pub fn expense_created(expense: &Expense) -> LedgerEvent {
    LedgerEvent::ExpenseCreated {
        expense_id: expense.id,
        date: expense.date,
        description: expense.description.clone(),
        amount: expense.amount,
        currency: expense.currency,
    }
}

#[must_use]
pub fn liability_funded(liability: &Liability) -> LedgerEvent {
    LedgerEvent::LiabilityFunded {
        liability_id: liability.id,
        start_date: liability.start_date,
        lender_party: liability.lender_party.clone(),
        liability_type: liability.liability_type.clone(),
        original_amount: liability.original_amount,
        currency: liability.currency,
    }
}

/// The full payment is recorded, even the part a clamp discarded.
#[must_use]
pub fn liability_paid(liability: &Liability, amount: f64, date: NaiveDate) -> LedgerEvent {
    LedgerEvent::LiabilityPaid {
        liability_id: liability.id,
        payment_date: date,
        lender_party: liability.lender_party.clone(),
        liability_type: liability.liability_type.clone(),
        payment_amount: amount,
        currency: liability.currency,
    }
}

/// A salary is paid out when it becomes `paid` with a payment date.
///
/// `before` is `None` on creation. Saving an already paid salary again yields
/// nothing.
#[must_use]
pub fn salary_transition(before: Option<&Salary>, after: &Salary) -> Option<LedgerEvent> {
    if before.is_some_and(Salary::is_paid) || !after.is_paid() {
        return None;
    }
    let payment_date = after.payment_date?;
    Some(LedgerEvent::SalaryPaid {
        salary_id: after.id,
        payment_date,
        employee_name: after.employee_name.clone(),
        month: after.month,
        net_salary: after.net_salary,
        currency: after.currency,
    })
}

/// A cheque leaves the account when created cleared or moved from pending
/// to cleared.
#[must_use]
pub fn cheque_transition(before: Option<&BankPdc>, after: &BankPdc) -> Option<LedgerEvent> {
    if after.status != PdcStatus::Cleared {
        return None;
    }
    if before.is_some_and(|b| b.status != PdcStatus::Pending) {
        return None;
    }
    Some(LedgerEvent::ChequeCleared {
        pdc_id: after.id,
        date: after.date,
        supplier: after.supplier.clone(),
        cheque_number: after.cheque_number.clone(),
        amount: after.amount,
        currency: after.currency,
    })
}

/// Pipeline revenue is booked on the day it moves to `received`.
///
/// Creating an item already received books nothing.
#[must_use]
pub fn pipeline_transition(
    before: Option<&BusinessInHand>,
    after: &BusinessInHand,
    today: NaiveDate,
) -> Option<LedgerEvent> {
    let before = before?;
    if before.is_received() || !after.is_received() {
        return None;
    }
    Some(LedgerEvent::BusinessReceived {
        item_id: after.id,
        received_on: today,
        description: after.description.clone(),
        amount: after.amount,
        currency: after.currency,
    })
}

/// Sole writer of event-driven ledger rows.
#[derive(Clone, Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Append the entry for `event`.
    pub async fn project(&self, event: &LedgerEvent) -> ResultEngine<CashflowEntry> {
        let entry = CashflowEntry::new(event.entry());
        let model: cashflow::ActiveModel = (&entry).into();
        model.insert(&self.database).await?;
        tracing::info!(
            entry_id = %entry.id,
            reference_id = %event.reference_id(),
            category = %entry.category,
            flow_type = %entry.flow_type,
            amount = entry.amount,
            "ledger entry projected"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        business_in_hand::{PipelineStatus, PipelineType},
        derived::SaleInputs,
        salaries::SalaryStatus,
    };

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn salary(status: SalaryStatus, payment_date: Option<NaiveDate>) -> Salary {
        Salary {
            id: Uuid::new_v4(),
            employee_name: "Omar".to_string(),
            role: "Driver".to_string(),
            net_salary: 4000.0,
            payment_status: status,
            payment_date,
            month: "2024-03".parse().unwrap(),
            currency: Currency::Sar,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn cheque(status: PdcStatus) -> BankPdc {
        BankPdc {
            id: Uuid::new_v4(),
            code: "PDC-1".to_string(),
            date: date("2024-04-01"),
            description: "steel".to_string(),
            amount: 900.0,
            status,
            bank: "NCB".to_string(),
            cheque_number: "000123".to_string(),
            supplier: "Acme".to_string(),
            creation_date: date("2024-03-01"),
            currency: Currency::Aed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pipeline(status: PipelineStatus) -> BusinessInHand {
        BusinessInHand {
            id: Uuid::new_v4(),
            kind: PipelineType::PendingInvoice,
            description: "INV-7".to_string(),
            amount: 1500.0,
            expected_date: date("2024-05-10"),
            status,
            currency: Currency::Usd,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sale_projects_selling_price_inflow() {
        let inputs = SaleInputs::new(100.0, 200.0, 20.0);
        let sale = Sale {
            id: Uuid::new_v4(),
            date: date("2024-01-05"),
            description: "Laptop".to_string(),
            cost: inputs.cost,
            selling_price: inputs.selling_price,
            expenses: inputs.expenses,
            figures: inputs.figures(),
            currency: Currency::Usd,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let entry = sale_created(&sale).entry();
        assert_eq!(entry.flow_type, FlowType::Inflow);
        assert_eq!(entry.category, CATEGORY_SALES);
        assert_eq!(entry.amount, 200.0);
        assert_eq!(entry.description, "Sale: Laptop");
        assert_eq!(entry.reference_id, Some(sale.id));
    }

    #[test]
    fn salary_pays_once() {
        let pending = salary(SalaryStatus::Pending, None);
        let mut paid = pending.clone();
        paid.payment_status = SalaryStatus::Paid;
        paid.payment_date = Some(date("2024-03-28"));

        let event = salary_transition(Some(&pending), &paid).unwrap();
        let entry = event.entry();
        assert_eq!(entry.flow_type, FlowType::Outflow);
        assert_eq!(entry.date, date("2024-03-28"));
        assert_eq!(entry.description, "Salary: Omar - 2024-03");

        assert_eq!(salary_transition(Some(&paid), &paid), None);
    }

    #[test]
    fn salary_needs_payment_date() {
        let pending = salary(SalaryStatus::Pending, None);
        let mut paid = pending.clone();
        paid.payment_status = SalaryStatus::Paid;
        assert_eq!(salary_transition(Some(&pending), &paid), None);
        assert_eq!(salary_transition(None, &paid), None);
    }

    #[test]
    fn salary_created_paid_emits() {
        let paid = salary(SalaryStatus::Paid, Some(date("2024-03-30")));
        assert!(salary_transition(None, &paid).is_some());
        assert_eq!(
            salary_transition(None, &salary(SalaryStatus::Pending, None)),
            None
        );
    }

    #[test]
    fn cheque_clears_on_creation_or_transition() {
        let cleared = cheque(PdcStatus::Cleared);
        assert!(cheque_transition(None, &cleared).is_some());
        assert!(cheque_transition(Some(&cheque(PdcStatus::Pending)), &cleared).is_some());
        assert_eq!(cheque_transition(Some(&cleared), &cleared), None);
        assert_eq!(cheque_transition(None, &cheque(PdcStatus::Pending)), None);

        let entry = cheque_transition(None, &cleared).unwrap().entry();
        assert_eq!(entry.category, CATEGORY_PDC);
        assert_eq!(entry.description, "PDC: Acme - 000123");
        assert_eq!(entry.currency, Currency::Aed);
    }

    #[test]
    fn pipeline_books_on_received_transition_only() {
        let today = date("2024-06-01");
        let received = pipeline(PipelineStatus::Received);
        let confirmed = pipeline(PipelineStatus::Confirmed);

        let entry = pipeline_transition(Some(&confirmed), &received, today)
            .unwrap()
            .entry();
        assert_eq!(entry.flow_type, FlowType::Inflow);
        assert_eq!(entry.date, today);
        assert_eq!(entry.category, CATEGORY_RECEIVABLES);

        assert_eq!(pipeline_transition(None, &received, today), None);
        assert_eq!(pipeline_transition(Some(&received), &received, today), None);
    }
}
