//! Command structs for engine operations.
//!
//! `Create*` commands carry every required field of a new record. `Update*`
//! commands are patches: a `None` field keeps the stored value. All of them
//! deserialize straight from request bodies.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    Currency, YearMonth,
    bank_pdc::PdcStatus,
    business_in_hand::{PipelineStatus, PipelineType},
    cashflow::FlowType,
    expenses::ExpenseStatus,
    future_needs::NeedStatus,
    salaries::SalaryStatus,
};

/// Create a sale. Profit figures are derived, never supplied.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateSaleCmd {
    pub date: NaiveDate,
    pub description: String,
    pub cost: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateSaleCmd {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub selling_price: Option<f64>,
    pub expenses: Option<f64>,
    pub currency: Option<Currency>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateExpenseCmd {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub vendor: String,
    pub amount: f64,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateExpenseCmd {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<ExpenseStatus>,
    pub currency: Option<Currency>,
}

/// Create a liability. It starts fully outstanding.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateLiabilityCmd {
    pub lender_party: String,
    pub liability_type: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub original_amount: f64,
    #[serde(default)]
    pub currency: Currency,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateLiabilityCmd {
    pub lender_party: Option<String>,
    pub liability_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub original_amount: Option<f64>,
    pub outstanding_balance: Option<f64>,
    pub currency: Option<Currency>,
    pub description: Option<String>,
}

/// A payment against a liability.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LiabilityPaymentCmd {
    pub payment_amount: f64,
    pub payment_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateSalaryCmd {
    pub employee_name: String,
    #[serde(default)]
    pub role: String,
    pub net_salary: f64,
    #[serde(default)]
    pub payment_status: SalaryStatus,
    pub payment_date: Option<NaiveDate>,
    pub month: YearMonth,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateSalaryCmd {
    pub employee_name: Option<String>,
    pub role: Option<String>,
    pub net_salary: Option<f64>,
    pub payment_status: Option<SalaryStatus>,
    pub payment_date: Option<NaiveDate>,
    pub month: Option<YearMonth>,
    pub currency: Option<Currency>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateBankPdcCmd {
    pub code: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub status: PdcStatus,
    pub bank: String,
    pub cheque_number: String,
    pub supplier: String,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateBankPdcCmd {
    pub code: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<PdcStatus>,
    pub bank: Option<String>,
    pub cheque_number: Option<String>,
    pub supplier: Option<String>,
    pub currency: Option<Currency>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateFutureNeedCmd {
    pub month: YearMonth,
    pub description: String,
    pub quantity: f64,
    pub amount: f64,
    pub status: NeedStatus,
    #[serde(default)]
    pub currency: Currency,
    pub remarks: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateFutureNeedCmd {
    pub month: Option<YearMonth>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub amount: Option<f64>,
    pub status: Option<NeedStatus>,
    pub currency: Option<Currency>,
    pub remarks: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateBusinessInHandCmd {
    #[serde(rename = "type")]
    pub kind: PipelineType,
    pub description: String,
    pub amount: f64,
    pub expected_date: NaiveDate,
    pub status: PipelineStatus,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateBusinessInHandCmd {
    #[serde(rename = "type")]
    pub kind: Option<PipelineType>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub expected_date: Option<NaiveDate>,
    pub status: Option<PipelineStatus>,
    pub currency: Option<Currency>,
}

/// A manual ledger entry. Manual entries never carry a reference id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateCashflowCmd {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub category: String,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateCashflowCmd {
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub flow_type: Option<FlowType>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<Currency>,
}
