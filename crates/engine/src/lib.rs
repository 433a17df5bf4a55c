//! Finance tracker engine.
//!
//! Records of eight business modules (sales, expenses, liabilities, salaries,
//! post-dated cheques, future needs, business in hand and the cashflow
//! ledger) are stored each in their own currency. Reads convert per record
//! into an explicitly requested target currency; writes recompute derived
//! fields and publish ledger events which the [`ledger::Ledger`] projects
//! into cashflow entries.

pub use aggregate::{Activity, ActivityKind, Charts, Dashboard, DashboardSummary, Snapshot};
pub use bank_pdc::{BankPdc, PdcStatus};
pub use business_in_hand::{BusinessInHand, PipelineStatus, PipelineType};
pub use cashflow::{CashflowEntry, FlowType, NewCashflowEntry};
pub use currency::{Currency, ExchangeRates, USD_TO_AED, USD_TO_SAR, convert, exchange_rate};
pub use currency_settings::CurrencySettings;
pub use derived::{PaymentOutcome, SaleFigures, SaleInputs, apply_payment};
pub use error::EngineError;
pub use expenses::{Expense, ExpenseStatus};
pub use export::{ExportModule, ExportSheet, SummaryFigure};
pub use future_needs::{FutureNeed, NeedStatus};
pub use liabilities::Liability;
pub use money::{Money, format_amount, sanitize_amount};
pub use month::YearMonth;
pub use ops::{
    DEFAULT_UPCOMING_DAYS, DEFAULT_UPCOMING_MONTHS, DashboardQuery, Engine, EngineBuilder,
};
pub use range::{DateRange, MonthRange};
pub use salaries::{Salary, SalaryStatus};
pub use sales::Sale;

pub mod aggregate;
pub mod bank_pdc;
pub mod business_in_hand;
pub mod cashflow;
pub mod commands;
mod currency;
pub mod currency_settings;
mod derived;
mod error;
pub mod expenses;
pub mod export;
pub mod future_needs;
pub mod ledger;
pub mod liabilities;
mod money;
mod month;
mod ops;
mod range;
pub mod salaries;
pub mod sales;
pub mod summary;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
