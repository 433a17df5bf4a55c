use chrono::{NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PrimaryKeyTrait, QueryFilter, Select,
};
use uuid::Uuid;

use crate::{
    DateRange, EngineError, MonthRange, ResultEngine,
    ledger::{Ledger, LedgerEvent},
};

mod bank_pdc;
mod business_in_hand;
mod cashflow;
mod dashboard;
mod expenses;
mod export;
mod future_needs;
mod liabilities;
mod salaries;
mod sales;
mod settings;

pub use dashboard::DashboardQuery;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Days looked ahead by the "upcoming" queries when no window is given.
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;
/// Months looked ahead by [`Engine::upcoming_needs`] when no window is given.
pub const DEFAULT_UPCOMING_MONTHS: i32 = 6;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    ledger: Ledger,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Project the ledger side effect of a write that already succeeded.
    ///
    /// The record stays written when projection fails: the failure is logged
    /// and reported as [`EngineError::LedgerInconsistency`].
    async fn publish(&self, record_id: Uuid, event: Option<LedgerEvent>) -> ResultEngine<()> {
        let Some(event) = event else {
            return Ok(());
        };
        if let Err(err) = self.ledger.project(&event).await {
            tracing::error!(%record_id, error = %err, "ledger projection failed");
            return Err(EngineError::LedgerInconsistency {
                record_id,
                reason: err.to_string(),
            });
        }
        Ok(())
    }

    async fn require<E>(&self, id: Uuid, label: &str) -> ResultEngine<E::Model>
    where
        E: EntityTrait,
        Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("{label} {id}")))
    }

    async fn delete_record<E>(&self, id: Uuid, label: &str) -> ResultEngine<()>
    where
        E: EntityTrait,
        Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let result = E::delete_by_id(id).exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("{label} {id}")));
        }
        tracing::debug!(%id, label, "record deleted");
        Ok(())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn collect<M, T>(models: Vec<M>) -> ResultEngine<Vec<T>>
where
    T: TryFrom<M, Error = EngineError>,
{
    models.into_iter().map(T::try_from).collect()
}

/// Restrict `select` to rows whose `column` date lies in `range`.
fn within_dates<E, C>(mut select: Select<E>, column: C, range: DateRange) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    if let Some(start) = range.start {
        select = select.filter(column.gte(start));
    }
    if let Some(end) = range.end {
        select = select.filter(column.lte(end));
    }
    select
}

/// Restrict `select` to rows whose `YYYY-MM` `column` lies in `range`.
fn within_months<E, C>(mut select: Select<E>, column: C, range: MonthRange) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    if let Some(start) = range.start {
        select = select.filter(column.gte(start.to_string()));
    }
    if let Some(end) = range.end {
        select = select.filter(column.lte(end.to_string()));
    }
    select
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            ledger: Ledger::new(self.database.clone()),
            database: self.database,
        })
    }
}
