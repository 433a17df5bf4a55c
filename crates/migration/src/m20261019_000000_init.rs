//! Initial schema.
//!
//! One table per business module, plus:
//!
//! - `cashflow`: the ledger; `reference_id` points at the record that produced
//!   an entry and is null for manual entries. It is not a foreign key: entries
//!   outlive the records they came from.
//! - `currency_settings`: single-row display preference keyed by name.
//!
//! Amounts are stored in the record's own currency, dates as calendar dates,
//! salary and planning months as `YYYY-MM` strings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    Date,
    Description,
    Cost,
    SellingPrice,
    GrossProfit,
    GrossProfitMargin,
    Expenses,
    NetProfit,
    NetProfitMargin,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Date,
    Category,
    Description,
    Vendor,
    Amount,
    Status,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Liabilities {
    Table,
    Id,
    LenderParty,
    LiabilityType,
    StartDate,
    DueDate,
    OriginalAmount,
    OutstandingBalance,
    Currency,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Salaries {
    Table,
    Id,
    EmployeeName,
    Role,
    NetSalary,
    PaymentStatus,
    PaymentDate,
    Month,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BankPdc {
    Table,
    Id,
    Code,
    Date,
    Description,
    Amount,
    Status,
    Bank,
    ChequeNumber,
    Supplier,
    CreationDate,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FutureNeeds {
    Table,
    Id,
    Month,
    Description,
    Quantity,
    Amount,
    Status,
    Currency,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BusinessInHand {
    Table,
    Id,
    Kind,
    Description,
    Amount,
    ExpectedDate,
    Status,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Cashflow {
    Table,
    Id,
    Date,
    FlowType,
    Category,
    Description,
    Amount,
    Currency,
    ReferenceId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CurrencySettings {
    Table,
    Key,
    SelectedCurrency,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn amount_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).double().not_null().default(0.0).to_owned()
}

fn currency_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string().not_null().default("USD").to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

async fn index<T, C>(manager: &SchemaManager<'_>, name: &str, table: T, col: C) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
    C: IntoIndexColumn,
{
    manager
        .create_index(
            Index::create()
                .name(name)
                .table(table)
                .col(col)
                .to_owned(),
        )
        .await
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Sales
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(id_col(Sales::Id))
                    .col(ColumnDef::new(Sales::Date).date().not_null())
                    .col(ColumnDef::new(Sales::Description).string().not_null())
                    .col(amount_col(Sales::Cost))
                    .col(amount_col(Sales::SellingPrice))
                    .col(amount_col(Sales::GrossProfit))
                    .col(amount_col(Sales::GrossProfitMargin))
                    .col(amount_col(Sales::Expenses))
                    .col(amount_col(Sales::NetProfit))
                    .col(amount_col(Sales::NetProfitMargin))
                    .col(currency_col(Sales::Currency))
                    .col(timestamp_col(Sales::CreatedAt))
                    .col(timestamp_col(Sales::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(manager, "idx-sales-date", Sales::Table, Sales::Date).await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(id_col(Expenses::Id))
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::Vendor)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(amount_col(Expenses::Amount))
                    .col(ColumnDef::new(Expenses::Status).string().not_null())
                    .col(currency_col(Expenses::Currency))
                    .col(timestamp_col(Expenses::CreatedAt))
                    .col(timestamp_col(Expenses::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(manager, "idx-expenses-date", Expenses::Table, Expenses::Date).await?;
        index(
            manager,
            "idx-expenses-category",
            Expenses::Table,
            Expenses::Category,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Liabilities
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Liabilities::Table)
                    .if_not_exists()
                    .col(id_col(Liabilities::Id))
                    .col(
                        ColumnDef::new(Liabilities::LenderParty)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Liabilities::LiabilityType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Liabilities::StartDate).date().not_null())
                    .col(ColumnDef::new(Liabilities::DueDate).date().not_null())
                    .col(amount_col(Liabilities::OriginalAmount))
                    .col(amount_col(Liabilities::OutstandingBalance))
                    .col(currency_col(Liabilities::Currency))
                    .col(ColumnDef::new(Liabilities::Description).string())
                    .col(timestamp_col(Liabilities::CreatedAt))
                    .col(timestamp_col(Liabilities::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(
            manager,
            "idx-liabilities-due_date",
            Liabilities::Table,
            Liabilities::DueDate,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Salaries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Salaries::Table)
                    .if_not_exists()
                    .col(id_col(Salaries::Id))
                    .col(ColumnDef::new(Salaries::EmployeeName).string().not_null())
                    .col(
                        ColumnDef::new(Salaries::Role)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(amount_col(Salaries::NetSalary))
                    .col(
                        ColumnDef::new(Salaries::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Salaries::PaymentDate).date())
                    .col(ColumnDef::new(Salaries::Month).string().not_null())
                    .col(currency_col(Salaries::Currency))
                    .col(timestamp_col(Salaries::CreatedAt))
                    .col(timestamp_col(Salaries::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(manager, "idx-salaries-month", Salaries::Table, Salaries::Month).await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Post-dated cheques
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(BankPdc::Table)
                    .if_not_exists()
                    .col(id_col(BankPdc::Id))
                    .col(ColumnDef::new(BankPdc::Code).string().not_null())
                    .col(ColumnDef::new(BankPdc::Date).date().not_null())
                    .col(ColumnDef::new(BankPdc::Description).string().not_null())
                    .col(amount_col(BankPdc::Amount))
                    .col(ColumnDef::new(BankPdc::Status).string().not_null())
                    .col(ColumnDef::new(BankPdc::Bank).string().not_null())
                    .col(ColumnDef::new(BankPdc::ChequeNumber).string().not_null())
                    .col(ColumnDef::new(BankPdc::Supplier).string().not_null())
                    .col(ColumnDef::new(BankPdc::CreationDate).date().not_null())
                    .col(currency_col(BankPdc::Currency))
                    .col(timestamp_col(BankPdc::CreatedAt))
                    .col(timestamp_col(BankPdc::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(manager, "idx-bank_pdc-date", BankPdc::Table, BankPdc::Date).await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Future needs
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(FutureNeeds::Table)
                    .if_not_exists()
                    .col(id_col(FutureNeeds::Id))
                    .col(ColumnDef::new(FutureNeeds::Month).string().not_null())
                    .col(
                        ColumnDef::new(FutureNeeds::Description)
                            .string()
                            .not_null(),
                    )
                    .col(amount_col(FutureNeeds::Quantity))
                    .col(amount_col(FutureNeeds::Amount))
                    .col(ColumnDef::new(FutureNeeds::Status).string().not_null())
                    .col(currency_col(FutureNeeds::Currency))
                    .col(ColumnDef::new(FutureNeeds::Remarks).string())
                    .col(timestamp_col(FutureNeeds::CreatedAt))
                    .col(timestamp_col(FutureNeeds::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(
            manager,
            "idx-future_needs-month",
            FutureNeeds::Table,
            FutureNeeds::Month,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Business in hand
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(BusinessInHand::Table)
                    .if_not_exists()
                    .col(id_col(BusinessInHand::Id))
                    .col(ColumnDef::new(BusinessInHand::Kind).string().not_null())
                    .col(
                        ColumnDef::new(BusinessInHand::Description)
                            .string()
                            .not_null(),
                    )
                    .col(amount_col(BusinessInHand::Amount))
                    .col(
                        ColumnDef::new(BusinessInHand::ExpectedDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BusinessInHand::Status).string().not_null())
                    .col(currency_col(BusinessInHand::Currency))
                    .col(timestamp_col(BusinessInHand::CreatedAt))
                    .col(timestamp_col(BusinessInHand::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(
            manager,
            "idx-business_in_hand-expected_date",
            BusinessInHand::Table,
            BusinessInHand::ExpectedDate,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Cashflow ledger
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cashflow::Table)
                    .if_not_exists()
                    .col(id_col(Cashflow::Id))
                    .col(ColumnDef::new(Cashflow::Date).date().not_null())
                    .col(ColumnDef::new(Cashflow::FlowType).string().not_null())
                    .col(ColumnDef::new(Cashflow::Category).string().not_null())
                    .col(ColumnDef::new(Cashflow::Description).string().not_null())
                    .col(amount_col(Cashflow::Amount))
                    .col(currency_col(Cashflow::Currency))
                    .col(ColumnDef::new(Cashflow::ReferenceId).uuid())
                    .col(timestamp_col(Cashflow::CreatedAt))
                    .col(timestamp_col(Cashflow::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        index(manager, "idx-cashflow-date", Cashflow::Table, Cashflow::Date).await?;
        index(
            manager,
            "idx-cashflow-reference_id",
            Cashflow::Table,
            Cashflow::ReferenceId,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 9. Currency settings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CurrencySettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CurrencySettings::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(currency_col(CurrencySettings::SelectedCurrency))
                    .col(timestamp_col(CurrencySettings::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CurrencySettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cashflow::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BusinessInHand::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FutureNeeds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankPdc::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Salaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Liabilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        Ok(())
    }
}
