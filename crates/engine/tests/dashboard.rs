use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    ActivityKind, Currency, DashboardQuery, DateRange, Engine, ExpenseStatus, ExportModule,
    SalaryStatus,
    commands::{CreateExpenseCmd, CreateLiabilityCmd, CreateSaleCmd, CreateSalaryCmd},
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn seed(engine: &Engine) {
    engine
        .create_sale(CreateSaleCmd {
            date: date("2024-05-10"),
            description: "Laptop".to_string(),
            cost: 100.0,
            selling_price: 200.0,
            expenses: 20.0,
            currency: Currency::Usd,
        })
        .await
        .unwrap();
    engine
        .create_expense(CreateExpenseCmd {
            date: date("2024-05-12"),
            category: "rent".to_string(),
            description: "office".to_string(),
            vendor: "landlord".to_string(),
            amount: 375.0,
            status: ExpenseStatus::Paid,
            currency: Currency::Sar,
        })
        .await
        .unwrap();
    engine
        .create_liability(CreateLiabilityCmd {
            lender_party: "Bank".to_string(),
            liability_type: "loan".to_string(),
            start_date: date("2024-05-01"),
            due_date: date("2024-11-30"),
            original_amount: 1000.0,
            currency: Currency::Usd,
            description: None,
        })
        .await
        .unwrap();
    engine
        .create_salary(CreateSalaryCmd {
            employee_name: "Ali".to_string(),
            role: "Tech".to_string(),
            net_salary: 500.0,
            payment_status: SalaryStatus::Paid,
            payment_date: Some(date("2024-05-28")),
            month: "2024-05".parse().unwrap(),
            currency: Currency::Usd,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn dashboard_reconciles_with_the_ledger() {
    let (engine, _db) = engine_with_db().await;
    seed(&engine).await;

    let dashboard = engine
        .dashboard(DashboardQuery {
            currency: Currency::Usd,
            range: DateRange::all(),
            today: date("2024-06-15"),
        })
        .await
        .unwrap();

    let summary = &dashboard.summary;
    assert_eq!(summary.total_sales, 200.0);
    assert_eq!(summary.total_profit, 80.0);
    assert_eq!(summary.total_expenses, 100.0);
    assert_eq!(summary.outstanding_liabilities, 1000.0);
    assert_eq!(summary.salaries_paid, 500.0);
    // sale 200 + liability 1000 in, expense 100 + salary 500 out
    assert_eq!(summary.total_inflows, 1200.0);
    assert_eq!(summary.total_outflows, 600.0);
    assert_eq!(summary.net_cashflow, 600.0);

    assert_eq!(dashboard.charts.cashflow_trend.len(), 12);
    assert_eq!(dashboard.charts.sales_trend.len(), 12);
    let may = &dashboard.charts.cashflow_trend[10];
    assert_eq!(may.month.to_string(), "2024-05");
    assert_eq!(may.net, 600.0);
    assert_eq!(dashboard.charts.expenses_by_category[0].percentage, 100.0);
    assert_eq!(dashboard.charts.liabilities_by_due_date.len(), 1);

    let kinds: Vec<ActivityKind> = dashboard.recent_activity.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![ActivityKind::Salary, ActivityKind::Expense, ActivityKind::Sale]
    );
}

#[tokio::test]
async fn dashboard_converts_into_the_requested_currency() {
    let (engine, _db) = engine_with_db().await;
    seed(&engine).await;

    let dashboard = engine
        .dashboard(DashboardQuery {
            currency: Currency::Sar,
            range: DateRange::all(),
            today: date("2024-06-15"),
        })
        .await
        .unwrap();
    assert_eq!(dashboard.currency, Currency::Sar);
    assert!((dashboard.summary.total_sales - 750.0).abs() < 1e-9);
    assert!((dashboard.summary.total_expenses - 375.0).abs() < 1e-9);

    let expense = dashboard
        .recent_activity
        .iter()
        .find(|a| a.kind == ActivityKind::Expense)
        .unwrap();
    assert_eq!(expense.original_currency, Currency::Sar);
    assert_eq!(expense.original_amount, 375.0);
}

#[tokio::test]
async fn empty_dashboard_still_has_full_trends() {
    let (engine, _db) = engine_with_db().await;
    let dashboard = engine
        .dashboard(DashboardQuery {
            currency: Currency::Aed,
            range: DateRange::all(),
            today: date("2024-01-01"),
        })
        .await
        .unwrap();
    assert_eq!(dashboard.charts.cashflow_trend.len(), 12);
    assert_eq!(dashboard.charts.cashflow_trend[0].month.to_string(), "2023-02");
    assert_eq!(dashboard.summary.net_cashflow, 0.0);
    assert!(dashboard.recent_activity.is_empty());
}

#[tokio::test]
async fn currency_preference_defaults_to_usd_then_upserts() {
    let (engine, _db) = engine_with_db().await;
    let settings = engine.currency_settings().await.unwrap();
    assert_eq!(settings.selected_currency, Currency::Usd);
    assert_eq!(settings.exchange_rates.usd_to_sar, 3.75);

    engine.set_display_currency(Currency::Aed).await.unwrap();
    assert_eq!(engine.display_currency().await.unwrap(), Currency::Aed);

    engine.set_display_currency(Currency::Sar).await.unwrap();
    assert_eq!(engine.display_currency().await.unwrap(), Currency::Sar);

    let shown = engine
        .convert_for_display(100.0, Currency::Usd)
        .await
        .unwrap();
    assert_eq!(shown.currency, Currency::Sar);
    assert_eq!(shown.amount, 375.0);
}

#[tokio::test]
async fn export_sheet_rows_are_converted() {
    let (engine, _db) = engine_with_db().await;
    seed(&engine).await;

    let sheet = engine
        .export(ExportModule::Expenses, Currency::Usd, date("2024-06-15"))
        .await
        .unwrap();
    assert_eq!(sheet.rows.len(), 1);
    assert_eq!(sheet.rows[0][4], "100.00");
    assert_eq!(sheet.rows[0][6], "SAR");
}
