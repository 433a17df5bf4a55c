use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::{
    Currency, DateRange, Engine, EngineError, ExpenseStatus, FlowType, MonthRange, NeedStatus,
    PipelineStatus, PipelineType, SalaryStatus, YearMonth,
    aggregate::MAX_TREND_MONTHS,
    commands::{
        CreateBusinessInHandCmd, CreateCashflowCmd, CreateExpenseCmd, CreateFutureNeedCmd,
        CreateLiabilityCmd, CreateSaleCmd, CreateSalaryCmd, UpdateCashflowCmd, UpdateExpenseCmd,
        UpdateLiabilityCmd, UpdateSaleCmd,
    },
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

fn expense_cmd(day: &str, category: &str, amount: f64, status: ExpenseStatus) -> CreateExpenseCmd {
    CreateExpenseCmd {
        date: date(day),
        category: category.to_string(),
        description: format!("{category} on {day}"),
        vendor: "vendor".to_string(),
        amount,
        status,
        currency: Currency::Usd,
    }
}

#[tokio::test]
async fn sale_update_recomputes_all_figures() {
    let (engine, _db) = engine_with_db().await;
    let id = engine
        .create_sale(CreateSaleCmd {
            date: date("2024-01-05"),
            description: "Laptop".to_string(),
            cost: 100.0,
            selling_price: 200.0,
            expenses: 20.0,
            currency: Currency::Usd,
        })
        .await
        .unwrap();

    engine
        .update_sale(
            id,
            UpdateSaleCmd {
                selling_price: Some(400.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let sale = engine.sale(id).await.unwrap();
    assert_eq!(sale.cost, 100.0);
    assert_eq!(sale.figures.gross_profit, 300.0);
    assert_eq!(sale.figures.gross_profit_margin, 75.0);
    assert_eq!(sale.figures.net_profit, 280.0);
    assert_eq!(sale.figures.net_profit_margin, 70.0);
    // Updates never reach the ledger.
    assert_eq!(engine.cashflow().await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let (engine, _db) = engine_with_db().await;
    let missing = Uuid::new_v4();

    let err = engine
        .update_sale(missing, UpdateSaleCmd::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .update_expense(missing, UpdateExpenseCmd::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    assert!(matches!(
        engine.delete_salary(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_cashflow(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_future_need(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn expenses_list_newest_first_and_summarize_by_status() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_expense(expense_cmd("2024-01-10", "rent", 100.0, ExpenseStatus::Paid))
        .await
        .unwrap();
    engine
        .create_expense(expense_cmd("2024-03-10", "fuel", 40.0, ExpenseStatus::Unpaid))
        .await
        .unwrap();
    engine
        .create_expense(expense_cmd("2024-02-10", "fuel", 60.0, ExpenseStatus::Paid))
        .await
        .unwrap();

    let dates: Vec<NaiveDate> = engine
        .expenses()
        .await
        .unwrap()
        .iter()
        .map(|e| e.date)
        .collect();
    assert_eq!(
        dates,
        vec![date("2024-03-10"), date("2024-02-10"), date("2024-01-10")]
    );

    let summary = engine
        .expense_summary(DateRange::all(), Currency::Usd)
        .await
        .unwrap();
    assert_eq!(summary.total_expenses, 200.0);
    assert_eq!(summary.paid_expenses, 160.0);
    assert_eq!(summary.unpaid_expenses, 40.0);
    assert_eq!(summary.expense_count, 3);

    let february = DateRange::new(Some(date("2024-02-01")), Some(date("2024-02-29"))).unwrap();
    let summary = engine
        .expense_summary(february, Currency::Usd)
        .await
        .unwrap();
    assert_eq!(summary.total_expenses, 60.0);

    assert_eq!(
        engine.expense_categories().await.unwrap(),
        vec!["fuel".to_string(), "rent".to_string()]
    );
    let groups = engine
        .expenses_by_category(DateRange::all(), Currency::Usd)
        .await
        .unwrap();
    // Both categories total 100, so they fall back to name order.
    assert_eq!(groups[0].category, "fuel");
    assert_eq!(groups[0].count, 2);
    assert_eq!(groups[1].category, "rent");
    assert_eq!(groups[1].count, 1);
}

#[tokio::test]
async fn liability_update_keeps_balance_within_original() {
    let (engine, _db) = engine_with_db().await;
    let id = engine
        .create_liability(CreateLiabilityCmd {
            lender_party: "Bank".to_string(),
            liability_type: "loan".to_string(),
            start_date: date("2024-01-01"),
            due_date: date("2024-06-30"),
            original_amount: 1000.0,
            currency: Currency::Usd,
            description: Some("  ".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(engine.liability(id).await.unwrap().description, None);

    let err = engine
        .update_liability(
            id,
            UpdateLiabilityCmd {
                outstanding_balance: Some(1500.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    engine
        .update_liability(
            id,
            UpdateLiabilityCmd {
                outstanding_balance: Some(250.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let summary = engine
        .liability_summary(Currency::Usd, date("2024-07-01"))
        .await
        .unwrap();
    assert_eq!(summary.total_outstanding_balance, 250.0);
    assert_eq!(summary.total_paid_amount, 750.0);
    assert_eq!(summary.overdue_count, 1);

    let upcoming = engine
        .upcoming_liabilities(30, date("2024-06-15"))
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].days_until_due, 15);
    assert_eq!(engine.liability_types().await.unwrap(), vec!["loan"]);
}

#[tokio::test]
async fn salaries_summarize_per_month() {
    let (engine, _db) = engine_with_db().await;
    for (name, month, amount, status) in [
        ("Ali", "2024-01", 1000.0, SalaryStatus::Paid),
        ("Sara", "2024-01", 1200.0, SalaryStatus::Pending),
        ("Ali", "2024-02", 1000.0, SalaryStatus::Pending),
    ] {
        engine
            .create_salary(CreateSalaryCmd {
                employee_name: name.to_string(),
                role: "Staff".to_string(),
                net_salary: amount,
                payment_status: status,
                payment_date: None,
                month: month.parse().unwrap(),
                currency: Currency::Usd,
            })
            .await
            .unwrap();
    }

    let months: Vec<String> = engine
        .salaries()
        .await
        .unwrap()
        .iter()
        .map(|s| s.month.to_string())
        .collect();
    assert_eq!(months, vec!["2024-02", "2024-01", "2024-01"]);

    let january = engine
        .salary_summary(Some("2024-01".parse().unwrap()), Currency::Usd)
        .await
        .unwrap();
    assert_eq!(january.total_salaries, 2200.0);
    assert_eq!(january.paid_salaries, 1000.0);
    assert_eq!(january.pending_employee_count, 1);

    let by_month = engine
        .salaries_by_month(MonthRange::default(), Currency::Usd)
        .await
        .unwrap();
    assert_eq!(by_month.len(), 2);
    assert_eq!(by_month[0].month.to_string(), "2024-01");
    assert_eq!(engine.employees().await.unwrap().len(), 2);
}

#[tokio::test]
async fn future_needs_total_is_amount_times_quantity() {
    let (engine, _db) = engine_with_db().await;
    for (month, quantity, amount, status) in [
        ("2024-08", 3.0, 50.0, NeedStatus::Recurring),
        ("2024-07", 1.0, 200.0, NeedStatus::OneTime),
    ] {
        engine
            .create_future_need(CreateFutureNeedCmd {
                month: month.parse().unwrap(),
                description: "tyres".to_string(),
                quantity,
                amount,
                status,
                currency: Currency::Usd,
                remarks: None,
            })
            .await
            .unwrap();
    }

    let needs = engine.future_needs().await.unwrap();
    assert_eq!(needs[0].month.to_string(), "2024-07");
    assert_eq!(needs[1].total_cost(), 150.0);

    let summary = engine
        .future_needs_summary(MonthRange::default(), Currency::Usd)
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 350.0);
    assert_eq!(summary.recurring_amount, 150.0);
    assert_eq!(summary.one_time_amount, 200.0);

    let upcoming = engine
        .upcoming_needs(1, "2024-07".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[1].months_until, 1);
    // Planning only: nothing reaches the ledger.
    assert!(engine.cashflow().await.unwrap().is_empty());
}

#[tokio::test]
async fn business_in_hand_lists_by_expected_date() {
    let (engine, _db) = engine_with_db().await;
    for (day, amount, status) in [
        ("2024-09-01", 100.0, PipelineStatus::Pending),
        ("2024-05-01", 300.0, PipelineStatus::Confirmed),
    ] {
        engine
            .create_business_in_hand(CreateBusinessInHandCmd {
                kind: PipelineType::ExpectedRevenue,
                description: format!("deal {day}"),
                amount,
                expected_date: date(day),
                status,
                currency: Currency::Usd,
            })
            .await
            .unwrap();
    }

    let items = engine.business_in_hand().await.unwrap();
    assert_eq!(items[0].expected_date, date("2024-05-01"));

    let overdue = engine.overdue_business(date("2024-06-01")).await.unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].days_until_expected, -31);

    let summary = engine
        .business_in_hand_summary(Currency::Usd)
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 400.0);
    assert_eq!(summary.confirmed_count, 1);
}

#[tokio::test]
async fn manual_cashflow_entries_can_be_corrected() {
    let (engine, _db) = engine_with_db().await;
    let id = engine
        .create_cashflow(CreateCashflowCmd {
            date: date("2024-03-01"),
            flow_type: FlowType::Inflow,
            category: "capital".to_string(),
            description: "owner injection".to_string(),
            amount: 5000.0,
            currency: Currency::Usd,
        })
        .await
        .unwrap();

    engine
        .update_cashflow(
            id,
            UpdateCashflowCmd {
                amount: Some(4500.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let entry = engine.cashflow_entry(id).await.unwrap();
    assert_eq!(entry.amount, 4500.0);
    assert_eq!(entry.reference_id, None);

    let trend = engine
        .cashflow_trend(12, "2024-06".parse().unwrap(), Currency::Usd)
        .await
        .unwrap();
    assert_eq!(trend.len(), 12);
    let march = trend
        .iter()
        .find(|p| p.month.to_string() == "2024-03")
        .unwrap();
    assert_eq!(march.inflow, 4500.0);

    assert_eq!(engine.cashflow_categories().await.unwrap(), vec!["capital"]);
}

#[tokio::test]
async fn cashflow_trend_window_is_bounded() {
    let (engine, _db) = engine_with_db().await;
    let current: YearMonth = "2026-10".parse().unwrap();

    for months in [0, MAX_TREND_MONTHS + 1, u32::MAX] {
        let err = engine
            .cashflow_trend(months, current, Currency::Usd)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDate(_)), "months = {months}");
    }

    let single = engine
        .cashflow_trend(1, current, Currency::Usd)
        .await
        .unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].month, current);

    let longest = engine
        .cashflow_trend(MAX_TREND_MONTHS, current, Currency::Usd)
        .await
        .unwrap();
    assert_eq!(longest.len(), 120);
    assert_eq!(longest[0].month.to_string(), "2016-11");
}

#[tokio::test]
async fn negative_sale_amounts_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .create_sale(CreateSaleCmd {
            date: date("2024-01-05"),
            description: "Refund".to_string(),
            cost: 0.0,
            selling_price: -50.0,
            expenses: 0.0,
            currency: Currency::Usd,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(engine.sales().await.unwrap().is_empty());
    assert!(engine.cashflow().await.unwrap().is_empty());

    let id = engine
        .create_sale(CreateSaleCmd {
            date: date("2024-01-05"),
            description: "Laptop".to_string(),
            cost: 100.0,
            selling_price: 200.0,
            expenses: 0.0,
            currency: Currency::Usd,
        })
        .await
        .unwrap();
    let err = engine
        .update_sale(
            id,
            UpdateSaleCmd {
                cost: Some(-1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert_eq!(engine.sale(id).await.unwrap().cost, 100.0);
}
