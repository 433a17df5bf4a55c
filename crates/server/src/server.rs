use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use std::{net::SocketAddr, sync::Arc};

use crate::{
    bank_pdc, business_in_hand, cashflow, currency, dashboard, expenses, export, future_needs,
    liabilities, salaries, sales,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();
    if status.is_server_error() {
        tracing::warn!(%method, %path, %status, "request failed");
    } else {
        tracing::debug!(%method, %path, %status, "request served");
    }
    response
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/sales", get(sales::list).post(sales::create))
        .route("/sales/summary", get(sales::summary))
        .route(
            "/sales/{id}",
            get(sales::get).patch(sales::update).delete(sales::delete),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/summary", get(expenses::summary))
        .route("/expenses/by-category", get(expenses::by_category))
        .route("/expenses/categories", get(expenses::categories))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .patch(expenses::update)
                .delete(expenses::delete),
        )
        .route(
            "/liabilities",
            get(liabilities::list).post(liabilities::create),
        )
        .route("/liabilities/summary", get(liabilities::summary))
        .route("/liabilities/upcoming", get(liabilities::upcoming))
        .route("/liabilities/types", get(liabilities::types))
        .route(
            "/liabilities/{id}",
            get(liabilities::get)
                .patch(liabilities::update)
                .delete(liabilities::delete),
        )
        .route("/liabilities/{id}/payments", post(liabilities::pay))
        .route("/salaries", get(salaries::list).post(salaries::create))
        .route("/salaries/summary", get(salaries::summary))
        .route("/salaries/by-month", get(salaries::by_month))
        .route("/salaries/employees", get(salaries::employees))
        .route(
            "/salaries/{id}",
            get(salaries::get)
                .patch(salaries::update)
                .delete(salaries::delete),
        )
        .route("/bank-pdc", get(bank_pdc::list).post(bank_pdc::create))
        .route("/bank-pdc/summary", get(bank_pdc::summary))
        .route("/bank-pdc/by-bank", get(bank_pdc::by_bank))
        .route("/bank-pdc/upcoming", get(bank_pdc::upcoming))
        .route("/bank-pdc/banks", get(bank_pdc::banks))
        .route("/bank-pdc/suppliers", get(bank_pdc::suppliers))
        .route(
            "/bank-pdc/{id}",
            get(bank_pdc::get)
                .patch(bank_pdc::update)
                .delete(bank_pdc::delete),
        )
        .route(
            "/future-needs",
            get(future_needs::list).post(future_needs::create),
        )
        .route("/future-needs/summary", get(future_needs::summary))
        .route("/future-needs/by-month", get(future_needs::by_month))
        .route("/future-needs/upcoming", get(future_needs::upcoming))
        .route(
            "/future-needs/{id}",
            get(future_needs::get)
                .patch(future_needs::update)
                .delete(future_needs::delete),
        )
        .route(
            "/business-in-hand",
            get(business_in_hand::list).post(business_in_hand::create),
        )
        .route("/business-in-hand/summary", get(business_in_hand::summary))
        .route("/business-in-hand/by-type", get(business_in_hand::by_type))
        .route("/business-in-hand/upcoming", get(business_in_hand::upcoming))
        .route("/business-in-hand/overdue", get(business_in_hand::overdue))
        .route(
            "/business-in-hand/{id}",
            get(business_in_hand::get)
                .patch(business_in_hand::update)
                .delete(business_in_hand::delete),
        )
        .route("/cashflow", get(cashflow::list).post(cashflow::create))
        .route("/cashflow/summary", get(cashflow::summary))
        .route("/cashflow/by-category", get(cashflow::by_category))
        .route("/cashflow/trend", get(cashflow::trend))
        .route("/cashflow/categories", get(cashflow::categories))
        .route("/cashflow/reference/{id}", get(cashflow::by_reference))
        .route(
            "/cashflow/{id}",
            get(cashflow::get)
                .patch(cashflow::update)
                .delete(cashflow::delete),
        )
        .route("/dashboard", get(dashboard::get))
        .route("/currency", get(currency::get).put(currency::set))
        .route("/currency/rates", get(currency::rates))
        .route("/currency/convert", get(currency::convert))
        .route("/export/{module}", get(export::get))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run(engine: Engine, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_with_listener(engine, listener).await
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build().await.unwrap();
        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn sale_body() -> Value {
        json!({
            "date": "2024-01-05",
            "description": "Laptop",
            "cost": 100.0,
            "selling_price": 200.0,
            "expenses": 20.0,
            "currency": "USD"
        })
    }

    #[tokio::test]
    async fn create_sale_returns_201_and_books_ledger_entry() {
        let router = test_router().await;
        let (status, body) = send(&router, Method::POST, "/sales", Some(sale_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, sale) = send(&router, Method::GET, &format!("/sales/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sale["net_profit"], json!(80.0));
        assert_eq!(sale["gross_profit_margin"], json!(50.0));

        let (_, entries) = send(&router, Method::GET, &format!("/cashflow/reference/{id}"), None).await;
        assert_eq!(entries.as_array().unwrap().len(), 1);
        assert_eq!(entries[0]["type"], json!("inflow"));
    }

    #[tokio::test]
    async fn patch_and_delete_report_missing_records() {
        let router = test_router().await;
        let missing = uuid::Uuid::new_v4();

        let (status, body) = send(
            &router,
            Method::PATCH,
            &format!("/expenses/{missing}"),
            Some(json!({ "amount": 5.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        let (status, _) = send(&router, Method::DELETE, &format!("/sales/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_204() {
        let router = test_router().await;
        let (_, body) = send(&router, Method::POST, "/sales", Some(sale_body())).await;
        let id = body["id"].as_str().unwrap().to_string();

        let (status, _) = send(&router, Method::DELETE, &format!("/sales/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, list) = send(&router, Method::GET, "/sales", None).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_400_with_json_error() {
        let router = test_router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/sales",
            Some(json!({ "description": "missing everything" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn overpayment_clamps_and_negative_payment_is_422() {
        let router = test_router().await;
        let (_, body) = send(
            &router,
            Method::POST,
            "/liabilities",
            Some(json!({
                "lender_party": "Bank",
                "liability_type": "loan",
                "start_date": "2024-01-01",
                "due_date": "2024-12-31",
                "original_amount": 1000.0,
                "currency": "USD"
            })),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();
        let uri = format!("/liabilities/{id}/payments");

        let (status, liability) = send(
            &router,
            Method::POST,
            &uri,
            Some(json!({ "payment_amount": 1500.0, "payment_date": "2024-02-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(liability["outstanding_balance"], json!(0.0));

        let (status, _) = send(
            &router,
            Method::POST,
            &uri,
            Some(json!({ "payment_amount": -1.0, "payment_date": "2024-02-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn currency_preference_round_trip() {
        let router = test_router().await;
        let (_, settings) = send(&router, Method::GET, "/currency", None).await;
        assert_eq!(settings["selected_currency"], json!("USD"));

        let (status, settings) = send(
            &router,
            Method::PUT,
            "/currency",
            Some(json!({ "selected_currency": "AED" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settings["selected_currency"], json!("AED"));

        let (status, _) = send(
            &router,
            Method::PUT,
            "/currency",
            Some(json!({ "selected_currency": "EUR" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, converted) = send(
            &router,
            Method::GET,
            "/currency/convert?amount=100&from=USD&to=SAR",
            None,
        )
        .await;
        assert_eq!(converted["amount"], json!(375.0));
        assert_eq!(converted["currency"], json!("SAR"));
    }

    #[tokio::test]
    async fn dashboard_uses_stored_preference_when_currency_missing() {
        let router = test_router().await;
        send(&router, Method::POST, "/sales", Some(sale_body())).await;
        send(
            &router,
            Method::PUT,
            "/currency",
            Some(json!({ "selected_currency": "SAR" })),
        )
        .await;

        let (status, dashboard) = send(&router, Method::GET, "/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["currency"], json!("SAR"));
        assert_eq!(dashboard["summary"]["total_sales"], json!(750.0));
        assert_eq!(
            dashboard["charts"]["cashflow_trend"].as_array().unwrap().len(),
            12
        );

        let (_, dashboard) = send(&router, Method::GET, "/dashboard?currency=USD", None).await;
        assert_eq!(dashboard["summary"]["total_sales"], json!(200.0));

        let (status, _) = send(
            &router,
            Method::GET,
            "/dashboard?start_date=2024-02-01&end_date=2024-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn export_renders_csv() {
        let router = test_router().await;
        send(&router, Method::POST, "/sales", Some(sale_body())).await;

        let response = router
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/export/sales?currency=USD")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Sales,USD"));
        assert!(text.contains("Laptop"));

        let (status, _) = send(&router, Method::GET, "/export/unknown", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
