//! Shared helpers for the in-process router scenarios.
//!
//! Each test builds a fresh in-memory database and drives the router with
//! `tower::ServiceExt::oneshot`. No network I/O.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use webshop_api::routes;
use webshop_api::state::AppState;
use webshop_core::ExchangeRate;
use webshop_db::{Database, DbConfig};
use webshop_rates::{RateError, RateProvider, RateResult};

// ---------------------------------------------------------------------------
// Stub rate provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum RateOutcome {
    Rate(&'static str),
    Unavailable,
    NonPositive,
}

/// Counts calls and answers with a configurable outcome.
pub struct StubRates {
    calls: AtomicUsize,
    outcome: Mutex<RateOutcome>,
}

impl StubRates {
    pub fn new(outcome: RateOutcome) -> Self {
        StubRates {
            calls: AtomicUsize::new(0),
            outcome: Mutex::new(outcome),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set(&self, outcome: RateOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }
}

#[async_trait]
impl RateProvider for StubRates {
    fn source_name(&self) -> &'static str {
        "stub"
    }

    async fn purchase_rate(&self) -> RateResult<ExchangeRate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = *self.outcome.lock().unwrap();
        match outcome {
            RateOutcome::Rate(raw) => Ok(ExchangeRate::parse_localized(raw).unwrap()),
            RateOutcome::Unavailable => Err(RateError::HttpStatus(503)),
            RateOutcome::NonPositive => Err(RateError::InvalidRate("0,000000".to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub rates: Arc<StubRates>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(RateOutcome::Rate("7,500000")).await
}

pub async fn spawn_app_with(outcome: RateOutcome) -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let rates = Arc::new(StubRates::new(outcome));
    let state = Arc::new(AppState::new(db, rates.clone()));
    TestApp {
        router: routes::build_router(state.clone()),
        state,
        rates,
    }
}

impl TestApp {
    /// Drive the router with a single request and return (status, json body).
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(req).await.expect("oneshot failed");
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body collect failed")
            .to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is not valid JSON")
        };
        (status, json)
    }

    pub async fn create_customer(&self, first: &str) -> String {
        let (status, body) = self
            .call(
                "POST",
                "/api/v1/customer",
                Some(json!({
                    "firstName": first,
                    "lastName": "Horvat",
                    "email": format!("{}@example.hr", first.to_lowercase()),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_product(&self, code: &str, price_cents: i64, available: bool) -> String {
        let (status, body) = self
            .call(
                "POST",
                "/api/v1/product",
                Some(json!({
                    "code": code,
                    "name": format!("Product {}", code),
                    "priceCents": price_cents,
                    "isAvailable": available,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_order(&self, customer_id: &str, items: &[(&str, i64)]) -> (StatusCode, Value) {
        self.call(
            "POST",
            "/api/v1/create-order",
            Some(json!({
                "customerId": customer_id,
                "orderItemList": line_items(items),
            })),
        )
        .await
    }
}

pub fn line_items(items: &[(&str, i64)]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|(product_id, quantity)| json!({ "productId": product_id, "quantity": quantity }))
            .collect(),
    )
}
