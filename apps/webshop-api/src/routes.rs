//! Axum router and all HTTP handlers.
//!
//! `build_router` is the single entry point. Middleware layers (tracing,
//! CORS) are attached by `main.rs` so tests can drive the bare router.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use crate::api_types::{
    CreateOrderRequest, CustomerRequest, CustomerResponse, HealthResponse, OrderResponse,
    ProductRequest, ProductResponse, UpdateOrderRequest,
};
use crate::error::ApiResult;
use crate::services::{health_service, CustomerService, OrderService, ProductService};
use crate::state::AppState;

/// Build the complete application router wired to the given shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        // Orders
        .route("/api/v1/create-order", post(create_order))
        .route("/api/v1/update-order/{order_id}", put(update_order))
        .route("/api/v1/submit-order/{order_id}", post(submit_order))
        .route("/api/v1/read-order/{order_id}", get(read_order))
        .route("/api/v1/delete-order/{order_id}", delete(delete_order))
        // Customers
        .route("/api/v1/customer", post(create_customer))
        .route(
            "/api/v1/customer/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        // Products
        .route("/api/v1/product", post(create_product))
        .route(
            "/api/v1/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /api/v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let report = health_service::check(&st).await;
    let status = if report.ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

pub(crate) async fn create_order(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let Json(req) = payload?;
    let order = OrderService::new(&st).create(req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub(crate) async fn update_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> ApiResult<Json<OrderResponse>> {
    let Json(req) = payload?;
    let order = OrderService::new(&st).update(&order_id, req).await?;
    Ok(Json(order))
}

pub(crate) async fn submit_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    let order = OrderService::new(&st).submit(&order_id).await?;
    Ok(Json(order))
}

pub(crate) async fn read_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    let order = OrderService::new(&st).read(&order_id).await?;
    Ok(Json(order))
}

pub(crate) async fn delete_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> ApiResult<StatusCode> {
    OrderService::new(&st).delete(&order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

pub(crate) async fn get_customer(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomerResponse>> {
    Ok(Json(CustomerService::new(&st).get(&id).await?))
}

pub(crate) async fn create_customer(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CustomerResponse>)> {
    let Json(req) = payload?;
    let customer = CustomerService::new(&st).create(req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub(crate) async fn update_customer(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> ApiResult<Json<CustomerResponse>> {
    let Json(req) = payload?;
    Ok(Json(CustomerService::new(&st).update(&id, req).await?))
}

pub(crate) async fn delete_customer(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    CustomerService::new(&st).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub(crate) async fn get_product(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductResponse>> {
    Ok(Json(ProductService::new(&st).get(&id).await?))
}

pub(crate) async fn create_product(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let Json(req) = payload?;
    let product = ProductService::new(&st).create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub(crate) async fn update_product(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Json(req) = payload?;
    Ok(Json(ProductService::new(&st).update(&id, req).await?))
}

pub(crate) async fn delete_product(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    ProductService::new(&st).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
