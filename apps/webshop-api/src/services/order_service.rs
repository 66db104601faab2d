//! # Order Service
//!
//! Orchestrates the order lifecycle across the store and the rate provider.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit(order_id)                                                       │
//! │       │                                                                 │
//! │       ├── already Submitted? ──► return stored projection (no rate call)│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load items + live product prices                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local total ── > 0 ? ──► RateProvider::purchase_rate()                 │
//! │       │                         │ failure: abort, order stays Draft     │
//! │       ▼                         ▼                                       │
//! │  finalize_totals(local, rate)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE ... WHERE status = 'draft'   ← single write, all or nothing     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are computed completely before anything is written, so a failed
//! rate fetch never leaves a half-submitted order behind.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, warn};
use webshop_core::availability::ensure_available;
use webshop_core::lifecycle::ensure_line_item_limit;
use webshop_core::pricing::{finalize_totals, order_total, price_line_items, requires_conversion};
use webshop_core::validation::{validate_quantity, validate_uuid};
use webshop_core::{CoreError, Customer, LineItemRequest, Order, OrderLineItem, Product};
use webshop_db::Database;
use webshop_rates::RateProvider;

use crate::api_types::{CreateOrderRequest, OrderItemResponse, OrderResponse, UpdateOrderRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// Order lifecycle operations.
pub struct OrderService<'a> {
    db: &'a Database,
    rates: &'a dyn RateProvider,
}

impl<'a> OrderService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        OrderService {
            db: &state.db,
            rates: state.rates.as_ref(),
        }
    }

    /// Creates a draft order with its initial line items.
    ///
    /// The availability gate runs before the customer lookup, so a request
    /// with both an unknown customer and an unavailable product reports the
    /// product.
    pub async fn create(&self, req: CreateOrderRequest) -> ApiResult<OrderResponse> {
        validate_uuid("customerId", &req.customer_id)?;
        validate_line_items(&req.order_item_list)?;

        let catalog = self.gate(&req.order_item_list).await?;

        let customer = self
            .db
            .customers()
            .get_by_id(&req.customer_id)
            .await?
            .ok_or_else(|| CoreError::CustomerNotFound(req.customer_id.clone()))?;

        let order = Order::draft(&customer.id);
        let items: Vec<OrderLineItem> = req
            .order_item_list
            .iter()
            .map(|r| OrderLineItem::from_request(&order.id, r))
            .collect();
        ensure_priceable(&items, &catalog)?;

        self.db.orders().create_with_items(&order, &items).await?;

        project(&order, &customer, &items, &catalog)
    }

    /// Replaces the line items of a draft order.
    ///
    /// A submitted order is returned unchanged.
    pub async fn update(&self, order_id: &str, req: UpdateOrderRequest) -> ApiResult<OrderResponse> {
        validate_line_items(&req.order_item_list)?;

        let catalog = self.gate(&req.order_item_list).await?;

        let order = self.load(order_id).await?;

        if order.accepts_line_items() {
            let items: Vec<OrderLineItem> = req
                .order_item_list
                .iter()
                .map(|r| OrderLineItem::from_request(&order.id, r))
                .collect();
            ensure_priceable(&items, &catalog)?;

            if !self.db.orders().replace_items(&order.id, &items).await? {
                debug!(order_id = %order.id, "Order left draft before items were replaced");
            }
        } else {
            debug!(order_id = %order.id, "Ignoring line item update on submitted order");
        }

        self.read(order_id).await
    }

    /// Submits an order, fixing its totals.
    ///
    /// Idempotent: a submitted order is returned as stored and the rate
    /// provider is not consulted again.
    pub async fn submit(&self, order_id: &str) -> ApiResult<OrderResponse> {
        let mut order = self.load(order_id).await?;
        if order.is_submitted() {
            debug!(order_id = %order.id, "Order already submitted");
            return self.read(order_id).await;
        }

        let items = self.db.orders().items(&order.id).await?;
        let catalog = self.catalog_for(items.iter().map(|i| i.product_id.clone())).await?;
        let lines = price_line_items(&items, &catalog)?;
        let local = order_total(&lines)?;

        let rate = if requires_conversion(local) {
            let rate = self.rates.purchase_rate().await?;
            debug!(source = self.rates.source_name(), rate = %rate, "Fetched purchase rate");
            Some(rate)
        } else {
            None
        };

        let totals = finalize_totals(local, rate)?;
        let at = Utc::now();

        if !self.db.orders().submit(&order.id, totals, at).await? {
            warn!(order_id = %order.id, "Order was submitted concurrently, returning stored totals");
            return self.read(order_id).await;
        }
        order.submit(totals, at);

        let customer = self.customer_of(&order).await?;
        project(&order, &customer, &items, &catalog)
    }

    /// Reads the full order projection.
    pub async fn read(&self, order_id: &str) -> ApiResult<OrderResponse> {
        let order = self.load(order_id).await?;
        let customer = self.customer_of(&order).await?;
        let items = self.db.orders().items(&order.id).await?;
        let catalog = self.catalog_for(items.iter().map(|i| i.product_id.clone())).await?;

        project(&order, &customer, &items, &catalog)
    }

    /// Deletes an order and its line items. Missing orders are a no-op.
    pub async fn delete(&self, order_id: &str) -> ApiResult<()> {
        if !self.db.orders().delete(order_id).await? {
            debug!(order_id = %order_id, "Delete of missing order ignored");
        }
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Runs the availability gate and returns the loaded products.
    async fn gate(&self, requests: &[LineItemRequest]) -> ApiResult<HashMap<String, Product>> {
        let catalog = self
            .catalog_for(requests.iter().map(|r| r.product_id.clone()))
            .await?;
        ensure_available(requests, &catalog)?;
        Ok(catalog)
    }

    async fn catalog_for(
        &self,
        product_ids: impl Iterator<Item = String>,
    ) -> ApiResult<HashMap<String, Product>> {
        let mut ids: Vec<String> = product_ids.collect();
        ids.sort();
        ids.dedup();
        Ok(self.db.products().get_many(&ids).await?)
    }

    /// Loads an order. A malformed id cannot name a stored order, so it is
    /// reported as absent.
    async fn load(&self, order_id: &str) -> ApiResult<Order> {
        if validate_uuid("orderId", order_id).is_err() {
            return Err(CoreError::OrderNotFound(order_id.to_string()).into());
        }
        let order = self
            .db
            .orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
        Ok(order)
    }

    async fn customer_of(&self, order: &Order) -> ApiResult<Customer> {
        let customer = self
            .db
            .customers()
            .get_by_id(&order.customer_id)
            .await?
            .ok_or_else(|| CoreError::CustomerNotFound(order.customer_id.clone()))?;
        Ok(customer)
    }
}

fn validate_line_items(requests: &[LineItemRequest]) -> ApiResult<()> {
    ensure_line_item_limit(requests.len())?;
    for req in requests {
        validate_uuid("productId", &req.product_id)?;
        validate_quantity(req.quantity)?;
    }
    Ok(())
}

/// Rejects line items whose subtotals or total would overflow, so nothing
/// is stored that could not be read back.
fn ensure_priceable(items: &[OrderLineItem], catalog: &HashMap<String, Product>) -> ApiResult<()> {
    let lines = price_line_items(items, catalog)?;
    order_total(&lines)?;
    Ok(())
}

/// Builds the client-facing projection from stored state and live prices.
fn project(
    order: &Order,
    customer: &Customer,
    items: &[OrderLineItem],
    catalog: &HashMap<String, Product>,
) -> ApiResult<OrderResponse> {
    let lines = price_line_items(items, catalog)?;
    let totals = order.totals();

    Ok(OrderResponse {
        order_id: order.id.clone(),
        customer_id: customer.id.clone(),
        customer_first_name: customer.first_name.clone(),
        customer_last_name: customer.last_name.clone(),
        status: order.status,
        total_price_local_cents: totals.map(|t| t.local.cents()),
        total_price_reference_cents: totals.map(|t| t.reference.cents()),
        order_item_list: lines
            .into_iter()
            .map(|line| OrderItemResponse {
                product_id: line.product_id,
                product_name: line.product_name,
                product_price_cents: line.unit_price.cents(),
                quantity: line.quantity,
                total_item_price_cents: line.subtotal.cents(),
            })
            .collect(),
    })
}
