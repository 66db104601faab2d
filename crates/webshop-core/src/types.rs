//! # Domain Types
//!
//! Core domain types used throughout the webshop backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Customer     │   │       Order         │   │    Product      │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │◄──│  customer_id (FK)   │   │  id (UUID)      │   │
//! │  │  first_name     │   │  status             │   │  code (10 chr)  │   │
//! │  │  last_name      │   │  total_local_cents  │   │  price_cents    │   │
//! │  │  email          │   │  total_ref_cents    │   │  is_available   │   │
//! │  └─────────────────┘   └─────────┬───────────┘   └────────▲────────┘   │
//! │                                  │ 1..n                    │            │
//! │                        ┌─────────▼───────────┐             │            │
//! │                        │   OrderLineItem     │─────────────┘            │
//! │                        │  order_id (FK)      │  product_id (FK)         │
//! │                        │  quantity           │                          │
//! │                        └─────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price by Reference
//! A line item stores only the product reference and quantity. Its price is
//! read from the live product every time totals are computed, until the
//! order is submitted and the totals are frozen on the order row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered shop customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the shop catalog.
///
/// ## Dual-Key Identity
/// - `id`: UUID v4, used for relations
/// - `code`: 10-character business identifier, unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, exactly 10 characters.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Price in local-currency cents.
    pub price_cents: i64,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Whether the product can currently be ordered.
    pub is_available: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle state of an order.
///
/// Serialized to clients as `DRAFT` / `SUBMITTED`; stored in the database
/// as `draft` / `submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Line items may still change; no totals.
    Draft,
    /// Terminal. Totals are fixed.
    Submitted,
}

impl OrderStatus {
    /// Returns the database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Draft
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(OrderStatus::Draft),
            "submitted" => Ok(OrderStatus::Submitted),
            _ => Err(CoreError::UnknownOrderStatus(s.to_string())),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed by a customer.
///
/// ## Totals Invariant
/// `total_local_cents` and `total_reference_cents` are both `Some` exactly
/// when `status` is `Submitted`. See [`crate::lifecycle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    /// Sum of line subtotals in local-currency cents, set on submission.
    pub total_local_cents: Option<i64>,
    /// Local total converted to the reference currency, set on submission.
    pub total_reference_cents: Option<i64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub submitted_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Order Line Item
// =============================================================================

/// A product reference and quantity belonging to an order.
///
/// Never mutated in place; replacing the item set deletes and re-inserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLineItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A requested (product, quantity) pair, before it becomes a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

// =============================================================================
// Pricing Results
// =============================================================================

/// A line item joined with its live product price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLineItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price × quantity`.
    pub subtotal: Money,
}

/// Both totals of a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub local: Money,
    pub reference: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_round_trips_through_storage_form() {
        for status in [OrderStatus::Draft, OrderStatus::Submitted] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!("SUBMITTED".parse::<OrderStatus>().unwrap(), OrderStatus::Submitted);
    }

    #[test]
    fn test_unknown_order_status() {
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownOrderStatus(s) if s == "shipped"));
    }

    #[test]
    fn test_order_status_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&OrderStatus::Draft).unwrap(), "\"DRAFT\"");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Submitted).unwrap(),
            "\"SUBMITTED\""
        );
    }

    #[test]
    fn test_line_item_request_uses_camel_case() {
        let req: LineItemRequest =
            serde_json::from_str(r#"{"productId":"p-1","quantity":3}"#).unwrap();
        assert_eq!(req.product_id, "p-1");
        assert_eq!(req.quantity, 3);
    }

    #[test]
    fn test_product_price() {
        let now = Utc::now();
        let product = Product {
            id: "p-1".to_string(),
            code: "SKU0000001".to_string(),
            name: "Keyboard".to_string(),
            price_cents: 14999,
            description: None,
            is_available: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(product.price(), Money::from_cents(14999));
    }
}
