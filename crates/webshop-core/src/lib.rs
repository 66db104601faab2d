//! # webshop-core: Pure Business Logic for the Webshop Backend
//!
//! This crate holds the order pricing and lifecycle rules as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Webshop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (webshop-api)                       │   │
//! │  │   create-order ──► update-order ──► submit-order ──► read-order │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ webshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────────┐ ┌────────────┐   │   │
//! │  │   │  money   │ │ pricing  │ │ availability │ │ lifecycle  │   │   │
//! │  │   │  Money   │ │ subtotal │ │     gate     │ │ Draft ──►  │   │   │
//! │  │   │  Rate    │ │  total   │ │              │ │  Submitted │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────────┘ └────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌──────────────────────────┐  │  ┌──────────────────────────────────┐ │
//! │  │ webshop-db (SQLite)      │◄─┴─►│ webshop-rates (exchange rates)   │ │
//! │  └──────────────────────────┘     └──────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, OrderLineItem)
//! - [`money`] - Integer `Money` and decimal `ExchangeRate`
//! - [`pricing`] - Line subtotals, order totals, reference-currency totals
//! - [`availability`] - All-or-nothing product availability check
//! - [`lifecycle`] - The Draft → Submitted state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use webshop_core::money::{ExchangeRate, Money};
//!
//! let total = Money::from_cents(39948); // 399.48 local
//! let rate = ExchangeRate::parse_localized("7,500000").unwrap();
//!
//! // 399.48 / 7.5 = 53.264 → 53.26
//! assert_eq!(total.convert(rate).unwrap().cents(), 5326);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{ExchangeRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items accepted in a single create/update request.
///
/// ## Business Reason
/// Prevents runaway requests and keeps a single transaction small.
pub const MAX_LINE_ITEMS_PER_ORDER: usize = 100;

/// Number of fractional digits every monetary amount is rounded to.
pub const MONEY_SCALE: u32 = 2;
