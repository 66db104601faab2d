//! # Error Types
//!
//! Domain-specific error types for webshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  webshop-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  webshop-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  webshop-rates errors (separate crate)                                  │
//! │  └── RateError        - Exchange-rate fetch/parse failures              │
//! │                                                                         │
//! │  REST API errors (in app)                                               │
//! │  └── ApiError         - What clients see (serialized JSON)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, offending values)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// The API layer translates them into HTTP responses.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Customer cannot be found.
    ///
    /// ## When This Occurs
    /// - Creating an order for a customer id that was never registered
    /// - Customer was deleted between two requests
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// One or more requested products are missing or not available.
    ///
    /// ## User Workflow
    /// ```text
    /// create-order [A (available), B (unavailable), C (missing)]
    ///      │
    ///      ▼
    /// Availability gate: all-or-nothing
    ///      │
    ///      ▼
    /// ProductsUnavailable { product_ids: [B, C] }
    ///      │
    ///      ▼
    /// Nothing is persisted, not even A
    /// ```
    #[error("Requested products are unavailable: {}", product_ids.join(", "))]
    ProductsUnavailable { product_ids: Vec<String> },

    /// A stored order status is not one this version understands.
    #[error("Unknown order status: {0}")]
    UnknownOrderStatus(String),

    /// Exchange rate is zero, negative, or not a number.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// Monetary arithmetic left the representable range.
    #[error("Monetary amount out of range")]
    AmountOverflow,

    /// Order request carries more line items than allowed.
    #[error("Order cannot have more than {max} line items")]
    TooManyLineItems { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value must have an exact length.
    #[error("{field} must be exactly {len} characters")]
    ExactLength { field: String, len: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
