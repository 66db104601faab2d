//! # Money Module
//!
//! Provides the `Money` type for local-currency amounts and the
//! `ExchangeRate` type used to express a total in the reference currency.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    149.99 × 2 = 299.97999999999996  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    14999 cents × 2 = 29998 cents = 299.98 exactly                       │
//! │                                                                         │
//! │  Currency conversion divides by a decimal rate, so it runs in           │
//! │  rust_decimal and is rounded back to cents (half-up).                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use webshop_core::money::{ExchangeRate, Money};
//!
//! let price = Money::from_cents(14999); // 149.99
//! let line_total = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line_total.cents(), 29998);
//!
//! let rate = ExchangeRate::parse_localized("7,5").unwrap();
//! let converted = Money::from_cents(39948).convert(rate).unwrap();
//! assert_eq!(converted.cents(), 5326);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::MONEY_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of the local currency (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic stays closed under subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► line subtotal (× quantity) ──► order total
///                                                         │
///                          ExchangeRate ──► convert() ◄───┘
///                                              │
///                                              ▼
///                                  reference-currency total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use webshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding half-up to cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use webshop_core::money::Money;
    ///
    /// let amount = Decimal::new(53264, 3); // 53.264
    /// assert_eq!(Money::from_decimal(amount).unwrap().cents(), 5326);
    ///
    /// let midpoint = Decimal::new(10005, 3); // 10.005
    /// assert_eq!(Money::from_decimal(midpoint).unwrap().cents(), 1001);
    /// ```
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Returns the value as a decimal with two fractional digits.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity, failing instead of wrapping on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use webshop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(199); // 1.99
    /// let line_total = unit_price.checked_multiply_quantity(50).unwrap();
    /// assert_eq!(line_total.cents(), 9950); // 99.50
    /// ```
    pub fn checked_multiply_quantity(&self, qty: i64) -> CoreResult<Self> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Adds two amounts, failing instead of wrapping on overflow.
    pub fn checked_add(&self, other: Money) -> CoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Converts a local-currency amount into the reference currency.
    ///
    /// ## Formula
    /// `self ÷ rate`, computed in decimal and rounded to 2 fractional
    /// digits, midpoint away from zero (half-up for the non-negative totals
    /// orders produce).
    ///
    /// ## Example
    /// ```rust
    /// use webshop_core::money::{ExchangeRate, Money};
    ///
    /// let rate = ExchangeRate::parse_localized("7,5").unwrap();
    /// // 399.48 / 7.5 = 53.264 → 53.26
    /// assert_eq!(Money::from_cents(39948).convert(rate).unwrap().cents(), 5326);
    /// ```
    pub fn convert(&self, rate: ExchangeRate) -> CoreResult<Money> {
        let converted = self
            .to_decimal()
            .checked_div(rate.value())
            .ok_or(CoreError::AmountOverflow)?;
        Money::from_decimal(converted)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as a plain decimal amount ("399.48").
///
/// ## Note
/// This is for logs and debugging. Clients format currency themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_units().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// How many local-currency units buy one reference-currency unit.
///
/// ## Invariant
/// The wrapped value is strictly positive. Every constructor enforces it,
/// so division in [`Money::convert`] never sees zero or a negative rate.
///
/// ## Source Format
/// The rate service publishes values with a comma as the fractional
/// separator (`"7,500000"`). [`ExchangeRate::parse_localized`] handles that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Creates a rate, rejecting zero and negative values.
    pub fn new(value: Decimal) -> CoreResult<Self> {
        if value <= Decimal::ZERO {
            return Err(CoreError::InvalidRate(value.to_string()));
        }
        Ok(ExchangeRate(value))
    }

    /// Parses a locale-formatted decimal (comma or dot as fractional separator).
    ///
    /// ## Example
    /// ```rust
    /// use webshop_core::money::ExchangeRate;
    ///
    /// assert!(ExchangeRate::parse_localized("7,534500").is_ok());
    /// assert!(ExchangeRate::parse_localized("7.5345").is_ok());
    /// assert!(ExchangeRate::parse_localized("0,000000").is_err());
    /// assert!(ExchangeRate::parse_localized("n/a").is_err());
    /// ```
    pub fn parse_localized(raw: &str) -> CoreResult<Self> {
        let value = parse_localized_decimal(raw)
            .ok_or_else(|| CoreError::InvalidRate(raw.trim().to_string()))?;
        ExchangeRate::new(value)
    }

    /// Returns the underlying decimal value.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Parses a decimal written with a comma (or dot) as fractional separator.
///
/// Returns `None` for anything that is not a plain decimal number.
pub fn parse_localized_decimal(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ExchangeRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        ExchangeRate::new(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
