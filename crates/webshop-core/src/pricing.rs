//! # Pricing Engine
//!
//! Line subtotals, order totals, and the reference-currency total.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Total Calculation                            │
//! │                                                                         │
//! │  Line items (live product prices)                                       │
//! │  ┌───────────────────────────────────────────────────────┐             │
//! │  │ Keyboard   149.99 × 2  = 299.98                        │             │
//! │  │ Cable        1.99 × 50 =  99.50                        │             │
//! │  └───────────────────────────────────────────────────────┘             │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  Local total         = 399.48                                           │
//! │                      │                                                  │
//! │            local > 0 ? ──── no ───► reference = 0.00 (no rate fetched)  │
//! │                      │                                                  │
//! │                     yes                                                 │
//! │                      ▼                                                  │
//! │  Reference total     = 399.48 ÷ 7.5 = 53.264 → 53.26                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure. The caller decides whether to fetch a rate
//! by asking [`requires_conversion`] first.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::{ExchangeRate, Money};
use crate::types::{OrderLineItem, OrderTotals, PricedLineItem, Product};

/// Computes `product.price × quantity`.
///
/// ## Example
/// ```rust
/// use webshop_core::money::Money;
/// use webshop_core::pricing::line_subtotal;
///
/// let subtotal = line_subtotal(Money::from_cents(14999), 2).unwrap();
/// assert_eq!(subtotal.cents(), 29998);
/// ```
pub fn line_subtotal(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    unit_price.checked_multiply_quantity(quantity)
}

/// Joins line items with their products and prices each line.
///
/// Fails with `ProductNotFound` if a line references a product missing
/// from `catalog`.
pub fn price_line_items(
    items: &[OrderLineItem],
    catalog: &HashMap<String, Product>,
) -> CoreResult<Vec<PricedLineItem>> {
    items
        .iter()
        .map(|item| {
            let product = catalog
                .get(&item.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(item.product_id.clone()))?;
            Ok(PricedLineItem {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                unit_price: product.price(),
                quantity: item.quantity,
                subtotal: line_subtotal(product.price(), item.quantity)?,
            })
        })
        .collect()
}

/// Sums line subtotals. Zero for an empty order.
pub fn order_total(lines: &[PricedLineItem]) -> CoreResult<Money> {
    lines
        .iter()
        .try_fold(Money::zero(), |acc, line| acc.checked_add(line.subtotal))
}

/// Whether a local total must be converted through the rate provider.
#[inline]
pub fn requires_conversion(local_total: Money) -> bool {
    local_total.is_positive()
}

/// Converts `local_total` with `rate`.
///
/// `rate` is a raw decimal here; zero or negative values fail with
/// `InvalidRate`.
pub fn convert(local_total: Money, rate: rust_decimal::Decimal) -> CoreResult<Money> {
    local_total.convert(ExchangeRate::new(rate)?)
}

/// Builds the final totals for submission.
///
/// A non-positive local total yields a reference total of exactly zero and
/// ignores `rate`. Otherwise `rate` must be present.
///
/// ## Example
/// ```rust
/// use webshop_core::money::{ExchangeRate, Money};
/// use webshop_core::pricing::finalize_totals;
///
/// let totals = finalize_totals(Money::zero(), None).unwrap();
/// assert!(totals.reference.is_zero());
///
/// let rate = ExchangeRate::parse_localized("7,5").unwrap();
/// let totals = finalize_totals(Money::from_cents(39948), Some(rate)).unwrap();
/// assert_eq!(totals.reference.cents(), 5326);
/// ```
pub fn finalize_totals(local_total: Money, rate: Option<ExchangeRate>) -> CoreResult<OrderTotals> {
    let reference = if requires_conversion(local_total) {
        let rate = rate.ok_or_else(|| CoreError::InvalidRate("missing".to_string()))?;
        local_total.convert(rate)?
    } else {
        Money::zero()
    };

    Ok(OrderTotals {
        local: local_total,
        reference,
    })
}
