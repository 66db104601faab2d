//! # Order Lifecycle
//!
//! The Draft → Submitted state machine.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   create(customer)                                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌─────────┐   submit(totals)   ┌───────────┐                          │
//! │   │  Draft  │ ─────────────────► │ Submitted │ ◄──┐ submit again:       │
//! │   └─────────┘                    └───────────┘ ───┘ no-op, same totals  │
//! │     │    ▲                                                              │
//! │     └────┘ replace line items                                           │
//! │                                                                         │
//! │   Draft:     totals = None, line items may change                       │
//! │   Submitted: totals = Some, line item changes ignored                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing leads out of `Submitted`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::MAX_LINE_ITEMS_PER_ORDER;
use crate::types::{LineItemRequest, Order, OrderLineItem, OrderStatus, OrderTotals};

impl OrderStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!((self, next), (OrderStatus::Draft, OrderStatus::Submitted))
    }
}

impl Order {
    /// Creates a new draft order for `customer_id` with no totals.
    pub fn draft(customer_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            status: OrderStatus::Draft,
            total_local_cents: None,
            total_reference_cents: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
        }
    }

    #[inline]
    pub fn is_submitted(&self) -> bool {
        self.status == OrderStatus::Submitted
    }

    /// Line items may only be added or replaced while in `Draft`.
    #[inline]
    pub fn accepts_line_items(&self) -> bool {
        self.status == OrderStatus::Draft
    }

    /// Moves a draft to `Submitted` with `totals`.
    ///
    /// Returns `false` and leaves the order untouched if it is already
    /// submitted, so stored totals are never recomputed.
    pub fn submit(&mut self, totals: OrderTotals, at: DateTime<Utc>) -> bool {
        if !self.status.can_transition_to(OrderStatus::Submitted) {
            return false;
        }
        self.status = OrderStatus::Submitted;
        self.total_local_cents = Some(totals.local.cents());
        self.total_reference_cents = Some(totals.reference.cents());
        self.submitted_at = Some(at);
        self.updated_at = at;
        true
    }

    /// Stored totals, present only once submitted.
    pub fn totals(&self) -> Option<OrderTotals> {
        match (self.total_local_cents, self.total_reference_cents) {
            (Some(local), Some(reference)) => Some(OrderTotals {
                local: Money::from_cents(local),
                reference: Money::from_cents(reference),
            }),
            _ => None,
        }
    }

    /// Checks that totals are populated if and only if the order is submitted.
    pub fn has_consistent_totals(&self) -> bool {
        match self.status {
            OrderStatus::Draft => {
                self.total_local_cents.is_none() && self.total_reference_cents.is_none()
            }
            OrderStatus::Submitted => {
                self.total_local_cents.is_some() && self.total_reference_cents.is_some()
            }
        }
    }
}

/// Rejects a line-item batch larger than [`MAX_LINE_ITEMS_PER_ORDER`].
pub fn ensure_line_item_limit(count: usize) -> CoreResult<()> {
    if count > MAX_LINE_ITEMS_PER_ORDER {
        return Err(CoreError::TooManyLineItems {
            max: MAX_LINE_ITEMS_PER_ORDER,
        });
    }
    Ok(())
}

impl OrderLineItem {
    /// Creates a new line item for `order_id` from a request.
    pub fn from_request(order_id: &str, request: &LineItemRequest) -> Self {
        OrderLineItem {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            product_id: request.product_id.clone(),
            quantity: request.quantity,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(local: i64, reference: i64) -> OrderTotals {
        OrderTotals {
            local: Money::from_cents(local),
            reference: Money::from_cents(reference),
        }
    }

    #[test]
    fn test_draft_has_no_totals() {
        let order = Order::draft("c-1");
        assert_eq!(order.status, OrderStatus::Draft);
        assert_eq!(order.customer_id, "c-1");
        assert!(order.accepts_line_items());
        assert!(order.totals().is_none());
        assert!(order.has_consistent_totals());
    }

    #[test]
    fn test_submit_sets_totals() {
        let mut order = Order::draft("c-1");
        let at = Utc::now();
        assert!(order.submit(totals(39948, 5326), at));

        assert!(order.is_submitted());
        assert!(!order.accepts_line_items());
        assert_eq!(order.total_local_cents, Some(39948));
        assert_eq!(order.total_reference_cents, Some(5326));
        assert_eq!(order.submitted_at, Some(at));
        assert!(order.has_consistent_totals());
    }

    #[test]
    fn test_resubmit_keeps_first_totals() {
        let mut order = Order::draft("c-1");
        order.submit(totals(39948, 5326), Utc::now());
        let first = order.clone();

        assert!(!order.submit(totals(1, 1), Utc::now()));
        assert_eq!(order, first);
    }

    #[test]
    fn test_transitions() {
        assert!(OrderStatus::Draft.can_transition_to(OrderStatus::Submitted));
        assert!(!OrderStatus::Submitted.can_transition_to(OrderStatus::Draft));
        assert!(!OrderStatus::Submitted.can_transition_to(OrderStatus::Submitted));
        assert!(!OrderStatus::Draft.can_transition_to(OrderStatus::Draft));
    }

    #[test]
    fn test_line_item_from_request() {
        let request = LineItemRequest {
            product_id: "p-1".to_string(),
            quantity: 4,
        };
        let a = OrderLineItem::from_request("o-1", &request);
        let b = OrderLineItem::from_request("o-1", &request);
        assert_eq!(a.order_id, "o-1");
        assert_eq!(a.product_id, "p-1");
        assert_eq!(a.quantity, 4);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_line_item_limit() {
        assert!(ensure_line_item_limit(0).is_ok());
        assert!(ensure_line_item_limit(100).is_ok());
        assert!(matches!(
            ensure_line_item_limit(101),
            Err(CoreError::TooManyLineItems { max: 100 })
        ));
    }

    #[test]
    fn test_inconsistent_totals_detected() {
        let mut order = Order::draft("c-1");
        order.total_local_cents = Some(100);
        assert!(!order.has_consistent_totals());
    }
}
