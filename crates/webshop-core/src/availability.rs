//! # Availability Gate
//!
//! All-or-nothing check that every requested product exists and is
//! currently available.
//!
//! ```text
//! requests ──► every product present AND is_available ? ──► accept batch
//!                              │
//!                              └─ any miss ──► reject the whole batch
//! ```
//!
//! The check runs when line items are created or replaced. It is not
//! repeated at submission.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItemRequest, Product};

/// Returns true only if every request references a present, available product.
///
/// An empty request list is accepted.
pub fn all_available(requests: &[LineItemRequest], catalog: &HashMap<String, Product>) -> bool {
    requests.iter().all(|req| is_orderable(&req.product_id, catalog))
}

/// Lists the requested product ids that are missing or unavailable.
///
/// Each offending id appears once, in request order.
pub fn unavailable_products(
    requests: &[LineItemRequest],
    catalog: &HashMap<String, Product>,
) -> Vec<String> {
    let mut offending: Vec<String> = Vec::new();
    for req in requests {
        if !is_orderable(&req.product_id, catalog) && !offending.contains(&req.product_id) {
            offending.push(req.product_id.clone());
        }
    }
    offending
}

/// Fails with `ProductsUnavailable` unless the whole batch passes.
pub fn ensure_available(
    requests: &[LineItemRequest],
    catalog: &HashMap<String, Product>,
) -> CoreResult<()> {
    if all_available(requests, catalog) {
        return Ok(());
    }
    Err(CoreError::ProductsUnavailable {
        product_ids: unavailable_products(requests, catalog),
    })
}

fn is_orderable(product_id: &str, catalog: &HashMap<String, Product>) -> bool {
    catalog.get(product_id).is_some_and(|p| p.is_available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, is_available: bool) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            code: format!("{:0>10}", id),
            name: id.to_uppercase(),
            price_cents: 100,
            description: None,
            is_available,
            created_at: now,
            updated_at: now,
        }
    }

    fn req(product_id: &str) -> LineItemRequest {
        LineItemRequest {
            product_id: product_id.to_string(),
            quantity: 1,
        }
    }

    fn catalog() -> HashMap<String, Product> {
        [product("a", true), product("b", true), product("off", false)]
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect()
    }

    #[test]
    fn test_all_available() {
        assert!(all_available(&[req("a"), req("b")], &catalog()));
        assert!(all_available(&[], &catalog()));
    }

    #[test]
    fn test_one_unavailable_rejects_batch() {
        let requests = [req("a"), req("off"), req("b")];
        assert!(!all_available(&requests, &catalog()));
        assert_eq!(unavailable_products(&requests, &catalog()), vec!["off"]);
    }

    #[test]
    fn test_missing_product_rejects_batch() {
        let requests = [req("a"), req("ghost"), req("ghost")];
        let err = ensure_available(&requests, &catalog()).unwrap_err();
        match err {
            CoreError::ProductsUnavailable { product_ids } => {
                assert_eq!(product_ids, vec!["ghost"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ensure_available_ok() {
        assert!(ensure_available(&[req("b")], &catalog()).is_ok());
    }
}
