//! # Rate Provider Trait
//!
//! The one seam between order submission and the outside world.
//!
//! ```text
//! OrderService::submit
//!      │  local total > 0 ?
//!      ▼
//! Arc<dyn RateProvider> ──► HnbRateProvider         (production)
//!                      ──► CachedRateProvider<P>   (opt-in TTL)
//!                      ──► stub                     (tests)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use webshop_core::ExchangeRate;

use crate::error::RateResult;

/// Source of the current purchase rate.
///
/// Implementations must be cheap to share across request handlers.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short identifier used in logs (e.g. `"hnb"`).
    fn source_name(&self) -> &'static str;

    /// Local-currency units per one reference-currency unit, fetched now.
    async fn purchase_rate(&self) -> RateResult<ExchangeRate>;
}

#[async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    fn source_name(&self) -> &'static str {
        (**self).source_name()
    }

    async fn purchase_rate(&self) -> RateResult<ExchangeRate> {
        (**self).purchase_rate().await
    }
}
