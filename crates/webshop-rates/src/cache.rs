//! # Cached Rate Provider
//!
//! Optional decorator that reuses a fetched rate for a fixed time window.
//! Off by default: every submission with a positive total fetches a fresh
//! rate unless `rates.cache_ttl_secs` is set.
//!
//! Failures are never cached. The next call after a failed fetch goes
//! straight back to the inner provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use webshop_core::ExchangeRate;

use crate::error::RateResult;
use crate::provider::RateProvider;

/// Wraps a provider and serves its last successful rate for `ttl`.
pub struct CachedRateProvider<P> {
    inner: P,
    ttl: Duration,
    // Held across the inner fetch so concurrent misses make one request
    cached: Mutex<Option<(ExchangeRate, Instant)>>,
}

impl<P: RateProvider> CachedRateProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        CachedRateProvider {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<P: RateProvider> RateProvider for CachedRateProvider<P> {
    fn source_name(&self) -> &'static str {
        self.inner.source_name()
    }

    async fn purchase_rate(&self) -> RateResult<ExchangeRate> {
        let mut cached = self.cached.lock().await;

        if let Some((rate, fetched_at)) = *cached {
            if fetched_at.elapsed() < self.ttl {
                debug!(source = self.inner.source_name(), "Using cached rate");
                return Ok(rate);
            }
        }

        let rate = self.inner.purchase_rate().await?;
        *cached = Some((rate, Instant::now()));
        Ok(rate)
    }
}
