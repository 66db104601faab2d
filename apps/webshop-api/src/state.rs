//! Shared application state handed to every handler.

use std::sync::Arc;

use tracing::info;
use webshop_db::Database;
use webshop_rates::{CachedRateProvider, HnbRateProvider, RateProvider, RateResult};

use crate::config::RateSettings;

/// Service identity reported by the health endpoint.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        BuildInfo {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub struct AppState {
    pub db: Database,
    pub rates: Arc<dyn RateProvider>,
    pub build: BuildInfo,
}

impl AppState {
    pub fn new(db: Database, rates: Arc<dyn RateProvider>) -> Self {
        AppState {
            db,
            rates,
            build: BuildInfo::default(),
        }
    }
}

/// Builds the production rate provider, wrapped in a cache when configured.
pub fn build_rate_provider(settings: &RateSettings) -> RateResult<Arc<dyn RateProvider>> {
    let hnb = HnbRateProvider::new(settings.url.clone(), settings.timeout())?;

    let provider: Arc<dyn RateProvider> = match settings.cache_ttl() {
        Some(ttl) => {
            info!(ttl_secs = ttl.as_secs(), "Exchange rate caching enabled");
            Arc::new(CachedRateProvider::new(hnb, ttl))
        }
        None => Arc::new(hnb),
    };

    Ok(provider)
}
