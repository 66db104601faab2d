//! # webshop-rates: Exchange-Rate Provider
//!
//! Supplies the purchase rate used to convert a submitted order's local
//! total into the reference currency.
//!
//! ## Module Structure
//! ```text
//! webshop-rates
//! ├── provider  - RateProvider trait
//! ├── hnb       - HTTP provider for the HNB rate list
//! ├── cache     - Optional TTL decorator
//! └── error     - RateError
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use webshop_rates::{HnbRateProvider, RateProvider, DEFAULT_HNB_URL};
//!
//! let rates: Arc<dyn RateProvider> = Arc::new(HnbRateProvider::new(DEFAULT_HNB_URL, None)?);
//! let rate = rates.purchase_rate().await?;
//! ```

pub mod cache;
pub mod error;
pub mod hnb;
pub mod provider;

pub use cache::CachedRateProvider;
pub use error::{RateError, RateResult};
pub use hnb::{HnbRateProvider, DEFAULT_HNB_URL};
pub use provider::RateProvider;
