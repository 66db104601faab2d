//! # HNB Rate Provider
//!
//! Reads the purchase rate from the Croatian National Bank exchange-rate
//! list (`https://api.hnb.hr/tecajn/v1?valuta=EUR`).
//!
//! ## Response Format
//! ```json
//! [
//!   {
//!     "Broj tečajnice": "249",
//!     "Datum primjene": "30.12.2022",
//!     "Valuta": "EUR",
//!     "Jedinica": 1,
//!     "Kupovni za devize": "7,517549",
//!     "Srednji za devize": "7,534500",
//!     "Prodajni za devize": "7,551451"
//!   }
//! ]
//! ```
//!
//! Only the first record is read. Its `"Kupovni za devize"` value uses a
//! comma as the fractional separator.
//!
//! No retries. A timeout applies only when configured; otherwise the
//! transport default holds.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use webshop_core::money::parse_localized_decimal;
use webshop_core::ExchangeRate;

use crate::error::{RateError, RateResult};
use crate::provider::RateProvider;

/// Default rate-list endpoint for EUR.
pub const DEFAULT_HNB_URL: &str = "https://api.hnb.hr/tecajn/v1?valuta=EUR";

/// Name of the purchase-rate field in a rate record.
pub const PURCHASE_RATE_FIELD: &str = "Kupovni za devize";

/// One entry of the rate list. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RateRecord {
    #[serde(rename = "Valuta", default)]
    currency: Option<String>,

    #[serde(rename = "Kupovni za devize", default)]
    purchase_rate: Option<String>,
}

/// HTTP rate provider backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HnbRateProvider {
    http: reqwest::Client,
    url: String,
}

impl HnbRateProvider {
    /// Creates a provider for `url`.
    ///
    /// `timeout` of `None` keeps the client's default (no overall timeout).
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> RateResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RateError::Transport(e.to_string()))?;

        Ok(HnbRateProvider {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RateProvider for HnbRateProvider {
    fn source_name(&self) -> &'static str {
        "hnb"
    }

    async fn purchase_rate(&self) -> RateResult<ExchangeRate> {
        debug!(url = %self.url, "Fetching purchase rate");

        let resp = self.http.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Rate service returned error status");
            return Err(RateError::HttpStatus(status.as_u16()));
        }

        let body = resp.text().await?;
        let rate = parse_purchase_rate(&body)?;

        debug!(rate = %rate, "Purchase rate fetched");
        Ok(rate)
    }
}

/// Extracts the purchase rate from a rate-list JSON body.
///
/// ## Example
/// ```rust
/// use webshop_rates::hnb::parse_purchase_rate;
///
/// let body = r#"[{"Valuta":"EUR","Kupovni za devize":"7,500000"}]"#;
/// assert_eq!(parse_purchase_rate(body).unwrap().to_string(), "7.500000");
/// ```
pub fn parse_purchase_rate(body: &str) -> RateResult<ExchangeRate> {
    let records: Vec<RateRecord> =
        serde_json::from_str(body).map_err(|e| RateError::Decode(e.to_string()))?;

    let first = records.into_iter().next().ok_or(RateError::EmptyResponse)?;

    if let Some(currency) = first.currency.as_deref() {
        debug!(currency, "Reading first rate record");
    }

    let raw = first
        .purchase_rate
        .ok_or(RateError::MissingField(PURCHASE_RATE_FIELD))?;

    let value =
        parse_localized_decimal(&raw).ok_or_else(|| RateError::InvalidNumber(raw.clone()))?;

    ExchangeRate::new(value).map_err(|_| RateError::InvalidRate(raw))
}
