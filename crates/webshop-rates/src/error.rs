//! # Rate Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rate Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────┐  ┌─────────────────────┐ │
//! │  │   Transport     │  │     Response        │  │      Value          │ │
//! │  │                 │  │                     │  │                     │ │
//! │  │  Transport      │  │  HttpStatus         │  │  InvalidNumber      │ │
//! │  │  Timeout        │  │  Decode             │  │  InvalidRate        │ │
//! │  │                 │  │  EmptyResponse      │  │                     │ │
//! │  │                 │  │  MissingField       │  │                     │ │
//! │  └─────────────────┘  └─────────────────────┘  └─────────────────────┘ │
//! │                                                                         │
//! │  Everything except InvalidRate means "rate unavailable".               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for rate operations.
pub type RateResult<T> = Result<T, RateError>;

/// Failure to obtain a usable exchange rate.
#[derive(Debug, Error)]
pub enum RateError {
    /// The rate service could not be reached.
    #[error("Rate service unreachable: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Rate service timed out")]
    Timeout,

    /// The rate service answered with a non-success status.
    #[error("Rate service returned HTTP {0}")]
    HttpStatus(u16),

    /// The body is not the expected JSON list of rate records.
    #[error("Malformed rate response: {0}")]
    Decode(String),

    /// The rate list is empty.
    #[error("Rate service returned no records")]
    EmptyResponse,

    /// The first record lacks the purchase-rate field.
    #[error("Rate record is missing field '{0}'")]
    MissingField(&'static str),

    /// The purchase-rate field is not a decimal number.
    #[error("Rate value is not a number: '{0}'")]
    InvalidNumber(String),

    /// The purchase rate parsed but is zero or negative.
    #[error("Rate must be positive, got {0}")]
    InvalidRate(String),
}

impl RateError {
    /// True for a rate that was fetched but cannot be used for division.
    pub fn is_invalid_rate(&self) -> bool {
        matches!(self, RateError::InvalidRate(_))
    }
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RateError::Timeout
        } else if let Some(status) = err.status() {
            RateError::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            RateError::Decode(err.to_string())
        } else {
            RateError::Transport(err.to_string())
        }
    }
}
