//! Error types for the genderize client.
//!
//! # Design
//! One enum covers every failure a caller can see, grouped as:
//! transport failures (never retried), body and header decoding failures,
//! API-semantic errors (one variant per documented status and message), and
//! `NotFound` from `Collection` lookups.
//!
//! The 422 and 429 payloads are told apart by exact message text, see
//! `classify`. Single-name lookups report `InvalidName`,
//! `RequestLimitTooLow` and `Unknown`; batch calls report the message-carrying
//! `Validation`, `TooManyRequests` and `Internal`.

use std::num::ParseIntError;

use thiserror::Error;

use crate::http::TransportError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The transport could not complete the round-trip.
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    /// The configured endpoint is not an absolute URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The response body is not the JSON shape the call expects.
    #[error("malformed response body: {0}")]
    ResponseBody(#[from] serde_json::Error),

    /// A rate-limit header is missing or not a base-10 integer.
    #[error("wrong {header} response header: {value:?}")]
    ResponseHeader {
        header: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// 401.
    #[error("invalid API key")]
    InvalidApiKey,

    /// 402.
    #[error("subscription is not active")]
    SubscriptionInactive,

    /// 422 with the missing-name message.
    #[error("missing 'name' parameter")]
    MissingName,

    /// 422, single-name lookups.
    #[error("invalid 'name' parameter")]
    InvalidName,

    /// 422, batch calls.
    #[error("validation failed: {0}")]
    Validation(String),

    /// 429 with the limit-reached message.
    #[error("request limit reached")]
    RequestLimitReached,

    /// 429, single-name lookups.
    #[error("request limit too low to process request")]
    RequestLimitTooLow,

    /// 429, batch calls.
    #[error("too many requests: {0}")]
    TooManyRequests(String),

    /// Any other status, single-name lookups.
    #[error("something went wrong (HTTP {status}): {message}")]
    Unknown { status: u16, message: String },

    /// Any other status, batch calls.
    #[error("internal error (HTTP {status}): {message}")]
    Internal { status: u16, message: String },

    /// A `Collection` lookup found nothing.
    #[error("nothing found")]
    NotFound,
}

impl Error {
    /// HTTP status behind an API-semantic error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::InvalidApiKey => Some(401),
            Error::SubscriptionInactive => Some(402),
            Error::MissingName | Error::InvalidName | Error::Validation(_) => Some(422),
            Error::RequestLimitReached | Error::RequestLimitTooLow | Error::TooManyRequests(_) => {
                Some(429)
            }
            Error::Unknown { status, .. } | Error::Internal { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the service answered and rejected the request.
    pub fn is_api_error(&self) -> bool {
        self.status().is_some()
    }
}
