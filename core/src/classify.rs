//! Response classification: status, headers and body to a typed result.
//!
//! # Design
//! Classification runs in a fixed order:
//! 1. The body is decoded as JSON. A body that is not JSON is a
//!    `ResponseBody` error whatever the status.
//! 2. A non-200 status maps to an API error. 422 and 429 are split by the
//!    exact `error` message; the remaining mapping depends on the `Flavor`.
//! 3. On 200 the rate-limit headers are parsed (see `ResetPolicy`), then the
//!    body is decoded into one record (`Single`) or an array (`Batch`).
//!
//! The service distinguishes errors sharing a status only by message text.
//! The messages below are matched exactly and will break silently if the
//! service rewords them.

use serde_json::Value;
use tracing::debug;

use crate::collection::Collection;
use crate::error::Error;
use crate::http::HttpResponse;
use crate::rate_limit::{RateLimit, ResetPolicy};
use crate::types::{Inference, Lookup};

/// 422 body when no name was supplied.
pub const MSG_MISSING_NAME: &str = "Missing 'name' parameter";
/// 429 body when the window's quota is exhausted.
pub const MSG_REQUEST_LIMIT_REACHED: &str = "Request limit reached";

/// Which call shape produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// One `name` parameter, one JSON object back.
    Single,
    /// Repeated `name[]` parameters, a JSON array back.
    Batch,
}

/// Classify the response to a single-name lookup.
pub fn single(response: &HttpResponse, policy: ResetPolicy) -> Result<Lookup, Error> {
    let body = decode(response, Flavor::Single)?;
    let rate_limit = RateLimit::from_response(response, policy)?;
    let inference: Inference = serde_json::from_value(body)?;
    Ok(Lookup {
        inference,
        rate_limit,
    })
}

/// Classify the response to a batch call.
pub fn batch(response: &HttpResponse, policy: ResetPolicy) -> Result<Collection, Error> {
    let body = decode(response, Flavor::Batch)?;
    let rate_limit = RateLimit::from_response(response, policy)?;
    let records: Vec<Inference> = serde_json::from_value(body)?;
    Ok(Collection::new(records, Some(rate_limit)))
}

/// Decode the body and turn any non-200 status into its error.
fn decode(response: &HttpResponse, flavor: Flavor) -> Result<Value, Error> {
    let body: Value = serde_json::from_slice(&response.body)?;
    debug!(status = response.status, ?flavor, "classifying response");
    if response.status == 200 {
        return Ok(body);
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Err(status_error(response.status, message, flavor))
}

fn status_error(status: u16, message: String, flavor: Flavor) -> Error {
    match (status, flavor) {
        (401, _) => Error::InvalidApiKey,
        (402, _) => Error::SubscriptionInactive,
        (422, _) if message == MSG_MISSING_NAME => Error::MissingName,
        (422, Flavor::Single) => Error::InvalidName,
        (422, Flavor::Batch) => Error::Validation(message),
        (429, _) if message == MSG_REQUEST_LIMIT_REACHED => Error::RequestLimitReached,
        (429, Flavor::Single) => Error::RequestLimitTooLow,
        (429, Flavor::Batch) => Error::TooManyRequests(message),
        (status, Flavor::Single) => Error::Unknown { status, message },
        (status, Flavor::Batch) => Error::Internal { status, message },
    }
}
