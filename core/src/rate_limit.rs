//! Quota snapshot carried in response headers.

use std::time::Duration;

use crate::error::Error;
use crate::http::HttpResponse;

/// Names available in the current time window.
pub const HEADER_LIMIT: &str = "X-Rate-Limit-Limit";
/// Names left in the current time window.
pub const HEADER_REMAINING: &str = "X-Rate-Limit-Remaining";
/// Seconds until a new time window opens.
pub const HEADER_RESET: &str = "X-Rate-Reset";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: i64,
    pub remaining: i64,
    pub reset: Duration,
}

/// How strictly the reset header is required. Limit and remaining are
/// always mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// A missing or malformed reset header is a `ResponseHeader` error.
    #[default]
    Required,
    /// A missing or malformed reset header yields a zero duration.
    BestEffort,
}

impl RateLimit {
    pub fn from_response(response: &HttpResponse, policy: ResetPolicy) -> Result<Self, Error> {
        let limit = parse_header(response, HEADER_LIMIT)?;
        let remaining = parse_header(response, HEADER_REMAINING)?;
        let reset = match (parse_header::<u64>(response, HEADER_RESET), policy) {
            (Ok(secs), _) => Duration::from_secs(secs),
            (Err(_), ResetPolicy::BestEffort) => Duration::ZERO,
            (Err(err), ResetPolicy::Required) => return Err(err),
        };
        Ok(Self {
            limit,
            remaining,
            reset,
        })
    }
}

fn parse_header<T>(response: &HttpResponse, header: &'static str) -> Result<T, Error>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let value = response.header(header).unwrap_or_default();
    value.trim().parse().map_err(|source| Error::ResponseHeader {
        header,
        value: value.to_string(),
        source,
    })
}
