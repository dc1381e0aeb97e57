//! Client library for the genderize.io name-to-gender inference API.
//!
//! # Overview
//! A `Request` accumulates names and an optional country filter and renders
//! the request URL. `Client` sends it through a pluggable `Transport`, then
//! `classify` maps status, rate-limit headers and JSON body to either a
//! result or a typed `Error`. Batch calls yield a `Collection` keyed by
//! name; single-name calls yield a `Lookup`.
//!
//! # Design
//! - One request/response cycle per call. No retries, caching or backoff.
//! - The transport is a trait object so tests can answer with canned
//!   responses; `UreqTransport` is the default.
//! - `escalate` adds panicking `expect_*` twins on top of the fallible API.
//!
//! ```no_run
//! use genderize_core::Client;
//!
//! let client = Client::builder().api_key("my-key").build()?;
//! let results = client.execute(&client.request().names(["Alice", "John"]).country_id("US"))?;
//! for record in &results {
//!     println!("{}: {} ({})", record.name, record.gender, record.probability);
//! }
//! println!("{} names left", results.limit_remaining());
//! # Ok::<(), genderize_core::Error>(())
//! ```

pub mod classify;
pub mod client;
pub mod collection;
pub mod error;
pub mod escalate;
pub mod http;
pub mod rate_limit;
pub mod request;
pub mod types;

pub use classify::Flavor;
pub use client::{Client, ClientBuilder, ClientConfig};
pub use collection::Collection;
pub use error::Error;
pub use http::{HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use rate_limit::{RateLimit, ResetPolicy};
pub use request::{Request, DEFAULT_ENDPOINT};
pub use types::{Gender, Inference, Lookup};
