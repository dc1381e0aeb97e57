//! Client facade: request rendering, one round-trip, classification.
//!
//! # Design
//! `ClientConfig` is fixed once `ClientBuilder::build` returns. The only
//! state that changes afterwards is the last rate-limit snapshot, kept behind
//! a mutex so concurrent calls can share one `Client`; whichever call
//! finishes last wins.
//!
//! Each call performs exactly one GET. Transport failures come back as
//! `Error::Transport` and are never retried.

use std::env;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::classify;
use crate::collection::Collection;
use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::rate_limit::{RateLimit, ResetPolicy};
use crate::request::{Request, DEFAULT_ENDPOINT};
use crate::types::Lookup;

/// Environment variable read by `ClientBuilder::from_env` for the API key.
pub const ENV_API_KEY: &str = "GENDERIZE_API_KEY";
/// Environment variable read by `ClientBuilder::from_env` for the endpoint.
pub const ENV_ENDPOINT: &str = "GENDERIZE_ENDPOINT";

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub endpoint: Url,
    pub reset_policy: ResetPolicy,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint.as_str())
            .field("reset_policy", &self.reset_policy)
            .finish()
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    reset_policy: ResetPolicy,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded from `GENDERIZE_API_KEY` and `GENDERIZE_ENDPOINT`.
    /// Unset or empty variables are ignored.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(key) = env::var(ENV_API_KEY) {
            builder = builder.api_key(key);
        }
        if let Ok(endpoint) = env::var(ENV_ENDPOINT) {
            if !endpoint.is_empty() {
                builder = builder.endpoint(endpoint);
            }
        }
        builder
    }

    /// An empty key is treated as no key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Replace the default `UreqTransport`.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(transport);
        self.transport = Some(transport);
        self
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Global timeout for the default transport. Ignored when a custom
    /// transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let endpoint = Url::parse(self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqTransport::new(self.timeout)),
        };
        Ok(Client {
            config: ClientConfig {
                api_key: self.api_key,
                endpoint,
                reset_policy: self.reset_policy,
            },
            transport,
            rate_limit: Mutex::new(None),
        })
    }
}

pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    rate_limit: Mutex<Option<RateLimit>>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Empty batch request bound to this client's endpoint.
    pub fn request(&self) -> Request {
        Request::at(self.config.endpoint.clone())
    }

    /// Last rate-limit snapshot seen by any call on this client.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        *self.rate_limit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a batch request.
    pub fn execute(&self, request: &Request) -> Result<Collection, Error> {
        let response = self.send(request)?;
        let outcome = classify::batch(&response, self.config.reset_policy);
        let snapshot = match &outcome {
            Ok(collection) => collection.rate_limit(),
            Err(_) => self.fallback_snapshot(&response),
        };
        self.record(snapshot);
        outcome
    }

    /// Look up a single name.
    pub fn check(&self, name: &str) -> Result<Lookup, Error> {
        self.lookup(Request::single(self.config.endpoint.clone(), name))
    }

    /// Look up a single name within one country.
    pub fn check_in(&self, name: &str, country_id: &str) -> Result<Lookup, Error> {
        self.lookup(Request::single(self.config.endpoint.clone(), name).country_id(country_id))
    }

    fn lookup(&self, request: Request) -> Result<Lookup, Error> {
        let response = self.send(&request)?;
        let outcome = classify::single(&response, self.config.reset_policy);
        let snapshot = match &outcome {
            Ok(lookup) => Some(lookup.rate_limit),
            Err(_) => self.fallback_snapshot(&response),
        };
        self.record(snapshot);
        outcome
    }

    fn send(&self, request: &Request) -> Result<HttpResponse, Error> {
        let api_key = if request.has_api_key() {
            None
        } else {
            self.config.api_key.as_deref()
        };
        let http_request = HttpRequest {
            url: request.encode(api_key),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        };
        debug!(
            endpoint = %request.endpoint(),
            names = request.names_list().len(),
            flavor = ?request.flavor(),
            "sending request"
        );
        let response = self
            .transport
            .execute(&http_request)
            .map_err(Error::Transport)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    /// Snapshot from a response the classifier rejected, if its headers are
    /// usable.
    fn fallback_snapshot(&self, response: &HttpResponse) -> Option<RateLimit> {
        match RateLimit::from_response(response, self.config.reset_policy) {
            Ok(info) => Some(info),
            Err(err) => {
                if response.status != 200 {
                    warn!(status = response.status, error = %err, "unusable rate-limit headers");
                }
                None
            }
        }
    }

    fn record(&self, snapshot: Option<RateLimit>) {
        if let Some(info) = snapshot {
            *self.rate_limit.lock().unwrap_or_else(PoisonError::into_inner) = Some(info);
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("rate_limit", &self.rate_limit())
            .finish_non_exhaustive()
    }
}
