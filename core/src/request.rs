//! Query accumulation and URL rendering.
//!
//! # Design
//! `Request` is a consuming builder: each setter takes `self` and hands it
//! back, so the borrow checker gives the caller exclusive access until the
//! request is encoded. No network I/O happens here.
//!
//! Batch requests render every name as a repeated `name[]` parameter in
//! insertion order. Single-name lookups (built by `Client::check`) render a
//! plain `name` parameter. Parameters are always emitted in the order
//! names, `country_id`, `apikey`.

use std::fmt;

use url::Url;

use crate::classify::Flavor;
use crate::error::Error;

/// Base endpoint of the public service.
pub const DEFAULT_ENDPOINT: &str = "https://api.genderize.io";

const PARAM_NAME: &str = "name";
const PARAM_NAME_ARRAY: &str = "name[]";
const PARAM_COUNTRY_ID: &str = "country_id";
const PARAM_API_KEY: &str = "apikey";

#[derive(Clone)]
pub struct Request {
    endpoint: Url,
    flavor: Flavor,
    names: Vec<String>,
    country_id: Option<String>,
    api_key: Option<String>,
}

impl Request {
    /// Batch request against `DEFAULT_ENDPOINT`. The constant is a valid
    /// absolute URL, so parsing it cannot fail.
    pub fn new() -> Self {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT is a valid URL");
        Self::at(endpoint)
    }

    /// Batch request against a custom endpoint. Fails if `endpoint` is not
    /// an absolute URL.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, Error> {
        Ok(Self::at(Url::parse(endpoint)?))
    }

    pub(crate) fn at(endpoint: Url) -> Self {
        Self {
            endpoint,
            flavor: Flavor::Batch,
            names: Vec::new(),
            country_id: None,
            api_key: None,
        }
    }

    pub(crate) fn single(endpoint: Url, name: &str) -> Self {
        Self {
            flavor: Flavor::Single,
            names: vec![name.to_string()],
            ..Self::at(endpoint)
        }
    }

    /// Append one name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Append several names, preserving their order.
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set (or replace) the ISO 3166-1 alpha-2 country filter.
    pub fn country_id(mut self, country_id: impl Into<String>) -> Self {
        self.country_id = Some(country_id.into());
        self
    }

    /// Attach a per-request API key. The client will not inject its own key
    /// into a request that carries one.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn names_list(&self) -> &[String] {
        &self.names
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Render the full request URL. A key passed here takes precedence over
    /// the one attached with [`Request::api_key`].
    pub fn encode(&self, api_key: Option<&str>) -> String {
        let name_param = match self.flavor {
            Flavor::Single => PARAM_NAME,
            Flavor::Batch => PARAM_NAME_ARRAY,
        };

        let mut pairs: Vec<(&str, &str)> = self
            .names
            .iter()
            .map(|name| (name_param, name.as_str()))
            .collect();
        if let Some(country_id) = &self.country_id {
            pairs.push((PARAM_COUNTRY_ID, country_id));
        }
        if let Some(key) = api_key.or(self.api_key.as_deref()) {
            pairs.push((PARAM_API_KEY, key));
        }

        let mut url = self.endpoint.clone();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        url.into()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("endpoint", &self.endpoint.as_str())
            .field("flavor", &self.flavor)
            .field("names", &self.names)
            .field("country_id", &self.country_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
