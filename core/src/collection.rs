//! Keyed results of a batch call.
//!
//! # Design
//! Records are keyed by name; a name repeated in the response keeps its last
//! record. The map has no defined order, so `first` and `for_each` make no
//! promise about which record comes first.
//!
//! `for_each` on an empty collection returns `Error::NotFound` instead of
//! doing nothing. Callers that want a silent no-op should iterate with
//! `iter()`.

use std::collections::hash_map::{self, HashMap};
use std::time::Duration;

use tracing::debug;

use crate::error::Error;
use crate::rate_limit::RateLimit;
use crate::types::Inference;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    rate_limit: Option<RateLimit>,
    records: HashMap<String, Inference>,
}

impl Collection {
    pub fn new<I>(records: I, rate_limit: Option<RateLimit>) -> Self
    where
        I: IntoIterator<Item = Inference>,
    {
        let mut keyed = HashMap::new();
        for record in records {
            if let Some(previous) = keyed.insert(record.name.clone(), record) {
                debug!(name = %previous.name, "response repeats a name; keeping the later record");
            }
        }
        Self {
            rate_limit,
            records: keyed,
        }
    }

    /// Attach the snapshot of the exchange that produced this collection.
    pub fn with_rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.rate_limit
    }

    /// Names available in the current time window, or 0 without a snapshot.
    pub fn limit(&self) -> i64 {
        self.rate_limit.map(|info| info.limit).unwrap_or_default()
    }

    /// Names left in the current time window, or 0 without a snapshot.
    pub fn limit_remaining(&self) -> i64 {
        self.rate_limit.map(|info| info.remaining).unwrap_or_default()
    }

    /// Time until a new window opens, or zero without a snapshot.
    pub fn limit_reset(&self) -> Duration {
        self.rate_limit.map(|info| info.reset).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, name: &str) -> Result<&Inference, Error> {
        self.records.get(name).ok_or(Error::NotFound)
    }

    /// Some record of the collection; which one is unspecified when there
    /// are several.
    pub fn first(&self) -> Result<&Inference, Error> {
        self.records.values().next().ok_or(Error::NotFound)
    }

    pub fn for_each<F>(&self, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&Inference),
    {
        if self.is_empty() {
            return Err(Error::NotFound);
        }
        self.records.values().for_each(|record| f(record));
        Ok(())
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, Inference> {
        self.records.values()
    }
}

impl FromIterator<Inference> for Collection {
    fn from_iter<I: IntoIterator<Item = Inference>>(iter: I) -> Self {
        Self::new(iter, None)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Inference;
    type IntoIter = hash_map::Values<'a, String, Inference>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
