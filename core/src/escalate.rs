//! Panicking twins of the fallible accessors.
//!
//! For callers that treat any failure as fatal. Each method forwards to its
//! fallible counterpart and panics with the error's message; the core API
//! itself never panics on a service or lookup error.

use crate::client::Client;
use crate::collection::Collection;
use crate::error::Error;
use crate::request::Request;
use crate::types::{Inference, Lookup};

fn escalate<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl Collection {
    /// Like [`Collection::find`], but panics when the name is absent.
    pub fn expect_find(&self, name: &str) -> &Inference {
        escalate(self.find(name))
    }

    /// Like [`Collection::first`], but panics on an empty collection.
    pub fn expect_first(&self) -> &Inference {
        escalate(self.first())
    }

    /// Like [`Collection::for_each`], but panics on an empty collection.
    pub fn expect_for_each<F>(&self, f: F)
    where
        F: FnMut(&Inference),
    {
        escalate(self.for_each(f))
    }
}

impl Client {
    /// Like [`Client::execute`], but panics on any error.
    pub fn expect_execute(&self, request: &Request) -> Collection {
        escalate(self.execute(request))
    }

    /// Like [`Client::check`], but panics on any error.
    pub fn expect_check(&self, name: &str) -> Lookup {
        escalate(self.check(name))
    }
}
