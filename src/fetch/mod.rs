//! The fetch capability injected into logic processes.

mod error;
mod http;

pub use error::FetchError;
pub use http::HttpFetch;

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Fetch::fetch`].
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, FetchError>> + Send>>;

/// Asynchronous JSON fetch by URL.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> FetchFuture;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> FetchFuture + Send + Sync,
{
    fn fetch(&self, url: &str) -> FetchFuture {
        self(url)
    }
}

/// Fetch that always fails with [`FetchError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Fetch for Unavailable {
    fn fetch(&self, _url: &str) -> FetchFuture {
        Box::pin(async { Err(FetchError::Unavailable) })
    }
}
