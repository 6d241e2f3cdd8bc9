//! Source trait abstractions.
//!
//! Defines the two collaborator interfaces of the pipeline, enabling
//! polymorphism and easier testing.

use crate::error::FetchResult;
use crate::types::{Record, Weakness};
use async_trait::async_trait;

/// Looks up the CWE classifications of a single CVE identifier.
///
/// # Example
///
/// ```ignore
/// use cvecwe::sources::WeaknessFetcher;
///
/// async fn codes<F: WeaknessFetcher>(fetcher: &F) -> Vec<String> {
///     fetcher
///         .fetch_weaknesses("CVE-2021-44228")
///         .await
///         .map(|ws| ws.into_iter().map(|w| w.code).collect())
///         .unwrap_or_default()
/// }
/// ```
#[async_trait]
pub trait WeaknessFetcher: Send + Sync {
    /// Fetch zero or more `(code, description)` pairs for `identifier`.
    async fn fetch_weaknesses(&self, identifier: &str) -> FetchResult<Vec<Weakness>>;
}

/// Finds the CVE records matching a keyword.
#[async_trait]
pub trait CveSearch: Send + Sync {
    /// Return base records (weaknesses empty) in source order.
    async fn search(&self, keyword: &str) -> FetchResult<Vec<Record>>;
}
