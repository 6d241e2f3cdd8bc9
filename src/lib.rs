//! # cvecwe - CVE Search with CWE Enrichment
//!
//! cvecwe searches the CVE list for a keyword, looks up the CWE weakness
//! classification of every match on NVD, and exports the result as a
//! spreadsheet.
//!
//! ## Features
//!
//! - **Bounded Concurrency**: lookups run in waves of concurrent workers, each
//!   wave joined before the next starts
//! - **Race-Free by Construction**: workers own disjoint windows of the record
//!   store, handed out with `split_at_mut`
//! - **Explicit Failure Policy**: abort the run or skip failed lookups
//! - **Multiple Report Formats**: XLSX with hyperlinks, or CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use cvecwe::pipeline::{run_enrichment, EnrichConfig};
//! use cvecwe::sources::{build_client, HttpSettings, NvdFetcher, DEFAULT_DETAIL_URL};
//! use cvecwe::storage::RecordStore;
//! use cvecwe::types::Record;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = build_client(&HttpSettings::default()).unwrap();
//!     let fetcher = NvdFetcher::new(client, DEFAULT_DETAIL_URL);
//!
//!     let mut store = RecordStore::new();
//!     store.append(Record::new("CVE-2021-44228", "", "Log4Shell")).unwrap();
//!
//!     let config = EnrichConfig::new(10, 10).unwrap();
//!     run_enrichment(&mut store, &fetcher, &config, |wave| println!("{}", wave))
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Record and weakness types
//! - [`storage`] - The record store and its disjoint worker windows
//! - [`sources`] - Keyword search and weakness fetcher traits and HTTP implementations
//! - [`pipeline`] - Wave planning, workers and the scheduler
//! - [`report`] - XLSX and CSV report writers
//! - [`config`] - Settings file management
//! - [`error`] - Error types
//! - [`output`] - Console output and progress display

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, EnrichError, FetchError, FetchErrorKind, StoreError};
pub use pipeline::{run_enrichment, BatchPlan, EnrichConfig, FailurePolicy, WaveReport};
pub use storage::{RecordStore, Window};
pub use types::{Record, Weakness};
