//! Remote data sources.
//!
//! The keyword search produces base records; the weakness fetcher looks up
//! CWE data for one identifier at a time. Both sit behind traits so the
//! enrichment pipeline can be driven by fakes in tests.

mod html;
mod http;
mod mitre;
mod nvd;
pub mod traits;

pub use http::{build_client, HttpSettings, DEFAULT_USER_AGENT};
pub use mitre::{parse_search_results, MitreSearch, DEFAULT_SEARCH_URL};
pub use nvd::{parse_weaknesses, NvdFetcher, DEFAULT_DETAIL_URL};
pub use traits::{CveSearch, WeaknessFetcher};
