//! Core record types shared by the search, enrichment and report stages.
//!
//! A `Record` is one CVE entry; its `Weakness` list is filled in by the
//! enrichment pipeline.

mod record;
mod weakness;

pub use record::Record;
pub use weakness::{Weakness, CWE_NOINFO, CWE_OTHER};
