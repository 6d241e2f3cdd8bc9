//! In-memory record storage.
//!
//! The store is filled once by the search stage, then split into disjoint
//! mutable windows for the enrichment workers.

mod record_store;

pub use record_store::{RecordStore, Window};
