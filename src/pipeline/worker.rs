//! Per-window enrichment worker.

use super::FailurePolicy;
use crate::error::{FetchError, StoreResult};
use crate::sources::WeaknessFetcher;
use crate::storage::Window;
use std::ops::Range;
use tracing::warn;

/// Outcome of one worker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// Store indices the worker owned.
    pub range: Range<usize>,
    /// Records whose weaknesses were fetched and stored.
    pub enriched: usize,
    /// Failed lookups, in the order they happened.
    pub failures: Vec<FetchError>,
}

impl WorkerReport {
    fn new(range: Range<usize>) -> Self {
        Self {
            range,
            enriched: 0,
            failures: Vec::new(),
        }
    }
}

/// Enrich every record of `window`, one fetch at a time.
///
/// Under `AbortAll` the worker stops at its first failure; under
/// `SkipAndContinue` the failed record is left as is and the worker moves on.
pub async fn enrich_window<F>(
    mut window: Window<'_>,
    fetcher: &F,
    policy: FailurePolicy,
) -> StoreResult<WorkerReport>
where
    F: WeaknessFetcher + ?Sized,
{
    let range = window.range();
    let mut report = WorkerReport::new(range.clone());

    for index in range {
        let Some(identifier) = window.get(index).map(|record| record.id.clone()) else {
            break;
        };

        match fetcher.fetch_weaknesses(&identifier).await {
            Ok(weaknesses) => {
                window.enrich_at(index, weaknesses)?;
                report.enriched += 1;
            }
            Err(err) => {
                warn!(index, identifier = %identifier, error = %err, "Weakness lookup failed");
                report.failures.push(err);
                if policy == FailurePolicy::AbortAll {
                    break;
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchResult;
    use crate::storage::RecordStore;
    use crate::types::{Record, Weakness};
    use async_trait::async_trait;

    /// Fails for identifiers listed in `broken`, returns one weakness otherwise.
    struct Scripted {
        broken: Vec<&'static str>,
    }

    #[async_trait]
    impl WeaknessFetcher for Scripted {
        async fn fetch_weaknesses(&self, identifier: &str) -> FetchResult<Vec<Weakness>> {
            if self.broken.iter().any(|b| *b == identifier) {
                Err(FetchError::status(identifier, "404 Not Found"))
            } else {
                Ok(vec![Weakness::new("CWE-20", identifier)])
            }
        }
    }

    fn store() -> RecordStore {
        RecordStore::from_records(["A", "B", "C", "D"].map(|id| Record::new(id, "", ""))).unwrap()
    }

    #[tokio::test]
    async fn test_worker_enriches_its_window_only() {
        let mut store = store();
        let fetcher = Scripted { broken: vec![] };
        {
            let mut windows = store.partition(&[0..2, 2..4]).unwrap();
            let second = windows.pop().unwrap();
            let report = enrich_window(second, &fetcher, FailurePolicy::AbortAll)
                .await
                .unwrap();
            assert_eq!(report.range, 2..4);
            assert_eq!(report.enriched, 2);
            assert!(report.failures.is_empty());
        }
        assert!(!store.records()[0].is_enriched());
        assert!(!store.records()[1].is_enriched());
        assert_eq!(store.records()[2].weaknesses[0].description, "C");
        assert_eq!(store.records()[3].weaknesses[0].description, "D");
    }

    #[tokio::test]
    async fn test_abort_policy_stops_at_first_failure() {
        let mut store = store();
        let fetcher = Scripted { broken: vec!["B"] };
        let window = store.partition(&[0..4]).unwrap().pop().unwrap();
        let report = enrich_window(window, &fetcher, FailurePolicy::AbortAll)
            .await
            .unwrap();
        assert_eq!(report.enriched, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].identifier, "B");
        assert!(!store.records()[2].is_enriched());
    }

    #[tokio::test]
    async fn test_skip_policy_continues_past_failures() {
        let mut store = store();
        let fetcher = Scripted { broken: vec!["B", "C"] };
        let window = store.partition(&[0..4]).unwrap().pop().unwrap();
        let report = enrich_window(window, &fetcher, FailurePolicy::SkipAndContinue)
            .await
            .unwrap();
        assert_eq!(report.enriched, 2);
        assert_eq!(report.failures.len(), 2);
        assert!(store.records()[3].is_enriched());
        assert!(!store.records()[1].is_enriched());
    }
}
