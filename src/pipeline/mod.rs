//! Enrichment pipeline - attaches CWE data to every record in the store.
//!
//! Records are cut into windows of at most `batch_size`, and windows are
//! dispatched in waves of at most `concurrency` workers. A wave is joined in
//! full before the next one starts, which bounds the number of requests in
//! flight against the remote source.

mod plan;
mod worker;

pub use plan::BatchPlan;
pub use worker::{enrich_window, WorkerReport};

use crate::error::{ConfigError, ConfigResult, EnrichError, EnrichResult, FetchError};
use crate::sources::WeaknessFetcher;
use crate::storage::{RecordStore, Window};
use futures::future::join_all;
use std::fmt;
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, info};

/// Default number of workers per wave.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default number of records per worker.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// What to do when a weakness lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Finish the current wave, then stop the run with an error.
    #[default]
    AbortAll,
    /// Leave the record unenriched and keep going.
    SkipAndContinue,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbortAll => write!(f, "abort"),
            Self::SkipAndContinue => write!(f, "skip"),
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichConfig {
    /// Maximum simultaneous workers per wave.
    pub concurrency: usize,
    /// Records per worker invocation.
    pub batch_size: usize,
    pub policy: FailurePolicy,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            batch_size: DEFAULT_BATCH_SIZE,
            policy: FailurePolicy::default(),
        }
    }
}

impl EnrichConfig {
    /// Create a configuration, rejecting zero sizes.
    pub fn new(concurrency: usize, batch_size: usize) -> ConfigResult<Self> {
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            concurrency,
            batch_size,
            policy: FailurePolicy::default(),
        })
    }

    /// Set the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Progress emitted after each wave barrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveReport {
    /// 1-based wave number.
    pub wave: usize,
    /// Total waves in the run.
    pub waves: usize,
    /// Store indices covered by the wave.
    pub range: Range<usize>,
    /// Number of workers that ran.
    pub workers: usize,
    /// Records dispatched in this wave.
    pub processed: usize,
    /// Records successfully enriched.
    pub enriched: usize,
    /// Failed lookups.
    pub failed: usize,
}

impl fmt::Display for WaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] Enriched records {}-{} ({} records",
            self.wave,
            self.waves,
            self.range.start,
            self.range.end.saturating_sub(1),
            self.processed
        )?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        write!(f, ")")
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default)]
pub struct EnrichSummary {
    pub waves: usize,
    pub workers: usize,
    pub enriched: usize,
    /// Lookups skipped under `SkipAndContinue`.
    pub failures: Vec<FetchError>,
    pub duration_ms: u64,
}

/// Enrich every record of `store` in place.
///
/// `on_wave` is called once per wave, after all of that wave's workers have
/// returned. Sealing happens here: the store accepts no more records once the
/// run starts.
pub async fn run_enrichment<F, P>(
    store: &mut RecordStore,
    fetcher: &F,
    config: &EnrichConfig,
    mut on_wave: P,
) -> EnrichResult<EnrichSummary>
where
    F: WeaknessFetcher + ?Sized,
    P: FnMut(&WaveReport),
{
    let start_time = Instant::now();
    let plan = BatchPlan::new(store.len(), config.concurrency, config.batch_size);
    info!(
        records = store.len(),
        waves = plan.wave_count(),
        workers = plan.window_count(),
        concurrency = config.concurrency,
        batch_size = config.batch_size,
        policy = %config.policy,
        "Starting enrichment"
    );

    let mut windows = store.partition(&plan.windows())?.into_iter();
    let mut summary = EnrichSummary::default();

    for (i, wave) in plan.waves().iter().enumerate() {
        let number = i + 1;
        let dispatched: Vec<Window<'_>> = windows.by_ref().take(wave.len()).collect();
        debug!(wave = number, workers = dispatched.len(), "Dispatching wave");

        let reports = join_all(
            dispatched
                .into_iter()
                .map(|window| enrich_window(window, fetcher, config.policy)),
        )
        .await;

        let mut enriched = 0;
        let mut failures = Vec::new();
        for report in reports {
            let report = report?;
            enriched += report.enriched;
            failures.extend(report.failures);
        }

        let range = wave_span(wave);
        let wave_report = WaveReport {
            wave: number,
            waves: plan.wave_count(),
            processed: range.len(),
            range,
            workers: wave.len(),
            enriched,
            failed: failures.len(),
        };
        info!(
            wave = number,
            start = wave_report.range.start,
            end = wave_report.range.end,
            enriched,
            failed = wave_report.failed,
            "Wave complete"
        );
        on_wave(&wave_report);

        summary.waves += 1;
        summary.workers += wave.len();
        summary.enriched += enriched;

        if !failures.is_empty() && config.policy == FailurePolicy::AbortAll {
            return Err(EnrichError::Aborted {
                wave: number,
                failures,
            });
        }
        summary.failures.extend(failures);
    }

    summary.duration_ms = start_time.elapsed().as_millis() as u64;
    Ok(summary)
}

/// Smallest range covering every window of a wave.
fn wave_span(wave: &[Range<usize>]) -> Range<usize> {
    match (wave.first(), wave.last()) {
        (Some(first), Some(last)) => first.start..last.end,
        _ => 0..0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchResult;
    use crate::types::{Record, Weakness};
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl WeaknessFetcher for Echo {
        async fn fetch_weaknesses(&self, identifier: &str) -> FetchResult<Vec<Weakness>> {
            Ok(vec![Weakness::new("CWE-1", identifier)])
        }
    }

    fn store_of(n: usize) -> RecordStore {
        RecordStore::from_records((0..n).map(|i| Record::new(format!("CVE-{}", i), "", "")))
            .unwrap()
    }

    #[test]
    fn test_config_rejects_zero() {
        assert!(EnrichConfig::new(0, 10).is_err());
        assert!(EnrichConfig::new(10, 0).is_err());
        let config = EnrichConfig::new(2, 3)
            .unwrap()
            .with_policy(FailurePolicy::SkipAndContinue);
        assert_eq!(config.policy, FailurePolicy::SkipAndContinue);
    }

    #[test]
    fn test_wave_report_display() {
        let report = WaveReport {
            wave: 1,
            waves: 2,
            range: 0..20,
            workers: 2,
            processed: 20,
            enriched: 19,
            failed: 1,
        };
        assert_eq!(
            report.to_string(),
            "[1/2] Enriched records 0-19 (20 records, 1 failed)"
        );
    }

    #[tokio::test]
    async fn test_reports_one_entry_per_wave() {
        let mut store = store_of(25);
        let config = EnrichConfig::new(2, 10).unwrap();
        let mut reports = Vec::new();

        let summary = run_enrichment(&mut store, &Echo, &config, |r| reports.push(r.clone()))
            .await
            .unwrap();

        assert_eq!(summary.waves, 2);
        assert_eq!(summary.workers, 3);
        assert_eq!(summary.enriched, 25);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].range, 0..20);
        assert_eq!(reports[0].workers, 2);
        assert_eq!(reports[1].range, 20..25);
        assert_eq!(reports[1].processed, 5);
        assert!(store.records().iter().all(Record::is_enriched));
        assert!(store.is_sealed());
    }

    #[tokio::test]
    async fn test_empty_store_runs_no_waves() {
        let mut store = RecordStore::new();
        let mut calls = 0;
        let summary = run_enrichment(&mut store, &Echo, &EnrichConfig::default(), |_| calls += 1)
            .await
            .unwrap();
        assert_eq!(summary.waves, 0);
        assert_eq!(summary.workers, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_wave_span() {
        assert_eq!(wave_span(&[0..10, 10..20]), 0..20);
        assert_eq!(wave_span(&[]), 0..0);
    }
}
