//! Run subcommand implementation.
//!
//! Handles `cvecwe run <keyword>`: search, enrich, write the report.

use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output::{self, WaveProgress};
use crate::pipeline::{run_enrichment, EnrichConfig, EnrichSummary, FailurePolicy, WaveReport};
use crate::report::{report_path, write_report, ReportFormat};
use crate::sources::{build_client, CveSearch, MitreSearch, NvdFetcher, WeaknessFetcher};
use crate::storage::RecordStore;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Search a keyword and enrich every match with CWE data.
#[derive(Parser, Debug)]
pub struct RunCommand {
    /// Keyword for searching the CVE list
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Maximum number of concurrent workers per wave [default: 10]
    #[arg(short = 'w', long = "worker")]
    pub workers: Option<usize>,

    /// Number of records each worker fetches [default: 10]
    #[arg(short = 'r', long = "range")]
    pub range: Option<usize>,

    /// HTTP(S) proxy for all outbound requests
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Report format [default: xlsx]
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Request timeout in milliseconds, 0 to wait forever [default: 30000]
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Keep going when a lookup fails instead of aborting the run
    #[arg(long)]
    pub skip_failed: bool,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub path: PathBuf,
    pub records: usize,
    pub summary: EnrichSummary,
}

impl RunCommand {
    /// Overlay the command-line flags on `settings`.
    pub fn apply(&self, mut settings: AppSettings) -> AppSettings {
        if let Some(workers) = self.workers {
            settings.concurrency = workers;
        }
        if let Some(range) = self.range {
            settings.batch_size = range;
        }
        if let Some(proxy) = &self.proxy {
            settings.proxy = Some(proxy.clone());
        }
        if let Some(format) = self.format {
            settings.report_format = format;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_ms = timeout;
        }
        settings
    }

    fn policy(&self) -> FailurePolicy {
        if self.skip_failed {
            FailurePolicy::SkipAndContinue
        } else {
            FailurePolicy::AbortAll
        }
    }

    /// Execute the run command.
    pub async fn execute(
        &self,
        settings: AppSettings,
        output_dir: &Path,
        verbose: bool,
        quiet: bool,
    ) -> CliResult<()> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(CliError::Other("keyword must not be empty".to_string()));
        }

        let settings = self.apply(settings);
        settings.validate()?;
        let config = EnrichConfig::new(settings.concurrency, settings.batch_size)?
            .with_policy(self.policy());

        let client = build_client(&settings.http_settings())?;
        let search = MitreSearch::new(client.clone(), &settings.search_url)?;
        let fetcher = NvdFetcher::new(client, settings.detail_url.as_str());

        fs::create_dir_all(output_dir).map_err(|e| {
            CliError::Other(format!(
                "failed to create output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;
        let destination = report_path(output_dir, keyword, settings.report_format);

        if !quiet {
            output::print_run_header(keyword, config.concurrency, config.batch_size);
        }

        let store = search_records(&search, keyword).await?;
        if !quiet {
            output::print_info(&format!("Found {} CVE records for '{}'", store.len(), keyword));
        }

        let progress = if quiet {
            WaveProgress::silent()
        } else if verbose {
            WaveProgress::bar(store.len())
        } else {
            WaveProgress::lines()
        };

        let outcome = enrich_and_write(
            store,
            &fetcher,
            &config,
            &destination,
            settings.report_format,
            |report| progress.on_wave(report),
        )
        .await;
        progress.finish();
        let outcome = outcome?;

        if !quiet {
            output::print_summary(&outcome.summary);
            if !outcome.summary.failures.is_empty() {
                output::print_warning("Some records were written without CWE data.");
            }
            output::print_success(&format!(
                "Wrote {} ({} records)",
                outcome.path.display(),
                outcome.records
            ));
        }

        Ok(())
    }
}

/// Run the keyword search and load the results into a sealed store.
pub async fn search_records<S>(search: &S, keyword: &str) -> CliResult<RecordStore>
where
    S: CveSearch + ?Sized,
{
    let records = search.search(keyword).await?;
    let mut store = RecordStore::from_records(records)?;
    store.seal();
    info!(keyword = %keyword, records = store.len(), "Record store populated");
    Ok(store)
}

/// Enrich `store` in place and write it to `destination`.
///
/// Nothing is written when the enrichment run aborts.
pub async fn enrich_and_write<F, P>(
    mut store: RecordStore,
    fetcher: &F,
    config: &EnrichConfig,
    destination: &Path,
    format: ReportFormat,
    on_wave: P,
) -> CliResult<RunOutcome>
where
    F: WeaknessFetcher + ?Sized,
    P: FnMut(&WaveReport),
{
    let summary = run_enrichment(&mut store, fetcher, config, on_wave).await?;
    write_report(store.records(), destination, format)?;

    Ok(RunOutcome {
        path: destination.to_path_buf(),
        records: store.len(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> RunCommand {
        let mut argv = vec!["run"];
        argv.extend_from_slice(args);
        RunCommand::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_apply_overrides_settings() {
        let cmd = command(&["usb", "-w", "3", "-r", "7", "-t", "0", "--format", "csv"]);
        let settings = cmd.apply(AppSettings::default());
        assert_eq!(settings.concurrency, 3);
        assert_eq!(settings.batch_size, 7);
        assert_eq!(settings.timeout_ms, 0);
        assert_eq!(settings.report_format, ReportFormat::Csv);
    }

    #[test]
    fn test_apply_keeps_settings_without_flags() {
        let cmd = command(&["usb"]);
        let base = AppSettings {
            concurrency: 2,
            proxy: Some("http://proxy:3128".to_string()),
            ..AppSettings::default()
        };
        assert_eq!(cmd.apply(base.clone()), base);
    }

    #[test]
    fn test_flags_repair_invalid_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"concurrency": 0}"#).unwrap();
        let loaded = AppSettings::load_from(&path).unwrap();

        assert!(command(&["usb"]).apply(loaded.clone()).validate().is_err());

        let settings = command(&["usb", "-w", "4"]).apply(loaded);
        assert_eq!(settings.concurrency, 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_policy_flag() {
        assert_eq!(command(&["usb"]).policy(), FailurePolicy::AbortAll);
        assert_eq!(
            command(&["usb", "--skip-failed"]).policy(),
            FailurePolicy::SkipAndContinue
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_zero_workers() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = command(&["usb", "-w", "0"]);
        let err = cmd
            .execute(AppSettings::default(), dir.path(), false, true)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[tokio::test]
    async fn test_execute_rejects_blank_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let err = command(&["  "])
            .execute(AppSettings::default(), dir.path(), false, true)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Other(_)));
    }
}
