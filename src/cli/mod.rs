//! CLI subcommand definitions and handlers.
//!
//! - `cvecwe run <keyword>` - Search, enrich and write the report
//! - `cvecwe settings show|init|path` - Manage the settings file

mod run;
mod settings;

pub use run::{enrich_and_write, search_records, RunCommand, RunOutcome};
pub use settings::{SettingsAction, SettingsCommand};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cvecwe - CVE keyword search with CWE enrichment.
///
/// Searches the CVE list for a keyword, looks up the CWE weakness
/// classification of every match on NVD, and writes the result to a
/// spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "cvecwe")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CVE search with CWE enrichment", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for report files
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a keyword, enrich matches with CWE data and write a report
    #[command(alias = "r")]
    Run(RunCommand),

    /// Show or initialise the settings file
    #[command(alias = "s")]
    Settings(SettingsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportFormat;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "cvecwe", "run", "usb", "-w", "4", "-r", "25", "--proxy", "http://127.0.0.1:8080",
            "--format", "csv", "--skip-failed",
        ])
        .unwrap();

        let Commands::Run(cmd) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(cmd.keyword, "usb");
        assert_eq!(cmd.workers, Some(4));
        assert_eq!(cmd.range, Some(25));
        assert_eq!(cmd.proxy.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(cmd.format, Some(ReportFormat::Csv));
        assert!(cmd.skip_failed);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_run_flags_default_to_settings() {
        let cli = Cli::try_parse_from(["cvecwe", "run", "openssl"]).unwrap();
        let Commands::Run(cmd) = cli.command else {
            panic!("expected run command");
        };
        assert!(cmd.workers.is_none());
        assert!(cmd.range.is_none());
        assert!(!cmd.skip_failed);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["cvecwe", "-v", "-q", "run", "usb"]).is_err());
    }

    #[test]
    fn test_settings_subcommand() {
        let cli = Cli::try_parse_from(["cvecwe", "settings", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Settings(SettingsCommand {
                action: SettingsAction::Init { force: true }
            })
        ));
    }
}
