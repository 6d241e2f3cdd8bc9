//! Settings subcommand implementation.

use crate::config::{AppSettings, Paths};
use crate::error::{CliError, CliResult};
use crate::output;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Show or initialise the settings file.
#[derive(Parser, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

/// Settings actions.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    /// Print the effective settings as JSON
    Show,
    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the settings file location
    Path,
}

impl SettingsCommand {
    /// Execute the settings command.
    ///
    /// `custom` is the `--config` path, used instead of the default location.
    pub fn execute(
        &self,
        settings: &AppSettings,
        custom: Option<&Path>,
        quiet: bool,
    ) -> CliResult<()> {
        match &self.action {
            SettingsAction::Show => {
                let json = serde_json::to_string_pretty(settings)
                    .map_err(|e| CliError::Other(e.to_string()))?;
                println!("{}", json);
            }
            SettingsAction::Init { force } => {
                let path = settings_path(custom)?;
                if path.exists() && !force {
                    return Err(CliError::Other(format!(
                        "{} already exists, use --force to overwrite",
                        path.display()
                    )));
                }
                AppSettings::default().save_to(&path)?;
                if !quiet {
                    output::print_success(&format!("Wrote default settings to {}", path.display()));
                }
            }
            SettingsAction::Path => {
                println!("{}", settings_path(custom)?.display());
            }
        }
        Ok(())
    }
}

fn settings_path(custom: Option<&Path>) -> CliResult<PathBuf> {
    match custom {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Paths::discover()?.settings_file()),
    }
}
