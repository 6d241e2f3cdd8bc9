//! Application settings and paths.
//!
//! Manages XDG-compliant paths for the settings file.

use crate::error::{ConfigError, ConfigResult};
use crate::pipeline::{DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY};
use crate::report::ReportFormat;
use crate::sources::{HttpSettings, DEFAULT_DETAIL_URL, DEFAULT_SEARCH_URL, DEFAULT_USER_AGENT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/cvecwe)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform configuration directory.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "cvecwe", "cvecwe")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Workers per wave.
    pub concurrency: usize,
    /// Records per worker.
    pub batch_size: usize,
    /// HTTP(S) proxy for all outbound requests.
    pub proxy: Option<String>,
    /// Per-request timeout in milliseconds, 0 for none.
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Keyword search endpoint.
    pub search_url: String,
    /// Detail page prefix the CVE identifier is appended to.
    pub detail_url: String,
    pub report_format: ReportFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            batch_size: DEFAULT_BATCH_SIZE,
            proxy: None,
            timeout_ms: 30_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            detail_url: DEFAULT_DETAIL_URL.to_string(),
            report_format: ReportFormat::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when there is no home directory or no file.
    pub fn load() -> ConfigResult<Self> {
        let Ok(paths) = Paths::discover() else {
            return Ok(Self::default());
        };
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    ///
    /// Values are not validated here; call [`AppSettings::validate`] once
    /// command-line overrides have been applied.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Outbound connection settings derived from these settings.
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            proxy: self.proxy.clone().filter(|p| !p.trim().is_empty()),
            timeout: (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms)),
            user_agent: self.user_agent.clone(),
        }
    }
}
