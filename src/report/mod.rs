//! Report writers.
//!
//! Serializes the finished records to a spreadsheet (default) or CSV. Each
//! row carries a 1-based row number, the identifier, the description and the
//! joined weakness text.

mod csv_format;
mod xlsx;

pub use csv_format::render_csv;
pub use xlsx::render_xlsx;

use crate::error::ReportResult;
use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output format for the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Excel workbook with hyperlinked identifiers
    #[default]
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl ReportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Report file name for a keyword, e.g. `usb_cve.xlsx`.
pub fn report_file_name(keyword: &str, format: ReportFormat) -> String {
    let stem: String = keyword
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();
    format!("{}_cve.{}", stem, format.extension())
}

/// Full report path inside `dir`.
pub fn report_path(dir: &Path, keyword: &str, format: ReportFormat) -> PathBuf {
    dir.join(report_file_name(keyword, format))
}

/// Join the classified weaknesses of a record as `code: description` lines.
pub fn weakness_text(record: &Record) -> String {
    record
        .classified_weaknesses()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render `records` in `format`.
pub fn render(records: &[Record], format: ReportFormat) -> ReportResult<Vec<u8>> {
    match format {
        ReportFormat::Xlsx => render_xlsx(records),
        ReportFormat::Csv => render_csv(records),
    }
}

/// Render and write the report to `destination`.
pub fn write_report(
    records: &[Record],
    destination: &Path,
    format: ReportFormat,
) -> ReportResult<()> {
    let bytes = render(records, format)?;
    fs::write(destination, &bytes)?;
    info!(
        path = %destination.display(),
        format = %format,
        records = records.len(),
        bytes = bytes.len(),
        "Report written"
    );
    Ok(())
}
