//! Per-wave progress display.

use super::plain::print_info;
use crate::pipeline::WaveReport;
use indicatif::{ProgressBar, ProgressStyle};

/// Shows enrichment progress either as a bar or as one line per wave.
pub struct WaveProgress {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl WaveProgress {
    /// A progress bar over `total` records.
    pub fn bar(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        Self {
            bar: Some(pb),
            quiet: false,
        }
    }

    /// One info line per wave.
    pub fn lines() -> Self {
        Self {
            bar: None,
            quiet: false,
        }
    }

    /// No progress output at all.
    pub fn silent() -> Self {
        Self {
            bar: None,
            quiet: true,
        }
    }

    /// Record a finished wave.
    pub fn on_wave(&self, report: &WaveReport) {
        match &self.bar {
            Some(pb) => {
                pb.inc(report.processed as u64);
                pb.set_message(format!("wave {}/{}", report.wave, report.waves));
            }
            None if !self.quiet => print_info(&report.to_string()),
            None => {}
        }
    }

    /// Close the bar, if any.
    pub fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_with_message("Enrichment complete");
        }
    }
}
