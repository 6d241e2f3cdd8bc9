//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::pipeline::EnrichSummary;
use console::style;

/// Print a header before the search begins.
pub fn print_run_header(keyword: &str, concurrency: usize, batch_size: usize) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("cvecwe").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Keyword: {}",
        style("•").dim(),
        style(keyword).white().bold()
    );
    println!(
        "{} Workers per wave: {}, records per worker: {}",
        style("•").dim(),
        style(concurrency).yellow(),
        style(batch_size).yellow()
    );
    println!();
}

/// Print the totals of a finished enrichment run.
pub fn print_summary(summary: &EnrichSummary) {
    println!(
        "{} {} records enriched by {} workers in {} waves ({:.2}s)",
        style("Statistics:").bold(),
        style(summary.enriched).green().bold(),
        summary.workers,
        summary.waves,
        summary.duration_ms as f64 / 1000.0
    );

    if !summary.failures.is_empty() {
        println!(
            "            {} lookups failed:",
            style(summary.failures.len()).red().bold()
        );
        for failure in &summary.failures {
            println!(
                "              {} {}",
                style("-").dim(),
                truncate_string(&failure.to_string(), 100)
            );
        }
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Truncate a string to a maximum number of characters, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
