//! Console output module.
//!
//! Styled status messages, the run header and summary, and per-wave
//! progress display.

mod plain;
mod progress;

pub use plain::{
    print_error, print_info, print_run_header, print_success, print_summary, print_warning,
};
pub use progress::WaveProgress;
