//! Configuration management for cvecwe.
//!
//! Provides an XDG-compliant settings file holding the defaults that
//! command-line flags override.

mod settings;

pub use settings::{AppSettings, Paths};
