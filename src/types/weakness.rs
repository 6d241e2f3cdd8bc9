//! CWE weakness entries attached to a record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code NVD uses when it has no CWE information for an entry.
pub const CWE_NOINFO: &str = "NVD-CWE-noinfo";

/// Code NVD uses when the weakness fits no listed CWE.
pub const CWE_OTHER: &str = "NVD-CWE-Other";

/// A single `(code, description)` weakness classification, e.g.
/// `CWE-79` / `Improper Neutralization of Input During Web Page Generation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weakness {
    pub code: String,
    pub description: String,
}

impl Weakness {
    /// Create a new weakness entry.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// True for the sentinel codes that carry no classification.
    pub fn is_placeholder(&self) -> bool {
        self.code == CWE_NOINFO || self.code == CWE_OTHER
    }
}

impl fmt::Display for Weakness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}
