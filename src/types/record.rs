//! The CVE record type.

use super::Weakness;
use serde::{Deserialize, Serialize};

/// One vulnerability entry as found by the keyword search.
///
/// `weaknesses` stays empty until the enrichment pipeline runs, and is only
/// ever extended by the worker that owns this record's window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// External identifier, e.g. `CVE-2021-44228`.
    pub id: String,
    /// Canonical reference URL, may be empty.
    pub link: String,
    /// Free-text description, may be empty.
    pub description: String,
    /// CWE classifications in source order.
    #[serde(default)]
    pub weaknesses: Vec<Weakness>,
}

impl Record {
    /// Create a base record with no weaknesses.
    pub fn new(
        id: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            link: link.into(),
            description: description.into(),
            weaknesses: Vec::new(),
        }
    }

    /// Weaknesses that carry a real classification.
    pub fn classified_weaknesses(&self) -> impl Iterator<Item = &Weakness> {
        self.weaknesses.iter().filter(|w| !w.is_placeholder())
    }

    /// Check whether enrichment has attached anything yet.
    pub fn is_enriched(&self) -> bool {
        !self.weaknesses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CWE_NOINFO;

    #[test]
    fn test_new_record_is_unenriched() {
        let record = Record::new("CVE-2024-0001", "", "desc");
        assert!(!record.is_enriched());
        assert_eq!(record.classified_weaknesses().count(), 0);
    }

    #[test]
    fn test_classified_weaknesses_skip_placeholders() {
        let mut record = Record::new("CVE-2024-0001", "", "");
        record.weaknesses.push(Weakness::new("CWE-79", "XSS"));
        record.weaknesses.push(Weakness::new(CWE_NOINFO, ""));

        let codes: Vec<&str> = record
            .classified_weaknesses()
            .map(|w| w.code.as_str())
            .collect();
        assert_eq!(codes, vec!["CWE-79"]);
        assert!(record.is_enriched());
    }
}
