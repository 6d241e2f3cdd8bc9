//! CSV report rendering.

use super::weakness_text;
use crate::error::{ReportError, ReportResult};
use crate::types::Record;

/// Render records as CSV with a header row.
pub fn render_csv(records: &[Record]) -> ReportResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["no", "id", "link", "description", "weaknesses"])?;

    for (i, record) in records.iter().enumerate() {
        wtr.write_record([
            &(i + 1).to_string(),
            &record.id,
            &record.link,
            &record.description,
            &weakness_text(record),
        ])?;
    }

    wtr.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}
