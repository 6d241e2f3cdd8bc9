//! Spreadsheet report rendering.
//!
//! One sheet, no header row. Column A holds the row number, B the identifier
//! (hyperlinked when a link is known), C the description and D the weakness
//! text.

use super::weakness_text;
use crate::error::{ReportError, ReportResult};
use crate::types::Record;
use rust_xlsxwriter::{Format, Workbook};

const SHEET_NAME: &str = "Sheet1";

/// Render records as an XLSX workbook.
pub fn render_xlsx(records: &[Record]) -> ReportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let wrap = Format::new().set_text_wrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.set_column_width(1, 16)?;
    sheet.set_column_width(2, 80)?;
    sheet.set_column_width(3, 60)?;

    for (i, record) in records.iter().enumerate() {
        let row = u32::try_from(i).map_err(|_| ReportError::TooManyRows(records.len()))?;

        sheet.write_number(row, 0, (i + 1) as f64)?;
        if record.link.is_empty() {
            sheet.write_string(row, 1, &record.id)?;
        } else {
            sheet.write_url_with_text(row, 1, record.link.as_str(), &record.id)?;
        }
        sheet.write_string(row, 2, &record.description)?;
        sheet.write_string_with_format(row, 3, weakness_text(record), &wrap)?;
    }

    Ok(workbook.save_to_buffer()?)
}
