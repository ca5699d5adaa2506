//! XLSX spreadsheet renderer.

use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use tracing::debug;

use super::RenderedArtifact;
use crate::config::TableConfig;
use crate::error::{KakaopackError, Result};
use crate::format::OutputFormat;
use crate::message::Transcript;

/// Renders the transcript as a single-sheet XLSX workbook.
///
/// Row 1 holds the bold, frozen header; every message follows on its own
/// row in transcript order with the timestamp as `YYYY-MM-DD HH:MM`, the
/// sender, and the body. Multi-line bodies stay in one wrapped cell.
///
/// # Errors
///
/// Returns [`KakaopackError::Render`] if the workbook cannot be written,
/// for example when the sheet name is invalid or a body exceeds the cell
/// size limit.
pub fn render_table(transcript: &Transcript, config: &TableConfig) -> Result<RenderedArtifact> {
    let bytes = build_workbook(transcript, config).map_err(KakaopackError::xlsx)?;
    debug!(rows = transcript.len(), bytes = bytes.len(), "Wrote XLSX workbook");
    Ok(RenderedArtifact::new(OutputFormat::Xlsx, bytes))
}

fn build_workbook(transcript: &Transcript, config: &TableConfig) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let wrapped = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let top = Format::new().set_align(FormatAlign::Top);

    let sheet = workbook.add_worksheet();
    sheet.set_name(config.sheet_name.as_str())?;

    for (col, (label, width)) in (0u16..).zip(config.headers.iter().zip(config.column_widths)) {
        sheet.set_column_width(col, width)?;
        sheet.write_string_with_format(0, col, label.as_str(), &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (row, message) in (1u32..).zip(transcript.iter()) {
        sheet.write_string_with_format(row, 0, message.timestamp_string(), &top)?;
        sheet.write_string_with_format(row, 1, message.sender.as_str(), &top)?;
        sheet.write_string_with_format(row, 2, message.body.as_str(), &wrapped)?;
    }

    workbook.save_to_buffer()
}
