use crate::model::ResultRecord;
use crate::output::OutputResult;
use std::io::Write;

/// Renders results as JSON indented by two spaces
pub fn render_json(records: &[ResultRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes rendered results to `writer`, followed by a newline
pub fn write_json<W: Write>(records: &[ResultRecord], writer: &mut W) -> OutputResult<()> {
    writeln!(writer, "{}", render_json(records)?)?;
    Ok(())
}
