//! JSON renderer implementation.

use crate::error::Result;
use crate::model::DocxParseResult;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a parse result to JSON.
pub fn to_json(result: &DocxParseResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(result)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(result)?,
    };
    Ok(json)
}

/// Convert a parse result to JSON with default formatting.
pub fn to_json_default(result: &DocxParseResult) -> Result<String> {
    to_json(result, JsonFormat::Pretty)
}
