use tracing::debug;

use crate::extraction::scanner::{closing_quote, locate_member};

/// Extracts a top-level string field from a partially streamed JSON document.
///
/// Returns the decoded value only once the field's closing quote has arrived, so the
/// caller never sees a half-written string. Escaped quotes inside the value do not
/// terminate it. Non-string values (`null`, numbers, objects) yield `None`.
pub fn extract_scalar(buffer: &str, field: &str) -> Option<String> {
    let start = locate_member(buffer, field)?;
    let bytes = buffer.as_bytes();
    if bytes[start] != b'"' {
        return None;
    }
    let end = closing_quote(bytes, start)?;

    match serde_json::from_str::<String>(&buffer[start..=end]) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Discarding malformed string for field '{field}': {e}");
            None
        }
    }
}
