use crate::error::{Result, TextcueError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Decode raw document bytes as UTF-8 and normalize them
pub fn decode_document(bytes: &[u8], source: &str) -> Result<String> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| TextcueError::Encoding(format!("{}: {}", source, e)))?;
    Ok(normalize_input(text))
}

/// Strip a leading byte-order mark and convert all line endings to `\n`
pub fn normalize_input(raw: &str) -> String {
    raw.strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(raw)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Collapse every whitespace run (line breaks included) into one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
