//! Line tokenizer for quoted, comma-separated text
//!
//! Handles RFC 4180 style quoting on a single line: commas inside quotes
//! are literal and `""` inside a quoted field is an escaped quote. Fields
//! spanning several lines are not supported.

/// Split one line into trimmed field values
///
/// Unbalanced quotes are not an error: whatever was accumulated when the
/// line ends becomes the last field.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    values.push(current.trim().to_string());
    values
}
