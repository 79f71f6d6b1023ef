//! Shared output formatting utilities for all response types.

use crate::error::CoogleError;
use crate::output::{json_response, OutputFormat};
use serde::Serialize;

const RULE_WIDTH: usize = 70;

/// Render any serializable response as JSON inside the standard envelope
pub fn render_json_response<T: Serialize>(data: &T, format: OutputFormat) -> Result<String, CoogleError> {
    let payload = json_response(data);
    let rendered = if matches!(format, OutputFormat::Pretty) {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    }?;
    Ok(rendered)
}

/// Horizontal rule framing the match count
pub fn format_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Format the "MATCHES: N" banner for human-readable output
pub fn format_matches_header(total: usize) -> String {
    let rule = format_rule();
    format!("{rule}\nMATCHES: {total}\n{rule}")
}

/// Check if format is JSON (either Json or Pretty)
pub fn is_json_format(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Json | OutputFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_header() {
        let header = format_matches_header(3);
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 70);
        assert_eq!(lines[1], "MATCHES: 3");
    }

    #[test]
    fn test_render_json_compact_and_pretty() {
        let compact = render_json_response(&vec![1, 2], OutputFormat::Json).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"data\":[1,2]"));
        let pretty = render_json_response(&vec![1, 2], OutputFormat::Pretty).unwrap();
        assert!(pretty.contains('\n'));
        assert!(is_json_format(OutputFormat::Pretty));
        assert!(!is_json_format(OutputFormat::Human));
    }
}
