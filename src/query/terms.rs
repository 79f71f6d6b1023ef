//! Literal terms to highlight for a raw query.

/// Terms to mark in displayed signatures.
///
/// Unlike matching, these are the raw trimmed spellings the user typed, not
/// normalized ones. Comma queries contribute every non-empty part; other
/// queries contribute the trimmed query itself when it is non-empty.
pub fn highlight_terms(raw_query: &str) -> Vec<String> {
    if raw_query.contains(',') {
        raw_query
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        }
    }
}
