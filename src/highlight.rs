//! Marking literal term occurrences in display text.
//!
//! The highlighter only inserts abstract begin/end markers. Turning them
//! into terminal escape codes is up to the renderer in [`crate::output`].

use regex::{Captures, RegexBuilder};
use tracing::warn;

/// Begin/end strings wrapped around every highlighted occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers<'a> {
    pub begin: &'a str,
    pub end: &'a str,
}

impl<'a> Markers<'a> {
    pub const fn new(begin: &'a str, end: &'a str) -> Self {
        Self { begin, end }
    }

    /// Markers that leave the text unchanged.
    pub const fn none() -> Markers<'static> {
        Markers { begin: "", end: "" }
    }
}

/// Wrap every case-insensitive occurrence of each term in `markers`.
///
/// Terms are applied in order against the progressively marked text, so
/// overlapping or repeated terms can nest or duplicate markers. Empty terms
/// are skipped.
pub fn highlight<S: AsRef<str>>(display_text: &str, terms: &[S], markers: &Markers<'_>) -> String {
    let mut text = display_text.to_string();
    for term in terms.iter().map(AsRef::as_ref) {
        if term.is_empty() {
            continue;
        }
        let pattern = match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!(term, error = %e, "skipping highlight term");
                continue;
            }
        };
        text = pattern
            .replace_all(&text, |caps: &Captures| {
                format!("{}{}{}", markers.begin, &caps[0], markers.end)
            })
            .into_owned();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANGLE: Markers<'static> = Markers::new("<", ">");

    #[test]
    fn test_case_insensitive_marking() {
        assert_eq!(
            highlight("Array * array_new(uint element_size)", &["array"], &ANGLE),
            "<Array> * <array>_new(uint element_size)"
        );
    }

    #[test]
    fn test_literal_not_regex() {
        assert_eq!(highlight("char * (char*)", &["char*"], &ANGLE), "char * (<char*>)");
        assert_eq!(highlight("a.b axb", &["a.b"], &ANGLE), "<a.b> axb");
    }

    #[test]
    fn test_empty_terms_skipped() {
        assert_eq!(highlight("int x", &["", "int"], &ANGLE), "<int> x");
        let none: [&str; 0] = [];
        assert_eq!(highlight("int x", &none, &ANGLE), "int x");
    }

    #[test]
    fn test_sequential_terms_can_nest() {
        // "in" is applied after "int" and matches inside the marked text.
        assert_eq!(highlight("int", &["int", "in"], &ANGLE), "<<in>t>");
    }

    #[test]
    fn test_repeated_term_duplicates_markers() {
        assert_eq!(highlight("int", &["int", "int"], &ANGLE), "<<int>>");
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(highlight("int x", &["int"], &Markers::none()), "int x");
    }

    #[test]
    fn test_dollar_in_text_is_preserved() {
        assert_eq!(highlight("$int$", &["int"], &ANGLE), "$<int>$");
    }
}
