use crate::highlight::{highlight, Markers};
use crate::macros::MacroRecord;
use crate::signature::{RawParam, SignatureIndex, SignatureRecord};
use chrono::Utc;
use clap::ValueEnum;
use colored::{Color, Colorize};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::IsTerminal;

const SCHEMA_VERSION: &str = "1.0.0";

const UNDERLINE: &str = "\x1b[4m";
const UNDERLINE_OFF: &str = "\x1b[24m";

const COLOR_TYPE: Color = Color::Cyan;
const COLOR_NAME: Color = Color::Yellow;
const COLOR_FUNCTION: Color = Color::Yellow;
const COLOR_MACRO: Color = Color::Magenta;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Pretty,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
        };
        write!(f, "{}", value)
    }
}

/// When to emit ANSI colors in human output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        };
        write!(f, "{}", value)
    }
}

impl ColorMode {
    /// Install the choice as the process-wide `colored` override.
    pub fn apply(self) {
        match self {
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
            ColorMode::Auto => {
                if !std::io::stdout().is_terminal() {
                    colored::control::set_override(false);
                }
            }
        }
    }
}

/// Presentation style for human output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    /// Style matching the current `colored` settings.
    pub fn detect() -> Self {
        Self {
            color: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    pub const fn plain() -> Self {
        Self { color: false }
    }

    fn markers(&self) -> Markers<'static> {
        if self.color {
            Markers::new(UNDERLINE, UNDERLINE_OFF)
        } else {
            Markers::none()
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// `<return type> <name>(<params>)` with types colored and query terms
/// underlined. The name itself is never highlighted.
pub fn format_signature<S: AsRef<str>>(record: &SignatureRecord, terms: &[S], style: &Style) -> String {
    let markers = style.markers();
    let return_type = highlight(record.return_type_raw(), terms, &markers);
    let rest = highlight(&record.params_display(), terms, &markers);
    format!(
        "{} {}{}",
        style.paint(&return_type, COLOR_TYPE),
        style.paint(record.name(), COLOR_NAME),
        rest
    )
}

/// One `list` line.
pub fn format_list_item(item: &ListItem, style: &Style) -> String {
    match item.kind {
        ItemKind::Function => format!(
            "{} [Line {:4}] {};",
            style.paint("[FUNC] ", COLOR_FUNCTION),
            item.line,
            item.signature
        ),
        ItemKind::Macro => format!(
            "{} [Line {:4}] {}",
            style.paint("[MACRO]", COLOR_MACRO),
            item.line,
            item.signature
        ),
    }
}

#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: &'static str,
    pub execution_id: String,
    pub tool: &'static str,
    pub timestamp: String,
    pub data: T,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    pub message: String,
    pub remediation: Option<String>,
}

#[derive(Serialize)]
pub struct ParamMatch {
    #[serde(rename = "type")]
    pub type_raw: String,
    pub type_normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct SignatureMatch {
    pub match_id: String,
    pub name: String,
    pub line: usize,
    pub return_type: String,
    pub return_type_normalized: String,
    pub params: Vec<ParamMatch>,
    pub signature: String,
}

impl SignatureMatch {
    pub fn from_record(record: &SignatureRecord, file: &str) -> Self {
        let params = record
            .params()
            .iter()
            .zip(record.param_types_norm())
            .map(|(param, normalized): (&RawParam, &String)| ParamMatch {
                type_raw: param.type_raw.clone(),
                type_normalized: normalized.clone(),
                name: param.name.clone(),
            })
            .collect();
        Self {
            match_id: match_id(file, record.name(), record.line()),
            name: record.name().to_string(),
            line: record.line(),
            return_type: record.return_type_raw().to_string(),
            return_type_normalized: record.return_type_norm().to_string(),
            params,
            signature: record.signature(),
        }
    }
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub file: String,
    pub results: Vec<SignatureMatch>,
    pub total_count: u64,
}

impl SearchResponse {
    pub fn new(query: &str, file: &str, records: &[&SignatureRecord]) -> Self {
        Self {
            query: query.to_string(),
            file: file.to_string(),
            results: records
                .iter()
                .map(|record| SignatureMatch::from_record(record, file))
                .collect(),
            total_count: records.len() as u64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Function,
    Macro,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListItem {
    pub kind: ItemKind,
    pub name: String,
    pub line: usize,
    pub signature: String,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub file: String,
    pub items: Vec<ListItem>,
    pub function_count: u64,
    pub macro_count: u64,
    pub total_count: u64,
}

impl ListResponse {
    pub fn new(file: &str, index: &SignatureIndex, macros: &[MacroRecord]) -> Self {
        let items = list_items(index, macros);
        Self {
            file: file.to_string(),
            function_count: index.len() as u64,
            macro_count: macros.len() as u64,
            total_count: items.len() as u64,
            items,
        }
    }
}

/// Functions then macros, stably sorted by line.
pub fn list_items(index: &SignatureIndex, macros: &[MacroRecord]) -> Vec<ListItem> {
    let functions = index.iter().map(|record| ListItem {
        kind: ItemKind::Function,
        name: record.name().to_string(),
        line: record.line(),
        signature: record.signature(),
    });
    let macros = macros.iter().map(|m| ListItem {
        kind: ItemKind::Macro,
        name: m.name.clone(),
        line: m.line,
        signature: m.signature.clone(),
    });
    let mut items: Vec<ListItem> = functions.chain(macros).collect();
    items.sort_by_key(|item| item.line);
    items
}

pub fn json_response<T>(data: T) -> JsonResponse<T> {
    JsonResponse {
        schema_version: SCHEMA_VERSION,
        execution_id: execution_id(),
        tool: "coogle",
        timestamp: Utc::now().to_rfc3339(),
        data,
    }
}

pub fn execution_id() -> String {
    let timestamp = Utc::now().timestamp();
    let pid = std::process::id();
    format!("{:x}-{:x}", timestamp, pid)
}

/// Stable ID for a match: first 8 bytes of SHA-256 over `name:file:line`.
pub fn match_id(file: &str, name: &str, line: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b":");
    hasher.update(file.as_bytes());
    hasher.update(b":");
    hasher.update(line.to_string().as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::RawFunctionDescriptor;

    fn index() -> SignatureIndex {
        SignatureIndex::build(vec![
            RawFunctionDescriptor {
                name: "array_new".to_string(),
                return_type: "Array *".to_string(),
                params: vec![RawParam::new("uint", Some("element_size"))],
                line: 12,
            },
            RawFunctionDescriptor {
                name: "array_len".to_string(),
                return_type: "uint".to_string(),
                params: vec![],
                line: 30,
            },
        ])
    }

    #[test]
    fn test_plain_signature_format() {
        let index = index();
        let line = format_signature(&index.records()[0], &["uint"], &Style::plain());
        assert_eq!(line, "Array * array_new(uint element_size)");
    }

    #[test]
    fn test_colored_signature_underlines_terms() {
        let index = index();
        let style = Style { color: true };
        let line = format_signature(&index.records()[0], &["UINT"], &style);
        assert!(line.contains("(\x1b[4muint\x1b[24m element_size)"));
    }

    #[test]
    fn test_list_items_sorted_by_line() {
        let macros = vec![MacroRecord {
            name: "array_index".to_string(),
            params: "a,t,i".to_string(),
            signature: "#define array_index(a,t,i)".to_string(),
            line: 20,
        }];
        let items = list_items(&index(), &macros);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["array_new", "array_index", "array_len"]);

        assert_eq!(
            format_list_item(&items[0], &Style::plain()),
            "[FUNC]  [Line   12] Array * array_new(uint element_size);"
        );
        assert_eq!(
            format_list_item(&items[1], &Style::plain()),
            "[MACRO] [Line   20] #define array_index(a,t,i)"
        );
    }

    #[test]
    fn test_match_id_is_stable() {
        let a = match_id("array.h", "array_new", 12);
        assert_eq!(a, match_id("array.h", "array_new", 12));
        assert_ne!(a, match_id("array.h", "array_new", 13));
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_search_response_json() {
        let index = index();
        let records: Vec<&SignatureRecord> = index.search("uint,");
        let response = SearchResponse::new("uint,", "array.h", &records);
        let value = serde_json::to_value(json_response(response)).unwrap();
        assert_eq!(value["tool"], "coogle");
        assert_eq!(value["data"]["total_count"], 1);
        assert_eq!(value["data"]["results"][0]["name"], "array_len");
        assert_eq!(value["data"]["results"][0]["signature"], "uint array_len(void)");
    }
}
