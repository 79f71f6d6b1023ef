//! Function-like macro scanner.
//!
//! The AST provider only reports real functions; `#define NAME(args)`
//! macros are picked up here with a line-oriented pattern so `list` can
//! show both side by side.

use crate::error::CoogleError;
use regex::Regex;
use serde::Serialize;

const MACRO_PATTERN: &str = r"#define\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)";

/// One function-like macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroRecord {
    pub name: String,
    pub params: String,
    /// `#define NAME(params)`
    pub signature: String,
    /// 1-based source line
    pub line: usize,
}

/// Scan source text for function-like macros, one match per line.
pub fn scan_macros(content: &str) -> Result<Vec<MacroRecord>, CoogleError> {
    let pattern = Regex::new(MACRO_PATTERN)?;
    let mut macros = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };
        let name = caps[1].to_string();
        let params = caps[2].trim().to_string();
        macros.push(MacroRecord {
            signature: format!("#define {}({})", name, params),
            name,
            params,
            line: idx + 1,
        });
    }
    Ok(macros)
}
