//! Query loop over a built signature index.
//!
//! A [`Session`] renders searches for one file, either once for a query
//! given on the command line or repeatedly for queries read line by line.
//! Reader and writer are generic so the loop runs the same against a
//! terminal or in-memory buffers.

use crate::error::CoogleError;
use crate::output::{format_signature, OutputFormat, SearchResponse, Style};
use crate::output_common::{format_matches_header, is_json_format, render_json_response};
use crate::query::highlight_terms;
use crate::signature::SignatureIndex;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Inputs that end the interactive loop, compared case-insensitively.
pub const EXIT_COMMANDS: &[&str] = &["quit", "exit", "q"];

pub const SEARCH_RULES: &str = "\
Search rules:
  'int,'           -> functions returning int (any args)
  ',int,float'     -> functions with those args (any return type)
  'int'            -> functions with int in return OR args
  'int,char*,bool' -> functions returning int with those args
Type 'quit' to exit
";

const PROMPT: &str = "Search: ";

/// Whether a line read from the user ends the loop.
pub fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    EXIT_COMMANDS
        .iter()
        .any(|command| trimmed.eq_ignore_ascii_case(command))
}

pub struct Session<'a> {
    index: &'a SignatureIndex,
    file: String,
    format: OutputFormat,
    style: Style,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a SignatureIndex, file: &Path, format: OutputFormat, style: Style) -> Self {
        Self {
            index,
            file: file.display().to_string(),
            format,
            style,
        }
    }

    /// Render the results of one query.
    pub fn render(&self, query: &str) -> Result<String, CoogleError> {
        let matches = self.index.search(query);
        debug!(query, matches = matches.len(), "rendering search");

        if is_json_format(self.format) {
            let response = SearchResponse::new(query, &self.file, &matches);
            return Ok(format!("{}\n", render_json_response(&response, self.format)?));
        }

        let terms = highlight_terms(query);
        let mut rendered = format!("\n{}\n\n", format_matches_header(matches.len()));
        for record in &matches {
            rendered.push_str(&format_signature(record, &terms, &self.style));
            rendered.push_str(";\n");
        }
        rendered.push('\n');
        Ok(rendered)
    }

    /// Run a single query given up front.
    pub fn run_once<W: Write>(&self, query: &str, out: &mut W) -> Result<(), CoogleError> {
        if !is_json_format(self.format) {
            writeln!(out, "{}{}", PROMPT, query)?;
        }
        if is_exit_command(query) {
            return Ok(());
        }
        out.write_all(self.render(query)?.as_bytes())?;
        Ok(())
    }

    /// Read queries until EOF or an exit command. Returns how many searches ran.
    pub fn run_interactive<R: BufRead, W: Write>(
        &self,
        input: R,
        out: &mut W,
    ) -> Result<usize, CoogleError> {
        let prompt = !is_json_format(self.format);
        let mut lines = input.lines();
        let mut searches = 0;

        loop {
            if prompt {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                if prompt {
                    writeln!(out)?;
                }
                break;
            };
            let line = line?;
            let query = line.trim();
            if is_exit_command(query) {
                break;
            }
            out.write_all(self.render(query)?.as_bytes())?;
            out.flush()?;
            searches += 1;
        }

        debug!(searches, "interactive session finished");
        Ok(searches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{RawFunctionDescriptor, RawParam};
    use std::io::Cursor;

    fn index() -> SignatureIndex {
        SignatureIndex::build(vec![
            RawFunctionDescriptor {
                name: "sub".to_string(),
                return_type: "float".to_string(),
                params: vec![RawParam::new("int", Some("a")), RawParam::new("int", Some("b"))],
                line: 9,
            },
            RawFunctionDescriptor {
                name: "add".to_string(),
                return_type: "int".to_string(),
                params: vec![RawParam::new("int", Some("a")), RawParam::new("int", Some("b"))],
                line: 5,
            },
        ])
    }

    fn session(index: &SignatureIndex, format: OutputFormat) -> Session<'_> {
        Session::new(index, Path::new("math.h"), format, Style::plain())
    }

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("  EXIT "));
        assert!(is_exit_command("Q"));
        assert!(!is_exit_command("quite"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn test_render_human() {
        let index = index();
        let rendered = session(&index, OutputFormat::Human).render("int,").unwrap();
        assert!(rendered.contains("MATCHES: 1"));
        assert!(rendered.contains("int add(int a, int b);\n"));
        assert!(!rendered.contains("sub"));
    }

    #[test]
    fn test_render_orders_by_line() {
        let index = index();
        let rendered = session(&index, OutputFormat::Human).render("").unwrap();
        let add = rendered.find("add(").unwrap();
        let sub = rendered.find("sub(").unwrap();
        assert!(add < sub);
        assert!(rendered.contains("MATCHES: 2"));
    }

    #[test]
    fn test_render_json() {
        let index = index();
        let rendered = session(&index, OutputFormat::Json).render(",int,int").unwrap();
        let value: serde_json::Value = serde_json::from_str(rendered.trim()).unwrap();
        assert_eq!(value["data"]["total_count"], 2);
        assert_eq!(value["data"]["file"], "math.h");
        assert_eq!(value["data"]["results"][0]["name"], "add");
    }

    #[test]
    fn test_interactive_stops_at_exit() {
        let index = index();
        let input = Cursor::new("float,\n\nquit\nint\n");
        let mut out = Vec::new();
        let searches = session(&index, OutputFormat::Human)
            .run_interactive(input, &mut out)
            .unwrap();
        assert_eq!(searches, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Search: "));
        assert!(text.contains("MATCHES: 1"));
        assert!(text.contains("MATCHES: 2"));
    }

    #[test]
    fn test_interactive_stops_at_eof() {
        let index = index();
        let mut out = Vec::new();
        let searches = session(&index, OutputFormat::Human)
            .run_interactive(Cursor::new("int\n"), &mut out)
            .unwrap();
        assert_eq!(searches, 1);
    }

    #[test]
    fn test_run_once_echoes_query() {
        let index = index();
        let mut out = Vec::new();
        session(&index, OutputFormat::Human)
            .run_once("float", &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Search: float\n"));
        assert!(text.contains("float sub(int a, int b);"));
    }
}
