//! Two-pass lexical scanner for C sources.
//!
//! Pass one drops comments while leaving string and character literals
//! alone. Pass two splits the comment-free text into top-level items by
//! counting brace depth, so arbitrarily nested bodies are handled.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Literal(char),
}

/// Remove `//` and `/* */` comments.
///
/// Newlines inside block comments are kept so the line structure survives;
/// a block comment otherwise becomes one space.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push(' ');
                    state = State::BlockComment;
                }
                '"' | '\'' => {
                    out.push(c);
                    state = State::Literal(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                }
            }
            State::Literal(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote || c == '\n' {
                    // closing quote, or an unterminated literal ends at the line
                    state = State::Code;
                }
            }
        }
    }
    out
}

/// A top-level piece of a comment-free C source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `#` directive including backslash-continued lines
    Preprocessor(String),
    /// Anything ending in `;` at depth zero, braces included
    /// (`typedef struct { .. } X;`, prototypes, globals)
    Statement(String),
    /// Brace block whose head ends in `)`, i.e. a function body
    Definition { head: String, text: String },
}

impl Item {
    /// Name of the function this definition implements, if its head has a
    /// return type followed by `name(...)`.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Item::Definition { head, .. } => function_name(head),
            _ => None,
        }
    }
}

/// Split comment-free source text into top-level items.
pub fn top_level_items(source: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut head: Option<String> = None;
    let mut depth = 0usize;
    let mut literal: Option<char> = None;
    let mut line_start = true;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(quote) = literal {
            current.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            } else if c == quote || c == '\n' {
                literal = None;
            }
            line_start = c == '\n';
            continue;
        }

        if c == '#' && depth == 0 && line_start {
            let directive = read_directive(&mut chars);
            items.push(Item::Preprocessor(
                format!("#{}", directive).trim_end().to_string(),
            ));
            line_start = true;
            continue;
        }

        match c {
            '"' | '\'' => {
                literal = Some(c);
                current.push(c);
            }
            '{' => {
                if depth == 0 && head.is_none() {
                    head = Some(current.trim().to_string());
                }
                depth += 1;
                current.push(c);
            }
            '}' => {
                current.push(c);
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(h) = head.as_deref().filter(|h| h.ends_with(')')) {
                        items.push(Item::Definition {
                            head: h.to_string(),
                            text: current.trim().to_string(),
                        });
                        current.clear();
                        head = None;
                    }
                }
            }
            ';' if depth == 0 => {
                current.push(c);
                let text = current.trim();
                if text != ";" {
                    items.push(Item::Statement(text.to_string()));
                }
                current.clear();
                head = None;
            }
            _ => current.push(c),
        }
        line_start = c == '\n' || (line_start && c.is_whitespace());
    }
    items
}

/// Rest of a directive after `#`, following `\` line continuations.
fn read_directive(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut text = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'\n') {
            chars.next();
            text.push_str("\\\n");
            continue;
        }
        if c == '\n' {
            break;
        }
        text.push(c);
    }
    text
}

fn function_name(head: &str) -> Option<&str> {
    let open = head.find('(')?;
    let before = head[..open].trim_end();
    let name_start = before
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let name = &before[name_start..];
    let return_type = before[..name_start].trim();

    let valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_return = !return_type.is_empty()
        && return_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '*' || c.is_whitespace());

    (valid_name && valid_return).then_some(name)
}
