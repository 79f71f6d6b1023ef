//! Header generation from a C implementation file.

use super::lexer::{strip_comments, top_level_items, Item};
use tracing::debug;

/// Include guard for a source file name: `src/array.c` becomes `SRC_ARRAY_H`.
pub fn header_guard(source_name: &str) -> String {
    let base = source_name.strip_suffix(".c").unwrap_or(source_name);
    format!("{}_H", base.to_uppercase().replace(['.', '/'], "_"))
}

/// Declarations a header for `content` should carry, in output order:
/// directives, struct/enum/union definitions, other typedefs, then one
/// prototype per function definition (except `main`).
pub fn extract_declarations(content: &str) -> Vec<String> {
    let items = top_level_items(&strip_comments(content));

    let mut directives = Vec::new();
    let mut structs = Vec::new();
    let mut enums = Vec::new();
    let mut unions = Vec::new();
    let mut typedefs = Vec::new();
    let mut prototypes = Vec::new();

    for item in &items {
        match item {
            Item::Preprocessor(text) => directives.push(text.clone()),
            Item::Statement(text) => match aggregate_keyword(text) {
                Some("struct") => structs.push(text.clone()),
                Some("enum") => enums.push(text.clone()),
                Some("union") => unions.push(text.clone()),
                _ if leading_word(text) == "typedef" => typedefs.push(text.clone()),
                _ => {}
            },
            Item::Definition { head, .. } => match item.function_name() {
                Some("main") | None => {}
                Some(_) => prototypes.push(format!("{};", collapse(head))),
            },
        }
    }

    debug!(
        directives = directives.len(),
        aggregates = structs.len() + enums.len() + unions.len(),
        typedefs = typedefs.len(),
        prototypes = prototypes.len(),
        "extracted declarations"
    );

    let mut declarations = directives;
    declarations.extend(structs);
    declarations.extend(enums);
    declarations.extend(unions);
    declarations.extend(typedefs);
    declarations.extend(prototypes);
    declarations
}

/// Full header text wrapped in an include guard.
pub fn generate_header(source_name: &str, content: &str) -> String {
    let guard = header_guard(source_name);
    let mut header = format!("#ifndef {guard}\n#define {guard}\n\n");
    for declaration in extract_declarations(content) {
        header.push_str(&declaration);
        header.push('\n');
    }
    header.push_str(&format!("#endif /* {guard} */\n"));
    header
}

/// `struct`/`enum`/`union` for statements that define one with a body,
/// optionally behind `typedef`.
fn aggregate_keyword(statement: &str) -> Option<&'static str> {
    if !statement.contains('{') {
        return None;
    }
    let mut rest = statement.trim_start();
    if leading_word(rest) == "typedef" {
        rest = rest["typedef".len()..].trim_start();
    }
    match leading_word(rest) {
        "struct" => Some("struct"),
        "enum" => Some("enum"),
        "union" => Some("union"),
        _ => None,
    }
}

fn leading_word(text: &str) -> &str {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
