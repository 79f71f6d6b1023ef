//! AST provider: C/C++ source text to raw function descriptors.
//!
//! Headers are parsed with the tree-sitter C++ grammar, which also accepts
//! the C headers this tool is usually pointed at. Only the given file is
//! parsed; `#include`d files are never opened, so every descriptor comes
//! from a declaration physically located in that file.
//!
//! Free function declarations and definitions are collected, including
//! those nested in `extern "C"` blocks, namespaces and preprocessor
//! conditionals. Class members, templates and function-pointer variables
//! are not functions in this sense and are skipped.

use crate::error::CoogleError;
use crate::signature::{RawFunctionDescriptor, RawParam};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser, Tree};

/// Declarator kinds that name a free function.
const FUNCTION_NAME_KINDS: &[&str] = &[
    "identifier",
    "qualified_identifier",
    "operator_name",
    "template_function",
];

/// Node kinds whose subtrees never declare a free function.
const OPAQUE_KINDS: &[&str] = &[
    "compound_statement",
    "class_specifier",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
    "field_declaration_list",
    "template_declaration",
];

/// Read and parse a header file.
pub fn parse_header(path: &Path) -> Result<Vec<RawFunctionDescriptor>, CoogleError> {
    let source = read_source(path).map_err(|e| CoogleError::ProviderFailure {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_source(&source, path)
}

/// Read a source file as text. Bytes that are not valid UTF-8 (a Latin-1
/// comment, say) become U+FFFD instead of failing the whole file.
pub fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), "replacing invalid UTF-8 sequences");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Parse already loaded source text. `path` is used for diagnostics only.
pub fn parse_source(source: &str, path: &Path) -> Result<Vec<RawFunctionDescriptor>, CoogleError> {
    let tree = parse_tree(source).map_err(|e| CoogleError::ProviderFailure {
        path: path.display().to_string(),
        reason: format!("{:#}", e),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        warn!(
            path = %path.display(),
            "syntax errors found; keeping the declarations that could be recovered"
        );
    }

    let mut descriptors = Vec::new();
    collect_functions(root, source, &mut descriptors);
    debug!(
        path = %path.display(),
        functions = descriptors.len(),
        "collected function declarations"
    );
    Ok(descriptors)
}

fn parse_tree(source: &str) -> anyhow::Result<Tree> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_cpp::LANGUAGE.into();
    parser
        .set_language(&language)
        .context("Failed to set tree-sitter language")?;
    parser
        .parse(source, None)
        .context("Failed to parse source code")
}

fn collect_functions(node: Node<'_>, source: &str, out: &mut Vec<RawFunctionDescriptor>) {
    match node.kind() {
        "declaration" | "function_definition" => out.extend(function_descriptors(node, source)),
        kind if OPAQUE_KINDS.contains(&kind) => {}
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_functions(child, source, out);
            }
        }
    }
}

/// One descriptor per function declarator (`int a(int), b(void);` has two).
fn function_descriptors(node: Node<'_>, source: &str) -> Vec<RawFunctionDescriptor> {
    let Some(type_node) = node.child_by_field_name("type") else {
        return Vec::new();
    };
    let base = base_type(node, type_node, source);

    let mut cursor = node.walk();
    let declarators: Vec<Node<'_>> = node.children_by_field_name("declarator", &mut cursor).collect();
    declarators
        .into_iter()
        .filter_map(|declarator| function_from_declarator(declarator, &base, source))
        .collect()
}

/// Qualifiers and type specifier in source order, up to the first declarator.
fn base_type(node: Node<'_>, type_node: Node<'_>, source: &str) -> String {
    let first_declarator = node.child_by_field_name("declarator").map(|d| d.id());
    let mut parts = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if Some(child.id()) == first_declarator {
            break;
        }
        if child.id() == type_node.id() || child.kind() == "type_qualifier" {
            parts.push(collapse(node_text(child, source)));
        }
    }
    parts.join(" ")
}

fn function_from_declarator(
    declarator: Node<'_>,
    base: &str,
    source: &str,
) -> Option<RawFunctionDescriptor> {
    // Walk pointer/reference wrappers down to the function declarator.
    let mut current = declarator;
    while current.kind() != "function_declarator" {
        current = match current.kind() {
            "pointer_declarator" => current.child_by_field_name("declarator")?,
            "reference_declarator" => last_named_child(current)?,
            _ => return None,
        };
    }

    // `void (*signal(int))(int)` returns a function pointer: the outer
    // declarator spells the return type and the named function sits inside
    // its parentheses. A chain ending in a plain identifier instead, as in
    // `int (*handler)(int);`, is a variable and yields `None`.
    let mut function = current;
    let name_node = loop {
        let inner = function.child_by_field_name("declarator")?;
        if FUNCTION_NAME_KINDS.contains(&inner.kind()) {
            break inner;
        }
        function = nested_function(inner)?;
    };

    // Whatever the declarator spans around the named function belongs to
    // the return type: `*` for `Array *f(void)`, `(*)(int)` for `signal`.
    let around = format!(
        "{}{}",
        &source[declarator.start_byte()..function.start_byte()],
        &source[function.end_byte()..declarator.end_byte()]
    );
    let declarator_part = collapse(&around);
    let return_type = if declarator_part.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, declarator_part)
    };

    let params = function
        .child_by_field_name("parameters")
        .map(|list| parameters(list, source))
        .unwrap_or_default();

    Some(RawFunctionDescriptor {
        name: collapse(node_text(name_node, source)),
        return_type,
        params,
        line: name_node.start_position().row + 1,
    })
}

fn parameters(list: Node<'_>, source: &str) -> Vec<RawParam> {
    let mut cursor = list.walk();
    let params: Vec<RawParam> = list
        .named_children(&mut cursor)
        .filter(|child| {
            matches!(
                child.kind(),
                "parameter_declaration" | "optional_parameter_declaration"
            )
        })
        .map(|child| parameter(child, source))
        .collect();

    // `f(void)` declares no parameters.
    match params.as_slice() {
        [only] if only.name.is_none() && only.type_raw == "void" => Vec::new(),
        _ => params,
    }
}

/// Type spelling is the declaration text with the name cut out, so
/// `void (*cb)(int)` spells `void (*)(int)` and `char *s` spells `char *`.
fn parameter(node: Node<'_>, source: &str) -> RawParam {
    let start = node.start_byte();
    let end = node
        .child_by_field_name("default_value")
        .map(|value| value.start_byte())
        .unwrap_or_else(|| node.end_byte());
    let name_node = node
        .child_by_field_name("declarator")
        .and_then(declarator_name)
        .filter(|name| name.start_byte() >= start && name.end_byte() <= end);

    let spelling = match name_node {
        Some(name) => format!(
            "{}{}",
            &source[start..name.start_byte()],
            &source[name.end_byte()..end]
        ),
        None => source[start..end].to_string(),
    };
    let type_raw = collapse(spelling.trim_end().trim_end_matches('='));

    RawParam {
        type_raw,
        name: name_node.map(|name| node_text(name, source).to_string()),
    }
}

/// Function declarator wrapped in parentheses, pointers or references.
fn nested_function(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "function_declarator" => Some(node),
        "pointer_declarator" => node.child_by_field_name("declarator").and_then(nested_function),
        "parenthesized_declarator" | "reference_declarator" => {
            last_named_child(node).and_then(nested_function)
        }
        _ => None,
    }
}

/// Innermost identifier of a (possibly nested) declarator.
fn declarator_name(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() == "identifier" {
        return Some(node);
    }
    if let Some(inner) = node.child_by_field_name("declarator") {
        return declarator_name(inner);
    }
    match node.kind() {
        "parenthesized_declarator" | "reference_declarator" => {
            last_named_child(node).and_then(declarator_name)
        }
        _ => None,
    }
}

fn last_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let count = node.named_child_count();
    node.named_child(count.checked_sub(1)?)
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
