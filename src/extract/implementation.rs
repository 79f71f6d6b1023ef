//! Implementation-only view of a C source file.

use super::lexer::{strip_comments, top_level_items, Item};
use tracing::debug;

/// Header the generated implementation includes: `x.c` -> `x.h`, else `x` + `.h`.
pub fn header_name(source_name: &str) -> String {
    match source_name.strip_suffix(".c") {
        Some(stem) => format!("{stem}.h"),
        None => format!("{source_name}.h"),
    }
}

/// Every function definition, nested bodies included, with comments removed.
pub fn extract_implementations(content: &str) -> Vec<String> {
    let implementations: Vec<String> = top_level_items(&strip_comments(content))
        .into_iter()
        .filter(|item| item.function_name().is_some())
        .filter_map(|item| match item {
            Item::Definition { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    debug!(functions = implementations.len(), "extracted implementations");
    implementations
}

/// `#include` line for the matching header followed by each definition.
pub fn generate_implementation(source_name: &str, content: &str) -> String {
    let mut output = format!("#include \"{}\"\n\n", header_name(source_name));
    for implementation in extract_implementations(content) {
        output.push_str(&implementation);
        output.push_str("\n\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("array.c"), "array.h");
        assert_eq!(header_name("src/ma"), "src/ma.h");
    }

    #[test]
    fn test_nested_bodies_kept_whole() {
        let source = "/* top */\n\
                      typedef int T;\n\
                      int deep(int x) {\n    if (x) {\n        while (x) { x--; }\n    }\n    return x; // done\n}\n\
                      struct S { int a; };\n";
        let implementations = extract_implementations(source);
        assert_eq!(implementations.len(), 1);
        assert_eq!(
            implementations[0],
            "int deep(int x) {\n    if (x) {\n        while (x) { x--; }\n    }\n    return x; \n}"
        );
    }

    #[test]
    fn test_generate_implementation_layout() {
        let output = generate_implementation("calc.c", "int one(void) { return 1; }\nint two(void) { return 2; }\n");
        assert_eq!(
            output,
            "#include \"calc.h\"\n\nint one(void) { return 1; }\n\nint two(void) { return 2; }\n\n"
        );
    }

    #[test]
    fn test_main_is_kept() {
        let output = generate_implementation("app.c", "int main(void) { return 0; }\n");
        assert!(output.contains("int main(void) { return 0; }"));
    }
}
