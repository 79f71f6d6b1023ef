//! Canonical spelling for C/C++ type strings.
//!
//! Every comparison the match engine makes is between normalized strings:
//! lowercase, `const` removed, each `*` standing alone between single
//! spaces, whitespace collapsed and trimmed.
//!
//! ```
//! use coogle::normalize;
//!
//! assert_eq!(normalize("const char**"), "char * *");
//! assert_eq!(normalize("  Array   *"), "array *");
//! ```

const CONST_KEYWORD: &str = "const";

/// Normalize a raw type spelling for comparison.
///
/// Total and idempotent: `normalize(&normalize(t)) == normalize(t)` for any
/// input. `const` is removed as a plain substring (not only as a whole
/// word), and removal repeats until none is left so that text such as
/// `cconstonst` cannot leave a fresh `const` behind. Lowercasing runs
/// first, so `CONST` and other case variants are stripped as well.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_lowercase();
    while text.contains(CONST_KEYWORD) {
        text = text.replace(CONST_KEYWORD, "");
    }
    let spaced = text.replace('*', " * ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_const_and_case_are_ignored() {
        assert_eq!(normalize("const int"), "int");
        assert_eq!(normalize("INT"), "int");
        assert_eq!(normalize("const int"), normalize("INT"));
    }

    #[test]
    fn test_pointers_are_spaced() {
        assert_eq!(normalize("char*"), "char *");
        assert_eq!(normalize("char**"), "char * *");
        assert_eq!(normalize("const void *"), "void *");
        assert_eq!(normalize("Array*"), "array *");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("  unsigned \t long\n  int "), "unsigned long int");
    }

    #[test]
    fn test_only_const_is_empty() {
        assert_eq!(normalize("const"), "");
        assert_eq!(normalize("const const"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_const_removed_as_substring() {
        // Plain substring removal, so identifiers containing it are affected too.
        assert_eq!(normalize("constant_t"), "ant_t");
        assert_eq!(normalize("cconstonst"), "");
    }

    #[test]
    fn test_uppercase_const_removed() {
        assert_eq!(normalize("CONST char *"), "char *");
        assert_eq!(normalize("Const Int"), "int");
        assert_eq!(normalize("unsigned cOnSt long*"), "unsigned long *");
    }

    proptest! {
        /// Property: normalizing twice equals normalizing once.
        #[test]
        fn normalize_is_idempotent(raw in "[a-zA-Z0-9_ *&:<>\\t]{0,40}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: idempotence holds when `const` fragments are spliced in.
        #[test]
        fn normalize_is_idempotent_with_const(
            head in "[a-z *]{0,8}",
            tail in "[a-z *]{0,8}",
            upper in any::<bool>(),
        ) {
            let keyword = if upper { "CONST" } else { "const" };
            let raw = format!("{head}{keyword}{tail}{keyword}");
            let once = normalize(&raw);
            prop_assert!(!once.contains("const"));
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: pointer depth is preserved as separate `*` tokens.
        #[test]
        fn pointer_depth_preserved(depth in 0usize..6) {
            let raw = format!("char{}", "*".repeat(depth));
            let normalized = normalize(&raw);
            prop_assert_eq!(normalized.split(' ').filter(|t| *t == "*").count(), depth);
        }
    }
}
