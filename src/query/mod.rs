//! Query grammar and signature matching.
//!
//! A raw query is parsed fresh on every search:
//!
//! - no comma: a free term, matched against the return type and every
//!   parameter type (`int`, `void*`)
//! - with commas: the first part filters the return type, the remaining
//!   parts are parameter-type terms with counts (`int,`, `,int,float`,
//!   `int,char*,bool`)
//!
//! All matching is substring containment over normalized type strings.
//! Results come back in ascending source-line order.

mod engine;
mod parser;
mod terms;

pub use engine::{matches, search, search_parsed};
pub use parser::{parse, ArgMultiset, ReturnFilter, StructuredQuery};
pub use terms::highlight_terms;
