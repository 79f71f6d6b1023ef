//! coogle - find C/C++ functions by return type and argument types.
//!
//! A header is parsed once into a [`SignatureIndex`]; queries are then
//! matched against the normalized type strings of every function in it.
//!
//! # Query syntax
//!
//! - `int` - functions with `int` in the return type or any parameter type
//! - `int,` - functions returning `int`, any parameters
//! - `,int,float` - functions with an `int` and a `float` parameter
//! - `int,char*,bool` - functions returning `int` with those parameters
//!
//! Repeating a parameter term (`,int,int`) requires that many parameters.
//!
//! # Quick Start
//!
//! ```no_run
//! use coogle::{provider, SignatureIndex};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let descriptors = provider::parse_header(Path::new("array.h"))?;
//! let index = SignatureIndex::build(descriptors);
//! for record in index.search("array*,") {
//!     println!("{};", record.signature());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`normalize`] - Type string canonicalization
//! - [`signature`] - Signature records and the per-file index
//! - [`query`] - Query parsing and matching
//! - [`highlight`] - Marking query terms in display text
//! - [`provider`] - Function declarations from C/C++ source (tree-sitter)
//! - [`macros`] - Function-like macro scanner
//! - [`extract`] - Header and implementation generators
//! - [`output`] - Response types and formatting
//! - [`session`] - Single and interactive query loops
//! - [`error`] - Error types

pub mod error;
pub mod extract;
pub mod highlight;
pub mod macros;
pub mod normalize;
pub mod output;
pub mod output_common;
pub mod provider;
pub mod query;
pub mod session;
pub mod signature;

pub use error::CoogleError;
pub use highlight::{highlight, Markers};
pub use normalize::normalize;
pub use query::{parse, search, ReturnFilter, StructuredQuery};
pub use signature::{RawFunctionDescriptor, RawParam, SignatureIndex, SignatureRecord};
