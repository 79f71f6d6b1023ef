//! Header and implementation generators for C sources.
//!
//! Both generators share one scanner (see [`lexer`]): comments are removed
//! with a small state machine, then top-level items are found by counting
//! brace depth. Neither does any type or query reasoning.

pub mod header;
pub mod implementation;
pub mod lexer;

pub use header::{extract_declarations, generate_header, header_guard};
pub use implementation::{extract_implementations, generate_implementation, header_name};
