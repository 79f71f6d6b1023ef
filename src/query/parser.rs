//! Raw query string to structured filter.

use crate::normalize::normalize;
use std::collections::BTreeMap;

/// Required parameter-type terms mapped to their minimum occurrence count.
pub type ArgMultiset = BTreeMap<String, usize>;

/// Return-type part of a structured query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnFilter {
    /// Any return type passes
    Any,
    /// Normalized term that must be contained in the return type
    Exact(String),
}

/// Parsed form of a raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredQuery {
    /// Query without a comma; checked against return and parameter types
    FreeTerm(String),
    /// Query with at least one comma
    Structured {
        return_filter: ReturnFilter,
        arg_terms: ArgMultiset,
    },
}

/// Parse a raw query. Never fails; every string yields some filter.
pub fn parse(raw_query: &str) -> StructuredQuery {
    let trimmed = raw_query.trim();
    if !trimmed.contains(',') {
        return StructuredQuery::FreeTerm(normalize(trimmed));
    }

    let parts: Vec<String> = trimmed.split(',').map(|p| normalize(p.trim())).collect();

    // A leading comma leaves an empty first part, so both cases land on Any.
    let return_filter = match parts.first() {
        Some(first) if !trimmed.starts_with(',') && !first.is_empty() => {
            ReturnFilter::Exact(first.clone())
        }
        _ => ReturnFilter::Any,
    };

    let mut arg_terms = ArgMultiset::new();
    for part in parts.into_iter().skip(1).filter(|p| !p.is_empty()) {
        *arg_terms.entry(part).or_insert(0) += 1;
    }

    StructuredQuery::Structured {
        return_filter,
        arg_terms,
    }
}
