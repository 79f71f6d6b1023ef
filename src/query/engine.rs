//! Filter evaluation over a signature index.

use super::parser::{parse, ArgMultiset, ReturnFilter, StructuredQuery};
use crate::signature::{SignatureIndex, SignatureRecord};
use tracing::debug;

/// Search an index with a raw query.
///
/// Matching records are returned sorted by ascending line; records on the
/// same line keep their index order. A query that matches nothing returns
/// an empty vector, never an error.
pub fn search<'a>(index: &'a SignatureIndex, raw_query: &str) -> Vec<&'a SignatureRecord> {
    let parsed = parse(raw_query);
    debug!(query = raw_query, ?parsed, "parsed query");
    search_parsed(index, &parsed)
}

/// Search an index with an already parsed query.
pub fn search_parsed<'a>(
    index: &'a SignatureIndex,
    parsed: &StructuredQuery,
) -> Vec<&'a SignatureRecord> {
    let mut results: Vec<&SignatureRecord> =
        index.iter().filter(|record| matches(record, parsed)).collect();
    // Stable, so equal lines keep index order.
    results.sort_by_key(|record| record.line());
    debug!(matches = results.len(), total = index.len(), "search finished");
    results
}

/// Whether a single record satisfies a parsed query.
pub fn matches(record: &SignatureRecord, parsed: &StructuredQuery) -> bool {
    match parsed {
        StructuredQuery::FreeTerm(term) => {
            record.return_type_norm().contains(term.as_str())
                || record
                    .param_types_norm()
                    .iter()
                    .any(|ty| ty.contains(term.as_str()))
        }
        StructuredQuery::Structured {
            return_filter,
            arg_terms,
        } => return_matches(record, return_filter) && args_match(record, arg_terms),
    }
}

fn return_matches(record: &SignatureRecord, filter: &ReturnFilter) -> bool {
    match filter {
        ReturnFilter::Any => true,
        ReturnFilter::Exact(term) if term.is_empty() => true,
        ReturnFilter::Exact(term) => record.return_type_norm().contains(term.as_str()),
    }
}

/// Every term needs at least `required` parameters containing it. Parameters
/// are not consumed: one parameter can count toward several distinct terms.
fn args_match(record: &SignatureRecord, arg_terms: &ArgMultiset) -> bool {
    arg_terms.iter().all(|(term, &required)| {
        let found = record
            .param_types_norm()
            .iter()
            .filter(|ty| ty.contains(term.as_str()))
            .count();
        found >= required
    })
}
