//! Signature records and the per-file signature index.
//!
//! The AST provider hands over a flat list of [`RawFunctionDescriptor`]s.
//! [`SignatureIndex::build`] normalizes every type once and freezes the
//! result; all searches afterwards are read-only scans over it.

use crate::normalize::normalize;
use crate::query::{self, StructuredQuery};
use serde::Serialize;
use tracing::debug;

/// One parameter as spelled in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawParam {
    /// Type spelling, e.g. `const void *`
    pub type_raw: String,
    /// Parameter name, absent for unnamed parameters
    pub name: Option<String>,
}

impl RawParam {
    pub fn new(type_raw: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            type_raw: type_raw.into(),
            name: name.map(str::to_string),
        }
    }

    /// `type name`, or just `type` when unnamed.
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.type_raw, name).trim().to_string(),
            None => self.type_raw.trim().to_string(),
        }
    }
}

/// Function declaration as produced by the AST provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFunctionDescriptor {
    pub name: String,
    pub return_type: String,
    pub params: Vec<RawParam>,
    /// 1-based source line
    pub line: usize,
}

/// Normalized, immutable view of one function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureRecord {
    name: String,
    return_type_raw: String,
    return_type_norm: String,
    params: Vec<RawParam>,
    param_types_norm: Vec<String>,
    line: usize,
}

impl SignatureRecord {
    pub fn from_descriptor(descriptor: RawFunctionDescriptor) -> Self {
        let return_type_norm = normalize(&descriptor.return_type);
        let param_types_norm = descriptor
            .params
            .iter()
            .map(|p| normalize(&p.type_raw))
            .collect();
        Self {
            name: descriptor.name,
            return_type_raw: descriptor.return_type,
            return_type_norm,
            params: descriptor.params,
            param_types_norm,
            line: descriptor.line,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type_raw(&self) -> &str {
        &self.return_type_raw
    }

    pub fn return_type_norm(&self) -> &str {
        &self.return_type_norm
    }

    pub fn params(&self) -> &[RawParam] {
        &self.params
    }

    pub fn param_types_norm(&self) -> &[String] {
        &self.param_types_norm
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parenthesized parameter list, `(void)` when there are none.
    pub fn params_display(&self) -> String {
        if self.params.is_empty() {
            return "(void)".to_string();
        }
        let params: Vec<String> = self.params.iter().map(RawParam::display).collect();
        format!("({})", params.join(", "))
    }

    /// `<return type> <name>(<params>)` without the trailing semicolon.
    pub fn signature(&self) -> String {
        format!(
            "{} {}{}",
            self.return_type_raw,
            self.name,
            self.params_display()
        )
    }
}

/// All signature records of one file, in provider order.
#[derive(Debug, Clone, Default)]
pub struct SignatureIndex {
    records: Vec<SignatureRecord>,
}

impl SignatureIndex {
    /// Build the index. Provider output is trusted verbatim: no
    /// deduplication, no arity checks, order preserved.
    pub fn build<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = RawFunctionDescriptor>,
    {
        let records: Vec<SignatureRecord> = descriptors
            .into_iter()
            .map(SignatureRecord::from_descriptor)
            .collect();
        debug!(records = records.len(), "signature index built");
        Self { records }
    }

    pub fn records(&self) -> &[SignatureRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignatureRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run a raw query against this index. See [`query::search`].
    pub fn search(&self, raw_query: &str) -> Vec<&SignatureRecord> {
        query::search(self, raw_query)
    }

    /// Run an already parsed query against this index.
    pub fn search_parsed(&self, parsed: &StructuredQuery) -> Vec<&SignatureRecord> {
        query::search_parsed(self, parsed)
    }
}

impl<'a> IntoIterator for &'a SignatureIndex {
    type Item = &'a SignatureRecord;
    type IntoIter = std::slice::Iter<'a, SignatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, ret: &str, params: &[(&str, Option<&str>)], line: usize) -> RawFunctionDescriptor {
        RawFunctionDescriptor {
            name: name.to_string(),
            return_type: ret.to_string(),
            params: params
                .iter()
                .map(|(ty, name)| RawParam::new(*ty, *name))
                .collect(),
            line,
        }
    }

    #[test]
    fn test_record_normalizes_types() {
        let record = SignatureRecord::from_descriptor(descriptor(
            "array_append_vals",
            "Array *",
            &[("Array *", Some("array")), ("const void *", Some("data")), ("uint", Some("len"))],
            15,
        ));
        assert_eq!(record.return_type_norm(), "array *");
        assert_eq!(record.param_types_norm(), &["array *", "void *", "uint"]);
        assert_eq!(record.arity(), 3);
        assert_eq!(record.line(), 15);
    }

    #[test]
    fn test_signature_display() {
        let record = SignatureRecord::from_descriptor(descriptor(
            "array_free",
            "void",
            &[("Array *", Some("array")), ("int", None)],
            14,
        ));
        assert_eq!(record.signature(), "void array_free(Array * array, int)");

        let empty = SignatureRecord::from_descriptor(descriptor("tick", "int", &[], 3));
        assert_eq!(empty.signature(), "int tick(void)");
    }

    #[test]
    fn test_index_preserves_order_and_duplicates() {
        let index = SignatureIndex::build(vec![
            descriptor("b", "int", &[], 9),
            descriptor("a", "int", &[], 2),
            descriptor("a", "int", &[], 2),
        ]);
        let names: Vec<&str> = index.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["b", "a", "a"]);
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = SignatureIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.search("").is_empty());
    }
}
