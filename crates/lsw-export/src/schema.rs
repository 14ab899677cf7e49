//! Column schema derivation from nested records.

use std::collections::HashMap;

use serde_json::Value;

use crate::Record;

/// An ordered CSV column schema: fully-qualified dotted key paths,
/// lexicographically sorted so the column order never depends on map
/// iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Derive a schema from one representative record.
    ///
    /// Nested objects contribute one column per leaf, with the key path
    /// dot-joined. Every non-object value (including arrays) is a leaf.
    pub fn derive(record: &Record) -> Self {
        let mut columns = Vec::new();
        collect_paths("", record, &mut columns);
        columns.sort_unstable();

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, path)| (path.clone(), i))
            .collect();

        Self { columns, index }
    }

    /// Sorted column paths, in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a dotted path in the row, if the schema knows it.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns present in `self` but not in `other`, in header order.
    /// Used to report schema drift between windows.
    pub fn missing_from(&self, other: &Schema) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|path| other.position(path).is_none())
            .map(String::as_str)
            .collect()
    }
}

fn collect_paths(prefix: &str, record: &Record, out: &mut Vec<String>) {
    for (key, value) in record {
        let path = join_path(prefix, key);
        match value {
            Value::Object(nested) => collect_paths(&path, nested, out),
            _ => out.push(path),
        }
    }
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
