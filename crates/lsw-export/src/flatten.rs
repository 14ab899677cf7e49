//! Flattening nested records into schema-aligned rows.

use serde_json::Value;

use crate::schema::{join_path, Schema};
use crate::Record;

/// Flatten one record into a row of strings aligned to `schema`.
///
/// Leaves whose path is unknown to the schema are silently dropped; schema
/// columns with no matching leaf stay empty. Both cases are expected when a
/// record deviates from the representative one the schema came from.
pub fn flatten_record(record: &Record, schema: &Schema) -> Vec<String> {
    let mut row = vec![String::new(); schema.len()];
    fill_row("", record, schema, &mut row);
    row
}

fn fill_row(prefix: &str, record: &Record, schema: &Schema, row: &mut [String]) {
    for (key, value) in record {
        let path = join_path(prefix, key);
        match value {
            Value::Object(nested) => fill_row(&path, nested, schema, row),
            leaf => {
                if let Some(slot) = schema.position(&path) {
                    row[slot] = render_leaf(leaf);
                }
            }
        }
    }
}

/// Render a leaf value as a cell string.
///
/// Strings are rendered bare (no JSON quoting), null as the empty string,
/// everything else (numbers, booleans, arrays) as its compact JSON form.
pub fn render_leaf(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
