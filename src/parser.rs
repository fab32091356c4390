use serde_json::Value;

use crate::error::{AggregateError, Result};
use crate::format::SourceFormat;
use crate::types::{FieldValue, RawDocument, RuleCategory, RuleRecord};

/// Parse raw source text of a known format into a [`RawDocument`].
///
/// Malformed individual records are skipped; only a decode failure of
/// the whole payload (invalid JSON/YAML syntax) is a `ParseError`.
pub fn parse(raw: &str, format: SourceFormat) -> Result<RawDocument> {
    match format {
        SourceFormat::Json => {
            let tree: Value = serde_json::from_str(raw)
                .map_err(|e| AggregateError::ParseError(format!("invalid JSON: {e}")))?;
            Ok(document_from_tree(&tree))
        }
        SourceFormat::Yaml => {
            // Decode into the same generic tree as JSON so one walk
            // serves both structured formats.
            let tree: Value = serde_yaml::from_str(raw)
                .map_err(|e| AggregateError::ParseError(format!("invalid YAML: {e}")))?;
            Ok(document_from_tree(&tree))
        }
        SourceFormat::Text => Ok(RawDocument::Payload(payload_lines(raw))),
    }
}

/// Split line-oriented text into payload lines: trimmed, with blank
/// lines and `#` comments discarded, the remainder kept verbatim.
fn payload_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Match a decoded key-value tree against the two document shapes: a
/// flat `payload` list of lines, or a record list (a `rules` key, or
/// the document itself as a top-level array).
///
/// A document with neither shape is empty, not an error.
fn document_from_tree(tree: &Value) -> RawDocument {
    match tree {
        Value::Object(map) => {
            if let Some(Value::Array(lines)) = map.get("payload") {
                let lines = lines
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                return RawDocument::Payload(lines);
            }
            match map.get("rules") {
                Some(Value::Array(records)) => records_from_values(records),
                _ => RawDocument::empty(),
            }
        }
        Value::Array(records) => records_from_values(records),
        _ => RawDocument::empty(),
    }
}

fn records_from_values(values: &[Value]) -> RawDocument {
    RawDocument::Records(values.iter().filter_map(record_from_value).collect())
}

/// Extract one rule record from a tree node.
///
/// Non-object entries are skipped; fields that are neither a string nor
/// a list are treated as absent. List elements that are not strings are
/// dropped.
fn record_from_value(value: &Value) -> Option<RuleRecord> {
    let map = value.as_object()?;
    let mut record = RuleRecord::default();
    for category in RuleCategory::ALL {
        let field = match map.get(category.field_name()) {
            Some(Value::String(s)) => Some(FieldValue::Single(s.clone())),
            Some(Value::Array(items)) => Some(FieldValue::Many(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            )),
            _ => None,
        };
        record.set_field(category, field);
    }
    Some(record)
}
