//! Core data models shared by the aggregation and interchange code.
//!
//! A [`DocumentRecord`] is one indexed file's metadata as the document store
//! reports it. The store's JSON is not strictly typed (sizes arrive as
//! numbers, strings, or `null`; optional text fields may be missing), so
//! every field decodes leniently instead of rejecting the record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Label shown for records with no project or contractor.
pub const NONE_LABEL: &str = "(none)";

/// Label shown for records with no file type.
pub const UNKNOWN_TYPE_LABEL: &str = "unknown";

/// Identifier assigned by the document store.
///
/// The store emits integer primary keys, but string identifiers are
/// accepted so that records from other stores survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Metadata for one indexed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// MIME-like type, possibly with parameters after a `;`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contractor: String,
    /// ISO-8601 timestamp, or `None` when the store has no modification time.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub modified_at: Option<String>,
    /// Size as reported. `None` when absent; unparseable values decode as `Some(0)`.
    #[serde(default, deserialize_with = "lenient_size")]
    pub size_bytes: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_path: String,
}

impl DocumentRecord {
    /// Size used in every sum. Absent sizes count as zero.
    pub fn size(&self) -> u64 {
        self.size_bytes.unwrap_or(0)
    }

    pub fn file_type_key(&self) -> GroupKey {
        GroupKey::for_file_type(&self.file_type)
    }

    pub fn project_key(&self) -> GroupKey {
        GroupKey::for_text(&self.project)
    }

    pub fn contractor_key(&self) -> GroupKey {
        GroupKey::for_text(&self.contractor)
    }

    /// The modification timestamp, treating an empty string as absent.
    pub fn modified(&self) -> Option<&str> {
        self.modified_at.as_deref().filter(|ts| !ts.is_empty())
    }

    /// Case-insensitive substring match on name, description, project,
    /// and contractor. A blank query matches every record.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &self.file_name,
            &self.description,
            &self.project,
            &self.contractor,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Keep the records matching `query`, preserving input order.
pub fn filter_records(records: &[DocumentRecord], query: &str) -> Vec<DocumentRecord> {
    records
        .iter()
        .filter(|r| r.matches_query(query))
        .cloned()
        .collect()
}

/// Response shape of the store's "list documents" query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub results: Vec<DocumentRecord>,
}

/// Grouping key derived from a free-form record field.
///
/// Empty values map onto explicit fallback variants instead of ad hoc
/// strings, and text equal to a fallback label maps onto that fallback so
/// that labels stay unique within a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Named(String),
    /// No project or contractor assigned.
    Unassigned,
    /// No file type recorded.
    UnknownType,
}

impl GroupKey {
    /// Key for project/contractor text: trimmed, or [`GroupKey::Unassigned`].
    pub fn for_text(raw: &str) -> Self {
        match raw.trim() {
            "" | NONE_LABEL => GroupKey::Unassigned,
            trimmed => GroupKey::Named(trimmed.to_string()),
        }
    }

    /// Key for a file type: the part before the first `;`, taken verbatim.
    ///
    /// Only an empty type is unknown; `";charset=x"` keys as the empty name.
    pub fn for_file_type(raw: &str) -> Self {
        if raw.is_empty() {
            return GroupKey::UnknownType;
        }
        match raw.split(';').next().unwrap_or_default() {
            UNKNOWN_TYPE_LABEL => GroupKey::UnknownType,
            base => GroupKey::Named(base.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Unassigned => NONE_LABEL,
            GroupKey::UnknownType => UNKNOWN_TYPE_LABEL,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coerce an arbitrary JSON value to a non-negative byte count.
///
/// Integers pass through, floats truncate, numeric strings parse, and
/// everything else (negative, non-finite, non-numeric) becomes zero.
pub fn coerce_size(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(clamp_float)).unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(clamp_float))
                .unwrap_or(0)
        }
        Value::Bool(true) => 1,
        _ => 0,
    }
}

fn clamp_float(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.trunc() as u64
    } else {
        0
    }
}

/// Text of a loosely typed field: `null` is empty, other scalars keep their JSON text.
pub(crate) fn text_from_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(text_from_value)
}

pub(crate) fn lenient_opt_string<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

pub(crate) fn lenient_size<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        other => Some(coerce_size(&other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> DocumentRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let r = record(json!({"id": 7, "file_name": "a.txt"}));
        assert_eq!(r.id, Some(RecordId::Number(7)));
        assert_eq!(r.description, "");
        assert_eq!(r.project, "");
        assert_eq!(r.modified_at, None);
        assert_eq!(r.size_bytes, None);
        assert_eq!(r.size(), 0);
    }

    #[test]
    fn test_null_text_fields_become_empty() {
        let r = record(json!({"project": null, "contractor": null, "description": null}));
        assert_eq!(r.project, "");
        assert_eq!(r.contractor, "");
        assert_eq!(r.description, "");
    }

    #[test]
    fn test_scalar_text_fields_keep_json_text() {
        let r = record(json!({"project": 5, "contractor": true, "file_name": 1.5}));
        assert_eq!(r.project, "5");
        assert_eq!(r.contractor, "true");
        assert_eq!(r.file_name, "1.5");
    }

    #[test]
    fn test_size_coercion() {
        assert_eq!(record(json!({"size_bytes": 1024})).size(), 1024);
        assert_eq!(record(json!({"size_bytes": "2048"})).size(), 2048);
        assert_eq!(record(json!({"size_bytes": 12.9})).size(), 12);
        assert_eq!(record(json!({"size_bytes": -5})).size(), 0);
        assert_eq!(record(json!({"size_bytes": "lots"})).size(), 0);
        assert_eq!(record(json!({"size_bytes": [1, 2]})).size(), 0);
        assert_eq!(record(json!({"size_bytes": null})).size_bytes, None);
        assert_eq!(record(json!({"size_bytes": "abc"})).size_bytes, Some(0));
    }

    #[test]
    fn test_coerce_size_non_finite_strings() {
        assert_eq!(coerce_size(&json!("NaN")), 0);
        assert_eq!(coerce_size(&json!("inf")), 0);
        assert_eq!(coerce_size(&json!(" 42 ")), 42);
    }

    #[test]
    fn test_string_id_accepted() {
        let r = record(json!({"id": "doc-9"}));
        assert_eq!(r.id, Some(RecordId::Text("doc-9".to_string())));
        assert_eq!(r.id.unwrap().to_string(), "doc-9");
    }

    #[test]
    fn test_file_type_key_strips_parameters() {
        assert_eq!(
            GroupKey::for_file_type("text/plain; charset=utf-8"),
            GroupKey::Named("text/plain".to_string())
        );
        assert_eq!(GroupKey::for_file_type(""), GroupKey::UnknownType);
        assert_eq!(GroupKey::for_file_type("unknown"), GroupKey::UnknownType);
    }

    #[test]
    fn test_file_type_empty_base_kept_verbatim() {
        let key = GroupKey::for_file_type(";charset=x");
        assert_eq!(key, GroupKey::Named(String::new()));
        assert_eq!(key.label(), "");
    }

    #[test]
    fn test_text_key_fallback() {
        assert_eq!(GroupKey::for_text("   "), GroupKey::Unassigned);
        assert_eq!(GroupKey::for_text("(none)"), GroupKey::Unassigned);
        assert_eq!(
            GroupKey::for_text("  Bridge Repair "),
            GroupKey::Named("Bridge Repair".to_string())
        );
        assert_eq!(GroupKey::Unassigned.label(), "(none)");
        assert_eq!(GroupKey::UnknownType.to_string(), "unknown");
    }

    #[test]
    fn test_modified_empty_is_absent() {
        let r = record(json!({"modified_at": ""}));
        assert_eq!(r.modified(), None);
        let r = record(json!({"modified_at": "2024-01-05T10:00:00Z"}));
        assert_eq!(r.modified(), Some("2024-01-05T10:00:00Z"));
    }

    #[test]
    fn test_matches_query() {
        let r = record(json!({
            "file_name": "Site Plan.pdf",
            "description": "Drainage layout",
            "project": "Harbor",
            "contractor": "Acme"
        }));
        assert!(r.matches_query(""));
        assert!(r.matches_query("site"));
        assert!(r.matches_query("DRAINAGE"));
        assert!(r.matches_query("acme"));
        assert!(!r.matches_query("invoice"));
    }

    #[test]
    fn test_filter_records_preserves_order() {
        let records = vec![
            record(json!({"file_name": "b-report"})),
            record(json!({"file_name": "other"})),
            record(json!({"file_name": "a-report"})),
        ];
        let kept = filter_records(&records, "report");
        let names: Vec<&str> = kept.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["b-report", "a-report"]);
    }

    #[test]
    fn test_document_list_missing_results() {
        let list: DocumentList = serde_json::from_str("{}").unwrap();
        assert!(list.results.is_empty());
    }
}
