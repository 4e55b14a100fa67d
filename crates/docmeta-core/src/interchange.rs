//! JSON interchange: the export envelope and import normalization.
//!
//! The document store exports `{ "data": [item, ...] }` where each item is a
//! record plus its text chunks, and its bulk-import endpoint accepts the same
//! shape. Users may upload files that only approximate it, so uploads go
//! through [`normalize_import_payload`] first:
//!
//! 1. Malformed JSON fails with [`Error::Format`] ("Invalid JSON file").
//! 2. An object with a truthy `data` field passes through unchanged.
//! 3. A bare array is wrapped as `{ "data": [...] }`.
//! 4. Anything else becomes `{ "data": [] }`.
//!
//! Rule 4 is a lenient fallback, not an error. [`NormalizedImport::shape`]
//! reports which rule applied so callers can tell an intentionally empty
//! import from an unrecognized upload.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::models::{text_from_value, DocumentRecord};

/// One text chunk of an exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkRecord {
    pub index: i64,
    pub text: String,
}

/// A record together with its chunks, as one element of the envelope.
///
/// Chunks decode the way the import endpoint reads them: a `null` or
/// missing list is empty, and each chunk's `index` may be a number or a
/// numeric string, falling back to the chunk's position when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    #[serde(flatten)]
    pub record: DocumentRecord,
    #[serde(default, deserialize_with = "lenient_chunks")]
    pub chunks: Vec<ChunkRecord>,
}

impl From<DocumentRecord> for ExportItem {
    fn from(record: DocumentRecord) -> Self {
        Self {
            record,
            chunks: Vec::new(),
        }
    }
}

fn lenient_chunks<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Vec<ChunkRecord>, D::Error> {
    let chunks = match Value::deserialize(d)? {
        Value::Array(chunks) => chunks,
        Value::Null => return Ok(Vec::new()),
        other => return Err(D::Error::custom(format!("chunks must be a list, got {}", other))),
    };
    chunks
        .into_iter()
        .enumerate()
        .map(|(position, chunk)| chunk_from_value(chunk, position).map_err(D::Error::custom))
        .collect()
}

fn chunk_from_value(chunk: Value, position: usize) -> std::result::Result<ChunkRecord, String> {
    let Value::Object(mut fields) = chunk else {
        return Err(format!("chunk {} is not an object", position));
    };
    Ok(ChunkRecord {
        index: chunk_index(fields.remove("index"), position)?,
        text: fields.remove("text").map(text_from_value).unwrap_or_default(),
    })
}

/// Index of the chunk at `position`; `null`, missing, or blank means `position`.
fn chunk_index(value: Option<Value>, position: usize) -> std::result::Result<i64, String> {
    let fallback = i64::try_from(position).unwrap_or(i64::MAX);
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(fallback),
        Some(Value::Bool(true)) => Ok(1),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| format!("chunk {} has an out-of-range index {}", position, n)),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(fallback),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("chunk {} has a non-numeric index {:?}", position, s)),
        Some(other) => Err(format!("chunk {} has an invalid index {}", position, other)),
    }
}

/// Top-level export object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub data: Vec<ExportItem>,
}

impl ExportEnvelope {
    /// Build an envelope from items that already carry their own chunks.
    ///
    /// Each item's chunks are put in ascending `index` order (stable); item
    /// order is preserved.
    pub fn from_items(mut items: Vec<ExportItem>) -> Self {
        for item in &mut items {
            item.chunks.sort_by_key(|c| c.index);
        }
        ExportEnvelope { data: items }
    }

    pub fn records(&self) -> Vec<DocumentRecord> {
        self.data.iter().map(|item| item.record.clone()).collect()
    }

    pub fn chunk_count(&self) -> usize {
        self.data.iter().map(|item| item.chunks.len()).sum()
    }
}

/// Wrap records and their chunks into an export envelope.
///
/// `chunks` is keyed by `file_path`, the store's merge key, so records that
/// share a path all receive that path's chunks. Records with no entry get
/// an empty list. Callers holding chunks per record should use
/// [`ExportEnvelope::from_items`] instead.
pub fn to_export_envelope(
    records: &[DocumentRecord],
    chunks: &HashMap<String, Vec<ChunkRecord>>,
) -> ExportEnvelope {
    let items = records
        .iter()
        .map(|record| ExportItem {
            record: record.clone(),
            chunks: chunks.get(&record.file_path).cloned().unwrap_or_default(),
        })
        .collect();
    ExportEnvelope::from_items(items)
}

/// Which normalization rule produced an import body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportShape {
    /// Object with a `data` field, passed through unchanged.
    Envelope,
    /// Bare array wrapped as `{ "data": [...] }`.
    BareList,
    /// Unrecognized shape replaced by `{ "data": [] }`.
    Unrecognized,
}

impl fmt::Display for ImportShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportShape::Envelope => "envelope",
            ImportShape::BareList => "bare list",
            ImportShape::Unrecognized => "unrecognized",
        })
    }
}

/// An upload normalized into the bulk-import body.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImport {
    shape: ImportShape,
    body: Value,
}

impl NormalizedImport {
    pub fn shape(&self) -> ImportShape {
        self.shape
    }

    /// True when the upload was not recognized and the body is `{ "data": [] }`.
    pub fn is_empty_fallback(&self) -> bool {
        self.shape == ImportShape::Unrecognized
    }

    /// The body to hand to the bulk-import endpoint.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Number of elements in `data`, or `None` when `data` is not a list.
    pub fn item_count(&self) -> Option<usize> {
        self.body.get("data").and_then(Value::as_array).map(Vec::len)
    }

    /// Decode `data` the way the import endpoint reads it.
    pub fn items(&self) -> Result<Vec<ExportItem>> {
        let items = self
            .body
            .get("data")
            .and_then(Value::as_array)
            .ok_or(Error::DataNotList)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                ExportItem::deserialize(item).map_err(|source| Error::Item { index, source })
            })
            .collect()
    }
}

/// Parse uploaded text and normalize it into an import body.
pub fn normalize_import_payload(text: &str) -> Result<NormalizedImport> {
    let value: Value = serde_json::from_str(text).map_err(Error::Format)?;
    Ok(normalize_import_value(value))
}

/// Normalize an already-parsed upload. Never fails.
pub fn normalize_import_value(value: Value) -> NormalizedImport {
    let has_data = value
        .as_object()
        .and_then(|obj| obj.get("data"))
        .is_some_and(is_truthy);
    if has_data {
        return NormalizedImport {
            shape: ImportShape::Envelope,
            body: value,
        };
    }

    match value {
        Value::Array(items) => NormalizedImport {
            shape: ImportShape::BareList,
            body: wrap_data(Value::Array(items)),
        },
        _ => NormalizedImport {
            shape: ImportShape::Unrecognized,
            body: json!({ "data": [] }),
        },
    }
}

fn wrap_data(items: Value) -> Value {
    let mut obj = Map::new();
    obj.insert("data".to_string(), items);
    Value::Object(obj)
}

/// JavaScript-style truthiness, used to decide whether `data` is present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Counts reported back by the bulk-import endpoint.
///
/// Some store versions report written chunks as `chunks_written`, others
/// as `chunks`; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chunks_written: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chunks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_embedded: Option<u64>,
}

impl ImportSummary {
    pub fn new(created: u64, updated: u64, chunks_written: u64) -> Self {
        Self {
            created,
            updated,
            chunks_written: Some(chunks_written),
            ..Default::default()
        }
    }

    /// Chunks written, preferring `chunks_written` over `chunks`.
    pub fn chunks_written(&self) -> u64 {
        self.chunks_written.or(self.chunks).unwrap_or(0)
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import complete. Created {}, Updated {}, Chunks {}",
            self.created,
            self.updated,
            self.chunks_written()
        )
    }
}
