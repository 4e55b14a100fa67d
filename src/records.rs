//! Loading record collections from files produced by the document store.
//!
//! Three input shapes are accepted, so that any file the store hands out can
//! be fed straight into a report or export:
//!
//! - a "list documents" response: `{ "results": [record, ...] }`
//! - an export envelope: `{ "data": [record + chunks, ...] }`
//! - a bare array of records

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::debug;

use docmeta_core::interchange::{ExportEnvelope, ExportItem};
use docmeta_core::models::{DocumentList, DocumentRecord};

/// Which of the accepted shapes an input file had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    DocumentList,
    ExportEnvelope,
    RecordArray,
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputShape::DocumentList => "document list",
            InputShape::ExportEnvelope => "export envelope",
            InputShape::RecordArray => "record array",
        })
    }
}

/// Records, each with whatever chunks came with it.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub shape: InputShape,
    /// Chunk lists are empty unless the input was an export envelope.
    pub items: Vec<ExportItem>,
}

impl Corpus {
    pub fn records(&self) -> Vec<DocumentRecord> {
        self.items.iter().map(|item| item.record.clone()).collect()
    }

    /// Keep only items whose record matches `query` (see
    /// [`DocumentRecord::matches_query`]). Chunks stay with their record.
    pub fn filtered(mut self, query: Option<&str>) -> Self {
        if let Some(q) = query {
            let before = self.items.len();
            self.items.retain(|item| item.record.matches_query(q));
            debug!(query = q, before, after = self.items.len(), "filtered records");
        }
        self
    }

    pub fn into_envelope(self) -> ExportEnvelope {
        ExportEnvelope::from_items(self.items)
    }
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let corpus = parse_corpus(&text)
        .with_context(|| format!("Failed to load records from {}", path.display()))?;
    debug!(
        path = %path.display(),
        shape = %corpus.shape,
        records = corpus.items.len(),
        "loaded records"
    );
    Ok(corpus)
}

pub fn parse_corpus(text: &str) -> Result<Corpus> {
    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;

    let shape = match &value {
        Value::Object(obj) if obj.contains_key("results") => InputShape::DocumentList,
        Value::Object(obj) if obj.contains_key("data") => InputShape::ExportEnvelope,
        Value::Array(_) => InputShape::RecordArray,
        _ => bail!(
            "expected a list-documents response ({{\"results\": [...]}}), \
             an export envelope ({{\"data\": [...]}}), or an array of records"
        ),
    };

    let items = match shape {
        InputShape::DocumentList => {
            let list: DocumentList =
                serde_json::from_value(value).context("Invalid list-documents response")?;
            list.results.into_iter().map(ExportItem::from).collect()
        }
        InputShape::ExportEnvelope => {
            let envelope: ExportEnvelope =
                serde_json::from_value(value).context("Invalid export envelope")?;
            envelope.data
        }
        InputShape::RecordArray => {
            let records: Vec<DocumentRecord> =
                serde_json::from_value(value).context("Invalid record array")?;
            records.into_iter().map(ExportItem::from).collect()
        }
    };

    Ok(Corpus { shape, items })
}
