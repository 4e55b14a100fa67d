//! Preparing uploads for the store's bulk-import endpoint.
//!
//! `docmeta import` normalizes an uploaded JSON file into the import body
//! and checks that every item decodes as a record. `docmeta summary` reads
//! the endpoint's response and prints the created/updated/chunk counts.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

use docmeta_core::interchange::{normalize_import_payload, ImportSummary, NormalizedImport};

use crate::config::Config;
use crate::export::{to_json, write_output, OutputTarget};

/// Read and normalize an upload. Malformed JSON fails with "Invalid JSON file".
pub fn prepare_import(input: &Path) -> Result<NormalizedImport> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read import file: {}", input.display()))?;
    let normalized = normalize_import_payload(&text)
        .with_context(|| format!("Failed to import {}", input.display()))?;

    if normalized.is_empty_fallback() {
        warn!(
            path = %input.display(),
            "upload has no recognizable data; importing an empty set"
        );
    }
    Ok(normalized)
}

/// Run the import command: normalize, validate, and write the import body.
///
/// With no `output`, the body goes to stdout.
pub fn run_import(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let normalized = prepare_import(input)?;
    let items = normalized
        .items()
        .with_context(|| format!("Import body from {} is not valid", input.display()))?;
    let chunk_count: usize = items.iter().map(|item| item.chunks.len()).sum();
    debug!(shape = %normalized.shape(), items = items.len(), chunk_count, "normalized upload");

    eprintln!(
        "Normalized {} upload: {} documents, {} chunks",
        normalized.shape(),
        items.len(),
        chunk_count
    );
    if normalized.is_empty_fallback() {
        eprintln!("Warning: upload shape not recognized, nothing will be imported");
    }

    let body = to_json(normalized.body(), config.export.pretty)?;
    write_output(&OutputTarget::resolve(output, None), &body)
}

pub fn read_summary(input: &Path) -> Result<ImportSummary> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read import response: {}", input.display()))?;
    serde_json::from_str(&text).with_context(|| "Failed to parse import response")
}

/// Run the summary command: print the bulk-import result counts.
pub fn run_summary(input: &Path) -> Result<()> {
    let summary = read_summary(input)?;
    println!("{}", summary);
    if let Some(embedded) = summary.chunks_embedded {
        println!("Chunks embedded: {}", embedded);
    }
    Ok(())
}
