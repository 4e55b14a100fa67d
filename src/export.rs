//! Export a record file as a JSON envelope or a flattened CSV.
//!
//! The JSON form is the envelope the store's bulk-import endpoint accepts,
//! so an exported file can be re-imported unchanged. Chunks are carried
//! over when the input is itself an export envelope.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use docmeta_core::csv::to_csv;

use crate::config::Config;
use crate::records;

/// Where command output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` means stdout; no argument falls back to `default` (stdout if `None`).
    pub fn resolve(arg: Option<&Path>, default: Option<&Path>) -> Self {
        match arg.or(default) {
            Some(p) if p == Path::new("-") => OutputTarget::Stdout,
            Some(p) => OutputTarget::File(p.to_path_buf()),
            None => OutputTarget::Stdout,
        }
    }
}

pub(crate) fn write_output(target: &OutputTarget, content: &str) -> Result<()> {
    match target {
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        OutputTarget::Stdout => {
            println!("{}", content);
        }
    }
    Ok(())
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

/// Write the export envelope for `input`.
///
/// With no `output`, writes to `export.json_file` from the config.
pub fn run_export_json(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    query: Option<&str>,
) -> Result<()> {
    let envelope = records::load_corpus(input)?.filtered(query).into_envelope();
    let json = to_json(&envelope, config.export.pretty)?;

    let target = OutputTarget::resolve(output, Some(config.export.json_file.as_path()));
    write_output(&target, &json)?;

    let doc_count = envelope.data.len();
    let chunk_count = envelope.chunk_count();
    debug!(doc_count, chunk_count, "wrote export envelope");
    if let OutputTarget::File(path) = &target {
        eprintln!(
            "Exported {} documents, {} chunks to {}",
            doc_count,
            chunk_count,
            path.display()
        );
    }
    Ok(())
}

/// Write the CSV export for `input`.
///
/// With no `output`, writes to `export.csv_file` from the config.
pub fn run_export_csv(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    query: Option<&str>,
) -> Result<()> {
    let records = records::load_corpus(input)?.filtered(query).records();
    let csv = to_csv(&records);

    let target = OutputTarget::resolve(output, Some(config.export.csv_file.as_path()));
    write_output(&target, &csv)?;

    debug!(rows = records.len(), "wrote csv export");
    if let OutputTarget::File(path) = &target {
        eprintln!("Exported {} documents to {}", records.len(), path.display());
    }
    Ok(())
}
