//! # docmeta CLI
//!
//! The `docmeta` binary reports on and converts document-metadata files
//! produced by the document store.
//!
//! ## Usage
//!
//! ```bash
//! docmeta --config ./config/docmeta.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docmeta stats <input>` | Print totals and the dashboard views |
//! | `docmeta export-json <input>` | Write the JSON export envelope |
//! | `docmeta export-csv <input>` | Write the flattened CSV |
//! | `docmeta import <upload>` | Normalize an upload into the import body |
//! | `docmeta summary <response>` | Print a bulk-import result |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docmeta::{config, export, import, logging, stats};

/// docmeta: analytics and JSON/CSV interchange for document metadata.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "docmeta",
    about = "docmeta: analytics and JSON/CSV interchange for document metadata",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/docmeta.toml")]
    config: PathBuf,

    /// Log at debug level regardless of configuration.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print collection totals and the dashboard views.
    ///
    /// Input may be a list-documents response, an export envelope, or a
    /// bare array of records.
    Stats {
        /// Record file.
        input: PathBuf,

        /// Only include records whose name, description, project, or
        /// contractor contains this text (case-insensitive).
        #[arg(long)]
        query: Option<String>,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Write the JSON export envelope.
    ExportJson {
        /// Record file.
        input: PathBuf,

        /// Output path; `-` for stdout. Defaults to `export.json_file`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only export records matching this text.
        #[arg(long)]
        query: Option<String>,
    },

    /// Write the flattened CSV export.
    ExportCsv {
        /// Record file.
        input: PathBuf,

        /// Output path; `-` for stdout. Defaults to `export.csv_file`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only export records matching this text.
        #[arg(long)]
        query: Option<String>,
    },

    /// Normalize an uploaded JSON file into the bulk-import body.
    ///
    /// Fails with "Invalid JSON file" on malformed JSON. Uploads that are
    /// neither an envelope nor a list normalize to an empty import.
    Import {
        /// Uploaded JSON file.
        input: PathBuf,

        /// Output path for the import body; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the counts from a bulk-import response.
    Summary {
        /// Import response JSON file.
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_or_default(&cli.config)?;
    logging::init_tracing(&cfg.logging, cli.verbose);

    match cli.command {
        Commands::Stats { input, query, json } => {
            stats::run_stats(&cfg, &input, query.as_deref(), json)?;
        }
        Commands::ExportJson {
            input,
            output,
            query,
        } => {
            export::run_export_json(&cfg, &input, output.as_deref(), query.as_deref())?;
        }
        Commands::ExportCsv {
            input,
            output,
            query,
        } => {
            export::run_export_csv(&cfg, &input, output.as_deref(), query.as_deref())?;
        }
        Commands::Import { input, output } => {
            import::run_import(&cfg, &input, output.as_deref())?;
        }
        Commands::Summary { input } => {
            import::run_summary(&input)?;
        }
    }

    Ok(())
}
