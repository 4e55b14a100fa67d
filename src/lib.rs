//! # docmeta
//!
//! Analytics and interchange for the metadata of an indexed document corpus.
//!
//! docmeta reads the record collections a document-indexing store hands out
//! (list-documents responses and export envelopes), turns them into the
//! dashboard views (file types by size, top projects and contractors, top
//! description words, files modified per day), and converts them to and from
//! the store's JSON export envelope and a flattened CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌─────────────────┐
//! │ store files  │──▶│  docmeta-core     │──▶│ report views     │
//! │ list/export  │   │ aggregate · rank  │   │ JSON / CSV files │
//! └──────────────┘   │ timeline · codecs │   └─────────────────┘
//!                    └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! docmeta stats documents.json            # dashboard views
//! docmeta export-csv documents.json       # write database.csv
//! docmeta export-json documents.json      # write database-export.json
//! docmeta import upload.json -o body.json # normalize an upload
//! docmeta summary response.json           # print import counts
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | Tracing subscriber setup |
//! | [`records`] | Loading record files |
//! | [`stats`] | Report rendering |
//! | [`export`] | JSON and CSV export |
//! | [`import`] | Upload normalization and import summaries |

pub mod config;
pub mod export;
pub mod import;
pub mod logging;
pub mod records;
pub mod stats;
