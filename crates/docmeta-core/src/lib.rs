//! # docmeta core
//!
//! Pure, I/O-free logic for working with collections of document-metadata
//! records: grouping and ranking them into report views for visualization,
//! and converting them to and from the JSON/CSV interchange formats used by
//! the document store's export and bulk-import endpoints.
//!
//! This crate contains no filesystem access, no logging, and no shared
//! state. Every function is a deterministic transformation of its inputs.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Record types and lenient field decoding |
//! | [`tokenize`] | Lowercase word tokens with stopword filtering |
//! | [`aggregate`] | Insertion-ordered group sums and counts |
//! | [`rank`] | Stable top-N ranking |
//! | [`timeline`] | Calendar-day bucketing |
//! | [`csv`] | CSV export and the matching reader |
//! | [`interchange`] | JSON export envelope and import normalization |
//! | [`analytics`] | The report views shown on the dashboard |
//! | [`error`] | Error type |

pub mod aggregate;
pub mod analytics;
pub mod csv;
pub mod error;
pub mod interchange;
pub mod models;
pub mod rank;
pub mod timeline;
pub mod tokenize;

pub use error::{Error, Result};
