//! Error types for docmeta.

use thiserror::Error;

/// Errors raised while decoding interchange payloads.
///
/// Aggregation, ranking, and bucketing never fail on well-formed records,
/// so they have no variants here.
#[derive(Error, Debug)]
pub enum Error {
    /// Uploaded import text is not valid JSON.
    #[error("Invalid JSON file")]
    Format(#[source] serde_json::Error),

    /// The `data` field of an import envelope is not a list.
    #[error("data must be a list")]
    DataNotList,

    /// One element of an import envelope could not be read as a record.
    #[error("invalid import item at index {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// CSV text is not well-formed.
    #[error("csv error on line {line}: {message}")]
    Csv { line: usize, message: String },
}

/// Result type alias for docmeta operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::Format(parse_err);
        assert_eq!(err.to_string(), "Invalid JSON file");
    }

    #[test]
    fn test_data_not_list_display() {
        assert_eq!(Error::DataNotList.to_string(), "data must be a list");
    }

    #[test]
    fn test_csv_error_display() {
        let err = Error::Csv {
            line: 3,
            message: "unterminated quoted field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "csv error on line 3: unterminated quoted field"
        );
    }
}
