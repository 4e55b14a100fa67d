//! Flattened CSV export of a record collection.
//!
//! Every text column is wrapped in double quotes with internal quotes
//! doubled; the size column is emitted bare (empty when the size is
//! absent). Rows are joined with `\n` and there is no trailing newline.
//!
//! [`parse_csv`] reads back exactly this dialect, so anything written by
//! [`to_csv`] parses to the same field values.

use crate::error::{Error, Result};
use crate::models::DocumentRecord;

/// Column names of the header row, in output order.
pub const CSV_HEADER: [&str; 8] = [
    "Name",
    "Description",
    "Type",
    "Project",
    "Contractor",
    "Modified",
    "Size",
    "Path",
];

/// Index of the unquoted size column.
pub const SIZE_COLUMN: usize = 6;

/// Quote a text field, doubling any embedded quotes.
pub fn escape_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(record: &DocumentRecord) -> String {
    [
        escape_field(&record.file_name),
        escape_field(&record.description),
        escape_field(&record.file_type),
        escape_field(&record.project),
        escape_field(&record.contractor),
        escape_field(record.modified_at.as_deref().unwrap_or_default()),
        record.size_bytes.map(|n| n.to_string()).unwrap_or_default(),
        escape_field(&record.file_path),
    ]
    .join(",")
}

/// Serialize records to CSV, header first, rows in input order.
pub fn to_csv(records: &[DocumentRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));
    lines.extend(records.iter().map(csv_row));
    lines.join("\n")
}

/// Parse CSV text into rows of unescaped fields.
///
/// Accepts quoted fields containing commas, newlines, and doubled quotes,
/// and both `\n` and `\r\n` row separators. A single trailing newline does
/// not produce an empty final row.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    if text.is_empty() {
        return Ok(rows);
    }

    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut closed_quote = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    closed_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
                closed_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                line += 1;
                at_field_start = true;
                closed_quote = false;
            }
            '"' => {
                return Err(Error::Csv {
                    line,
                    message: "unexpected quote in unquoted field".to_string(),
                })
            }
            _ if closed_quote => {
                return Err(Error::Csv {
                    line,
                    message: "unexpected character after closing quote".to_string(),
                })
            }
            _ => {
                field.push(c);
                at_field_start = false;
            }
        }
    }

    if in_quotes {
        return Err(Error::Csv {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }

    let trailing_newline = row.is_empty() && field.is_empty() && at_field_start;
    if !trailing_newline {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
