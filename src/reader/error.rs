use std::io;

use thiserror::Error;

/// The result of a reader operation.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Error returned when reading a benchmark file failed.
///
/// Data-format failures carry enough context to locate the offending line.
/// Contract violations on the table itself (empty rows, bad indices) are not
/// represented here - those are programmer errors and panic instead.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The file path is an empty string.
    #[error("file path is empty")]
    EmptyPath,

    /// The file extension matches none of the supported formats
    /// (`.plu`, `.pla`, `.tt`).
    #[error("unsupported benchmark format: {0}")]
    UnsupportedFormat(String),

    /// A header line does not have the expected token shape.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A data line holds a non-numeric token or more tokens than the header
    /// declared. The row index is 0-based.
    #[error("malformed row {row}: invalid token `{token}`")]
    MalformedRow { row: usize, token: String },

    /// A data line holds fewer values than the header declared. The row index
    /// is 0-based.
    #[error("truncated row {row}: expected {expected} values, got {got}")]
    TruncatedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// An IO error occured (file doesn't exist, can't be read, ends before
    /// the terminator line, ...).
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
