use std::path::Path;

use crate::reader::error::{ReaderError, Result};

/// The benchmark file formats the reader understands.
///
/// The format is derived from the file extension alone, the file content is
/// never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Compressed truth table: whitespace-separated integer fields, chunk
    /// counts declared positionally in the first three header lines,
    /// terminated by a `.e` line.
    Plu,
    /// Uncompressed truth table: single-character fields with no guaranteed
    /// separators, keyword header, terminated by a `.e` line.
    Pla,
    /// Two-field truth table: one input bit-string and one output bit-string
    /// per line, keyword header, terminated by a `.end` line.
    Tt,
}

impl Format {
    /// Derives the format from the lower-cased file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("plu") => Ok(Format::Plu),
            Some("pla") => Ok(Format::Pla),
            Some("tt") => Ok(Format::Tt),
            _ => Err(ReaderError::UnsupportedFormat(
                path.as_ref().display().to_string(),
            )),
        }
    }

    /// The line that ends the data-row section for this format.
    pub(crate) fn terminator(&self) -> &'static str {
        match self {
            Format::Plu | Format::Pla => ".e",
            Format::Tt => ".end",
        }
    }

    /// Whether the format stores compressed (multi-bit integer) fields.
    pub(crate) fn is_compressed(&self) -> bool {
        matches!(self, Format::Plu)
    }
}
