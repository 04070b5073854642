//! Module defining the [`BenchmarkReader`] struct, a parser for PLU, PLA and
//! TT benchmark files.
//!
//! The reader owns a [`TruthTable`] and fills it one data line at a time:
//!
//! ```rust
//! use truthbench::BenchmarkReader;
//!
//! # fn main() -> truthbench::Result<()> {
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("add2.plu");
//! # std::fs::write(&path, ".i 2\n.o 1\n.p 1\n0 1 1\n.e\n").unwrap();
//! let mut reader = BenchmarkReader::new();
//! reader.read_file(&path)?;
//!
//! let table = reader.get_table();
//! assert_eq!(table.rows(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! One parse session owns one open file handle; the handle is dropped on
//! every exit path, including header failures halfway through. The source
//! must be seekable since keyword-scanned headers rewind to the start of the
//! file once per keyword.

pub mod error;
pub mod format;
mod header;
mod row;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Seek};
use std::path::Path;

use crate::table::TruthTable;

pub use error::{ReaderError, Result};
pub use format::Format;

use row::RowDecoder;

/// A file reader for PLU, PLA and TT benchmark files.
///
/// The file is validated, its format is determined from the extension, and
/// the matching reading procedure fills the owned [`TruthTable`]. Header
/// fields start out unset and only hold a value once the header declared
/// them.
///
/// A reader can be reused: every parse clears the table and the session
/// state first. A failed parse leaves the table in whatever partially-filled
/// state existed at the failure point, discard it.
#[derive(Debug, Default)]
pub struct BenchmarkReader {
    table: TruthTable,

    num_inputs: Option<usize>,
    num_outputs: Option<usize>,
    /// Product-term count, from a `.p` keyword line.
    num_terms: Option<usize>,
    /// Chunk count, from the third positional PLU header line.
    num_chunks: Option<usize>,
    model_name: Option<String>,

    /// Number of recognized header lines, skipped before the data-row scan.
    header_size: usize,
}

/// Reads the next line, without its trailing newline.
///
/// Returns [`None`] at end of file.
pub(crate) fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Validates the file before any read: non-empty path, existing readable
/// file, supported extension. Returns the detected format.
fn validate_file<P: AsRef<Path>>(path: P) -> Result<Format> {
    let path = path.as_ref();

    if path.as_os_str().is_empty() {
        return Err(ReaderError::EmptyPath);
    }

    // Existence (and the obvious permission failures) surface here as io
    // errors, before the extension is looked at.
    fs::metadata(path)?;

    Format::from_path(path)
}

impl BenchmarkReader {
    /// Creates a reader with an empty table and all header fields unset.
    pub fn new() -> Self {
        BenchmarkReader::default()
    }

    /// Reads a benchmark file, choosing the procedure from the extension.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let format = validate_file(&path)?;
        self.read(&path, format)
    }

    /// Reads a compressed PLU benchmark file.
    ///
    /// The header is the three positional lines: number of inputs, number of
    /// outputs, number of chunks. Data rows are whitespace-separated integer
    /// fields until the `.e` terminator.
    pub fn read_plu_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.read_as(path, Format::Plu)
    }

    /// Reads an uncompressed PLA benchmark file.
    ///
    /// The header is keyword-scanned (`.i`, `.o`, `.model`, `.p`, `.ilb`,
    /// `.ob`). Data rows are single-digit fields, not necessarily separated,
    /// until the `.e` terminator.
    pub fn read_pla_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.read_as(path, Format::Pla)
    }

    /// Reads a two-field TT benchmark file.
    ///
    /// The header is keyword-scanned like for PLA files. Each data row is an
    /// input bit-string and an output bit-string, until the `.end`
    /// terminator.
    pub fn read_tt_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.read_as(path, Format::Tt)
    }

    /// Validates that the file matches the expected format, then reads it.
    fn read_as<P: AsRef<Path>>(&mut self, path: P, expected: Format) -> Result<()> {
        let format = validate_file(&path)?;
        if format != expected {
            return Err(ReaderError::UnsupportedFormat(
                path.as_ref().display().to_string(),
            ));
        }
        self.read(&path, format)
    }

    fn read<P: AsRef<Path>>(&mut self, path: P, format: Format) -> Result<()> {
        log::debug!("reading {:?} file {}", format, path.as_ref().display());
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader, format)
    }

    /// Runs one parse session against an already-open seekable source.
    fn read_from<R: BufRead + Seek>(&mut self, reader: &mut R, format: Format) -> Result<()> {
        // Discard anything a previous session left behind.
        self.table.reset();
        self.num_inputs = None;
        self.num_outputs = None;
        self.num_terms = None;
        self.num_chunks = None;
        self.model_name = None;
        self.header_size = 0;

        self.table.set_compressed(format.is_compressed());

        match format {
            Format::Plu => {
                let [inputs, outputs, chunks] = header::read_fixed_header(reader)?;
                self.num_inputs = Some(inputs);
                self.num_outputs = Some(outputs);
                self.num_chunks = Some(chunks);
                // The three fixed reads advanced the cursor past the header.
                self.header_size = 3;
            }
            Format::Pla | Format::Tt => {
                self.read_header(reader)?;
                self.skip_header(reader)?;
            }
        }

        let num_inputs = self.num_inputs.ok_or_else(|| {
            ReaderError::MalformedHeader("number of inputs was never declared".to_string())
        })?;
        let num_outputs = self.num_outputs.ok_or_else(|| {
            ReaderError::MalformedHeader("number of outputs was never declared".to_string())
        })?;

        log::debug!(
            "header: {} inputs, {} outputs, {} header lines",
            num_inputs,
            num_outputs,
            self.header_size
        );

        self.read_rows(reader, format, num_inputs, num_outputs)
    }

    /// Hunts the keyword-scanned header fields, one keyword at a time.
    ///
    /// A missing keyword leaves its field unset without touching the header
    /// line count.
    fn read_header<R: BufRead + Seek>(&mut self, reader: &mut R) -> Result<()> {
        if let Some(inputs) = header::scan_count(reader, ".i")? {
            self.num_inputs = Some(inputs);
            self.header_size += 1;
        }

        if let Some(outputs) = header::scan_count(reader, ".o")? {
            self.num_outputs = Some(outputs);
            self.header_size += 1;
        }

        if let Some(model) = header::scan_scalar(reader, ".model")? {
            self.model_name = Some(model);
            self.header_size += 1;
        }

        if let Some(terms) = header::scan_count(reader, ".p")? {
            self.num_terms = Some(terms);
            self.header_size += 1;
        }

        let input_names = header::scan_list(reader, ".ilb")?;
        if !input_names.is_empty() {
            self.table.set_input_names(input_names);
            self.header_size += 1;
        }

        let output_names = header::scan_list(reader, ".ob")?;
        if !output_names.is_empty() {
            self.table.set_output_names(output_names);
            self.header_size += 1;
        }

        Ok(())
    }

    /// Positions the cursor on the first data row by skipping exactly the
    /// recognized header lines from the start of the file.
    fn skip_header<R: BufRead + Seek>(&mut self, reader: &mut R) -> Result<()> {
        reader.rewind()?;
        for _ in 0..self.header_size {
            if next_line(reader)?.is_none() {
                return Err(unexpected_eof());
            }
        }
        Ok(())
    }

    /// Scans data rows until the terminator line and appends each decoded
    /// pair to the table.
    fn read_rows<R: BufRead>(
        &mut self,
        reader: &mut R,
        format: Format,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Result<()> {
        let decoder = RowDecoder::for_format(format);
        let terminator = format.terminator();
        let mut row = 0;

        loop {
            let line = next_line(reader)?.ok_or_else(unexpected_eof)?;
            if line == terminator {
                break;
            }

            let (inputs, outputs) = decoder.decode(&line, row, num_inputs, num_outputs)?;
            self.table.append_inputs(inputs);
            self.table.append_outputs(outputs);
            row += 1;
        }

        log::debug!("read {} data rows", row);
        Ok(())
    }

    /// Returns the truth table populated by the last parse.
    pub fn get_table(&self) -> &TruthTable {
        &self.table
    }

    /// Consumes the reader and returns the table.
    pub fn into_table(self) -> TruthTable {
        self.table
    }

    /// Returns the number of inputs, if the header declared it.
    pub fn get_num_inputs(&self) -> Option<usize> {
        self.num_inputs
    }

    /// Returns the number of outputs, if the header declared it.
    pub fn get_num_outputs(&self) -> Option<usize> {
        self.num_outputs
    }

    /// Returns the product-term count of a `.p` header line.
    pub fn get_num_terms(&self) -> Option<usize> {
        self.num_terms
    }

    /// Returns the chunk count of a compressed table.
    pub fn get_num_chunks(&self) -> Option<usize> {
        self.num_chunks
    }

    /// Returns the model name of a `.model` header line.
    pub fn get_model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    /// Renders the header fields found by the last parse, one line per
    /// present field. Unset fields are left out entirely.
    pub fn header_summary(&self) -> String {
        let mut out = String::new();

        if let Some(model) = &self.model_name {
            out.push_str(&format!("Model: {}\n", model));
        }
        if let Some(inputs) = self.num_inputs {
            out.push_str(&format!("Inputs: {}\n", inputs));
        }
        if let Some(outputs) = self.num_outputs {
            out.push_str(&format!("Outputs: {}\n", outputs));
        }
        if let Some(terms) = self.num_terms {
            out.push_str(&format!("Product terms: {}\n", terms));
        }
        if let Some(chunks) = self.num_chunks {
            out.push_str(&format!("Chunks: {}\n", chunks));
        }
        if !self.table.get_input_names().is_empty() {
            out.push_str(&format!(
                "Input names: {}\n",
                self.table.get_input_names().join(" ")
            ));
        }
        if !self.table.get_output_names().is_empty() {
            out.push_str(&format!(
                "Output names: {}\n",
                self.table.get_output_names().join(" ")
            ));
        }

        out
    }
}

fn unexpected_eof() -> ReaderError {
    ReaderError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "file ends before the terminator line",
    ))
}
