//! Module defining the [`TruthTable`] struct, the in-memory model populated by
//! [`crate::reader::BenchmarkReader`].
//!
//! A table is a pair of row-aligned 2D collections: one inner vector of input
//! values and one inner vector of output values per row. The same container is
//! used for compressed tables (PLU chunks, multi-bit integer fields) and
//! uncompressed ones (single-digit fields), distinguished by the `compressed`
//! flag.

use std::fmt::{self, Display, Write};

/// A single table cell.
///
/// Compressed (PLU) fields pack many bits into one integer, so the cell type
/// must hold large values. Uncompressed fields are single decimal digits and
/// fit trivially.
pub type Value = u64;

/// A truth table storing input and output rows.
///
/// Rows are kept in file order: row `i` of the inputs is paired with row `i`
/// of the outputs. After a complete parse both collections have the same
/// length; the appenders take rows by value so the table never aliases a
/// parser scratch buffer.
///
/// Violating a contract of this struct (appending an empty row, indexing out
/// of range, dumping a malformed table) is a programmer error and panics. Bad
/// *file* content is reported by the reader as [`ReaderError`] instead.
///
/// [`ReaderError`]: crate::reader::ReaderError
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruthTable {
    inputs: Vec<Vec<Value>>,
    outputs: Vec<Vec<Value>>,

    input_names: Vec<String>,
    output_names: Vec<String>,

    compressed: bool,
}

impl TruthTable {
    /// Creates an empty, uncompressed table.
    pub fn new() -> Self {
        TruthTable::default()
    }

    /// Removes all input and output rows.
    ///
    /// Column names and the compressed flag are kept, see [`TruthTable::reset`]
    /// to discard those too.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.outputs.clear();
    }

    /// Puts the table back into its freshly-constructed state: no rows, no
    /// column names, uncompressed.
    pub fn reset(&mut self) {
        self.clear();
        self.input_names.clear();
        self.output_names.clear();
        self.compressed = false;
    }

    /// Returns the number of rows of the table.
    pub fn rows(&self) -> usize {
        self.inputs.len()
    }

    /// Appends an input row.
    ///
    /// Panics if the row is empty - the reader never produces one.
    pub fn append_inputs(&mut self, row: Vec<Value>) {
        assert!(!row.is_empty(), "input row is empty");
        self.inputs.push(row);
    }

    /// Appends an output row.
    ///
    /// Panics if the row is empty - the reader never produces one.
    pub fn append_outputs(&mut self, row: Vec<Value>) {
        assert!(!row.is_empty(), "output row is empty");
        self.outputs.push(row);
    }

    /// Returns the input row at the given index.
    ///
    /// Panics if the index is out of range.
    pub fn get_inputs_at(&self, index: usize) -> &[Value] {
        assert!(index < self.inputs.len(), "input row index out of range");
        &self.inputs[index]
    }

    /// Returns the output row at the given index.
    ///
    /// Panics if the index is out of range.
    pub fn get_outputs_at(&self, index: usize) -> &[Value] {
        assert!(index < self.outputs.len(), "output row index out of range");
        &self.outputs[index]
    }

    /// Returns all input rows.
    pub fn get_inputs(&self) -> &[Vec<Value>] {
        &self.inputs
    }

    /// Returns all output rows.
    pub fn get_outputs(&self) -> &[Vec<Value>] {
        &self.outputs
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
    }

    pub fn get_input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn set_input_names(&mut self, names: Vec<String>) {
        self.input_names = names;
    }

    pub fn get_output_names(&self) -> &[String] {
        &self.output_names
    }

    pub fn set_output_names(&mut self, names: Vec<String>) {
        self.output_names = names;
    }

    /// Renders the table row-wise without any header.
    ///
    /// Input values are space-separated, then a three-space gap, then the
    /// space-separated output values - one line per row. The dump is a
    /// deterministic function of the stored rows.
    ///
    /// Panics if the table has no rows or if the input and output dimensions
    /// do not match. A table in such a state comes from a parse that was
    /// aborted halfway, this function does not try to fix it up.
    pub fn dump(&self) -> String {
        assert!(!self.inputs.is_empty(), "no input rows stored in the table");
        assert!(
            !self.outputs.is_empty(),
            "no output rows stored in the table"
        );
        assert!(
            self.inputs.len() == self.outputs.len(),
            "input and output dimensions do not match"
        );

        let mut out = String::new();
        for (input_row, output_row) in self.inputs.iter().zip(&self.outputs) {
            let inputs = join_values(input_row);
            let outputs = join_values(output_row);
            writeln!(out, "{}   {}", inputs, outputs).unwrap();
        }
        out
    }

    /// Fills the input rows with all `2^n` binary combinations, in ascending
    /// binary order with the leftmost column as the most significant bit.
    ///
    /// Any previously stored input rows are replaced.
    pub fn generate_inputs(&mut self, num_inputs: usize) {
        let rows = 1usize << num_inputs;
        self.inputs = (0..rows)
            .map(|row| {
                (0..num_inputs)
                    .map(|col| ((row >> (num_inputs - 1 - col)) & 1) as Value)
                    .collect()
            })
            .collect();
    }

    /// Fills the output rows with zeros, `num_rows` rows of `num_outputs`
    /// columns each. Any previously stored output rows are replaced.
    pub fn init_outputs(&mut self, num_outputs: usize, num_rows: usize) {
        self.outputs = vec![vec![0; num_outputs]; num_rows];
    }

    /// Overwrites a single output cell.
    ///
    /// Panics if the position is out of range.
    pub fn set_output_at(&mut self, row: usize, col: usize, value: Value) {
        assert!(row < self.outputs.len(), "output row index out of range");
        assert!(
            col < self.outputs[row].len(),
            "output column index out of range"
        );
        self.outputs[row][col] = value;
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dump())
    }
}

fn join_values(row: &[Value]) -> String {
    row.iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn append_and_access_test() {
        let mut table = TruthTable::new();
        table.append_inputs(vec![0, 1]);
        table.append_outputs(vec![1]);
        table.append_inputs(vec![1, 1]);
        table.append_outputs(vec![0]);

        assert_eq!(table.rows(), 2);
        assert_eq!(table.get_inputs_at(0), &[0, 1]);
        assert_eq!(table.get_outputs_at(0), &[1]);
        assert_eq!(table.get_inputs_at(1), &[1, 1]);
        assert_eq!(table.get_outputs_at(1), &[0]);
    }

    #[test]
    #[should_panic]
    fn append_inputs_test_empty_row() {
        let mut table = TruthTable::new();
        table.append_inputs(vec![]);
    }

    #[test]
    #[should_panic]
    fn append_outputs_test_empty_row() {
        let mut table = TruthTable::new();
        table.append_outputs(vec![]);
    }

    #[test]
    #[should_panic]
    fn inputs_at_test_out_of_range() {
        let mut table = TruthTable::new();
        table.append_inputs(vec![1]);
        table.get_inputs_at(1);
    }

    #[test]
    fn clear_test() {
        let mut table = TruthTable::new();
        table.append_inputs(vec![1]);
        table.append_outputs(vec![0]);
        table.set_compressed(true);
        table.set_input_names(vec!["a".to_string()]);

        table.clear();
        assert_eq!(table.rows(), 0);
        // Clear only touches the rows.
        assert!(table.is_compressed());
        assert_eq!(table.get_input_names(), ["a".to_string()]);

        table.reset();
        assert!(!table.is_compressed());
        assert!(table.get_input_names().is_empty());
    }

    #[test]
    fn dump_test() {
        let mut table = TruthTable::new();
        table.append_inputs(vec![0, 1, 1]);
        table.append_outputs(vec![1, 0]);
        table.append_inputs(vec![1, 0, 0]);
        table.append_outputs(vec![0, 1]);

        assert_eq!(table.dump(), "0 1 1   1 0\n1 0 0   0 1\n");
        assert_eq!(table.to_string(), table.dump());
    }

    #[test]
    fn dump_test_compressed_values() {
        let mut table = TruthTable::new();
        table.set_compressed(true);
        table.append_inputs(vec![4294901760, 65535]);
        table.append_outputs(vec![252645135]);

        assert_eq!(table.dump(), "4294901760 65535   252645135\n");
    }

    #[test]
    #[should_panic]
    fn dump_test_empty() {
        let table = TruthTable::new();
        table.dump();
    }

    #[test]
    #[should_panic]
    fn dump_test_mismatched_dimensions() {
        let mut table = TruthTable::new();
        table.append_inputs(vec![0]);
        table.append_inputs(vec![1]);
        table.append_outputs(vec![1]);
        table.dump();
    }

    #[test]
    fn generate_inputs_test() {
        let mut table = TruthTable::new();
        table.generate_inputs(2);

        assert_eq!(
            table.get_inputs(),
            &[vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn init_outputs_test() {
        let mut table = TruthTable::new();
        table.generate_inputs(2);
        table.init_outputs(1, 4);

        assert_eq!(table.rows(), 4);
        assert_eq!(table.get_outputs_at(3), &[0]);

        table.set_output_at(3, 0, 1);
        assert_eq!(table.get_outputs_at(3), &[1]);
    }

    #[test]
    #[should_panic]
    fn set_output_at_test_out_of_range() {
        let mut table = TruthTable::new();
        table.init_outputs(1, 2);
        table.set_output_at(2, 0, 1);
    }
}
