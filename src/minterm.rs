//! Minterm matching against decoded input rows.
//!
//! A minterm fixes some input positions to concrete digits and leaves the
//! rest as don't-cares. Downstream minimization passes use minterms to test
//! which table rows drive a given output column.

use crate::table::Value;

/// A product term over the input columns, tied to one output column.
///
/// Each position is either a fixed digit or a don't-care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minterm {
    term: Vec<Option<Value>>,
    output_index: usize,
}

impl Minterm {
    /// Creates a minterm of `num_inputs` don't-care positions for the given
    /// output column.
    pub fn new(num_inputs: usize, output_index: usize) -> Self {
        Minterm {
            term: vec![None; num_inputs],
            output_index,
        }
    }

    /// Parses a minterm from a pattern string where each character is a
    /// decimal digit or `-` for don't-care.
    ///
    /// Returns [`None`] on any other character.
    pub fn from_pattern(pattern: &str, output_index: usize) -> Option<Self> {
        let term = pattern
            .chars()
            .map(|c| match c {
                '-' => Some(None),
                _ => c.to_digit(10).map(|d| Some(Value::from(d))),
            })
            .collect::<Option<Vec<Option<Value>>>>()?;

        Some(Minterm { term, output_index })
    }

    /// Returns the number of input positions of the term.
    pub fn num_inputs(&self) -> usize {
        self.term.len()
    }

    /// Returns the output column the term belongs to.
    pub fn get_output_index(&self) -> usize {
        self.output_index
    }

    /// Overwrites the term positions.
    ///
    /// Panics if the length does not match the term.
    pub fn set_term(&mut self, term: Vec<Option<Value>>) {
        assert!(
            term.len() == self.term.len(),
            "term length does not match the number of inputs"
        );
        self.term = term;
    }

    /// Checks the term against an input row: true when every fixed position
    /// equals the row's value at that position.
    ///
    /// Panics if the row length does not match the term.
    pub fn matches(&self, row: &[Value]) -> bool {
        assert!(
            row.len() == self.term.len(),
            "row length does not match the number of inputs"
        );
        self.term
            .iter()
            .zip(row)
            .all(|(position, value)| match position {
                None => true,
                Some(fixed) => fixed == value,
            })
    }
}
