//! Per-format data-row tokenization.
//!
//! The three strategies form a closed set, selected once per parse session
//! from the detected [`Format`] so the scan loop stays free of format checks.

use crate::reader::error::{ReaderError, Result};
use crate::reader::format::Format;
use crate::table::Value;

/// Decodes one data line into an input row and an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RowDecoder {
    /// PLU: whitespace-separated integer tokens, possibly many bits each.
    Compressed,
    /// PLA: single decimal digits with no guaranteed separators.
    SingleChar,
    /// TT: exactly two tokens, an input bit-string and an output bit-string.
    TwoField,
}

impl RowDecoder {
    pub(super) fn for_format(format: Format) -> Self {
        match format {
            Format::Plu => RowDecoder::Compressed,
            Format::Pla => RowDecoder::SingleChar,
            Format::Tt => RowDecoder::TwoField,
        }
    }

    /// Decodes `line` into `(inputs, outputs)`.
    ///
    /// `row` is the 0-based index of the line within the data section, used
    /// for diagnostics only. The returned rows always have exactly
    /// `num_inputs` and `num_outputs` values.
    pub(super) fn decode(
        &self,
        line: &str,
        row: usize,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Result<(Vec<Value>, Vec<Value>)> {
        match self {
            RowDecoder::Compressed => decode_compressed(line, row, num_inputs, num_outputs),
            RowDecoder::SingleChar => decode_single_char(line, row, num_inputs, num_outputs),
            RowDecoder::TwoField => decode_two_field(line, row, num_inputs, num_outputs),
        }
    }
}

fn read_value(token: &str, row: usize) -> Result<Value> {
    token.parse::<Value>().map_err(|_| ReaderError::MalformedRow {
        row,
        token: token.to_string(),
    })
}

fn read_digit(c: char, row: usize) -> Result<Value> {
    c.to_digit(10)
        .map(Value::from)
        .ok_or_else(|| ReaderError::MalformedRow {
            row,
            token: c.to_string(),
        })
}

/// Splits `values` into an input row and an output row by position: the
/// first `num_inputs` values are inputs, the rest are outputs.
fn split_row(values: Vec<Value>, num_inputs: usize) -> (Vec<Value>, Vec<Value>) {
    let mut inputs = values;
    let outputs = inputs.split_off(num_inputs);
    (inputs, outputs)
}

/// Checks the decoded value count against the declared column counts.
fn check_width(
    tokens: &[String],
    row: usize,
    num_inputs: usize,
    num_outputs: usize,
) -> Result<()> {
    let expected = num_inputs + num_outputs;
    if tokens.len() < expected {
        return Err(ReaderError::TruncatedRow {
            row,
            expected,
            got: tokens.len(),
        });
    }
    if tokens.len() > expected {
        // The first surplus token identifies the overflow.
        return Err(ReaderError::MalformedRow {
            row,
            token: tokens[expected].clone(),
        });
    }
    Ok(())
}

/// Every field is separated by at least one whitespace, so the default
/// whitespace split applies.
fn decode_compressed(
    line: &str,
    row: usize,
    num_inputs: usize,
    num_outputs: usize,
) -> Result<(Vec<Value>, Vec<Value>)> {
    let tokens = line
        .split_whitespace()
        .map(|t| t.to_string())
        .collect::<Vec<String>>();

    check_width(&tokens, row, num_inputs, num_outputs)?;

    let values = tokens
        .iter()
        .map(|token| read_value(token, row))
        .collect::<Result<Vec<Value>>>()?;

    Ok(split_row(values, num_inputs))
}

/// Not every field is separated by whitespace, so the line is stripped of
/// whitespace first and then split into individual characters.
fn decode_single_char(
    line: &str,
    row: usize,
    num_inputs: usize,
    num_outputs: usize,
) -> Result<(Vec<Value>, Vec<Value>)> {
    let tokens = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_string())
        .collect::<Vec<String>>();

    check_width(&tokens, row, num_inputs, num_outputs)?;

    let values = tokens
        .iter()
        .map(|token| read_value(token, row))
        .collect::<Result<Vec<Value>>>()?;

    Ok(split_row(values, num_inputs))
}

/// Exactly two bit-strings: character `i` of the first is input `i`,
/// character `i` of the second is output `i`. Characters beyond the declared
/// counts are ignored.
fn decode_two_field(
    line: &str,
    row: usize,
    num_inputs: usize,
    num_outputs: usize,
) -> Result<(Vec<Value>, Vec<Value>)> {
    let tokens = line.split_whitespace().collect::<Vec<&str>>();

    if tokens.len() < 2 {
        return Err(ReaderError::TruncatedRow {
            row,
            expected: 2,
            got: tokens.len(),
        });
    }
    if tokens.len() > 2 {
        return Err(ReaderError::MalformedRow {
            row,
            token: tokens[2].to_string(),
        });
    }

    let inputs = read_bits(tokens[0], row, num_inputs)?;
    let outputs = read_bits(tokens[1], row, num_outputs)?;
    Ok((inputs, outputs))
}

fn read_bits(token: &str, row: usize, count: usize) -> Result<Vec<Value>> {
    let chars = token.chars().collect::<Vec<char>>();

    if chars.len() < count {
        return Err(ReaderError::TruncatedRow {
            row,
            expected: count,
            got: chars.len(),
        });
    }

    chars[..count]
        .iter()
        .map(|&c| read_digit(c, row))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_compressed_test() {
        let decoder = RowDecoder::for_format(Format::Plu);

        assert_eq!(
            decoder.decode("0 1 1", 0, 2, 1).unwrap(),
            (vec![0, 1], vec![1])
        );
        // Multi-digit fields are the point of the compressed format.
        assert_eq!(
            decoder.decode("4294901760 65535   252645135", 0, 2, 1).unwrap(),
            (vec![4294901760, 65535], vec![252645135])
        );
        assert_eq!(
            decoder.decode("  7 0 9  ", 3, 1, 2).unwrap(),
            (vec![7], vec![0, 9])
        );
    }

    #[test]
    fn decode_compressed_test_errors() {
        let decoder = RowDecoder::Compressed;

        assert!(matches!(
            decoder.decode("0 1", 4, 2, 1),
            Err(ReaderError::TruncatedRow {
                row: 4,
                expected: 3,
                got: 2
            })
        ));
        assert!(matches!(
            decoder.decode("0 1 1 1", 0, 2, 1),
            Err(ReaderError::MalformedRow { row: 0, .. })
        ));
        assert!(matches!(
            decoder.decode("0 x 1", 2, 2, 1),
            Err(ReaderError::MalformedRow { row: 2, .. })
        ));
        assert!(matches!(
            decoder.decode("", 0, 2, 1),
            Err(ReaderError::TruncatedRow { got: 0, .. })
        ));
    }

    #[test]
    fn decode_single_char_test() {
        let decoder = RowDecoder::for_format(Format::Pla);

        // Separators between the fields are optional.
        assert_eq!(
            decoder.decode("011", 0, 2, 1).unwrap(),
            (vec![0, 1], vec![1])
        );
        assert_eq!(
            decoder.decode("0 1   1", 0, 2, 1).unwrap(),
            (vec![0, 1], vec![1])
        );
        assert_eq!(
            decoder.decode("1 10", 0, 1, 2).unwrap(),
            (vec![1], vec![1, 0])
        );
    }

    #[test]
    fn decode_single_char_test_errors() {
        let decoder = RowDecoder::SingleChar;

        assert!(matches!(
            decoder.decode("01", 0, 2, 1),
            Err(ReaderError::TruncatedRow { .. })
        ));
        assert!(matches!(
            decoder.decode("0111", 0, 2, 1),
            Err(ReaderError::MalformedRow { .. })
        ));
        assert!(matches!(
            decoder.decode("0x1", 5, 2, 1),
            Err(ReaderError::MalformedRow { row: 5, .. })
        ));
    }

    #[test]
    fn decode_two_field_test() {
        let decoder = RowDecoder::for_format(Format::Tt);

        assert_eq!(
            decoder.decode("011 1", 0, 3, 1).unwrap(),
            (vec![0, 1, 1], vec![1])
        );
        assert_eq!(
            decoder.decode("  10  01  ", 0, 2, 2).unwrap(),
            (vec![1, 0], vec![0, 1])
        );
        // Characters beyond the declared counts are ignored.
        assert_eq!(
            decoder.decode("0110 11", 0, 3, 1).unwrap(),
            (vec![0, 1, 1], vec![1])
        );
    }

    #[test]
    fn decode_two_field_test_errors() {
        let decoder = RowDecoder::TwoField;

        assert!(matches!(
            decoder.decode("011", 0, 3, 1),
            Err(ReaderError::TruncatedRow {
                expected: 2,
                got: 1,
                ..
            })
        ));
        assert!(matches!(
            decoder.decode("011 1 0", 0, 3, 1),
            Err(ReaderError::MalformedRow { .. })
        ));
        // Input bit-string shorter than the declared input count.
        assert!(matches!(
            decoder.decode("01 1", 0, 3, 1),
            Err(ReaderError::TruncatedRow {
                expected: 3,
                got: 2,
                ..
            })
        ));
        assert!(matches!(
            decoder.decode("0a1 1", 0, 3, 1),
            Err(ReaderError::MalformedRow { .. })
        ));
    }
}
