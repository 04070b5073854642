//! The two header strategies.
//!
//! Keyword-scanned headers (PLA, TT) are hunted one keyword at a time: each
//! lookup rewinds to the start of the file and scans forward until a line
//! whose *first* whitespace-delimited token equals the keyword. Anchoring on
//! the first token matters: a plain substring test would resolve `.i` inside
//! an `.ilb` line.
//!
//! Fixed-position headers (PLU) are exactly three lines, each carrying its
//! value after the last space of the line.

use std::io::{BufRead, Seek};

use crate::reader::error::{ReaderError, Result};
use crate::reader::next_line;

/// Scans for a scalar keyword line (`<keyword> <value>`) and returns the
/// value token.
///
/// Returns [`None`] if no line carries the keyword - a missing header field
/// is not an error. A matching line with any other token count is malformed.
pub(super) fn scan_scalar<R: BufRead + Seek>(
    reader: &mut R,
    keyword: &str,
) -> Result<Option<String>> {
    reader.rewind()?;

    while let Some(line) = next_line(reader)? {
        let tokens = line.split_whitespace().collect::<Vec<&str>>();

        if tokens.first() == Some(&keyword) {
            if tokens.len() != 2 {
                return Err(ReaderError::MalformedHeader(format!(
                    "expected `{} <value>`, got `{}`",
                    keyword,
                    line.trim()
                )));
            }
            return Ok(Some(tokens[1].to_string()));
        }
    }
    Ok(None)
}

/// Scans for a scalar keyword line holding an integer value.
pub(super) fn scan_count<R: BufRead + Seek>(
    reader: &mut R,
    keyword: &str,
) -> Result<Option<usize>> {
    match scan_scalar(reader, keyword)? {
        None => Ok(None),
        Some(value) => {
            let count = value.parse::<usize>().map_err(|_| {
                ReaderError::MalformedHeader(format!(
                    "expected integer after `{}`, got `{}`",
                    keyword, value
                ))
            })?;
            Ok(Some(count))
        }
    }
}

/// Scans for a list keyword line (`<keyword> <name>...`) and collects every
/// token after the keyword, in order.
///
/// Returns an empty list if no line carries the keyword. The first matching
/// line wins.
pub(super) fn scan_list<R: BufRead + Seek>(reader: &mut R, keyword: &str) -> Result<Vec<String>> {
    reader.rewind()?;

    while let Some(line) = next_line(reader)? {
        let mut tokens = line.split_whitespace();

        if tokens.next() == Some(keyword) {
            return Ok(tokens.map(|name| name.to_string()).collect());
        }
    }
    Ok(Vec::new())
}

/// Reads the three positional PLU header lines: input count, output count,
/// chunk count.
///
/// Each value is the substring after the last space of its line. A line with
/// no space, or with a non-integer trailing token, is malformed.
pub(super) fn read_fixed_header<R: BufRead>(reader: &mut R) -> Result<[usize; 3]> {
    let mut header = [0; 3];

    for field in header.iter_mut() {
        let line = next_line(reader)?.ok_or_else(|| {
            ReaderError::MalformedHeader("file ends inside the header".to_string())
        })?;

        let pos = line.rfind(' ').ok_or_else(|| {
            ReaderError::MalformedHeader(format!("expected `<label> <count>`, got `{}`", line))
        })?;

        *field = line[pos + 1..].parse::<usize>().map_err(|_| {
            ReaderError::MalformedHeader(format!(
                "expected integer after `{}`, got `{}`",
                &line[..pos],
                &line[pos + 1..]
            ))
        })?;
    }
    Ok(header)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn scan_scalar_test() {
        let mut src = Cursor::new(".model add3\n.i 3\n.o 1\n011 1\n.end\n");

        assert_eq!(scan_scalar(&mut src, ".i").unwrap(), Some("3".to_string()));
        assert_eq!(scan_scalar(&mut src, ".o").unwrap(), Some("1".to_string()));
        assert_eq!(
            scan_scalar(&mut src, ".model").unwrap(),
            Some("add3".to_string())
        );
        // Absent keyword, no error.
        assert_eq!(scan_scalar(&mut src, ".p").unwrap(), None);
    }

    #[test]
    fn scan_scalar_test_anchored() {
        // `.i` must not resolve from the `.ilb` line.
        let mut src = Cursor::new(".ilb a b\n.i 2\n");
        assert_eq!(scan_scalar(&mut src, ".i").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn scan_scalar_test_malformed() {
        let mut src = Cursor::new(".i 2 4\n");
        assert!(scan_scalar(&mut src, ".i").is_err());

        let mut src = Cursor::new(".i\n");
        assert!(scan_scalar(&mut src, ".i").is_err());
    }

    #[test]
    fn scan_count_test() {
        let mut src = Cursor::new(".i 12\n.o x\n");

        assert_eq!(scan_count(&mut src, ".i").unwrap(), Some(12));
        assert_eq!(scan_count(&mut src, ".p").unwrap(), None);
        assert!(scan_count(&mut src, ".o").is_err());
    }

    #[test]
    fn scan_list_test() {
        let mut src = Cursor::new(".i 2\n.ilb a b\n.ob f\n");

        assert_eq!(
            scan_list(&mut src, ".ilb").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(scan_list(&mut src, ".ob").unwrap(), vec!["f".to_string()]);
        assert!(scan_list(&mut src, ".olb").unwrap().is_empty());
    }

    #[test]
    fn read_fixed_header_test() {
        let mut src = Cursor::new(".i 16\n.o 8\n.p 4\n");
        assert_eq!(read_fixed_header(&mut src).unwrap(), [16, 8, 4]);

        // Any label shape works, only the token after the last space counts.
        let mut src = Cursor::new("inputs 3\noutputs 1\nnumber of chunks 2\n");
        assert_eq!(read_fixed_header(&mut src).unwrap(), [3, 1, 2]);
    }

    #[test]
    fn read_fixed_header_test_malformed() {
        // No space on the second line.
        let mut src = Cursor::new(".i 16\n.o8\n.p 4\n");
        assert!(read_fixed_header(&mut src).is_err());

        // Non-integer trailing token.
        let mut src = Cursor::new(".i 16\n.o eight\n.p 4\n");
        assert!(read_fixed_header(&mut src).is_err());

        // File ends after two header lines.
        let mut src = Cursor::new(".i 16\n.o 8\n");
        assert!(read_fixed_header(&mut src).is_err());
    }
}
