//! Corpus readers.
//!
//! [`TsvSource`] streams rows of the raw tab-separated corpus and hands each
//! one to a callback as either a [`RawRecord`] or the [`RecordError`] that
//! disqualified it. [`read_cleaned_lines`] loads the intermediate artifact
//! written by the cleaning stage.
//!
//! Both readers accept `\n`, `\r\n` and a lone `\r` as line endings.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use memchr::memchr2;
use urdu_prep_types::{LineNo, RawRecord, RecordError};

use crate::error::{PipelineError, Result};

/// Opens `path` for buffered reading, reporting a missing file distinctly.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PipelineError::MissingSource {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(PipelineError::io("failed to open", path, e)),
    }
}

/// Extracts column `text_column` from one TSV line.
///
/// The line is trimmed before splitting on tabs, so empty leading or trailing
/// columns disappear with the surrounding whitespace.
pub fn parse_row(
    line: LineNo,
    text: &str,
    text_column: usize,
) -> std::result::Result<RawRecord, RecordError> {
    let trimmed = text.trim();

    match trimmed.split('\t').nth(text_column) {
        Some("") => Err(RecordError::EmptyField { line }),
        Some(field) => Ok(RawRecord::new(line, field)),
        None => Err(RecordError::TooFewColumns {
            line,
            found: trimmed.split('\t').count(),
            required: text_column + 1,
        }),
    }
}

/// Reads one line into `buf`, terminator excluded.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Returns the number of bytes
/// consumed from `reader`, which is 0 only at end of input.
pub fn read_line_into<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    let mut consumed = 0usize;

    loop {
        let (terminator, used) = {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(consumed);
            }
            match memchr2(b'\n', b'\r', available) {
                Some(i) => {
                    buf.extend_from_slice(&available[..i]);
                    (Some(available[i]), i + 1)
                }
                None => {
                    buf.extend_from_slice(available);
                    (None, available.len())
                }
            }
        };
        reader.consume(used);
        consumed += used;

        match terminator {
            Some(b'\r') => {
                if reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                    consumed += 1;
                }
                return Ok(consumed);
            }
            Some(_) => return Ok(consumed),
            None => {}
        }
    }
}

/// Tab-separated corpus with a header line.
pub struct TsvSource<R> {
    reader: R,
    origin: PathBuf,
    text_column: usize,
}

impl TsvSource<BufReader<File>> {
    /// Opens a TSV file. Fails with [`PipelineError::MissingSource`] when
    /// the file does not exist.
    pub fn open(path: impl AsRef<Path>, text_column: usize) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_input(path)?;
        Ok(Self {
            reader,
            origin: path.to_path_buf(),
            text_column,
        })
    }
}

impl<R: BufRead> TsvSource<R> {
    /// Wraps an already-open reader. `origin` is only used in error messages.
    pub fn from_reader(reader: R, origin: impl Into<PathBuf>, text_column: usize) -> Self {
        Self {
            reader,
            origin: origin.into(),
            text_column,
        }
    }

    /// Reads every row after the header, emitting each outcome in file order.
    ///
    /// Row problems are emitted, not returned: only a failing read of the
    /// underlying stream stops the scan. Returns the number of data rows seen.
    pub fn read_each<F>(mut self, mut emit: F) -> Result<usize>
    where
        F: FnMut(std::result::Result<RawRecord, RecordError>),
    {
        let mut buf = Vec::with_capacity(256);
        let mut line: LineNo = 0;
        let mut rows = 0usize;

        loop {
            buf.clear();
            let n = read_line_into(&mut self.reader, &mut buf)
                .map_err(|e| PipelineError::io("failed to read", &self.origin, e))?;
            if n == 0 {
                break;
            }

            line += 1;
            if line == 1 {
                continue;
            }
            rows += 1;

            match std::str::from_utf8(&buf) {
                Ok(text) => emit(parse_row(line, text, self.text_column)),
                Err(_) => emit(Err(RecordError::InvalidUtf8 { line })),
            }
        }

        Ok(rows)
    }
}

/// Reads the cleaned-text artifact: every line trimmed, blank lines dropped.
pub fn read_cleaned_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = open_input(path)?;
    let mut buf = Vec::with_capacity(256);
    let mut lines = Vec::new();

    loop {
        buf.clear();
        let n = read_line_into(&mut reader, &mut buf)
            .map_err(|e| PipelineError::io("failed to read", path, e))?;
        if n == 0 {
            break;
        }

        let line = std::str::from_utf8(&buf).map_err(|e| {
            PipelineError::io(
                "failed to read",
                path,
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_owned());
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &[u8]) -> (usize, Vec<std::result::Result<RawRecord, RecordError>>) {
        let mut out = Vec::new();
        let rows = TsvSource::from_reader(Cursor::new(input.to_vec()), "test.tsv", 2)
            .read_each(|r| out.push(r))
            .expect("in-memory read cannot fail");
        (rows, out)
    }

    #[test]
    fn header_is_skipped() {
        let (rows, out) = collect(b"id\tsrc\tsentence\n1\tx\t\xD8\xB3\xD9\x84\xD8\xA7\xD9\x85\n");
        assert_eq!(rows, 1);
        assert_eq!(out, vec![Ok(RawRecord::new(2, "سلام"))]);
    }

    #[test]
    fn third_column_extracted() {
        assert_eq!(
            parse_row(5, "a\tb\tthe text\td\n", 2),
            Ok(RawRecord::new(5, "the text"))
        );
    }

    #[test]
    fn short_rows_are_malformed() {
        assert_eq!(
            parse_row(3, "a\tb\n", 2),
            Err(RecordError::TooFewColumns {
                line: 3,
                found: 2,
                required: 3
            })
        );
        assert_eq!(
            parse_row(3, "", 2),
            Err(RecordError::TooFewColumns {
                line: 3,
                found: 1,
                required: 3
            })
        );
    }

    #[test]
    fn empty_field_is_malformed() {
        assert_eq!(
            parse_row(4, "a\tb\t\td", 2),
            Err(RecordError::EmptyField { line: 4 })
        );
    }

    #[test]
    fn whole_line_trimmed_before_split() {
        // Trailing empty column and CRLF disappear with the trim.
        assert_eq!(
            parse_row(2, "a\tb\tc\t\r\n", 2),
            Ok(RawRecord::new(2, "c"))
        );
        // A leading tab is trimmed away too, shifting the columns left.
        assert_eq!(
            parse_row(2, "\tb\tc\td", 2),
            Ok(RawRecord::new(2, "d"))
        );
    }

    #[test]
    fn invalid_utf8_row_reported_and_scan_continues() {
        let (rows, out) = collect(b"h\n1\t2\t\xFF\xFE\n1\t2\tok\n");
        assert_eq!(rows, 2);
        assert_eq!(
            out,
            vec![
                Err(RecordError::InvalidUtf8 { line: 2 }),
                Ok(RawRecord::new(3, "ok")),
            ]
        );
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let (rows, out) = collect(b"h\n1\t2\tend");
        assert_eq!(rows, 1);
        assert_eq!(out, vec![Ok(RawRecord::new(2, "end"))]);
    }

    #[test]
    fn empty_input_has_no_rows() {
        let (rows, out) = collect(b"");
        assert_eq!(rows, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn carriage_return_ends_a_row() {
        let (rows, out) = collect(b"id\tsrc\tsentence\r1\tx\tsalam\r2\tx\tkhuda hafiz");
        assert_eq!(rows, 2);
        assert_eq!(
            out,
            vec![
                Ok(RawRecord::new(2, "salam")),
                Ok(RawRecord::new(3, "khuda hafiz")),
            ]
        );
    }

    #[test]
    fn mixed_line_endings_number_rows_alike() {
        let (rows, out) = collect(b"h\r\n1\tx\ta\r2\tx\tb\n3\tx\tc\r\n");
        assert_eq!(rows, 3);
        assert_eq!(
            out,
            vec![
                Ok(RawRecord::new(2, "a")),
                Ok(RawRecord::new(3, "b")),
                Ok(RawRecord::new(4, "c")),
            ]
        );
    }

    #[test]
    fn crlf_split_across_buffer_refills_is_one_ending() {
        let input = b"ab\r\ncd\r\r\nef".to_vec();
        let mut reader = BufReader::with_capacity(3, Cursor::new(input));
        let mut buf = Vec::new();
        let mut lines = Vec::new();
        while read_line_into(&mut reader, &mut buf).expect("read") > 0 {
            lines.push(String::from_utf8(buf.clone()).expect("utf8"));
            buf.clear();
        }
        assert_eq!(lines, ["ab", "cd", "", "ef"]);
    }

    #[test]
    fn cleaned_lines_accept_carriage_returns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cleaned.txt");
        std::fs::write(&path, "ایک۔\r\rدو۔\r\n  تین  \r").expect("seed");

        let lines = read_cleaned_lines(&path).expect("read");
        assert_eq!(lines, ["ایک۔", "دو۔", "تین"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = TsvSource::open("definitely/not/here.tsv", 2)
            .err()
            .expect("open must fail");
        assert!(matches!(err, PipelineError::MissingSource { .. }));
    }
}
