//! Delimited text input.
//!
//! A small reader for collation tables: one record per line, fields split on
//! a single delimiter character, double-quoted fields may contain the
//! delimiter, line breaks, or `""` for a literal quote. A quote may only open
//! a field, and a closing quote must be followed by a delimiter or line end.
//! Blank lines are skipped. There is no header row.

use std::path::Path;

/// Error type for reading delimited input.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Input path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A quoted field runs to end of input.
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// 1-based line where the quote opened.
        line: usize,
    },
    /// A quote appears inside an unquoted field.
    #[error("Stray quote inside an unquoted field on line {line}")]
    StrayQuote {
        /// 1-based line of the quote.
        line: usize,
    },
    /// Text follows the closing quote of a quoted field.
    #[error("Unexpected text after a closing quote on line {line}")]
    TextAfterQuote {
        /// 1-based line of the text.
        line: usize,
    },
}

/// Read and split a delimited file.
pub fn read_rows(path: impl AsRef<Path>, delimiter: char) -> Result<Vec<Vec<String>>, SourceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_delimited(&text, delimiter)
}

/// Split delimited text into rows of fields.
pub fn parse_delimited(text: &str, delimiter: char) -> Result<Vec<Vec<String>>, SourceError> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut has_content = false;
    let mut in_quotes = false;
    let mut closed_quote = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = text.chars().peekable();

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
            c if c == delimiter => {
                row.push(std::mem::take(&mut field));
                has_content = true;
                closed_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                end_row(&mut rows, &mut row, &mut field, &mut has_content);
                line += 1;
                closed_quote = false;
            }
            _ if closed_quote => return Err(SourceError::TextAfterQuote { line }),
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
                has_content = true;
            }
            '"' => return Err(SourceError::StrayQuote { line }),
            _ => {
                field.push(c);
                has_content = true;
            }
        }
    }

    if in_quotes {
        return Err(SourceError::UnterminatedQuote { line: quote_line });
    }
    end_row(&mut rows, &mut row, &mut field, &mut has_content);
    Ok(rows)
}

fn end_row(
    rows: &mut Vec<Vec<String>>,
    row: &mut Vec<String>,
    field: &mut String,
    has_content: &mut bool,
) {
    if *has_content {
        row.push(std::mem::take(field));
        rows.push(std::mem::take(row));
    } else {
        row.clear();
        field.clear();
    }
    *has_content = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rows() {
        let rows = parse_delimited("W1,the,quick,fox\nW2,the,,fox\n", ',').unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["W1", "the", "quick", "fox"],
                vec!["W2", "the", "", "fox"],
            ]
        );
    }

    #[test]
    fn test_quotes_and_crlf() {
        let rows = parse_delimited("A,\"x, y\",\"say \"\"hi\"\"\"\r\nB,\"\",z\r\n", ',').unwrap();
        assert_eq!(rows[0], vec!["A", "x, y", "say \"hi\""]);
        assert_eq!(rows[1], vec!["B", "", "z"]);
    }

    #[test]
    fn test_trailing_delimiter_keeps_empty_cell() {
        let rows = parse_delimited("A,x,\n", ',').unwrap();
        assert_eq!(rows[0], vec!["A", "x", ""]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = parse_delimited("\nA\tx\n\n\nB\ty", '\t').unwrap();
        assert_eq!(rows, vec![vec!["A", "x"], vec!["B", "y"]]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_delimited("A,x\nB,\"open\n", ',').unwrap_err();
        assert!(matches!(err, SourceError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_quote_inside_unquoted_field() {
        let err = parse_delimited("A,x\nB,a\"b,c\n", ',').unwrap_err();
        assert!(matches!(err, SourceError::StrayQuote { line: 2 }));
    }

    #[test]
    fn test_text_after_closing_quote() {
        let err = parse_delimited("A,\"x\"y,z\n", ',').unwrap_err();
        assert!(matches!(err, SourceError::TextAfterQuote { line: 1 }));

        let err = parse_delimited("A,\"\"\"", ',').unwrap_err();
        assert!(matches!(err, SourceError::UnterminatedQuote { line: 1 }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_rows("/nonexistent/collation.csv", ',').unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
