//! Minimal CSV reader for backing sources.
//!
//! Fields are separated by commas and may be wrapped in double quotes, in
//! which case they can contain commas, newlines and `""` escaped quotes.
//! Records end on LF or CRLF. Blank lines are skipped.

use std::iter::Peekable;
use std::str::Chars;

use super::Row;
use crate::error::LoadError;

const BOM: char = '\u{feff}';

pub(crate) struct Reader<'input> {
    chars: Peekable<Chars<'input>>,
    /// Current line, 1-based.
    line: usize,
    failed: bool,
}

impl<'input> Reader<'input> {
    pub fn new(input: &'input str) -> Self {
        let input = input.strip_prefix(BOM).unwrap_or(input);

        Self {
            chars: input.chars().peekable(),
            line: 1,
            failed: false,
        }
    }

    fn error(&mut self, line: usize, reason: impl Into<String>) -> LoadError {
        self.failed = true;
        LoadError::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// Consumes a line terminator if there's one, returning whether it did.
    fn newline(&mut self) -> bool {
        match self.chars.peek() {
            Some('\n') => {
                self.chars.next();
            }
            Some('\r') => {
                self.chars.next();
                self.chars.next_if_eq(&'\n');
            }
            _ => return false,
        }

        self.line += 1;
        true
    }

    fn quoted_field(&mut self) -> Result<String, LoadError> {
        let start = self.line;
        let mut field = String::new();
        self.chars.next();

        loop {
            match self.chars.next() {
                None => return Err(self.error(start, "unterminated quoted field")),
                Some('"') => {
                    if self.chars.next_if_eq(&'"').is_some() {
                        field.push('"');
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    field.push(c);
                }
            }
        }

        match self.chars.peek() {
            None | Some(',' | '\n' | '\r') => Ok(field),
            Some(unexpected) => {
                let reason = format!("unexpected character '{unexpected}' after closing quote");
                Err(self.error(self.line, reason))
            }
        }
    }

    fn field(&mut self) -> Result<String, LoadError> {
        if self.chars.peek() == Some(&'"') {
            return self.quoted_field();
        }

        let mut field = String::new();
        while let Some(c) = self.chars.next_if(|c| !matches!(c, ',' | '\n' | '\r')) {
            field.push(c);
        }

        Ok(field)
    }

    fn record(&mut self) -> Result<Row, LoadError> {
        let mut record = Vec::new();

        loop {
            record.push(self.field()?);

            if self.chars.next_if_eq(&',').is_none() {
                self.newline();
                return Ok(record);
            }
        }
    }
}

impl<'input> Iterator for Reader<'input> {
    type Item = Result<Row, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while self.newline() {}
        self.chars.peek()?;

        Some(self.record())
    }
}

/// Turns raw bytes into text, pointing at the line of the first invalid byte.
pub(crate) fn decode(bytes: Vec<u8>) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|err| {
        let valid = err.utf8_error().valid_up_to();
        let line = err.as_bytes()[..valid]
            .iter()
            .filter(|byte| **byte == b'\n')
            .count()
            + 1;

        LoadError::Malformed {
            line,
            reason: "invalid UTF-8".into(),
        }
    })
}

/// Parses every record, discarding the header.
pub(crate) fn parse(input: &str) -> Result<Vec<Row>, LoadError> {
    let mut reader = Reader::new(input);

    if let Some(header) = reader.next() {
        header?;
    }

    reader.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    fn test_header_is_discarded() {
        let input = "year,gender,ethnicity,name,count,rank\n2016,FEMALE,ASIAN,Olivia,172,1\n";

        assert_eq!(
            parse(input),
            Ok(vec![row(&["2016", "FEMALE", "ASIAN", "Olivia", "172", "1"])])
        );
    }

    #[test]
    fn test_quoted_fields() {
        let input = "a,b\n\"hello, world\",\"say \"\"hi\"\"\"\n\"multi\nline\",x\n";

        assert_eq!(
            parse(input),
            Ok(vec![
                row(&["hello, world", "say \"hi\""]),
                row(&["multi\nline", "x"]),
            ])
        );
    }

    #[test]
    fn test_crlf_blank_lines_and_missing_trailing_newline() {
        let input = "\u{feff}a,b\r\n1,2\r\n\r\n\n3,\r\n,4";

        assert_eq!(
            parse(input),
            Ok(vec![row(&["1", "2"]), row(&["3", ""]), row(&["", "4"])])
        );
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        assert_eq!(
            parse("a,b,c\n1\n1,2,3,4\n"),
            Ok(vec![row(&["1"]), row(&["1", "2", "3", "4"])])
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Ok(vec![]));
        assert_eq!(parse("only,a,header\n"), Ok(vec![]));
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            parse("a,b\n1,2\n3,\"never\nclosed\n"),
            Err(LoadError::Malformed {
                line: 3,
                reason: "unterminated quoted field".into()
            })
        );
    }

    #[test]
    fn test_garbage_after_closing_quote() {
        assert_eq!(
            parse("a\n\"ok\"x\n"),
            Err(LoadError::Malformed {
                line: 2,
                reason: "unexpected character 'x' after closing quote".into()
            })
        );
    }

    #[test]
    fn test_invalid_utf8_line() {
        let bytes = b"a,b\n1,2\n3,\xff\n".to_vec();

        assert_eq!(
            decode(bytes),
            Err(LoadError::Malformed {
                line: 3,
                reason: "invalid UTF-8".into()
            })
        );
    }
}
