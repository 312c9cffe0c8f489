//! The byte-level CSV state machine.
//!
//! [`Tokens`] walks a byte slice once, applying one [`Dialect`], and yields a
//! lazy sequence of [`Token`]s. Each token carries its field value, its
//! zero-based position in the row and whether it closes the row, which is all
//! the row assembler needs.
//!
//! ## States
//!
//! Parsing starts in `StartRecord`. Quoting suspends all structural
//! interpretation until the closing quote; a quote seen inside a quoted field
//! is resolved on the following byte (doubled quote, field end, or data after
//! the closing quote). `\n`, `\r` and `\r\n` each end a record exactly once.
//!
//! ## Positions
//!
//! The tokenizer counts lines (1-based, bumped for every consumed line break,
//! quoted or not) and fields within the current record (1-based, reset when a
//! record ends). Errors carry both.
//!
//! ```rust
//! use serde_csvkit::{Input, Parser};
//!
//! let parser = Parser::default();
//! let input = Input::from("a,\"b,c\"\nd\n");
//! let tokens: Vec<_> = parser.tokens(&input).collect::<Result<_, _>>().unwrap();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].value, "b,c");
//! assert!(tokens[1].end_of_row);
//! assert_eq!(tokens[2].index, 0);
//! ```

use crate::dialect::is_line_break;
use crate::{Dialect, Error, Field, QuoteStyle, Result};
use std::iter::FusedIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    StartRecord,
    StartField,
    EscapedChar,
    InField,
    InQuotedField,
    EscapeInQuotedField,
    QuoteInQuotedField,
    EatCrlf,
}

/// One emitted field and its place in the row.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub value: Field,
    /// Zero-based index of the field within its row
    pub index: usize,
    /// `true` if this field is the last one of its row
    pub end_of_row: bool,
}

/// Lazy field sequence over one input.
///
/// Created by [`Parser::tokens`](crate::Parser::tokens). After an error the
/// iterator is fused and yields `None`.
pub struct Tokens<'a> {
    dialect: Dialect,
    input: &'a [u8],
    position: usize,
    state: State,
    buffer: Vec<u8>,
    quoted: bool,
    line: usize,
    field: usize,
    prev: u8,
    failed: bool,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(dialect: Dialect, input: &'a [u8]) -> Self {
        Tokens {
            dialect,
            input,
            position: 0,
            state: State::StartRecord,
            buffer: Vec::new(),
            quoted: false,
            line: 1,
            field: 1,
            prev: 0,
            failed: false,
        }
    }

    /// The 1-based line the tokenizer is currently on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of input bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    fn advance(&mut self, byte: u8) {
        if byte == b'\r' || (byte == b'\n' && self.prev != b'\r') {
            self.line += 1;
        }
        self.prev = byte;
        self.position += 1;
    }

    /// Consumes a line break that ends the current record.
    fn end_record(&mut self, byte: u8) {
        self.advance(byte);
        self.state = if byte == b'\r' {
            State::EatCrlf
        } else {
            State::StartRecord
        };
    }

    fn emit(&mut self, end_of_row: bool) -> Result<Token> {
        let bytes = std::mem::take(&mut self.buffer);
        let quoted = std::mem::replace(&mut self.quoted, false);
        let value = self.convert(bytes, quoted)?;

        let token = Token {
            value,
            index: self.field - 1,
            end_of_row,
        };
        if end_of_row {
            self.field = 1;
        } else {
            self.field += 1;
        }
        Ok(token)
    }

    fn convert(&self, bytes: Vec<u8>, quoted: bool) -> Result<Field> {
        // Empty unquoted fields stay text: there is nothing to coerce.
        if self.dialect.quote_style == QuoteStyle::NonNumeric && !quoted && !bytes.is_empty() {
            return std::str::from_utf8(&bytes)
                .ok()
                .and_then(|text| text.parse::<f64>().ok())
                .map(Field::Number)
                .ok_or_else(|| {
                    Error::invalid_numeric(self.line, self.field, &String::from_utf8_lossy(&bytes))
                });
        }

        String::from_utf8(bytes)
            .map(Field::Text)
            .map_err(|e| Error::invalid_field_encoding(self.line, self.field, &e.to_string()))
    }

    /// A line-break byte ends the record unless the dialect gives it
    /// another role.
    fn ends_record(&self, byte: u8) -> bool {
        let d = &self.dialect;
        is_line_break(byte)
            && byte != d.delimiter
            && Some(byte) != d.escape_char
            && !(byte == d.quote_char && d.quote_style != QuoteStyle::None)
    }

        fn malformed(&self, msg: &str) -> Error {
        Error::malformed_quoting(self.line, self.field, msg)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let d = self.dialect;

        loop {
            let Some(&byte) = self.input.get(self.position) else {
                return self.finish();
            };

            match self.state {
                State::StartRecord => {
                    if self.ends_record(byte) && d.strict {
                        // blank line
                        self.advance(byte);
                    } else {
                        self.state = State::StartField;
                    }
                }

                State::StartField => {
                    if byte == d.quote_char && d.quote_style != QuoteStyle::None {
                        self.advance(byte);
                        self.quoted = true;
                        self.state = State::InQuotedField;
                    } else if Some(byte) == d.escape_char {
                        self.advance(byte);
                        self.state = State::EscapedChar;
                    } else if byte == d.delimiter {
                        let token = self.emit(false)?;
                        self.advance(byte);
                        return Ok(Some(token));
                    } else if self.ends_record(byte) {
                        let token = self.emit(true)?;
                        self.end_record(byte);
                        return Ok(Some(token));
                    } else if byte == b' ' && d.skip_initial_space {
                        self.advance(byte);
                    } else {
                        self.buffer.push(byte);
                        self.advance(byte);
                        self.state = State::InField;
                    }
                }

                State::EscapedChar => {
                    self.buffer.push(byte);
                    self.advance(byte);
                    self.state = State::InField;
                }

                State::InField => {
                    if Some(byte) == d.escape_char {
                        self.advance(byte);
                        self.state = State::EscapedChar;
                    } else if byte == d.delimiter {
                        let token = self.emit(false)?;
                        self.advance(byte);
                        self.state = State::StartField;
                        return Ok(Some(token));
                    } else if self.ends_record(byte) {
                        let token = self.emit(true)?;
                        self.end_record(byte);
                        return Ok(Some(token));
                    } else {
                        self.buffer.push(byte);
                        self.advance(byte);
                    }
                }

                State::InQuotedField => {
                    if !d.double_quote && Some(byte) == d.escape_char {
                        self.advance(byte);
                        self.state = State::EscapeInQuotedField;
                    } else if byte == d.quote_char {
                        self.advance(byte);
                        self.state = State::QuoteInQuotedField;
                    } else {
                        self.buffer.push(byte);
                        self.advance(byte);
                    }
                }

                State::EscapeInQuotedField => {
                    self.buffer.push(byte);
                    self.advance(byte);
                    self.state = State::InQuotedField;
                }

                State::QuoteInQuotedField => {
                    if d.double_quote && byte == d.quote_char {
                        self.buffer.push(byte);
                        self.advance(byte);
                        self.state = State::InQuotedField;
                    } else if byte == d.delimiter {
                        let token = self.emit(false)?;
                        self.advance(byte);
                        self.state = State::StartField;
                        return Ok(Some(token));
                    } else if self.ends_record(byte) {
                        let token = self.emit(true)?;
                        self.end_record(byte);
                        return Ok(Some(token));
                    } else if d.strict {
                        return Err(self.malformed(&format!(
                            "{:?} expected after closing quote, found {:?}",
                            d.delimiter as char, byte as char
                        )));
                    } else {
                        self.buffer.push(byte);
                        self.advance(byte);
                        self.state = State::InField;
                    }
                }

                State::EatCrlf => {
                    if byte == b'\n' && self.ends_record(byte) {
                        self.advance(byte);
                    }
                    self.state = State::StartRecord;
                }
            }
        }
    }

    fn finish(&mut self) -> Result<Option<Token>> {
        let token = match self.state {
            State::StartRecord | State::EatCrlf => return Ok(None),
            State::InQuotedField | State::EscapeInQuotedField => {
                return Err(self.malformed("unterminated quoted field at end of input"));
            }
            State::EscapedChar => {
                if self.dialect.strict {
                    return Err(self.malformed("escape character at end of input"));
                }
                if let Some(escape) = self.dialect.escape_char {
                    self.buffer.push(escape);
                }
                self.emit(true)?
            }
            State::StartField | State::InField | State::QuoteInQuotedField => self.emit(true)?,
        };

        self.state = State::StartRecord;
        Ok(Some(token))
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}
