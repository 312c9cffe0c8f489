//! Streaming entry points and row assembly.
//!
//! A [`Parser`] holds one validated [`Dialect`] and no per-input state, so it
//! can be reused for any number of inputs. Every entry point makes a single
//! synchronous pass over its input:
//!
//! - [`Parser::parse_fields`] hands each field and its index to a consumer
//! - [`Parser::parse_rows`] hands each complete row to a consumer
//! - [`Parser::fields`] and [`Parser::rows`] collect everything
//!
//! Consumers return a [`Flow`]. Returning [`Flow::Stop`] ends the parse
//! successfully without reading another byte.
//!
//! ```rust
//! use serde_csvkit::{Flow, Parser};
//!
//! let parser = Parser::default();
//! let mut first = None;
//!
//! parser
//!     .parse_rows("name,qty\nbolt,4\nnut,9\n", |row| {
//!         first = Some(row);
//!         Flow::Stop
//!     })
//!     .unwrap();
//!
//! assert_eq!(first.unwrap(), vec!["name", "qty"]);
//! ```

use crate::tokenizer::Tokens;
use crate::{Dialect, Field, Input, Result, Row};
use log::{debug, trace};
use std::iter::FusedIterator;

/// What a consumer wants the parser to do after the current item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

impl Flow {
    #[inline]
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

/// A CSV parser bound to one dialect.
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::{Dialect, ErrorKind, Parser};
///
/// let parser = Parser::new(Dialect::EXCEL_TAB).unwrap();
/// let rows = parser.rows("a\tb\n").unwrap();
/// assert_eq!(rows, vec![vec!["a", "b"]]);
///
/// let err = Parser::new(Dialect::EXCEL.with_quote_char(b',')).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidDialect);
/// ```
#[derive(Clone, Debug)]
pub struct Parser {
    dialect: Dialect,
}

impl Parser {
    /// Creates a parser after validating the dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDialect`](crate::Error::InvalidDialect) if the
    /// dialect breaks one of its invariants.
    pub fn new(dialect: Dialect) -> Result<Self> {
        if let Err(e) = dialect.validate() {
            debug!("rejected dialect {:?}: {}", dialect, e);
            return Err(e);
        }
        debug!("created parser for dialect {:?}", dialect);
        Ok(Parser { dialect })
    }

    /// Returns the validated dialect this parser was built with.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Dialect, Parser};
    ///
    /// let parser = Parser::new(Dialect::EXCEL_TAB).unwrap();
    /// assert_eq!(parser.dialect().delimiter, b'\t');
    /// ```
    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Returns the lazy field sequence over `input`.
    pub fn tokens<'a>(&self, input: &'a Input<'_>) -> Tokens<'a> {
        Tokens::new(self.dialect, input.as_bytes())
    }

    /// Returns the lazy row sequence over `input`.
    pub fn rows_iter<'a>(&self, input: &'a Input<'_>) -> Rows<'a> {
        Rows::new(self.tokens(input))
    }

    /// Streams every field to `consumer` together with its zero-based index
    /// within its row.
    ///
    /// # Errors
    ///
    /// Returns the first parse error; fields delivered before it stand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Flow, Parser};
    ///
    /// let mut seen = Vec::new();
    /// Parser::default()
    ///     .parse_fields("a,b\nc\n", |value, index| {
    ///         seen.push((value.into_string(), index));
    ///         Flow::Continue
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(seen, vec![("a".into(), 0), ("b".into(), 1), ("c".into(), 0)]);
    /// ```
    pub fn parse_fields<'a, I, F>(&self, input: I, mut consumer: F) -> Result<()>
    where
        I: Into<Input<'a>>,
        F: FnMut(Field, usize) -> Flow,
    {
        let input = input.into();
        let mut count = 0usize;

        for token in self.tokens(&input) {
            let token = token?;
            count += 1;
            if consumer(token.value, token.index).is_stop() {
                debug!("consumer stopped parse after {} fields", count);
                return Ok(());
            }
        }

        debug!("parsed {} fields from {} bytes", count, input.len());
        Ok(())
    }

    /// Streams every row to `consumer`.
    ///
    /// # Errors
    ///
    /// Returns the first parse error; rows delivered before it stand.
    pub fn parse_rows<'a, I, F>(&self, input: I, mut consumer: F) -> Result<()>
    where
        I: Into<Input<'a>>,
        F: FnMut(Row) -> Flow,
    {
        let input = input.into();
        let mut count = 0usize;

        for row in self.rows_iter(&input) {
            let row = row?;
            count += 1;
            trace!("row {}: {} fields", count, row.len());
            if consumer(row).is_stop() {
                debug!("consumer stopped parse after {} rows", count);
                return Ok(());
            }
        }

        debug!("parsed {} rows from {} bytes", count, input.len());
        Ok(())
    }

    /// Collects every field of `input`.
    ///
    /// # Errors
    ///
    /// Returns the first parse error.
    pub fn fields<'a, I>(&self, input: I) -> Result<Vec<Field>>
    where
        I: Into<Input<'a>>,
    {
        let mut fields = Vec::new();
        self.parse_fields(input, |value, _| {
            fields.push(value);
            Flow::Continue
        })?;
        Ok(fields)
    }

    /// Collects every row of `input`.
    ///
    /// # Errors
    ///
    /// Returns the first parse error.
    pub fn rows<'a, I>(&self, input: I) -> Result<Vec<Row>>
    where
        I: Into<Input<'a>>,
    {
        let mut rows = Vec::new();
        self.parse_rows(input, |row| {
            rows.push(row);
            Flow::Continue
        })?;
        Ok(rows)
    }
}

impl Default for Parser {
    /// A parser for [`Dialect::EXCEL`].
    fn default() -> Self {
        Parser {
            dialect: Dialect::EXCEL,
        }
    }
}

/// Groups the field sequence into rows at the tokenizer's record boundaries.
pub struct Rows<'a> {
    tokens: Tokens<'a>,
    row: Row,
}

impl<'a> Rows<'a> {
    fn new(tokens: Tokens<'a>) -> Self {
        Rows {
            tokens,
            row: Vec::new(),
        }
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.tokens.next()? {
                Ok(token) => {
                    self.row.push(token.value);
                    if token.end_of_row {
                        return Some(Ok(std::mem::take(&mut self.row)));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl FusedIterator for Rows<'_> {}
