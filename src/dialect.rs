//! Dialect configuration for CSV parsing.
//!
//! This module provides the types that describe the syntactic variations
//! between CSV flavors:
//!
//! - [`Dialect`]: delimiter, quoting, escaping and strictness settings
//! - [`QuoteStyle`]: quoting policy; under [`QuoteStyle::NonNumeric`] unquoted
//!   fields are read as numbers
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvkit::{Dialect, QuoteStyle};
//!
//! // Excel-style comma separated data
//! let excel = Dialect::EXCEL;
//! assert_eq!(excel.delimiter, b',');
//!
//! // Semicolon separated, backslash escapes, unquoted fields are numbers
//! let dialect = Dialect::new()
//!     .with_delimiter(b';')
//!     .with_escape_char(b'\\')
//!     .with_double_quote(false)
//!     .with_quote_style(QuoteStyle::NonNumeric);
//! assert!(dialect.validate().is_ok());
//! ```

use crate::{Error, Result};

/// Quoting policy of a dialect.
///
/// Only [`QuoteStyle::None`] and [`QuoteStyle::NonNumeric`] change how input
/// is parsed: `None` disables quote processing entirely, `NonNumeric` turns
/// every unquoted field into a [`Field::Number`](crate::Field::Number).
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::QuoteStyle;
///
/// assert_eq!(QuoteStyle::default(), QuoteStyle::Minimal);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum QuoteStyle {
    /// No special quote processing
    None,
    /// Only fields with special characters are quoted
    #[default]
    Minimal,
    /// All fields are quoted
    All,
    /// Non-numeric fields are quoted; unquoted fields are floats
    NonNumeric,
}

/// Describes one CSV flavor.
///
/// A dialect is a plain value: construct it once, validate it through
/// [`Parser::new`](crate::Parser::new) and share it across any number of parses.
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::Dialect;
///
/// let tsv = Dialect::EXCEL_TAB;
/// assert_eq!(tsv.delimiter, b'\t');
/// assert_eq!(tsv.quote_char, Dialect::EXCEL.quote_char);
///
/// let invalid = Dialect::new().with_quote_char(b',');
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dialect {
    /// Field separator
    pub delimiter: u8,
    /// Opens and closes a quoted field
    pub quote_char: u8,
    /// Makes the following byte literal; `None` disables escaping
    pub escape_char: Option<u8>,
    /// Is a quote inside a quoted field written as two quotes?
    pub double_quote: bool,
    /// Discard spaces that follow a delimiter
    pub skip_initial_space: bool,
    /// Reject data after a closing quote instead of keeping it
    pub strict: bool,
    /// Quoting policy; see [`QuoteStyle`]
    pub quote_style: QuoteStyle,
}

impl Dialect {
    /// Excel-generated comma separated data.
    pub const EXCEL: Dialect = Dialect {
        delimiter: b',',
        quote_char: b'"',
        escape_char: None,
        double_quote: true,
        skip_initial_space: false,
        strict: false,
        quote_style: QuoteStyle::Minimal,
    };

    /// Excel-generated tab separated data.
    pub const EXCEL_TAB: Dialect = Dialect {
        delimiter: b'\t',
        ..Dialect::EXCEL
    };

    /// Creates the default dialect, identical to [`Dialect::EXCEL`].
    #[must_use]
    pub const fn new() -> Self {
        Dialect::EXCEL
    }

    /// Sets the field separator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Dialect;
    ///
    /// let dialect = Dialect::new().with_delimiter(b';');
    /// assert_eq!(dialect.delimiter, b';');
    /// ```
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the byte that opens and closes quoted fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Dialect;
    ///
    /// let dialect = Dialect::new().with_quote_char(b'\'');
    /// assert_eq!(dialect.quote_char, b'\'');
    /// ```
    #[must_use]
    pub const fn with_quote_char(mut self, quote_char: u8) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Sets the escape character. Pair with `with_double_quote(false)` to
    /// escape embedded quotes instead of doubling them.
    #[must_use]
    pub const fn with_escape_char(mut self, escape_char: u8) -> Self {
        self.escape_char = Some(escape_char);
        self
    }

    /// Removes the escape character.
    #[must_use]
    pub const fn without_escape_char(mut self) -> Self {
        self.escape_char = None;
        self
    }

    /// Chooses between doubled quotes (`true`) and escaped quotes (`false`)
    /// inside quoted fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Dialect;
    ///
    /// let dialect = Dialect::new().with_double_quote(false);
    /// assert!(dialect.validate().is_err());
    /// assert!(dialect.with_escape_char(b'\\').validate().is_ok());
    /// ```
    #[must_use]
    pub const fn with_double_quote(mut self, double_quote: bool) -> Self {
        self.double_quote = double_quote;
        self
    }

    /// Discards spaces immediately following a delimiter when `skip` is true.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Dialect, Parser};
    ///
    /// let parser = Parser::new(Dialect::new().with_skip_initial_space(true)).unwrap();
    /// assert_eq!(parser.rows("a,  b\n").unwrap(), vec![vec!["a", "b"]]);
    /// ```
    #[must_use]
    pub const fn with_skip_initial_space(mut self, skip: bool) -> Self {
        self.skip_initial_space = skip;
        self
    }

    /// Turns strict mode on or off.
    ///
    /// Strict dialects reject data after a closing quote and an escape
    /// character at end of input. They also skip blank lines.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Dialect, Parser};
    ///
    /// let input = "\"a\"b\n";
    /// assert!(Parser::new(Dialect::new().with_strict(true)).unwrap().rows(input).is_err());
    /// assert!(Parser::new(Dialect::new()).unwrap().rows(input).is_ok());
    /// ```
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the quoting policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Dialect, Field, Parser, QuoteStyle};
    ///
    /// let dialect = Dialect::new().with_quote_style(QuoteStyle::NonNumeric);
    /// let fields = Parser::new(dialect).unwrap().fields("2.5,\"x\"").unwrap();
    /// assert_eq!(fields, vec![Field::Number(2.5), Field::from("x")]);
    /// ```
    #[must_use]
    pub const fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    /// Checks the structural invariants of this dialect.
    ///
    /// The delimiter and quote bytes must differ. Escape-based quoting
    /// (`double_quote == false`) requires an escape character distinct from
    /// both; with doubled quotes any escape byte is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDialect`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quote_char {
            return Err(Error::invalid_dialect(
                "delimiter and quote character must differ",
            ));
        }

        if !self.double_quote {
            match self.escape_char {
                None => {
                    return Err(Error::invalid_dialect(
                        "an escape character is required when double_quote is false",
                    ));
                }
                Some(escape) if escape == self.delimiter || escape == self.quote_char => {
                    return Err(Error::invalid_dialect(
                        "escape character must differ from delimiter and quote character",
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::EXCEL
    }
}

#[inline]
pub(crate) const fn is_line_break(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_dialects_differ_only_in_delimiter() {
        let tab = Dialect::EXCEL_TAB;
        assert_eq!(tab.with_delimiter(b','), Dialect::EXCEL);
        assert!(Dialect::EXCEL.validate().is_ok());
        assert!(tab.validate().is_ok());
    }

    #[test]
    fn test_delimiter_equal_to_quote_is_rejected() {
        let dialect = Dialect::new().with_delimiter(b'"');
        assert!(matches!(dialect.validate(), Err(Error::InvalidDialect(_))));
    }

    #[test]
    fn test_escape_quoting_requires_escape_char() {
        let dialect = Dialect::new().with_double_quote(false);
        assert!(dialect.validate().is_err());

        let dialect = dialect.with_escape_char(b'\\');
        assert!(dialect.validate().is_ok());

        let dialect = dialect.with_escape_char(b'"');
        assert!(dialect.validate().is_err());
    }

    #[test]
    fn test_escape_may_overlap_when_quotes_are_doubled() {
        assert!(Dialect::EXCEL.with_escape_char(b'"').validate().is_ok());
        assert!(Dialect::EXCEL.with_escape_char(b',').validate().is_ok());

        let escaped = Dialect::EXCEL.with_double_quote(false);
        assert!(escaped.with_escape_char(b',').validate().is_err());
    }

    #[test]
    fn test_line_break_bytes_are_accepted() {
        assert!(Dialect::new().with_delimiter(b'\n').validate().is_ok());
        assert!(Dialect::new().with_quote_char(b'\r').validate().is_ok());
        assert!(Dialect::new().with_escape_char(b'\n').validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let dialect = Dialect::new()
            .with_delimiter(b'|')
            .with_skip_initial_space(true)
            .with_strict(true)
            .with_quote_style(QuoteStyle::All);

        assert_eq!(dialect.delimiter, b'|');
        assert!(dialect.skip_initial_space);
        assert!(dialect.strict);
        assert_eq!(dialect.quote_style, QuoteStyle::All);
        assert_eq!(dialect.without_escape_char().escape_char, None);
    }
}
