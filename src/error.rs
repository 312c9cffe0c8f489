//! Error types for CSV tokenizing and record mapping.
//!
//! Every fallible entry point in this crate returns [`Result`]. Parse errors
//! carry the 1-based line number and 1-based field number at which the
//! problem was detected, so callers can point at the offending input.
//!
//! ## Error Categories
//!
//! - **Malformed quoting**: data after a closing quote (strict mode), or a
//!   quoted field still open at end of input
//! - **Invalid numeric field**: an unquoted field that is not a float literal
//!   under [`QuoteStyle::NonNumeric`](crate::QuoteStyle::NonNumeric)
//! - **Invalid dialect**: a [`Dialect`](crate::Dialect) rejected at parser construction
//! - **Invalid encoding**: input or field bytes that are not valid UTF-8
//! - **Record errors**: a row that cannot be mapped onto the requested record type
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvkit::{Dialect, ErrorKind, Parser};
//!
//! let parser = Parser::new(Dialect::EXCEL.with_strict(true)).unwrap();
//! let err = parser.rows("\"abc\"def,x\n").unwrap_err();
//!
//! assert_eq!(err.kind(), ErrorKind::MalformedQuoting);
//! assert_eq!(err.line(), Some(1));
//! assert_eq!(err.field(), Some(1));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing CSV data.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Data after a closing quote in strict mode, or an unterminated quote.
    #[error("Malformed quoting at line {line}, field {field}: {msg}")]
    MalformedQuoting {
        line: usize,
        field: usize,
        msg: String,
    },

    /// An unquoted field that does not parse as a float under `NonNumeric` quoting.
    #[error("Invalid numeric field at line {line}, field {field}: {text:?} is not a number")]
    InvalidNumericField {
        line: usize,
        field: usize,
        text: String,
    },

    /// The dialect violates a construction-time invariant.
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),

    /// Bytes that do not decode as UTF-8. `field` is set when a single
    /// field failed to decode.
    #[error("Invalid encoding at {}: {msg}", position(.line, .field))]
    InvalidEncoding {
        line: usize,
        field: Option<usize>,
        msg: String,
    },

    /// More record names than fields in the row.
    #[error("Record expects {expected} fields but the row has {found}")]
    FieldCount { expected: usize, found: usize },

    /// A row that could not be mapped onto a record.
    #[error("Record {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: Box<Error>,
    },

    /// IO error while pulling input from a reader
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// The category of an [`Error`], independent of its position metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedQuoting,
    InvalidNumericField,
    InvalidDialect,
    InvalidEncoding,
    FieldCount,
    Io,
    Custom,
}

impl Error {
    /// Creates a malformed-quoting error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Error;
    ///
    /// let err = Error::malformed_quoting(3, 2, "unterminated quoted field");
    /// assert!(err.to_string().contains("line 3, field 2"));
    /// ```
    pub fn malformed_quoting(line: usize, field: usize, msg: &str) -> Self {
        Error::MalformedQuoting {
            line,
            field,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid-numeric-field error carrying the offending text.
    pub fn invalid_numeric(line: usize, field: usize, text: &str) -> Self {
        Error::InvalidNumericField {
            line,
            field,
            text: text.to_string(),
        }
    }

    /// Creates an invalid-dialect error.
    pub fn invalid_dialect(msg: &str) -> Self {
        Error::InvalidDialect(msg.to_string())
    }

    /// Creates an invalid-encoding error for input that fails to decode as a whole.
    pub fn invalid_encoding(line: usize, msg: &str) -> Self {
        Error::InvalidEncoding {
            line,
            field: None,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid-encoding error for one field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Error;
    ///
    /// let err = Error::invalid_field_encoding(2, 4, "invalid utf-8 sequence");
    /// assert_eq!(err.field(), Some(4));
    /// assert!(err.to_string().contains("line 2, field 4"));
    /// ```
    pub fn invalid_field_encoding(line: usize, field: usize, msg: &str) -> Self {
        Error::InvalidEncoding {
            line,
            field: Some(field),
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Tags this error with the 1-based number of the row being mapped.
    pub(crate) fn at_row(self, row: usize) -> Self {
        Error::Record {
            row,
            source: Box::new(self),
        }
    }

    /// Returns the category of this error.
    ///
    /// Record errors report the kind of the underlying failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedQuoting { .. } => ErrorKind::MalformedQuoting,
            Error::InvalidNumericField { .. } => ErrorKind::InvalidNumericField,
            Error::InvalidDialect(_) => ErrorKind::InvalidDialect,
            Error::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Error::FieldCount { .. } => ErrorKind::FieldCount,
            Error::Record { source, .. } => source.kind(),
            Error::Io(_) => ErrorKind::Io,
            Error::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns the 1-based line at which the error was detected, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedQuoting { line, .. }
            | Error::InvalidNumericField { line, .. }
            | Error::InvalidEncoding { line, .. } => Some(*line),
            Error::Record { source, .. } => source.line(),
            _ => None,
        }
    }

    /// Returns the 1-based field number within its line, if known.
    #[must_use]
    pub fn field(&self) -> Option<usize> {
        match self {
            Error::MalformedQuoting { field, .. } | Error::InvalidNumericField { field, .. } => {
                Some(*field)
            }
            Error::InvalidEncoding { field, .. } => *field,
            Error::Record { source, .. } => source.field(),
            _ => None,
        }
    }
}

fn position(line: &usize, field: &Option<usize>) -> String {
    match field {
        Some(field) => format!("line {}, field {}", line, field),
        None => format!("line {}", line),
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
