//! # serde_csvkit
//!
//! A configurable CSV (delimiter-separated values) tokenizer with streaming
//! callbacks and Serde record mapping.
//!
//! ## Key Features
//!
//! - **Dialects**: delimiter, quote and escape bytes, doubled-quote or escape
//!   quoting, initial-space skipping, strict or lenient quote handling
//! - **Streaming**: fields or rows are handed to a consumer one at a time in a
//!   single pass; the consumer can stop the parse after any item
//! - **Typed fields**: under [`QuoteStyle::NonNumeric`] unquoted fields are
//!   read as numbers
//! - **Precise errors**: every parse error carries its line and field number
//! - **Serde records**: rows map onto `#[derive(Deserialize)]` structs by
//!   column name, or onto tuples by position
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_csvkit::rows_from_str;
//!
//! let rows = rows_from_str("a,\"b,c\"\r\nd,\"e\"\"f\"\n").unwrap();
//!
//! assert_eq!(rows, vec![vec!["a", "b,c"], vec!["d", "e\"f"]]);
//! ```
//!
//! ### Streaming with early stop
//!
//! ```rust
//! use serde_csvkit::{Flow, Parser};
//!
//! let mut first = None;
//! Parser::default()
//!     .parse_fields("x,y\n1,2\n", |value, index| {
//!         first = Some((value, index));
//!         Flow::Stop
//!     })
//!     .unwrap();
//!
//! assert_eq!(first.unwrap().1, 0);
//! ```
//!
//! ### Records
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_csvkit::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Part { name: String, qty: u32 }
//!
//! let parts: Vec<Part> = from_str("name,qty\nbolt,4\nnut,9\n").unwrap();
//! assert_eq!(parts[1], Part { name: "nut".to_string(), qty: 9 });
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: parser
//! construction, early stops and parse summaries at `debug`, rows at `trace`.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parsing rows with the Excel dialect
//! - **`records.rs`** - Mapping rows onto structs
//! - **`streaming.rs`** - Field streaming, early stop and error positions
//!
//! Run any example with: `cargo run --example <name>`

#[macro_use]
pub mod macros;

pub mod de;
pub mod dialect;
pub mod error;
pub mod input;
pub mod map;
pub mod parser;
pub mod tokenizer;
pub mod value;

pub use de::{records_with_header, RecordMapper, RecordParser};
pub use dialect::{Dialect, QuoteStyle};
pub use error::{Error, ErrorKind, Result};
pub use input::Input;
pub use map::Record;
pub use parser::{Flow, Parser, Rows};
pub use tokenizer::{Token, Tokens};
pub use value::{Field, Row};

use serde::de::DeserializeOwned;
use std::io;

/// Parses bytes with the Excel dialect and collects every row.
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::rows_from_slice;
///
/// let rows = rows_from_slice(b"a,b\nc,d\n").unwrap();
/// assert_eq!(rows.len(), 2);
/// ```
///
/// # Errors
///
/// Returns the first parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_from_slice(v: &[u8]) -> Result<Vec<Row>> {
    Parser::default().rows(v)
}

/// Parses text with the Excel dialect and collects every row.
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::rows_from_str;
///
/// assert!(rows_from_str("").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns the first parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn rows_from_str(s: &str) -> Result<Vec<Row>> {
    Parser::default().rows(s)
}

/// Deserializes Excel-dialect text into records, taking column names from
/// the first row.
///
/// # Errors
///
/// Returns the first parse error, or [`Error::Record`] if a row cannot be
/// mapped onto `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    records_with_header(&Parser::default(), s)
}

/// Deserializes Excel-dialect UTF-8 bytes into records, taking column names
/// from the first row.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if the bytes are not valid UTF-8, or
/// any error [`from_str`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    records_with_header(&Parser::default(), Input::from_utf8(v)?)
}

/// Deserializes Excel-dialect CSV from a reader into records, taking column
/// names from the first row.
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let points: Vec<Point> = from_reader(Cursor::new(b"x,y\n1,2\n")).unwrap();
/// assert_eq!(points, vec![Point { x: 1, y: 2 }]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or any error [`from_slice`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<Vec<T>>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let input = Input::from_reader(reader)?;
    from_slice(input.as_bytes())
}
