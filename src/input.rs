//! Input adapters.
//!
//! The tokenizer works on one normalized byte sequence, [`Input`]. Raw byte
//! buffers and Rust strings convert into it for free; the `from_utf8*`
//! constructors validate the encoding first so that invalid bytes are rejected
//! before any field is produced.
//!
//! ```rust
//! use serde_csvkit::Input;
//!
//! let from_text = Input::from("a,b\n");
//! let from_bytes = Input::from(&b"a,b\n"[..]);
//! assert_eq!(from_text.as_bytes(), from_bytes.as_bytes());
//!
//! assert!(Input::from_utf8(b"ok,\xff\n").is_err());
//! ```

use crate::dialect::is_line_break;
use crate::{Error, Result};
use std::borrow::Cow;
use std::io;

/// A byte sequence handed to the tokenizer as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> Input<'a> {
    /// Wraps raw bytes without validation.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Input {
            bytes: Cow::Borrowed(bytes),
        }
    }

    /// Wraps bytes after checking that they are valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] with the line of the first invalid byte.
    pub fn from_utf8(bytes: &'a [u8]) -> Result<Self> {
        if let Err(e) = std::str::from_utf8(bytes) {
            let line = line_of(bytes, e.valid_up_to());
            return Err(Error::invalid_encoding(line, &e.to_string()));
        }
        Ok(Input::new(bytes))
    }

    /// Wraps the first `len` bytes of a UTF-8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] if `len` exceeds the buffer, or
    /// [`Error::InvalidEncoding`] if the prefix is not valid UTF-8.
    pub fn from_utf8_with_len(bytes: &'a [u8], len: usize) -> Result<Self> {
        let prefix = bytes.get(..len).ok_or_else(|| {
            Error::custom(format!(
                "length {} exceeds buffer of {} bytes",
                len,
                bytes.len()
            ))
        })?;
        Input::from_utf8(prefix)
    }

    /// Pulls all bytes from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Input<'static>> {
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .map_err(|e| Error::io(&e.to_string()))?;
        Ok(Input::from(buffer))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 1-based line containing byte offset `pos`; `\r\n` counts once.
fn line_of(bytes: &[u8], pos: usize) -> usize {
    let mut line = 1;
    let mut prev = 0u8;
    for &byte in &bytes[..pos] {
        if is_line_break(byte) && !(byte == b'\n' && prev == b'\r') {
            line += 1;
        }
        prev = byte;
    }
    line
}

impl<'a> From<&'a Input<'_>> for Input<'a> {
    fn from(input: &'a Input<'_>) -> Self {
        Input::new(input.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Input::new(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::new(bytes)
    }
}

impl From<Vec<u8>> for Input<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Input {
            bytes: Cow::Owned(bytes),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::new(text.as_bytes())
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::new(text.as_bytes())
    }
}

impl From<String> for Input<'static> {
    fn from(text: String) -> Self {
        Input::from(text.into_bytes())
    }
}
