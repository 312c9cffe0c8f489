//! Field values produced by the tokenizer.
//!
//! A [`Field`] is the atomic output unit of a parse: either text, or a number
//! when the dialect uses [`QuoteStyle::NonNumeric`](crate::QuoteStyle::NonNumeric)
//! and the field was not quoted in the source. A [`Row`] is the ordered
//! sequence of fields of one record.
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvkit::{Field, Row};
//!
//! let row: Row = vec![Field::from("widget"), Field::from(9.5)];
//!
//! assert_eq!(row[0].as_str(), Some("widget"));
//! assert_eq!(row[1].as_f64(), Some(9.5));
//! assert!(row[1].is_number());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One value between two structural delimiters.
///
/// Fields carry no position metadata; positions are only reported on error.
///
/// # Examples
///
/// ```rust
/// use serde_csvkit::Field;
///
/// let text = Field::Text("abc".to_string());
/// let number = Field::Number(1.5);
///
/// assert!(text.is_text());
/// assert_eq!(number.to_string(), "1.5");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Text(String),
    Number(f64),
}

/// An ordered sequence of fields terminated by a record boundary.
pub type Row = Vec<Field>;

impl Field {
    /// Returns `true` if the field holds text.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Field::Text(_))
    }

    /// Returns `true` if the field holds a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Field::Number(_))
    }

    /// If the field is text, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Field;
    ///
    /// assert_eq!(Field::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Field::from(4.0).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            Field::Number(_) => None,
        }
    }

    /// If the field is a number, returns it. Otherwise returns `None`.
    ///
    /// Text is never coerced here; see the record mapper for that.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(*n),
            Field::Text(_) => None,
        }
    }

    /// Returns `true` for empty text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Field::Text(s) if s.is_empty())
    }

    /// Consumes the field, returning its text form.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Field::Text(s) => s,
            Field::Number(n) => n.to_string(),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::Text(String::new())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(s) => f.write_str(s),
            Field::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Text(s) => serializer.serialize_str(s),
            Field::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a number")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Field::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Field::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Field::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Field::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Field::Text(value))
            }
        }

        deserializer.deserialize_any(FieldVisitor)
    }
}

impl TryFrom<Field> for f64 {
    type Error = crate::Error;

    fn try_from(value: Field) -> crate::Result<Self> {
        match value {
            Field::Number(n) => Ok(n),
            Field::Text(s) => Err(crate::Error::custom(format!(
                "expected number, found text {:?}",
                s
            ))),
        }
    }
}

impl From<Field> for String {
    fn from(value: Field) -> Self {
        value.into_string()
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

impl From<f32> for Field {
    fn from(value: f32) -> Self {
        Field::Number(f64::from(value))
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Field::Number(f64::from(value))
    }
}

impl From<u32> for Field {
    fn from(value: u32) -> Self {
        Field::Number(f64::from(value))
    }
}

impl PartialEq<str> for Field {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<f64> for Field {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(Field::Number(2.5)).unwrap(), 2.5);
        assert!(f64::try_from(Field::from("2.5")).is_err());
    }

    #[test]
    fn test_into_string() {
        assert_eq!(String::from(Field::from("abc")), "abc");
        assert_eq!(Field::Number(1.5).into_string(), "1.5");
        assert_eq!(Field::Number(3.0).into_string(), "3");
    }

    #[test]
    fn test_comparisons_with_primitives() {
        assert_eq!(Field::from("a"), "a");
        assert_eq!(Field::from(1.5), 1.5);
        assert_ne!(Field::from("1.5"), 1.5);
    }

    #[test]
    fn test_json_roundtrip_keeps_kind() {
        let row: Row = vec![Field::from("x"), Field::from(2.0)];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["x",2.0]"#);

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_empty() {
        assert!(Field::default().is_empty());
        assert!(!Field::from(" ").is_empty());
        assert!(!Field::from(0.0).is_empty());
    }
}
