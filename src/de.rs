//! Mapping rows onto records.
//!
//! A [`RecordMapper`] holds an ordered list of column names and assigns
//! `row[i]` to `names[i]`. Rows may carry extra trailing fields, which are
//! ignored; a row with fewer fields than names is an error.
//!
//! Records are produced through Serde, so any `#[derive(Deserialize)]` struct
//! works as a target. Text fields are coerced to the target type on demand
//! (integers, floats, booleans, chars, unit enum variants); an empty field
//! deserializes as `None` for `Option` targets.
//!
//! Targets that deserialize as a sequence or tuple receive the fields
//! positionally and ignore the names entirely.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_csvkit::{Dialect, RecordParser};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Part { name: String, qty: u32, weight: Option<f64> }
//!
//! let parser = RecordParser::new(Dialect::EXCEL, ["name", "qty", "weight"]).unwrap();
//! let parts: Vec<Part> = parser.records("bolt,4,0.5\nnut,9,\n").unwrap();
//!
//! assert_eq!(parts[0], Part { name: "bolt".into(), qty: 4, weight: Some(0.5) });
//! assert_eq!(parts[1].weight, None);
//! ```

use crate::{Dialect, Error, Field, Flow, Input, Parser, Record, Result, Row};
use log::debug;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::str::FromStr;

/// Assigns row fields to column names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordMapper {
    names: Vec<String>,
}

impl RecordMapper {
    /// Creates a mapper for the given column names, in column order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordMapper {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Uses the fields of a header row as column names.
    #[must_use]
    pub fn from_header(header: Row) -> Self {
        RecordMapper::new(header.into_iter().map(Field::into_string))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn check_width(&self, row: &Row) -> Result<()> {
        if self.names.len() > row.len() {
            return Err(Error::FieldCount {
                expected: self.names.len(),
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Pairs each name with its field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCount`] if the row is shorter than the name list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{row, RecordMapper};
    ///
    /// let mapper = RecordMapper::new(["a", "b"]);
    /// let record = mapper.to_record(row!["1", "2", "extra"]).unwrap();
    ///
    /// assert_eq!(record.len(), 2);
    /// assert_eq!(record["b"], "2");
    /// assert!(mapper.to_record(row!["1"]).is_err());
    /// ```
    pub fn to_record(&self, row: Row) -> Result<Record> {
        self.check_width(&row)?;
        Ok(self.names.iter().cloned().zip(row).collect())
    }

    /// Deserializes one row into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCount`] for short rows mapped by name, or a
    /// [`Error::Custom`] when a field cannot be coerced to its target type.
    pub fn deserialize<T>(&self, row: Row) -> Result<T>
    where
        T: DeserializeOwned,
    {
        T::deserialize(RowDeserializer::new(&self.names, row))
    }
}

/// Parses input and maps every row onto a record.
///
/// Each row is numbered from 1; mapping failures are reported as
/// [`Error::Record`] carrying that number.
#[derive(Clone, Debug)]
pub struct RecordParser {
    parser: Parser,
    mapper: RecordMapper,
}

impl RecordParser {
    /// Creates a record parser for `dialect` and the given column names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDialect`] if the dialect is invalid.
    pub fn new<I, S>(dialect: Dialect, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(RecordParser::with_mapper(
            Parser::new(dialect)?,
            RecordMapper::new(names),
        ))
    }

    #[must_use]
    pub fn with_mapper(parser: Parser, mapper: RecordMapper) -> Self {
        debug!("mapping rows onto {} names", mapper.names.len());
        RecordParser { parser, mapper }
    }

    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    #[must_use]
    pub fn mapper(&self) -> &RecordMapper {
        &self.mapper
    }

    /// Streams one `T` per row to `consumer`.
    ///
    /// # Errors
    ///
    /// Returns the first parse or mapping error.
    pub fn parse_records<'a, T, I, F>(&self, input: I, consumer: F) -> Result<()>
    where
        T: DeserializeOwned,
        I: Into<Input<'a>>,
        F: FnMut(T) -> Flow,
    {
        self.drive(input, RecordMapper::deserialize::<T>, consumer)
    }

    /// Collects one `T` per row.
    ///
    /// # Errors
    ///
    /// Returns the first parse or mapping error.
    pub fn records<'a, T, I>(&self, input: I) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        I: Into<Input<'a>>,
    {
        let mut records = Vec::new();
        self.parse_records(input, |record| {
            records.push(record);
            Flow::Continue
        })?;
        Ok(records)
    }

    /// Streams one name-addressed [`Record`] per row to `consumer`.
    ///
    /// # Errors
    ///
    /// Returns the first parse error, or [`Error::Record`] for a short row.
    pub fn parse_dynamic<'a, I, F>(&self, input: I, consumer: F) -> Result<()>
    where
        I: Into<Input<'a>>,
        F: FnMut(Record) -> Flow,
    {
        self.drive(input, RecordMapper::to_record, consumer)
    }

    /// Collects one name-addressed [`Record`] per row.
    ///
    /// # Errors
    ///
    /// Returns the first parse error, or [`Error::Record`] for a short row.
    pub fn dynamic_records<'a, I>(&self, input: I) -> Result<Vec<Record>>
    where
        I: Into<Input<'a>>,
    {
        let mut records = Vec::new();
        self.parse_dynamic(input, |record| {
            records.push(record);
            Flow::Continue
        })?;
        Ok(records)
    }

    fn drive<'a, T, I, M, F>(&self, input: I, map: M, mut consumer: F) -> Result<()>
    where
        I: Into<Input<'a>>,
        M: Fn(&RecordMapper, Row) -> Result<T>,
        F: FnMut(T) -> Flow,
    {
        let mut row_number = 0usize;
        let mut failure = None;

        self.parser.parse_rows(input, |row| {
            row_number += 1;
            match map(&self.mapper, row) {
                Ok(record) => consumer(record),
                Err(e) => {
                    failure = Some(e.at_row(row_number));
                    Flow::Stop
                }
            }
        })?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Deserializes every row after the first, using the first row as names.
///
/// Rows are numbered from 1 including the header, so the first data row is
/// row 2 in error reports. Empty input yields no records.
///
/// # Errors
///
/// Returns the first parse or mapping error.
pub fn records_with_header<'a, T, I>(parser: &Parser, input: I) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    I: Into<Input<'a>>,
{
    let input = input.into();
    let mut rows = parser.rows_iter(&input);

    let mapper = match rows.next() {
        Some(header) => RecordMapper::from_header(header?),
        None => return Ok(Vec::new()),
    };
    debug!("header names: {:?}", mapper.names());

    rows.enumerate()
        .map(|(i, row)| {
            let row = row?;
            mapper.deserialize(row).map_err(|e| e.at_row(i + 2))
        })
        .collect()
}

/// Deserializer over one row: a map by name, or a sequence by position.
struct RowDeserializer<'n> {
    names: &'n [String],
    fields: Row,
}

impl<'n> RowDeserializer<'n> {
    fn new(names: &'n [String], fields: Row) -> Self {
        RowDeserializer { names, fields }
    }

    fn into_map(self) -> Result<RowMapAccess<'n>> {
        if self.names.len() > self.fields.len() {
            return Err(Error::FieldCount {
                expected: self.names.len(),
                found: self.fields.len(),
            });
        }
        Ok(RowMapAccess {
            names: self.names.iter(),
            fields: self.fields.into_iter(),
            value: None,
        })
    }
}

impl<'de, 'n> de::Deserializer<'de> for RowDeserializer<'n> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(self.into_map()?)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(RowSeqAccess {
            fields: self.fields.into_iter(),
        })
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct map struct enum identifier ignored_any
    }
}

struct RowMapAccess<'n> {
    names: std::slice::Iter<'n, String>,
    fields: std::vec::IntoIter<Field>,
    value: Option<Field>,
}

impl<'de, 'n> de::MapAccess<'de> for RowMapAccess<'n> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match (self.names.next(), self.fields.next()) {
            (Some(name), Some(field)) => {
                self.value = Some(field);
                seed.deserialize(name.as_str().into_deserializer()).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(field) => seed.deserialize(FieldDeserializer::new(field)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.names.len().min(self.fields.len()))
    }
}

struct RowSeqAccess {
    fields: std::vec::IntoIter<Field>,
}

impl<'de> de::SeqAccess<'de> for RowSeqAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some(field) => seed.deserialize(FieldDeserializer::new(field)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// Deserializer over a single field, coercing text where the target asks.
struct FieldDeserializer {
    field: Field,
}

impl FieldDeserializer {
    fn new(field: Field) -> Self {
        FieldDeserializer { field }
    }

    fn parse<T: FromStr>(&self, expected: &str) -> Result<T> {
        let text = match &self.field {
            Field::Text(s) => s.trim().to_string(),
            Field::Number(n) => n.to_string(),
        };
        text.parse::<T>()
            .map_err(|_| Error::custom(format!("cannot read {:?} as {}", text, expected)))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.field {
            Field::Text(s) => visitor.visit_string(s),
            Field::Number(n) => visitor.visit_f64(n),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.field.into_string();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::custom(format!(
                "expected a single character, found {:?}",
                text
            ))),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.field.into_string())
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.field.into_string())
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_byte_buf(self.field.into_string().into_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.field.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.field.is_empty() {
            visitor.visit_unit()
        } else {
            Err(Error::custom(format!(
                "expected an empty field, found {:?}",
                self.field.into_string()
            )))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.field {
            Field::Text(s) => visitor.visit_enum(s.into_deserializer()),
            Field::Number(n) => Err(Error::custom(format!(
                "expected enum variant name, found number {}",
                n
            ))),
        }
    }

    forward_to_deserialize_any! {
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row, ErrorKind, QuoteStyle};
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Level {
        Low,
        High,
    }

    #[test]
    fn test_struct_by_name() {
        let mapper = RecordMapper::new(["y", "x"]);
        let point: Point = mapper.deserialize(row!["2", "1"]).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mapper = RecordMapper::new(["x", "y"]);
        let point: Point = mapper.deserialize(row!["1", "2", "3"]).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_short_row_is_an_error() {
        let mapper = RecordMapper::new(["x", "y"]);
        let err = mapper.deserialize::<Point>(row!["1"]).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_positional_tuple_ignores_names() {
        let mapper = RecordMapper::new(Vec::<String>::new());
        let tuple: (String, u8, bool) = mapper.deserialize(row!["a", "7", "true"]).unwrap();
        assert_eq!(tuple, ("a".to_string(), 7, true));
    }

    #[test]
    fn test_numeric_fields_coerce() {
        let mapper = RecordMapper::new(["x", "y"]);
        let point: Point = mapper.deserialize(row![3.0, 4.0]).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });

        assert!(mapper.deserialize::<Point>(row![3.5, 4.0]).is_err());
    }

    #[test]
    fn test_enum_and_char() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Flag {
            level: Level,
            mark: char,
        }

        let mapper = RecordMapper::new(["level", "mark"]);
        let flag: Flag = mapper.deserialize(row!["high", "x"]).unwrap();
        assert_eq!(
            flag,
            Flag {
                level: Level::High,
                mark: 'x'
            }
        );
        let flag: Flag = mapper.deserialize(row!["low", "-"]).unwrap();
        assert_eq!(flag.level, Level::Low);

        assert!(mapper.deserialize::<Flag>(row!["low", "xy"]).is_err());
        assert!(mapper.deserialize::<Flag>(row!["medium", "x"]).is_err());
    }

    #[test]
    fn test_record_parser_tags_row_number() {
        let parser = RecordParser::new(Dialect::EXCEL, ["x", "y"]).unwrap();
        let err = parser.records::<Point, _>("1,2\n3,oops\n").unwrap_err();

        assert!(matches!(err, Error::Record { row: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Custom);
    }

    #[test]
    fn test_record_parser_stops_early() {
        let parser = RecordParser::new(Dialect::EXCEL, ["x", "y"]).unwrap();
        let mut seen = Vec::new();
        parser
            .parse_records("1,2\n3,4\n5,6\n", |p: Point| {
                seen.push(p);
                if seen.len() == 2 {
                    Flow::Stop
                } else {
                    Flow::Continue
                }
            })
            .unwrap();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_dynamic_records() {
        let dialect = Dialect::EXCEL.with_quote_style(QuoteStyle::NonNumeric);
        let parser = RecordParser::new(dialect, ["name", "price"]).unwrap();
        let records = parser.dynamic_records("\"bolt\",0.25\n").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "bolt");
        assert_eq!(records[0]["price"], 0.25);

        let err = parser.dynamic_records("\"nut\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldCount);
    }

    #[test]
    fn test_records_with_header() {
        let points: Vec<Point> =
            records_with_header(&Parser::default(), "y,x\n2,1\n4,3\n").unwrap();
        assert_eq!(points, vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);

        let none: Vec<Point> = records_with_header(&Parser::default(), "").unwrap();
        assert!(none.is_empty());

        let err = records_with_header::<Point, _>(&Parser::default(), "x,y\n1,2\n3\n")
            .unwrap_err();
        assert!(matches!(err, Error::Record { row: 3, .. }));
    }
}
