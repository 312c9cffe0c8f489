//! Name-addressed records.
//!
//! [`Record`] pairs each field of a row with a column name, keeping the
//! column order of the row. It is the dynamic counterpart of mapping rows onto
//! a `#[derive(Deserialize)]` struct, for when the columns are only known at
//! runtime.
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvkit::{Field, Record};
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), Field::from("bolt"));
//! record.insert("qty".to_string(), Field::from("4"));
//!
//! assert_eq!(record.len(), 2);
//! assert_eq!(record.get("name").and_then(|f| f.as_str()), Some("bolt"));
//! assert_eq!(record["qty"], "4");
//! ```

use crate::Field;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// An ordered map of column names to fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(IndexMap<String, Field>);

impl Record {
    /// Creates an empty `Record`.
    #[must_use]
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Creates an empty `Record` with room for `capacity` columns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::Record;
    ///
    /// let record = Record::with_capacity(8);
    /// assert!(record.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Record(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field under `name`, returning the field it replaced.
    ///
    /// A replaced name keeps its original column position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Field, Record};
    ///
    /// let mut record = Record::new();
    /// assert!(record.insert("id".to_string(), Field::from("1")).is_none());
    /// assert!(record.insert("id".to_string(), Field::from("2")).is_some());
    /// ```
    pub fn insert(&mut self, name: String, field: Field) -> Option<Field> {
        self.0.insert(name, field)
    }

    /// Returns the field stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the column names, in column order.
    pub fn names(&self) -> indexmap::map::Keys<'_, String, Field> {
        self.0.keys()
    }

    /// Returns an iterator over the fields, in column order.
    pub fn fields(&self) -> indexmap::map::Values<'_, String, Field> {
        self.0.values()
    }

    /// Returns an iterator over `(name, field)` pairs, in column order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvkit::{Field, Record};
    ///
    /// let record: Record = vec![
    ///     ("a".to_string(), Field::from("1")),
    ///     ("b".to_string(), Field::Number(2.0)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let names: Vec<&str> = record.iter().map(|(name, _)| name.as_str()).collect();
    /// assert_eq!(names, vec!["a", "b"]);
    /// ```
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Field> {
        self.0.iter()
    }
}

impl Index<&str> for Record {
    type Output = Field;

    /// # Panics
    ///
    /// Panics if `name` is not a column of this record.
    fn index(&self, name: &str) -> &Field {
        &self.0[name]
    }
}

impl IntoIterator for Record {
    type Item = (String, Field);
    type IntoIter = indexmap::map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Field)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Field)>>(iter: T) -> Self {
        Record(IndexMap::from_iter(iter))
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, field) in &self.0 {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_is_kept() {
        let record: Record = vec![
            ("z".to_string(), Field::from("1")),
            ("a".to_string(), Field::from("2")),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = record.names().cloned().collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_serializes_as_json_object() {
        let record: Record = vec![
            ("name".to_string(), Field::from("bolt")),
            ("price".to_string(), Field::from(0.25)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"bolt","price":0.25}"#);
    }
}
