/// Builds a [`Row`](crate::Row) from literals.
///
/// String literals become text fields and numeric literals become number
/// fields, through [`Field::from`](crate::Field).
///
/// ```rust
/// use serde_csvkit::{row, Field};
///
/// let r = row!["bolt", 0.25];
/// assert_eq!(r, vec![Field::from("bolt"), Field::Number(0.25)]);
/// assert!(row![].is_empty());
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };

    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Field::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::{Field, Row};

    #[test]
    fn test_row_macro_empty() {
        let r: Row = row![];
        assert!(r.is_empty());
    }

    #[test]
    fn test_row_macro_mixed() {
        let r = row!["a", 1.5, String::from("b"),];
        assert_eq!(
            r,
            vec![
                Field::Text("a".to_string()),
                Field::Number(1.5),
                Field::Text("b".to_string())
            ]
        );
    }
}
