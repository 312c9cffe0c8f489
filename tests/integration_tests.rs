use serde_csvkit::{
    row, rows_from_str, Dialect, Error, ErrorKind, Field, Flow, Input, Parser, QuoteStyle, Row,
};

fn rows(dialect: Dialect, input: &str) -> Result<Vec<Row>, Error> {
    Parser::new(dialect)?.rows(input)
}

#[test]
fn test_valid_dialects_construct() {
    let dialects = [
        Dialect::EXCEL,
        Dialect::EXCEL_TAB,
        Dialect::new().with_delimiter(b';').with_quote_char(b'\''),
        Dialect::new()
            .with_escape_char(b'\\')
            .with_double_quote(false),
        Dialect::new().with_quote_style(QuoteStyle::NonNumeric),
        Dialect::EXCEL.with_escape_char(b'"'),
        Dialect::EXCEL.with_escape_char(b','),
        Dialect::EXCEL_TAB.with_escape_char(b'\t'),
        Dialect::new().with_delimiter(b'\n'),
    ];

    for dialect in dialects {
        assert!(Parser::new(dialect).is_ok(), "{:?}", dialect);
    }
}

#[test]
fn test_invalid_dialects_fail_construction() {
    let dialects = [
        Dialect::new().with_delimiter(b'"'),
        Dialect::new().with_double_quote(false),
        Dialect::new()
            .with_escape_char(b',')
            .with_double_quote(false),
        Dialect::new()
            .with_escape_char(b'"')
            .with_double_quote(false),
    ];

    for dialect in dialects {
        let err = Parser::new(dialect).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDialect, "{:?}", dialect);
    }
}

#[test]
fn test_simple_row() {
    let parsed = rows(Dialect::EXCEL, "a,b,c\n").unwrap();
    assert_eq!(parsed, vec![row!["a", "b", "c"]]);
}

#[test]
fn test_quoted_embedded_delimiter() {
    let parsed = rows(Dialect::EXCEL, "\"a,b\",c\n").unwrap();
    assert_eq!(parsed, vec![row!["a,b", "c"]]);
}

#[test]
fn test_doubled_quote() {
    let parsed = rows(Dialect::EXCEL, "\"a\"\"b\",c\n").unwrap();
    assert_eq!(parsed, vec![row!["a\"b", "c"]]);
}

#[test]
fn test_escaped_quote() {
    let dialect = Dialect::EXCEL
        .with_double_quote(false)
        .with_escape_char(b'\\');
    let parsed = rows(dialect, "\"a\\\"b\",c\n").unwrap();
    assert_eq!(parsed, vec![row!["a\"b", "c"]]);
}

#[test]
fn test_unterminated_quote_is_an_error_in_both_modes() {
    for strict in [false, true] {
        let err = rows(Dialect::EXCEL.with_strict(strict), "\"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedQuoting);
        assert_eq!(err.line(), Some(1));
        assert_eq!(err.field(), Some(1));
    }
}

#[test]
fn test_data_after_closing_quote() {
    let lenient = rows(Dialect::EXCEL.with_strict(false), "\"abc\"def,x\n").unwrap();
    assert_eq!(lenient, vec![row!["abcdef", "x"]]);

    let err = rows(Dialect::EXCEL.with_strict(true), "\"abc\"def,x\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedQuoting);
    assert_eq!(err.line(), Some(1));
    assert_eq!(err.field(), Some(1));
}

#[test]
fn test_non_numeric_style() {
    let dialect = Dialect::EXCEL.with_quote_style(QuoteStyle::NonNumeric);

    let err = rows(dialect, "1.5,\"2.5\",abc\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidNumericField);
    assert_eq!(err.field(), Some(3));
    assert_eq!(err.line(), Some(1));

    let parsed = rows(dialect, "1.5,\"2.5\"\n").unwrap();
    assert_eq!(
        parsed,
        vec![vec![Field::Number(1.5), Field::Text("2.5".to_string())]]
    );
}

#[test]
fn test_non_numeric_errors_even_when_lenient() {
    let dialect = Dialect::EXCEL
        .with_quote_style(QuoteStyle::NonNumeric)
        .with_strict(false);
    assert!(rows(dialect, "x\n").is_err());
}

#[test]
fn test_lenient_quoted_field_stays_text_under_non_numeric() {
    let dialect = Dialect::EXCEL.with_quote_style(QuoteStyle::NonNumeric);
    let parsed = rows(dialect, "\"1\"2,3\n").unwrap();
    assert_eq!(parsed, vec![vec![Field::from("12"), Field::Number(3.0)]]);
}

#[test]
fn test_early_stop_delivers_one_field() {
    let mut delivered = Vec::new();
    let result = Parser::default().parse_fields("a,b\nc,d\ne,f\n", |value, index| {
        delivered.push((value, index));
        Flow::Stop
    });

    assert!(result.is_ok());
    assert_eq!(delivered, vec![(Field::from("a"), 0)]);
}

#[test]
fn test_line_break_conventions() {
    let parsed = rows(Dialect::EXCEL, "a,b\r\nc,d\n").unwrap();
    assert_eq!(parsed, vec![row!["a", "b"], row!["c", "d"]]);

    let unix = rows(Dialect::EXCEL, "a,b\nc,d\n").unwrap();
    let old_mac = rows(Dialect::EXCEL, "a,b\rc,d\r").unwrap();
    assert_eq!(parsed, unix);
    assert_eq!(parsed, old_mac);
}

#[test]
fn test_empty_input() {
    assert!(rows_from_str("").unwrap().is_empty());
    assert!(Parser::default().fields("").unwrap().is_empty());
}

#[test]
fn test_tab_dialect() {
    let parsed = rows(Dialect::EXCEL_TAB, "a,b\tc\n").unwrap();
    assert_eq!(parsed, vec![row!["a,b", "c"]]);
}

#[test]
fn test_field_indices_restart_each_row() {
    let mut indices = Vec::new();
    Parser::default()
        .parse_fields("a,b,c\nd,e\n", |_, index| {
            indices.push(index);
            Flow::Continue
        })
        .unwrap();
    assert_eq!(indices, vec![0, 1, 2, 0, 1]);
}

#[test]
fn test_error_on_later_line() {
    let err = rows(
        Dialect::EXCEL.with_strict(true),
        "a,b\r\n\"x\ny\",z\nc,\"d\"e\n",
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedQuoting);
    assert_eq!(err.line(), Some(4));
    assert_eq!(err.field(), Some(2));
    assert!(err.to_string().contains("line 4, field 2"));
}

#[test]
fn test_inputs_of_every_representation_agree() {
    let parser = Parser::default();
    let text = String::from("x,\"y\"\n");
    let bytes = text.clone().into_bytes();

    let expected = vec![row!["x", "y"]];
    assert_eq!(parser.rows(text.as_str()).unwrap(), expected);
    assert_eq!(parser.rows(&text).unwrap(), expected);
    assert_eq!(parser.rows(&bytes).unwrap(), expected);
    assert_eq!(parser.rows(bytes.as_slice()).unwrap(), expected);
    assert_eq!(
        parser
            .rows(Input::from_utf8_with_len(&bytes, bytes.len()).unwrap())
            .unwrap(),
        expected
    );
}
