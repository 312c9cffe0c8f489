//! Mapping rows onto structs, by header or by explicit names.
//!
//! Run with: cargo run --example records

use serde::Deserialize;
use serde_csvkit::{from_str, Dialect, QuoteStyle, RecordParser};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Part {
    sku: String,
    qty: u32,
    weight: Option<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let parts: Vec<Part> = from_str("sku,qty,weight\nA-1,4,0.5\nB-2,9,\n")?;
    println!("{:#?}", parts);

    // Headerless, NonNumeric data with names supplied by the caller
    let dialect = Dialect::EXCEL.with_quote_style(QuoteStyle::NonNumeric);
    let parser = RecordParser::new(dialect, ["sku", "qty", "weight"])?;
    let records = parser.dynamic_records("\"C-3\",2,1.25\n")?;
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
