//! Parsing rows with the Excel dialect.
//!
//! Run with: cargo run --example simple

use serde_csvkit::{rows_from_str, Dialect, Parser};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let csv = "name,city\r\n\"Johnson, Alice\",Berlin\r\nBob,\"São \"\"Paulo\"\"\"\r\n";

    for row in rows_from_str(csv)? {
        println!("{:?}", row);
    }

    // Same data, tab separated
    let tsv = "name\tcity\nAlice\tBerlin\n";
    let rows = Parser::new(Dialect::EXCEL_TAB)?.rows(tsv)?;
    println!("\n{} rows from TSV", rows.len());

    Ok(())
}
