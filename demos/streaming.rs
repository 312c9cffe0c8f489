//! Field streaming, early stop and error positions.
//!
//! Run with: cargo run --example streaming

use serde_csvkit::{Dialect, Flow, Parser};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let parser = Parser::new(Dialect::EXCEL.with_strict(true))?;

    // Read only the header row
    let mut header = Vec::new();
    parser.parse_fields("id,name,total\n1,Ann,3.5\n", |value, index| {
        header.push(value.into_string());
        if index == 2 {
            Flow::Stop
        } else {
            Flow::Continue
        }
    })?;
    println!("header: {:?}", header);

    // Strict mode rejects data after a closing quote
    match parser.rows("id,name\n1,\"Ann\"e\n") {
        Ok(rows) => println!("parsed {} rows", rows.len()),
        Err(e) => println!(
            "error at line {:?}, field {:?}: {}",
            e.line(),
            e.field(),
            e
        ),
    }

    Ok(())
}
