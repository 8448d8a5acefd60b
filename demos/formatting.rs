//! Compact and formatted layouts, output options and custom encodings.
//!
//! Run with: cargo run --example formatting

use rda::{Encoding, LineBreak, Rda, RdaOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut sections = Rda::new();
    sections.set_children_values(["SEC0", "SEC1"])?;
    sections.add_rda(None)?;
    sections.add_value("SEC3")?;
    sections.set_value_at(&[1, 1], "SEC1b")?;

    println!("Compact (V1):\n{}\n", sections);
    println!("Formatted (V2):\n{}\n", sections.to_string_formatted());

    // Unix line breaks and wider indentation
    let options = RdaOptions::formatted()
        .with_line_break(LineBreak::Lf)
        .with_indent(4);
    let formatted = sections.to_string_with_options(options);
    println!("Formatted with LF, indent 4:\n{}\n", formatted);

    // Formatted input is detected when parsing
    let parsed = Rda::parse(&formatted);
    assert_eq!(parsed.to_string(), sections.to_string());
    println!("✓ Formatted text reads back as {}", parsed);

    // Choose the delimiters yourself
    let encoding = Encoding::with_delimiters(['&', '_'], '/')?;
    let mut custom = Rda::with_encoding(encoding);
    custom.set_value_at(&[0, 0], "a&b")?;
    custom.set_value_at(&[0, 1], "c_d")?;
    custom.set_value(1, "e")?;
    println!("Custom encoding: {}", custom);
    println!("Delimiters in use: {:?}", custom.delimiters_in_use());

    // Equality ignores which characters were used
    assert_eq!(Rda::parse(&custom.to_string()), Rda::parse("|;\\|a&b;c_d|e"));
    println!("✓ Equal to the same tree with default delimiters");

    Ok(())
}
