//! Parsing an RDA string, reading values and writing them back.
//!
//! Run with: cargo run --example simple

use rda::Rda;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Build a flat list of three values
    let mut container = Rda::new();
    container.set_value(0, "One")?;
    container.set_value(1, "Two")?;
    container.set_value(2, "Three")?;

    let text = container.to_string();
    println!("Encoded: {}", text);

    // A receiver needs nothing but the string
    let mut received = Rda::parse(&text);
    println!("Third value: {}", received.get_value(2)?);
    println!("Dimension: {}", received.dimension());

    // Values may contain the delimiter and escape characters
    received.set_value(3, "a|b\\c")?;
    println!("With escapes: {}", received);

    let mut again: Rda = received.to_string().parse()?;
    assert_eq!(again.get_value(3)?, "a|b\\c");
    println!("✓ Round-trip successful");

    // A string without a header is a single scalar
    let scalar = Rda::parse("just text");
    println!("Scalar: {:?} (dimension {})", scalar.scalar_value(), scalar.dimension());

    Ok(())
}
