//! Path addressing, placeholders and compression.
//!
//! Run with: cargo run --example addressing

use rda::Rda;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut rda = Rda::parse("Xyz");
    println!("Start: {} (dimension {})", rda, rda.dimension());

    // Writing deep inside a scalar keeps the scalar at index 0
    rda.set_value_at(&[1, 2, 3], "Two")?;
    println!("After set [1,2,3]: {}", rda);
    println!("Scalar still: {}", rda.scalar_value());
    println!("Dimension now: {}", rda.dimension());

    // Reading an index that was never written returns "" and grows the tree
    let unset = rda.get_rda_at(&[4, 1])?;
    println!("Unset [4,1]: {:?}, placeholder: {}", unset.scalar_value(), unset.is_placeholder());

    // An explicit empty string is not a placeholder
    rda.set_value(5, "")?;
    println!("Index 5 placeholder: {}", rda.get_rda(5)?.is_placeholder());
    println!("Encoded: {}", rda);

    // Read-only navigation never grows the tree
    match rda.lookup(&[9, 9]) {
        Some(node) => println!("Found {}", node),
        None => println!("Nothing at [9,9]"),
    }

    // Attach a subtree written with other delimiters
    let mut base = Rda::parse("|;,\\|sec0|sec1|sec2");
    base.set_rda(1, Rda::parse("&_/&x_y&z"))?;
    println!("Attached: {}", base);

    // Compression drops levels without branching
    let mut deep = Rda::parse("A");
    deep.get_rda_at(&[0, 0, 3])?;
    println!("Grown: {} (dimension {})", deep, deep.dimension());
    println!("Minimal: {} (dimension {})", deep.to_string_minimal(), deep.dimension());

    Ok(())
}
