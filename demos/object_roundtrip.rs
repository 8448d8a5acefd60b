//! Domain objects through serde and through `RdaConvertible`.
//!
//! Run with: cargo run --example object_roundtrip

use rda::{from_str, to_string, to_string_formatted, Rda, RdaConvertible};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Address {
    street: String,
    city: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Role {
    Admin,
    Member { since: u16 },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: u32,
    email: Option<String>,
    address: Address,
    roles: Vec<Role>,
}

#[derive(Debug, Default, PartialEq)]
struct Point {
    x: i64,
    y: i64,
}

impl RdaConvertible for Point {
    fn to_rda(&self) -> rda::Result<Rda> {
        let mut rda = Rda::new();
        rda.set_value(0, self.x.to_string())?;
        rda.set_value(1, self.y.to_string())?;
        Ok(rda)
    }

    fn from_rda(&mut self, rda: &mut Rda) -> rda::Result<()> {
        for (index, field) in [&mut self.x, &mut self.y].into_iter().enumerate() {
            let value = rda.get_value(index)?;
            *field = value
                .parse()
                .map_err(|_| rda::Error::type_mismatch("i64", &value))?;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let person = Person {
        name: "Michael Chen".to_string(),
        age: 41,
        email: None,
        address: Address {
            street: "2 Elm St; Apt 3".to_string(),
            city: "Oakland".to_string(),
        },
        roles: vec![Role::Admin, Role::Member { since: 2019 }],
    };

    // Fields are stored by position, in declaration order
    let text = to_string(&person)?;
    println!("Compact:\n{}\n", text);
    println!("Formatted:\n{}\n", to_string_formatted(&person)?);

    let back: Person = from_str(&text)?;
    assert_eq!(back, person);
    println!("✓ Serde round-trip successful");

    // Hand-written mapping
    let point = Point { x: 3, y: -4 };
    let encoded = point.to_rda()?.to_string();
    println!("Point: {}", encoded);

    let mut decoded = Point::default();
    decoded.from_rda(&mut Rda::parse(&encoded))?;
    assert_eq!(decoded, point);
    println!("✓ RdaConvertible round-trip successful");

    Ok(())
}
