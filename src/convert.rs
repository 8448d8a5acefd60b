//! Hand-written conversion between domain objects and [`Rda`] trees.
//!
//! Serde covers most types. [`RdaConvertible`] is for types that want to pick
//! their own layout, typically addressing fields by index:
//!
//! ```rust
//! use rda::{Rda, RdaConvertible, Result};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Address {
//!     street: String,
//!     city: String,
//! }
//!
//! impl RdaConvertible for Address {
//!     fn to_rda(&self) -> Result<Rda> {
//!         let mut rda = Rda::new();
//!         rda.set_value(0, self.street.as_str())?;
//!         rda.set_value(1, self.city.as_str())?;
//!         Ok(rda)
//!     }
//!
//!     fn from_rda(&mut self, rda: &mut Rda) -> Result<()> {
//!         self.street = rda.get_value(0)?;
//!         self.city = rda.get_value(1)?;
//!         Ok(())
//!     }
//! }
//!
//! let address = Address { street: "1 Main St".into(), city: "Springfield".into() };
//! let text = address.to_rda().unwrap().to_string();
//! assert_eq!(text, "|\\|1 Main St|Springfield");
//!
//! let mut back = Address::default();
//! back.from_rda(&mut Rda::parse(&text)).unwrap();
//! assert_eq!(back, address);
//! ```

use crate::{Rda, Result};

/// A type with its own mapping to and from an [`Rda`] tree.
///
/// `from_rda` takes the tree mutably because reading through the addressing
/// API may grow it with placeholders.
pub trait RdaConvertible {
    /// Builds a tree holding this object's state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionLimit`](crate::Error::DimensionLimit) if the
    /// object is nested too deeply to encode.
    fn to_rda(&self) -> Result<Rda>;

    /// Overwrites this object's state from `rda`.
    ///
    /// # Errors
    ///
    /// Implementations report values they cannot interpret.
    fn from_rda(&mut self, rda: &mut Rda) -> Result<()>;
}

impl RdaConvertible for Rda {
    fn to_rda(&self) -> Result<Rda> {
        Ok(self.clone())
    }

    fn from_rda(&mut self, rda: &mut Rda) -> Result<()> {
        self.set_rda_at(&[], rda.clone())
    }
}
