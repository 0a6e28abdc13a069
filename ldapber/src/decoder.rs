//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. The destination must opt in through `DecodableFrom<T>`:
//!
//! ```no_run
//! use ldapber::decoder::{Decoder, DecodableFrom};
//!
//! struct Wire(Vec<u8>);
//! struct Description(String);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! impl DecodableFrom<Wire> for Description {}
//!
//! impl Decoder<Wire, Description> for Wire {
//!     type Error = MyError;
//!
//!     fn decode(&self) -> Result<Description, Self::Error> {
//!         Ok(Description(String::from_utf8_lossy(&self.0).to_string()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination type must implement
/// `DecodableFrom<T>`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T> {}
