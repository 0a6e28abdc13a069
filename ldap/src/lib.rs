//! LDAP wire types
//!
//! BER encoding and decoding of the two protocol elements that are shared by
//! most LDAP operations (RFC 4511):
//! - [`Attribute`]: an attribute description with an ordered list of values
//! - [`Control`]: an extension attached to an LDAP message
//!
//! Both work on a caller-owned [`ber::BerReader`] / [`ber::BerWriter`] and
//! also implement the `ldapber` `Decoder`/`Encoder` traits for whole byte
//! buffers.
//!
//! ```
//! use ldap::{Attribute, Control};
//! use ldapber::decoder::Decoder;
//! use ldapber::encoder::Encoder;
//!
//! let attr = Attribute::with_values("cn", ["Barbara Jensen", "Babs"]).unwrap();
//! let bytes: Vec<u8> = attr.encode().unwrap();
//! let decoded: Attribute = bytes.decode().unwrap();
//! assert_eq!(decoded.decoded_values(), vec!["Barbara Jensen", "Babs"]);
//!
//! let control = Control::new("1.2.840.113556.1.4.805", true);
//! let bytes: Vec<u8> = control.encode().unwrap();
//! assert_eq!(bytes.len(), 29);
//! ```

pub mod attribute;
pub mod control;
pub mod encoding;
pub mod error;

pub use attribute::{
    Attribute, AttributeCandidate, AttributeJson, AttributeLike, AttributeValue,
    compare_attribute_like,
};
pub use control::{Control, ControlJson};
pub use encoding::ValueEncoding;
pub use error::{Error, Result};
