//! # ldapber
//!
//! Core conversion traits shared by the ldapber crates.
//!
//! ## Overview
//!
//! LDAP protocol elements move between two representations:
//! ```text
//! Vec<u8> (BER bytes) ⇄ Attribute / Control
//! ```
//!
//! The `Decoder` trait covers the bytes → element direction and the `Encoder`
//! trait covers the element → bytes direction. The `ber` crate provides the
//! cursor-level reader and writer; the `ldap` crate implements these traits
//! on top of it.
//!
//! ## Type Safety
//!
//! Both traits are constrained by marker traits (`DecodableFrom` and
//! `EncodableTo`) so only explicitly declared conversions compile.
//!
//! ## Example
//!
//! ```ignore
//! use ldapber::decoder::Decoder;
//! use ldapber::encoder::Encoder;
//! use ldap::Attribute;
//!
//! let attr = Attribute::with_values("cn", ["foo"]).unwrap();
//! let bytes: Vec<u8> = attr.encode().unwrap();
//! let decoded: Attribute = bytes.decode().unwrap();
//! assert_eq!(attr, decoded);
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
