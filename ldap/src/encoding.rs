//! Presentation encoding of attribute values.
//!
//! Attribute values are stored as raw bytes. Whether they are shown to (and
//! accepted from) applications as UTF-8 text or as base64 depends only on
//! the attribute description: types ending in `;binary` carry binary data.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::error::{Error, Result};

const BINARY_SUFFIX: &str = ";binary";

// Padded on output. Input may omit padding and carry non-zero trailing bits.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueEncoding {
    /// Values are presented as base64.
    Binary,
    /// Values are presented as UTF-8 text.
    Text,
}

impl ValueEncoding {
    /// Resolves the encoding for an attribute description. The `;binary`
    /// suffix match is exact and case-sensitive.
    pub fn for_type(attr_type: &str) -> Self {
        if attr_type.ends_with(BINARY_SUFFIX) {
            ValueEncoding::Binary
        } else {
            ValueEncoding::Text
        }
    }

    /// Converts presented text into the raw bytes to store. Base64 input
    /// may use either the standard or the URL-safe alphabet.
    pub fn to_buffer(self, text: &str) -> Result<Vec<u8>> {
        match self {
            ValueEncoding::Text => Ok(text.as_bytes().to_vec()),
            ValueEncoding::Binary => {
                let standard: String = text
                    .chars()
                    .map(|c| match c {
                        '-' => '+',
                        '_' => '/',
                        c => c,
                    })
                    .collect();
                BASE64
                    .decode(standard)
                    .map_err(|e| Error::InvalidArgument(format!("invalid base64 value: {e}")))
            }
        }
    }

    /// Converts stored bytes into their presented form. Invalid UTF-8 in a
    /// text value is replaced with U+FFFD.
    pub fn to_text(self, raw: &[u8]) -> String {
        match self {
            ValueEncoding::Text => String::from_utf8_lossy(raw).into_owned(),
            ValueEncoding::Binary => BASE64.encode(raw),
        }
    }
}
