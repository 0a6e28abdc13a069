//! LDAP Attribute
//!
//! RFC 4511 Section 4.1.7
//!
//! ```asn1
//! PartialAttribute ::= SEQUENCE {
//!      type       AttributeDescription,
//!      vals       SET OF value AttributeValue }
//!
//! AttributeDescription ::= LDAPString
//! AttributeValue ::= OCTET STRING
//! ```
//!
//! Values are kept as the raw bytes that travel on the wire. Their textual
//! form is derived on demand from the attribute description, see
//! [`ValueEncoding`].

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use ber::{BerReader, BerWriter, TAG_OCTET_STRING, TAG_SEQUENCE, TAG_SET};
use ldapber::decoder::{DecodableFrom, Decoder};
use ldapber::encoder::{EncodableTo, Encoder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::encoding::ValueEncoding;
use crate::error::{Error, Result};

/// A value handed to an [`Attribute`] by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Presented text, converted with the attribute's [`ValueEncoding`].
    Text(String),
    /// Raw bytes, stored unchanged.
    Bytes(Vec<u8>),
}

impl AttributeValue {
    fn into_buffer(self, encoding: ValueEncoding) -> Result<Vec<u8>> {
        match self {
            AttributeValue::Text(text) => encoding.to_buffer(&text),
            AttributeValue::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        AttributeValue::Text(value.clone())
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Bytes(value)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(value: &[u8]) -> Self {
        AttributeValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for AttributeValue {
    fn from(value: [u8; N]) -> Self {
        AttributeValue::Bytes(value.to_vec())
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttributeValue {
                fn from(value: $t) -> Self {
                    AttributeValue::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_scalar!(bool, char, i32, i64, u32, u64, usize, f64);

impl TryFrom<&Value> for AttributeValue {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(AttributeValue::Text(s.clone())),
            Value::Number(n) => Ok(AttributeValue::Text(n.to_string())),
            Value::Bool(b) => Ok(AttributeValue::Text(b.to_string())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| {
                            Error::InvalidArgument("byte values must be in 0..=255".to_string())
                        })
                })
                .collect::<Result<Vec<u8>>>()
                .map(AttributeValue::Bytes),
            Value::Null | Value::Object(_) => Err(Error::InvalidArgument(
                "value must be a string, number, boolean or byte array".to_string(),
            )),
        }
    }
}

/// The capabilities shared by everything that can stand in for an
/// [`Attribute`]: a type string, string-valued values and BER encoding.
pub trait AttributeLike {
    fn attr_type(&self) -> &str;

    fn decoded_values(&self) -> Vec<String>;

    fn to_ber(&self, writer: &mut BerWriter) -> Result<()>;
}

/// Operand of [`Attribute::compare`] and [`Attribute::is_attribute`].
///
/// Only the first two variants are attribute-like. A `Record` is loosely
/// typed input such as parsed JSON; it must be converted with
/// `Attribute::try_from` before it can be compared or encoded.
#[derive(Clone, Copy)]
pub enum AttributeCandidate<'a> {
    Attribute(&'a Attribute),
    Like(&'a dyn AttributeLike),
    Record(&'a Value),
}

impl<'a> AttributeCandidate<'a> {
    pub fn as_attribute_like(&self) -> Option<&'a dyn AttributeLike> {
        match *self {
            AttributeCandidate::Attribute(attr) => Some(attr),
            AttributeCandidate::Like(like) => Some(like),
            AttributeCandidate::Record(_) => None,
        }
    }
}

impl<'a> From<&'a Attribute> for AttributeCandidate<'a> {
    fn from(attr: &'a Attribute) -> Self {
        AttributeCandidate::Attribute(attr)
    }
}

impl<'a> From<&'a Value> for AttributeCandidate<'a> {
    fn from(record: &'a Value) -> Self {
        AttributeCandidate::Record(record)
    }
}

/// JSON presentation of an attribute. Not a wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeJson {
    #[serde(rename = "type")]
    pub attr_type: String,
    pub vals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Attribute {
    attr_type: String,
    values: Vec<Vec<u8>>,
}

impl Attribute {
    /// Creates an attribute with no values.
    pub fn new(attr_type: impl Into<String>) -> Self {
        Attribute {
            attr_type: attr_type.into(),
            values: Vec::new(),
        }
    }

    /// Creates an attribute and adds `values` in order.
    pub fn with_values<I, V>(attr_type: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let mut attr = Attribute::new(attr_type);
        attr.set_values(values)?;
        Ok(attr)
    }

    pub fn attr_type(&self) -> &str {
        &self.attr_type
    }

    /// Changes the attribute description.
    ///
    /// Stored values are not re-encoded: if the change switches between
    /// text and `;binary` descriptions, [`Attribute::decoded_values`] will
    /// present the existing values with the new encoding.
    pub fn set_type(&mut self, attr_type: impl Into<String>) {
        self.attr_type = attr_type.into();
    }

    pub fn encoding(&self) -> ValueEncoding {
        ValueEncoding::for_type(&self.attr_type)
    }

    /// Appends a value, converting text with the current encoding.
    pub fn add_value(&mut self, value: impl Into<AttributeValue>) -> Result<()> {
        let buffer = value.into().into_buffer(self.encoding())?;
        self.values.push(buffer);
        Ok(())
    }

    /// Replaces every value. On error the attribute is left untouched.
    pub fn set_values<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let encoding = self.encoding();
        self.values = values
            .into_iter()
            .map(|v| v.into().into_buffer(encoding))
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }

    /// Raw value bytes in insertion order.
    pub fn buffers(&self) -> &[Vec<u8>] {
        &self.values
    }

    /// Values in their presented form, decoded with the current encoding.
    pub fn decoded_values(&self) -> Vec<String> {
        let encoding = self.encoding();
        self.values.iter().map(|v| encoding.to_text(v)).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn json(&self) -> AttributeJson {
        AttributeJson {
            attr_type: self.attr_type.clone(),
            vals: self.decoded_values(),
        }
    }

    /// Reads an attribute from `reader`. A missing value SET yields an
    /// attribute without values. Values are kept as raw bytes and must lie
    /// inside the SET, which must in turn close the outer SEQUENCE.
    pub fn parse(reader: &mut BerReader<'_>) -> Result<Self> {
        reader.read_sequence(TAG_SEQUENCE)?;
        let outer_end = reader.offset() + reader.length();
        let attr_type = reader.read_string()?;
        reader.check_within(outer_end)?;

        let mut values = Vec::new();
        if reader.offset() < outer_end && reader.peek() == Some(TAG_SET) {
            reader.read_sequence(TAG_SET)?;
            let end = reader.offset() + reader.length();
            while reader.offset() < end {
                values.push(reader.read_octet_string(TAG_OCTET_STRING)?.to_vec());
                reader.check_within(end)?;
            }
        }
        reader.expect_end(outer_end)?;

        debug!(attr_type = %attr_type, values = values.len(), "parsed attribute");
        Ok(Attribute { attr_type, values })
    }

    /// Writes the attribute to `writer`. Values are copied byte for byte;
    /// an attribute without values still gets an (empty) SET.
    pub fn to_ber(&self, writer: &mut BerWriter) -> Result<()> {
        writer.start_sequence(TAG_SEQUENCE);
        writer.write_string(&self.attr_type)?;
        writer.start_sequence(TAG_SET);
        for value in &self.values {
            writer.write_octet_string(value)?;
        }
        writer.end_sequence()?;
        writer.end_sequence()?;

        debug!(attr_type = %self.attr_type, values = self.values.len(), "encoded attribute");
        Ok(())
    }

    /// Reports whether `candidate` has the attribute capabilities.
    pub fn is_attribute(candidate: &AttributeCandidate<'_>) -> bool {
        candidate.as_attribute_like().is_some()
    }

    /// Total order over attribute-like operands: by type, then by number
    /// of values, then by decoded values in stored order.
    pub fn compare(a: AttributeCandidate<'_>, b: AttributeCandidate<'_>) -> Result<Ordering> {
        match (a.as_attribute_like(), b.as_attribute_like()) {
            (Some(a), Some(b)) => Ok(compare_attribute_like(a, b)),
            _ => Err(Error::InvalidArgument(
                "can only compare Attributes".to_string(),
            )),
        }
    }
}

/// Ordering used by [`Attribute::compare`] once both operands are known to
/// be attribute-like.
pub fn compare_attribute_like(a: &dyn AttributeLike, b: &dyn AttributeLike) -> Ordering {
    let a_values = a.decoded_values();
    let b_values = b.decoded_values();
    a.attr_type()
        .cmp(b.attr_type())
        .then_with(|| a_values.len().cmp(&b_values.len()))
        .then_with(|| a_values.cmp(&b_values))
}

impl AttributeLike for Attribute {
    fn attr_type(&self) -> &str {
        &self.attr_type
    }

    fn decoded_values(&self) -> Vec<String> {
        Attribute::decoded_values(self)
    }

    fn to_ber(&self, writer: &mut BerWriter) -> Result<()> {
        Attribute::to_ber(self, writer)
    }
}

impl TryFrom<&Value> for Attribute {
    type Error = Error;

    /// Validates a `{ "type": .., "vals": .. }` record. `vals` may be a
    /// single value or an array; byte values are arrays of numbers.
    fn try_from(record: &Value) -> Result<Self> {
        let fields = match record {
            Value::Null => return Ok(Attribute::default()),
            Value::Object(fields) => fields,
            _ => {
                return Err(Error::InvalidArgument(
                    "attribute must be an object".to_string(),
                ));
            }
        };

        let attr_type = match fields.get("type") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(Error::InvalidArgument(
                    "attribute type must be a string".to_string(),
                ));
            }
        };

        let values = match fields.get("vals") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(AttributeValue::try_from)
                .collect::<Result<Vec<_>>>()?,
            Some(single) => vec![AttributeValue::try_from(single)?],
        };

        Attribute::with_values(attr_type, values)
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.json()).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

impl DecodableFrom<&[u8]> for Attribute {}

impl Decoder<&[u8], Attribute> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Attribute> {
        let mut reader = BerReader::new(self);
        Attribute::parse(&mut reader)
    }
}

impl DecodableFrom<Vec<u8>> for Attribute {}

impl Decoder<Vec<u8>, Attribute> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Attribute> {
        self.as_slice().decode()
    }
}

impl EncodableTo<Attribute> for Vec<u8> {}

impl Encoder<Attribute, Vec<u8>> for Attribute {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = BerWriter::new();
        self.to_ber(&mut writer)?;
        Ok(writer.into_bytes()?)
    }
}
