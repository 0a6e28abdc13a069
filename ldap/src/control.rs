//! LDAP Control
//!
//! RFC 4511 Section 4.1.11
//!
//! ```asn1
//! Control ::= SEQUENCE {
//!      controlType             LDAPOID,
//!      criticality             BOOLEAN DEFAULT FALSE,
//!      controlValue            OCTET STRING OPTIONAL }
//! ```
//!
//! The value is opaque here; its meaning depends on `controlType`.

use std::fmt::{self, Display, Formatter};

use ber::{BerReader, BerWriter, TAG_BOOLEAN, TAG_OCTET_STRING, TAG_SEQUENCE};
use ldapber::decoder::{DecodableFrom, Decoder};
use ldapber::encoder::{EncodableTo, Encoder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// JSON presentation of a control. `controlValue` is shown as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlJson {
    pub control_type: String,
    pub criticality: bool,
    pub control_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Control {
    control_type: String,
    criticality: bool,
    value: Option<Vec<u8>>,
}

impl Control {
    /// Creates a control without a value.
    pub fn new(control_type: impl Into<String>, criticality: bool) -> Self {
        Control {
            control_type: control_type.into(),
            criticality,
            value: None,
        }
    }

    /// Sets the value. An empty value is still present on the wire.
    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn control_type(&self) -> &str {
        &self.control_type
    }

    pub fn is_critical(&self) -> bool {
        self.criticality
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    pub fn json(&self) -> ControlJson {
        ControlJson {
            control_type: self.control_type.clone(),
            criticality: self.criticality,
            control_value: self
                .value
                .as_deref()
                .map(|v| String::from_utf8_lossy(v).into_owned()),
        }
    }

    /// Reads a control from `reader`.
    ///
    /// `criticality` may be omitted on input and defaults to `false`. A
    /// zero-length `controlValue` is kept as `Some(vec![])`; only a missing
    /// one yields `None`. Every element must lie inside the control's
    /// SEQUENCE and nothing may follow the value.
    pub fn parse(reader: &mut BerReader<'_>) -> Result<Self> {
        reader.read_sequence(TAG_SEQUENCE)?;
        let end = reader.offset() + reader.length();
        let control_type = reader.read_string()?;
        reader.check_within(end)?;

        let criticality = if reader.offset() < end && reader.peek() == Some(TAG_BOOLEAN) {
            reader.read_boolean()?
        } else {
            false
        };
        reader.check_within(end)?;

        let value = if reader.offset() < end {
            Some(reader.read_octet_string(TAG_OCTET_STRING)?.to_vec())
        } else {
            None
        };
        reader.expect_end(end)?;

        debug!(control_type = %control_type, criticality, has_value = value.is_some(), "parsed control");
        Ok(Control {
            control_type,
            criticality,
            value,
        })
    }

    /// Writes the control to `writer`. `criticality` is always written,
    /// the value only when present.
    pub fn to_ber(&self, writer: &mut BerWriter) -> Result<()> {
        writer.start_sequence(TAG_SEQUENCE);
        writer.write_string(&self.control_type)?;
        writer.write_boolean(self.criticality)?;
        if let Some(value) = &self.value {
            writer.write_octet_string(value)?;
        }
        writer.end_sequence()?;

        debug!(control_type = %self.control_type, criticality = self.criticality, "encoded control");
        Ok(())
    }
}

impl TryFrom<&Value> for Control {
    type Error = Error;

    /// Validates a `{ "type": .., "criticality": .., "value": .. }` record.
    fn try_from(record: &Value) -> Result<Self> {
        let fields = match record {
            Value::Null => return Ok(Control::default()),
            Value::Object(fields) => fields,
            _ => {
                return Err(Error::InvalidArgument(
                    "control must be an object".to_string(),
                ));
            }
        };

        let control_type = match fields.get("type") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(Error::InvalidArgument(
                    "control type must be a string".to_string(),
                ));
            }
        };

        let criticality = match fields.get("criticality") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(Error::InvalidArgument(
                    "control criticality must be a boolean".to_string(),
                ));
            }
        };

        let value = match fields.get("value") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_bytes().to_vec()),
            Some(_) => {
                return Err(Error::InvalidArgument(
                    "control value must be a string".to_string(),
                ));
            }
        };

        Ok(Control {
            control_type,
            criticality,
            value,
        })
    }
}

impl Display for Control {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.json()).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

impl DecodableFrom<&[u8]> for Control {}

impl Decoder<&[u8], Control> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Control> {
        let mut reader = BerReader::new(self);
        Control::parse(&mut reader)
    }
}

impl DecodableFrom<Vec<u8>> for Control {}

impl Decoder<Vec<u8>, Control> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Control> {
        self.as_slice().decode()
    }
}

impl EncodableTo<Control> for Vec<u8> {}

impl Encoder<Control, Vec<u8>> for Control {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = BerWriter::new();
        self.to_ber(&mut writer)?;
        Ok(writer.into_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const PAGED_RESULTS_OID: &str = "1.2.840.113556.1.4.319";

    fn count_elements(bytes: &[u8]) -> usize {
        let mut reader = BerReader::new(bytes);
        let length = reader.read_sequence(TAG_SEQUENCE).unwrap();
        let end = reader.offset() + length;
        let mut count = 0;
        while reader.offset() < end {
            let tag = reader.peek().unwrap();
            reader.read_octet_string(tag).unwrap();
            count += 1;
        }
        count
    }

    #[test]
    fn test_control_default() {
        let control = Control::default();
        assert_eq!(control.control_type(), "");
        assert!(!control.is_critical());
        assert_eq!(control.value(), None);
    }

    #[test]
    fn test_to_ber_critical_without_value() {
        let control = Control::new("1.2.3", true);
        let bytes: Vec<u8> = control.encode().unwrap();
        assert_eq!(
            bytes,
            vec![0x30, 0x0a, 0x04, 0x05, b'1', b'.', b'2', b'.', b'3', 0x01, 0x01, 0xff]
        );
        assert_eq!(count_elements(&bytes), 2);
    }

    #[test]
    fn test_to_ber_writes_false_criticality() {
        let control = Control::new("1.2.3", false);
        let bytes: Vec<u8> = control.encode().unwrap();
        assert_eq!(&bytes[bytes.len() - 3..], &[0x01, 0x01, 0x00]);
        assert_eq!(count_elements(&bytes), 2);
    }

    #[test]
    fn test_to_ber_with_value() {
        let control = Control::new(PAGED_RESULTS_OID, false).with_value(vec![0x30, 0x00]);
        let bytes: Vec<u8> = control.encode().unwrap();
        assert_eq!(count_elements(&bytes), 3);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x04, 0x02, 0x30, 0x00]);
    }

    #[test]
    fn test_to_ber_empty_value_is_present() {
        let control = Control::new("1.2.3", false).with_value("");
        let bytes: Vec<u8> = control.encode().unwrap();
        assert_eq!(count_elements(&bytes), 3);
        assert_eq!(&bytes[bytes.len() - 2..], &[0x04, 0x00]);
    }

    #[rstest(control,
        case(Control::new("1.2.3", true)),
        case(Control::new("1.2.3", false)),
        case(Control::new(PAGED_RESULTS_OID, true).with_value(vec![0x30, 0x05, 0x02, 0x01, 0x64, 0x04, 0x00])),
        case(Control::new("1.2.3", false).with_value("")),
        case(Control::new("", false)),
    )]
    fn test_roundtrip(control: Control) {
        let bytes: Vec<u8> = control.encode().unwrap();
        let decoded: Control = bytes.decode().unwrap();
        assert_eq!(decoded, control);
    }

    #[rstest(input, expected,
        // criticality omitted, DEFAULT FALSE
        case(vec![0x30, 0x07, 0x04, 0x01, b'1', 0x04, 0x02, b'h', b'i'], Control::new("1", false).with_value("hi")),
        case(vec![0x30, 0x03, 0x04, 0x01, b'1'], Control::new("1", false)),
        // non-canonical true
        case(vec![0x30, 0x06, 0x04, 0x01, b'1', 0x01, 0x01, 0x01], Control::new("1", true)),
    )]
    fn test_parse(input: Vec<u8>, expected: Control) {
        let control: Control = input.decode().unwrap();
        assert_eq!(control, expected);
    }

    #[test]
    fn test_parse_stops_at_sequence_end() {
        let bytes = vec![
            0x30, 0x06, 0x04, 0x01, b'1', 0x01, 0x01, 0x00, 0x04, 0x01, b'x',
        ];
        let mut reader = BerReader::new(&bytes);
        let control = Control::parse(&mut reader).unwrap();
        assert_eq!(control.value(), None);
        assert_eq!(reader.remaining(), 3);
    }

    #[rstest(input, expected,
        // type lies outside an empty sequence
        case(vec![0x30, 0x00, 0x04, 0x02, b'h', b'i'], ber::Error::SequenceOverrun { end: 2, offset: 6 }),
        // boolean crosses the sequence end
        case(vec![0x30, 0x04, 0x04, 0x01, b'1', 0x01, 0x01, 0xff], ber::Error::SequenceOverrun { end: 6, offset: 8 }),
        // extra element after the value
        case(vec![0x30, 0x0b, 0x04, 0x01, b'1', 0x01, 0x01, 0x00, 0x04, 0x00, 0x04, 0x01, b'x'], ber::Error::TrailingContent(3)),
    )]
    fn test_parse_bounded_by_sequence(input: Vec<u8>, expected: ber::Error) {
        let result: Result<Control> = input.decode();
        assert_eq!(result.unwrap_err(), Error::MalformedWireData(expected));
    }

    #[test]
    fn test_parse_consecutive_controls() {
        let bytes = vec![
            0x30, 0x08, 0x04, 0x01, b'1', 0x01, 0x01, 0xff, 0x04, 0x00, 0x30, 0x03, 0x04, 0x01,
            b'2',
        ];
        let mut reader = BerReader::new(&bytes);
        let first = Control::parse(&mut reader).unwrap();
        let second = Control::parse(&mut reader).unwrap();
        assert_eq!(first, Control::new("1", true).with_value(""));
        assert_eq!(second, Control::new("2", false));
        assert!(reader.is_empty());
    }

    #[rstest(input,
        case(vec![0x31, 0x00]),
        case(vec![0x30, 0x06, 0x04, 0x01, b'1', 0x01, 0x02, 0xff]),
        case(vec![0x30, 0x06, 0x04, 0x01, b'1', 0x02, 0x01, 0x00]),
        case(vec![0x30, 0x09, 0x04, 0x01, b'1']),
    )]
    fn test_parse_malformed(input: Vec<u8>) {
        let result: Result<Control> = input.decode();
        assert!(matches!(result, Err(Error::MalformedWireData(_))));
    }

    #[rstest(record, expected,
        case(json!({ "type": "1.2.3" }), Control::new("1.2.3", false)),
        case(json!({ "type": "1.2.3", "criticality": true }), Control::new("1.2.3", true)),
        case(json!({ "type": "1.2.3", "value": "abc" }), Control::new("1.2.3", false).with_value("abc")),
        case(json!({}), Control::default()),
        case(json!(null), Control::default()),
    )]
    fn test_try_from_record(record: Value, expected: Control) {
        assert_eq!(Control::try_from(&record).unwrap(), expected);
    }

    #[rstest(record,
        case(json!([])),
        case(json!({ "type": 1 })),
        case(json!({ "type": "1.2.3", "criticality": "yes" })),
        case(json!({ "type": "1.2.3", "value": 42 })),
    )]
    fn test_try_from_record_invalid(record: Value) {
        assert!(matches!(
            Control::try_from(&record),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_json() {
        let control = Control::new("1.2.3", true).with_value("abc");
        assert_eq!(
            control.to_string(),
            r#"{"controlType":"1.2.3","criticality":true,"controlValue":"abc"}"#
        );
        assert_eq!(
            Control::new("1.2.3", false).to_string(),
            r#"{"controlType":"1.2.3","criticality":false,"controlValue":null}"#
        );
    }
}
