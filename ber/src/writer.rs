use tracing::trace;

use crate::error::{Error, Result};
use crate::{TAG_BOOLEAN, TAG_OCTET_STRING, encode_length};

/// Builds BER-encoded bytes.
///
/// Sequences are written with a definite length. `start_sequence` records
/// where the content begins and `end_sequence` inserts the minimal length
/// octets once the content size is known.
#[derive(Debug, Default, Clone)]
pub struct BerWriter {
    buffer: Vec<u8>,
    // content start offsets of the open sequences, innermost last
    open: Vec<usize>,
}

impl BerWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the encoded bytes. Fails if a sequence is still open.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        if !self.open.is_empty() {
            return Err(Error::UnbalancedSequence);
        }
        Ok(self.buffer)
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    pub fn write_length(&mut self, length: usize) -> Result<()> {
        let octets = encode_length(length)?;
        self.buffer.extend_from_slice(&octets);
        Ok(())
    }

    pub fn start_sequence(&mut self, tag: u8) {
        self.write_byte(tag);
        self.open.push(self.buffer.len());
    }

    pub fn end_sequence(&mut self) -> Result<()> {
        let start = self.open.pop().ok_or(Error::UnbalancedSequence)?;
        let length = self.buffer.len() - start;
        let octets = encode_length(length)?;
        self.buffer.splice(start..start, octets);
        trace!(length, "closed sequence");
        Ok(())
    }

    /// Writes `data` as a primitive OCTET STRING, byte for byte.
    pub fn write_octet_string(&mut self, data: &[u8]) -> Result<()> {
        self.write_byte(TAG_OCTET_STRING);
        self.write_length(data.len())?;
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Writes UTF-8 text as an OCTET STRING.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        self.write_octet_string(s.as_bytes())
    }

    pub fn write_string_array<S: AsRef<str>>(&mut self, strings: &[S]) -> Result<()> {
        for s in strings {
            self.write_string(s.as_ref())?;
        }
        Ok(())
    }

    pub fn write_boolean(&mut self, value: bool) -> Result<()> {
        self.write_byte(TAG_BOOLEAN);
        self.write_length(1)?;
        self.write_byte(if value { 0xff } else { 0x00 });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{BerReader, TAG_SEQUENCE, TAG_SET};

    #[rstest(value, expected,
        case(true, vec![0x01, 0x01, 0xff]),
        case(false, vec![0x01, 0x01, 0x00]),
    )]
    fn test_write_boolean(value: bool, expected: Vec<u8>) {
        let mut writer = BerWriter::new();
        writer.write_boolean(value).unwrap();
        assert_eq!(writer.into_bytes().unwrap(), expected);
    }

    #[test]
    fn test_write_string() {
        let mut writer = BerWriter::new();
        writer.write_string("héllo").unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[0x04, 0x06, b'h', 0xc3, 0xa9, b'l', b'l', b'o']
        );
    }

    #[test]
    fn test_nested_sequences() {
        let mut writer = BerWriter::new();
        writer.start_sequence(TAG_SEQUENCE);
        writer.write_string("cn").unwrap();
        writer.start_sequence(TAG_SET);
        writer.write_string_array(&["a", "b"]).unwrap();
        writer.end_sequence().unwrap();
        writer.end_sequence().unwrap();

        assert_eq!(
            writer.into_bytes().unwrap(),
            vec![
                0x30, 0x0c, 0x04, 0x02, b'c', b'n', 0x31, 0x06, 0x04, 0x01, b'a', 0x04, 0x01,
                b'b'
            ]
        );
    }

    #[test]
    fn test_empty_sequence() {
        let mut writer = BerWriter::new();
        writer.start_sequence(TAG_SET);
        writer.write_string_array::<&str>(&[]).unwrap();
        writer.end_sequence().unwrap();
        assert_eq!(writer.into_bytes().unwrap(), vec![0x31, 0x00]);
    }

    #[rstest(size, header,
        case(0x7f, vec![0x30, 0x7f]),
        case(0x80, vec![0x30, 0x81, 0x80]),
        case(0x1234, vec![0x30, 0x82, 0x12, 0x34]),
    )]
    fn test_end_sequence_long_form(size: usize, header: Vec<u8>) {
        let mut writer = BerWriter::new();
        writer.start_sequence(TAG_SEQUENCE);
        for _ in 0..size {
            writer.write_byte(0xaa);
        }
        writer.end_sequence().unwrap();

        let bytes = writer.into_bytes().unwrap();
        assert_eq!(&bytes[..header.len()], header.as_slice());
        assert_eq!(bytes.len(), header.len() + size);

        let mut reader = BerReader::new(&bytes);
        assert_eq!(reader.read_sequence(TAG_SEQUENCE).unwrap(), size);
    }

    #[test]
    fn test_raw_octet_string_bytes() {
        let mut writer = BerWriter::new();
        writer.write_byte(TAG_OCTET_STRING);
        writer.write_length(3).unwrap();
        for b in [0x00, 0x01, 0xff] {
            writer.write_byte(b);
        }
        assert_eq!(writer.as_bytes(), &[0x04, 0x03, 0x00, 0x01, 0xff]);
    }

    #[test]
    fn test_unbalanced_sequence() {
        let mut writer = BerWriter::new();
        assert_eq!(writer.end_sequence().unwrap_err(), Error::UnbalancedSequence);

        writer.start_sequence(TAG_SEQUENCE);
        assert_eq!(writer.into_bytes().unwrap_err(), Error::UnbalancedSequence);
    }
}
