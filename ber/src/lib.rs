//! BER reader and writer.
//!
//! A small, definite-length subset of X.690 Basic Encoding Rules: the part
//! LDAP uses. [`BerReader`] is a cursor over borrowed bytes and
//! [`BerWriter`] builds an owned buffer, back-patching sequence lengths when
//! a sequence is closed.
//!
//! ```
//! use ber::{BerReader, BerWriter, TAG_SEQUENCE};
//!
//! let mut writer = BerWriter::new();
//! writer.start_sequence(TAG_SEQUENCE);
//! writer.write_string("cn").unwrap();
//! writer.write_boolean(true).unwrap();
//! writer.end_sequence().unwrap();
//! let bytes = writer.into_bytes().unwrap();
//! assert_eq!(bytes, vec![0x30, 0x07, 0x04, 0x02, b'c', b'n', 0x01, 0x01, 0xff]);
//!
//! let mut reader = BerReader::new(&bytes);
//! reader.read_sequence(TAG_SEQUENCE).unwrap();
//! assert_eq!(reader.read_string().unwrap(), "cn");
//! assert!(reader.read_boolean().unwrap());
//! ```

use nom::{IResult, Parser};

pub mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::BerReader;
pub use writer::BerWriter;

pub const TAG_BOOLEAN: u8 = 0x01;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_SEQUENCE: u8 = 0x30;
pub const TAG_SET: u8 = 0x31;

/// Largest number of long-form length octets accepted or produced.
pub(crate) const MAX_LENGTH_OCTETS: u8 = 4;

/// Length octets as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Length {
    Definite(usize),
    Indefinite,
    /// Long form announcing more than [`MAX_LENGTH_OCTETS`] octets.
    Oversized(u8),
}

pub(crate) fn parse_tag(input: &[u8]) -> IResult<&[u8], u8> {
    nom::number::complete::be_u8(input)
}

pub(crate) fn parse_length(input: &[u8]) -> IResult<&[u8], Length> {
    let (input, n) = nom::number::complete::be_u8(input)?;
    if n & 0x80 == 0 {
        // short form: 0-127
        return Ok((input, Length::Definite(n as usize)));
    }
    // long form
    // First 1 bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let count = n & 0x7f;
    if count == 0 {
        return Ok((input, Length::Indefinite));
    }
    if count > MAX_LENGTH_OCTETS {
        return Ok((input, Length::Oversized(count)));
    }
    let (input, bs) = nom::bytes::complete::take(count).parse(input)?;
    let n = bs.iter().fold(0usize, |n, &b| (n << 8) | b as usize);
    Ok((input, Length::Definite(n)))
}

/// Encodes `length` as definite-length octets, using the short form below
/// 128 and the minimal long form otherwise.
pub(crate) fn encode_length(length: usize) -> Result<Vec<u8>> {
    if length < 0x80 {
        return Ok(vec![length as u8]);
    }
    if length > u32::MAX as usize {
        return Err(Error::LengthOverflow(length));
    }
    let bytes = (length as u32).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];
    let mut out = Vec::with_capacity(significant.len() + 1);
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Error, Length, encode_length, parse_length, parse_tag};

    #[rstest(input, expected,
        case(vec![0x04], 0x04),
        case(vec![0x30, 0x01], 0x30),
        case(vec![0x31, 0x00], 0x31),
    )]
    fn test_parse_tag(input: Vec<u8>, expected: u8) {
        let actual = parse_tag(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input, expected,
        case(vec![0x02], Length::Definite(0x02)),
        case(vec![0x7f, 0x01], Length::Definite(0x7f)),
        case(vec![0x81, 0x80], Length::Definite(0x80)),
        case(vec![0x82, 0x02, 0x10], Length::Definite(256 * 0x02 + 0x10)),
        case(vec![0x83, 0x01, 0x00, 0x00], Length::Definite(256 * 256)),
        case(vec![0x82, 0xff, 0xff], Length::Definite(256 * 0xff + 0xff)),
        case(vec![0x80], Length::Indefinite),
        case(vec![0x85, 0x01, 0x00, 0x00, 0x00, 0x00], Length::Oversized(5)),
    )]
    fn test_parse_length(input: Vec<u8>, expected: Length) {
        let actual = parse_length(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x82, 0x01]),
    )]
    fn test_parse_length_at_end_of_input(input: Vec<u8>) {
        let err = parse_length(&input).unwrap_err();
        assert_eq!(Error::from(err), Error::UnexpectedEnd);
    }

    #[test]
    fn test_parse_tag_at_end_of_input() {
        let err = parse_tag(&[]).unwrap_err();
        assert_eq!(Error::from(err), Error::UnexpectedEnd);
    }

    #[rstest(length, expected,
        case(0, vec![0x00]),
        case(0x7f, vec![0x7f]),
        case(0x80, vec![0x81, 0x80]),
        case(0xff, vec![0x81, 0xff]),
        case(0x100, vec![0x82, 0x01, 0x00]),
        case(0x01_0000, vec![0x83, 0x01, 0x00, 0x00]),
        case(0x0100_0000, vec![0x84, 0x01, 0x00, 0x00, 0x00]),
    )]
    fn test_encode_length(length: usize, expected: Vec<u8>) {
        assert_eq!(expected, encode_length(length).unwrap());
    }
}
