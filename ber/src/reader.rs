use tracing::trace;

use crate::error::{Error, Result};
use crate::{Length, TAG_BOOLEAN, TAG_OCTET_STRING, parse_length, parse_tag};

/// Cursor over BER-encoded bytes.
///
/// `offset` is the position of the next unread byte. `length` is the
/// declared content length of the most recently read element, so the end of
/// a constructed element just opened with [`BerReader::read_sequence`] is
/// `offset() + length()`.
#[derive(Debug, Clone)]
pub struct BerReader<'a> {
    data: &'a [u8],
    offset: usize,
    length: usize,
}

impl<'a> BerReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BerReader {
            data,
            offset: 0,
            length: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next tag without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Fails if the cursor has moved past `end`, the end offset of an
    /// enclosing constructed element.
    pub fn check_within(&self, end: usize) -> Result<()> {
        if self.offset > end {
            return Err(Error::SequenceOverrun {
                end,
                offset: self.offset,
            });
        }
        Ok(())
    }

    /// Fails unless every byte up to `end` has been read and nothing past it.
    pub fn expect_end(&self, end: usize) -> Result<()> {
        self.check_within(end)?;
        if self.offset < end {
            return Err(Error::TrailingContent(end - self.offset));
        }
        Ok(())
    }

    /// Opens a constructed element tagged `tag` and returns its content
    /// length. The cursor is left on the first content byte.
    pub fn read_sequence(&mut self, tag: u8) -> Result<usize> {
        let length = self.read_header(tag)?;
        trace!(tag, length, offset = self.offset, "opened sequence");
        Ok(length)
    }

    /// Reads a primitive element tagged `tag` and returns its content bytes
    /// verbatim.
    pub fn read_octet_string(&mut self, tag: u8) -> Result<&'a [u8]> {
        let length = self.read_header(tag)?;
        let start = self.offset;
        self.offset += length;
        Ok(&self.data[start..self.offset])
    }

    /// Reads an OCTET STRING holding UTF-8 text.
    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_octet_string(TAG_OCTET_STRING)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads a BOOLEAN. Any non-zero content octet is `true`.
    pub fn read_boolean(&mut self) -> Result<bool> {
        let data = self.read_octet_string(TAG_BOOLEAN)?;
        match data {
            [b] => Ok(*b != 0x00),
            _ => Err(Error::InvalidBoolean),
        }
    }

    /// Consumes a tag and a length, checking the tag against `expected`
    /// and the length against the bytes left in the input.
    fn read_header(&mut self, expected: u8) -> Result<usize> {
        let input = &self.data[self.offset..];
        let (rest, actual) = parse_tag(input)?;
        if actual != expected {
            return Err(Error::UnexpectedTag { expected, actual });
        }
        let (rest, length) = parse_length(rest)?;
        let length = match length {
            Length::Definite(n) => n,
            Length::Indefinite => return Err(Error::IndefiniteLength),
            Length::Oversized(n) => return Err(Error::LengthTooLong(n)),
        };
        if rest.len() < length {
            return Err(Error::Truncated {
                needed: length,
                remaining: rest.len(),
            });
        }
        self.offset += input.len() - rest.len();
        self.length = length;
        Ok(length)
    }
}
