use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or writing BER data.
///
/// Reader errors describe input that does not match the expected
/// tag/length structure. Callers are expected to treat them as fatal for
/// the message being parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),

    /// The next tag differs from the one the caller asked for
    #[error("expected tag 0x{expected:02x}, got 0x{actual:02x}")]
    UnexpectedTag { expected: u8, actual: u8 },

    /// The input ended in the middle of a tag or length
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A declared length runs past the end of the input
    #[error("truncated: need {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("indefinite length is not supported")]
    IndefiniteLength,

    /// Long-form length with more octets than supported
    #[error("length field uses {0} octets (max 4)")]
    LengthTooLong(u8),

    /// Length does not fit in the 4 length octets the writer supports
    #[error("length {0} is too large to encode")]
    LengthOverflow(usize),

    /// An element read inside a constructed element ends past its end
    #[error("element ends at offset {offset}, past the enclosing end at {end}")]
    SequenceOverrun { end: usize, offset: usize },

    /// Unread content left before the end of a constructed element
    #[error("{0} unread bytes left in sequence")]
    TrailingContent(usize),

    #[error("invalid boolean")]
    InvalidBoolean,

    #[error("OCTET STRING: invalid UTF-8")]
    InvalidUtf8,

    /// `end_sequence` without a matching `start_sequence`, or an open
    /// sequence left when the writer is consumed
    #[error("unbalanced sequence")]
    UnbalancedSequence,
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                nom::error::ErrorKind::Eof => Error::UnexpectedEnd,
                code => Error::Parser(code),
            },
        }
    }
}
