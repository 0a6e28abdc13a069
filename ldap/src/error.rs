//! Error types for LDAP attribute and control encoding.

use thiserror::Error;

/// Result type for LDAP encoding operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied value does not have the required shape. Raised
    /// before any field is modified.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The BER reader rejected the input. The codec error is forwarded as is.
    #[error(transparent)]
    MalformedWireData(#[from] ber::Error),
}
