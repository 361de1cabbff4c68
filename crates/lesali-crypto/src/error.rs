//! Error types for the lesali codecs

use thiserror::Error;

use crate::MessageNumber;

/// Errors raised while removing padding from a decrypted message
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PaddingError {
    /// The final byte claims more padding than the message holds
    #[error("Padding too long: {padding} bytes claimed in a {len} byte message")]
    TooLong {
        /// Padding count read from the final byte
        padding: usize,
        /// Length of the padded message
        len: usize,
    },

    /// The padding count is zero, or there is no byte to read it from
    #[error("Padding too short")]
    TooShort,
}

/// Violations of the message-number discipline
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Requests travel client to server and must carry an even number
    #[error("Requests must use an even message number, got {0}")]
    OddRequestNumber(MessageNumber),

    /// The number does not fit in the 6-byte wire counter
    #[error("Message number {0} does not fit in the wire counter")]
    CounterOverflow(MessageNumber),
}

/// Errors raised by the envelope codec
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The authenticator tag did not verify; no plaintext is released
    #[error("Authentication failed")]
    Authentication,

    /// The cipher refused to seal the message
    #[error("Encryption failed")]
    Encryption,

    /// The padding count was rejected
    #[error(transparent)]
    Padding(#[from] PaddingError),
}

/// Errors raised while decoding key material
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key is not valid hex
    #[error("Invalid key encoding")]
    InvalidEncoding,

    /// The key did not decode to exactly 32 bytes
    #[error("Invalid key length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}
