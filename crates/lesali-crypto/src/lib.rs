#![doc = include_str!("../README.md")]

/// Protocol sizes and version numbers
pub mod constants;
/// Error types for the codecs
pub mod error;

mod envelope;
mod keys;
mod message_number;
mod padding;
mod secret_box;

#[cfg(test)]
mod proptests;

pub use constants::{
    BOX_OVERHEAD, COUNTER_SIZE, KEY_SIZE, MAX_WIRE_COUNTER, NONCE_SIZE, PROTOCOL_VERSION,
};
pub use envelope::{
    anonymous_len, open_stripped, public_len, seal_anonymous, seal_public, seal_stripped,
    stripped_len,
};
pub use error::{EnvelopeError, KeyError, PaddingError, ProtocolError};
pub use keys::{KeyPair, PublicKey, SharedSecret};
pub use message_number::{MessageNumber, Nonce};
pub use padding::{apply_padding, default_padding_size, strip_padding, MAX_LENGTH_HIDING_LEN};
