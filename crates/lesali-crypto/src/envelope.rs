//! Envelope layouts.
//!
//! Three nested layouts wrap a sealed, padded message:
//!
//! | Layout    | Bytes                                      |
//! |-----------|--------------------------------------------|
//! | Stripped  | `tag(16) ‖ ciphertext`                     |
//! | Anonymous | `counter(6) ‖ Stripped`                    |
//! | Public    | `sender_public_key(32) ‖ Anonymous`        |
//!
//! Stripped envelopes carry no metadata and are used where the receiver already knows the key
//! and message number, such as a response on the connection that carried its request.

use crate::{
    constants::{BOX_OVERHEAD, COUNTER_SIZE, KEY_SIZE},
    error::{EnvelopeError, PaddingError},
    keys::{PublicKey, SharedSecret},
    message_number::MessageNumber,
    padding::apply_padding,
    secret_box::SecretBox,
};

/// Wire size of a Stripped envelope.
pub fn stripped_len(plain_len: usize, padding: u8) -> usize {
    plain_len + padding as usize + BOX_OVERHEAD
}

/// Wire size of an Anonymous envelope.
pub fn anonymous_len(plain_len: usize, padding: u8) -> usize {
    stripped_len(plain_len, padding) + COUNTER_SIZE
}

/// Wire size of a Public envelope.
pub fn public_len(plain_len: usize, padding: u8) -> usize {
    anonymous_len(plain_len, padding) + KEY_SIZE
}

/// Seal `plain` as a Stripped envelope under `message_number`.
///
/// Fails if `padding` is zero. Only the low 48 bits of `message_number` reach the nonce, so the
/// caller must keep its counters below 2^48 to avoid reusing a nonce.
pub fn seal_stripped(
    plain: &[u8],
    shared_secret: &SharedSecret,
    padding: u8,
    message_number: MessageNumber,
) -> Result<Vec<u8>, EnvelopeError> {
    let mut sealed = Vec::with_capacity(stripped_len(plain.len(), padding));
    seal_into(&mut sealed, plain, shared_secret, padding, message_number)?;
    Ok(sealed)
}

/// Seal `plain` as an Anonymous envelope, prefixed with its wire counter.
pub fn seal_anonymous(
    plain: &[u8],
    shared_secret: &SharedSecret,
    padding: u8,
    message_number: MessageNumber,
) -> Result<Vec<u8>, EnvelopeError> {
    let mut sealed = Vec::with_capacity(anonymous_len(plain.len(), padding));
    sealed.extend_from_slice(&message_number.to_wire());
    seal_into(&mut sealed, plain, shared_secret, padding, message_number)?;
    Ok(sealed)
}

/// Seal `plain` as a Public envelope, prefixed with the sender's key and the wire counter.
pub fn seal_public(
    plain: &[u8],
    sender: &PublicKey,
    shared_secret: &SharedSecret,
    padding: u8,
    message_number: MessageNumber,
) -> Result<Vec<u8>, EnvelopeError> {
    let mut sealed = Vec::with_capacity(public_len(plain.len(), padding));
    sealed.extend_from_slice(sender.as_bytes());
    sealed.extend_from_slice(&message_number.to_wire());
    seal_into(&mut sealed, plain, shared_secret, padding, message_number)?;
    Ok(sealed)
}

/// Open a Stripped envelope sealed under `message_number`.
///
/// Returns the plaintext with its padding still attached; see
/// [`strip_padding`](crate::strip_padding).
pub fn open_stripped(
    sealed: &[u8],
    shared_secret: &SharedSecret,
    message_number: MessageNumber,
) -> Result<Vec<u8>, EnvelopeError> {
    SecretBox::open(shared_secret, &message_number.nonce(), sealed)
}

fn seal_into(
    out: &mut Vec<u8>,
    plain: &[u8],
    shared_secret: &SharedSecret,
    padding: u8,
    message_number: MessageNumber,
) -> Result<(), EnvelopeError> {
    if padding < 1 {
        return Err(PaddingError::TooShort.into());
    }
    let start = out.len();
    out.resize(start + BOX_OVERHEAD, 0);
    out.extend_from_slice(plain);
    apply_padding(out, padding);
    SecretBox::seal_in_place(shared_secret, &message_number.nonce(), out, start)
}
