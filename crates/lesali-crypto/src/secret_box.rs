//! XSalsa20-Poly1305 keyed by a precomputed shared secret.
//!
//! This is NaCl's `box_afternm` / `box_open_afternm`: the output is the 16-byte Poly1305 tag
//! followed by the ciphertext, so sealed messages are exactly [`BOX_OVERHEAD`] bytes longer than
//! their plaintext.

use crypto_secretbox::{
    aead::{AeadInPlace, KeyInit},
    Key, Nonce as BoxNonce, Tag, XSalsa20Poly1305,
};

use crate::{
    constants::BOX_OVERHEAD, error::EnvelopeError, keys::SharedSecret, message_number::Nonce,
};

pub(crate) struct SecretBox;

impl SecretBox {
    fn cipher(key: &SharedSecret) -> XSalsa20Poly1305 {
        XSalsa20Poly1305::new(Key::from_slice(key.as_bytes()))
    }

    /// Seal `buffer[start..]` in place.
    ///
    /// The caller reserves [`BOX_OVERHEAD`] bytes at `start` for the tag, followed by the
    /// plaintext.
    pub(crate) fn seal_in_place(
        key: &SharedSecret,
        nonce: &Nonce,
        buffer: &mut [u8],
        start: usize,
    ) -> Result<(), EnvelopeError> {
        let (tag_slot, plaintext) = buffer[start..].split_at_mut(BOX_OVERHEAD);
        let tag = Self::cipher(key)
            .encrypt_in_place_detached(BoxNonce::from_slice(nonce.as_bytes()), b"", plaintext)
            .map_err(|_| EnvelopeError::Encryption)?;
        tag_slot.copy_from_slice(&tag);
        Ok(())
    }

    /// Verify and decrypt a sealed message. Nothing is returned unless the tag verifies.
    pub(crate) fn open(
        key: &SharedSecret,
        nonce: &Nonce,
        sealed: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        if sealed.len() < BOX_OVERHEAD {
            return Err(EnvelopeError::Authentication);
        }
        let (tag, ciphertext) = sealed.split_at(BOX_OVERHEAD);
        let mut buffer = ciphertext.to_vec();
        Self::cipher(key)
            .decrypt_in_place_detached(
                BoxNonce::from_slice(nonce.as_bytes()),
                b"",
                &mut buffer,
                Tag::from_slice(tag),
            )
            .map_err(|_| EnvelopeError::Authentication)?;
        Ok(buffer)
    }
}
