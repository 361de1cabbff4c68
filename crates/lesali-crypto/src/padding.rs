//! Constant-value message padding.
//!
//! A padded message ends in `p` bytes that all hold the value `p`, with `p` in `1..=255`. The
//! final byte therefore always says how much to remove, and a message can never be padded with
//! zero bytes.
//!
//! The default policy pads short messages (up to 255 bytes) to the next power of two strictly
//! greater than their length, which hides their exact size. Longer messages get a single
//! padding byte and their length is visible to an observer.

use crate::error::PaddingError;

/// Messages longer than this receive the minimal single-byte padding.
pub const MAX_LENGTH_HIDING_LEN: usize = 255;

/// Compute the padded length and padding count the default policy uses for a message.
///
/// Returns `(target_len, padding)` with `target_len == plain_len + padding` and
/// `padding >= 1`.
///
/// ```
/// use lesali_crypto::default_padding_size;
///
/// assert_eq!(default_padding_size(4), (8, 4));
/// assert_eq!(default_padding_size(8), (16, 8));
/// assert_eq!(default_padding_size(300), (301, 1));
/// ```
pub fn default_padding_size(plain_len: usize) -> (usize, u8) {
    if plain_len > MAX_LENGTH_HIDING_LEN {
        return (plain_len + 1, 1);
    }
    let target = (plain_len + 1).next_power_of_two();
    // plain_len <= 255 keeps the target at 256 or less and the difference within 1..=128
    (target, (target - plain_len) as u8)
}

/// Append `padding` bytes, each holding the value `padding`.
pub fn apply_padding(buffer: &mut Vec<u8>, padding: u8) {
    buffer.resize(buffer.len() + padding as usize, padding);
}

/// Remove the padding from a decrypted message.
///
/// Only the final byte is inspected; the remaining padding bytes are not checked against it.
pub fn strip_padding(padded: &[u8]) -> Result<&[u8], PaddingError> {
    let Some(&last) = padded.last() else {
        return Err(PaddingError::TooShort);
    };
    let padding = last as usize;
    if padding > padded.len() {
        return Err(PaddingError::TooLong {
            padding,
            len: padded.len(),
        });
    }
    if padding < 1 {
        return Err(PaddingError::TooShort);
    }
    Ok(&padded[..padded.len() - padding])
}
