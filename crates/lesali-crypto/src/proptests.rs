//! Property-based tests for the padding and envelope codecs.

use proptest::prelude::*;

use crate::{
    anonymous_len, apply_padding, default_padding_size, open_stripped, public_len, seal_anonymous,
    seal_public, seal_stripped, strip_padding, stripped_len, EnvelopeError, MessageNumber,
    PublicKey, SharedSecret, MAX_WIRE_COUNTER,
};

// ==================== Padding Property Tests ====================

proptest! {
    /// Stripping undoes padding for every message and count.
    #[test]
    fn strip_undoes_apply(
        message in prop::collection::vec(any::<u8>(), 0..600),
        padding in 1u8..=255,
    ) {
        let mut padded = message.clone();
        apply_padding(&mut padded, padding);
        prop_assert_eq!(padded.len(), message.len() + padding as usize);
        prop_assert_eq!(strip_padding(&padded).expect("should strip"), message.as_slice());
    }

    /// Short messages pad to a power of two strictly above their length.
    #[test]
    fn short_messages_pad_to_power_of_two(plain_len in 0usize..=255) {
        let (target, padding) = default_padding_size(plain_len);
        prop_assert!(target.is_power_of_two());
        prop_assert!(target > plain_len);
        prop_assert!(padding >= 1);
        prop_assert_eq!(target, plain_len + padding as usize);
    }

    /// Long messages get a single padding byte.
    #[test]
    fn long_messages_pad_by_one(plain_len in 256usize..1_000_000) {
        let (target, padding) = default_padding_size(plain_len);
        prop_assert_eq!(padding, 1);
        prop_assert_eq!(target, plain_len + 1);
    }

    /// Whatever the final byte says, stripping never panics and never returns more than it
    /// was given.
    #[test]
    fn strip_padding_total(data in prop::collection::vec(any::<u8>(), 0..300)) {
        if let Ok(stripped) = strip_padding(&data) {
            let last = *data.last().expect("a stripped message is never empty");
            prop_assert_eq!(stripped.len() + last as usize, data.len());
        }
    }
}

// ==================== Envelope Property Tests ====================

proptest! {
    /// Opening a Stripped envelope recovers the padded plaintext.
    #[test]
    fn seal_open_roundtrip(
        key in any::<[u8; 32]>(),
        number in 0u64..=MAX_WIRE_COUNTER,
        message in prop::collection::vec(any::<u8>(), 0..400),
        padding in 1u8..=255,
    ) {
        let shared_secret = SharedSecret::from_bytes(key);
        let number = MessageNumber::new(number);
        let sealed = seal_stripped(&message, &shared_secret, padding, number).expect("should seal");
        let opened = open_stripped(&sealed, &shared_secret, number).expect("should open");
        prop_assert_eq!(strip_padding(&opened).expect("should strip"), message.as_slice());
    }

    /// Flipping any bit of a sealed envelope makes it fail to open.
    #[test]
    fn single_bit_flip_detected(
        message in prop::collection::vec(any::<u8>(), 0..64),
        bit in any::<prop::sample::Index>(),
    ) {
        let shared_secret = SharedSecret::from_bytes([3u8; 32]);
        let number = MessageNumber::new(6);
        let mut sealed = seal_stripped(&message, &shared_secret, 1, number).expect("should seal");
        let bit = bit.index(sealed.len() * 8);
        sealed[bit / 8] ^= 1 << (bit % 8);
        prop_assert_eq!(
            open_stripped(&sealed, &shared_secret, number),
            Err(EnvelopeError::Authentication)
        );
    }

    /// The length helpers predict the exact size of every layout.
    #[test]
    fn length_helpers_match_output(
        plain_len in 0usize..600,
        padding in 1u8..=255,
    ) {
        let shared_secret = SharedSecret::from_bytes([5u8; 32]);
        let sender = PublicKey::from_bytes([6u8; 32]);
        let number = MessageNumber::new(12);
        let message = vec![0xA5u8; plain_len];

        let stripped = seal_stripped(&message, &shared_secret, padding, number).expect("should seal");
        let anonymous = seal_anonymous(&message, &shared_secret, padding, number).expect("should seal");
        let public = seal_public(&message, &sender, &shared_secret, padding, number).expect("should seal");

        prop_assert_eq!(stripped.len(), stripped_len(plain_len, padding));
        prop_assert_eq!(anonymous.len(), anonymous_len(plain_len, padding));
        prop_assert_eq!(public.len(), public_len(plain_len, padding));
    }

    /// Every number that fits the wire counter survives the nonce round trip.
    #[test]
    fn nonce_roundtrip(number in 0u64..=MAX_WIRE_COUNTER) {
        let number = MessageNumber::new(number);
        prop_assert_eq!(number.nonce().message_number(), number);
        prop_assert_eq!(MessageNumber::from_wire(number.to_wire()), number);
    }
}
