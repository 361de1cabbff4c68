//! Protocol-wide sizes and version numbers.

/// Major release of the envelope format.
pub const VERSION_MAJOR: u32 = 0;
/// Minor release of the envelope format.
pub const VERSION_MINOR: u32 = 2;

/// Protocol version carried by this implementation.
pub const PROTOCOL_VERSION: u8 = 1;

/// Size of public keys and shared secrets in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the full box nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of the message counter carried on the wire in bytes.
pub const COUNTER_SIZE: usize = 6;

/// Bytes added to every sealed message by the authenticator tag.
pub const BOX_OVERHEAD: usize = 16;

/// Largest message number that survives the trip through the 6-byte wire counter.
pub const MAX_WIRE_COUNTER: u64 = (1 << (8 * COUNTER_SIZE)) - 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_counter_limit() {
        assert_eq!(MAX_WIRE_COUNTER, 0xffff_ffff_ffff);
        assert_eq!(NONCE_SIZE - COUNTER_SIZE, 18);
        assert_eq!((VERSION_MAJOR, VERSION_MINOR), (0, 2));
    }
}
