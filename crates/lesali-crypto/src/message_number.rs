//! Message numbers and the nonces derived from them.
//!
//! Every sealed message is keyed by a 64-bit message number. Its low 48 bits travel on the wire
//! as a 6-byte big-endian counter and fill the tail of an otherwise zero 24-byte nonce. Even
//! numbers are requests (client to server); a response always uses its request's number plus
//! one, under the same shared secret.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{COUNTER_SIZE, MAX_WIRE_COUNTER, NONCE_SIZE},
    error::ProtocolError,
};

/// Logical message counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageNumber(u64);

impl MessageNumber {
    /// Wrap a raw counter value.
    pub const fn new(value: u64) -> Self {
        MessageNumber(value)
    }

    /// The raw counter value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Read a message number back from its 6-byte wire counter.
    pub fn from_wire(counter: [u8; COUNTER_SIZE]) -> Self {
        let mut bytes = [0u8; 8];
        bytes[8 - COUNTER_SIZE..].copy_from_slice(&counter);
        MessageNumber(u64::from_be_bytes(bytes))
    }

    /// The 6-byte wire counter. Bits above the low 48 are dropped.
    pub fn to_wire(self) -> [u8; COUNTER_SIZE] {
        let bytes = self.0.to_be_bytes();
        let mut counter = [0u8; COUNTER_SIZE];
        counter.copy_from_slice(&bytes[8 - COUNTER_SIZE..]);
        counter
    }

    /// Whether the number belongs to the client-to-server direction.
    pub const fn is_request(self) -> bool {
        self.0 % 2 == 0
    }

    /// Whether the number survives the wire counter without truncation.
    pub const fn fits_wire(self) -> bool {
        self.0 <= MAX_WIRE_COUNTER
    }

    /// Check that the number may be used for a request.
    pub fn ensure_request(self) -> Result<Self, ProtocolError> {
        if self.is_request() {
            Ok(self)
        } else {
            Err(ProtocolError::OddRequestNumber(self))
        }
    }

    /// The number the response to this request is sealed under.
    pub const fn response(self) -> Self {
        MessageNumber(self.0.wrapping_add(1))
    }

    /// The box nonce for this message number.
    pub fn nonce(self) -> Nonce {
        Nonce::from_counter(self.to_wire())
    }
}

impl From<u64> for MessageNumber {
    fn from(value: u64) -> Self {
        MessageNumber(value)
    }
}

impl Display for MessageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 24-byte box nonce: 18 zero bytes followed by the 6-byte counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Build the nonce for a wire counter.
    pub fn from_counter(counter: [u8; COUNTER_SIZE]) -> Self {
        let mut nonce = [0u8; NONCE_SIZE];
        nonce[NONCE_SIZE - COUNTER_SIZE..].copy_from_slice(&counter);
        Nonce(nonce)
    }

    /// The message number encoded in the counter field.
    pub fn message_number(&self) -> MessageNumber {
        let mut counter = [0u8; COUNTER_SIZE];
        counter.copy_from_slice(&self.0[NONCE_SIZE - COUNTER_SIZE..]);
        MessageNumber::from_wire(counter)
    }

    /// The full nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_layout() {
        let nonce = MessageNumber::new(0x0102_0304_0506).nonce();
        let bytes = nonce.as_bytes();
        assert_eq!(bytes[..18], [0u8; 18]);
        assert_eq!(bytes[18..], [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    }

    #[test]
    fn test_high_bits_truncated() {
        let number = MessageNumber::new(0xAABB_0000_0000_0002);
        assert!(!number.fits_wire());
        assert_eq!(number.to_wire(), [0, 0, 0, 0, 0, 2]);
        assert_eq!(number.nonce().message_number(), MessageNumber::new(2));
    }

    #[test]
    fn test_wire_counter_max() {
        let max = MessageNumber::new(MAX_WIRE_COUNTER);
        assert!(max.fits_wire());
        assert_eq!(max.to_wire(), [0xFF; COUNTER_SIZE]);
        assert_eq!(MessageNumber::from_wire([0xFF; COUNTER_SIZE]), max);
    }

    #[test]
    fn test_parity() {
        assert!(MessageNumber::new(0).is_request());
        assert!(MessageNumber::new(42).is_request());
        assert!(!MessageNumber::new(3).is_request());
        assert_eq!(
            MessageNumber::new(3).ensure_request(),
            Err(ProtocolError::OddRequestNumber(MessageNumber::new(3)))
        );
    }

    #[test]
    fn test_response_pairs_with_request() {
        let request = MessageNumber::new(10);
        let response = request.response();
        assert_eq!(response, MessageNumber::new(11));
        assert!(!response.is_request());
        assert_ne!(request.nonce(), response.nonce());
    }
}
