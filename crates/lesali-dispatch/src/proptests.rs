//! Property-based tests for request/response pairing.

use std::io::Cursor;

use lesali_crypto::{
    open_stripped, seal_public, strip_padding, EnvelopeError, MessageNumber, PublicKey,
    SharedSecret, KEY_SIZE, MAX_WIRE_COUNTER,
};
use proptest::prelude::*;

use crate::{Dispatcher, DispatcherConfig};

const SECRET: [u8; KEY_SIZE] = [0x5a; KEY_SIZE];

proptest! {
    /// A response opens under its request's number plus one, and never under the request's own.
    #[test]
    fn response_sealed_under_next_number(
        half in 0u64..=MAX_WIRE_COUNTER / 2,
        body in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let number = MessageNumber::new(half * 2);
        let sender = PublicKey::from_bytes([4u8; KEY_SIZE]);
        let shared_secret = SharedSecret::from_bytes(SECRET);
        let dispatcher = Dispatcher::new(DispatcherConfig::new(
            |ctx: (), _: &PublicKey, _: MessageNumber| {
                Ok::<_, ()>((ctx, SharedSecret::from_bytes(SECRET)))
            },
            |_: &(), _: &PublicKey, _: MessageNumber| Ok(()),
            |_: &(), request: &[u8]| Ok(request.to_vec()),
        ));

        let request = seal_public(&body, &sender, &shared_secret, 1, number)
            .expect("should seal request");
        let mut response = Vec::new();
        dispatcher
            .handle_request((), Cursor::new(request), &mut response)
            .expect("exchange should succeed");

        let opened = open_stripped(&response, &shared_secret, number.response())
            .expect("should open under the response number");
        prop_assert_eq!(strip_padding(&opened).expect("should strip"), body.as_slice());
        prop_assert_eq!(
            open_stripped(&response, &shared_secret, number),
            Err(EnvelopeError::Authentication)
        );
    }
}
