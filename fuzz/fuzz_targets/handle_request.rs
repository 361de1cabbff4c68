#![no_main]

use std::io::{self, Cursor};

use lesali_crypto::{MessageNumber, PublicKey, SharedSecret};
use lesali_dispatch::{Dispatcher, DispatcherConfig};
use libfuzzer_sys::fuzz_target;

// A request stream of any shape should be rejected with an error, never a panic
fuzz_target!(|data: &[u8]| {
    let dispatcher = Dispatcher::new(DispatcherConfig::new(
        |ctx: (), _: &PublicKey, _: MessageNumber| {
            Ok::<_, ()>((ctx, SharedSecret::from_bytes([0u8; 32])))
        },
        |_: &(), _: &PublicKey, _: MessageNumber| Ok(()),
        |_: &(), request: &[u8]| Ok(request.to_vec()),
    ));
    let _ = dispatcher.handle_request((), Cursor::new(data), io::sink());
});
