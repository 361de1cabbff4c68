#![no_main]

use lesali_crypto::{open_stripped, MessageNumber, SharedSecret};
use libfuzzer_sys::fuzz_target;

// Opening arbitrary bytes should never panic
fuzz_target!(|data: &[u8]| {
    let _ = open_stripped(data, &SharedSecret::from_bytes([0u8; 32]), MessageNumber::new(0));
});
