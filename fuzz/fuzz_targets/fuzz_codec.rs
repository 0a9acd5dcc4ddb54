#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use urlkit::{decode_with, encode, DecodeMode, Policy};

#[derive(Debug, Arbitrary)]
enum FuzzPolicy {
    Uri,
    Form,
    Rfc2396,
    Rfc3986,
}

impl From<FuzzPolicy> for Policy {
    fn from(p: FuzzPolicy) -> Self {
        match p {
            FuzzPolicy::Uri => Policy::Uri,
            FuzzPolicy::Form => Policy::Form,
            FuzzPolicy::Rfc2396 => Policy::Rfc2396,
            FuzzPolicy::Rfc3986 => Policy::Rfc3986,
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzMode {
    All,
    Uri,
    Form,
}

impl From<FuzzMode> for DecodeMode {
    fn from(m: FuzzMode) -> Self {
        match m {
            FuzzMode::All => DecodeMode::All,
            FuzzMode::Uri => DecodeMode::Uri,
            FuzzMode::Form => DecodeMode::Form,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Case {
    policy: FuzzPolicy,
    mode: FuzzMode,
    data: Vec<u8>,
}

fuzz_target!(|case: Case| {
    // The encoder must never panic on arbitrary bytes, and its output must
    // always be valid input to the decoder (even if the round trip is lossy
    // for a preserving mode like `decode_uri`/`decode_form`).
    let encoded = encode(&case.data, case.policy.into());
    let _ = decode_with(&encoded, case.mode.into());

    // The decoder must never panic on arbitrary bytes either, escaped or
    // not.
    let _ = decode_with(&case.data, DecodeMode::All);
});
