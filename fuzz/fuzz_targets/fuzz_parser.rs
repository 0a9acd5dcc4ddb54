#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use urlkit::{parse, ParseOptions};

/// A fuzz case: a handful of boolean knobs plus the raw bytes to parse.
/// Deriving `Arbitrary` lets `cargo fuzz` mutate the flags and the input
/// independently instead of hand-rolling a byte layout.
#[derive(Debug, Arbitrary)]
struct Case {
    parse_params: bool,
    force_querystring: bool,
    input: Vec<u8>,
}

fuzz_target!(|case: Case| {
    let options = ParseOptions {
        parse_params: case.parse_params,
        initial_cursor: 0,
        force_querystring: case.force_querystring,
    };

    let outcome = parse(&case.input, options);

    assert!(outcome.cursor <= case.input.len());
    if outcome.is_ok() {
        assert_eq!(outcome.cursor, case.input.len());
    }

    // Every borrowed field must be a genuine sub-slice of the input: no
    // out-of-bounds range has been materialized by pointer arithmetic.
    let in_bounds = |field: Option<&[u8]>| {
        field.is_none_or(|s| {
            let base = case.input.as_ptr() as usize;
            let start = s.as_ptr() as usize;
            start >= base && start + s.len() <= base + case.input.len()
        })
    };
    let r = &outcome.result;
    assert!(in_bounds(r.scheme));
    assert!(in_bounds(r.host));
    assert!(in_bounds(r.hostname));
    assert!(in_bounds(r.port));
    assert!(in_bounds(r.userinfo));
    assert!(in_bounds(r.user));
    assert!(in_bounds(r.password));
    assert!(in_bounds(r.path));
    assert!(in_bounds(r.query));
    assert!(in_bounds(r.fragment));
});
