//! Universal laws from spec.md §8, checked as `quickcheck` properties.
//!
//! Law 1 (`decode(encode(x, P)) == x`) only holds for the *generic* `decode`
//! (ALL mode) paired with `encode_uri`/`encode_2396`/`encode_3986` — pairing
//! it with `decode_uri` would be lossy on purpose, since `decode_uri`
//! intentionally leaves its preserved set percent-encoded. `encode_form` is
//! paired with `decode_form`, as spec.md names explicitly.

use alloc::vec::Vec;

use quickcheck_macros::quickcheck;

use crate::codec::{decode, decode_form, encode_2396, encode_3986, encode_form, encode_uri, Policy};

#[quickcheck]
fn law1_uri_round_trips_through_generic_decode(data: Vec<u8>) -> bool {
    decode(&encode_uri(&data)).unwrap() == data
}

#[quickcheck]
fn law1_2396_round_trips_through_generic_decode(data: Vec<u8>) -> bool {
    decode(&encode_2396(&data)).unwrap() == data
}

#[quickcheck]
fn law1_3986_round_trips_through_generic_decode(data: Vec<u8>) -> bool {
    decode(&encode_3986(&data)).unwrap() == data
}

#[quickcheck]
fn law1_form_round_trips_through_form_decode(data: Vec<u8>) -> bool {
    decode_form(&encode_form(&data)).unwrap() == data
}

#[quickcheck]
fn law2_encoded_output_uses_allowed_alphabet_and_uppercase_hex(data: Vec<u8>) -> bool {
    const BASE_ALLOWED: &[u8] = b"!#$&'()*+,-./:;=?@_~";
    let valid_digit = |b: u8| b.is_ascii_digit() || b.is_ascii_uppercase();
    for policy in [Policy::Uri, Policy::Form, Policy::Rfc2396, Policy::Rfc3986] {
        let out = crate::codec::encode(&data, policy);
        let mut i = 0;
        while i < out.len() {
            if out[i] == b'%' {
                if i + 2 >= out.len() || !valid_digit(out[i + 1]) || !valid_digit(out[i + 2]) {
                    return false;
                }
                i += 3;
            } else {
                if !(out[i].is_ascii_alphanumeric() || BASE_ALLOWED.contains(&out[i])) {
                    return false;
                }
                i += 1;
            }
        }
    }
    true
}

#[quickcheck]
fn law3_unreserved_only_input_is_encoded_identically(indices: Vec<u8>) -> bool {
    // RFC 3986 unreserved set: every byte here is untouched by all four
    // policies, so encoding it under any of them is the identity.
    const ALPHABET: &[u8] = b"abcXYZ019-._~";
    let input: Vec<u8> = indices.iter().map(|&i| ALPHABET[usize::from(i) % ALPHABET.len()]).collect();
    [Policy::Uri, Policy::Form, Policy::Rfc2396, Policy::Rfc3986]
        .into_iter()
        .all(|policy| crate::codec::encode(&input, policy) == input)
}
