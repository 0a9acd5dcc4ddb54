//! Percent-encoding and percent-decoding under several unreserved-character
//! policies, plus legacy `%uXXXX` / UTF-16 surrogate-pair decoding.
//!
//! The four named encoders and three named decoders are thin wrappers over
//! a single [`encode`] / [`decode_with`] engine parameterized by which
//! unreserved set (or decode mode) to use.

mod utf8;

use alloc::vec::Vec;

use crate::error::DecodeError;
use crate::tables::{self, DEC2HEX, UNRESERVED_2396, UNRESERVED_3986, UNRESERVED_FORM, UNRESERVED_URI};

/// Which unreserved-character set [`encode`] should leave un-escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// `encode_uri`: `0-9 a-zA-Z !#$&'()*+,-./:;=?@_~`.
    Uri,
    /// `encode_form`: `0-9 a-zA-Z *-._~`, with `SP` written as `+`.
    Form,
    /// `encode2396`: RFC 2396 `unreserved`, `0-9 a-zA-Z !'()*-._~`.
    Rfc2396,
    /// `encode3986`: RFC 3986 `unreserved`, `0-9 a-zA-Z -._~`.
    Rfc3986,
}

impl Policy {
    const fn table(self) -> &'static [u8; 256] {
        match self {
            Self::Uri => &UNRESERVED_URI,
            Self::Form => &UNRESERVED_FORM,
            Self::Rfc2396 => &UNRESERVED_2396,
            Self::Rfc3986 => &UNRESERVED_3986,
        }
    }
}

/// Which reserved-decode / `+`-handling behavior [`decode_with`] should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeMode {
    /// Every `%XX` is decoded; `+` is literal.
    All,
    /// `%XX` is decoded unless it names a byte in the ECMAScript
    /// `decodeURI`-preserved set (`#$&+,/:;=?@`), in which case the
    /// three-byte escape is copied through verbatim. `+` is literal.
    Uri,
    /// Every `%XX` is decoded; `+` decodes to `SP` (0x20).
    Form,
}

/// Bytes that `DecodeMode::Uri` leaves percent-encoded rather than decoding,
/// matching ECMAScript's `decodeURI`.
const URI_PRESERVED: &[u8] = b"#$&+,/:;=?@";

/// Percent-encode `input` under `policy`. Cannot fail; output is at most
/// `3 * input.len()` bytes.
#[must_use]
pub fn encode(input: &[u8], policy: Policy) -> Vec<u8> {
    let table = policy.table();
    let mut out = Vec::with_capacity(input.len());
    for &b in input {
        let unreserved = table[b as usize];
        if unreserved != 0 {
            out.push(unreserved);
        } else {
            out.push(b'%');
            out.push(DEC2HEX[(b >> 4) as usize]);
            out.push(DEC2HEX[(b & 0x0F) as usize]);
        }
    }
    out
}

/// `encode_uri(input)`: percent-encode everything outside
/// `0-9 a-zA-Z !#$&'()*+,-./:;=?@_~`.
#[must_use]
pub fn encode_uri(input: &[u8]) -> Vec<u8> {
    encode(input, Policy::Uri)
}

/// `encode_form(input)`: percent-encode everything outside
/// `0-9 a-zA-Z *-._~`, writing `SP` as `+`.
#[must_use]
pub fn encode_form(input: &[u8]) -> Vec<u8> {
    encode(input, Policy::Form)
}

/// `encode2396(input)`: percent-encode everything outside RFC 2396's
/// `unreserved` set.
#[must_use]
pub fn encode_2396(input: &[u8]) -> Vec<u8> {
    encode(input, Policy::Rfc2396)
}

/// `encode3986(input)`: percent-encode everything outside RFC 3986's
/// `unreserved` set.
#[must_use]
pub fn encode_3986(input: &[u8]) -> Vec<u8> {
    encode(input, Policy::Rfc3986)
}

/// Percent-decode `input` under `mode`. See [`DecodeMode`] for the
/// differences between modes. On failure, returns the offset of the `%`
/// that introduced the bad escape.
pub fn decode_with(input: &[u8], mode: DecodeMode) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0usize;
    while i < input.len() {
        let b = input[i];
        if b != b'%' {
            if b == b'+' && matches!(mode, DecodeMode::Form) {
                out.push(b' ');
            } else {
                out.push(b);
            }
            i += 1;
            continue;
        }

        // Legacy `%uXXXX` escape.
        if input.get(i + 1) == Some(&b'u') {
            i = decode_unicode_escape(input, i, &mut out)?;
            continue;
        }

        let (h1, h2) = (input.get(i + 1).copied(), input.get(i + 2).copied());
        match (h1.and_then(tables::hex_value), h2.and_then(tables::hex_value)) {
            (Some(hi), Some(lo)) => {
                let decoded = (hi << 4) | lo;
                if matches!(mode, DecodeMode::Uri) && URI_PRESERVED.contains(&decoded) {
                    out.extend_from_slice(&input[i..i + 3]);
                } else {
                    out.push(decoded);
                }
                i += 3;
            }
            _ => return Err(DecodeError::InvalidPercentEscape { offset: i }),
        }
    }
    Ok(out)
}

/// Decode a `%uXXXX` (and, for a high surrogate, a following `%uXXXX` low
/// surrogate) legacy escape starting at `input[at]` (the `%`). Returns the
/// index to resume scanning at on success.
fn decode_unicode_escape(
    input: &[u8],
    at: usize,
    out: &mut Vec<u8>,
) -> Result<usize, DecodeError> {
    let unit = read_u16_escape(input, at)
        .ok_or(DecodeError::InvalidPercentEscape { offset: at })?;

    if utf8::is_high_surrogate(unit) {
        if let Some(low) = read_u16_escape(input, at + 6) {
            if utf8::is_low_surrogate(low) {
                let cp = utf8::combine_surrogate_pair(unit, low);
                if utf8::push_utf8(out, cp) {
                    return Ok(at + 12);
                }
            }
        }
        return Err(DecodeError::InvalidUnicodeEscape { offset: at });
    }

    if utf8::is_low_surrogate(unit) {
        return Err(DecodeError::InvalidUnicodeEscape { offset: at });
    }

    if utf8::push_utf8(out, unit) {
        Ok(at + 6)
    } else {
        Err(DecodeError::InvalidUnicodeEscape { offset: at })
    }
}

/// Read the 16-bit code unit out of a `%uXXXX` escape at `input[at..at+6]`
/// (`input[at] == '%'`, `input[at + 1] == 'u'`).
fn read_u16_escape(input: &[u8], at: usize) -> Option<u32> {
    if input.get(at).copied() != Some(b'%') || input.get(at + 1).copied() != Some(b'u') {
        return None;
    }
    let mut value: u32 = 0;
    for k in 0..4 {
        let nibble = tables::hex_value(*input.get(at + 2 + k)?)?;
        value = (value << 4) | u32::from(nibble);
    }
    Some(value)
}

/// `decode(input)`: percent-decode every `%XX` and `%uXXXX`; `+` stays
/// literal.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode_with(input, DecodeMode::All)
}

/// `decode_uri(input)`: percent-decode `input`, leaving the ECMAScript
/// `decodeURI`-reserved set (`#$&+,/:;=?@`) percent-encoded.
pub fn decode_uri(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode_with(input, DecodeMode::Uri)
}

/// `decode_form(input)`: percent-decode `input`, additionally decoding `+`
/// to `SP`.
pub fn decode_form(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode_with(input, DecodeMode::Form)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{DecodeMode, Policy, decode, decode_form, decode_uri, decode_with, encode_uri};
    use crate::error::DecodeError;

    #[test]
    fn encode_uri_leaves_reserved_and_mark_bytes() {
        assert_eq!(encode_uri(b"a b/c?"), b"a%20b/c?");
    }

    #[test]
    fn decode_uri_preserves_reserved_but_decodes_space() {
        assert_eq!(decode_uri(b"%2F%20").unwrap(), b"%2F ");
    }

    #[test]
    fn decode_all_decodes_everything() {
        assert_eq!(decode(b"%2F%20").unwrap(), b"/ ");
    }

    #[test]
    fn form_decodes_plus_to_space() {
        assert_eq!(decode_form(b"a+b").unwrap(), b"a b");
    }

    #[test]
    fn all_mode_treats_plus_as_literal() {
        assert_eq!(decode(b"a+b").unwrap(), b"a+b");
    }

    #[test]
    fn percent_with_fewer_than_two_following_bytes_fails_at_percent() {
        let err = decode(b"abc%4").unwrap_err();
        assert_eq!(err, DecodeError::InvalidPercentEscape { offset: 3 });
    }

    #[test]
    fn non_hex_after_percent_fails() {
        let err = decode(b"%zz").unwrap_err();
        assert_eq!(err, DecodeError::InvalidPercentEscape { offset: 0 });
    }

    #[test]
    fn surrogate_pair_decodes_to_emoji() {
        let out = decode(b"%uD83D%uDE00").unwrap();
        assert_eq!(out, vec![0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn unpaired_high_surrogate_fails() {
        let err = decode(b"%uD83D").unwrap_err();
        assert_eq!(err, DecodeError::InvalidUnicodeEscape { offset: 0 });
    }

    #[test]
    fn unpaired_low_surrogate_fails() {
        let err = decode(b"%uDE00").unwrap_err();
        assert_eq!(err, DecodeError::InvalidUnicodeEscape { offset: 0 });
    }

    #[test]
    fn accepts_nul_bytes() {
        assert_eq!(super::encode(&[0u8], Policy::Rfc3986), b"%00");
    }

    #[test]
    fn decode_with_all_mode_matches_decode() {
        assert_eq!(decode_with(b"%41", DecodeMode::All).unwrap(), decode(b"%41").unwrap());
    }
}
