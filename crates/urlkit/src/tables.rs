//! Byte classification tables shared by the parser and the codec.
//!
//! Every table here is a `[u8; 256]` indexed by the raw input byte, built by
//! a `const fn` so the compiler bakes the final array into the binary the
//! same way a hand-transcribed literal would — there is no runtime
//! initialization, and the definitions below are the single source of truth
//! a reviewer can audit against the prose grammar instead of against 256
//! comma-separated magic numbers.
//!
//! A zero entry means "this byte is not in the class". A non-zero entry in
//! [`URIC`] and the `UNRESERVED_*` tables is always the byte itself
//! (identity), except for [`UNRESERVED_FORM`]'s single non-identity entry at
//! `SP` (0x20), which maps to `+`. This lets callers fuse classification and
//! literal-output in one table lookup.

const fn with_range(mut table: [u8; 256], lo: u8, hi: u8) -> [u8; 256] {
    let mut b = lo;
    while b <= hi {
        table[b as usize] = b;
        if b == hi {
            break;
        }
        b += 1;
    }
    table
}

/// The parser's per-byte classifier (`uric` in RFC 3986 terms, extended with
/// WHATWG's jump symbols). Non-zero entries are "legal here, and identical to
/// the input byte"; zero entries terminate parsing unless consumed through a
/// `%XX` escape.
///
/// Jump symbols (`/ : ; = ? @ # % + . -`) are included here even though the
/// parser treats them as state transitions rather than plain field bytes —
/// `URIC` only says "not illegal", the parser's state machine decides what a
/// byte *does*.
pub const URIC: [u8; 256] = {
    let t = with_range([0u8; 256], b'0', b'9');
    let t = with_range(t, b'A', b'Z');
    let t = with_range(t, b'a', b'z');
    with_bytes(t, b"!#$%&'()*+,-./:;=?@_~")
};

const fn with_bytes(mut table: [u8; 256], bytes: &[u8]) -> [u8; 256] {
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = bytes[i];
        i += 1;
    }
    table
}

/// `encode_uri`'s unreserved set: alphanumerics plus the full reserved+mark
/// set ECMAScript's `encodeURI` leaves untouched:
/// `0-9 a-zA-Z !#$&'()*+,-./:;=?@_~`.
pub const UNRESERVED_URI: [u8; 256] = {
    let t = with_range([0u8; 256], b'0', b'9');
    let t = with_range(t, b'A', b'Z');
    let t = with_range(t, b'a', b'z');
    with_bytes(t, b"!#$&'()*+,-./:;=?@_~")
};

/// `encode_form`'s unreserved set (the WHATWG
/// `application/x-www-form-urlencoded` percent-encode set, inverted):
/// alphanumerics plus `*-._~`. `SP` (0x20) is the one non-identity entry,
/// mapping to `+`.
pub const UNRESERVED_FORM: [u8; 256] = {
    let t = with_range([0u8; 256], b'0', b'9');
    let t = with_range(t, b'A', b'Z');
    let t = with_range(t, b'a', b'z');
    let mut t = with_bytes(t, b"*-._~");
    t[b' ' as usize] = b'+';
    t
};

/// `encode2396`'s unreserved set (RFC 2396 `unreserved`): alphanumerics plus
/// `!'()*-._~`.
pub const UNRESERVED_2396: [u8; 256] = {
    let t = with_range([0u8; 256], b'0', b'9');
    let t = with_range(t, b'A', b'Z');
    let t = with_range(t, b'a', b'z');
    with_bytes(t, b"!'()*-._~")
};

/// `encode3986`'s unreserved set (RFC 3986 `unreserved`): alphanumerics plus
/// `-._~`.
pub const UNRESERVED_3986: [u8; 256] = {
    let t = with_range([0u8; 256], b'0', b'9');
    let t = with_range(t, b'A', b'Z');
    let t = with_range(t, b'a', b'z');
    with_bytes(t, b"-._~")
};

/// Nibble decode table: `HEX[b] == 0` means `b` is not a hex digit, otherwise
/// `HEX[b] - 1` is the nibble value. The "value = nibble + 1" convention
/// frees up 0 to unambiguously mean "not a hex digit" without a second
/// validity table.
pub const HEX: [u8; 256] = {
    let mut t = [0u8; 256];
    let mut d = 0u8;
    while d < 10 {
        t[(b'0' + d) as usize] = d + 1;
        d += 1;
    }
    let mut d = 0u8;
    while d < 6 {
        t[(b'A' + d) as usize] = d + 11;
        t[(b'a' + d) as usize] = d + 11;
        d += 1;
    }
    t
};

/// Uppercase hex digit table used by every encoder: `DEC2HEX[n]` for
/// `n in 0..16` is the ASCII digit. Always uppercase, so encoded output is
/// bit-stable across implementations.
pub const DEC2HEX: [u8; 16] = *b"0123456789ABCDEF";

/// `true` if `b` is an ASCII hex digit, via [`HEX`].
#[inline]
#[must_use]
pub const fn is_hex_digit(b: u8) -> bool {
    HEX[b as usize] != 0
}

/// Decode a single hex digit to its nibble value, via [`HEX`].
#[inline]
#[must_use]
pub const fn hex_value(b: u8) -> Option<u8> {
    let v = HEX[b as usize];
    if v == 0 { None } else { Some(v - 1) }
}

#[cfg(test)]
mod tests {
    use super::{HEX, UNRESERVED_2396, UNRESERVED_3986, UNRESERVED_FORM, UNRESERVED_URI, URIC};

    #[test]
    fn uric_excludes_angle_brace_and_friends() {
        for &b in b"<>`|{}\"[]^\\" {
            assert_eq!(URIC[b as usize], 0, "byte {:?} must be illegal in URIC", b as char);
        }
    }

    #[test]
    fn uric_includes_jump_symbols() {
        for &b in b"/:;=?@#%+.-" {
            assert_eq!(URIC[b as usize], b, "jump symbol {:?} must map to itself", b as char);
        }
    }

    #[test]
    fn form_maps_space_to_plus() {
        assert_eq!(UNRESERVED_FORM[b' ' as usize], b'+');
    }

    #[test]
    fn unreserved_sets_never_include_control_or_high_bytes() {
        for table in [&UNRESERVED_URI, &UNRESERVED_FORM, &UNRESERVED_2396, &UNRESERVED_3986] {
            for b in 0u16..=0xFF {
                if b < 0x20 || b >= 0x80 {
                    assert_eq!(table[b as usize], 0, "byte {b:#x} must always be encoded");
                }
            }
        }
    }

    #[test]
    fn hex_table_is_consistent() {
        for &b in b"0123456789ABCDEFabcdef" {
            let v = HEX[b as usize];
            assert!((1..=16).contains(&v), "{:?} should decode to a nibble+1", b as char);
        }
        for b in 0u16..=0xFF {
            if !b"0123456789ABCDEFabcdef".contains(&(b as u8)) {
                assert_eq!(HEX[b as usize], 0);
            }
        }
    }
}
