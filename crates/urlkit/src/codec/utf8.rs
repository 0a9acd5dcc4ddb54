//! UTF-8 emission from a Unicode scalar value accumulated out of `%uXXXX`
//! legacy escapes (and, for paired surrogates, two of them).
//!
//! This is deliberately independent of `char`: the whole point of the
//! surrogate-pair path is to accept code units that are *not* valid scalar
//! values on their own (`0xD800..=0xDFFF`), combine them, and only then
//! validate the result, so we can't route this through `char::from_u32`
//! until after the surrogate pairing logic has already run.

/// Lowest and highest UTF-16 surrogate code units.
pub const SURROGATE_LOW: u32 = 0xD800;
pub const SURROGATE_HIGH_START: u32 = 0xDC00;
pub const SURROGATE_END: u32 = 0xDFFF;
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// `true` if `cu` is a high (leading) surrogate: `0xD800..=0xDBFF`.
#[inline]
#[must_use]
pub const fn is_high_surrogate(cu: u32) -> bool {
    cu >= SURROGATE_LOW && cu < SURROGATE_HIGH_START
}

/// `true` if `cu` is a low (trailing) surrogate: `0xDC00..=0xDFFF`.
#[inline]
#[must_use]
pub const fn is_low_surrogate(cu: u32) -> bool {
    cu >= SURROGATE_HIGH_START && cu <= SURROGATE_END
}

/// Combine a high/low UTF-16 surrogate pair into the code point it encodes.
#[inline]
#[must_use]
pub const fn combine_surrogate_pair(hi: u32, lo: u32) -> u32 {
    0x10000 + (hi - SURROGATE_LOW) * 0x400 + (lo - SURROGATE_HIGH_START)
}

/// Encode `cp` as UTF-8 into `out`, rejecting the surrogate range and code
/// points at or above `0x110000` (the end of the Unicode codespace).
///
/// Returns `false` (and writes nothing) if `cp` is not a valid Unicode
/// scalar value for this purpose.
pub fn push_utf8(out: &mut alloc::vec::Vec<u8>, cp: u32) -> bool {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if (SURROGATE_LOW..=SURROGATE_END).contains(&cp) || cp > MAX_CODE_POINT {
        return false;
    } else if cp < 0x1_0000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    }
    true
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{combine_surrogate_pair, push_utf8};

    #[test]
    fn ascii_is_one_byte() {
        let mut out = Vec::new();
        assert!(push_utf8(&mut out, u32::from(b'A')));
        assert_eq!(out, b"A");
    }

    #[test]
    fn rejects_bare_surrogate() {
        let mut out = Vec::new();
        assert!(!push_utf8(&mut out, 0xD83D));
        assert!(out.is_empty());
    }

    #[test]
    fn rejects_above_max_code_point() {
        let mut out = Vec::new();
        assert!(!push_utf8(&mut out, 0x0011_0000));
    }

    #[test]
    fn emoji_surrogate_pair_combines_to_u1f600() {
        // U+1F600 GRINNING FACE = %uD83D%uDE00
        let cp = combine_surrogate_pair(0xD83D, 0xDE00);
        assert_eq!(cp, 0x1_F600);
        let mut out = Vec::new();
        assert!(push_utf8(&mut out, cp));
        assert_eq!(out, [0xF0, 0x9F, 0x98, 0x80]);
    }
}
