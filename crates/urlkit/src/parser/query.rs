//! Decoded query-parameter grouping: `key[=value]` pairs separated by `&`,
//! each side decoded under [`crate::codec::DecodeMode::Form`].
//!
//! "Keys map to an ordered list of values; append on every observation" —
//! an insertion-ordered `Vec<(Vec<u8>, Vec<Vec<u8>>)>` with linear lookup.
//! The original's per-key subtable caching is a Lua/GC-specific hack this
//! crate does not inherit.

use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{self, DecodeMode};
use crate::error::{DecodeError, ParseError};

/// An ordered multimap from decoded query-parameter name to the ordered
/// sequence of decoded values observed for that name.
///
/// A parameter with no `=` is a name bound to the empty-string value. Each
/// occurrence of a repeated key appends to that key's value list rather
/// than overwriting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryParams {
    entries: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
}

impl QueryParams {
    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no parameters were observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The ordered values observed for `key`, or `None` if `key` was never
    /// observed.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_slice())
    }

    /// Iterate `(key, values)` pairs in first-observation order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[Vec<u8>])> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    fn push(&mut self, key: Vec<u8>, value: Vec<u8>) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            values.push(value);
        } else {
            self.entries.push((key, vec![value]));
        }
    }

    /// Parse `raw` (the query span with the leading `?` already stripped)
    /// into an ordered multimap. `base` is `raw`'s absolute offset in the
    /// original input, used to translate a decode failure's relative offset
    /// into an absolute [`ParseError`] offset.
    ///
    /// Consecutive `&` collapse (empty segments are ignored); each
    /// parameter's key and value are independently decoded.
    pub(crate) fn parse(raw: &[u8], base: usize) -> Result<Self, ParseError> {
        let mut params = Self::default();
        let mut i = 0usize;
        while i < raw.len() {
            if raw[i] == b'&' {
                i += 1;
                continue;
            }
            let seg_start = i;
            while i < raw.len() && raw[i] != b'&' {
                i += 1;
            }
            let segment = &raw[seg_start..i];
            let (key_raw, val_raw, key_off, val_off) =
                match segment.iter().position(|&b| b == b'=') {
                    Some(eq) => (&segment[..eq], &segment[eq + 1..], seg_start, seg_start + eq + 1),
                    None => (segment, &b""[..], seg_start, seg_start + segment.len()),
                };
            let key = decode_component(key_raw, base + key_off)?;
            let value = decode_component(val_raw, base + val_off)?;
            params.push(key, value);
        }
        Ok(params)
    }
}

fn decode_component(raw: &[u8], abs_start: usize) -> Result<Vec<u8>, ParseError> {
    codec::decode_with(raw, DecodeMode::Form).map_err(|err| match err {
        DecodeError::InvalidPercentEscape { offset } => {
            ParseError::invalid_percent_escape(abs_start + offset)
        }
        DecodeError::InvalidUnicodeEscape { offset } => {
            ParseError::invalid_unicode_escape(abs_start + offset)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn bare_key_binds_empty_string() {
        let qp = QueryParams::parse(b"a=1&&b=&=c", 0).unwrap();
        assert_eq!(qp.get(b"a"), Some(&[b"1".to_vec()][..]));
        assert_eq!(qp.get(b"b"), Some(&[b"".to_vec()][..]));
        assert_eq!(qp.get(b""), Some(&[b"c".to_vec()][..]));
    }

    #[test]
    fn repeated_key_appends_in_order() {
        let qp = QueryParams::parse(b"a=1&b=2&a=3", 0).unwrap();
        assert_eq!(qp.get(b"a"), Some(&[b"1".to_vec(), b"3".to_vec()][..]));
    }

    #[test]
    fn plus_decodes_to_space_and_percent_decodes() {
        let qp = QueryParams::parse(b"q=a+b%20c", 0).unwrap();
        assert_eq!(qp.get(b"q"), Some(&[b"a b c".to_vec()][..]));
    }

    #[test]
    fn unpaired_surrogate_in_value_fails_with_absolute_offset() {
        let raw = b"k=%uD83D";
        let err = QueryParams::parse(raw, 10).unwrap_err();
        assert_eq!(err.offset, 10 + 2);
    }
}
