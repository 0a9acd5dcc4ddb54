//! The top-level URI parser: a single-pass, goto-style state machine over
//! [`tagged states`](State) that decomposes a byte string into the RFC 3986
//! structural components.
//!
//! Grounded on `examples/original_source/src/parse.c`'s goto-labelled states
//! (`PARSE_PATHNAME`, `PARSE_SCHEME`, `PARSE_HOST`, `PARSE_IPV6`,
//! `PARSE_PORT`, `PARSE_PASSWORD`, `PARSE_QUERY`, `PARSE_FRAGMENT`); this
//! module turns each label into a method on [`Scanner`] rather than a literal
//! jump, with the PORT→PASSWORD backtrack implemented by re-reading the same
//! bytes from a saved cursor instead of structural backtracking.

mod ipv4;
mod ipv6;
mod query;

use crate::error::ParseError;
use crate::tables::{is_hex_digit, URIC};
pub use query::QueryParams;

/// Configuration for [`parse`].
///
/// Mirrors the teacher crate's `ParserOptions` (`crates/jsonmodem`): a
/// plain `Default`-derived struct of independent knobs rather than
/// positional booleans, so call sites read `ParseOptions { parse_params:
/// true, ..Default::default() }` instead of `parse(input, true, 0, false)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Whether to additionally decompose the query string into
    /// [`QueryParams`]. When `false`, only the raw `query` span is
    /// produced.
    ///
    /// # Default
    ///
    /// `false`
    pub parse_params: bool,

    /// Byte offset to start scanning from, instead of `0`.
    ///
    /// # Default
    ///
    /// `0`
    pub initial_cursor: usize,

    /// Skip the pathname/scheme/authority dispatch entirely and parse the
    /// whole input as a query string, as if it were preceded by `?`.
    ///
    /// # Default
    ///
    /// `false`
    pub force_querystring: bool,
}

/// The RFC 3986 structural components observed during one [`parse`] call.
///
/// All string fields are byte slices that reference regions of the input —
/// no normalization, no percent-decoding. [`QueryParams`] is the one field
/// that owns decoded bytes, since percent-decoding necessarily allocates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseResult<'src> {
    /// The scheme, not including the following `:`.
    pub scheme: Option<&'src [u8]>,
    /// `user[:password]`, not including the trailing `@`. Brackets/colon
    /// are not stripped; this is the raw substring.
    pub userinfo: Option<&'src [u8]>,
    /// The `user` portion of userinfo.
    pub user: Option<&'src [u8]>,
    /// The `password` portion of userinfo, if a `:` was present.
    pub password: Option<&'src [u8]>,
    /// The full host-including-port substring, e.g. `example.com:80`. For
    /// a bracketed IPv6 literal, brackets are included.
    pub host: Option<&'src [u8]>,
    /// Only the host portion, excluding `:port`. For a bracketed IPv6
    /// literal, brackets are included.
    pub hostname: Option<&'src [u8]>,
    /// The numeric port, as its decimal digit span (not parsed to an
    /// integer — callers that need the number can parse this slice).
    pub port: Option<&'src [u8]>,
    /// The path, not including a leading `?` or `#`.
    pub path: Option<&'src [u8]>,
    /// The raw query span, not including the leading `?`, not decoded.
    pub query: Option<&'src [u8]>,
    /// The decoded query-parameter multimap, present iff
    /// [`ParseOptions::parse_params`] was set and at least one parameter
    /// was observed.
    pub query_params: Option<QueryParams>,
    /// The fragment, not including the leading `#`.
    pub fragment: Option<&'src [u8]>,
}

/// The full return value of [`parse`]: the fields observed so far, the
/// final cursor position, and — on a failed parse — the error describing
/// what stopped it.
///
/// This replaces the C API's three-or-two-value return: [`ParseResult`]
/// always carries whatever was parsed before a failure (spec: "Partial
/// results accumulated so far remain in the result mapping"), so a Rust
/// `Result<ParseResult, ParseError>` would force discarding that partial
/// state on the error path. A plain struct avoids that tradeoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome<'src> {
    /// Whatever fields were observed, including fields committed before a
    /// failure.
    pub result: ParseResult<'src>,
    /// On success, one past the last consumed byte (`== input.len()`). On
    /// failure, the offset of the first offending byte.
    pub cursor: usize,
    /// `None` on a complete parse; `Some` iff parsing failed partway
    /// through.
    pub error: Option<ParseError>,
}

impl ParseOutcome<'_> {
    /// `true` if parsing consumed the whole input without error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse `input` according to `options`.
///
/// See the module documentation and [`ParseResult`] for field semantics.
/// An empty input (or an `initial_cursor` at or past the end of input)
/// returns an empty [`ParseResult`] and a cursor equal to `initial_cursor`.
#[must_use]
pub fn parse(input: &[u8], options: ParseOptions) -> ParseOutcome<'_> {
    let mut scanner = Scanner { input, cursor: options.initial_cursor.min(input.len()), result: ParseResult::default() };
    let error = scanner.run(options);
    #[cfg(any(test, feature = "fuzzing"))]
    assert!(scanner.cursor <= input.len(), "Internal error: cursor ran past end of input");
    ParseOutcome { result: scanner.result, cursor: scanner.cursor, error }
}

/// `true` if `b` is legal in the lenient scheme grammar this parser uses:
/// `ALPHA / DIGIT / "+" / "-" / "."`, with no restriction on the first
/// byte (spec: "lenient on the first byte").
const fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

/// Mutable scan state threaded through every state method. Each method
/// corresponds to one labelled state in spec.md's state-machine table;
/// transitions are plain calls rather than jumps, and the cursor is the
/// only piece of state that moves "backwards" (the PORT→PASSWORD
/// backtrack re-reads from a saved position).
struct Scanner<'src> {
    input: &'src [u8],
    cursor: usize,
    result: ParseResult<'src>,
}

impl<'src> Scanner<'src> {
    fn byte(&self) -> Option<u8> {
        self.input.get(self.cursor).copied()
    }

    fn invalid_byte_err(&self) -> ParseError {
        ParseError::invalid_byte(self.cursor, self.byte().unwrap_or(0))
    }

    /// Validate (but do not decode) a percent-escape at `self.cursor`
    /// (`input[cursor] == '%'`). Accepts both `%XX` (two hex digits) and
    /// the legacy `%uXXXX` (four hex digits) forms, since the parser must
    /// tolerate `%u` syntax at scan time for [`QueryParams::parse`] to be
    /// able to decode it later. Returns the cursor position just past the
    /// escape on success.
    fn validate_pct(&self) -> Result<usize, ParseError> {
        if self.input.get(self.cursor + 1) == Some(&b'u') {
            for k in 0..4u8 {
                let ok = self
                    .input
                    .get(self.cursor + 2 + usize::from(k))
                    .copied()
                    .is_some_and(is_hex_digit);
                if !ok {
                    return Err(ParseError::invalid_percent_escape(self.cursor));
                }
            }
            Ok(self.cursor + 6)
        } else {
            let h1 = self.input.get(self.cursor + 1).copied();
            let h2 = self.input.get(self.cursor + 2).copied();
            if h1.is_some_and(is_hex_digit) && h2.is_some_and(is_hex_digit) {
                Ok(self.cursor + 3)
            } else {
                Err(ParseError::invalid_percent_escape(self.cursor))
            }
        }
    }

    fn set_path(&mut self, start: usize, end: usize) {
        if end > start {
            self.result.path = Some(&self.input[start..end]);
        }
    }

    fn commit_host_only(&mut self, start: usize, end: usize) {
        let slice = &self.input[start..end];
        self.result.host = Some(slice);
        self.result.hostname = Some(slice);
    }

    /// Top-level dispatch (spec.md §4.3 "Initial dispatch").
    fn run(&mut self, options: ParseOptions) -> Option<ParseError> {
        if self.cursor >= self.input.len() {
            return None;
        }
        if options.force_querystring {
            return self.query(options.parse_params);
        }
        match self.byte() {
            Some(0) => Some(self.invalid_byte_err()),
            Some(b'?') => self.query(options.parse_params),
            Some(b'#') => {
                self.cursor += 1;
                self.fragment()
            }
            _ => self.pathname(options.parse_params),
        }
    }

    /// PATHNAME state, including scheme detection. Scheme detection is
    /// armed only when no scheme has been committed yet for this parse —
    /// once `scheme://` is committed, a later `:` inside the remaining
    /// path can never be mistaken for a second scheme. A `:` as the very
    /// first byte of an eligible run commits an empty scheme (e.g.
    /// `"://host/path"` parses with `scheme == Some(b"")`), matching the
    /// original source's `chk_scheme` flag, which is never gated on the
    /// accumulated run being non-empty.
    fn pathname(&mut self, parse_params: bool) -> Option<ParseError> {
        let scheme_eligible = self.result.scheme.is_none();
        let start = self.cursor;
        let mut can_be_scheme = scheme_eligible;
        loop {
            match self.byte() {
                None => {
                    self.set_path(start, self.cursor);
                    return None;
                }
                Some(b':') if can_be_scheme => {
                    return self.commit_scheme(start, parse_params);
                }
                Some(b'?') => {
                    self.set_path(start, self.cursor);
                    return self.query(parse_params);
                }
                Some(b'#') => {
                    self.set_path(start, self.cursor);
                    self.cursor += 1;
                    return self.fragment();
                }
                Some(b'%') => {
                    can_be_scheme = false;
                    match self.validate_pct() {
                        Ok(next) => self.cursor = next,
                        Err(e) => return Some(e),
                    }
                }
                Some(b) => {
                    if URIC[b as usize] == 0 {
                        return Some(self.invalid_byte_err());
                    }
                    if can_be_scheme && !is_scheme_byte(b) {
                        can_be_scheme = false;
                    }
                    self.cursor += 1;
                }
            }
        }
    }

    /// Commit the accumulated `[start, cursor)` run as `scheme` and require
    /// `://` to follow.
    fn commit_scheme(&mut self, start: usize, parse_params: bool) -> Option<ParseError> {
        let colon = self.cursor;
        self.result.scheme = Some(&self.input[start..colon]);
        let slash1 = colon + 1;
        let slash2 = colon + 2;
        if self.input.get(slash1) != Some(&b'/') || self.input.get(slash2) != Some(&b'/') {
            let off = if self.input.get(slash1) == Some(&b'/') { slash2 } else { slash1 };
            return Some(ParseError::invalid_byte(off, self.input.get(off).copied().unwrap_or(0)));
        }
        self.cursor = slash2 + 1;
        self.host_entry(parse_params, false)
    }

    /// HOST state entry: dispatch on the first byte of a fresh authority
    /// segment (right after `scheme://`, or right after a committed `@`).
    fn host_entry(&mut self, parse_params: bool, userinfo_seen: bool) -> Option<ParseError> {
        let start = self.cursor;
        match self.byte() {
            None => None,
            Some(b'[') => self.ipv6(parse_params),
            Some(b'/' | b'.') if !userinfo_seen => self.pathname(parse_params),
            Some(b':') => {
                self.cursor += 1;
                self.port(start, start, true, false, true, parse_params)
            }
            Some(b'@') if !userinfo_seen => {
                self.result.user = Some(&self.input[start..start]);
                self.result.userinfo = Some(&self.input[start..start]);
                self.cursor += 1;
                self.host_entry(parse_params, true)
            }
            Some(b) if b == b'%' || b.is_ascii_alphanumeric() => {
                self.host_scan(start, userinfo_seen, parse_params)
            }
            Some(_) => Some(self.invalid_byte_err()),
        }
    }

    /// HOST state body, after the first byte has already been validated by
    /// [`Self::host_entry`].
    fn host_scan(&mut self, start: usize, userinfo_seen: bool, parse_params: bool) -> Option<ParseError> {
        loop {
            match self.byte() {
                None => {
                    self.commit_host_only(start, self.cursor);
                    return None;
                }
                Some(b'%') => match self.validate_pct() {
                    Ok(next) => self.cursor = next,
                    Err(e) => return Some(e),
                },
                Some(b'.') => self.cursor += 1,
                Some(b'@') if !userinfo_seen => {
                    let at = self.cursor;
                    self.result.user = Some(&self.input[start..at]);
                    self.result.userinfo = Some(&self.input[start..at]);
                    self.cursor = at + 1;
                    return self.host_entry(parse_params, true);
                }
                Some(b':') => {
                    let colon = self.cursor;
                    self.cursor += 1;
                    return self.port(start, colon, false, !userinfo_seen, true, parse_params);
                }
                Some(b'/') => {
                    self.commit_host_only(start, self.cursor);
                    return self.pathname(parse_params);
                }
                Some(b'?') => {
                    self.commit_host_only(start, self.cursor);
                    return self.query(parse_params);
                }
                Some(b'#') => {
                    self.commit_host_only(start, self.cursor);
                    self.cursor += 1;
                    return self.fragment();
                }
                Some(b) => {
                    if URIC[b as usize] == 0 {
                        return Some(self.invalid_byte_err());
                    }
                    self.cursor += 1;
                }
            }
        }
    }

    /// IPV6 state: scan a bracketed literal, then dispatch on what follows
    /// the closing `]`.
    fn ipv6(&mut self, parse_params: bool) -> Option<ParseError> {
        let bracket_start = self.cursor;
        match ipv6::parse_ipv6(self.input, self.cursor + 1) {
            Ok(close) => {
                let slice = &self.input[bracket_start..=close];
                self.result.host = Some(slice);
                self.result.hostname = Some(slice);
                self.cursor = close + 1;
                match self.byte() {
                    None => None,
                    Some(b':') => {
                        let colon = self.cursor;
                        self.cursor += 1;
                        self.port(bracket_start, colon, false, false, true, parse_params)
                    }
                    Some(b'/') => self.pathname(parse_params),
                    Some(b'?') => self.query(parse_params),
                    Some(b'#') => {
                        self.cursor += 1;
                        self.fragment()
                    }
                    Some(_) => Some(self.invalid_byte_err()),
                }
            }
            Err(off) => Some(ParseError::invalid_byte(off, self.input.get(off).copied().unwrap_or(0))),
        }
    }

    /// PORT state: accumulate digits, bounded to `0..=0xFFFF`. On a
    /// non-digit terminator that is not a legal port terminator (`/ ? #`
    /// or end-of-input), either backtrack to PASSWORD (when there is an
    /// unresolved `user:` candidate) or fail.
    #[allow(clippy::too_many_arguments)]
    fn port(
        &mut self,
        host_start: usize,
        colon: usize,
        omit_hostname: bool,
        can_backtrack: bool,
        commit_host: bool,
        parse_params: bool,
    ) -> Option<ParseError> {
        let digits_start = self.cursor;
        let mut value: u32 = 0;
        loop {
            match self.byte() {
                Some(b @ b'0'..=b'9') => {
                    let candidate = value * 10 + u32::from(b - b'0');
                    if candidate > 0xFFFF {
                        return Some(ParseError::port_out_of_range(self.cursor));
                    }
                    value = candidate;
                    self.cursor += 1;
                }
                terminator @ (None | Some(b'/' | b'?' | b'#')) => {
                    let digits_end = self.cursor;
                    if commit_host {
                        if omit_hostname {
                            self.result.host = Some(&self.input[host_start..digits_end]);
                        } else {
                            self.result.host = Some(&self.input[host_start..digits_end]);
                            self.result.hostname = Some(&self.input[host_start..colon]);
                        }
                    }
                    self.result.port = Some(&self.input[digits_start..digits_end]);
                    return match terminator {
                        None => None,
                        Some(b'/') => self.pathname(parse_params),
                        Some(b'?') => self.query(parse_params),
                        Some(b'#') => {
                            self.cursor += 1;
                            self.fragment()
                        }
                        _ => unreachable!(),
                    };
                }
                Some(_) => {
                    if can_backtrack && !omit_hostname {
                        return self.password(host_start, colon, parse_params);
                    }
                    return Some(self.invalid_byte_err());
                }
            }
        }
    }

    /// PASSWORD state: re-scan `[host_start, colon)` as `user` and
    /// everything from `colon + 1` to the next `@` as `password`,
    /// committing `userinfo` as the whole `user:password` span.
    fn password(&mut self, user_start: usize, colon: usize, parse_params: bool) -> Option<ParseError> {
        self.cursor = colon + 1;
        loop {
            match self.byte() {
                Some(b'@') => {
                    let at = self.cursor;
                    self.result.user = Some(&self.input[user_start..colon]);
                    self.result.password = Some(&self.input[colon + 1..at]);
                    self.result.userinfo = Some(&self.input[user_start..at]);
                    self.cursor = at + 1;
                    return self.host_entry(parse_params, true);
                }
                Some(b'%') => match self.validate_pct() {
                    Ok(next) => self.cursor = next,
                    Err(e) => return Some(e),
                },
                Some(b':' | b'/' | b'?' | b'#' | 0) | None => {
                    return Some(self.invalid_byte_err());
                }
                Some(b) => {
                    if URIC[b as usize] == 0 {
                        return Some(self.invalid_byte_err());
                    }
                    self.cursor += 1;
                }
            }
        }
    }

    /// QUERY state: scan (optionally stripping a leading `?`) until `#` or
    /// end of input, validating `%XX`/`%uXXXX` syntax inline. Per the
    /// design notes, a bare `?` with nothing following it (immediately `#`
    /// or EOF) normalizes to an *absent* query rather than `Some(b"")`.
    fn query(&mut self, parse_params: bool) -> Option<ParseError> {
        if self.byte() == Some(b'?') {
            self.cursor += 1;
        }
        let start = self.cursor;
        loop {
            match self.byte() {
                None => return self.finish_query(start, self.cursor, parse_params),
                Some(b'#') => {
                    let err = self.finish_query(start, self.cursor, parse_params);
                    if err.is_some() {
                        return err;
                    }
                    self.cursor += 1;
                    return self.fragment();
                }
                Some(b'%') => match self.validate_pct() {
                    Ok(next) => self.cursor = next,
                    Err(e) => return Some(e),
                },
                Some(b) => {
                    if URIC[b as usize] == 0 {
                        return Some(self.invalid_byte_err());
                    }
                    self.cursor += 1;
                }
            }
        }
    }

    fn finish_query(&mut self, start: usize, end: usize, parse_params: bool) -> Option<ParseError> {
        if end > start {
            let raw = &self.input[start..end];
            self.result.query = Some(raw);
            if parse_params {
                match QueryParams::parse(raw, start) {
                    Ok(params) => {
                        if !params.is_empty() {
                            self.result.query_params = Some(params);
                        }
                    }
                    Err(e) => {
                        self.cursor = e.offset;
                        return Some(e);
                    }
                }
            }
        }
        None
    }

    /// FRAGMENT state: scan to end of input, validating `%XX`/`%uXXXX`
    /// syntax inline. There is no further transition out of FRAGMENT.
    fn fragment(&mut self) -> Option<ParseError> {
        let start = self.cursor;
        loop {
            match self.byte() {
                None => {
                    if self.cursor > start {
                        self.result.fragment = Some(&self.input[start..self.cursor]);
                    }
                    return None;
                }
                Some(b'%') => match self.validate_pct() {
                    Ok(next) => self.cursor = next,
                    Err(e) => return Some(e),
                },
                Some(b) => {
                    if URIC[b as usize] == 0 {
                        return Some(self.invalid_byte_err());
                    }
                    self.cursor += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
