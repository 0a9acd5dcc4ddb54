//! Error types for the codec and the parser.
//!
//! One `#[error(...)]`-derived enum per failure family: there is no
//! pluggable backend here to nest a context error inside, so a flat enum
//! plus a position is enough for both the codec and the parser.

use core::fmt;

/// Failure from [`crate::codec::decode_with`] and its named wrappers.
///
/// Both variants carry the 0-based offset of the first offending byte (the
/// `%` that introduced a malformed escape).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by two hex digits (or, for a legacy `%u`
    /// escape, four).
    #[error("invalid percent-escape at byte {offset}")]
    InvalidPercentEscape {
        /// Index of the `%` byte in the input.
        offset: usize,
    },
    /// A `%uXXXX` sequence decoded to an unpaired UTF-16 surrogate, or a
    /// surrogate pair decoded to a code point outside `0..0x110000`.
    #[error("invalid unicode escape at byte {offset}")]
    InvalidUnicodeEscape {
        /// Index of the `%` byte that introduced the bad escape.
        offset: usize,
    },
}

impl DecodeError {
    /// The 0-based byte offset at which decoding failed.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::InvalidPercentEscape { offset } | Self::InvalidUnicodeEscape { offset } => {
                *offset
            }
        }
    }
}

/// The kind of syntactic failure the parser encountered, without the
/// position (see [`ParseError`] for that).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A byte was disallowed in the current state.
    #[error("invalid byte {0:?}")]
    InvalidByte(DisplayByte),
    /// `%` was not followed by two hex digits (or, for a legacy `%u` escape,
    /// four).
    #[error("invalid percent-escape")]
    InvalidPercentEscape,
    /// A `%uXXXX` sequence inside a query parameter decoded to an unpaired
    /// UTF-16 surrogate, or a surrogate pair decoded to a code point outside
    /// `0..0x110000`. Only reachable through query-parameter decoding, since
    /// raw field scanning validates escape *syntax* but does not decode.
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    /// The numeric port exceeded 65535.
    #[error("port exceeds 65535")]
    PortOutOfRange,
}

/// Wrapper so `ParseErrorKind::InvalidByte`'s `Debug`/`Display` renders a
/// byte as a printable char when possible and as a hex escape otherwise,
/// without pulling in `alloc::format!` machinery for the common path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayByte(pub u8);

impl fmt::Display for DisplayByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}

/// Failure from [`crate::parser::parse`].
///
/// The parser's public entry point never returns this alone — see
/// [`crate::parser::ParseOutcome`], which always carries the partial
/// [`crate::parser::ParseResult`] accumulated before the failure alongside
/// this error, so a caller can inspect however much of the URI was
/// successfully decomposed before the failing byte.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The 0-based offset of the offending byte. On a complete failed
    /// parse this is also the final cursor value.
    pub offset: usize,
}

impl ParseError {
    pub(crate) const fn invalid_byte(offset: usize, byte: u8) -> Self {
        Self { kind: ParseErrorKind::InvalidByte(DisplayByte(byte)), offset }
    }

    pub(crate) const fn invalid_percent_escape(offset: usize) -> Self {
        Self { kind: ParseErrorKind::InvalidPercentEscape, offset }
    }

    pub(crate) const fn invalid_unicode_escape(offset: usize) -> Self {
        Self { kind: ParseErrorKind::InvalidUnicodeEscape, offset }
    }

    pub(crate) const fn port_out_of_range(offset: usize) -> Self {
        Self { kind: ParseErrorKind::PortOutOfRange, offset }
    }
}
