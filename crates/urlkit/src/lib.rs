//! A table-driven RFC 3986 URI parser and percent-encoding codec.
//!
//! Two tightly coupled pieces share the same byte-classification idiom (see
//! [`tables`]):
//!
//! - [`parser`]: a strict, streaming, single-pass state machine that
//!   decomposes a byte string into scheme/userinfo/host/port/path/query/
//!   fragment, optionally further decomposing the query into parameter
//!   key/value pairs.
//! - [`codec`]: percent-encode/decode under several unreserved-character
//!   policies, with optional legacy `%uXXXX` / UTF-16 surrogate-pair
//!   support.
//!
//! The library is purely synchronous and side-effect-free: every public
//! function takes borrowed input and returns owned or borrowed data with no
//! shared mutable state, so concurrent callers never need to synchronize.
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod codec;
mod error;
pub mod parser;
pub mod tables;

#[cfg(test)]
mod tests;

pub use codec::{
    decode, decode_form, decode_uri, decode_with, encode, encode_2396, encode_3986, encode_form,
    encode_uri, DecodeMode, Policy,
};
pub use error::{DecodeError, DisplayByte, ParseError, ParseErrorKind};
pub use parser::{parse, ParseOptions, ParseOutcome, ParseResult, QueryParams};
