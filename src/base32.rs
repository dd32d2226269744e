//! RFC 4648 base32 without padding.
//!
//! Decoding is case-insensitive. Input whose bit count is not a multiple of 8
//! is accepted: the trailing partial byte (fewer than 8 bits) is dropped, so
//! `n` characters always decode to `n * 5 / 8` bytes.

use data_encoding::Encoding;
use data_encoding_macro::new_encoding;

use crate::{Error, Result};

/// The 32 symbols, in value order.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Upper-case alphabet, lower case folded in, non-zero trailing bits allowed
const ENCODING: Encoding = new_encoding! {
    symbols: "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567",
    translate_from: "abcdefghijklmnopqrstuvwxyz",
    translate_to: "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    check_trailing_bits: false,
};

/// Whether `c` is a base32 symbol, ignoring case.
pub fn is_symbol(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A'..='Z' | '2'..='7')
}

pub fn encode(bytes: &[u8]) -> String {
    ENCODING.encode(bytes)
}

pub fn decode(input: &str) -> Result<Vec<u8>> {
    if let Some(c) = input.chars().find(|&c| !is_symbol(c)) {
        return Err(Error::InvalidCharset(c));
    }

    // all symbols are ASCII from here on, so byte length == char count
    let bytes = input.len() * 5 / 8;
    let used = (bytes * 8 + 4) / 5;

    ENCODING
        .decode(input[..used].as_bytes())
        .map_err(|e| Error::InvalidCharset(input[e.position..].chars().next().unwrap_or('?')))
}
