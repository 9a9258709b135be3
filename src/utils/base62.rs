//! Base-62 short code encoding.
//!
//! Maps non-negative integers to compact alphanumeric codes and back. The
//! mapping is a plain positional numeral system over a fixed 62-symbol
//! alphabet, so it is deterministic and bijective: every id has exactly one
//! code and every canonical code names exactly one id.
//!
//! # Alphabet
//!
//! Digits `0-9`, then lowercase `a-z`, then uppercase `A-Z`. The value `0`
//! encodes to `"0"`, `61` to `"Z"`, `62` to `"10"`.

/// Symbols in positional order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Numeral base (alphabet size).
pub const BASE: u64 = 62;

/// Longest code [`encode`] can produce (`u64::MAX` needs 11 symbols).
pub const MAX_CODE_LEN: usize = 11;

/// Reasons a string is not a canonical base-62 code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Code is empty")]
    Empty,

    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Code has a leading zero")]
    LeadingZero,

    #[error("Code does not fit in 64 bits")]
    Overflow,
}

/// Encodes a non-negative integer as a base-62 code.
///
/// Repeatedly divides by 62, collecting remainders as symbols, then reverses
/// them. No padding is applied, so code length grows logarithmically.
///
/// # Examples
///
/// ```
/// use url_shortener::utils::base62::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut symbols = Vec::with_capacity(MAX_CODE_LEN);
    while value > 0 {
        // remainder is always < 62
        symbols.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }

    symbols.iter().rev().map(|&b| char::from(b)).collect()
}

/// Decodes a canonical base-62 code back to its integer.
///
/// Only strings that [`encode`] could have produced are accepted, which keeps
/// `decode` the exact inverse of `encode`.
///
/// # Errors
///
/// - [`DecodeError::Empty`] for an empty string
/// - [`DecodeError::LeadingZero`] for multi-symbol codes starting with `0`
/// - [`DecodeError::InvalidSymbol`] for anything outside the alphabet
/// - [`DecodeError::Overflow`] when the value exceeds `u64::MAX`
///
/// # Examples
///
/// ```
/// use url_shortener::utils::base62::{decode, DecodeError};
///
/// assert_eq!(decode("10"), Ok(62));
/// assert_eq!(decode("01"), Err(DecodeError::LeadingZero));
/// ```
pub fn decode(code: &str) -> Result<u64, DecodeError> {
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }

    if code.len() > 1 && code.starts_with('0') {
        return Err(DecodeError::LeadingZero);
    }

    let mut value: u64 = 0;
    for (position, symbol) in code.chars().enumerate() {
        let digit = symbol_value(symbol).ok_or(DecodeError::InvalidSymbol { symbol, position })?;

        value = value
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(DecodeError::Overflow)?;
    }

    Ok(value)
}

/// Returns true if `code` is exactly what [`encode`] produces for some value.
pub fn is_canonical(code: &str) -> bool {
    decode(code).is_ok()
}

fn symbol_value(symbol: char) -> Option<u64> {
    let byte = u8::try_from(symbol).ok()?;
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'z' => byte - b'a' + 10,
        b'A'..=b'Z' => byte - b'A' + 36,
        _ => return None,
    };
    Some(u64::from(value))
}
