//! Print-safe transport encoding.
//!
//! Packs arbitrary bytes into the 64 symbols `a-z`, `A-Z`, `0-9`, `(`, `)` so a
//! (usually compressed) WowAce document survives channels that only accept
//! printable text. Each group of up to three bytes is read little-endian and
//! emitted as one more symbol than it has bytes, least significant six bits
//! first. There is no padding: a short tail simply produces a short group.
//!
//! ```rust
//! use serde_wowace::{decode_for_print, encode_for_print};
//!
//! let text = encode_for_print(b"abc");
//! assert_eq!(text, "Hj2y");
//! assert_eq!(decode_for_print(&text).unwrap(), Some(b"abc".to_vec()));
//! ```

use crate::{Error, Result};

/// Symbol for each 6-bit index.
pub const ALPHABET: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789()";

const INVALID: u8 = 0xff;

/// Inverse of [`ALPHABET`]; `0xff` marks bytes outside the alphabet.
const DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut index = 0;
    while index < ALPHABET.len() {
        table[ALPHABET[index] as usize] = index as u8;
        index += 1;
    }
    table
}

/// Encodes bytes into print-safe text.
///
/// The output has `ceil(4n / 3)` symbols for `n` input bytes; empty input
/// gives an empty string.
#[must_use]
pub fn encode_for_print(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 4 + 2) / 3);
    for group in bytes.chunks(3) {
        let value = group
            .iter()
            .rev()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));
        for j in 0..=group.len() {
            let index = (value >> (6 * j)) & 0x3f;
            out.push(char::from(ALPHABET[index as usize]));
        }
    }
    out
}

/// Decodes print-safe text back into bytes.
///
/// Surrounding whitespace is ignored. Input of at most one symbol after
/// trimming carries no data and yields `Ok(None)`. A trailing group of `m`
/// symbols yields `m - 1` bytes; bits beyond the last whole byte are dropped.
///
/// # Errors
///
/// Returns [`Error::InvalidSymbol`] for the first character outside the
/// alphabet. `position` counts characters from the start of the trimmed text.
pub fn decode_for_print(text: &str) -> Result<Option<Vec<u8>>> {
    let text = text.trim();
    if text.chars().nth(1).is_none() {
        return Ok(None);
    }

    let symbols = to_indices(text)?;
    let mut out = Vec::with_capacity(symbols.len() * 3 / 4);
    for group in symbols.chunks(4) {
        let value = group
            .iter()
            .rev()
            .fold(0u32, |acc, &index| (acc << 6) | u32::from(index));
        let len = group.len() - 1;
        // The little-endian bytes of `value`, truncated to the group's payload.
        out.extend_from_slice(&value.to_le_bytes()[..len]);
    }
    Ok(Some(out))
}

/// Decodes print-safe text, mapping each byte to the character with the same
/// code point.
///
/// This keeps one character per byte for consumers that treat the payload as
/// opaque text. Prefer [`decode_for_print`] for anything else.
///
/// # Errors
///
/// Same as [`decode_for_print`].
pub fn decode_for_print_latin1(text: &str) -> Result<Option<String>> {
    let bytes = decode_for_print(text)?;
    Ok(bytes.map(|bytes| bytes.into_iter().map(char::from).collect()))
}

fn to_indices(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, symbol)| {
            let index = u8::try_from(symbol)
                .map(|byte| DECODE_TABLE[usize::from(byte)])
                .unwrap_or(INVALID);
            if index == INVALID {
                tracing::debug!("print-safe decode rejected symbol {symbol:?} at {position}");
                return Err(Error::InvalidSymbol { position, symbol });
            }
            Ok(index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_is_a_bijection() {
        for (index, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(DECODE_TABLE[symbol as usize] as usize, index);
        }
        let valid = DECODE_TABLE.iter().filter(|&&v| v != INVALID).count();
        assert_eq!(valid, 64);
    }

    #[test]
    fn test_group_sizes() {
        assert_eq!(encode_for_print(b""), "");
        assert_eq!(encode_for_print(b"a").len(), 2);
        assert_eq!(encode_for_print(b"ab").len(), 3);
        assert_eq!(encode_for_print(b"abc").len(), 4);
        assert_eq!(encode_for_print(b"abcd").len(), 6);
    }

    #[test]
    fn test_known_vectors() {
        // 'a' = 0x61 = 0b01_100001 -> symbols 33 ('H'), 1 ('b').
        assert_eq!(encode_for_print(b"a"), "Hb");
        assert_eq!(encode_for_print(&[0, 0, 0]), "aaaa");
        assert_eq!(encode_for_print(&[0xff, 0xff, 0xff]), "))))");
        assert_eq!(encode_for_print(b"abc"), "Hj2y");
    }

    #[test]
    fn test_round_trip_all_bytes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        for len in [2, 3, 4, 5, 100, 256] {
            let text = encode_for_print(&bytes[..len]);
            assert_eq!(decode_for_print(&text).unwrap().as_deref(), Some(&bytes[..len]));
        }
    }

    #[test]
    fn test_short_input_is_empty() {
        assert_eq!(decode_for_print("").unwrap(), None);
        assert_eq!(decode_for_print("a").unwrap(), None);
        assert_eq!(decode_for_print("  \n").unwrap(), None);
        assert_eq!(decode_for_print(" b ").unwrap(), None);
    }

    #[test]
    fn test_single_byte_needs_two_symbols() {
        // Encoding one byte gives two symbols, so the one-symbol early return
        // never hides real data.
        assert_eq!(decode_for_print("Hb").unwrap(), Some(b"a".to_vec()));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            decode_for_print("\n  Hj2y \r\n").unwrap(),
            Some(b"abc".to_vec())
        );
    }

    #[test]
    fn test_one_symbol_tail_yields_nothing() {
        assert_eq!(decode_for_print("Hj2ya").unwrap(), Some(b"abc".to_vec()));
    }

    #[test]
    fn test_invalid_symbols() {
        assert_eq!(
            decode_for_print("ab!d").unwrap_err(),
            Error::InvalidSymbol {
                position: 2,
                symbol: '!'
            }
        );
        assert!(matches!(
            decode_for_print("abcé"),
            Err(Error::InvalidSymbol { position: 3, .. })
        ));
        // Inner whitespace is not trimmed.
        assert!(decode_for_print("ab cd").unwrap_err().is_format());
    }

    #[test]
    fn test_latin1_view() {
        let text = encode_for_print(&[0x41, 0xe9, 0xff]);
        assert_eq!(
            decode_for_print_latin1(&text).unwrap(),
            Some("A\u{e9}\u{ff}".to_string())
        );
        assert_eq!(decode_for_print_latin1("").unwrap(), None);
    }
}
