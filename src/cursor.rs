//! Forward-only reader over a WowAce document.

use crate::{Error, Result};

/// Bounded cursor over an immutable byte slice.
///
/// The offset only moves forward; no operation rescans consumed input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Return current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Return remaining unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Return whether the unread input starts with `token`.
    pub fn peek_literal(&self, token: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(token)
    }

    /// Consume `token` or fail without advancing.
    pub fn consume_literal(&mut self, token: &[u8]) -> Result<()> {
        if self.peek_literal(token) {
            self.pos += token.len();
            return Ok(());
        }

        let expected = format!("'{}'", String::from_utf8_lossy(token));
        if self.remaining() < token.len() {
            return Err(Error::unexpected_eof(self.pos, &expected));
        }
        let found = &self.bytes[self.pos..self.pos + token.len()];
        Err(Error::invalid_format(
            self.pos,
            &format!(
                "expected {expected}, found '{}'",
                String::from_utf8_lossy(found)
            ),
        ))
    }

    /// Read exactly `n` bytes and advance cursor.
    pub fn take(&mut self, n: usize, expected: &str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::unexpected_eof(self.pos, expected));
        }

        let start = self.pos;
        self.pos += n;
        Ok(&self.bytes[start..self.pos])
    }

    /// Consume the longest run containing none of the bytes in `stop`.
    ///
    /// Returns an empty slice when the next byte is a stop byte or the input is
    /// exhausted.
    pub fn consume_run_until(&mut self, stop: &[u8]) -> &'a [u8] {
        let rest = &self.bytes[self.pos..];
        let len = rest
            .iter()
            .position(|b| stop.contains(b))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume an optionally negative decimal integer.
    pub fn consume_int(&mut self) -> Result<i64> {
        let start = self.pos;
        let rest = &self.bytes[self.pos..];
        let sign = usize::from(rest.first() == Some(&b'-'));
        let digits = rest[sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

        if digits == 0 {
            return if start + sign >= self.bytes.len() {
                Err(Error::unexpected_eof(start + sign, "decimal digits"))
            } else {
                Err(Error::invalid_format(start + sign, "expected decimal digits"))
            };
        }

        let literal = &rest[..sign + digits];
        // Only ASCII digits and '-' were accepted above.
        let text = std::str::from_utf8(literal)
            .map_err(|_| Error::invalid_format(start, "integer is not ASCII"))?;
        let value = text
            .parse::<i64>()
            .map_err(|_| Error::invalid_format(start, &format!("integer {text} out of range")))?;
        self.pos += literal.len();
        Ok(value)
    }
}
