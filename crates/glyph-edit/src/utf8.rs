//! UTF-8 codec helpers.
//!
//! The buffer stores decoded [`Char`]s, so column arithmetic never looks at bytes. These
//! functions are the only place where bytes and characters meet.
//!
//! Decoding is lenient: a malformed sequence becomes U+FFFD and the decoder always moves forward
//! by at least one byte, so callers can loop without risk of stalling. An embedded NUL ends a
//! batch conversion.
//!
//! # Example
//!
//! ```rust
//! use glyph_edit::utf8;
//!
//! let chars = utf8::decode("h\u{e9}llo".as_bytes());
//! assert_eq!(chars.len(), 5);
//! assert_eq!(chars[1].encoded_len(), 2);
//! assert_eq!(utf8::encode(&chars), "h\u{e9}llo");
//!
//! // Invalid lead byte: replaced, one byte consumed.
//! assert_eq!(utf8::decode_one(&[0xFF, b'a']), ('\u{FFFD}', 1));
//! ```

use crate::error::MalformedEncoding;
use crate::glyph::Char;

/// Replacement character substituted for malformed input.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Decode one character from the front of `bytes`.
///
/// Returns the character and the number of bytes it occupied. Empty input yields
/// `Err(MalformedEncoding { consumed: 0 })`.
///
/// Validation follows RFC 3629: overlong forms, surrogates and values above U+10FFFF are
/// rejected. On a bad continuation byte, `consumed` covers only the valid prefix so the
/// offending byte is examined again as a potential lead byte.
pub fn try_decode_one(bytes: &[u8]) -> Result<(char, usize), MalformedEncoding> {
    let Some(&lead) = bytes.first() else {
        return Err(MalformedEncoding { consumed: 0 });
    };

    if lead < 0x80 {
        return Ok((char::from(lead), 1));
    }

    let (len, second_lo, second_hi, initial) = match lead {
        0xC2..=0xDF => (2, 0x80, 0xBF, u32::from(lead & 0x1F)),
        0xE0 => (3, 0xA0, 0xBF, u32::from(lead & 0x0F)),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80, 0xBF, u32::from(lead & 0x0F)),
        0xED => (3, 0x80, 0x9F, u32::from(lead & 0x0F)),
        0xF0 => (4, 0x90, 0xBF, u32::from(lead & 0x07)),
        0xF1..=0xF3 => (4, 0x80, 0xBF, u32::from(lead & 0x07)),
        0xF4 => (4, 0x80, 0x8F, u32::from(lead & 0x07)),
        _ => return Err(MalformedEncoding { consumed: 1 }),
    };

    let mut code = initial;
    for i in 1..len {
        let Some(&byte) = bytes.get(i) else {
            // Truncated sequence.
            return Err(MalformedEncoding { consumed: i });
        };
        let (lo, hi) = if i == 1 {
            (second_lo, second_hi)
        } else {
            (0x80, 0xBF)
        };
        if !(lo..=hi).contains(&byte) {
            return Err(MalformedEncoding { consumed: i });
        }
        code = (code << 6) | u32::from(byte & 0x3F);
    }

    char::from_u32(code)
        .map(|ch| (ch, len))
        .ok_or(MalformedEncoding { consumed: len })
}

/// Decode one character, substituting [`REPLACEMENT`] for malformed input.
///
/// For non-empty input the returned length is always in `1..=4`.
pub fn decode_one(bytes: &[u8]) -> (char, usize) {
    match try_decode_one(bytes) {
        Ok(decoded) => decoded,
        Err(MalformedEncoding { consumed }) => {
            tracing::trace!(consumed, "replacing malformed UTF-8 sequence");
            (REPLACEMENT, consumed)
        }
    }
}

/// A character encoded into at most four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedChar {
    bytes: [u8; 4],
    len: usize,
}

impl EncodedChar {
    /// The encoded bytes (empty when the code point could not be encoded).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of encoded bytes; `0` for surrogates and out-of-range values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing was encoded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Encode one code point. Surrogates and values above U+10FFFF produce a zero-length result.
pub fn encode_one(code_point: u32) -> EncodedChar {
    let mut bytes = [0u8; 4];
    let len = match char::from_u32(code_point) {
        Some(ch) => ch.encode_utf8(&mut bytes).len(),
        None => 0,
    };
    EncodedChar { bytes, len }
}

/// Decode a byte string into characters, stopping at the first NUL.
pub fn decode(bytes: &[u8]) -> Vec<Char> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        let (ch, len) = decode_one(rest);
        if ch == '\0' {
            break;
        }
        out.push(Char::decoded(ch, len));
        rest = &rest[len.max(1)..];
    }
    out
}

/// Encode characters into a `String`, stopping at the first NUL.
pub fn encode(chars: &[Char]) -> String {
    let mut out = String::with_capacity(chars.len());
    for ch in chars {
        if ch.value() == '\0' {
            break;
        }
        out.push(ch.value());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_ascii_and_multibyte() {
        assert_eq!(decode_one(b"a"), ('a', 1));
        assert_eq!(decode_one("\u{e9}".as_bytes()), ('\u{e9}', 2));
        assert_eq!(decode_one("\u{4e2d}".as_bytes()), ('\u{4e2d}', 3));
        assert_eq!(decode_one("\u{1f600}".as_bytes()), ('\u{1f600}', 4));
    }

    #[test]
    fn test_rejects_overlong_and_surrogates() {
        // Overlong '/'.
        assert_eq!(try_decode_one(&[0xC0, 0xAF]), Err(MalformedEncoding { consumed: 1 }));
        // Overlong three-byte form.
        assert_eq!(
            try_decode_one(&[0xE0, 0x80, 0x80]),
            Err(MalformedEncoding { consumed: 1 })
        );
        // U+D800 encoded directly.
        assert_eq!(
            try_decode_one(&[0xED, 0xA0, 0x80]),
            Err(MalformedEncoding { consumed: 1 })
        );
        // Above U+10FFFF.
        assert_eq!(
            try_decode_one(&[0xF4, 0x90, 0x80, 0x80]),
            Err(MalformedEncoding { consumed: 1 })
        );
        assert_eq!(try_decode_one(&[0xF5]), Err(MalformedEncoding { consumed: 1 }));
    }

    #[test]
    fn test_truncated_sequence_keeps_valid_prefix() {
        assert_eq!(
            try_decode_one(&[0xE4, 0xB8]),
            Err(MalformedEncoding { consumed: 2 })
        );
        assert_eq!(decode_one(&[0xE4, 0xB8]), (REPLACEMENT, 2));
    }

    #[test]
    fn test_bad_continuation_is_reexamined() {
        let chars = decode(&[0xE4, b'a', b'b']);
        let values: Vec<char> = chars.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![REPLACEMENT, 'a', 'b']);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(try_decode_one(&[]), Err(MalformedEncoding { consumed: 0 }));
        assert!(decode(&[]).is_empty());
    }

    #[test]
    fn test_encode_one_refuses_surrogates() {
        assert!(encode_one(0xD800).is_empty());
        assert!(encode_one(0x11_0000).is_empty());
        assert_eq!(encode_one(0x4e2d).as_bytes(), "\u{4e2d}".as_bytes());
    }

    #[test]
    fn test_nul_terminates_batch_conversion() {
        let chars = decode(b"ab\0cd");
        assert_eq!(encode(&chars), "ab");

        let with_nul = [Char::from('x'), Char::from('\0'), Char::from('y')];
        assert_eq!(encode(&with_nul), "x");
    }
}
