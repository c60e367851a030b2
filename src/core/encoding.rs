//! Character Decoding
//!
//! Decodes one character at a time from the front of a byte slice. The
//! encoding is detected from a byte order mark or the shape of the first two
//! bytes, and is fixed for a lexing session.
//!
//! Empty input is not an error: it decodes to a zero-width end signal
//! (`input: None`). Decode errors are reserved for malformed byte sequences.

use thiserror::Error;

/// Encodings the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// Decode failure. The engine treats every variant as a classification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid {0:?} sequence")]
    Invalid(Encoding),
    #[error("truncated {0:?} sequence")]
    Truncated(Encoding),
}

/// Multibyte shift state threaded through a single character decode.
///
/// For UTF-16 this holds a high surrogate waiting for its low half. A fresh
/// state is created for every character read; it never survives a token
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftState {
    pending_high: Option<u16>,
}

impl ShiftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a partial character is waiting to be completed
    pub fn is_pending(&self) -> bool {
        self.pending_high.is_some()
    }
}

/// One decoded character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Bytes consumed from the front of the input
    pub consumed: usize,
    /// The character, or `None` when the input was empty
    pub input: Option<char>,
}

impl Decoded {
    const END: Decoded = Decoded {
        consumed: 0,
        input: None,
    };
}

impl Encoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return Encoding::Utf8;
        }

        match (input[0], input[1]) {
            (0xFF, 0xFE) => Encoding::Utf16Le,
            (0xFE, 0xFF) => Encoding::Utf16Be,
            // No BOM: '<' paired with a NUL byte
            (0x00, b'<') => Encoding::Utf16Be,
            (b'<', 0x00) => Encoding::Utf16Le,
            _ => Encoding::Utf8,
        }
    }

    /// Size in bytes of one code unit
    #[inline]
    pub const fn unit_width(self) -> usize {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16Le | Encoding::Utf16Be => 2,
        }
    }

    /// Encode an ASCII literal into `buf`, returning the encoded bytes.
    ///
    /// Non-ASCII bytes in `literal` and anything that would overflow `buf` are
    /// dropped; callers only pass short ASCII markup keywords.
    pub fn encode_ascii<'b>(self, literal: &str, buf: &'b mut [u8; 32]) -> &'b [u8] {
        let mut len = 0;
        for &b in literal.as_bytes().iter().filter(|b| b.is_ascii()) {
            let unit = match self {
                Encoding::Utf8 => [b, 0],
                Encoding::Utf16Le => [b, 0],
                Encoding::Utf16Be => [0, b],
            };
            let width = self.unit_width();
            if len + width > buf.len() {
                break;
            }
            buf[len..len + width].copy_from_slice(&unit[..width]);
            len += width;
        }
        &buf[..len]
    }

    /// Decode one character from the front of `input`.
    ///
    /// Never consumes more than `input.len()` bytes.
    pub fn decode(self, input: &[u8], state: &mut ShiftState) -> Result<Decoded, DecodeError> {
        if input.is_empty() {
            return if state.is_pending() {
                Err(DecodeError::Truncated(self))
            } else {
                Ok(Decoded::END)
            };
        }

        match self {
            Encoding::Utf8 => decode_utf8(input),
            Encoding::Utf16Le => decode_utf16(input, state, self, u16::from_le_bytes),
            Encoding::Utf16Be => decode_utf16(input, state, self, u16::from_be_bytes),
        }
    }
}

/// Width of a UTF-8 sequence from its lead byte, 0 if the byte cannot lead
#[inline]
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn decode_utf8(input: &[u8]) -> Result<Decoded, DecodeError> {
    let width = utf8_width(input[0]);
    if width == 0 {
        return Err(DecodeError::Invalid(Encoding::Utf8));
    }
    let Some(bytes) = input.get(..width) else {
        // Distinguish a cut-off sequence from garbage continuation bytes
        let valid_prefix = input[1..].iter().all(|b| b & 0xC0 == 0x80);
        return Err(if valid_prefix {
            DecodeError::Truncated(Encoding::Utf8)
        } else {
            DecodeError::Invalid(Encoding::Utf8)
        });
    };

    let ch = std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or(DecodeError::Invalid(Encoding::Utf8))?;

    Ok(Decoded {
        consumed: width,
        input: Some(ch),
    })
}

fn decode_utf16(
    input: &[u8],
    state: &mut ShiftState,
    encoding: Encoding,
    to_unit: fn([u8; 2]) -> u16,
) -> Result<Decoded, DecodeError> {
    let mut consumed = 0;
    loop {
        let Some(pair) = input.get(consumed..consumed + 2) else {
            return Err(DecodeError::Truncated(encoding));
        };
        let unit = to_unit([pair[0], pair[1]]);
        consumed += 2;

        match (state.pending_high.take(), unit) {
            (None, 0xD800..=0xDBFF) => state.pending_high = Some(unit),
            (None, 0xDC00..=0xDFFF) => return Err(DecodeError::Invalid(encoding)),
            (None, _) => {
                let ch = char::from_u32(u32::from(unit)).ok_or(DecodeError::Invalid(encoding))?;
                return Ok(Decoded {
                    consumed,
                    input: Some(ch),
                });
            }
            (Some(high), 0xDC00..=0xDFFF) => {
                let code =
                    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                let ch = char::from_u32(code).ok_or(DecodeError::Invalid(encoding))?;
                return Ok(Decoded {
                    consumed,
                    input: Some(ch),
                });
            }
            (Some(_), _) => return Err(DecodeError::Invalid(encoding)),
        }
    }
}
