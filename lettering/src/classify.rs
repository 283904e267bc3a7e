// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding and classification of code points.

/// Result of decoding one code point from a byte cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed code point. The cursor was advanced past it.
    Char(char),
    /// A NUL byte or the end of the input. The cursor is not advanced.
    End,
    /// A malformed sequence. The cursor is left on the offending lead byte.
    Invalid,
}

/// Decodes one UTF-8 encoded code point from the front of `bytes`.
///
/// Overlong encodings, missing or truncated continuation bytes, encoded
/// surrogates and values beyond `U+10FFFF` are [`Decoded::Invalid`].
pub fn decode_char(bytes: &mut &[u8]) -> Decoded {
    let input = *bytes;
    let Some(&lead) = input.first() else {
        return Decoded::End;
    };
    if lead == 0 {
        return Decoded::End;
    }
    let (len, init, min) = match lead {
        0x00..=0x7F => {
            *bytes = &input[1..];
            return Decoded::Char(char::from(lead));
        }
        _ if lead & 0xE0 == 0xC0 => (2, u32::from(lead & 0x1F), 0x80),
        _ if lead & 0xF0 == 0xE0 => (3, u32::from(lead & 0x0F), 0x800),
        _ if lead & 0xF8 == 0xF0 => (4, u32::from(lead & 0x07), 0x10000),
        _ => return Decoded::Invalid,
    };
    let Some(tail) = input.get(1..len) else {
        return Decoded::Invalid;
    };
    let mut value = init;
    for &byte in tail {
        if byte & 0xC0 != 0x80 {
            return Decoded::Invalid;
        }
        value = (value << 6) | u32::from(byte & 0x3F);
    }
    if value < min {
        return Decoded::Invalid;
    }
    // `from_u32` rejects surrogates and anything past U+10FFFF.
    match char::from_u32(value) {
        Some(c) => {
            *bytes = &input[len..];
            Decoded::Char(c)
        }
        None => Decoded::Invalid,
    }
}

/// Whether a line may be wrapped after `c`.
pub fn is_word_break(c: char) -> bool {
    matches!(
        c,
        '\t' | ' '
            | '\u{2000}'
            | '\u{2001}'
            | '\u{2002}'
            | '\u{2003}'
            | '\u{2004}'
            | '\u{2005}'
            | '\u{2006}'
            | '\u{2008}'
            | '\u{2009}'
            | '\u{200B}'
            | '\u{200C}'
            | '\u{200D}'
    )
}

/// Whether `c` takes part in whitespace collapsing.
pub fn is_collapsible_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' ')
}

/// Whether `c` forces a line break when whitespace is preserved.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\u{2028}' | '\u{2029}')
}
