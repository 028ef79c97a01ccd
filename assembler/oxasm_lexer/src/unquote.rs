//! Quoted-string content extraction.
//!
//! `'...'` and `"..."` carry their content verbatim; backquoted strings
//! process C-style escapes. The scanner hands in the buffer starting at
//! the opening quote and gets back the logical content plus the offset
//! of the byte that must be the matching close quote -- checking that
//! byte (and consuming it) stays the scanner's job, so an unterminated
//! or mismatched string is its call to make.
//!
//! String content is bytes, not text: escapes like `\xff` produce
//! arbitrary octets, which is exactly what `db` directives want.

use std::borrow::Cow;

/// Result of scanning one quoted string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unquoted<'src> {
    /// Unescaped content bytes. Borrowed whenever no escape rewrote
    /// anything; owned otherwise.
    pub content: Cow<'src, [u8]>,
    /// Offset (from the opening quote) of the byte expected to be the
    /// matching close quote. Equals the input length when the string ran
    /// off the end of the line.
    pub end: u32,
}

/// Scan one quoted string. `raw` must start at the opening quote
/// (`'`, `"`, or a backquote).
#[allow(
    clippy::cast_possible_truncation,
    reason = "line buffers are bounded by u32, so offsets fit"
)]
pub fn unquote(raw: &[u8]) -> Unquoted<'_> {
    debug_assert!(!raw.is_empty(), "unquote needs at least the opening quote");
    let quote = raw[0];
    let body = &raw[1..];

    if quote == b'`' {
        return unquote_backquoted(body);
    }

    // Verbatim content: runs to the next matching quote or end of line.
    let len = memchr::memchr(quote, body).unwrap_or(body.len());
    Unquoted {
        content: Cow::Borrowed(&body[..len]),
        end: (len + 1) as u32,
    }
}

/// Backquoted string: verbatim until the first escape, then unescape
/// into an owned buffer.
#[allow(
    clippy::cast_possible_truncation,
    reason = "line buffers are bounded by u32, so offsets fit"
)]
fn unquote_backquoted(body: &[u8]) -> Unquoted<'_> {
    match memchr::memchr2(b'`', b'\\', body) {
        None => Unquoted {
            content: Cow::Borrowed(body),
            end: (body.len() + 1) as u32,
        },
        Some(i) if body[i] == b'`' => Unquoted {
            content: Cow::Borrowed(&body[..i]),
            end: (i + 1) as u32,
        },
        Some(first_escape) => {
            let mut out = body[..first_escape].to_vec();
            let mut i = first_escape;
            loop {
                match body.get(i) {
                    None | Some(&b'`') => break,
                    Some(&b'\\') => i = decode_escape(body, i + 1, &mut out),
                    Some(&b) => {
                        out.push(b);
                        i += 1;
                    }
                }
            }
            Unquoted {
                content: Cow::Owned(out),
                end: (i + 1) as u32,
            }
        }
    }
}

/// Decode one escape sequence. `i` indexes the byte after the backslash;
/// returns the index of the first byte past the sequence.
fn decode_escape(body: &[u8], i: usize, out: &mut Vec<u8>) -> usize {
    let Some(&b) = body.get(i) else {
        // Backslash at end of line: keep it literal.
        out.push(b'\\');
        return i;
    };
    match b {
        b'\'' | b'"' | b'`' | b'\\' | b'?' => {
            out.push(b);
            i + 1
        }
        b'a' => {
            out.push(0x07);
            i + 1
        }
        b'b' => {
            out.push(0x08);
            i + 1
        }
        b'e' => {
            out.push(0x1B);
            i + 1
        }
        b'f' => {
            out.push(0x0C);
            i + 1
        }
        b'n' => {
            out.push(b'\n');
            i + 1
        }
        b'r' => {
            out.push(b'\r');
            i + 1
        }
        b't' => {
            out.push(b'\t');
            i + 1
        }
        b'v' => {
            out.push(0x0B);
            i + 1
        }
        b'0'..=b'7' => decode_octal(body, i, out),
        b'x' | b'X' => decode_hex(body, i + 1, out),
        b'u' => decode_unicode(body, i + 1, 4, out),
        b'U' => decode_unicode(body, i + 1, 8, out),
        // Unknown escape: the escaped byte stands for itself.
        _ => {
            out.push(b);
            i + 1
        }
    }
}

/// Up to three octal digits, value truncated to one byte.
#[allow(
    clippy::cast_possible_truncation,
    reason = "value is masked to one byte"
)]
fn decode_octal(body: &[u8], mut i: usize, out: &mut Vec<u8>) -> usize {
    let mut value: u32 = 0;
    let mut digits = 0;
    while digits < 3 {
        let Some(&b) = body.get(i) else { break };
        if !b.is_ascii_digit() || b > b'7' {
            break;
        }
        value = value * 8 + u32::from(b - b'0');
        i += 1;
        digits += 1;
    }
    out.push((value & 0xFF) as u8);
    i
}

/// Up to two hex digits after `\x`; a bare `\x` keeps the `x` literal.
#[allow(
    clippy::cast_possible_truncation,
    reason = "value is masked to one byte"
)]
fn decode_hex(body: &[u8], mut i: usize, out: &mut Vec<u8>) -> usize {
    let mut value: u32 = 0;
    let mut digits = 0;
    while digits < 2 {
        match body.get(i).and_then(|&b| char::from(b).to_digit(16)) {
            Some(d) => {
                value = value * 16 + d;
                i += 1;
                digits += 1;
            }
            None => break,
        }
    }
    if digits == 0 {
        out.push(b'x');
    } else {
        out.push((value & 0xFF) as u8);
    }
    i
}

/// Exactly `want` hex digits encoding a Unicode scalar, emitted as
/// UTF-8. A short digit run or an invalid scalar keeps the escape
/// letter literal and consumes no digits.
fn decode_unicode(body: &[u8], i: usize, want: usize, out: &mut Vec<u8>) -> usize {
    let mut value: u32 = 0;
    for offset in 0..want {
        match body.get(i + offset).and_then(|&b| char::from(b).to_digit(16)) {
            Some(d) => value = value * 16 + d,
            None => {
                out.push(if want == 4 { b'u' } else { b'U' });
                return i;
            }
        }
    }
    match char::from_u32(value) {
        Some(c) => {
            let mut utf8 = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            i + want
        }
        None => {
            out.push(if want == 4 { b'u' } else { b'U' });
            i
        }
    }
}
