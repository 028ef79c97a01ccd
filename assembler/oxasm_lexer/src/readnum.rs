//! Integer-literal conversion.
//!
//! The radix comes from an explicit prefix (`$`, `0x`, `0b`, `0o`,
//! `0d`, ...), else from a one-letter suffix (`h`, `y`, `q`, `t`, ...),
//! else the literal is decimal. `_` separators are skipped anywhere in
//! the digit run. Prefix beats suffix: `0x12` is hex 0x12, never decimal
//! `0` with a junk tail.
//!
//! Conversion never sees text the scanner did not already vet as a
//! maximal numeric run, so errors here mean a genuinely malformed
//! constant (`9xyz`, `0x`, a value past 64 bits), which the scanner
//! surfaces as an `ErrNum` token.

/// Why a numeric literal failed to convert.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ReadNumError {
    /// No digits at all (e.g. `0x` with nothing after the prefix).
    #[error("no digits in numeric constant")]
    Empty,
    /// A digit outside the selected radix.
    #[error("invalid digit `{digit}` in base-{radix} constant")]
    InvalidDigit { digit: char, radix: u32 },
    /// The value does not fit in 64 bits.
    #[error("numeric constant does not fit in 64 bits")]
    Overflow,
}

/// Convert the spelled integer literal `text` to its value.
pub fn read_num(text: &str) -> Result<u64, ReadNumError> {
    let bytes = text.as_bytes();

    // `$` lead-in forces hex.
    if let Some(rest) = bytes.strip_prefix(b"$") {
        return accumulate(rest, 16);
    }

    // `0<letter>` radix prefixes, which need at least one digit after.
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' | b'h' | b'H' => 16,
            b'b' | b'B' | b'y' | b'Y' => 2,
            b'o' | b'O' | b'q' | b'Q' => 8,
            b'd' | b'D' | b't' | b'T' => 10,
            _ => 0,
        };
        if radix != 0 {
            return accumulate(&bytes[2..], radix);
        }
    }

    // One-letter radix suffix.
    if let Some((&last, head)) = bytes.split_last() {
        let radix = match last {
            b'h' | b'H' | b'x' | b'X' => 16,
            b'o' | b'O' | b'q' | b'Q' => 8,
            b'd' | b'D' | b't' | b'T' => 10,
            b'b' | b'B' | b'y' | b'Y' => 2,
            _ => 0,
        };
        if radix != 0 {
            return accumulate(head, radix);
        }
    }

    accumulate(bytes, 10)
}

/// Accumulate `digits` in the given radix, skipping `_` separators.
fn accumulate(digits: &[u8], radix: u32) -> Result<u64, ReadNumError> {
    let mut value: u64 = 0;
    let mut seen_digit = false;

    for &b in digits {
        if b == b'_' {
            continue;
        }
        let digit = char::from(b)
            .to_digit(radix)
            .ok_or(ReadNumError::InvalidDigit {
                digit: char::from(b),
                radix,
            })?;
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(ReadNumError::Overflow)?;
        seen_digit = true;
    }

    if seen_digit {
        Ok(value)
    } else {
        Err(ReadNumError::Empty)
    }
}
