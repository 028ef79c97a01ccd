//! Sentinel-terminated line buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the line content,
//! allowing the scanner to detect end of input without explicit bounds
//! checking. The total buffer size is rounded up to the next 64-byte
//! boundary for cache-line alignment, which also provides safe padding
//! for `peek()` and `peek2()` operations near the end of the buffer.
//!
//! # NUL Bytes
//!
//! The scanner treats a NUL byte as end of input, sentinel or embedded
//! alike; a line containing NUL is scannable only up to that byte.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated copy of one logical source line.
///
/// # Layout
///
/// ```text
/// [line_bytes..., 0x00, padding_zeros...]
///  ^              ^     ^
///  0              |     rounded up to 64-byte boundary
///            source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`. All subsequent
/// bytes (cache-line padding) are also `0x00`, ensuring safe reads for
/// `peek()` and `peek2()` near the end of the buffer.
#[derive(Clone, Debug)]
pub struct LineBuffer {
    /// Owned buffer: `[line_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual line content (excludes sentinel and padding).
    source_len: u32,
}

impl LineBuffer {
    /// Create a new sentinel-terminated buffer from one source line.
    ///
    /// Copies the line bytes into a cache-line-aligned buffer with a
    /// `0x00` sentinel byte appended.
    ///
    /// # Line Size
    ///
    /// Lines larger than `u32::MAX` bytes are accepted but `source_len`
    /// saturates at `u32::MAX`; the driver rejects oversized input
    /// upstream before it reaches the scanner.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to next 64-byte boundary. The minimum is line +
        // sentinel + two bytes so `peek2()` stays in bounds even when
        // line + sentinel already fills a cache line exactly.
        let padded_len = (source_len + 3 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled buffer, then copy the line bytes.
        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let source_len = u32::try_from(source_len).unwrap_or(u32::MAX);

        Self { buf, source_len }
    }

    /// Returns the line bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the line content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the line is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// Size assertion: `LineBuffer` should be <= 32 bytes on 64-bit platforms.
/// Vec<u8> = 24, u32 = 4, + 4 padding = 32.
const _: () = assert!(std::mem::size_of::<LineBuffer>() <= 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line() {
        let buf = LineBuffer::new("");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn ascii_line() {
        let buf = LineBuffer::new("mov rax, 1");
        assert_eq!(buf.len(), 10);
        assert!(!buf.is_empty());
        assert_eq!(buf.as_bytes(), b"mov rax, 1");
    }

    #[test]
    fn buffer_aligned_to_cache_line() {
        for len in [0, 1, 10, 63, 64, 65, 127, 128, 1000] {
            let source: String = "x".repeat(len);
            let buf = LineBuffer::new(&source);
            assert_eq!(
                buf.buf.len() % CACHE_LINE,
                0,
                "buffer length {} is not cache-line aligned for line length {}",
                buf.buf.len(),
                len
            );
        }
    }

    #[test]
    fn sentinel_and_padding_are_zero() {
        let buf = LineBuffer::new("abc");
        for &b in &buf.buf[3..] {
            assert_eq!(b, 0, "non-zero byte in sentinel/padding region");
        }
    }

    #[test]
    fn cursor_starts_at_zero() {
        let buf = LineBuffer::new("db 0");
        let cursor = buf.cursor();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.current(), b'd');
    }

    #[test]
    fn cursor_on_empty_line_is_at_end() {
        let buf = LineBuffer::new("");
        let cursor = buf.cursor();
        assert!(cursor.at_end());
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn embedded_nul_ends_scannable_content() {
        let buf = LineBuffer::new("ab\0cd");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);
        assert!(cursor.at_end());
    }

    #[test]
    fn utf8_line_preserved() {
        let source = "msg: db 'héllo'";
        let buf = LineBuffer::new(source);
        assert_eq!(buf.as_bytes(), source.as_bytes());
    }
}
