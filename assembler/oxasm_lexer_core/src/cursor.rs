//! Zero-cost cursor over a sentinel-terminated line buffer.
//!
//! The cursor advances through the buffer byte-by-byte. End of input is
//! detected when the current byte is the NUL sentinel (`0x00`); no
//! explicit bounds checking is performed in the common case. A NUL byte
//! embedded in the line ends the scannable content just like the
//! sentinel does -- the scanner's contract is "scan stops at NUL".

use crate::ctype;

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`LineBuffer::cursor()`](crate::LineBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for the
/// scanner's save/restore operations.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`LineBuffer`](crate::LineBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (line + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual line content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `LineBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` at end of input (the sentinel byte) and at an
    /// embedded NUL; both end the scannable content.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and cache-line padding
    /// guarantee valid reads beyond the line content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the byte two positions ahead of current.
    ///
    /// Safe to call at any position within the line content: the buffer
    /// always carries at least two zero bytes past the sentinel.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Move the cursor back by one byte.
    ///
    /// The number scanner consumes one byte past the end of a literal
    /// before it can tell the literal ended; this undoes that overshoot.
    #[inline]
    pub fn step_back(&mut self) {
        debug_assert!(self.pos > 0, "cannot step back past the buffer start");
        self.pos -= 1;
    }

    /// Returns `true` when the current byte is NUL -- the sentinel at end
    /// of line, or an embedded NUL, both of which end the scannable input.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.current() == 0
    }

    /// Current byte offset in the line.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Extract a line substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the line content (`end <= source_len`)
    /// and on valid UTF-8 character boundaries. This is guaranteed when
    /// `start` and `end` come from the scanner's token boundary tracking:
    /// every boundary the scanner produces for text-carrying tokens sits
    /// on an ASCII byte, and the line was originally valid UTF-8 (`&str`).
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on a line originally validated as &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds line length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        // SAFETY: The buffer was constructed from `&str` (valid UTF-8).
        // The scanner ensures start..end falls on character boundaries
        // within the line content.
        unsafe { std::str::from_utf8_unchecked(&self.buf[start as usize..end as usize]) }
    }

    /// Extract a line substring from `start` to the current position.
    ///
    /// Equivalent to `self.slice(start, self.pos())`.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Remaining line bytes from the current position to end of content.
    ///
    /// Used by the string scanner, which hands the raw tail to the
    /// unquoting routine and advances by the amount it reports.
    pub fn rest(&self) -> &'a [u8] {
        debug_assert!(self.pos <= self.source_len);
        &self.buf[self.pos as usize..self.source_len as usize]
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel terminates the loop.
    /// This holds for every [`ctype`] predicate.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Advance past whitespace (the [`ctype::is_space`] set).
    ///
    /// A simple byte loop: runs between assembly tokens are short (one or
    /// two bytes), so anything cleverer costs more than it saves. The
    /// sentinel is not whitespace, so the loop stops at end of input.
    #[inline]
    pub fn skip_spaces(&mut self) {
        self.eat_while(ctype::is_space);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use crate::LineBuffer;
    use pretty_assertions::assert_eq;

    // === Basic Navigation ===

    #[test]
    fn current_returns_first_byte() {
        let buf = LineBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.current(), b'a');
    }

    #[test]
    fn advance_moves_forward() {
        let buf = LineBuffer::new("abc");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn advance_n_moves_multiple() {
        let buf = LineBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.current(), b'd');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn step_back_undoes_advance() {
        let buf = LineBuffer::new("abc");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);
        cursor.step_back();
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn advance_through_entire_line() {
        let buf = LineBuffer::new("hi");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.current(), b'h');
        cursor.advance();
        assert_eq!(cursor.current(), b'i');
        cursor.advance();
        assert!(cursor.at_end());
    }

    // === Peek ===

    #[test]
    fn peek_returns_next_byte() {
        let buf = LineBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), b'b');
        assert_eq!(cursor.peek2(), b'c');
    }

    #[test]
    fn peek_near_end_returns_sentinel() {
        let buf = LineBuffer::new("ab");
        let mut cursor = buf.cursor();
        cursor.advance(); // at 'b'
        assert_eq!(cursor.peek(), 0);
        assert_eq!(cursor.peek2(), 0);
    }

    // === End Detection ===

    #[test]
    fn at_end_at_sentinel() {
        let buf = LineBuffer::new("x");
        let mut cursor = buf.cursor();
        assert!(!cursor.at_end());
        cursor.advance();
        assert!(cursor.at_end());
    }

    #[test]
    fn at_end_on_empty_line() {
        let buf = LineBuffer::new("");
        let cursor = buf.cursor();
        assert!(cursor.at_end());
    }

    // === Slice ===

    #[test]
    fn slice_extracts_substring() {
        let buf = LineBuffer::new("hello world");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(0, 5), "hello");
        assert_eq!(cursor.slice(6, 11), "world");
    }

    #[test]
    fn slice_from_extracts_to_current() {
        let buf = LineBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.slice_from(0), "abc");
        assert_eq!(cursor.slice_from(1), "bc");
    }

    #[test]
    fn slice_empty_range() {
        let buf = LineBuffer::new("hello");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(2, 2), "");
    }

    // === rest ===

    #[test]
    fn rest_returns_remaining_content() {
        let buf = LineBuffer::new("db 'x'");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.rest(), b"'x'");
    }

    #[test]
    fn rest_at_end_is_empty() {
        let buf = LineBuffer::new("ab");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);
        assert!(cursor.rest().is_empty());
    }

    // === eat_while ===

    #[test]
    fn eat_while_consumes_matching_bytes() {
        let buf = LineBuffer::new("aaabbb");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn eat_while_stops_at_sentinel() {
        let buf = LineBuffer::new("aaa");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.at_end());
    }

    #[test]
    fn eat_while_no_match() {
        let buf = LineBuffer::new("hello");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'z');
        assert_eq!(cursor.pos(), 0);
    }

    // === skip_spaces ===

    #[test]
    fn skip_spaces_mixed() {
        let buf = LineBuffer::new("  \t \t  x");
        let mut cursor = buf.cursor();
        cursor.skip_spaces();
        assert_eq!(cursor.pos(), 7);
        assert_eq!(cursor.current(), b'x');
    }

    #[test]
    fn skip_spaces_no_whitespace() {
        let buf = LineBuffer::new("hello");
        let mut cursor = buf.cursor();
        cursor.skip_spaces();
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn skip_spaces_all_whitespace() {
        let buf = LineBuffer::new("   \t\t   ");
        let mut cursor = buf.cursor();
        cursor.skip_spaces();
        assert_eq!(cursor.pos(), 8);
        assert!(cursor.at_end());
    }

    #[test]
    fn skip_spaces_includes_newline_and_cr() {
        let buf = LineBuffer::new(" \r\n x");
        let mut cursor = buf.cursor();
        cursor.skip_spaces();
        assert_eq!(cursor.current(), b'x');
    }

    // === Copy Semantics ===

    #[test]
    fn cursor_is_copy_for_checkpointing() {
        let buf = LineBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);

        // Snapshot via Copy
        let saved = cursor;

        // Advance original
        cursor.advance_n(3);
        assert_eq!(cursor.pos(), 5);

        // Saved is still at old position
        assert_eq!(saved.pos(), 2);
        assert_eq!(saved.current(), b'c');
    }

    // === Property tests ===

    mod proptest_skip_spaces {
        use crate::{ctype, LineBuffer};
        use proptest::prelude::*;

        /// Reference implementation: scalar count of leading whitespace.
        fn scalar_count(source: &str) -> usize {
            source
                .bytes()
                .take_while(|&b| b != 0 && ctype::is_space(b))
                .count()
        }

        proptest! {
            #[test]
            fn skip_spaces_matches_scalar_reference(
                source in "[ \tA-Za-z0-9\r\n]{0,64}"
            ) {
                let buf = LineBuffer::new(&source);
                let mut cursor = buf.cursor();
                cursor.skip_spaces();
                prop_assert_eq!(cursor.pos() as usize, scalar_count(&source));
            }
        }
    }
}
