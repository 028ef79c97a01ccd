//! The pull scanner: one token per call, with pushback and snapshots.
//!
//! A [`Scanner`] is a session over one [`LineBuffer`]. The parser drives
//! it through [`next_token`](Scanner::next_token); a token the parser
//! peeked but does not want goes back via
//! [`push_back`](Scanner::push_back) and is replayed verbatim on the
//! next call, before any scanning happens. [`snapshot`](Scanner::snapshot)
//! and [`restore`](Scanner::restore) support speculative parsing with
//! rollback.
//!
//! Classification order per call:
//!
//! 1. drain the pushback stack (replay has absolute priority)
//! 2. skip whitespace, record the token start
//! 3. end of input -> zero-length `Eos`
//! 4. dispatch on the first one-to-three bytes: identifier, `$`/`$$`,
//!    number, quoted string, `{...}` decorator, `;` comment,
//!    multi-character operator, or a raw [`Punct`](TokenKind::Punct) byte
//!
//! Malformed input degrades to an error-kind token (`ErrNum`, `ErrStr`,
//! `Invalid`) plus a report through the diagnostic sink; scanning always
//! continues at the next token.

use std::borrow::Cow;

use oxasm_diagnostic::{DiagnosticSink, WarnKind};
use oxasm_lexer_core::{ctype, Cursor, LineBuffer, Span};
use smallvec::SmallVec;

use crate::keywords::{self, Keyword};
use crate::readnum::read_num;
use crate::token::{Token, TokenKind};
use crate::unquote::unquote;
use crate::TokenFlags;

/// Identifier spellings longer than this are truncated in the stored
/// text. Scanning still consumes the full run; only the text is cut.
pub const IDLEN_MAX: u32 = 4096;

/// Scan-state discriminant. Only `Normal` exists today; the enum is kept
/// so a future state (say, inside a multi-line construct) slots into the
/// snapshot format without changing it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ScanMode {
    #[default]
    Normal,
}

/// Pushback stack. Depth is almost always 0 or 1 (one-token lookahead),
/// so the first entries live inline.
type Pushback<'src> = SmallVec<[Token<'src>; 2]>;

/// Restorable scanner position: cursor, pending pushback, scan mode.
///
/// A snapshot is an independent copy; mutating the live scanner never
/// changes a previously captured snapshot, and restoring one never
/// aliases live state.
#[derive(Clone, Debug)]
pub struct ScanState<'src> {
    cursor: Cursor<'src>,
    pushback: Pushback<'src>,
    mode: ScanMode,
}

/// Scanner session over one line buffer.
///
/// Sessions are plain values: tests and speculative parsers can run any
/// number of them side by side, nothing is shared.
pub struct Scanner<'src, S> {
    cursor: Cursor<'src>,
    pushback: Pushback<'src>,
    mode: ScanMode,
    sink: S,
}

impl<'src, S: DiagnosticSink> Scanner<'src, S> {
    /// Start a session at the beginning of `line`.
    pub fn new(line: &'src LineBuffer, sink: S) -> Self {
        Scanner {
            cursor: line.cursor(),
            pushback: SmallVec::new(),
            mode: ScanMode::Normal,
            sink,
        }
    }

    /// Rebind the session to a new line: drains the pushback stack and
    /// rewinds to the start of `line`. The sink is kept.
    pub fn reset(&mut self, line: &'src LineBuffer) {
        self.pushback.clear();
        self.cursor = line.cursor();
        self.mode = ScanMode::Normal;
    }

    /// Current raw byte offset, for diagnostics or resumption.
    pub fn position(&self) -> u32 {
        self.cursor.pos()
    }

    /// Capture the current scan position as an independent copy.
    pub fn snapshot(&self) -> ScanState<'src> {
        ScanState {
            cursor: self.cursor,
            pushback: self.pushback.clone(),
            mode: self.mode,
        }
    }

    /// Restore a previously captured scan position.
    ///
    /// The snapshot must come from a session over the same line buffer.
    pub fn restore(&mut self, state: ScanState<'src>) {
        self.cursor = state.cursor;
        self.pushback = state.pushback;
        self.mode = state.mode;
    }

    /// Return `token` to the front of the stream. The next
    /// [`next_token`](Scanner::next_token) call yields it unchanged.
    pub fn push_back(&mut self, token: Token<'src>) {
        self.pushback.push(token);
    }

    /// Shared access to the diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the session, handing back the sink (and whatever it
    /// collected).
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Produce the next token.
    ///
    /// Always returns; malformed input yields an error-kind token and a
    /// diagnostic, never a halt. After end of input every further call
    /// returns `Eos` again.
    pub fn next_token(&mut self) -> Token<'src> {
        // Lookahead replay has absolute priority over scanning.
        if let Some(token) = self.pushback.pop() {
            return token;
        }

        self.cursor.skip_spaces();
        let start = self.cursor.pos();

        if self.cursor.at_end() {
            return Token::new(TokenKind::Eos, TokenFlags::empty(), Span::point(start));
        }

        let (kind, flags) = self.classify(start);
        Token::new(kind, flags, Span::new(start, self.cursor.pos()))
    }

    /// Dispatch on the leading byte(s). The cascade order matters:
    /// `$name` is a symbol reference, `$$`/`$` are location tokens, and
    /// only then does `$` act as a hex lead-in.
    fn classify(&mut self, start: u32) -> (TokenKind<'src>, TokenFlags) {
        let b = self.cursor.current();
        let next = self.cursor.peek();

        if ctype::is_id_start(b) || (b == b'$' && ctype::is_id_start(next)) {
            self.identifier(start)
        } else if b == b'$' && !ctype::is_num_char(next) {
            self.here_or_base()
        } else if ctype::is_num_start(b) {
            self.number(start)
        } else if matches!(b, b'\'' | b'"' | b'`') {
            self.string(start)
        } else if b == b'{' {
            self.braces(start)
        } else if b == b';' {
            // Comment to end of line; the cursor stays at the `;`.
            (TokenKind::Eos, TokenFlags::empty())
        } else {
            (self.operator(b), TokenFlags::empty())
        }
    }

    // ─── Identifiers ────────────────────────────────────────────────────

    fn identifier(&mut self, start: u32) -> (TokenKind<'src>, TokenFlags) {
        let is_sym = self.cursor.current() == b'$';
        if is_sym {
            // Explicit symbol reference: the `$` is consumed but not
            // part of the stored text.
            self.cursor.advance();
        }

        let name_start = self.cursor.pos();
        self.cursor.advance(); // first identifier byte, already validated
        self.cursor.eat_while(ctype::is_id_char);

        let len = self.cursor.pos() - name_start;
        let stored = len.min(IDLEN_MAX - 1);
        let text: Cow<'src, str> = Cow::Borrowed(self.cursor.slice(name_start, name_start + stored));

        if is_sym {
            // Symbol references bypass keyword lookup entirely.
            return (TokenKind::Id(text), TokenFlags::empty());
        }

        match keywords::lookup(&text) {
            None => (TokenKind::Id(text), TokenFlags::empty()),
            Some((keyword, flags)) => {
                if flags.contains(TokenFlags::WARN) {
                    self.sink.warn(
                        WarnKind::ForeignKeyword,
                        format!("`{text}' is not an oxasm keyword"),
                        Some(Span::new(start, self.cursor.pos())),
                    );
                }
                if flags.contains(TokenFlags::BRC) {
                    // Brace-only keyword outside braces scans as a plain
                    // identifier; the flags still ride on the token.
                    (TokenKind::Id(text), flags)
                } else {
                    (keyword.into_kind(text), flags)
                }
            }
        }
    }

    // ─── `$` and `$$` ───────────────────────────────────────────────────

    fn here_or_base(&mut self) -> (TokenKind<'src>, TokenFlags) {
        self.cursor.advance(); // `$`
        if self.cursor.current() == b'$' {
            self.cursor.advance();
            (TokenKind::Base, TokenFlags::empty())
        } else {
            (TokenKind::Here, TokenFlags::empty())
        }
    }

    // ─── Numeric Literals ───────────────────────────────────────────────

    /// Consume a maximal numeric run and classify it.
    ///
    /// The run is tracked incrementally: radix letters flip hex mode,
    /// `p`/`P` and a decimal point force float, and an exponent letter
    /// outside hex mode is resolved after the run ends (`1e13` is a
    /// float, `1e13h` is a hex integer whose `e` is just a digit).
    fn number(&mut self, start: u32) -> (TokenKind<'src>, TokenFlags) {
        let mut is_hex = false;
        let mut is_float = false;
        let mut has_e = false;

        if self.cursor.current() == b'$' {
            self.cursor.advance(); // hex lead-in
            is_hex = true;
        }

        loop {
            let c = self.cursor.current();
            self.cursor.advance();

            if !is_hex && matches!(c, b'e' | b'E') {
                has_e = true;
                if matches!(self.cursor.current(), b'+' | b'-') {
                    // A sign after `e` is unambiguous only for floats.
                    is_float = true;
                    self.cursor.advance();
                }
            } else if matches!(c, b'h' | b'H' | b'x' | b'X') {
                is_hex = true;
            } else if matches!(c, b'p' | b'P') {
                // Binary-exponent marker for hex floats.
                is_float = true;
                if matches!(self.cursor.current(), b'+' | b'-') {
                    self.cursor.advance();
                }
            } else if ctype::is_num_char(c) {
                // plain digit, keep going
            } else if c == b'.' {
                is_float = true;
            } else {
                break;
            }
        }
        self.cursor.step_back(); // first byte beyond the number

        if has_e && !is_hex {
            is_float = true;
        }

        let text = self.cursor.slice_from(start);
        if is_float {
            return (TokenKind::Float(Cow::Borrowed(text)), TokenFlags::empty());
        }

        match read_num(text) {
            Ok(value) => (TokenKind::Num(value), TokenFlags::empty()),
            Err(err) => {
                self.sink.error(
                    format!("invalid numeric constant `{text}': {err}"),
                    Some(Span::new(start, self.cursor.pos())),
                );
                (TokenKind::ErrNum, TokenFlags::empty())
            }
        }
    }

    // ─── Quoted Strings ─────────────────────────────────────────────────

    fn string(&mut self, start: u32) -> (TokenKind<'src>, TokenFlags) {
        let quote = self.cursor.current();
        let unquoted = unquote(self.cursor.rest());

        // Land on the byte that must close the string.
        self.cursor.advance_n(unquoted.end);
        if self.cursor.current() != quote {
            // Unterminated or mismatched; nothing further is consumed.
            self.sink.error(
                "unterminated string",
                Some(Span::new(start, self.cursor.pos())),
            );
            return (TokenKind::ErrStr, TokenFlags::empty());
        }
        self.cursor.advance(); // closing quote

        (TokenKind::Str(unquoted.content), TokenFlags::empty())
    }

    // ─── Brace Decorators ───────────────────────────────────────────────

    /// Parse a `{...}` decorator and validate it against the keyword
    /// table's brace flags.
    fn braces(&mut self, start: u32) -> (TokenKind<'src>, TokenFlags) {
        self.cursor.advance(); // `{`
        self.cursor.skip_spaces();

        let name_start = self.cursor.pos();
        self.cursor.eat_while(ctype::is_brc_char);
        let name_end = self.cursor.pos();

        self.cursor.skip_spaces();
        if self.cursor.current() != b'}' {
            self.sink.error(
                "unterminated braces at end of line",
                Some(Span::new(start, self.cursor.pos())),
            );
            return (TokenKind::Invalid, TokenFlags::empty());
        }
        self.cursor.advance(); // `}`

        let name = self.cursor.slice(name_start, name_end);
        if name.len() > keywords::MAX_KEYWORD {
            self.sink.error(
                format!("`{{{name}}}' is not a valid token"),
                Some(Span::new(start, self.cursor.pos())),
            );
            return (TokenKind::Invalid, TokenFlags::empty());
        }

        match keywords::lookup(name) {
            Some((keyword, flags)) if flags.intersects(TokenFlags::BRC_ANY) => {
                if flags.contains(TokenFlags::BRC_OPT) {
                    if let Keyword::Reg(reg) = keyword {
                        if reg.is_opmask() {
                            // Within braces, an opmask register is a mask.
                            return (TokenKind::OpMask(reg), flags);
                        }
                    }
                }
                (keyword.into_kind(Cow::Borrowed(name)), flags)
            }
            looked_up => {
                self.sink.error(
                    format!("`{{{name}}}' is not a valid token"),
                    Some(Span::new(start, self.cursor.pos())),
                );
                let flags = looked_up.map_or(TokenFlags::empty(), |(_, flags)| flags);
                (TokenKind::Invalid, flags)
            }
        }
    }

    // ─── Operators ──────────────────────────────────────────────────────

    /// Two/three-byte operators, greedily matching the longest form; any
    /// other byte is consumed as itself.
    fn operator(&mut self, b: u8) -> TokenKind<'src> {
        match b {
            b'>' => self.greater(),
            b'<' => self.less(),
            b'!' => self.bang(),
            b'/' => self.doubled(TokenKind::Sdiv),
            b'%' => self.doubled(TokenKind::Smod),
            b'=' => self.doubled(TokenKind::Eq),
            b'&' => self.doubled(TokenKind::DblAnd),
            b'^' => self.doubled(TokenKind::DblXor),
            b'|' => self.doubled(TokenKind::DblOr),
            _ => {
                self.cursor.advance();
                TokenKind::Punct(b)
            }
        }
    }

    fn greater(&mut self) -> TokenKind<'src> {
        match self.cursor.peek() {
            b'>' => {
                if self.cursor.peek2() == b'>' {
                    self.cursor.advance_n(3);
                    TokenKind::Sar
                } else {
                    self.cursor.advance_n(2);
                    TokenKind::Shr
                }
            }
            b'=' => {
                self.cursor.advance_n(2);
                TokenKind::Ge
            }
            _ => {
                self.cursor.advance();
                TokenKind::Punct(b'>')
            }
        }
    }

    fn less(&mut self) -> TokenKind<'src> {
        match self.cursor.peek() {
            b'<' => {
                // `<<<` is accepted but means the same shift as `<<`.
                let len = if self.cursor.peek2() == b'<' { 3 } else { 2 };
                self.cursor.advance_n(len);
                TokenKind::Shl
            }
            b'>' => {
                self.cursor.advance_n(2);
                TokenKind::Ne
            }
            b'=' => {
                if self.cursor.peek2() == b'>' {
                    self.cursor.advance_n(3);
                    TokenKind::Leg
                } else {
                    self.cursor.advance_n(2);
                    TokenKind::Le
                }
            }
            _ => {
                self.cursor.advance();
                TokenKind::Punct(b'<')
            }
        }
    }

    fn bang(&mut self) -> TokenKind<'src> {
        if self.cursor.peek() == b'=' {
            self.cursor.advance_n(2);
            TokenKind::Ne
        } else {
            self.cursor.advance();
            TokenKind::Punct(b'!')
        }
    }

    /// A doubled lead byte (`//`, `%%`, `==`, `&&`, `^^`, `||`) yields
    /// `kind`; a lone one falls back to `Punct`.
    fn doubled(&mut self, kind: TokenKind<'src>) -> TokenKind<'src> {
        let lead = self.cursor.current();
        if self.cursor.peek() == lead {
            self.cursor.advance_n(2);
            kind
        } else {
            self.cursor.advance();
            TokenKind::Punct(lead)
        }
    }
}

impl<'src, S: DiagnosticSink> Iterator for Scanner<'src, S> {
    type Item = Token<'src>;

    /// Pull tokens until `Eos` (which is not yielded).
    fn next(&mut self) -> Option<Token<'src>> {
        let token = self.next_token();
        if token.is_eos() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests;
