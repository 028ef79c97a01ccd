//! Lexical scanner for oxasm source lines.
//!
//! The parser pulls [`Token`]s one at a time from a [`Scanner`] session
//! bound to a [`LineBuffer`](oxasm_lexer_core::LineBuffer). Tokens carry
//! their payload on the kind (spelling, converted value, string bytes),
//! the flag bitset keyword lookup attached, and a byte [`Span`] for
//! diagnostics. Malformed input never stops the scanner: it degrades to
//! an error-kind token plus a report through the
//! [`DiagnosticSink`](oxasm_diagnostic::DiagnosticSink).
//!
//! ```
//! use oxasm_diagnostic::DiagnosticBuffer;
//! use oxasm_lexer::{Scanner, TokenKind};
//! use oxasm_lexer_core::LineBuffer;
//!
//! let line = LineBuffer::new("mov rax, 0x10 ; load");
//! let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
//!
//! assert_eq!(scanner.next_token().text(), Some("mov"));
//! assert!(matches!(scanner.next_token().kind, TokenKind::Reg(_)));
//! assert_eq!(scanner.next_token().kind, TokenKind::Punct(b','));
//! assert_eq!(scanner.next_token().kind, TokenKind::Num(0x10));
//! // The `;` comment ends the stream.
//! assert!(scanner.next_token().is_eos());
//! ```

mod keywords;
mod readnum;
mod scanner;
mod token;
mod token_flags;
mod unquote;

pub use keywords::{lookup, Keyword, MAX_KEYWORD};
pub use readnum::{read_num, ReadNumError};
pub use scanner::{ScanMode, ScanState, Scanner, IDLEN_MAX};
pub use token::{
    Decorator, EncodingPrefix, OperandSize, RegClass, Register, Token, TokenKind,
};
pub use token_flags::TokenFlags;
pub use unquote::{unquote, Unquoted};

pub use oxasm_lexer_core::Span;
