//! Token model for the oxasm scanner.
//!
//! A [`Token`] pairs a [`TokenKind`] with its source [`Span`] and the
//! keyword flags that lookup attached. Payloads ride on the kind itself:
//! identifiers and floats carry their spelling, strings their unescaped
//! content bytes, integers their converted value. Text borrows from the
//! scanned line wherever the stored spelling is a contiguous source
//! slice; only unescaped string content can be owned.

use std::borrow::Cow;
use std::fmt;

use oxasm_lexer_core::Span;

use crate::TokenFlags;

/// One scanned token.
#[derive(Clone, Eq, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    /// Flag bitset from keyword lookup; empty for non-keywords.
    pub flags: TokenFlags,
    /// Byte range of the token in the scanned line. Zero-length for
    /// end-of-stream.
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind<'src>, flags: TokenFlags, span: Span) -> Self {
        Token { kind, flags, span }
    }

    /// The stored spelling, for kinds that carry text.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Id(text) | TokenKind::Float(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Unescaped content bytes of a string literal.
    pub fn str_bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            TokenKind::Str(content) => Some(content.as_ref()),
            _ => None,
        }
    }

    /// Returns `true` for the end-of-stream token.
    pub fn is_eos(&self) -> bool {
        self.kind == TokenKind::Eos
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            write!(f, "{:?} @ {}", self.kind, self.span)
        } else {
            write!(f, "{:?} [{:?}] @ {}", self.kind, self.flags, self.span)
        }
    }
}

/// Token classification. Payloads ride on the variant.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TokenKind<'src> {
    /// End of the scannable input, or a `;` comment reaching end of line.
    Eos,
    /// Identifier or label reference. `$`-prefixed spellings land here
    /// without keyword lookup (the `$` is not part of the stored text).
    Id(Cow<'src, str>),
    /// `$` -- the current assembly location.
    Here,
    /// `$$` -- the base of the current segment.
    Base,
    /// Integer literal with its converted value.
    Num(u64),
    /// Floating-point literal. The scanner captures the spelling;
    /// conversion to a value happens downstream.
    Float(Cow<'src, str>),
    /// Numeric literal that failed conversion.
    ErrNum,
    /// Quoted string content, unescaped.
    Str(Cow<'src, [u8]>),
    /// Unterminated or mismatched quoted string.
    ErrStr,
    /// Unusable token (bad brace decorator and similar).
    Invalid,

    /// Register name.
    Reg(Register),
    /// Opmask register appearing inside braces, used as a write mask.
    OpMask(Register),
    /// Operand size keyword (`byte`, `qword`, ...).
    Size(OperandSize),
    /// EVEX decorator keyword, valid only inside braces.
    Decorator(Decorator),
    /// Instruction encoding prefix, valid only inside braces.
    Prefix(EncodingPrefix),

    /// `seg` operator.
    Seg,
    /// `wrt` operator.
    Wrt,
    /// `strict` operand modifier.
    Strict,
    /// `rel` addressing modifier.
    Rel,
    /// `abs` addressing modifier.
    Abs,
    /// `nosplit` effective-address modifier.
    Nosplit,

    /// `<<` and the accepted `<<<` spelling.
    Shl,
    /// `>>` logical shift right.
    Shr,
    /// `>>>` arithmetic shift right.
    Sar,
    /// `//` signed division.
    Sdiv,
    /// `%%` signed modulo.
    Smod,
    /// `==` equality.
    Eq,
    /// `<>` and `!=` inequality.
    Ne,
    /// `<=` less-or-equal.
    Le,
    /// `>=` greater-or-equal.
    Ge,
    /// `<=>` three-way comparison.
    Leg,
    /// `&&` boolean and.
    DblAnd,
    /// `^^` boolean xor.
    DblXor,
    /// `||` boolean or.
    DblOr,

    /// Any other single character, carried as its raw byte.
    Punct(u8),
}

/// Register classes the scanner distinguishes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RegClass {
    Gpr64,
    Gpr32,
    Xmm,
    Opmask,
}

/// Register names known to the keyword table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Register {
    Rax,
    Rcx,
    Rdx,
    Rbx,
    Rsp,
    Rbp,
    Rsi,
    Rdi,
    Eax,
    Ecx,
    Edx,
    Ebx,
    Esp,
    Ebp,
    Esi,
    Edi,
    Xmm0,
    Xmm1,
    Xmm2,
    Xmm3,
    Xmm4,
    Xmm5,
    Xmm6,
    Xmm7,
    K0,
    K1,
    K2,
    K3,
    K4,
    K5,
    K6,
    K7,
}

impl Register {
    /// The register's class.
    pub fn class(self) -> RegClass {
        use Register::*;
        match self {
            Rax | Rcx | Rdx | Rbx | Rsp | Rbp | Rsi | Rdi => RegClass::Gpr64,
            Eax | Ecx | Edx | Ebx | Esp | Ebp | Esi | Edi => RegClass::Gpr32,
            Xmm0 | Xmm1 | Xmm2 | Xmm3 | Xmm4 | Xmm5 | Xmm6 | Xmm7 => RegClass::Xmm,
            K0 | K1 | K2 | K3 | K4 | K5 | K6 | K7 => RegClass::Opmask,
        }
    }

    /// Returns `true` for the opmask registers `k0`-`k7`.
    pub fn is_opmask(self) -> bool {
        self.class() == RegClass::Opmask
    }
}

/// Operand size keywords.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperandSize {
    Byte,
    Word,
    Dword,
    Qword,
    Tword,
    Oword,
    Yword,
    Zword,
}

impl OperandSize {
    /// Width of the operand size in bytes.
    pub fn bytes(self) -> u32 {
        match self {
            OperandSize::Byte => 1,
            OperandSize::Word => 2,
            OperandSize::Dword => 4,
            OperandSize::Qword => 8,
            OperandSize::Tword => 10,
            OperandSize::Oword => 16,
            OperandSize::Yword => 32,
            OperandSize::Zword => 64,
        }
    }
}

/// `{...}` decorators with brace-only meaning.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Decorator {
    /// `{z}` zeroing-masking.
    Zeroing,
    /// `{1toN}` memory broadcast; the payload is N.
    Broadcast(u8),
    /// `{sae}` suppress-all-exceptions.
    Sae,
    /// `{rn-sae}` round to nearest.
    RoundNearest,
    /// `{rd-sae}` round down.
    RoundDown,
    /// `{ru-sae}` round up.
    RoundUp,
    /// `{rz-sae}` round toward zero.
    RoundZero,
}

/// Instruction encoding prefixes that may appear in braces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EncodingPrefix {
    Evex,
    Vex,
    Rex,
}
