//! Keyword lookup for the scanner.
//!
//! Length-bucketed, case-insensitive match mapping a spelled keyword to
//! what it resolves to plus its flag bitset. The identifier's length is
//! the first-pass filter (keywords range from 1-7 bytes); the probe is
//! lowercased into a fixed stack buffer, so lookup never allocates.
//!
//! Brace decorators (`z`, `1to8`, `rn-sae`, ...) live in the same table
//! as ordinary keywords; their `BRC` flag is what confines them to
//! `{...}` positions. The scanner enforces that, not the table.

use crate::token::{Decorator, EncodingPrefix, OperandSize, Register, TokenKind};
use crate::TokenFlags;

/// Length of the longest keyword in the table (`nosplit`).
pub const MAX_KEYWORD: usize = 7;

/// What a keyword resolves to.
///
/// Mostly mirrors [`TokenKind`] minus the payload-carrying literal
/// variants; `Ident` covers recognized spellings that still scan as
/// plain identifiers (`ptr`).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Keyword {
    Reg(Register),
    Size(OperandSize),
    Decorator(Decorator),
    Prefix(EncodingPrefix),
    Seg,
    Wrt,
    Strict,
    Rel,
    Abs,
    Nosplit,
    /// Recognized spelling that scans as a plain identifier.
    Ident,
}

impl Keyword {
    /// The token kind this keyword scans as, given the scanned spelling
    /// (used only by the `Ident` arm, which keeps the source text).
    pub fn into_kind<'src>(self, text: std::borrow::Cow<'src, str>) -> TokenKind<'src> {
        match self {
            Keyword::Reg(reg) => TokenKind::Reg(reg),
            Keyword::Size(size) => TokenKind::Size(size),
            Keyword::Decorator(decorator) => TokenKind::Decorator(decorator),
            Keyword::Prefix(prefix) => TokenKind::Prefix(prefix),
            Keyword::Seg => TokenKind::Seg,
            Keyword::Wrt => TokenKind::Wrt,
            Keyword::Strict => TokenKind::Strict,
            Keyword::Rel => TokenKind::Rel,
            Keyword::Abs => TokenKind::Abs,
            Keyword::Nosplit => TokenKind::Nosplit,
            Keyword::Ident => TokenKind::Id(text),
        }
    }
}

fn plain(keyword: Keyword) -> Option<(Keyword, TokenFlags)> {
    Some((keyword, TokenFlags::empty()))
}

fn brc(keyword: Keyword) -> Option<(Keyword, TokenFlags)> {
    Some((keyword, TokenFlags::BRC))
}

/// Look up a keyword by spelled text.
///
/// Returns what the keyword resolves to and its flags, or `None` for a
/// regular identifier. Keywords are case-insensitive; the comparison
/// lowercases into a stack buffer sized by [`MAX_KEYWORD`], so text
/// longer than the longest keyword is rejected before any comparison.
pub fn lookup(text: &str) -> Option<(Keyword, TokenFlags)> {
    let len = text.len();
    if len == 0 || len > MAX_KEYWORD {
        return None;
    }

    let mut buf = [0u8; MAX_KEYWORD];
    for (dst, b) in buf.iter_mut().zip(text.bytes()) {
        *dst = b.to_ascii_lowercase();
    }
    // Byte-wise ASCII lowercasing preserves UTF-8 validity.
    let probe = std::str::from_utf8(&buf[..len]).ok()?;

    use crate::token::Decorator::*;
    use EncodingPrefix::*;
    use Keyword::*;
    use OperandSize::*;
    use Register::*;

    match len {
        1 => match probe {
            "z" => brc(Decorator(Zeroing)),
            _ => None,
        },
        2 => {
            let reg = match probe {
                "k0" => K0,
                "k1" => K1,
                "k2" => K2,
                "k3" => K3,
                "k4" => K4,
                "k5" => K5,
                "k6" => K6,
                "k7" => K7,
                _ => return None,
            };
            // opmask registers may also decorate inside braces
            Some((Reg(reg), TokenFlags::BRC_OPT))
        }
        3 => match probe {
            "rax" => plain(Reg(Rax)),
            "rcx" => plain(Reg(Rcx)),
            "rdx" => plain(Reg(Rdx)),
            "rbx" => plain(Reg(Rbx)),
            "rsp" => plain(Reg(Rsp)),
            "rbp" => plain(Reg(Rbp)),
            "rsi" => plain(Reg(Rsi)),
            "rdi" => plain(Reg(Rdi)),
            "eax" => plain(Reg(Eax)),
            "ecx" => plain(Reg(Ecx)),
            "edx" => plain(Reg(Edx)),
            "ebx" => plain(Reg(Ebx)),
            "esp" => plain(Reg(Esp)),
            "ebp" => plain(Reg(Ebp)),
            "esi" => plain(Reg(Esi)),
            "edi" => plain(Reg(Edi)),
            "seg" => plain(Seg),
            "wrt" => plain(Wrt),
            "abs" => plain(Abs),
            "rel" => plain(Rel),
            "sae" => brc(Decorator(Sae)),
            "rex" => brc(Prefix(Rex)),
            "vex" => brc(Prefix(Vex)),
            "ptr" => Some((Ident, TokenFlags::WARN)),
            _ => None,
        },
        4 => match probe {
            "byte" => plain(Size(Byte)),
            "word" => plain(Size(Word)),
            "xmm0" => plain(Reg(Xmm0)),
            "xmm1" => plain(Reg(Xmm1)),
            "xmm2" => plain(Reg(Xmm2)),
            "xmm3" => plain(Reg(Xmm3)),
            "xmm4" => plain(Reg(Xmm4)),
            "xmm5" => plain(Reg(Xmm5)),
            "xmm6" => plain(Reg(Xmm6)),
            "xmm7" => plain(Reg(Xmm7)),
            "evex" => brc(Prefix(Evex)),
            "1to2" => brc(Decorator(Broadcast(2))),
            "1to4" => brc(Decorator(Broadcast(4))),
            "1to8" => brc(Decorator(Broadcast(8))),
            _ => None,
        },
        5 => match probe {
            "dword" => plain(Size(Dword)),
            "qword" => plain(Size(Qword)),
            "tword" => plain(Size(Tword)),
            "oword" => plain(Size(Oword)),
            "yword" => plain(Size(Yword)),
            "zword" => plain(Size(Zword)),
            "1to16" => brc(Decorator(Broadcast(16))),
            _ => None,
        },
        6 => match probe {
            "strict" => plain(Strict),
            "rn-sae" => brc(Decorator(RoundNearest)),
            "rd-sae" => brc(Decorator(RoundDown)),
            "ru-sae" => brc(Decorator(RoundUp)),
            "rz-sae" => brc(Decorator(RoundZero)),
            _ => None,
        },
        7 => match probe {
            "nosplit" => plain(Nosplit),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn registers_resolve_without_flags() {
        assert_eq!(
            lookup("rax"),
            Some((Keyword::Reg(Register::Rax), TokenFlags::empty()))
        );
        assert_eq!(
            lookup("edi"),
            Some((Keyword::Reg(Register::Edi), TokenFlags::empty()))
        );
        assert_eq!(
            lookup("xmm7"),
            Some((Keyword::Reg(Register::Xmm7), TokenFlags::empty()))
        );
    }

    #[test]
    fn opmask_registers_carry_brc_opt() {
        for (name, reg) in [("k0", Register::K0), ("k4", Register::K4), ("k7", Register::K7)] {
            assert_eq!(lookup(name), Some((Keyword::Reg(reg), TokenFlags::BRC_OPT)));
        }
    }

    #[test]
    fn size_keywords() {
        assert_eq!(
            lookup("byte"),
            Some((Keyword::Size(OperandSize::Byte), TokenFlags::empty()))
        );
        assert_eq!(
            lookup("zword"),
            Some((Keyword::Size(OperandSize::Zword), TokenFlags::empty()))
        );
    }

    #[test]
    fn expression_keywords() {
        assert_eq!(lookup("seg"), Some((Keyword::Seg, TokenFlags::empty())));
        assert_eq!(lookup("wrt"), Some((Keyword::Wrt, TokenFlags::empty())));
        assert_eq!(lookup("strict"), Some((Keyword::Strict, TokenFlags::empty())));
        assert_eq!(lookup("rel"), Some((Keyword::Rel, TokenFlags::empty())));
        assert_eq!(lookup("abs"), Some((Keyword::Abs, TokenFlags::empty())));
        assert_eq!(lookup("nosplit"), Some((Keyword::Nosplit, TokenFlags::empty())));
    }

    #[test]
    fn decorators_are_brace_only() {
        assert_eq!(
            lookup("z"),
            Some((Keyword::Decorator(Decorator::Zeroing), TokenFlags::BRC))
        );
        assert_eq!(
            lookup("sae"),
            Some((Keyword::Decorator(Decorator::Sae), TokenFlags::BRC))
        );
        assert_eq!(
            lookup("rn-sae"),
            Some((Keyword::Decorator(Decorator::RoundNearest), TokenFlags::BRC))
        );
        assert_eq!(
            lookup("1to8"),
            Some((Keyword::Decorator(Decorator::Broadcast(8)), TokenFlags::BRC))
        );
        assert_eq!(
            lookup("1to16"),
            Some((Keyword::Decorator(Decorator::Broadcast(16)), TokenFlags::BRC))
        );
    }

    #[test]
    fn encoding_prefixes_are_brace_only() {
        assert_eq!(
            lookup("evex"),
            Some((Keyword::Prefix(EncodingPrefix::Evex), TokenFlags::BRC))
        );
        assert_eq!(
            lookup("vex"),
            Some((Keyword::Prefix(EncodingPrefix::Vex), TokenFlags::BRC))
        );
        assert_eq!(
            lookup("rex"),
            Some((Keyword::Prefix(EncodingPrefix::Rex), TokenFlags::BRC))
        );
    }

    #[test]
    fn ptr_warns_and_stays_an_identifier() {
        assert_eq!(lookup("ptr"), Some((Keyword::Ident, TokenFlags::WARN)));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("RAX"), lookup("rax"));
        assert_eq!(lookup("QWord"), lookup("qword"));
        assert_eq!(lookup("K1"), lookup("k1"));
        assert_eq!(lookup("RN-SAE"), lookup("rn-sae"));
        assert_eq!(lookup("PTR"), lookup("ptr"));
    }

    #[test]
    fn non_keywords_return_none() {
        assert_eq!(lookup("mov"), None);
        assert_eq!(lookup("label"), None);
        assert_eq!(lookup("x"), None);
        assert_eq!(lookup("k8"), None);
        assert_eq!(lookup("xmm8"), None);
        assert_eq!(lookup("1to3"), None);
    }

    #[test]
    fn length_boundary_rejection() {
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("nosplits"), None); // 8 bytes, past MAX_KEYWORD
        assert_eq!(lookup("nosplit"), Some((Keyword::Nosplit, TokenFlags::empty())));
    }

    #[test]
    fn into_kind_maps_units_and_ident() {
        use std::borrow::Cow;

        let kind = Keyword::Seg.into_kind(Cow::Borrowed("seg"));
        assert_eq!(kind, TokenKind::Seg);

        let kind = Keyword::Ident.into_kind(Cow::Borrowed("ptr"));
        assert_eq!(kind, TokenKind::Id(Cow::Borrowed("ptr")));

        let kind = Keyword::Reg(Register::K1).into_kind(Cow::Borrowed("k1"));
        assert_eq!(kind, TokenKind::Reg(Register::K1));
    }

    #[test]
    fn non_ascii_probe_is_rejected() {
        assert_eq!(lookup("räx"), None);
        assert_eq!(lookup("ra\u{fe}"), None);
    }
}
