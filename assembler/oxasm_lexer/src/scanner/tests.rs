#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use std::borrow::Cow;

use oxasm_diagnostic::{DiagnosticBuffer, Severity, WarnKind};
use oxasm_lexer_core::{LineBuffer, Span};
use pretty_assertions::assert_eq;

use crate::token::{Decorator, EncodingPrefix, OperandSize, Register};
use super::*;

/// Scan a whole line, returning the tokens before `Eos` plus the sink.
fn collect(line: &LineBuffer) -> (Vec<Token<'_>>, DiagnosticBuffer) {
    let mut scanner = Scanner::new(line, DiagnosticBuffer::new());
    let tokens: Vec<_> = scanner.by_ref().collect();
    (tokens, scanner.into_sink())
}

fn kinds<'src>(tokens: &[Token<'src>]) -> Vec<TokenKind<'src>> {
    tokens.iter().map(|t| t.kind.clone()).collect()
}

// ─── End of Stream ──────────────────────────────────────────────────────

#[test]
fn empty_line_returns_zero_length_eos() {
    let line = LineBuffer::new("");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    let token = scanner.next_token();
    assert!(token.is_eos());
    assert_eq!(token.span, Span::point(0));
}

#[test]
fn repeated_calls_after_eos_keep_returning_eos() {
    let line = LineBuffer::new("x");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    scanner.next_token();
    for _ in 0..4 {
        assert!(scanner.next_token().is_eos());
    }
}

#[test]
fn whitespace_only_line_is_eos() {
    let line = LineBuffer::new("   \t  ");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    let token = scanner.next_token();
    assert!(token.is_eos());
    assert_eq!(token.span, Span::point(6));
}

// ─── Identifiers & Keywords ─────────────────────────────────────────────

#[test]
fn plain_instruction_line() {
    let line = LineBuffer::new("mov rax, rbx");
    let (tokens, sink) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Id(Cow::Borrowed("mov")),
            TokenKind::Reg(Register::Rax),
            TokenKind::Punct(b','),
            TokenKind::Reg(Register::Rbx),
        ]
    );
    assert_eq!(tokens[0].span, Span::new(0, 3));
    assert_eq!(tokens[1].span, Span::new(4, 7));
    assert_eq!(tokens[2].span, Span::new(7, 8));
    assert_eq!(tokens[3].span, Span::new(9, 12));
    assert!(sink.is_empty());
}

#[test]
fn identifiers_allow_assembly_punctuation() {
    let line = LineBuffer::new(".loop? foo@bar x#y z~w");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Id(Cow::Borrowed(".loop?")),
            TokenKind::Id(Cow::Borrowed("foo@bar")),
            TokenKind::Id(Cow::Borrowed("x#y")),
            TokenKind::Id(Cow::Borrowed("z~w")),
        ]
    );
}

#[test]
fn keywords_are_case_insensitive() {
    let line = LineBuffer::new("RAX Qword SEG");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Reg(Register::Rax),
            TokenKind::Size(OperandSize::Qword),
            TokenKind::Seg,
        ]
    );
}

#[test]
fn dollar_symbol_reference_bypasses_keywords() {
    // `$rax` is an explicit symbol reference, never the register.
    let line = LineBuffer::new("$rax");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Id(Cow::Borrowed("rax"))]);
    // The `$` is consumed: the span covers it, the text does not.
    assert_eq!(tokens[0].span, Span::new(0, 4));
}

#[test]
fn foreign_keyword_warns_but_scans_as_identifier() {
    let line = LineBuffer::new("ptr");
    let (tokens, sink) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Id(Cow::Borrowed("ptr"))]);
    assert_eq!(tokens[0].flags, TokenFlags::WARN);

    assert_eq!(sink.len(), 1);
    let diagnostic = sink.iter().next().unwrap();
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.warn_kind, Some(WarnKind::ForeignKeyword));
    assert!(diagnostic.message.contains("not an oxasm keyword"));
}

#[test]
fn brace_only_keyword_outside_braces_is_identifier() {
    let line = LineBuffer::new("z sae 1to8");
    let (tokens, sink) = collect(&line);
    assert_eq!(tokens[0].kind, TokenKind::Id(Cow::Borrowed("z")));
    assert_eq!(tokens[0].flags, TokenFlags::BRC);
    assert_eq!(tokens[1].kind, TokenKind::Id(Cow::Borrowed("sae")));
    // `1to8` starts with a digit, so outside braces it is a (bad) number.
    assert_eq!(tokens[2].kind, TokenKind::ErrNum);
    assert!(sink.has_errors());
}

#[test]
fn over_long_identifier_is_truncated_but_fully_consumed() {
    let source = "y".repeat(5000);
    let line = LineBuffer::new(&source);
    let (tokens, _) = collect(&line);
    assert_eq!(tokens.len(), 1);
    let text = tokens[0].text().unwrap();
    assert_eq!(text.len(), (IDLEN_MAX - 1) as usize);
    assert_eq!(tokens[0].span, Span::new(0, 5000));
}

// ─── `$` and `$$` ───────────────────────────────────────────────────────

#[test]
fn here_and_base_tokens() {
    let line = LineBuffer::new("$ $$");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Here, TokenKind::Base]);
    assert_eq!(tokens[0].span, Span::new(0, 1));
    assert_eq!(tokens[1].span, Span::new(2, 4));
}

#[test]
fn triple_dollar_is_base_then_here() {
    let line = LineBuffer::new("$$$");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Base, TokenKind::Here]);
}

#[test]
fn dollar_before_operator_is_here() {
    let line = LineBuffer::new("$-2");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Here, TokenKind::Punct(b'-'), TokenKind::Num(2)]
    );
}

// ─── Numeric Literals ───────────────────────────────────────────────────

#[test]
fn integer_literals() {
    let line = LineBuffer::new("42 0x1F 1e13h 0b1010 777q 3_000");
    let (tokens, sink) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Num(42),
            TokenKind::Num(0x1F),
            TokenKind::Num(0x1E13),
            TokenKind::Num(10),
            TokenKind::Num(511),
            TokenKind::Num(3000),
        ]
    );
    assert!(sink.is_empty());
}

#[test]
fn dollar_hex_literal() {
    let line = LineBuffer::new("$1A");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Num(0x1A)]);
    assert_eq!(tokens[0].span, Span::new(0, 3));
}

#[test]
fn exponent_forces_float_unless_hex() {
    let line = LineBuffer::new("1e13");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Float(Cow::Borrowed("1e13"))]
    );

    // ... but a hex radix suffix reclaims the `e` as a digit.
    let line = LineBuffer::new("1e13h");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Num(0x1E13)]);
}

#[test]
fn decimal_point_forces_float() {
    let line = LineBuffer::new("10.5");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Float(Cow::Borrowed("10.5"))]
    );
}

#[test]
fn p_exponent_marks_hex_float() {
    let line = LineBuffer::new("0p3");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Float(Cow::Borrowed("0p3"))]);

    let line = LineBuffer::new("0x1p-3");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Float(Cow::Borrowed("0x1p-3"))]
    );
}

#[test]
fn signed_exponent_is_consumed_into_the_float() {
    let line = LineBuffer::new("1e+5 3.14e-2");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Float(Cow::Borrowed("1e+5")),
            TokenKind::Float(Cow::Borrowed("3.14e-2")),
        ]
    );
}

#[test]
fn number_run_ends_at_operator() {
    let line = LineBuffer::new("10+20");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Num(10),
            TokenKind::Punct(b'+'),
            TokenKind::Num(20),
        ]
    );
}

#[test]
fn malformed_number_degrades_to_errnum_and_scanning_continues() {
    let line = LineBuffer::new("9zz + 1");
    let (tokens, sink) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::ErrNum,
            TokenKind::Punct(b'+'),
            TokenKind::Num(1),
        ]
    );
    assert_eq!(tokens[0].span, Span::new(0, 3));
    assert!(sink.has_errors());
    assert!(sink.iter().next().unwrap().message.contains("9zz"));
}

// ─── Quoted Strings ─────────────────────────────────────────────────────

#[test]
fn single_quoted_string_borrows_content() {
    let line = LineBuffer::new("'abc'");
    let (tokens, sink) = collect(&line);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].str_bytes(), Some(b"abc".as_slice()));
    assert_eq!(tokens[0].span, Span::new(0, 5));
    assert!(matches!(
        &tokens[0].kind,
        TokenKind::Str(Cow::Borrowed(_))
    ));
    assert!(sink.is_empty());
}

#[test]
fn double_quoted_string_with_embedded_single_quote() {
    let line = LineBuffer::new("\"it's\"");
    let (tokens, _) = collect(&line);
    assert_eq!(tokens[0].str_bytes(), Some(b"it's".as_slice()));
}

#[test]
fn backquoted_string_unescapes_into_owned_content() {
    let line = LineBuffer::new(r"`a\tb`");
    let (tokens, _) = collect(&line);
    assert_eq!(tokens[0].str_bytes(), Some(b"a\tb".as_slice()));
    assert!(matches!(&tokens[0].kind, TokenKind::Str(Cow::Owned(_))));
    assert_eq!(tokens[0].span, Span::new(0, 6));
}

#[test]
fn unterminated_string_is_errstr() {
    let line = LineBuffer::new("'abc");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    let token = scanner.next_token();
    assert_eq!(token.kind, TokenKind::ErrStr);
    // Content was consumed; nothing further is.
    assert_eq!(scanner.position(), 4);
    assert!(scanner.sink().has_errors());
}

#[test]
fn mismatched_quote_is_errstr() {
    let line = LineBuffer::new("\"abc'");
    let (tokens, sink) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::ErrStr]);
    assert!(sink.has_errors());
}

#[test]
fn consecutive_strings() {
    let line = LineBuffer::new("'a' `b`");
    let (tokens, _) = collect(&line);
    assert_eq!(tokens[0].str_bytes(), Some(b"a".as_slice()));
    assert_eq!(tokens[1].str_bytes(), Some(b"b".as_slice()));
}

// ─── Comments ───────────────────────────────────────────────────────────

#[test]
fn semicolon_comment_ends_the_stream_without_consuming() {
    let line = LineBuffer::new("add ; the rest is comment");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    assert_eq!(
        scanner.next_token().kind,
        TokenKind::Id(Cow::Borrowed("add"))
    );

    let eos = scanner.next_token();
    assert!(eos.is_eos());
    assert_eq!(eos.span, Span::point(4));
    // The cursor stays at the `;`.
    assert_eq!(scanner.position(), 4);
}

// ─── Operators ──────────────────────────────────────────────────────────

#[test]
fn shift_operators_match_greedily() {
    let line = LineBuffer::new(">>> >> << <<<");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Sar,
            TokenKind::Shr,
            TokenKind::Shl,
            TokenKind::Shl,
        ]
    );
    assert_eq!(tokens[0].span.len(), 3);
    assert_eq!(tokens[3].span.len(), 3); // `<<<` maps to Shl, keeps its length
}

#[test]
fn shift_right_then_stray_angle() {
    let line = LineBuffer::new(">> >");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Shr, TokenKind::Punct(b'>')]);
}

#[test]
fn three_way_compare_wins_over_less_equal() {
    let line = LineBuffer::new("<=>");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Leg]);
    assert_eq!(tokens[0].span.len(), 3);
}

#[test]
fn less_equal_when_not_followed_by_angle() {
    let line = LineBuffer::new("<=x");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Le, TokenKind::Id(Cow::Borrowed("x"))]
    );
}

#[test]
fn comparison_and_boolean_operators() {
    let line = LineBuffer::new("== <> != >= && ^^ ||");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Eq,
            TokenKind::Ne,
            TokenKind::Ne,
            TokenKind::Ge,
            TokenKind::DblAnd,
            TokenKind::DblXor,
            TokenKind::DblOr,
        ]
    );
}

#[test]
fn signed_division_and_modulo() {
    let line = LineBuffer::new("// %%");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Sdiv, TokenKind::Smod]);
}

#[test]
fn lone_operator_bytes_fall_back_to_punct() {
    let line = LineBuffer::new("+ - * / % = ! & ^ | ( ) [ ] : <");
    let (tokens, _) = collect(&line);
    let expected: Vec<TokenKind<'_>> = b"+-*/%=!&^|()[]:<"
        .iter()
        .map(|&b| TokenKind::Punct(b))
        .collect();
    assert_eq!(kinds(&tokens), expected);
}

// ─── Brace Decorators ───────────────────────────────────────────────────

#[test]
fn opmask_register_in_braces_becomes_mask() {
    let line = LineBuffer::new("{k1}");
    let (tokens, sink) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::OpMask(Register::K1)]);
    assert_eq!(tokens[0].flags, TokenFlags::BRC_OPT);
    assert_eq!(tokens[0].span, Span::new(0, 4));
    assert!(sink.is_empty());
}

#[test]
fn decorators_resolve_inside_braces() {
    let line = LineBuffer::new("{z} {sae} {rn-sae} {1to8} {evex}");
    let (tokens, sink) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Decorator(Decorator::Zeroing),
            TokenKind::Decorator(Decorator::Sae),
            TokenKind::Decorator(Decorator::RoundNearest),
            TokenKind::Decorator(Decorator::Broadcast(8)),
            TokenKind::Prefix(EncodingPrefix::Evex),
        ]
    );
    assert!(sink.is_empty());
}

#[test]
fn braces_tolerate_interior_spaces() {
    let line = LineBuffer::new("{ k2 }");
    let (tokens, _) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::OpMask(Register::K2)]);
}

#[test]
fn non_brace_keyword_in_braces_is_invalid() {
    // `rax` is a keyword, but carries no brace validity at all.
    let line = LineBuffer::new("{rax}");
    let (tokens, sink) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Invalid]);
    assert!(sink.has_errors());
    assert!(sink.iter().next().unwrap().message.contains("{rax}"));
}

#[test]
fn unknown_name_in_braces_is_invalid() {
    let line = LineBuffer::new("{bogus}");
    let (tokens, sink) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Invalid]);
    assert!(sink.has_errors());
}

#[test]
fn unterminated_braces_report_and_leave_cursor_at_end() {
    let line = LineBuffer::new("{k1");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    let token = scanner.next_token();
    assert_eq!(token.kind, TokenKind::Invalid);
    assert_eq!(scanner.position(), 3);
    let sink = scanner.into_sink();
    assert!(sink.iter().next().unwrap().message.contains("unterminated"));
}

#[test]
fn over_long_brace_content_is_invalid_with_full_text_in_report() {
    let line = LineBuffer::new("{notarealdecorator}");
    let (tokens, sink) = collect(&line);
    assert_eq!(kinds(&tokens), vec![TokenKind::Invalid]);
    assert!(sink
        .iter()
        .next()
        .unwrap()
        .message
        .contains("notarealdecorator"));
}

#[test]
fn scanning_continues_after_invalid_braces() {
    let line = LineBuffer::new("{bogus} rax");
    let (tokens, _) = collect(&line);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Invalid, TokenKind::Reg(Register::Rax)]
    );
}

// ─── Pushback ───────────────────────────────────────────────────────────

#[test]
fn pushback_round_trip_is_exact() {
    let line = LineBuffer::new("rax rbx");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());

    let first = scanner.next_token();
    let position_after_first = scanner.position();

    scanner.push_back(first.clone());
    assert_eq!(scanner.position(), position_after_first);

    let replayed = scanner.next_token();
    assert_eq!(replayed, first);
    assert_eq!(scanner.position(), position_after_first);

    // Normal scanning resumes after the replay.
    assert_eq!(scanner.next_token().kind, TokenKind::Reg(Register::Rbx));
}

#[test]
fn pushback_is_lifo() {
    let line = LineBuffer::new("1 2");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    let one = scanner.next_token();
    let two = scanner.next_token();

    scanner.push_back(one.clone());
    scanner.push_back(two.clone());

    assert_eq!(scanner.next_token(), two);
    assert_eq!(scanner.next_token(), one);
    assert!(scanner.next_token().is_eos());
}

// ─── Snapshot / Restore ─────────────────────────────────────────────────

#[test]
fn snapshot_restore_replays_identically() {
    let line = LineBuffer::new("1 2 3");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());
    assert_eq!(scanner.next_token().kind, TokenKind::Num(1));

    let saved = scanner.snapshot();
    let second = scanner.next_token();
    assert_eq!(second.kind, TokenKind::Num(2));
    assert_eq!(scanner.next_token().kind, TokenKind::Num(3));

    scanner.restore(saved);
    assert_eq!(scanner.next_token(), second);
}

#[test]
fn snapshot_is_independent_of_later_mutation() {
    let line = LineBuffer::new("1 2");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());

    let saved = scanner.snapshot();
    scanner.next_token();
    scanner.next_token();

    // The snapshot still points at the beginning.
    scanner.restore(saved);
    assert_eq!(scanner.position(), 0);
    assert_eq!(scanner.next_token().kind, TokenKind::Num(1));
}

#[test]
fn snapshot_captures_pending_pushback() {
    let line = LineBuffer::new("rax rbx");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());

    let first = scanner.next_token();
    scanner.push_back(first.clone());
    let saved = scanner.snapshot();

    // Drain the pushback and scan past it.
    assert_eq!(scanner.next_token(), first);
    assert_eq!(scanner.next_token().kind, TokenKind::Reg(Register::Rbx));

    // Restoring brings the pushed-back token back too.
    scanner.restore(saved);
    assert_eq!(scanner.next_token(), first);
}

#[test]
fn snapshot_without_intervening_mutation_is_transparent() {
    let line = LineBuffer::new("qword 7");
    let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());

    let saved = scanner.snapshot();
    scanner.restore(saved);

    assert_eq!(
        scanner.next_token().kind,
        TokenKind::Size(OperandSize::Qword)
    );
    assert_eq!(scanner.next_token().kind, TokenKind::Num(7));
}

// ─── Session Lifecycle ──────────────────────────────────────────────────

#[test]
fn reset_rebinds_and_drains_pushback() {
    let first_line = LineBuffer::new("rax");
    let second_line = LineBuffer::new("42");
    let mut scanner = Scanner::new(&first_line, DiagnosticBuffer::new());

    let token = scanner.next_token();
    scanner.push_back(token);

    scanner.reset(&second_line);
    assert_eq!(scanner.position(), 0);
    // The pushed-back token from the old line is gone.
    assert_eq!(scanner.next_token().kind, TokenKind::Num(42));
    assert!(scanner.next_token().is_eos());
}

#[test]
fn independent_sessions_do_not_interfere() {
    let line_a = LineBuffer::new("rax");
    let line_b = LineBuffer::new("rbx");
    let mut scanner_a = Scanner::new(&line_a, DiagnosticBuffer::new());
    let mut scanner_b = Scanner::new(&line_b, DiagnosticBuffer::new());

    assert_eq!(scanner_a.next_token().kind, TokenKind::Reg(Register::Rax));
    assert_eq!(scanner_b.next_token().kind, TokenKind::Reg(Register::Rbx));
    assert!(scanner_a.next_token().is_eos());
    assert!(scanner_b.next_token().is_eos());
}

// ─── Whole-Line Properties ──────────────────────────────────────────────

#[test]
fn spans_are_contiguous_modulo_whitespace() {
    let line = LineBuffer::new("mov rax, 0x10");
    let (tokens, _) = collect(&line);

    let mut previous_end = 0;
    for token in &tokens {
        assert!(token.span.start >= previous_end, "overlapping spans");
        // Gaps are whitespace only.
        assert!(!token.span.is_empty());
        previous_end = token.span.end;
    }
    assert_eq!(previous_end, line.len());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// `next_token` always either consumes input or reports `Eos`:
        /// no infinite loop on any input, spans stay ordered and inside
        /// the line.
        #[test]
        fn scanner_always_makes_progress(source in ".{0,80}") {
            let line = LineBuffer::new(&source);
            let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());

            let mut fuel = source.len() + 2;
            let mut previous_end = 0u32;
            loop {
                prop_assert!(fuel > 0, "scanner failed to terminate");
                fuel -= 1;

                let token = scanner.next_token();
                if token.is_eos() {
                    break;
                }
                prop_assert!(!token.span.is_empty(), "empty non-Eos span");
                prop_assert!(token.span.start >= previous_end, "span went backwards");
                prop_assert!(token.span.end <= line.len(), "span past end of line");
                previous_end = token.span.end;
            }
        }

        /// Pushing a just-scanned token back and rescanning yields the
        /// identical token and leaves the cursor alone.
        #[test]
        fn pushback_is_transparent(source in "[a-z0-9 +,$]{0,40}") {
            let line = LineBuffer::new(&source);
            let mut scanner = Scanner::new(&line, DiagnosticBuffer::new());

            let token = scanner.next_token();
            let position = scanner.position();
            scanner.push_back(token.clone());
            prop_assert_eq!(scanner.next_token(), token);
            prop_assert_eq!(scanner.position(), position);
        }
    }
}
