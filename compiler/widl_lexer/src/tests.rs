use pretty_assertions::assert_eq;
use widl_ir::{LexProblem, StringInterner, TokenKind};

use super::lex;
use crate::convert::parse_integer;

fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
    lex(source, interner).iter().map(|t| t.kind).collect()
}

#[test]
fn test_interface_header() {
    let interner = StringInterner::new();
    let node = interner.intern("Node");
    let target = interner.intern("EventTarget");

    assert_eq!(
        kinds("interface Node : EventTarget {};", &interner),
        vec![
            TokenKind::Interface,
            TokenKind::Ident(node),
            TokenKind::Colon,
            TokenKind::Ident(target),
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let interner = StringInterner::new();
    let tokens = kinds(
        "// line comment\n/* block\n * comment */ typedef /**/ long L;",
        &interner,
    );
    assert_eq!(tokens[0], TokenKind::Typedef);
    assert_eq!(tokens[1], TokenKind::Long);
    assert_eq!(tokens.len(), 5);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let interner = StringInterner::new();
    let name = interner.intern("interfaceName");
    assert_eq!(
        kinds("interfaceName", &interner),
        vec![TokenKind::Ident(name), TokenKind::Eof]
    );
}

#[test]
fn test_leading_underscore_is_stripped() {
    let interner = StringInterner::new();
    let name = interner.intern("interface");
    assert_eq!(
        kinds("_interface", &interner),
        vec![TokenKind::Ident(name), TokenKind::Eof]
    );
}

#[test]
fn test_numeric_literals() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("42 -7 0x1F 017 0 1.5 .5e1 -Infinity NaN", &interner),
        vec![
            TokenKind::Integer(42),
            TokenKind::Integer(-7),
            TokenKind::Integer(31),
            TokenKind::Integer(15),
            TokenKind::Integer(0),
            TokenKind::Float(1.5f64.to_bits()),
            TokenKind::Float(5.0f64.to_bits()),
            TokenKind::Minus,
            TokenKind::Infinity,
            TokenKind::NaN,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_integer_out_of_range() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("0xFFFFFFFFFFFFFFFFFF", &interner)[0],
        TokenKind::Error(LexProblem::NumberOutOfRange)
    );
    assert_eq!(parse_integer("-9223372036854775808"), Some(i128::from(i64::MIN)));
    assert_eq!(parse_integer("18446744073709551616"), None);
}

#[test]
fn test_unsigned_long_long_literals() {
    let interner = StringInterner::new();
    let max = i128::from(u64::MAX);
    assert_eq!(
        kinds("18446744073709551615 0xFFFFFFFFFFFFFFFF", &interner),
        vec![TokenKind::Integer(max), TokenKind::Integer(max), TokenKind::Eof]
    );
}

#[test]
fn test_string_literal_is_unquoted() {
    let interner = StringInterner::new();
    let tokens = kinds(r#"enum E { "a-b", "" };"#, &interner);
    let TokenKind::String(first) = tokens[3] else {
        panic!("expected string, got {:?}", tokens[3]);
    };
    assert_eq!(interner.lookup(first), "a-b");
    assert_eq!(tokens[5], TokenKind::String(widl_ir::Name::EMPTY));
}

#[test]
fn test_punctuation() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("( ) [ ] < > , ; : = ? ... - *", &interner),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Eq,
            TokenKind::Question,
            TokenKind::Ellipsis,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let interner = StringInterner::new();
    let tokens = lex("enum E { \"open", &interner);
    let error = tokens[3];
    assert_eq!(error.kind, TokenKind::Error(LexProblem::UnterminatedString));
    assert_eq!(error.span.start, 9);
    assert_eq!(error.span.end, 14);
    assert_eq!(tokens[4].kind, TokenKind::Eof);
}

#[test]
fn test_unterminated_comment() {
    let interner = StringInterner::new();
    let tokens = kinds("typedef /* never closed", &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::Typedef,
            TokenKind::Error(LexProblem::UnterminatedComment),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_invalid_character() {
    let interner = StringInterner::new();
    let tokens = kinds("long # x", &interner);
    assert_eq!(tokens[1], TokenKind::Error(LexProblem::InvalidCharacter));
}

#[test]
fn test_eof_span_is_end_of_input() {
    let interner = StringInterner::new();
    let tokens = lex("enum E {};", &interner);
    let eof = tokens[tokens.len() - 1];
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span.start, 10);
}
