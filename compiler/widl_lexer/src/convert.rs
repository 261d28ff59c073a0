//! Token Conversion
//!
//! Converts raw logos tokens to final `TokenKind`, interning identifiers and
//! strings and parsing numeric literals.

use widl_ir::{LexProblem, StringInterner, TokenKind};

use crate::raw_token::RawToken;

/// Convert a raw token to a `TokenKind`.
///
/// Must not be called for trivia (`LineComment`, `BlockComment`).
pub(crate) fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        // Literals
        RawToken::Integer => match parse_integer(slice) {
            Some(value) => TokenKind::Integer(value),
            None => TokenKind::Error(LexProblem::NumberOutOfRange),
        },
        RawToken::Float => match slice.parse::<f64>() {
            Ok(value) if value.is_finite() => TokenKind::Float(value.to_bits()),
            _ => TokenKind::Error(LexProblem::NumberOutOfRange),
        },
        RawToken::String => {
            let content = slice
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(slice);
            TokenKind::String(interner.intern(content))
        }
        RawToken::Ident => {
            let name = slice.strip_prefix('_').unwrap_or(slice);
            TokenKind::Ident(interner.intern(name))
        }

        // Declarations
        RawToken::Interface => TokenKind::Interface,
        RawToken::Partial => TokenKind::Partial,
        RawToken::Mixin => TokenKind::Mixin,
        RawToken::Callback => TokenKind::Callback,
        RawToken::Dictionary => TokenKind::Dictionary,
        RawToken::Enum => TokenKind::Enum,
        RawToken::Typedef => TokenKind::Typedef,
        RawToken::Namespace => TokenKind::Namespace,
        RawToken::Includes => TokenKind::Includes,
        RawToken::Implements => TokenKind::Implements,

        // Members
        RawToken::Attribute => TokenKind::Attribute,
        RawToken::Readonly => TokenKind::Readonly,
        RawToken::Static => TokenKind::Static,
        RawToken::Const => TokenKind::Const,
        RawToken::Getter => TokenKind::Getter,
        RawToken::Setter => TokenKind::Setter,
        RawToken::Deleter => TokenKind::Deleter,
        RawToken::Creator => TokenKind::Creator,
        RawToken::Stringifier => TokenKind::Stringifier,
        RawToken::Inherit => TokenKind::Inherit,
        RawToken::Optional => TokenKind::Optional,
        RawToken::Required => TokenKind::Required,
        RawToken::Iterable => TokenKind::Iterable,
        RawToken::Maplike => TokenKind::Maplike,
        RawToken::Setlike => TokenKind::Setlike,
        RawToken::Constructor => TokenKind::Constructor,

        // Types
        RawToken::Any => TokenKind::Any,
        RawToken::Object => TokenKind::Object,
        RawToken::Void => TokenKind::Void,
        RawToken::Undefined => TokenKind::Undefined,
        RawToken::Boolean => TokenKind::Boolean,
        RawToken::Byte => TokenKind::Byte,
        RawToken::Octet => TokenKind::Octet,
        RawToken::Short => TokenKind::Short,
        RawToken::Long => TokenKind::Long,
        RawToken::Unsigned => TokenKind::Unsigned,
        RawToken::Unrestricted => TokenKind::Unrestricted,
        RawToken::FloatType => TokenKind::FloatType,
        RawToken::Double => TokenKind::Double,
        RawToken::DomString => TokenKind::DomString,
        RawToken::ByteString => TokenKind::ByteString,
        RawToken::UsvString => TokenKind::UsvString,
        RawToken::Sequence => TokenKind::Sequence,
        RawToken::Record => TokenKind::Record,
        RawToken::Promise => TokenKind::Promise,
        RawToken::FrozenArray => TokenKind::FrozenArray,
        RawToken::ObservableArray => TokenKind::ObservableArray,
        RawToken::Or => TokenKind::Or,

        // Values
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Infinity => TokenKind::Infinity,
        RawToken::NaN => TokenKind::NaN,

        // Punctuation
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Question => TokenKind::Question,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,

        // Trivia is filtered by the caller.
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Error(LexProblem::InvalidCharacter),
    }
}

/// Parse a decimal, hex (`0x`) or octal (leading `0`) integer literal with an
/// optional leading `-`. The magnitude must fit in a `u64`.
pub(crate) fn parse_integer(slice: &str) -> Option<i128> {
    let (negative, digits) = match slice.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, slice),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };
    let value = i128::from(magnitude);
    Some(if negative { -value } else { value })
}
