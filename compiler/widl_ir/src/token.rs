//! Token types produced by the lexer.

use std::fmt;

use super::{Name, Span};

/// Why the lexer could not produce a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LexProblem {
    InvalidCharacter,
    UnterminatedString,
    UnterminatedComment,
    NumberOutOfRange,
}

impl LexProblem {
    pub fn message(self) -> &'static str {
        match self {
            LexProblem::InvalidCharacter => "invalid character",
            LexProblem::UnterminatedString => "unterminated string literal",
            LexProblem::UnterminatedComment => "unterminated block comment",
            LexProblem::NumberOutOfRange => "numeric literal out of range",
        }
    }
}

/// Token kinds.
///
/// Literal payloads are interned (`Name`) or stored as raw bits so the
/// whole enum stays `Copy + Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Ident(Name),
    Integer(i128),
    /// `f64` stored as bits.
    Float(u64),
    String(Name),

    // Declaration keywords
    Interface,
    Partial,
    Mixin,
    Callback,
    Dictionary,
    Enum,
    Typedef,
    Namespace,
    Includes,
    Implements,

    // Member keywords
    Attribute,
    Readonly,
    Static,
    Const,
    Getter,
    Setter,
    Deleter,
    Creator,
    Stringifier,
    Inherit,
    Optional,
    Required,
    Iterable,
    Maplike,
    Setlike,
    Constructor,

    // Type keywords
    Any,
    Object,
    Void,
    Undefined,
    Boolean,
    Byte,
    Octet,
    Short,
    Long,
    Unsigned,
    Unrestricted,
    FloatType,
    Double,
    DomString,
    ByteString,
    UsvString,
    Sequence,
    Record,
    Promise,
    FrozenArray,
    ObservableArray,
    Or,

    // Value keywords
    True,
    False,
    Null,
    Infinity,
    NaN,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Comma,
    Semicolon,
    Colon,
    Eq,
    Question,
    Ellipsis,
    Minus,
    Star,

    /// Input the lexer could not tokenize.
    Error(LexProblem),
    Eof,
}

impl TokenKind {
    /// Source text of a keyword token, if this is one.
    ///
    /// Used where the grammar accepts keywords as names (argument names,
    /// attribute names like `required`).
    pub fn keyword_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Interface => "interface",
            TokenKind::Partial => "partial",
            TokenKind::Mixin => "mixin",
            TokenKind::Callback => "callback",
            TokenKind::Dictionary => "dictionary",
            TokenKind::Enum => "enum",
            TokenKind::Typedef => "typedef",
            TokenKind::Namespace => "namespace",
            TokenKind::Includes => "includes",
            TokenKind::Implements => "implements",
            TokenKind::Attribute => "attribute",
            TokenKind::Readonly => "readonly",
            TokenKind::Static => "static",
            TokenKind::Const => "const",
            TokenKind::Getter => "getter",
            TokenKind::Setter => "setter",
            TokenKind::Deleter => "deleter",
            TokenKind::Creator => "creator",
            TokenKind::Stringifier => "stringifier",
            TokenKind::Inherit => "inherit",
            TokenKind::Optional => "optional",
            TokenKind::Required => "required",
            TokenKind::Iterable => "iterable",
            TokenKind::Maplike => "maplike",
            TokenKind::Setlike => "setlike",
            TokenKind::Constructor => "constructor",
            TokenKind::Any => "any",
            TokenKind::Object => "object",
            TokenKind::Void => "void",
            TokenKind::Undefined => "undefined",
            TokenKind::Boolean => "boolean",
            TokenKind::Byte => "byte",
            TokenKind::Octet => "octet",
            TokenKind::Short => "short",
            TokenKind::Long => "long",
            TokenKind::Unsigned => "unsigned",
            TokenKind::Unrestricted => "unrestricted",
            TokenKind::FloatType => "float",
            TokenKind::Double => "double",
            TokenKind::DomString => "DOMString",
            TokenKind::ByteString => "ByteString",
            TokenKind::UsvString => "USVString",
            TokenKind::Sequence => "sequence",
            TokenKind::Record => "record",
            TokenKind::Promise => "Promise",
            TokenKind::FrozenArray => "FrozenArray",
            TokenKind::ObservableArray => "ObservableArray",
            TokenKind::Or => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Infinity => "Infinity",
            TokenKind::NaN => "NaN",
            _ => return None,
        })
    }

    /// Short description for "expected X, found Y" messages.
    pub fn describe(&self) -> &'static str {
        if let Some(text) = self.keyword_text() {
            return text;
        }
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Integer(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::String(_) => "string literal",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Eq => "`=`",
            TokenKind::Question => "`?`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Error(problem) => problem.message(),
            TokenKind::Eof => "end of input",
            _ => "token",
        }
    }

    /// True if both kinds are the same variant, ignoring payloads.
    #[inline]
    pub fn same_variant(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Lexer output. The last token is always `Eof`.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
