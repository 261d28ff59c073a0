//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! string interning and numeric conversion.

use logos::Logos;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Declarations
    #[token("interface")]
    Interface,
    #[token("partial")]
    Partial,
    #[token("mixin")]
    Mixin,
    #[token("callback")]
    Callback,
    #[token("dictionary")]
    Dictionary,
    #[token("enum")]
    Enum,
    #[token("typedef")]
    Typedef,
    #[token("namespace")]
    Namespace,
    #[token("includes")]
    Includes,
    #[token("implements")]
    Implements,

    // Members
    #[token("attribute")]
    Attribute,
    #[token("readonly")]
    Readonly,
    #[token("static")]
    Static,
    #[token("const")]
    Const,
    #[token("getter")]
    Getter,
    #[token("setter")]
    Setter,
    #[token("deleter")]
    Deleter,
    #[token("creator")]
    Creator,
    #[token("stringifier")]
    Stringifier,
    #[token("inherit")]
    Inherit,
    #[token("optional")]
    Optional,
    #[token("required")]
    Required,
    #[token("iterable")]
    Iterable,
    #[token("maplike")]
    Maplike,
    #[token("setlike")]
    Setlike,
    #[token("constructor")]
    Constructor,

    // Types
    #[token("any")]
    Any,
    #[token("object")]
    Object,
    #[token("void")]
    Void,
    #[token("undefined")]
    Undefined,
    #[token("boolean")]
    Boolean,
    #[token("byte")]
    Byte,
    #[token("octet")]
    Octet,
    #[token("short")]
    Short,
    #[token("long")]
    Long,
    #[token("unsigned")]
    Unsigned,
    #[token("unrestricted")]
    Unrestricted,
    #[token("float")]
    FloatType,
    #[token("double")]
    Double,
    #[token("DOMString")]
    DomString,
    #[token("ByteString")]
    ByteString,
    #[token("USVString")]
    UsvString,
    #[token("sequence")]
    Sequence,
    #[token("record")]
    Record,
    #[token("Promise")]
    Promise,
    #[token("FrozenArray")]
    FrozenArray,
    #[token("ObservableArray")]
    ObservableArray,
    #[token("or")]
    Or,

    // Values
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("Infinity")]
    Infinity,
    #[token("NaN")]
    NaN,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("...")]
    Ellipsis,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,

    // Literals. Numbers are parsed in `convert` so overflow can be reported
    // as its own problem instead of a generic lex error.
    #[regex(r"-?(0[xX][0-9a-fA-F]+|[1-9][0-9]*|0[0-7]*)")]
    Integer,

    #[regex(r"-?(([0-9]+\.[0-9]*|[0-9]*\.[0-9]+)([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)")]
    Float,

    #[regex(r#""[^"]*""#)]
    String,

    /// A leading `_` escapes keywords and is not part of the name.
    #[regex(r"_?[A-Za-z][0-9A-Z_a-z-]*")]
    Ident,
}
