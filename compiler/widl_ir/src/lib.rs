//! WIDL IR - shared data types for the WIDL front end.
//!
//! This crate contains:
//! - Spans, file ids and locations
//! - Interned names and the string interner
//! - Tokens and `TokenList` for lexer output
//! - The unresolved syntax tree ([`ast`]) produced per `parse` call
//! - The resolved declaration graph ([`model`]) produced by `finish`
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.
//! Types that contain strings use interned [`Name`] for O(1) equality.

pub mod ast;
mod interner;
pub mod model;
mod name;
mod primitive;
mod span;
mod token;

pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use primitive::{ConstValue, DefaultValue, PrimitiveKind, SpecialKind, StringKind};
pub use span::{FileId, Loc, Span, SpanError};
pub use token::{LexProblem, Token, TokenKind, TokenList};
