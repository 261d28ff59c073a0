//! Grammar productions.
//!
//! Each module extends [`Parser`](crate::Parser) with the productions for one
//! area of the language.

mod definition;
mod ext_attr;
mod literal;
mod member;
mod ty;

pub(crate) use member::MemberContext;
