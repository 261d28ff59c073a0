//! Type parsing.
//!
//! Types nest without bound (`sequence<sequence<...>>`, nested unions), so
//! every recursive entry goes through `ensure_sufficient_stack`.

use widl_diagnostic::IdlError;
use widl_ir::ast::{TypeExpr, TypeExprKind};
use widl_ir::{PrimitiveKind, StringKind, TokenKind};
use widl_stack::ensure_sufficient_stack;

use crate::{ErrorContext, Parser};

impl Parser<'_> {
    /// Type with optional leading type-level extended attributes
    /// (`[Clamp] long`).
    pub(crate) fn parse_type_with_ext_attrs(&mut self) -> Result<TypeExpr, IdlError> {
        let ext_attrs = self.parse_ext_attrs()?;
        let mut ty = self.parse_type()?;
        if !ext_attrs.is_empty() {
            ty.ext_attrs = ext_attrs;
        }
        Ok(ty)
    }

    /// Operation and callback return types. `void` and `undefined` are
    /// ordinary types in this grammar.
    pub(crate) fn parse_return_type(&mut self) -> Result<TypeExpr, IdlError> {
        self.parse_type()
    }

    /// A type, including unions and a trailing `?`.
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, IdlError> {
        ensure_sufficient_stack(|| {
            self.in_error_context(ErrorContext::Type, |p| {
                let start = p.cursor.current_span();
                let inner = if p.cursor.check(&TokenKind::LParen) {
                    p.parse_union()?
                } else {
                    p.parse_single_type()?
                };
                if p.cursor.eat(&TokenKind::Question) {
                    let loc = p.cursor.loc_from(start);
                    Ok(TypeExpr::new(TypeExprKind::Nullable(Box::new(inner)), loc))
                } else {
                    Ok(inner)
                }
            })
        })
    }

    /// `(A or B or ...)`; at least two members.
    fn parse_union(&mut self) -> Result<TypeExpr, IdlError> {
        let start = self.cursor.current_span();
        self.cursor.expect(&TokenKind::LParen)?;
        let mut members = vec![self.parse_type_with_ext_attrs()?];
        while self.cursor.eat(&TokenKind::Or) {
            members.push(self.parse_type_with_ext_attrs()?);
        }
        if members.len() < 2 {
            return Err(self.cursor.unexpected("`or`"));
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(TypeExpr::new(
            TypeExprKind::Union(members),
            self.cursor.loc_from(start),
        ))
    }

    fn parse_single_type(&mut self) -> Result<TypeExpr, IdlError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Any => self.simple(TypeExprKind::Any),
            TokenKind::Object => self.simple(TypeExprKind::Object),
            TokenKind::Undefined => self.simple(TypeExprKind::Undefined),
            TokenKind::Void => self.simple(TypeExprKind::Void),
            TokenKind::Boolean => self.simple(TypeExprKind::Primitive(PrimitiveKind::Boolean)),
            TokenKind::Byte => self.simple(TypeExprKind::Primitive(PrimitiveKind::Byte)),
            TokenKind::Octet => self.simple(TypeExprKind::Primitive(PrimitiveKind::Octet)),
            TokenKind::DomString => self.simple(TypeExprKind::String(StringKind::DomString)),
            TokenKind::ByteString => self.simple(TypeExprKind::String(StringKind::ByteString)),
            TokenKind::UsvString => self.simple(TypeExprKind::String(StringKind::UsvString)),
            TokenKind::Unsigned | TokenKind::Short | TokenKind::Long => {
                TypeExprKind::Primitive(self.parse_integer_type()?)
            }
            TokenKind::Unrestricted | TokenKind::FloatType | TokenKind::Double => {
                TypeExprKind::Primitive(self.parse_float_type()?)
            }
            TokenKind::Sequence => {
                self.cursor.advance();
                TypeExprKind::Sequence(Box::new(self.parse_type_argument()?))
            }
            TokenKind::FrozenArray => {
                self.cursor.advance();
                TypeExprKind::FrozenArray(Box::new(self.parse_type_argument()?))
            }
            TokenKind::ObservableArray => {
                self.cursor.advance();
                TypeExprKind::ObservableArray(Box::new(self.parse_type_argument()?))
            }
            TokenKind::Promise => {
                self.cursor.advance();
                TypeExprKind::Promise(Box::new(self.parse_type_argument()?))
            }
            TokenKind::Record => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Lt)?;
                let key = self.parse_type_with_ext_attrs()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let value = self.parse_type_with_ext_attrs()?;
                self.cursor.expect(&TokenKind::Gt)?;
                TypeExprKind::Record(Box::new(key), Box::new(value))
            }
            TokenKind::Ident(name) => self.simple(TypeExprKind::Named(name)),
            _ => return Err(self.cursor.unexpected("type")),
        };
        Ok(TypeExpr::new(kind, self.cursor.loc_from(start)))
    }

    #[inline]
    fn simple(&mut self, kind: TypeExprKind) -> TypeExprKind {
        self.cursor.advance();
        kind
    }

    /// `<T>`
    fn parse_type_argument(&mut self) -> Result<TypeExpr, IdlError> {
        self.cursor.expect(&TokenKind::Lt)?;
        let ty = self.parse_type_with_ext_attrs()?;
        self.cursor.expect(&TokenKind::Gt)?;
        Ok(ty)
    }

    /// `unsigned? (short | long | long long)`
    fn parse_integer_type(&mut self) -> Result<PrimitiveKind, IdlError> {
        let unsigned = self.cursor.eat(&TokenKind::Unsigned);
        let kind = match self.cursor.current_kind() {
            TokenKind::Short => {
                self.cursor.advance();
                if unsigned {
                    PrimitiveKind::UnsignedShort
                } else {
                    PrimitiveKind::Short
                }
            }
            TokenKind::Long => {
                self.cursor.advance();
                let long_long = self.cursor.eat(&TokenKind::Long);
                match (unsigned, long_long) {
                    (false, false) => PrimitiveKind::Long,
                    (true, false) => PrimitiveKind::UnsignedLong,
                    (false, true) => PrimitiveKind::LongLong,
                    (true, true) => PrimitiveKind::UnsignedLongLong,
                }
            }
            _ => return Err(self.cursor.unexpected("`short` or `long`")),
        };
        Ok(kind)
    }

    /// `unrestricted? (float | double)`
    fn parse_float_type(&mut self) -> Result<PrimitiveKind, IdlError> {
        let unrestricted = self.cursor.eat(&TokenKind::Unrestricted);
        let kind = match (self.cursor.current_kind(), unrestricted) {
            (TokenKind::FloatType, false) => PrimitiveKind::Float,
            (TokenKind::FloatType, true) => PrimitiveKind::UnrestrictedFloat,
            (TokenKind::Double, false) => PrimitiveKind::Double,
            (TokenKind::Double, true) => PrimitiveKind::UnrestrictedDouble,
            _ => return Err(self.cursor.unexpected("`float` or `double`")),
        };
        self.cursor.advance();
        Ok(kind)
    }
}
