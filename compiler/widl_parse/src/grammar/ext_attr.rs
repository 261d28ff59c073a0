//! Extended attribute lists.

use widl_diagnostic::IdlError;
use widl_ir::ast::{ExtAttr, ExtAttrValue};
use widl_ir::TokenKind;

use crate::{ErrorContext, Parser};

impl Parser<'_> {
    /// `[A, B=C, D=(E,F), G(args), H=I(args), J="s", K=*]`, or nothing.
    pub(crate) fn parse_ext_attrs(&mut self) -> Result<Vec<ExtAttr>, IdlError> {
        if !self.cursor.check(&TokenKind::LBracket) {
            return Ok(Vec::new());
        }
        self.in_error_context(ErrorContext::ExtendedAttributes, |p| {
            p.cursor.advance();
            let mut attrs = vec![p.parse_ext_attr()?];
            while p.cursor.eat(&TokenKind::Comma) {
                attrs.push(p.parse_ext_attr()?);
            }
            p.cursor.expect(&TokenKind::RBracket)?;
            Ok(attrs)
        })
    }

    fn parse_ext_attr(&mut self) -> Result<ExtAttr, IdlError> {
        let name = self.cursor.expect_ident()?;
        let start = name.loc.span;

        let value = if self.cursor.eat(&TokenKind::Eq) {
            match self.cursor.current_kind() {
                TokenKind::Star => {
                    self.cursor.advance();
                    ExtAttrValue::Wildcard
                }
                TokenKind::String(text) => {
                    self.cursor.advance();
                    ExtAttrValue::String(text)
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let mut names = vec![self.cursor.expect_ident()?.name];
                    while self.cursor.eat(&TokenKind::Comma) {
                        names.push(self.cursor.expect_ident()?.name);
                    }
                    self.cursor.expect(&TokenKind::RParen)?;
                    ExtAttrValue::IdentList(names)
                }
                TokenKind::Ident(_) => {
                    let ident = self.cursor.expect_ident()?;
                    if self.cursor.check(&TokenKind::LParen) {
                        ExtAttrValue::NamedArgList(ident.name, self.parse_argument_list()?)
                    } else {
                        ExtAttrValue::Ident(ident.name)
                    }
                }
                _ => return Err(self.cursor.unexpected("extended attribute value")),
            }
        } else if self.cursor.check(&TokenKind::LParen) {
            ExtAttrValue::ArgList(self.parse_argument_list()?)
        } else {
            ExtAttrValue::None
        };

        Ok(ExtAttr {
            name: name.name,
            value,
            loc: self.cursor.loc_from(start),
        })
    }
}
