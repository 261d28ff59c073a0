//! Top-level definitions.

use widl_diagnostic::IdlError;
use widl_ir::ast::{
    CallbackDef, Definition, DictionaryDef, EnumDef, ExtAttr, Ident, IncludesDef, InterfaceDef,
    NamespaceDef, TypedefDef,
};
use widl_ir::{Span, TokenKind};

use super::MemberContext;
use crate::{ErrorContext, Parser};

/// Which flavor of interface body is being parsed.
#[derive(Copy, Clone, PartialEq, Eq)]
enum InterfaceFlavor {
    Interface,
    Mixin,
    Callback,
}

impl Parser<'_> {
    /// Parse one definition, including its leading extended attributes.
    pub(crate) fn parse_definition(&mut self) -> Result<Definition, IdlError> {
        let ext_attrs = self.parse_ext_attrs()?;
        let start = self.cursor.current_span();

        match self.cursor.current_kind() {
            TokenKind::Callback => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::Interface) {
                    self.in_error_context(ErrorContext::CallbackInterface, |p| {
                        p.parse_interface_rest(start, ext_attrs, InterfaceFlavor::Callback, false)
                            .map(Definition::CallbackInterface)
                    })
                } else {
                    self.in_error_context(ErrorContext::Callback, |p| {
                        p.parse_callback_rest(start, ext_attrs)
                    })
                }
            }
            TokenKind::Interface => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::Mixin) {
                    self.in_error_context(ErrorContext::Mixin, |p| {
                        p.parse_interface_rest(start, ext_attrs, InterfaceFlavor::Mixin, false)
                            .map(Definition::Mixin)
                    })
                } else {
                    self.in_error_context(ErrorContext::Interface, |p| {
                        p.parse_interface_rest(start, ext_attrs, InterfaceFlavor::Interface, false)
                            .map(Definition::Interface)
                    })
                }
            }
            TokenKind::Partial => {
                self.cursor.advance();
                self.parse_partial_rest(start, ext_attrs)
            }
            TokenKind::Dictionary => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::Dictionary, |p| {
                    p.parse_dictionary_rest(start, ext_attrs)
                        .map(Definition::Dictionary)
                })
            }
            TokenKind::Enum => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::Enum, |p| p.parse_enum_rest(start, ext_attrs))
            }
            TokenKind::Typedef => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::Typedef, |p| {
                    p.parse_typedef_rest(start, ext_attrs)
                })
            }
            TokenKind::Namespace => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::Namespace, |p| {
                    p.parse_namespace_rest(start, ext_attrs)
                        .map(Definition::Namespace)
                })
            }
            TokenKind::Ident(_) => self.in_error_context(ErrorContext::Includes, |p| {
                p.parse_includes(start, ext_attrs)
            }),
            _ => Err(self.cursor.unexpected("a definition")),
        }
    }

    /// After `partial`.
    fn parse_partial_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<Definition, IdlError> {
        match self.cursor.current_kind() {
            TokenKind::Interface => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::Mixin) {
                    self.in_error_context(ErrorContext::Mixin, |p| {
                        p.parse_interface_rest(start, ext_attrs, InterfaceFlavor::Mixin, true)
                            .map(Definition::PartialMixin)
                    })
                } else {
                    self.in_error_context(ErrorContext::Interface, |p| {
                        p.parse_interface_rest(start, ext_attrs, InterfaceFlavor::Interface, true)
                            .map(Definition::PartialInterface)
                    })
                }
            }
            TokenKind::Dictionary => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::Dictionary, |p| {
                    p.parse_dictionary_rest(start, ext_attrs)
                        .map(Definition::PartialDictionary)
                })
            }
            TokenKind::Namespace => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::Namespace, |p| {
                    p.parse_namespace_rest(start, ext_attrs)
                        .map(Definition::PartialNamespace)
                })
            }
            _ => Err(self
                .cursor
                .unexpected("`interface`, `dictionary` or `namespace` after `partial`")),
        }
    }

    /// `Name (: Parent)? { members };`, after the introducing keywords.
    ///
    /// Partials, mixins and callback interfaces take no parent.
    fn parse_interface_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
        flavor: InterfaceFlavor,
        partial: bool,
    ) -> Result<InterfaceDef, IdlError> {
        let name = self.cursor.expect_ident()?;
        let parent = if self.cursor.check(&TokenKind::Colon) {
            if partial || flavor != InterfaceFlavor::Interface {
                return Err(self.cursor.error_here(format!(
                    "{} cannot inherit",
                    match (partial, flavor) {
                        (true, _) => "a partial declaration",
                        (false, InterfaceFlavor::Mixin) => "an interface mixin",
                        _ => "a callback interface",
                    }
                )));
            }
            self.cursor.advance();
            Some(self.cursor.expect_ident()?)
        } else {
            None
        };

        let context = match flavor {
            InterfaceFlavor::Interface => MemberContext::Interface,
            InterfaceFlavor::Mixin => MemberContext::Mixin,
            InterfaceFlavor::Callback => MemberContext::CallbackInterface,
        };
        let members = self.parse_member_block(context)?;

        Ok(InterfaceDef {
            name,
            parent,
            members,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        })
    }

    fn parse_namespace_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<NamespaceDef, IdlError> {
        let name = self.cursor.expect_ident()?;
        let members = self.parse_member_block(MemberContext::Namespace)?;
        Ok(NamespaceDef {
            name,
            members,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        })
    }

    fn parse_dictionary_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<DictionaryDef, IdlError> {
        let name = self.cursor.expect_ident()?;
        let parent = if self.cursor.eat(&TokenKind::Colon) {
            Some(self.cursor.expect_ident()?)
        } else {
            None
        };

        self.cursor.expect(&TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`}`"));
            }
            members.push(self.in_error_context(ErrorContext::DictionaryMember, |p| {
                p.parse_dictionary_member()
            })?);
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        self.cursor.expect(&TokenKind::Semicolon)?;

        Ok(DictionaryDef {
            name,
            parent,
            members,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        })
    }

    /// `enum Name { "a", "b" };` with an optional trailing comma.
    fn parse_enum_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<Definition, IdlError> {
        let name = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::LBrace)?;

        let mut values = Vec::new();
        loop {
            let TokenKind::String(value) = self.cursor.current_kind() else {
                return Err(self.cursor.unexpected("string literal"));
            };
            let token = self.cursor.advance();
            values.push(Ident {
                name: value,
                loc: self.cursor.loc_from(token.span),
            });
            if !self.cursor.eat(&TokenKind::Comma) || self.cursor.check(&TokenKind::RBrace) {
                break;
            }
        }

        self.cursor.expect(&TokenKind::RBrace)?;
        self.cursor.expect(&TokenKind::Semicolon)?;

        Ok(Definition::Enum(EnumDef {
            name,
            values,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        }))
    }

    /// `typedef [attrs]? Type Name;`
    fn parse_typedef_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<Definition, IdlError> {
        let ty = self.parse_type_with_ext_attrs()?;
        let name = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(Definition::Typedef(TypedefDef {
            name,
            ty,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        }))
    }

    /// `callback Name = ReturnType (args);`
    fn parse_callback_rest(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<Definition, IdlError> {
        let name = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Eq)?;
        let return_type = self.parse_return_type()?;
        let args = self.parse_argument_list()?;
        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(Definition::Callback(CallbackDef {
            name,
            return_type,
            args,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        }))
    }

    /// `Target includes Mixin;` or `Target implements Mixin;`.
    fn parse_includes(
        &mut self,
        start: Span,
        ext_attrs: Vec<ExtAttr>,
    ) -> Result<Definition, IdlError> {
        let target = self.cursor.expect_ident()?;
        let legacy = match self.cursor.current_kind() {
            TokenKind::Includes => false,
            TokenKind::Implements if self.options.allow_implements => true,
            TokenKind::Implements => {
                return Err(self
                    .cursor
                    .error_here("legacy `implements` statements are disabled; use `includes`"));
            }
            _ => return Err(self.cursor.unexpected("`includes`")),
        };
        self.cursor.advance();
        let mixin = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(Definition::Includes(IncludesDef {
            target,
            mixin,
            legacy,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        }))
    }
}
