//! Interface, mixin, namespace and dictionary members, and argument lists.

use widl_diagnostic::IdlError;
use widl_ir::ast::{ArgumentDef, DictionaryMemberDef, Ident, MemberDef, MemberDefKind};
use widl_ir::{SpecialKind, TokenKind};

use crate::{ErrorContext, Parser};

/// The body a member appears in. Each admits a different subset of the
/// member grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MemberContext {
    Interface,
    Mixin,
    CallbackInterface,
    Namespace,
}

impl MemberContext {
    fn description(self) -> &'static str {
        match self {
            MemberContext::Interface => "an interface",
            MemberContext::Mixin => "an interface mixin",
            MemberContext::CallbackInterface => "a callback interface",
            MemberContext::Namespace => "a namespace",
        }
    }

    /// Why `kind` may not appear here, if it may not.
    fn rejects(self, kind: &MemberDefKind) -> Option<&'static str> {
        let special = matches!(
            kind,
            MemberDefKind::Operation { specials, .. }
                if specials.iter().any(|s| *s != SpecialKind::Stringifier)
        );
        let stringifier = matches!(kind, MemberDefKind::Stringifier)
            || matches!(kind, MemberDefKind::Attribute { stringifier: true, .. })
            || matches!(kind, MemberDefKind::Operation { specials, .. } if specials.contains(&SpecialKind::Stringifier));
        let iterable_like = matches!(
            kind,
            MemberDefKind::Iterable { .. } | MemberDefKind::Maplike { .. } | MemberDefKind::Setlike { .. }
        );

        match self {
            MemberContext::Interface => None,
            _ if matches!(kind, MemberDefKind::Constructor { .. }) => Some("constructors"),
            _ if iterable_like => Some("iterable, maplike and setlike declarations"),
            _ if kind.is_static() => Some("static members"),
            _ if special => Some("special operations"),
            _ if matches!(kind, MemberDefKind::Attribute { inherit: true, .. }) => {
                Some("inherited attributes")
            }
            MemberContext::Mixin => None,
            _ if stringifier => Some("stringifiers"),
            MemberContext::Namespace
                if matches!(kind, MemberDefKind::Attribute { readonly: false, .. }) =>
            {
                Some("writable attributes")
            }
            _ => None,
        }
    }
}

impl Parser<'_> {
    /// `{ members };`
    pub(crate) fn parse_member_block(
        &mut self,
        context: MemberContext,
    ) -> Result<Vec<MemberDef>, IdlError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`}`"));
            }
            let member = self.in_error_context(ErrorContext::Member, |p| p.parse_member())?;
            if let Some(what) = context.rejects(&member.kind) {
                return Err(IdlError::syntax(
                    format!("{what} are not allowed in {}", context.description()),
                    member.loc,
                ));
            }
            members.push(member);
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(members)
    }

    /// One member, including its extended attributes and trailing `;`.
    fn parse_member(&mut self) -> Result<MemberDef, IdlError> {
        let ext_attrs = self.parse_ext_attrs()?;
        let start = self.cursor.current_span();

        let (name, kind) = match self.cursor.current_kind() {
            TokenKind::Const => {
                self.cursor.advance();
                let ty = self.parse_type()?;
                let name = self.cursor.expect_ident()?;
                self.cursor.expect(&TokenKind::Eq)?;
                let value = self.parse_const_value()?;
                (Some(name), MemberDefKind::Const { ty, value })
            }
            TokenKind::Constructor => {
                self.cursor.advance();
                let args = self.parse_argument_list()?;
                (None, MemberDefKind::Constructor { args })
            }
            TokenKind::Stringifier => {
                self.cursor.advance();
                match self.cursor.current_kind() {
                    TokenKind::Semicolon => (None, MemberDefKind::Stringifier),
                    TokenKind::Readonly | TokenKind::Attribute => {
                        self.parse_attribute_rest(false, true, false)?
                    }
                    _ => self.parse_operation_rest(vec![SpecialKind::Stringifier], false)?,
                }
            }
            TokenKind::Static => {
                self.cursor.advance();
                match self.cursor.current_kind() {
                    TokenKind::Readonly | TokenKind::Attribute => {
                        self.parse_attribute_rest(true, false, false)?
                    }
                    _ => {
                        let specials = self.parse_specials();
                        self.parse_operation_rest(specials, true)?
                    }
                }
            }
            TokenKind::Inherit => {
                self.cursor.advance();
                self.parse_attribute_rest(false, false, true)?
            }
            TokenKind::Readonly => match self.cursor.peek_kind_at(1) {
                TokenKind::Maplike | TokenKind::Setlike => {
                    self.cursor.advance();
                    (None, self.parse_collection_like(true)?)
                }
                _ => self.parse_attribute_rest(false, false, false)?,
            },
            TokenKind::Attribute => self.parse_attribute_rest(false, false, false)?,
            TokenKind::Iterable | TokenKind::Maplike | TokenKind::Setlike => {
                (None, self.parse_collection_like(false)?)
            }
            TokenKind::Getter | TokenKind::Setter | TokenKind::Deleter | TokenKind::Creator => {
                let specials = self.parse_specials();
                self.parse_operation_rest(specials, false)?
            }
            _ => self.parse_operation_rest(Vec::new(), false)?,
        };

        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(MemberDef {
            name,
            kind,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        })
    }

    /// `getter setter ...` prefix of a special operation.
    fn parse_specials(&mut self) -> Vec<SpecialKind> {
        let mut specials = Vec::new();
        loop {
            let special = match self.cursor.current_kind() {
                TokenKind::Getter => SpecialKind::Getter,
                TokenKind::Setter => SpecialKind::Setter,
                TokenKind::Deleter => SpecialKind::Deleter,
                TokenKind::Creator => SpecialKind::Creator,
                TokenKind::Stringifier => SpecialKind::Stringifier,
                _ => return specials,
            };
            self.cursor.advance();
            if !specials.contains(&special) {
                specials.push(special);
            }
        }
    }

    /// `(readonly)? attribute Type name`, after any `static`, `stringifier`
    /// or `inherit` prefix.
    fn parse_attribute_rest(
        &mut self,
        is_static: bool,
        stringifier: bool,
        inherit: bool,
    ) -> Result<(Option<Ident>, MemberDefKind), IdlError> {
        let readonly = self.cursor.eat(&TokenKind::Readonly);
        self.cursor.expect(&TokenKind::Attribute)?;
        let ty = self.parse_type_with_ext_attrs()?;
        let name = self.cursor.expect_name_or_keyword()?;
        Ok((
            Some(name),
            MemberDefKind::Attribute {
                ty,
                readonly,
                is_static,
                stringifier,
                inherit,
            },
        ))
    }

    /// `ReturnType name? (args)`.
    ///
    /// The name may only be omitted on special operations.
    fn parse_operation_rest(
        &mut self,
        specials: Vec<SpecialKind>,
        is_static: bool,
    ) -> Result<(Option<Ident>, MemberDefKind), IdlError> {
        let return_type = self.parse_return_type()?;
        let name = if self.cursor.check(&TokenKind::LParen) && !specials.is_empty() {
            None
        } else {
            Some(self.cursor.expect_name_or_keyword()?)
        };
        let args = self.parse_argument_list()?;
        Ok((
            name,
            MemberDefKind::Operation {
                return_type,
                args,
                specials,
                is_static,
            },
        ))
    }

    /// `iterable<V>`, `iterable<K, V>`, `maplike<K, V>`, `setlike<V>`, after
    /// any `readonly`.
    fn parse_collection_like(&mut self, readonly: bool) -> Result<MemberDefKind, IdlError> {
        let keyword = self.cursor.advance().kind;
        self.cursor.expect(&TokenKind::Lt)?;
        let first = self.parse_type_with_ext_attrs()?;
        let second = if self.cursor.eat(&TokenKind::Comma) {
            Some(self.parse_type_with_ext_attrs()?)
        } else {
            None
        };
        let close = self.cursor.current_loc();
        self.cursor.expect(&TokenKind::Gt)?;

        match (keyword, second) {
            (TokenKind::Iterable, None) => Ok(MemberDefKind::Iterable {
                key: None,
                value: first,
            }),
            (TokenKind::Iterable, Some(value)) => Ok(MemberDefKind::Iterable {
                key: Some(first),
                value,
            }),
            (TokenKind::Maplike, Some(value)) => Ok(MemberDefKind::Maplike {
                key: first,
                value,
                readonly,
            }),
            (TokenKind::Setlike, None) => Ok(MemberDefKind::Setlike {
                value: first,
                readonly,
            }),
            (TokenKind::Maplike, None) => Err(IdlError::syntax(
                "maplike declarations take a key and a value type",
                close,
            )),
            _ => Err(IdlError::syntax(
                "setlike declarations take exactly one type",
                close,
            )),
        }
    }

    /// `[attrs]? (required)? Type name (= default)?;`
    pub(crate) fn parse_dictionary_member(&mut self) -> Result<DictionaryMemberDef, IdlError> {
        let ext_attrs = self.parse_ext_attrs()?;
        let start = self.cursor.current_span();
        let required = self.cursor.eat(&TokenKind::Required);
        let ty = self.parse_type_with_ext_attrs()?;
        let name = self.cursor.expect_name_or_keyword()?;
        let default = if self.cursor.check(&TokenKind::Eq) {
            if required {
                return Err(self
                    .cursor
                    .error_here("required dictionary members cannot have a default value"));
            }
            self.cursor.advance();
            Some(self.parse_default_value()?)
        } else {
            None
        };
        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(DictionaryMemberDef {
            name,
            ty,
            required,
            default,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        })
    }

    /// `( args )`
    pub(crate) fn parse_argument_list(&mut self) -> Result<Vec<ArgumentDef>, IdlError> {
        self.in_error_context(ErrorContext::Arguments, |p| {
            p.cursor.expect(&TokenKind::LParen)?;
            let mut args = Vec::new();
            if !p.cursor.check(&TokenKind::RParen) {
                loop {
                    args.push(p.parse_argument()?);
                    if !p.cursor.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.cursor.expect(&TokenKind::RParen)?;
            Ok(args)
        })
    }

    /// `[attrs]? optional Type name (= default)?` or `[attrs]? Type ...? name`.
    fn parse_argument(&mut self) -> Result<ArgumentDef, IdlError> {
        let ext_attrs = self.parse_ext_attrs()?;
        let start = self.cursor.current_span();
        let optional = self.cursor.eat(&TokenKind::Optional);
        let ty = self.parse_type_with_ext_attrs()?;

        let variadic = if self.cursor.check(&TokenKind::Ellipsis) {
            if optional {
                return Err(self.cursor.error_here("variadic arguments cannot be optional"));
            }
            self.cursor.advance();
            true
        } else {
            false
        };

        let name = self.cursor.expect_name_or_keyword()?;
        let default = if self.cursor.check(&TokenKind::Eq) {
            if !optional {
                return Err(self
                    .cursor
                    .error_here("only optional arguments can have a default value"));
            }
            self.cursor.advance();
            Some(self.parse_default_value()?)
        } else {
            None
        };

        Ok(ArgumentDef {
            name,
            ty,
            optional,
            variadic,
            default,
            ext_attrs,
            loc: self.cursor.loc_from(start),
        })
    }
}
