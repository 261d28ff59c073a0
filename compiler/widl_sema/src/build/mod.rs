//! Pass 2: lower merged declarations into the resolved model.
//!
//! Every declaration keeps its `DeclId` from collection; members go into
//! one arena in declaration order. Parents, consequential sets, final
//! member lists and exposure are filled in by later passes.

use widl_diagnostic::IdlError;
use widl_ir::ast::{ArgumentDef, ExtAttr, MemberDef, MemberDefKind};
use widl_ir::model::{
    Argument, Attribute, Callback, Const, DeclId, Declaration, Definitions, Dictionary,
    DictionaryMember, Enumeration, ExposureSet, Interface, Member, MemberId, MemberKind,
    Namespace, Operation, Typedef,
};
use widl_ir::{Name, StringInterner};

use crate::context::{next_decl_id, Context, Source};
use crate::types::{check_const, resolve_typedefs, Resolver};

/// Interned names of the attributes that mark a member unforgeable.
struct UnforgeableNames([Name; 2]);

impl UnforgeableNames {
    fn new(interner: &StringInterner) -> Self {
        UnforgeableNames([
            interner.intern("Unforgeable"),
            interner.intern("LegacyUnforgeable"),
        ])
    }

    fn any(&self, attrs: &[ExtAttr]) -> bool {
        attrs.iter().any(|a| self.0.contains(&a.name))
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn build(ctx: &mut Context<'_>) -> Result<(), IdlError> {
    let defs = {
        let mut resolver = Resolver::new(ctx);
        resolve_typedefs(&mut resolver)?;

        let mut lower = Lower {
            resolver,
            members: Vec::new(),
            unforgeable: UnforgeableNames::new(ctx.interner),
        };
        let mut declarations = Vec::with_capacity(ctx.sources.len());
        for (index, source) in ctx.sources.iter().enumerate() {
            declarations.push(lower.declaration(next_decl_id(index), source)?);
        }
        Definitions {
            declarations,
            members: lower.members,
        }
    };

    tracing::debug!(
        declarations = defs.declarations.len(),
        members = defs.members.len(),
        "lowered"
    );
    ctx.defs = defs;
    Ok(())
}

struct Lower<'c> {
    resolver: Resolver<'c>,
    members: Vec<Member>,
    unforgeable: UnforgeableNames,
}

impl Lower<'_> {
    fn declaration(&mut self, id: DeclId, source: &Source) -> Result<Declaration, IdlError> {
        Ok(match source {
            Source::Interface(def, kind) => {
                let forced = self.unforgeable.any(&def.ext_attrs);
                let own = self.members(id, &def.members, forced)?;
                Declaration::Interface(Interface {
                    id,
                    name: def.name.name,
                    kind: *kind,
                    parent: None,
                    members: own.clone(),
                    own_members: own,
                    consequential: Vec::new(),
                    ext_attrs: def.ext_attrs.clone(),
                    global_names: Vec::new(),
                    is_primary_global: false,
                    exposure: ExposureSet::new(),
                    loc: def.loc,
                })
            }
            Source::Namespace(def) => Declaration::Namespace(Namespace {
                id,
                name: def.name.name,
                members: self.members(id, &def.members, false)?,
                ext_attrs: def.ext_attrs.clone(),
                exposure: ExposureSet::new(),
                loc: def.loc,
            }),
            Source::Dictionary(def) => {
                let mut members = Vec::with_capacity(def.members.len());
                for m in &def.members {
                    members.push(DictionaryMember {
                        name: m.name.name,
                        ty: self.resolver.resolve(&m.ty)?,
                        required: m.required,
                        default: m.default,
                        ext_attrs: m.ext_attrs.clone(),
                        loc: m.loc,
                    });
                }
                Declaration::Dictionary(Dictionary {
                    id,
                    name: def.name.name,
                    parent: None,
                    members,
                    ext_attrs: def.ext_attrs.clone(),
                    loc: def.loc,
                })
            }
            Source::Enum(def) => Declaration::Enum(Enumeration {
                id,
                name: def.name.name,
                values: def.values.iter().map(|v| v.name).collect(),
                ext_attrs: def.ext_attrs.clone(),
                loc: def.loc,
            }),
            Source::Typedef(def) => Declaration::Typedef(Typedef {
                id,
                name: def.name.name,
                ty: self.resolver.typedef(id, def.name.loc)?,
                ext_attrs: def.ext_attrs.clone(),
                loc: def.loc,
            }),
            Source::Callback(def) => Declaration::Callback(Callback {
                id,
                name: def.name.name,
                return_type: self.resolver.resolve(&def.return_type)?,
                args: self.arguments(&def.args)?,
                ext_attrs: def.ext_attrs.clone(),
                loc: def.loc,
            }),
        })
    }

    /// Lower a member block. `forced_unforgeable` comes from an
    /// interface-level `[Unforgeable]`.
    fn members(
        &mut self,
        owner: DeclId,
        defs: &[MemberDef],
        forced_unforgeable: bool,
    ) -> Result<Vec<MemberId>, IdlError> {
        let mut ids = Vec::with_capacity(defs.len());
        for def in defs {
            let kind = self.member_kind(def)?;
            let is_forgeable_kind = matches!(
                kind,
                MemberKind::Attribute(_) | MemberKind::Operation(_)
            );
            let unforgeable = self.unforgeable.any(&def.ext_attrs)
                || (forced_unforgeable && is_forgeable_kind && !def.kind.is_static());
            let id = MemberId::from_raw(u32::try_from(self.members.len()).unwrap_or(u32::MAX));
            self.members.push(Member {
                id,
                owner,
                name: def.name.map(|n| n.name),
                kind,
                ext_attrs: def.ext_attrs.clone(),
                exposure: ExposureSet::new(),
                unforgeable,
                loc: def.loc,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    fn member_kind(&mut self, def: &MemberDef) -> Result<MemberKind, IdlError> {
        Ok(match &def.kind {
            MemberDefKind::Attribute {
                ty,
                readonly,
                is_static,
                stringifier,
                inherit,
            } => MemberKind::Attribute(Attribute {
                ty: self.resolver.resolve(ty)?,
                readonly: *readonly,
                is_static: *is_static,
                stringifier: *stringifier,
                inherit: *inherit,
                slot: None,
            }),
            MemberDefKind::Operation {
                return_type,
                args,
                specials,
                is_static,
            } => MemberKind::Operation(Operation {
                return_type: self.resolver.resolve(return_type)?,
                args: self.arguments(args)?,
                specials: specials.clone(),
                is_static: *is_static,
            }),
            MemberDefKind::Constructor { args } => MemberKind::Constructor {
                args: self.arguments(args)?,
            },
            MemberDefKind::Const { ty, value } => {
                let resolved = self.resolver.resolve(ty)?;
                check_const(&resolved, *value, def.loc)?;
                MemberKind::Const(Const {
                    ty: resolved,
                    value: *value,
                })
            }
            MemberDefKind::Iterable { key, value } => MemberKind::Iterable {
                key: key.as_ref().map(|k| self.resolver.resolve(k)).transpose()?,
                value: self.resolver.resolve(value)?,
            },
            MemberDefKind::Maplike {
                key,
                value,
                readonly,
            } => MemberKind::Maplike {
                key: self.resolver.resolve(key)?,
                value: self.resolver.resolve(value)?,
                readonly: *readonly,
            },
            MemberDefKind::Setlike { value, readonly } => MemberKind::Setlike {
                value: self.resolver.resolve(value)?,
                readonly: *readonly,
            },
            MemberDefKind::Stringifier => MemberKind::Stringifier,
        })
    }

    fn arguments(&mut self, defs: &[ArgumentDef]) -> Result<Vec<Argument>, IdlError> {
        defs.iter()
            .map(|arg| {
                Ok(Argument {
                    name: arg.name.name,
                    ty: self.resolver.resolve(&arg.ty)?,
                    optional: arg.optional,
                    variadic: arg.variadic,
                    default: arg.default,
                    ext_attrs: arg.ext_attrs.clone(),
                    loc: arg.loc,
                })
            })
            .collect()
    }
}
