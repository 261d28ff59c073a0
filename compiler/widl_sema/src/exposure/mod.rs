//! Pass 5: global names and exposure sets.
//!
//! ```text
//! 5a: Globals     [Global] / [PrimaryGlobal] names, at most one primary
//! 5b: Interfaces  explicit [Exposed] or the default set; namespaces alike
//! 5c: Mixins      explicit, else the union of every including interface
//! 5d: Subsets     interface within parent, member within owner
//! ```

use widl_diagnostic::IdlError;
use widl_ir::ast::{ExtAttr, ExtAttrValue};
use widl_ir::model::{DeclId, Declaration, ExposureSet, InterfaceKind};
use widl_ir::{Name, StringInterner};

use crate::context::{next_decl_id, Context};
use crate::suggest::suggest_similar;
use crate::validate::find;

struct ExposureNames {
    exposed: Name,
    global: Name,
    primary_global: Name,
}

impl ExposureNames {
    fn new(interner: &StringInterner) -> Self {
        ExposureNames {
            exposed: interner.intern("Exposed"),
            global: interner.intern("Global"),
            primary_global: interner.intern("PrimaryGlobal"),
        }
    }
}

/// Global names known after 5a.
struct Globals {
    /// Every name declared through `[Global]` or `[PrimaryGlobal]`.
    declared: ExposureSet,
    /// Exposure for declarations without `[Exposed]`.
    default: ExposureSet,
    /// The configured default global, always accepted in `[Exposed]`.
    fallback: Name,
}

impl Globals {
    fn is_known(&self, name: Name) -> bool {
        name == self.fallback || self.declared.contains(name)
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn compute_exposure(ctx: &mut Context<'_>) -> Result<(), IdlError> {
    let names = ExposureNames::new(ctx.interner);
    let globals = collect_globals(ctx, &names)?;
    tracing::debug!(globals = globals.declared.len(), "globals collected");

    let count = ctx.defs.len();
    let mut sets: Vec<Option<ExposureSet>> = vec![None; count];

    // 5b
    for decl in &ctx.defs.declarations {
        let (attrs, kind) = match decl {
            Declaration::Interface(iface) => (&iface.ext_attrs, Some(iface.kind)),
            Declaration::Namespace(ns) => (&ns.ext_attrs, None),
            _ => continue,
        };
        let set = match find(attrs, names.exposed) {
            Some(attr) => Some(exposure_of(ctx, &globals, attr)?),
            None => match kind {
                Some(InterfaceKind::Mixin) => None,
                Some(InterfaceKind::Callback) => Some(ExposureSet::new()),
                Some(InterfaceKind::Plain) | None => Some(globals.default.clone()),
            },
        };
        sets[decl.id().index()] = set;
    }

    // 5c
    for index in 0..count {
        if sets[index].is_some() {
            continue;
        }
        let mixin = next_decl_id(index);
        let mut union = ExposureSet::new();
        let mut included = false;
        for target in ctx.defs.interfaces() {
            if target.consequential.contains(&mixin) {
                included = true;
                if let Some(set) = &sets[target.id.index()] {
                    union.extend(set.iter());
                }
            }
        }
        sets[index] = Some(if included { union } else { globals.default.clone() });
    }

    let sets: Vec<ExposureSet> = sets.into_iter().map(Option::unwrap_or_default).collect();

    // 5d
    for iface in ctx.defs.interfaces() {
        let Some(parent) = iface.parent else { continue };
        let own = &sets[iface.id.index()];
        let inherited = &sets[parent.index()];
        if let Some(missing) = own.difference(inherited).next() {
            return Err(IdlError::exposure_subset(
                format!(
                    "`{}` is exposed on `{}` but its parent `{}` is not",
                    ctx.text(iface.name),
                    ctx.text(missing),
                    ctx.text(ctx.defs.declaration(parent).name()),
                ),
                iface.loc,
            ));
        }
    }

    let mut member_sets = Vec::with_capacity(ctx.defs.members.len());
    for member in &ctx.defs.members {
        let owner = &sets[member.owner.index()];
        let set = match find(&member.ext_attrs, names.exposed) {
            Some(attr) => {
                let set = exposure_of(ctx, &globals, attr)?;
                if let Some(missing) = set.difference(owner).next() {
                    let owner_name = ctx.text(ctx.defs.declaration(member.owner).name());
                    return Err(IdlError::exposure_subset(
                        format!(
                            "{} is exposed on `{}` but `{owner_name}` is not",
                            member
                                .name
                                .map_or_else(|| member.describe().to_owned(), |n| format!("`{}`", ctx.text(n))),
                            ctx.text(missing),
                        ),
                        attr.loc,
                    ));
                }
                set
            }
            None => owner.clone(),
        };
        member_sets.push(set);
    }

    for (member, set) in ctx.defs.members.iter_mut().zip(member_sets) {
        member.exposure = set;
    }
    for (decl, set) in ctx.defs.declarations.iter_mut().zip(sets) {
        match decl {
            Declaration::Interface(iface) => iface.exposure = set,
            Declaration::Namespace(ns) => ns.exposure = set,
            _ => {}
        }
    }
    Ok(())
}

fn collect_globals(ctx: &mut Context<'_>, names: &ExposureNames) -> Result<Globals, IdlError> {
    let mut declared = ExposureSet::new();
    let mut primary: Option<(DeclId, Vec<Name>)> = None;
    let mut assigned: Vec<(DeclId, Vec<Name>, bool)> = Vec::new();

    for iface in ctx.defs.interfaces() {
        let global = find(&iface.ext_attrs, names.global);
        let primary_attr = find(&iface.ext_attrs, names.primary_global);
        let Some(first) = global.or(primary_attr) else {
            continue;
        };
        if iface.kind != InterfaceKind::Plain {
            return Err(IdlError::kind_mismatch(
                format!(
                    "{} `{}` cannot be a global",
                    if iface.is_mixin() { "interface mixin" } else { "callback interface" },
                    ctx.text(iface.name)
                ),
                first.loc,
            ));
        }

        let mut global_names: Vec<Name> = Vec::new();
        for attr in [global, primary_attr].into_iter().flatten() {
            for &name in attr.value.idents() {
                if !global_names.contains(&name) {
                    global_names.push(name);
                }
            }
        }
        if global_names.is_empty() {
            global_names.push(iface.name);
        }

        if let Some(attr) = primary_attr {
            if let Some((prev, _)) = &primary {
                return Err(IdlError::invalid_global_name(
                    format!(
                        "`{}` and `{}` are both marked [PrimaryGlobal]",
                        ctx.text(ctx.defs.declaration(*prev).name()),
                        ctx.text(iface.name)
                    ),
                    attr.loc,
                )
                .with_related(ctx.defs.declaration(*prev).loc(), "first primary global"));
            }
            primary = Some((iface.id, global_names.clone()));
        }

        declared.extend(global_names.iter().copied());
        assigned.push((iface.id, global_names, primary_attr.is_some()));
    }

    for (id, global_names, is_primary) in assigned {
        if let Declaration::Interface(iface) = &mut ctx.defs.declarations[id.index()] {
            iface.global_names = global_names;
            iface.is_primary_global = is_primary;
        }
    }

    let fallback = ctx.interner.intern(&ctx.config.default_global);
    let default = match primary {
        Some((_, names)) => names.into_iter().collect(),
        None => std::iter::once(fallback).collect(),
    };
    Ok(Globals {
        declared,
        default,
        fallback,
    })
}

/// Exposure named by one `[Exposed]` attribute.
fn exposure_of(ctx: &Context<'_>, globals: &Globals, attr: &ExtAttr) -> Result<ExposureSet, IdlError> {
    if matches!(attr.value, ExtAttrValue::Wildcard) {
        return Ok(if globals.declared.is_empty() {
            globals.default.clone()
        } else {
            globals.declared.clone()
        });
    }

    let mut set = ExposureSet::new();
    for &name in attr.value.idents() {
        if !globals.is_known(name) {
            let text = ctx.text(name);
            let known = globals
                .declared
                .iter()
                .chain(std::iter::once(globals.fallback))
                .map(|n| ctx.text(n));
            let err = IdlError::invalid_global_name(
                format!("`{text}` is not a declared global name"),
                attr.loc,
            );
            return Err(match suggest_similar(text, known) {
                Some(similar) => err.with_suggestion(format!("did you mean `{similar}`?")),
                None => err.with_note("declare it with [Global] on an interface"),
            });
        }
        set.insert(name);
    }
    Ok(set)
}
