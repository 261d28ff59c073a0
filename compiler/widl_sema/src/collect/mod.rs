//! Pass 1: declaration collection and partial merge.
//!
//! Registers every non-partial declaration under its name, then folds
//! partials into their base in encounter order. Includes statements are
//! set aside for the graph pass.

use rustc_hash::FxHashSet;
use widl_diagnostic::IdlError;
use widl_ir::ast::{Definition, ExtAttr, Fragment, InterfaceDef, MemberDef};
use widl_ir::model::InterfaceKind;

use crate::context::{next_decl_id, Context, Source};

const EXPOSED: &str = "Exposed";

/// Collect declarations from all fragments and merge partials.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn collect(ctx: &mut Context<'_>, fragments: &[Fragment]) -> Result<(), IdlError> {
    let mut partials: Vec<&Definition> = Vec::new();

    for definition in fragments.iter().flat_map(|f| f.definitions.iter()) {
        let source = match definition {
            Definition::Interface(d) => Source::Interface(d.clone(), InterfaceKind::Plain),
            Definition::Mixin(d) => Source::Interface(d.clone(), InterfaceKind::Mixin),
            Definition::CallbackInterface(d) => {
                Source::Interface(d.clone(), InterfaceKind::Callback)
            }
            Definition::Dictionary(d) => Source::Dictionary(d.clone()),
            Definition::Namespace(d) => Source::Namespace(d.clone()),
            Definition::Enum(d) => Source::Enum(d.clone()),
            Definition::Typedef(d) => Source::Typedef(d.clone()),
            Definition::Callback(d) => Source::Callback(d.clone()),
            Definition::Includes(d) => {
                ctx.includes.push(d.clone());
                continue;
            }
            Definition::PartialInterface(_)
            | Definition::PartialMixin(_)
            | Definition::PartialDictionary(_)
            | Definition::PartialNamespace(_) => {
                partials.push(definition);
                continue;
            }
        };
        register(ctx, definition, source)?;
    }

    for partial in partials {
        merge_partial(ctx, partial)?;
    }

    for source in &ctx.sources {
        if let Source::Enum(def) = source {
            let mut seen = FxHashSet::default();
            for value in &def.values {
                if !seen.insert(value.name) {
                    return Err(IdlError::duplicate_member(
                        format!(
                            "enum `{}` lists the value \"{}\" more than once",
                            ctx.text(def.name.name),
                            ctx.text(value.name)
                        ),
                        value.loc,
                    ));
                }
            }
        }
    }

    tracing::debug!(declarations = ctx.sources.len(), includes = ctx.includes.len());
    Ok(())
}

fn register(ctx: &mut Context<'_>, definition: &Definition, source: Source) -> Result<(), IdlError> {
    let ident = definition.name();
    if let Some(prev) = ctx.lookup(ident.name) {
        let prev_loc = ctx.source(prev).loc();
        return Err(IdlError::duplicate_definition(
            format!("`{}` is defined more than once", ctx.text(ident.name)),
            ident.loc,
        )
        .with_related(prev_loc, "first defined here"));
    }
    let id = next_decl_id(ctx.sources.len());
    ctx.by_name.insert(ident.name, id);
    ctx.sources.push(source);
    Ok(())
}

fn merge_partial(ctx: &mut Context<'_>, partial: &Definition) -> Result<(), IdlError> {
    let ident = partial.name();
    let Some(base_id) = ctx.lookup(ident.name) else {
        return Err(IdlError::reference(
            format!(
                "{} `{}` has no matching declaration",
                partial.describe(),
                ctx.text(ident.name)
            ),
            ident.loc,
        ));
    };

    let name = ctx.text(ident.name);
    let exposed = ctx.interner.intern(EXPOSED);
    let base = &mut ctx.sources[base_id.index()];
    match (partial, base) {
        (Definition::PartialInterface(p), Source::Interface(b, InterfaceKind::Plain))
        | (Definition::PartialMixin(p), Source::Interface(b, InterfaceKind::Mixin)) => {
            merge_interface(b, p, exposed);
            Ok(())
        }
        (Definition::PartialDictionary(p), Source::Dictionary(b)) => {
            b.members.extend(p.members.iter().cloned());
            b.ext_attrs.extend(p.ext_attrs.iter().cloned());
            Ok(())
        }
        (Definition::PartialNamespace(p), Source::Namespace(b)) => {
            merge_members(&mut b.members, &p.members, &p.ext_attrs, exposed);
            b.ext_attrs
                .extend(p.ext_attrs.iter().filter(|a| a.name != exposed).cloned());
            Ok(())
        }
        (_, base) => {
            let base_loc = base.loc();
            let base_kind = base.describe();
            Err(IdlError::kind_mismatch(
                format!(
                    "{} `{name}` does not match its base, which is a {base_kind}",
                    partial.describe(),
                ),
                ident.loc,
            )
            .with_related(base_loc, "base declared here"))
        }
    }
}

fn merge_interface(base: &mut InterfaceDef, partial: &InterfaceDef, exposed: widl_ir::Name) {
    merge_members(&mut base.members, &partial.members, &partial.ext_attrs, exposed);
    base.ext_attrs.extend(
        partial
            .ext_attrs
            .iter()
            .filter(|a| a.name != exposed)
            .cloned(),
    );
}

/// Append a partial's members, pushing its `[Exposed]` down onto members
/// that carry none of their own.
fn merge_members(
    into: &mut Vec<MemberDef>,
    members: &[MemberDef],
    partial_attrs: &[ExtAttr],
    exposed: widl_ir::Name,
) {
    let partial_exposed = partial_attrs.iter().find(|a| a.name == exposed);
    into.extend(members.iter().map(|member| {
        let mut member = member.clone();
        if let Some(attr) = partial_exposed {
            if !member.ext_attrs.iter().any(|a| a.name == exposed) {
                member.ext_attrs.push(attr.clone());
            }
        }
        member
    }));
}

#[cfg(test)]
mod tests;
