//! Final member lists and collision rules.

use rustc_hash::FxHashMap;
use widl_diagnostic::IdlError;
use widl_ir::model::{DeclId, Declaration, Definitions, InterfaceKind, MemberId, MemberKind};
use widl_ir::Name;

use super::ancestors;
use crate::context::Context;

/// Compute final member lists, parents before children.
pub(super) fn compute_member_lists(ctx: &mut Context<'_>) -> Result<(), IdlError> {
    let mut order: Vec<(usize, DeclId)> = ctx
        .defs
        .interfaces()
        .filter(|iface| iface.kind == InterfaceKind::Plain)
        .map(|iface| (ancestors(&ctx.defs, iface.id).count(), iface.id))
        .collect();
    order.sort_unstable();

    for (_, id) in order {
        let list = member_list(ctx, id)?;
        if let Declaration::Interface(iface) = &mut ctx.defs.declarations[id.index()] {
            iface.members = list;
        }
    }
    Ok(())
}

fn member_list(ctx: &Context<'_>, id: DeclId) -> Result<Vec<MemberId>, IdlError> {
    let defs = &ctx.defs;
    let Some(iface) = defs.interface(id) else {
        return Ok(Vec::new());
    };

    let mut level = iface.own_members.clone();
    for &c in &iface.consequential {
        if let Some(mixin) = defs.interface(c) {
            level.extend_from_slice(&mixin.own_members);
        }
    }
    check_level(ctx, id, &level)?;

    let Some(parent) = iface.parent.and_then(|p| defs.interface(p)) else {
        return Ok(level);
    };

    let mut list = level.clone();
    for &inherited_id in &parent.members {
        let inherited = defs.member(inherited_id);
        // Reached through both a parent and a consequential interface.
        if matches!(inherited.kind, MemberKind::Constructor { .. }) || level.contains(&inherited_id)
        {
            continue;
        }
        let Some(name) = inherited.name else {
            list.push(inherited_id);
            continue;
        };
        let mut shadowing = level
            .iter()
            .map(|&m| defs.member(m))
            .filter(|m| m.name == Some(name))
            .peekable();
        if shadowing.peek().is_none() {
            list.push(inherited_id);
            continue;
        }
        if inherited.unforgeable && (inherited.is_attribute() || inherited.is_operation()) {
            if let Some(bad) = shadowing.find(|m| !(m.is_static() || m.is_const())) {
                return Err(IdlError::duplicate_member(
                    format!(
                        "{} `{}` on `{}` shadows an unforgeable {} of `{}`",
                        bad.describe(),
                        ctx.text(name),
                        ctx.text(iface.name),
                        inherited.describe(),
                        ctx.text(defs.declaration(inherited.owner).name()),
                    ),
                    bad.loc,
                )
                .with_related(inherited.loc, "unforgeable member declared here")
                .with_note("only static members and constants may reuse this name"));
            }
        }
        tracing::trace!(name = ctx.text(name), "shadowed inherited member");
    }
    Ok(list)
}

/// Collision rules within one level: own plus consequential members.
fn check_level(ctx: &Context<'_>, id: DeclId, level: &[MemberId]) -> Result<(), IdlError> {
    let defs = &ctx.defs;
    let iface_name = ctx.text(defs.declaration(id).name());
    let mut first: FxHashMap<Name, MemberId> = FxHashMap::default();
    let mut collection: Option<MemberId> = None;

    for &member_id in level {
        let member = defs.member(member_id);
        if matches!(
            member.kind,
            MemberKind::Iterable { .. } | MemberKind::Maplike { .. } | MemberKind::Setlike { .. }
        ) {
            if let Some(prev) = collection {
                return Err(IdlError::duplicate_member(
                    format!(
                        "`{iface_name}` has more than one iterable, maplike or setlike declaration"
                    ),
                    member.loc,
                )
                .with_related(defs.member(prev).loc, "previous declaration"));
            }
            collection = Some(member_id);
        }

        let Some(name) = member.name else { continue };
        let Some(&prev_id) = first.get(&name) else {
            first.insert(name, member_id);
            continue;
        };
        let prev = defs.member(prev_id);

        if prev.owner != member.owner {
            return Err(IdlError::duplicate_member(
                format!(
                    "`{}` is declared by both `{}` and `{}`, which are merged into `{iface_name}`",
                    ctx.text(name),
                    ctx.text(defs.declaration(prev.owner).name()),
                    ctx.text(defs.declaration(member.owner).name()),
                ),
                member.loc,
            )
            .with_related(prev.loc, "first declared here"));
        }
        let overload =
            prev.is_operation() && member.is_operation() && prev.is_static() == member.is_static();
        if !overload {
            return Err(IdlError::duplicate_member(
                format!(
                    "`{}` is declared more than once on `{}`",
                    ctx.text(name),
                    ctx.text(defs.declaration(member.owner).name()),
                ),
                member.loc,
            )
            .with_related(prev.loc, "first declared here"));
        }
    }
    Ok(())
}

/// Dictionary member names are unique across the dictionary and its
/// ancestors.
pub(super) fn check_dictionaries(ctx: &Context<'_>) -> Result<(), IdlError> {
    let defs: &Definitions = &ctx.defs;
    for decl in &defs.declarations {
        let Declaration::Dictionary(dict) = decl else {
            continue;
        };
        let mut seen: FxHashMap<Name, &str> = FxHashMap::default();
        let mut chain: Vec<DeclId> = std::iter::once(dict.id).chain(ancestors(defs, dict.id)).collect();
        chain.reverse();
        for owner_id in chain {
            let Declaration::Dictionary(owner) = defs.declaration(owner_id) else {
                continue;
            };
            let owner_name = ctx.text(owner.name);
            for member in &owner.members {
                let Some(prev_owner) = seen.insert(member.name, owner_name) else {
                    continue;
                };
                let message = if prev_owner == owner_name {
                    format!(
                        "dictionary member `{}` is declared more than once in `{owner_name}`",
                        ctx.text(member.name)
                    )
                } else {
                    format!(
                        "dictionary member `{}` of `{owner_name}` is already declared by `{prev_owner}`",
                        ctx.text(member.name)
                    )
                };
                return Err(IdlError::duplicate_member(message, member.loc));
            }
        }
    }
    Ok(())
}
