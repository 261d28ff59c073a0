//! ObservableArray placement and backing slots.
//!
//! Nesting below the root is rejected during type resolution; this pass
//! rejects root-level ObservableArray types everywhere except plain
//! non-static interface attributes.

use widl_diagnostic::IdlError;
use widl_ir::model::{Argument, Declaration, MemberKind, Type};
use widl_ir::Loc;

use super::{find, AttrNames};
use crate::context::Context;

fn reject(place: &str, loc: Loc) -> IdlError {
    IdlError::type_constraint(
        format!("ObservableArray cannot be used as the type of {place}"),
        loc,
    )
    .with_note("ObservableArray is only valid as the type of a regular interface attribute")
}

fn check_args(args: &[Argument]) -> Result<(), IdlError> {
    match args.iter().find(|a| a.ty.is_observable_array()) {
        Some(arg) => Err(reject("an argument", arg.loc)),
        None => Ok(()),
    }
}

pub(super) fn check_placement(ctx: &Context<'_>, names: &AttrNames) -> Result<(), IdlError> {
    for decl in &ctx.defs.declarations {
        match decl {
            Declaration::Dictionary(dict) => {
                if let Some(m) = dict.members.iter().find(|m| m.ty.is_observable_array()) {
                    return Err(reject("a dictionary member", m.loc));
                }
            }
            Declaration::Callback(cb) => {
                if cb.return_type.is_observable_array() {
                    return Err(reject("a callback return value", cb.loc));
                }
                check_args(&cb.args)?;
            }
            Declaration::Interface(_)
            | Declaration::Namespace(_)
            | Declaration::Enum(_)
            | Declaration::Typedef(_) => {}
        }
    }

    for member in &ctx.defs.members {
        let owner = ctx.defs.declaration(member.owner);
        match &member.kind {
            MemberKind::Attribute(attr) if attr.ty.is_observable_array() => {
                if attr.is_static {
                    return Err(reject("a static attribute", member.loc));
                }
                match owner {
                    Declaration::Namespace(_) => {
                        return Err(reject("a namespace attribute", member.loc));
                    }
                    Declaration::Interface(iface)
                        if find(&iface.ext_attrs, names.js_implementation).is_some() =>
                    {
                        return Err(reject(
                            "an attribute of a [JSImplementation] interface",
                            member.loc,
                        ));
                    }
                    _ => {}
                }
            }
            MemberKind::Operation(op) => {
                if op.return_type.is_observable_array() {
                    return Err(reject("an operation return value", member.loc));
                }
                check_args(&op.args)?;
            }
            MemberKind::Constructor { args } => check_args(args)?,
            MemberKind::Iterable { key, value } => {
                let key = key.as_ref().is_some_and(Type::is_observable_array);
                if key || value.is_observable_array() {
                    return Err(reject("an iterable declaration", member.loc));
                }
            }
            MemberKind::Maplike { key, value, .. } => {
                if key.is_observable_array() || value.is_observable_array() {
                    return Err(reject("a maplike declaration", member.loc));
                }
            }
            MemberKind::Setlike { value, .. } => {
                if value.is_observable_array() {
                    return Err(reject("a setlike declaration", member.loc));
                }
            }
            MemberKind::Const(c) if c.ty.is_observable_array() => {
                return Err(reject("a constant", member.loc));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Number ObservableArray attributes per declaring interface, in
/// declaration order from 0.
pub(super) fn assign_slots(ctx: &mut Context<'_>) {
    let mut slots = Vec::new();
    for iface in ctx.defs.interfaces() {
        let mut next = 0u32;
        for &id in &iface.own_members {
            if let MemberKind::Attribute(attr) = &ctx.defs.member(id).kind {
                if attr.ty.is_observable_array() && !attr.is_static {
                    slots.push((id, next));
                    next += 1;
                }
            }
        }
    }
    tracing::trace!(count = slots.len(), "observable array slots");
    for (id, slot) in slots {
        if let MemberKind::Attribute(attr) = &mut ctx.defs.members[id.index()].kind {
            attr.slot = Some(slot);
        }
    }
}
