//! Special operation signatures and per-interface uniqueness.

use rustc_hash::FxHashMap;
use widl_diagnostic::IdlError;
use widl_ir::model::{Member, MemberId, MemberKind, Operation, Type};
use widl_ir::SpecialKind;

use crate::context::Context;
use crate::types::render;

/// How a getter, setter, creator or deleter addresses properties.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum Addressing {
    Indexed,
    Named,
}

impl Addressing {
    fn of(ty: &Type) -> Option<Self> {
        if ty.is_unsigned_integer() {
            Some(Addressing::Indexed)
        } else if ty.is_string() {
            Some(Addressing::Named)
        } else {
            None
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Addressing::Indexed => "indexed",
            Addressing::Named => "named",
        }
    }
}

pub(super) fn check_special_operations(ctx: &Context<'_>) -> Result<(), IdlError> {
    for iface in ctx.defs.interfaces() {
        let mut seen: FxHashMap<(SpecialKind, Addressing), MemberId> = FxHashMap::default();
        let mut stringifier: Option<MemberId> = None;

        for member in iface.own_members.iter().map(|&id| ctx.defs.member(id)) {
            let is_stringifier = match &member.kind {
                MemberKind::Operation(op) => {
                    let mut is_stringifier = false;
                    for &kind in &op.specials {
                        match check_signature(ctx, member, op, kind)? {
                            Some(addressing) => {
                                if let Some(prev) = seen.insert((kind, addressing), member.id) {
                                    return Err(IdlError::duplicate_member(
                                        format!(
                                            "`{}` has more than one {} {kind}",
                                            ctx.text(iface.name),
                                            addressing.as_str()
                                        ),
                                        member.loc,
                                    )
                                    .with_related(ctx.defs.member(prev).loc, "previous declaration"));
                                }
                            }
                            None => is_stringifier = true,
                        }
                    }
                    is_stringifier
                }
                MemberKind::Attribute(attr) if attr.stringifier => {
                    if !attr.ty.is_string() {
                        return Err(IdlError::special_operation(
                            format!(
                                "a stringifier attribute must have a string type, found `{}`",
                                render(ctx, &attr.ty)
                            ),
                            member.loc,
                        ));
                    }
                    true
                }
                MemberKind::Stringifier => true,
                _ => false,
            };

            if is_stringifier {
                if let Some(prev) = stringifier.replace(member.id) {
                    return Err(IdlError::duplicate_member(
                        format!("`{}` has more than one stringifier", ctx.text(iface.name)),
                        member.loc,
                    )
                    .with_related(ctx.defs.member(prev).loc, "previous stringifier"));
                }
            }
        }
    }
    Ok(())
}

/// Check one special kind on an operation. Returns the addressing mode
/// for property specials, `None` for stringifiers.
fn check_signature(
    ctx: &Context<'_>,
    member: &Member,
    op: &Operation,
    kind: SpecialKind,
) -> Result<Option<Addressing>, IdlError> {
    let fail = |message: String| Err(IdlError::special_operation(message, member.loc));

    if op.is_static {
        return fail(format!("a {kind} cannot be static"));
    }
    if kind == SpecialKind::Stringifier {
        if !op.args.is_empty() {
            return fail("a stringifier operation takes no arguments".to_owned());
        }
        if !op.return_type.is_string() {
            return fail(format!(
                "a stringifier operation must return a string type, found `{}`",
                render(ctx, &op.return_type)
            ));
        }
        return Ok(None);
    }

    let arity = match kind {
        SpecialKind::Setter | SpecialKind::Creator => 2,
        _ => 1,
    };
    let required = op.args.iter().all(|a| !a.optional && !a.variadic);
    if op.args.len() != arity || !required {
        let count = if arity == 1 { "one argument" } else { "two arguments" };
        return fail(format!(
            "a {kind} takes exactly {count}, none optional or variadic"
        ));
    }

    let key = &op.args[0].ty;
    let Some(addressing) = Addressing::of(key) else {
        return fail(format!(
            "the first argument of a {kind} must be an unsigned integer or string type, found `{}`",
            render(ctx, key)
        ));
    };

    match kind {
        SpecialKind::Getter if op.return_type.is_void() => {
            fail("a getter must return a value".to_owned())
        }
        SpecialKind::Deleter if !(op.return_type.is_boolean() || op.return_type.is_void()) => {
            fail(format!(
                "a deleter must return boolean, void or undefined, found `{}`",
                render(ctx, &op.return_type)
            ))
        }
        _ => Ok(Some(addressing)),
    }
}
