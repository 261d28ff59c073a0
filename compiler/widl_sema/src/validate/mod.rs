//! Pass 4: validation.
//!
//! Runs after the graph is built, so member kinds, resolved types and
//! owners are all known.
//!
//! ```text
//! 4a: Table       every extended attribute against the recognized table
//! 4b: Contextual  attribute combinations that depend on the annotated node
//! 4c: Special     getter/setter/deleter/creator/stringifier signatures
//! 4d: Observable  ObservableArray placement and slot numbering
//! ```

mod observable;
mod special;

use widl_diagnostic::IdlError;
use widl_ir::ast::{
    ArgumentDef, ExtAttr, ExtAttrValue, MemberDef, MemberDefKind, TypeExpr, TypeExprKind,
};
use widl_ir::model::{Member, MemberKind, Type};
use widl_ir::{Name, StringInterner};
use widl_stack::ensure_sufficient_stack;

use crate::attrs::{self, Positions};
use crate::context::{Context, Source};

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn validate(ctx: &mut Context<'_>) -> Result<(), IdlError> {
    let names = AttrNames::new(ctx.interner);
    check_table(ctx, &names)?;
    for member in &ctx.defs.members {
        check_member_attrs(ctx, &names, member)?;
    }
    special::check_special_operations(ctx)?;
    observable::check_placement(ctx, &names)?;
    observable::assign_slots(ctx);
    Ok(())
}

/// Interned names of attributes with contextual rules.
pub(crate) struct AttrNames {
    cached: Name,
    clamp: Name,
    enforce_range: Name,
    js_implementation: Name,
    legacy_unforgeable: Name,
    put_forwards: Name,
    replaceable: Name,
    same_object: Name,
    setter_throws: Name,
    store_in_slot: Name,
    unforgeable: Name,
}

impl AttrNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        AttrNames {
            cached: interner.intern("Cached"),
            clamp: interner.intern("Clamp"),
            enforce_range: interner.intern("EnforceRange"),
            js_implementation: interner.intern("JSImplementation"),
            legacy_unforgeable: interner.intern("LegacyUnforgeable"),
            put_forwards: interner.intern("PutForwards"),
            replaceable: interner.intern("Replaceable"),
            same_object: interner.intern("SameObject"),
            setter_throws: interner.intern("SetterThrows"),
            store_in_slot: interner.intern("StoreInSlot"),
            unforgeable: interner.intern("Unforgeable"),
        }
    }
}

pub(crate) fn find(attrs: &[ExtAttr], name: Name) -> Option<&ExtAttr> {
    attrs.iter().find(|a| a.name == name)
}

// === 4a: table ===

fn check_table(ctx: &Context<'_>, names: &AttrNames) -> Result<(), IdlError> {
    let walker = Walker {
        interner: ctx.interner,
        names,
    };
    for source in &ctx.sources {
        match source {
            Source::Interface(def, _) => {
                walker.attrs(&def.ext_attrs, Positions::INTERFACE)?;
                def.members.iter().try_for_each(|m| walker.member(m))?;
            }
            Source::Namespace(def) => {
                walker.attrs(&def.ext_attrs, Positions::NAMESPACE)?;
                def.members.iter().try_for_each(|m| walker.member(m))?;
            }
            Source::Dictionary(def) => {
                walker.attrs(&def.ext_attrs, Positions::DICTIONARY)?;
                for member in &def.members {
                    walker.attrs(&member.ext_attrs, Positions::DICTIONARY_MEMBER)?;
                    walker.conversion_conflict(&member.ext_attrs, &member.ty)?;
                    walker.ty(&member.ty)?;
                }
            }
            Source::Enum(def) => walker.attrs(&def.ext_attrs, Positions::ENUM)?,
            Source::Typedef(def) => {
                walker.attrs(&def.ext_attrs, Positions::TYPEDEF)?;
                walker.ty(&def.ty)?;
            }
            Source::Callback(def) => {
                walker.attrs(&def.ext_attrs, Positions::CALLBACK)?;
                walker.ty(&def.return_type)?;
                walker.arguments(&def.args)?;
            }
        }
    }
    for stmt in &ctx.includes {
        walker.attrs(&stmt.ext_attrs, Positions::INCLUDES)?;
    }
    Ok(())
}

struct Walker<'a> {
    interner: &'a StringInterner,
    names: &'a AttrNames,
}

impl Walker<'_> {
    fn attrs(&self, attrs: &[ExtAttr], position: Positions) -> Result<(), IdlError> {
        for attr in attrs {
            attrs::check(self.interner, attr, position)?;
            if let ExtAttrValue::ArgList(args) | ExtAttrValue::NamedArgList(_, args) = &attr.value {
                self.arguments(args)?;
            }
        }
        Ok(())
    }

    fn member(&self, member: &MemberDef) -> Result<(), IdlError> {
        let position = match &member.kind {
            MemberDefKind::Attribute { .. } => Positions::ATTRIBUTE,
            MemberDefKind::Operation { .. } => Positions::OPERATION,
            MemberDefKind::Constructor { .. } => Positions::CONSTRUCTOR,
            MemberDefKind::Const { .. } => Positions::CONST,
            MemberDefKind::Iterable { .. }
            | MemberDefKind::Maplike { .. }
            | MemberDefKind::Setlike { .. }
            | MemberDefKind::Stringifier => Positions::COLLECTION,
        };
        self.attrs(&member.ext_attrs, position)?;

        match &member.kind {
            MemberDefKind::Attribute { ty, .. } => {
                self.conversion_conflict(&member.ext_attrs, ty)?;
                self.ty(ty)
            }
            MemberDefKind::Operation {
                return_type, args, ..
            } => {
                self.ty(return_type)?;
                self.arguments(args)
            }
            MemberDefKind::Constructor { args } => self.arguments(args),
            MemberDefKind::Const { ty, .. } => self.ty(ty),
            MemberDefKind::Iterable { key, value } => {
                if let Some(key) = key {
                    self.ty(key)?;
                }
                self.ty(value)
            }
            MemberDefKind::Maplike { key, value, .. } => {
                self.ty(key)?;
                self.ty(value)
            }
            MemberDefKind::Setlike { value, .. } => self.ty(value),
            MemberDefKind::Stringifier => Ok(()),
        }
    }

    fn arguments(&self, args: &[ArgumentDef]) -> Result<(), IdlError> {
        for arg in args {
            self.attrs(&arg.ext_attrs, Positions::ARGUMENT)?;
            self.conversion_conflict(&arg.ext_attrs, &arg.ty)?;
            self.ty(&arg.ty)?;
        }
        Ok(())
    }

    fn ty(&self, ty: &TypeExpr) -> Result<(), IdlError> {
        ensure_sufficient_stack(|| {
            self.attrs(&ty.ext_attrs, Positions::TYPE)?;
            self.conversion_conflict(&[], ty)?;
            match &ty.kind {
                TypeExprKind::Nullable(inner)
                | TypeExprKind::Sequence(inner)
                | TypeExprKind::FrozenArray(inner)
                | TypeExprKind::ObservableArray(inner)
                | TypeExprKind::Promise(inner) => self.ty(inner),
                TypeExprKind::Record(key, value) => {
                    self.ty(key)?;
                    self.ty(value)
                }
                TypeExprKind::Union(members) => members.iter().try_for_each(|m| self.ty(m)),
                TypeExprKind::Primitive(_)
                | TypeExprKind::String(_)
                | TypeExprKind::Any
                | TypeExprKind::Object
                | TypeExprKind::Undefined
                | TypeExprKind::Void
                | TypeExprKind::Named(_) => Ok(()),
            }
        })
    }

    /// `[Clamp]` and `[EnforceRange]` may not both apply to one value,
    /// whether written on the declaration or on its type.
    fn conversion_conflict(&self, outer: &[ExtAttr], ty: &TypeExpr) -> Result<(), IdlError> {
        let mut combined = outer.iter().chain(ty.ext_attrs.iter());
        let clamp = combined.clone().find(|a| a.name == self.names.clamp);
        let enforce = combined.find(|a| a.name == self.names.enforce_range);
        if let (Some(clamp), Some(enforce)) = (clamp, enforce) {
            return Err(IdlError::attribute_context(
                "`[Clamp]` and `[EnforceRange]` cannot be used together",
                enforce.loc,
            )
            .with_related(clamp.loc, "`[Clamp]` here"));
        }
        Ok(())
    }
}

// === 4b: contextual ===

fn check_member_attrs(ctx: &Context<'_>, names: &AttrNames, member: &Member) -> Result<(), IdlError> {
    let attrs = &member.ext_attrs;
    let unforgeable = find(attrs, names.unforgeable).or_else(|| find(attrs, names.legacy_unforgeable));
    if let Some(attr) = unforgeable {
        if member.is_static() {
            return Err(IdlError::attribute_context(
                format!("`[{}]` cannot be used on a static {}", ctx.text(attr.name), member.describe()),
                attr.loc,
            ));
        }
    }

    let MemberKind::Attribute(attribute) = &member.kind else {
        return Ok(());
    };

    if let Some(attr) = find(attrs, names.setter_throws) {
        if attribute.readonly {
            return Err(IdlError::attribute_context(
                "`[SetterThrows]` cannot be used on a readonly attribute",
                attr.loc,
            ));
        }
    }

    if let Some(attr) = find(attrs, names.same_object) {
        if !attribute.readonly {
            return Err(IdlError::attribute_context(
                "`[SameObject]` requires a readonly attribute",
                attr.loc,
            ));
        }
        if !matches!(attribute.ty.strip_nullable(), Type::Object | Type::Interface(_)) {
            return Err(IdlError::attribute_context(
                format!(
                    "`[SameObject]` requires an interface or object type, found `{}`",
                    crate::types::render(ctx, &attribute.ty)
                ),
                attr.loc,
            ));
        }
    }

    if attribute.ty.is_observable_array() {
        for name in [names.cached, names.store_in_slot] {
            if let Some(attr) = find(attrs, name) {
                return Err(IdlError::attribute_context(
                    format!(
                        "`[{}]` cannot be used on an ObservableArray attribute",
                        ctx.text(name)
                    ),
                    attr.loc,
                ));
            }
        }
    }

    let put_forwards = find(attrs, names.put_forwards);
    let replaceable = find(attrs, names.replaceable);
    for attr in [put_forwards, replaceable].into_iter().flatten() {
        if !attribute.readonly {
            return Err(IdlError::attribute_context(
                format!("`[{}]` requires a readonly attribute", ctx.text(attr.name)),
                attr.loc,
            ));
        }
    }
    if let (Some(forwards), Some(replace)) = (put_forwards, replaceable) {
        return Err(IdlError::attribute_context(
            "`[PutForwards]` and `[Replaceable]` cannot be used together",
            replace.loc,
        )
        .with_related(forwards.loc, "`[PutForwards]` here"));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
