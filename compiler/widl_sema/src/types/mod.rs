//! Type resolution.
//!
//! Binds named references in syntax types against the merged declaration
//! set and expands typedefs. Resolved types are checked for placement
//! rules that hold regardless of where the type is used: ObservableArray
//! only at the root, string record keys, and the nullable restrictions.

use rustc_hash::FxHashMap;
use widl_diagnostic::IdlError;
use widl_ir::ast::{TypeExpr, TypeExprKind};
use widl_ir::model::{DeclId, InterfaceKind, Type};
use widl_ir::{ConstValue, Loc, Name, PrimitiveKind, StringInterner};
use widl_stack::ensure_sufficient_stack;

use crate::context::{next_decl_id, Context, Source};

/// Resolves syntax types, memoizing expanded typedefs.
pub(crate) struct Resolver<'c> {
    interner: &'c StringInterner,
    sources: &'c [Source],
    by_name: &'c FxHashMap<Name, DeclId>,
    typedefs: FxHashMap<DeclId, Type>,
    /// Typedefs currently being expanded, outermost first.
    expanding: Vec<DeclId>,
}

impl<'c> Resolver<'c> {
    pub(crate) fn new(ctx: &'c Context<'_>) -> Self {
        Resolver {
            interner: ctx.interner,
            sources: &ctx.sources,
            by_name: &ctx.by_name,
            typedefs: FxHashMap::default(),
            expanding: Vec::new(),
        }
    }

    /// Resolve `expr` and check its nesting rules.
    pub(crate) fn resolve(&mut self, expr: &TypeExpr) -> Result<Type, IdlError> {
        let ty = self.resolve_unchecked(expr)?;
        check_nesting(&ty, None, expr.loc)?;
        Ok(ty)
    }

    /// Resolve a typedef declaration by id.
    pub(crate) fn typedef(&mut self, id: DeclId, use_loc: Loc) -> Result<Type, IdlError> {
        if let Some(ty) = self.typedefs.get(&id) {
            return Ok(ty.clone());
        }
        let sources = self.sources;
        let Source::Typedef(def) = &sources[id.index()] else {
            return Err(IdlError::kind_mismatch("expected a typedef", use_loc));
        };

        if let Some(pos) = self.expanding.iter().position(|&t| t == id) {
            let chain: Vec<&str> = self.expanding[pos..]
                .iter()
                .chain(std::iter::once(&id))
                .map(|&t| self.interner.lookup(sources[t.index()].name()))
                .collect();
            return Err(IdlError::cycle(
                format!("typedef cycle: {}", chain.join(" -> ")),
                use_loc,
            )
            .with_related(def.loc, "typedef declared here"));
        }

        tracing::trace!(typedef = self.interner.lookup(def.name.name), "expanding");
        self.expanding.push(id);
        let result = self.resolve(&def.ty);
        self.expanding.pop();
        let ty = result?;
        self.typedefs.insert(id, ty.clone());
        Ok(ty)
    }

    fn resolve_unchecked(&mut self, expr: &TypeExpr) -> Result<Type, IdlError> {
        ensure_sufficient_stack(|| self.resolve_kind(&expr.kind, expr.loc))
    }

    fn resolve_kind(&mut self, kind: &TypeExprKind, loc: Loc) -> Result<Type, IdlError> {
        Ok(match kind {
            TypeExprKind::Primitive(p) => Type::Primitive(*p),
            TypeExprKind::String(s) => Type::String(*s),
            TypeExprKind::Any => Type::Any,
            TypeExprKind::Object => Type::Object,
            TypeExprKind::Undefined => Type::Undefined,
            TypeExprKind::Void => Type::Void,
            TypeExprKind::Named(name) => self.resolve_named(*name, loc)?,
            TypeExprKind::Nullable(inner) => Type::Nullable(Box::new(self.resolve_unchecked(inner)?)),
            TypeExprKind::Sequence(inner) => Type::Sequence(Box::new(self.resolve_unchecked(inner)?)),
            TypeExprKind::FrozenArray(inner) => {
                Type::FrozenArray(Box::new(self.resolve_unchecked(inner)?))
            }
            TypeExprKind::ObservableArray(inner) => {
                Type::ObservableArray(Box::new(self.resolve_unchecked(inner)?))
            }
            TypeExprKind::Promise(inner) => Type::Promise(Box::new(self.resolve_unchecked(inner)?)),
            TypeExprKind::Record(key, value) => Type::Record(
                Box::new(self.resolve_unchecked(key)?),
                Box::new(self.resolve_unchecked(value)?),
            ),
            TypeExprKind::Union(members) => Type::Union(
                members
                    .iter()
                    .map(|m| self.resolve_unchecked(m))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    fn resolve_named(&mut self, name: Name, loc: Loc) -> Result<Type, IdlError> {
        let Some(&id) = self.by_name.get(&name) else {
            return Err(IdlError::reference(
                format!("unknown type `{}`", self.interner.lookup(name)),
                loc,
            ));
        };
        let sources = self.sources;
        match &sources[id.index()] {
            Source::Interface(_, InterfaceKind::Plain | InterfaceKind::Callback) => {
                Ok(Type::Interface(id))
            }
            Source::Dictionary(_) => Ok(Type::Dictionary(id)),
            Source::Enum(_) => Ok(Type::Enum(id)),
            Source::Callback(_) => Ok(Type::Callback(id)),
            Source::Typedef(_) => self.typedef(id, loc),
            source @ (Source::Interface(_, InterfaceKind::Mixin) | Source::Namespace(_)) => {
                Err(IdlError::kind_mismatch(
                    format!(
                        "{} `{}` cannot be used as a type",
                        source.describe(),
                        self.interner.lookup(name)
                    ),
                    loc,
                )
                .with_related(source.loc(), "declared here"))
            }
        }
    }

}

/// Check nesting rules on a resolved type. `parent` names the enclosing
/// construct, or `None` at the root.
pub(crate) fn check_nesting(ty: &Type, parent: Option<&'static str>, loc: Loc) -> Result<(), IdlError> {
    ensure_sufficient_stack(|| match ty {
        Type::ObservableArray(inner) => {
            if let Some(parent) = parent {
                return Err(IdlError::type_constraint(
                    format!("ObservableArray cannot appear inside {parent}"),
                    loc,
                ));
            }
            check_nesting(inner, Some("an ObservableArray"), loc)
        }
        Type::Nullable(inner) => {
            match inner.as_ref() {
                Type::Nullable(_) => {
                    return Err(IdlError::type_constraint(
                        "a nullable type cannot be made nullable again",
                        loc,
                    ));
                }
                Type::Any => {
                    return Err(IdlError::type_constraint("`any` cannot be nullable", loc));
                }
                union @ Type::Union(_) if union.union_has_nullable_member() => {
                    return Err(IdlError::type_constraint(
                        "a nullable union cannot have a nullable member",
                        loc,
                    ));
                }
                _ => {}
            }
            check_nesting(inner, Some("a nullable type"), loc)
        }
        Type::Sequence(inner) => check_nesting(inner, Some("a sequence"), loc),
        Type::FrozenArray(inner) => check_nesting(inner, Some("a frozen array"), loc),
        Type::Promise(inner) => check_nesting(inner, Some("a promise"), loc),
        Type::Record(key, value) => {
            if !key.is_string() {
                return Err(IdlError::type_constraint(
                    "record keys must be DOMString, USVString or ByteString",
                    loc,
                ));
            }
            check_nesting(value, Some("a record"), loc)
        }
        Type::Union(members) => members
            .iter()
            .try_for_each(|m| check_nesting(m, Some("a union"), loc)),
        Type::Primitive(_)
        | Type::String(_)
        | Type::Any
        | Type::Object
        | Type::Undefined
        | Type::Void
        | Type::Interface(_)
        | Type::Dictionary(_)
        | Type::Enum(_)
        | Type::Callback(_) => Ok(()),
    })
}

/// Check that a constant's value fits its declared type.
pub(crate) fn check_const(ty: &Type, value: ConstValue, loc: Loc) -> Result<(), IdlError> {
    let Type::Primitive(kind) = ty else {
        return Err(IdlError::type_constraint(
            "constants must have a primitive type",
            loc,
        ));
    };
    let fits = match (kind, value) {
        (PrimitiveKind::Boolean, ConstValue::Boolean(_)) => true,
        (k, ConstValue::Integer(v)) if k.is_integer() => {
            let (min, max) = integer_range(*k);
            (min..=max).contains(&v)
        }
        (k, ConstValue::Integer(_) | ConstValue::Float(_)) if k.is_float() => true,
        (
            PrimitiveKind::UnrestrictedFloat | PrimitiveKind::UnrestrictedDouble,
            ConstValue::Infinity | ConstValue::NegativeInfinity | ConstValue::NaN,
        ) => true,
        _ => false,
    };
    if fits {
        Ok(())
    } else {
        Err(IdlError::type_constraint(
            format!("value {} does not fit the constant type `{kind}`", describe_value(value)),
            loc,
        ))
    }
}

fn integer_range(kind: PrimitiveKind) -> (i128, i128) {
    match kind {
        PrimitiveKind::Byte => (i128::from(i8::MIN), i128::from(i8::MAX)),
        PrimitiveKind::Octet => (0, i128::from(u8::MAX)),
        PrimitiveKind::Short => (i128::from(i16::MIN), i128::from(i16::MAX)),
        PrimitiveKind::UnsignedShort => (0, i128::from(u16::MAX)),
        PrimitiveKind::Long => (i128::from(i32::MIN), i128::from(i32::MAX)),
        PrimitiveKind::UnsignedLong => (0, i128::from(u32::MAX)),
        PrimitiveKind::UnsignedLongLong => (0, i128::from(u64::MAX)),
        _ => (i128::from(i64::MIN), i128::from(i64::MAX)),
    }
}

fn describe_value(value: ConstValue) -> String {
    match value {
        ConstValue::Boolean(b) => b.to_string(),
        ConstValue::Integer(i) => i.to_string(),
        ConstValue::Float(bits) => f64::from_bits(bits).to_string(),
        ConstValue::Infinity => "Infinity".to_owned(),
        ConstValue::NegativeInfinity => "-Infinity".to_owned(),
        ConstValue::NaN => "NaN".to_owned(),
        ConstValue::Null => "null".to_owned(),
    }
}

/// Render a resolved type the way it would be written.
pub(crate) fn render(ctx: &Context<'_>, ty: &Type) -> String {
    let name = |id: DeclId| ctx.text(ctx.source(id).name()).to_owned();
    match ty {
        Type::Primitive(p) => p.as_str().to_owned(),
        Type::String(s) => s.as_str().to_owned(),
        Type::Any => "any".to_owned(),
        Type::Object => "object".to_owned(),
        Type::Undefined => "undefined".to_owned(),
        Type::Void => "void".to_owned(),
        Type::Interface(id) | Type::Dictionary(id) | Type::Enum(id) | Type::Callback(id) => name(*id),
        Type::Nullable(inner) => format!("{}?", render(ctx, inner)),
        Type::Sequence(inner) => format!("sequence<{}>", render(ctx, inner)),
        Type::FrozenArray(inner) => format!("FrozenArray<{}>", render(ctx, inner)),
        Type::ObservableArray(inner) => format!("ObservableArray<{}>", render(ctx, inner)),
        Type::Promise(inner) => format!("Promise<{}>", render(ctx, inner)),
        Type::Record(key, value) => format!("record<{}, {}>", render(ctx, key), render(ctx, value)),
        Type::Union(members) => {
            let parts: Vec<String> = members.iter().map(|m| render(ctx, m)).collect();
            format!("({})", parts.join(" or "))
        }
    }
}

/// Resolve every typedef up front so cycles surface even when unused.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn resolve_typedefs(resolver: &mut Resolver<'_>) -> Result<(), IdlError> {
    let sources = resolver.sources;
    for (index, source) in sources.iter().enumerate() {
        if let Source::Typedef(def) = source {
            resolver.typedef(next_decl_id(index), def.name.loc)?;
        }
    }
    Ok(())
}
