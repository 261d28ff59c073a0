//! Unresolved syntax tree.
//!
//! One [`Fragment`] is produced per `parse` call. Nothing here is
//! cross-referenced: parent names, mixin names and named types stay as
//! [`Name`]s until the analysis passes resolve them at `finish`.

mod ext_attr;
mod ty;

pub use ext_attr::{ExtAttr, ExtAttrValue};
pub use ty::{TypeExpr, TypeExprKind};

use crate::{ConstValue, DefaultValue, FileId, Loc, Name, SpecialKind};

/// Declarations from one `parse` call, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fragment {
    pub file: FileId,
    pub definitions: Vec<Definition>,
}

/// A name together with where it was written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    pub name: Name,
    pub loc: Loc,
}

/// Top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Definition {
    Interface(InterfaceDef),
    PartialInterface(InterfaceDef),
    Mixin(InterfaceDef),
    PartialMixin(InterfaceDef),
    CallbackInterface(InterfaceDef),
    Dictionary(DictionaryDef),
    PartialDictionary(DictionaryDef),
    Namespace(NamespaceDef),
    PartialNamespace(NamespaceDef),
    Enum(EnumDef),
    Typedef(TypedefDef),
    Callback(CallbackDef),
    Includes(IncludesDef),
}

impl Definition {
    /// The declared identifier; for includes statements, the target.
    pub fn name(&self) -> Ident {
        match self {
            Definition::Interface(d)
            | Definition::PartialInterface(d)
            | Definition::Mixin(d)
            | Definition::PartialMixin(d)
            | Definition::CallbackInterface(d) => d.name,
            Definition::Dictionary(d) | Definition::PartialDictionary(d) => d.name,
            Definition::Namespace(d) | Definition::PartialNamespace(d) => d.name,
            Definition::Enum(d) => d.name,
            Definition::Typedef(d) => d.name,
            Definition::Callback(d) => d.name,
            Definition::Includes(d) => d.target,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Definition::Interface(d)
            | Definition::PartialInterface(d)
            | Definition::Mixin(d)
            | Definition::PartialMixin(d)
            | Definition::CallbackInterface(d) => d.loc,
            Definition::Dictionary(d) | Definition::PartialDictionary(d) => d.loc,
            Definition::Namespace(d) | Definition::PartialNamespace(d) => d.loc,
            Definition::Enum(d) => d.loc,
            Definition::Typedef(d) => d.loc,
            Definition::Callback(d) => d.loc,
            Definition::Includes(d) => d.loc,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Definition::PartialInterface(_)
                | Definition::PartialMixin(_)
                | Definition::PartialDictionary(_)
                | Definition::PartialNamespace(_)
        )
    }

    /// Noun used in diagnostics ("interface", "dictionary", ...).
    pub fn describe(&self) -> &'static str {
        match self {
            Definition::Interface(_) => "interface",
            Definition::PartialInterface(_) => "partial interface",
            Definition::Mixin(_) => "interface mixin",
            Definition::PartialMixin(_) => "partial interface mixin",
            Definition::CallbackInterface(_) => "callback interface",
            Definition::Dictionary(_) => "dictionary",
            Definition::PartialDictionary(_) => "partial dictionary",
            Definition::Namespace(_) => "namespace",
            Definition::PartialNamespace(_) => "partial namespace",
            Definition::Enum(_) => "enum",
            Definition::Typedef(_) => "typedef",
            Definition::Callback(_) => "callback",
            Definition::Includes(_) => "includes statement",
        }
    }
}

/// Body shared by interfaces, mixins and callback interfaces (and their
/// partials).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceDef {
    pub name: Ident,
    pub parent: Option<Ident>,
    pub members: Vec<MemberDef>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceDef {
    pub name: Ident,
    pub members: Vec<MemberDef>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryDef {
    pub name: Ident,
    pub parent: Option<Ident>,
    pub members: Vec<DictionaryMemberDef>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryMemberDef {
    pub name: Ident,
    pub ty: TypeExpr,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDef {
    pub name: Ident,
    pub values: Vec<Ident>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypedefDef {
    pub name: Ident,
    pub ty: TypeExpr,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

/// `callback Name = ReturnType (args);`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallbackDef {
    pub name: Ident,
    pub return_type: TypeExpr,
    pub args: Vec<ArgumentDef>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

/// `Target includes Mixin;` or the legacy `Target implements Mixin;`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncludesDef {
    pub target: Ident,
    pub mixin: Ident,
    pub legacy: bool,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

/// Interface, mixin or namespace member.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberDef {
    /// Absent for anonymous special operations, bare `stringifier;`,
    /// constructors and iterable-like declarations.
    pub name: Option<Ident>,
    pub kind: MemberDefKind,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberDefKind {
    Attribute {
        ty: TypeExpr,
        readonly: bool,
        is_static: bool,
        stringifier: bool,
        inherit: bool,
    },
    Operation {
        return_type: TypeExpr,
        args: Vec<ArgumentDef>,
        specials: Vec<SpecialKind>,
        is_static: bool,
    },
    Constructor {
        args: Vec<ArgumentDef>,
    },
    Const {
        ty: TypeExpr,
        value: ConstValue,
    },
    Iterable {
        key: Option<TypeExpr>,
        value: TypeExpr,
    },
    Maplike {
        key: TypeExpr,
        value: TypeExpr,
        readonly: bool,
    },
    Setlike {
        value: TypeExpr,
        readonly: bool,
    },
    /// Bare `stringifier;`.
    Stringifier,
}

impl MemberDefKind {
    pub fn is_static(&self) -> bool {
        match self {
            MemberDefKind::Attribute { is_static, .. }
            | MemberDefKind::Operation { is_static, .. } => *is_static,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArgumentDef {
    pub name: Ident,
    pub ty: TypeExpr,
    pub optional: bool,
    pub variadic: bool,
    pub default: Option<DefaultValue>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}
