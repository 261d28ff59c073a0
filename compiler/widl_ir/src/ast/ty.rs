//! Syntax-level type expressions.

use super::ExtAttr;
use crate::{Loc, Name, PrimitiveKind, StringKind};

/// A type as written, before named references are bound.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    /// Type-level extended attributes, e.g. `[Clamp] long`.
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeExprKind {
    Primitive(PrimitiveKind),
    String(StringKind),
    Any,
    Object,
    Undefined,
    Void,
    Named(Name),
    Nullable(Box<TypeExpr>),
    Sequence(Box<TypeExpr>),
    FrozenArray(Box<TypeExpr>),
    ObservableArray(Box<TypeExpr>),
    Promise(Box<TypeExpr>),
    Record(Box<TypeExpr>, Box<TypeExpr>),
    Union(Vec<TypeExpr>),
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, loc: Loc) -> Self {
        TypeExpr {
            kind,
            ext_attrs: Vec::new(),
            loc,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeExprKind::Void | TypeExprKind::Undefined)
    }
}
