//! Resolved types.

use super::DeclId;
use crate::{PrimitiveKind, StringKind};

/// A fully resolved type. Typedefs are already expanded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Primitive(PrimitiveKind),
    String(StringKind),
    Any,
    Object,
    Undefined,
    Void,
    /// Interface or callback interface.
    Interface(DeclId),
    Dictionary(DeclId),
    Enum(DeclId),
    Callback(DeclId),
    Nullable(Box<Type>),
    Sequence(Box<Type>),
    FrozenArray(Box<Type>),
    ObservableArray(Box<Type>),
    Promise(Box<Type>),
    Record(Box<Type>, Box<Type>),
    Union(Vec<Type>),
}

impl Type {
    pub fn is_observable_array(&self) -> bool {
        matches!(self, Type::ObservableArray(_))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Type::Nullable(_))
    }

    /// `void` or `undefined`.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void | Type::Undefined)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveKind::Boolean))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String(_))
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, Type::Primitive(kind) if kind.is_unsigned_integer())
    }

    /// The type under a single `?`, or the type itself.
    pub fn strip_nullable(&self) -> &Type {
        match self {
            Type::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Whether a union (flattened through nested unions) has a nullable
    /// member.
    pub fn union_has_nullable_member(&self) -> bool {
        match self {
            Type::Union(members) => members
                .iter()
                .any(|m| m.is_nullable() || m.union_has_nullable_member()),
            _ => false,
        }
    }
}
