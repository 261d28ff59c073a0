//! Resolved declaration graph returned from `finish`.
//!
//! Declarations are stored in encounter order and addressed by [`DeclId`];
//! members live in one arena addressed by [`MemberId`]. An interface's final
//! member list is a list of ids into that arena, so a member folded into
//! several targets (through `includes`) or inherited by several subtypes is
//! stored once.

mod exposure;
mod types;

pub use exposure::ExposureSet;
pub use types::Type;

use crate::ast::ExtAttr;
use crate::{ConstValue, DefaultValue, Loc, Name, SpecialKind};

/// Index of a declaration in [`Definitions::declarations`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DeclId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a member in [`Definitions::members`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct MemberId(u32);

impl MemberId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        MemberId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The validated output of `finish`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definitions {
    /// Top-level declarations in encounter order. Partials are folded into
    /// their base and includes statements are consumed.
    pub declarations: Vec<Declaration>,
    pub members: Vec<Member>,
}

impl Definitions {
    #[inline]
    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    #[inline]
    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.index()]
    }

    pub fn find(&self, name: Name) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    pub fn find_interface(&self, name: Name) -> Option<&Interface> {
        match self.find(name) {
            Some(Declaration::Interface(iface)) => Some(iface),
            _ => None,
        }
    }

    pub fn interface(&self, id: DeclId) -> Option<&Interface> {
        match self.declarations.get(id.index()) {
            Some(Declaration::Interface(iface)) => Some(iface),
            _ => None,
        }
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> + '_ {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Interface(iface) => Some(iface),
            _ => None,
        })
    }

    /// Members of an interface's final list, in order.
    pub fn members_of<'a>(&'a self, iface: &'a Interface) -> impl Iterator<Item = &'a Member> + 'a {
        iface.members.iter().map(|&id| self.member(id))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Declaration {
    Interface(Interface),
    Dictionary(Dictionary),
    Namespace(Namespace),
    Enum(Enumeration),
    Typedef(Typedef),
    Callback(Callback),
}

impl Declaration {
    pub fn id(&self) -> DeclId {
        match self {
            Declaration::Interface(d) => d.id,
            Declaration::Dictionary(d) => d.id,
            Declaration::Namespace(d) => d.id,
            Declaration::Enum(d) => d.id,
            Declaration::Typedef(d) => d.id,
            Declaration::Callback(d) => d.id,
        }
    }

    pub fn name(&self) -> Name {
        match self {
            Declaration::Interface(d) => d.name,
            Declaration::Dictionary(d) => d.name,
            Declaration::Namespace(d) => d.name,
            Declaration::Enum(d) => d.name,
            Declaration::Typedef(d) => d.name,
            Declaration::Callback(d) => d.name,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Declaration::Interface(d) => d.loc,
            Declaration::Dictionary(d) => d.loc,
            Declaration::Namespace(d) => d.loc,
            Declaration::Enum(d) => d.loc,
            Declaration::Typedef(d) => d.loc,
            Declaration::Callback(d) => d.loc,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterfaceKind {
    Plain,
    Callback,
    Mixin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interface {
    pub id: DeclId,
    pub name: Name,
    pub kind: InterfaceKind,
    pub parent: Option<DeclId>,
    /// Members declared on this interface (after partial merge).
    pub own_members: Vec<MemberId>,
    /// Final member list: own, then consequential, then inherited.
    pub members: Vec<MemberId>,
    /// Consequential interfaces in fold order.
    pub consequential: Vec<DeclId>,
    pub ext_attrs: Vec<ExtAttr>,
    /// Names this interface is a global for; empty unless `[Global]`.
    pub global_names: Vec<Name>,
    pub is_primary_global: bool,
    pub exposure: ExposureSet,
    pub loc: Loc,
}

impl Interface {
    pub fn is_callback(&self) -> bool {
        self.kind == InterfaceKind::Callback
    }

    pub fn is_mixin(&self) -> bool {
        self.kind == InterfaceKind::Mixin
    }

    pub fn is_global(&self) -> bool {
        !self.global_names.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub id: MemberId,
    /// Declaration the member was written on (after partial merge).
    pub owner: DeclId,
    pub name: Option<Name>,
    pub kind: MemberKind,
    pub ext_attrs: Vec<ExtAttr>,
    pub exposure: ExposureSet,
    /// Carries `[Unforgeable]` directly or through its interface.
    pub unforgeable: bool,
    pub loc: Loc,
}

impl Member {
    pub fn is_static(&self) -> bool {
        match &self.kind {
            MemberKind::Attribute(attr) => attr.is_static,
            MemberKind::Operation(op) => op.is_static,
            _ => false,
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self.kind, MemberKind::Const(_))
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, MemberKind::Attribute(_))
    }

    pub fn is_operation(&self) -> bool {
        matches!(self.kind, MemberKind::Operation(_))
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match &self.kind {
            MemberKind::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    pub fn as_operation(&self) -> Option<&Operation> {
        match &self.kind {
            MemberKind::Operation(op) => Some(op),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        self.kind.describe()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Attribute(Attribute),
    Operation(Operation),
    Constructor { args: Vec<Argument> },
    Const(Const),
    Iterable { key: Option<Type>, value: Type },
    Maplike { key: Type, value: Type, readonly: bool },
    Setlike { value: Type, readonly: bool },
    Stringifier,
}

impl MemberKind {
    pub fn describe(&self) -> &'static str {
        match self {
            MemberKind::Attribute(_) => "attribute",
            MemberKind::Operation(_) => "operation",
            MemberKind::Constructor { .. } => "constructor",
            MemberKind::Const(_) => "constant",
            MemberKind::Iterable { .. } => "iterable declaration",
            MemberKind::Maplike { .. } => "maplike declaration",
            MemberKind::Setlike { .. } => "setlike declaration",
            MemberKind::Stringifier => "stringifier",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub ty: Type,
    pub readonly: bool,
    pub is_static: bool,
    pub stringifier: bool,
    pub inherit: bool,
    /// Backing slot for ObservableArray attributes, numbered per declaring
    /// interface from 0.
    pub slot: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    pub return_type: Type,
    pub args: Vec<Argument>,
    pub specials: Vec<SpecialKind>,
    pub is_static: bool,
}

impl Operation {
    pub fn is_special(&self) -> bool {
        !self.specials.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Const {
    pub ty: Type,
    pub value: ConstValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Argument {
    pub name: Name,
    pub ty: Type,
    pub optional: bool,
    pub variadic: bool,
    pub default: Option<DefaultValue>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dictionary {
    pub id: DeclId,
    pub name: Name,
    pub parent: Option<DeclId>,
    pub members: Vec<DictionaryMember>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryMember {
    pub name: Name,
    pub ty: Type,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Namespace {
    pub id: DeclId,
    pub name: Name,
    pub members: Vec<MemberId>,
    pub ext_attrs: Vec<ExtAttr>,
    pub exposure: ExposureSet,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enumeration {
    pub id: DeclId,
    pub name: Name,
    pub values: Vec<Name>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typedef {
    pub id: DeclId,
    pub name: Name,
    pub ty: Type,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Callback {
    pub id: DeclId,
    pub name: Name,
    pub return_type: Type,
    pub args: Vec<Argument>,
    pub ext_attrs: Vec<ExtAttr>,
    pub loc: Loc,
}
