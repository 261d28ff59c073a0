//! Extended attributes (`[Name]`, `[Name=Value]`, ...).

use super::ArgumentDef;
use crate::{Loc, Name};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtAttr {
    pub name: Name,
    pub value: ExtAttrValue,
    pub loc: Loc,
}

/// The right-hand side of an extended attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtAttrValue {
    /// `[Name]`
    None,
    /// `[Name=Ident]`
    Ident(Name),
    /// `[Name=(A, B)]`
    IdentList(Vec<Name>),
    /// `[Name="text"]`
    String(Name),
    /// `[Name=*]`
    Wildcard,
    /// `[Name(args)]`
    ArgList(Vec<ArgumentDef>),
    /// `[Name=Ident(args)]`
    NamedArgList(Name, Vec<ArgumentDef>),
}

impl ExtAttrValue {
    /// Identifiers named by the value, for `Ident` and `IdentList` forms.
    pub fn idents(&self) -> &[Name] {
        match self {
            ExtAttrValue::Ident(name) => std::slice::from_ref(name),
            ExtAttrValue::IdentList(names) => names,
            _ => &[],
        }
    }
}
