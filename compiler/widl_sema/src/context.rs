//! Shared state threaded through the analysis passes.

use rustc_hash::FxHashMap;
use widl_ir::ast::{
    CallbackDef, DictionaryDef, EnumDef, IncludesDef, InterfaceDef, NamespaceDef, TypedefDef,
};
use widl_ir::model::{DeclId, Definitions, InterfaceKind};
use widl_ir::{Loc, Name, StringInterner};

use crate::AnalysisConfig;

/// A declaration after partials are folded in, before resolution.
#[derive(Clone, Debug)]
pub(crate) enum Source {
    Interface(InterfaceDef, InterfaceKind),
    Dictionary(DictionaryDef),
    Namespace(NamespaceDef),
    Enum(EnumDef),
    Typedef(TypedefDef),
    Callback(CallbackDef),
}

impl Source {
    pub(crate) fn name(&self) -> Name {
        match self {
            Source::Interface(d, _) => d.name.name,
            Source::Dictionary(d) => d.name.name,
            Source::Namespace(d) => d.name.name,
            Source::Enum(d) => d.name.name,
            Source::Typedef(d) => d.name.name,
            Source::Callback(d) => d.name.name,
        }
    }

    pub(crate) fn loc(&self) -> Loc {
        match self {
            Source::Interface(d, _) => d.loc,
            Source::Dictionary(d) => d.loc,
            Source::Namespace(d) => d.loc,
            Source::Enum(d) => d.loc,
            Source::Typedef(d) => d.loc,
            Source::Callback(d) => d.loc,
        }
    }

    /// Noun used in diagnostics.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Source::Interface(_, InterfaceKind::Plain) => "interface",
            Source::Interface(_, InterfaceKind::Callback) => "callback interface",
            Source::Interface(_, InterfaceKind::Mixin) => "interface mixin",
            Source::Dictionary(_) => "dictionary",
            Source::Namespace(_) => "namespace",
            Source::Enum(_) => "enum",
            Source::Typedef(_) => "typedef",
            Source::Callback(_) => "callback",
        }
    }
}

pub(crate) struct Context<'a> {
    pub interner: &'a StringInterner,
    pub config: &'a AnalysisConfig,
    /// Merged declarations, indexed by `DeclId`.
    pub sources: Vec<Source>,
    pub by_name: FxHashMap<Name, DeclId>,
    pub includes: Vec<IncludesDef>,
    /// Output under construction.
    pub defs: Definitions,
}

impl<'a> Context<'a> {
    pub(crate) fn new(interner: &'a StringInterner, config: &'a AnalysisConfig) -> Self {
        Context {
            interner,
            config,
            sources: Vec::new(),
            by_name: FxHashMap::default(),
            includes: Vec::new(),
            defs: Definitions::default(),
        }
    }

    #[inline]
    pub(crate) fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    #[inline]
    pub(crate) fn lookup(&self, name: Name) -> Option<DeclId> {
        self.by_name.get(&name).copied()
    }

    #[inline]
    pub(crate) fn source(&self, id: DeclId) -> &Source {
        &self.sources[id.index()]
    }
}

/// Allocate the next id for a vector-backed arena.
pub(crate) fn next_decl_id(len: usize) -> DeclId {
    DeclId::from_raw(u32::try_from(len).unwrap_or(u32::MAX))
}
