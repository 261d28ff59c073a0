//! Helpers shared by the pass tests.

use widl_diagnostic::IdlError;
use widl_ir::model::{Definitions, Interface};
use widl_ir::{FileId, StringInterner};
use widl_parse::{parse_source, ParseOptions};

use crate::{analyze, AnalysisConfig};

/// Parse each source as its own fragment and analyze them together.
pub(crate) fn analyze_sources(
    sources: &[&str],
    config: &AnalysisConfig,
) -> (Result<Definitions, IdlError>, StringInterner) {
    let interner = StringInterner::new();
    let mut fragments = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        let file = FileId::from_raw(u32::try_from(index).unwrap_or(u32::MAX));
        let fragment = parse_source(source, &interner, file, ParseOptions::default())
            .unwrap_or_else(|err| panic!("parse failed: {err}"));
        fragments.push(fragment);
    }
    let result = analyze(&fragments, &interner, config);
    (result, interner)
}

pub(crate) fn analyze_ok(source: &str) -> (Definitions, StringInterner) {
    let (result, interner) = analyze_sources(&[source], &AnalysisConfig::default());
    let defs = result.unwrap_or_else(|err| panic!("analysis failed: {err}"));
    (defs, interner)
}

pub(crate) fn analyze_err(source: &str) -> IdlError {
    let (result, _) = analyze_sources(&[source], &AnalysisConfig::default());
    match result {
        Ok(defs) => panic!("expected an error, got {} declarations", defs.len()),
        Err(err) => err,
    }
}

pub(crate) fn interface<'a>(
    defs: &'a Definitions,
    interner: &StringInterner,
    name: &str,
) -> &'a Interface {
    let name = interner.intern(name);
    defs.find_interface(name)
        .unwrap_or_else(|| panic!("no interface `{}`", interner.lookup(name)))
}

/// Names of an interface's final members, `None` for anonymous ones.
pub(crate) fn member_names(
    defs: &Definitions,
    interner: &StringInterner,
    name: &str,
) -> Vec<Option<&'static str>> {
    let iface = interface(defs, interner, name);
    defs.members_of(iface)
        .map(|m| m.name.map(|n| interner.lookup(n)))
        .collect()
}
