use pretty_assertions::assert_eq;
use widl_diagnostic::ErrorKind;
use widl_ir::model::Declaration;

use crate::test_support::{analyze_err, analyze_ok, analyze_sources, member_names};
use crate::AnalysisConfig;

#[test]
fn declarations_keep_encounter_order() {
    let (defs, interner) = analyze_ok(
        "enum Color { \"red\" };
         interface A {};
         dictionary D {};
         typedef long Number;",
    );
    let names: Vec<&str> = defs
        .declarations
        .iter()
        .map(|d| interner.lookup(d.name()))
        .collect();
    assert_eq!(names, vec!["Color", "A", "D", "Number"]);
}

#[test]
fn duplicate_definition_across_fragments() {
    let (result, _) = analyze_sources(
        &["interface A {};", "dictionary A {};"],
        &AnalysisConfig::default(),
    );
    let err = result.err().unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.kind, ErrorKind::DuplicateDefinition);
    assert_eq!(err.related.len(), 1);
}

#[test]
fn partial_before_base_merges_in_order() {
    let (defs, interner) = analyze_ok(
        "partial interface A { attribute long b; };
         interface A { attribute long a; };
         partial interface A { attribute long c; };",
    );
    assert_eq!(defs.len(), 1);
    assert_eq!(
        member_names(&defs, &interner, "A"),
        vec![Some("a"), Some("b"), Some("c")]
    );
}

#[test]
fn partial_without_base_is_reference_error() {
    let err = analyze_err("partial interface Missing { attribute long x; };");
    assert_eq!(err.kind, ErrorKind::Reference);
}

#[test]
fn partial_of_wrong_kind_is_kind_error() {
    let err = analyze_err("dictionary A {}; partial interface A {};");
    assert_eq!(err.kind, ErrorKind::Kind);

    let err = analyze_err("interface A {}; partial interface mixin A {};");
    assert_eq!(err.kind, ErrorKind::Kind);
}

#[test]
fn partial_dictionary_appends_members() {
    let (defs, interner) = analyze_ok(
        "dictionary D { long a; }; partial dictionary D { long b; };",
    );
    let Some(Declaration::Dictionary(dict)) = defs.find(interner.intern("D")) else {
        panic!("no dictionary D");
    };
    let names: Vec<&str> = dict.members.iter().map(|m| interner.lookup(m.name)).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn partial_exposed_is_pushed_onto_members() {
    let (defs, interner) = analyze_ok(
        "[Global=Worker] interface WorkerGlobalScope {};
         [Exposed=(Window,Worker)] interface A {};
         [Exposed=Worker] partial interface A {
           attribute long fromPartial;
           [Exposed=Window] attribute long own;
         };",
    );
    let a = crate::test_support::interface(&defs, &interner, "A");
    let window = interner.intern("Window");
    let worker = interner.intern("Worker");
    assert!(a.exposure.contains(window) && a.exposure.contains(worker));

    let members: Vec<_> = defs.members_of(a).collect();
    assert_eq!(members[0].exposure.iter().collect::<Vec<_>>(), vec![worker]);
    assert_eq!(members[1].exposure.iter().collect::<Vec<_>>(), vec![window]);
}

#[test]
fn duplicate_enum_value() {
    let err = analyze_err("enum E { \"a\", \"b\", \"a\" };");
    assert_eq!(err.kind, ErrorKind::DuplicateMember);
}
