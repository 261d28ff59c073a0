use pretty_assertions::assert_eq;
use widl_diagnostic::ErrorKind;
use widl_ir::model::MemberKind;

use crate::test_support::{analyze_err, analyze_ok, interface};

fn expect_kind(source: &str, kind: ErrorKind) {
    let err = analyze_err(source);
    assert_eq!(err.kind, kind, "{source}: {}", err.message);
}

// === Table ===

#[test]
fn misspelled_attribute_suggests_known_name() {
    let err = analyze_err("interface A { [Throw] void f(); };");
    assert_eq!(err.kind, ErrorKind::UnknownAttribute);
    assert_eq!(err.suggestion.as_deref(), Some("did you mean `[Throws]`?"));
}

#[test]
fn attributes_are_checked_in_every_position() {
    expect_kind("[Bogus] dictionary D {};", ErrorKind::UnknownAttribute);
    expect_kind("dictionary D { [Bogus] long a; };", ErrorKind::UnknownAttribute);
    expect_kind("interface A { void f([Bogus] long a); };", ErrorKind::UnknownAttribute);
    expect_kind("interface A { attribute sequence<[Bogus] long> a; };", ErrorKind::UnknownAttribute);
    expect_kind("[Bogus] enum E { \"a\" };", ErrorKind::UnknownAttribute);
    expect_kind("callback C = void ([Bogus] long a);", ErrorKind::UnknownAttribute);
    expect_kind("interface A {}; interface mixin M {}; [Bogus] A includes M;", ErrorKind::UnknownAttribute);
}

#[test]
fn getter_and_setter_throws_are_attribute_only() {
    expect_kind("interface A { [GetterThrows] void f(); };", ErrorKind::AttributeContext);
    expect_kind("interface A { [SetterThrows] void f(); };", ErrorKind::AttributeContext);
    analyze_ok("interface A { [GetterThrows, SetterThrows] attribute long x; };");
}

#[test]
fn shape_mismatch() {
    expect_kind("[Exposed] interface A {};", ErrorKind::AttributeContext);
    expect_kind("interface A { [Throws=Foo] void f(); };", ErrorKind::AttributeContext);
}

// === Contextual ===

#[test]
fn setter_throws_on_readonly() {
    expect_kind(
        "interface A { [SetterThrows] readonly attribute long x; };",
        ErrorKind::AttributeContext,
    );
}

#[test]
fn same_object_rules() {
    analyze_ok(
        "interface Node {};
         interface A {
           [SameObject] readonly attribute Node node;
           [SameObject] readonly attribute Node? maybe;
           [SameObject] readonly attribute object obj;
         };",
    );
    expect_kind(
        "interface Node {}; interface A { [SameObject] attribute Node node; };",
        ErrorKind::AttributeContext,
    );
    expect_kind(
        "interface A { [SameObject] readonly attribute long x; };",
        ErrorKind::AttributeContext,
    );
}

#[test]
fn unforgeable_static_member() {
    expect_kind(
        "interface A { [Unforgeable] static attribute long x; };",
        ErrorKind::AttributeContext,
    );
}

#[test]
fn cached_observable_array() {
    expect_kind(
        "interface A { [Cached] attribute ObservableArray<long> x; };",
        ErrorKind::AttributeContext,
    );
    expect_kind(
        "interface A { [StoreInSlot] attribute ObservableArray<long> x; };",
        ErrorKind::AttributeContext,
    );
}

#[test]
fn cached_pure_attribute() {
    analyze_ok(
        "interface A {
           [Cached, Pure] readonly attribute sequence<long> items;
           [Affects=Nothing, Pure] long measure();
         };",
    );
    let err = analyze_err("interface A { [Cached, Pure] attribute ObservableArray<long> x; };");
    assert_eq!(err.kind, ErrorKind::AttributeContext);
    assert!(err.message.contains("[Cached]"), "{}", err.message);
}

#[test]
fn put_forwards_and_replaceable() {
    analyze_ok("interface A { [PutForwards=href] readonly attribute Location loc; }; interface Location {};");
    analyze_ok("interface A { [Replaceable] readonly attribute long x; };");
    expect_kind(
        "interface A { [Replaceable] attribute long x; };",
        ErrorKind::AttributeContext,
    );
    expect_kind(
        "interface A { [PutForwards=y, Replaceable] readonly attribute long x; };",
        ErrorKind::AttributeContext,
    );
}

#[test]
fn clamp_with_enforce_range() {
    expect_kind(
        "interface A { void f([Clamp, EnforceRange] long a); };",
        ErrorKind::AttributeContext,
    );
    expect_kind(
        "interface A { void f([Clamp] [EnforceRange] long a); };",
        ErrorKind::AttributeContext,
    );
    analyze_ok("interface A { void f([Clamp] long a, [EnforceRange] long b); };");
}

// === Special operations ===

#[test]
fn well_formed_special_operations() {
    analyze_ok(
        "interface A {
           getter DOMString (unsigned long index);
           getter any namedItem(DOMString name);
           setter void (unsigned long index, DOMString value);
           deleter boolean (DOMString name);
           creator void (DOMString name, any value);
           stringifier DOMString ();
         };",
    );
}

#[test]
fn bad_special_signatures() {
    for source in [
        "interface X { getter boolean foo(); };",
        "interface X { getter boolean (long index); };",
        "interface X { getter void (unsigned long index); };",
        "interface X { getter any (optional unsigned long index); };",
        "interface X { setter void (unsigned long index); };",
        "interface X { deleter long (DOMString name); };",
        "interface X { stringifier long (); };",
        "interface X { stringifier DOMString (long x); };",
        "interface X { static getter any (unsigned long index); };",
        "interface X { stringifier attribute long x; };",
    ] {
        expect_kind(source, ErrorKind::SpecialOperationSignature);
    }
}

#[test]
fn duplicate_special_operations() {
    for source in [
        "interface X { getter any (unsigned long i); getter any item(unsigned long i); };",
        "interface X { stringifier; stringifier DOMString (); };",
        "interface X { stringifier attribute DOMString a; stringifier; };",
    ] {
        expect_kind(source, ErrorKind::DuplicateMember);
    }
    analyze_ok("interface X { getter any (unsigned long i); getter any (DOMString n); };");
}

// === ObservableArray ===

#[test]
fn observable_array_slots_per_interface() {
    let (defs, interner) = analyze_ok(
        "interface A {
           attribute ObservableArray<octet> bar;
           attribute long plain;
           attribute ObservableArray<DOMString> baz;
         };
         interface B { attribute ObservableArray<octet> only; };",
    );
    let slots = |name: &str| -> Vec<Option<u32>> {
        defs.members_of(interface(&defs, &interner, name))
            .map(|m| match &m.kind {
                MemberKind::Attribute(attr) => attr.slot,
                _ => None,
            })
            .collect()
    };
    assert_eq!(slots("A"), vec![Some(0), None, Some(1)]);
    assert_eq!(slots("B"), vec![Some(0)]);
}

#[test]
fn observable_array_placement() {
    for source in [
        "interface A { static attribute ObservableArray<long> x; };",
        "interface A { ObservableArray<long> f(); };",
        "interface A { void f(ObservableArray<long> x); };",
        "interface A { constructor(ObservableArray<long> x); };",
        "interface A { iterable<ObservableArray<long>>; };",
        "interface A { maplike<DOMString, ObservableArray<long>>; };",
        "dictionary D { ObservableArray<long> x; };",
        "callback C = ObservableArray<long> ();",
        "callback C = void (ObservableArray<long> x);",
        "namespace N { readonly attribute ObservableArray<long> x; };",
        "[JSImplementation=\"@impl\"] interface A { attribute ObservableArray<long> x; };",
    ] {
        expect_kind(source, ErrorKind::TypeConstraint);
    }
}
