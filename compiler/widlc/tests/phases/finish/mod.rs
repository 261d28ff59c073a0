//! Resolution and validation at `finish`.

use pretty_assertions::assert_eq;
use widlc::{ErrorCode, ErrorKind, MemberKind};

use crate::common::{
    assert_finish_fails, exposure, finish_ok, interface, member_names, parser_with,
};

// === Concrete scenarios ===

#[test]
fn includes_appends_consequential_members() {
    let parser = parser_with(&[
        "interface B { attribute long x; }; interface A { attribute long y; }; A includes B;",
    ]);
    let defs = finish_ok(&parser);
    assert_eq!(member_names(&defs, &parser, "A"), vec!["y", "x"]);
    assert_eq!(member_names(&defs, &parser, "B"), vec!["x"]);

    let a = interface(&defs, &parser, "A");
    let b = interface(&defs, &parser, "B");
    assert_eq!(a.consequential, vec![b.id]);
    assert!(b.consequential.is_empty());
}

#[test]
fn unforgeable_shadowed_by_operation() {
    let err = assert_finish_fails(
        &["interface Parent { [Unforgeable] readonly attribute long foo; };
           interface Child : Parent { void foo(); };"],
        ErrorKind::DuplicateMember,
    );
    assert_eq!(err.kind.code(), ErrorCode::W2004);
}

#[test]
fn exposed_on_undeclared_globals() {
    assert_finish_fails(
        &["[Exposed=Foo] interface Iface { [Exposed=Bar] void method(); };"],
        ErrorKind::InvalidGlobalName,
    );
}

#[test]
fn getter_without_arguments() {
    assert_finish_fails(
        &["interface X { getter boolean foo(); };"],
        ErrorKind::SpecialOperationSignature,
    );
}

// === Shadowing ===

const UNFORGEABLE_PARENT: &str = "interface Parent { [Unforgeable] readonly attribute long foo; };";

#[test]
fn unforgeable_may_be_shadowed_by_static_or_const() {
    for child in [
        "interface Child : Parent { static attribute short foo; };",
        "interface Child : Parent { static void foo(); };",
        "interface Child : Parent { const short foo = 10; };",
    ] {
        let parser = parser_with(&[UNFORGEABLE_PARENT, child]);
        let defs = finish_ok(&parser);
        assert_eq!(defs.len(), 2, "{child}");
        assert_eq!(member_names(&defs, &parser, "Child"), vec!["foo"], "{child}");

        let child_iface = interface(&defs, &parser, "Child");
        let foo = defs.member(child_iface.members[0]);
        assert_eq!(foo.owner, child_iface.id, "{child}");
    }
}

#[test]
fn unforgeable_may_not_be_shadowed_by_instance_members() {
    for child in [
        "interface Child : Parent { void foo(); };",
        "interface Child : Parent { attribute short foo; };",
    ] {
        assert_finish_fails(&[UNFORGEABLE_PARENT, child], ErrorKind::DuplicateMember);
    }
}

#[test]
fn plain_members_are_overridden() {
    let parser = parser_with(&[
        "interface Parent { attribute long foo; attribute long bar; };
         interface Child : Parent { attribute short foo; };",
    ]);
    let defs = finish_ok(&parser);
    assert_eq!(member_names(&defs, &parser, "Child"), vec!["foo", "bar"]);
}

#[test]
fn interface_level_unforgeable_applies_to_members() {
    assert_finish_fails(
        &["[Unforgeable] interface Parent { readonly attribute long foo; };
           interface Child : Parent { attribute long foo; };"],
        ErrorKind::DuplicateMember,
    );
}

// === Mixins ===

#[test]
fn diamond_inclusion_folds_once() {
    let parser = parser_with(&[
        "interface mixin Base { attribute long shared; };
         interface Left { attribute long left; };
         interface Right { attribute long right; };
         interface Target { attribute long own; };
         Left includes Base;
         Right includes Base;
         Target includes Left;
         Target includes Right;",
    ]);
    let defs = finish_ok(&parser);
    let names = member_names(&defs, &parser, "Target");
    assert_eq!(names.iter().filter(|&&n| n == "shared").count(), 1, "{names:?}");
    assert_eq!(names[0], "own");
    assert_eq!(names.len(), 4);
}

#[test]
fn diamond_through_parent_and_mixin_keeps_unforgeable_member() {
    let parser = parser_with(&[
        "interface X { [Unforgeable] readonly attribute long foo; };
         interface P {};
         P includes X;
         interface M {};
         M includes X;
         interface A : P {};
         A includes M;",
    ]);
    let defs = finish_ok(&parser);
    assert_eq!(member_names(&defs, &parser, "A"), vec!["foo"]);
    assert_eq!(member_names(&defs, &parser, "P"), vec!["foo"]);

    let a = interface(&defs, &parser, "A");
    let x = interface(&defs, &parser, "X");
    assert_eq!(defs.member(a.members[0]).owner, x.id);
}

#[test]
fn mixin_members_collide_with_own_members() {
    assert_finish_fails(
        &["interface mixin M { attribute long x; };
           interface A { attribute long x; };
           A includes M;"],
        ErrorKind::DuplicateMember,
    );
}

#[test]
fn inclusion_cycle() {
    assert_finish_fails(
        &["interface A {}; interface B {}; A includes B; B includes A;"],
        ErrorKind::Cycle,
    );
}

#[test]
fn inheritance_cycle() {
    assert_finish_fails(
        &["interface A : C {};", "interface B : A {};", "interface C : B {};"],
        ErrorKind::Cycle,
    );
}

// === Exposure ===

const GLOBALS: &str = "
    [Global=Window, Exposed=Window] interface Window {};
    [Global=(Worker, DedicatedWorker), Exposed=DedicatedWorker]
    interface DedicatedWorkerGlobalScope {};
";

#[test]
fn member_exposure_subset_holds() {
    let parser = parser_with(&[
        GLOBALS,
        "[Exposed=(Window, Worker)] interface I {
             [Exposed=Worker] void onWorker();
             void everywhere();
         };",
    ]);
    let defs = finish_ok(&parser);
    let i = interface(&defs, &parser, "I");
    assert_eq!(exposure(&parser, &i.exposure), vec!["Window", "Worker"]);

    let members: Vec<_> = defs.members_of(i).collect();
    assert_eq!(exposure(&parser, &members[0].exposure), vec!["Worker"]);
    assert_eq!(exposure(&parser, &members[1].exposure), vec!["Window", "Worker"]);
}

#[test]
fn member_exposure_outside_owner() {
    let err = assert_finish_fails(
        &[
            GLOBALS,
            "[Exposed=Window] interface I { [Exposed=Worker] void f(); };",
        ],
        ErrorKind::ExposureSubset,
    );
    assert!(err.message.contains("Worker"), "{}", err.message);
}

#[test]
fn wildcard_exposure_covers_every_global() {
    let parser = parser_with(&[GLOBALS, "[Exposed=*] interface I {};"]);
    let defs = finish_ok(&parser);
    let i = interface(&defs, &parser, "I");
    assert_eq!(
        exposure(&parser, &i.exposure),
        vec!["DedicatedWorker", "Window", "Worker"]
    );
}

// === ObservableArray ===

#[test]
fn observable_array_slots_per_interface() {
    let parser = parser_with(&[
        "interface Foo {
             attribute ObservableArray<octet> bar;
             attribute long plain;
             attribute ObservableArray<DOMString> baz;
         };
         interface Other { attribute ObservableArray<octet> only; };",
    ]);
    let defs = finish_ok(&parser);

    let slots = |name: &str| -> Vec<Option<u32>> {
        defs.members_of(interface(&defs, &parser, name))
            .map(|m| m.as_attribute().and_then(|a| a.slot))
            .collect()
    };
    assert_eq!(slots("Foo"), vec![Some(0), None, Some(1)]);
    assert_eq!(slots("Other"), vec![Some(0)]);
}

#[test]
fn observable_array_inside_sequence() {
    assert_finish_fails(
        &["interface Foo { attribute sequence<ObservableArray<long>> bar; };"],
        ErrorKind::TypeConstraint,
    );
}

// === Extended attributes ===

#[test]
fn misspelled_attribute_suggests_fix() {
    let err = assert_finish_fails(
        &["interface A { [Throw] void f(); };"],
        ErrorKind::UnknownAttribute,
    );
    assert_eq!(err.suggestion.as_deref(), Some("did you mean `[Throws]`?"));
}

#[test]
fn attribute_in_wrong_position() {
    assert_finish_fails(
        &["[Clamp] interface A {};"],
        ErrorKind::AttributeContext,
    );
}

#[test]
fn special_operations_resolve() {
    let parser = parser_with(&[
        "interface Storage {
             getter DOMString? (DOMString name);
             setter void (DOMString name, DOMString value);
             deleter void (DOMString name);
             getter any item(unsigned long index);
             stringifier;
         };",
    ]);
    let defs = finish_ok(&parser);
    let storage = interface(&defs, &parser, "Storage");
    let specials = defs
        .members_of(storage)
        .filter(|m| match &m.kind {
            MemberKind::Operation(op) => op.is_special(),
            MemberKind::Stringifier => true,
            _ => false,
        })
        .count();
    assert_eq!(specials, 5);
}

#[allow(clippy::disallowed_types, reason = "proptest macros internally use Arc")]
mod proptest_exposure {
    use proptest::prelude::*;
    use widlc::{ErrorKind, Parser};

    const NAMES: [&str; 3] = ["Alpha", "Beta", "Gamma"];

    fn pick(mask: u8) -> Vec<&'static str> {
        NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, n)| *n)
            .collect()
    }

    proptest! {
        #[test]
        fn member_exposure_is_a_subset_of_the_interface(owner in 1u8..8, member in 1u8..8) {
            let owner_names = pick(owner);
            let member_names = pick(member);
            let source = format!(
                "[Global=Alpha] interface AlphaScope {{}};
                 [Global=Beta] interface BetaScope {{}};
                 [Global=Gamma] interface GammaScope {{}};
                 [Exposed=({})] interface I {{ [Exposed=({})] void f(); }};",
                owner_names.join(", "),
                member_names.join(", "),
            );
            let mut parser = Parser::default();
            prop_assert!(parser.parse(&source).is_ok());

            let subset = member & !owner == 0;
            match parser.finish() {
                Ok(_) => prop_assert!(subset),
                Err(err) => {
                    prop_assert!(!subset);
                    prop_assert_eq!(err.kind, ErrorKind::ExposureSubset);
                }
            }
        }
    }
}
