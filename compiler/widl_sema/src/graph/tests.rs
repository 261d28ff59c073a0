use pretty_assertions::assert_eq;
use widl_diagnostic::ErrorKind;

use crate::test_support::{analyze_err, analyze_ok, interface, member_names};

// === Inheritance ===

#[test]
fn parent_is_bound() {
    let (defs, interner) = analyze_ok("interface Child : Parent {}; interface Parent {};");
    let child = interface(&defs, &interner, "Child");
    let parent = interface(&defs, &interner, "Parent");
    assert_eq!(child.parent, Some(parent.id));
    assert_eq!(parent.parent, None);
}

#[test]
fn missing_parent_is_reference_error() {
    let err = analyze_err("interface Child : Nobody {};");
    assert_eq!(err.kind, ErrorKind::Reference);
}

#[test]
fn parent_of_wrong_kind() {
    for source in [
        "callback interface P { void f(); }; interface C : P {};",
        "interface mixin P {}; interface C : P {};",
        "dictionary P {}; interface C : P {};",
        "interface P {}; dictionary C : P {};",
    ] {
        let err = analyze_err(source);
        assert_eq!(err.kind, ErrorKind::Kind, "{source}");
    }
}

#[test]
fn inheritance_cycle() {
    let err = analyze_err("interface A : C {}; interface B : A {}; interface C : B {};");
    assert_eq!(err.kind, ErrorKind::Cycle);

    let err = analyze_err("dictionary A : A {};");
    assert_eq!(err.kind, ErrorKind::Cycle);
}

// === Consequential interfaces ===

#[test]
fn includes_folds_members_after_own() {
    let (defs, interner) = analyze_ok(
        "interface B { attribute long x; };
         interface A { attribute long y; };
         A includes B;",
    );
    assert_eq!(member_names(&defs, &interner, "A"), vec![Some("y"), Some("x")]);
    assert_eq!(member_names(&defs, &interner, "B"), vec![Some("x")]);

    let a = interface(&defs, &interner, "A");
    let b = interface(&defs, &interner, "B");
    assert_eq!(a.consequential, vec![b.id]);
    assert!(b.consequential.is_empty());
}

#[test]
fn diamond_inclusion_folds_once() {
    let (defs, interner) = analyze_ok(
        "interface mixin D { attribute long shared; };
         interface mixin B {};
         interface mixin C {};
         interface A {};
         A implements B;
         A implements C;
         B implements D;
         C implements D;",
    );
    assert_eq!(member_names(&defs, &interner, "A"), vec![Some("shared")]);
    let a = interface(&defs, &interner, "A");
    assert_eq!(a.consequential.len(), 3);
}

#[test]
fn mixin_ancestors_are_folded() {
    let (defs, interner) = analyze_ok(
        "interface Base { attribute long base; };
         interface Extra : Base { attribute long extra; };
         interface A { attribute long own; };
         A implements Extra;",
    );
    assert_eq!(
        member_names(&defs, &interner, "A"),
        vec![Some("own"), Some("extra"), Some("base")]
    );
}

#[test]
fn ancestors_of_target_are_not_folded_again() {
    let (defs, interner) = analyze_ok(
        "interface Base { attribute long base; };
         interface Child : Base {};
         Child implements Base;",
    );
    assert!(interface(&defs, &interner, "Child").consequential.is_empty());
    assert_eq!(member_names(&defs, &interner, "Child"), vec![Some("base")]);
}

#[test]
fn include_cycle() {
    let err = analyze_err(
        "interface A {}; interface B {};
         A implements B;
         B implements A;",
    );
    assert_eq!(err.kind, ErrorKind::Cycle);
}

#[test]
fn includes_reference_and_kind_errors() {
    let err = analyze_err("interface A {}; A includes Missing;");
    assert_eq!(err.kind, ErrorKind::Reference);

    let err = analyze_err("interface mixin M {}; Missing includes M;");
    assert_eq!(err.kind, ErrorKind::Reference);

    let err = analyze_err("interface mixin M {}; interface mixin N {}; N includes M;");
    assert_eq!(err.kind, ErrorKind::Kind);

    let err = analyze_err("callback interface M { void f(); }; interface A {}; A includes M;");
    assert_eq!(err.kind, ErrorKind::Kind);

    let err = analyze_err("dictionary M {}; interface A {}; A includes M;");
    assert_eq!(err.kind, ErrorKind::Kind);
}

// === Collisions ===

#[test]
fn overloads_on_one_interface_are_allowed() {
    let (defs, interner) = analyze_ok(
        "interface A { void f(); void f(long x); static void g(); static void g(long x); };",
    );
    assert_eq!(member_names(&defs, &interner, "A").len(), 4);
}

#[test]
fn same_name_different_kinds_collide() {
    for source in [
        "interface A { attribute long f; void f(); };",
        "interface A { void f(); static void f(long x); };",
        "interface A { const long F = 1; attribute long F; };",
    ] {
        let err = analyze_err(source);
        assert_eq!(err.kind, ErrorKind::DuplicateMember, "{source}");
    }
}

#[test]
fn same_name_from_two_declaring_interfaces_collides() {
    let err = analyze_err(
        "interface mixin M { void f(); };
         interface A { void f(long x); };
         A includes M;",
    );
    assert_eq!(err.kind, ErrorKind::DuplicateMember);
    assert_eq!(err.related.len(), 1);
}

#[test]
fn one_iterable_like_declaration_per_interface() {
    let err = analyze_err("interface A { iterable<long>; setlike<long>; };");
    assert_eq!(err.kind, ErrorKind::DuplicateMember);
}

// === Shadowing ===

const UNFORGEABLE_PARENT: &str =
    "interface Parent { [Unforgeable] readonly attribute long foo; };";

#[test]
fn unforgeable_may_be_shadowed_by_static_or_const() {
    for child in [
        "interface Child : Parent { static attribute short foo; };",
        "interface Child : Parent { static void foo(); };",
        "interface Child : Parent { const short foo = 10; };",
    ] {
        let (defs, interner) = analyze_ok(&format!("{UNFORGEABLE_PARENT} {child}"));
        assert_eq!(defs.len(), 2, "{child}");
        assert_eq!(member_names(&defs, &interner, "Child"), vec![Some("foo")], "{child}");
    }
}

#[test]
fn unforgeable_shadowed_by_regular_member_is_duplicate() {
    for child in [
        "interface Child : Parent { void foo(); };",
        "interface Child : Parent { attribute short foo; };",
    ] {
        let err = analyze_err(&format!("{UNFORGEABLE_PARENT} {child}"));
        assert_eq!(err.kind, ErrorKind::DuplicateMember, "{child}");
        assert_eq!(err.related.len(), 1);
    }
}

#[test]
fn interface_level_unforgeable_applies_to_members() {
    let err = analyze_err(
        "[Unforgeable] interface Parent { readonly attribute long foo; };
         interface Child : Parent { void foo(); };",
    );
    assert_eq!(err.kind, ErrorKind::DuplicateMember);
}

#[test]
fn forgeable_members_shadow_freely() {
    let (defs, interner) = analyze_ok(
        "interface Parent { attribute long foo; attribute long bar; };
         interface Child : Parent { void foo(); };",
    );
    assert_eq!(
        member_names(&defs, &interner, "Child"),
        vec![Some("foo"), Some("bar")]
    );
    let child = interface(&defs, &interner, "Child");
    assert!(defs.member(child.members[0]).is_operation());
}

#[test]
fn nearest_declaration_is_authoritative() {
    let (defs, interner) = analyze_ok(
        "interface A { [Unforgeable] readonly attribute long foo; };
         interface B : A { static void foo(); };
         interface C : B { void foo(); };",
    );
    assert_eq!(member_names(&defs, &interner, "C"), vec![Some("foo")]);
}

#[test]
fn constructors_are_not_inherited() {
    let (defs, interner) = analyze_ok(
        "interface Parent { constructor(); attribute long x; };
         interface Child : Parent {};",
    );
    assert_eq!(member_names(&defs, &interner, "Child"), vec![Some("x")]);
}

// === Dictionaries ===

#[test]
fn dictionary_member_names_are_unique_along_chain() {
    let err = analyze_err("dictionary P { long a; }; dictionary C : P { long a; };");
    assert_eq!(err.kind, ErrorKind::DuplicateMember);

    let err = analyze_err("dictionary D { long a; }; partial dictionary D { long a; };");
    assert_eq!(err.kind, ErrorKind::DuplicateMember);
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_chains {
    use proptest::prelude::*;

    use crate::graph::ancestors;
    use crate::test_support::{analyze_ok, interface};

    fn chain_strategy() -> impl Strategy<Value = Vec<usize>> {
        (1usize..24).prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())
    }

    proptest! {
        #[test]
        fn chain_lengths_match_declarations(order in chain_strategy()) {
            let source: String = order
                .iter()
                .map(|&i| match i {
                    0 => "interface I0 { attribute long m0; };".to_owned(),
                    i => format!("interface I{i} : I{} {{ attribute long m{i}; }};", i - 1),
                })
                .collect::<Vec<_>>()
                .join("\n");
            let (defs, interner) = analyze_ok(&source);

            for i in 0..order.len() {
                let iface = interface(&defs, &interner, &format!("I{i}"));
                prop_assert_eq!(ancestors(&defs, iface.id).count(), i);
                prop_assert_eq!(iface.members.len(), i + 1);
            }
        }
    }
}
