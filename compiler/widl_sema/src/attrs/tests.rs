use widl_diagnostic::ErrorKind;
use widl_ir::ast::{ExtAttr, ExtAttrValue};
use widl_ir::{Loc, StringInterner};

use super::{check, lookup, Positions, Shapes, KNOWN};

fn attr(interner: &StringInterner, name: &str, value: ExtAttrValue) -> ExtAttr {
    ExtAttr {
        name: interner.intern(name),
        value,
        loc: Loc::DUMMY,
    }
}

#[test]
fn table_names_are_unique() {
    for (i, spec) in KNOWN.iter().enumerate() {
        assert!(
            KNOWN[i + 1..].iter().all(|other| other.name != spec.name),
            "`{}` listed twice",
            spec.name
        );
        assert!(!spec.positions.is_empty(), "`{}` has no positions", spec.name);
        assert!(!spec.shapes.is_empty(), "`{}` has no shapes", spec.name);
    }
}

#[test]
fn member_positions_cover_all_member_kinds() {
    assert!(Positions::MEMBER.contains(Positions::ATTRIBUTE | Positions::OPERATION));
    assert!(Positions::MEMBER.contains(Positions::CONST | Positions::COLLECTION));
    assert!(!Positions::MEMBER.intersects(Positions::ARGUMENT | Positions::TYPE));
}

#[test]
fn shape_of_each_value() {
    let interner = StringInterner::new();
    let name = interner.intern("Window");
    assert_eq!(Shapes::of(&ExtAttrValue::None), Shapes::NONE);
    assert_eq!(Shapes::of(&ExtAttrValue::Ident(name)), Shapes::IDENT);
    assert_eq!(Shapes::of(&ExtAttrValue::IdentList(vec![name])), Shapes::IDENT_LIST);
    assert_eq!(Shapes::of(&ExtAttrValue::Wildcard), Shapes::WILDCARD);
    assert_eq!(Shapes::of(&ExtAttrValue::ArgList(Vec::new())), Shapes::ARG_LIST);
}

#[test]
fn known_attribute_in_allowed_position() {
    let interner = StringInterner::new();
    let throws = attr(&interner, "Throws", ExtAttrValue::None);
    assert!(check(&interner, &throws, Positions::OPERATION).is_ok());
    assert!(lookup("Throws").is_some());
    assert!(lookup("Throw").is_none());
}

#[test]
fn unknown_attribute_gets_suggestion() {
    let interner = StringInterner::new();
    let throw = attr(&interner, "Throw", ExtAttrValue::None);
    let err = check(&interner, &throw, Positions::OPERATION)
        .err()
        .unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.kind, ErrorKind::UnknownAttribute);
    assert_eq!(err.suggestion.as_deref(), Some("did you mean `[Throws]`?"));
}

#[test]
fn wrong_position_or_shape_is_context_error() {
    let interner = StringInterner::new();
    let getter_throws = attr(&interner, "GetterThrows", ExtAttrValue::None);
    let err = check(&interner, &getter_throws, Positions::OPERATION)
        .err()
        .unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.kind, ErrorKind::AttributeContext);
    assert!(err.message.contains("an operation"), "{}", err.message);

    let window = interner.intern("Window");
    let clamp = attr(&interner, "Clamp", ExtAttrValue::Ident(window));
    let err = check(&interner, &clamp, Positions::ARGUMENT)
        .err()
        .unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.kind, ErrorKind::AttributeContext);
    assert!(err.message.contains("an identifier"), "{}", err.message);
}
