//! Fragment accumulation through `parse`.

use pretty_assertions::assert_eq;
use widlc::{ErrorKind, Parser, ParserConfig};

use crate::common::{finish_ok, member_names, parser_with};

#[test]
fn forward_references_across_fragments() {
    let parser = parser_with(&[
        "interface Child : Parent { attribute Thing thing; };",
        "interface Parent { attribute long base; };",
        "enum Thing { \"on\", \"off\" };",
    ]);
    let defs = finish_ok(&parser);
    assert_eq!(defs.len(), 3);
    assert_eq!(member_names(&defs, &parser, "Child"), vec!["thing", "base"]);
}

#[test]
fn partials_merge_across_fragments() {
    let parser = parser_with(&[
        "partial interface A { void later(); };",
        "interface A { attribute long first; };",
    ]);
    let defs = finish_ok(&parser);
    assert_eq!(member_names(&defs, &parser, "A"), vec!["first", "later"]);
}

#[test]
fn declarations_keep_encounter_order() {
    let parser = parser_with(&["enum E { \"a\" }; interface B {};", "typedef long T;"]);
    let defs = finish_ok(&parser);
    let names: Vec<&str> = defs
        .declarations
        .iter()
        .map(|d| parser.name(d.name()))
        .collect();
    assert_eq!(names, vec!["E", "B", "T"]);
}

#[test]
fn syntax_error_aborts_only_that_call() {
    let mut parser = parser_with(&["interface A { attribute long x; };"]);
    let err = parser
        .parse("interface B { attribute long };")
        .expect_err("missing attribute name");
    assert_eq!(err.kind, ErrorKind::Syntax);

    parser.parse("interface C {};").expect("parser still usable");
    let defs = finish_ok(&parser);
    let names: Vec<&str> = defs
        .declarations
        .iter()
        .map(|d| parser.name(d.name()))
        .collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    let mut parser = Parser::default();
    let err = parser.parse("enum E { \"open };").expect_err("unterminated");
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(parser.state().fragments.is_empty());
}

#[test]
fn implements_statement_folds_like_includes() {
    let parser = parser_with(&[
        "interface A { attribute long a; };
         interface B { attribute long b; };
         A implements B;",
    ]);
    let defs = finish_ok(&parser);
    assert_eq!(member_names(&defs, &parser, "A"), vec!["a", "b"]);
}

#[test]
fn implements_can_be_disabled() {
    let mut parser = Parser::new(ParserConfig::default().with_allow_implements(false));
    let err = parser
        .parse("interface A {}; interface B {}; A implements B;")
        .expect_err("implements disabled");
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn named_fragments_show_in_diagnostics() {
    let mut parser = Parser::default();
    let err = parser
        .parse_named("broken.webidl", "\ninterface {")
        .expect_err("missing name");
    let rendered = parser.render(&err);
    assert!(rendered.starts_with("broken.webidl:2:"), "{rendered}");
    assert!(rendered.contains("error[W0001]"), "{rendered}");
}
