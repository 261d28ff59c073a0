//! `reset`, repeated `finish`, and rendering errors.

use pretty_assertions::assert_eq;
use widlc::{ErrorKind, Parser, ParserConfig};

use crate::common::{exposure, finish_err, finish_ok, interface, parser_with};

#[test]
fn reset_clears_fragments_and_keeps_config() {
    let config = ParserConfig::default()
        .with_default_global("Shell")
        .with_allow_implements(false);
    let mut parser = Parser::new(config.clone());
    parser.parse("interface A {};").expect("parse");
    parser.parse("interface B {};").expect("parse");

    let parser = parser.reset();
    assert!(parser.state().fragments.is_empty());
    assert!(parser.source_map().is_empty());
    assert_eq!(parser.config(), &config);
    assert!(finish_ok(&parser).is_empty());
}

#[test]
fn reset_allows_redeclaring_names() {
    let mut parser = parser_with(&["interface A { attribute long x; };"]);
    parser = parser.reset();
    parser.parse("interface A { attribute long y; };").expect("parse");
    let defs = finish_ok(&parser);
    assert_eq!(defs.len(), 1);
}

#[test]
fn configured_default_global_applies_after_reset() {
    let mut parser = Parser::new(ParserConfig::default().with_default_global("Shell")).reset();
    parser.parse("interface A {};").expect("parse");
    let defs = finish_ok(&parser);
    assert_eq!(
        exposure(&parser, &interface(&defs, &parser, "A").exposure),
        vec!["Shell"]
    );
}

#[test]
fn finish_can_run_again_after_more_input() {
    let mut parser = parser_with(&["interface Child : Parent {};"]);
    let err = finish_err(&parser);
    assert_eq!(err.kind, ErrorKind::Reference);

    parser.parse("interface Parent {};").expect("parse");
    let defs = finish_ok(&parser);
    let child = interface(&defs, &parser, "Child");
    let parent = interface(&defs, &parser, "Parent");
    assert_eq!(child.parent, Some(parent.id));
}

#[test]
fn semantic_error_renders_with_location() {
    let mut parser = Parser::default();
    parser
        .parse_named("first.webidl", "interface A { attribute long x; };")
        .expect("parse");
    parser
        .parse_named("second.webidl", "interface A { attribute long y; };")
        .expect("parse");

    let err = finish_err(&parser);
    assert_eq!(err.kind, ErrorKind::DuplicateDefinition);
    let rendered = parser.render(&err);
    assert!(
        rendered.starts_with("second.webidl:1:"),
        "unexpected rendering:\n{rendered}"
    );
    assert!(rendered.contains("error[W2005]"), "{rendered}");
    assert!(rendered.contains("first.webidl:1:"), "{rendered}");
}

#[test]
fn special_operation_error_renders() {
    let mut parser = Parser::default();
    parser
        .parse_named("x.webidl", "interface X { getter boolean foo(); };")
        .expect("parse");
    let err = finish_err(&parser);
    let rendered = parser.render(&err);
    assert!(rendered.starts_with("x.webidl:1:"), "{rendered}");
    assert!(rendered.contains("error[W4001]"), "{rendered}");
}

#[test]
fn parsers_run_on_separate_threads() {
    let handles: Vec<_> = ["Window", "Worker"]
        .into_iter()
        .map(|global| {
            std::thread::spawn(move || {
                let mut parser = Parser::new(ParserConfig::default().with_default_global(global));
                parser.parse("interface A {};").expect("parse");
                let defs = finish_ok(&parser);
                exposure(&parser, &interface(&defs, &parser, "A").exposure)
            })
        })
        .collect();
    let results: Vec<Vec<&str>> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    assert_eq!(results, vec![vec!["Window"], vec!["Worker"]]);
}
