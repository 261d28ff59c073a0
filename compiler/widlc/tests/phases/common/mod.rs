//! Shared helpers for phase tests.

use widlc::{Definitions, ErrorKind, IdlError, Interface, Parser};

/// Parse each source as its own fragment.
pub fn parser_with(sources: &[&str]) -> Parser {
    let mut parser = Parser::default();
    for source in sources {
        parser
            .parse(source)
            .unwrap_or_else(|err| panic!("parse failed: {}", parser.render(&err)));
    }
    parser
}

pub fn finish_ok(parser: &Parser) -> Definitions {
    parser
        .finish()
        .unwrap_or_else(|err| panic!("finish failed: {}", parser.render(&err)))
}

pub fn finish_err(parser: &Parser) -> IdlError {
    match parser.finish() {
        Ok(defs) => panic!("expected an error, got {} declarations", defs.len()),
        Err(err) => err,
    }
}

/// Parse and finish `sources`, expecting an error of `kind`.
pub fn assert_finish_fails(sources: &[&str], kind: ErrorKind) -> IdlError {
    let parser = parser_with(sources);
    let err = finish_err(&parser);
    assert_eq!(err.kind, kind, "unexpected error: {}", parser.render(&err));
    err
}

pub fn interface<'a>(defs: &'a Definitions, parser: &Parser, name: &str) -> &'a Interface {
    defs.find_interface(parser.interner().intern(name))
        .unwrap_or_else(|| panic!("no interface `{name}`"))
}

/// Names of an interface's final members in order; anonymous members are `_`.
pub fn member_names(defs: &Definitions, parser: &Parser, name: &str) -> Vec<&'static str> {
    let iface = interface(defs, parser, name);
    defs.members_of(iface)
        .map(|m| m.name.map_or("_", |n| parser.name(n)))
        .collect()
}

/// Sorted global names of an exposure set.
pub fn exposure(parser: &Parser, set: &widlc::ExposureSet) -> Vec<&'static str> {
    let mut names: Vec<&str> = set.iter().map(|n| parser.name(n)).collect();
    names.sort_unstable();
    names
}
