//! Recursive descent parser for WIDL.
//!
//! One [`parse`] call turns one fragment's tokens into an unresolved
//! [`Fragment`]. Nothing is cross-referenced here: parents, mixins and named
//! types stay as names until analysis at `finish`. The first syntax error
//! aborts the call.

mod cursor;
mod error_context;
mod grammar;

pub use cursor::Cursor;
pub use error_context::ErrorContext;

use widl_diagnostic::IdlError;
use widl_ir::ast::Fragment;
use widl_ir::{FileId, StringInterner, TokenList};

/// Grammar switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept the legacy `A implements B;` statement.
    pub allow_implements: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_implements: true,
        }
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(
        tokens: &'a TokenList,
        interner: &'a StringInterner,
        file: FileId,
        options: ParseOptions,
    ) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner, file),
            options,
        }
    }

    /// Run `f`, tagging a syntax error it returns with "while parsing X".
    ///
    /// Only the innermost context is recorded.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, IdlError>,
    ) -> Result<T, IdlError> {
        f(self).map_err(|err| {
            if err.notes.is_empty() {
                err.with_note(format!("while parsing {}", context.description()))
            } else {
                err
            }
        })
    }

    /// Parse the whole token list as one fragment.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_fragment(mut self) -> Result<Fragment, IdlError> {
        let mut definitions = Vec::new();
        while !self.cursor.is_at_end() {
            definitions.push(self.parse_definition()?);
        }
        tracing::debug!(
            file = self.cursor.file().raw(),
            count = definitions.len(),
            "fragment parsed"
        );
        Ok(Fragment {
            file: self.cursor.file(),
            definitions,
        })
    }
}

/// Parse a token list into a fragment.
pub fn parse(
    tokens: &TokenList,
    interner: &StringInterner,
    file: FileId,
    options: ParseOptions,
) -> Result<Fragment, IdlError> {
    Parser::new(tokens, interner, file, options).parse_fragment()
}

/// Lex and parse `source` in one step.
pub fn parse_source(
    source: &str,
    interner: &StringInterner,
    file: FileId,
    options: ParseOptions,
) -> Result<Fragment, IdlError> {
    let tokens = widl_lexer::lex(source, interner);
    parse(&tokens, interner, file, options)
}
