//! The accumulating parser.

use widl_diagnostic::{IdlError, SourceMap};
use widl_ir::ast::Fragment;
use widl_ir::model::Definitions;
use widl_ir::StringInterner;

use crate::ParserConfig;

/// Everything a [`Parser`] accumulates between resets.
#[derive(Debug, Default)]
pub struct ParserState {
    /// Successfully parsed fragments, in `parse` order.
    pub fragments: Vec<Fragment>,
    /// Text of every `parse` call, including failed ones, so their
    /// errors still render.
    pub sources: SourceMap,
}

/// Accumulates IDL fragments and resolves them on [`finish`](Parser::finish).
///
/// Names are interned into one [`StringInterner`] shared by every
/// fragment; the interner outlives [`reset`](Parser::reset) so names
/// handed out earlier stay valid.
pub struct Parser {
    config: ParserConfig,
    interner: StringInterner,
    state: ParserState,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Parser {
            config,
            interner: StringInterner::new(),
            state: ParserState::default(),
        }
    }

    /// Parse one fragment of IDL.
    ///
    /// Declarations may refer to names declared in earlier or later
    /// fragments; nothing is resolved until [`finish`](Parser::finish). On a
    /// syntax error nothing from this call is kept.
    pub fn parse(&mut self, source: &str) -> Result<(), IdlError> {
        let name = format!("<input-{}>", self.state.sources.len());
        self.parse_named(&name, source)
    }

    /// Like [`parse`](Parser::parse), with a file name for diagnostics.
    #[tracing::instrument(level = "debug", skip(self, source))]
    pub fn parse_named(&mut self, file: &str, source: &str) -> Result<(), IdlError> {
        let file_id = self.state.sources.add(file, source);
        let tokens = widl_lexer::lex(source, &self.interner);
        tracing::trace!(tokens = tokens.len(), "lexed");

        let fragment =
            widl_parse::parse(&tokens, &self.interner, file_id, self.config.parse_options())?;
        tracing::debug!(
            definitions = fragment.definitions.len(),
            total = self.state.fragments.len() + 1,
            "fragment accepted"
        );
        self.state.fragments.push(fragment);
        Ok(())
    }

    /// Resolve and validate every fragment parsed so far.
    ///
    /// The parser is left untouched, so more fragments can be added and
    /// `finish` called again.
    pub fn finish(&self) -> Result<Definitions, IdlError> {
        widl_sema::analyze(
            &self.state.fragments,
            &self.interner,
            &self.config.analysis(),
        )
    }

    /// Drop all accumulated fragments, keeping the configuration.
    #[must_use]
    pub fn reset(self) -> Parser {
        Parser {
            config: self.config,
            interner: self.interner,
            state: ParserState::default(),
        }
    }

    /// Render an error against the sources seen so far.
    pub fn render(&self, err: &IdlError) -> String {
        err.to_diagnostic().render(&self.state.sources)
    }

    /// Text of an interned name.
    pub fn name(&self, name: widl_ir::Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.state.sources
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParserConfig::default())
    }
}
