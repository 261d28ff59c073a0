//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use tracing::trace;
use widl_diagnostic::IdlError;
use widl_ir::ast::Ident;
use widl_ir::{FileId, Loc, Span, StringInterner, Token, TokenKind, TokenList};

/// Cursor over one fragment's tokens.
///
/// The token list always ends with `Eof`, and grammar rules check the current
/// kind before advancing, so the position never runs past the last token.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    file: FileId,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner, file: FileId) -> Self {
        Cursor {
            tokens,
            interner,
            file,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token. Past the end this is the final `Eof`.
    #[inline]
    pub fn current(&self) -> Token {
        self.peek_at(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn current_loc(&self) -> Loc {
        Loc::new(self.file, self.current_span())
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|p| self.tokens.get(p)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    /// Location from `start` through the last consumed token.
    #[inline]
    pub fn loc_from(&self, start: Span) -> Loc {
        Loc::new(self.file, start.merge(self.previous_span()))
    }

    /// Token `n` positions ahead; `peek_at(0)` is the current token.
    pub fn peek_at(&self, n: usize) -> Token {
        match self.tokens.get(self.pos + n) {
            Some(token) => *token,
            None => self
                .tokens
                .as_slice()
                .last()
                .copied()
                .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY)),
        }
    }

    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.peek_at(n).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check if the current token is the same variant as `kind`, ignoring
    /// payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_variant(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Advance to the next token and return the consumed token.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = token.kind.describe(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect the current token to be of the given kind, advance and return it.
    #[inline]
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, IdlError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Expect and consume an identifier.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<Ident, IdlError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let token = self.advance();
            Ok(Ident {
                name,
                loc: Loc::new(self.file, token.span),
            })
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Expect an identifier, also accepting keywords spelled as names.
    ///
    /// Argument, attribute and operation names may be keywords
    /// (`attribute`, `required`, `includes`, ...).
    pub fn expect_name_or_keyword(&mut self) -> Result<Ident, IdlError> {
        if self.check_ident() {
            return self.expect_ident();
        }
        match self.current_kind().keyword_text() {
            Some(text) => {
                let token = self.advance();
                Ok(Ident {
                    name: self.interner.intern(text),
                    loc: Loc::new(self.file, token.span),
                })
            }
            None => Err(self.unexpected("name")),
        }
    }

    /// Build an "expected X, found Y" error at the current token.
    ///
    /// A lexer error token reports its own problem instead.
    #[cold]
    #[inline(never)]
    pub fn unexpected(&self, expected: &str) -> IdlError {
        let found = self.current_kind();
        let message = match found {
            TokenKind::Error(problem) => problem.message().to_string(),
            _ => format!("expected {expected}, found {}", found.describe()),
        };
        IdlError::syntax(message, self.current_loc())
    }

    /// Syntax error at the current token.
    #[cold]
    pub fn error_here(&self, message: impl Into<String>) -> IdlError {
        IdlError::syntax(message, self.current_loc())
    }
}
