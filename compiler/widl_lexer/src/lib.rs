//! Lexer for WIDL using logos with string interning.
//!
//! [`lex`] never fails: input it cannot tokenize becomes a
//! [`TokenKind::Error`] token carrying the [`LexProblem`], and the parser
//! reports it as a syntax error at that position. The token list always
//! ends with [`TokenKind::Eof`].

mod convert;
mod raw_token;

use logos::Logos;
use widl_ir::{LexProblem, Span, StringInterner, Token, TokenKind, TokenList};

use convert::convert_token;
use raw_token::RawToken;

/// Lex source text into a token list.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let range = logos.span();
        let span = Span::from_range_saturating(range.clone());

        match token_result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => {}
            Ok(raw) => {
                let kind = convert_token(raw, logos.slice(), interner);
                result.push(Token::new(kind, span));
            }
            Err(()) => {
                let rest = source.get(range.start..).unwrap_or("");
                let problem = if rest.starts_with('"') {
                    LexProblem::UnterminatedString
                } else if rest.starts_with("/*") {
                    LexProblem::UnterminatedComment
                } else {
                    LexProblem::InvalidCharacter
                };
                if problem == LexProblem::InvalidCharacter {
                    result.push(Token::new(TokenKind::Error(problem), span));
                } else {
                    // The unterminated token swallows the rest of the input.
                    let to_end = Span::from_range_saturating(range.start..source.len());
                    result.push(Token::new(TokenKind::Error(problem), to_end));
                    break;
                }
            }
        }
    }

    let eof = Span::from_range_saturating(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof));
    result
}

#[cfg(test)]
mod tests;
