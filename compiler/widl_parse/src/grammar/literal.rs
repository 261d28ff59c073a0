//! Constant and default values.

use widl_diagnostic::IdlError;
use widl_ir::{ConstValue, DefaultValue, TokenKind};

use crate::{ErrorContext, Parser};

impl Parser<'_> {
    /// `true`, `false`, integers, floats, `Infinity`, `-Infinity`, `NaN`,
    /// `null`.
    pub(crate) fn parse_const_value(&mut self) -> Result<ConstValue, IdlError> {
        self.in_error_context(ErrorContext::ConstValue, |p| {
            let value = match p.cursor.current_kind() {
                TokenKind::True => ConstValue::Boolean(true),
                TokenKind::False => ConstValue::Boolean(false),
                TokenKind::Null => ConstValue::Null,
                TokenKind::Integer(value) => ConstValue::Integer(value),
                TokenKind::Float(bits) => ConstValue::Float(bits),
                TokenKind::Infinity => ConstValue::Infinity,
                TokenKind::NaN => ConstValue::NaN,
                TokenKind::Minus if p.cursor.peek_kind_at(1) == TokenKind::Infinity => {
                    p.cursor.advance();
                    ConstValue::NegativeInfinity
                }
                _ => return Err(p.cursor.unexpected("constant value")),
            };
            p.cursor.advance();
            Ok(value)
        })
    }

    /// A constant, a string, `[]` or `{}`.
    pub(crate) fn parse_default_value(&mut self) -> Result<DefaultValue, IdlError> {
        match self.cursor.current_kind() {
            TokenKind::String(text) => {
                self.cursor.advance();
                Ok(DefaultValue::String(text))
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::RBracket)?;
                Ok(DefaultValue::EmptySequence)
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::RBrace)?;
                Ok(DefaultValue::EmptyDictionary)
            }
            _ => Ok(DefaultValue::Const(self.parse_const_value()?)),
        }
    }
}
