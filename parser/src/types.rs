use model::{SyntaxError, TokenKind, Type};
use crate::parser::Parser;
use crate::utils::ParserUtils;

/// Type parsing functionality
pub(crate) trait TypeParser {
    fn parse_type(&mut self) -> Result<Type, SyntaxError>;
}

impl<'a> TypeParser for Parser<'a> {
    fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        let ty = match self.peek().kind {
            TokenKind::IntType => Type::Int,
            TokenKind::StringType => Type::String,
            TokenKind::BooleanType => Type::Boolean,
            TokenKind::UnitType => Type::Unit,
            _ => return Err(self.mismatch("type (Int, String, Boolean or Unit)")),
        };
        self.advance();
        Ok(ty)
    }
}
