use model::{BinaryOp, Expr, Primary, SyntaxError, SyntaxErrorKind, TokenKind};
use lexer::{parse_bool_literal, parse_int_literal, string_literal_contents};
use crate::parser::Parser;
use crate::utils::ParserUtils;

/// Expression parsing functionality using precedence climbing
pub(crate) trait ExpressionParser {
    fn parse_expr(&mut self) -> Result<Expr, SyntaxError>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_precedence(1)
    }
}

impl<'a> Parser<'a> {
    /// Parses a term, then folds in every binary operator whose level is at
    /// least `min_level`. Right operands are parsed one level up so chains of
    /// the same level group to the left.
    pub(crate) fn parse_precedence(&mut self, min_level: u8) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = BinaryOp::from_token(self.peek().kind) {
            let level = op.level();
            if level < min_level {
                break;
            }
            self.advance();
            let right = self.parse_precedence(level + 1)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    pub(crate) fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.match_token(TokenKind::Bang) {
            let operand = self.parse_unary()?;
            return Ok(Expr::not(operand));
        }
        self.parse_primary()
    }

    pub(crate) fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek().kind {
            TokenKind::IntegerLiteral => {
                let token = self.advance();
                match parse_int_literal(&token.text) {
                    Some(value) => Ok(Expr::int(value)),
                    None => {
                        // Keep going with a placeholder; the tree shape is still useful
                        self.report(SyntaxError::new(SyntaxErrorKind::InvalidLiteral, "Int", token));
                        Ok(Expr::int(0))
                    }
                }
            }
            TokenKind::StringLiteral => {
                let token = self.advance();
                Ok(Expr::string(string_literal_contents(&token.text)))
            }
            TokenKind::BooleanLiteral => {
                let token = self.advance();
                Ok(Expr::bool(parse_bool_literal(&token.text)))
            }
            TokenKind::Identifier if self.is_call_start() => self.parse_call(),
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expr::Primary(Primary::Identifier(token.text)))
            }
            TokenKind::OpenParenthesis => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::CloseParenthesis, "')'")?;
                Ok(Expr::paren(inner))
            }
            _ => Err(self.mismatch("expression")),
        }
    }

    /// IDENT ( [argumentList] )
    fn parse_call(&mut self) -> Result<Expr, SyntaxError> {
        let name = self.expect(TokenKind::Identifier, "function name")?.text;
        self.expect(TokenKind::OpenParenthesis, "'('")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::CloseParenthesis) {
            args.push(self.parse_expr()?);
            while self.match_token(TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
        }

        self.expect(TokenKind::CloseParenthesis, "')' after arguments")?;
        Ok(Expr::Call { name, args })
    }
}
