use model::{Block, Stmt, SyntaxError, SyntaxErrorKind, TokenKind};
use crate::expressions::ExpressionParser;
use crate::parser::Parser;
use crate::types::TypeParser;
use crate::utils::ParserUtils;

/// Statement parsing functionality
pub(crate) trait StatementParser {
    fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError>;
    fn parse_block(&mut self) -> Result<Block, SyntaxError>;
}

impl<'a> StatementParser for Parser<'a> {
    /// `{ statement* }`. Statement errors are reported and skipped here, so
    /// the only hard failure is a missing `{`. A missing `}` is reported and
    /// the statements parsed so far are kept.
    fn parse_block(&mut self) -> Result<Block, SyntaxError> {
        self.expect(TokenKind::OpenBrace, "'{'")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::CloseBrace) && !self.check(TokenKind::Fun) && !self.is_at_end() {
            match self.parse_stmt() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    self.report(e);
                    self.synchronize_statement();
                }
            }
        }

        if !self.match_token(TokenKind::CloseBrace) {
            let err = SyntaxError::missing("'}'", self.peek().clone());
            self.report(err);
        }

        Ok(Block { statements })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        match self.peek().kind {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Identifier if self.is_assignment_start() => self.parse_assignment(),
            _ if !self.can_start_expression() => Err(self.mismatch("statement")),
            _ => self.parse_expr_stmt(),
        }
    }
}

impl<'a> Parser<'a> {
    /// Top-level statement sequence for fragments. Stray `}` and `fun`
    /// tokens are reported and skipped one at a time.
    pub(crate) fn parse_statement_list(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if self.check(TokenKind::CloseBrace) || self.check(TokenKind::Fun) {
                let err = SyntaxError::unexpected("statement", self.advance());
                self.report(err);
                continue;
            }
            match self.parse_stmt() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    self.report(e);
                    self.synchronize_statement();
                }
            }
        }

        statements
    }

    /// var IDENT : type = expression
    fn parse_var_decl(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::Var, "'var'")?;
        let name = self.expect(TokenKind::Identifier, "variable name")?.text;
        self.expect(TokenKind::Colon, "':' after variable name")?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Assign, "'=' in variable declaration")?;
        let value = self.parse_expr()?;
        Ok(Stmt::VariableDeclaration { name, ty, value })
    }

    /// IDENT = expression
    fn parse_assignment(&mut self) -> Result<Stmt, SyntaxError> {
        let name = self.expect(TokenKind::Identifier, "variable name")?.text;
        self.expect(TokenKind::Assign, "'='")?;
        let value = self.parse_expr()?;
        Ok(Stmt::VariableAssignment { name, value })
    }

    /// if ( expression ) block [else block]
    fn parse_if_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::OpenParenthesis, "'(' after 'if'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParenthesis, "')' after condition")?;
        let then_block = self.parse_block()?;

        // Greedy: the nearest unmatched `if` takes the `else`
        let else_block = if self.match_token(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    /// while ( expression ) block
    fn parse_while_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::While, "'while'")?;
        self.expect(TokenKind::OpenParenthesis, "'(' after 'while'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParenthesis, "')' after condition")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    /// return [expression]
    fn parse_return_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::Return, "'return'")?;
        if self.can_start_expression() {
            Ok(Stmt::Return(Some(self.parse_expr()?)))
        } else {
            Ok(Stmt::Return(None))
        }
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let expr = self.parse_expr()?;
        if self.check(TokenKind::Assign) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::AmbiguousStatementLookaheadFailure,
                "end of statement",
                self.peek().clone(),
            ));
        }
        Ok(Stmt::Expression(expr))
    }
}
