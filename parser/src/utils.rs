use model::{SyntaxError, TokenKind};
use crate::parser::Parser;

/// Lookahead classification and panic-mode recovery.
pub(crate) trait ParserUtils {
    fn mismatch(&self, expected: &str) -> SyntaxError;
    fn is_statement_sync(&self) -> bool;
    fn can_start_expression(&self) -> bool;
    fn is_assignment_start(&self) -> bool;
    fn is_call_start(&self) -> bool;
    fn synchronize_top_level(&mut self);
    fn synchronize_statement(&mut self);
}

impl<'a> ParserUtils for Parser<'a> {
    /// Error for the current token not being `expected`. Reported as missing
    /// when input ended or a synchronization token shows up in its place.
    fn mismatch(&self, expected: &str) -> SyntaxError {
        let found = self.peek().clone();
        if found.is(TokenKind::Eof) || self.is_statement_sync() {
            SyntaxError::missing(expected, found)
        } else {
            SyntaxError::unexpected(expected, found)
        }
    }

    /// Tokens a block-level recovery may stop at: statement keywords, the end
    /// of the block and the start of the next function.
    fn is_statement_sync(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Var
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::CloseBrace
                | TokenKind::Fun
                | TokenKind::Eof
        )
    }

    fn can_start_expression(&self) -> bool {
        self.peek().kind.starts_expression()
    }

    /// `IDENT =` is the only prefix that commits to an assignment.
    fn is_assignment_start(&self) -> bool {
        self.check(TokenKind::Identifier) && self.check_at(1, TokenKind::Assign)
    }

    /// `IDENT (` is a call; a bare identifier is a reference.
    fn is_call_start(&self) -> bool {
        self.check(TokenKind::Identifier) && self.check_at(1, TokenKind::OpenParenthesis)
    }

    fn synchronize_top_level(&mut self) {
        let start = self.pos;
        while !self.is_at_end() && !self.check(TokenKind::Fun) {
            self.advance();
        }
        tracing::trace!(skipped = self.pos - start, "resynchronized at top level");
    }

    fn synchronize_statement(&mut self) {
        let start = self.pos;
        while !self.is_statement_sync() {
            self.advance();
        }
        tracing::trace!(skipped = self.pos - start, "resynchronized in block");
    }
}
