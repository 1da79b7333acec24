use model::{Program, SyntaxError, Token, TokenKind};
use crate::declarations::DeclarationParser;
use crate::utils::ParserUtils;

/// Core parser struct that maintains parsing state
pub(crate) struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) pos: usize,
    pub(crate) diagnostics: Vec<SyntaxError>,
    /// Returned by `peek` once the slice is exhausted, so callers never see `None`.
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.is(TokenKind::Eof) => last.clone(),
            Some(last) => {
                let width = u32::try_from(last.text.chars().count()).unwrap_or(u32::MAX);
                Token::new(TokenKind::Eof, "", last.line, last.column.saturating_add(width))
            }
            None => Token::new(TokenKind::Eof, "", 1, 1),
        };

        Parser {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            eof,
        }
    }

    /// program: functionDeclaration* EOF
    pub fn parse_program(&mut self) -> Program {
        let mut functions = Vec::new();

        while !self.is_at_end() {
            if self.check(TokenKind::Fun) {
                match self.parse_function() {
                    Ok(f) => functions.push(f),
                    Err(e) => {
                        self.report(e);
                        self.synchronize_top_level();
                    }
                }
            } else {
                // Anything but `fun` where a declaration or end of input must follow
                let err = SyntaxError::unexpected("'fun' or end of input", self.peek().clone());
                self.report(err);
                self.synchronize_top_level();
            }
        }

        Program { functions }
    }

    pub(crate) fn report(&mut self, error: SyntaxError) {
        tracing::trace!(line = error.line(), column = error.column(), %error, "syntax error");
        self.diagnostics.push(error);
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    /// Consumes the current token. `Eof` is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub(crate) fn check_at(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek_at(offset).is(kind)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.mismatch(expected))
        }
    }
}
