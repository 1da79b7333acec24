use thiserror::Error;

use crate::Token;

/// A lexical error. The lexer skips past the offending input and keeps going,
/// so these are collected next to the token stream rather than returned as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A token was present but not one the grammar allows here.
    UnexpectedToken,
    /// A required token is absent: input ended, or a closing delimiter was
    /// expected and a synchronization token came first.
    MissingToken,
    /// An expression statement was followed by `=`. Only `IDENT =` starts an assignment.
    AmbiguousStatementLookaheadFailure,
    /// Integer literal does not fit in `Int`.
    InvalidLiteral,
}

/// A syntax error reported at the token where parsing went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Description of what the parser was looking for.
    pub expected: String,
    pub found: Token,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, expected: impl Into<String>, found: Token) -> Self {
        Self {
            kind,
            expected: expected.into(),
            found,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: Token) -> Self {
        Self::new(SyntaxErrorKind::UnexpectedToken, expected, found)
    }

    pub fn missing(expected: impl Into<String>, found: Token) -> Self {
        Self::new(SyntaxErrorKind::MissingToken, expected, found)
    }

    pub fn line(&self) -> u32 {
        self.found.line
    }

    pub fn column(&self) -> u32 {
        self.found.column
    }

    pub fn message(&self) -> String {
        match self.kind {
            SyntaxErrorKind::UnexpectedToken => {
                format!("expected {}, found {}", self.expected, self.found)
            }
            SyntaxErrorKind::MissingToken => {
                format!("missing {} before {}", self.expected, self.found)
            }
            SyntaxErrorKind::AmbiguousStatementLookaheadFailure => format!(
                "only a plain identifier can be assigned; expected {}, found {}",
                self.expected, self.found
            ),
            SyntaxErrorKind::InvalidLiteral => {
                format!("integer literal {} does not fit in {}", self.found.text, self.expected)
            }
        }
    }
}
