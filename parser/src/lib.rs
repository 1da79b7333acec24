// Parser module: Converts a list of tokens into an abstract syntax tree (AST)
//
// Module organization:
// - parser.rs: Core Parser struct, cursor helpers and the program loop
// - declarations.rs: Function declarations and parameter lists
// - types.rs: The four built-in type keywords
// - statements.rs: Blocks and statements (var, if, while, return, assignment)
// - expressions.rs: Expression parsing with precedence climbing
// - utils.rs: Lookahead classification and panic-mode recovery

mod parser;
mod types;
mod expressions;
mod statements;
mod declarations;
mod utils;

use model::{Expr, LexError, Program, Stmt, SyntaxError, Token, TokenKind};
use expressions::ExpressionParser;
use parser::Parser;

/// Output of a source-level parse: the tree plus everything that went wrong
/// on the way. The tree is always present, possibly partial.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    pub ast: T,
    pub lex_errors: Vec<LexError>,
    pub diagnostics: Vec<SyntaxError>,
}

impl<T> ParseResult<T> {
    pub fn is_clean(&self) -> bool {
        self.lex_errors.is_empty() && self.diagnostics.is_empty()
    }
}

/// Parse a list of tokens into a Program AST
///
/// # Arguments
/// * `tokens` - Slice of tokens from the lexer, normally ending in `Eof`
///
/// # Returns
/// The (possibly partial) program and the syntax errors in source order
pub fn parse_tokens(tokens: &[Token]) -> (Program, Vec<SyntaxError>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.diagnostics)
}

/// Parse a single expression. Tokens left over after it are reported.
pub fn parse_expression_tokens(tokens: &[Token]) -> (Option<Expr>, Vec<SyntaxError>) {
    let mut parser = Parser::new(tokens);
    let expr = match parser.parse_expr() {
        Ok(expr) => {
            if !parser.is_at_end() {
                let err = SyntaxError::unexpected(TokenKind::Eof.describe(), parser.peek().clone());
                parser.report(err);
            }
            Some(expr)
        }
        Err(e) => {
            parser.report(e);
            None
        }
    };
    (expr, parser.diagnostics)
}

/// Parse a statement sequence, as found inside a block but without braces.
pub fn parse_statement_tokens(tokens: &[Token]) -> (Vec<Stmt>, Vec<SyntaxError>) {
    let mut parser = Parser::new(tokens);
    let statements = parser.parse_statement_list();
    (statements, parser.diagnostics)
}

/// Lex and parse a whole program.
pub fn parse(source: &str) -> ParseResult<Program> {
    let (tokens, lex_errors) = lexer::tokenize(source);
    let (ast, diagnostics) = parse_tokens(&tokens);
    tracing::debug!(
        functions = ast.functions.len(),
        lex_errors = lex_errors.len(),
        diagnostics = diagnostics.len(),
        "parsed program"
    );
    ParseResult { ast, lex_errors, diagnostics }
}

pub fn parse_expression(source: &str) -> ParseResult<Option<Expr>> {
    let (tokens, lex_errors) = lexer::tokenize(source);
    let (ast, diagnostics) = parse_expression_tokens(&tokens);
    tracing::debug!(diagnostics = diagnostics.len(), "parsed expression");
    ParseResult { ast, lex_errors, diagnostics }
}

pub fn parse_statements(source: &str) -> ParseResult<Vec<Stmt>> {
    let (tokens, lex_errors) = lexer::tokenize(source);
    let (ast, diagnostics) = parse_statement_tokens(&tokens);
    tracing::debug!(statements = ast.len(), diagnostics = diagnostics.len(), "parsed statements");
    ParseResult { ast, lex_errors, diagnostics }
}
