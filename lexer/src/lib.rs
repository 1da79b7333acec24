mod keywords;
mod literals;
mod state_machine;

use model::{LexError, Token};
use state_machine::StateMachineLexer;

pub use literals::{parse_bool_literal, parse_int_literal, string_literal_contents};

/// Main lexer entry point. Never fails: bad input is reported in the error
/// list and skipped. The token list always ends with a single `Eof`.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let lexer = StateMachineLexer::new(input);
    let (tokens, errors) = lexer.tokenize();
    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "tokenized source");
    (tokens, errors)
}
