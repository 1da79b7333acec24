use model::TokenKind;

/// Keyword lookup for a maximal identifier run.
pub fn keyword_or_identifier(text: &str) -> TokenKind {
    match text {
        "fun" => TokenKind::Fun,
        "var" => TokenKind::Var,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "return" => TokenKind::Return,
        "Int" => TokenKind::IntType,
        "String" => TokenKind::StringType,
        "Boolean" => TokenKind::BooleanType,
        "Unit" => TokenKind::UnitType,
        "true" | "false" => TokenKind::BooleanLiteral,
        _ => TokenKind::Identifier,
    }
}
