/// Value of an integer literal lexeme, or `None` when it does not fit in `Int`.
pub fn parse_int_literal(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}

/// Text between the quotes of a string literal lexeme, escapes untouched.
pub fn string_literal_contents(text: &str) -> &str {
    let inner = text.strip_prefix('"').unwrap_or(text);
    inner.strip_suffix('"').unwrap_or(inner)
}

/// Value of a boolean literal lexeme.
pub fn parse_bool_literal(text: &str) -> bool {
    text == "true"
}
