use model::{LexError, LexErrorKind, Token, TokenKind};
use crate::keywords::keyword_or_identifier;

pub struct StateMachineLexer {
    input: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    token_start: usize,
    start_line: u32,
    start_column: u32,
    errors: Vec<LexError>,
}

impl StateMachineLexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            token_start: 0,
            start_line: 1,
            start_column: 1,
            errors: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            match self.lex_next_token() {
                Some(token) => tokens.push(token),
                None => continue, // Whitespace, comment or skipped bad input
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line, self.column));
        (tokens, self.errors)
    }

    fn lex_next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        if self.is_at_end() {
            return None;
        }

        self.token_start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;

        match self.current_char() {
            '/' if self.peek(1) == Some('/') => {
                self.skip_line_comment();
                None
            }
            '/' if self.peek(1) == Some('*') => {
                self.skip_block_comment();
                None
            }
            '"' => self.lex_string(),
            '0'..='9' => Some(self.lex_number()),
            'a'..='z' | 'A'..='Z' | '_' => Some(self.lex_identifier()),
            _ => self.lex_operator_or_punctuation(),
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> char {
        self.input[self.pos]
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        if self.current_char() == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn current_text(&self) -> String {
        self.input[self.token_start..self.pos].iter().collect()
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.current_text(), self.start_line, self.start_column)
    }

    fn error_at_start(&mut self, kind: LexErrorKind) {
        self.errors.push(LexError::new(kind, self.start_line, self.start_column));
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.current_char() {
                ' ' | '\t' | '\n' | '\r' | '\x0C' => self.bump(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.current_char() != '\n' {
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) {
        self.bump_n(2); // Skip the initial /*

        while !self.is_at_end() {
            if self.current_char() == '*' && self.peek(1) == Some('/') {
                self.bump_n(2);
                return;
            }
            self.bump();
        }

        self.error_at_start(LexErrorKind::UnterminatedComment);
    }

    fn lex_string(&mut self) -> Option<Token> {
        self.bump(); // Skip opening quote

        while !self.is_at_end() {
            match self.current_char() {
                '"' => {
                    self.bump();
                    return Some(self.make_token(TokenKind::StringLiteral));
                }
                '\n' => break,
                // The escaped character stays in the literal text as written
                '\\' if !matches!(self.peek(1), None | Some('\n')) => self.bump_n(2),
                _ => self.bump(),
            }
        }

        // Resume at the end of the line; the newline itself is whitespace
        self.error_at_start(LexErrorKind::UnterminatedString);
        None
    }

    fn lex_number(&mut self) -> Token {
        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            self.bump();
        }
        self.make_token(TokenKind::IntegerLiteral)
    }

    fn lex_identifier(&mut self) -> Token {
        while !self.is_at_end() {
            match self.current_char() {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => self.bump(),
                _ => break,
            }
        }

        let kind = keyword_or_identifier(&self.current_text());
        self.make_token(kind)
    }

    fn lex_operator_or_punctuation(&mut self) -> Option<Token> {
        let ch = self.current_char();
        let next = self.peek(1);

        // Two-character operators win over their one-character prefixes
        let two_char_kind = match (ch, next) {
            ('=', Some('=')) => Some(TokenKind::EqualEqual),
            ('!', Some('=')) => Some(TokenKind::BangEqual),
            ('<', Some('=')) => Some(TokenKind::LessEqual),
            ('>', Some('=')) => Some(TokenKind::GreaterEqual),
            ('&', Some('&')) => Some(TokenKind::AndAnd),
            ('|', Some('|')) => Some(TokenKind::OrOr),
            _ => None,
        };

        if let Some(kind) = two_char_kind {
            self.bump_n(2);
            return Some(self.make_token(kind));
        }

        self.bump();
        let kind = match ch {
            '(' => TokenKind::OpenParenthesis,
            ')' => TokenKind::CloseParenthesis,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Assign,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '!' => TokenKind::Bang,
            _ => {
                self.error_at_start(LexErrorKind::UnexpectedCharacter(ch));
                return None;
            }
        };

        Some(self.make_token(kind))
    }
}
