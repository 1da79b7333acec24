// Shared data model for the MiniKotlin front end: tokens, AST nodes and
// diagnostics, plus the traversal and printing utilities built on them.

mod diagnostics;
pub mod print;
pub mod visit;

pub use diagnostics::{LexError, LexErrorKind, SyntaxError, SyntaxErrorKind};

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum TokenKind {
    // Keywords
    Fun,
    Var,
    If,
    Else,
    While,
    Return,
    // Type keywords
    IntType,
    StringType,
    BooleanType,
    UnitType,
    // Literals
    IntegerLiteral,
    StringLiteral,
    BooleanLiteral,
    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqualEqual,
    BangEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    AndAnd,
    OrOr,
    Bang,
    // Punctuation
    OpenParenthesis,
    CloseParenthesis,
    OpenBrace,
    CloseBrace,
    Comma,
    Colon,
    Identifier,
    Eof,
}

impl TokenKind {
    /// Human readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Fun => "'fun'",
            TokenKind::Var => "'var'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Return => "'return'",
            TokenKind::IntType => "'Int'",
            TokenKind::StringType => "'String'",
            TokenKind::BooleanType => "'Boolean'",
            TokenKind::UnitType => "'Unit'",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Assign => "'='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::BangEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LessEqual => "'<='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::OpenParenthesis => "'('",
            TokenKind::CloseParenthesis => "')'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
        }
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::IntType
                | TokenKind::StringType
                | TokenKind::BooleanType
                | TokenKind::UnitType
        )
    }

    /// Tokens that may begin an expression.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::IntegerLiteral
                | TokenKind::StringLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::OpenParenthesis
                | TokenKind::Bang
        )
    }
}

/// A lexeme with its 1-based source position. `column` counts characters.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::IntegerLiteral | TokenKind::StringLiteral | TokenKind::BooleanLiteral => {
                write!(f, "{} {}", self.kind.describe(), self.text)
            }
            _ => write!(f, "{}", self.kind.describe()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Type {
    Int,
    String,
    Boolean,
    Unit,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "Int",
            Type::String => "String",
            Type::Boolean => "Boolean",
            Type::Unit => "Unit",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub functions: Vec<FunctionDeclaration>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    VariableDeclaration {
        name: String,
        ty: Type,
        value: Expr,
    },
    VariableAssignment {
        name: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Return(Option<Expr>),
    Expression(Expr),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    And {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Equality {
        left: Box<Expr>,
        op: EqualityOp,
        right: Box<Expr>,
    },
    Comparison {
        left: Box<Expr>,
        op: ComparisonOp,
        right: Box<Expr>,
    },
    AddSub {
        left: Box<Expr>,
        op: AddSubOp,
        right: Box<Expr>,
    },
    MulDiv {
        left: Box<Expr>,
        op: MulDivOp,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Primary(Primary),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Primary {
    Paren(Box<Expr>),
    Int(i32),
    /// Raw text between the quotes, escapes untouched.
    Str(String),
    Bool(bool),
    Identifier(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EqualityOp {
    Eq,
    Neq,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComparisonOp {
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AddSubOp {
    Plus,
    Minus,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MulDivOp {
    Mult,
    Div,
    Mod,
}

/// Flat view over every binary operator. This is the precedence table:
/// adding an operator means adding a variant and one arm in each match below.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    Or,
    And,
    Equality(EqualityOp),
    Comparison(ComparisonOp),
    AddSub(AddSubOp),
    MulDiv(MulDivOp),
}

/// Binding level of prefix `!`, tighter than every binary operator.
pub const UNARY_LEVEL: u8 = 7;

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        let op = match kind {
            TokenKind::OrOr => BinaryOp::Or,
            TokenKind::AndAnd => BinaryOp::And,
            TokenKind::EqualEqual => BinaryOp::Equality(EqualityOp::Eq),
            TokenKind::BangEqual => BinaryOp::Equality(EqualityOp::Neq),
            TokenKind::Less => BinaryOp::Comparison(ComparisonOp::Lt),
            TokenKind::Greater => BinaryOp::Comparison(ComparisonOp::Gt),
            TokenKind::LessEqual => BinaryOp::Comparison(ComparisonOp::Le),
            TokenKind::GreaterEqual => BinaryOp::Comparison(ComparisonOp::Ge),
            TokenKind::Plus => BinaryOp::AddSub(AddSubOp::Plus),
            TokenKind::Minus => BinaryOp::AddSub(AddSubOp::Minus),
            TokenKind::Star => BinaryOp::MulDiv(MulDivOp::Mult),
            TokenKind::Slash => BinaryOp::MulDiv(MulDivOp::Div),
            TokenKind::Percent => BinaryOp::MulDiv(MulDivOp::Mod),
            _ => return None,
        };
        Some(op)
    }

    /// Precedence level, 1 binds loosest. All levels are left-associative.
    pub fn level(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Equality(_) => 3,
            BinaryOp::Comparison(_) => 4,
            BinaryOp::AddSub(_) => 5,
            BinaryOp::MulDiv(_) => 6,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equality(EqualityOp::Eq) => "==",
            BinaryOp::Equality(EqualityOp::Neq) => "!=",
            BinaryOp::Comparison(ComparisonOp::Lt) => "<",
            BinaryOp::Comparison(ComparisonOp::Gt) => ">",
            BinaryOp::Comparison(ComparisonOp::Le) => "<=",
            BinaryOp::Comparison(ComparisonOp::Ge) => ">=",
            BinaryOp::AddSub(AddSubOp::Plus) => "+",
            BinaryOp::AddSub(AddSubOp::Minus) => "-",
            BinaryOp::MulDiv(MulDivOp::Mult) => "*",
            BinaryOp::MulDiv(MulDivOp::Div) => "/",
            BinaryOp::MulDiv(MulDivOp::Mod) => "%",
        }
    }
}

impl Expr {
    /// Builds the node tag that corresponds to `op`.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        let left = Box::new(left);
        let right = Box::new(right);
        match op {
            BinaryOp::Or => Expr::Or { left, right },
            BinaryOp::And => Expr::And { left, right },
            BinaryOp::Equality(op) => Expr::Equality { left, op, right },
            BinaryOp::Comparison(op) => Expr::Comparison { left, op, right },
            BinaryOp::AddSub(op) => Expr::AddSub { left, op, right },
            BinaryOp::MulDiv(op) => Expr::MulDiv { left, op, right },
        }
    }

    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self {
            Expr::Or { left, right } => Some((BinaryOp::Or, left, right)),
            Expr::And { left, right } => Some((BinaryOp::And, left, right)),
            Expr::Equality { left, op, right } => Some((BinaryOp::Equality(*op), left, right)),
            Expr::Comparison { left, op, right } => Some((BinaryOp::Comparison(*op), left, right)),
            Expr::AddSub { left, op, right } => Some((BinaryOp::AddSub(*op), left, right)),
            Expr::MulDiv { left, op, right } => Some((BinaryOp::MulDiv(*op), left, right)),
            Expr::Not(_) | Expr::Call { .. } | Expr::Primary(_) => None,
        }
    }

    pub fn int(value: i32) -> Expr {
        Expr::Primary(Primary::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Primary(Primary::Str(value.into()))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Primary(Primary::Bool(value))
    }

    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Primary(Primary::Identifier(name.into()))
    }

    pub fn paren(inner: Expr) -> Expr {
        Expr::Primary(Primary::Paren(Box::new(inner)))
    }

    pub fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.into(),
            args,
        }
    }
}
