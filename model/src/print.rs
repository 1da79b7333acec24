//! Canonical source rendering of the AST.
//!
//! Output re-parses to a structurally equal tree for any tree the parser
//! produced. Parenthesized expressions are printed as written; for trees
//! built by hand, parentheses are added wherever a child binds looser than
//! its position requires, so the printed text keeps the tree's meaning.

use std::fmt;

use crate::{BinaryOp, Block, Expr, FunctionDeclaration, Primary, Program, Stmt, UNARY_LEVEL};

const INDENT: &str = "    ";

pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.program(program);
    printer.out
}

pub fn print_function(function: &FunctionDeclaration) -> String {
    let mut printer = Printer::default();
    printer.function(function);
    printer.out
}

pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::default();
    printer.stmt(stmt);
    printer.out.trim_end().to_string()
}

pub fn print_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn program(&mut self, program: &Program) {
        for (i, function) in program.functions.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.function(function);
        }
    }

    fn function(&mut self, function: &FunctionDeclaration) {
        let params = function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.name()))
            .collect::<Vec<_>>()
            .join(", ");
        let header = format!(
            "fun {}({}): {} {{",
            function.name,
            params,
            function.return_type.name()
        );
        self.line(&header);
        self.block_body(&function.body);
        self.line("}");
    }

    fn block_body(&mut self, block: &Block) {
        self.depth += 1;
        for stmt in &block.statements {
            self.stmt(stmt);
        }
        self.depth -= 1;
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VariableDeclaration { name, ty, value } => {
                self.line(&format!("var {}: {} = {}", name, ty.name(), print_expr(value)));
            }
            Stmt::VariableAssignment { name, value } => {
                self.line(&format!("{} = {}", name, print_expr(value)));
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                self.line(&format!("if ({}) {{", print_expr(condition)));
                self.block_body(then_block);
                match else_block {
                    Some(else_block) => {
                        self.line("} else {");
                        self.block_body(else_block);
                        self.line("}");
                    }
                    None => self.line("}"),
                }
            }
            Stmt::While { condition, body } => {
                self.line(&format!("while ({}) {{", print_expr(condition)));
                self.block_body(body);
                self.line("}");
            }
            Stmt::Return(Some(value)) => self.line(&format!("return {}", print_expr(value))),
            // A bare return followed by an expression statement would re-parse
            // as `return <expr>`; the parser never produces that sequence.
            Stmt::Return(None) => self.line("return"),
            Stmt::Expression(expr) => self.line(&print_expr(expr)),
        }
    }
}

/// Binding level of the node when it appears as an operand.
fn level_of(expr: &Expr) -> u8 {
    match expr.as_binary() {
        Some((op, _, _)) => op.level(),
        None if matches!(expr, Expr::Not(_)) => UNARY_LEVEL,
        None => UNARY_LEVEL + 1,
    }
}

fn write_operand(out: &mut String, expr: &Expr, min_level: u8) {
    if level_of(expr) < min_level {
        out.push('(');
        write_expr(out, expr);
        out.push(')');
    } else {
        write_expr(out, expr);
    }
}

fn write_binary(out: &mut String, op: BinaryOp, left: &Expr, right: &Expr) {
    let level = op.level();
    write_operand(out, left, level);
    out.push(' ');
    out.push_str(op.symbol());
    out.push(' ');
    // Left-associative: an equal-level right operand needs parentheses.
    write_operand(out, right, level + 1);
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Or { left, right } => write_binary(out, BinaryOp::Or, left, right),
        Expr::And { left, right } => write_binary(out, BinaryOp::And, left, right),
        Expr::Equality { left, op, right } => {
            write_binary(out, BinaryOp::Equality(*op), left, right)
        }
        Expr::Comparison { left, op, right } => {
            write_binary(out, BinaryOp::Comparison(*op), left, right)
        }
        Expr::AddSub { left, op, right } => write_binary(out, BinaryOp::AddSub(*op), left, right),
        Expr::MulDiv { left, op, right } => write_binary(out, BinaryOp::MulDiv(*op), left, right),
        Expr::Not(inner) => {
            out.push('!');
            write_operand(out, inner, UNARY_LEVEL);
        }
        Expr::Call { name, args } => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg);
            }
            out.push(')');
        }
        Expr::Primary(primary) => match primary {
            Primary::Paren(inner) => {
                out.push('(');
                write_expr(out, inner);
                out.push(')');
            }
            Primary::Int(value) => out.push_str(&value.to_string()),
            Primary::Str(raw) => {
                out.push('"');
                out.push_str(raw);
                out.push('"');
            }
            Primary::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Primary::Identifier(name) => out.push_str(name),
        },
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_program(self))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_stmt(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_expr(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddSubOp, BinaryOp, EqualityOp, MulDivOp, Parameter, Type};

    fn add(l: Expr, r: Expr) -> Expr {
        Expr::binary(BinaryOp::AddSub(AddSubOp::Plus), l, r)
    }

    fn sub(l: Expr, r: Expr) -> Expr {
        Expr::binary(BinaryOp::AddSub(AddSubOp::Minus), l, r)
    }

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::binary(BinaryOp::MulDiv(MulDivOp::Mult), l, r)
    }

    #[test]
    fn prints_flat_expressions_without_parens() {
        let e = add(Expr::int(1), mul(Expr::int(2), Expr::int(3)));
        assert_eq!(print_expr(&e), "1 + 2 * 3");

        let e = sub(sub(Expr::int(1), Expr::int(2)), Expr::int(3));
        assert_eq!(print_expr(&e), "1 - 2 - 3");
    }

    #[test]
    fn adds_parens_where_structure_needs_them() {
        let e = mul(add(Expr::int(1), Expr::int(2)), Expr::int(3));
        assert_eq!(print_expr(&e), "(1 + 2) * 3");

        let e = sub(Expr::int(1), sub(Expr::int(2), Expr::int(3)));
        assert_eq!(print_expr(&e), "1 - (2 - 3)");

        let e = Expr::not(Expr::binary(
            BinaryOp::Equality(EqualityOp::Eq),
            Expr::ident("a"),
            Expr::ident("b"),
        ));
        assert_eq!(print_expr(&e), "!(a == b)");
    }

    #[test]
    fn keeps_explicit_parens() {
        let e = Expr::paren(Expr::int(4));
        assert_eq!(print_expr(&e), "(4)");
        assert_eq!(print_expr(&Expr::not(Expr::not(Expr::bool(true)))), "!!true");
    }

    #[test]
    fn prints_calls_and_literals() {
        let e = Expr::call("println", vec![Expr::string("hi there"), Expr::ident("x")]);
        assert_eq!(e.to_string(), "println(\"hi there\", x)");
        assert_eq!(Expr::call("f", vec![]).to_string(), "f()");
    }

    #[test]
    fn prints_function_with_nested_blocks() {
        let program = Program {
            functions: vec![FunctionDeclaration {
                name: "loop".to_string(),
                parameters: vec![
                    Parameter { name: "n".to_string(), ty: Type::Int },
                    Parameter { name: "s".to_string(), ty: Type::String },
                ],
                return_type: Type::Unit,
                body: Block {
                    statements: vec![
                        Stmt::VariableDeclaration {
                            name: "i".to_string(),
                            ty: Type::Int,
                            value: Expr::int(0),
                        },
                        Stmt::While {
                            condition: Expr::binary(
                                BinaryOp::Comparison(crate::ComparisonOp::Lt),
                                Expr::ident("i"),
                                Expr::ident("n"),
                            ),
                            body: Block {
                                statements: vec![Stmt::VariableAssignment {
                                    name: "i".to_string(),
                                    value: add(Expr::ident("i"), Expr::int(1)),
                                }],
                            },
                        },
                        Stmt::If {
                            condition: Expr::bool(true),
                            then_block: Block::default(),
                            else_block: Some(Block {
                                statements: vec![Stmt::Return(None)],
                            }),
                        },
                    ],
                },
            }],
        };
        let expected = "\
fun loop(n: Int, s: String): Unit {
    var i: Int = 0
    while (i < n) {
        i = i + 1
    }
    if (true) {
    } else {
        return
    }
}
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn separates_functions_with_blank_line() {
        let f = |name: &str| FunctionDeclaration {
            name: name.to_string(),
            parameters: vec![],
            return_type: Type::Unit,
            body: Block::default(),
        };
        let program = Program { functions: vec![f("a"), f("b")] };
        assert_eq!(print_program(&program), "fun a(): Unit {\n}\n\nfun b(): Unit {\n}\n");
    }

    #[test]
    fn prints_single_statement() {
        let stmt = Stmt::Return(Some(Expr::int(1)));
        assert_eq!(stmt.to_string(), "return 1");
    }
}
