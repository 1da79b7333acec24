//! Tree traversal over the AST.
//!
//! Two independent utilities:
//!
//! - [`Visitor`] + `walk_*`: side-effecting walk. `enter_*` fires before a
//!   node's children (pre-order), `exit_*` after them (post-order). Children
//!   are visited in source order.
//! - [`Fold`] + `fold_*`: bottom-up evaluation. Each node receives the results
//!   already computed for its children, in source order.
//!
//! The node types stay closed enums; match on the node inside a callback to
//! dispatch on its tag.

use crate::{Block, Expr, FunctionDeclaration, Parameter, Primary, Program, Stmt};

pub trait Visitor {
    fn enter_program(&mut self, _program: &Program) {}
    fn exit_program(&mut self, _program: &Program) {}
    fn enter_function(&mut self, _function: &FunctionDeclaration) {}
    fn exit_function(&mut self, _function: &FunctionDeclaration) {}
    fn enter_parameter(&mut self, _parameter: &Parameter) {}
    fn exit_parameter(&mut self, _parameter: &Parameter) {}
    fn enter_block(&mut self, _block: &Block) {}
    fn exit_block(&mut self, _block: &Block) {}
    fn enter_stmt(&mut self, _stmt: &Stmt) {}
    fn exit_stmt(&mut self, _stmt: &Stmt) {}
    fn enter_expr(&mut self, _expr: &Expr) {}
    fn exit_expr(&mut self, _expr: &Expr) {}
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    visitor.enter_program(program);
    for function in &program.functions {
        walk_function(visitor, function);
    }
    visitor.exit_program(program);
}

pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, function: &FunctionDeclaration) {
    visitor.enter_function(function);
    for parameter in &function.parameters {
        visitor.enter_parameter(parameter);
        visitor.exit_parameter(parameter);
    }
    walk_block(visitor, &function.body);
    visitor.exit_function(function);
}

pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) {
    visitor.enter_block(block);
    for stmt in &block.statements {
        walk_stmt(visitor, stmt);
    }
    visitor.exit_block(block);
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    visitor.enter_stmt(stmt);
    match stmt {
        Stmt::VariableDeclaration { value, .. } | Stmt::VariableAssignment { value, .. } => {
            walk_expr(visitor, value);
        }
        Stmt::If {
            condition,
            then_block,
            else_block,
        } => {
            walk_expr(visitor, condition);
            walk_block(visitor, then_block);
            if let Some(else_block) = else_block {
                walk_block(visitor, else_block);
            }
        }
        Stmt::While { condition, body } => {
            walk_expr(visitor, condition);
            walk_block(visitor, body);
        }
        Stmt::Return(value) => {
            if let Some(value) = value {
                walk_expr(visitor, value);
            }
        }
        Stmt::Expression(expr) => walk_expr(visitor, expr),
    }
    visitor.exit_stmt(stmt);
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    visitor.enter_expr(expr);
    match expr {
        Expr::Or { left, right }
        | Expr::And { left, right }
        | Expr::Equality { left, right, .. }
        | Expr::Comparison { left, right, .. }
        | Expr::AddSub { left, right, .. }
        | Expr::MulDiv { left, right, .. } => {
            walk_expr(visitor, left);
            walk_expr(visitor, right);
        }
        Expr::Not(inner) | Expr::Primary(Primary::Paren(inner)) => walk_expr(visitor, inner),
        Expr::Call { args, .. } => {
            for arg in args {
                walk_expr(visitor, arg);
            }
        }
        // Leaves
        Expr::Primary(
            Primary::Int(_) | Primary::Str(_) | Primary::Bool(_) | Primary::Identifier(_),
        ) => {}
    }
    visitor.exit_expr(expr);
}

/// Bottom-up evaluation. `children` always holds the results for the node's
/// direct children in source order:
///
/// - binary expressions: `[left, right]`; `Not` and parenthesized: `[inner]`;
///   calls: one entry per argument; literals and identifiers: empty.
/// - statements: the expression (if any) first, then each block
///   (`If` yields `[condition, then]` or `[condition, then, else]`).
/// - functions: one result per parameter, then the body.
pub trait Fold {
    type Output;

    fn expr(&mut self, expr: &Expr, children: Vec<Self::Output>) -> Self::Output;
    fn stmt(&mut self, stmt: &Stmt, children: Vec<Self::Output>) -> Self::Output;
    fn block(&mut self, block: &Block, statements: Vec<Self::Output>) -> Self::Output;
    fn parameter(&mut self, parameter: &Parameter) -> Self::Output;
    fn function(
        &mut self,
        function: &FunctionDeclaration,
        parameters: Vec<Self::Output>,
        body: Self::Output,
    ) -> Self::Output;
    fn program(&mut self, program: &Program, functions: Vec<Self::Output>) -> Self::Output;
}

pub fn fold_program<F: Fold + ?Sized>(folder: &mut F, program: &Program) -> F::Output {
    let functions = program
        .functions
        .iter()
        .map(|function| fold_function(folder, function))
        .collect();
    folder.program(program, functions)
}

pub fn fold_function<F: Fold + ?Sized>(
    folder: &mut F,
    function: &FunctionDeclaration,
) -> F::Output {
    let parameters = function
        .parameters
        .iter()
        .map(|parameter| folder.parameter(parameter))
        .collect();
    let body = fold_block(folder, &function.body);
    folder.function(function, parameters, body)
}

pub fn fold_block<F: Fold + ?Sized>(folder: &mut F, block: &Block) -> F::Output {
    let statements = block
        .statements
        .iter()
        .map(|stmt| fold_stmt(folder, stmt))
        .collect();
    folder.block(block, statements)
}

pub fn fold_stmt<F: Fold + ?Sized>(folder: &mut F, stmt: &Stmt) -> F::Output {
    let children = match stmt {
        Stmt::VariableDeclaration { value, .. } | Stmt::VariableAssignment { value, .. } => {
            vec![fold_expr(folder, value)]
        }
        Stmt::If {
            condition,
            then_block,
            else_block,
        } => {
            let mut children = vec![fold_expr(folder, condition), fold_block(folder, then_block)];
            if let Some(else_block) = else_block {
                children.push(fold_block(folder, else_block));
            }
            children
        }
        Stmt::While { condition, body } => {
            vec![fold_expr(folder, condition), fold_block(folder, body)]
        }
        Stmt::Return(Some(value)) | Stmt::Expression(value) => vec![fold_expr(folder, value)],
        Stmt::Return(None) => Vec::new(),
    };
    folder.stmt(stmt, children)
}

pub fn fold_expr<F: Fold + ?Sized>(folder: &mut F, expr: &Expr) -> F::Output {
    let children = match expr {
        Expr::Or { left, right }
        | Expr::And { left, right }
        | Expr::Equality { left, right, .. }
        | Expr::Comparison { left, right, .. }
        | Expr::AddSub { left, right, .. }
        | Expr::MulDiv { left, right, .. } => {
            vec![fold_expr(folder, left), fold_expr(folder, right)]
        }
        Expr::Not(inner) | Expr::Primary(Primary::Paren(inner)) => vec![fold_expr(folder, inner)],
        Expr::Call { args, .. } => args.iter().map(|arg| fold_expr(folder, arg)).collect(),
        Expr::Primary(_) => Vec::new(),
    };
    folder.expr(expr, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddSubOp, BinaryOp, MulDivOp, Type};

    fn sample_program() -> Program {
        // fun f(a: Int): Int { if (a > 0) { return a * 2 } else { return 0 } }
        let cond = Expr::binary(
            BinaryOp::Comparison(crate::ComparisonOp::Gt),
            Expr::ident("a"),
            Expr::int(0),
        );
        let doubled = Expr::binary(
            BinaryOp::MulDiv(MulDivOp::Mult),
            Expr::ident("a"),
            Expr::int(2),
        );
        Program {
            functions: vec![FunctionDeclaration {
                name: "f".to_string(),
                parameters: vec![Parameter {
                    name: "a".to_string(),
                    ty: Type::Int,
                }],
                return_type: Type::Int,
                body: Block {
                    statements: vec![Stmt::If {
                        condition: cond,
                        then_block: Block {
                            statements: vec![Stmt::Return(Some(doubled))],
                        },
                        else_block: Some(Block {
                            statements: vec![Stmt::Return(Some(Expr::int(0)))],
                        }),
                    }],
                },
            }],
        }
    }

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visitor for Trace {
        fn enter_function(&mut self, function: &FunctionDeclaration) {
            self.0.push(format!("enter fun {}", function.name));
        }
        fn exit_function(&mut self, function: &FunctionDeclaration) {
            self.0.push(format!("exit fun {}", function.name));
        }
        fn enter_parameter(&mut self, parameter: &Parameter) {
            self.0.push(format!("param {}", parameter.name));
        }
        fn enter_stmt(&mut self, stmt: &Stmt) {
            let tag = match stmt {
                Stmt::If { .. } => "if",
                Stmt::Return(_) => "return",
                _ => "other",
            };
            self.0.push(format!("enter {tag}"));
        }
        fn exit_stmt(&mut self, stmt: &Stmt) {
            let tag = match stmt {
                Stmt::If { .. } => "if",
                Stmt::Return(_) => "return",
                _ => "other",
            };
            self.0.push(format!("exit {tag}"));
        }
        fn enter_block(&mut self, block: &Block) {
            self.0.push(format!("enter block({})", block.statements.len()));
        }
        fn exit_block(&mut self, block: &Block) {
            self.0.push(format!("exit block({})", block.statements.len()));
        }
        fn exit_expr(&mut self, expr: &Expr) {
            if let Expr::Primary(Primary::Identifier(name)) = expr {
                self.0.push(format!("ident {name}"));
            }
        }
    }

    #[test]
    fn walker_visits_pre_and_post_order() {
        let mut trace = Trace::default();
        walk_program(&mut trace, &sample_program());
        assert_eq!(
            trace.0,
            vec![
                "enter fun f",
                "param a",
                "enter block(1)",
                "enter if",
                "ident a",
                "enter block(1)",
                "enter return",
                "ident a",
                "exit return",
                "exit block(1)",
                "enter block(1)",
                "enter return",
                "exit return",
                "exit block(1)",
                "exit if",
                "exit block(1)",
                "exit fun f",
            ]
        );
    }

    struct NodeCount;

    impl Fold for NodeCount {
        type Output = usize;

        fn expr(&mut self, _expr: &Expr, children: Vec<usize>) -> usize {
            1 + children.iter().sum::<usize>()
        }
        fn stmt(&mut self, _stmt: &Stmt, children: Vec<usize>) -> usize {
            1 + children.iter().sum::<usize>()
        }
        fn block(&mut self, _block: &Block, statements: Vec<usize>) -> usize {
            1 + statements.iter().sum::<usize>()
        }
        fn parameter(&mut self, _parameter: &Parameter) -> usize {
            1
        }
        fn function(
            &mut self,
            _function: &FunctionDeclaration,
            parameters: Vec<usize>,
            body: usize,
        ) -> usize {
            1 + parameters.iter().sum::<usize>() + body
        }
        fn program(&mut self, _program: &Program, functions: Vec<usize>) -> usize {
            1 + functions.iter().sum::<usize>()
        }
    }

    #[test]
    fn fold_counts_every_node() {
        // program, function, parameter a, body block, if, condition (3),
        // then block, return, a * 2 (3), else block, return, 0
        assert_eq!(fold_program(&mut NodeCount, &sample_program()), 16);
    }

    /// Constant evaluator for integer expressions; `None` when anything is not constant.
    struct ConstEval;

    impl Fold for ConstEval {
        type Output = Option<i64>;

        fn expr(&mut self, expr: &Expr, children: Vec<Option<i64>>) -> Option<i64> {
            match expr {
                Expr::Primary(Primary::Int(v)) => Some(i64::from(*v)),
                Expr::Primary(Primary::Paren(_)) => children[0],
                Expr::AddSub { op, .. } => {
                    let (l, r) = (children[0]?, children[1]?);
                    Some(match op {
                        AddSubOp::Plus => l + r,
                        AddSubOp::Minus => l - r,
                    })
                }
                Expr::MulDiv { op, .. } => {
                    let (l, r) = (children[0]?, children[1]?);
                    match op {
                        MulDivOp::Mult => Some(l * r),
                        MulDivOp::Div => l.checked_div(r),
                        MulDivOp::Mod => l.checked_rem(r),
                    }
                }
                _ => None,
            }
        }
        fn stmt(&mut self, _stmt: &Stmt, children: Vec<Option<i64>>) -> Option<i64> {
            children.into_iter().next().flatten()
        }
        fn block(&mut self, _block: &Block, statements: Vec<Option<i64>>) -> Option<i64> {
            statements.into_iter().last().flatten()
        }
        fn parameter(&mut self, _parameter: &Parameter) -> Option<i64> {
            None
        }
        fn function(
            &mut self,
            _function: &FunctionDeclaration,
            _parameters: Vec<Option<i64>>,
            body: Option<i64>,
        ) -> Option<i64> {
            body
        }
        fn program(&mut self, _program: &Program, functions: Vec<Option<i64>>) -> Option<i64> {
            functions.into_iter().last().flatten()
        }
    }

    #[test]
    fn fold_evaluates_bottom_up() {
        // (1 + 2) * 3 - 4 % 3
        let sum = Expr::paren(Expr::binary(
            BinaryOp::AddSub(AddSubOp::Plus),
            Expr::int(1),
            Expr::int(2),
        ));
        let product = Expr::binary(BinaryOp::MulDiv(MulDivOp::Mult), sum, Expr::int(3));
        let rem = Expr::binary(BinaryOp::MulDiv(MulDivOp::Mod), Expr::int(4), Expr::int(3));
        let expr = Expr::binary(BinaryOp::AddSub(AddSubOp::Minus), product, rem);
        assert_eq!(fold_expr(&mut ConstEval, &expr), Some(8));

        let with_var = Expr::binary(
            BinaryOp::AddSub(AddSubOp::Plus),
            Expr::int(1),
            Expr::ident("x"),
        );
        assert_eq!(fold_expr(&mut ConstEval, &with_var), None);
    }

    #[test]
    fn fold_passes_call_arguments_in_order() {
        struct Names;
        impl Fold for Names {
            type Output = String;
            fn expr(&mut self, expr: &Expr, children: Vec<String>) -> String {
                match expr {
                    Expr::Call { name, .. } => format!("{name}({})", children.join(",")),
                    Expr::Primary(Primary::Identifier(n)) => n.clone(),
                    Expr::Primary(Primary::Int(v)) => v.to_string(),
                    _ => children.concat(),
                }
            }
            fn stmt(&mut self, _: &Stmt, children: Vec<String>) -> String {
                children.concat()
            }
            fn block(&mut self, _: &Block, statements: Vec<String>) -> String {
                statements.concat()
            }
            fn parameter(&mut self, parameter: &Parameter) -> String {
                format!("{}: {}", parameter.name, parameter.ty.name())
            }
            fn function(
                &mut self,
                function: &FunctionDeclaration,
                parameters: Vec<String>,
                body: String,
            ) -> String {
                format!("{}({}){{{body}}}", function.name, parameters.join(", "))
            }
            fn program(&mut self, _: &Program, functions: Vec<String>) -> String {
                functions.concat()
            }
        }

        let call = Expr::call("g", vec![Expr::ident("a"), Expr::int(1), Expr::call("h", vec![])]);
        assert_eq!(fold_expr(&mut Names, &call), "g(a,1,h())");
    }

    #[test]
    fn fold_sees_parameters_before_body() {
        struct Signature;
        impl Fold for Signature {
            type Output = String;
            fn expr(&mut self, _: &Expr, _: Vec<String>) -> String {
                String::new()
            }
            fn stmt(&mut self, _: &Stmt, _: Vec<String>) -> String {
                String::new()
            }
            fn block(&mut self, _: &Block, statements: Vec<String>) -> String {
                format!("{} stmts", statements.len())
            }
            fn parameter(&mut self, parameter: &Parameter) -> String {
                format!("{}: {}", parameter.name, parameter.ty.name())
            }
            fn function(
                &mut self,
                function: &FunctionDeclaration,
                parameters: Vec<String>,
                body: String,
            ) -> String {
                format!("{}({}) {body}", function.name, parameters.join(", "))
            }
            fn program(&mut self, _: &Program, functions: Vec<String>) -> String {
                functions.join("; ")
            }
        }

        let mut program = sample_program();
        program.functions[0].parameters.push(Parameter {
            name: "s".to_string(),
            ty: Type::String,
        });
        assert_eq!(fold_program(&mut Signature, &program), "f(a: Int, s: String) 1 stmts");
    }
}
