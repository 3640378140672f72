//! Single-pass static checker.
//!
//! Walks the AST once, threading a lexical [`State`] and a name-resolution
//! [`Scope`] through the recursion. Name-defining positions (an
//! assignment's left-hand `Var`, a function's parameters, a function's
//! own name) are visited under `State::InVarDef`, which inserts into the
//! scope instead of requiring a prior definition. The first violation
//! aborts the whole pass with its node's span — there is no partial
//! repair.

use std::collections::HashMap;

use crate::ast::{Ast, BlockKind, ControlOp, Node, NodeId, NodeKind};
use crate::builtins;
use crate::cursor::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    InFunc,
    InWhile,
    InVarDef,
}

#[derive(Debug, Clone)]
enum Def {
    Int,
    Func { node: NodeId, arity: usize },
    Builtin,
}

#[derive(Debug, Clone, Default)]
struct Scope {
    defs: HashMap<String, Def>,
}

impl Scope {
    fn with_builtins() -> Self {
        let mut defs = HashMap::new();
        for name in builtins::BUILTIN_NAMES {
            defs.insert(name.to_string(), Def::Builtin);
        }
        Scope { defs }
    }

    fn insert(&mut self, name: String, def: Def) {
        self.defs.insert(name, def);
    }

    fn get(&self, name: &str) -> Option<&Def> {
        self.defs.get(name)
    }
}

#[derive(Debug, Clone)]
pub struct CheckError {
    pub span: Span,
    pub message: String,
}

/// Runs the static checker over a parsed program.
pub fn check(ast: &Ast) -> Result<(), CheckError> {
    let mut scope = Scope::with_builtins();
    check_node(ast, ast.root(), &mut scope, State::None)
}

fn fail(node: &Node, message: impl Into<String>) -> Result<(), CheckError> {
    Err(CheckError {
        span: node.span,
        message: message.into(),
    })
}

fn check_node(ast: &Ast, id: NodeId, scope: &mut Scope, state: State) -> Result<(), CheckError> {
    let node = ast.get(id);
    match &node.kind {
        NodeKind::Const(_) => {
            if !node.children.is_empty() {
                return fail(node, "constant node must have no children");
            }
            Ok(())
        }
        NodeKind::Var(name) => check_var(node, name, scope, state),
        NodeKind::OpControl(op) => check_control(ast, node, *op, scope, state),
        NodeKind::FuncDef(name) => check_funcdef(ast, id, node, name, scope),
        NodeKind::FuncCall(name) => check_funccall(ast, node, name, scope, state),
        NodeKind::Block(kind) => check_block(ast, node, *kind, scope, state),
        NodeKind::Loop => check_loop(ast, node, scope),
        NodeKind::OpUna(_) => {
            if node.children.len() != 1 {
                return fail(node, "unary operator must have exactly one operand");
            }
            check_node(ast, node.children[0], scope, state)
        }
        NodeKind::OpEq => check_opeq(ast, node, scope, state),
        NodeKind::OpLogic(_) | NodeKind::OpComp(_) | NodeKind::OpMath(_) => {
            if node.children.len() != 2 {
                return fail(node, "binary operator must have exactly two operands");
            }
            check_node(ast, node.children[0], scope, state)?;
            check_node(ast, node.children[1], scope, state)
        }
        NodeKind::Compound | NodeKind::Args => {
            for &child in &node.children {
                check_node(ast, child, scope, state)?;
            }
            Ok(())
        }
    }
}

fn check_var(node: &Node, name: &str, scope: &mut Scope, state: State) -> Result<(), CheckError> {
    if !node.children.is_empty() {
        return fail(node, "variable node must have no children");
    }
    if state == State::InVarDef {
        scope.insert(name.to_string(), Def::Int);
        return Ok(());
    }
    if scope.get(name).is_some() {
        Ok(())
    } else {
        fail(node, "_var should be defined before being used!")
    }
}

fn check_control(
    ast: &Ast,
    node: &Node,
    op: ControlOp,
    scope: &mut Scope,
    state: State,
) -> Result<(), CheckError> {
    match op {
        ControlOp::Break | ControlOp::Continue => {
            if !node.children.is_empty() {
                return fail(node, "break/continue must have no children");
            }
            if state != State::InWhile {
                let word = if op == ControlOp::Break { "break" } else { "continue" };
                return fail(node, format!("cannot {word} outside of a loop!"));
            }
            Ok(())
        }
        ControlOp::Return => {
            if node.children.len() != 1 {
                return fail(node, "return must carry exactly one expression");
            }
            if state != State::InFunc {
                return fail(node, "cannot return outside of a function!");
            }
            check_node(ast, node.children[0], scope, state)
        }
    }
}

fn check_opeq(ast: &Ast, node: &Node, scope: &mut Scope, state: State) -> Result<(), CheckError> {
    if node.children.len() != 2 {
        return fail(node, "assignment must have exactly two children");
    }
    let lhs = ast.get(node.children[0]);
    if !matches!(lhs.kind, NodeKind::Var(_)) {
        return fail(node, "assignment target must be a variable");
    }
    check_node(ast, node.children[0], scope, State::InVarDef)?;
    check_node(ast, node.children[1], scope, state)
}

fn check_block(
    ast: &Ast,
    node: &Node,
    kind: BlockKind,
    scope: &mut Scope,
    state: State,
) -> Result<(), CheckError> {
    match kind {
        BlockKind::IfElse => {
            if node.children.is_empty() {
                return fail(node, "ifelse chain must have at least one branch");
            }
            for &child in &node.children {
                check_node(ast, child, scope, state)?;
            }
            Ok(())
        }
        BlockKind::If | BlockKind::Elif => {
            if node.children.len() != 2 {
                return fail(node, "if/elif must have a condition and a body");
            }
            check_node(ast, node.children[0], scope, state)?;
            let body = ast.get(node.children[1]);
            if !matches!(body.kind, NodeKind::Compound) {
                return fail(node, "if/elif body must be a compound block");
            }
            check_node(ast, node.children[1], scope, state)
        }
        BlockKind::Else => {
            if node.children.len() != 1 {
                return fail(node, "else must have exactly one body");
            }
            let body = ast.get(node.children[0]);
            if !matches!(body.kind, NodeKind::Compound) {
                return fail(node, "else body must be a compound block");
            }
            check_node(ast, node.children[0], scope, state)
        }
    }
}

fn check_loop(ast: &Ast, node: &Node, scope: &mut Scope) -> Result<(), CheckError> {
    if node.children.len() != 2 {
        return fail(node, "while must have a condition and a body");
    }
    let body = ast.get(node.children[1]);
    if !matches!(body.kind, NodeKind::Compound) {
        return fail(node, "while body must be a compound block");
    }
    check_node(ast, node.children[0], scope, State::InWhile)?;
    check_node(ast, node.children[1], scope, State::InWhile)
}

fn check_funcdef(
    ast: &Ast,
    id: NodeId,
    node: &Node,
    name: &str,
    scope: &mut Scope,
) -> Result<(), CheckError> {
    if node.children.len() != 2 {
        return fail(node, "function definition must have an argument list and a body");
    }
    let args_node = ast.get(node.children[0]);
    if !matches!(args_node.kind, NodeKind::Args) {
        return fail(node, "function definition must start with an argument list");
    }
    let body_node = ast.get(node.children[1]);
    if !matches!(body_node.kind, NodeKind::Compound) {
        return fail(node, "function body must be a compound block");
    }

    let arity = args_node.children.len();
    scope.insert(name.to_string(), Def::Func { node: id, arity });

    let mut body_scope = scope.clone();
    check_node(ast, node.children[0], &mut body_scope, State::InVarDef)?;
    check_node(ast, node.children[1], &mut body_scope, State::InFunc)
}

fn check_funccall(
    ast: &Ast,
    node: &Node,
    name: &str,
    scope: &mut Scope,
    state: State,
) -> Result<(), CheckError> {
    match scope.get(name).cloned() {
        Some(Def::Builtin) => {
            for &child in &node.children {
                check_node(ast, child, scope, state)?;
            }
            Ok(())
        }
        Some(Def::Func { arity, .. }) => {
            if node.children.len() != arity {
                return fail(node, "wrong number of arguments in function call!");
            }
            for &child in &node.children {
                check_node(ast, child, scope, state)?;
            }
            Ok(())
        }
        Some(Def::Int) | None => fail(node, "_func should be defined before being used!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn check_src(src: &str) -> Result<(), CheckError> {
        let ast = Parser::new(src).parse().expect("source must parse");
        check(&ast)
    }

    #[test]
    fn rejects_undefined_variable() {
        let err = check_src("x;").unwrap_err();
        assert_eq!(err.message, "_var should be defined before being used!");
    }

    #[test]
    fn rejects_break_outside_loop() {
        let err = check_src("break;").unwrap_err();
        assert_eq!(err.message, "cannot break outside of a loop!");
    }

    #[test]
    fn rejects_return_outside_function() {
        let err = check_src("return 1;").unwrap_err();
        assert_eq!(err.message, "cannot return outside of a function!");
    }

    #[test]
    fn accepts_break_inside_while() {
        assert!(check_src("while(1) { break; };").is_ok());
    }

    #[test]
    fn accepts_function_with_matching_arity() {
        assert!(check_src("funk add(x, y) { return x+y; }; add(1,2);").is_ok());
    }

    #[test]
    fn rejects_arity_mismatch() {
        let err = check_src("funk add(x, y) { return x+y; }; add(1);").unwrap_err();
        assert_eq!(err.message, "wrong number of arguments in function call!");
    }

    #[test]
    fn rejects_undefined_function() {
        let err = check_src("f(1);").unwrap_err();
        assert_eq!(err.message, "_func should be defined before being used!");
    }

    #[test]
    fn locals_do_not_leak_out_of_function_body() {
        // `y` is a parameter, local to `add`'s body only.
        let err = check_src("funk add(y) { return y; }; y;").unwrap_err();
        assert_eq!(err.message, "_var should be defined before being used!");
    }
}
