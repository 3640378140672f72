//! Tree-walking evaluator.
//!
//! A single mutable "current value" register on [`Scope`] carries
//! results between recursive calls instead of threading return values
//! through every call. Control flow (`break`, `continue`, `return`) is
//! a set of counters on [`Control`], not native exceptions: a `while`
//! consumes exactly one break-or-continue signal per iteration, and a
//! function call consumes exactly one return signal after iterating
//! its body.

use std::collections::HashMap;
use std::fmt;

use crate::ast::{Ast, BlockKind, CompOp, ControlOp, LogicOp, MathOp, Node, NodeId, NodeKind, UnaOp};
use crate::builtins;

#[derive(Debug, Clone, Copy, Default)]
struct Control {
    break_count: u32,
    continue_count: u32,
    return_count: u32,
}

impl Control {
    fn pending(&self) -> bool {
        self.break_count > 0 || self.continue_count > 0 || self.return_count > 0
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Int(i64),
    Func(NodeId),
}

/// A name-resolution environment plus the "current value" register.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    defs: HashMap<String, Entry>,
    current_val: i64,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    fn get(&self, name: &str) -> Option<&Entry> {
        self.defs.get(name)
    }

    fn set(&mut self, name: String, entry: Entry) {
        self.defs.insert(name, entry);
    }
}

#[derive(Debug, Clone)]
pub struct EvalError {
    pub message: String,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

/// Evaluates a checked program and returns the value left in the root
/// scope's register.
pub fn run(ast: &Ast) -> Result<i64, EvalError> {
    let mut scope = Scope::new();
    let mut control = Control::default();
    log::debug!("evaluating program");
    eval_node(ast, ast.root(), &mut scope, &mut control)?;
    Ok(scope.current_val)
}

fn eval_node(ast: &Ast, id: NodeId, scope: &mut Scope, control: &mut Control) -> Result<(), EvalError> {
    let node = ast.get(id);
    match &node.kind {
        NodeKind::Const(value) => {
            scope.current_val = *value;
            Ok(())
        }
        NodeKind::Var(name) => {
            if let Some(Entry::Int(value)) = scope.get(name) {
                scope.current_val = *value;
            }
            Ok(())
        }
        NodeKind::OpEq => eval_opeq(ast, node, scope, control),
        NodeKind::OpUna(op) => {
            eval_node(ast, node.children[0], scope, control)?;
            scope.current_val = match op {
                UnaOp::Plus => scope.current_val,
                UnaOp::Minus => -scope.current_val,
                UnaOp::Not => i64::from(scope.current_val == 0),
            };
            Ok(())
        }
        NodeKind::OpMath(op) => eval_math(ast, node, *op, scope, control),
        NodeKind::OpComp(op) => eval_comp(ast, node, *op, scope, control),
        NodeKind::OpLogic(op) => eval_logic(ast, node, *op, scope, control),
        NodeKind::Compound => {
            for &child in &node.children {
                eval_node(ast, child, scope, control)?;
                if control.pending() {
                    break;
                }
            }
            Ok(())
        }
        NodeKind::Block(kind) => eval_block(ast, node, *kind, scope, control),
        NodeKind::Loop => eval_loop(ast, node, scope, control),
        NodeKind::OpControl(op) => eval_control(ast, node, *op, scope, control),
        NodeKind::FuncDef(name) => {
            scope.set(name.clone(), Entry::Func(id));
            Ok(())
        }
        NodeKind::FuncCall(name) => eval_funccall(ast, node, name, scope, control),
        NodeKind::Args => Ok(()),
    }
}

fn eval_opeq(ast: &Ast, node: &Node, scope: &mut Scope, control: &mut Control) -> Result<(), EvalError> {
    eval_node(ast, node.children[1], scope, control)?;
    let value = scope.current_val;
    if let NodeKind::Var(name) = &ast.get(node.children[0]).kind {
        scope.set(name.clone(), Entry::Int(value));
    }
    Ok(())
}

fn eval_math(
    ast: &Ast,
    node: &Node,
    op: MathOp,
    scope: &mut Scope,
    control: &mut Control,
) -> Result<(), EvalError> {
    eval_node(ast, node.children[0], scope, control)?;
    let lhs = scope.current_val;
    eval_node(ast, node.children[1], scope, control)?;
    let rhs = scope.current_val;
    scope.current_val = match op {
        MathOp::Add => lhs.wrapping_add(rhs),
        MathOp::Sub => lhs.wrapping_sub(rhs),
        MathOp::Mul => lhs.wrapping_mul(rhs),
        MathOp::Div => lhs.wrapping_div(rhs),
        MathOp::Mod => lhs.wrapping_rem(rhs),
        // Integer exponentiation computed via real pow, then truncated,
        // which loses precision near the edges of i64's range.
        MathOp::Pow => (lhs as f64).powf(rhs as f64).trunc() as i64,
    };
    Ok(())
}

fn eval_comp(
    ast: &Ast,
    node: &Node,
    op: CompOp,
    scope: &mut Scope,
    control: &mut Control,
) -> Result<(), EvalError> {
    eval_node(ast, node.children[0], scope, control)?;
    let lhs = scope.current_val;
    eval_node(ast, node.children[1], scope, control)?;
    let rhs = scope.current_val;
    let result = match op {
        CompOp::Eq => lhs == rhs,
        CompOp::Ne => lhs != rhs,
        CompOp::Le => lhs <= rhs,
        CompOp::Lt => lhs < rhs,
        CompOp::Ge => lhs >= rhs,
        CompOp::Gt => lhs > rhs,
    };
    scope.current_val = i64::from(result);
    Ok(())
}

fn eval_logic(
    ast: &Ast,
    node: &Node,
    op: LogicOp,
    scope: &mut Scope,
    control: &mut Control,
) -> Result<(), EvalError> {
    // Both operands are always evaluated; `&&`/`||` do not short-circuit.
    eval_node(ast, node.children[0], scope, control)?;
    let lhs = scope.current_val != 0;
    eval_node(ast, node.children[1], scope, control)?;
    let rhs = scope.current_val != 0;
    let result = match op {
        LogicOp::And => lhs && rhs,
        LogicOp::Or => lhs || rhs,
    };
    scope.current_val = i64::from(result);
    Ok(())
}

fn eval_block(
    ast: &Ast,
    node: &Node,
    kind: BlockKind,
    scope: &mut Scope,
    control: &mut Control,
) -> Result<(), EvalError> {
    match kind {
        BlockKind::IfElse => {
            for &child in &node.children {
                let branch = ast.get(child);
                let matched = match &branch.kind {
                    NodeKind::Block(BlockKind::Else) => {
                        eval_node(ast, branch.children[0], scope, control)?;
                        true
                    }
                    NodeKind::Block(BlockKind::If) | NodeKind::Block(BlockKind::Elif) => {
                        eval_node(ast, branch.children[0], scope, control)?;
                        if scope.current_val != 0 {
                            eval_node(ast, branch.children[1], scope, control)?;
                            true
                        } else {
                            false
                        }
                    }
                    _ => false,
                };
                if matched || control.pending() {
                    break;
                }
            }
            // Reaching the end of the chain without a match is not an
            // error: the chain simply produces no body evaluation.
            Ok(())
        }
        BlockKind::If | BlockKind::Elif => {
            eval_node(ast, node.children[0], scope, control)?;
            if scope.current_val != 0 {
                eval_node(ast, node.children[1], scope, control)?;
            }
            Ok(())
        }
        BlockKind::Else => eval_node(ast, node.children[0], scope, control),
    }
}

fn eval_loop(ast: &Ast, node: &Node, scope: &mut Scope, control: &mut Control) -> Result<(), EvalError> {
    loop {
        eval_node(ast, node.children[0], scope, control)?;
        if scope.current_val == 0 {
            break;
        }
        eval_node(ast, node.children[1], scope, control)?;
        if control.break_count > 0 {
            control.break_count -= 1;
            break;
        }
        if control.continue_count > 0 {
            control.continue_count -= 1;
            continue;
        }
        if control.return_count > 0 {
            break;
        }
    }
    Ok(())
}

fn eval_control(
    ast: &Ast,
    node: &Node,
    op: ControlOp,
    scope: &mut Scope,
    control: &mut Control,
) -> Result<(), EvalError> {
    match op {
        ControlOp::Break => {
            control.break_count += 1;
            Ok(())
        }
        ControlOp::Continue => {
            control.continue_count += 1;
            Ok(())
        }
        ControlOp::Return => {
            eval_node(ast, node.children[0], scope, control)?;
            control.return_count += 1;
            Ok(())
        }
    }
}

fn eval_funccall(
    ast: &Ast,
    node: &Node,
    name: &str,
    scope: &mut Scope,
    control: &mut Control,
) -> Result<(), EvalError> {
    let mut arg_values = Vec::with_capacity(node.children.len());
    for &arg in &node.children {
        eval_node(ast, arg, scope, control)?;
        arg_values.push(scope.current_val);
    }

    if builtins::is_builtin(name) {
        return eval_builtin(name, &arg_values, scope);
    }

    let func_id = match scope.get(name) {
        Some(Entry::Func(id)) => *id,
        _ => {
            return Err(EvalError {
                message: format!("'{name}' is not a callable function"),
            })
        }
    };

    let func_node = ast.get(func_id);
    let args_node = ast.get(func_node.children[0]);
    let body_node = ast.get(func_node.children[1]);
    let param_names: Vec<String> = args_node
        .children
        .iter()
        .map(|&p| match &ast.get(p).kind {
            NodeKind::Var(n) => n.clone(),
            _ => String::new(),
        })
        .collect();

    let mut callee_scope = scope.clone();
    for (param, value) in param_names.iter().zip(arg_values.iter()) {
        callee_scope.set(param.clone(), Entry::Int(*value));
    }

    let mut callee_control = Control::default();
    for &stmt in &body_node.children {
        eval_node(ast, stmt, &mut callee_scope, &mut callee_control)?;
        if callee_control.return_count > 0 {
            callee_control.return_count -= 1;
            break;
        }
    }

    // Write back every callee-scope entry that is not a parameter and
    // already existed in the caller's scope; locals defined only inside
    // the function body are discarded with it.
    for (name, entry) in callee_scope.defs.iter() {
        if param_names.contains(name) {
            continue;
        }
        if scope.defs.contains_key(name) {
            scope.defs.insert(name.clone(), entry.clone());
        }
    }

    scope.current_val = callee_scope.current_val;
    Ok(())
}

fn eval_builtin(name: &str, args: &[i64], scope: &mut Scope) -> Result<(), EvalError> {
    if args.len() != 1 {
        return Err(EvalError {
            message: format!("builtin '{name}' expects exactly one argument"),
        });
    }
    match name {
        "print" => print!("{} ", args[0]),
        "println" => println!("{}", args[0]),
        _ => {}
    }
    scope.current_val = args[0];
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker;
    use crate::parser::Parser;

    fn eval_src(src: &str) -> i64 {
        let ast = Parser::new(src).parse().expect("source must parse");
        checker::check(&ast).expect("source must check");
        run(&ast).expect("source must evaluate")
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(eval_src("1+2*3;"), 7);
    }

    #[test]
    fn assignment_and_expression_chain() {
        assert_eq!(eval_src("a=2; b=3; a*b+1;"), 7);
    }

    #[test]
    fn while_loop_accumulates() {
        assert_eq!(eval_src("a=0; i=1; while(i<=4){ a=a+i; i=i+1; }; a;"), 10);
    }

    #[test]
    fn function_call_adds_arguments() {
        assert_eq!(eval_src("funk add(int x, int y){ return x+y; }; add(3,4);"), 7);
    }

    #[test]
    fn ifelse_picks_matching_branch() {
        assert_eq!(eval_src("if (1==1) { 42; } else { 0; };"), 42);
    }

    #[test]
    fn recursive_function_call() {
        assert_eq!(eval_src("funk f(x){ return x*x; }; f(5);"), 25);
    }

    #[test]
    fn function_call_writes_back_existing_caller_names() {
        assert_eq!(eval_src("a=1; funk g(){ a=a+1; }; g(); g(); a;"), 3);
    }

    #[test]
    fn logic_operators_are_not_short_circuiting() {
        assert_eq!(eval_src("0 && 1;"), 0);
        assert_eq!(eval_src("1 || 0;"), 1);
    }

    #[test]
    fn break_stops_loop_immediately() {
        assert_eq!(eval_src("i=0; while(1){ i=i+1; if (i==3) { break; }; }; i;"), 3);
    }

    #[test]
    fn continue_skips_remaining_body() {
        assert_eq!(
            eval_src("i=0; sum=0; while(i<5){ i=i+1; if (i==3) { continue; }; sum=sum+i; }; sum;"),
            12
        );
    }
}
