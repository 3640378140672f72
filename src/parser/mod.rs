//! Recursive-descent parser.
//!
//! Productions are mutually recursive methods on [`Parser`], matching
//! the grammar in the language reference 1:1 (ordered choice, no left
//! recursion). Each production that can partially consume input saves
//! the cursor position on entry and restores it on failure; binary and
//! unary operator chains fold left-associatively into the AST as they
//! go, so a chain of length one never produces a wrapper node around
//! its single operand.

use crate::ast::{Ast, BlockKind, CompOp, ControlOp, LogicOp, MathOp, NodeId, NodeKind, UnaOp};
use crate::cursor::Cursor;

const RESERVED: [&str; 7] = ["while", "if", "elif", "else", "break", "return", "funk"];

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    ast: Ast,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub high_water: usize,
    pub message: Option<&'static str>,
}

type PResult<T> = Result<T, ()>;

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
            ast: Ast::new(),
        }
    }

    /// Parses the whole source as a top-level program and returns the
    /// finished AST, or a [`ParseError`] anchored at the cursor's
    /// high-water mark with the most recent contextual message.
    pub fn parse(mut self) -> Result<Ast, ParseError> {
        log::debug!("parsing {} bytes", self.cursor.source().len());
        match self.program() {
            Ok(root) => {
                self.ast.set_root(root);
                Ok(self.ast)
            }
            Err(()) => Err(ParseError {
                high_water: self.cursor.high_water(),
                message: self.cursor.message,
            }),
        }
    }

    fn is_reserved(name: &str) -> bool {
        RESERVED.contains(&name)
    }

    fn text_range(&self, begin: usize) -> String {
        self.cursor.source()[begin..self.cursor.pos()].to_string()
    }

    /// Matches a literal word only if it is not immediately followed by
    /// another identifier character, so `"if"` does not match a prefix
    /// of `"ifx"`.
    fn keyword(&mut self, word: &str) -> bool {
        let start = self.cursor.pos();
        if !self.cursor.text(word) {
            return false;
        }
        if matches!(self.cursor.peek_byte(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.cursor.set_pos(start);
            return false;
        }
        true
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor.skip_space();
            if !self.comment() {
                break;
            }
        }
    }

    fn comment(&mut self) -> bool {
        if !self.cursor.text("//") {
            return false;
        }
        while self.cursor.not_set("\n") {}
        self.cursor.char(b'\n');
        true
    }

    // Program <- Block* EOF
    fn program(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut children = Vec::new();
        loop {
            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }
            let before = self.cursor.pos();
            match self.block() {
                Ok(id) => children.push(id),
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        self.skip_trivia();
        if !self.cursor.is_eof() {
            return Err(());
        }
        let span = self.cursor.span_from(start);
        Ok(self.ast.push(NodeKind::Compound, children, span))
    }

    // Block <- FuncDef / IfElse / WhileBlock / Control / Expr
    // (Comment is consumed transparently by skip_trivia at every boundary.)
    fn block(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        if let Ok(id) = self.funcdef() {
            return Ok(id);
        }
        self.cursor.set_pos(start);
        if let Ok(id) = self.ifelse() {
            return Ok(id);
        }
        self.cursor.set_pos(start);
        if let Ok(id) = self.whileblock() {
            return Ok(id);
        }
        self.cursor.set_pos(start);
        if let Ok(id) = self.control() {
            return Ok(id);
        }
        self.cursor.set_pos(start);
        self.expr()
    }

    fn block_list(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut children = Vec::new();
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            match self.block() {
                Ok(id) => children.push(id),
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        let span = self.cursor.span_from(start);
        Ok(self.ast.push(NodeKind::Compound, children, span))
    }

    // FuncDef <- "funk " Ident "(" (Type? Ident ("," Type? Ident)*)? ")" "{" Block* "}" ";"?
    fn funcdef(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        if !self.cursor.text("funk ") {
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        let name_begin = self.cursor.pos();
        if !self.cursor.ident() {
            self.cursor.set_pos(start);
            return Err(());
        }
        let name = self.text_range(name_begin);
        log::trace!("parsing function definition '{name}'");
        self.skip_trivia();
        if !self.cursor.char(b'(') {
            self.cursor.set_pos(start);
            return Err(());
        }
        let args_start = self.cursor.pos();
        let mut params = Vec::new();
        self.skip_trivia();
        if let Ok(p) = self.param() {
            params.push(p);
            loop {
                self.skip_trivia();
                let before_comma = self.cursor.pos();
                if !self.cursor.char(b',') {
                    self.cursor.set_pos(before_comma);
                    break;
                }
                self.skip_trivia();
                match self.param() {
                    Ok(p) => params.push(p),
                    Err(()) => {
                        self.cursor.set_pos(before_comma);
                        break;
                    }
                }
            }
        }
        self.skip_trivia();
        if !self.cursor.char(b')') {
            self.cursor.message = Some("Missing 'funk' closing bracket ')'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let args_span = self.cursor.span_from(args_start);
        let args = self.ast.push(NodeKind::Args, params, args_span);
        self.skip_trivia();
        if !self.cursor.char(b'{') {
            self.cursor.message = Some("Missing 'funk' opening bracket '{'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let body = self.block_list()?;
        self.skip_trivia();
        if !self.cursor.char(b'}') {
            self.cursor.message = Some("Missing 'funk' closing bracket '}'");
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        self.cursor.char(b';');
        let span = self.cursor.span_from(start);
        Ok(self.ast.push(NodeKind::FuncDef(name), vec![args, body], span))
    }

    // Type? Ident — an optional "int" prefix is accepted and discarded.
    fn param(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        if self.cursor.text("int") {
            let followed_by_ident_char =
                matches!(self.cursor.peek_byte(), Some(b) if b.is_ascii_alphanumeric() || b == b'_');
            if followed_by_ident_char {
                self.cursor.set_pos(start);
            } else {
                self.skip_trivia();
            }
        }
        let name_begin = self.cursor.pos();
        if !self.cursor.ident() {
            self.cursor.set_pos(start);
            return Err(());
        }
        let name = self.text_range(name_begin);
        if Self::is_reserved(&name) {
            self.cursor.set_pos(start);
            return Err(());
        }
        let span = self.cursor.span_from(name_begin);
        Ok(self.ast.push(NodeKind::Var(name), vec![], span))
    }

    // IfElse <- If Elif* Else? ";"?
    fn ifelse(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let if_branch = self.if_branch()?;
        let mut branches = vec![if_branch];
        loop {
            let before = self.cursor.pos();
            match self.elif_branch() {
                Ok(id) => branches.push(id),
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        let before_else = self.cursor.pos();
        match self.else_branch() {
            Ok(id) => branches.push(id),
            Err(()) => self.cursor.set_pos(before_else),
        }
        self.skip_trivia();
        self.cursor.char(b';');
        let span = self.cursor.span_from(start);
        Ok(self
            .ast
            .push(NodeKind::Block(BlockKind::IfElse), branches, span))
    }

    fn if_branch(&mut self) -> PResult<NodeId> {
        self.conditional_branch("if", BlockKind::If)
    }

    fn elif_branch(&mut self) -> PResult<NodeId> {
        self.conditional_branch("elif", BlockKind::Elif)
    }

    fn conditional_branch(&mut self, word: &str, kind: BlockKind) -> PResult<NodeId> {
        let start = self.cursor.pos();
        self.skip_trivia();
        if !self.keyword(word) {
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        if !self.cursor.char(b'(') {
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        let cond = match self.calc() {
            Ok(id) => id,
            Err(()) => {
                self.cursor.message = Some("Missing condition");
                self.cursor.set_pos(start);
                return Err(());
            }
        };
        self.skip_trivia();
        if !self.cursor.char(b')') {
            self.cursor.message = Some("Missing closing bracket ')'");
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        if !self.cursor.char(b'{') {
            self.cursor.message = Some("Missing opening bracket '{'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let body = self.block_list()?;
        self.skip_trivia();
        if !self.cursor.char(b'}') {
            self.cursor.message = Some("Missing closing bracket '}'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let span = self.cursor.span_from(start);
        Ok(self.ast.push(NodeKind::Block(kind), vec![cond, body], span))
    }

    fn else_branch(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        self.skip_trivia();
        if !self.keyword("else") {
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        if !self.cursor.char(b'{') {
            self.cursor.message = Some("Missing 'else' opening bracket '{'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let body = self.block_list()?;
        self.skip_trivia();
        if !self.cursor.char(b'}') {
            self.cursor.message = Some("Missing 'else' closing bracket '}'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let span = self.cursor.span_from(start);
        Ok(self
            .ast
            .push(NodeKind::Block(BlockKind::Else), vec![body], span))
    }

    // WhileBlock <- "while" "(" Calc ")" "{" Block* "}" ";"?
    fn whileblock(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        self.skip_trivia();
        if !self.keyword("while") {
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        if !self.cursor.char(b'(') {
            self.cursor.message = Some("Missing 'while' opening bracket '('");
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        let cond = match self.calc() {
            Ok(id) => id,
            Err(()) => {
                self.cursor.message = Some("Missing 'while' condition");
                self.cursor.set_pos(start);
                return Err(());
            }
        };
        self.skip_trivia();
        if !self.cursor.char(b')') {
            self.cursor.message = Some("Missing 'while' closing bracket ')'");
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        if !self.cursor.char(b'{') {
            self.cursor.message = Some("Missing 'while' opening bracket '{'");
            self.cursor.set_pos(start);
            return Err(());
        }
        let body = self.block_list()?;
        self.skip_trivia();
        if !self.cursor.char(b'}') {
            self.cursor.message = Some("Missing 'while' closing bracket '}'");
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        self.cursor.char(b';');
        let span = self.cursor.span_from(start);
        Ok(self.ast.push(NodeKind::Loop, vec![cond, body], span))
    }

    // Control <- ("break" / "continue" / "return" Calc) ";"
    fn control(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        self.skip_trivia();
        let node = if self.keyword("break") {
            self.ast
                .push(NodeKind::OpControl(ControlOp::Break), vec![], self.cursor.span_from(start))
        } else if self.keyword("continue") {
            self.ast.push(
                NodeKind::OpControl(ControlOp::Continue),
                vec![],
                self.cursor.span_from(start),
            )
        } else if self.keyword("return") {
            self.skip_trivia();
            let value = match self.calc() {
                Ok(id) => id,
                Err(()) => {
                    self.cursor.message = Some("Missing expression after 'return'");
                    self.cursor.set_pos(start);
                    return Err(());
                }
            };
            self.ast.push(
                NodeKind::OpControl(ControlOp::Return),
                vec![value],
                self.cursor.span_from(start),
            )
        } else {
            self.cursor.set_pos(start);
            return Err(());
        };
        self.skip_trivia();
        if !self.cursor.char(b';') {
            self.cursor.message = Some("Missing ';' after control statement");
            self.cursor.set_pos(start);
            return Err(());
        }
        Ok(node)
    }

    // Expr <- (Ident "=")? Calc ";"
    fn expr(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        if let Ok(id) = self.assignment() {
            self.skip_trivia();
            if self.cursor.char(b';') {
                return Ok(id);
            }
        }
        self.cursor.set_pos(start);
        let id = self.calc()?;
        self.skip_trivia();
        if !self.cursor.char(b';') {
            self.cursor.message = Some("Missing ';'");
            self.cursor.set_pos(start);
            return Err(());
        }
        Ok(id)
    }

    fn assignment(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        self.skip_trivia();
        let id_begin = self.cursor.pos();
        if !self.cursor.ident() {
            self.cursor.set_pos(start);
            return Err(());
        }
        let name = self.text_range(id_begin);
        if Self::is_reserved(&name) {
            self.cursor.set_pos(start);
            return Err(());
        }
        let var_span = self.cursor.span_from(id_begin);
        self.skip_trivia();
        if !self.cursor.char(b'=') {
            self.cursor.set_pos(start);
            return Err(());
        }
        self.skip_trivia();
        let rhs = match self.calc() {
            Ok(id) => id,
            Err(()) => {
                self.cursor.set_pos(start);
                return Err(());
            }
        };
        let var = self.ast.push(NodeKind::Var(name), vec![], var_span);
        let span = self.cursor.span_from(start);
        Ok(self.ast.push(NodeKind::OpEq, vec![var, rhs], span))
    }

    // Calc <- Comp (("||" / "&&") Comp)*
    fn calc(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut node = self.comp()?;
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            let op = if self.cursor.text("||") {
                Some(LogicOp::Or)
            } else if self.cursor.text("&&") {
                Some(LogicOp::And)
            } else {
                None
            };
            let op = match op {
                Some(op) => op,
                None => {
                    self.cursor.set_pos(before);
                    break;
                }
            };
            self.skip_trivia();
            match self.comp() {
                Ok(rhs) => {
                    let span = self.cursor.span_from(start);
                    node = self.ast.push(NodeKind::OpLogic(op), vec![node, rhs], span);
                }
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        Ok(node)
    }

    // Comp <- Add (("==" | "!=" | "<=" | "<" | ">=" | ">") Add)*
    fn comp(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut node = self.add()?;
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            let op = if self.cursor.text("==") {
                Some(CompOp::Eq)
            } else if self.cursor.text("!=") {
                Some(CompOp::Ne)
            } else if self.cursor.text("<=") {
                Some(CompOp::Le)
            } else if self.cursor.char(b'<') {
                Some(CompOp::Lt)
            } else if self.cursor.text(">=") {
                Some(CompOp::Ge)
            } else if self.cursor.char(b'>') {
                Some(CompOp::Gt)
            } else {
                None
            };
            let op = match op {
                Some(op) => op,
                None => {
                    self.cursor.set_pos(before);
                    break;
                }
            };
            self.skip_trivia();
            match self.add() {
                Ok(rhs) => {
                    let span = self.cursor.span_from(start);
                    node = self.ast.push(NodeKind::OpComp(op), vec![node, rhs], span);
                }
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        Ok(node)
    }

    // Add <- Mul (("+"|"-") Mul)*
    fn add(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut node = self.mul()?;
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            let op = if self.cursor.char(b'+') {
                Some(MathOp::Add)
            } else if self.cursor.char(b'-') {
                Some(MathOp::Sub)
            } else {
                None
            };
            let op = match op {
                Some(op) => op,
                None => {
                    self.cursor.set_pos(before);
                    break;
                }
            };
            self.skip_trivia();
            match self.mul() {
                Ok(rhs) => {
                    let span = self.cursor.span_from(start);
                    node = self.ast.push(NodeKind::OpMath(op), vec![node, rhs], span);
                }
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        Ok(node)
    }

    // Mul <- Pow (("*"|"/"|"%") Pow)*
    fn mul(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut node = self.pow()?;
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            let op = if self.cursor.char(b'*') {
                Some(MathOp::Mul)
            } else if self.cursor.char(b'/') {
                Some(MathOp::Div)
            } else if self.cursor.char(b'%') {
                Some(MathOp::Mod)
            } else {
                None
            };
            let op = match op {
                Some(op) => op,
                None => {
                    self.cursor.set_pos(before);
                    break;
                }
            };
            self.skip_trivia();
            match self.pow() {
                Ok(rhs) => {
                    let span = self.cursor.span_from(start);
                    node = self.ast.push(NodeKind::OpMath(op), vec![node, rhs], span);
                }
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        Ok(node)
    }

    // Pow <- Par ("^" Par)*
    fn pow(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        let mut node = self.par()?;
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            if !self.cursor.char(b'^') {
                self.cursor.set_pos(before);
                break;
            }
            self.skip_trivia();
            match self.par() {
                Ok(rhs) => {
                    let span = self.cursor.span_from(start);
                    node = self
                        .ast
                        .push(NodeKind::OpMath(MathOp::Pow), vec![node, rhs], span);
                }
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        Ok(node)
    }

    // Par <- ("+"|"-"|"!")* (Int / FuncCall / Ident / "(" Calc ")")
    fn par(&mut self) -> PResult<NodeId> {
        let start = self.cursor.pos();
        self.skip_trivia();

        if let Some(op) = self.una_op() {
            let inner = self.par()?;
            let span = self.cursor.span_from(start);
            return Ok(self.ast.push(NodeKind::OpUna(op), vec![inner], span));
        }

        let int_begin = self.cursor.pos();
        if self.cursor.int() {
            let digits = self.text_range(int_begin);
            let value: i64 = digits.parse().unwrap_or(i64::MAX);
            let span = self.cursor.span_from(start);
            return Ok(self.ast.push(NodeKind::Const(value), vec![], span));
        }

        let id_begin = self.cursor.pos();
        if self.cursor.ident() {
            let name = self.text_range(id_begin);
            if Self::is_reserved(&name) {
                self.cursor.set_pos(start);
                return Err(());
            }
            let after_ident = self.cursor.pos();
            self.skip_trivia();
            if self.cursor.char(b'(') {
                let args = self.call_args()?;
                self.skip_trivia();
                if !self.cursor.char(b')') {
                    self.cursor.message = Some("Missing function call closing bracket ')'");
                    self.cursor.set_pos(start);
                    return Err(());
                }
                let span = self.cursor.span_from(start);
                return Ok(self.ast.push(NodeKind::FuncCall(name), args, span));
            }
            self.cursor.set_pos(after_ident);
            let span = self.cursor.span_from(id_begin);
            return Ok(self.ast.push(NodeKind::Var(name), vec![], span));
        }

        if self.cursor.char(b'(') {
            self.skip_trivia();
            let inner = match self.calc() {
                Ok(id) => id,
                Err(()) => {
                    self.cursor.set_pos(start);
                    return Err(());
                }
            };
            self.skip_trivia();
            if !self.cursor.char(b')') {
                self.cursor.message = Some("Missing ')'");
                self.cursor.set_pos(start);
                return Err(());
            }
            return Ok(inner);
        }

        self.cursor.set_pos(start);
        Err(())
    }

    fn una_op(&mut self) -> Option<UnaOp> {
        if self.cursor.char(b'+') {
            return Some(UnaOp::Plus);
        }
        if self.cursor.char(b'-') {
            return Some(UnaOp::Minus);
        }
        if self.cursor.char(b'!') {
            return Some(UnaOp::Not);
        }
        None
    }

    // FuncCall <- Ident "(" (Calc ("," Calc)*)? ")"  (the Ident half is
    // handled by `par`, which calls here once it has seen the "(")
    fn call_args(&mut self) -> PResult<Vec<NodeId>> {
        let mut args = Vec::new();
        self.skip_trivia();
        let start = self.cursor.pos();
        match self.calc() {
            Ok(id) => args.push(id),
            Err(()) => {
                self.cursor.set_pos(start);
                return Ok(args);
            }
        }
        loop {
            self.skip_trivia();
            let before = self.cursor.pos();
            if !self.cursor.char(b',') {
                self.cursor.set_pos(before);
                break;
            }
            self.skip_trivia();
            match self.calc() {
                Ok(id) => args.push(id),
                Err(()) => {
                    self.cursor.set_pos(before);
                    break;
                }
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn parse_ok(src: &str) -> Ast {
        Parser::new(src).parse().expect("expected successful parse")
    }

    #[test]
    fn parses_arithmetic_precedence() {
        let ast = parse_ok("1+2*3;");
        let root = ast.get(ast.root());
        assert_eq!(root.children.len(), 1);
        let expr = ast.get(root.children[0]);
        match &expr.kind {
            NodeKind::OpMath(MathOp::Add) => {}
            other => panic!("expected top-level add, got {other:?}"),
        }
    }

    #[test]
    fn unary_chain_nests_first_matched_outermost() {
        let ast = parse_ok("!-x;");
        let root = ast.get(ast.root());
        let outer = ast.get(root.children[0]);
        assert_eq!(outer.kind, NodeKind::OpUna(UnaOp::Not));
        let inner = ast.get(outer.children[0]);
        assert_eq!(inner.kind, NodeKind::OpUna(UnaOp::Minus));
    }

    #[test]
    fn assignment_backtracks_on_double_equals() {
        let ast = parse_ok("a==b;");
        let root = ast.get(ast.root());
        let expr = ast.get(root.children[0]);
        match &expr.kind {
            NodeKind::OpComp(CompOp::Eq) => {}
            other => panic!("expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn rejects_reserved_word_as_variable() {
        let err = Parser::new("while;").parse().unwrap_err();
        assert!(err.message.is_none() || err.high_water <= 6);
    }

    #[test]
    fn reports_missing_while_closing_brace() {
        let err = Parser::new("while(1) { 1; ").parse().unwrap_err();
        assert_eq!(err.message, Some("Missing 'while' closing bracket '}'"));
    }

    #[test]
    fn function_def_and_call_roundtrip() {
        let ast = parse_ok("funk add(int x, int y){ return x+y; }; add(3,4);");
        let root = ast.get(ast.root());
        assert_eq!(root.children.len(), 2);
        let funcdef = ast.get(root.children[0]);
        assert_eq!(funcdef.kind, NodeKind::FuncDef("add".to_string()));
        let args = ast.get(funcdef.children[0]);
        assert_eq!(args.children.len(), 2);
    }

    #[test]
    fn ifelse_collects_all_branches() {
        let ast = parse_ok("if (1) { 1; } elif (2) { 2; } else { 3; };");
        let root = ast.get(ast.root());
        let chain = ast.get(root.children[0]);
        assert_eq!(chain.kind, NodeKind::Block(BlockKind::IfElse));
        assert_eq!(chain.children.len(), 3);
    }
}
