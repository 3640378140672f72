//! Parser, checker and evaluator for a small imperative toy language.
//!
//! [`run_source`] is the single public entry point: it parses, statically
//! checks, then evaluates a source string, returning either the final
//! register value or a renderable [`diagnostics::Diagnostic`].

pub mod ast;
pub mod builtins;
pub mod checker;
pub mod cursor;
pub mod diagnostics;
pub mod interpreter;
pub mod parser;

use diagnostics::Diagnostic;
use parser::Parser;

pub fn run_source(source: &str) -> Result<i64, Diagnostic> {
    let ast = Parser::new(source).parse().map_err(|err| Diagnostic::Parse {
        high_water: err.high_water,
        message: err.message.map(str::to_string),
    })?;

    checker::check(&ast).map_err(|err| Diagnostic::Check {
        span: err.span,
        message: err.message,
    })?;

    interpreter::run(&ast).map_err(|err| Diagnostic::Check {
        span: (0, 0),
        message: err.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_variable_reports_semantic_error() {
        let err = run_source("x;").unwrap_err();
        match err {
            Diagnostic::Check { message, .. } => {
                assert_eq!(message, "_var should be defined before being used!");
            }
            Diagnostic::Parse { .. } => panic!("expected a check error"),
        }
    }

    #[test]
    fn unterminated_while_reports_parse_error() {
        let err = run_source("while(1) { 1; ").unwrap_err();
        match err {
            Diagnostic::Parse { message, .. } => {
                assert_eq!(message.as_deref(), Some("Missing 'while' closing bracket '}'"));
            }
            Diagnostic::Check { .. } => panic!("expected a parse error"),
        }
    }
}
