//! Source-location diagnostics shared by the parser and the checker.
//!
//! Format (matches the CLI's contract):
//! ```text
//! line: L, col: C
//! <source line, tabs expanded to spaces>
//! <caret(s) under the offending span>
//! err : <message>
//! ```
//! The `err :` line is only emitted when a message is present.

use crate::cursor::Span;

#[derive(Debug, Clone)]
pub enum Diagnostic {
    Parse {
        high_water: usize,
        message: Option<String>,
    },
    Check {
        span: Span,
        message: String,
    },
}

impl Diagnostic {
    fn point(&self) -> usize {
        match self {
            Diagnostic::Parse { high_water, .. } => *high_water,
            Diagnostic::Check { span, .. } => span.0,
        }
    }

    fn span(&self) -> Span {
        match self {
            Diagnostic::Parse { high_water, .. } => (*high_water, *high_water),
            Diagnostic::Check { span, .. } => *span,
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            Diagnostic::Parse { message, .. } => message.as_deref(),
            Diagnostic::Check { message, .. } => Some(message.as_str()),
        }
    }

    pub fn render(&self, source: &str) -> String {
        let (line, col) = line_col(source, self.point());
        let line_text = source_line_at(source, self.point());
        let (begin, end) = self.span();
        let caret = caret_line(source, self.point(), end.saturating_sub(begin).max(1));

        let mut out = format!("line: {line}, col: {col}\n{line_text}\n{caret}");
        if let Some(message) = self.message() {
            out.push_str(&format!("\nerr : {message}"));
        }
        out
    }
}

/// 1-based (line, column) of byte offset `at` in `source`.
pub fn line_col(source: &str, at: usize) -> (usize, usize) {
    let at = at.min(source.len());
    let mut line = 1;
    let mut col = 1;
    for b in source.as_bytes()[..at].iter() {
        if *b == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// The full source line containing byte offset `at`, with tabs expanded
/// to single spaces so the caret line beneath it lines up.
pub fn source_line_at(source: &str, at: usize) -> String {
    let at = at.min(source.len());
    let bytes = source.as_bytes();
    let mut begin = at;
    while begin > 0 && bytes[begin - 1] != b'\n' {
        begin -= 1;
    }
    let mut end = at;
    while end < bytes.len() && bytes[end] != b'\n' {
        end += 1;
    }
    source[begin..end].replace('\t', " ")
}

fn caret_line(source: &str, at: usize, width: usize) -> String {
    let (_, col) = line_col(source, at);
    let mut out = String::new();
    for _ in 1..col {
        out.push(' ');
    }
    for _ in 0..width.max(1) {
        out.push('^');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_newlines() {
        let src = "abc\ndef\nghi";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 4), (2, 1));
        assert_eq!(line_col(src, 9), (3, 2));
    }

    #[test]
    fn source_line_at_expands_tabs() {
        let src = "a\n\tbad;\nc";
        assert_eq!(source_line_at(src, 3), " bad;");
    }

    #[test]
    fn render_includes_message_line() {
        let diag = Diagnostic::Check {
            span: (2, 2),
            message: "undefined variable".to_string(),
        };
        let rendered = diag.render("x = y;");
        assert!(rendered.contains("err : undefined variable"));
    }
}
