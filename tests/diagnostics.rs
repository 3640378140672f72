use guac::run_source;

#[test]
fn undefined_variable_points_a_single_caret_at_its_column() {
    let src = "x;";
    let err = run_source(src).unwrap_err();
    let rendered = err.render(src);
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("line: 1, col: 1"));
    assert_eq!(lines.next(), Some("x;"));
    assert_eq!(lines.next(), Some("^"));
    assert_eq!(lines.next(), Some("err : _var should be defined before being used!"));
}

#[test]
fn diagnostic_line_reports_the_offending_line_in_a_multiline_program() {
    let src = "a=1;\nb=2;\nundefined_name;\n";
    let err = run_source(src).unwrap_err();
    let rendered = err.render(src);
    assert!(rendered.starts_with("line: 3, col: 1"));
    assert!(rendered.contains("undefined_name;"));
}

#[test]
fn parse_failure_on_unterminated_while_names_the_missing_brace() {
    let src = "while(1) { 1; ";
    let err = run_source(src).unwrap_err();
    assert!(err.render(src).contains("err : Missing 'while' closing bracket '}'"));
}

#[test]
fn comments_are_skipped_like_whitespace() {
    let src = "// a leading comment\na=1; // trailing\na;";
    assert_eq!(run_source(src).unwrap(), 1);
}
