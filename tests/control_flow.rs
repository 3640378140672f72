use guac::run_source;

#[test]
fn while_loop_accumulates_a_sum() {
    assert_eq!(
        run_source("a=0; i=1; while(i<=4){ a=a+i; i=i+1; }; a;").unwrap(),
        10
    );
}

#[test]
fn ifelse_picks_the_matching_branch() {
    assert_eq!(run_source("if (1==1) { 42; } else { 0; };").unwrap(), 42);
}

#[test]
fn elif_chain_falls_through_to_the_matching_branch() {
    let src = "x=2; if (x==1) { 1; } elif (x==2) { 2; } elif (x==3) { 3; } else { 0; };";
    assert_eq!(run_source(src).unwrap(), 2);
}

#[test]
fn break_at_top_level_is_a_semantic_error() {
    let err = run_source("break;").unwrap_err();
    let rendered = err.render("break;");
    assert!(rendered.starts_with("line: 1, col: 1"));
    assert!(rendered.contains("err : cannot break outside of a loop!"));
}

#[test]
fn unterminated_while_reports_the_missing_brace() {
    let err = run_source("while(1) { 1; ").unwrap_err();
    let rendered = err.render("while(1) { 1; ");
    assert!(rendered.contains("err : Missing 'while' closing bracket '}'"));
}
