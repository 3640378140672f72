use guac::run_source;

#[test]
fn operator_precedence() {
    assert_eq!(run_source("1+2*3;").unwrap(), 7);
}

#[test]
fn assignment_then_expression() {
    assert_eq!(run_source("a=2; b=3; a*b+1;").unwrap(), 7);
}

#[test]
fn unary_chain_matches_double_negation_identity() {
    assert_eq!(run_source("x=5; -(-x);").unwrap(), 5);
}

#[test]
fn double_not_is_boolean_normalization() {
    assert_eq!(run_source("x=7; !!x;").unwrap(), 1);
    assert_eq!(run_source("x=0; !!x;").unwrap(), 0);
}

#[test]
fn addition_is_associative_modulo_wrap() {
    assert_eq!(run_source("a=1; b=2; c=3; (a+b)+c;").unwrap(), 6);
    assert_eq!(run_source("a=1; b=2; c=3; a+(b+c);").unwrap(), 6);
}
