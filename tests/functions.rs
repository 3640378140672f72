use guac::run_source;

#[test]
fn function_call_adds_its_arguments() {
    assert_eq!(
        run_source("funk add(int x, int y){ return x+y; }; add(3,4);").unwrap(),
        7
    );
}

#[test]
fn function_call_squares_its_argument() {
    assert_eq!(run_source("funk f(x){ return x*x; }; f(5);").unwrap(), 25);
}

#[test]
fn mutation_of_a_pre_existing_name_is_written_back_on_return() {
    assert_eq!(
        run_source("a=1; funk g(){ a=a+1; }; g(); g(); a;").unwrap(),
        3
    );
}

#[test]
fn a_parameter_does_not_leak_into_the_caller_scope() {
    let err = run_source("funk add(y) { return y; }; y;").unwrap_err();
    let rendered = err.render("funk add(y) { return y; }; y;");
    assert!(rendered.contains("err : _var should be defined before being used!"));
}

#[test]
fn recursive_function_computes_a_factorial() {
    let src = "funk fact(n){ if (n<=1) { return 1; } else { return n*fact(n-1); }; }; fact(5);";
    assert_eq!(run_source(src).unwrap(), 120);
}
