use lambda::{DEFAULT_RECURSION_LIMIT, Environment, eval, interpreter::evaluator::operator::BUILTIN_OPERATORS};

fn assert_evaluates(env: &mut Environment, src: &str, expected: &str) {
    let result = eval(src, env);
    if let Some(error) = result.error {
        panic!("Expression {src} failed: {error}");
    }
    assert_eq!(result.value.as_deref(), Some(expected), "for expression {src}");
}

fn assert_fails(env: &mut Environment, src: &str) -> String {
    let result = eval(src, env);
    match result.error {
        Some(error) => error,
        None => panic!("Expression {src} succeeded with {:?} but was expected to fail",
                       result.value),
    }
}

fn assert_sane(env: &mut Environment, src: &str) {
    let result = eval(src, env);
    assert!(result.error.is_none(),
            "Expression {src} failed: {:?}",
            result.error);
}

#[test]
fn integer_arithmetic() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(+ 1 2)", "3");
    assert_evaluates(&mut env, "(+ 1 2 3 4 5)", "15");
    assert_evaluates(&mut env, "(- 1 2)", "-1");
    assert_evaluates(&mut env, "(* 1 2)", "2");
    assert_evaluates(&mut env, "(* 1 2 3 4 5)", "120");
    assert_evaluates(&mut env, "(/ 1 2)", "0");
    assert_evaluates(&mut env, "(/ -7 2)", "-3");
    assert_evaluates(&mut env, "(- 1 (/ 6 3))", "-1");
}

#[test]
fn float_arithmetic() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(+ 1.1 2.1)", "3.2");
    assert_evaluates(&mut env, "(- 1.3 2.1)", "-0.8");
    assert_evaluates(&mut env, "(* 1.3 2)", "2.6");
    assert_evaluates(&mut env, "(/ 1.3 2)", "0.65");
    assert_evaluates(&mut env, "(- 1 (/ 0.5509 0.5698))", "0.033169533169533194");
    assert_evaluates(&mut env, "(+ 1 2.0)", "3");
}

#[test]
fn large_integers_mix_with_floats() {
    let mut env = Environment::new();

    // Above 2^53 the integer rounds to the nearest float.
    assert_evaluates(&mut env, "(+ 9007199254740993 0.5)", "9007199254740992");
    assert_evaluates(&mut env, "(< 9007199254740993 1.5)", "false");
    assert_evaluates(&mut env, "(> 9223372036854775807 1.5)", "true");
}

#[test]
fn string_concatenation() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, r#"(+ "Hello" "," "World!")"#, r#""Hello,World!""#);
    assert_evaluates(&mut env, "(+ 'single' \"double\")", r#""singledouble""#);
    assert_fails(&mut env, r#"(+ "a" 1)"#);
    assert_fails(&mut env, r#"(* "a" "b")"#);
}

#[test]
fn integer_overflow_promotes_to_big_integer() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(+ 9223372036854775807 1)", "9223372036854775808");
    assert_evaluates(&mut env, "(* 9223372036854775807 2)", "18446744073709551614");
    assert_evaluates(&mut env, "(- -9223372036854775808 1)", "-9223372036854775809");
    assert_evaluates(&mut env, "(/ -9223372036854775808 -1)", "9223372036854775808");

    // Results that fit again are narrowed back to 64 bits.
    assert_evaluates(&mut env, "(- 9223372036854775808 1)", "9223372036854775807");
    assert_evaluates(&mut env, "(+ (- 9223372036854775808 1) 0)", "9223372036854775807");
}

#[test]
fn big_integer_literals() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "123456789012345678901234567890", "123456789012345678901234567890");
    assert_evaluates(&mut env,
                     "(* 123456789012345678901234567890 10)",
                     "1234567890123456789012345678900");
    assert_evaluates(&mut env, "(> 123456789012345678901234567890 1)", "true");
    assert_fails(&mut env, "(+ 123456789012345678901234567890 1.5)");
}

#[test]
fn division_by_zero_fails() {
    let mut env = Environment::new();

    assert_fails(&mut env, "(/ 1 0)");
    assert_fails(&mut env, "(/ 1.0 0)");
    assert_fails(&mut env, "(/ 1.0 0.0)");
    assert_fails(&mut env, "(/ 123456789012345678901234567890 0)");
}

#[test]
fn float_overflow_fails() {
    let mut env = Environment::new();

    let error = assert_fails(&mut env, "(* 1e300 1e300)");
    assert!(error.contains("finite"), "unexpected message: {error}");
}

#[test]
fn variables() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(defvar x 2.0)", "2");
    assert_evaluates(&mut env, "(+ x 2.0)", "4");
    assert_evaluates(&mut env, "(defvar y 1.9)", "1.9");
    assert_evaluates(&mut env, "(* x y)", "3.8");
    assert_evaluates(&mut env, "(defvar i 5.0)", "5");
    assert_evaluates(&mut env, "(defvar i 6.0)", "6");
    assert_fails(&mut env, "(+ i j)");
    assert_evaluates(&mut env, "(defvar j 3.1)", "3.1");
    assert_evaluates(&mut env, "(+ i j)", "9.1");

    // A bare variable name is replaced by its value.
    assert_evaluates(&mut env, "x", "2");
}

#[test]
fn defvar_rejects_invalid_bindings() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defvar x 1)");
    assert_fails(&mut env, "(defvar y x)");
    assert_fails(&mut env, "(defvar 1 2)");

    let error = assert_fails(&mut env, "(defvar + 1)");
    assert!(error.contains("operator"), "unexpected message: {error}");
}

#[test]
fn comparisons() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(> 3 2)", "true");
    assert_evaluates(&mut env, "(> 2 3)", "false");
    assert_evaluates(&mut env, "(< 3 2)", "false");
    assert_evaluates(&mut env, "(< 2 3)", "true");
    assert_evaluates(&mut env, "(>= 3 2)", "true");
    assert_evaluates(&mut env, "(>= 3 3)", "true");
    assert_evaluates(&mut env, "(<= 3 3)", "true");
    assert_evaluates(&mut env, "(<= 3 2)", "false");
    assert_evaluates(&mut env, "(< 2 2.5)", "true");

    assert_evaluates(&mut env, r#"(> "a" "b")"#, "false");
    assert_evaluates(&mut env, r#"(> "b" "a")"#, "true");
    assert_evaluates(&mut env, r#"(< "a" "b")"#, "true");
    assert_evaluates(&mut env, r#"(< "b" "a")"#, "false");

    assert_fails(&mut env, r#"(< "a" 1)"#);
    assert_fails(&mut env, "(< true false)");
}

#[test]
fn equality_requires_same_type() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(= 3 3)", "true");
    assert_evaluates(&mut env, "(= 3 4)", "false");
    assert_evaluates(&mut env, "(= 'a' \"a\")", "true");
    assert_evaluates(&mut env, "(= true true)", "true");
    assert_fails(&mut env, "(= 1 1.0)");
    assert_fails(&mut env, "(= 1 true)");
}

#[test]
fn boolean_operators() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(and true false)", "false");
    assert_evaluates(&mut env, "(and true true)", "true");
    assert_evaluates(&mut env, "(and false false)", "false");
    assert_evaluates(&mut env, "(and true true true true)", "true");
    assert_evaluates(&mut env, "(and true true true false)", "false");

    assert_evaluates(&mut env, "(or true false)", "true");
    assert_evaluates(&mut env, "(or true true)", "true");
    assert_evaluates(&mut env, "(or false false)", "false");
    assert_evaluates(&mut env, "(or true true true true)", "true");
    assert_evaluates(&mut env, "(or false false false true)", "true");

    assert_fails(&mut env, "(and true 1)");
}

#[test]
fn cond_selects_first_true_clause() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(cond (true 1) (false 2))", "1");
    assert_evaluates(&mut env, "(cond (false 1) (true 2))", "2");
    assert_evaluates(&mut env, "(cond (false 1) (true 2) (false 3))", "2");
    assert_evaluates(&mut env, "(cond ((> 2 3) 1) ((= 3 3) 2))", "2");

    // Clauses after the match are never evaluated.
    assert_evaluates(&mut env, "(cond (true 1) ((/ 1 0) 2))", "1");
}

#[test]
fn cond_errors() {
    let mut env = Environment::new();

    assert_fails(&mut env, "(cond (1 2))");

    let error = assert_fails(&mut env, "(cond (false 1) (false 2))");
    assert_eq!(error, "None of the arguments for cond evaluated to true.");

    assert_fails(&mut env, "(cond (true 1 2))");
    assert_fails(&mut env, "(cond true)");
}

#[test]
fn malformed_input() {
    let mut env = Environment::new();

    assert_fails(&mut env, ")(");
    assert_fails(&mut env, ")");
    assert_fails(&mut env, "(");
    assert_fails(&mut env, "]]]");
    assert_fails(&mut env, "(+ 1 2");
    assert_fails(&mut env, "()");
    assert_fails(&mut env, "((+ 1 2) 3)");
    assert_fails(&mut env, "(frobnicate 1 2)");

    let error = assert_fails(&mut env, "   ");
    assert!(error.contains("Nothing to evaluate"), "unexpected message: {error}");
}

#[test]
fn arity_is_checked() {
    let mut env = Environment::new();

    let error = assert_fails(&mut env, "(- 1 2 3)");
    assert_eq!(error, "Received 3 arguments for operator -, expected: 2.");

    let error = assert_fails(&mut env, "(+ 1)");
    assert_eq!(error, "Received 1 arguments for operator +, minimum expected arguments: 2.");

    let many = vec!["1"; 101].join(" ");
    let error = assert_fails(&mut env, &format!("(+ {many})"));
    assert_eq!(error,
               "Received 101 arguments for operator +, maximum expected arguments: 100.");

    let hundred = vec!["1"; 100].join(" ");
    assert_evaluates(&mut env, &format!("(+ {hundred})"), "100");
}

#[test]
fn only_the_first_expression_is_evaluated() {
    let mut env = Environment::new();

    let result = eval("(defvar a 1) (defvar b 2)", &mut env);
    assert_eq!(result.value.as_deref(), Some("1"));
    assert_eq!(result.remaining, "( defvar b 2 )");
    assert!(env.variable("b").is_none());

    let result = eval(&result.remaining, &mut env);
    assert_eq!(result.value.as_deref(), Some("2"));
    assert!(result.remaining.is_empty());
}

#[test]
fn methods() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defun foo (x) (+ 1 x))");
    assert_evaluates(&mut env, "(foo 4)", "5");

    let error = assert_fails(&mut env, "(foo 4 5)");
    assert_eq!(error, "Received 2 arguments for operator foo, expected: 1.");

    assert_sane(&mut env, "(defun fact (x) (cond ((= x 0) 1) (true (* x (fact (- x 1))))))");
    assert_evaluates(&mut env, "(fact 10)", "3628800");
    assert_sane(&mut env, "(defun fib (x) (cond ((= x 0) 0) (true (+ x (fib (- x 1))))))");
    assert_evaluates(&mut env, "(fib 10)", "55");

    assert_sane(&mut env,
                "(defun magic (x) (cond ((<= x 0) 1) (true (+ (magic (- x 1)) (* 2 (magic (- x 3)))))))");
    assert_evaluates(&mut env, "(magic -10)", "1");
    assert_evaluates(&mut env, "(magic 0)", "1");
    assert_evaluates(&mut env, "(magic 10)", "309");
}

#[test]
fn factorial_grows_into_big_integers() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defun fact (x) (cond ((= x 0) 1) (true (* x (fact (- x 1))))))");
    assert_evaluates(&mut env, "(fact 25)", "15511210043330985984000000");
}

#[test]
fn defun_returns_a_function_value() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(defun inc (x) (+ x 1))", "<function: inc>");
    assert_evaluates(&mut env, "inc", "<function: inc>");
    assert_evaluates(&mut env, "+", "<function: +>");

    // A call without arguments unwraps to the bare name.
    assert_evaluates(&mut env, "(inc)", "<function: inc>");
}

#[test]
fn functions_without_parameters_are_values() {
    let mut env = Environment::new();

    assert_evaluates(&mut env, "(defun one () 1)", "<function: one>");
    assert_evaluates(&mut env, "(one)", "<function: one>");
    assert_fails(&mut env, "(one 1)");
}

#[test]
fn closure_independence() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defvar varDefinedOutside 10)");
    assert_sane(&mut env, "(defun add (formalArg) (+ varDefinedOutside formalArg))");
    assert_evaluates(&mut env, "(add 11)", "21");

    assert_sane(&mut env, "(defvar formalArg -10)");
    assert_evaluates(&mut env, "(add 11)", "21");
    assert_evaluates(&mut env, "formalArg", "-10");
}

#[test]
fn bindings_inside_calls_do_not_leak() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defun setter (v) (defvar inner (+ v 0)))");
    assert_evaluates(&mut env, "(setter 5)", "5");
    assert_fails(&mut env, "inner");
}

#[test]
fn function_bodies_can_return_parameters() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defun id (x) x)");
    assert_evaluates(&mut env, "(id 7)", "7");
    assert_evaluates(&mut env, "(id 'text')", r#""text""#);
}

#[test]
fn operators_can_be_passed_as_arguments() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defun apply2 (f a b) (f a b))");
    assert_evaluates(&mut env, "(apply2 + 1 2)", "3");
    assert_evaluates(&mut env, "(apply2 * 3 4)", "12");

    assert_sane(&mut env, "(defun sub (a b) (- a b))");
    assert_evaluates(&mut env, "(apply2 sub 10 4)", "6");
}

#[test]
fn redefinition_rules() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defvar taken 1)");
    assert_fails(&mut env, "(defun taken (x) x)");
    assert_fails(&mut env, "(defun + (x) x)");
    assert_fails(&mut env, "(defun cond (x) x)");

    assert_sane(&mut env, "(defun twice (x) (* 2 x))");
    assert_fails(&mut env, "(defvar twice 3)");

    // User functions may be replaced.
    assert_sane(&mut env, "(defun twice (x) (+ x x x))");
    assert_evaluates(&mut env, "(twice 2)", "6");
}

#[test]
fn defun_rejects_malformed_definitions() {
    let mut env = Environment::new();

    assert_fails(&mut env, "(defun 1 (x) x)");
    assert_fails(&mut env, "(defun (f) (x) x)");
    assert_fails(&mut env, "(defun f x x)");
    assert_fails(&mut env, "(defun f (1) 1)");
    assert_fails(&mut env, "(defun f (x x) x)");
}

#[test]
fn recursion_limit_is_enforced() {
    let mut env = Environment::with_recursion_limit(50);

    assert_sane(&mut env, "(defun down (n) (cond ((= n 0) 0) (true (down (- n 1)))))");
    assert_evaluates(&mut env, "(down 49)", "0");

    let error = assert_fails(&mut env, "(down 50)");
    assert_eq!(error, "Reached the recursion limit of 50. Terminating.");

    // The session is still usable afterwards.
    assert_evaluates(&mut env, "(down 3)", "0");
    assert_eq!(env.depth(), 0);
}

#[test]
fn unbounded_recursion_terminates() {
    let mut env = Environment::with_recursion_limit(2_000);

    assert_sane(&mut env, "(defun forever (n) (forever (+ n 1)))");
    let error = assert_fails(&mut env, "(forever 0)");
    assert!(error.contains("recursion limit"), "unexpected message: {error}");
}

#[test]
fn default_recursion_limit_stops_runaway_calls() {
    let mut env = Environment::new();

    assert_sane(&mut env, "(defun forever (n) (forever (+ n 1)))");
    let error = assert_fails(&mut env, "(forever 0)");
    assert_eq!(error,
               format!("Reached the recursion limit of {DEFAULT_RECURSION_LIMIT}. Terminating."));
    assert_eq!(env.depth(), 0);
}

#[test]
fn builtins_are_registered_as_functions() {
    let mut env = Environment::new();

    for symbol in BUILTIN_OPERATORS {
        assert!(env.operator(symbol).is_some_and(|op| op.is_builtin()));
        assert_evaluates(&mut env, symbol, &format!("<function: {symbol}>"));
    }
}
