// Table driven checks of the built-in words and control flow using test-case.

use qforth::runtime::data_structures::value::Value;
use qforth::runtime::error::{Result, ScriptError};
use qforth::runtime::interpreter::forth_interpreter::ForthInterpreter;
use qforth::runtime::interpreter::{Interpreter, InterpreterStack};
use test_case::test_case;

fn eval_and_stack(line: &str, init_stack: &[i64]) -> Result<Vec<i64>> {
    let mut interp = ForthInterpreter::standard();

    for &v in init_stack {
        interp.push(Value::from(v));
    }

    interp.execute_line(line)?;
    Ok(interp.stack().numbers())
}

#[test_case("0", &[], &[0]; "zero")]
#[test_case("42", &[], &[42]; "number")]
#[test_case("-7", &[], &[-7]; "negative number")]
#[test_case("+", &[2, 2], &[4]; "simple add")]
#[test_case("-", &[2, 5], &[3]; "simple sub")]
#[test_case("-", &[5, 2], &[-3]; "sub takes the top as left operand")]
#[test_case("10 1 flip -", &[], &[9]; "flip then sub decrements")]
#[test_case("*", &[3, 4], &[12]; "simple mul")]
#[test_case("dup", &[42], &[42, 42]; "dup")]
#[test_case("dup", &[1, 2], &[1, 2, 2]; "dup with two elements")]
#[test_case("drop", &[1, 2], &[1]; "drop")]
#[test_case("flip", &[1, 2], &[2, 1]; "flip")]
#[test_case("flip", &[1, 2, 3, 4], &[1, 2, 4, 3]; "flip with four elements")]
#[test_case("rotate", &[1, 2, 3], &[2, 3, 1]; "rotate")]
#[test_case("rotate", &[1, 2, 3, 4], &[1, 3, 4, 2]; "rotate with four elements")]
#[test_case("square", &[3], &[9]; "predefined square")]
#[test_case("fib", &[1, 1], &[1, 2]; "predefined fib")]
#[test_case("fib-10", &[], &[89, 144]; "predefined fib ten")]
#[test_case(": square dup * ; 3 square", &[], &[9]; "user square")]
#[test_case(": f 42 ; f", &[], &[42]; "trivial function")]
#[test_case(": noop ; 1 noop", &[], &[1]; "empty body")]
#[test_case("0 if 42 then", &[], &[42]; "top level if taken")]
#[test_case("1 if 42 then", &[], &[]; "top level if skipped")]
#[test_case("0 if 1 else 2 then", &[], &[1]; "top level if branch")]
#[test_case("5 if 1 else 2 then", &[], &[2]; "top level else branch")]
#[test_case(": f if 10 else 20 then ; f", &[0], &[10]; "function with if-else-then zero selects if")]
#[test_case(": f if 10 else 20 then ; f", &[1], &[20]; "function with if-else-then one selects else")]
#[test_case(": f if 10 else 20 then ; f", &[-3], &[20]; "function with if-else-then negative selects else")]
#[test_case(": f IF 10 ELSE 20 THEN ; f", &[0], &[10]; "keywords ignore case")]
#[test_case(": g if if 1 else 2 then else 3 then ; g", &[0, 0], &[1]; "nested if if")]
#[test_case(": g if if 1 else 2 then else 3 then ; g", &[1, 0], &[2]; "nested if else")]
#[test_case(": g if if 1 else 2 then else 3 then ; g", &[0, 1], &[0, 3]; "nested outer else")]
#[test_case("choose", &[5, 3, 0], &[5]; "choose first")]
#[test_case("choose", &[5, 3, 1], &[3]; "choose second")]
#[test_case(": a b ; : b 7 ; a", &[], &[7]; "late bound reference")]
#[test_case(": w 1 ; : w 2 ; w", &[], &[2]; "redefinition replaces")]
#[test_case(": sq dup * ; : quad sq sq ; quad", &[2], &[16]; "words calling words")]
fn forth_cases(line: &str, init_stack: &[i64], expected: &[i64]) {
    let result = eval_and_stack(line, init_stack).unwrap();
    assert_eq!(result, expected);
}

// Each comparison keeps both operands and pushes 0 for true, 1 for false.  The top value is
// compared against the value beneath it.
#[test_case(">", &[0, 1], &[0, 1, 0]; "greater is true")]
#[test_case(">", &[1, 0], &[1, 0, 1]; "greater is false")]
#[test_case(">", &[1, 1], &[1, 1, 1]; "greater for equal")]
#[test_case(">=", &[1, 1], &[1, 1, 0]; "greater or equal is true")]
#[test_case(">=", &[2, 1], &[2, 1, 1]; "greater or equal is false")]
#[test_case("<", &[2, 1], &[2, 1, 0]; "less is true")]
#[test_case("<", &[1, 2], &[1, 2, 1]; "less is false")]
#[test_case("<=", &[2, 2], &[2, 2, 0]; "less or equal is true")]
#[test_case("<=", &[1, 2], &[1, 2, 1]; "less or equal is false")]
#[test_case("==", &[3, 3], &[3, 3, 0]; "equal is true")]
#[test_case("==", &[3, 4], &[3, 4, 1]; "equal is false")]
#[test_case("!=", &[3, 4], &[3, 4, 0]; "not equal is true")]
#[test_case("!=", &[3, 3], &[3, 3, 1]; "not equal is false")]
fn comparison_cases(line: &str, init_stack: &[i64], expected: &[i64]) {
    let result = eval_and_stack(line, init_stack).unwrap();
    assert_eq!(result, expected);
}

#[test_case("dup", &[]; "dup on empty stack")]
#[test_case("drop", &[]; "drop on empty stack")]
#[test_case("+", &[]; "add on empty stack")]
#[test_case("+", &[1]; "add with one value")]
#[test_case("*", &[1]; "mul with one value")]
#[test_case("flip", &[1]; "flip with one value")]
#[test_case("rotate", &[1, 2]; "rotate with two values")]
#[test_case(">", &[1]; "compare with one value")]
#[test_case("choose", &[1, 0]; "choose with two values")]
#[test_case(": f if 1 then ; f", &[]; "conditional on empty stack")]
fn underflow_cases(line: &str, init_stack: &[i64]) {
    let result = eval_and_stack(line, init_stack);
    assert!(matches!(result, Err(ScriptError::Underflow { .. })), "{:?}", result);
}

#[test_case("choose", &[5, 3, 2]; "choose with flag two")]
#[test_case("choose", &[5, 3, -1]; "choose with negative flag")]
#[test_case("+", &[i64::MAX, 1]; "add overflow")]
#[test_case("-", &[1, i64::MIN]; "sub overflow")]
#[test_case("*", &[i64::MAX, 2]; "mul overflow")]
fn invalid_argument_cases(line: &str, init_stack: &[i64]) {
    let result = eval_and_stack(line, init_stack);
    assert!(matches!(result, Err(ScriptError::InvalidArgument { .. })), "{:?}", result);
}

#[test_case(": w if 1 else ;"; "missing then")]
#[test_case(": w if 1 ;"; "missing then without else")]
#[test_case(": w if if 1 then ;"; "missing outer then")]
#[test_case(": else 1 then ;"; "bare else then")]
#[test_case(": w else 1 then ;"; "stray else in body")]
#[test_case(": 1 then ;"; "bare one then")]
#[test_case(": w 1 then ;"; "stray then in body")]
#[test_case(": w if 1 else 2 else 3 then ;"; "second else")]
#[test_case(": ;"; "unnamed definition")]
#[test_case(": if 1 then ;"; "if before the name")]
#[test_case("0 if : foo 1 ; then"; "definition inside top level if")]
#[test_case("0 if 1 ; then"; "definition end inside top level if")]
fn compilation_error_cases(line: &str) {
    let result = eval_and_stack(line, &[]);
    assert!(matches!(result, Err(ScriptError::CompilationIncomplete(_))), "{:?}", result);
}
