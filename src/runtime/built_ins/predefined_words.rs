use crate::{add_script_word, runtime::interpreter::Interpreter};

/// Register the words that ship written in the language itself.  They are ordinary compiled words
/// and can be redefined like any other.
pub fn register_predefined_words(interpreter: &mut dyn Interpreter) {
    add_script_word!(
        interpreter,
        "square",
        "dup *",
        "Square the top value.",
        "n -- n*n"
    );

    add_script_word!(
        interpreter,
        "fib",
        "dup flip rotate +",
        "Advance a pair of Fibonacci numbers by one step.",
        "a b -- b a+b"
    );

    add_script_word!(
        interpreter,
        "fib-10",
        "1 1 fib fib fib fib fib fib fib fib fib fib .",
        "Print the twelfth Fibonacci number.",
        " -- a b"
    );
}
