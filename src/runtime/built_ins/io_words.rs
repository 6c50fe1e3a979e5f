use crate::{
    add_native_word,
    runtime::{
        data_structures::{data_stack::DataStack, execution_queue::ExecutionQueue},
        error,
        interpreter::Interpreter,
    },
};

/// Print the top value without removing it.  An empty stack prints the empty sentinel.
///
/// Signature: `value -- value`
fn word_print_top(stack: &mut DataStack, _queue: &mut ExecutionQueue) -> error::Result<()> {
    println!("{}", stack.peek());
    Ok(())
}

/// Print the whole stack, top first.
///
/// Signature: ` -- `
fn word_print_stack(stack: &mut DataStack, _queue: &mut ExecutionQueue) -> error::Result<()> {
    println!("H -> {} <- T", stack);
    Ok(())
}

/// Register the debug printing words.
pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ".",
        word_print_top,
        "Print the top value of the stack without removing it.",
        "value -- value"
    );

    add_native_word!(
        interpreter,
        "print",
        word_print_stack,
        "Print the whole data stack, top first.",
        " -- "
    );
}
