use crate::{
    add_native_word,
    runtime::{
        data_structures::{data_stack::DataStack, execution_queue::ExecutionQueue},
        error,
        interpreter::Interpreter,
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(stack: &mut DataStack, _queue: &mut ExecutionQueue) -> error::Result<()> {
    let value = stack.pop_value()?;

    stack.push(value);
    stack.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(stack: &mut DataStack, _queue: &mut ExecutionQueue) -> error::Result<()> {
    let _ = stack.pop_value()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_flip(stack: &mut DataStack, _queue: &mut ExecutionQueue) -> error::Result<()> {
    let items = stack.pop_many(2)?;

    stack.push(items[0]);
    stack.push(items[1]);

    Ok(())
}

/// Bring the third value up to the top of the stack.
///
/// Signature: `a b c -- b c a`
fn word_rotate(stack: &mut DataStack, _queue: &mut ExecutionQueue) -> error::Result<()> {
    let items = stack.pop_many(3)?;

    stack.push(items[1]);
    stack.push(items[0]);
    stack.push(items[2]);

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "flip",
        word_flip,
        "Swap the top 2 values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "rotate",
        word_rotate,
        "Bring the third value on the data stack up to the top.",
        "a b c -- b c a"
    );
}
