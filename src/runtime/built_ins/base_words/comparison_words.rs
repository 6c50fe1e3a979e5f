use crate::{
    add_native_word,
    runtime::{
        data_structures::{data_stack::DataStack, execution_queue::ExecutionQueue, value::ToValue},
        error,
        interpreter::Interpreter,
    },
};

/// Compare the top value against the one beneath it and push the result on top, keeping both
/// operands.  True is pushed as 0 and false as 1, the polarity the conditional words expect.
fn comparison(stack: &mut DataStack, test: fn(i64, i64) -> bool) -> error::Result<()> {
    let items = stack.peek_many(2)?;
    let top = items[0].value_of();
    let below = items[1].value_of();

    stack.push(test(top, below).to_value());

    Ok(())
}

/// Register the comparison words.  Each one reads `below top` and asks `top <op> below`.
pub fn register_comparison_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ">",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            comparison(stack, |top, below| top > below)
        },
        "Is the top value greater than the one beneath it?  0 for yes, 1 for no.",
        "below top -- below top flag"
    );

    add_native_word!(
        interpreter,
        ">=",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            comparison(stack, |top, below| top >= below)
        },
        "Is the top value greater than or equal to the one beneath it?  0 for yes, 1 for no.",
        "below top -- below top flag"
    );

    add_native_word!(
        interpreter,
        "<",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            comparison(stack, |top, below| top < below)
        },
        "Is the top value less than the one beneath it?  0 for yes, 1 for no.",
        "below top -- below top flag"
    );

    add_native_word!(
        interpreter,
        "<=",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            comparison(stack, |top, below| top <= below)
        },
        "Is the top value less than or equal to the one beneath it?  0 for yes, 1 for no.",
        "below top -- below top flag"
    );

    add_native_word!(
        interpreter,
        "==",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            comparison(stack, |top, below| top == below)
        },
        "Are the top two values equal?  0 for yes, 1 for no.",
        "a b -- a b flag"
    );

    add_native_word!(
        interpreter,
        "!=",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            comparison(stack, |top, below| top != below)
        },
        "Do the top two values differ?  0 for yes, 1 for no.",
        "a b -- a b flag"
    );
}
