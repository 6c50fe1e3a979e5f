use crate::{
    add_native_word,
    runtime::{
        data_structures::{data_stack::DataStack, execution_queue::ExecutionQueue, value::Value},
        error::{self, ScriptError},
        interpreter::Interpreter,
    },
};

/// Pop two values, combine them and push the result.  The top value is the left operand, the
/// same order the comparisons use, so `a b -` computes `b - a`.  Overflow is an invalid argument
/// and leaves the stack as it was.
fn binary_op(
    stack: &mut DataStack,
    word: &str,
    op: fn(i64, i64) -> Option<i64>,
) -> error::Result<()> {
    let items = stack.peek_many(2)?;
    let top = items[0].value_of();
    let below = items[1].value_of();

    let result = op(top, below).ok_or_else(|| {
        ScriptError::invalid_argument(
            word,
            format!("{} {} {} overflows a 64-bit integer.", top, word, below),
        )
    })?;

    let _ = stack.pop_many(2)?;
    stack.push(Value::Number(result));

    Ok(())
}

pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "+",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            binary_op(stack, "+", i64::checked_add)
        },
        "Add the top two values.",
        "a b -- b+a"
    );

    add_native_word!(
        interpreter,
        "-",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            binary_op(stack, "-", i64::checked_sub)
        },
        "Subtract the value beneath the top from the top value.",
        "a b -- b-a"
    );

    add_native_word!(
        interpreter,
        "*",
        |stack: &mut DataStack, _queue: &mut ExecutionQueue| {
            binary_op(stack, "*", i64::checked_mul)
        },
        "Multiply the top two values.",
        "a b -- b*a"
    );
}
