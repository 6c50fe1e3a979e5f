use crate::{
    add_native_word,
    runtime::{
        data_structures::{data_stack::DataStack, execution_queue::ExecutionQueue},
        error::{self, ScriptError},
        interpreter::Interpreter,
    },
};

/// Pick one of two numbers by a 0/1 flag and schedule it as the next token to run.  A flag of 0
/// picks the first number, the same polarity as `if`.
///
/// Signature: `if-value else-value flag -- chosen`
fn word_choose(stack: &mut DataStack, queue: &mut ExecutionQueue) -> error::Result<()> {
    let items = stack.peek_many(3)?;
    let flag = items[0].value_of();

    let chosen = match flag {
        0 => items[2],
        1 => items[1],
        _ => {
            return Err(ScriptError::invalid_argument(
                "choose",
                format!("flag must be 0 or 1, found {}.", flag),
            ));
        }
    };

    let _ = stack.pop_many(3)?;
    queue.push(chosen.to_string());

    Ok(())
}

/// Register the words that steer execution through the execution queue.
pub fn register_control_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "choose",
        word_choose,
        "Pick the first value on a 0 flag or the second on a 1 flag.",
        "if-value else-value flag -- chosen"
    );
}
