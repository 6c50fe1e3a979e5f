/// Words that manipulate the data stack.
mod stack_words;

mod simple_arithmetic_words;

/// Words that compare values and push a 0/1 flag.
mod comparison_words;

/// Words that push follow-up tokens onto the execution queue.
mod control_words;

use crate::runtime::{
    built_ins::base_words::{
        comparison_words::register_comparison_words, control_words::register_control_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the core native words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_stack_words(interpreter);
    register_simple_arithmetic_words(interpreter);
    register_comparison_words(interpreter);
    register_control_words(interpreter);
}
