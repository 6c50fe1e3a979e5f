use crate::runtime::{
    data_structures::{
        data_stack::DataStack,
        dictionary::{Action, Dictionary, WordInfo, WordVisibility},
        value::Value,
    },
    error,
};
use std::fmt::{self, Display, Formatter};

pub mod forth_interpreter;

/// Where incoming tokens are routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Tokens run immediately.
    Executing,

    /// Tokens are collected into a `: ... ;` definition.
    Recording,

    /// Tokens are collected into an `if ... then` typed outside of a definition.  It runs as soon
    /// as its outermost `then` arrives.
    Conditional,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let text = match self {
            Mode::Executing => "executing",
            Mode::Recording => "recording",
            Mode::Conditional => "conditional",
        };

        write!(f, "{}", text)
    }
}

/// Trait for managing the interpreter's data stack.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required, for example by the `.s` repl command.
    fn stack(&self) -> &DataStack;

    /// Push a value onto the stack.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;
}

/// Trait for managing the words known to the interpreter.
pub trait WordManagement {
    /// Add a word to the dictionary, replacing any word of the same name.
    fn add_word(
        &mut self,
        name: String,
        action: Action,
        description: String,
        signature: String,
        visibility: WordVisibility,
    );

    /// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, word: &str) -> Option<&WordInfo>;

    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;
}

/// Core interpreter trait.
///
/// Brings together the stack and the dictionary with the command entry points.  Every error is
/// local to the command that raised it, afterwards the interpreter is back in `Executing` mode
/// with its dictionary intact and its stack as the failing command left it.
pub trait Interpreter: InterpreterStack + WordManagement {
    /// Process one whitespace-free token.  This is the only way input reaches the interpreter.
    fn execute(&mut self, token: &str) -> error::Result<()>;

    /// Split a line on whitespace and execute each token in turn, stopping at the first error.
    fn execute_line(&mut self, line: &str) -> error::Result<()>;

    /// Where the next token will be routed.
    fn mode(&self) -> Mode;

    /// Abandon any definition in progress and clear the data stack.  The dictionary is kept.
    fn reset(&mut self);
}

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use $crate::runtime::data_structures::dictionary::{Action, WordVisibility};

        $interpreter.add_word(
            $name.to_string(),
            Action::native($function),
            $description.to_string(),
            $signature.to_string(),
            WordVisibility::Visible,
        );
    }};
}

/// Register a word whose body is given as source text, as if it had been defined with
/// `: name body ;`.  The body may not contain `if`.
#[macro_export]
macro_rules! add_script_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $body:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use $crate::{
            lang::tokenizing::tokenize,
            runtime::data_structures::dictionary::{Action, WordVisibility},
        };

        $interpreter.add_word(
            $name.to_string(),
            Action::compiled(tokenize($body)),
            $description.to_string(),
            $signature.to_string(),
            WordVisibility::Visible,
        );
    }};
}
