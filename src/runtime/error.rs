use thiserror::Error;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// Any error that occurs while compiling or executing a qforth command.
///
/// None of these are fatal to the interpreter.  A failing run loop is abandoned, a failing
/// definition is discarded, and the interpreter is left ready for the next command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScriptError
{
    /// An operation needed more values than the data stack held.
    #[error("Stack underflow, needed {needed} value(s) but only {available} available.")]
    Underflow { needed: usize, available: usize },

    /// A native word was handed a value outside of the domain it accepts.
    #[error("Invalid argument to {word}: {message}")]
    InvalidArgument { word: String, message: String },

    /// A non-numeric token with no dictionary entry.
    #[error("Word {0} is not defined.")]
    UnknownWord(String),

    /// The word compiler was closed while some definition or conditional was still open, or it
    /// was handed a token that could not belong where it appeared.
    #[error("Definition incomplete: {0}")]
    CompilationIncomplete(String),

    /// Reading input for the front end failed.
    #[error("I/O error: {0}")]
    Io(String)
}


impl ScriptError
{
    /// Create an underflow error for an operation that needed `needed` values.
    pub fn underflow(needed: usize, available: usize) -> ScriptError
    {
        ScriptError::Underflow { needed, available }
    }

    /// Create an invalid argument error attributed to the given word.
    pub fn invalid_argument(word: &str, message: String) -> ScriptError
    {
        ScriptError::InvalidArgument { word: word.to_string(), message }
    }

    /// Create an incomplete definition error and wrap it in a Result::Err.
    pub fn incomplete_as_result<T>(reason: String) -> Result<T>
    {
        Err(ScriptError::CompilationIncomplete(reason))
    }

    /// Was this error raised by the word compiler rather than the run loop?
    pub fn is_compilation_error(&self) -> bool
    {
        matches!(self, ScriptError::CompilationIncomplete(_))
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::Io(error.to_string())
    }
}
