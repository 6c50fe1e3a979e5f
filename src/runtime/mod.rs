/// All of the core data structures used by the interpreter.
pub mod data_structures;

/// Module for defining the built-in words that are available to the interpreter.
pub mod built_ins;

/// Module for defining the error reporting of the interpreter.
pub mod error;

/// Module for defining the execution engine and the traits used to drive it.
pub mod interpreter;
