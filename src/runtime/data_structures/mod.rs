/// Module contains the Value enumeration, the only kind of data the interpreter manipulates.
pub mod value;

/// The LIFO data stack values are computed on.
pub mod data_stack;

/// The LIFO token queue that drives the run loop.
pub mod execution_queue;

/// The dictionary module provides the word dictionary and the `Action` a word performs.
pub mod dictionary;
