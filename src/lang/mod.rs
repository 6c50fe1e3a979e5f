/// Module for splitting input into tokens and classifying them.
pub mod tokenizing;

/// Module for the word compiler, which turns the tokens of one `: ... ;` definition into
/// dictionary entries, including the synthetic words behind `if / else / then`.
pub mod compilation;
