/// The core native words of the language.
pub mod base_words;

/// Words that print for debugging.
pub mod io_words;

/// Words written in the language itself and installed at startup.
pub mod predefined_words;
