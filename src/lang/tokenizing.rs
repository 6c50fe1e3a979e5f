/// Opens a word definition.
pub const DEFINE_START: &str = ":";

/// Closes a word definition.
pub const DEFINE_END: &str = ";";

/// Start of the generated names of conditional words.  User words may not use it.
pub const CONDITIONAL_PREFIX: &str = "<if-";

/// The tokens with meaning to the interpreter or word compiler rather than the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    DefineStart,
    DefineEnd,
    If,
    Else,
    Then,
}

impl Keyword {
    /// Classify a token.  The definition markers match exactly, `if`, `else` and `then` match
    /// regardless of case.
    pub fn classify(token: &str) -> Option<Keyword> {
        match token {
            DEFINE_START => Some(Keyword::DefineStart),
            DEFINE_END => Some(Keyword::DefineEnd),
            _ if token.eq_ignore_ascii_case("if") => Some(Keyword::If),
            _ if token.eq_ignore_ascii_case("else") => Some(Keyword::Else),
            _ if token.eq_ignore_ascii_case("then") => Some(Keyword::Then),
            _ => None,
        }
    }
}

pub fn is_if(token: &str) -> bool {
    Keyword::classify(token) == Some(Keyword::If)
}

pub fn is_else(token: &str) -> bool {
    Keyword::classify(token) == Some(Keyword::Else)
}

pub fn is_then(token: &str) -> bool {
    Keyword::classify(token) == Some(Keyword::Then)
}

/// Split a command line into tokens on whitespace.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Read a token as a base-10 signed 64-bit number literal.
pub fn parse_number(token: &str) -> Option<i64> {
    token.parse::<i64>().ok()
}

/// Can this token name a word?  Numbers would always be read as literals and keywords are never
/// looked up, so neither can.  Generated conditional names are reserved.
pub fn is_valid_word_name(token: &str) -> bool {
    !token.is_empty()
        && parse_number(token).is_none()
        && Keyword::classify(token).is_none()
        && !token.starts_with(CONDITIONAL_PREFIX)
}
