use crate::runtime::{
    data_structures::{data_stack::DataStack, execution_queue::ExecutionQueue},
    error,
};
use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Formatter},
    rc::Rc,
};

/// Definition of a native word handler.  It sees the data stack and the queue of the run loop
/// that invoked it, and may push follow-up tokens onto that queue.
pub type NativeHandler = dyn Fn(&mut DataStack, &mut ExecutionQueue) -> error::Result<()>;

/// The token list of a compiled word or of one branch of a conditional, in source order.
pub type WordBody = Rc<Vec<String>>;

/// What happens when a word is invoked.
#[derive(Clone)]
pub enum Action {
    /// A word written in Rust.
    Native(Rc<NativeHandler>),

    /// A word whose invocation expands to a fixed token sequence.
    Compiled(WordBody),

    /// One `if / else / then` fragment.  Pops a value and expands `if_body` on a 0, `else_body`
    /// on anything else.
    Conditional {
        if_body: WordBody,
        else_body: WordBody,
    },
}

impl Action {
    pub fn native<F>(handler: F) -> Action
    where
        F: Fn(&mut DataStack, &mut ExecutionQueue) -> error::Result<()> + 'static,
    {
        Action::Native(Rc::new(handler))
    }

    pub fn compiled(body: Vec<String>) -> Action {
        Action::Compiled(Rc::new(body))
    }

    pub fn conditional(if_body: Vec<String>, else_body: Vec<String>) -> Action {
        Action::Conditional {
            if_body: Rc::new(if_body),
            else_body: Rc::new(else_body),
        }
    }

    pub fn word_type(&self) -> WordType {
        match self {
            Action::Native(_) => WordType::Native,
            Action::Compiled(_) | Action::Conditional { .. } => WordType::Scripted,
        }
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Action::Native(_) => write!(f, "Native(<fn>)"),
            Action::Compiled(body) => write!(f, "Compiled({:?})", body),
            Action::Conditional { if_body, else_body } => {
                write!(f, "Conditional(if: {:?}, else: {:?})", if_body, else_body)
            }
        }
    }
}

/// The type of a word in the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordType {
    /// The word is a native word written in Rust.
    Native,

    /// The word was produced by the word compiler.
    Scripted,
}

/// The visibility of a word in the `words` listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordVisibility {
    /// The word is visible within the directory listing.
    Visible,

    /// The word is hidden from the directory listing.  Synthetic conditional words live here.
    Hidden,
}

/// The information stored in the dictionary for each word.
#[derive(Clone, Debug)]
pub struct WordInfo {
    /// The name of the word.
    pub name: String,

    /// What invoking the word does.
    pub action: Action,

    /// Is the word visible in the directory listing?
    pub visibility: WordVisibility,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,
}

impl WordInfo {
    pub fn word_type(&self) -> WordType {
        self.action.word_type()
    }
}

/// Word name to action mapping used by the interpreter.  Names are case-sensitive and a later
/// insert under the same name replaces the earlier entry.
#[derive(Default)]
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Pretty print the visible part of the dictionary, sorted by name.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let mut visible: Vec<&WordInfo> = self
            .words
            .values()
            .filter(|info| info.visibility == WordVisibility::Visible)
            .collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));

        let max_size = visible.iter().map(|info| info.name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", visible.len())?;

        for info in visible {
            let kind = match info.word_type() {
                WordType::Native => "native",
                WordType::Scripted => "script",
            };

            writeln!(
                formatter,
                "{:width$}  {}  {:16}  --  {}",
                info.name,
                kind,
                info.signature,
                info.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word, replacing any earlier word of the same name.
    pub fn insert(&mut self, info: WordInfo) {
        let _ = self.words.insert(info.name.clone(), info);
    }

    /// Remove a word, handing back its entry if there was one.
    pub fn remove(&mut self, name: &str) -> Option<WordInfo> {
        self.words.remove(name)
    }

    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
