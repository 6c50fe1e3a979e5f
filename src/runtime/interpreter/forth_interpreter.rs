use crate::{
    lang::{
        compilation::{CompiledWords, IdProvider, UuidIdProvider, WordCompiler},
        tokenizing::{Keyword, parse_number, tokenize},
    },
    runtime::{
        built_ins::{
            base_words::register_base_words, io_words::register_io_words,
            predefined_words::register_predefined_words,
        },
        data_structures::{
            data_stack::DataStack,
            dictionary::{Action, Dictionary, WordInfo, WordVisibility},
            execution_queue::ExecutionQueue,
            value::Value,
        },
        error::{self, ScriptError},
        interpreter::{Interpreter, InterpreterStack, Mode, WordManagement},
    },
};
use log::{debug, trace, warn};
use std::{mem, rc::Rc};

/// The compile session, if any, that incoming tokens are feeding.
enum Session {
    Idle,
    Definition(WordCompiler),
    Conditional(WordCompiler),
}

/// The core interpreter: one dictionary, one data stack, and the mode toggle deciding whether a
/// token runs or is handed to the word compiler.
///
/// Running never recurses.  Each command gets a fresh execution queue, and invoking a compiled
/// or conditional word pushes its body back onto that queue, so a word that calls itself grows
/// the queue rather than the host call stack.
pub struct ForthInterpreter {
    /// The data stack, kept across every command.
    stack: DataStack,

    /// The words known by the interpreter.
    dictionary: Dictionary,

    /// The definition being recorded, if any.
    session: Session,

    /// Where compile sessions get their accumulator ids.
    ids: Rc<dyn IdProvider>,
}

impl Default for ForthInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterStack for ForthInterpreter {
    fn stack(&self) -> &DataStack {
        &self.stack
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value> {
        self.stack.pop_value()
    }
}

impl WordManagement for ForthInterpreter {
    fn add_word(
        &mut self,
        name: String,
        action: Action,
        description: String,
        signature: String,
        visibility: WordVisibility,
    ) {
        trace!("Adding word {}.", name);

        self.dictionary.insert(WordInfo {
            name,
            action,
            visibility,
            description,
            signature,
        });
    }

    fn find_word(&self, word: &str) -> Option<&WordInfo> {
        self.dictionary.try_get(word)
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl Interpreter for ForthInterpreter {
    fn execute(&mut self, token: &str) -> error::Result<()> {
        match mem::replace(&mut self.session, Session::Idle) {
            Session::Idle => match Keyword::classify(token) {
                Some(Keyword::DefineStart) => {
                    self.session = Session::Definition(WordCompiler::new(self.ids.clone()));
                    debug!("Recording a new definition.");
                    Ok(())
                }

                Some(Keyword::If) => {
                    let mut compiler = WordCompiler::anonymous(self.ids.clone());
                    compiler.push_word(token);

                    self.session = Session::Conditional(compiler);
                    Ok(())
                }

                _ => {
                    let mut queue = ExecutionQueue::with_token(token);
                    self.run(&mut queue)
                }
            },

            Session::Definition(mut compiler) => match Keyword::classify(token) {
                Some(Keyword::DefineEnd) => self.end_definition(compiler),

                Some(Keyword::DefineStart) => {
                    warn!(
                        "Abandoning definition of {} for a new one.",
                        compiler.base_label().unwrap_or("<unnamed>")
                    );

                    self.session = Session::Definition(WordCompiler::new(self.ids.clone()));
                    Ok(())
                }

                _ => {
                    compiler.push_word(token);
                    self.session = Session::Definition(compiler);
                    Ok(())
                }
            },

            Session::Conditional(mut compiler) => {
                compiler.push_word(token);

                if compiler.has_failed() || compiler.depth() == 0 {
                    self.run_conditional(compiler)
                } else {
                    self.session = Session::Conditional(compiler);
                    Ok(())
                }
            }
        }
    }

    fn execute_line(&mut self, line: &str) -> error::Result<()> {
        for token in tokenize(line) {
            self.execute(&token)?;
        }

        Ok(())
    }

    fn mode(&self) -> Mode {
        match self.session {
            Session::Idle => Mode::Executing,
            Session::Definition(_) => Mode::Recording,
            Session::Conditional(_) => Mode::Conditional,
        }
    }

    fn reset(&mut self) {
        self.session = Session::Idle;
        self.stack.clear();
    }
}

impl ForthInterpreter {
    /// Create an interpreter with an empty dictionary.
    pub fn new() -> ForthInterpreter {
        ForthInterpreter::with_id_provider(Rc::new(UuidIdProvider))
    }

    /// Create an interpreter with an empty dictionary whose compile sessions draw their ids from
    /// the given provider.
    pub fn with_id_provider(ids: Rc<dyn IdProvider>) -> ForthInterpreter {
        ForthInterpreter {
            stack: DataStack::new(),
            dictionary: Dictionary::new(),
            session: Session::Idle,
            ids,
        }
    }

    /// Create an interpreter with every native word and the predefined script words installed.
    pub fn standard() -> ForthInterpreter {
        let mut interpreter = ForthInterpreter::new();

        register_base_words(&mut interpreter);
        register_io_words(&mut interpreter);
        register_predefined_words(&mut interpreter);

        interpreter
    }

    /// Drain the queue against the dictionary and data stack.  The first error abandons every
    /// token still waiting in the queue.
    fn run(&mut self, queue: &mut ExecutionQueue) -> error::Result<()> {
        while let Some(token) = queue.pop() {
            trace!("Executing {} with {} token(s) pending.", token, queue.len());

            if let Some(number) = parse_number(&token) {
                self.stack.push(Value::Number(number));
                continue;
            }

            let action = match self.dictionary.try_get(&token) {
                Some(info) => info.action.clone(),
                None => {
                    debug!("Word {} is not defined, dropping {} pending token(s).", token, queue.len());
                    return Err(ScriptError::UnknownWord(token));
                }
            };

            match action {
                Action::Native(handler) => (*handler)(&mut self.stack, queue)?,

                Action::Compiled(body) => queue.push_body(&body),

                Action::Conditional { if_body, else_body } => {
                    let selector = self.stack.pop_value()?;

                    if selector.selects_if_branch() {
                        queue.push_body(&if_body);
                    } else {
                        queue.push_body(&else_body);
                    }
                }
            }
        }

        Ok(())
    }

    /// Close a `: ... ;` session and install its words.  A failed session installs nothing.
    fn end_definition(&mut self, compiler: WordCompiler) -> error::Result<()> {
        let name = compiler.base_label().unwrap_or("<unnamed>").to_string();

        match compiler.complete() {
            Ok(words) => {
                debug!("Defined {} ({} word(s) installed).", name, words.len());
                self.install(words);
                Ok(())
            }

            Err(err) => {
                warn!("Discarding definition of {}: {}", name, err);
                Err(err)
            }
        }
    }

    /// Install the conditional words of a top level `if ... then` and run its body right away.
    /// The conditional words only live while the body runs, a failed run included.
    fn run_conditional(&mut self, compiler: WordCompiler) -> error::Result<()> {
        let label = compiler.base_label().map(str::to_string);
        let mut words = compiler.complete()?;

        let body = label.and_then(|label| words.remove(&label));
        let installed: Vec<String> = words.keys().cloned().collect();

        self.install(words);

        let result = match body {
            Some(Action::Compiled(body)) => {
                let mut queue = ExecutionQueue::new();
                queue.push_body(&body);

                self.run(&mut queue)
            }

            _ => Ok(()),
        };

        for name in &installed {
            let _ = self.dictionary.remove(name);
        }

        trace!("Removed {} top level conditional word(s).", installed.len());

        result
    }

    fn install(&mut self, words: CompiledWords) {
        for (name, action) in words {
            let visibility = match action {
                Action::Conditional { .. } => WordVisibility::Hidden,
                _ => WordVisibility::Visible,
            };

            self.add_word(name, action, String::new(), String::new(), visibility);
        }
    }
}
