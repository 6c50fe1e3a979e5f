use crate::{
    lang::tokenizing::{CONDITIONAL_PREFIX, Keyword, is_else, is_if, is_then, is_valid_word_name},
    runtime::{
        data_structures::dictionary::Action,
        error::{self, ScriptError},
    },
};
use lazy_static::lazy_static;
use log::{debug, trace};
use std::{
    cell::Cell,
    collections::HashMap,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};
use uuid::Uuid;

/// The words produced by one compile session, keyed by name.  Synthetic conditional words are
/// included under their generated labels.
pub type CompiledWords = HashMap<String, Action>;

/// Source of the identifiers used to key accumulators.  Conditional ids double as the dictionary
/// names of the synthetic conditional words, so they must never repeat within a process.
pub trait IdProvider {
    /// Id for the top level accumulator of a new compile session.
    fn next_definition_id(&self) -> String;

    /// Id, and word name, for a new `if` accumulator.
    fn next_conditional_id(&self) -> String;
}

lazy_static! {
    // The counter for generating conditional word names.
    static ref CONDITIONAL_COUNTER: AtomicU64 = AtomicU64::new(0);
}

/// Default id source.  Definitions get a v4 uuid, conditionals a process-wide sequence number.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_definition_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn next_conditional_id(&self) -> String {
        let id = CONDITIONAL_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{}{}>", CONDITIONAL_PREFIX, id)
    }
}

/// Deterministic ids, `prefix_0`, `prefix_1`, ... shared between both kinds of id.  Meant for
/// tests that need to know the synthetic word names up front.
#[derive(Debug)]
pub struct SequentialIdProvider {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIdProvider {
    pub fn new(prefix: &str) -> SequentialIdProvider {
        SequentialIdProvider {
            prefix: prefix.to_string(),
            next: Cell::new(0),
        }
    }

    fn take(&self) -> String {
        let current = self.next.get();
        self.next.set(current + 1);

        format!("{}_{}", self.prefix, current)
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_definition_id(&self) -> String {
        self.take()
    }

    fn next_conditional_id(&self) -> String {
        self.take()
    }
}

/// What became of a token handed to an accumulator.
enum Pushed {
    Accepted,

    /// The token closed the accumulator.  Only `then` does this.
    Completed,

    /// The token can not appear here.  The whole compile session is spoiled.
    Rejected(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BaseState {
    AwaitingLabel,
    CollectingBody,
}

/// A top level definition: the first token names it, the rest form its body.
#[derive(Debug)]
struct BaseAccumulator {
    label: Option<String>,
    body: Vec<String>,
    state: BaseState,
}

impl BaseAccumulator {
    fn new() -> BaseAccumulator {
        BaseAccumulator {
            label: None,
            body: Vec::new(),
            state: BaseState::AwaitingLabel,
        }
    }

    fn labeled(label: String) -> BaseAccumulator {
        BaseAccumulator {
            label: Some(label),
            body: Vec::new(),
            state: BaseState::CollectingBody,
        }
    }

    fn push(&mut self, token: &str) -> Pushed {
        match self.state {
            BaseState::AwaitingLabel => {
                if !is_valid_word_name(token) {
                    return Pushed::Rejected(format!("{} can not be used as a word name", token));
                }

                self.label = Some(token.to_string());
                self.state = BaseState::CollectingBody;
                Pushed::Accepted
            }

            BaseState::CollectingBody => {
                if is_else(token) || is_then(token) {
                    return Pushed::Rejected(format!("{} without a matching if", token));
                }

                self.body.push(token.to_string());
                Pushed::Accepted
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IfState {
    CollectingIf,
    CollectingElse,
}

/// One `if ... [else ...] then` fragment.
#[derive(Debug)]
struct IfAccumulator {
    label: String,
    if_body: Vec<String>,
    else_body: Vec<String>,
    state: IfState,
    complete: bool,
}

impl IfAccumulator {
    fn new(label: String) -> IfAccumulator {
        IfAccumulator {
            label,
            if_body: Vec::new(),
            else_body: Vec::new(),
            state: IfState::CollectingIf,
            complete: false,
        }
    }

    fn push(&mut self, token: &str) -> Pushed {
        if is_then(token) {
            self.complete = true;
            return Pushed::Completed;
        }

        match (self.state, is_else(token)) {
            (IfState::CollectingIf, true) => {
                self.state = IfState::CollectingElse;
                Pushed::Accepted
            }

            (IfState::CollectingElse, true) => {
                Pushed::Rejected(format!("second else inside {}", self.label))
            }

            (_, false) => {
                self.append(token.to_string());
                Pushed::Accepted
            }
        }
    }

    /// Add a token to whichever branch is being collected.
    fn append(&mut self, token: String) {
        match self.state {
            IfState::CollectingIf => self.if_body.push(token),
            IfState::CollectingElse => self.else_body.push(token),
        }
    }

    fn into_action(self) -> Action {
        Action::conditional(self.if_body, self.else_body)
    }
}

#[derive(Debug)]
enum Accumulator {
    Base(BaseAccumulator),
    If(IfAccumulator),
}

impl Accumulator {
    fn push(&mut self, token: &str) -> Pushed {
        match self {
            Accumulator::Base(base) => base.push(token),
            Accumulator::If(fragment) => fragment.push(token),
        }
    }

    /// Record a call to a finished conditional at the current position of the body.
    fn append_reference(&mut self, label: String) -> Pushed {
        match self {
            Accumulator::Base(base) => match base.state {
                BaseState::AwaitingLabel => {
                    Pushed::Rejected("if used before the word was named".to_string())
                }

                BaseState::CollectingBody => {
                    base.body.push(label);
                    Pushed::Accepted
                }
            },

            Accumulator::If(fragment) => {
                fragment.append(label);
                Pushed::Accepted
            }
        }
    }
}

/// Turns the tokens of one definition into dictionary entries.
///
/// Tokens are routed to the current accumulator.  An `if` opens a new accumulator on top of the
/// current one; its `then` closes it into a synthetic `Conditional` word whose name is appended
/// to the parent's body.  Nesting therefore needs only the stack of parent ids and the words
/// already completed, never a parse tree.
///
/// A token that can not belong where it appears puts the compiler into an error state.  Further
/// tokens are ignored and `complete` reports the error.
pub struct WordCompiler {
    ids: Rc<dyn IdProvider>,
    base_id: String,
    current: String,
    parents: Vec<String>,
    accumulators: HashMap<String, Accumulator>,
    completed: CompiledWords,
    error: Option<ScriptError>,
}

impl WordCompiler {
    /// Open a session for a named definition.  The first token pushed becomes the word's name.
    pub fn new(ids: Rc<dyn IdProvider>) -> WordCompiler {
        let base_id = ids.next_definition_id();
        WordCompiler::with_base(ids, base_id, BaseAccumulator::new())
    }

    /// Open a session whose top level word is already named after its own id.  Used for
    /// conditionals typed outside of any definition.
    pub fn anonymous(ids: Rc<dyn IdProvider>) -> WordCompiler {
        let base_id = ids.next_definition_id();
        let base = BaseAccumulator::labeled(base_id.clone());

        WordCompiler::with_base(ids, base_id, base)
    }

    fn with_base(ids: Rc<dyn IdProvider>, base_id: String, base: BaseAccumulator) -> WordCompiler {
        let mut accumulators = HashMap::new();
        accumulators.insert(base_id.clone(), Accumulator::Base(base));

        WordCompiler {
            ids,
            current: base_id.clone(),
            base_id,
            parents: Vec::new(),
            accumulators,
            completed: CompiledWords::new(),
            error: None,
        }
    }

    /// The name the top level word has been given so far, if any.
    pub fn base_label(&self) -> Option<&str> {
        match self.accumulators.get(&self.base_id) {
            Some(Accumulator::Base(base)) => base.label.as_deref(),
            _ => None,
        }
    }

    /// How many `if` accumulators are currently open.
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Has a token already spoiled this session?
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Route one token to the current accumulator.
    pub fn push_word(&mut self, token: &str) {
        if self.error.is_some() {
            trace!("Ignoring {} after a compile error.", token);
            return;
        }

        if is_if(token) {
            self.open_conditional();
            return;
        }

        if matches!(
            Keyword::classify(token),
            Some(Keyword::DefineStart | Keyword::DefineEnd)
        ) {
            return self.fail(format!("{} can not appear inside a body", token));
        }

        let pushed = match self.accumulators.get_mut(&self.current) {
            Some(accumulator) => accumulator.push(token),
            None => Pushed::Rejected(format!("no open accumulator for {}", token)),
        };

        self.handle(pushed);
    }

    fn handle(&mut self, pushed: Pushed) {
        match pushed {
            Pushed::Accepted => (),
            Pushed::Completed => self.close_conditional(),
            Pushed::Rejected(reason) => self.fail(reason),
        }
    }

    fn fail(&mut self, reason: String) {
        debug!("Compile session failed: {}", reason);
        self.error = Some(ScriptError::CompilationIncomplete(reason));
    }

    fn open_conditional(&mut self) {
        let id = self.ids.next_conditional_id();
        let parent = std::mem::replace(&mut self.current, id.clone());

        trace!("Opening conditional {} inside {}.", id, parent);

        self.parents.push(parent);
        self.accumulators
            .insert(id.clone(), Accumulator::If(IfAccumulator::new(id)));
    }

    fn close_conditional(&mut self) {
        let finished = match self.accumulators.remove(&self.current) {
            Some(Accumulator::If(fragment)) => fragment,
            _ => return self.fail(format!("{} closed but is not a conditional", self.current)),
        };

        let parent = match self.parents.pop() {
            Some(parent) => parent,
            None => return self.fail(format!("{} has no enclosing definition", finished.label)),
        };

        let label = finished.label.clone();

        trace!("Closing conditional {} back into {}.", label, parent);

        self.completed.insert(label.clone(), finished.into_action());
        self.current = parent;

        let pushed = match self.accumulators.get_mut(&self.current) {
            Some(accumulator) => accumulator.append_reference(label),
            None => Pushed::Rejected(format!("parent {} of a conditional is gone", self.current)),
        };

        self.handle(pushed);
    }

    /// Finish the session.  Either every accumulator reached a terminal state and all of the
    /// words are returned, or nothing is.
    pub fn complete(self) -> error::Result<CompiledWords> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut words = self.completed;

        for (id, accumulator) in self.accumulators {
            match accumulator {
                Accumulator::Base(base) => match base.label {
                    Some(label) => {
                        words.insert(label, Action::compiled(base.body));
                    }

                    None => {
                        return ScriptError::incomplete_as_result(
                            "definition was never given a name".to_string(),
                        );
                    }
                },

                Accumulator::If(fragment) => {
                    if !fragment.complete {
                        return ScriptError::incomplete_as_result(format!(
                            "if {} is missing its then",
                            id
                        ));
                    }

                    words.insert(fragment.label.clone(), fragment.into_action());
                }
            }
        }

        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::{CompiledWords, IdProvider, SequentialIdProvider, UuidIdProvider, WordCompiler};
    use crate::runtime::{
        data_structures::{dictionary::Action, execution_queue::ExecutionQueue},
        error::ScriptError,
    };
    use std::rc::Rc;

    fn compile(tokens: &[&str]) -> Result<CompiledWords, ScriptError> {
        let mut compiler = WordCompiler::new(Rc::new(SequentialIdProvider::new("id")));

        for token in tokens {
            compiler.push_word(token);
        }

        compiler.complete()
    }

    fn body_of(action: &Action) -> Vec<String> {
        match action {
            Action::Compiled(body) => body.to_vec(),
            other => panic!("Expected a compiled word, found {:?}.", other),
        }
    }

    fn branches_of(action: &Action) -> (Vec<String>, Vec<String>) {
        match action {
            Action::Conditional { if_body, else_body } => (if_body.to_vec(), else_body.to_vec()),
            other => panic!("Expected a conditional word, found {:?}.", other),
        }
    }

    #[test]
    fn plain_definition() {
        let words = compile(&["square", "dup", "*"]).unwrap();

        assert_eq!(words.len(), 1);
        assert_eq!(body_of(&words["square"]), vec!["dup", "*"]);
    }

    #[test]
    fn supports_full_expression() {
        let words = compile(&[
            "refib", "0", ">", "if", "1", "flip", "-", "rotate", "fib", "rotate", "rotate",
            "refib", "else", "drop", "print", "then",
        ])
        .unwrap();

        assert_eq!(words.len(), 2);

        let mut queue = ExecutionQueue::new();
        queue.push_body(&body_of(&words["refib"]));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().as_deref(), Some("0"));
        assert_eq!(queue.pop().as_deref(), Some(">"));
        assert_eq!(queue.pop().as_deref(), Some("id_1"));

        let (if_body, else_body) = branches_of(&words["id_1"]);
        assert_eq!(
            if_body,
            vec!["1", "flip", "-", "rotate", "fib", "rotate", "rotate", "refib"]
        );
        assert_eq!(else_body, vec!["drop", "print"]);
    }

    #[test]
    fn supports_nested_ifs() {
        let words = compile(&[
            "outer", "if", "1", "if", "2", "else", "3", "then", "else", "4", "then", "5",
        ])
        .unwrap();

        assert_eq!(words.len(), 3);
        assert_eq!(body_of(&words["outer"]), vec!["id_1", "5"]);
        assert_eq!(
            branches_of(&words["id_1"]),
            (vec!["1".to_string(), "id_2".to_string()], vec!["4".to_string()])
        );
        assert_eq!(
            branches_of(&words["id_2"]),
            (vec!["2".to_string()], vec!["3".to_string()])
        );
    }

    #[test]
    fn nested_if_inside_else_branch() {
        let words = compile(&["w", "if", "1", "else", "if", "2", "then", "then"]).unwrap();

        assert_eq!(
            branches_of(&words["id_1"]),
            (vec!["1".to_string()], vec!["id_2".to_string()])
        );
    }

    #[test]
    fn keywords_ignore_case() {
        let words = compile(&["w", "IF", "1", "Else", "2", "THEN"]).unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(body_of(&words["w"]), vec!["id_1"]);
    }

    #[test]
    fn if_without_else() {
        let words = compile(&["w", "if", "1", "then"]).unwrap();

        assert_eq!(branches_of(&words["id_1"]), (vec!["1".to_string()], vec![]));
    }

    #[test]
    fn missing_then_is_an_error() {
        let result = compile(&["blah", "0", ">", "if", "1", "else"]);

        assert!(matches!(result, Err(ScriptError::CompilationIncomplete(_))));
    }

    #[test]
    fn missing_inner_then_is_an_error() {
        let result = compile(&["blah", "if", "if", "1", "then"]);

        assert!(matches!(result, Err(ScriptError::CompilationIncomplete(_))));
    }

    #[test]
    fn stray_else_then_is_an_error() {
        assert!(compile(&["else", "1", "then"]).is_err());
        assert!(compile(&["w", "else", "1", "then"]).is_err());
    }

    #[test]
    fn stray_then_is_an_error() {
        assert!(compile(&["1", "then"]).is_err());
        assert!(compile(&["w", "1", "then"]).is_err());
    }

    #[test]
    fn second_else_is_an_error() {
        let result = compile(&["w", "if", "1", "else", "2", "else", "3", "then"]);

        assert!(matches!(result, Err(ScriptError::CompilationIncomplete(_))));
    }

    #[test]
    fn if_before_the_name_is_an_error() {
        assert!(compile(&["if", "1", "then"]).is_err());
        assert!(compile(&["if", "1"]).is_err());
    }

    #[test]
    fn definition_markers_are_an_error() {
        let mut compiler = WordCompiler::anonymous(Rc::new(SequentialIdProvider::new("top")));

        compiler.push_word("if");
        compiler.push_word(":");
        assert!(compiler.has_failed());

        compiler.push_word("then");
        assert!(matches!(
            compiler.complete(),
            Err(ScriptError::CompilationIncomplete(_))
        ));
    }

    #[test]
    fn empty_session_is_an_error() {
        assert!(compile(&[]).is_err());
    }

    #[test]
    fn depth_tracks_open_ifs() {
        let mut compiler = WordCompiler::new(Rc::new(SequentialIdProvider::new("id")));

        compiler.push_word("w");
        compiler.push_word("if");
        compiler.push_word("if");
        assert_eq!(compiler.depth(), 2);

        compiler.push_word("then");
        assert_eq!(compiler.depth(), 1);

        compiler.push_word("then");
        assert_eq!(compiler.depth(), 0);
        assert_eq!(compiler.base_label(), Some("w"));
    }

    #[test]
    fn anonymous_session_is_named_after_its_id() {
        let mut compiler = WordCompiler::anonymous(Rc::new(SequentialIdProvider::new("top")));

        compiler.push_word("if");
        compiler.push_word("7");
        compiler.push_word("then");

        assert_eq!(compiler.base_label(), Some("top_0"));

        let words = compiler.complete().unwrap();
        assert_eq!(body_of(&words["top_0"]), vec!["top_1"]);
    }

    #[test]
    fn uuid_provider_never_repeats() {
        let ids = UuidIdProvider;

        assert_ne!(ids.next_definition_id(), ids.next_definition_id());
        assert_ne!(ids.next_conditional_id(), ids.next_conditional_id());
    }
}
