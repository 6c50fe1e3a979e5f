use std::fmt::{self, Display, Formatter};

/// The to-do list of tokens driving a run loop.  It is popped from the top, so expanding a word
/// pushes its body here instead of recursing into the host call stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionQueue {
    tokens: Vec<String>,
}

impl Display for ExecutionQueue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for token in self.tokens.iter().rev() {
            write!(f, "[{}]", token)?;
        }

        Ok(())
    }
}

impl ExecutionQueue {
    pub fn new() -> ExecutionQueue {
        ExecutionQueue { tokens: Vec::new() }
    }

    /// Create a queue holding a single pending token.
    pub fn with_token(token: &str) -> ExecutionQueue {
        let mut queue = ExecutionQueue::new();
        queue.push(token.to_string());
        queue
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Schedule a token to run next.
    pub fn push(&mut self, token: String) {
        self.tokens.push(token);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// Schedule a whole body so that its tokens come back off the queue in body order.
    pub fn push_body(&mut self, body: &[String]) {
        self.tokens.extend(body.iter().rev().cloned());
    }
}
