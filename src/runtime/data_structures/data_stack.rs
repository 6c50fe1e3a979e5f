use crate::runtime::{
    data_structures::value::Value,
    error::{self, ScriptError},
};
use std::fmt::{self, Display, Formatter};

/// The LIFO data stack shared by every command run against an interpreter.  Values are stored
/// bottom first, the top of the stack is the end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataStack {
    values: Vec<Value>,
}

/// Print the stack top first, the same way the `print` word shows it.
impl Display for DataStack {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for value in self.values.iter().rev() {
            write!(f, "[{}]", value)?;
        }

        Ok(())
    }
}

impl DataStack {
    pub fn new() -> DataStack {
        DataStack { values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The stack contents as plain integers, bottom first.
    pub fn numbers(&self) -> Vec<i64> {
        self.values.iter().map(Value::value_of).collect()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop the top value.  An empty stack hands back the `Empty` sentinel rather than failing.
    pub fn pop(&mut self) -> Value {
        self.values.pop().unwrap_or(Value::Empty)
    }

    /// Look at the top value without removing it.  An empty stack gives the `Empty` sentinel.
    pub fn peek(&self) -> Value {
        self.values.last().copied().unwrap_or(Value::Empty)
    }

    /// Make sure at least `count` values are available.  Words call this before touching the
    /// stack so a failed word leaves the stack as it found it.
    pub fn require(&self, count: usize) -> error::Result<()> {
        if self.values.len() < count {
            return Err(ScriptError::underflow(count, self.values.len()));
        }

        Ok(())
    }

    /// Pop the top value, failing with an underflow on an empty stack.
    pub fn pop_value(&mut self) -> error::Result<Value> {
        self.require(1)?;
        Ok(self.pop())
    }

    /// Pop the top `count` values, returned top first.  Nothing is popped if the stack is too
    /// shallow.
    pub fn pop_many(&mut self, count: usize) -> error::Result<Vec<Value>> {
        self.require(count)?;

        let split = self.values.len() - count;
        let mut popped = self.values.split_off(split);
        popped.reverse();

        Ok(popped)
    }

    /// Copy the top `count` values, top first, without popping them.
    pub fn peek_many(&self, count: usize) -> error::Result<Vec<Value>> {
        self.require(count)?;

        Ok(self.values.iter().rev().take(count).copied().collect())
    }

    /// Drop every value on the stack.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
