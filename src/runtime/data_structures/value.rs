use std::fmt::{ self,
                Display,
                Formatter };



/// Core value enumeration used by the qforth interpreter.  Only 64-bit signed integers are
/// supported as data, everything else is a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Value
{
    /// Sentinel handed back when reading from an empty stack.  Scripts have no way to push it.
    #[default]
    Empty,

    /// We have an integer value.  Represented as an i64.
    Number(i64)
}


/// Convert an arbitrary data type to a Value.
pub trait ToValue
{
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}


impl ToValue for i64
{
    fn to_value(&self) -> Value
    {
        Value::Number(*self)
    }
}


impl ToValue for bool
{
    /// Comparison results use 0 for true and 1 for false.  The conditional words select their if
    /// branch on a 0, so the two line up.
    fn to_value(&self) -> Value
    {
        if *self
        {
            Value::Number(0)
        }
        else
        {
            Value::Number(1)
        }
    }
}


impl From<i64> for Value
{
    fn from(value: i64) -> Value
    {
        Value::Number(value)
    }
}


impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Empty => write!(f, "--empty--"),
            Value::Number(value) => write!(f, "{}", value)
        }
    }
}


impl Value
{
    /// The numeric reading of the value.  The empty sentinel reads as 0.
    pub fn value_of(&self) -> i64
    {
        match self
        {
            Value::Empty => 0,
            Value::Number(value) => *value
        }
    }

    /// Conditional words treat 0 as the selector for their if branch.
    pub fn selects_if_branch(&self) -> bool
    {
        self.value_of() == 0
    }
}
