//! The Tickle value type.
//!
//! Every value in the language has one canonical representation: text.
//! [`Value`] is an immutable, cheaply cloneable string (a shared `Rc<str>`).
//! Numbers and lists are parsed out of the text on demand and formatted back
//! into text when constructed; there is no hidden union type.
//!
//! `Value` is not `Sync`; like the interpreter itself it is meant to live on
//! a single thread.

use crate::types::{Exception, TickleInt, TickleList};
use crate::util;
use std::fmt;
use std::rc::Rc;

/// A Tickle value: an immutable, shareable piece of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value(Rc<str>);

impl Value {
    /// The empty value.
    pub fn empty() -> Self {
        Value(Rc::from(""))
    }

    /// The value's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the value as an integer: optional leading whitespace and
    /// sign, then decimal digits, or octal after a leading `0`, or hex after
    /// `0x`.  Trailing text after the number is ignored, as it is everywhere
    /// integers are read out of command arguments.
    pub fn as_int(&self) -> Result<TickleInt, Exception> {
        match util::parse_int(&self.0, 10, 0) {
            Some((value, _)) => Ok(value),
            None => Err(Exception::error(Value::from("not a number"))),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value(Rc::from(s.as_str()))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value(Rc::from(s.as_str()))
    }
}

impl From<TickleInt> for Value {
    fn from(n: TickleInt) -> Self {
        Value::from(util::format_int(n, 10))
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::from(if flag { "1" } else { "0" })
    }
}

/// A list converts to its textual form, with each element word-safe escaped
/// so the text parses back into the same elements.
impl From<TickleList> for Value {
    fn from(list: TickleList) -> Self {
        Value::from(crate::list::list_to_string(&list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Value::from("abc").as_str(), "abc");
        assert_eq!(Value::empty().as_str(), "");
        assert!(Value::empty().is_empty());
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Value::from("5").as_int(), Ok(5));
        assert_eq!(Value::from("-5").as_int(), Ok(-5));
        assert_eq!(Value::from(" 12 ").as_int(), Ok(12));
        assert_eq!(Value::from("0x1f").as_int(), Ok(31));
        assert_eq!(Value::from("017").as_int(), Ok(15));
        assert!(Value::from("abc").as_int().is_err());
        assert!(Value::empty().as_int().is_err());
    }

    #[test]
    fn test_from_int() {
        assert_eq!(Value::from(42).as_str(), "42");
        assert_eq!(Value::from(-7).as_str(), "-7");
    }

    #[test]
    fn test_from_list() {
        let list: TickleList = vec![Value::from("a"), Value::from("b c")];
        assert_eq!(Value::from(list).as_str(), "a {b c}");
    }

    #[test]
    fn test_eq() {
        assert_eq!(Value::from("x"), Value::from("x"));
        assert_ne!(Value::from("x"), Value::from("y"));
    }
}
