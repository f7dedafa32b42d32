//! Public types used throughout Tickle.
//!
//! The most important are [`TickleResult`], the return type of every command
//! and of script evaluation, and [`Exception`], which represents all of the
//! non-`ok` ways a command can complete: errors, `return`, `break`,
//! `continue`, `exit`, and any extension-defined return codes.

use crate::tickle_err;
use crate::value::Value;

/// The integer type used by `expr`, `incr`, list indexing, and friends.
pub type TickleInt = i64;

/// A list of values: the parsed form of a textual Tickle list.
pub type TickleList = Vec<Value>;

/// The standard result of evaluating a script or executing a command:
/// a [`Value`] on normal completion, or an [`Exception`] carrying one of the
/// non-`ok` status codes.
pub type TickleResult = Result<Value, Exception>;

/// A native command function.  Receives the interpreter and the command's
/// argument vector; `argv[0]` is the command name as invoked.
pub type CommandFunc = fn(&mut crate::interp::Interp, &[Value]) -> TickleResult;

/// The status codes a command can complete with, other than `ok`.
///
/// `ok` is represented by `Ok(value)` in [`TickleResult`], so the full
/// closed set of statuses is this enum plus normal completion.  Extensions
/// may define additional codes with `Other`; the evaluator propagates them
/// exactly like `Exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// An error; the exception's value is the error message.
    Error,

    /// A `return` from a procedure; the value is the returned result.
    Return,

    /// A `break` looking for an enclosing loop.
    Break,

    /// A `continue` looking for an enclosing loop.
    Continue,

    /// An `exit`; the value is the process exit code.
    Exit,

    /// An extension-defined return code.
    Other(TickleInt),
}

/// A non-`ok` completion: a [`ResultCode`] plus the result value that goes
/// with it.  For `Error` the value is the error message; for `Return` it is
/// the returned value; for `Exit` it is the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    code: ResultCode,
    value: Value,
}

impl Exception {
    /// Creates an error exception with the given message.
    pub fn error(value: Value) -> Self {
        Self {
            code: ResultCode::Error,
            value,
        }
    }

    /// Creates an exception with an arbitrary status code and value.
    pub fn new(code: ResultCode, value: Value) -> Self {
        Self { code, value }
    }

    /// The exception's status code.
    pub fn code(&self) -> ResultCode {
        self.code
    }

    /// The exception's value: the error message, returned value, or exit
    /// code, depending on the code.
    pub fn value(&self) -> Value {
        self.value.clone()
    }

    /// Returns true if this is an error, as opposed to a control-flow
    /// exception like `return` or `break`.
    pub fn is_error(&self) -> bool {
        self.code == ResultCode::Error
    }
}

/// A subcommand of an ensemble command such as `string` or `info`: the
/// subcommand's name and the function that implements it.
#[derive(Debug)]
pub struct Subcommand(pub &'static str, pub CommandFunc);

impl Subcommand {
    /// Looks up a subcommand by name, returning the standard error when the
    /// name doesn't match any entry.
    pub fn find<'a>(subs: &'a [Subcommand], name: &str) -> Result<&'a Subcommand, Exception> {
        for sub in subs {
            if sub.0 == name {
                return Ok(sub);
            }
        }

        let mut names = String::new();
        for (i, sub) in subs.iter().enumerate() {
            if i > 0 {
                names.push_str(", ");
            }
            if i == subs.len() - 1 {
                names.push_str("or ");
            }
            names.push_str(sub.0);
        }

        Err(Exception::error(Value::from(format!(
            "unknown or ambiguous subcommand \"{}\": must be {}",
            name, names
        ))))
    }
}

/// Checks a command's argument count against the declared minimum and
/// maximum, producing the standard `wrong # args` error on a mismatch.
///
/// `namec` is the number of leading words that name the command (1 for most
/// commands, 2 for a subcommand of an ensemble); `argsig` is the signature
/// text to append after the name in the error message.  A `max` of 0 means
/// there is no upper bound.
pub fn check_args(
    namec: usize,
    argv: &[Value],
    min: usize,
    max: usize,
    argsig: &str,
) -> Result<(), Exception> {
    assert!(namec >= 1 && !argv.is_empty());

    if argv.len() >= min && (max == 0 || argv.len() <= max) {
        return Ok(());
    }

    let name = argv[..namec]
        .iter()
        .map(Value::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    if argsig.is_empty() {
        tickle_err!("wrong # args: should be \"{}\"", name)
    } else {
        tickle_err!("wrong # args: should be \"{} {}\"", name, argsig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_args() {
        assert!(check_args(1, &mk(&["cmd"]), 1, 1, "").is_ok());
        assert!(check_args(1, &mk(&["cmd", "a"]), 2, 2, "name").is_ok());
        assert!(check_args(1, &mk(&["cmd", "a", "b"]), 2, 0, "name ?arg ...?").is_ok());

        assert_eq!(
            check_args(1, &mk(&["cmd"]), 2, 2, "name"),
            Err(Exception::error(Value::from(
                "wrong # args: should be \"cmd name\""
            )))
        );
        assert_eq!(
            check_args(2, &mk(&["string", "length", "a", "b"]), 3, 3, "string"),
            Err(Exception::error(Value::from(
                "wrong # args: should be \"string length string\""
            )))
        );
    }

    #[test]
    fn test_subcommand_find() {
        fn dummy(_: &mut crate::interp::Interp, _: &[Value]) -> TickleResult {
            Ok(Value::empty())
        }
        let subs = [Subcommand("alpha", dummy), Subcommand("beta", dummy)];

        assert!(Subcommand::find(&subs, "alpha").is_ok());
        let err = Subcommand::find(&subs, "gamma").unwrap_err();
        assert_eq!(
            err.value().as_str(),
            "unknown or ambiguous subcommand \"gamma\": must be alpha, or beta"
        );
    }

    #[test]
    fn test_exception() {
        let ex = Exception::error(Value::from("oops"));
        assert!(ex.is_error());
        assert_eq!(ex.code(), ResultCode::Error);
        assert_eq!(ex.value().as_str(), "oops");

        let ex = Exception::new(ResultCode::Break, Value::empty());
        assert!(!ex.is_error());
        assert_eq!(ex.code(), ResultCode::Break);
    }

    fn mk(strs: &[&str]) -> TickleList {
        strs.iter().map(|s| Value::from(*s)).collect()
    }
}
