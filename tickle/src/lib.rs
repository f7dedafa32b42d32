//! Tickle: a small, embeddable command language in the TCL family.
//!
//! Tickle is an interpreter meant to be embedded in Rust applications: a
//! scripting layer, a command language for a console, or a reader for
//! configuration files that deserve a little logic.  The language is a
//! compact TCL dialect — everything is a string, commands are words,
//! substitution is `$var` and `[cmd]`, and the control structures are
//! ordinary commands operating on unevaluated bodies.
//!
//! The primary API is the [`Interp`] struct; see the [`interp`] module for
//! an overview of embedding, evaluating scripts, defining commands, and
//! attaching application data.
//!
//! ```
//! use tickle::Interp;
//!
//! let mut interp = Interp::new();
//! let value = interp
//!     .eval("set total 0; foreach n {1 2 3 4} { incr total $n }; set total")
//!     .unwrap();
//! assert_eq!(value.as_str(), "10");
//! ```
//!
//! Values are plain text ([`Value`]); lists are strings parsed on demand
//! ([`parse_list`], [`list_to_string`]); every command completes with a
//! `TickleResult` — a value, or an exception carrying one of the closed set
//! of status codes (`error`, `return`, `break`, `continue`, `exit`, plus
//! extension-defined codes).

pub use crate::interp::Interp;
pub use crate::list::{list_to_string, parse_list};
pub use crate::types::*;
pub use crate::util::{format_int, glob_match, parse_int, string_escape, unescape};
pub use crate::value::Value;

mod commands;
mod expr;
pub mod interp;
pub mod list;
mod parser;
mod scope;
pub mod types;
pub mod util;
pub mod value;

/// Returns an `Ok` result: `tickle_ok!()` for the empty value,
/// `tickle_ok!(expr)` for a value convertible into a [`Value`], or
/// `tickle_ok!(fmt, args...)` to format one.
#[macro_export]
macro_rules! tickle_ok {
    () => (
        Ok($crate::Value::empty())
    );
    ($arg:expr) => (
        Ok($crate::Value::from($arg))
    );
    ($($args:tt)+) => (
        Ok($crate::Value::from(format!($($args)+)))
    );
}

/// Returns an error result: `tickle_err!(expr)` for a message convertible
/// into a [`Value`], or `tickle_err!(fmt, args...)` to format one.
#[macro_export]
macro_rules! tickle_err {
    ($arg:expr) => (
        Err($crate::Exception::error($crate::Value::from($arg)))
    );
    ($($args:tt)+) => (
        Err($crate::Exception::error($crate::Value::from(format!($($args)+))))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickle_ok() {
        let empty: TickleResult = tickle_ok!();
        assert_eq!(empty, Ok(Value::empty()));

        let text: TickleResult = tickle_ok!("abc");
        assert_eq!(text, Ok(Value::from("abc")));

        let number: TickleResult = tickle_ok!(5);
        assert_eq!(number, Ok(Value::from("5")));

        let formatted: TickleResult = tickle_ok!("{} + {}", 1, 2);
        assert_eq!(formatted, Ok(Value::from("1 + 2")));
    }

    #[test]
    fn test_tickle_err() {
        let plain: TickleResult = tickle_err!("oops");
        assert_eq!(plain, Err(Exception::error(Value::from("oops"))));

        let formatted: TickleResult = tickle_err!("oops {}", 5);
        assert_eq!(formatted, Err(Exception::error(Value::from("oops 5"))));
    }
}
