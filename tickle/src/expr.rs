//! The `expr` command.
//!
//! Arguments are joined with spaces, lowercased, and re-evaluated with
//! dispatch disabled, so variable and command substitutions happen but the
//! words are simply joined back into text.  The resulting text is then
//! parsed as a single integer operation: `operand op operand` for the
//! binary operators, or `op operand` for the unary ones.  When the command
//! was given exactly three words with a relational operator in the middle
//! and neither operand is numeric, the comparison falls back to
//! lexicographic string order.

use crate::interp::Interp;
use crate::parser::ParserOptions;
use crate::types::*;
use crate::util;
use crate::Value;
use crate::{tickle_err, tickle_ok};

const RELATIONAL: [&str; 6] = [">", ">=", "<", "<=", "==", "!="];

/// # expr arg ?arg ...?
pub fn cmd_expr(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "arg ?arg ...?")?;

    // FIRST, the three-word relational form gets its operands substituted
    // individually so the string fallback can see them.
    if argv.len() == 4 && RELATIONAL.contains(&argv[2].as_str()) {
        let op = argv[2].as_str();
        let lhs = substitute(interp, argv[1].as_str())?;
        let rhs = substitute(interp, argv[3].as_str())?;

        let lhs_int = util::parse_int(lhs.as_str(), 10, 0);
        let rhs_int = util::parse_int(rhs.as_str(), 10, 0);
        if lhs_int.is_none() && rhs_int.is_none() {
            let (a, b) = (lhs.as_str(), rhs.as_str());
            let result = match op {
                ">" => a > b,
                ">=" => a >= b,
                "<" => a < b,
                "<=" => a <= b,
                "==" => a == b,
                _ => a != b,
            };
            return tickle_ok!(result);
        }

        // At least one side is numeric: fall through to the integer
        // evaluation, on the already-substituted text.
        let joined = format!("{} {} {}", lhs.as_str(), op, rhs.as_str());
        return evaluate(&joined);
    }

    // NEXT, the general form: join, lowercase, substitute, evaluate.
    let joined = argv[1..]
        .iter()
        .map(Value::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let substituted = substitute(interp, &joined)?;
    evaluate(substituted.as_str())
}

/// Runs substitutions over the expression text without dispatching any
/// commands: the no_eval evaluation mode.
fn substitute(interp: &mut Interp, text: &str) -> TickleResult {
    let options = ParserOptions {
        no_eval: true,
        ..ParserOptions::default()
    };
    interp.eval_script(text, options)
}

/// Parses and applies a single integer operation over fully substituted
/// expression text.
fn evaluate(text: &str) -> TickleResult {
    let bytes = text.as_bytes();

    // First operand, if any.
    let (first, mut pos, binary) = match util::parse_int(text, 10, 0) {
        Some((value, next)) => (value, next, true),
        None => (0, 0, false),
    };

    // The operator: letters or symbols, up to the next digit or space.
    while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
        pos += 1;
    }
    let op_start = pos;
    while pos < bytes.len() {
        let c = bytes[pos] as char;
        if c.is_ascii_digit() || c.is_whitespace() {
            break;
        }
        pos += 1;
    }
    let op = &text[op_start..pos];

    if op.is_empty() {
        if binary {
            return tickle_ok!(util::format_int(first, 10));
        }
        return tickle_err!("operator not specified");
    }

    // Second operand.
    let second = match util::parse_int(text, 10, pos) {
        Some((value, _)) => value,
        None => return tickle_err!("not a number"),
    };

    let result = if binary {
        match op {
            "+" => first.wrapping_add(second),
            "-" => first.wrapping_sub(second),
            "*" => first.wrapping_mul(second),
            "/" => {
                if second == 0 {
                    return tickle_err!("divide by zero");
                }
                first.wrapping_div(second)
            }
            "and" => first & second,
            "or" => first | second,
            "xor" => first ^ second,
            "max" => first.max(second),
            "min" => first.min(second),
            ">" => (first > second) as TickleInt,
            ">=" => (first >= second) as TickleInt,
            "<" => (first < second) as TickleInt,
            "<=" => (first <= second) as TickleInt,
            "==" => (first == second) as TickleInt,
            "!=" => (first != second) as TickleInt,
            _ => return tickle_err!("invalid operator"),
        }
    } else {
        match op {
            "-" | "neg" => second.wrapping_neg(),
            "not" => (second == 0) as TickleInt,
            "inv" => !second,
            "abs" => second.wrapping_abs(),
            "bool" => (second != 0) as TickleInt,
            "+" => second,
            _ => return tickle_err!("invalid operator"),
        }
    };

    tickle_ok!(util::format_int(result, 10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn eval(script: &str) -> TickleResult {
        Interp::new().eval(script)
    }

    fn ok(script: &str, expected: &str) {
        assert_eq!(eval(script), Ok(Value::from(expected)), "script: {}", script);
    }

    fn err(script: &str, expected: &str) {
        assert_eq!(
            eval(script),
            Err(Exception::error(Value::from(expected))),
            "script: {}",
            script
        );
    }

    #[test]
    fn test_binary_operators() {
        ok("expr 1 + 2", "3");
        ok("expr 2*4", "8");
        ok("expr 7 - 10", "-3");
        ok("expr 7 / 2", "3");
        ok("expr 6 and 3", "2");
        ok("expr 6 or 3", "7");
        ok("expr 6 xor 3", "5");
        ok("expr 6 max 3", "6");
        ok("expr 6 min 3", "3");
        ok("expr 2 > 1", "1");
        ok("expr 1 >= 2", "0");
        ok("expr 1 < 2", "1");
        ok("expr 2 <= 2", "1");
        ok("expr 2 == 2", "1");
        ok("expr 2 != 2", "0");
    }

    #[test]
    fn test_unary_operators() {
        ok("expr -2", "-2");
        ok("expr - 2", "-2");
        ok("expr neg 5", "-5");
        ok("expr not 0", "1");
        ok("expr not 7", "0");
        ok("expr inv 0", "-1");
        ok("expr abs -7", "7");
        ok("expr bool 42", "1");
        ok("expr bool 0", "0");
        ok("expr + 5", "5");
    }

    #[test]
    fn test_bases() {
        ok("expr 0x10 + 1", "17");
        ok("expr 010 + 1", "9");
    }

    #[test]
    fn test_braced_expression() {
        ok("expr {2 + 2}", "4");
        ok("expr {3 < 0x2}", "0");
    }

    #[test]
    fn test_errors() {
        err("expr = 2", "invalid operator");
        err("expr 1 @ 2", "invalid operator");
        err("expr 1 +", "not a number");
        err("expr 1 / 0", "divide by zero");
        err("expr abc", "not a number");
        err("expr {}", "operator not specified");
    }

    #[test]
    fn test_string_fallback() {
        ok("expr apple < banana", "1");
        ok("expr apple > banana", "0");
        ok("expr apple == apple", "1");
        ok("expr apple != banana", "1");

        let mut interp = Interp::new();
        interp.eval("set a cherry").unwrap();
        interp.eval("set b apple").unwrap();
        assert_eq!(interp.eval("expr $a > $b"), Ok(Value::from("1")));
    }

    #[test]
    fn test_fallback_needs_three_words() {
        // Longer expressions never fall back to string comparison.
        err("expr apple < banana pie", "not a number");
    }

    #[test]
    fn test_substitution_happens_once() {
        let mut interp = Interp::new();
        interp.eval("set n 0").unwrap();
        // Braced operands reach expr unsubstituted; each runs exactly once.
        assert_eq!(
            interp.eval("expr {[incr n]} < {[incr n]}"),
            Ok(Value::from("1"))
        );
        assert_eq!(interp.eval("set n"), Ok(Value::from("2")));
    }
}
