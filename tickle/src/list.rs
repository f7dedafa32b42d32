//! Textual lists.
//!
//! A list is just a string: its elements are the words the tokenizer
//! produces with every substitution disabled.  Building a list re-escapes
//! each element with the word-safe escape, so constructing and re-parsing a
//! list is stable.

use crate::parser::{Parser, ParserOptions, TokenKind};
use crate::types::{TickleInt, TickleList};
use crate::util;
use crate::value::Value;

/// Parses a string into its list elements: the tokenizer run with variable,
/// command, and backslash substitution all disabled.  Returns an empty list
/// for unparsable input (an unterminated brace or bracket).
pub fn parse_list(text: &str) -> TickleList {
    let mut parser = Parser::new(text, ParserOptions::list());
    let mut list = TickleList::new();

    loop {
        let token = match parser.next_token() {
            Ok(token) => token,
            Err(_) => return TickleList::new(),
        };
        match token.kind {
            TokenKind::Eof => return list,
            TokenKind::String | TokenKind::Escape | TokenKind::Variable | TokenKind::Command => {
                list.push(Value::from(token.text));
            }
            _ => (),
        }
    }
}

/// Formats elements as a list: each element word-safe escaped, joined by
/// single spaces.
pub fn list_to_string(list: &[Value]) -> String {
    list.iter()
        .map(|item| util::string_escape(item.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a list index at byte offset `pos` of `text`: a decimal number,
/// `end`, or `end-N`, where `end` designates `list_max - 1`.  Returns the
/// (possibly negative) resolved index and the offset after it, or `None`
/// when no index is present.
pub(crate) fn parse_index(text: &str, list_max: usize, pos: usize) -> Option<(TickleInt, usize)> {
    let bytes = text.as_bytes();
    let mut pos = pos;

    while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
        pos += 1;
    }
    if pos >= bytes.len() {
        return None;
    }

    let mut from_end = false;
    if text[pos..].starts_with("end") {
        from_end = true;
        pos += 3;
        if pos >= bytes.len() || bytes[pos] != b'-' {
            return Some((list_max as TickleInt - 1, pos));
        }
        pos += 1;
    }

    let mut result: TickleInt = 0;
    let mut ok = false;
    while pos < bytes.len() {
        match (bytes[pos] as char).to_digit(10) {
            Some(d) => {
                result = result * 10 + TickleInt::from(d);
                ok = true;
                pos += 1;
            }
            None => break,
        }
    }
    if !ok {
        return None;
    }

    if from_end {
        result = list_max as TickleInt - result - 1;
    }
    Some((result, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(list: &TickleList) -> Vec<&str> {
        list.iter().map(Value::as_str).collect()
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(strs(&parse_list("")), Vec::<&str>::new());
        assert_eq!(strs(&parse_list("a b c")), vec!["a", "b", "c"]);
        assert_eq!(strs(&parse_list("a {b c} d")), vec!["a", "b c", "d"]);
        assert_eq!(strs(&parse_list("  a   b  ")), vec!["a", "b"]);
        assert_eq!(strs(&parse_list("a {} b")), vec!["a", "", "b"]);
        assert_eq!(strs(&parse_list("a { } b")), vec!["a", " ", "b"]);
        assert_eq!(
            strs(&parse_list("1 {2 3} 4 {5 {6 7} 8}")),
            vec!["1", "2 3", "4", "5 {6 7} 8"]
        );
        // Substitution triggers are inert.
        assert_eq!(strs(&parse_list("$a b")), vec!["$a", "b"]);
        assert_eq!(strs(&parse_list("[a b] c")), vec!["[a b]", "c"]);
        // Unparsable input yields the empty list.
        assert_eq!(strs(&parse_list("{a b")), Vec::<&str>::new());
    }

    #[test]
    fn test_list_to_string() {
        let list: TickleList = vec![
            Value::from("a"),
            Value::from("b c"),
            Value::from(""),
            Value::from("{d e}"),
        ];
        assert_eq!(list_to_string(&list), "a {b c} {} {d e}");
    }

    #[test]
    fn test_list_round_trip() {
        let elements = ["a", "b c", "", " ", "a$b", "x[y]", "end"];
        let list: TickleList = elements.iter().map(|s| Value::from(*s)).collect();
        let text = list_to_string(&list);
        let reparsed = parse_list(&text);
        assert_eq!(strs(&reparsed), elements.to_vec());
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0", 5, 0), Some((0, 1)));
        assert_eq!(parse_index("12", 5, 0), Some((12, 2)));
        assert_eq!(parse_index("end", 5, 0), Some((4, 3)));
        assert_eq!(parse_index("end-1", 5, 0), Some((3, 5)));
        assert_eq!(parse_index("end-7", 5, 0), Some((-3, 5)));
        assert_eq!(parse_index(" 2", 5, 0), Some((2, 2)));
        assert_eq!(parse_index("2 1", 5, 0), Some((2, 1)));
        assert_eq!(parse_index("2 1", 5, 1), Some((1, 3)));
        assert_eq!(parse_index("x", 5, 0), None);
        assert_eq!(parse_index("", 5, 0), None);
        assert_eq!(parse_index("end-x", 5, 0), None);
    }
}
