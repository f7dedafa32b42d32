//! Invariant properties checked over generated inputs.

use proptest::prelude::*;
use tickle::{
    format_int, glob_match, list_to_string, parse_int, parse_list, unescape, Interp, Value,
};

proptest! {
    /// Any representable word survives list construction and re-parsing
    /// verbatim.  The generator sticks to representable words: no
    /// backslashes and no braces, since those have documented holes in the
    /// textual list format.
    #[test]
    fn word_round_trip(words in prop::collection::vec("[a-z0-9 \t$_.-]{0,12}", 0..8)) {
        let values: Vec<Value> = words.iter().map(|w| Value::from(w.as_str())).collect();
        let text = list_to_string(&values);
        let reparsed = parse_list(&text);

        prop_assert_eq!(reparsed.len(), values.len());
        for (original, got) in values.iter().zip(reparsed.iter()) {
            prop_assert_eq!(original.as_str(), got.as_str());
        }
    }

    /// Integers survive formatting and re-parsing in every base expr
    /// understands.
    #[test]
    fn int_round_trip(n in any::<i64>(), base in prop::sample::select(vec![8u32, 10, 16])) {
        let text = format_int(n, base);
        let parsed = parse_int(&text, 10, 0);
        prop_assert!(parsed.is_some());
        let (value, consumed) = parsed.unwrap();
        prop_assert_eq!(value, n);
        prop_assert_eq!(consumed, text.len());
    }

    /// Any character escaped with a plain backslash decodes back to
    /// itself.  Characters with mnemonic escapes are covered separately
    /// below.
    #[test]
    fn escape_decode(ch in any::<char>().prop_filter(
        "characters with special escape meanings",
        |c| !matches!(c, 'a' | 'b' | 'e' | 'f' | 'n' | 'r' | 't' | 'v' | 'x' | '0' | '\n')
    )) {
        let encoded = format!("\\{}", ch);
        prop_assert_eq!(unescape(&encoded), Some(ch.to_string()));
    }

    /// The glob matcher terminates within its depth budget for arbitrary
    /// patterns and targets, and never claims to consume more characters
    /// than the target has.
    #[test]
    fn glob_bounded(pattern in "[ab*?\\[\\]-]{0,10}", target in "[ab]{0,10}") {
        let consumed = glob_match(&pattern, &target, false, target.len().max(1) as i64);
        prop_assert!(consumed <= target.len().max(1) as i64);
    }

    /// catch never propagates: whatever the inner script does, catch
    /// returns ok, and its numeric result is 0 exactly when the script
    /// completed normally.
    #[test]
    fn catch_never_propagates((script, inner_ok) in prop::sample::select(vec![
        ("set a 1", true),
        ("set a", false),
        ("error boom", false),
        ("break", false),
        ("continue", false),
        ("return 5", false),
        ("exit 3", false),
        ("nosuchcommand", false),
        ("expr 1 +", false),
        ("expr 1 + 1", true),
    ])) {
        let mut interp = Interp::new();
        let script = format!("catch {{{}}}", script);
        let result = interp.eval(&script);
        prop_assert!(result.is_ok());
        let expected = if inner_ok { "0" } else { "1" };
        let value = result.unwrap();
        prop_assert_eq!(value.as_str(), expected);
    }
}

#[test]
fn mnemonic_escapes_decode() {
    let cases: &[(&str, &str)] = &[
        ("\\\\", "\\"),
        ("\\n", "\n"),
        ("\\r", "\r"),
        ("\\t", "\t"),
        ("\\a", "\x07"),
        ("\\b", "\x08"),
        ("\\e", "\x1b"),
        ("\\f", "\x0c"),
        ("\\v", "\x0b"),
    ];
    for (encoded, expected) in cases {
        assert_eq!(unescape(encoded).as_deref(), Some(*expected));
    }
}

#[test]
fn alias_transparency() {
    // After upvar links y to the caller's x, writes through either name are
    // visible through the other.
    let mut interp = Interp::new();
    interp
        .eval("proc setter {val} { upvar x y; set y $val }")
        .unwrap();
    interp.eval("proc reader {} { upvar x y; set y }").unwrap();

    interp.eval("set x 1").unwrap();
    interp.eval("setter 42").unwrap();
    assert_eq!(interp.eval("set x").unwrap().as_str(), "42");

    interp.eval("set x 7").unwrap();
    assert_eq!(interp.eval("reader").unwrap().as_str(), "7");
}

#[test]
fn scope_isolation() {
    // Nothing a procedure creates locally survives its return.
    let mut interp = Interp::new();
    interp
        .eval("proc maker {} { set created 1; set another 2 }")
        .unwrap();
    interp.eval("maker").unwrap();
    assert_eq!(interp.eval("info exists created").unwrap().as_str(), "0");
    assert_eq!(interp.eval("info exists another").unwrap().as_str(), "0");
}

#[test]
fn list_length_and_indexing() {
    // llength sees exactly the constructor's arguments, and lindex returns
    // each one verbatim.
    let elements = ["plain", "two words", "", "three more words", "last"];
    let mut interp = Interp::new();

    let script = format!(
        "set l [list {}]",
        elements
            .iter()
            .map(|e| format!("{{{}}}", e))
            .collect::<Vec<_>>()
            .join(" ")
    );
    interp.eval(&script).unwrap();

    let len = interp.eval("llength $l").unwrap();
    assert_eq!(len.as_str(), elements.len().to_string());

    for (i, expected) in elements.iter().enumerate() {
        let got = interp.eval(&format!("lindex $l {}", i)).unwrap();
        assert_eq!(got.as_str(), *expected, "element {}", i);
    }
}
