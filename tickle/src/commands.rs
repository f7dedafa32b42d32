//! The standard Tickle commands, except `expr` (see the `expr` module).
//!
//! Each command is a `CommandFunc` registered by `Interp::new`.  Commands
//! validate their own argument vectors with `check_args` and produce their
//! results with the `tickle_ok!` and `tickle_err!` macros.  `string` and
//! `info` are ensembles dispatched through `Subcommand` tables.

use crate::interp::Interp;
use crate::list;
use crate::parser::ParserOptions;
use crate::types::*;
use crate::util;
use crate::value::Value;
use crate::{tickle_err, tickle_ok};
use regex::Regex;

/// The truth map used by conditions and `string is boolean`.  Values
/// outside the map are truthy for `if` but falsy for `while` and `for`.
pub(crate) fn truth_value(text: &str) -> Option<bool> {
    match text {
        "" | "0" | "no" | "false" => Some(false),
        "1" | "yes" | "true" => Some(true),
        _ => None,
    }
}

fn join(values: &[Value], sep: &str) -> String {
    values
        .iter()
        .map(Value::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}

//------------------------------------------------------------------------------------------------
// Variable Commands

/// # set varName ?newValue?
pub fn cmd_set(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 3, "varName ?newValue?")?;

    if argv.len() == 3 {
        interp.set_var_return(argv[1].as_str(), argv[2].clone())
    } else {
        interp.var(argv[1].as_str())
    }
}

/// # unset ?varName ...?
///
/// Removes variables from the current scope; unsetting a name that isn't
/// bound is not an error.
pub fn cmd_unset(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    for name in &argv[1..] {
        interp.unset_var(name.as_str());
    }
    tickle_ok!()
}

/// # append varName ?value ...?
pub fn cmd_append(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "varName ?value ...?")?;

    let name = argv[1].as_str();
    let mut text = match interp.var(name) {
        Ok(value) => String::from(value.as_str()),
        Err(_) => String::new(),
    };
    for value in &argv[2..] {
        text.push_str(value.as_str());
    }

    interp.set_var_return(name, Value::from(text))
}

fn incr_by(interp: &mut Interp, argv: &[Value], negate: bool, what: &str) -> TickleResult {
    check_args(1, argv, 2, 3, "varName ?amount?")?;

    let name = argv[1].as_str();
    let value = interp.var(name)?;
    let current = match util::parse_int(value.as_str(), 10, 0) {
        Some((v, _)) => v,
        None => return tickle_err!("not a number"),
    };

    let amount = match argv.get(2) {
        Some(arg) => match util::parse_int(arg.as_str(), 10, 0) {
            Some((a, _)) => a,
            None => return tickle_err!("{} not a number", what),
        },
        None => 1,
    };

    let result = if negate {
        current.wrapping_sub(amount)
    } else {
        current.wrapping_add(amount)
    };
    interp.set_var_return(name, Value::from(result))
}

/// # incr varName ?increment?
pub fn cmd_incr(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    incr_by(interp, argv, false, "increment")
}

/// # decr varName ?decrement?
pub fn cmd_decr(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    incr_by(interp, argv, true, "decrement")
}

/// # variable name value ?name value ...?
pub fn cmd_variable(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "name value ?name value ...?")?;

    let mut i = 1;
    while i + 1 < argv.len() {
        interp.set_var(argv[i].as_str(), argv[i + 1].clone());
        i += 2;
    }
    tickle_ok!()
}

/// # global varName ?varName ...?
///
/// Installs aliases for global variables in the current scope; at the top
/// level this is a no-op.
pub fn cmd_global(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    if interp.scope_level() == 0 {
        return tickle_ok!();
    }
    check_args(1, argv, 2, 0, "varName ?varName ...?")?;

    for name in &argv[1..] {
        if !interp.alias_var(0, name.as_str(), name.as_str()) {
            return tickle_err!("variable {} not found", name.as_str());
        }
    }
    tickle_ok!()
}

/// Parses an `upvar`/`uplevel` level designator: `N` counts up from the
/// current scope, `#N` counts down from the global scope.
fn parse_level(text: &str) -> Option<(bool, TickleInt)> {
    let (top, digits) = match text.strip_prefix('#') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (level, _) = util::parse_int(digits, 10, 0)?;
    Some((top, level))
}

/// # upvar ?level? otherVar myVar ?otherVar myVar ...?
///
/// Links names in the current scope to variables in another scope.  A pair
/// whose source variable doesn't exist installs nothing.
pub fn cmd_upvar(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 0, "?level? otherVar myVar ?otherVar myVar ...?")?;

    let mut pair = 1;
    let mut top = false;
    let mut level = 1;
    if argv.len() > 3 {
        pair += 1;
        match parse_level(argv[1].as_str()) {
            Some((t, l)) => {
                top = t;
                level = l;
            }
            None => return tickle_err!("not valid level number"),
        }
    }

    let frame = match interp.frame_index(top, level) {
        Some(frame) => frame,
        None => return tickle_err!("not valid level number"),
    };

    let mut i = pair;
    while i + 1 < argv.len() {
        interp.alias_var(frame, argv[i].as_str(), argv[i + 1].as_str());
        i += 2;
    }
    tickle_ok!()
}

/// # uplevel ?level? arg ?arg ...?
///
/// Joins the arguments and evaluates them with the addressed scope as the
/// current scope; the script's status and result propagate unchanged.
pub fn cmd_uplevel(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "?level? arg ?arg ...?")?;

    let mut first = 1;
    let mut top = false;
    let mut level = 1;
    if argv.len() > 2 {
        let text = argv[1].as_str();
        let looks_like_level =
            text.starts_with('#') || (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()));
        if looks_like_level {
            match parse_level(text) {
                Some((t, l)) => {
                    top = t;
                    level = l;
                    first = 2;
                }
                None => return tickle_err!("not valid level number"),
            }
        }
    }

    let frame = match interp.frame_index(top, level) {
        Some(frame) => frame,
        None => return tickle_err!("not valid level number"),
    };

    let script = join(&argv[first..], " ");
    interp.eval_in_frame(frame, &script)
}

//------------------------------------------------------------------------------------------------
// Control Flow

/// # if cond body ?elseif cond body ...? ?else body?
///
/// Conditions are evaluated by prefixing `expr`; a result outside the truth
/// map counts as true here.
pub fn cmd_if(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 0, "cond body ?elseif cond body ...? ?else body?")?;
    let n = argv.len();

    // FIRST, validate the clause structure before evaluating anything.
    let mut i = 3;
    while i < n {
        match argv[i].as_str() {
            "else" => break,
            "elseif" => i += 3,
            _ => return tickle_err!("if {} syntax error"),
        }
    }

    // NEXT, evaluate conditions until one is true.
    let mut i = 1;
    while i < n {
        let cond = format!("expr {}", argv[i].as_str());
        let value = interp.eval(&cond)?;
        if truth_value(value.as_str()) != Some(false) {
            if i + 1 < n {
                return interp.eval(argv[i + 1].as_str());
            }
            return tickle_ok!();
        }

        i += 2;
        if i >= n {
            break;
        }
        match argv[i].as_str() {
            "elseif" => i += 1,
            "else" => {
                if i + 1 < n {
                    return interp.eval(argv[i + 1].as_str());
                }
                return tickle_ok!();
            }
            _ => break,
        }
    }

    tickle_ok!()
}

/// # while test body
pub fn cmd_while(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 3, "test body")?;

    let cond = format!("expr {}", argv[1].as_str());
    loop {
        let value = interp.eval(&cond)?;
        if truth_value(value.as_str()) != Some(true) {
            break;
        }

        match interp.eval(argv[2].as_str()) {
            Ok(_) => (),
            Err(exception) => match exception.code() {
                ResultCode::Continue => (),
                ResultCode::Break => break,
                _ => return Err(exception),
            },
        }
    }
    tickle_ok!()
}

/// # for start test next body
pub fn cmd_for(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 5, 5, "start test next body")?;

    interp.eval(argv[1].as_str())?;
    let cond = format!("expr {}", argv[2].as_str());
    loop {
        let value = interp.eval(&cond)?;
        if truth_value(value.as_str()) != Some(true) {
            break;
        }

        match interp.eval(argv[4].as_str()) {
            Ok(_) => (),
            Err(exception) => match exception.code() {
                ResultCode::Continue => (),
                ResultCode::Break => return tickle_ok!(),
                _ => return Err(exception),
            },
        }

        interp.eval(argv[3].as_str())?;
    }
    tickle_ok!()
}

/// # foreach varList list ?varList list ...? body
///
/// Iterates over the value lists in parallel; variables whose list is
/// exhausted are bound to the literal `{}`.  The loop ends when every list
/// is exhausted.
pub fn cmd_foreach(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 4, 0, "varList list ?varList list ...? body")?;

    struct Binding {
        vars: TickleList,
        values: TickleList,
        index: usize,
    }

    let mut bindings: Vec<Binding> = Vec::new();
    let mut i = 1;
    while i + 1 < argv.len() {
        bindings.push(Binding {
            vars: list::parse_list(argv[i].as_str()),
            values: list::parse_list(argv[i + 1].as_str()),
            index: 0,
        });
        i += 2;
    }
    let body = argv[i].as_str();

    loop {
        let mut done = true;
        for binding in &mut bindings {
            for var in &binding.vars {
                if binding.index < binding.values.len() {
                    interp.set_var(var.as_str(), binding.values[binding.index].clone());
                    binding.index += 1;
                    done = false;
                } else {
                    interp.set_var(var.as_str(), Value::from("{}"));
                }
            }
        }
        if done {
            break;
        }

        match interp.eval(body) {
            Ok(_) => (),
            Err(exception) => match exception.code() {
                ResultCode::Continue => (),
                ResultCode::Break => break,
                _ => return Err(exception),
            },
        }
    }
    tickle_ok!()
}

/// # switch ?-exact|-glob|-regexp? ?--? string pattern body ?pattern body ...?
/// # switch ?-exact|-glob|-regexp? ?--? string {pattern body ?pattern body ...?}
///
/// Patterns are tried in order; `default` always matches; a body of `-`
/// defers to the next body.
pub fn cmd_switch(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 0, "?options? string pattern body ?pattern body ...?")?;

    let mut exact = true;
    let mut use_regex = false;
    let mut arg = 1;
    for i in 1..argv.len() {
        match argv[i].as_str() {
            "-exact" => {
                exact = true;
                use_regex = false;
            }
            "-glob" => {
                exact = false;
                use_regex = false;
            }
            "-regexp" => use_regex = true,
            "--" => {
                arg = i + 1;
                break;
            }
            _ => {
                arg = i;
                break;
            }
        }
    }

    if arg + 1 >= argv.len() {
        return tickle_err!("switch ?options? string pattern body ?pattern body ...?");
    }
    let value = argv[arg].as_str();

    // A single trailing argument holds the pattern/body pairs as a list.
    let pairs: TickleList = if argv.len() - arg == 2 {
        list::parse_list(argv[arg + 1].as_str())
    } else {
        argv[arg + 1..].to_vec()
    };

    let mut i = 0;
    while i + 1 < pairs.len() {
        let pattern = pairs[i].as_str();
        let matched = if pattern == "default" {
            true
        } else if use_regex {
            let re = Regex::new(pattern)
                .map_err(|err| Exception::error(Value::from(err.to_string())))?;
            re.is_match(value)
        } else if exact {
            pattern == value
        } else {
            let m = util::glob_match(pattern, value, false, value.len().max(1) as TickleInt);
            if m < 0 {
                return tickle_err!("match depth exceeded");
            }
            m != 0
        };

        if matched {
            let mut body = i + 1;
            while body < pairs.len() && pairs[body].as_str() == "-" {
                body += 2;
            }
            if body >= pairs.len() {
                return tickle_err!("no body specified for pattern \"{}\"", pattern);
            }
            return interp.eval(pairs[body].as_str());
        }
        i += 2;
    }

    tickle_ok!()
}

/// # break
pub fn cmd_break(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 1, 1, "")?;
    Err(Exception::new(ResultCode::Break, Value::empty()))
}

/// # continue
pub fn cmd_continue(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 1, 1, "")?;
    Err(Exception::new(ResultCode::Continue, Value::empty()))
}

/// # return ?value?
pub fn cmd_return(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 1, 2, "?value?")?;
    let value = argv.get(1).cloned().unwrap_or_default();
    Err(Exception::new(ResultCode::Return, value))
}

/// # exit ?returnCode?
pub fn cmd_exit(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 1, 2, "?returnCode?")?;
    let code = match argv.get(1) {
        Some(value) => value.as_int()?,
        None => 0,
    };
    Err(Exception::new(ResultCode::Exit, Value::from(code)))
}

/// # error message
pub fn cmd_error(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 2, "message")?;
    Err(Exception::error(argv[1].clone()))
}

/// # catch script ?resultVarName?
///
/// Always returns ok: `0` when the script completed normally, `1` for any
/// other status.  The script's result is stored in `resultVarName` when
/// given.
pub fn cmd_catch(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 3, "script ?resultVarName?")?;

    let (code, value) = match interp.eval(argv[1].as_str()) {
        Ok(value) => (0, value),
        Err(exception) => (1, exception.value()),
    };

    if argv.len() == 3 {
        interp.set_var(argv[2].as_str(), value);
    }
    tickle_ok!(code as TickleInt)
}

//------------------------------------------------------------------------------------------------
// Structural Commands

/// # proc name args body
pub fn cmd_proc(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 4, 4, "name args body")?;
    interp.add_proc(argv[1].as_str(), argv[2].clone(), argv[3].clone());
    tickle_ok!()
}

/// # rename oldName ?newName?
///
/// With no new name (or an empty one), the command is removed.
pub fn cmd_rename(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 3, "oldName ?newName?")?;

    let old_name = argv[1].as_str();
    if !interp.has_command(old_name) {
        return tickle_err!("command {} not found", old_name);
    }

    match argv.get(2) {
        Some(new_name) if !new_name.is_empty() => {
            interp.rename_command(old_name, new_name.as_str())
        }
        _ => interp.remove_command(old_name),
    }
    tickle_ok!()
}

/// # eval arg ?arg ...?
pub fn cmd_eval(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "arg ?arg ...?")?;
    let script = join(&argv[1..], " ");
    interp.eval(&script)
}

/// # subst ?-nobackslashes? ?-nocommands? ?-novariables? string
///
/// Performs substitutions without treating the result as commands: words
/// are joined by single spaces, and braces have no special meaning.
pub fn cmd_subst(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "?-nobackslashes? ?-nocommands? ?-novariables? string")?;

    let mut options = ParserOptions {
        no_eval: true,
        subst: true,
        ..ParserOptions::default()
    };
    let mut text = "";
    for arg in &argv[1..] {
        match arg.as_str() {
            "-nobackslashes" => options.no_escapes = true,
            "-nocommands" => options.no_commands = true,
            "-novariables" => options.no_vars = true,
            other => {
                text = other;
                break;
            }
        }
    }

    interp.eval_script(text, options)
}

/// # concat ?arg ...?
pub fn cmd_concat(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    let parts: Vec<&str> = argv[1..].iter().map(|v| v.as_str().trim()).collect();
    tickle_ok!(parts.join(" "))
}

/// # join list ?joinString?
pub fn cmd_join(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 3, "list ?joinString?")?;

    let elements = list::parse_list(argv[1].as_str());
    let sep = argv.get(2).map(Value::as_str).unwrap_or(" ");
    tickle_ok!(join(&elements, sep))
}

/// # puts string
pub fn cmd_puts(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 2, "string")?;
    println!("{}", argv[1]);
    tickle_ok!()
}

/// # eq string1 string2
pub fn cmd_eq(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 3, "string1 string2")?;
    tickle_ok!(argv[1] == argv[2])
}

/// # ne string1 string2
pub fn cmd_ne(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 3, "string1 string2")?;
    tickle_ok!(argv[1] != argv[2])
}

//------------------------------------------------------------------------------------------------
// List Commands

/// # list ?value ...?
pub fn cmd_list(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    tickle_ok!(list::list_to_string(&argv[1..]))
}

/// # llength list
pub fn cmd_llength(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 2, "list")?;
    tickle_ok!(list::parse_list(argv[1].as_str()).len() as TickleInt)
}

/// # lindex list ?index ...?
///
/// Indices accept `N`, `end`, and `end-N`; an index argument may itself be
/// a list of indices.  With no indices the list itself is returned; an
/// out-of-range index yields the empty string.
pub fn cmd_lindex(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "list ?index ...?")?;

    if argv.len() == 2 {
        return Ok(argv[1].clone());
    }

    let mut elements = list::parse_list(argv[1].as_str());
    for index_arg in &argv[2..] {
        let text = index_arg.as_str();
        if text.is_empty() {
            return tickle_ok!(list::list_to_string(&elements));
        }

        let mut pos = 0;
        while pos < text.len() {
            match list::parse_index(text, elements.len(), pos) {
                Some((index, next)) => {
                    if index < 0 || index as usize >= elements.len() {
                        return tickle_ok!();
                    }
                    elements = list::parse_list(elements[index as usize].as_str());
                    pos = next;
                }
                None => break,
            }
        }
    }

    tickle_ok!(list::list_to_string(&elements))
}

/// # lrange list first last
pub fn cmd_lrange(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 4, 4, "list first last")?;

    let elements = list::parse_list(argv[1].as_str());
    let (first, _) = match list::parse_index(argv[2].as_str(), elements.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("lrange first index invalid"),
    };
    let (last, _) = match list::parse_index(argv[3].as_str(), elements.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("lrange second index invalid"),
    };

    let first = first.max(0);
    let last = last.min(elements.len() as TickleInt - 1);
    if last < 0 || first > last {
        return tickle_ok!();
    }

    tickle_ok!(list::list_to_string(&elements[first as usize..=last as usize]))
}

/// # lappend varName ?value ...?
///
/// Values are joined verbatim onto the variable's current value, creating
/// the variable if needed.
pub fn cmd_lappend(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "varName ?value ...?")?;

    let name = argv[1].as_str();
    let mut text = match interp.var(name) {
        Ok(value) => String::from(value.as_str()),
        Err(_) => String::new(),
    };

    let values = join(&argv[2..], " ");
    if !text.is_empty() && !values.is_empty() {
        text.push(' ');
    }
    text.push_str(&values);

    interp.set_var_return(name, Value::from(text))
}

/// # linsert list index ?element ...?
pub fn cmd_linsert(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 0, "list index ?element ...?")?;

    let elements = list::parse_list(argv[1].as_str());
    let (index, _) = match list::parse_index(argv[2].as_str(), elements.len() + 1, 0) {
        Some(index) => index,
        None => return tickle_err!("index not valid"),
    };
    let index = index.clamp(0, elements.len() as TickleInt) as usize;

    let mut out: TickleList = elements[..index].to_vec();
    out.extend(argv[3..].iter().cloned());
    out.extend(elements[index..].iter().cloned());

    tickle_ok!(list::list_to_string(&out))
}

/// # lreplace list first last ?element ...?
pub fn cmd_lreplace(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 4, 0, "list first last ?element ...?")?;

    let elements = list::parse_list(argv[1].as_str());
    let (first, _) = match list::parse_index(argv[2].as_str(), elements.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("lreplace first index invalid"),
    };
    let (last, _) = match list::parse_index(argv[3].as_str(), elements.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("lreplace second index invalid"),
    };

    let first = first.clamp(0, elements.len() as TickleInt) as usize;
    let last = last.min(elements.len() as TickleInt - 1);
    let tail = (last + 1).max(0) as usize;

    let mut out: TickleList = elements[..first].to_vec();
    if argv.len() > 4 {
        out.extend(argv[4..].iter().cloned());
    }
    out.extend(elements[tail.max(first)..].iter().cloned());

    tickle_ok!(list::list_to_string(&out))
}

/// # lset varName ?index ...? value
///
/// Replaces the addressed element, writes the updated list back to the
/// variable, and returns it.  With no index (or an empty one) the variable
/// is simply set to the value.
pub fn cmd_lset(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 3, 0, "varName ?index ...? value")?;

    let name = argv[1].as_str();
    let new_value = argv[argv.len() - 1].clone();

    if argv.len() == 3 || argv[2].is_empty() {
        return interp.set_var_return(name, new_value);
    }

    struct Level {
        elements: TickleList,
        index: usize,
    }

    let current = interp.var(name)?;
    let mut stack: Vec<Level> = Vec::new();
    let mut elements = list::parse_list(current.as_str());

    for index_arg in &argv[2..argv.len() - 1] {
        let text = index_arg.as_str();
        let mut pos = 0;
        while pos < text.len() {
            match list::parse_index(text, elements.len(), pos) {
                Some((index, next)) => {
                    if index < 0 || index as usize >= elements.len() {
                        return tickle_err!("list index out of range");
                    }
                    let sub = list::parse_list(elements[index as usize].as_str());
                    stack.push(Level {
                        elements,
                        index: index as usize,
                    });
                    elements = sub;
                    pos = next;
                }
                None => break,
            }
        }
    }

    // Work back up the stack, substituting the replacement at each level.
    let mut value = new_value;
    while let Some(mut level) = stack.pop() {
        level.elements[level.index] = value;
        value = Value::from(list::list_to_string(&level.elements));
    }

    interp.set_var_return(name, value)
}

/// Compares two list elements for `lsort`/`lsearch -sorted`: by the given
/// comparison command, as integers, or as strings.  Returns true when `a`
/// sorts before `b`.
fn order(
    interp: &mut Interp,
    integer: bool,
    reverse: bool,
    command: Option<&str>,
    a: &Value,
    b: &Value,
) -> Result<bool, Exception> {
    if let Some(command) = command {
        let script = format!(
            "{} {} {}",
            command,
            util::string_escape(a.as_str()),
            util::string_escape(b.as_str())
        );
        let result = interp.eval(&script)?;
        let mut v = match util::parse_int(result.as_str(), 10, 0) {
            Some((v, _)) => v,
            None => return Err(Exception::error(Value::from("not a number"))),
        };
        if reverse {
            v = -v;
        }
        return Ok(v < 0);
    }

    let before = if integer {
        let ia = util::parse_int(a.as_str(), 10, 0);
        let ib = util::parse_int(b.as_str(), 10, 0);
        match (ia, ib) {
            (Some((ia, _)), Some((ib, _))) => ia < ib,
            _ => return Err(Exception::error(Value::from("not a number"))),
        }
    } else {
        a.as_str() < b.as_str()
    };

    Ok(reverse != before)
}

/// Stable insertion sort over a list of values.
fn insertion_sort(
    interp: &mut Interp,
    elements: &mut TickleList,
    integer: bool,
    reverse: bool,
    command: Option<&str>,
) -> Result<(), Exception> {
    let mut j = 1;
    while j < elements.len() {
        let key = elements[j].clone();
        let mut k = j as i64 - 1;
        while k >= 0 {
            if !order(interp, integer, reverse, command, &key, &elements[k as usize])? {
                break;
            }
            elements[(k + 1) as usize] = elements[k as usize].clone();
            k -= 1;
        }
        elements[(k + 1) as usize] = key;
        j += 1;
    }
    Ok(())
}

/// # lsort ?-ascii|-integer? ?-increasing|-decreasing? ?-command cmd? list
pub fn cmd_lsort(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 0, "?options? list")?;

    let mut integer = false;
    let mut reverse = false;
    let mut command: Option<&str> = None;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-increasing" => reverse = false,
            "-decreasing" => reverse = true,
            "-ascii" => integer = false,
            "-integer" => integer = true,
            "-command" => {
                i += 1;
                if i >= argv.len() {
                    return tickle_err!("missing command argument");
                }
                command = Some(argv[i].as_str());
            }
            _ => break,
        }
        i += 1;
    }
    if i >= argv.len() {
        return tickle_err!("lsort ?options? list");
    }

    let mut elements = list::parse_list(argv[i].as_str());
    insertion_sort(interp, &mut elements, integer, reverse, command)?;
    tickle_ok!(list::list_to_string(&elements))
}

/// # lsearch ?options? list pattern
///
/// Options: `-exact`, `-glob` (the default), `-regexp`, `-integer`,
/// `-all`, `-inline`, `-not`, `-nocase`, `-start n`, `-sorted`.  Returns an
/// index, a list of indices, the matching value, or a list of values.
pub fn cmd_lsearch(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    #[derive(PartialEq, Clone, Copy)]
    enum Mode {
        Glob,
        Exact,
        Integer,
        Regexp,
    }

    let mut mode = Mode::Glob;
    let mut all = false;
    let mut inline = false;
    let mut nocase = false;
    let mut not = false;
    let mut sorted = false;
    let mut start: TickleInt = 0;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-integer" => mode = Mode::Integer,
            "-glob" => mode = Mode::Glob,
            "-exact" => mode = Mode::Exact,
            "-regexp" => mode = Mode::Regexp,
            "-all" => all = true,
            "-not" => not = true,
            "-nocase" => nocase = true,
            "-inline" => inline = true,
            "-sorted" => sorted = true,
            "-start" => {
                i += 1;
                if i >= argv.len() {
                    return tickle_err!("missing argument for start");
                }
                start = match util::parse_int(argv[i].as_str(), 10, 0) {
                    Some((s, _)) => s,
                    None => return tickle_err!("start option not a number"),
                };
            }
            _ => break,
        }
        i += 1;
    }

    if i + 1 >= argv.len() {
        return tickle_err!("lsearch ?options? list pattern");
    }
    let elements = list::parse_list(argv[i].as_str());
    let pattern = argv[i + 1].as_str();

    let int_pattern = if mode == Mode::Integer {
        match util::parse_int(pattern, 10, 0) {
            Some((v, _)) => v,
            None => return tickle_err!("pattern not a number"),
        }
    } else {
        0
    };
    let re = if mode == Mode::Regexp {
        Some(Regex::new(pattern).map_err(|err| Exception::error(Value::from(err.to_string())))?)
    } else {
        None
    };

    let mut results: TickleList = Vec::new();
    for (index, element) in elements.iter().enumerate().skip(start.max(0) as usize) {
        let text = element.as_str();
        let matched = match mode {
            Mode::Glob => {
                let m = util::glob_match(pattern, text, nocase, text.len().max(1) as TickleInt);
                if m < 0 {
                    return tickle_err!("match depth exceeded");
                }
                m != 0
            }
            Mode::Exact => {
                if nocase {
                    pattern.eq_ignore_ascii_case(text)
                } else {
                    pattern == text
                }
            }
            Mode::Regexp => match &re {
                Some(re) => re.is_match(text),
                None => false,
            },
            Mode::Integer => match util::parse_int(text, 10, 0) {
                Some((v, _)) => v == int_pattern,
                None => return tickle_err!("not a number"),
            },
        };

        if not != matched {
            if inline {
                results.push(element.clone());
            } else {
                results.push(Value::from(index as TickleInt));
            }
            if !all {
                break;
            }
        }
    }

    if results.is_empty() {
        return tickle_ok!("-1");
    }

    if sorted && !inline {
        insertion_sort(interp, &mut results, mode == Mode::Integer, false, None)?;
    }

    tickle_ok!(list::list_to_string(&results))
}

/// # split string ?splitChars?
///
/// With no split characters the string is a single element; with an empty
/// set every character becomes an element.
pub fn cmd_split(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(1, argv, 2, 3, "string ?splitChars?")?;

    let text = argv[1].as_str();
    let mut result: TickleList = Vec::new();
    let mut current = String::new();

    match argv.get(2) {
        None => current.push_str(text),
        Some(chars) if chars.is_empty() => {
            for ch in text.chars() {
                result.push(Value::from(ch.to_string()));
            }
        }
        Some(chars) => {
            for ch in text.chars() {
                if chars.as_str().contains(ch) {
                    result.push(Value::from(current.clone()));
                    current.clear();
                } else {
                    current.push(ch);
                }
            }
        }
    }

    if !current.is_empty() {
        result.push(Value::from(current));
    }
    tickle_ok!(list::list_to_string(&result))
}

//------------------------------------------------------------------------------------------------
// The string Ensemble

const STRING_SUBCOMMANDS: [Subcommand; 18] = [
    Subcommand("compare", cmd_string_compare),
    Subcommand("equal", cmd_string_compare),
    Subcommand("first", cmd_string_find),
    Subcommand("index", cmd_string_index),
    Subcommand("is", cmd_string_is),
    Subcommand("last", cmd_string_find),
    Subcommand("length", cmd_string_length),
    Subcommand("map", cmd_string_map),
    Subcommand("match", cmd_string_match),
    Subcommand("range", cmd_string_range),
    Subcommand("repeat", cmd_string_repeat),
    Subcommand("replace", cmd_string_replace),
    Subcommand("tolower", cmd_string_case),
    Subcommand("totitle", cmd_string_case),
    Subcommand("toupper", cmd_string_case),
    Subcommand("trim", cmd_string_trim),
    Subcommand("trimleft", cmd_string_trim),
    Subcommand("trimright", cmd_string_trim),
];

/// # string subcommand ?arg ...?
pub fn cmd_string(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    interp.call_subcommand(argv, 1, &STRING_SUBCOMMANDS)
}

/// # string compare ?-nocase? ?-length int? string1 string2
/// # string equal ?-nocase? ?-length int? string1 string2
fn cmd_string_compare(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    let equal = argv[1].as_str() == "equal";

    let mut nocase = false;
    let mut length: TickleInt = -1;
    let mut i = 2;
    while i < argv.len() {
        match argv[i].as_str() {
            "-nocase" => nocase = true,
            "-length" => {
                i += 1;
                if i >= argv.len() {
                    return tickle_err!("missing argument for -length");
                }
                length = argv[i].as_int()?;
            }
            _ => break,
        }
        i += 1;
    }
    check_args(2, argv, i + 2, i + 2, "?-nocase? ?-length int? string1 string2")?;

    let clip = |s: &str| -> Vec<u8> {
        let bytes = s.as_bytes();
        let end = if length >= 0 {
            bytes.len().min(length as usize)
        } else {
            bytes.len()
        };
        let mut out = bytes[..end].to_vec();
        if nocase {
            out.make_ascii_lowercase();
        }
        out
    };

    let s1 = clip(argv[i].as_str());
    let s2 = clip(argv[i + 1].as_str());

    let ord = match s1.cmp(&s2) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    };
    if equal {
        tickle_ok!(ord == 0)
    } else {
        tickle_ok!(ord as TickleInt)
    }
}

/// # string first needleString haystackString ?startIndex?
/// # string last needleString haystackString ?lastIndex?
fn cmd_string_find(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 4, 5, "needleString haystackString ?startIndex?")?;

    let needle = argv[2].as_str().as_bytes();
    let haystack = argv[3].as_str().as_bytes();
    let last = argv[1].as_str() == "last";

    let max_start = haystack.len() as TickleInt - needle.len() as TickleInt;
    if max_start < 0 {
        return tickle_ok!("-1");
    }

    let mut index = if last { max_start } else { 0 };
    if argv.len() == 5 {
        let (given, _) = match list::parse_index(argv[4].as_str(), haystack.len(), 0) {
            Some(index) => index,
            None => return tickle_err!("index invalid"),
        };
        index = given.clamp(0, max_start);
    }

    let step: TickleInt = if last { -1 } else { 1 };
    while (0..=max_start).contains(&index) {
        let at = index as usize;
        if &haystack[at..at + needle.len()] == needle {
            return tickle_ok!(index);
        }
        index += step;
    }
    tickle_ok!("-1")
}

/// # string index string charIndex
fn cmd_string_index(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 4, 4, "string charIndex")?;

    let text = argv[2].as_str();
    let (index, _) = match list::parse_index(argv[3].as_str(), text.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("index invalid"),
    };
    if index < 0 || index as usize >= text.len() {
        return tickle_ok!();
    }
    tickle_ok!(char::from(text.as_bytes()[index as usize]).to_string())
}

/// # string is class ?-strict? ?-failindex varName? string
///
/// Classes: alnum, alpha, ascii, boolean, control, digit, false, graphic,
/// lower, print, punct, space, true, upper.  The empty string passes
/// unless `-strict`; on failure the index of the first offending character
/// is stored in the `-failindex` variable.
fn cmd_string_is(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 4, 0, "class ?-strict? ?-failindex varName? string")?;

    let class = argv[2].as_str();
    let mut strict = false;
    let mut fail_var: Option<&str> = None;

    let mut i = 3;
    while i < argv.len() {
        match argv[i].as_str() {
            "-strict" => strict = true,
            "-failindex" => {
                i += 1;
                if i >= argv.len() {
                    return tickle_err!("missing argument for -failindex");
                }
                fail_var = Some(argv[i].as_str());
            }
            _ => break,
        }
        i += 1;
    }
    if i >= argv.len() {
        return tickle_err!("string is class ?-strict? ?-failindex varName? string");
    }
    let text = argv[i].as_str();

    if text.is_empty() {
        return tickle_ok!(!strict);
    }

    // The boolean classes look at the whole string, not at characters; a
    // failure records index 0.
    if matches!(class, "boolean" | "true" | "false") {
        let truth = truth_value(text);
        let passed = match class {
            "boolean" => truth.is_some(),
            "true" => truth == Some(true),
            _ => truth == Some(false),
        };
        if !passed {
            if let Some(var) = fail_var {
                interp.set_var(var, Value::from(0));
            }
        }
        return tickle_ok!(passed);
    }

    let pred: fn(char) -> bool = match class {
        "alnum" => |c| c.is_alphanumeric(),
        "alpha" => |c| c.is_alphabetic(),
        "ascii" => |c| (c as u32) < 0x80,
        "control" => |c| c.is_control(),
        "digit" => |c| c.is_numeric(),
        // Graphic excludes whitespace; print admits it.
        "graphic" => |c| !c.is_control() && !c.is_whitespace(),
        "print" => |c| !c.is_control(),
        "lower" => |c| c.is_lowercase(),
        // ASCII symbol characters are not punctuation.
        "punct" => |c| {
            c.is_ascii_punctuation()
                && !matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~')
        },
        "space" => |c| c.is_whitespace(),
        "upper" => |c| c.is_uppercase(),
        _ => return tickle_err!("unknown string class \"{}\"", class),
    };

    for (index, ch) in text.char_indices() {
        if !pred(ch) {
            if let Some(var) = fail_var {
                interp.set_var(var, Value::from(index as TickleInt));
            }
            return tickle_ok!(false);
        }
    }
    tickle_ok!(true)
}

/// # string length string
fn cmd_string_length(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 3, 3, "string")?;
    tickle_ok!(argv[2].as_str().len() as TickleInt)
}

/// # string map ?-nocase? mapping string
///
/// Scans left to right; at each position the first mapping key that
/// prefixes the remaining text is replaced and the scan advances past it.
fn cmd_string_map(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    let mut nocase = false;
    let mut i = 2;
    if argv.len() > 2 && argv[2].as_str() == "-nocase" {
        nocase = true;
        i = 3;
    }
    check_args(2, argv, i + 2, i + 2, "?-nocase? mapping string")?;

    let mapping = list::parse_list(argv[i].as_str());
    let text = argv[i + 1].as_str();
    let match_text = if nocase {
        text.to_ascii_lowercase()
    } else {
        text.to_string()
    };
    let keys: Vec<String> = mapping
        .iter()
        .step_by(2)
        .map(|k| {
            if nocase {
                k.as_str().to_ascii_lowercase()
            } else {
                k.as_str().to_string()
            }
        })
        .collect();

    let bytes = text.as_bytes();
    let match_bytes = match_text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());

    let mut index = 0;
    'scan: while index < bytes.len() {
        for (entry, key) in keys.iter().enumerate() {
            let value = match mapping.get(entry * 2 + 1) {
                Some(value) => value,
                None => break,
            };
            if !key.is_empty() && match_bytes[index..].starts_with(key.as_bytes()) {
                out.extend_from_slice(value.as_str().as_bytes());
                index += key.len();
                continue 'scan;
            }
        }
        out.push(bytes[index]);
        index += 1;
    }

    tickle_ok!(String::from_utf8_lossy(&out).into_owned())
}

/// # string match ?-nocase? pattern string
///
/// Returns the number of characters the glob matcher consumed: non-zero
/// when the pattern matches, `0` when it does not.
fn cmd_string_match(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    let mut nocase = false;
    let mut i = 2;
    if argv.len() > 2 && argv[2].as_str() == "-nocase" {
        nocase = true;
        i = 3;
    }
    check_args(2, argv, i + 2, i + 2, "?-nocase? pattern string")?;

    let pattern = argv[i].as_str();
    let target = argv[i + 1].as_str();
    let m = util::glob_match(pattern, target, nocase, target.len().max(1) as TickleInt);
    if m < 0 {
        return tickle_err!("match depth exceeded");
    }
    tickle_ok!(m)
}

/// # string range string first last
fn cmd_string_range(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 5, 5, "string first last")?;

    let bytes = argv[2].as_str().as_bytes();
    let (first, _) = match list::parse_index(argv[3].as_str(), bytes.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("first index invalid"),
    };
    let (last, _) = match list::parse_index(argv[4].as_str(), bytes.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("last index invalid"),
    };

    let first = first.max(0);
    let last = last.min(bytes.len() as TickleInt - 1);
    if last < 0 || first > last {
        return tickle_ok!();
    }
    tickle_ok!(String::from_utf8_lossy(&bytes[first as usize..=last as usize]).into_owned())
}

/// # string repeat string count
fn cmd_string_repeat(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 4, 4, "string count")?;

    let count = match util::parse_int(argv[3].as_str(), 10, 0) {
        Some((count, _)) => count,
        None => return tickle_err!("invalid count \"{}\"", argv[3].as_str()),
    };
    if count <= 0 {
        return tickle_ok!();
    }
    tickle_ok!(argv[2].as_str().repeat(count as usize))
}

/// # string replace string first last ?newString?
fn cmd_string_replace(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 5, 6, "string first last ?newString?")?;

    let text = argv[2].as_str();
    let bytes = text.as_bytes();
    let (first, _) = match list::parse_index(argv[3].as_str(), bytes.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("first index invalid"),
    };
    let (last, _) = match list::parse_index(argv[4].as_str(), bytes.len(), 0) {
        Some(index) => index,
        None => return tickle_err!("last index invalid"),
    };

    let first = first.max(0);
    let last = last.min(bytes.len() as TickleInt - 1);
    if last < 0 || first > last {
        return tickle_ok!(text);
    }

    let mut out = String::from_utf8_lossy(&bytes[..first as usize]).into_owned();
    if let Some(newstr) = argv.get(5) {
        out.push_str(newstr.as_str());
    }
    out.push_str(&String::from_utf8_lossy(&bytes[last as usize + 1..]));
    tickle_ok!(out)
}

/// # string tolower string ?first? ?last?
/// # string toupper string ?first? ?last?
/// # string totitle string ?first? ?last?
fn cmd_string_case(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 3, 5, "string ?first? ?last?")?;

    let text = argv[2].as_str();
    let len = text.len() as TickleInt;

    let mut first: TickleInt = 0;
    let mut last: TickleInt = len - 1;
    if argv.len() >= 4 {
        let (f, _) = match list::parse_index(argv[3].as_str(), text.len(), 0) {
            Some(index) => index,
            None => return tickle_err!("first invalid"),
        };
        first = f;
        last = f;
    }
    if argv.len() == 5 {
        let (l, _) = match list::parse_index(argv[4].as_str(), text.len(), 0) {
            Some(index) => index,
            None => return tickle_err!("last invalid"),
        };
        last = l;
    }

    // totitle converts only the first character of the selection.
    if argv[1].as_str() == "totitle" {
        last = first;
    }

    let start = first.clamp(0, len) as usize;
    let end = (last + 1).clamp(start as TickleInt, len) as usize;

    let bytes = text.as_bytes();
    let selected = String::from_utf8_lossy(&bytes[start..end]);
    let converted = match argv[1].as_str() {
        "tolower" => selected.to_lowercase(),
        _ => selected.to_uppercase(),
    };

    let mut out = String::from_utf8_lossy(&bytes[..start]).into_owned();
    out.push_str(&converted);
    out.push_str(&String::from_utf8_lossy(&bytes[end..]));
    tickle_ok!(out)
}

/// # string trim string ?chars?
/// # string trimleft string ?chars?
/// # string trimright string ?chars?
fn cmd_string_trim(_interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 3, 4, "string ?chars?")?;

    let kind = argv[1].as_str();
    let text = argv[2].as_str();
    let set = argv.get(3).map(Value::as_str).unwrap_or(" \t\n\r");
    let bytes = text.as_bytes();

    let mut start = 0;
    if kind != "trimright" {
        while start < bytes.len() && set.contains(char::from(bytes[start])) {
            start += 1;
        }
    }

    let mut end = bytes.len();
    if kind != "trimleft" {
        while end > start && set.contains(char::from(bytes[end - 1])) {
            end -= 1;
        }
    }

    tickle_ok!(String::from_utf8_lossy(&bytes[start..end]).into_owned())
}

//------------------------------------------------------------------------------------------------
// The info Ensemble

const INFO_SUBCOMMANDS: [Subcommand; 9] = [
    Subcommand("args", cmd_info_args),
    Subcommand("body", cmd_info_body),
    Subcommand("commands", cmd_info_commands),
    Subcommand("exists", cmd_info_exists),
    Subcommand("globals", cmd_info_globals),
    Subcommand("level", cmd_info_level),
    Subcommand("locals", cmd_info_locals),
    Subcommand("procs", cmd_info_procs),
    Subcommand("vars", cmd_info_vars),
];

/// # info subcommand ?arg ...?
pub fn cmd_info(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    interp.call_subcommand(argv, 1, &INFO_SUBCOMMANDS)
}

/// Space-joins a name list, keeping only names that match the glob pattern
/// when one is given.
fn joined_names(names: TickleList, pattern: Option<&Value>) -> TickleResult {
    let filtered: Vec<&str> = match pattern {
        Some(pattern) => names
            .iter()
            .map(Value::as_str)
            .filter(|name| {
                util::glob_match(pattern.as_str(), name, false, name.len().max(1) as TickleInt) > 0
            })
            .collect(),
        None => names.iter().map(Value::as_str).collect(),
    };
    tickle_ok!(filtered.join(" "))
}

/// # info args procname
fn cmd_info_args(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 3, 3, "procname")?;
    match interp.proc_args_text(argv[2].as_str()) {
        Some(params) => Ok(params),
        None => tickle_err!("{} not a proc", argv[2].as_str()),
    }
}

/// # info body procname
fn cmd_info_body(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 3, 3, "procname")?;
    match interp.proc_body(argv[2].as_str()) {
        Some(body) => Ok(body),
        None => tickle_err!("{} not a proc", argv[2].as_str()),
    }
}

/// # info commands ?pattern?
fn cmd_info_commands(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 2, 3, "?pattern?")?;
    joined_names(interp.command_names(), argv.get(2))
}

/// # info exists varName
fn cmd_info_exists(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 3, 3, "varName")?;
    tickle_ok!(interp.var_exists(argv[2].as_str()))
}

/// # info globals ?pattern?
fn cmd_info_globals(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 2, 3, "?pattern?")?;
    joined_names(interp.vars_in_global_scope(), argv.get(2))
}

/// # info level ?number?
///
/// With no argument, the current scope level.  A non-negative number
/// addresses a scope from the top (0 is the top level) and a negative one
/// relative to the current scope; the result is the recorded argument text
/// of the call that created it.
fn cmd_info_level(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 2, 3, "?number?")?;

    if argv.len() == 2 {
        return tickle_ok!(interp.scope_level() as TickleInt);
    }

    let number = match util::parse_int(argv[2].as_str(), 10, 0) {
        Some((n, _)) => n,
        None => return tickle_err!("invalid level"),
    };
    let (top, number) = if number < 0 {
        (false, number.saturating_neg())
    } else {
        (true, number)
    };

    match interp.frame_index(top, number) {
        Some(frame) => tickle_ok!(interp.frame_args(frame)),
        None => tickle_err!("invalid level"),
    }
}

/// # info locals ?pattern?
fn cmd_info_locals(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 2, 3, "?pattern?")?;
    joined_names(interp.vars_in_local_scope(), argv.get(2))
}

/// # info procs ?pattern?
fn cmd_info_procs(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 2, 3, "?pattern?")?;
    joined_names(interp.proc_names(), argv.get(2))
}

/// # info vars ?pattern?
fn cmd_info_vars(interp: &mut Interp, argv: &[Value]) -> TickleResult {
    check_args(2, argv, 2, 3, "?pattern?")?;
    joined_names(interp.vars_in_scope(), argv.get(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_value() {
        assert_eq!(truth_value(""), Some(false));
        assert_eq!(truth_value("0"), Some(false));
        assert_eq!(truth_value("no"), Some(false));
        assert_eq!(truth_value("false"), Some(false));
        assert_eq!(truth_value("1"), Some(true));
        assert_eq!(truth_value("yes"), Some(true));
        assert_eq!(truth_value("true"), Some(true));
        assert_eq!(truth_value("2"), None);
        assert_eq!(truth_value("maybe"), None);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("1"), Some((false, 1)));
        assert_eq!(parse_level("#0"), Some((true, 0)));
        assert_eq!(parse_level("#12"), Some((true, 12)));
        assert_eq!(parse_level("x"), None);
        assert_eq!(parse_level("#"), None);
    }
}
