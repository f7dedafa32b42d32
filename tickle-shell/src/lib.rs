//! Script runner and interactive REPL for the `tickle` interpreter.
//!
//! This crate is the thin front end around [`tickle::Interp`]: it reads
//! lines or script files and hands them to `eval`.  All of the language
//! lives in the `tickle` crate; applications embedding the interpreter with
//! their own commands can reuse [`repl`] and [`script`] directly.

use rustyline::{error::ReadlineError, history::MemHistory, Config, Editor};
use std::fs;
use tickle::{Interp, ResultCode, TickleInt, TickleList, Value};

/// Invokes an interactive REPL for the given interpreter, using `rustyline`
/// line editing, and returns the process exit code.
///
/// The prompt is `tcl> `, or `tcl# ` while a command is being continued:
/// a line ending in `\` continues on the next line.  `exit` ends the REPL
/// with the given code; `^C` and end-of-input end it with code 0.
///
/// # Example
///
/// ```no_run
/// use tickle::Interp;
///
/// // FIRST, create and initialize the interpreter.
/// let mut interp = Interp::new();
///
/// // NOTE: commands can be added to the interpreter here.
///
/// // NEXT, invoke the REPL.
/// let code = tickle_shell::repl(&mut interp);
/// std::process::exit(code);
/// ```
pub fn repl(interp: &mut Interp) -> i32 {
    let mut rl = Editor::<(), MemHistory>::with_history(Config::default(), MemHistory::new())
        .expect("failed to init rustyline");

    loop {
        // FIRST, read one command, honoring the continuation convention.
        let mut command = String::new();
        loop {
            let prompt = if command.is_empty() { "tcl> " } else { "tcl# " };
            match rl.readline(prompt) {
                Ok(line) => {
                    if let Some(stripped) = line.strip_suffix('\\') {
                        command.push_str(stripped);
                        command.push('\n');
                    } else {
                        command.push_str(&line);
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    return 0;
                }
                Err(ReadlineError::Eof) => return 0,
                Err(err) => {
                    println!("I/O Error: {:?}", err);
                    return 1;
                }
            }
        }

        let command = command.trim();
        if command.is_empty() {
            continue;
        }
        if let Err(err) = rl.add_history_entry(command) {
            eprintln!("History error: {err}");
        }

        // NEXT, evaluate it and report.
        match interp.eval(command) {
            Ok(value) => {
                // Don't output empty values.
                if !value.is_empty() {
                    println!("{}", value);
                }
            }
            Err(exception) => {
                if exception.code() == ResultCode::Exit {
                    return exception.value().as_int().unwrap_or(0) as i32;
                }
                println!("Error: {}", exception.value());
            }
        }
    }
}

/// Executes a script from a set of command line arguments, returning the
/// process exit code.
///
/// `args[0]` is the name of a script file; any subsequent arguments are
/// arguments to pass to the script.  The calling information is passed to
/// the interpreter as variables:
///
/// * `argv0` is set to the script file name.
/// * `argv` is set to a list of the remaining arguments.
/// * `argc` is set to the number of remaining arguments.
///
/// The exit code is the script's `exit` code, 0 on normal completion, or 1
/// on an uncaught error.
///
/// # Example
///
/// ```no_run
/// use std::env;
/// use tickle::Interp;
///
/// let args: Vec<String> = env::args().collect();
/// let mut interp = Interp::new();
///
/// if args.len() > 1 {
///     std::process::exit(tickle_shell::script(&mut interp, &args[1..]));
/// }
/// ```
pub fn script(interp: &mut Interp, args: &[String]) -> i32 {
    let path = &args[0];
    match fs::read_to_string(path) {
        Ok(text) => execute_script(interp, &text, path, &args[1..]),
        Err(err) => {
            eprintln!("{}: {}", path, err);
            1
        }
    }
}

/// Executes script text with the given name and arguments in the context of
/// the interpreter, setting the `argv0`/`argv`/`argc` variables first.
fn execute_script(interp: &mut Interp, text: &str, argv0: &str, args: &[String]) -> i32 {
    let argv: TickleList = args.iter().map(Value::from).collect();
    interp.set_var("argv0", Value::from(argv0));
    interp.set_var("argc", Value::from(args.len() as TickleInt));
    interp.set_var("argv", Value::from(argv));

    match interp.eval(text) {
        Ok(_) => 0,
        Err(exception) => match exception.code() {
            ResultCode::Exit => exception.value().as_int().unwrap_or(0) as i32,
            _ => {
                eprintln!("Error: {}", exception.value());
                1
            }
        },
    }
}
