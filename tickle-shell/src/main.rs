//! The `tickle` binary: `tickle [script [args...]]`.
//!
//! With no arguments, runs the interactive REPL; with arguments, runs the
//! named script file with the rest as its `argv`.

use std::env;
use tickle::{Interp, Value};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut interp = Interp::new();
    interp.set_var("argv0", Value::from(args[0].as_str()));
    interp.set_var("argc", Value::from(0));
    interp.set_var("argv", Value::empty());

    let code = if args.len() > 1 {
        tickle_shell::script(&mut interp, &args[1..])
    } else {
        tickle_shell::repl(&mut interp)
    };

    std::process::exit(code);
}
