//! The Tickle Interpreter
//!
//! The [`Interp`] struct is the primary API for embedding Tickle into a Rust
//! application.  Given an `Interp`, the application may:
//!
//! * Evaluate scripts
//! * Check scripts for completeness
//! * Extend the language by defining new Tickle commands in Rust
//! * Set and get Tickle variables
//! * Attach extension data to the interpreter
//!
//! # Interp is not Sync!
//!
//! The `Interp` struct (and the rest of Tickle) is intended for use in a
//! single thread.  It is safe to have `Interp`s in different threads; they
//! share nothing with one another.
//!
//! # Creating an Interpreter
//!
//! There are two ways to create an interpreter.  The usual way is to call
//! [`Interp::new`], which creates an interpreter and populates it with all
//! of the standard Tickle commands.  Alternatively, [`Interp::empty`]
//! creates an interpreter with no commands at all, as a base for
//! special-purpose command languages and configuration-file readers.
//!
//! ```
//! use tickle::Interp;
//! let mut interp = Interp::new();
//!
//! // add commands, evaluate scripts, etc.
//! ```
//!
//! # Evaluating Scripts
//!
//! [`Interp::eval`] evaluates a string as a Tickle script and returns a
//! `TickleResult`: the [`Value`] of the last command in the script on
//! normal completion, or an `Exception` carrying the status code and
//! result of whatever interrupted it.  Status codes that no construct
//! consumed — an `error`, an `exit`, or a `break` outside any loop — arrive
//! here unchanged, so the host decides what each means.
//!
//! ```
//! use tickle::Interp;
//! use tickle::types::*;
//! # fn main() -> Result<(), Exception> {
//! let mut interp = Interp::new();
//! let val = interp.eval("expr 2 + 2")?;
//! assert_eq!(val.as_str(), "4");
//! # Ok(())
//! # }
//! ```
//!
//! # Defining New Commands
//!
//! The host extends the language by registering a `CommandFunc` with
//! [`Interp::add_command`]: a Rust function that receives the interpreter
//! and the command's argument vector and returns a `TickleResult`.
//!
//! ```
//! use tickle::Interp;
//! use tickle::check_args;
//! use tickle::tickle_ok;
//! use tickle::types::*;
//! use tickle::Value;
//!
//! # fn main() -> Result<(), Exception> {
//! let mut interp = Interp::new();
//! interp.add_command("square", cmd_square);
//!
//! let val = interp.eval("square 5")?;
//! assert_eq!(val.as_str(), "25");
//! # Ok(())
//! # }
//!
//! // The command: square intValue
//! fn cmd_square(_: &mut Interp, argv: &[Value]) -> TickleResult {
//!     check_args(1, argv, 2, 2, "intValue")?;
//!     let value = argv[1].as_int()?;
//!     tickle_ok!(value * value)
//! }
//! ```
//!
//! Commands needing mutable host data can stash it in the interpreter's
//! context slots with [`Interp::set_context_data`] and retrieve it by key;
//! the data is owned by the interpreter and dropped with it.

use crate::commands;
use crate::expr;
use crate::list;
use crate::parser::{Parser, ParserOptions, TokenKind};
use crate::scope::{Scope, ScopeStack};
use crate::tickle_err;
use crate::types::*;
use crate::util;
use crate::value::Value;
use indexmap::IndexMap;
use std::any::Any;
use std::rc::Rc;

/// The Tickle interpreter: the command table, the scope stack, and the
/// evaluation machinery.  See the [module level documentation](index.html)
/// for an overview.
pub struct Interp {
    // Command Table
    commands: IndexMap<String, Rc<Command>>,

    // Variable scopes
    scopes: ScopeStack,

    // Defines the recursion limit for Interp::eval().
    recursion_limit: usize,

    // Current number of eval levels.
    num_levels: usize,

    // Extension data, keyed by string.
    context: IndexMap<String, Box<dyn Any>>,
}

/// A command defined in the interpreter.
enum Command {
    /// A binary command implemented as a Rust CommandFunc.
    Native(CommandFunc),

    /// A user-defined procedure.
    Proc(Procedure),
}

impl Command {
    /// Execute the command according to its kind.
    fn execute(&self, interp: &mut Interp, argv: &[Value]) -> TickleResult {
        match self {
            Command::Native(func) => func(interp, argv),
            Command::Proc(proc) => proc.execute(interp, argv),
        }
    }

    /// Returns true if the command is a proc, and false otherwise.
    fn is_proc(&self) -> bool {
        matches!(self, Command::Proc(_))
    }
}

impl Default for Interp {
    fn default() -> Self {
        Interp::new()
    }
}

impl Interp {
    //--------------------------------------------------------------------------------------------
    // Constructors

    /// Creates an interpreter with no commands defined.  Use this when
    /// crafting command languages that shouldn't include the normal Tickle
    /// commands, or as a base to which specific command sets can be added.
    ///
    /// ```
    /// # use tickle::Interp;
    /// let interp = Interp::empty();
    /// assert!(interp.command_names().is_empty());
    /// ```
    pub fn empty() -> Self {
        Self {
            commands: IndexMap::new(),
            scopes: ScopeStack::new(),
            recursion_limit: 1000,
            num_levels: 0,
            context: IndexMap::new(),
        }
    }

    /// Creates an interpreter pre-populated with the standard Tickle
    /// commands.  Use [`command_names`](#method.command_names) (or the
    /// `info commands` command) to retrieve the full list, and
    /// [`add_command`](#method.add_command) to extend it.
    pub fn new() -> Self {
        let mut interp = Interp::empty();

        let standard: &[(&str, CommandFunc)] = &[
            ("append", commands::cmd_append),
            ("break", commands::cmd_break),
            ("catch", commands::cmd_catch),
            ("concat", commands::cmd_concat),
            ("continue", commands::cmd_continue),
            ("decr", commands::cmd_decr),
            ("eq", commands::cmd_eq),
            ("error", commands::cmd_error),
            ("eval", commands::cmd_eval),
            ("exit", commands::cmd_exit),
            ("expr", expr::cmd_expr),
            ("for", commands::cmd_for),
            ("foreach", commands::cmd_foreach),
            ("global", commands::cmd_global),
            ("if", commands::cmd_if),
            ("incr", commands::cmd_incr),
            ("info", commands::cmd_info),
            ("join", commands::cmd_join),
            ("lappend", commands::cmd_lappend),
            ("lindex", commands::cmd_lindex),
            ("linsert", commands::cmd_linsert),
            ("list", commands::cmd_list),
            ("llength", commands::cmd_llength),
            ("lrange", commands::cmd_lrange),
            ("lreplace", commands::cmd_lreplace),
            ("lsearch", commands::cmd_lsearch),
            ("lset", commands::cmd_lset),
            ("lsort", commands::cmd_lsort),
            ("ne", commands::cmd_ne),
            ("proc", commands::cmd_proc),
            ("puts", commands::cmd_puts),
            ("rename", commands::cmd_rename),
            ("return", commands::cmd_return),
            ("set", commands::cmd_set),
            ("split", commands::cmd_split),
            ("string", commands::cmd_string),
            ("subst", commands::cmd_subst),
            ("switch", commands::cmd_switch),
            ("unset", commands::cmd_unset),
            ("uplevel", commands::cmd_uplevel),
            ("upvar", commands::cmd_upvar),
            ("variable", commands::cmd_variable),
            ("while", commands::cmd_while),
        ];

        for &(name, func) in standard {
            interp.add_command(name, func);
        }

        interp
    }

    //--------------------------------------------------------------------------------------------
    // Script Evaluation

    /// Evaluates a script one command at a time, returning the value of the
    /// last command, or the exception that interrupted evaluation.  Control
    /// codes that reach the top (`break` outside a loop, an uncaught
    /// `return` or `exit`) are returned unchanged; the host maps them to
    /// whatever is appropriate.
    ///
    /// ```
    /// # use tickle::Interp;
    /// let mut interp = Interp::new();
    ///
    /// match interp.eval("set a 1") {
    ///     Ok(val) => println!("Value: {}", val),
    ///     Err(exception) => println!("Error: {}", exception.value()),
    /// }
    /// ```
    pub fn eval(&mut self, script: &str) -> TickleResult {
        self.eval_script(script, ParserOptions::default())
    }

    /// Evaluates a script under specific parser options, guarding the
    /// recursion depth.  This is the entry point used by `subst`, `expr`,
    /// and command substitution.
    pub(crate) fn eval_script(&mut self, script: &str, options: ParserOptions) -> TickleResult {
        // FIRST, check the number of nesting levels.
        self.num_levels += 1;
        if self.num_levels > self.recursion_limit {
            self.num_levels -= 1;
            return tickle_err!("too many nested calls to Interp::eval (infinite loop?)");
        }

        // NEXT, evaluate the script and decrement again on the way out.
        let result = self.eval_tokens(script, options);
        self.num_levels -= 1;
        result
    }

    /// The substitution loop: fetches tokens, substitutes variables and
    /// command results, accumulates words, and dispatches each completed
    /// command.  With `no_eval` set, completed commands are joined into the
    /// result instead of dispatched.
    fn eval_tokens(&mut self, script: &str, options: ParserOptions) -> TickleResult {
        if script.is_empty() {
            return Ok(Value::empty());
        }

        let mut parser = Parser::new(script, options);
        let mut words: TickleList = Vec::new();
        let mut prev = TokenKind::Eol;
        let mut result = Value::empty();

        loop {
            let token = match parser.next_token() {
                Ok(token) => token,
                Err(_) => return tickle_err!("error parsing: {}", script),
            };

            if token.kind == TokenKind::Eof {
                break;
            }

            let value = match token.kind {
                // A variable reference: replace it with its value.  Reading
                // an unbound name is an error, never an implicit creation.
                TokenKind::Variable => match self.scopes.get(token.text) {
                    Some(value) => value,
                    None => return tickle_err!("value: {} not found", token.text),
                },

                // A command substitution: evaluate the bracketed text.
                // Under no_eval, break ends the substitution with the words
                // collected so far, and continue/return contribute their
                // result as this fragment's value.
                TokenKind::Command => {
                    match self.eval_script(token.text, ParserOptions::default()) {
                        Ok(value) => value,
                        Err(exception) if options.no_eval => match exception.code() {
                            ResultCode::Break => return Ok(Value::from(join_words(&words))),
                            ResultCode::Continue | ResultCode::Return => exception.value(),
                            _ => return Err(exception),
                        },
                        Err(exception) => return Err(exception),
                    }
                }

                TokenKind::Escape => {
                    if options.no_escapes {
                        Value::from(token.text)
                    } else {
                        Value::from(util::unescape(token.text).unwrap_or_default())
                    }
                }

                TokenKind::Separator => {
                    prev = token.kind;
                    continue;
                }

                TokenKind::Eol => {
                    prev = token.kind;
                    if options.no_eval {
                        result = Value::from(join_words(&words));
                    } else if let Some(value) = self.dispatch(&words)? {
                        result = value;
                    }
                    words.clear();
                    continue;
                }

                // A verbatim string.
                _ => Value::from(token.text),
            };

            // A word boundary starts a new word; otherwise the fragment is
            // glued onto the previous one (this is how foo$bar[baz] becomes
            // a single word).
            let boundary = prev == TokenKind::Separator || prev == TokenKind::Eol;
            match words.last_mut() {
                Some(last) if !boundary => {
                    let mut text = String::from(last.as_str());
                    text.push_str(value.as_str());
                    *last = Value::from(text);
                }
                _ => words.push(value),
            }
            prev = token.kind;
        }

        Ok(result)
    }

    /// Looks up and executes one command.  An empty word vector does
    /// nothing; an unknown command name is an error.
    fn dispatch(&mut self, words: &[Value]) -> Result<Option<Value>, Exception> {
        if words.is_empty() {
            return Ok(None);
        }

        let name = words[0].as_str();
        let cmd = match self.commands.get(name) {
            Some(cmd) => Rc::clone(cmd),
            None => {
                return Err(Exception::error(Value::from(format!(
                    "unable to find command: {}",
                    name
                ))))
            }
        };

        cmd.execute(self, words).map(Some)
    }

    /// Determines whether the script is syntactically complete: no
    /// unterminated quoted or braced string, no unmatched bracket.  REPLs
    /// use this to decide whether to ask for another line of input.
    ///
    /// ```
    /// # use tickle::Interp;
    /// let interp = Interp::new();
    /// assert!(interp.complete("set a [expr {1+1}]"));
    /// assert!(!interp.complete("set a [expr {1+1"));
    /// ```
    pub fn complete(&self, script: &str) -> bool {
        let mut parser = Parser::new(script, ParserOptions::default());
        loop {
            match parser.next_token() {
                Err(_) => return false,
                Ok(token) if token.kind == TokenKind::Eof => return true,
                Ok(_) => (),
            }
        }
    }

    //--------------------------------------------------------------------------------------------
    // Variable Handling

    /// Retrieves the value of the named variable in the current scope, or
    /// an error if it is not bound there.
    ///
    /// ```
    /// # use tickle::Interp;
    /// # use tickle::Value;
    /// let mut interp = Interp::new();
    /// interp.set_var("a", Value::from("1"));
    /// assert_eq!(interp.var("a").unwrap().as_str(), "1");
    /// assert!(interp.var("nope").is_err());
    /// ```
    pub fn var(&self, name: &str) -> TickleResult {
        match self.scopes.get(name) {
            Some(value) => Ok(value),
            None => tickle_err!("value: {} not found", name),
        }
    }

    /// Sets the named variable in the current scope, creating it if needed.
    /// Assignment through an `upvar`/`global` alias writes the origin's
    /// cell.
    pub fn set_var(&mut self, name: &str, value: Value) {
        self.scopes.set(name, value);
    }

    /// Sets the named variable and returns the assigned value, which is
    /// convenient for commands that return what they assign.
    pub fn set_var_return(&mut self, name: &str, value: Value) -> TickleResult {
        self.scopes.set(name, value.clone());
        Ok(value)
    }

    /// Removes the name from the current scope.  Unsetting an alias removes
    /// only the local mapping.  It is not an error to unset a variable that
    /// doesn't exist.
    pub fn unset_var(&mut self, name: &str) {
        self.scopes.unset(name);
    }

    /// Returns true if the named variable is bound in the current scope.
    pub fn var_exists(&self, name: &str) -> bool {
        self.scopes.exists(name)
    }

    /// The names of the variables visible in the current scope.
    pub fn vars_in_scope(&self) -> TickleList {
        self.scopes.vars_in_scope()
    }

    /// The names of the variables created in the current scope, excluding
    /// aliases installed by `upvar`/`global`.
    pub fn vars_in_local_scope(&self) -> TickleList {
        self.scopes.vars_in_local_scope()
    }

    /// The names of the variables defined in the global scope.
    pub fn vars_in_global_scope(&self) -> TickleList {
        self.scopes.vars_in_global_scope()
    }

    /// The current scope level: 0 at the top level, +1 per active procedure
    /// call.
    pub fn scope_level(&self) -> usize {
        self.scopes.current()
    }

    /// Resolves a level designator to a scope index: top-relative levels
    /// count down from the global scope, plain levels count up from the
    /// current one.
    pub(crate) fn frame_index(&self, top_relative: bool, level: TickleInt) -> Option<usize> {
        self.scopes.frame_index(top_relative, level)
    }

    /// Installs `name` in the current scope as an alias for `other` in the
    /// scope at `frame`.  Returns false when `other` is not bound there.
    pub(crate) fn alias_var(&mut self, frame: usize, other: &str, name: &str) -> bool {
        self.scopes.alias(frame, other, name)
    }

    /// The recorded argument text of the call that created the scope at
    /// `frame`; empty for the global scope.
    pub(crate) fn frame_args(&self, frame: usize) -> String {
        self.scopes.frame_args(frame)
    }

    /// Evaluates a script with the scope at `frame` as the current scope,
    /// restoring the scope stack afterwards whatever the outcome.
    pub(crate) fn eval_in_frame(&mut self, frame: usize, script: &str) -> TickleResult {
        let saved = self.scopes.split_above(frame);
        let result = self.eval(script);
        self.scopes.restore(saved);
        result
    }

    //--------------------------------------------------------------------------------------------
    // Command Definition and Introspection

    /// Adds a native command to the interpreter.  This is the normal way to
    /// extend the interpreter with application-specific commands.
    pub fn add_command(&mut self, name: &str, func: CommandFunc) {
        self.commands
            .insert(name.into(), Rc::new(Command::Native(func)));
    }

    /// Adds a user-defined procedure.  The parameter list and body are kept
    /// as the exact text supplied, so `info args` and `info body` can
    /// round-trip them.
    pub(crate) fn add_proc(&mut self, name: &str, params: Value, body: Value) {
        self.commands
            .insert(name.into(), Rc::new(Command::Proc(Procedure { params, body })));
    }

    /// Determines whether the interpreter has a command with the given
    /// name.
    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Renames a command.  Procedures that call the command under its old
    /// name are intentionally not updated: renaming a command and wrapping
    /// it under the old name is a standard technique.
    ///
    /// ```
    /// # use tickle::Interp;
    /// let mut interp = Interp::new();
    /// interp.rename_command("expr", "=");
    /// assert_eq!(interp.eval("= {1 + 1}").unwrap().as_str(), "2");
    /// ```
    pub fn rename_command(&mut self, old_name: &str, new_name: &str) {
        if let Some(cmd) = self.commands.shift_remove(old_name) {
            self.commands.insert(new_name.into(), cmd);
        }
    }

    /// Removes the command with the given name.
    pub fn remove_command(&mut self, name: &str) {
        self.commands.shift_remove(name);
    }

    /// The names of all defined commands.
    pub fn command_names(&self) -> TickleList {
        self.commands
            .keys()
            .map(|k| Value::from(k.as_str()))
            .collect()
    }

    /// The names of the user-defined procedures.
    pub fn proc_names(&self) -> TickleList {
        self.commands
            .iter()
            .filter(|(_, cmd)| cmd.is_proc())
            .map(|(name, _)| Value::from(name.as_str()))
            .collect()
    }

    /// The parameter list of the named procedure, verbatim as given to
    /// `proc`, or `None` if the name is not a procedure.
    pub fn proc_args_text(&self, name: &str) -> Option<Value> {
        match self.commands.get(name).map(Rc::as_ref) {
            Some(Command::Proc(proc)) => Some(proc.params.clone()),
            _ => None,
        }
    }

    /// The body of the named procedure, verbatim as given to `proc`, or
    /// `None` if the name is not a procedure.
    pub fn proc_body(&self, name: &str) -> Option<Value> {
        match self.commands.get(name).map(Rc::as_ref) {
            Some(Command::Proc(proc)) => Some(proc.body.clone()),
            _ => None,
        }
    }

    /// Calls a subcommand of an ensemble command, looking its name up in an
    /// array of `Subcommand` records.  `subc` is the index of the
    /// subcommand name in `argv` — 1 for ordinary ensembles.
    pub fn call_subcommand(
        &mut self,
        argv: &[Value],
        subc: usize,
        subcommands: &[Subcommand],
    ) -> TickleResult {
        check_args(subc, argv, subc + 1, 0, "subcommand ?arg ...?")?;
        let rec = Subcommand::find(subcommands, argv[subc].as_str())?;
        (rec.1)(self, argv)
    }

    //--------------------------------------------------------------------------------------------
    // Extension Data

    /// Attaches extension data to the interpreter under a string key,
    /// replacing any previous entry.  The interpreter owns the data and
    /// drops it when it is itself dropped.
    pub fn set_context_data(&mut self, key: &str, data: Box<dyn Any>) {
        self.context.insert(key.to_string(), data);
    }

    /// Borrows the extension data stored under `key`, if it exists and has
    /// the requested type.
    pub fn context_data<T: Any>(&self, key: &str) -> Option<&T> {
        self.context.get(key)?.downcast_ref()
    }

    /// Mutably borrows the extension data stored under `key`, if it exists
    /// and has the requested type.
    pub fn context_data_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.context.get_mut(key)?.downcast_mut()
    }

    //--------------------------------------------------------------------------------------------
    // Interpreter Configuration

    /// Gets the interpreter's recursion limit: how deep the stack of script
    /// evaluations may be.  The default is 1000.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Sets the interpreter's recursion limit.
    ///
    /// ```
    /// # use tickle::Interp;
    /// let mut interp = Interp::new();
    /// interp.set_recursion_limit(100);
    /// assert_eq!(interp.recursion_limit(), 100);
    /// ```
    pub fn set_recursion_limit(&mut self, limit: usize) {
        self.recursion_limit = limit;
    }
}

/// Joins words with single spaces: the result form used by `no_eval`
/// evaluation, procedure argument traces, and the `args` catch-all.
fn join_words(words: &[Value]) -> String {
    words
        .iter()
        .map(Value::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a procedure is defined: a parameter list and a body, both kept as
/// the exact text supplied to `proc`.  The procedure doesn't know its own
/// name; the name lives in the command table and can be changed freely via
/// `rename`.
struct Procedure {
    params: Value,
    body: Value,
}

impl Procedure {
    fn execute(&self, interp: &mut Interp, argv: &[Value]) -> TickleResult {
        // FIRST, build the call's scope, binding formals to actuals.  The
        // scope is fully constructed before it is pushed.
        let names = list::parse_list(self.params.as_str());
        let mut frame = Scope::new();
        let mut argi = 1; // skip the procedure's name

        for (i, name) in names.iter().enumerate() {
            let name = name.as_str();
            if name.is_empty() {
                break;
            }

            // A final formal named "args" collects the remaining actuals,
            // joined by single spaces (possibly empty).
            if name == "args" && i == names.len() - 1 {
                frame.define("args", Value::from(join_words(&argv[argi..])), true);
                argi = argv.len();
                break;
            }

            if argi >= argv.len() {
                return self.wrong_num_args(&argv[0], &names);
            }

            frame.define(name, argv[argi].clone(), true);
            argi += 1;
        }

        if argi != argv.len() {
            return self.wrong_num_args(&argv[0], &names);
        }

        frame.set_args(join_words(argv));

        // NEXT, evaluate the body in the new scope, popping on every exit
        // path.
        interp.scopes.push(frame);
        let result = interp.eval(self.body.as_str());
        interp.scopes.pop();

        // NEXT, a return from the body is this call's normal result; every
        // other status propagates unchanged.
        match result {
            Err(exception) if exception.code() == ResultCode::Return => Ok(exception.value()),
            other => other,
        }
    }

    // The wrong # args message for the procedure.  The name is passed in
    // because it can be changed via `rename`.
    fn wrong_num_args(&self, name: &Value, names: &[Value]) -> TickleResult {
        let mut msg = String::from("wrong # args: should be \"");
        msg.push_str(name.as_str());

        for (i, parm) in names.iter().enumerate() {
            msg.push(' ');
            if parm.as_str() == "args" && i == names.len() - 1 {
                msg.push_str("?arg ...?");
                break;
            }
            msg.push_str(parm.as_str());
        }
        msg.push('"');

        tickle_err!(&msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let interp = Interp::empty();
        assert!(interp.command_names().is_empty());
    }

    #[test]
    fn test_new() {
        let interp = Interp::new();
        assert!(!interp.command_names().is_empty());
        assert!(interp.has_command("set"));
        assert!(interp.has_command("expr"));
    }

    #[test]
    fn test_eval() {
        let mut interp = Interp::new();

        assert_eq!(interp.eval("set a 1"), Ok(Value::from("1")));
        assert_eq!(
            interp.eval("error 2"),
            Err(Exception::error(Value::from("2")))
        );
        assert_eq!(
            interp.eval("return 3"),
            Err(Exception::new(ResultCode::Return, Value::from("3")))
        );
        assert_eq!(
            interp.eval("break"),
            Err(Exception::new(ResultCode::Break, Value::empty()))
        );
        assert_eq!(
            interp.eval("continue"),
            Err(Exception::new(ResultCode::Continue, Value::empty()))
        );
        assert_eq!(
            interp.eval("nosuchcommand"),
            Err(Exception::error(Value::from(
                "unable to find command: nosuchcommand"
            )))
        );
    }

    #[test]
    fn test_eval_returns_last_result() {
        let mut interp = Interp::new();
        assert_eq!(interp.eval("set a 1; set b 2"), Ok(Value::from("2")));
        // An empty trailing command leaves the result alone.
        assert_eq!(interp.eval("set a 3 ;"), Ok(Value::from("3")));
        assert_eq!(interp.eval(""), Ok(Value::empty()));
    }

    #[test]
    fn test_word_gluing() {
        let mut interp = Interp::new();
        interp.eval("set a foo").unwrap();
        assert_eq!(
            interp.eval("set b x$a[set a]y"),
            Ok(Value::from("xfoofooy"))
        );
    }

    #[test]
    fn test_parse_error() {
        let mut interp = Interp::new();
        assert_eq!(
            interp.eval("set a {oops"),
            Err(Exception::error(Value::from("error parsing: set a {oops")))
        );
    }

    #[test]
    fn test_missing_variable() {
        let mut interp = Interp::new();
        assert_eq!(
            interp.eval("set b $nope"),
            Err(Exception::error(Value::from("value: nope not found")))
        );
    }

    #[test]
    fn test_complete() {
        let interp = Interp::new();

        assert!(interp.complete("abc"));
        assert!(interp.complete("a {bc} [def] \"ghi\" xyz"));

        assert!(!interp.complete("a {bc"));
        assert!(!interp.complete("a [bc"));
        assert!(!interp.complete("a \"bc"));
    }

    #[test]
    fn test_proc_call() {
        let mut interp = Interp::new();
        interp.eval("proc double {x} { expr $x * 2 }").unwrap();
        assert_eq!(interp.eval("double 21"), Ok(Value::from("42")));

        assert_eq!(
            interp.eval("double"),
            Err(Exception::error(Value::from(
                "wrong # args: should be \"double x\""
            )))
        );
        assert_eq!(
            interp.eval("double 1 2"),
            Err(Exception::error(Value::from(
                "wrong # args: should be \"double x\""
            )))
        );
    }

    #[test]
    fn test_proc_args_collects_rest() {
        let mut interp = Interp::new();
        interp.eval("proc tail {first args} { set args }").unwrap();
        assert_eq!(interp.eval("tail a b c d"), Ok(Value::from("b c d")));
        assert_eq!(interp.eval("tail a"), Ok(Value::from("")));
    }

    #[test]
    fn test_proc_return_translates_to_ok() {
        let mut interp = Interp::new();
        interp
            .eval("proc f {} { return early; set x never }")
            .unwrap();
        assert_eq!(interp.eval("f"), Ok(Value::from("early")));
    }

    #[test]
    fn test_proc_scope_isolation() {
        let mut interp = Interp::new();
        interp.eval("set x outer").unwrap();
        interp.eval("proc f {} { set x inner }").unwrap();
        interp.eval("f").unwrap();
        assert_eq!(interp.eval("set x"), Ok(Value::from("outer")));

        // Locals are gone after the call returns.
        interp.eval("proc g {} { set y 1 }").unwrap();
        interp.eval("g").unwrap();
        assert!(interp.eval("set y").is_err());
    }

    #[test]
    fn test_rename_command() {
        let mut interp = Interp::new();
        interp.rename_command("expr", "=");
        assert!(!interp.has_command("expr"));
        assert_eq!(interp.eval("= 1 + 1"), Ok(Value::from("2")));
    }

    #[test]
    fn test_recursion_limit() {
        let mut interp = Interp::new();

        assert_eq!(interp.recursion_limit(), 1000);
        interp.set_recursion_limit(100);
        assert_eq!(interp.recursion_limit(), 100);

        assert!(interp.eval("proc myproc {} { myproc }").is_ok());
        assert_eq!(
            interp.eval("myproc"),
            Err(Exception::error(Value::from(
                "too many nested calls to Interp::eval (infinite loop?)"
            )))
        );
    }

    #[test]
    fn test_context_data() {
        struct Counter {
            hits: usize,
        }

        let mut interp = Interp::new();
        interp.set_context_data("counter", Box::new(Counter { hits: 0 }));

        interp.context_data_mut::<Counter>("counter").unwrap().hits += 1;
        assert_eq!(interp.context_data::<Counter>("counter").unwrap().hits, 1);
        assert!(interp.context_data::<String>("counter").is_none());
        assert!(interp.context_data::<Counter>("nope").is_none());
    }

    #[test]
    fn test_native_command_registration() {
        fn cmd_hello(_: &mut Interp, _: &[Value]) -> TickleResult {
            Ok(Value::from("hi"))
        }

        let mut interp = Interp::new();
        interp.add_command("hello", cmd_hello);
        assert_eq!(interp.eval("hello"), Ok(Value::from("hi")));

        interp.remove_command("hello");
        assert!(interp.eval("hello").is_err());
    }
}
