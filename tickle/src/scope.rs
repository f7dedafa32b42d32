//! Variable scopes.
//!
//! The interpreter keeps a stack of scopes: the global scope at the bottom,
//! plus one scope per active procedure call.  A variable is a shared cell;
//! `upvar` and `global` install the *same* cell under a name in another
//! scope, so assignment through the alias is visible at the origin and
//! unsetting the alias removes only the local name.  Because an alias can
//! only refer to a cell owned by an ancestor scope, and the aliasing scope
//! is always popped first, no cell outlives its owning frame through an
//! alias.

use crate::types::TickleList;
use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

type Cell = Rc<RefCell<Value>>;

struct VarEntry {
    cell: Cell,
    /// True when the name was created in this scope, false for aliases;
    /// `info locals` reports only the former.
    local: bool,
}

/// One scope: a mapping from names to variable cells, plus the call's
/// argument text for introspection.
#[derive(Default)]
pub(crate) struct Scope {
    vars: IndexMap<String, VarEntry>,
    args: String,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Creates a fresh variable in this scope.
    pub fn define(&mut self, name: &str, value: Value, local: bool) {
        self.vars.insert(
            name.to_string(),
            VarEntry {
                cell: Rc::new(RefCell::new(value)),
                local,
            },
        );
    }

    /// Records the argument text of the call that created this scope.
    pub fn set_args(&mut self, args: String) {
        self.args = args;
    }
}

/// The scope stack.  Index 0 is the global scope; the last entry is the
/// current scope.
pub(crate) struct ScopeStack {
    stack: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            stack: vec![Scope::new()],
        }
    }

    /// The current scope level; the global scope is level 0.
    pub fn current(&self) -> usize {
        self.stack.len() - 1
    }

    fn top(&self) -> &Scope {
        self.stack.last().expect("scope stack is never empty")
    }

    fn top_mut(&mut self) -> &mut Scope {
        self.stack.last_mut().expect("scope stack is never empty")
    }

    /// Gets a variable's value in the current scope.  There is no implicit
    /// creation on read.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.top().vars.get(name).map(|v| v.cell.borrow().clone())
    }

    /// Sets a variable in the current scope, creating it if needed.  An
    /// existing entry is written through its cell, so assignment through an
    /// alias is observable in the cell's owning scope.
    pub fn set(&mut self, name: &str, value: Value) {
        let top = self.top_mut();
        if let Some(entry) = top.vars.get(name) {
            *entry.cell.borrow_mut() = value;
        } else {
            top.define(name, value, true);
        }
    }

    /// Removes the name from the current scope.  Removing an alias removes
    /// only the local mapping, never the cell itself.
    pub fn unset(&mut self, name: &str) {
        self.top_mut().vars.shift_remove(name);
    }

    pub fn exists(&self, name: &str) -> bool {
        self.top().vars.contains_key(name)
    }

    /// Pushes a fully constructed scope.
    pub fn push(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "cannot pop the global scope");
        self.stack.pop();
    }

    /// Resolves a level designator to a stack index.  With `top_relative`,
    /// `level` counts down from the global scope (`0` is global); otherwise
    /// it counts up from the current scope (`1` is the caller), clamping at
    /// the global scope.
    pub fn frame_index(&self, top_relative: bool, level: i64) -> Option<usize> {
        if level < 0 {
            return None;
        }
        let depth = self.current() as i64;
        if top_relative {
            if level > depth {
                return None;
            }
            Some(level as usize)
        } else {
            Some((depth - level).max(0) as usize)
        }
    }

    /// Installs, in the current scope, an alias to a cell living in the
    /// scope at `src`.  Returns false (and installs nothing) when the
    /// source variable does not exist.
    pub fn alias(&mut self, src: usize, other: &str, name: &str) -> bool {
        let cell = match self.stack[src].vars.get(other) {
            Some(entry) => Rc::clone(&entry.cell),
            None => return false,
        };
        self.top_mut().vars.insert(
            name.to_string(),
            VarEntry { cell, local: false },
        );
        true
    }

    /// The argument text recorded for the scope at `index`.
    pub fn frame_args(&self, index: usize) -> String {
        self.stack[index].args.clone()
    }

    /// Detaches every scope above `index`, making it current.  The caller
    /// must `restore` the returned scopes afterwards.
    pub fn split_above(&mut self, index: usize) -> Vec<Scope> {
        self.stack.split_off(index + 1)
    }

    pub fn restore(&mut self, scopes: Vec<Scope>) {
        self.stack.extend(scopes);
    }

    /// Names of all variables visible in the current scope.
    pub fn vars_in_scope(&self) -> TickleList {
        self.top().vars.keys().map(|k| Value::from(k.as_str())).collect()
    }

    /// Names of the variables created in the current scope; aliases
    /// installed by `upvar`/`global` are excluded.
    pub fn vars_in_local_scope(&self) -> TickleList {
        self.top()
            .vars
            .iter()
            .filter(|(_, entry)| entry.local)
            .map(|(name, _)| Value::from(name.as_str()))
            .collect()
    }

    /// Names of the variables defined in the global scope.
    pub fn vars_in_global_scope(&self) -> TickleList {
        self.stack[0]
            .vars
            .keys()
            .map(|k| Value::from(k.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_unset() {
        let mut scopes = ScopeStack::new();
        assert_eq!(scopes.get("a"), None);

        scopes.set("a", Value::from("1"));
        assert_eq!(scopes.get("a"), Some(Value::from("1")));
        assert!(scopes.exists("a"));

        scopes.set("a", Value::from("2"));
        assert_eq!(scopes.get("a"), Some(Value::from("2")));

        scopes.unset("a");
        assert_eq!(scopes.get("a"), None);
        assert!(!scopes.exists("a"));
    }

    #[test]
    fn test_scope_isolation() {
        let mut scopes = ScopeStack::new();
        scopes.set("a", Value::from("global"));

        scopes.push(Scope::new());
        assert_eq!(scopes.get("a"), None);
        scopes.set("a", Value::from("local"));
        assert_eq!(scopes.get("a"), Some(Value::from("local")));
        scopes.pop();

        assert_eq!(scopes.get("a"), Some(Value::from("global")));
    }

    #[test]
    fn test_alias_transparency() {
        let mut scopes = ScopeStack::new();
        scopes.set("x", Value::from("1"));

        scopes.push(Scope::new());
        assert!(scopes.alias(0, "x", "y"));

        // Writes through the alias are visible at the origin, and vice
        // versa.
        scopes.set("y", Value::from("2"));
        assert_eq!(scopes.get("y"), Some(Value::from("2")));
        scopes.pop();
        assert_eq!(scopes.get("x"), Some(Value::from("2")));

        scopes.push(Scope::new());
        assert!(scopes.alias(0, "x", "y"));
        scopes.pop();
        scopes.set("x", Value::from("3"));
        assert_eq!(scopes.get("x"), Some(Value::from("3")));
    }

    #[test]
    fn test_alias_unset_is_local() {
        let mut scopes = ScopeStack::new();
        scopes.set("x", Value::from("1"));

        scopes.push(Scope::new());
        assert!(scopes.alias(0, "x", "x"));
        scopes.unset("x");
        assert_eq!(scopes.get("x"), None);
        scopes.pop();

        assert_eq!(scopes.get("x"), Some(Value::from("1")));
    }

    #[test]
    fn test_alias_missing_source() {
        let mut scopes = ScopeStack::new();
        scopes.push(Scope::new());
        assert!(!scopes.alias(0, "nope", "y"));
        assert!(!scopes.exists("y"));
    }

    #[test]
    fn test_locals_exclude_aliases() {
        let mut scopes = ScopeStack::new();
        scopes.set("g", Value::from("1"));

        scopes.push(Scope::new());
        scopes.set("mine", Value::from("2"));
        scopes.alias(0, "g", "g");

        let locals = scopes.vars_in_local_scope();
        assert_eq!(locals, vec![Value::from("mine")]);

        let all: Vec<_> = scopes.vars_in_scope();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_frame_index() {
        let mut scopes = ScopeStack::new();
        scopes.push(Scope::new());
        scopes.push(Scope::new());

        assert_eq!(scopes.frame_index(true, 0), Some(0));
        assert_eq!(scopes.frame_index(true, 2), Some(2));
        assert_eq!(scopes.frame_index(true, 3), None);
        assert_eq!(scopes.frame_index(false, 1), Some(1));
        assert_eq!(scopes.frame_index(false, 5), Some(0));
        assert_eq!(scopes.frame_index(false, -1), None);
    }

    #[test]
    fn test_split_and_restore() {
        let mut scopes = ScopeStack::new();
        scopes.set("g", Value::from("1"));
        scopes.push(Scope::new());
        scopes.set("inner", Value::from("2"));

        let saved = scopes.split_above(0);
        assert_eq!(scopes.current(), 0);
        assert_eq!(scopes.get("g"), Some(Value::from("1")));

        scopes.restore(saved);
        assert_eq!(scopes.current(), 1);
        assert_eq!(scopes.get("inner"), Some(Value::from("2")));
    }
}
