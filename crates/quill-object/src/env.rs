use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Value;

/// A lexical scope. Each function call and block gets its own `Environment`
/// chained to the scope it was created in via `outer`; lookups walk
/// outward until they hit the global scope. The chain only ever points
/// outward, so closures holding an `Rc<RefCell<Environment>>` to an inner
/// scope can never form a reference cycle back through `outer`.
#[derive(Debug, Default)]
pub struct Environment {
    store: FxHashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: FxHashMap::default(),
            outer: None,
        }))
    }

    /// A child scope enclosed by `outer`, used when entering a function
    /// call or `if`/`fn` block body.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: FxHashMap::default(),
            outer: Some(outer),
        }))
    }

    /// Resolve `name`, searching outward through enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Bind `name` to `value` in this scope. `let` never mutates an
    /// enclosing scope's binding -- shadowing, not reassignment.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Names bound directly in this scope, for REPL introspection.
    pub fn names(&self) -> Vec<String> {
        self.store.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_roundtrips() {
        let env = Environment::new();
        env.borrow_mut().set("x", Value::Int(5));
        assert_eq!(env.borrow().get("x"), Some(Value::Int(5)));
    }

    #[test]
    fn enclosed_scope_sees_outer_bindings() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Int(1));
        let inner = Environment::new_enclosed(outer);
        assert_eq!(inner.borrow().get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn inner_binding_does_not_leak_outward() {
        let outer = Environment::new();
        let inner = Environment::new_enclosed(outer.clone());
        inner.borrow_mut().set("y", Value::Int(2));
        assert_eq!(outer.borrow().get("y"), None);
    }

    #[test]
    fn inner_shadowing_does_not_mutate_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Int(1));
        let inner = Environment::new_enclosed(outer.clone());
        inner.borrow_mut().set("x", Value::Int(2));
        assert_eq!(inner.borrow().get("x"), Some(Value::Int(2)));
        assert_eq!(outer.borrow().get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn missing_identifier_resolves_to_none() {
        let env = Environment::new();
        assert_eq!(env.borrow().get("missing"), None);
    }
}
