use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::runtime::Object;

/// Environment for variable scoping
///
/// Binds symbol names to object handles across a stack of lexical scopes.
/// Primitive argument evaluation resolves symbols against this structure.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Stack of nested scopes
    scopes: Vec<Scope>,
}

/// Single scope in the environment
#[derive(Debug, Clone)]
struct Scope {
    /// Bindings defined in this scope
    bindings: HashMap<String, Object>,
    /// Index of parent scope (None for global scope)
    parent: Option<usize>,
}

impl Environment {
    /// Creates a new environment with a global scope
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope {
                bindings: HashMap::new(),
                parent: None,
            }],
        }
    }

    /// Enters a new nested scope
    pub fn enter_scope(&mut self) {
        let parent_idx = self.scopes.len() - 1;
        self.scopes.push(Scope {
            bindings: HashMap::new(),
            parent: Some(parent_idx),
        });
    }

    /// Exits the current scope and returns to parent scope
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Defines a binding in the current scope
    pub fn define(&mut self, name: impl Into<String>, value: Object) {
        if let Some(current) = self.scopes.last_mut() {
            current.bindings.insert(name.into(), value);
        }
    }

    /// Resolves a binding, walking the scope chain from innermost out
    pub fn get(&self, name: &str) -> Result<Object> {
        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &self.scopes[scope_idx];
            if let Some(value) = scope.bindings.get(name) {
                return Ok(value.clone());
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => {
                    return Err(Error::UnboundSymbol {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Updates an existing binding, or defines it in the current scope
    pub fn set(&mut self, name: &str, value: Object) {
        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &mut self.scopes[scope_idx];
            if scope.bindings.contains_key(name) {
                scope.bindings.insert(name.to_string(), value);
                return;
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => {
                    self.define(name.to_string(), value);
                    return;
                }
            }
        }
    }

    /// Checks whether a binding is visible from the current scope
    pub fn exists(&self, name: &str) -> bool {
        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &self.scopes[scope_idx];
            if scope.bindings.contains_key(name) {
                return true;
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => return false,
            }
        }
    }

    /// Returns the current scope depth (1 for global scope)
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Root;

    #[test]
    fn basic_define_and_get() {
        let root = Root::new();
        let mut env = Environment::new();
        env.define("x", root.alloc_int(42));

        let val = env.get("x").unwrap();
        assert_eq!(val.as_int(), Some(42));
    }

    #[test]
    fn unbound_symbol() {
        let env = Environment::new();
        let result = env.get("undefined");
        assert!(matches!(result, Err(Error::UnboundSymbol { .. })));
    }

    #[test]
    fn variable_shadowing() {
        let root = Root::new();
        let mut env = Environment::new();

        env.define("x", root.alloc_int(10));

        env.enter_scope();
        env.define("x", root.alloc_symbol("shadowed"));
        assert_eq!(env.get("x").unwrap().as_symbol(), Some("shadowed"));

        env.exit_scope();
        assert_eq!(env.get("x").unwrap().as_int(), Some(10));
    }

    #[test]
    fn nested_scopes() {
        let root = Root::new();
        let mut env = Environment::new();

        env.define("x", root.alloc_int(1));
        env.enter_scope();
        env.define("y", root.alloc_int(2));

        assert!(env.exists("x"));
        assert!(env.exists("y"));
        assert_eq!(env.scope_depth(), 2);

        env.exit_scope();
        assert!(!env.exists("y"));
        assert_eq!(env.scope_depth(), 1);
    }

    #[test]
    fn set_updates_outer_binding() {
        let root = Root::new();
        let mut env = Environment::new();

        env.define("x", root.alloc_int(10));
        env.enter_scope();
        env.set("x", root.alloc_int(20));
        env.exit_scope();

        assert_eq!(env.get("x").unwrap().as_int(), Some(20));
    }
}
