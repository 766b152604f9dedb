//! Named external references ("links") available to primitives
//!
//! A link ties an opaque handle — a peripheral driver, a callback table, a
//! counter — to the primitive that owns it. The register lives and dies
//! with the interpreter instance that owns it; primitives reach it through
//! a proxy scoped to their own name.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque link payload; consumers downcast to the concrete type
pub type LinkHandle = Arc<dyn Any + Send + Sync>;

/// Registry of named external references, keyed by owning primitive
#[derive(Default)]
pub struct LinksRegister {
    links: HashMap<(String, String), LinkHandle>,
}

impl LinksRegister {
    /// Creates an empty register
    pub fn new() -> Self {
        LinksRegister {
            links: HashMap::new(),
        }
    }

    /// Stores a handle under `(scope, name)`, replacing any previous one
    pub fn link(&mut self, scope: &str, name: &str, handle: LinkHandle) {
        self.links
            .insert((scope.to_string(), name.to_string()), handle);
    }

    /// Looks up a handle by scope and name
    pub fn find(&self, scope: &str, name: &str) -> Option<LinkHandle> {
        self.links
            .get(&(scope.to_string(), name.to_string()))
            .cloned()
    }

    /// Removes a handle, returning it if present
    pub fn unlink(&mut self, scope: &str, name: &str) -> Option<LinkHandle> {
        self.links.remove(&(scope.to_string(), name.to_string()))
    }

    /// Link names registered under a scope, sorted
    pub fn names(&self, scope: &str) -> Vec<String> {
        let mut names: Vec<_> = self
            .links
            .keys()
            .filter(|(s, _)| s == scope)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Total number of links across all scopes
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the register holds no links
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// View of a [`LinksRegister`] scoped to a single primitive's name
///
/// Handed to a primitive during invocation so it can only touch its own
/// links without naming itself on every call.
pub struct LinksProxy<'reg> {
    scope: &'reg str,
    register: &'reg mut LinksRegister,
}

impl<'reg> LinksProxy<'reg> {
    /// Creates a proxy bound to `scope`
    pub fn new(scope: &'reg str, register: &'reg mut LinksRegister) -> Self {
        LinksProxy { scope, register }
    }

    /// The primitive name this proxy is bound to
    pub fn scope(&self) -> &str {
        self.scope
    }

    /// Stores a handle under this proxy's scope
    pub fn link(&mut self, name: &str, handle: LinkHandle) {
        self.register.link(self.scope, name, handle);
    }

    /// Looks up a handle under this proxy's scope
    pub fn find(&self, name: &str) -> Option<LinkHandle> {
        self.register.find(self.scope, name)
    }

    /// Removes a handle under this proxy's scope
    pub fn unlink(&mut self, name: &str) -> Option<LinkHandle> {
        self.register.unlink(self.scope, name)
    }
}
