//! Primitive system for Unilisp
//!
//! Provides the trait native primitives implement, the registry they are
//! dispatched from, and the per-call invocation context.

mod context;
#[cfg(feature = "stdlib")]
pub mod stdlib;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::Object;

pub use context::{ParamType, PrimitiveContext};

/// A native function callable from interpreted code
pub trait Primitive {
    /// Primitive name as seen by interpreted code
    fn name(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str;

    /// Execute the primitive against its invocation context
    ///
    /// Argument validation and marshalling go through `ctx`; contract
    /// violations surface as errors the dispatcher propagates unchanged.
    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object>;
}

/// Primitive registry
pub struct PrimitiveRegistry {
    primitives: HashMap<String, Arc<dyn Primitive>>,
}

impl PrimitiveRegistry {
    /// Create a registry pre-loaded with the built-in primitives
    pub fn new() -> Self {
        let mut registry = Self::empty();
        #[cfg(feature = "stdlib")]
        stdlib::register_all(&mut registry);
        registry
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        PrimitiveRegistry {
            primitives: HashMap::new(),
        }
    }

    /// Register a primitive under its own name
    pub fn register<P: Primitive + 'static>(&mut self, primitive: P) {
        let name = primitive.name().to_string();
        self.primitives.insert(name, Arc::new(primitive));
    }

    /// Get a primitive by name
    ///
    /// Names are exact; interpreted symbols are case-sensitive.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Primitive>> {
        self.primitives
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UndefinedPrimitive {
                name: name.to_string(),
            })
    }

    /// Check if a primitive exists
    pub fn has(&self, name: &str) -> bool {
        self.primitives.contains_key(name)
    }

    /// List all primitive names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.primitives.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered primitives
    pub fn count(&self) -> usize {
        self.primitives.len()
    }
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
