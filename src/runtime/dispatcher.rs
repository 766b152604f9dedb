//! Invokes native primitives by name
//!
//! The dispatcher owns everything a primitive call needs — the allocation
//! root, the environment, the primitive registry, the link register, and
//! the evaluation seam — and wires a fresh invocation context per call.
//! Registry and links live exactly as long as the dispatcher, so link
//! state is scoped to one interpreter instance.

use tracing::{debug, warn};

use crate::error::Result;
use crate::links::LinksRegister;
use crate::primitives::{Primitive, PrimitiveContext, PrimitiveRegistry};
use crate::runtime::{AtomEvaluator, Environment, Eval, Object, Root};

/// Drives native primitive calls for one interpreter instance
pub struct Dispatcher {
    root: Root,
    env: Environment,
    registry: PrimitiveRegistry,
    links: LinksRegister,
    evaluator: Box<dyn Eval>,
}

impl Dispatcher {
    /// Dispatcher with the built-in primitives and the atom evaluator
    pub fn new() -> Self {
        Self::with_evaluator(Box::new(AtomEvaluator))
    }

    /// Dispatcher with a custom evaluation seam
    pub fn with_evaluator(evaluator: Box<dyn Eval>) -> Self {
        Dispatcher {
            root: Root::new(),
            env: Environment::new(),
            registry: PrimitiveRegistry::new(),
            links: LinksRegister::new(),
            evaluator,
        }
    }

    /// Invokes a primitive by name with a raw (unevaluated) argument list
    ///
    /// Contract violations and primitive failures come back as errors,
    /// unchanged; nothing here retries or recovers.
    pub fn call(&mut self, name: &str, args: Object) -> Result<Object> {
        let primitive = self.registry.get(name)?;
        debug!(primitive = name, args = args.list_len(), "dispatching");

        let mut ctx = PrimitiveContext::new(
            name,
            &self.root,
            &mut self.env,
            args,
            self.evaluator.as_mut(),
            &mut self.links,
        );
        let result = primitive.execute(&mut ctx);
        if let Err(err) = &result {
            warn!(primitive = name, error = %err, "primitive call failed");
        }
        result
    }

    /// Registers an additional primitive
    pub fn register_primitive<P: Primitive + 'static>(&mut self, primitive: P) {
        self.registry.register(primitive);
    }

    /// The allocation root; use it to build argument lists
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The global environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the global environment
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The primitive registry
    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    /// The link register shared by all primitives of this instance
    pub fn links(&self) -> &LinksRegister {
        &self.links
    }

    /// Mutable access to the link register
    pub fn links_mut(&mut self) -> &mut LinksRegister {
        &mut self.links
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
