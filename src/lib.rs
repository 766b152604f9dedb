//! # Unilisp - Primitive Bindings for an Embedded LISP
//!
//! [![Crates.io](https://img.shields.io/crates/v/unilisp.svg)](https://crates.io/crates/unilisp)
//! [![Documentation](https://docs.rs/unilisp/badge.svg)](https://docs.rs/unilisp)
//! [![License: MIT](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)
//!
//! The native-primitive binding layer of a small embedded LISP
//! interpreter: validates and marshals primitive arguments, translates
//! between native and interpreter value representations, and gives each
//! primitive a scoped view into a registry of named external references
//! ("links").
//!
//! ## Features
//!
//! - **Declared argument contracts** - arity and per-argument categories
//!   checked in one call, with 1-based positions in every error
//! - **Lazy, memoized argument evaluation** - side effects of evaluating
//!   an argument list happen exactly once per invocation
//! - **Scoped link registry** - per-primitive named handles, owned by the
//!   interpreter instance rather than process-global state
//! - **Pluggable evaluation** - the real evaluator stays behind a trait;
//!   this crate never interprets code itself
//!
//! ## Quick Start
//!
//! ```rust
//! use unilisp::Dispatcher;
//!
//! # fn main() -> unilisp::Result<()> {
//! let mut dispatcher = Dispatcher::new();
//!
//! let args = {
//!     let root = dispatcher.root();
//!     root.list([root.alloc_int(-7)])
//! };
//! let result = dispatcher.call("abs", args)?;
//! assert_eq!(result.as_int(), Some(7));
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing a Primitive
//!
//! ```rust
//! use unilisp::{Dispatcher, Object, ParamType, Primitive, PrimitiveContext, Result};
//!
//! struct DoublePrimitive;
//!
//! impl Primitive for DoublePrimitive {
//!     fn name(&self) -> &str {
//!         "double"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Twice the argument"
//!     }
//!
//!     fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
//!         ctx.assert_args(&[ParamType::Int])?;
//!         let n = ctx.arg_int(0)?;
//!         Ok(ctx.make_int(n.saturating_mul(2)))
//!     }
//! }
//!
//! # fn main() -> unilisp::Result<()> {
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register_primitive(DoublePrimitive);
//!
//! let args = {
//!     let root = dispatcher.root();
//!     root.list([root.alloc_int(21)])
//! };
//! assert_eq!(dispatcher.call("double", args)?.as_int(), Some(42));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! raw argument list → PrimitiveContext → assert_args / eval_args → primitive body
//!                          │
//!                          └─ LinksProxy (scoped view of LinksRegister)
//! ```
//!
//! ### Main Components
//!
//! - [`Value`] / [`Object`] - tagged interpreter value and shared handle
//! - [`Root`] - allocation context owning the nil/true sentinels
//! - [`Environment`] - lexical variable scoping
//! - [`Eval`] - evaluation seam an embedding interpreter implements
//! - [`PrimitiveContext`] - per-call argument validation and marshalling
//! - [`LinksRegister`] / [`LinksProxy`] - named external references
//! - [`Dispatcher`] - invokes primitives by name
//!
//! ## Error Handling
//!
//! Every contract violation comes back as a [`Error`] value naming the
//! primitive and, for argument errors, the 1-based offending position:
//!
//! ```rust
//! use unilisp::{Dispatcher, Error};
//!
//! let mut dispatcher = Dispatcher::new();
//! let args = dispatcher.root().nil();
//!
//! match dispatcher.call("abs", args) {
//!     Err(Error::ArityMismatch { expected, got, .. }) => {
//!         assert_eq!((expected, got), (1, 0));
//!     }
//!     other => panic!("expected arity error, got {:?}", other),
//! }
//! ```
//!
//! ## License
//!
//! Licensed under the [MIT License](https://opensource.org/licenses/MIT).

/// Version of the Unilisp crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod links;
pub mod primitives;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorSeverity, Result};
pub use links::{LinkHandle, LinksProxy, LinksRegister};
pub use primitives::{ParamType, Primitive, PrimitiveContext, PrimitiveRegistry};
pub use runtime::{AtomEvaluator, Dispatcher, Environment, Eval, Object, Root, Tag, Value};
