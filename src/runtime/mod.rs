//! Runtime substrate for the primitive layer

mod dispatcher;
mod environment;
mod eval;
mod object;

pub use dispatcher::Dispatcher;
pub use environment::Environment;
pub use eval::{AtomEvaluator, Eval};
pub use object::{Object, Root, Tag, Value};
