//! Evaluation seam between the primitive layer and an embedding interpreter

use crate::error::Result;
use crate::runtime::{Environment, Object, Root, Value};

/// Evaluates forms on behalf of the primitive layer
///
/// The binding layer never interprets code itself; it hands raw argument
/// forms to an implementation of this trait. Embedders plug in their real
/// evaluator here. [`AtomEvaluator`] covers the atom subset and is enough
/// for primitives whose arguments are literals or bound symbols.
pub trait Eval {
    /// Evaluates a single form against the environment
    fn eval(&mut self, root: &Root, env: &mut Environment, form: &Object) -> Result<Object>;

    /// Evaluates every element of a list, preserving order
    ///
    /// Rebuilds a proper list of the results; an atom (including nil)
    /// yields the empty list.
    fn eval_list(&mut self, root: &Root, env: &mut Environment, list: &Object) -> Result<Object> {
        let mut items = Vec::with_capacity(list.list_len());
        let mut cursor = list.clone();
        loop {
            let next = match &*cursor {
                Value::Cell { car, cdr } => {
                    items.push(self.eval(root, env, car)?);
                    cdr.clone()
                }
                _ => break,
            };
            cursor = next;
        }
        Ok(root.list(items))
    }
}

/// Minimal evaluator: atoms evaluate to themselves, symbols resolve in
/// the environment
pub struct AtomEvaluator;

impl Eval for AtomEvaluator {
    fn eval(&mut self, _root: &Root, env: &mut Environment, form: &Object) -> Result<Object> {
        match &**form {
            Value::Symbol(name) => env.get(name),
            _ => Ok(form.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn atoms_self_evaluate() {
        let root = Root::new();
        let mut env = Environment::new();
        let mut eval = AtomEvaluator;

        let n = root.alloc_int(7);
        let out = eval.eval(&root, &mut env, &n).unwrap();
        assert_eq!(out.as_int(), Some(7));

        let nil = root.nil();
        assert!(eval.eval(&root, &mut env, &nil).unwrap().is_nil());
    }

    #[test]
    fn symbols_resolve_through_environment() {
        let root = Root::new();
        let mut env = Environment::new();
        env.define("x", root.alloc_int(5));
        let mut eval = AtomEvaluator;

        let sym = root.alloc_symbol("x");
        let out = eval.eval(&root, &mut env, &sym).unwrap();
        assert_eq!(out.as_int(), Some(5));

        let missing = root.alloc_symbol("y");
        let result = eval.eval(&root, &mut env, &missing);
        assert!(matches!(result, Err(Error::UnboundSymbol { .. })));
    }

    #[test]
    fn eval_list_maps_in_order() {
        let root = Root::new();
        let mut env = Environment::new();
        env.define("x", root.alloc_int(2));
        let mut eval = AtomEvaluator;

        let raw = root.list([root.alloc_int(1), root.alloc_symbol("x"), root.t()]);
        let evaluated = eval.eval_list(&root, &mut env, &raw).unwrap();
        assert_eq!(evaluated.to_string(), "(1 2 t)");
    }

    #[test]
    fn eval_list_of_atom_is_empty() {
        let root = Root::new();
        let mut env = Environment::new();
        let mut eval = AtomEvaluator;

        let out = eval.eval_list(&root, &mut env, &root.alloc_int(3)).unwrap();
        assert!(out.is_nil());
    }
}
