//! Per-invocation argument marshalling for native primitives

use crate::error::{Error, Result};
use crate::links::{LinksProxy, LinksRegister};
use crate::runtime::{Environment, Eval, Object, Root, Tag, Value};

/// Categories a primitive may declare for its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Integer only
    Int,
    /// nil or t
    Bool,
    /// Integer, nil, or t
    BoolInt,
    /// Symbol only
    Symbol,
}

impl ParamType {
    /// Category name as used in type errors
    pub fn expected(&self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Bool => "bool",
            ParamType::BoolInt => "bool or int",
            ParamType::Symbol => "symbol",
        }
    }

    /// Whether a value tag satisfies this category
    ///
    /// Tags outside the category — cells included — fail the check.
    pub fn admits(&self, tag: Tag) -> bool {
        match self {
            ParamType::Int => tag == Tag::Int,
            ParamType::Bool => matches!(tag, Tag::Nil | Tag::True),
            ParamType::BoolInt => matches!(tag, Tag::Int | Tag::Nil | Tag::True),
            ParamType::Symbol => tag == Tag::Symbol,
        }
    }
}

/// Invocation context handed to a native primitive
///
/// Built by the dispatcher once per call. Borrows the interpreter's
/// collaborators for the duration of the call: the allocation root, the
/// environment, the evaluation seam, and the link register. Owns only the
/// raw argument list handle and the memoized evaluated list.
pub struct PrimitiveContext<'run> {
    name: String,
    root: &'run Root,
    env: &'run mut Environment,
    list: Object,
    evaluated: Option<Object>,
    evaluator: &'run mut dyn Eval,
    links: &'run mut LinksRegister,
}

impl<'run> PrimitiveContext<'run> {
    /// Creates a context for one call of the named primitive
    pub fn new(
        name: impl Into<String>,
        root: &'run Root,
        env: &'run mut Environment,
        list: Object,
        evaluator: &'run mut dyn Eval,
        links: &'run mut LinksRegister,
    ) -> Self {
        PrimitiveContext {
            name: name.into(),
            root,
            env,
            list,
            evaluated: None,
            evaluator,
            links,
        }
    }

    /// Display name of the primitive being invoked
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of raw (unevaluated) arguments
    ///
    /// Walks the list's cell chain; O(n) in argument count.
    pub fn args_len(&self) -> usize {
        self.list.list_len()
    }

    /// Whether an evaluated argument value satisfies a declared category
    pub fn check_type(&self, value: &Object, ty: ParamType) -> bool {
        ty.admits(value.tag())
    }

    /// Evaluates the raw argument list, at most once per invocation
    ///
    /// The first call runs the evaluation seam over the whole list and
    /// caches the result; later calls return the same list handle, so any
    /// side effects of evaluation happen exactly once.
    pub fn eval_args(&mut self) -> Result<Object> {
        if let Some(cached) = &self.evaluated {
            return Ok(cached.clone());
        }
        let evaluated = self.evaluator.eval_list(self.root, self.env, &self.list)?;
        self.evaluated = Some(evaluated.clone());
        Ok(evaluated)
    }

    /// Validates argument count and per-argument categories in one call
    ///
    /// The count check runs against the raw list. With an empty descriptor
    /// slice every per-argument check is skipped; otherwise the list is
    /// evaluated and walked in order, failing on the first missing or
    /// mistyped argument. Positions in errors are 1-based.
    pub fn assert_args(&mut self, expected: &[ParamType]) -> Result<()> {
        let got = self.args_len();
        if got != expected.len() {
            return Err(Error::ArityMismatch {
                primitive: self.name.clone(),
                expected: expected.len(),
                got,
            });
        }
        if expected.is_empty() {
            return Ok(());
        }

        let mut cursor = self.eval_args()?;
        for (index, ty) in expected.iter().enumerate() {
            let next = match &*cursor {
                Value::Cell { car, cdr } => {
                    if !ty.admits(car.tag()) {
                        return Err(Error::TypeMismatch {
                            primitive: self.name.clone(),
                            position: index + 1,
                            expected: ty.expected().to_string(),
                            got: car.type_name().to_string(),
                        });
                    }
                    cdr.clone()
                }
                _ => {
                    return Err(Error::MissingArgument {
                        primitive: self.name.clone(),
                        position: index + 1,
                    })
                }
            };
            cursor = next;
        }
        Ok(())
    }

    /// The i-th (0-based) evaluated argument
    pub fn arg(&mut self, index: usize) -> Result<Object> {
        let mut cursor = self.eval_args()?;
        let mut remaining = index;
        loop {
            let next = match &*cursor {
                Value::Cell { car, cdr } => {
                    if remaining == 0 {
                        return Ok(car.clone());
                    }
                    cdr.clone()
                }
                _ => {
                    return Err(Error::MissingArgument {
                        primitive: self.name.clone(),
                        position: index + 1,
                    })
                }
            };
            remaining -= 1;
            cursor = next;
        }
    }

    /// The i-th evaluated argument as an integer
    pub fn arg_int(&mut self, index: usize) -> Result<i64> {
        let value = self.arg(index)?;
        value
            .as_int()
            .ok_or_else(|| self.type_mismatch(index, ParamType::Int, &value))
    }

    /// The i-th evaluated argument as a boolean
    ///
    /// nil is false; t is true; an integer is true when nonzero.
    pub fn arg_bool(&mut self, index: usize) -> Result<bool> {
        let value = self.arg(index)?;
        match &*value {
            Value::Nil => Ok(false),
            Value::True => Ok(true),
            Value::Int(n) => Ok(*n != 0),
            _ => Err(self.type_mismatch(index, ParamType::BoolInt, &value)),
        }
    }

    /// The i-th evaluated argument as a symbol name
    pub fn arg_symbol(&mut self, index: usize) -> Result<String> {
        let value = self.arg(index)?;
        value
            .as_symbol()
            .map(str::to_owned)
            .ok_or_else(|| self.type_mismatch(index, ParamType::Symbol, &value))
    }

    /// Maps a native boolean onto the canonical sentinels; no allocation
    pub fn make_bool(&self, value: bool) -> Object {
        if value {
            self.root.t()
        } else {
            self.root.nil()
        }
    }

    /// Allocates a fresh integer object through the root
    pub fn make_int(&self, value: i64) -> Object {
        self.root.alloc_int(value)
    }

    /// The interpreter's allocation root
    pub fn root(&self) -> &Root {
        self.root
    }

    /// The current lexical environment
    pub fn env(&mut self) -> &mut Environment {
        self.env
    }

    /// Link registry view scoped to this primitive's name
    pub fn links(&mut self) -> LinksProxy<'_> {
        LinksProxy::new(&self.name, &mut *self.links)
    }

    /// The whole interpreter-wide link register
    pub fn links_register(&mut self) -> &mut LinksRegister {
        self.links
    }

    fn type_mismatch(&self, index: usize, ty: ParamType, value: &Object) -> Error {
        Error::TypeMismatch {
            primitive: self.name.clone(),
            position: index + 1,
            expected: ty.expected().to_string(),
            got: value.type_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::AtomEvaluator;
    use std::rc::Rc;

    fn fixture() -> (Root, Environment, LinksRegister) {
        (Root::new(), Environment::new(), LinksRegister::new())
    }

    #[test]
    fn args_len_walks_raw_list() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let args = root.list([root.alloc_int(1), root.alloc_int(2)]);
        let ctx = PrimitiveContext::new("p", &root, &mut env, args, &mut eval, &mut links);
        assert_eq!(ctx.args_len(), 2);
    }

    #[test]
    fn bool_int_union_check() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let ctx =
            PrimitiveContext::new("p", &root, &mut env, root.nil(), &mut eval, &mut links);

        assert!(ctx.check_type(&root.alloc_int(1), ParamType::BoolInt));
        assert!(ctx.check_type(&root.t(), ParamType::BoolInt));
        assert!(ctx.check_type(&root.nil(), ParamType::BoolInt));
        assert!(!ctx.check_type(&root.alloc_symbol("x"), ParamType::BoolInt));
        let cell = root.cons(root.nil(), root.nil());
        assert!(!ctx.check_type(&cell, ParamType::BoolInt));
    }

    #[test]
    fn eval_args_memoizes() {
        let (root, mut env, mut links) = fixture();
        env.define("x", root.alloc_int(5));
        let mut eval = AtomEvaluator;
        let args = root.list([root.alloc_symbol("x")]);
        let mut ctx =
            PrimitiveContext::new("p", &root, &mut env, args, &mut eval, &mut links);

        let first = ctx.eval_args().unwrap();
        let second = ctx.eval_args().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.car().unwrap().as_int(), Some(5));
    }

    #[test]
    fn assert_args_example_contract() {
        // declared (Int, BoolInt): (5 nil) ok, (5) arity error,
        // ('x nil) type error at position 1
        let declared = [ParamType::Int, ParamType::BoolInt];

        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let args = root.list([root.alloc_int(5), root.nil()]);
        let mut ctx =
            PrimitiveContext::new("p", &root, &mut env, args, &mut eval, &mut links);
        assert!(ctx.assert_args(&declared).is_ok());

        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let args = root.list([root.alloc_int(5)]);
        let mut ctx =
            PrimitiveContext::new("p", &root, &mut env, args, &mut eval, &mut links);
        assert!(matches!(
            ctx.assert_args(&declared),
            Err(Error::ArityMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));

        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        env.define("x", root.alloc_symbol("x"));
        let args = root.list([root.alloc_symbol("x"), root.nil()]);
        let mut ctx =
            PrimitiveContext::new("p", &root, &mut env, args, &mut eval, &mut links);
        assert!(matches!(
            ctx.assert_args(&declared),
            Err(Error::TypeMismatch { position: 1, .. })
        ));
    }

    #[test]
    fn assert_args_empty_skips_type_checks() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let mut ctx =
            PrimitiveContext::new("p", &root, &mut env, root.nil(), &mut eval, &mut links);
        assert!(ctx.assert_args(&[]).is_ok());
        // no evaluation was forced
        assert!(ctx.evaluated.is_none());
    }

    #[test]
    fn make_bool_uses_sentinels() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let ctx =
            PrimitiveContext::new("p", &root, &mut env, root.nil(), &mut eval, &mut links);

        let before = root.allocations();
        let t = ctx.make_bool(true);
        let nil = ctx.make_bool(false);
        assert_eq!(root.allocations(), before);
        assert!(Rc::ptr_eq(&t, &root.t()));
        assert!(Rc::ptr_eq(&nil, &root.nil()));
    }

    #[test]
    fn make_int_allocates() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let ctx =
            PrimitiveContext::new("p", &root, &mut env, root.nil(), &mut eval, &mut links);

        let before = root.allocations();
        let n = ctx.make_int(42);
        assert_eq!(n.as_int(), Some(42));
        assert_eq!(root.allocations(), before + 1);
    }

    #[test]
    fn typed_accessors() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let args = root.list([root.alloc_int(3), root.t(), root.alloc_symbol("led")]);
        let mut ctx =
            PrimitiveContext::new("p", &root, &mut env, args, &mut eval, &mut links);

        assert_eq!(ctx.arg_int(0).unwrap(), 3);
        assert!(ctx.arg_bool(0).unwrap()); // nonzero int counts as true
        assert!(ctx.arg_bool(1).unwrap());
        assert_eq!(ctx.arg_symbol(2).unwrap(), "led");

        assert!(matches!(
            ctx.arg_int(1),
            Err(Error::TypeMismatch { position: 2, .. })
        ));
        assert!(matches!(
            ctx.arg(3),
            Err(Error::MissingArgument { position: 4, .. })
        ));
    }

    #[test]
    fn links_proxy_is_scoped_to_name() {
        let (root, mut env, mut links) = fixture();
        let mut eval = AtomEvaluator;
        let mut ctx =
            PrimitiveContext::new("blink", &root, &mut env, root.nil(), &mut eval, &mut links);

        ctx.links().link("pin", std::sync::Arc::new(13u8));
        assert_eq!(ctx.links().scope(), "blink");
        assert!(ctx.links().find("pin").is_some());
        assert!(ctx.links_register().find("other", "pin").is_none());

        drop(ctx);
        assert_eq!(links.len(), 1);
    }
}
