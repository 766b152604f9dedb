//! Built-in primitives
//!
//! A small set of native functions registered by default. Each one goes
//! through [`PrimitiveContext::assert_args`] with its declared parameter
//! categories; together they cover every category the context validates.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::primitives::{ParamType, Primitive, PrimitiveContext, PrimitiveRegistry};
use crate::runtime::{Object, Value};

/// Register the built-in primitives
pub fn register_all(registry: &mut PrimitiveRegistry) {
    registry.register(AbsPrimitive);
    registry.register(MaxPrimitive);
    registry.register(ClampPrimitive);
    registry.register(NotPrimitive);
    registry.register(BoolToIntPrimitive);
    registry.register(SymEqPrimitive);
    registry.register(TickPrimitive);
}

/// `(abs n)` — absolute value of an integer
///
/// Saturates at `i64::MAX` for `i64::MIN`.
pub struct AbsPrimitive;

impl Primitive for AbsPrimitive {
    fn name(&self) -> &str {
        "abs"
    }

    fn description(&self) -> &str {
        "Absolute value"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[ParamType::Int])?;
        let n = ctx.arg_int(0)?;
        Ok(ctx.make_int(n.saturating_abs()))
    }
}

/// `(max a b)` — larger of two integers
pub struct MaxPrimitive;

impl Primitive for MaxPrimitive {
    fn name(&self) -> &str {
        "max"
    }

    fn description(&self) -> &str {
        "Larger of two integers"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[ParamType::Int, ParamType::Int])?;
        let a = ctx.arg_int(0)?;
        let b = ctx.arg_int(1)?;
        Ok(ctx.make_int(a.max(b)))
    }
}

/// `(clamp n lo hi)` — n clamped into [lo, hi]
pub struct ClampPrimitive;

impl Primitive for ClampPrimitive {
    fn name(&self) -> &str {
        "clamp"
    }

    fn description(&self) -> &str {
        "Clamp an integer into a closed range"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[ParamType::Int, ParamType::Int, ParamType::Int])?;
        let n = ctx.arg_int(0)?;
        let lo = ctx.arg_int(1)?;
        let hi = ctx.arg_int(2)?;
        if lo > hi {
            return Err(Error::failed(ctx.name(), "empty range: lo > hi"));
        }
        Ok(ctx.make_int(n.clamp(lo, hi)))
    }
}

/// `(not b)` — boolean negation
pub struct NotPrimitive;

impl Primitive for NotPrimitive {
    fn name(&self) -> &str {
        "not"
    }

    fn description(&self) -> &str {
        "Boolean negation"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[ParamType::Bool])?;
        let b = ctx.arg_bool(0)?;
        Ok(ctx.make_bool(!b))
    }
}

/// `(bool->int v)` — nil to 0, t to 1, integers pass through
pub struct BoolToIntPrimitive;

impl Primitive for BoolToIntPrimitive {
    fn name(&self) -> &str {
        "bool->int"
    }

    fn description(&self) -> &str {
        "Coerce a boolean-or-integer to an integer"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[ParamType::BoolInt])?;
        let value = ctx.arg(0)?;
        let n = match &*value {
            Value::Nil => 0,
            Value::True => 1,
            Value::Int(n) => *n,
            // assert_args already rejected everything else
            other => {
                return Err(Error::failed(
                    ctx.name(),
                    format!("unexpected {} after validation", other.type_name()),
                ))
            }
        };
        Ok(ctx.make_int(n))
    }
}

/// `(sym= a b)` — name equality of two symbols
pub struct SymEqPrimitive;

impl Primitive for SymEqPrimitive {
    fn name(&self) -> &str {
        "sym="
    }

    fn description(&self) -> &str {
        "Symbol name equality"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[ParamType::Symbol, ParamType::Symbol])?;
        let a = ctx.arg_symbol(0)?;
        let b = ctx.arg_symbol(1)?;
        Ok(ctx.make_bool(a == b))
    }
}

/// `(tick)` — per-primitive invocation counter
///
/// Keeps its counter as a link named `count` in the register, so the
/// count survives across calls for as long as the interpreter instance
/// lives.
pub struct TickPrimitive;

impl Primitive for TickPrimitive {
    fn name(&self) -> &str {
        "tick"
    }

    fn description(&self) -> &str {
        "Count invocations through a registered link"
    }

    fn execute(&self, ctx: &mut PrimitiveContext<'_>) -> Result<Object> {
        ctx.assert_args(&[])?;

        let counter = {
            let mut links = ctx.links();
            match links.find("count") {
                Some(handle) => handle.downcast::<AtomicI64>().map_err(|_| {
                    Error::failed("tick", "count link is not a counter")
                })?,
                None => {
                    let counter = Arc::new(AtomicI64::new(0));
                    links.link("count", counter.clone());
                    counter
                }
            }
        };

        Ok(ctx.make_int(counter.fetch_add(1, Ordering::Relaxed) + 1))
    }
}
