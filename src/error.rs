//! Error types for the Unilisp primitive layer

use thiserror::Error;

/// Errors raised while binding native primitives to interpreted code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Argument contract errors
    /// Primitive invoked with the wrong number of arguments
    ///
    /// **Triggered by:** a call site passing more or fewer arguments than
    /// the primitive declared
    /// **Example:** `(abs)` when `abs` declares exactly one argument
    #[error("[{primitive}] expected {expected} arguments, got {got}")]
    ArityMismatch {
        /// Primitive name
        primitive: String,
        /// Declared argument count
        expected: usize,
        /// Actual argument count
        got: usize,
    },

    /// Evaluated argument list ended before every declared argument was seen
    ///
    /// Arity is checked against the raw list first, so this only fires when
    /// the evaluated list is structurally shorter than the raw one.
    #[error("[{primitive}] argument list ended unexpectedly at position {position}")]
    MissingArgument {
        /// Primitive name
        primitive: String,
        /// 1-based position of the missing argument
        position: usize,
    },

    /// Argument evaluated to a value outside its declared category
    ///
    /// **Triggered by:** e.g. a symbol where an integer was declared
    /// **Example:** `(abs x)` where `x` is bound to a symbol
    #[error("[{primitive}] invalid type for argument {position}: expected {expected}, got {got}")]
    TypeMismatch {
        /// Primitive name
        primitive: String,
        /// 1-based position of the offending argument
        position: usize,
        /// Declared category name
        expected: String,
        /// Actual value tag name
        got: String,
    },

    // Dispatch errors
    /// No primitive registered under the requested name
    #[error("Undefined primitive: {name}")]
    UndefinedPrimitive {
        /// Requested primitive name
        name: String,
    },

    /// Symbol had no binding in the current environment
    #[error("Unbound symbol: {name}")]
    UnboundSymbol {
        /// Symbol name
        name: String,
    },

    /// Primitive body failed after its arguments validated
    #[error("Primitive {primitive} failed: {reason}")]
    PrimitiveFailed {
        /// Primitive name
        primitive: String,
        /// Failure reason
        reason: String,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Programmer-contract violation; the call cannot be retried
    Fatal,
    /// May succeed on a later call or with different inputs
    Recoverable,
}

impl Error {
    /// Create a primitive-body failure with a message
    pub fn failed(primitive: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PrimitiveFailed {
            primitive: primitive.into(),
            reason: reason.into(),
        }
    }

    /// Classify error severity
    ///
    /// Argument contract violations are fatal: the declared signature of a
    /// primitive is an invariant of the program, not a runtime condition.
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::ArityMismatch { .. } => ErrorSeverity::Fatal,
            Error::MissingArgument { .. } => ErrorSeverity::Fatal,
            Error::TypeMismatch { .. } => ErrorSeverity::Fatal,

            Error::UndefinedPrimitive { .. } => ErrorSeverity::Recoverable,
            Error::UnboundSymbol { .. } => ErrorSeverity::Recoverable,
            Error::PrimitiveFailed { .. } => ErrorSeverity::Recoverable,
        }
    }
}

/// Result type for Unilisp operations
pub type Result<T> = std::result::Result<T, Error>;
