//! Error types for Vista

use std::fmt;

use thiserror::Error;

/// Why a declared method failed interface-shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractReason {
    /// The name is neither a map operation nor a typed accessor.
    BadName,
    /// The method takes the wrong number of parameters for its shape.
    BadArity,
    /// The return type is incompatible with the method's shape.
    BadReturnType,
}

impl fmt::Display for ContractReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractReason::BadName => {
                write!(f, "is neither a map operation nor a typed accessor")
            }
            ContractReason::BadArity => write!(f, "has the wrong number of parameters"),
            ContractReason::BadReturnType => write!(f, "has an incompatible return type"),
        }
    }
}

/// Vista error types
///
/// `Clone` so that cached validation failures re-raise deterministically on
/// every wrap/create/cast attempt for the same view type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VistaError {
    /// A requested view type failed interface-shape validation.
    #[error("contract violation in view `{view}`: method `{method}` {reason}")]
    ContractViolation {
        /// Name of the view type that was rejected.
        view: &'static str,
        /// The offending method, in declaration-convention form.
        method: &'static str,
        /// Why the method was rejected.
        reason: ContractReason,
    },
    /// A structural-removal operation was called on a sequence view.
    #[error("unsupported operation `{0}` on a sequence view")]
    UnsupportedOperation(&'static str),
    /// A primitive-element list view was cast to a view-typed element.
    #[error("cannot cast a list of `{from}` elements to views of type `{to}`")]
    CastNotSupported {
        /// Element type of the list being cast.
        from: &'static str,
        /// Requested target view type.
        to: &'static str,
    },
    /// A stored value could not be strictly coerced to a declared primitive.
    #[error("cannot coerce a {found} value into {expected}")]
    Coercion {
        /// The declared primitive type.
        expected: &'static str,
        /// The stored node's type.
        found: &'static str,
    },
    /// Indexed write past the end of a sequence view.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Length of the backing sequence at call time.
        len: usize,
    },
    /// A node of the wrong shape was handed to a wrap entry point.
    #[error("expected {expected} node, found {found}")]
    UnexpectedNode {
        /// The shape the operation requires.
        expected: &'static str,
        /// The shape that was actually supplied.
        found: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VistaError>;
