//! Primitive coercion policy
//!
//! Loosely-typed payloads routinely carry a number where a boolean was
//! expected, or a string where a number was declared. Vista pins one policy
//! for the whole workspace, isolated behind this module so tests can hold
//! it in place:
//!
//! - [`coerce_strict`] returns [`VistaError::Coercion`] whenever the stored
//!   node does not match the declared primitive. Numbers interconvert
//!   (`i64` from an exactly-representable float, `f64` from any number).
//! - [`coerce_lossy`] is the forgiving read path used by typed getters and
//!   sequence reads: a mismatch yields the type's zero value (`0`, `0.0`,
//!   `false`, `""`). Stored nulls and absent keys are handled above this
//!   layer and surface as `None`, never as the zero value.

use crate::error::{Result, VistaError};
use crate::node::Node;

/// A primitive type a typed getter may declare.
pub trait Primitive: Default + Sized {
    /// Name used in coercion error messages.
    const NAME: &'static str;

    /// Read the stored node as this primitive, if it matches.
    fn from_node(node: &Node) -> Option<Self>;
}

impl Primitive for i64 {
    const NAME: &'static str = "i64";

    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Number(n) => n.as_i64().or_else(|| {
                // Floats that carry an integral value still read as integers.
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            }),
            _ => None,
        }
    }
}

impl Primitive for f64 {
    const NAME: &'static str = "f64";

    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl Primitive for bool {
    const NAME: &'static str = "bool";

    fn from_node(node: &Node) -> Option<Self> {
        node.as_bool()
    }
}

impl Primitive for String {
    const NAME: &'static str = "string";

    fn from_node(node: &Node) -> Option<Self> {
        node.as_str().map(str::to_string)
    }
}

/// Coerce a stored node to a declared primitive, failing on mismatch.
pub fn coerce_strict<T: Primitive>(node: &Node) -> Result<T> {
    T::from_node(node).ok_or(VistaError::Coercion {
        expected: T::NAME,
        found: node.type_name(),
    })
}

/// Coerce a stored node to a declared primitive, defaulting on mismatch.
pub fn coerce_lossy<T: Primitive>(node: &Node) -> T {
    T::from_node(node).unwrap_or_default()
}
