//! The wrap/unwrap transform
//!
//! [`Element`] is the shared primitive behind both view engines: `read` is
//! the read-wrap transform turning a stored node into the typed value a
//! caller sees, and `to_node` is the write-unwrap transform turning a
//! supplied value back into its stored representation. Views and lists
//! unwrap to their backing node (structural sharing, never a copy);
//! primitives convert by value under the pinned coercion policy.
//!
//! Plain foreign collections are deliberately not `Element`: only
//! primitives, raw nodes, and engine-produced views convert, so the
//! limitation surfaces at compile time.

use std::rc::Rc;

use vista_tree::coerce::{coerce_lossy, Primitive};
use vista_tree::node::Node;

use crate::descriptor::ViewDescriptor;
use crate::object::GraphObject;

/// Whether an element type is a wrapped view or plain data.
///
/// Casting a list view to a different element type is only legal over
/// view-kind elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Primitives and nested sequences.
    Plain,
    /// Engine-produced map views.
    View,
}

/// A type that can live in a wrapped sequence or behind a typed accessor.
pub trait Element: Sized {
    /// Whether values of this type are wrapped views.
    const KIND: ElementKind;

    /// Name used in cast error messages.
    fn element_name() -> &'static str;

    /// Descriptor to validate when wrapping a sequence of this type.
    fn descriptor() -> Option<&'static ViewDescriptor> {
        None
    }

    /// Read-wrap: the typed value for a stored node, if it reads at this
    /// type. Stored nulls and structural mismatches for view targets yield
    /// `None`; primitive mismatches fall back to the pinned zero value.
    fn read(node: &Node) -> Option<Self>;

    /// Write-unwrap: the stored representation of this value.
    fn to_node(&self) -> Node;
}

macro_rules! primitive_element {
    ($ty:ty) => {
        impl Element for $ty {
            const KIND: ElementKind = ElementKind::Plain;

            fn element_name() -> &'static str {
                <$ty as Primitive>::NAME
            }

            fn read(node: &Node) -> Option<Self> {
                match node {
                    Node::Null => None,
                    stored => Some(coerce_lossy(stored)),
                }
            }

            fn to_node(&self) -> Node {
                Node::from(self.clone())
            }
        }
    };
}

primitive_element!(i64);
primitive_element!(f64);
primitive_element!(bool);
primitive_element!(String);

impl Element for GraphObject {
    const KIND: ElementKind = ElementKind::View;

    fn element_name() -> &'static str {
        "GraphObject"
    }

    fn descriptor() -> Option<&'static ViewDescriptor> {
        Some(<GraphObject as crate::descriptor::ViewType>::descriptor())
    }

    fn read(node: &Node) -> Option<Self> {
        node.as_object().map(GraphObject::from_inner)
    }

    fn to_node(&self) -> Node {
        Node::Object(Rc::clone(self.inner()))
    }
}

/// The read policy at the typed-getter layer.
///
/// `Option<E>` is the shape-honest form: absent keys and stored nulls are
/// `None`. A bare primitive return is the forgiving form: absent, null,
/// and mismatched values all read as the type's pinned zero value.
pub trait PropertyValue: Sized {
    /// Read the value stored under `key` in `object`'s backing map.
    fn read_from(object: &GraphObject, key: &str) -> Self;
}

impl<E: Element> PropertyValue for Option<E> {
    fn read_from(object: &GraphObject, key: &str) -> Self {
        object.get(key).and_then(|node| E::read(&node))
    }
}

macro_rules! lossy_property_value {
    ($ty:ty) => {
        impl PropertyValue for $ty {
            fn read_from(object: &GraphObject, key: &str) -> Self {
                object
                    .get(key)
                    .map(|node| coerce_lossy(&node))
                    .unwrap_or_default()
            }
        }
    };
}

lossy_property_value!(i64);
lossy_property_value!(f64);
lossy_property_value!(bool);
lossy_property_value!(String);
