//! The map view
//!
//! A [`GraphObject`] is a live proxy bound to exactly one object node. It
//! never owns a private copy: every read and write goes straight to the
//! shared backing map, so all views constructed over the same node observe
//! each other's mutations. Typed adapters generated by `#[view]` wrap a
//! `GraphObject` and dispatch their accessors through it.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use vista_tree::error::{Result, VistaError};
use vista_tree::key::property_to_key;
use vista_tree::node::{Node, ObjectRef};

use crate::descriptor::{ViewDescriptor, ViewType, ROOT};
use crate::element::{Element, PropertyValue};
use crate::validate::validate;

/// A live, untyped map view over one shared object node.
#[derive(Clone, Default)]
pub struct GraphObject {
    inner: ObjectRef,
}

impl GraphObject {
    /// Create a view over a fresh empty object node.
    pub fn new() -> Self {
        Self {
            inner: Node::new_object(),
        }
    }

    /// Wrap an existing object node without a typed contract.
    ///
    /// The untyped view is the root capability and needs no validation.
    pub fn from_inner(inner: ObjectRef) -> Self {
        Self { inner }
    }

    /// Wrap a parsed JSON value, which must be an object.
    pub fn from_json(value: Value) -> Result<Self> {
        let node = Node::from_json(value);
        match node.as_object() {
            Some(inner) => Ok(Self::from_inner(inner)),
            None => Err(VistaError::UnexpectedNode {
                expected: "object",
                found: node.type_name(),
            }),
        }
    }

    /// Render the backing node to a JSON value, mutations included.
    pub fn to_json(&self) -> Value {
        Node::Object(Rc::clone(&self.inner)).to_json()
    }

    /// The backing node, shared by reference.
    ///
    /// Reads and writes through this handle are visible to every view over
    /// the node; serializing collaborators use it for raw access.
    pub fn inner(&self) -> &ObjectRef {
        &self.inner
    }

    /// Wrap an object node as view type `T`.
    ///
    /// Validates `T`'s contract (cached per type) and binds a fresh adapter
    /// to the node. Construction never mutates the node.
    pub fn wrap<T: ViewType>(inner: ObjectRef) -> Result<T> {
        validate(T::descriptor())?;
        Ok(T::from_object(GraphObject::from_inner(inner)))
    }

    /// Create a fresh empty node and wrap it as view type `T`.
    pub fn create<T: ViewType>() -> Result<T> {
        Self::wrap(Node::new_object())
    }

    /// Reinterpret this view as view type `T` over the same backing node.
    ///
    /// Only the target contract is validated; the data is neither copied
    /// nor checked against the new shape.
    pub fn cast<T: ViewType>(&self) -> Result<T> {
        Self::wrap(Rc::clone(&self.inner))
    }

    // ------------------------------------------------------------------
    // Generic map contract
    // ------------------------------------------------------------------

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Node> {
        self.inner.borrow().get(key).cloned()
    }

    /// Store a value under `key`, returning the previous value.
    ///
    /// Views and lists convert by unwrapping to their backing node, so the
    /// stored value is a plain nested node, never a proxy.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.inner.borrow_mut().insert(key.into(), value.into())
    }

    /// Remove the entry under `key`, returning its value.
    pub fn remove(&self, key: &str) -> Option<Node> {
        self.inner.borrow_mut().shift_remove(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    /// Whether some entry stores a value deep-equal to `value`.
    pub fn contains_value(&self, value: &Node) -> bool {
        self.inner.borrow().values().any(|stored| stored == value)
    }

    /// Snapshot of the keys, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    /// Snapshot of the values, in insertion order.
    pub fn values(&self) -> Vec<Node> {
        self.inner.borrow().values().cloned().collect()
    }

    /// Snapshot of the entries, in insertion order.
    pub fn entries(&self) -> Vec<(String, Node)> {
        self.inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the backing map is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Remove every entry from the backing map.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Store every entry from `entries`.
    pub fn extend<K, V, I>(&self, entries: I)
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = self.inner.borrow_mut();
        for (key, value) in entries {
            map.insert(key.into(), value.into());
        }
    }

    // ------------------------------------------------------------------
    // Typed property access
    // ------------------------------------------------------------------

    /// Read the property named by camel-case `property` through the
    /// read-wrap transform. A view-typed read constructs a fresh adapter
    /// on every call; all of them share the same nested node.
    pub fn get_property<P: PropertyValue>(&self, property: &str) -> P {
        P::read_from(self, &property_to_key(property))
    }

    /// Write the property named by camel-case `property` through the
    /// write-unwrap transform.
    pub fn set_property<E: Element>(&self, property: &str, value: &E) {
        self.inner
            .borrow_mut()
            .insert(property_to_key(property), value.to_node());
    }
}

/// The untyped view is itself the root capability, so the casting and
/// collection APIs compose with it uniformly.
impl ViewType for GraphObject {
    fn descriptor() -> &'static ViewDescriptor {
        &ROOT
    }

    fn from_object(object: GraphObject) -> Self {
        object
    }

    fn object(&self) -> &GraphObject {
        self
    }
}

/// Deep structural equality of the backing nodes, regardless of how many
/// views or which view types sit over them.
impl PartialEq for GraphObject {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        *self.inner.borrow() == *other.inner.borrow()
    }
}

impl fmt::Debug for GraphObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphObject({})", self.to_json())
    }
}

impl From<GraphObject> for Node {
    fn from(object: GraphObject) -> Self {
        Node::Object(object.inner)
    }
}
