//! The sequence view
//!
//! A [`GraphList`] is a live proxy bound to one shared sequence node plus a
//! declared element type. It is append/index-mutate-only: structural
//! removal is not a meaningful operation over a live tree owned by an
//! external collaborator, so `clear`/`remove`/`remove_all`/`retain_all`
//! always fail.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use serde_json::Value;

use vista_tree::error::{Result, VistaError};
use vista_tree::node::{Node, SequenceRef};

use crate::descriptor::ViewType;
use crate::element::{Element, ElementKind};
use crate::validate::validate;

/// A live list view over one shared sequence node.
pub struct GraphList<E: Element> {
    inner: SequenceRef,
    element: PhantomData<E>,
}

impl<E: Element> GraphList<E> {
    /// Create a view over a fresh empty sequence node.
    pub fn create() -> Result<Self> {
        Self::wrap(Node::new_sequence())
    }

    /// Wrap an existing sequence node.
    ///
    /// When `E` is a view type, its contract is validated first (cached
    /// per type). Construction never mutates the node.
    pub fn wrap(inner: SequenceRef) -> Result<Self> {
        if let Some(descriptor) = E::descriptor() {
            validate(descriptor)?;
        }
        Ok(Self {
            inner,
            element: PhantomData,
        })
    }

    /// Wrap a parsed JSON value, which must be an array.
    pub fn from_json(value: Value) -> Result<Self> {
        let node = Node::from_json(value);
        match node.as_sequence() {
            Some(inner) => Self::wrap(inner),
            None => Err(VistaError::UnexpectedNode {
                expected: "array",
                found: node.type_name(),
            }),
        }
    }

    /// Render the backing node to a JSON value, mutations included.
    pub fn to_json(&self) -> Value {
        Node::Array(Rc::clone(&self.inner)).to_json()
    }

    /// The backing node, shared by reference.
    pub fn inner(&self) -> &SequenceRef {
        &self.inner
    }

    /// The read-wrapped element at `index`, if present and readable.
    pub fn get(&self, index: usize) -> Option<E> {
        let node = self.inner.borrow().get(index).cloned()?;
        E::read(&node)
    }

    /// Replace the element at `index`, write-unwrapping `value`.
    ///
    /// The sequence never grows through `set`; writing past the end fails.
    pub fn set(&self, index: usize, value: E) -> Result<()> {
        let mut seq = self.inner.borrow_mut();
        let len = seq.len();
        match seq.get_mut(index) {
            Some(slot) => {
                *slot = value.to_node();
                Ok(())
            }
            None => Err(VistaError::IndexOutOfBounds { index, len }),
        }
    }

    /// Append a write-unwrapped element.
    pub fn push(&self, value: E) {
        self.inner.borrow_mut().push(value.to_node());
    }

    /// Append every element of `values`.
    pub fn extend<I: IntoIterator<Item = E>>(&self, values: I) {
        let mut seq = self.inner.borrow_mut();
        for value in values {
            seq.push(value.to_node());
        }
    }

    /// Number of elements in the backing sequence.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the backing sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Whether some element equals `value` after unwrapping both sides to
    /// their stored representation.
    pub fn contains(&self, value: &E) -> bool {
        let needle = value.to_node();
        self.inner.borrow().iter().any(|stored| *stored == needle)
    }

    /// Whether every value in `values` is contained.
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        E: 'a,
        I: IntoIterator<Item = &'a E>,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Iterate over the live sequence, read-wrapping each element.
    ///
    /// The iterator is lazy and restartable; it re-reads the sequence at
    /// every step and skips elements that do not read at the element type.
    /// Mutating the sequence mid-iteration gives unspecified elements but
    /// never touches the backing store.
    pub fn iter(&self) -> Iter<E> {
        Iter {
            inner: Rc::clone(&self.inner),
            index: 0,
            element: PhantomData,
        }
    }

    /// Unsupported: the sequence proxy cannot shrink.
    pub fn clear(&self) -> Result<()> {
        Err(VistaError::UnsupportedOperation("clear"))
    }

    /// Unsupported: the sequence proxy cannot shrink.
    pub fn remove(&self, _value: &E) -> Result<()> {
        Err(VistaError::UnsupportedOperation("remove"))
    }

    /// Unsupported: the sequence proxy cannot shrink.
    pub fn remove_all<'a, I>(&self, _values: I) -> Result<()>
    where
        E: 'a,
        I: IntoIterator<Item = &'a E>,
    {
        Err(VistaError::UnsupportedOperation("remove_all"))
    }

    /// Unsupported: the sequence proxy cannot shrink.
    pub fn retain_all<'a, I>(&self, _values: I) -> Result<()>
    where
        E: 'a,
        I: IntoIterator<Item = &'a E>,
    {
        Err(VistaError::UnsupportedOperation("retain_all"))
    }

    /// Reinterpret this list as holding elements of view type `U`, over
    /// the same backing sequence.
    ///
    /// Only legal when the current element type is itself a view type;
    /// a primitive-element list cannot be cast.
    pub fn cast_to_list_of<U: ViewType + Element>(&self) -> Result<GraphList<U>> {
        match E::KIND {
            ElementKind::View => GraphList::wrap(Rc::clone(&self.inner)),
            ElementKind::Plain => Err(VistaError::CastNotSupported {
                from: E::element_name(),
                to: <U as ViewType>::descriptor().name,
            }),
        }
    }
}

impl<E: Element> Element for GraphList<E> {
    const KIND: ElementKind = ElementKind::Plain;

    fn element_name() -> &'static str {
        "sequence"
    }

    fn read(node: &Node) -> Option<Self> {
        GraphList::wrap(node.as_sequence()?).ok()
    }

    fn to_node(&self) -> Node {
        Node::Array(Rc::clone(&self.inner))
    }
}

impl<E: Element> Clone for GraphList<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            element: PhantomData,
        }
    }
}

/// Deep structural equality of the backing sequences.
impl<E: Element> PartialEq for GraphList<E> {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        *self.inner.borrow() == *other.inner.borrow()
    }
}

impl<E: Element> fmt::Debug for GraphList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphList({})", self.to_json())
    }
}

impl<E: Element> From<GraphList<E>> for Node {
    fn from(list: GraphList<E>) -> Self {
        Node::Array(list.inner)
    }
}

impl<E: Element> IntoIterator for &GraphList<E> {
    type Item = E;
    type IntoIter = Iter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a live sequence view.
pub struct Iter<E: Element> {
    inner: SequenceRef,
    index: usize,
    element: PhantomData<E>,
}

impl<E: Element> Iterator for Iter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        loop {
            let node = self.inner.borrow().get(self.index).cloned()?;
            self.index += 1;
            if let Some(value) = E::read(&node) {
                return Some(value);
            }
        }
    }
}
