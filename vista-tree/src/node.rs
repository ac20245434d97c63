//! The untyped store
//!
//! A `Node` is a JSON-shaped value forming the single mutable source of
//! truth behind every view. Container payloads are reference-counted, so
//! cloning a node shares its objects and sequences instead of copying them:
//! any number of views may alias the same container and observe each
//! other's mutations, and a view can outlive the root tree it was wrapped
//! from without dangling.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered, string-keyed map of nodes.
pub type ObjectMap = IndexMap<String, Node>;

/// Shared handle to an object node's backing map.
pub type ObjectRef = Rc<RefCell<ObjectMap>>;

/// Shared handle to a sequence node's backing vector.
pub type SequenceRef = Rc<RefCell<Vec<Node>>>;

/// A JSON-shaped value with shared-ownership containers.
///
/// Equality is deep structural equality through the shared handles,
/// independent of pointer identity: two trees with the same content compare
/// equal even when built separately.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Present but null
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value, preserving the JSON representation
    Number(serde_json::Number),
    /// String value
    String(String),
    /// Sequence value (shared)
    Array(SequenceRef),
    /// Object value (shared)
    Object(ObjectRef),
}

impl Node {
    /// Allocate a fresh empty object map.
    pub fn new_object() -> ObjectRef {
        Rc::new(RefCell::new(ObjectMap::new()))
    }

    /// Allocate a fresh empty sequence.
    pub fn new_sequence() -> SequenceRef {
        Rc::new(RefCell::new(Vec::new()))
    }

    /// Build a node tree from a parsed JSON value.
    ///
    /// Accepts any legally-shaped JSON tree; which parser produced the
    /// value is the caller's business.
    pub fn from_json(value: Value) -> Node {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => {
                let seq = items.into_iter().map(Node::from_json).collect();
                Node::Array(Rc::new(RefCell::new(seq)))
            }
            Value::Object(entries) => {
                let map = entries
                    .into_iter()
                    .map(|(k, v)| (k, Node::from_json(v)))
                    .collect();
                Node::Object(Rc::new(RefCell::new(map)))
            }
        }
    }

    /// Render the tree back to a JSON value.
    ///
    /// Mutations made through any view are already in the tree; there is
    /// no flush step.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::String(s) => Value::String(s.clone()),
            Node::Array(seq) => Value::Array(seq.borrow().iter().map(Node::to_json).collect()),
            Node::Object(map) => Value::Object(
                map.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Shared handle to the backing map, if this is an object node.
    pub fn as_object(&self) -> Option<ObjectRef> {
        match self {
            Node::Object(map) => Some(Rc::clone(map)),
            _ => None,
        }
    }

    /// Shared handle to the backing vector, if this is a sequence node.
    pub fn as_sequence(&self) -> Option<SequenceRef> {
        match self {
            Node::Array(seq) => Some(Rc::clone(seq)),
            _ => None,
        }
    }

    /// String slice, if this is a string node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value, if this is a number node representable as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Float value, if this is a number node.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean node.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this node is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The node's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Null
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number(serde_json::Number::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(serde_json::Number::from(value))
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Number(serde_json::Number::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        // Non-finite floats have no JSON representation; store null.
        serde_json::Number::from_f64(value)
            .map(Node::Number)
            .unwrap_or(Node::Null)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from_json(value)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(seq) => serializer.collect_seq(seq.borrow().iter()),
            Node::Object(map) => serializer.collect_map(map.borrow().iter()),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Node::from_json(Value::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    #[test]
    fn test_from_json_preserves_shape() {
        let node = Node::from_json(json!({
            "name": "Eiffel Tower",
            "visits": 7,
            "open": true,
            "location": { "city": "Paris" },
            "tags": ["landmark", null]
        }));
        assert_eq!(node.to_json()["location"]["city"], json!("Paris"));
        assert_eq!(node.to_json()["tags"][1], json!(null));
    }

    #[test]
    fn test_deep_equality_ignores_allocation() {
        let a = Node::from_json(json!({ "city": "Seattle", "zip": 98101 }));
        let b = Node::from_json(json!({ "city": "Seattle", "zip": 98101 }));
        let c = Node::from_json(json!({ "city": "Seattle", "zip": 98052 }));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_shares_containers() {
        let original = Node::from_json(json!({ "hello": "world" }));
        let alias = original.clone();

        if let Node::Object(map) = &original {
            map.borrow_mut().insert("hocus".into(), Node::from("pocus"));
        }
        assert_eq!(alias.to_json()["hocus"], json!("pocus"));
        assert_eq!(original, alias);
    }

    #[test]
    fn test_non_finite_float_stores_null() {
        assert_eq!(Node::from(f64::NAN), Node::Null);
        assert_eq!(Node::from(2.5), Node::from_json(json!(2.5)));
    }

    #[test]
    fn test_serde_round_trip() {
        let node = Node::from_json(json!({ "a": [1, 2], "b": { "c": null } }));
        let text = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&text).unwrap();
        assert_eq!(back, node);
    }

    proptest! {
        #[test]
        fn prop_json_round_trip(value in arb_json()) {
            let node = Node::from_json(value.clone());
            prop_assert_eq!(node.to_json(), value);
        }

        #[test]
        fn prop_deep_equality_is_structural(value in arb_json()) {
            let a = Node::from_json(value.clone());
            let b = Node::from_json(value);
            prop_assert_eq!(a, b);
        }
    }
}
