//! Vista View - Typed live views over untyped JSON trees
//!
//! This crate provides the view engine:
//!
//! - Capability descriptors and the interface contract validator
//! - The map view proxy (`GraphObject`) and list view proxy (`GraphList`)
//! - The shared read-wrap/write-unwrap transform
//! - The casting facade: reinterpreting a view under another type over the
//!   same backing node
//!
//! Declare a view with the `#[view]` attribute, then produce instances
//! through `GraphObject::wrap`/`create`/`cast`:
//!
//! ```ignore
//! use vista_view::{view, GraphObject};
//!
//! #[view]
//! pub trait GraphUser {
//!     fn get_first_name(&self) -> Option<String>;
//!     fn set_first_name(&self, value: String);
//! }
//!
//! let user: GraphUser = GraphObject::create()?;
//! user.set_first_name("Michael".to_string());
//! assert_eq!(user.get_first_name().as_deref(), Some("Michael"));
//! ```
//!
//! The core is single-threaded and synchronous: nodes are `Rc`-based and
//! views are not `Send`. Callers sharing a tree across threads must
//! synchronize externally.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod descriptor;
pub mod element;
pub mod list;
pub mod object;
pub mod validate;

// Re-export the tree primitives so users depend on one crate
pub use vista_tree::{
    coerce_lossy, coerce_strict, key_to_property, property_to_key, ContractReason, Node,
    ObjectMap, ObjectRef, Primitive, Result, SequenceRef, VistaError,
};

// Re-export our own types
pub use descriptor::{MethodSig, Returns, ViewDescriptor, ViewType, ROOT};
pub use element::{Element, ElementKind, PropertyValue};
pub use list::{GraphList, Iter};
pub use object::GraphObject;
pub use validate::{validate, DispatchTable, MethodKind};

// The capability declaration macro
pub use vista_macros::view;
