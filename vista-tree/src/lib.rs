//! Vista Tree - Primitives for typed views over untyped JSON trees
//!
//! This crate provides the fundamental value model and contracts for Vista
//! with no engine dependencies. It includes:
//!
//! - The untyped `Node` store with shared-ownership containers
//! - serde_json ingress/egress
//! - The camel-case/snake-case key translation contract
//! - The pinned primitive coercion policy
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod coerce;
pub mod error;
pub mod key;
pub mod node;

// Re-export commonly used types
pub use coerce::{coerce_lossy, coerce_strict, Primitive};
pub use error::{ContractReason, Result, VistaError};
pub use key::{key_to_property, property_to_key};
pub use node::{Node, ObjectMap, ObjectRef, SequenceRef};
