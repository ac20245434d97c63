//! Procedural macros for Vista view types.
//!
//! This crate provides the `#[view]` attribute macro, which turns a
//! trait-shaped capability declaration into a concrete adapter type backed
//! by a shared untyped store.

extern crate proc_macro;

use proc_macro::TokenStream;

mod common;
mod view;

/// Generate a concrete view adapter from a capability declaration.
///
/// The declaration is a trait whose methods describe the view's shape; no
/// bodies are allowed. The macro replaces the trait with a struct of the
/// same name wrapping a `GraphObject`, and implements the `ViewType`
/// structural contract for it:
///
/// ```ignore
/// use vista_view::view;
///
/// #[view]
/// pub trait GraphUser {
///     fn get_first_name(&self) -> Option<String>;
///     fn set_first_name(&self, value: String);
/// }
///
/// let user: GraphUser = vista_view::GraphObject::create()?;
/// user.set_first_name("Michael".to_string());
/// assert_eq!(user.get("first_name"), Some("Michael".into()));
/// ```
///
/// # Method shapes
///
/// A method named `get_x` with no parameters and a non-unit return type is
/// a typed getter for property `x`; `set_x` with one parameter and a unit
/// return is the matching setter. Property names translate to store keys by
/// the camel/snake contract, so `get_first_name` reads key `first_name`.
/// Supertraits name other view types whose methods are inherited.
///
/// Every declared method, well-formed or not, enters the view's static
/// descriptor. Shape validation happens at the first `wrap`/`create`/`cast`
/// for the type and rejects the whole declaration if any method (including
/// inherited ones) has a bad name, arity, or return type.
///
/// # Generated surface
///
/// Besides the accessors, the adapter gets `Deref` to `GraphObject` (the
/// generic map contract), `Element` (usable as a list element and as a
/// settable property value), `From<V> for Node` (storing a view stores its
/// backing node), `Clone` (aliasing the same node), `Debug`, and
/// `PartialEq` by deep structural equality of the backing node.
#[proc_macro_attribute]
pub fn view(attr: TokenStream, item: TokenStream) -> TokenStream {
    view::view_impl(attr, item)
}
