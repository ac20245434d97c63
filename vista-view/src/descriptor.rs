//! View type descriptors
//!
//! A view type is declared purely as a set of method shapes. The `#[view]`
//! macro compiles each declaration into one static [`ViewDescriptor`]; the
//! validator turns descriptors into dispatch tables at first use. A
//! descriptor is immutable once built and is cached by its address.

use crate::object::GraphObject;

/// Whether a declared method returns a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    /// No return value.
    Void,
    /// Some return value; the descriptor does not record which.
    Value,
}

/// The shape of one declared method.
///
/// `name` uses the declaration convention (`getFirstName`, `setFirstName`,
/// or a generic map operation such as `containsKey`); the arity excludes
/// the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSig {
    /// Declaration-convention method name.
    pub name: &'static str,
    /// Number of parameters.
    pub params: usize,
    /// Return shape.
    pub returns: Returns,
}

/// A capability declaration: the method shapes of one view type plus the
/// view types it extends.
///
/// `extends` holds accessor functions rather than references so generated
/// descriptors can point at each other from static initializers.
#[derive(Debug)]
pub struct ViewDescriptor {
    /// Name of the view type, for diagnostics.
    pub name: &'static str,
    /// Descriptors of the extended view types.
    pub extends: &'static [fn() -> &'static ViewDescriptor],
    /// Declared method shapes, excluding inherited ones.
    pub methods: &'static [MethodSig],
}

/// The root capability: the empty marker every view extends. It is
/// implicitly valid and contributes no methods.
pub static ROOT: ViewDescriptor = ViewDescriptor {
    name: "GraphObject",
    extends: &[],
    methods: &[],
};

/// The structural contract every view adapter implements.
///
/// Adapters are produced by the engine through `wrap`/`create`/`cast`,
/// which validate the descriptor first; `from_object` exists for the
/// engine and generated code and performs no validation of its own.
pub trait ViewType: Sized {
    /// The static descriptor for this view type.
    fn descriptor() -> &'static ViewDescriptor;

    /// Build an adapter over an already-wrapped object.
    fn from_object(object: GraphObject) -> Self;

    /// The untyped map view this adapter dispatches through.
    fn object(&self) -> &GraphObject;
}
