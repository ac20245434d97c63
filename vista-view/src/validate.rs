//! Interface contract validation
//!
//! Given a view descriptor, the validator flattens its hierarchy and
//! classifies every method as a generic-map pass-through, a typed getter,
//! or a typed setter, rejecting anything else with a
//! [`VistaError::ContractViolation`] naming the offending method. Results
//! are cached process-wide keyed by descriptor address, so repeated wraps
//! of the same view type are a lookup, and a rejected type re-raises the
//! same violation deterministically.

use std::sync::{Arc, Mutex, PoisonError};

use ahash::AHashMap;
use once_cell::sync::Lazy;
use smallvec::SmallVec;
use tracing::{debug, trace};

use vista_tree::error::{ContractReason, Result, VistaError};
use vista_tree::key::property_to_key;

use crate::descriptor::{MethodSig, Returns, ViewDescriptor};

/// How one validated method dispatches against the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    /// A generic map operation, applied to the backing map directly.
    MapPassThrough,
    /// A typed getter reading `key` through the read-wrap transform.
    Getter {
        /// Camel-case property suffix, as declared.
        property: &'static str,
        /// Translated store key.
        key: String,
    },
    /// A typed setter writing `key` through the write-unwrap transform.
    Setter {
        /// Camel-case property suffix, as declared.
        property: &'static str,
        /// Translated store key.
        key: String,
    },
}

/// The flattened method dispatch table of a validated view type.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    methods: AHashMap<&'static str, MethodKind>,
}

impl DispatchTable {
    /// Look up a method by its declaration-convention name.
    pub fn get(&self, method: &str) -> Option<&MethodKind> {
        self.methods.get(method)
    }

    /// Number of distinct methods across the flattened hierarchy.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the view declares no methods at all.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Iterate over the classified methods.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MethodKind)> {
        self.methods.iter().map(|(name, kind)| (*name, kind))
    }
}

static CACHE: Lazy<Mutex<AHashMap<usize, Result<Arc<DispatchTable>>>>> =
    Lazy::new(|| Mutex::new(AHashMap::new()));

/// Validate a view descriptor, returning its dispatch table.
///
/// Validation recurses into every extended descriptor; a rejection
/// anywhere in the hierarchy rejects the whole type. Both outcomes are
/// cached; population is idempotent since results are deterministic.
pub fn validate(descriptor: &'static ViewDescriptor) -> Result<Arc<DispatchTable>> {
    let key = descriptor as *const ViewDescriptor as usize;
    let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(result) = cache.get(&key) {
        trace!(view = descriptor.name, "validator cache hit");
        return result.clone();
    }

    let result = build_table(descriptor).map(Arc::new);
    match &result {
        Ok(table) => debug!(
            view = descriptor.name,
            methods = table.len(),
            "validated view type"
        ),
        Err(error) => debug!(view = descriptor.name, %error, "rejected view type"),
    }
    cache.insert(key, result.clone());
    result
}

fn build_table(descriptor: &'static ViewDescriptor) -> Result<DispatchTable> {
    let mut methods = AHashMap::new();
    let mut visited: SmallVec<[*const ViewDescriptor; 8]> = SmallVec::new();
    collect(descriptor, &mut visited, &mut methods)?;
    Ok(DispatchTable { methods })
}

fn collect(
    descriptor: &'static ViewDescriptor,
    visited: &mut SmallVec<[*const ViewDescriptor; 8]>,
    out: &mut AHashMap<&'static str, MethodKind>,
) -> Result<()> {
    let ptr = descriptor as *const ViewDescriptor;
    if visited.contains(&ptr) {
        return Ok(());
    }
    visited.push(ptr);

    for parent in descriptor.extends {
        collect(parent(), visited, out)?;
    }
    for sig in descriptor.methods {
        // Duplicates across the hierarchy merge; the nearest declaration wins.
        out.insert(sig.name, classify(descriptor.name, sig)?);
    }
    Ok(())
}

/// Shapes of the generic map contract, by declaration-convention name.
fn map_contract_shape(name: &str) -> Option<(usize, Returns)> {
    Some(match name {
        "get" | "remove" | "containsKey" | "containsValue" => (1, Returns::Value),
        "put" => (2, Returns::Value),
        "putAll" => (1, Returns::Void),
        "size" | "isEmpty" | "keySet" | "entrySet" | "values" => (0, Returns::Value),
        "clear" => (0, Returns::Void),
        _ => return None,
    })
}

fn classify(view: &'static str, sig: &MethodSig) -> Result<MethodKind> {
    if let Some((params, returns)) = map_contract_shape(sig.name) {
        if sig.params == params && sig.returns == returns {
            return Ok(MethodKind::MapPassThrough);
        }
        // A map-operation name with the wrong shape falls through to the
        // accessor rules, which reject it.
    }

    if let Some(property) = sig.name.strip_prefix("get") {
        if property.is_empty() {
            return Err(violation(view, sig, ContractReason::BadName));
        }
        if sig.params != 0 {
            return Err(violation(view, sig, ContractReason::BadArity));
        }
        if sig.returns == Returns::Void {
            return Err(violation(view, sig, ContractReason::BadReturnType));
        }
        return Ok(MethodKind::Getter {
            property,
            key: property_to_key(property),
        });
    }

    if let Some(property) = sig.name.strip_prefix("set") {
        if property.is_empty() {
            return Err(violation(view, sig, ContractReason::BadName));
        }
        if sig.params != 1 {
            return Err(violation(view, sig, ContractReason::BadArity));
        }
        if sig.returns != Returns::Void {
            return Err(violation(view, sig, ContractReason::BadReturnType));
        }
        return Ok(MethodKind::Setter {
            property,
            key: property_to_key(property),
        });
    }

    Err(violation(view, sig, ContractReason::BadName))
}

fn violation(view: &'static str, sig: &MethodSig, reason: ContractReason) -> VistaError {
    VistaError::ContractViolation {
        view,
        method: sig.name,
        reason,
    }
}
