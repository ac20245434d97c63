//! Shared utilities for Vista procedural macros.

/// Convert a snake_case method ident to the declaration-convention camel
/// form recorded in descriptors.
///
/// Examples:
/// - `get_first_name` -> `getFirstName`
/// - `set_location` -> `setLocation`
/// - `floppity_flee` -> `floppityFlee`
pub(crate) fn to_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Split a camel-form method name into its accessor prefix and property
/// suffix, if it has one. `getFirstName` -> `("get", "FirstName")`.
pub(crate) fn accessor_parts(name: &str) -> Option<(&'static str, &str)> {
    for prefix in ["get", "set"] {
        if let Some(suffix) = name.strip_prefix(prefix) {
            if suffix.starts_with(char::is_uppercase) {
                return Some((prefix, suffix));
            }
        }
    }
    None
}
