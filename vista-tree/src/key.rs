//! Property suffix / store key translation
//!
//! A typed accessor suffix such as `FirstName` maps to the store key
//! `first_name`: the suffix splits at each uppercase letter, each segment is
//! lowercased, and the segments join with underscores. The translation is
//! deterministic and invertible for keys made of lowercase ASCII segments,
//! so re-wrapping round-trips the same key.

/// Translate a camel-case property suffix to its store key.
///
/// `FirstName` becomes `first_name`; an all-caps run splits per letter, so
/// `URL` becomes `u_r_l`.
pub fn property_to_key(property: &str) -> String {
    let mut key = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            if !key.is_empty() {
                key.push('_');
            }
            key.push(ch.to_ascii_lowercase());
        } else {
            key.push(ch);
        }
    }
    key
}

/// Translate a snake-case store key back to its property suffix.
///
/// `first_name` becomes `FirstName`.
pub fn key_to_property(key: &str) -> String {
    let mut property = String::with_capacity(key.len());
    let mut upper_next = true;
    for ch in key.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            property.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            property.push(ch);
        }
    }
    property
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_property_to_key() {
        assert_eq!(property_to_key("FirstName"), "first_name");
        assert_eq!(property_to_key("Name"), "name");
        assert_eq!(property_to_key("City"), "city");
        assert_eq!(property_to_key("ZipCode"), "zip_code");
        // Each uppercase letter starts a segment
        assert_eq!(property_to_key("URL"), "u_r_l");
        assert_eq!(property_to_key(""), "");
    }

    #[test]
    fn test_key_to_property() {
        assert_eq!(key_to_property("first_name"), "FirstName");
        assert_eq!(key_to_property("name"), "Name");
        assert_eq!(key_to_property("zip_code"), "ZipCode");
        assert_eq!(key_to_property(""), "");
    }

    #[test]
    fn test_round_trip_examples() {
        for key in ["first_name", "last_name", "location", "zip_code"] {
            assert_eq!(property_to_key(&key_to_property(key)), key);
        }
        for property in ["FirstName", "LastName", "Location"] {
            assert_eq!(key_to_property(&property_to_key(property)), property);
        }
    }

    proptest! {
        #[test]
        fn prop_key_round_trip(key in "[a-z]{1,6}(_[a-z]{1,6}){0,3}") {
            prop_assert_eq!(property_to_key(&key_to_property(&key)), key);
        }

        #[test]
        fn prop_property_round_trip(property in "([A-Z][a-z]{0,5}){1,4}") {
            prop_assert_eq!(key_to_property(&property_to_key(&property)), property);
        }
    }
}
