//! Map view behavior over shared backing nodes.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::json;
use vista_view::{view, GraphList, GraphObject, Node};

#[view]
pub trait GraphLocation {
    fn get_city(&self) -> Option<String>;
    fn set_city(&self, value: String);
    fn get_country(&self) -> Option<String>;
    fn set_country(&self, value: String);
    fn get_zip_code(&self) -> Option<String>;
    fn set_zip_code(&self, value: String);
}

#[view]
pub trait GraphPlace {
    fn get_name(&self) -> Option<String>;
    fn set_name(&self, value: String);
    fn get_location(&self) -> Option<GraphLocation>;
    fn set_location(&self, value: GraphLocation);
}

#[view]
pub trait GraphUser {
    fn get_first_name(&self) -> Option<String>;
    fn set_first_name(&self, value: String);
    fn get_last_name(&self) -> Option<String>;
    fn set_last_name(&self, value: String);
}

#[view]
pub trait Locations {
    fn get_locations(&self) -> Option<GraphList<GraphLocation>>;
}

#[test]
fn create_empty_object() {
    let object = GraphObject::new();
    assert!(object.is_empty());
}

#[test]
fn treat_view_as_map() {
    let object = GraphObject::new();
    object.insert("hello", "world");
    assert_eq!(object.get("hello"), Some(Node::from("world")));
}

#[test]
fn typed_accessors_round_trip() {
    let place: GraphPlace = GraphObject::create().unwrap();
    place.set_name("hello".to_string());
    assert_eq!(place.get_name(), Some("hello".to_string()));
}

#[test]
fn typed_accessors_translate_keys() {
    let user: GraphUser = GraphObject::create().unwrap();

    user.set_first_name("Michael".to_string());
    assert_eq!(user.get_first_name(), Some("Michael".to_string()));
    assert_eq!(user.get("first_name"), Some(Node::from("Michael")));

    user.insert("last_name", "Scott");
    assert_eq!(user.get("last_name"), Some(Node::from("Scott")));
    assert_eq!(user.get_last_name(), Some("Scott".to_string()));
}

#[test]
fn cast_shares_the_backing_node() {
    let object = GraphObject::new();
    object.insert("first_name", "Mickey");

    let user: GraphUser = object.cast().unwrap();
    // Sees the value set through the untyped view
    assert_eq!(user.get_first_name(), Some("Mickey".to_string()));

    // Changes through the typed view are visible through the untyped one
    user.set_last_name("Mouse".to_string());
    assert_eq!(object.get("last_name"), Some(Node::from("Mouse")));
}

#[test]
fn wrap_never_mutates_the_node() {
    let payload = json!({ "name": "Eiffel Tower", "location": { "city": "Paris" } });
    let object = GraphObject::from_json(payload.clone()).unwrap();
    let _place: GraphPlace = object.cast().unwrap();
    assert_eq!(object.to_json(), payload);
}

#[test]
fn nested_views_share_state() {
    let location: GraphLocation = GraphObject::create().unwrap();
    location.set_city("Seattle".to_string());

    let place: GraphPlace = GraphObject::create().unwrap();
    place.set_location(location.clone());

    assert_eq!(place.get_location().unwrap(), location);
    assert_eq!(
        place.get_location().unwrap().get_city(),
        Some("Seattle".to_string())
    );

    // Every nested read constructs a fresh adapter over the same node
    place
        .get_location()
        .unwrap()
        .set_country("United States".to_string());
    assert_eq!(
        location.get_country(),
        Some("United States".to_string())
    );
}

#[test]
fn wraps_parsed_json() {
    let place = GraphObject::from_json(json!({
        "location": { "city": "Paris", "country": "France" },
        "name": "Eiffel Tower"
    }))
    .unwrap();

    let place: GraphPlace = place.cast().unwrap();
    assert_eq!(
        place.get_location().unwrap().get_city(),
        Some("Paris".to_string())
    );
}

#[test]
fn stored_views_become_plain_nodes() {
    let object = GraphObject::new();
    object.insert("city", "Paris");
    object.insert("country", "France");

    let parent = GraphObject::new();
    parent.insert("location", object.clone());
    parent.insert("name", "Eiffel Tower");

    let place: GraphPlace = parent.cast().unwrap();
    assert_eq!(
        place.get_location().unwrap().get_city(),
        Some("Paris".to_string())
    );

    // The stored value is the backing node itself, not a copy
    let stored = parent.get("location").unwrap().as_object().unwrap();
    assert!(Rc::ptr_eq(&stored, object.inner()));
}

#[test]
fn setting_a_view_property_stores_its_backing_node() {
    let place: GraphPlace = GraphObject::create().unwrap();
    let location: GraphLocation = GraphObject::create().unwrap();

    place.set_location(location.clone());

    let stored = place.get("location").unwrap().as_object().unwrap();
    assert!(Rc::ptr_eq(&stored, location.inner()));
}

#[test]
fn equality_spans_view_types() {
    let object = GraphObject::new();
    object.insert("aKey", "aValue");

    assert_eq!(object, object.clone());

    let place: GraphPlace = object.cast().unwrap();
    assert!(place == object);
    assert!(object == place);

    let different = GraphObject::new();
    different.insert("aKey", "aDifferentValue");
    assert_ne!(object, different);
}

#[test]
fn equality_is_content_based_across_allocations() {
    let a: GraphUser = GraphObject::create().unwrap();
    a.set_first_name("Michael".to_string());
    let b: GraphUser = GraphObject::create().unwrap();
    b.set_first_name("Michael".to_string());
    assert_eq!(a, b);

    b.set_last_name("Scott".to_string());
    assert_ne!(a, b);
}

#[test]
fn absent_properties_read_as_none() {
    let user: GraphUser = GraphObject::create().unwrap();
    assert_eq!(user.get_first_name(), None);

    user.insert("first_name", Node::Null);
    assert_eq!(user.get_first_name(), None);
}

#[test]
fn mismatched_primitive_reads_degrade() {
    let user: GraphUser = GraphObject::create().unwrap();
    user.insert("first_name", 41);
    // The forgiving policy: a wrong-shaped primitive reads as the zero value
    assert_eq!(user.get_first_name(), Some(String::new()));
}

#[test]
fn object_wraps_json_collection_property() {
    let locations: Locations = GraphObject::from_json(json!({
        "locations": [{ "city": "Seattle" }]
    }))
    .unwrap()
    .cast()
    .unwrap();

    let list = locations.get_locations().unwrap();
    let first = list.iter().next().unwrap();
    assert_eq!(first.get_city(), Some("Seattle".to_string()));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn typed_writes_land_on_translated_keys(value in "[a-zA-Z ]{0,12}") {
            let user: GraphUser = GraphObject::create().unwrap();
            user.set_first_name(value.clone());
            prop_assert_eq!(user.get("first_name"), Some(Node::from(value.clone())));
            prop_assert_eq!(user.get_first_name(), Some(value));
        }

        #[test]
        fn cast_views_stay_deep_equal_under_mutation(
            first in "[a-z]{1,8}",
            last in "[a-z]{1,8}",
        ) {
            let object = GraphObject::new();
            let user: GraphUser = object.cast().unwrap();
            user.set_first_name(first.clone());
            user.set_last_name(last.clone());
            prop_assert_eq!(object.get("first_name"), Some(Node::from(first)));
            prop_assert_eq!(object.get("last_name"), Some(Node::from(last)));
            prop_assert!(user == object);
        }
    }
}

#[test]
fn egress_reflects_all_view_mutations() {
    let place: GraphPlace = GraphObject::create().unwrap();
    place.set_name("Space Needle".to_string());

    let location: GraphLocation = GraphObject::create().unwrap();
    location.set_city("Seattle".to_string());
    place.set_location(location.clone());

    // Mutate after storing; no flush step exists
    location.set_zip_code("98109".to_string());

    assert_eq!(
        place.to_json(),
        json!({
            "name": "Space Needle",
            "location": { "city": "Seattle", "zip_code": "98109" }
        })
    );
}
