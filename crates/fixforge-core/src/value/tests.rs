use crate::{
    fields,
    value::{Fields, Value},
};
use serde_json::json;

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn from_conversions_cover_scalars() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42i32), Value::Int(42));
    assert_eq!(Value::from(42i64), Value::Int(42));
    assert_eq!(Value::from(42u32), Value::Uint(42));
    assert_eq!(Value::from(1.5f64), Value::Float(1.5));
    assert_eq!(Value::from("abc"), v_txt("abc"));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(3i64)), Value::Int(3));
}

#[test]
fn list_builder_converts_items() {
    let value = Value::list([1i64, 2, 3]);

    assert_eq!(
        value,
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn at_descends_through_nested_objects() {
    let entity = Value::Object(fields! {
        "friend" => fields! {
            "friend" => fields! { "username" => "deep" },
        },
    });

    assert_eq!(entity.at("friend.friend.username"), Some(&v_txt("deep")));
    assert_eq!(entity.at("friend.missing"), None);
    assert_eq!(entity.at("friend.friend.username.extra"), None);
}

#[test]
fn object_mut_preserves_existing_object_fields() {
    let mut entity = fields! { "friend" => fields! { "age" => 30 } };
    entity.object_mut("friend").insert("username", v_txt("a"));

    let friend = entity.get("friend").and_then(Value::as_object).unwrap();
    assert_eq!(friend.get("age"), Some(&Value::Int(30)));
    assert_eq!(friend.get("username"), Some(&v_txt("a")));
}

#[test]
fn object_mut_replaces_non_object_values() {
    let mut entity = fields! { "friend" => 1 };
    entity.object_mut("friend").insert("age", Value::Int(30));

    assert_eq!(
        Value::Object(entity).at("friend.age"),
        Some(&Value::Int(30))
    );
}

#[test]
fn fields_macro_builds_nested_objects() {
    let entity = fields! {
        "username" => "x",
        "friend" => fields! { "age" => 30 },
    };

    assert!(matches!(entity.get("friend"), Some(Value::Object(_))));
    assert_eq!(entity.len(), 2);
}

#[test]
fn serializes_as_transparent_json_shape() {
    let entity = Value::Object(fields! {
        "username" => "x",
        "age" => 30,
        "tags" => Value::list(["a", "b"]),
        "friend" => fields! { "active" => true },
        "note" => Value::Null,
    });

    assert_eq!(
        serde_json::to_value(&entity).unwrap(),
        json!({
            "username": "x",
            "age": 30,
            "tags": ["a", "b"],
            "friend": { "active": true },
            "note": null,
        })
    );
}

#[test]
fn fields_alias_roundtrips_through_value() {
    let fields: Fields = [("a".to_string(), Value::Int(1))].into_iter().collect();
    let value = Value::from(fields.clone());

    assert_eq!(value.as_object(), Some(&fields));
}
