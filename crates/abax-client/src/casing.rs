//! Field-name casing helpers.
//!
//! The ABAX API mostly speaks snake_case while the public models use
//! camelCase. The typed models handle this with serde attributes; these
//! helpers cover untyped `serde_json::Value` payloads.

use serde_json::{Map, Value};

/// `trip_ids` -> `tripIds`.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}

/// `tripIds` -> `trip_ids`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for ch in name.chars() {
        if ch.is_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Recursively rename every object key to camelCase.
pub fn camelize_keys(value: Value) -> Value {
    rename_keys(value, &to_camel_case)
}

/// Recursively rename every object key to snake_case.
pub fn snakeize_keys(value: Value) -> Value {
    rename_keys(value, &to_snake_case)
}

fn rename_keys(value: Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (rename(&key), rename_keys(value, rename)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|value| rename_keys(value, rename))
                .collect(),
        ),
        other => other,
    }
}
