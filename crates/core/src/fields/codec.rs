use serde_json::Value as Json;

use crate::error::TranslationError;
use crate::sdk::Field;
use crate::value::{Attr, Object, Value};

use super::{FieldBinding, FieldKind};

/// `seriesMetadataUrl` -> `series_metadata_url`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn emit<T>(attr: Attr<T>, to_json: impl FnOnce(T) -> Json) -> Option<Json> {
    attr.into_known().map(to_json)
}

/// Build field entries from typed attributes.
///
/// Only known, non-null attributes are emitted.
pub fn encode_fields(
    bindings: &[FieldBinding],
    typed: &Object,
) -> Result<Vec<Field>, TranslationError> {
    let mut fields = Vec::new();

    for binding in bindings {
        let name = binding.attribute.as_str();
        let value = match binding.kind {
            FieldKind::Bool => emit(typed.boolean(name)?, Json::from),
            FieldKind::Int => emit(typed.int(name)?, Json::from),
            FieldKind::Float => emit(typed.float(name)?, Json::from),
            FieldKind::String => emit(typed.string(name)?, Json::from),
            FieldKind::StringSet => emit(typed.string_set(name)?, |set| {
                Json::Array(set.into_iter().map(Json::from).collect())
            }),
            FieldKind::IntSet => emit(typed.int_set(name)?, |set| {
                Json::Array(set.into_iter().map(Json::from).collect())
            }),
        };

        if let Some(value) = value {
            fields.push(Field::new(binding.field, value));
        }
    }

    Ok(fields)
}

/// Write field entries from a response into typed attributes.
///
/// Null entries, unrecognised names and sensitive fields leave the typed
/// value untouched.
pub fn decode_fields(
    bindings: &[FieldBinding],
    fields: &[Field],
    typed: &mut Object,
) -> Result<(), TranslationError> {
    for field in fields {
        let value = match &field.value {
            None | Some(Json::Null) => continue,
            Some(value) => value,
        };
        let Some(binding) = bindings.iter().find(|b| b.field == field.name) else {
            continue;
        };
        if binding.sensitive {
            continue;
        }

        typed.set(binding.attribute.clone(), coerce(binding, value)?);
    }

    Ok(())
}

fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn type_error(binding: &FieldBinding, json: &Json) -> TranslationError {
    TranslationError::FieldType {
        field: binding.field.to_string(),
        expected: binding.kind.name(),
        found: json_type(json).to_string(),
    }
}

fn truncate(json: &Json) -> Option<i64> {
    let n = json.as_number()?;
    n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
}

fn coerce(binding: &FieldBinding, json: &Json) -> Result<Value, TranslationError> {
    let value = match binding.kind {
        FieldKind::Bool => json.as_bool().map(Value::Bool),
        FieldKind::Int => truncate(json).map(Value::Int),
        FieldKind::Float => json.as_f64().map(Value::Float),
        FieldKind::String => json.as_str().map(Value::from),
        FieldKind::IntSet => match json {
            Json::Array(items) => items
                .iter()
                .map(|item| truncate(item).map(Value::Int))
                .collect::<Option<Vec<_>>>()
                .map(Value::set_of),
            _ => None,
        },
        FieldKind::StringSet => match json {
            Json::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(Value::from))
                .collect::<Option<Vec<_>>>()
                .map(Value::set_of),
            _ => None,
        },
    };

    value.ok_or_else(|| type_error(binding, json))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bindings() -> Vec<FieldBinding> {
        vec![
            FieldBinding::new("host", "host", FieldKind::String),
            FieldBinding::new("port", "port", FieldKind::Int),
            FieldBinding::new("first_and_last", "firstAndLast", FieldKind::Bool),
            FieldBinding::new("seed_ratio", "seedRatio", FieldKind::Float),
            FieldBinding::new("categories", "categories", FieldKind::IntSet),
            FieldBinding::new("field_tags", "fieldTags", FieldKind::StringSet),
            FieldBinding::new("password", "password", FieldKind::String).sensitive(true),
        ]
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("seriesMetadataUrl"), "series_metadata_url");
        assert_eq!(camel_to_snake("useSsl"), "use_ssl");
        assert_eq!(camel_to_snake("cc"), "cc");
        assert_eq!(camel_to_snake("intialState"), "intial_state");
    }

    #[test]
    fn test_encode_omits_null_and_unknown() {
        let typed = Object::new()
            .with("host", "qbittorrent")
            .with("port", Value::Null)
            .with("first_and_last", Value::Unknown)
            .with("categories", Value::set_of([Value::Int(5040), Value::Int(5030)]));

        let fields = encode_fields(&bindings(), &typed).unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new("host", json!("qbittorrent")),
                Field::new("categories", json!([5030, 5040])),
            ]
        );
    }

    #[test]
    fn test_encode_emits_sensitive_values() {
        let typed = Object::new().with("password", "hunter2");
        let fields = encode_fields(&bindings(), &typed).unwrap();
        assert_eq!(fields, vec![Field::new("password", json!("hunter2"))]);
    }

    #[test]
    fn test_encode_type_mismatch_is_translation_error() {
        let typed = Object::new().with("port", "not a port");
        assert!(matches!(
            encode_fields(&bindings(), &typed),
            Err(TranslationError::Value(_))
        ));
    }

    #[test]
    fn test_decode_coerces_values() {
        let fields = vec![
            Field::new("port", json!(9091.0)),
            Field::new("firstAndLast", json!(true)),
            Field::new("seedRatio", json!(1)),
            Field::new("categories", json!([5030, 5040.0, 5030])),
            Field::new("fieldTags", json!(["b", "a"])),
        ];
        let mut typed = Object::new();
        decode_fields(&bindings(), &fields, &mut typed).unwrap();

        assert_eq!(typed.get("port"), &Value::Int(9091));
        assert_eq!(typed.get("first_and_last"), &Value::Bool(true));
        assert_eq!(typed.get("seed_ratio"), &Value::Float(1.0));
        assert_eq!(
            typed.get("categories"),
            &Value::Set(vec![Value::Int(5030), Value::Int(5040)])
        );
        assert_eq!(
            typed.get("field_tags"),
            &Value::Set(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_decode_truncates_toward_zero() {
        let fields = vec![Field::new("port", json!(-2.7))];
        let mut typed = Object::new();
        decode_fields(&bindings(), &fields, &mut typed).unwrap();
        assert_eq!(typed.get("port"), &Value::Int(-2));
    }

    #[test]
    fn test_decode_skips_null_unknown_and_sensitive() {
        let fields = vec![
            Field {
                name: "host".to_string(),
                value: None,
            },
            Field::new("port", Json::Null),
            Field::new("password", json!("********")),
            Field::new("somethingElse", json!(1)),
        ];
        let mut typed = Object::new()
            .with("host", "kept")
            .with("password", "secret");
        decode_fields(&bindings(), &fields, &mut typed).unwrap();

        assert_eq!(typed.get("host"), &Value::from("kept"));
        assert_eq!(typed.get("password"), &Value::from("secret"));
        assert!(typed.get("port").is_null());
        assert!(!typed.contains("something_else"));
    }

    #[test]
    fn test_decode_type_mismatch() {
        let fields = vec![Field::new("firstAndLast", json!("yes"))];
        let err = decode_fields(&bindings(), &fields, &mut Object::new()).unwrap_err();
        assert_eq!(
            err,
            TranslationError::FieldType {
                field: "firstAndLast".to_string(),
                expected: "bool",
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_round_trip_preserves_non_sensitive_values() {
        let typed = Object::new()
            .with("host", "qbittorrent")
            .with("port", 9091_i64)
            .with("first_and_last", true)
            .with("seed_ratio", 1.5)
            .with("categories", Value::set_of([Value::Int(5030), Value::Int(5040)]))
            .with("password", "secret");

        let fields = encode_fields(&bindings(), &typed).unwrap();
        let mut decoded = Object::new();
        decode_fields(&bindings(), &fields, &mut decoded).unwrap();

        for name in ["host", "port", "first_and_last", "seed_ratio", "categories"] {
            assert_eq!(decoded.get(name), typed.get(name), "{}", name);
        }
        assert!(decoded.get("password").is_null());
    }
}
