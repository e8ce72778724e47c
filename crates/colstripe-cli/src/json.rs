//! Schema-guided interpretation of JSON values as records.
//!
//! This is record construction, which the core deliberately does not do:
//! the splitter consumes an already-typed record tree. Here we map plain
//! JSON onto that tree using the schema to decide shapes — JSON objects
//! become groups, arrays become repeated lists, `null` and missing keys
//! mean absent. Required-presence and scalar-kind agreement are *not*
//! enforced here; the splitter reports those as violations.

use colstripe_core::schema::join_path;
use colstripe_core::{Cardinality, Field, FieldKind, Record, Scalar, ScalarKind, Schema, Value};
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("unknown field `{path}`")]
    UnknownField { path: String },

    #[error("cannot read `{path}`: expected {expected}, got {got}")]
    UnexpectedValue {
        path: String,
        expected: String,
        got: &'static str,
    },
}

/// Interpret one JSON object as a record of `schema`.
pub fn record_from_json(schema: &Schema, json: &Json) -> Result<Record, JsonError> {
    group_from_json(schema.fields(), "", json)
}

fn group_from_json(fields: &[Field], parent_path: &str, json: &Json) -> Result<Record, JsonError> {
    let Json::Object(object) = json else {
        return Err(unexpected(parent_path, "object", json));
    };

    for key in object.keys() {
        if !fields.iter().any(|f| &f.name == key) {
            return Err(JsonError::UnknownField {
                path: join_path(parent_path, key),
            });
        }
    }

    let mut record = Record::new();
    for field in fields {
        let path = join_path(parent_path, &field.name);
        match object.get(&field.name) {
            None | Some(Json::Null) => {}
            Some(json) => {
                let value = value_from_json(field, &path, json)?;
                record.set(field.name.clone(), value);
            }
        }
    }
    Ok(record)
}

fn value_from_json(field: &Field, path: &str, json: &Json) -> Result<Value, JsonError> {
    if field.cardinality == Cardinality::Repeated {
        let Json::Array(elements) = json else {
            return Err(unexpected(path, "array", json));
        };
        let values = elements
            .iter()
            .map(|element| singular_from_json(field, path, element))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::List(values));
    }
    singular_from_json(field, path, json)
}

fn singular_from_json(field: &Field, path: &str, json: &Json) -> Result<Value, JsonError> {
    match &field.kind {
        FieldKind::Group(children) => Ok(Value::Group(group_from_json(children, path, json)?)),
        FieldKind::Leaf(kind) => Ok(Value::Scalar(scalar_from_json(*kind, path, json)?)),
    }
}

fn scalar_from_json(kind: ScalarKind, path: &str, json: &Json) -> Result<Scalar, JsonError> {
    let scalar = match (kind, json) {
        (ScalarKind::Boolean, Json::Bool(v)) => Scalar::Bool(*v),
        (ScalarKind::Int32, Json::Number(n)) => match n.as_i64().and_then(|v| i32::try_from(v).ok())
        {
            Some(v) => Scalar::I32(v),
            None => return Err(unexpected(path, "int32", json)),
        },
        (ScalarKind::Int64, Json::Number(n)) => match n.as_i64() {
            Some(v) => Scalar::I64(v),
            None => return Err(unexpected(path, "int64", json)),
        },
        (ScalarKind::Float32, Json::Number(n)) => match n.as_f64() {
            Some(v) => Scalar::F32(v as f32),
            None => return Err(unexpected(path, "float32", json)),
        },
        (ScalarKind::Float64, Json::Number(n)) => match n.as_f64() {
            Some(v) => Scalar::F64(v),
            None => return Err(unexpected(path, "float64", json)),
        },
        (ScalarKind::Utf8, Json::String(v)) => Scalar::Str(v.clone()),
        (ScalarKind::Binary, Json::String(v)) => Scalar::Bytes(v.as_bytes().to_vec()),
        (kind, other) => return Err(unexpected(path, &kind.to_string(), other)),
    };
    Ok(scalar)
}

fn unexpected(path: &str, expected: &str, got: &Json) -> JsonError {
    let got = match got {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    };
    JsonError::UnexpectedValue {
        path: path.to_string(),
        expected: expected.to_string(),
        got,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colstripe_core::Cardinality;
    use serde_json::json;

    fn links_schema() -> Schema {
        Schema::new(Field::group(
            "Document",
            Cardinality::Required,
            vec![
                Field::leaf("DocId", Cardinality::Required, ScalarKind::Int64),
                Field::group(
                    "Links",
                    Cardinality::Optional,
                    vec![
                        Field::leaf("Backward", Cardinality::Repeated, ScalarKind::Int64),
                        Field::leaf("Forward", Cardinality::Repeated, ScalarKind::Int64),
                    ],
                ),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn builds_nested_record_from_json() {
        let schema = links_schema();
        let json = json!({"DocId": 10, "Links": {"Forward": [20, 40, 60]}});
        let record = record_from_json(&schema, &json).unwrap();
        assert_eq!(record.get("DocId"), Some(&Value::Scalar(Scalar::I64(10))));
        let Some(Value::Group(links)) = record.get("Links") else {
            panic!("Links should be a group");
        };
        assert_eq!(
            links.get("Forward"),
            Some(&Value::List(vec![
                Value::Scalar(Scalar::I64(20)),
                Value::Scalar(Scalar::I64(40)),
                Value::Scalar(Scalar::I64(60)),
            ]))
        );
        assert!(!links.has("Backward"));
    }

    #[test]
    fn null_and_missing_mean_absent() {
        let schema = links_schema();
        let json = json!({"DocId": 10, "Links": null});
        let record = record_from_json(&schema, &json).unwrap();
        assert!(!record.has("Links"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let schema = links_schema();
        let json = json!({"DocId": 10, "Tipo": 1});
        match record_from_json(&schema, &json) {
            Err(JsonError::UnknownField { path }) => assert_eq!(path, "Tipo"),
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_scalar_where_array_expected() {
        let schema = links_schema();
        let json = json!({"DocId": 10, "Links": {"Forward": 20}});
        match record_from_json(&schema, &json) {
            Err(JsonError::UnexpectedValue { path, .. }) => assert_eq!(path, "Links.Forward"),
            other => panic!("expected unexpected value error, got {other:?}"),
        }
    }
}
