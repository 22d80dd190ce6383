// SPDX-License-Identifier: Apache-2.0

//! Stored-document to response-JSON conversion. Object ids become hex strings
//! and datetimes become RFC-3339 strings; everything else maps structurally.

use bson::{Bson, Document};
use serde_json::{Map, Number, Value};

#[must_use]
pub fn doc_to_json(doc: &Document) -> Value {
    let mut out = Map::with_capacity(doc.len());
    for (key, value) in doc {
        out.insert(key.clone(), bson_to_json(value));
    }
    Value::Object(out)
}

#[must_use]
pub fn docs_to_json(docs: &[Document]) -> Value {
    Value::Array(docs.iter().map(doc_to_json).collect())
}

#[must_use]
pub fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map_or(Value::Null, Value::String),
        Bson::String(s) => Value::String(s.clone()),
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(n) => Value::Number((*n).into()),
        Bson::Int64(n) => Value::Number((*n).into()),
        Bson::Double(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::Document(doc) => doc_to_json(doc),
        Bson::Null => Value::Null,
        other => other.clone().into_relaxed_extjson(),
    }
}
