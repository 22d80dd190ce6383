// SPDX-License-Identifier: Apache-2.0

//! In-memory store for tests. Implements exactly the filter surface the
//! handlers emit: top-level equality (with Mongo's any-array-element
//! semantics), `$regex` with `$options: "i"` as a literal substring, `$or`,
//! and multi-key descending sort.

use crate::store::{stamp_new, stamp_update, RecordStore};
use crate::StoreError;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<ObjectId, StoreError> {
        let (id, doc) = stamp_new(doc);
        let mut collections = self.collections.lock().await;
        collections.entry(collection.to_string()).or_default().push(doc);
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let mut out: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(sort) = sort {
            sort_documents(&mut out, &sort);
        }
        Ok(out)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches_filter(doc, &filter)))
            .cloned())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        self.find_one(collection, doc! {"_id": id}).await
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        set: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.lock().await;
        let Some(existing) = collections
            .get_mut(collection)
            .and_then(|docs| {
                docs.iter_mut()
                    .find(|doc| doc.get_object_id("_id").ok() == Some(id))
            })
        else {
            return Ok(None);
        };
        for (key, value) in stamp_update(set) {
            existing.insert(key, value);
        }
        Ok(Some(existing.clone()))
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<Document, StoreError> {
        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if let Some(existing) = docs.iter_mut().find(|doc| matches_filter(doc, &filter)) {
            for (key, value) in stamp_update(set) {
                existing.insert(key, value);
            }
            return Ok(existing.clone());
        }
        let (_, doc) = stamp_new(set);
        docs.push(doc.clone());
        Ok(doc)
    }
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| {
        if key == "$or" {
            match expected {
                Bson::Array(alternatives) => alternatives.iter().any(|alt| {
                    matches!(alt, Bson::Document(sub) if matches_filter(doc, sub))
                }),
                _ => false,
            }
        } else {
            field_matches(doc.get(key), expected)
        }
    })
}

fn field_matches(value: Option<&Bson>, expected: &Bson) -> bool {
    if let Bson::Document(cond) = expected {
        if let Ok(pattern) = cond.get_str("$regex") {
            let ci = cond
                .get_str("$options")
                .map(|options| options.contains('i'))
                .unwrap_or(false);
            return substring_matches(value, &literal_of(pattern), ci);
        }
    }
    match value {
        // Mongo equality against an array field matches any element.
        Some(Bson::Array(items)) if !matches!(expected, Bson::Array(_)) => {
            items.iter().any(|item| item == expected)
        }
        Some(v) => v == expected,
        None => matches!(expected, Bson::Null),
    }
}

fn substring_matches(value: Option<&Bson>, needle: &str, ci: bool) -> bool {
    match value {
        Some(Bson::String(s)) => contains(s, needle, ci),
        Some(Bson::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Bson::String(s) if contains(s, needle, ci))),
        _ => false,
    }
}

fn contains(haystack: &str, needle: &str, ci: bool) -> bool {
    if ci {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}

// Filters arrive with terms escaped to literals; undo the escaping before
// substring comparison.
fn literal_of(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn sort_documents(docs: &mut [Document], sort: &Document) {
    docs.sort_by(|a, b| {
        for (key, direction) in sort {
            let mut ord = bson_cmp(a.get(key), b.get(key));
            if direction_is_desc(direction) {
                ord = ord.reverse();
            }
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn direction_is_desc(direction: &Bson) -> bool {
    match direction {
        Bson::Int32(n) => *n < 0,
        Bson::Int64(n) => *n < 0,
        Bson::Double(n) => *n < 0.0,
        _ => false,
    }
}

fn bson_cmp(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x, y) {
            (Bson::DateTime(p), Bson::DateTime(q)) => {
                p.timestamp_millis().cmp(&q.timestamp_millis())
            }
            (Bson::String(p), Bson::String(q)) => p.cmp(q),
            (Bson::ObjectId(p), Bson::ObjectId(q)) => p.bytes().cmp(&q.bytes()),
            (Bson::Boolean(p), Bson::Boolean(q)) => p.cmp(q),
            _ => numeric(x).partial_cmp(&numeric(y)).unwrap_or(Ordering::Equal),
        },
    }
}

fn numeric(value: &Bson) -> f64 {
    match value {
        Bson::Int32(n) => f64::from(*n),
        Bson::Int64(n) => *n as f64,
        Bson::Double(n) => *n,
        _ => 0.0,
    }
}
