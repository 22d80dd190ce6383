// SPDX-License-Identifier: Apache-2.0

use crate::store::{stamp_new, stamp_update, RecordStore};
use crate::StoreError;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

pub struct MongoBackend {
    db: Database,
}

impl MongoBackend {
    /// Connect and ping. A failure here is fatal to process startup; nothing
    /// else in the server terminates the process.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError(format!("mongodb connect failed: {e}")))?;
        let db = client.database(db_name);
        db.run_command(doc! {"ping": 1})
            .await
            .map_err(|e| StoreError(format!("mongodb ping failed: {e}")))?;
        Ok(Self { db })
    }

    fn coll(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl RecordStore for MongoBackend {
    fn backend_tag(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<ObjectId, StoreError> {
        let (id, doc) = stamp_new(doc);
        self.coll(collection)
            .insert_one(doc)
            .await
            .map_err(|e| StoreError(format!("insert failed: {e}")))?;
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let coll = self.coll(collection);
        let mut action = coll.find(filter);
        if let Some(sort) = sort {
            action = action.sort(sort);
        }
        let cursor = action
            .await
            .map_err(|e| StoreError(format!("find failed: {e}")))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError(format!("cursor read failed: {e}")))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.coll(collection)
            .find_one(filter)
            .await
            .map_err(|e| StoreError(format!("find_one failed: {e}")))
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
        self.coll(collection)
            .find_one_and_update(doc! {"_id": id}, doc! {"$set": stamp_update(set)})
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError(format!("update failed: {e}")))
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<Document, StoreError> {
        let update = doc! {
            "$set": stamp_update(set),
            "$setOnInsert": {"_id": ObjectId::new(), "createdAt": DateTime::now()},
        };
        self.coll(collection)
            .find_one_and_update(filter, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError(format!("upsert failed: {e}")))?
            .ok_or_else(|| StoreError("upsert returned no document".to_string()))
    }
}
