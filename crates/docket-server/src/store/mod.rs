// SPDX-License-Identifier: Apache-2.0

//! Record-store seam. Handlers speak this trait; the process wires in the
//! MongoDB backend, tests wire in the in-memory one. Both stamp `_id`,
//! `createdAt`, and `updatedAt` so stored documents look identical either way.

use crate::StoreError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime, Document};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoBackend;

pub mod collections {
    pub const USERS: &str = "users";
    pub const CASES: &str = "cases";
    pub const CLIENTS: &str = "clients";
    pub const TIME_ENTRIES: &str = "time_entries";
    pub const INVOICES: &str = "invoices";
    pub const EXPENSES: &str = "expenses";
    pub const DIARY_ENTRIES: &str = "diary_entries";
    pub const LAWYER_PROFILES: &str = "lawyer_profiles";
    pub const BOOKINGS: &str = "bookings";
    pub const INTAKE_FORMS: &str = "intake_forms";
    pub const AUDIT_LOGS: &str = "audit_logs";
}

#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// Insert a new document, stamping `_id`/`createdAt`/`updatedAt`.
    /// Returns the assigned id.
    async fn insert(&self, collection: &str, doc: Document) -> Result<ObjectId, StoreError>;

    /// Filtered scan, optionally sorted (keys map to -1/1 directions).
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    /// `$set`-style partial update returning the post-image, or `None` when
    /// no document has that id.
    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        set: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Update-if-exists-else-insert keyed by `filter`, returning the
    /// post-image.
    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> Result<Document, StoreError>;
}

pub(crate) fn stamp_new(mut doc: Document) -> (ObjectId, Document) {
    let id = ObjectId::new();
    let now = DateTime::now();
    doc.insert("_id", id);
    doc.insert("createdAt", now);
    doc.insert("updatedAt", now);
    (id, doc)
}

pub(crate) fn stamp_update(mut set: Document) -> Document {
    set.insert("updatedAt", DateTime::now());
    set
}
