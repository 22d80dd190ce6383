use crate::user::Priority;
use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

/// Personal work diary line, visible only to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub title: String,
    pub note: String,
    pub date: DateTime,
    pub owner: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<ObjectId>,
    pub priority: Priority,
}

impl DiaryEntry {
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validation::require_nonempty("title", &self.title)?;
        crate::validation::require_nonempty("note", &self.note)
    }
}
