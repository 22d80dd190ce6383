use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A client organization or individual. `cases` is kept consistent with each
/// case's back-reference by the attach operation, idempotently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub cases: Vec<ObjectId>,
}

impl Client {
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validation::require_nonempty("name", &self.name)
    }
}
