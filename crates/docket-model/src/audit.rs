use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

/// Action codes recorded on the audit trail.
pub mod actions {
    pub const TIME_ENTRY_CREATED: &str = "TIME_ENTRY_CREATED";
    pub const INVOICE_CREATED: &str = "INVOICE_CREATED";
    pub const INVOICE_STATUS_UPDATED: &str = "INVOICE_STATUS_UPDATED";
    pub const EXPENSE_RECORDED: &str = "EXPENSE_RECORDED";
}

/// Append-only audit line. Written once per selected mutating action and
/// never revisited by application logic; exposed read-only for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub actor: ObjectId,
    pub action: String,
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Document>,
}
