use crate::user::Priority;
use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseType {
    Litigation,
    Investigation,
    Regulatory,
    Dispute,
}

/// Free-form status: any value may follow any other via a direct PATCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Intake,
    Investigation,
    Active,
    Closed,
}

impl Default for CaseStatus {
    fn default() -> Self {
        Self::Intake
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyRole {
    Plaintiff,
    Defendant,
    Client,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    pub role: PartyRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ObjectId>,
    pub parties: Vec<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_deadline: Option<DateTime>,
    pub is_legal_hold: bool,
}

impl Case {
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validation::require_nonempty("title", &self.title)?;
        for party in &self.parties {
            crate::validation::require_nonempty("party name", &party.name)?;
        }
        Ok(())
    }
}
