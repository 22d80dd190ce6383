// SPDX-License-Identifier: Apache-2.0

use crate::user::Priority;
use crate::ValidationError;
use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    Hourly,
    Flat,
    Contingency,
}

impl Default for RateType {
    fn default() -> Self {
        Self::Hourly
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Weekly recurring slot. `day_of_week` is 0 (Sunday) through 6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
}

impl AvailabilitySlot {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.day_of_week > 6 {
            return Err(ValidationError(format!(
                "dayOfWeek must be 0-6, got {}",
                self.day_of_week
            )));
        }
        crate::validation::require_nonempty("startTime", &self.start_time)?;
        crate::validation::require_nonempty("endTime", &self.end_time)?;
        crate::validation::require_nonempty("timezone", &self.timezone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsSummary {
    pub average_rating: f64,
    pub total_reviews: u64,
}

impl Default for ReviewsSummary {
    fn default() -> Self {
        Self {
            average_rating: 0.0,
            total_reviews: 0,
        }
    }
}

/// Marketplace profile, at most one per user (upsert keyed on `user`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerProfile {
    pub user: ObjectId,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub practice_areas: Vec<String>,
    pub jurisdictions: Vec<String>,
    pub languages: Vec<String>,
    pub rate_type: RateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_amount: Option<f64>,
    pub availability: Vec<AvailabilitySlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u32>,
    pub verification_status: VerificationStatus,
    pub badges: Vec<String>,
    pub reviews_summary: ReviewsSummary,
}

impl LawyerProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validation::require_nonempty("fullName", &self.full_name)?;
        for slot in &self.availability {
            slot.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Requested,
    Confirmed,
    Declined,
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Requested
    }
}

/// Consultation request against a lawyer profile. Start/end ordering is not
/// enforced, matching the persisted contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub lawyer_profile: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub contact_name: String,
    pub contact_email: String,
    pub practice_area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub starts_at: DateTime,
    pub ends_at: DateTime,
    pub timezone: String,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    pub rate_type: RateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_quote: Option<f64>,
    pub currency: String,
}

impl Booking {
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validation::require_nonempty("contactName", &self.contact_name)?;
        crate::validation::require_nonempty("contactEmail", &self.contact_email)?;
        crate::validation::require_nonempty("practiceArea", &self.practice_area)?;
        crate::validation::require_nonempty("timezone", &self.timezone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntakeStatus {
    New,
    InReview,
    Approved,
    Declined,
}

impl Default for IntakeStatus {
    fn default() -> Self {
        Self::New
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactMethod {
    Email,
    Phone,
    Video,
}

impl Default for ContactMethod {
    fn default() -> Self {
        Self::Email
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeForm {
    pub contact_name: String,
    pub contact_email: String,
    pub practice_area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub urgency: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    pub preferred_contact_method: ContactMethod,
    pub status: IntakeStatus,
    pub documents: Vec<String>,
}

impl IntakeForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validation::require_nonempty("contactName", &self.contact_name)?;
        crate::validation::require_nonempty("contactEmail", &self.contact_email)?;
        crate::validation::require_nonempty("practiceArea", &self.practice_area)
    }
}
