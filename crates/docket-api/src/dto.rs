// SPDX-License-Identifier: Apache-2.0

//! Request/response bodies. Reference fields arrive as hex id strings and are
//! parsed by the handlers; derived monetary fields are accepted but ignored
//! (the model recomputes them before every persist). Unknown keys are dropped
//! rather than rejected, matching the persisted contract.

use chrono::{DateTime, Utc};
use docket_model::{
    AvailabilitySlot, BookingStatus, CaseStatus, CaseType, ContactMethod, ExpenseCategory,
    ExpenseStatus, IntakeStatus, InvoiceStatus, Party, Priority, RateType, ReviewsSummary, Role,
    VerificationStatus,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The public view of an account: everything but the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub token: String,
    pub user: AuthUserDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub title: String,
    pub description: Option<String>,
    pub case_type: CaseType,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
    pub region: Option<String>,
    pub jurisdiction: Option<String>,
    pub client: Option<String>,
    pub parties: Option<Vec<Party>>,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub is_legal_hold: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseStatusRequest {
    pub status: CaseStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachCaseRequest {
    pub case_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiaryEntryRequest {
    pub title: String,
    pub note: String,
    pub date: Option<DateTime<Utc>>,
    pub case: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntryRequest {
    pub case: String,
    pub client: Option<String>,
    pub description: String,
    pub rate: f64,
    pub hours: f64,
    pub billable: Option<bool>,
    pub billed: Option<bool>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Ignored: recomputed as hours × rate before persisting.
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemDraft {
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    /// Ignored: recomputed as quantity × rate before persisting.
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub client: String,
    pub case: Option<String>,
    pub items: Vec<InvoiceItemDraft>,
    pub tax_rate: Option<f64>,
    /// Ignored: derived from the items.
    pub subtotal: Option<f64>,
    /// Ignored: derived from the items.
    pub tax_amount: Option<f64>,
    /// Ignored: derived from the items.
    pub total: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub gst_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub case: Option<String>,
    pub client: Option<String>,
    pub description: String,
    pub amount: f64,
    pub category: Option<ExpenseCategory>,
    pub billable: Option<bool>,
    pub status: Option<ExpenseStatus>,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertLawyerProfileRequest {
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub practice_areas: Option<Vec<String>>,
    pub jurisdictions: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub rate_type: Option<RateType>,
    pub rate_amount: Option<f64>,
    pub availability: Option<Vec<AvailabilitySlot>>,
    pub years_experience: Option<u32>,
    pub verification_status: Option<VerificationStatus>,
    pub badges: Option<Vec<String>>,
    pub reviews_summary: Option<ReviewsSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub lawyer_profile: String,
    pub contact_name: String,
    pub contact_email: String,
    pub practice_area: String,
    pub message: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub timezone: String,
    pub rate_type: Option<RateType>,
    pub price_quote: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,
    pub meeting_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntakeFormRequest {
    pub contact_name: String,
    pub contact_email: String,
    pub practice_area: String,
    pub case_type: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub urgency: Option<Priority>,
    pub jurisdiction: Option<String>,
    pub preferred_contact_method: Option<ContactMethod>,
    pub documents: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntakeStatusRequest {
    pub status: IntakeStatus,
}
