#![forbid(unsafe_code)]
//! Docket domain model SSOT.
//!
//! Record structs here are the storage shape: they serialize to the BSON
//! documents the store persists (camelCase keys, enum values as their wire
//! strings). Derived monetary fields are recomputed by the billing record
//! methods immediately before every persist; client-supplied values for
//! those fields are never trusted.

mod audit;
mod billing;
mod case;
mod client;
mod diary;
mod marketplace;
mod user;
mod validation;

pub use audit::{actions, AuditLog};
pub use billing::{
    round_money, Expense, ExpenseCategory, ExpenseStatus, Invoice, InvoiceItem, InvoiceStatus,
    TimeEntry,
};
pub use case::{Case, CaseStatus, CaseType, Party, PartyRole};
pub use client::Client;
pub use diary::DiaryEntry;
pub use marketplace::{
    AvailabilitySlot, Booking, BookingStatus, ContactMethod, IntakeForm, IntakeStatus,
    LawyerProfile, RateType, ReviewsSummary, VerificationStatus,
};
pub use user::{Priority, Role, User};
pub use validation::ValidationError;

pub const CRATE_NAME: &str = "docket-model";
