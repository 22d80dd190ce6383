// SPDX-License-Identifier: Apache-2.0

//! Billing records and their derived-field computation.
//!
//! Every monetary field below that is derived (item totals, invoice subtotal,
//! tax amount, grand total, time-entry amount) is recomputed by `recompute_*`
//! immediately before each persist. Stored values are rounded
//! half-away-from-zero to 2 decimals; inputs are taken as-is.

use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

/// Round a monetary value to 2 decimal places, half away from zero.
#[must_use]
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub case: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ObjectId>,
    pub user: ObjectId,
    pub description: String,
    pub rate: f64,
    pub hours: f64,
    pub billable: bool,
    pub billed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime>,
    pub total_amount: f64,
}

impl TimeEntry {
    /// `totalAmount = hours × rate`, overriding whatever the caller supplied.
    pub fn recompute_amount(&mut self) {
        self.total_amount = round_money(self.hours * self.rate);
    }

    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validation::require_nonempty("description", &self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Void,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        Self::Draft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub client: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<ObjectId>,
    pub issued_by: ObjectId,
    pub items: Vec<InvoiceItem>,
    pub tax_rate: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
}

impl Invoice {
    /// Recompute every derived field from `items` and `taxRate`:
    /// each `item.total = quantity × rate`, `subtotal = Σ item totals`,
    /// `taxAmount = subtotal × taxRate / 100`, `total = subtotal + taxAmount`.
    pub fn recompute_totals(&mut self) {
        for item in &mut self.items {
            item.total = round_money(item.quantity * item.rate);
        }
        self.subtotal = round_money(self.items.iter().map(|item| item.total).sum());
        self.tax_amount = round_money(self.subtotal * self.tax_rate / 100.0);
        self.total = round_money(self.subtotal + self.tax_amount);
    }

    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        for item in &self.items {
            crate::validation::require_nonempty("item description", &item.description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    CourtFee,
    Travel,
    Filing,
    Other,
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        Self::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Recorded,
    Reimbursed,
}

impl Default for ExpenseStatus {
    fn default() -> Self {
        Self::Recorded
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ObjectId>,
    pub incurred_by: ObjectId,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub billable: bool,
    pub status: ExpenseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

impl Expense {
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validation::require_nonempty("description", &self.description)
    }
}
