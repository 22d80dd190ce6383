use crate::auth::{authenticate, require_role, Identity};
use crate::http::{
    json_created, json_ok, parse_body, parse_path_id, populate_each, reload, to_bson_value,
    to_stored_doc, ApiFailure,
};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::{
    CreateExpenseRequest, CreateInvoiceRequest, CreateTimeEntryRequest, UpdateInvoiceStatusRequest,
};
use docket_api::params::parse_object_id_param;
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::{actions, AuditLog, Expense, Invoice, InvoiceItem, Role, TimeEntry};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use std::collections::HashMap;
use tracing::info;

/// Append an audit line for a mutating action. The primary write has already
/// happened; the two are independent store calls, not a transaction.
async fn record_audit(
    state: &AppState,
    actor: &Identity,
    action: &str,
    entity_type: &str,
    entity_id: Option<ObjectId>,
    metadata: Option<Document>,
) -> Result<(), ApiFailure> {
    let log = AuditLog {
        actor: actor.id,
        action: action.to_string(),
        entity_type: entity_type.to_string(),
        entity_id,
        metadata,
    };
    state
        .store
        .insert(collections::AUDIT_LOGS, to_stored_doc(&log)?)
        .await?;
    Ok(())
}

pub(crate) async fn create_time_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateTimeEntryRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    let req = parse_body(body)?;

    let case = parse_object_id_param("case", &req.case)?;
    let client = req
        .client
        .as_deref()
        .map(|raw| parse_object_id_param("client", raw))
        .transpose()?;
    let mut entry = TimeEntry {
        case,
        client,
        user: identity.id,
        description: req.description,
        rate: req.rate,
        hours: req.hours,
        billable: req.billable.unwrap_or(true),
        billed: req.billed.unwrap_or(false),
        started_at: req.started_at.map(DateTime::from_chrono),
        ended_at: req.ended_at.map(DateTime::from_chrono),
        total_amount: 0.0,
    };
    entry.recompute_amount();
    entry
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::TIME_ENTRIES, to_stored_doc(&entry)?)
        .await?;
    info!(entry = %id.to_hex(), amount = entry.total_amount, "time entry created");
    record_audit(
        &state,
        &identity,
        actions::TIME_ENTRY_CREATED,
        "TimeEntry",
        Some(id),
        Some(doc! {"hours": entry.hours, "rate": entry.rate, "totalAmount": entry.total_amount}),
    )
    .await?;
    let stored = reload(&state.store, collections::TIME_ENTRIES, id, "Time entry").await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_time_entries_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;

    let mut filter = doc! {};
    if let Some(raw) = params.get("caseId") {
        filter.insert("case", parse_object_id_param("caseId", raw)?);
    }
    let mut entries = state
        .store
        .find(
            collections::TIME_ENTRIES,
            filter,
            Some(doc! {"createdAt": -1}),
        )
        .await?;
    populate_each(
        &state.store,
        &mut entries,
        "case",
        collections::CASES,
        &["title"],
    )
    .await?;
    populate_each(
        &state.store,
        &mut entries,
        "user",
        collections::USERS,
        &["name", "email"],
    )
    .await?;
    Ok(json_ok(docs_to_json(&entries)))
}

pub(crate) async fn create_invoice_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    require_role(&identity, &[Role::Admin, Role::Attorney])?;
    let req = parse_body(body)?;

    let client = parse_object_id_param("client", &req.client)?;
    let case = req
        .case
        .as_deref()
        .map(|raw| parse_object_id_param("case", raw))
        .transpose()?;
    let items = req
        .items
        .into_iter()
        .map(|item| InvoiceItem {
            description: item.description,
            quantity: item.quantity,
            rate: item.rate,
            total: 0.0,
        })
        .collect();
    let mut invoice = Invoice {
        client,
        case,
        issued_by: identity.id,
        items,
        tax_rate: req.tax_rate.unwrap_or(0.0),
        subtotal: 0.0,
        tax_amount: 0.0,
        total: 0.0,
        status: req.status.unwrap_or_default(),
        due_date: req.due_date.map(DateTime::from_chrono),
        currency: req.currency.unwrap_or_else(|| "INR".to_string()),
        gst_number: req.gst_number,
    };
    // Derived fields are never taken from the request.
    invoice.recompute_totals();
    invoice
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::INVOICES, to_stored_doc(&invoice)?)
        .await?;
    info!(invoice = %id.to_hex(), total = invoice.total, "invoice created");
    record_audit(
        &state,
        &identity,
        actions::INVOICE_CREATED,
        "Invoice",
        Some(id),
        Some(doc! {"status": to_bson_value(&invoice.status)?, "total": invoice.total}),
    )
    .await?;
    let stored = reload(&state.store, collections::INVOICES, id, "Invoice").await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_invoices_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let mut invoices = state
        .store
        .find(collections::INVOICES, doc! {}, Some(doc! {"createdAt": -1}))
        .await?;
    populate_each(
        &state.store,
        &mut invoices,
        "client",
        collections::CLIENTS,
        &["name", "email"],
    )
    .await?;
    populate_each(
        &state.store,
        &mut invoices,
        "case",
        collections::CASES,
        &["title"],
    )
    .await?;
    populate_each(
        &state.store,
        &mut invoices,
        "issuedBy",
        collections::USERS,
        &["name"],
    )
    .await?;
    Ok(json_ok(docs_to_json(&invoices)))
}

pub(crate) async fn update_invoice_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<UpdateInvoiceStatusRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    require_role(&identity, &[Role::Admin, Role::Attorney])?;
    let id = parse_path_id("Invoice", &id)?;
    let req = parse_body(body)?;

    let updated = state
        .store
        .update_by_id(
            collections::INVOICES,
            id,
            doc! {"status": to_bson_value(&req.status)?},
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Invoice"))?;
    info!(invoice = %id.to_hex(), status = ?req.status, "invoice status updated");
    record_audit(
        &state,
        &identity,
        actions::INVOICE_STATUS_UPDATED,
        "Invoice",
        Some(id),
        Some(doc! {"status": to_bson_value(&req.status)?}),
    )
    .await?;
    Ok(json_ok(doc_to_json(&updated)))
}

pub(crate) async fn create_expense_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    let req = parse_body(body)?;

    let case = req
        .case
        .as_deref()
        .map(|raw| parse_object_id_param("case", raw))
        .transpose()?;
    let client = req
        .client
        .as_deref()
        .map(|raw| parse_object_id_param("client", raw))
        .transpose()?;
    let expense = Expense {
        case,
        client,
        incurred_by: identity.id,
        description: req.description,
        amount: req.amount,
        category: req.category.unwrap_or_default(),
        billable: req.billable.unwrap_or(true),
        status: req.status.unwrap_or_default(),
        receipt_url: req.receipt_url,
    };
    expense
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::EXPENSES, to_stored_doc(&expense)?)
        .await?;
    info!(expense = %id.to_hex(), amount = expense.amount, "expense recorded");
    record_audit(
        &state,
        &identity,
        actions::EXPENSE_RECORDED,
        "Expense",
        Some(id),
        Some(doc! {"amount": expense.amount, "category": to_bson_value(&expense.category)?}),
    )
    .await?;
    let stored = reload(&state.store, collections::EXPENSES, id, "Expense").await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_expenses_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let mut expenses = state
        .store
        .find(collections::EXPENSES, doc! {}, Some(doc! {"createdAt": -1}))
        .await?;
    populate_each(
        &state.store,
        &mut expenses,
        "incurredBy",
        collections::USERS,
        &["name"],
    )
    .await?;
    populate_each(
        &state.store,
        &mut expenses,
        "case",
        collections::CASES,
        &["title"],
    )
    .await?;
    populate_each(
        &state.store,
        &mut expenses,
        "client",
        collections::CLIENTS,
        &["name"],
    )
    .await?;
    Ok(json_ok(docs_to_json(&expenses)))
}

pub(crate) async fn audit_trail_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    require_role(&identity, &[Role::Admin])?;
    let mut logs = state
        .store
        .find(
            collections::AUDIT_LOGS,
            doc! {},
            Some(doc! {"createdAt": -1}),
        )
        .await?;
    populate_each(
        &state.store,
        &mut logs,
        "actor",
        collections::USERS,
        &["name", "email", "role"],
    )
    .await?;
    Ok(json_ok(docs_to_json(&logs)))
}
