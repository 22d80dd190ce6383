#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

pub mod auth;
mod config;
mod http;
mod middleware;
pub mod store;

pub use config::{validate_startup_config, ApiConfig};
pub use store::{MemoryStore, MongoBackend, RecordStore};

pub const CRATE_NAME: &str = "docket-server";

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for StoreError {}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: ApiConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn RecordStore>, config: ApiConfig) -> Self {
        Self {
            store,
            config,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(http::health_handler))
        .route("/api/auth/register", post(http::auth::register_handler))
        .route("/api/auth/login", post(http::auth::login_handler))
        .route(
            "/api/cases",
            get(http::cases::list_cases_handler).post(http::cases::create_case_handler),
        )
        .route("/api/cases/mine", get(http::cases::my_cases_handler))
        .route("/api/cases/:id", get(http::cases::get_case_handler))
        .route(
            "/api/cases/:id/status",
            patch(http::cases::update_case_status_handler),
        )
        .route(
            "/api/clients",
            get(http::clients::list_clients_handler).post(http::clients::create_client_handler),
        )
        .route(
            "/api/clients/:id/cases",
            post(http::clients::attach_case_handler),
        )
        .route(
            "/api/diary",
            get(http::diary::list_diary_handler).post(http::diary::create_diary_handler),
        )
        .route(
            "/api/billing/time-entries",
            get(http::billing::list_time_entries_handler)
                .post(http::billing::create_time_entry_handler),
        )
        .route(
            "/api/billing/invoices",
            get(http::billing::list_invoices_handler).post(http::billing::create_invoice_handler),
        )
        .route(
            "/api/billing/invoices/:id/status",
            patch(http::billing::update_invoice_status_handler),
        )
        .route(
            "/api/billing/expenses",
            get(http::billing::list_expenses_handler).post(http::billing::create_expense_handler),
        )
        .route("/api/billing/audit", get(http::billing::audit_trail_handler))
        .route(
            "/api/lawyers",
            get(http::lawyers::list_lawyers_handler).post(http::lawyers::upsert_profile_handler),
        )
        .route(
            "/api/lawyers/:id",
            get(http::lawyers::get_lawyer_handler)
                .put(http::lawyers::upsert_profile_by_id_handler),
        )
        .route(
            "/api/bookings",
            get(http::bookings::list_bookings_handler).post(http::bookings::create_booking_handler),
        )
        .route(
            "/api/bookings/:id",
            patch(http::bookings::update_booking_handler),
        )
        .route(
            "/api/intake",
            get(http::intake::list_intake_handler).post(http::intake::create_intake_handler),
        )
        .route(
            "/api/intake/:id",
            patch(http::intake::update_intake_status_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::cors_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
