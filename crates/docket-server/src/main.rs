#![forbid(unsafe_code)]

use docket_server::{build_router, validate_startup_config, ApiConfig, AppState, MongoBackend};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_str_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("DOCKET_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let mongo_uri = env::var("MONGO_URI").map_err(|_| "MONGO_URI is not defined".to_string())?;
    let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET is not defined".to_string())?;
    let db_name = env_str_or("MONGO_DB_NAME", "legal_case_mgmt");
    let cors_origin = env_str_or("CORS_ORIGIN", "http://localhost:5173");
    let port = env_u64("PORT", 4000);

    let config = ApiConfig {
        max_body_bytes: env_usize("DOCKET_MAX_BODY_BYTES", 64 * 1024),
        jwt_secret,
        token_ttl: Duration::from_secs(env_u64("DOCKET_TOKEN_TTL_SECS", 8 * 60 * 60)),
        bcrypt_cost: env_u64("DOCKET_BCRYPT_COST", 10) as u32,
        cors_allowed_origins: vec![cors_origin],
    };
    validate_startup_config(&config)?;

    // A failed initial connection is the one fatal error in the process.
    let store = MongoBackend::connect(&mongo_uri, &db_name)
        .await
        .map_err(|e| format!("mongodb connection failed: {e}"))?;
    info!(db = %db_name, "mongodb connected");

    let state = AppState::with_config(Arc::new(store), config);
    let app = build_router(state);

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind failed on {bind_addr}: {e}"))?;
    info!("docket-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
