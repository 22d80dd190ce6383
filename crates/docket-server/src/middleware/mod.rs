mod cors;
mod request_tracing;

pub(crate) use cors::cors_middleware;
pub(crate) use request_tracing::request_tracing_middleware;
