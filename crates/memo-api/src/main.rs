//! memo-api - HTTP API server for memo

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use memo_api::{build_router, AppState};
use memo_core::Principal;
use memo_db::Database;
use memo_inference::LlmClient;

/// Default database location for local runs.
const DEFAULT_DATABASE_URL: &str = "sqlite://memo.db";

/// Default bind address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which keeps
/// request logs easy to correlate.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse allowed origins from the comma-separated `ALLOWED_ORIGINS` variable,
/// defaulting to local development origins.
fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(parse_allowed_origins())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memo_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // LOG_FORMAT=json switches to machine-readable output.
    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    let llm = LlmClient::from_env()?;

    let state = AppState {
        db,
        llm: Arc::new(llm),
        principal: Principal::default(),
    };

    let app = build_router(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer());

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    info!(
        subsystem = "api",
        op = "startup",
        addr = %addr,
        database_url = %database_url,
        "memo API listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
