//! HTTP server implementation

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::BoxError;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::llm::ChatBackend;
use crate::llm::LlmService;
use crate::Result;

/// Largest accepted request body (chat exports can be long)
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Build the full application router around a chat backend
pub fn build_app(state: AppState, enable_cors: bool, timeout_secs: u64) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    if err.is::<tower::timeout::error::Elapsed>() {
                        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
                    } else {
                        (StatusCode::INTERNAL_SERVER_ERROR, format!("Unhandled error: {err}"))
                    }
                }))
                .timeout(Duration::from_secs(timeout_secs)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    // Add CORS if enabled
    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting chatmbti API server...");

    let backend: Arc<dyn ChatBackend> = Arc::new(LlmService::new(config)?);
    let state = AppState::new(config, backend)?;
    info!(
        "📝 Quiz battery {} loaded ({} questions)",
        state.battery.version(),
        state.battery.len()
    );

    // Allow slow local models to finish before the request is cut off
    let app = build_app(state, enable_cors, config.llm.timeout_secs + 30);
    if enable_cors {
        info!("✅ CORS enabled");
    }

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("📋 RESTful API available at http://{}/api", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET  /api/health         - Health check");
    info!("  POST /api/transcript     - Extract per-speaker transcript");
    info!("  POST /api/analyze        - Analyze speakers (LLM)");
    info!("  POST /api/align          - Align scores with an MBTI code");
    info!("  GET  /api/quiz           - Self-test questions");
    info!("  POST /api/quiz/score     - Score a self-test");
    info!("  POST /api/interview      - Interview turn (LLM)");
    info!("  POST /api/growth         - Growth coach turn (LLM)");
    info!("  POST /api/style          - Style advice (LLM)");
    info!("  POST /api/places         - Meeting point and place keyword");

    axum::serve(listener, app).await?;

    Ok(())
}
