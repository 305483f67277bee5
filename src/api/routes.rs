//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers;

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Transcript and analysis
        .route("/transcript", post(handlers::extract_transcript))
        .route("/analyze", post(handlers::analyze))
        .route("/align", post(handlers::align_scores))
        // Self-test
        .route("/quiz", get(handlers::get_quiz))
        .route("/quiz/score", post(handlers::score_quiz))
        // Coaching conversations
        .route("/interview", post(handlers::interview))
        .route("/growth", post(handlers::growth))
        .route("/style", post(handlers::style))
        // Meet-up planning
        .route("/places", post(handlers::places))
        .with_state(state)
}
