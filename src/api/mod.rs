//! HTTP API exposing transcript extraction, analysis, the self-test and the coaches

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use server::build_app;
pub use server::serve_api;
