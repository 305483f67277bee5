//! Chat-log MBTI personality analysis
//!
//! - [`transcript`] turns an exported group chat into per-speaker text
//! - [`analysis`] asks a chat model for each speaker's type and scores
//! - [`personality`] aligns scores with codes and scores the self-test
//! - [`api`] and [`cli`] expose all of it over HTTP and the command line

pub mod analysis;
pub mod api;
pub mod charts;
pub mod cli;
pub mod coach;
pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod personality;
pub mod places;
pub mod transcript;

#[cfg(test)]
mod errors_tests;

pub use config::AppConfig;
pub use errors::*;
