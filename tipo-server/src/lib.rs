//! HTTP backend for the tipo typing-practice app
//!
//! Aggregates content from the Naver search API and the Google Trends RSS
//! feed, cleans it through `tipo-text`, and serves it as uniform JSON.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod naver;
pub mod routes;
pub mod trending;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError, UpstreamError};
pub use routes::{build_router, AppState, ContentResponse};
