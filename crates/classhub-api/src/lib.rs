//! # classhub-api
//!
//! HTTP API layer for ClassHub built on Axum.
//!
//! Provides the authentication endpoints, session-cookie extractor,
//! request DTOs, error mapping, and request logging middleware.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
