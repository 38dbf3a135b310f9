//! # staywatch-api
//!
//! HTTP API layer for StayWatch built on Axum.
//!
//! Exposes the notification endpoints behind a bearer-token gate, the
//! sign-in/sign-up endpoints, and health probes, together with CORS and
//! request logging middleware and the mapping from `AppError` to JSON
//! error bodies.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
