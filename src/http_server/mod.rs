//! # Feedback HTTP Server Module
//!
//! JSON API over the feedback store, served with Axum.
//!
//! # Endpoints
//!
//! - `POST /feedback` - Create feedback
//! - `GET /feedback` - List all feedback
//! - `GET /feedback?id=123` - Get one entry
//! - `DELETE /feedback?id=123` - Delete one entry
//! - `OPTIONS *` - CORS pre-flight

pub mod config;
pub mod cors;
pub mod errors;
pub mod feedback_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, AVAILABLE_ROUTES};
pub use feedback_routes::FeedbackState;
pub use server::{shutdown_signal, HttpServer};
