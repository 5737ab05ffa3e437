//! # Feedback
//!
//! Records, the in-memory store, its JSON file backend, and request
//! validation. Nothing here knows about HTTP.

pub mod errors;
pub mod persistence;
pub mod record;
pub mod store;
pub mod validation;

pub use errors::{FeedbackError, FeedbackResult, PersistenceError, PersistenceResult};
pub use persistence::{FeedbackBackend, JsonFileBackend, WriteMode};
pub use record::{FeedbackRecord, NewFeedback, UNKNOWN_CLIENT};
pub use store::{next_id_for, FeedbackStore};
pub use validation::{parse_id, parse_submission, Submission};
