//! Feedback HTTP Routes
//!
//! Create, list/get and delete on `/feedback`, selected by method. The id for
//! get and delete comes from the `id` query parameter.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::ApiError;
use crate::feedback::{
    parse_id, parse_submission, FeedbackError, FeedbackRecord, FeedbackStore, NewFeedback,
};

// ==================
// Shared State
// ==================

/// Feedback state shared across handlers.
///
/// Store access runs on the blocking pool, since mutations write the data file.
/// The lock is held for the whole read-modify-persist step so concurrent
/// requests never interleave store mutations or file writes.
#[derive(Debug)]
pub struct FeedbackState {
    store: Arc<Mutex<FeedbackStore>>,
}

impl FeedbackState {
    pub fn new(store: FeedbackStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut FeedbackStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            // Each mutation is a single push or remove, so a poisoned store is intact
            let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

// ==================
// Request/Response Types
// ==================

/// Every query pair, in order. Repeated keys are kept, so `?id=1&id=2`
/// parses instead of being rejected.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct IdQuery {
    pairs: Vec<(String, String)>,
}

impl IdQuery {
    /// The first `id` value. An empty value counts as absent.
    fn id(&self) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub feedback: FeedbackRecord,
}

#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub message: String,
    pub count: usize,
    pub feedback: Vec<FeedbackRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFeedbackResponse {
    pub message: String,
    pub deleted_feedback: FeedbackRecord,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Feedback Routes
// ==================

/// Create feedback routes
pub fn feedback_routes(state: Arc<FeedbackState>) -> Router {
    Router::new()
        .route(
            "/feedback",
            post(create_feedback_handler)
                .get(get_feedback_handler)
                .head(method_not_allowed_handler)
                .delete(delete_feedback_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(state)
}

/// Fallback for paths outside the routing table
pub async fn route_not_found_handler() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed_handler(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}

// ==================
// Handlers
// ==================

async fn create_feedback_handler(
    State(state): State<Arc<FeedbackState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let submission = parse_submission(&body)?;
    let client_info = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let new_feedback = NewFeedback::now(submission.rating, submission.comment, client_info);

    let feedback = state
        .with_store(move |store| {
            let feedback = store.append(new_feedback);
            store.persist();
            feedback
        })
        .await?;

    info!(id = feedback.id, rating = %feedback.rating, "Feedback created");

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback created successfully".to_string(),
            feedback,
        }),
    ))
}

async fn get_feedback_handler(
    State(state): State<Arc<FeedbackState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let Some(raw_id) = query.id() else {
        let feedback = state.with_store(|store| store.all().to_vec()).await?;
        let response = FeedbackListResponse {
            message: "All feedback retrieved successfully".to_string(),
            count: feedback.len(),
            feedback,
        };
        return Ok(Json(response).into_response());
    };

    let id = parse_id(raw_id)?;
    let feedback = state
        .with_store(move |store| store.find_by_id(id).cloned())
        .await?
        .ok_or_else(|| FeedbackError::NotFound(id.to_string()))?;

    let response = FeedbackResponse {
        message: "Feedback retrieved successfully".to_string(),
        feedback,
    };
    Ok(Json(response).into_response())
}

async fn delete_feedback_handler(
    State(state): State<Arc<FeedbackState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DeletedFeedbackResponse>, ApiError> {
    let raw_id = query.id().ok_or(FeedbackError::MissingId)?;
    let id = parse_id(raw_id)?;

    let deleted_feedback = state
        .with_store(move |store| {
            let removed = store.remove_by_id(id)?;
            store.persist();
            Some(removed)
        })
        .await?
        .ok_or_else(|| FeedbackError::NotFound(id.to_string()))?;

    info!(id = deleted_feedback.id, "Feedback deleted");

    Ok(Json(DeletedFeedbackResponse {
        message: "Feedback deleted successfully".to_string(),
        deleted_feedback,
    }))
}
