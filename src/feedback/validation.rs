//! # Request Validation
//!
//! Turns raw request input into typed values. Checks run in a fixed order and
//! stop at the first failure:
//!
//! 1. body parses as JSON (`MalformedBody`)
//! 2. `rating` and `comment` are present and truthy (`MissingField`)
//! 3. `rating` is an integral number in 1..=5 (`InvalidRating`)

use serde_json::Value;

use super::errors::{FeedbackError, FeedbackResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A validated create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub rating: u8,
    pub comment: String,
}

/// Parse and validate a create request body
pub fn parse_submission(body: &[u8]) -> FeedbackResult<Submission> {
    let data: Value =
        serde_json::from_slice(body).map_err(|e| FeedbackError::MalformedBody(e.to_string()))?;

    let rating = data.get("rating").filter(|v| is_truthy(v));
    let comment = data.get("comment").filter(|v| is_truthy(v));

    let (Some(rating), Some(comment)) = (rating, comment) else {
        return Err(FeedbackError::MissingField);
    };

    // Truthy but not text
    let Some(comment) = comment.as_str() else {
        return Err(FeedbackError::MissingField);
    };

    Ok(Submission {
        rating: parse_rating(rating)?,
        comment: comment.to_string(),
    })
}

fn parse_rating(value: &Value) -> FeedbackResult<u8> {
    let rating = value.as_f64().ok_or(FeedbackError::InvalidRating)?;

    if rating.fract() != 0.0 || rating < MIN_RATING as f64 || rating > MAX_RATING as f64 {
        return Err(FeedbackError::InvalidRating);
    }

    Ok(rating as u8)
}

/// `null`, `false`, `0` and `""` count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse the `id` query parameter.
///
/// Reads the leading decimal digits after optional whitespace and `+`, so
/// `3abc` is id 3. Input with no leading digits is reported as not found
/// under the text the client sent.
pub fn parse_id(raw: &str) -> FeedbackResult<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..digits_end]
        .parse::<u64>()
        .map_err(|_| FeedbackError::NotFound(raw.to_string()))
}
