//! feedback_api - A minimal, file-backed product feedback HTTP API

pub mod cli;
pub mod feedback;
pub mod http_server;
