use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use serde_json::json;
use thiserror::Error;

/// Caller-correctable failures. Neither variant is retried or escalated;
/// both surface as a 400 with a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Malformed, missing, or illegal input.
    #[error("{0}")]
    Validation(String),
    /// Operation invalid for the current match lifecycle.
    #[error("{0}")]
    State(String),
}

impl GameError {
    pub fn validation(message: impl Into<String>) -> Self {
        GameError::Validation(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        GameError::State(message.into())
    }
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
