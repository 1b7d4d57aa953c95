use std::path::PathBuf;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::UNREACHABLE_WARNING;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid attendance input: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("Malformed request: {0}")]
    BadPayload(String),

    #[error("{}", UNREACHABLE_WARNING)]
    Unreachable,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ApiError {
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Unreachable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            errors: self.messages(),
        })
    }
}
