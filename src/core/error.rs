//! Typed error handling for the dashboard backend
//!
//! Report operations never fail on malformed optional input: unparseable
//! query parameters are treated as absent. The errors below therefore come
//! from the record store, the label store, configuration, or request bodies.
//!
//! # Error Categories
//!
//! - [`StorageError`]: store/connectivity failures (always a generic 500)
//! - [`LabelError`]: label lookups that find nothing
//! - [`ConfigError`]: configuration loading
//! - [`RequestError`]: malformed request bodies
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_label(store: &dyn LabelStore, key: &str) -> DashboardResult<Label> {
//!     store
//!         .get(key)
//!         .await?
//!         .ok_or_else(|| LabelError::NotFound { key: key.to_string() }.into())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients for any store failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The main error type for the dashboard backend
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Record store or label store failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Label lookups
    #[error(transparent)]
    Label(#[from] LabelError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Label(e) => e.status_code(),
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Label(e) => e.error_code(),
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Request(e) => e.error_code(),
        }
    }

    /// Message safe to hand to a client
    ///
    /// Server-side failures never leak their internal detail.
    pub fn public_message(&self) -> String {
        match self {
            DashboardError::Label(e) => e.to_string(),
            DashboardError::Request(e) => e.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Label(LabelError::NotFound { key }) => {
                Some(serde_json::json!({ "key": key }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by record/label store backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the backend
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query or aggregation execution failed
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// A stored document could not be mapped back into a record
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// Backend not available (e.g. poisoned lock)
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn query(backend: &str, message: impl ToString) -> Self {
        StorageError::QueryError {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Label Errors
// =============================================================================

/// Errors related to label operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// No label with this key
    #[error("Label not found")]
    NotFound { key: String },
}

impl LabelError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LabelError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LabelError::NotFound { .. } => "LABEL_NOT_FOUND",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration{}: {message}", .file.as_ref().map(|f| format!(" in '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Required collaborator missing when assembling the server
    #[error("Missing required component: {component}")]
    MissingComponent { component: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid request body
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
