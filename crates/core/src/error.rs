//! Error types for the code review service.

use thiserror::Error;

/// Result type alias using the service's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by every failed repository listing request.
pub const LISTING_FAILED: &str = "Failed to fetch repository contents";

/// Core error type for the code review service.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Hosting API Errors
    // =========================================================================
    #[error("Repository not found ({status}): {message}")]
    NotFound { status: u16, message: String },

    #[error("Access denied ({status}): {message}")]
    AccessDenied { status: u16, message: String },

    #[error("Upstream error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Upstream { status: Option<u16>, message: String },

    // =========================================================================
    // Completion Service Errors
    // =========================================================================
    #[error("Model service error: {0}")]
    ModelService(String),

    // =========================================================================
    // Request / Infrastructure Errors
    // =========================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Map a non-success listing status to its error kind.
    pub fn from_listing_status(status: u16) -> Self {
        let message = LISTING_FAILED.to_string();
        match status {
            404 => Self::NotFound { status, message },
            403 => Self::AccessDenied { status, message },
            _ => Self::Upstream {
                status: Some(status),
                message,
            },
        }
    }

    /// Create an upstream error without a status (transport, timeout, decode).
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a model service error.
    pub fn model_service(msg: impl Into<String>) -> Self {
        Self::ModelService(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Caller-facing status classification.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { status, .. } | Self::AccessDenied { status, .. } => *status,
            Self::Upstream { status, .. } => status.unwrap_or(502),
            Self::ModelService(_) => 502,
            Self::InvalidRequest(_) => 422,
            _ => 500,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::ModelService(_) => "MODEL_SERVICE_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) | Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Human-readable detail without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { message, .. }
            | Self::AccessDenied { message, .. }
            | Self::Upstream { message, .. } => message.clone(),
            Self::ModelService(msg) | Self::InvalidRequest(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
