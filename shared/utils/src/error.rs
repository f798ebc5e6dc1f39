use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy for the GradWise core.
///
/// Absence or mismatch of data is never an error: degraded extraction and
/// missing fields are surfaced inside report bodies. These variants cover
/// environment failures and caller mistakes only.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GradwiseError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Document processing error: {message}")]
    DocumentProcessing { message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GradwiseError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn document_processing(message: impl Into<String>) -> Self {
        Self::DocumentProcessing {
            message: message.into(),
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::DocumentProcessing { .. } => "DOCUMENT_PROCESSING_ERROR",
            Self::Catalog { .. } => "CATALOG_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type GradwiseResult<T> = Result<T, GradwiseError>;

// Conversion from common error types
impl From<serde_json::Error> for GradwiseError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization failed: {}", error))
    }
}

impl From<std::io::Error> for GradwiseError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<config::ConfigError> for GradwiseError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
