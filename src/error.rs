//! Error handling for Argo ingestion operations.
//!
//! Provides error types with context for directory scanning, file reading,
//! configuration loading and aggregate builds.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArgoError {
    #[error("Failed to read file: {path} - {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing failed: {reason}")]
    ProcessingFailed { reason: String },

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Aggregate build failed: {0}")]
    BuildFailed(#[source] Arc<ArgoError>),
}

impl ArgoError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a pass-level processing error
    pub fn processing_failed(reason: impl Into<String>) -> Self {
        Self::ProcessingFailed {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArgoError>;
