//! Error types used across the index client.
//!
//! `ClientError` wraps the shared `IndexError` and adds the failures that only
//! the binary can hit: HTTP transport, non-success statuses, spreadsheet
//! output, and configuration.
use std::io;

use index_common::IndexError;
use reqwest::StatusCode;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Unified error type for the application.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error from the shared library (ticker file, response decoding, allocation).
    #[error(transparent)]
    Index(#[from] IndexError),

    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level HTTP failure: connection refused, timeout, broken body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The quote service answered with a non-success status.
    #[error("Quote service returned {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, truncated.
        body: String,
    },

    /// Failure while writing the spreadsheet.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Invalid or missing configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more batches could not be fetched.
    #[error("{failed} of {total} batches failed; first failure: {first}")]
    BatchesFailed {
        /// Number of failed batches.
        failed: usize,
        /// Number of batches attempted.
        total: usize,
        /// Description of the first failure.
        first: String,
    },
}

impl ClientError {
    /// Whether repeating the request may succeed: transport failures,
    /// timeouts, rate limiting, and server-side errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ClientError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
