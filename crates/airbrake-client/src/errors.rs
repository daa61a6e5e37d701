//! Client error types

use airbrake_core::NoticeError;
use thiserror::Error;

/// Errors the client raises to the caller.
///
/// These are configuration and build problems only. Transport failures
/// (connection, DNS, timeout, non-2xx/3xx statuses) are absorbed into the
/// notify outcome and never raised.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Notice error: {0}")]
    Notice(#[from] NoticeError),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}
