//! Notice construction and serialization error types

use thiserror::Error;

/// Errors raised while building or serializing a notice.
///
/// These represent caller misuse (missing mandatory fields) or a broken
/// document; transport-layer failures never surface through this type.
#[derive(Error, Debug)]
pub enum NoticeError {
    #[error("API key must not be empty")]
    MissingApiKey,

    #[error("Error message must not be empty")]
    MissingMessage,

    #[error("XML serialization failed: {0}")]
    Serialize(String),

    #[error("XML deserialization failed: {0}")]
    Deserialize(String),
}
