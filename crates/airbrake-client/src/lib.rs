//! # airbrake-client
//!
//! HTTP client for the Airbrake Notifier API v2.
//!
//! This crate provides functionality for:
//! - Building error notices from reports and ambient context (`airbrake-core`)
//! - Submitting notices over a single blocking POST with merged connection
//!   options
//! - Interpreting the response into an optional notice id
//!
//! Transport failures never raise; the caller gets `None` and decides what
//! to do.
//!
//! ```ignore
//! use airbrake_client::{AirbrakeClient, ClientConfig};
//! use airbrake_client::{ErrorReport, ErrorSite};
//!
//! let client = AirbrakeClient::new(
//!     ClientConfig::new("your-api-key").with_environment_name("production"),
//! )?;
//!
//! let report = ErrorReport::new("payment declined", "PaymentError")
//!     .with_site(ErrorSite::new("src/pay.rs", 42));
//!
//! if let Some(notice_id) = client.notify(&report).await? {
//!     println!("created notice {notice_id}");
//! }
//! ```

mod client;
mod config;
mod errors;
mod transport;

pub use client::AirbrakeClient;
pub use config::{
    ClientConfig, ConnectionOptions, EffectiveOptions, API_BASE_URL, CONTENT_TYPE,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_DNS_CACHE_TTL, DEFAULT_TIMEOUT,
};
pub use errors::ClientError;
pub use transport::{Transport, TransportResult};

// Re-export the core model so callers need only one dependency.
pub use airbrake_core::{
    BacktraceFrame, ErrorReport, ErrorSite, MapSessionSource, Notice, NoticeBuilder, NoticeError,
    NoticeResponse, RequestContext, SessionSource, StaticRequestContext,
};
