//! Core notice model for the Airbrake notifier client
//!
//! This crate builds Notifier API v2 XML notices from raw error inputs:
//! message, error class, backtrace frames and session data. It knows nothing
//! about HTTP; `airbrake-client` layers the transport on top.
//!
//! # Usage
//!
//! ```ignore
//! use airbrake_core::{ErrorReport, ErrorSite, NoticeBuilder};
//!
//! let builder = NoticeBuilder::new("your-api-key")
//!     .with_environment_name("production");
//!
//! let report = ErrorReport::new("payment declined", "PaymentError")
//!     .with_site(ErrorSite::new("src/pay.rs", 42));
//!
//! let xml = builder.build(&report)?.to_xml()?;
//! ```

pub mod backtrace;
pub mod builder;
pub mod context;
pub mod errors;
pub mod notice;
pub mod response;

// Re-export main types
pub use backtrace::{capture_current, normalize_frames, BacktraceFrame, ErrorSite};
pub use builder::{
    ErrorReport, NoticeBuilder, API_VERSION, NOTIFIER_NAME, NOTIFIER_URL, NOTIFIER_VERSION,
};
pub use context::{MapSessionSource, RequestContext, SessionSource, StaticRequestContext};
pub use errors::NoticeError;
pub use notice::{
    BacktraceInfo, ErrorInfo, Line, Notice, NotifierInfo, RequestInfo, ServerEnvironment, Var,
    VarList,
};
pub use response::NoticeResponse;

// Re-export external dependencies
pub use serde_json;
