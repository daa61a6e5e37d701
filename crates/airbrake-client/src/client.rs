//! Caller-facing notifier client

use std::collections::HashMap;
use std::fmt;

use airbrake_core::{ErrorReport, ErrorSite, NoticeBuilder, API_VERSION};
use tracing::info;
use url::Url;

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::transport::{Transport, TransportResult};

/// Client for the Airbrake Notifier API.
///
/// Construct once with an immutable [`ClientConfig`]; each notify call
/// builds a fresh notice, issues one blocking POST and interprets the
/// response. Shareable across tasks.
pub struct AirbrakeClient {
    builder: NoticeBuilder,
    transport: Transport,
    debug: bool,
}

impl AirbrakeClient {
    /// Create a client, validating the base URL and the API key up front.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Url::parse(&config.base_url)?;
        if config.api_key.trim().is_empty() {
            return Err(airbrake_core::NoticeError::MissingApiKey.into());
        }

        let mut builder = NoticeBuilder::new(&config.api_key).with_debug(config.debug);
        if let Some(root) = &config.project_root {
            builder = builder.with_project_root(root);
        }
        if let Some(name) = &config.environment_name {
            builder = builder.with_environment_name(name);
        }
        if let Some(version) = &config.app_version {
            builder = builder.with_app_version(version);
        }
        if let Some(hostname) = &config.hostname {
            builder = builder.with_hostname(hostname);
        }
        if let Some(context) = &config.request_context {
            builder = builder.with_request_context(context.clone());
        }
        if let Some(source) = &config.session_source {
            builder = builder.with_session_source(source.clone());
        }

        let transport = Transport::new(
            config.base_url.clone(),
            config.connection.merged(),
            config.debug,
        )?;

        Ok(Self {
            builder,
            transport,
            debug: config.debug,
        })
    }

    /// Report an error, returning the created notice id.
    ///
    /// `None` means the API did not accept the notice; transport failures
    /// are absorbed into that outcome and never raised. Errors surface only
    /// for caller misuse (empty message, broken document).
    pub async fn notify(&self, report: &ErrorReport) -> Result<Option<String>, ClientError> {
        let notice = self.builder.build(report)?;
        let xml = notice.to_xml()?;
        let result = self.transport.send(&notices_path(), xml).await;
        Ok(self.interpret(result))
    }

    /// Report any standard error, deriving message and class from it.
    ///
    /// With no site and no frames the builder captures the current call
    /// stack, so this is usable straight from a catch site.
    pub async fn notify_error<E: std::error::Error>(
        &self,
        error: &E,
        site: Option<ErrorSite>,
        session: HashMap<String, serde_json::Value>,
    ) -> Result<Option<String>, ClientError> {
        let mut report = ErrorReport::new(error.to_string(), std::any::type_name::<E>());
        report.error_site = site;
        report.session = session;
        self.notify(&report).await
    }

    fn interpret(&self, result: TransportResult) -> Option<String> {
        let response = result.response.as_ref();
        let notice_id = response.and_then(|r| r.id.clone());
        if self.debug {
            if let Some(url) = response.and_then(|r| r.url.as_deref()) {
                info!("notice created: {}", url);
            }
        }
        notice_id
    }
}

impl fmt::Debug for AirbrakeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirbrakeClient")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Versioned submission path, derived from the schema major version.
fn notices_path() -> String {
    let major: u32 = API_VERSION
        .split('.')
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2);
    format!("notifier_api/v{}/notices", major)
}
