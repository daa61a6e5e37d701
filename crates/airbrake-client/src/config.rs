//! Client configuration and connection-option merging

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use airbrake_core::{RequestContext, SessionSource};

/// Endpoint the notifier API lives at.
pub const API_BASE_URL: &str = "http://airbrake.io";

/// Content type the notifier API requires for notice submissions.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Documented defaults used when the caller does not override an option.
pub const DEFAULT_DNS_CACHE_TTL: Duration = Duration::from_secs(120);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// Caller-supplied connection option overrides.
///
/// Unset fields fall back to the documented defaults. Options the API
/// requires to hold a fixed value are accepted here but overridden in the
/// merge; see [`ConnectionOptions::merged`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub dns_cache_ttl: Option<Duration>,
    pub follow_redirects: Option<bool>,
    pub content_type: Option<String>,
    pub send_expect: Option<bool>,
}

/// Connection options after the required > user-supplied > default merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub dns_cache_ttl: Duration,
    pub follow_redirects: bool,
    pub content_type: String,
    pub send_expect: bool,
}

impl ConnectionOptions {
    /// Merge into the effective option set.
    ///
    /// Required options (follow redirects, content type, suppressed `Expect`
    /// header) always win, user-supplied values beat the documented
    /// defaults for the rest.
    pub fn merged(&self) -> EffectiveOptions {
        EffectiveOptions {
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            dns_cache_ttl: self.dns_cache_ttl.unwrap_or(DEFAULT_DNS_CACHE_TTL),
            follow_redirects: true,
            content_type: CONTENT_TYPE.to_string(),
            send_expect: false,
        }
    }
}

/// Immutable client configuration, fixed at construction time.
///
/// An explicit value the caller owns; nothing here is process-wide or
/// mutable after the client is built.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub connection: ConnectionOptions,
    pub project_root: Option<String>,
    pub environment_name: Option<String>,
    pub app_version: Option<String>,
    pub hostname: Option<String>,
    /// Enables diagnostic logging of notify outcomes.
    pub debug: bool,
    pub request_context: Option<Arc<dyn RequestContext>>,
    pub session_source: Option<Arc<dyn SessionSource>>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_connection_options(mut self, options: ConnectionOptions) -> Self {
        self.connection = options;
        self
    }

    pub fn with_project_root(mut self, root: impl Into<String>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn with_environment_name(mut self, name: impl Into<String>) -> Self {
        self.environment_name = Some(name.into());
        self
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_request_context(mut self, context: Arc<dyn RequestContext>) -> Self {
        self.request_context = Some(context);
        self
    }

    pub fn with_session_source(mut self, source: Arc<dyn SessionSource>) -> Self {
        self.session_source = Some(source);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("connection", &self.connection)
            .field("project_root", &self.project_root)
            .field("environment_name", &self.environment_name)
            .field("app_version", &self.app_version)
            .field("hostname", &self.hostname)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_uses_documented_defaults() {
        let merged = ConnectionOptions::default().merged();
        assert_eq!(merged.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(merged.timeout, DEFAULT_TIMEOUT);
        assert_eq!(merged.dns_cache_ttl, DEFAULT_DNS_CACHE_TTL);
        assert!(merged.follow_redirects);
        assert!(!merged.send_expect);
        assert_eq!(merged.content_type, CONTENT_TYPE);
    }

    #[test]
    fn test_user_overrides_beat_defaults() {
        let options = ConnectionOptions {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let merged = options.merged();
        assert_eq!(merged.timeout, Duration::from_secs(30));
        assert_eq!(merged.connect_timeout, Duration::from_secs(5));
        // untouched options still fall back to the default
        assert_eq!(merged.dns_cache_ttl, DEFAULT_DNS_CACHE_TTL);
    }

    #[test]
    fn test_required_options_always_win() {
        let options = ConnectionOptions {
            follow_redirects: Some(false),
            content_type: Some("application/json".to_string()),
            send_expect: Some(true),
            ..Default::default()
        };
        let merged = options.merged();
        assert!(merged.follow_redirects);
        assert_eq!(merged.content_type, CONTENT_TYPE);
        assert!(!merged.send_expect);
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("abc123");
        assert_eq!(config.base_url, API_BASE_URL);
        assert!(!config.debug);
        assert_eq!(config.environment_name, None);
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = ClientConfig::new("secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
    }
}
