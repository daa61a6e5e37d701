//! HTTP execution against the notifier API

use airbrake_core::NoticeResponse;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::EffectiveOptions;
use crate::errors::ClientError;

/// Normalized outcome of one POST to the notifier API.
#[derive(Debug, Clone, Default)]
pub struct TransportResult {
    /// HTTP status code; 0 when the request never completed.
    pub http_status: u16,
    pub error_message: Option<String>,
    /// True when the request completed with a 1xx-3xx status.
    pub success: bool,
    /// Parsed response document, when a body was returned.
    pub response: Option<NoticeResponse>,
}

/// Stateless single-shot sender; every `send` is independent.
///
/// The inner `reqwest::Client` is immutable after construction and safe for
/// concurrent independent calls, so notifications from multiple tasks cannot
/// race on option state.
pub struct Transport {
    client: Client,
    base_url: String,
    options: EffectiveOptions,
    debug: bool,
}

impl Transport {
    /// Build a transport from merged connection options.
    ///
    /// The DNS-cache TTL option has no per-client knob in reqwest; it stays
    /// part of the merged option set but is not applied here.
    pub fn new(
        base_url: impl Into<String>,
        options: EffectiveOptions,
        debug: bool,
    ) -> Result<Self, ClientError> {
        let redirect = if options.follow_redirects {
            Policy::limited(10)
        } else {
            Policy::none()
        };
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .redirect(redirect)
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            options,
            debug,
        })
    }

    /// POST a serialized notice to `base_url + "/" + path`.
    ///
    /// Never fails for network-layer problems: connection errors, timeouts
    /// and non-2xx/3xx statuses all come back as an unsuccessful result.
    pub async fn send(&self, path: &str, body: String) -> TransportResult {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!("posting notice to {}", url);

        let outcome = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, self.options.content_type.as_str())
            .body(body)
            .send()
            .await;

        let result = match outcome {
            Ok(response) => {
                let status = response.status().as_u16();
                let success = (100..400).contains(&status);
                match response.text().await {
                    Ok(body) => {
                        let parsed = if body.trim().is_empty() {
                            None
                        } else {
                            Some(NoticeResponse::parse(&body))
                        };
                        TransportResult {
                            http_status: status,
                            error_message: if success { None } else { Some(body) },
                            success,
                            response: parsed,
                        }
                    }
                    Err(err) => TransportResult {
                        http_status: status,
                        error_message: Some(err.to_string()),
                        success: false,
                        response: None,
                    },
                }
            }
            Err(err) => TransportResult {
                http_status: 0,
                error_message: Some(err.to_string()),
                success: false,
                response: None,
            },
        };

        if self.debug && !result.success {
            warn!(
                "notifier error: received HTTP status {}, '{}'",
                result.http_status,
                result.error_message.as_deref().unwrap_or("")
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionOptions;
    use httpmock::prelude::*;

    fn transport(base_url: &str) -> Transport {
        Transport::new(base_url, ConnectionOptions::default().merged(), false).unwrap()
    }

    #[tokio::test]
    async fn test_send_success_parses_notice_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/notifier_api/v2/notices")
                .header("content-type", "text/xml; charset=utf-8");
            then.status(200)
                .header("content-type", "text/xml")
                .body("<notice><id>42</id><url>https://airbrake.io/errors/42</url></notice>");
        });

        let result = transport(&server.base_url())
            .send("notifier_api/v2/notices", "<notice/>".to_string())
            .await;

        mock.assert();
        assert!(result.success);
        assert_eq!(result.http_status, 200);
        let response = result.response.unwrap();
        assert_eq!(response.id.as_deref(), Some("42"));
        assert_eq!(response.url.as_deref(), Some("https://airbrake.io/errors/42"));
    }

    #[tokio::test]
    async fn test_send_server_error_is_absorbed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/notifier_api/v2/notices");
            then.status(500).body("internal error");
        });

        let result = transport(&server.base_url())
            .send("notifier_api/v2/notices", "<notice/>".to_string())
            .await;

        assert!(!result.success);
        assert_eq!(result.http_status, 500);
        assert_eq!(result.error_message.as_deref(), Some("internal error"));
        // a non-XML error page parses to an empty response document
        assert_eq!(result.response.unwrap(), NoticeResponse::default());
    }

    #[tokio::test]
    async fn test_send_connection_failure_does_not_raise() {
        // nothing listens on this port
        let result = transport("http://127.0.0.1:9")
            .send("notifier_api/v2/notices", "<notice/>".to_string())
            .await;

        assert!(!result.success);
        assert_eq!(result.http_status, 0);
        assert!(result.error_message.is_some());
        assert!(result.response.is_none());
    }

    #[tokio::test]
    async fn test_send_empty_body_yields_no_response_document() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/notifier_api/v2/notices");
            then.status(200);
        });

        let result = transport(&server.base_url())
            .send("notifier_api/v2/notices", "<notice/>".to_string())
            .await;

        assert!(result.success);
        assert!(result.response.is_none());
    }

    #[tokio::test]
    async fn test_send_joins_base_url_and_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/notifier_api/v2/notices");
            then.status(200);
        });

        // trailing and leading slashes collapse into a single separator
        let base = format!("{}/", server.base_url());
        transport(&base)
            .send("/notifier_api/v2/notices", "<notice/>".to_string())
            .await;

        mock.assert();
    }
}
