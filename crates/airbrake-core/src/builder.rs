//! Notice assembly from raw error inputs

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::backtrace::{capture_current, normalize_frames, BacktraceFrame, ErrorSite};
use crate::context::{RequestContext, SessionSource};
use crate::errors::NoticeError;
use crate::notice::{
    BacktraceInfo, ErrorInfo, Line, Notice, NotifierInfo, RequestInfo, ServerEnvironment, Var,
    VarList,
};

/// Identity block describing this client library.
pub const NOTIFIER_NAME: &str = "Airbrake Notifier Client for Rust";
pub const NOTIFIER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NOTIFIER_URL: &str = "https://github.com/airbrake-rs/airbrake-notifier";

/// Notifier API schema version the generated documents conform to.
pub const API_VERSION: &str = "2.2";

/// Raw inputs for one notice.
#[derive(Debug, Clone, Default)]
pub struct ErrorReport {
    pub message: String,
    pub error_class: String,
    /// Literal failure location. When present, `frames` are treated as a
    /// callee-labeled raw trace and normalized against it; when absent the
    /// frames are used as given.
    pub error_site: Option<ErrorSite>,
    pub frames: Vec<BacktraceFrame>,
    /// Extra key/value data for this report. Non-string values are rendered
    /// to their JSON text form before insertion.
    pub session: HashMap<String, serde_json::Value>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, error_class: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_class: error_class.into(),
            ..Default::default()
        }
    }

    pub fn with_site(mut self, site: ErrorSite) -> Self {
        self.error_site = Some(site);
        self
    }

    pub fn with_frames(mut self, frames: Vec<BacktraceFrame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_session(mut self, session: HashMap<String, serde_json::Value>) -> Self {
        self.session = session;
        self
    }
}

/// Produces [`Notice`] documents from raw inputs and the ambient context.
///
/// Configured once at client construction and read-only afterwards; every
/// `build` call produces a fresh document.
pub struct NoticeBuilder {
    api_key: String,
    project_root: Option<String>,
    environment_name: Option<String>,
    app_version: Option<String>,
    hostname: Option<String>,
    debug: bool,
    request_context: Option<Arc<dyn RequestContext>>,
    session_source: Option<Arc<dyn SessionSource>>,
}

impl NoticeBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_root: None,
            environment_name: None,
            app_version: None,
            hostname: None,
            debug: false,
            request_context: None,
            session_source: None,
        }
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

    /// Build a notice for the given report.
    ///
    /// Rejects an empty API key or message; everything else degrades to
    /// omitted elements.
    pub fn build(&self, report: &ErrorReport) -> Result<Notice, NoticeError> {
        if self.api_key.trim().is_empty() {
            return Err(NoticeError::MissingApiKey);
        }
        if report.message.trim().is_empty() {
            return Err(NoticeError::MissingMessage);
        }

        let frames = self.resolve_frames(report);
        let session = self.resolve_session(report);
        let params = self
            .request_context
            .as_ref()
            .map(|context| context.params())
            .unwrap_or_default();
        let cgi_data = self
            .request_context
            .as_ref()
            .map(|context| context.cgi_data())
            .unwrap_or_default();

        // Component/action derive from the outermost frame; ambient request
        // parameters may override them. The API names the component
        // parameter "controller".
        let first = frames.first();
        let mut component = first
            .and_then(|frame| frame.class.clone())
            .unwrap_or_else(|| NOTIFIER_NAME.to_string());
        let mut action = first
            .and_then(|frame| frame.function.clone())
            .unwrap_or_else(|| "notify".to_string());
        if let Some(controller) = params.get("controller") {
            component = controller.clone();
        }
        if let Some(param_action) = params.get("action") {
            action = param_action.clone();
        }

        let url = self.resolve_url(&frames);

        let request = RequestInfo {
            params: string_var_list(&params),
            component,
            action,
            url,
            session: json_var_list(&session),
            cgi_data: string_var_list(&cgi_data),
        };

        let error = ErrorInfo {
            message: report.message.clone(),
            class: report.error_class.clone(),
            backtrace: BacktraceInfo {
                line: frames
                    .iter()
                    .map(|frame| Line {
                        file: frame.file.clone(),
                        number: frame.line,
                        method: frame.function.clone(),
                    })
                    .collect(),
            },
        };

        let environment_name = match &self.environment_name {
            Some(name) => name.clone(),
            None if self.debug => "development".to_string(),
            None => "production".to_string(),
        };

        Ok(Notice {
            version: API_VERSION.to_string(),
            api_key: self.api_key.clone(),
            notifier: NotifierInfo {
                name: NOTIFIER_NAME.to_string(),
                version: NOTIFIER_VERSION.to_string(),
                url: NOTIFIER_URL.to_string(),
            },
            request,
            error,
            server_environment: ServerEnvironment {
                project_root: self.project_root.clone(),
                environment_name,
                app_version: self.app_version.clone(),
                hostname: self.hostname.clone(),
            },
        })
    }

    fn resolve_frames(&self, report: &ErrorReport) -> Vec<BacktraceFrame> {
        match &report.error_site {
            Some(site) => normalize_frames(site, &report.frames),
            None if report.frames.is_empty() => {
                debug!("report carried no backtrace, capturing the current stack");
                capture_current()
            }
            None => report.frames.clone(),
        }
    }

    fn resolve_session(&self, report: &ErrorReport) -> HashMap<String, serde_json::Value> {
        if !report.session.is_empty() {
            return report.session.clone();
        }
        self.session_source
            .as_ref()
            .map(|source| source.session_data())
            .unwrap_or_default()
    }

    /// Rebuild the request URL from the ambient context, falling back to the
    /// outermost frame's file path as a pseudo-URL.
    fn resolve_url(&self, frames: &[BacktraceFrame]) -> String {
        if let Some(context) = &self.request_context {
            if let (Some(scheme), Some(host)) = (context.scheme(), context.host()) {
                let path = context.path().unwrap_or_default();
                return format!("{}://{}{}", scheme.to_lowercase(), host, path);
            }
        }
        frames
            .first()
            .map(|frame| frame.file.clone())
            .unwrap_or_default()
    }
}

/// Sorted key order keeps the generated document deterministic.
fn string_var_list(data: &HashMap<String, String>) -> Option<VarList> {
    if data.is_empty() {
        return None;
    }
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();
    Some(VarList {
        var: keys
            .into_iter()
            .map(|key| Var {
                key: key.clone(),
                value: data[key].clone(),
            })
            .collect(),
    })
}

fn json_var_list(data: &HashMap<String, serde_json::Value>) -> Option<VarList> {
    if data.is_empty() {
        return None;
    }
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();
    Some(VarList {
        var: keys
            .into_iter()
            .map(|key| Var {
                key: key.clone(),
                value: render_value(&data[key]),
            })
            .collect(),
    })
}

/// Human-readable string form of a session value; strings pass through
/// unquoted, everything else uses its JSON text form.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
