//! Injectable ambient data sources
//!
//! Request, server and cookie data are modeled as traits the caller
//! supplies, so the core stays decoupled from any particular host runtime.
//! Request parameters and the session store are independent sources rather
//! than one conflated cookie fallback.

use std::collections::HashMap;

/// Ambient HTTP request data exposed by the host application.
pub trait RequestContext: Send + Sync {
    /// Request parameters (query string and form body).
    fn params(&self) -> HashMap<String, String>;

    /// Lowercased request scheme, e.g. `http`, when the error happened while
    /// serving an HTTP request.
    fn scheme(&self) -> Option<String>;

    /// Host the request was addressed to.
    fn host(&self) -> Option<String>;

    /// Request path, including the leading slash.
    fn path(&self) -> Option<String>;

    /// Server/CGI variables.
    fn cgi_data(&self) -> HashMap<String, String>;
}

/// Ambient session/cookie store consulted when a report carries no session
/// data of its own.
pub trait SessionSource: Send + Sync {
    fn session_data(&self) -> HashMap<String, serde_json::Value>;
}

/// A fixed snapshot of request data, handy for non-web hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRequestContext {
    pub params: HashMap<String, String>,
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub path: Option<String>,
    pub cgi_data: HashMap<String, String>,
}

impl RequestContext for StaticRequestContext {
    fn params(&self) -> HashMap<String, String> {
        self.params.clone()
    }

    fn scheme(&self) -> Option<String> {
        self.scheme.clone()
    }

    fn host(&self) -> Option<String> {
        self.host.clone()
    }

    fn path(&self) -> Option<String> {
        self.path.clone()
    }

    fn cgi_data(&self) -> HashMap<String, String> {
        self.cgi_data.clone()
    }
}

/// A fixed key/value session store.
#[derive(Debug, Clone, Default)]
pub struct MapSessionSource {
    pub data: HashMap<String, serde_json::Value>,
}

impl MapSessionSource {
    pub fn new(data: HashMap<String, serde_json::Value>) -> Self {
        Self { data }
    }
}

impl SessionSource for MapSessionSource {
    fn session_data(&self) -> HashMap<String, serde_json::Value> {
        self.data.clone()
    }
}
