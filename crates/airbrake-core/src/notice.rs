//! Notice wire model for the Notifier API v2 XML schema
//!
//! Field declaration order matches the element order the schema expects, so
//! the serde-derived serializer emits a conforming document. Attributes use
//! quick-xml's `@` field convention; repeated `<var>`/`<line>` elements live
//! behind wrapper structs.

use serde::{Deserialize, Serialize};

use crate::errors::NoticeError;

/// One `<var key="...">value</var>` entry inside params/session/cgi-data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Wrapper for a repeated `<var>` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VarList {
    #[serde(rename = "var", default)]
    pub var: Vec<Var>,
}

/// Identity of this client library, distinct from the reporting application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierInfo {
    pub name: String,
    pub version: String,
    pub url: String,
}

/// The request that was being served when the error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<VarList>,
    pub component: String,
    pub action: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session: Option<VarList>,
    #[serde(
        rename = "cgi-data",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub cgi_data: Option<VarList>,
}

/// One `<line file=".." number=".." method=".."/>` backtrace entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    #[serde(rename = "@file")]
    pub file: String,
    #[serde(rename = "@number")]
    pub number: u32,
    #[serde(rename = "@method", skip_serializing_if = "Option::is_none", default)]
    pub method: Option<String>,
}

/// Wrapper for the repeated `<line>` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BacktraceInfo {
    #[serde(rename = "line", default)]
    pub line: Vec<Line>,
}

/// The error itself: message, class and ordered backtrace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    pub class: String,
    pub backtrace: BacktraceInfo,
}

/// Environment of the server the application runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEnvironment {
    #[serde(
        rename = "project-root",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub project_root: Option<String>,
    #[serde(rename = "environment-name")]
    pub environment_name: String,
    #[serde(
        rename = "app-version",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hostname: Option<String>,
}

/// The complete notice document sent to the API.
///
/// Built fresh per notify call, serialized and discarded. `api_key` and
/// `error.message` are mandatory; every other field is omitted when the
/// host has nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "notice")]
pub struct Notice {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "api-key")]
    pub api_key: String,
    pub notifier: NotifierInfo,
    pub request: RequestInfo,
    pub error: ErrorInfo,
    #[serde(rename = "server-environment")]
    pub server_environment: ServerEnvironment,
}

impl Notice {
    /// Serialize to the wire XML document. Text and attribute values are
    /// escaped exactly once by the serializer.
    pub fn to_xml(&self) -> Result<String, NoticeError> {
        quick_xml::se::to_string(self).map_err(|e| NoticeError::Serialize(e.to_string()))
    }

    /// Parse a notice document back into the model.
    pub fn from_xml(xml: &str) -> Result<Self, NoticeError> {
        quick_xml::de::from_str(xml).map_err(|e| NoticeError::Deserialize(e.to_string()))
    }
}
