//! Fetch-domain request interception types.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tether_core::pattern;

use crate::command::{Command, EmptyResult};

/// Stage at which a pattern intercepts the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RequestStage {
    Request,
    Response,
}

/// Selects requests for interception.
///
/// `url_pattern` is a restricted glob (`*` any run, `?` one character,
/// backslash escapes) translated by
/// [`pattern::pattern_to_regex`]; other regex metacharacters pass
/// through unescaped and keep their regex meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPattern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_stage: Option<RequestStage>,
}

impl RequestPattern {
    /// Compile the URL pattern. `None` (absent or empty pattern) means
    /// "match any URL".
    pub fn url_regex(&self) -> Result<Option<Regex>, regex::Error> {
        match &self.url_pattern {
            Some(p) => pattern::compile_pattern(p),
            None => Ok(None),
        }
    }
}

/// `Fetch.enable` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enable {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub patterns: Vec<RequestPattern>,
}

impl Command for Enable {
    const METHOD: &'static str = "Fetch.enable";
    type Response = EmptyResult;
}
