//! Page-domain commands and lifecycle events.

use serde::{Deserialize, Serialize};
use tether_core::time::MonotonicTime;

use crate::command::{Command, EmptyResult, Event};

/// `Page.navigate` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigate {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Navigate within this frame instead of the top one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<String>,
}

/// Result of [`Navigate`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResult {
    pub frame_id: String,
    #[serde(default)]
    pub loader_id: Option<String>,
    /// Set when the navigation was answered with a network error.
    #[serde(default)]
    pub error_text: Option<String>,
}

impl Command for Navigate {
    const METHOD: &'static str = "Page.navigate";
    type Response = NavigateResult;
}

/// `Page.stopLoading` request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StopLoading {}

impl Command for StopLoading {
    const METHOD: &'static str = "Page.stopLoading";
    type Response = EmptyResult;
}

/// `Page.loadEventFired` event.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadEventFired {
    pub timestamp: MonotonicTime,
}

impl Event for LoadEventFired {
    const METHOD: &'static str = "Page.loadEventFired";
}
