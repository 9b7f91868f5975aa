//! Typed commands, events, and the event registry.

use std::any::Any;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request could not be turned into transmittable bytes.
///
/// Only custom [`Command::normalize`] overrides can realistically hit
/// this; the structural default never fails for well-formed input.
#[derive(Debug, Error)]
#[error("failed to normalize params for {method}: {source}")]
pub struct NormalizeError {
    method: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl NormalizeError {
    pub fn new(
        method: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            method,
            source: source.into(),
        }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }
}

/// Response bytes could not be read as the expected shape.
///
/// Distinct from a transport failure: the call happened, the response
/// was unreadable.
#[derive(Debug, Error)]
#[error("failed to decode {method} response: {source}")]
pub struct DecodeError {
    method: String,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub fn new(method: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            method: method.into(),
            source,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

/// One remote operation: wire method identifier, parameter shape, and
/// response shape.
pub trait Command: Serialize + Send + Sync {
    /// Wire method identifier, `"Domain.name"`.
    const METHOD: &'static str;

    /// Shape the response bytes decode into.
    type Response: DeserializeOwned;

    /// The raw bytes to transmit for this request.
    ///
    /// Defaults to the plain structural encoding. Override when the
    /// declared schema is not enough: when the receiver requires a
    /// field to be present even at its default value, take the default
    /// encoding and patch the field back in (see
    /// [`DispatchMouseEvent`](crate::input::DispatchMouseEvent)).
    fn normalize(&self) -> Result<Vec<u8>, NormalizeError> {
        serde_json::to_vec(self).map_err(|e| NormalizeError::new(Self::METHOD, e))
    }
}

/// A notification pushed by the remote side.
pub trait Event: DeserializeOwned {
    /// Wire method identifier, `"Domain.name"`.
    const METHOD: &'static str;
}

/// Response of commands whose result object carries no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EmptyResult {}

/// Split a `"Domain.name"` method identifier into its halves.
///
/// Returns `None` unless both halves are non-empty.
pub fn parse_method_name(method: &str) -> Option<(&str, &str)> {
    method
        .split_once('.')
        .filter(|(domain, name)| !domain.is_empty() && !name.is_empty())
}

/// A decoded event, downcastable to its registered type.
pub type AnyEvent = Box<dyn Any + Send>;

type EventDecoder = fn(&[u8]) -> Result<AnyEvent, DecodeError>;

/// Explicit table from event method names to typed decoders.
///
/// Built once at startup by [`register`](Self::register) calls and
/// passed by reference to whatever tooling needs the mapping; only ever
/// read after that.
#[derive(Debug, Default)]
pub struct EventRegistry {
    decoders: HashMap<&'static str, EventDecoder>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the decoder for `E` under its method identifier.
    pub fn register<E: Event + Send + 'static>(&mut self) {
        self.decoders.insert(E::METHOD, decode_event::<E>);
    }

    pub fn contains(&self, method: &str) -> bool {
        self.decoders.contains_key(method)
    }

    /// Decode raw event bytes by method name.
    ///
    /// `None` means the method is not registered, which is not an error;
    /// generic
    /// tooling skips events it has no type for.
    pub fn decode(&self, method: &str, raw: &[u8]) -> Option<Result<AnyEvent, DecodeError>> {
        self.decoders.get(method).map(|decode| decode(raw))
    }
}

fn decode_event<E: Event + Send + 'static>(raw: &[u8]) -> Result<AnyEvent, DecodeError> {
    serde_json::from_slice::<E>(raw)
        .map(|event| Box::new(event) as AnyEvent)
        .map_err(|e| DecodeError::new(E::METHOD, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::LoadEventFired;

    #[test]
    fn test_parse_method_name() {
        assert_eq!(
            parse_method_name("Page.loadEventFired"),
            Some(("Page", "loadEventFired"))
        );
        assert_eq!(parse_method_name("noseparator"), None);
        assert_eq!(parse_method_name(".name"), None);
        assert_eq!(parse_method_name("Domain."), None);
    }

    #[test]
    fn test_default_normalize_is_structural_encoding() {
        let req = crate::page::Navigate {
            url: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(req.normalize().unwrap(), serde_json::to_vec(&req).unwrap());
    }

    #[test]
    fn test_empty_result_decodes_from_empty_object() {
        let res: EmptyResult = serde_json::from_str("{}").unwrap();
        assert_eq!(res, EmptyResult {});
    }

    #[test]
    fn test_registry_decodes_registered_event() {
        let mut registry = EventRegistry::new();
        registry.register::<LoadEventFired>();
        assert!(registry.contains("Page.loadEventFired"));

        let decoded = registry
            .decode("Page.loadEventFired", br#"{"timestamp": 12.5}"#)
            .unwrap()
            .unwrap();
        let event = decoded.downcast::<LoadEventFired>().unwrap();
        assert_eq!(event.timestamp.as_secs_f64(), 12.5);
    }

    #[test]
    fn test_registry_reports_unknown_method_as_absent() {
        let registry = EventRegistry::new();
        assert!(registry.decode("Page.loadEventFired", b"{}").is_none());
        assert!(!registry.contains("Page.loadEventFired"));
    }

    #[test]
    fn test_registry_surfaces_decode_failure() {
        let mut registry = EventRegistry::new();
        registry.register::<LoadEventFired>();

        let err = registry
            .decode("Page.loadEventFired", b"not json")
            .unwrap()
            .unwrap_err();
        assert_eq!(err.method(), "Page.loadEventFired");
    }
}
