//! The call dispatcher and the capabilities it is handed.
//!
//! The dispatcher is stateless: each call normalizes its request,
//! invokes the transport capability exactly once, and decodes the
//! response. Cancellation is structural (dropping the returned future
//! abandons the in-flight call) and deadlines are the caller's to
//! impose by wrapping the future; nothing here creates or observes
//! timeouts.

use async_trait::async_trait;
use thiserror::Error;

use crate::command::{Command, DecodeError, NormalizeError};

/// Opaque failure raised by the transport collaborator.
///
/// The dispatcher never inspects or classifies it, only forwards it.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Transport capability: sends one request and returns the raw result
/// bytes.
///
/// The collaborator owns connection management, request/response
/// correlation, and event delivery, and must be safe to share across
/// concurrently dispatched calls.
#[async_trait]
pub trait Client: Send + Sync {
    async fn call(
        &self,
        session_id: &str,
        method: &str,
        params: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError>;
}

/// Caller capability: where a call goes and which session it belongs to.
pub trait Caller: Send + Sync {
    /// The transport capability and the session identifier for this call.
    fn call_context(&self) -> (&dyn Client, &str);
}

/// Why a dispatched call failed, by stage.
///
/// `Transport` means the request never succeeded; `Decode` means it did,
/// but the response body was unreadable.
#[derive(Debug, Error)]
pub enum CallError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Dispatch one typed command and decode its response.
pub async fn call<C: Command>(req: &C, caller: &dyn Caller) -> Result<C::Response, CallError> {
    let (client, session_id) = caller.call_context();

    let payload = req.normalize()?;
    let bin = client.call(session_id, C::METHOD, payload).await?;

    let res = serde_json::from_slice(&bin).map_err(|e| DecodeError::new(C::METHOD, e))?;
    Ok(res)
}

/// Dispatch by raw method name and payload, returning the raw response
/// bytes.
///
/// `params` of `None` transmits JSON `null` (a call with no
/// parameters). Callers that do not care about the response body simply
/// drop the returned bytes.
pub async fn call_raw(
    method: &str,
    params: Option<Vec<u8>>,
    caller: &dyn Caller,
) -> Result<Vec<u8>, CallError> {
    let (client, session_id) = caller.call_context();

    let payload = params.unwrap_or_else(|| b"null".to_vec());
    let bin = client.call(session_id, method, payload).await?;
    Ok(bin)
}
