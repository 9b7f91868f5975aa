//! End-to-end dispatch tests over a mock transport.

use std::sync::Mutex;

use async_trait::async_trait;
use tether_proto::call::{call, call_raw, CallError, Caller, Client, TransportError};
use tether_proto::dom::GetContentQuads;
use tether_proto::input::{DispatchMouseEvent, MouseEventType};
use tether_proto::page::Navigate;
use uuid::Uuid;

/// Records what was transmitted and answers with a canned response.
struct MockClient {
    response: Vec<u8>,
    fail: bool,
    calls: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MockClient {
    fn responding(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            response: Vec::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client for MockClient {
    async fn call(
        &self,
        session_id: &str,
        method: &str,
        params: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((session_id.to_string(), method.to_string(), params));
        if self.fail {
            return Err(TransportError::new("connection closed"));
        }
        Ok(self.response.clone())
    }
}

struct Session {
    client: MockClient,
    id: String,
}

impl Session {
    fn new(client: MockClient) -> Self {
        Self {
            client,
            id: Uuid::new_v4().to_string(),
        }
    }
}

impl Caller for Session {
    fn call_context(&self) -> (&dyn Client, &str) {
        (&self.client, &self.id)
    }
}

#[tokio::test]
async fn test_typed_call_decodes_response() {
    let session = Session::new(MockClient::responding(
        br#"{"frameId": "frame-7", "loaderId": "loader-1"}"#,
    ));

    let req = Navigate {
        url: "https://example.com".into(),
        ..Default::default()
    };
    let res = call(&req, &session).await.unwrap();

    assert_eq!(res.frame_id, "frame-7");
    assert_eq!(res.loader_id.as_deref(), Some("loader-1"));

    let calls = session.client.calls();
    assert_eq!(calls.len(), 1);
    let (session_id, method, payload) = &calls[0];
    assert_eq!(session_id, &session.id);
    assert_eq!(method, "Page.navigate");
    // Plain commands transmit their default structural encoding.
    assert_eq!(payload, &serde_json::to_vec(&req).unwrap());
}

#[tokio::test]
async fn test_wheel_event_transmits_explicit_zero_deltas() {
    let session = Session::new(MockClient::responding(b"{}"));

    let wheel = DispatchMouseEvent {
        event_type: MouseEventType::MouseWheel,
        x: 50.0,
        y: 60.0,
        ..Default::default()
    };
    call(&wheel, &session).await.unwrap();

    let calls = session.client.calls();
    let transmitted: serde_json::Value = serde_json::from_slice(&calls[0].2).unwrap();
    assert_eq!(transmitted["deltaX"], 0.0);
    assert_eq!(transmitted["deltaY"], 0.0);
}

#[tokio::test]
async fn test_transport_failure_surfaces_unchanged() {
    let session = Session::new(MockClient::failing());

    let err = call(&Navigate::default(), &session).await.unwrap_err();
    assert!(matches!(err, CallError::Transport(_)));
    assert_eq!(session.client.calls().len(), 1);
}

#[tokio::test]
async fn test_decode_failure_is_distinct_from_transport_failure() {
    // The call happened (the transport was invoked and answered) but
    // the response body is unreadable as the expected shape.
    let session = Session::new(MockClient::responding(b"not json"));

    let err = call(&Navigate::default(), &session).await.unwrap_err();
    assert!(matches!(err, CallError::Decode(_)));
    assert_eq!(session.client.calls().len(), 1);
}

#[tokio::test]
async fn test_call_raw_without_params_transmits_null() {
    let session = Session::new(MockClient::responding(br#"{"anything": true}"#));

    let raw = call_raw("Target.getTargets", None, &session).await.unwrap();
    assert_eq!(raw, br#"{"anything": true}"#);

    let calls = session.client.calls();
    assert_eq!(calls[0].1, "Target.getTargets");
    assert_eq!(calls[0].2, b"null");
}

#[tokio::test]
async fn test_call_raw_passes_params_through() {
    let session = Session::new(MockClient::responding(b"{}"));

    call_raw(
        "Emulation.setDeviceMetricsOverride",
        Some(br#"{"width": 800}"#.to_vec()),
        &session,
    )
    .await
    .unwrap();

    assert_eq!(session.client.calls()[0].2, br#"{"width": 800}"#);
}

#[tokio::test]
async fn test_quads_flow_end_to_end() {
    let session = Session::new(MockClient::responding(
        br#"{"quads": [[0, 0, 2, 0, 2, 2, 0, 2], [8, 8, 10, 8, 10, 10, 8, 10]]}"#,
    ));

    let res = call(
        &GetContentQuads {
            backend_node_id: Some(12),
            ..Default::default()
        },
        &session,
    )
    .await
    .unwrap();

    let pt = res.one_point_inside().unwrap();
    assert_eq!((pt.x, pt.y), (1.0, 1.0));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let session = Session::new(MockClient::responding(br#"{"frameId": "f"}"#));

    let nav_a = Navigate { url: "https://a.example".into(), ..Default::default() };
    let nav_b = Navigate { url: "https://b.example".into(), ..Default::default() };
    let nav_c = Navigate { url: "https://c.example".into(), ..Default::default() };
    let a = call(&nav_a, &session);
    let b = call(&nav_b, &session);
    let c = call(&nav_c, &session);

    let (ra, rb, rc) = tokio::join!(a, b, c);
    assert!(ra.is_ok() && rb.is_ok() && rc.is_ok());
    assert_eq!(session.client.calls().len(), 3);
}
