//! Drives the dispatcher against an in-process loopback transport.
//!
//! No remote process is involved; the loopback client answers every
//! method with a canned result so the full normalize → transport →
//! decode path is visible in the logs.
//!
//! ```sh
//! cargo run -p tether-proto --example loopback
//! ```

use anyhow::Result;
use async_trait::async_trait;
use tether_proto::call::{call, Caller, Client, TransportError};
use tether_proto::dom::GetContentQuads;
use tether_proto::input::{DispatchMouseEvent, MouseEventType};
use tether_proto::page::Navigate;
use tracing::info;
use uuid::Uuid;

struct Loopback;

#[async_trait]
impl Client for Loopback {
    async fn call(
        &self,
        session_id: &str,
        method: &str,
        params: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        info!(
            session_id,
            method,
            params = %String::from_utf8_lossy(&params),
            "dispatching"
        );
        let response: &[u8] = match method {
            "Page.navigate" => br#"{"frameId": "frame-1", "loaderId": "loader-1"}"#,
            "DOM.getContentQuads" => br#"{"quads": [[0, 0, 120, 0, 120, 24, 0, 24]]}"#,
            _ => b"{}",
        };
        Ok(response.to_vec())
    }
}

struct Session {
    client: Loopback,
    id: String,
}

impl Caller for Session {
    fn call_context(&self) -> (&dyn Client, &str) {
        (&self.client, &self.id)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let session = Session {
        client: Loopback,
        id: Uuid::new_v4().to_string(),
    };

    let nav = call(
        &Navigate {
            url: "https://example.com".into(),
            ..Default::default()
        },
        &session,
    )
    .await?;
    info!(frame = %nav.frame_id, "navigated");

    let quads = call(
        &GetContentQuads {
            backend_node_id: Some(1),
            ..Default::default()
        },
        &session,
    )
    .await?;
    if let Some(pt) = quads.one_point_inside() {
        info!(x = pt.x, y = pt.y, "clicking element center");
    }

    // A wheel event with zero deltas still transmits both delta fields;
    // watch the dispatch log line above.
    call(
        &DispatchMouseEvent {
            event_type: MouseEventType::MouseWheel,
            x: 10.0,
            y: 20.0,
            ..Default::default()
        },
        &session,
    )
    .await?;

    Ok(())
}
