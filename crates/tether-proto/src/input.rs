//! Input-domain commands: mouse and touch dispatch.

use serde::{Deserialize, Serialize};
use tether_core::json::Json;
use tether_core::time::TimeSinceEpoch;

use crate::command::{Command, EmptyResult, NormalizeError};

/// Discriminant of a [`DispatchMouseEvent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MousePressed,
    MouseReleased,
    #[default]
    MouseMoved,
    MouseWheel,
}

/// Mouse button held during the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    None,
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

/// `Input.dispatchMouseEvent` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchMouseEvent {
    #[serde(rename = "type")]
    pub event_type: MouseEventType,
    pub x: f64,
    pub y: f64,
    /// Bitfield: Alt=1, Ctrl=2, Meta=4, Shift=8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TimeSinceEpoch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<MouseButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_count: Option<i64>,
    /// Omitted from the default encoding when zero; wheel events patch
    /// it back in, see [`Command::normalize`].
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delta_x: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delta_y: f64,
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl Command for DispatchMouseEvent {
    const METHOD: &'static str = "Input.dispatchMouseEvent";
    type Response = EmptyResult;

    /// The receiver reads a missing delta as "not a wheel event", not as
    /// a zero delta, so wheel events must always carry both fields even
    /// when the schema marks them optional.
    fn normalize(&self) -> Result<Vec<u8>, NormalizeError> {
        let encoded = serde_json::to_vec(self).map_err(|e| NormalizeError::new(Self::METHOD, e))?;
        if self.event_type != MouseEventType::MouseWheel {
            return Ok(encoded);
        }
        let patched = Json::from_raw(encoded)
            .set("deltaX", self.delta_x)
            .and_then(|j| j.set("deltaY", self.delta_y))
            .map_err(|e| NormalizeError::new(Self::METHOD, e))?;
        Ok(patched.to_bytes())
    }
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<f64>,
}

impl TouchPoint {
    /// Reposition the contact point.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

/// Discriminant of a [`DispatchTouchEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchEventType {
    TouchStart,
    TouchEnd,
    TouchMove,
    TouchCancel,
}

/// `Input.dispatchTouchEvent` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchTouchEvent {
    #[serde(rename = "type")]
    pub event_type: TouchEventType,
    /// Active contact points; empty for `TouchEnd`/`TouchCancel`.
    pub touch_points: Vec<TouchPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<i64>,
}

impl Command for DispatchTouchEvent {
    const METHOD: &'static str = "Input.dispatchTouchEvent";
    type Response = EmptyResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(delta_x: f64, delta_y: f64) -> DispatchMouseEvent {
        DispatchMouseEvent {
            event_type: MouseEventType::MouseWheel,
            x: 100.0,
            y: 200.0,
            delta_x,
            delta_y,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_encoding_omits_zero_deltas() {
        let encoded = serde_json::to_string(&wheel(0.0, 0.0)).unwrap();
        assert!(!encoded.contains("deltaX"));
        assert!(!encoded.contains("deltaY"));
    }

    #[test]
    fn test_wheel_normalize_forces_zero_deltas_present() {
        let payload = wheel(0.0, 0.0).normalize().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["deltaX"], 0.0);
        assert_eq!(value["deltaY"], 0.0);
        assert_eq!(value["type"], "mouseWheel");
    }

    #[test]
    fn test_wheel_normalize_keeps_nonzero_deltas() {
        let payload = wheel(0.0, -120.5).normalize().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["deltaX"], 0.0);
        assert_eq!(value["deltaY"], -120.5);
    }

    #[test]
    fn test_non_wheel_event_uses_default_encoding() {
        let press = DispatchMouseEvent {
            event_type: MouseEventType::MousePressed,
            x: 1.0,
            y: 2.0,
            button: Some(MouseButton::Left),
            click_count: Some(1),
            ..Default::default()
        };
        assert_eq!(
            press.normalize().unwrap(),
            serde_json::to_vec(&press).unwrap()
        );

        let encoded = serde_json::to_string(&press).unwrap();
        assert!(!encoded.contains("deltaX"));
        assert!(encoded.contains(r#""button":"left""#));
    }

    #[test]
    fn test_touch_event_wire_shape() {
        let touch = DispatchTouchEvent {
            event_type: TouchEventType::TouchStart,
            touch_points: vec![TouchPoint {
                x: 5.0,
                y: 6.0,
                ..Default::default()
            }],
            modifiers: None,
        };
        assert_eq!(
            serde_json::to_string(&touch).unwrap(),
            r#"{"type":"touchStart","touchPoints":[{"x":5.0,"y":6.0}]}"#
        );
    }

    #[test]
    fn test_touch_point_move_to() {
        let mut pt = TouchPoint {
            x: 1.0,
            y: 1.0,
            ..Default::default()
        };
        pt.move_to(30.0, 40.0);
        assert_eq!((pt.x, pt.y), (30.0, 40.0));
    }
}
