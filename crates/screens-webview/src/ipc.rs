//! IPC protocol between the hosted page and Rust.
//!
//! JavaScript calls a method on the injected `window.screens.api` object,
//! which posts a JSON envelope through `window.ipc.postMessage`. The
//! `ipc_handler` registered on the webview parses it back into an
//! `IpcMessage`.

use serde::{Deserialize, Serialize};

/// A typed IPC message from JavaScript to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload (HTML text for both detail commands).
    pub payload: IpcPayload,
}

/// Payload of an IPC message — either a simple string or structured JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    // Before `Json`, so a literal `null` matches here rather than as
    // `Value::Null`.
    None,
    Json(serde_json::Value),
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Create a simple text message.
    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Text(text.into()),
        }
    }

    /// The payload as text, if it is one.
    pub fn payload_text(&self) -> Option<&str> {
        match &self.payload {
            IpcPayload::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// JavaScript snippet that installs the API object on the page.
/// Injected as an initialization script into the primary webview.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    window.screens = window.screens || {};
    window.screens.api = {
        open_detail: function(html) {
            window.ipc.postMessage(JSON.stringify({
                kind: "open_detail",
                payload: html
            }));
        },
        open_new_window: function(html) {
            window.ipc.postMessage(JSON.stringify({
                kind: "open_new_window",
                payload: html
            }));
        }
    };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_payload() {
        let msg = IpcMessage::from_json(r#"{"kind":"open_detail","payload":"<p>hi</p>"}"#).unwrap();
        assert_eq!(msg.kind, "open_detail");
        assert_eq!(msg.payload_text(), Some("<p>hi</p>"));
    }

    #[test]
    fn parses_json_payload() {
        let msg = IpcMessage::from_json(r#"{"kind":"open_detail","payload":{"a":1}}"#).unwrap();
        assert!(matches!(msg.payload, IpcPayload::Json(_)));
        assert_eq!(msg.payload_text(), None);
    }

    #[test]
    fn parses_null_payload() {
        let msg = IpcMessage::from_json(r#"{"kind":"open_detail","payload":null}"#).unwrap();
        assert!(matches!(msg.payload, IpcPayload::None));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(IpcMessage::from_json("not json").is_none());
        assert!(IpcMessage::from_json(r#"{"payload":"x"}"#).is_none());
    }

    #[test]
    fn text_constructor_round_trips() {
        let msg = IpcMessage::text("open_detail", "<html></html>");
        let raw = serde_json::to_string(&msg).unwrap();
        let back = IpcMessage::from_json(&raw).unwrap();
        assert_eq!(back.kind, "open_detail");
        assert_eq!(back.payload_text(), Some("<html></html>"));
    }

    #[test]
    fn bridge_script_exposes_both_api_methods() {
        assert!(BRIDGE_INIT_SCRIPT.contains("window.screens.api"));
        assert!(BRIDGE_INIT_SCRIPT.contains("open_detail:"));
        assert!(BRIDGE_INIT_SCRIPT.contains("open_new_window:"));
        assert!(BRIDGE_INIT_SCRIPT.contains("window.ipc.postMessage"));
    }
}
