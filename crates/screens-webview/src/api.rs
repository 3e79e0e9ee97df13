//! The callback API exposed to the hosted page.
//!
//! Both commands are stateless: each call produces one independent
//! window-creation request. Requests are handed to a `WindowSink`, the
//! seam between this crate and whatever actually creates windows (the
//! winit event loop in production, a recording double in tests).

use screens_common::BridgeError;

use crate::ipc::IpcMessage;
use crate::scratch;

/// Fixed size of every detail window.
pub const DETAIL_WIDTH: u32 = 800;
pub const DETAIL_HEIGHT: u32 = 1000;

/// Title for inline-HTML detail windows.
pub const DETAIL_TITLE: &str = "Repair Details";
/// Title for scratch-file-backed detail windows.
pub const NEW_WINDOW_TITLE: &str = "Repair Details (New Window)";

/// IPC kinds the page is allowed to send. Anything else is rejected.
pub const ALLOWED_API_KINDS: &[&str] = &["open_detail", "open_new_window"];

pub fn is_api_kind_allowed(kind: &str) -> bool {
    ALLOWED_API_KINDS.contains(&kind)
}

/// What a new window should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowContent {
    /// Inline HTML handed straight to the webview.
    Html(String),
    /// A URL to load (a `file://` URL for scratch pages).
    Url(String),
}

/// A request for one new native window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub content: WindowContent,
}

impl WindowRequest {
    /// An inline-HTML detail window.
    pub fn detail(html: impl Into<String>) -> Self {
        Self {
            title: DETAIL_TITLE.to_string(),
            width: DETAIL_WIDTH,
            height: DETAIL_HEIGHT,
            content: WindowContent::Html(html.into()),
        }
    }

    /// A detail window backed by a local file URL.
    pub fn detail_file(url: impl Into<String>) -> Self {
        Self {
            title: NEW_WINDOW_TITLE.to_string(),
            width: DETAIL_WIDTH,
            height: DETAIL_HEIGHT,
            content: WindowContent::Url(url.into()),
        }
    }
}

/// Receives window-creation requests. The window layer never reports
/// back; failures stay on its side of the seam.
pub trait WindowSink {
    fn create_window(&self, request: WindowRequest);
}

/// The API object reachable from the page's script context.
pub struct DetailApi<S: WindowSink> {
    sink: S,
}

impl<S: WindowSink> DetailApi<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Open a native window showing `html` directly.
    pub fn open_detail(&self, html: &str) {
        self.sink.create_window(WindowRequest::detail(html));
    }

    /// Write `html` to a scratch file and open a native window loading
    /// it via its `file://` URL. The file stays on disk afterwards.
    pub fn open_new_window(&self, html: &str) -> Result<std::path::PathBuf, BridgeError> {
        let path = scratch::write_scratch_page(html)?;
        self.sink
            .create_window(WindowRequest::detail_file(scratch::file_url(&path)));
        Ok(path)
    }

    /// Route one parsed IPC message to the matching command.
    ///
    /// Runs inside the webview's IPC callback, which has nowhere to
    /// return an error, so failures are logged instead of propagated.
    pub fn dispatch(&self, msg: &IpcMessage) {
        if !is_api_kind_allowed(&msg.kind) {
            tracing::warn!(kind = %msg.kind, "IPC message rejected: unknown kind");
            return;
        }

        let html = match msg.payload_text() {
            Some(text) => text,
            None => {
                tracing::warn!(kind = %msg.kind, "IPC message rejected: payload is not text");
                return;
            }
        };

        tracing::debug!(kind = %msg.kind, html_len = html.len(), "IPC message dispatched");

        match msg.kind.as_str() {
            "open_detail" => self.open_detail(html),
            "open_new_window" => {
                if let Err(e) = self.open_new_window(html) {
                    tracing::error!(error = %e, "failed to open scratch-backed window");
                }
            }
            _ => unreachable!("allowlist checked above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test double recording every window-creation request.
    #[derive(Clone, Default)]
    struct RecordingSink {
        requests: Arc<Mutex<Vec<WindowRequest>>>,
    }

    impl RecordingSink {
        fn recorded(&self) -> Vec<WindowRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl WindowSink for RecordingSink {
        fn create_window(&self, request: WindowRequest) {
            self.requests.lock().unwrap().push(request);
        }
    }

    #[test]
    fn open_detail_records_one_request() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        api.open_detail("<p>hi</p>");

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].title, "Repair Details");
        assert_eq!(recorded[0].width, 800);
        assert_eq!(recorded[0].height, 1000);
        assert_eq!(recorded[0].content, WindowContent::Html("<p>hi</p>".into()));
    }

    #[test]
    fn open_detail_is_not_deduplicated() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        api.open_detail("<p>same</p>");
        api.open_detail("<p>same</p>");

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0], recorded[1]);
    }

    #[test]
    fn open_new_window_writes_file_and_requests_window() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        let path = api.open_new_window("<p>cracked pane</p>").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<p>cracked pane</p>"
        );

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].title, "Repair Details (New Window)");
        assert_eq!(recorded[0].width, 800);
        assert_eq!(recorded[0].height, 1000);
        assert_eq!(
            recorded[0].content,
            WindowContent::Url(format!("file://{}", path.display()))
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn dispatch_routes_open_detail() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        api.dispatch(&IpcMessage::text("open_detail", "<p>hi</p>"));

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].content, WindowContent::Html("<p>hi</p>".into()));
    }

    #[test]
    fn dispatch_routes_open_new_window() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        api.dispatch(&IpcMessage::text("open_new_window", "<p>hi</p>"));

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        let WindowContent::Url(url) = &recorded[0].content else {
            panic!("expected a file URL");
        };
        assert!(url.starts_with("file://"));
        assert!(url.ends_with(".html"));
    }

    #[test]
    fn dispatch_rejects_unknown_kind() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        api.dispatch(&IpcMessage::text("format_disk", "<p>hi</p>"));

        assert!(sink.recorded().is_empty());
    }

    #[test]
    fn dispatch_rejects_non_text_payload() {
        let sink = RecordingSink::default();
        let api = DetailApi::new(sink.clone());

        let msg = IpcMessage::from_json(r#"{"kind":"open_detail","payload":{"html":"x"}}"#).unwrap();
        api.dispatch(&msg);

        assert!(sink.recorded().is_empty());
    }

    #[test]
    fn allowlist_has_exactly_the_two_commands() {
        assert_eq!(ALLOWED_API_KINDS.len(), 2);
        assert!(is_api_kind_allowed("open_detail"));
        assert!(is_api_kind_allowed("open_new_window"));
        assert!(!is_api_kind_allowed("ping"));
        assert!(!is_api_kind_allowed(""));
    }
}
