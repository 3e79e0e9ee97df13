//! `ApplicationHandler` implementation: the primary window and the
//! detail windows opened on behalf of the page.

use std::collections::HashMap;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId};
use wry::{WebView, WebViewBuilder};

use screens_webview::{DetailApi, IpcMessage, WindowContent, WindowRequest, WindowSink};

/// Title and logical size of the primary window.
const MAIN_TITLE: &str = "Screen & Window Repair";
const MAIN_WIDTH: f64 = 800.0;
const MAIN_HEIGHT: f64 = 1000.0;

/// Forwards window requests from the IPC thread to the event loop.
struct ProxySink {
    proxy: EventLoopProxy<WindowRequest>,
}

impl WindowSink for ProxySink {
    fn create_window(&self, request: WindowRequest) {
        // Only fails once the loop has exited; nothing left to open then.
        if let Err(e) = self.proxy.send_event(request) {
            tracing::warn!(error = %e, "event loop closed, dropping window request");
        }
    }
}

/// A native window paired with the webview that fills it. The webview
/// must stay alive as long as the window does.
struct HostedWindow {
    window: Window,
    _webview: WebView,
}

pub struct ScreensApp {
    /// URL of the local content server's root page.
    start_url: String,
    proxy: EventLoopProxy<WindowRequest>,
    main: Option<HostedWindow>,
    /// Detail windows, kept only so they stay alive. No focus or
    /// lifecycle tracking beyond dropping them on close.
    details: HashMap<WindowId, HostedWindow>,
}

impl ScreensApp {
    pub fn new(start_url: String, proxy: EventLoopProxy<WindowRequest>) -> Self {
        Self {
            start_url,
            proxy,
            main: None,
            details: HashMap::new(),
        }
    }

    /// Create the primary window with the IPC bridge attached.
    /// Returns false when the window or webview cannot be created.
    fn initialize_main_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(MAIN_TITLE)
            .with_inner_size(LogicalSize::new(MAIN_WIDTH, MAIN_HEIGHT))
            .with_resizable(true);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                tracing::error!("failed to create primary window: {e}");
                return false;
            }
        };

        let api = DetailApi::new(ProxySink {
            proxy: self.proxy.clone(),
        });

        let builder = WebViewBuilder::new()
            .with_url(self.start_url.as_str())
            .with_initialization_script(screens_webview::BRIDGE_INIT_SCRIPT)
            .with_ipc_handler(move |request| {
                let body = request.body();
                match IpcMessage::from_json(body) {
                    Some(msg) => api.dispatch(&msg),
                    None => tracing::warn!(
                        body_len = body.len(),
                        "IPC message rejected: invalid JSON"
                    ),
                }
            });

        let webview = match builder.build(&window) {
            Ok(wv) => wv,
            Err(e) => {
                tracing::error!("failed to create primary webview: {e}");
                return false;
            }
        };

        tracing::info!(url = %self.start_url, "primary window opened");
        self.main = Some(HostedWindow {
            window,
            _webview: webview,
        });
        true
    }

    /// Create one detail window for a page-initiated request.
    fn open_requested_window(&mut self, event_loop: &ActiveEventLoop, request: WindowRequest) {
        let attrs = WindowAttributes::default()
            .with_title(request.title.as_str())
            .with_inner_size(LogicalSize::new(
                f64::from(request.width),
                f64::from(request.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                tracing::error!(title = %request.title, "failed to create detail window: {e}");
                return;
            }
        };

        let builder = match &request.content {
            WindowContent::Html(html) => WebViewBuilder::new().with_html(html.as_str()),
            WindowContent::Url(url) => WebViewBuilder::new().with_url(url.as_str()),
        };

        match builder.build(&window) {
            Ok(webview) => {
                tracing::info!(title = %request.title, "detail window opened");
                self.details.insert(
                    window.id(),
                    HostedWindow {
                        window,
                        _webview: webview,
                    },
                );
            }
            Err(e) => {
                tracing::error!(title = %request.title, "failed to create detail webview: {e}");
            }
        }
    }
}

impl ApplicationHandler<WindowRequest> for ScreensApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.main.is_some() {
            return;
        }
        if !self.initialize_main_window(event_loop) {
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, request: WindowRequest) {
        self.open_requested_window(event_loop, request);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            if self
                .main
                .as_ref()
                .is_some_and(|m| m.window.id() == window_id)
            {
                tracing::info!("primary window close requested");
                event_loop.exit();
            } else if self.details.remove(&window_id).is_some() {
                tracing::debug!("detail window closed");
            }
        }
    }
}
