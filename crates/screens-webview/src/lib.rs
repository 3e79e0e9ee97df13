//! Script-to-native bridge for the repair page.
//!
//! The hosted page gets a `window.screens.api` object whose methods post
//! typed IPC messages; `DetailApi` turns those messages into native
//! window-creation requests through the `WindowSink` seam. Each call is
//! stateless; the GUI toolkit owns all window lifecycle.

pub mod api;
pub mod ipc;
pub mod scratch;

pub use api::{DetailApi, WindowContent, WindowRequest, WindowSink};
pub use ipc::{IpcMessage, IpcPayload, BRIDGE_INIT_SCRIPT};
