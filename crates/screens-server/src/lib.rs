//! Local content server for the repair-shop page.
//!
//! Serves `index.html` and its co-located static assets from a single
//! directory over loopback HTTP, so the native webview has a real origin
//! to load from. One detached thread, one accept loop, no shutdown path:
//! the process exiting is what stops the server.

pub mod content;
pub mod http;
pub mod server;

pub use content::StaticRoot;
pub use server::{BoundServer, ContentServer, ServerConfig, DEFAULT_PORT};
