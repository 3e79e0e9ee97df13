//! The content server: bind, accept loop, detached hosting thread.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use screens_common::ServerError;

use crate::content::StaticRoot;
use crate::http;

/// The fixed local port the page is served on.
pub const DEFAULT_PORT: u16 = 5000;

/// Where and what to serve.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Loopback address to bind. `127.0.0.1:5000` unless overridden.
    pub addr: SocketAddr,
    /// Directory holding `index.html` and its assets.
    pub root: PathBuf,
}

impl ServerConfig {
    /// Default config: loopback on the fixed port, serving `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            root: root.into(),
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }
}

/// Entry point for starting the content server.
pub struct ContentServer;

impl ContentServer {
    /// Bind the listener synchronously.
    ///
    /// Binding happens before any window is created so that a taken port
    /// is fatal up front. There is no retry and no alternate port.
    pub fn bind(config: ServerConfig) -> Result<BoundServer, ServerError> {
        let listener = std::net::TcpListener::bind(config.addr).map_err(|source| {
            ServerError::Bind {
                addr: config.addr,
                source,
            }
        })?;
        // Required for handing the listener to tokio later.
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        tracing::info!(addr = %local_addr, root = %config.root.display(), "content server bound");

        Ok(BoundServer {
            listener,
            local_addr,
            root: Arc::new(StaticRoot::new(config.root)),
        })
    }
}

/// A server whose port is already bound but whose accept loop has not
/// started yet.
pub struct BoundServer {
    listener: std::net::TcpListener,
    local_addr: SocketAddr,
    root: Arc<StaticRoot>,
}

impl BoundServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The URL the primary window should load.
    pub fn url(&self) -> String {
        format!("http://{}/", self.local_addr)
    }

    /// Run the accept loop until the process exits.
    ///
    /// Transient accept errors (aborted connections, fd pressure) are
    /// logged and skipped; once bound, the server stays up for the life
    /// of the process.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    tracing::debug!(%peer, "connection accepted");
                    let root = Arc::clone(&self.root);
                    tokio::spawn(handle_connection(stream, root));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "TCP accept error");
                }
            }
        }
    }

    /// Host the accept loop on a detached background thread.
    ///
    /// The thread owns its own single-threaded runtime and is never
    /// joined; process termination is the only shutdown mechanism.
    pub fn spawn_detached(self) -> Result<(), ServerError> {
        let addr = self.local_addr;
        std::thread::Builder::new()
            .name("content-server".into())
            .spawn(move || {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("failed to create tokio runtime for content server");
                if let Err(e) = rt.block_on(self.serve()) {
                    tracing::error!(%addr, error = %e, "content server exited");
                }
            })
            .map_err(ServerError::Io)?;
        Ok(())
    }
}

/// Answer one request on one connection, then close it.
async fn handle_connection(mut stream: TcpStream, root: Arc<StaticRoot>) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        match stream.read(&mut chunk).await {
            Ok(0) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find_head_end(&buf) {
                    break pos;
                }
                if buf.len() > http::MAX_HEAD_BYTES {
                    let _ = stream.write_all(&http::bad_request()).await;
                    return;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "request read failed");
                return;
            }
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]);
    let reply = match http::parse_request_head(&head) {
        None => http::bad_request(),
        Some(req) if req.method != "GET" => http::method_not_allowed(),
        Some(req) => match root.resolve(&req.path) {
            Some((mime, data)) => {
                tracing::debug!(path = %req.path, bytes = data.len(), "served");
                http::response(200, "OK", mime, &data)
            }
            None => {
                tracing::debug!(path = %req.path, "asset not found");
                http::not_found()
            }
        },
    };

    if let Err(e) = stream.write_all(&reply).await {
        tracing::debug!(error = %e, "response write failed");
    }
    let _ = stream.shutdown().await;
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
