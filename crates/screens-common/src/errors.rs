use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The fixed local port is already taken (or otherwise unbindable).
    /// There is no fallback port; the process must not continue.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("scratch file error: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("window creation error: {0}")]
    WindowCreation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScreensError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
