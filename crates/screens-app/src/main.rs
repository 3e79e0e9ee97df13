mod app;
mod cli;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use screens_server::{ContentServer, ServerConfig};
use screens_webview::WindowRequest;

fn main() {
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("screens=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "screens=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("screens v{} starting...", env!("CARGO_PKG_VERSION"));

    // Bind before opening any window: a taken port is fatal and must not
    // leave a window pointing at a dead backend.
    let root = args
        .root
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let server = match ContentServer::bind(ServerConfig::new(&root)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "cannot start content server");
            std::process::exit(1);
        }
    };
    let start_url = server.url();

    if let Err(e) = server.spawn_detached() {
        tracing::error!(error = %e, "cannot start content server thread");
        std::process::exit(1);
    }

    let event_loop = EventLoop::<WindowRequest>::with_user_event()
        .build()
        .expect("failed to create event loop");
    let proxy = event_loop.create_proxy();
    let mut app = app::ScreensApp::new(start_url, proxy);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
