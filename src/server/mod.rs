// Server module entry point
// Owns the listener and the shared state; runs the accept loop.

mod connection;
mod listener;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Immutable per-process state shared by every connection task
pub struct AppState {
    pub config: Config,
    /// Canonical form of the configured document root; every resolved path
    /// must stay under it
    pub root: PathBuf,
}

/// A bound server, ready to run
///
/// Carries its own lifecycle state; dropping it releases the listener.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the configured address and canonicalize the document root
    pub async fn bind(config: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let addr = config.socket_addr()?;
        let root = tokio::fs::canonicalize(&config.server.root)
            .await
            .map_err(|e| format!("Document root '{}': {e}", config.server.root))?;
        let listener = listener::bind_listener(addr)?;

        Ok(Self {
            listener,
            state: Arc::new(AppState { config, root }),
        })
    }

    /// The address the listener actually bound (useful with port 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// Accept connections until the process exits
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let active_connections = Arc::new(AtomicUsize::new(0));
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    connection::accept_connection(
                        stream,
                        peer_addr,
                        &self.state,
                        &active_connections,
                    );
                }
                Err(e) => {
                    logger::log_error(&format!("Failed to accept connection: {e}"));
                }
            }
        }
    }
}
