// Server loop module
// Owns the listener and runs the accept loop until shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use super::listener::create_listener;
use crate::config::AppState;
use crate::logger;

/// The HTTP server: a bound listener plus the shared application state.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind a listener on the given address.
    ///
    /// An unusable address fails here with the underlying OS error,
    /// before any serving starts.
    pub fn bind(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<Self> {
        let listener = create_listener(addr)?;
        Ok(Self { listener, state })
    }

    /// The address the listener actually bound (relevant with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the accept loop until the shutdown notification fires.
    ///
    /// Accept errors are logged and the loop continues; every accepted
    /// connection is served on its own task.
    pub async fn serve(self, shutdown: Arc<Notify>) -> std::io::Result<()> {
        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            accept_connection(stream, peer_addr, &self.state);
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = shutdown.notified() => {
                    return Ok(());
                }
            }
        }
    }
}
