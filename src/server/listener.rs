//! Generator server listener
//!
//! Handles the TCP accept loop. Accepted connections are registered as
//! subscribers and from then on are driven only by the emitter's broadcast
//! passes; no task is spawned per connection.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::registry::SubscriberRegistry;
use crate::server::config::ServerConfig;
use crate::server::emitter::Emitter;

/// Waveform generator server
pub struct GeneratorServer {
    config: ServerConfig,
    registry: Arc<SubscriberRegistry>,
}

impl GeneratorServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            registry: Arc::new(SubscriberRegistry::new()),
        }
    }

    /// Get a reference to the subscriber registry
    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// Only returns on a bind or accept failure.
    pub async fn run(&self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the server until `shutdown` resolves
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let listener = match TcpListener::bind(self.config.bind_addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(addr = %self.config.bind_addr, error = %e, "Failed to bind");
                return Err(e.into());
            }
        };

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// On shutdown the emitter is stopped and every subscriber connection is
    /// closed. An accept error ends the server with that error, and so does
    /// the emitter task ending for any reason.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            addr = %addr,
            waveform = %self.config.waveform,
            amplitude = self.config.amplitude,
            "Generator listening"
        );

        let emitter = Emitter::new(
            self.config.waveform.build(self.config.sine_step),
            self.config.amplitude,
            self.config.tick_period,
            Arc::clone(&self.registry),
        );

        self.supervise(&listener, emitter.spawn(), shutdown).await
    }

    async fn supervise<F>(
        &self,
        listener: &TcpListener,
        mut emitter_handle: JoinHandle<()>,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let result = tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            joined = &mut emitter_handle => {
                let reason = match joined {
                    Ok(()) => "task returned".to_string(),
                    Err(e) => e.to_string(),
                };
                tracing::error!(reason = %reason, "Emitter stopped");
                Err(Error::EmitterStopped(reason))
            }
            result = self.accept_loop(listener) => result,
        };

        emitter_handle.abort();
        self.registry.close_all().await;

        result
    }

    async fn accept_loop(&self, listener: &TcpListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr).await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept connection");
                    return Err(e.into());
                }
            }
        }
    }

    async fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        tracing::info!(peer = %peer_addr, "Connection from");

        if let Err(e) = self.configure_socket(&socket) {
            tracing::warn!(peer = %peer_addr, error = %e, "Failed to configure socket");
        }

        let id = self
            .registry
            .register(socket, Some(peer_addr), self.config.write_buffer_size)
            .await;

        tracing::debug!(subscriber = id, peer = %peer_addr, "Subscriber registered");
    }

    fn configure_socket(&self, socket: &TcpStream) -> std::io::Result<()> {
        if self.config.tcp_nodelay {
            socket.set_nodelay(true)?;
        }

        Ok(())
    }
}
