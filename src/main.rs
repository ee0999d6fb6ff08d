//! Waveform generator binary
//!
//! Configuration comes from the environment:
//!
//! - `GEN_WAVEFORM`: `sine` (default), `square`, `triangle`, `sawtooth`
//! - `GEN_AMPLITUDE`: float or integer, default `100`
//! - `GEN_PORT` (or the older `GENERATOR_PORT`): listen port, default `3000`
//!
//! Log verbosity follows `RUST_LOG`, defaulting to `info`.
//!
//! ```text
//! GEN_WAVEFORM=square GEN_AMPLITUDE=30 cargo run
//! ```

use tracing_subscriber::EnvFilter;
use waveform_gen::error::Result;
use waveform_gen::{GeneratorServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(amplitude = config.amplitude, "Amplitude");
    tracing::info!(waveform = %config.waveform, "Waveform");

    let server = GeneratorServer::new(config);
    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
}
