//! Periodic waveform generator with TCP fan-out
//!
//! A single emitter task computes one sample per tick from a [`Waveform`]
//! and broadcasts it to every connected subscriber as a NUL-delimited JSON
//! record.
//!
//! # Architecture
//!
//! ```text
//!     [Emitter task]                        [Accept loop]
//!     waveform.next_value()                 listener.accept()
//!           │                                     │
//!           ▼                                     ▼
//!     Sample ──► registry.broadcast()      registry.add(Subscriber)
//!                      │
//!        Arc<SubscriberRegistry> (one Mutex)
//!                      │
//!         ┌────────────┼────────────┐
//!         ▼            ▼            ▼
//!    send() ─► TCP  send() ─► TCP  send() ✗ ─► evicted + closed
//! ```
//!
//! # Example
//! ```no_run
//! use waveform_gen::{GeneratorServer, ServerConfig};
//!
//! # async fn example() -> waveform_gen::error::Result<()> {
//! let server = GeneratorServer::new(ServerConfig::from_env());
//! server.run().await
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod generator;
pub mod registry;
pub mod sample;
pub mod server;
pub mod stats;

pub use client::SampleReader;
pub use error::{Error, Result};
pub use generator::{SineWave, TableWave, Waveform, WaveformKind};
pub use registry::{BroadcastReport, Subscriber, SubscriberRegistry};
pub use sample::Sample;
pub use server::{Emitter, GeneratorServer, ServerConfig};
pub use stats::RegistryStats;
