//! Generator server
//!
//! Wires the accept loop, the emitter task, and the subscriber registry
//! together.

pub mod config;
pub mod emitter;
pub mod listener;

pub use config::ServerConfig;
pub use emitter::Emitter;
pub use listener::GeneratorServer;
