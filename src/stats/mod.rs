//! Statistics for the subscriber registry

pub mod metrics;

pub use metrics::{RegistryCounters, RegistryStats};
