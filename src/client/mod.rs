//! Subscriber-side client
//!
//! Connects to a running generator and decodes the sample stream. Handy for
//! smoke tests and for downstream tools that want typed samples instead of
//! raw frames.

pub mod reader;

pub use reader::SampleReader;
