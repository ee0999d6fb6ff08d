//! Subscriber registry and broadcast fan-out
//!
//! The registry is the only shared mutable state in the process. Every
//! operation on it is serialized by one `tokio::sync::Mutex`:
//!
//! ```text
//!                    Arc<SubscriberRegistry>
//!               ┌──────────────────────────────┐
//!               │ Mutex<Vec<Subscriber>>       │
//!               │   [#1] [#2] [#3] ...         │  insertion order
//!               └──────────────┬───────────────┘
//!                              │
//!        add() ───────────────►│◄─────────────── broadcast()
//!   (accept loop, waits        │         (emitter, holds the lock for
//!    for any running pass)     │          the whole front-to-back pass)
//! ```
//!
//! # Head-of-line blocking
//!
//! Sends run sequentially while the lock is held and have no timeout. A
//! subscriber whose socket stops draining stalls delivery to everyone after
//! it in the pass and blocks new registrations until the kernel send buffer
//! frees up or the connection errors out.

pub mod store;
pub mod subscriber;

pub use store::{BroadcastReport, SubscriberRegistry};
pub use subscriber::Subscriber;
