//! Subscriber registry implementation

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use super::subscriber::Subscriber;
use crate::sample::Sample;
use crate::stats::{RegistryCounters, RegistryStats};

/// Outcome of one broadcast pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers that received the sample
    pub delivered: usize,
    /// Subscribers removed because their send failed
    pub evicted: usize,
}

/// Ordered collection of live subscribers
///
/// Holds exactly the subscribers whose most recent send succeeded, plus any
/// added since the last pass. A failed subscriber is removed and closed in
/// the same pass that observed the failure.
pub struct SubscriberRegistry<W = TcpStream> {
    subscribers: Mutex<Vec<Subscriber<W>>>,
    next_id: AtomicU64,
    counters: RegistryCounters,
}

impl<W: AsyncWrite + Unpin + Send> SubscriberRegistry<W> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            counters: RegistryCounters::new(),
        }
    }

    /// Allocate an identifier for a new subscriber
    pub fn next_subscriber_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Wrap `stream` in a subscriber with a fresh id and register it
    pub async fn register(&self, stream: W, peer: Option<SocketAddr>, capacity: usize) -> u64 {
        let id = self.next_subscriber_id();
        let mut subscriber = Subscriber::with_capacity(id, stream, capacity);
        if let Some(peer) = peer {
            subscriber = subscriber.with_peer(peer);
        }

        self.add(subscriber).await;
        id
    }

    /// Append a subscriber
    ///
    /// Waits for any broadcast pass in progress; the new subscriber only
    /// sees samples from later passes.
    pub async fn add(&self, subscriber: Subscriber<W>) {
        let mut subscribers = self.subscribers.lock().await;

        tracing::debug!(
            subscriber = subscriber.id(),
            peer = ?subscriber.peer(),
            subscribers = subscribers.len() + 1,
            "Subscriber added"
        );

        subscribers.push(subscriber);
        self.counters.record_registered();
    }

    /// Send `sample` to every subscriber, front to back
    ///
    /// The lock is held for the entire pass. Subscribers whose send fails are
    /// removed and closed on the spot, and the pass continues with the next
    /// one. Failures never propagate to the caller.
    pub async fn broadcast(&self, sample: &Sample) -> BroadcastReport {
        let mut subscribers = self.subscribers.lock().await;
        let mut report = BroadcastReport::default();

        tracing::info!(subscribers = subscribers.len(), "Subscribers");

        let mut i = 0;
        while i < subscribers.len() {
            match subscribers[i].send(sample).await {
                Ok(()) => {
                    report.delivered += 1;
                    i += 1;
                }
                Err(e) => {
                    let failed = subscribers.remove(i);
                    tracing::warn!(
                        subscriber = failed.id(),
                        peer = ?failed.peer(),
                        error = %e,
                        "Subscriber failed, evicting"
                    );
                    failed.close().await;
                    report.evicted += 1;
                }
            }
        }

        self.counters
            .record_broadcast(report.delivered, report.evicted);
        report
    }

    /// Remove and close every subscriber
    pub async fn close_all(&self) -> usize {
        let drained: Vec<Subscriber<W>> = {
            let mut subscribers = self.subscribers.lock().await;
            subscribers.drain(..).collect()
        };

        let count = drained.len();
        for subscriber in drained {
            subscriber.close().await;
        }

        if count > 0 {
            tracing::info!(closed = count, "Closed all subscribers");
        }
        count
    }

    /// Number of registered subscribers
    pub async fn len(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Whether no subscribers are registered
    pub async fn is_empty(&self) -> bool {
        self.subscribers.lock().await.is_empty()
    }

    /// Ids of registered subscribers in broadcast order
    pub async fn subscriber_ids(&self) -> Vec<u64> {
        self.subscribers
            .lock()
            .await
            .iter()
            .map(Subscriber::id)
            .collect()
    }

    /// Current registry statistics
    pub async fn stats(&self) -> RegistryStats {
        let subscribers = self.len().await;
        self.counters.snapshot(subscribers)
    }
}

impl<W: AsyncWrite + Unpin + Send> Default for SubscriberRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}
