//! Registry counters and snapshots

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of registry activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Subscribers currently registered
    pub subscribers: usize,
    /// Subscribers ever registered
    pub total_registered: u64,
    /// Subscribers evicted after a failed send
    pub total_evicted: u64,
    /// Broadcast passes completed
    pub samples_broadcast: u64,
    /// Successful sends across all passes
    pub deliveries: u64,
}

impl RegistryStats {
    /// Fraction of attempted sends that failed, or 0 with no attempts
    pub fn failure_ratio(&self) -> f64 {
        let attempts = self.deliveries + self.total_evicted;
        if attempts > 0 {
            self.total_evicted as f64 / attempts as f64
        } else {
            0.0
        }
    }
}

/// Lock-free counters updated by the registry
#[derive(Debug, Default)]
pub struct RegistryCounters {
    registered: AtomicU64,
    evicted: AtomicU64,
    broadcasts: AtomicU64,
    deliveries: AtomicU64,
}

impl RegistryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_registered(&self) {
        self.registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast(&self, delivered: usize, evicted: usize) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
        self.deliveries.fetch_add(delivered as u64, Ordering::Relaxed);
        self.evicted.fetch_add(evicted as u64, Ordering::Relaxed);
    }

    /// Combine counters with the live subscriber count
    pub fn snapshot(&self, subscribers: usize) -> RegistryStats {
        RegistryStats {
            subscribers,
            total_registered: self.registered.load(Ordering::Relaxed),
            total_evicted: self.evicted.load(Ordering::Relaxed),
            samples_broadcast: self.broadcasts.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let stats = RegistryCounters::new().snapshot(0);
        assert_eq!(stats, RegistryStats::default());
    }

    #[test]
    fn test_record_broadcast() {
        let counters = RegistryCounters::new();
        counters.record_registered();
        counters.record_registered();
        counters.record_registered();
        counters.record_broadcast(2, 1);
        counters.record_broadcast(2, 0);

        let stats = counters.snapshot(2);
        assert_eq!(stats.subscribers, 2);
        assert_eq!(stats.total_registered, 3);
        assert_eq!(stats.total_evicted, 1);
        assert_eq!(stats.samples_broadcast, 2);
        assert_eq!(stats.deliveries, 4);
    }

    #[test]
    fn test_failure_ratio() {
        let stats = RegistryStats {
            deliveries: 3,
            total_evicted: 1,
            ..Default::default()
        };
        assert_eq!(stats.failure_ratio(), 0.25);
    }

    #[test]
    fn test_failure_ratio_no_attempts() {
        assert_eq!(RegistryStats::default().failure_ratio(), 0.0);
    }
}
