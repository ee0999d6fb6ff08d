//! Periodic sample emitter
//!
//! The emitter owns the waveform and drives the broadcast. Each tick, in
//! order: pull the next raw value, scale it by the amplitude, stamp it with
//! the wall-clock second, and broadcast it through the registry.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::generator::Waveform;
use crate::registry::{BroadcastReport, SubscriberRegistry};
use crate::sample::{unix_seconds, Sample};
use crate::server::config::MIN_TICK_PERIOD;

/// Single producer feeding the subscriber registry
pub struct Emitter<W = TcpStream> {
    waveform: Box<dyn Waveform>,
    amplitude: f64,
    period: Duration,
    registry: Arc<SubscriberRegistry<W>>,
}

impl<W> Emitter<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Create an emitter broadcasting into `registry`
    ///
    /// `period` is raised to [`MIN_TICK_PERIOD`] if shorter.
    pub fn new(
        waveform: Box<dyn Waveform>,
        amplitude: f64,
        period: Duration,
        registry: Arc<SubscriberRegistry<W>>,
    ) -> Self {
        Self {
            waveform,
            amplitude,
            period: period.max(MIN_TICK_PERIOD),
            registry,
        }
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Produce the next sample stamped with `now`
    ///
    /// Advances the waveform by exactly one step.
    pub fn next_sample(&mut self, now: SystemTime) -> Sample {
        let value = self.waveform.next_value() * self.amplitude;
        Sample::new(unix_seconds(now), value)
    }

    /// Run one tick: build a sample and broadcast it
    pub async fn tick(&mut self) -> BroadcastReport {
        let sample = self.next_sample(SystemTime::now());
        tracing::info!(value = sample.value, timestamp = sample.timestamp, "Emitting value");

        self.registry.broadcast(&sample).await
    }

    /// Tick forever
    ///
    /// The first tick fires one period after the call. If a broadcast
    /// overruns the period, missed ticks are skipped rather than fired in a
    /// burst.
    pub async fn run(mut self) {
        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let report = self.tick().await;

            if report.evicted > 0 {
                let stats = self.registry.stats().await;
                tracing::debug!(
                    delivered = report.delivered,
                    evicted = report.evicted,
                    failure_ratio = stats.failure_ratio(),
                    "Broadcast finished with evictions"
                );
            }
        }
    }

    /// Spawn the emitter as a background task
    ///
    /// Returns a handle that can be used to abort the task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
