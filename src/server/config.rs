//! Server configuration

use std::f64::consts::PI;
use std::net::SocketAddr;
use std::time::Duration;

use crate::generator::WaveformKind;
use crate::registry::subscriber::DEFAULT_WRITE_BUFFER;

/// Listen port when none is configured
pub const DEFAULT_PORT: u16 = 3000;

/// Amplitude when none is configured
pub const DEFAULT_AMPLITUDE: f64 = 100.0;

/// Sine phase increment per tick
pub const DEFAULT_SINE_STEP: f64 = PI / 8.0;

/// Time between samples
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Shortest accepted tick period
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Environment variable holding the listen port
pub const ENV_PORT: &str = "GEN_PORT";

/// Older name for [`ENV_PORT`], consulted when it is unset
pub const ENV_LEGACY_PORT: &str = "GENERATOR_PORT";

/// Environment variable holding the amplitude
pub const ENV_AMPLITUDE: &str = "GEN_AMPLITUDE";

/// Environment variable holding the waveform name
pub const ENV_WAVEFORM: &str = "GEN_WAVEFORM";

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    ///
    /// Defaults to `0.0.0.0`, which accepts IPv4 only. Bind `[::]` to also
    /// accept IPv6 where the host supports it.
    pub bind_addr: SocketAddr,

    /// Scale applied to every raw waveform value
    pub amplitude: f64,

    /// Waveform to generate
    pub waveform: WaveformKind,

    /// Phase increment per tick for the sine waveform
    pub sine_step: f64,

    /// Time between samples
    pub tick_period: Duration,

    /// Enable TCP_NODELAY on subscriber sockets
    pub tcp_nodelay: bool,

    /// Per-subscriber output buffer size
    pub write_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            amplitude: DEFAULT_AMPLITUDE,
            waveform: WaveformKind::Sine,
            sine_step: DEFAULT_SINE_STEP,
            tick_period: DEFAULT_TICK_PERIOD,
            tcp_nodelay: true, // Low latency over batching
            write_buffer_size: DEFAULT_WRITE_BUFFER,
        }
    }
}

impl ServerConfig {
    /// Profile of the minimal generator: sine at amplitude 30 stepping π/24
    pub fn classic() -> Self {
        Self {
            amplitude: 30.0,
            sine_step: PI / 24.0,
            ..Default::default()
        }
    }

    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Load configuration from the process environment
    ///
    /// Missing or malformed values fall back to the defaults; this never
    /// fails.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_PORT).or_else(|| get(ENV_LEGACY_PORT)) {
            match raw.parse::<u16>() {
                Ok(port) => config.bind_addr.set_port(port),
                Err(_) => {
                    tracing::debug!(value = %raw, default = DEFAULT_PORT, "Invalid port, using default");
                }
            }
        }

        if let Some(raw) = get(ENV_AMPLITUDE) {
            match parse_amplitude(&raw) {
                Some(amplitude) => config.amplitude = amplitude,
                None => {
                    tracing::debug!(
                        value = %raw,
                        default = DEFAULT_AMPLITUDE,
                        "Invalid amplitude, using default"
                    );
                }
            }
        }

        if let Some(raw) = get(ENV_WAVEFORM) {
            match raw.parse() {
                Ok(kind) => config.waveform = kind,
                Err(e) => {
                    tracing::debug!(error = %e, "Falling back to sine waveform");
                }
            }
        }

        config
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the amplitude
    ///
    /// NaN and infinite values are ignored.
    pub fn amplitude(mut self, amplitude: f64) -> Self {
        if amplitude.is_finite() {
            self.amplitude = amplitude;
        }
        self
    }

    /// Set the waveform
    pub fn waveform(mut self, waveform: WaveformKind) -> Self {
        self.waveform = waveform;
        self
    }

    /// Set the sine phase step
    ///
    /// NaN and infinite values are ignored.
    pub fn sine_step(mut self, step: f64) -> Self {
        if step.is_finite() {
            self.sine_step = step;
        }
        self
    }

    /// Set the tick period, at least [`MIN_TICK_PERIOD`]
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period.max(MIN_TICK_PERIOD);
        self
    }

    /// Set the per-subscriber output buffer size
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size.max(1);
        self
    }
}

/// Parse an amplitude given as a float or an integer
///
/// Values are read at single precision and widened, so `0.1` becomes
/// `0.10000000149011612`. Non-finite results are rejected.
fn parse_amplitude(raw: &str) -> Option<f64> {
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(f64::from)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.amplitude, 100.0);
        assert_eq!(config.waveform, WaveformKind::Sine);
        assert_eq!(config.sine_step, PI / 8.0);
        assert_eq!(config.tick_period, Duration::from_secs(1));
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_classic_profile() {
        let config = ServerConfig::classic();

        assert_eq!(config.amplitude, 30.0);
        assert_eq!(config.sine_step, PI / 24.0);
        assert_eq!(config.waveform, WaveformKind::Sine);
    }

    #[test]
    fn test_empty_environment() {
        let config = from_pairs(&[]);

        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(config.amplitude, DEFAULT_AMPLITUDE);
        assert_eq!(config.waveform, WaveformKind::Sine);
    }

    #[test]
    fn test_full_environment() {
        let config = from_pairs(&[
            ("GEN_PORT", "4100"),
            ("GEN_AMPLITUDE", "2.5"),
            ("GEN_WAVEFORM", "triangle"),
        ]);

        assert_eq!(config.bind_addr.port(), 4100);
        assert_eq!(config.amplitude, 2.5);
        assert_eq!(config.waveform, WaveformKind::Triangle);
    }

    #[test]
    fn test_legacy_port_fallback() {
        let config = from_pairs(&[("GENERATOR_PORT", "5000")]);
        assert_eq!(config.bind_addr.port(), 5000);

        // New name wins
        let config = from_pairs(&[("GEN_PORT", "5001"), ("GENERATOR_PORT", "5000")]);
        assert_eq!(config.bind_addr.port(), 5001);

        // Empty new name counts as unset
        let config = from_pairs(&[("GEN_PORT", ""), ("GENERATOR_PORT", "5000")]);
        assert_eq!(config.bind_addr.port(), 5000);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = from_pairs(&[("GEN_PORT", "http")]);
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);

        let config = from_pairs(&[("GEN_PORT", "70000")]);
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_integer_amplitude() {
        let config = from_pairs(&[("GEN_AMPLITUDE", "30")]);
        assert_eq!(config.amplitude, 30.0);
    }

    #[test]
    fn test_amplitude_single_precision() {
        let config = from_pairs(&[("GEN_AMPLITUDE", "0.1")]);
        assert_eq!(config.amplitude, f64::from(0.1f32));
    }

    #[test]
    fn test_invalid_amplitude_falls_back() {
        for raw in ["loud", "1e40", " 5"] {
            let config = from_pairs(&[("GEN_AMPLITUDE", raw)]);
            assert_eq!(config.amplitude, DEFAULT_AMPLITUDE, "input {:?}", raw);
        }
    }

    #[test]
    fn test_unknown_waveform_falls_back_to_sine() {
        let config = from_pairs(&[("GEN_WAVEFORM", "noise")]);
        assert_eq!(config.waveform, WaveformKind::Sine);
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .amplitude(5.0)
            .waveform(WaveformKind::Sawtooth)
            .sine_step(0.5)
            .tick_period(Duration::from_millis(10))
            .write_buffer_size(0);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.amplitude, 5.0);
        assert_eq!(config.waveform, WaveformKind::Sawtooth);
        assert_eq!(config.sine_step, 0.5);
        assert_eq!(config.tick_period, Duration::from_millis(10));
        assert_eq!(config.write_buffer_size, 1);
    }

    #[test]
    fn test_builder_ignores_non_finite() {
        let config = ServerConfig::default()
            .amplitude(f64::NAN)
            .sine_step(f64::INFINITY);

        assert_eq!(config.amplitude, DEFAULT_AMPLITUDE);
        assert_eq!(config.sine_step, DEFAULT_SINE_STEP);
    }

    #[test]
    fn test_builder_clamps_zero_tick_period() {
        let config = ServerConfig::default().tick_period(Duration::ZERO);

        assert_eq!(config.tick_period, MIN_TICK_PERIOD);
    }

    #[test]
    fn test_default_bind_is_unspecified_ipv4() {
        let config = ServerConfig::default();

        assert!(config.bind_addr.is_ipv4());
        assert!(config.bind_addr.ip().is_unspecified());
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:3001".parse().unwrap();
        let config = ServerConfig::with_addr(addr);

        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.amplitude, DEFAULT_AMPLITUDE);
    }
}
