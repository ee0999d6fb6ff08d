//! Waveform generators
//!
//! A [`Waveform`] yields one raw value per tick, nominally in `[-1.0, 1.0]`,
//! before amplitude scaling. Two implementations exist:
//!
//! - [`TableWave`]: cycles through a fixed 16-entry table (square, triangle,
//!   sawtooth)
//! - [`SineWave`]: returns `sin(phase)` and advances the phase by a fixed step
//!
//! The variant is picked once at startup from a [`WaveformKind`].

pub mod sine;
pub mod table;

use std::fmt;
use std::str::FromStr;

pub use sine::SineWave;
pub use table::{TableWave, SAWTOOTH, SQUARE, TRIANGLE};

/// Source of the next raw value, invoked once per tick
pub trait Waveform: Send {
    /// Return the current value and advance the internal cursor
    fn next_value(&mut self) -> f64;

    /// Number of calls after which the output repeats, if it is periodic
    /// in call count
    fn period(&self) -> Option<usize>;
}

/// Waveform selection by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveformKind {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl WaveformKind {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveformKind::Sine => "sine",
            WaveformKind::Square => "square",
            WaveformKind::Triangle => "triangle",
            WaveformKind::Sawtooth => "sawtooth",
        }
    }

    /// Build the generator for this waveform
    ///
    /// `sine_step` is the phase increment per tick and only applies to
    /// [`WaveformKind::Sine`].
    pub fn build(&self, sine_step: f64) -> Box<dyn Waveform> {
        match self {
            WaveformKind::Sine => Box::new(SineWave::new(sine_step)),
            WaveformKind::Square => Box::new(TableWave::new(&SQUARE)),
            WaveformKind::Triangle => Box::new(TableWave::new(&TRIANGLE)),
            WaveformKind::Sawtooth => Box::new(TableWave::new(&SAWTOOTH)),
        }
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a waveform name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWaveform(pub String);

impl fmt::Display for UnknownWaveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown waveform: {}", self.0)
    }
}

impl std::error::Error for UnknownWaveform {}

impl FromStr for WaveformKind {
    type Err = UnknownWaveform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(WaveformKind::Sine),
            "square" => Ok(WaveformKind::Square),
            "triangle" => Ok(WaveformKind::Triangle),
            "sawtooth" => Ok(WaveformKind::Sawtooth),
            other => Err(UnknownWaveform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("sine".parse(), Ok(WaveformKind::Sine));
        assert_eq!("square".parse(), Ok(WaveformKind::Square));
        assert_eq!("triangle".parse(), Ok(WaveformKind::Triangle));
        assert_eq!("sawtooth".parse(), Ok(WaveformKind::Sawtooth));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Square".parse::<WaveformKind>().is_err());
        assert!("".parse::<WaveformKind>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for kind in [
            WaveformKind::Sine,
            WaveformKind::Square,
            WaveformKind::Triangle,
            WaveformKind::Sawtooth,
        ] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn test_build_square() {
        let mut wave = WaveformKind::Square.build(PI / 8.0);
        assert_eq!(wave.period(), Some(16));

        let values: Vec<f64> = (0..17).map(|_| wave.next_value()).collect();
        assert!(values[..8].iter().all(|&v| v == 1.0));
        assert!(values[8..16].iter().all(|&v| v == -1.0));
        assert_eq!(values[16], values[0]);
    }

    #[test]
    fn test_build_sine_uses_step() {
        let mut wave = WaveformKind::Sine.build(PI / 2.0);
        assert_eq!(wave.period(), None);
        assert_eq!(wave.next_value(), 0.0);
        assert!((wave.next_value() - 1.0).abs() < 1e-12);
    }
}
