//! Phase-incrementing sine waveform

use super::Waveform;

/// Sine generator driven by an ever-growing phase
///
/// Each call returns `sin(phase)` and then adds `step` to the phase. The
/// phase is never reduced modulo 2π, so after `k` calls it equals `k * step`
/// (up to floating-point accumulation). At one tick per second this stays
/// well inside the range where `f64::sin` is accurate for any realistic
/// uptime.
#[derive(Debug, Clone)]
pub struct SineWave {
    phase: f64,
    step: f64,
}

impl SineWave {
    /// Create a generator starting at phase 0
    pub fn new(step: f64) -> Self {
        Self::with_phase(0.0, step)
    }

    /// Create a generator starting at `phase`
    pub fn with_phase(phase: f64, step: f64) -> Self {
        Self { phase, step }
    }

    /// Phase used by the next call
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase increment per call
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Waveform for SineWave {
    fn next_value(&mut self) -> f64 {
        let value = self.phase.sin();
        self.phase += self.step;
        value
    }

    fn period(&self) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn test_kth_call_is_sin_of_k_minus_one_steps() {
        let step = PI / 8.0;
        let mut wave = SineWave::new(step);

        for k in 1..=64 {
            let expected = ((k - 1) as f64 * step).sin();
            assert!((wave.next_value() - expected).abs() < 1e-9, "call {}", k);
        }
    }

    #[test]
    fn test_phase_grows_without_wraparound() {
        let step = PI / 24.0;
        let mut wave = SineWave::new(step);
        let mut last = wave.phase();

        // Several full turns
        for _ in 0..200 {
            wave.next_value();
            assert!(wave.phase() > last);
            last = wave.phase();
        }

        assert!(wave.phase() > 2.0 * PI * 4.0);
    }

    #[test]
    fn test_classic_scenario() {
        let mut wave = SineWave::new(PI / 24.0);

        let first = 30.0 * wave.next_value();
        let second = 30.0 * wave.next_value();

        assert_eq!(first, 0.0);
        assert!((second - 3.9157).abs() < 1e-3);
    }

    #[test]
    fn test_with_phase() {
        let mut wave = SineWave::with_phase(PI / 2.0, 0.1);
        assert!((wave.next_value() - 1.0).abs() < 1e-12);
        assert!((wave.phase() - (PI / 2.0 + 0.1)).abs() < 1e-12);
        assert_eq!(wave.step(), 0.1);
    }
}
