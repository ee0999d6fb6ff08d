//! Table-cycling waveforms

use super::Waveform;

/// Square wave: half period high, half period low
pub const SQUARE: [f64; 16] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, //
    -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0,
];

/// Triangle wave starting at the trough
pub const TRIANGLE: [f64; 16] = [
    -1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, //
    1.0, 0.75, 0.5, 0.25, 0.0, -0.25, -0.5, -0.75,
];

/// Rising sawtooth, 0.125 per step
pub const SAWTOOTH: [f64; 16] = [
    -1.0, -0.875, -0.75, -0.625, -0.5, -0.375, -0.25, -0.125, //
    0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875,
];

/// Cyclic iterator over a fixed table of precomputed values
///
/// Each call returns `table[cursor]` and then advances the cursor, wrapping
/// back to the start after the last entry.
#[derive(Debug, Clone)]
pub struct TableWave {
    table: &'static [f64],
    cursor: usize,
}

impl TableWave {
    /// Create a generator over `table`
    ///
    /// # Panics
    ///
    /// Panics if `table` is empty.
    pub fn new(table: &'static [f64]) -> Self {
        assert!(!table.is_empty(), "waveform table must not be empty");
        Self { table, cursor: 0 }
    }

    /// Index of the entry returned by the next call
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Restart from the first entry
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Waveform for TableWave {
    fn next_value(&mut self) -> f64 {
        let value = self.table[self.cursor];
        self.cursor = (self.cursor + 1) % self.table.len();
        value
    }

    fn period(&self) -> Option<usize> {
        Some(self.table.len())
    }
}
