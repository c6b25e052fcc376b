//! Gardner symbol-timing recovery
//!
//! A feedback loop over a 32-bit wraparound phase accumulator spanning one
//! symbol period. The accumulator advances by `increment + adjustment` per
//! input sample; `increment` is fixed from the configured symbol-rate /
//! sample-rate ratio and only `adjustment` (phase) is ever corrected, so the
//! loop cannot drift the nominal symbol rate away from its configuration.
//!
//! Crossings of the accumulator's most significant bit mark the two
//! half-symbol instants. The sample value at each crossing is estimated by
//! linear interpolation between the current and previous inputs; the last
//! three such values (t0 newest) feed the discrete Gardner error term
//! `(t0 - t2) * t1`, whose filtered value steers the phase adjustment.

use crate::config::{TIMING_ADJUSTMENT_DIVISOR, TIMING_ERROR_FILTER_ALPHA};
use crate::types::ConfigError;

/// Gardner timing-error feedback loop.
#[derive(Clone, Copy, Debug)]
pub struct ClockRecovery {
    increment: u32,
    adjustment: i32,
    phase: u32,
    prev_sample: f32,
    t0: f32,
    t1: f32,
    t2: f32,
    error_filtered: f32,
}

impl ClockRecovery {
    /// Create a loop recovering `symbol_rate` symbols from a
    /// `sampling_rate` discriminant stream.
    ///
    /// # Errors
    /// `ConfigError::SymbolRate` unless `0 < symbol_rate < sampling_rate`
    /// with at least two samples per symbol, the minimum the Gardner error
    /// term is defined for.
    pub fn new(sampling_rate: u32, symbol_rate: u32) -> Result<Self, ConfigError> {
        if symbol_rate == 0 || sampling_rate / symbol_rate < 2 {
            return Err(ConfigError::SymbolRate);
        }
        let increment = ((u64::from(symbol_rate) << 32) / u64::from(sampling_rate)) as u32;
        Ok(Self {
            increment,
            adjustment: 0,
            phase: 0,
            prev_sample: 0.0,
            t0: 0.0,
            t1: 0.0,
            t2: 0.0,
            error_filtered: 0.0,
        })
    }

    /// Nominal accumulator increment per input sample.
    #[must_use]
    pub const fn increment(&self) -> u32 {
        self.increment
    }

    /// Feed one discriminant sample; returns a recovered symbol value at
    /// most once per call.
    pub fn feed(&mut self, sample: f32) -> Option<f32> {
        let step = self.increment.wrapping_add_signed(self.adjustment);
        let phase_next = self.phase.wrapping_add(step);

        let msb = self.phase >> 31;
        let msb_next = phase_next >> 31;

        let mut symbol = None;
        if msb != msb_next {
            let phase_0 = msb_next == 1;
            let boundary = if phase_0 { 0x8000_0000 } else { 0 };
            let fraction = phase_next.wrapping_sub(boundary) as f32 / step as f32;
            let interpolated = sample - (sample - self.prev_sample) * fraction;

            self.t2 = self.t1;
            self.t1 = self.t0;
            self.t0 = interpolated;

            if phase_0 {
                symbol = Some(self.t0);

                // Positive error means the estimate lags the symbol clock.
                let error = (self.t0 - self.t2) * self.t1;
                self.error_filtered = self.error_filtered
                    * (1.0 - TIMING_ERROR_FILTER_ALPHA)
                    + error * TIMING_ERROR_FILTER_ALPHA;
                self.adjustment = (-(self.increment as f32) * self.error_filtered
                    / TIMING_ADJUSTMENT_DIVISOR) as i32;
            }
        }

        self.phase = phase_next;
        self.prev_sample = sample;
        symbol
    }
}
