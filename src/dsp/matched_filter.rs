//! Matched filter with discriminant output
//!
//! Correlates a sliding window of channel samples against a fixed complex
//! kernel and emits one scalar per decimation cycle:
//!
//! `output = |correlate_conjugated| - |correlate_direct|`
//!
//! Because the kernel embeds a quarter-rate sinusoid, the two correlations
//! respond to opposite rotation senses; the magnitude difference is a signed
//! scalar whose sign tracks phase alignment with the embedded carrier, which
//! is what the Gardner loop downstream needs.

use crate::config::MAX_KERNEL_TAPS;
use crate::dsp::taps::TapKernel;
use crate::types::{ComplexF32, ComplexS16};

/// Matched filter over a circular sample history.
pub struct MatchedFilter {
    taps_reversed: [ComplexF32; MAX_KERNEL_TAPS],
    history: [ComplexF32; MAX_KERNEL_TAPS],
    taps_count: usize,
    decimation: usize,
    filled: usize,
}

impl MatchedFilter {
    /// Create a filter from a validated kernel.
    ///
    /// The kernel's length contract was checked at kernel construction; the
    /// filter itself has no failure modes.
    #[must_use]
    pub fn new(kernel: &TapKernel) -> Self {
        let mut taps_reversed = [ComplexF32::ZERO; MAX_KERNEL_TAPS];
        let taps = kernel.taps();
        for (i, tap) in taps.iter().rev().enumerate() {
            taps_reversed[i] = *tap;
        }
        Self {
            taps_reversed,
            history: [ComplexF32::ZERO; MAX_KERNEL_TAPS],
            taps_count: taps.len(),
            decimation: kernel.decimation(),
            filled: 0,
        }
    }

    /// Decimation factor applied between input and output rates.
    #[must_use]
    pub const fn decimation(&self) -> usize {
        self.decimation
    }

    /// Feed one channel sample; returns a discriminant once per decimation
    /// cycle.
    ///
    /// Until the first full window has been observed the filter only
    /// buffers; absence of output is not an error.
    pub fn feed(&mut self, sample: ComplexS16) -> Option<f32> {
        self.history[self.filled] = ComplexF32::from(sample);
        self.filled += 1;
        if self.filled < self.taps_count {
            return None;
        }

        let mut direct = ComplexF32::ZERO;
        let mut conjugated = ComplexF32::ZERO;
        for (s, tap) in self.history[..self.taps_count]
            .iter()
            .zip(self.taps_reversed.iter())
        {
            direct += *s * *tap;
            conjugated += *s * ComplexF32::new(tap.re, -tap.im);
        }
        let output = conjugated.mag() - direct.mag();

        // Drop the oldest decimation-factor samples.
        self.history.copy_within(self.decimation..self.taps_count, 0);
        self.filled = self.taps_count - self.decimation;

        Some(output)
    }
}
