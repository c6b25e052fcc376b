//! Matched-filter tap kernels
//!
//! A kernel combines a lowpass shape with a quarter-rate sinusoid and is
//! paired with the decimation factor the matched filter applies. The
//! magnitude-difference discriminant downstream only works when the kernel
//! really carries that structure, so compatibility is a checked
//! construction-time contract instead of a comment convention: the tap count
//! must be a positive multiple of the decimation factor and of the sinusoid
//! period.

use heapless::Vec;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::config::{KERNEL_CARRIER_PERIOD, MAX_KERNEL_TAPS};
use crate::types::{ComplexF32, ConfigError};

/// Immutable complex tap kernel plus its decimation factor.
#[derive(Clone, Debug)]
pub struct TapKernel {
    taps: Vec<ComplexF32, MAX_KERNEL_TAPS>,
    decimation: usize,
}

impl TapKernel {
    /// Create a kernel, validating the length contract.
    ///
    /// # Errors
    /// `ConfigError::KernelLength` when the tap count is zero, exceeds
    /// `MAX_KERNEL_TAPS`, or is not a multiple of both `decimation` and the
    /// embedded sinusoid period.
    pub fn new(taps: &[ComplexF32], decimation: usize) -> Result<Self, ConfigError> {
        let err = ConfigError::KernelLength {
            taps: taps.len(),
            decimation,
        };
        if decimation == 0
            || taps.is_empty()
            || taps.len() > MAX_KERNEL_TAPS
            || taps.len() % decimation != 0
            || taps.len() % KERNEL_CARRIER_PERIOD != 0
        {
            return Err(err);
        }
        let mut owned = Vec::new();
        for &tap in taps {
            // Capacity was checked above.
            let _ = owned.push(tap);
        }
        Ok(Self {
            taps: owned,
            decimation,
        })
    }

    /// Kernel taps in their natural (time-forward) order.
    #[must_use]
    pub fn taps(&self) -> &[ComplexF32] {
        &self.taps
    }

    /// Number of taps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Whether the kernel is empty. Never true for a constructed kernel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Decimation factor the matched filter applies with this kernel.
    #[must_use]
    pub const fn decimation(&self) -> usize {
        self.decimation
    }

    /// Build an FSK discriminant kernel: a Hamming-windowed lowpass
    /// multiplied by a quarter-rate complex sinusoid.
    ///
    /// The sinusoid cycles through exactly 1, j, -1, -j, so the carrier
    /// period contract holds by construction; only the length/decimation
    /// pairing can fail.
    ///
    /// # Errors
    /// `ConfigError::KernelLength` as for [`TapKernel::new`].
    pub fn fsk_discriminant(length: usize, decimation: usize) -> Result<Self, ConfigError> {
        if length == 0 || length > MAX_KERNEL_TAPS {
            return Err(ConfigError::KernelLength {
                taps: length,
                decimation,
            });
        }

        let mut window = [0.0f32; MAX_KERNEL_TAPS];
        let m = (length - 1) as f32;
        let mut sum = 0.0f32;
        for (i, w) in window.iter_mut().enumerate().take(length) {
            *w = 0.54 - 0.46 * (2.0 * core::f32::consts::PI * i as f32 / m).cos();
            sum += *w;
        }

        let mut taps = [ComplexF32::ZERO; MAX_KERNEL_TAPS];
        for (i, tap) in taps.iter_mut().enumerate().take(length) {
            let w = window[i] / sum;
            *tap = match i % 4 {
                0 => ComplexF32::new(w, 0.0),
                1 => ComplexF32::new(0.0, w),
                2 => ComplexF32::new(-w, 0.0),
                _ => ComplexF32::new(0.0, -w),
            };
        }

        Self::new(&taps[..length], decimation)
    }
}
