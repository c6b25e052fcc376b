//! System configuration and constants
//!
//! Compile-time constants for the baseband core. Per-protocol parameters
//! (tap kernels, preamble patterns, symbol rates) live with their protocol
//! modules; everything cross-cutting is centralized here.

/// Native front-end sampling rate delivered by the DMA layer (Hz)
pub const NATIVE_SAMPLING_RATE: u32 = 2_457_600;

/// Number of raw complex samples per DMA block
pub const DMA_BLOCK_SAMPLES: usize = 2048;

/// Discriminant-domain sampling rate shared by the shipped protocols (Hz)
pub const DISCRIMINANT_RATE: u32 = 38_400;

/// Maximum taps a matched-filter kernel may carry
pub const MAX_KERNEL_TAPS: usize = 64;

/// Maximum bits a framed packet may carry
pub const PACKET_CAPACITY_BITS: usize = 1024;

/// Period of the quarter-rate sinusoid embedded in discriminant kernels,
/// in taps
pub const KERNEL_CARRIER_PERIOD: usize = 4;

/// Outward message queue depth (fire-and-forget; overflow drops)
pub const MESSAGE_QUEUE_DEPTH: usize = 8;

/// Baseband statistics reporting cadence, in stream time (seconds)
pub const STATS_INTERVAL_SECONDS: u32 = 1;

/// RSSI statistics reporting cadence, in raw RSSI samples
pub const RSSI_STATS_INTERVAL_SAMPLES: u32 = 1000;

/// Exponential smoothing coefficient for the Gardner timing-error filter
pub const TIMING_ERROR_FILTER_ALPHA: f32 = 0.4;

/// Divisor applied to the filtered timing error when deriving the phase
/// adjustment
pub const TIMING_ADJUSTMENT_DIVISOR: f32 = 200.0;
