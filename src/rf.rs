//! RF front-end capability traits
//!
//! The core owns no RF register state. The platform layer implements these
//! traits over its tuner/DMA hardware; the driver loop calls them around
//! processor swaps, and protocol glue may call the control surface when a
//! mode needs a different channel setup.

use crate::buffer::SampleBlock;
use crate::types::{Direction, Timestamp};

/// Streaming control over the sample transport between front end and core.
pub trait FrontEnd {
    /// Start streaming in the given direction.
    fn enable_streaming(&mut self, direction: Direction);

    /// Stop streaming and mute any output path.
    fn disable_streaming(&mut self);
}

/// RF control surface: gain, bandwidth and tuning.
///
/// Setters are fire-and-forget from the core's perspective; hardware faults
/// are reported upward by the platform through its own message types.
pub trait RfControl {
    /// Enable or disable the low-noise amplifier.
    fn set_lna_gain(&mut self, gain_db: i8);

    /// Set variable-gain amplifier gain.
    fn set_vga_gain(&mut self, gain_db: i8);

    /// Set baseband filter bandwidth in Hz.
    fn set_bandwidth(&mut self, bandwidth_hz: u32);

    /// Tune the front end center frequency in Hz.
    fn set_frequency(&mut self, frequency_hz: u64);
}

/// Blocking source of raw sample blocks from the DMA layer.
pub trait DmaSource {
    /// Block until the next buffer is ready and return a view of it with
    /// its capture timestamp. `None` means streaming has stopped.
    fn next_block(&mut self) -> Option<(SampleBlock<'_, i8>, Timestamp)>;
}

/// Monotonic wrapping tick counter, read around processor execution to
/// attribute processing time. The tick unit is the platform's.
pub trait TickCounter {
    /// Current tick count.
    fn now(&mut self) -> u32;
}
