//! SDR Baseband Core Library
//!
//! This library is the receive-side signal-processing core of a handheld
//! software-defined-radio device. It turns raw IQ sample blocks delivered by
//! the RF front end's DMA engine into framed data packets for several burst
//! protocols (marine AIS, tire-pressure telemetry, utility-meter telemetry).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  APPLICATION / UI (external)                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Messages: statistics │ packets │ spectrum       (message)   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  BasebandThread  │  per-protocol processors     (baseband)   │
//! │  ChannelDecimator → MatchedFilter → ClockRecovery            │
//! │  → symbol coding → PacketBuilder                 (dsp)       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  RF front end / DMA / RTOS (external, via rf traits)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Allocation-free hot path**: all buffers are fixed-size and owned by
//!   their pipeline stage; nothing in a `feed`/`execute` path allocates,
//!   blocks, or returns an error.
//! - **Fail fast on misconfiguration**: unsupported decimation factors and
//!   incompatible tap kernels are rejected at activation time with `Result`.
//! - **Single-owner buffers**: the decimator scratch buffer is reached only
//!   through `&mut self`; the single-writer invariant is structural.
//! - **No unsafe**: the DMA and RF hardware live behind traits implemented
//!   by the platform layer.

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Digital Signal Processing
///
/// Decimation cascade, matched filter, symbol-timing recovery, symbol coding.
pub mod dsp;

/// Baseband framing and scheduling
///
/// Bit-pattern matching, packet framing, per-protocol processors, the driver
/// loop and statistics collectors.
pub mod baseband;

/// RSSI sampling path
///
/// Independent signal-strength statistics, sharing only the message sink
/// with the baseband path.
pub mod rssi;

/// Outward messages
///
/// Fire-and-forget value messages posted toward the application boundary.
pub mod message;

/// RF front-end capability traits
///
/// Streaming control and the gain/bandwidth/frequency control surface.
pub mod rf;

/// Sample buffer views
pub mod buffer;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::buffer::SampleBlock;
    pub use crate::config::*;
    pub use crate::message::{Message, MessageSink};
    pub use crate::types::*;

    // Error handling
    pub use core::result::Result;

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
