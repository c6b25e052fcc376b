//! Baseband framing and scheduling
//!
//! Everything downstream of the symbol stream: approximate bit-pattern
//! matching, the packet-framing state machine, the per-protocol processor
//! assemblies, the driver loop that feeds them from DMA blocks, and the
//! statistics collectors.

pub mod bit_pattern;
pub mod packet;
pub mod packet_builder;
pub mod processor;
pub mod stats;
pub mod thread;

pub mod ais;
pub mod ert;
pub mod tpms;
