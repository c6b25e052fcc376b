//! Processor dispatch
//!
//! A common interface over the per-protocol pipelines plus the factory that
//! builds one from an activation configuration. Dispatch is a closed enum so
//! that activation needs no allocator.

use crate::baseband::ais::AisProcessor;
use crate::baseband::ert::ErtProcessor;
use crate::baseband::tpms::TpmsProcessor;
use crate::buffer::SampleBlock;
use crate::message::MessageSink;
use crate::types::{ConfigError, Direction, Mode, Timestamp};

/// Activation configuration: which pipeline, at which native rate.
///
/// Immutable per activation; any change tears down the current processor
/// and constructs a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasebandConfiguration {
    /// Protocol processor to activate
    pub mode: Mode,
    /// Native front-end sampling rate in Hz
    pub sampling_rate: u32,
}

/// A demodulation pipeline fed one DMA block at a time.
pub trait BasebandProcessor {
    /// Process one raw sample block, posting any completed packets and
    /// statistics to `sink`.
    fn execute(
        &mut self,
        block: &SampleBlock<'_, i8>,
        timestamp: Timestamp,
        sink: &mut dyn MessageSink,
    );

    /// Streaming direction this processor requires.
    fn direction(&self) -> Direction;
}

/// The closed set of shipped processors.
pub enum Processor {
    /// Marine AIS
    Ais(AisProcessor),
    /// Tire-pressure telemetry
    Tpms(TpmsProcessor),
    /// Utility-meter telemetry
    Ert(ErtProcessor),
}

impl Processor {
    /// Build the processor an activation configuration asks for.
    ///
    /// # Errors
    /// Any `ConfigError` from the selected pipeline's construction; nothing
    /// is activated on error.
    pub fn for_configuration(config: &BasebandConfiguration) -> Result<Self, ConfigError> {
        match config.mode {
            Mode::Ais => Ok(Self::Ais(AisProcessor::new(config.sampling_rate)?)),
            Mode::Tpms => Ok(Self::Tpms(TpmsProcessor::new(config.sampling_rate)?)),
            Mode::Ert => Ok(Self::Ert(ErtProcessor::new(config.sampling_rate)?)),
        }
    }
}

impl BasebandProcessor for Processor {
    fn execute(
        &mut self,
        block: &SampleBlock<'_, i8>,
        timestamp: Timestamp,
        sink: &mut dyn MessageSink,
    ) {
        match self {
            Self::Ais(p) => p.execute(block, timestamp, sink),
            Self::Tpms(p) => p.execute(block, timestamp, sink),
            Self::Ert(p) => p.execute(block, timestamp, sink),
        }
    }

    fn direction(&self) -> Direction {
        match self {
            Self::Ais(p) => p.direction(),
            Self::Tpms(p) => p.direction(),
            Self::Ert(p) => p.direction(),
        }
    }
}
