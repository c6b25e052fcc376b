//! Baseband driver loop
//!
//! Owns the active processor across its Disabled → Enabled lifecycle. A
//! configuration change stops streaming, drops the old processor, constructs
//! the new one and re-enables streaming for its direction; there is no
//! in-place reconfiguration and no mid-packet cancellation. The steady-state
//! operation takes one ready DMA block at a time; when no processor is
//! active, blocks are still drained so the hardware never stalls.

#[cfg(feature = "embedded")]
use defmt::info;

use crate::baseband::processor::{BasebandConfiguration, BasebandProcessor, Processor};
use crate::baseband::stats::BasebandStatsCollector;
use crate::buffer::SampleBlock;
use crate::message::MessageSink;
use crate::rf::{DmaSource, FrontEnd, TickCounter};
use crate::types::{ConfigError, Timestamp};

/// Driver for the baseband pipeline, fed from the DMA layer.
pub struct BasebandThread {
    configuration: Option<BasebandConfiguration>,
    processor: Option<Processor>,
    stats: BasebandStatsCollector,
}

impl BasebandThread {
    /// Create a disabled driver with no active processor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            configuration: None,
            processor: None,
            stats: BasebandStatsCollector::new(),
        }
    }

    /// Currently active configuration, if any.
    #[must_use]
    pub const fn configuration(&self) -> Option<&BasebandConfiguration> {
        self.configuration.as_ref()
    }

    /// Whether a processor is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.processor.is_some()
    }

    /// Apply a new configuration, or `None` to disable.
    ///
    /// An unchanged configuration is a no-op. Otherwise streaming is
    /// stopped, the old processor dropped, and a fresh one constructed,
    /// never reset in place.
    ///
    /// # Errors
    /// Construction failures leave the driver disabled with streaming off.
    pub fn set_configuration(
        &mut self,
        configuration: Option<BasebandConfiguration>,
        front_end: &mut dyn FrontEnd,
    ) -> Result<(), ConfigError> {
        if configuration == self.configuration {
            return Ok(());
        }

        front_end.disable_streaming();
        self.processor = None;
        self.configuration = None;
        self.stats = BasebandStatsCollector::new();

        if let Some(config) = configuration {
            let processor = Processor::for_configuration(&config)?;
            front_end.enable_streaming(processor.direction());
            #[cfg(feature = "embedded")]
            info!("baseband: activated {} at {} Hz", config.mode, config.sampling_rate);
            self.processor = Some(processor);
            self.configuration = Some(config);
        }
        Ok(())
    }

    /// Handle one ready DMA block.
    ///
    /// Executes the active processor and accounts its processing time; with
    /// no processor the block is simply discarded.
    pub fn process_block(
        &mut self,
        block: &SampleBlock<'_, i8>,
        timestamp: Timestamp,
        ticks: &mut dyn TickCounter,
        sink: &mut dyn MessageSink,
    ) {
        let Some(processor) = self.processor.as_mut() else {
            return;
        };

        let start = ticks.now();
        processor.execute(block, timestamp, sink);
        let now = ticks.now();

        self.stats
            .add(block.duration_seconds(), now.wrapping_sub(start), now, sink);
    }

    /// Steady-state loop: block on ready buffers until the source stops.
    pub fn run(
        &mut self,
        source: &mut dyn DmaSource,
        ticks: &mut dyn TickCounter,
        sink: &mut dyn MessageSink,
    ) {
        while let Some((block, timestamp)) = source.next_block() {
            self.process_block(&block, timestamp, ticks, sink);
        }
    }
}

impl Default for BasebandThread {
    fn default() -> Self {
        Self::new()
    }
}
