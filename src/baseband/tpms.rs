//! Tire-pressure telemetry receive processor
//!
//! FSK at 19200 baud. Translate and decimate by 4 to 614.4 kHz, discriminant
//! kernel decimating by 16 to 38.4 kHz, two samples per symbol into the
//! timing loop. Frames are fixed length with no differential coding and no
//! bit stuffing.

use crate::baseband::bit_pattern::{BitPattern, EndCondition};
use crate::baseband::packet_builder::PacketBuilder;
use crate::baseband::processor::BasebandProcessor;
use crate::baseband::stats::ChannelStatsCollector;
use crate::buffer::SampleBlock;
use crate::dsp::clock_recovery::ClockRecovery;
use crate::dsp::decimate::{ChannelDecimator, DecimationFactor};
use crate::dsp::matched_filter::MatchedFilter;
use crate::dsp::taps::TapKernel;
use crate::message::{Message, MessageSink, PacketMessage};
use crate::types::{ConfigError, Direction, Mode, Timestamp};

/// TPMS symbol rate in baud.
pub const SYMBOL_RATE: u32 = 19200;

/// Payload length of the fixed-size frame, in bits.
pub const FRAME_BITS: usize = 160;

const CHANNEL_DECIMATION: usize = 4;
const FILTER_DECIMATION: usize = 16;
const KERNEL_TAPS: usize = 32;

/// Alternating carrier-sense run ending in 0110, one bit error allowed.
const PREAMBLE: BitPattern = BitPattern::with_tolerance(0b0101_0101_0101_0101_0101_0110, 24, 1);

/// TPMS frames are not stuffed.
const UNSTUFF: BitPattern = BitPattern::new(0, 0);

/// TPMS FSK receive pipeline.
pub struct TpmsProcessor {
    decimator: ChannelDecimator,
    matched_filter: MatchedFilter,
    clock_recovery: ClockRecovery,
    builder: PacketBuilder,
    channel_stats: ChannelStatsCollector,
}

impl TpmsProcessor {
    /// Assemble the pipeline for the given native sampling rate.
    ///
    /// # Errors
    /// Propagates any decimation/kernel/symbol-rate incompatibility.
    pub fn new(sampling_rate: u32) -> Result<Self, ConfigError> {
        let factor = DecimationFactor::from_factor(CHANNEL_DECIMATION)?;
        let kernel = TapKernel::fsk_discriminant(KERNEL_TAPS, FILTER_DECIMATION)?;
        let channel_rate = sampling_rate / CHANNEL_DECIMATION as u32;
        let discriminant_rate = channel_rate / FILTER_DECIMATION as u32;
        Ok(Self {
            decimator: ChannelDecimator::new(factor, true),
            matched_filter: MatchedFilter::new(&kernel),
            clock_recovery: ClockRecovery::new(discriminant_rate, SYMBOL_RATE)?,
            builder: PacketBuilder::new(PREAMBLE, UNSTUFF, EndCondition::AfterBits(FRAME_BITS)),
            channel_stats: ChannelStatsCollector::new(channel_rate as usize),
        })
    }
}

impl BasebandProcessor for TpmsProcessor {
    fn execute(
        &mut self,
        block: &SampleBlock<'_, i8>,
        timestamp: Timestamp,
        sink: &mut dyn MessageSink,
    ) {
        self.builder.set_timestamp(timestamp);
        let channel = self.decimator.execute(block);
        self.channel_stats.add(&channel, sink);

        for &sample in channel.samples() {
            let Some(discriminant) = self.matched_filter.feed(sample) else {
                continue;
            };
            let Some(symbol) = self.clock_recovery.feed(discriminant) else {
                continue;
            };
            if let Some(packet) = self.builder.feed(symbol >= 0.0) {
                sink.post(Message::Packet(PacketMessage {
                    protocol: Mode::Tpms,
                    packet,
                }));
            }
        }
    }

    fn direction(&self) -> Direction {
        Direction::Receive
    }
}
