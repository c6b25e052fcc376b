//! Utility-meter telemetry receive processor
//!
//! OOK Manchester bursts from standard consumption message (SCM) meters.
//! Translate and decimate by 4, discriminant kernel decimating by 8 to
//! 76.8 kHz, clock recovery at the Manchester chip rate. The framed packet
//! carries raw chips; chip-pair resolution is an application concern.

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

/// Manchester chip rate in chips per second.
pub const CHIP_RATE: u32 = 32768;

/// Chips following the sync word in an SCM burst.
pub const FRAME_CHIPS: usize = 150;

const CHANNEL_DECIMATION: usize = 4;
const FILTER_DECIMATION: usize = 8;
const KERNEL_TAPS: usize = 32;

/// SCM sync word in chip form, two chip errors allowed.
const SYNC: BitPattern = BitPattern::with_tolerance(0x1F_2A60, 21, 2);

/// Chip stream is not stuffed.
const UNSTUFF: BitPattern = BitPattern::new(0, 0);

/// ERT SCM receive pipeline.
pub struct ErtProcessor {
    decimator: ChannelDecimator,
    matched_filter: MatchedFilter,
    clock_recovery: ClockRecovery,
    builder: PacketBuilder,
    channel_stats: ChannelStatsCollector,
}

impl ErtProcessor {
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
            clock_recovery: ClockRecovery::new(discriminant_rate, CHIP_RATE)?,
            builder: PacketBuilder::new(SYNC, UNSTUFF, EndCondition::AfterBits(FRAME_CHIPS)),
            channel_stats: ChannelStatsCollector::new(channel_rate as usize),
        })
    }
}

impl BasebandProcessor for ErtProcessor {
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
            let Some(chip) = self.clock_recovery.feed(discriminant) else {
                continue;
            };
            if let Some(packet) = self.builder.feed(chip >= 0.0) {
                sink.post(Message::Packet(PacketMessage {
                    protocol: Mode::Ert,
                    packet,
                }));
            }
        }
    }

    fn direction(&self) -> Direction {
        Direction::Receive
    }
}
