//! Marine AIS receive processor
//!
//! GMSK at 9600 baud in a 25 kHz channel. The native 2.4576 MHz stream is
//! translated and decimated by 8 to 307.2 kHz, matched-filtered against an
//! RRC kernel (decimating by 8 to a 38.4 kHz discriminant), clock-recovered,
//! NRZI-decoded and HDLC-framed with bit unstuffing.

use crate::baseband::bit_pattern::{BitPattern, EndCondition};
use crate::baseband::packet_builder::PacketBuilder;
use crate::baseband::processor::BasebandProcessor;
use crate::baseband::stats::ChannelStatsCollector;
use crate::buffer::SampleBlock;
use crate::dsp::clock_recovery::ClockRecovery;
use crate::dsp::decimate::{ChannelDecimator, DecimationFactor};
use crate::dsp::matched_filter::MatchedFilter;
use crate::dsp::symbol_coding::NrziDecoder;
use crate::dsp::taps::TapKernel;
use crate::message::{Message, MessageSink, PacketMessage};
use crate::types::{ComplexF32, ConfigError, Direction, Mode, Timestamp};

/// AIS symbol rate in baud.
pub const SYMBOL_RATE: u32 = 9600;

const CHANNEL_DECIMATION: usize = 8;
const FILTER_DECIMATION: usize = 8;

/// Training sequence tail plus HDLC start flag, one bit error allowed.
const PREAMBLE: BitPattern = BitPattern::with_tolerance(0b0101_0101_0111_1110, 16, 1);

/// Five ones followed by the stuffed zero.
const UNSTUFF: BitPattern = BitPattern::new(0b11_1110, 6);

/// HDLC end flag, exact.
const END_FLAG: BitPattern = BitPattern::new(0b0111_1110, 8);

/// RRC matched-filter taps combined with a +fs/4 sinusoid, from GRC.
const RRC_TAPS_16_P: [ComplexF32; 16] = [
    ComplexF32::new(-0.00506828, 0.00000000),
    ComplexF32::new(0.00380121, -0.00380121),
    ComplexF32::new(0.00000000, -0.00152049),
    ComplexF32::new(0.00532170, 0.00532170),
    ComplexF32::new(-0.02128679, -0.00000000),
    ComplexF32::new(0.02660849, -0.02660849),
    ComplexF32::new(0.00000000, -0.05321698),
    ComplexF32::new(0.20521503, 0.20521503),
    ComplexF32::new(0.57008100, 0.00000000),
    ComplexF32::new(0.20521503, -0.20521503),
    ComplexF32::new(-0.00000000, 0.05321698),
    ComplexF32::new(0.02660849, 0.02660849),
    ComplexF32::new(-0.02128679, -0.00000000),
    ComplexF32::new(0.00532170, -0.00532170),
    ComplexF32::new(-0.00000000, 0.00152049),
    ComplexF32::new(0.00380121, 0.00380121),
];

/// AIS receive pipeline.
pub struct AisProcessor {
    decimator: ChannelDecimator,
    matched_filter: MatchedFilter,
    clock_recovery: ClockRecovery,
    nrzi: NrziDecoder,
    builder: PacketBuilder,
    channel_stats: ChannelStatsCollector,
}

impl AisProcessor {
    /// Assemble the pipeline for the given native sampling rate.
    ///
    /// # Errors
    /// Propagates any decimation/kernel/symbol-rate incompatibility.
    pub fn new(sampling_rate: u32) -> Result<Self, ConfigError> {
        let factor = DecimationFactor::from_factor(CHANNEL_DECIMATION)?;
        let kernel = TapKernel::new(&RRC_TAPS_16_P, FILTER_DECIMATION)?;
        let channel_rate = sampling_rate / CHANNEL_DECIMATION as u32;
        let discriminant_rate = channel_rate / FILTER_DECIMATION as u32;
        Ok(Self {
            decimator: ChannelDecimator::new(factor, true),
            matched_filter: MatchedFilter::new(&kernel),
            clock_recovery: ClockRecovery::new(discriminant_rate, SYMBOL_RATE)?,
            nrzi: NrziDecoder::new(),
            builder: PacketBuilder::new(PREAMBLE, UNSTUFF, EndCondition::Pattern(END_FLAG)),
            channel_stats: ChannelStatsCollector::new(channel_rate as usize),
        })
    }
}

impl BasebandProcessor for AisProcessor {
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
            let bit = self.nrzi.decode(symbol >= 0.0);
            if let Some(packet) = self.builder.feed(bit) {
                sink.post(Message::Packet(PacketMessage {
                    protocol: Mode::Ais,
                    packet,
                }));
            }
        }
    }

    fn direction(&self) -> Direction {
        Direction::Receive
    }
}
