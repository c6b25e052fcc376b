//! Statistics collectors
//!
//! Cadenced accumulators that post snapshots outward. The collectors never
//! read a clock themselves: the platform measures ticks and block durations
//! carry their own stream time.

#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::buffer::SampleBlock;
use crate::config::STATS_INTERVAL_SECONDS;
use crate::message::{BasebandStatistics, ChannelStatistics, Message, MessageSink};

/// Full-scale squared magnitude of a 16-bit channel sample.
const FULL_SCALE_SQUARED: f32 = 32768.0 * 32768.0;

/// Processing-load collector for the driver loop.
///
/// Accumulates busy ticks and block counts; once a second of stream time has
/// passed, posts a `BasebandStatistics` message and starts a new interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasebandStatsCollector {
    interval_start: Option<u32>,
    busy_ticks: u32,
    blocks: u32,
    stream_seconds: f32,
}

impl BasebandStatsCollector {
    /// Create an idle collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval_start: None,
            busy_ticks: 0,
            blocks: 0,
            stream_seconds: 0.0,
        }
    }

    /// Account one processed block.
    ///
    /// `busy_ticks` is the platform-measured processing time for the block;
    /// `now` is the platform tick counter after processing.
    pub fn add(
        &mut self,
        block_seconds: f32,
        busy_ticks: u32,
        now: u32,
        sink: &mut dyn MessageSink,
    ) {
        let start = *self.interval_start.get_or_insert(now);
        self.busy_ticks = self.busy_ticks.wrapping_add(busy_ticks);
        self.blocks += 1;
        self.stream_seconds += block_seconds;

        if self.stream_seconds >= STATS_INTERVAL_SECONDS as f32 {
            sink.post(Message::BasebandStatistics(BasebandStatistics {
                busy_ticks: self.busy_ticks,
                total_ticks: now.wrapping_sub(start),
                blocks: self.blocks,
            }));
            *self = Self::new();
        }
    }
}

/// Channel power collector.
///
/// Tracks the peak squared magnitude over a configured number of channel
/// samples and posts it as dB relative to full scale.
#[derive(Clone, Copy, Debug)]
pub struct ChannelStatsCollector {
    report_interval: usize,
    max_squared: f32,
    count: usize,
}

impl ChannelStatsCollector {
    /// Create a collector posting every `report_interval` samples.
    #[must_use]
    pub const fn new(report_interval: usize) -> Self {
        Self {
            report_interval,
            max_squared: 0.0,
            count: 0,
        }
    }

    /// Account one channel-rate block.
    pub fn add(&mut self, block: &SampleBlock<'_, i16>, sink: &mut dyn MessageSink) {
        for sample in block.samples() {
            let re = f32::from(sample.re);
            let im = f32::from(sample.im);
            let squared = re * re + im * im;
            if squared > self.max_squared {
                self.max_squared = squared;
            }
        }
        self.count += block.len();

        if self.count >= self.report_interval {
            let max_db = if self.max_squared > 0.0 {
                (10.0 * (self.max_squared / FULL_SCALE_SQUARED).log10()) as i32
            } else {
                -120
            };
            sink.post(Message::ChannelStatistics(ChannelStatistics {
                max_db,
                count: self.count,
            }));
            self.max_squared = 0.0;
            self.count = 0;
        }
    }
}
