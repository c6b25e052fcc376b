//! RSSI sampling path
//!
//! Signal-strength samples arrive on their own cadence, independent of the
//! baseband pipeline; the two paths share nothing but the outward message
//! sink. Raw ADC readings are accumulated into min/max/mean statistics and
//! posted once per interval.

use crate::config::RSSI_STATS_INTERVAL_SAMPLES;
use crate::message::{Message, MessageSink, RssiStatistics};

/// Accumulator for raw RSSI samples.
#[derive(Clone, Copy, Debug)]
pub struct RssiStatsCollector {
    interval: u32,
    accumulator: u32,
    min: u32,
    max: u32,
    count: u32,
}

impl RssiStatsCollector {
    /// Create a collector posting on the default cadence.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_interval(RSSI_STATS_INTERVAL_SAMPLES)
    }

    /// Create a collector posting every `interval` samples.
    #[must_use]
    pub const fn with_interval(interval: u32) -> Self {
        Self {
            interval,
            accumulator: 0,
            min: u32::MAX,
            max: 0,
            count: 0,
        }
    }

    /// Accumulate one block of raw ADC readings, posting statistics
    /// whenever an interval completes.
    pub fn add_samples(&mut self, samples: &[u8], sink: &mut dyn MessageSink) {
        for &sample in samples {
            let value = u32::from(sample);
            self.accumulator += value;
            if value < self.min {
                self.min = value;
            }
            if value > self.max {
                self.max = value;
            }
            self.count += 1;

            if self.count >= self.interval {
                sink.post(Message::RssiStatistics(RssiStatistics {
                    accumulator: self.accumulator,
                    min: self.min,
                    max: self.max,
                    count: self.count,
                }));
                *self = Self::with_interval(self.interval);
            }
        }
    }
}

impl Default for RssiStatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
