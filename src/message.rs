//! Outward messages
//!
//! Value-type messages posted from the real-time side toward the application
//! boundary. The handoff is fire-and-forget: a slow consumer causes queued
//! messages to be dropped at the queue, never a blocked producer.

use heapless::spsc::{Producer, Queue};

use crate::baseband::packet::Packet;
use crate::config::MESSAGE_QUEUE_DEPTH;
use crate::types::Mode;

/// Received-signal-strength statistics over one reporting interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RssiStatistics {
    /// Sum of raw RSSI samples in the interval
    pub accumulator: u32,
    /// Minimum raw sample seen
    pub min: u32,
    /// Maximum raw sample seen
    pub max: u32,
    /// Number of samples accumulated
    pub count: u32,
}

impl RssiStatistics {
    /// Mean raw RSSI over the interval.
    #[must_use]
    pub const fn mean(&self) -> u32 {
        if self.count == 0 {
            0
        } else {
            self.accumulator / self.count
        }
    }
}

/// Processing-load statistics over one reporting interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasebandStatistics {
    /// Ticks spent inside processor execution
    pub busy_ticks: u32,
    /// Ticks elapsed over the whole interval
    pub total_ticks: u32,
    /// Number of DMA blocks handled
    pub blocks: u32,
}

impl BasebandStatistics {
    /// Fraction of the interval spent processing, 0.0..=1.0.
    #[must_use]
    pub fn load(&self) -> f32 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        self.busy_ticks as f32 / self.total_ticks as f32
    }
}

/// Channel power statistics over one reporting interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelStatistics {
    /// Peak channel power relative to full scale, in dB
    pub max_db: i32,
    /// Number of samples observed
    pub count: usize,
}

/// Channel spectrum snapshot for display.
#[derive(Clone, Copy, Debug)]
pub struct ChannelSpectrum {
    /// Per-bin power in dB, display-scaled
    pub db: [u8; 256],
    /// Sampling rate the snapshot was taken at, in Hz
    pub sampling_rate: u32,
}

/// A completed protocol packet with its discriminator.
#[derive(Clone, Debug)]
pub struct PacketMessage {
    /// Protocol the packet was framed by
    pub protocol: Mode,
    /// The framed bits and capture timestamp
    pub packet: Packet,
}

/// Outward message posted to the application boundary.
///
/// Messages are opaque timestamped values; no reply is expected.
#[derive(Clone, Debug)]
pub enum Message {
    /// Periodic RSSI statistics
    RssiStatistics(RssiStatistics),
    /// Periodic processing-load statistics
    BasebandStatistics(BasebandStatistics),
    /// Periodic channel power statistics
    ChannelStatistics(ChannelStatistics),
    /// Channel spectrum snapshot
    ChannelSpectrum(ChannelSpectrum),
    /// Completed protocol packet
    Packet(PacketMessage),
}

#[cfg(feature = "embedded")]
impl defmt::Format for Message {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::RssiStatistics(s) => defmt::write!(f, "Rssi(mean {})", s.mean()),
            Self::BasebandStatistics(s) => {
                defmt::write!(f, "Baseband({}/{} ticks)", s.busy_ticks, s.total_ticks);
            }
            Self::ChannelStatistics(s) => defmt::write!(f, "Channel({} dB)", s.max_db),
            Self::ChannelSpectrum(s) => defmt::write!(f, "Spectrum({} Hz)", s.sampling_rate),
            Self::Packet(p) => defmt::write!(f, "Packet({} bits)", p.packet.len()),
        }
    }
}

/// Sink for outward messages.
///
/// Posting must never block; implementations drop on overflow.
pub trait MessageSink {
    /// Post a message toward the application boundary.
    fn post(&mut self, message: Message);
}

impl<const N: usize> MessageSink for Producer<'_, Message, N> {
    fn post(&mut self, message: Message) {
        // Fire-and-forget: a full queue drops the message.
        let _ = self.enqueue(message);
    }
}

/// Single-producer single-consumer outward message queue.
///
/// Convenience wrapper for same-context use; real-time integrations split
/// the underlying queue across the thread boundary instead.
pub struct MessageQueue {
    queue: Queue<Message, MESSAGE_QUEUE_DEPTH>,
}

impl MessageQueue {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
        }
    }

    /// Pop the oldest queued message, if any.
    pub fn pop(&mut self) -> Option<Message> {
        self.queue.dequeue()
    }

    /// Number of messages waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl MessageSink for MessageQueue {
    fn post(&mut self, message: Message) {
        let _ = self.queue.enqueue(message);
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}
