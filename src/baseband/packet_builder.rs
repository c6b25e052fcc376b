//! Packet-framing state machine
//!
//! Two states: hunting for a preamble, then accumulating payload bits until
//! the end condition accepts or capacity runs out. Every reset path discards
//! in-flight bits wholesale; truncation is a normal re-synchronization, not
//! an error.

use crate::baseband::bit_pattern::{BitHistory, BitPattern, EndCondition};
use crate::baseband::packet::Packet;
use crate::types::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Preamble,
    Payload,
}

/// Preamble-driven packet framer.
pub struct PacketBuilder {
    preamble: BitPattern,
    unstuff: BitPattern,
    end: EndCondition,
    state: State,
    history: BitHistory,
    appended: u32,
    packet: Packet,
    timestamp: Timestamp,
}

impl PacketBuilder {
    /// Create a builder in the preamble-hunting state.
    #[must_use]
    pub fn new(preamble: BitPattern, unstuff: BitPattern, end: EndCondition) -> Self {
        Self {
            preamble,
            unstuff,
            end,
            state: State::Preamble,
            history: BitHistory::new(),
            appended: 0,
            packet: Packet::new(),
            timestamp: Timestamp::from_ticks(0),
        }
    }

    /// Reference timestamp for bits fed from the current block; stamped onto
    /// the packet when its preamble is found.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Whether the builder is mid-packet.
    #[must_use]
    pub fn in_payload(&self) -> bool {
        self.state == State::Payload
    }

    /// Feed one data bit; yields a completed packet at most once per call.
    pub fn feed(&mut self, bit: bool) -> Option<Packet> {
        self.history.add(bit);

        match self.state {
            State::Preamble => {
                if self.history.matches(&self.preamble) {
                    self.packet.clear();
                    self.packet.set_timestamp(self.timestamp);
                    self.state = State::Payload;
                }
                None
            }
            State::Payload => {
                let stuffing = self.history.matches(&self.unstuff);
                self.appended = (self.appended << 1) | u32::from(!stuffing);
                if !stuffing {
                    self.packet.push(bit);
                }

                if self.ended() {
                    if let EndCondition::Pattern(pattern) = self.end {
                        // The end marker's own bits were appended along the
                        // way; pop them so the handler sees payload only.
                        let mask = pattern_mask(pattern.length());
                        let marker_bits = (self.appended & mask).count_ones() as usize;
                        let len = self.packet.len();
                        self.packet.truncate(len.saturating_sub(marker_bits));
                    }
                    let completed = core::mem::replace(&mut self.packet, Packet::new());
                    self.reset();
                    return Some(completed);
                }
                if self.packet.is_full() {
                    // Capacity exceeded: silent discard, hunt again.
                    self.reset();
                }
                None
            }
        }
    }

    fn ended(&self) -> bool {
        match self.end {
            EndCondition::Pattern(pattern) => self.history.matches(&pattern),
            EndCondition::AfterBits(count) => self.packet.len() >= count,
        }
    }

    fn reset(&mut self) {
        self.state = State::Preamble;
        self.history.reset();
        self.appended = 0;
        self.packet.clear();
    }
}

const fn pattern_mask(length: u32) -> u32 {
    if length == 0 {
        0
    } else if length >= 32 {
        u32::MAX
    } else {
        (1 << length) - 1
    }
}
