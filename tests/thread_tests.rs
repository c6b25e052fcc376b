//! Driver loop and statistics tests
//!
//! These tests run on the host with std feature enabled.
//! Run with: cargo test --features std

use sdr_baseband::baseband::processor::BasebandConfiguration;
use sdr_baseband::baseband::thread::BasebandThread;
use sdr_baseband::buffer::SampleBlock;
use sdr_baseband::message::{Message, MessageQueue, MessageSink};
use sdr_baseband::rf::{FrontEnd, TickCounter};
use sdr_baseband::rssi::RssiStatsCollector;
use sdr_baseband::types::{ComplexS8, Direction, Mode, Timestamp};

const NATIVE_RATE: u32 = 2_457_600;

#[derive(Default)]
struct RecordingFrontEnd {
    enables: Vec<Direction>,
    disables: usize,
}

impl FrontEnd for RecordingFrontEnd {
    fn enable_streaming(&mut self, direction: Direction) {
        self.enables.push(direction);
    }

    fn disable_streaming(&mut self) {
        self.disables += 1;
    }
}

/// Fixed-rate tick counter: each read advances a configured amount.
struct StepTicks {
    now: u32,
    step: u32,
}

impl TickCounter for StepTicks {
    fn now(&mut self) -> u32 {
        self.now = self.now.wrapping_add(self.step);
        self.now
    }
}

#[derive(Default)]
struct VecSink {
    messages: Vec<Message>,
}

impl MessageSink for VecSink {
    fn post(&mut self, message: Message) {
        self.messages.push(message);
    }
}

fn ais_config() -> BasebandConfiguration {
    BasebandConfiguration {
        mode: Mode::Ais,
        sampling_rate: NATIVE_RATE,
    }
}

fn tpms_config() -> BasebandConfiguration {
    BasebandConfiguration {
        mode: Mode::Tpms,
        sampling_rate: NATIVE_RATE,
    }
}

fn quiet_block() -> Vec<ComplexS8> {
    vec![ComplexS8::new(0, 0); 2048]
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_starts_disabled() {
    let thread = BasebandThread::new();
    assert!(!thread.is_enabled());
    assert!(thread.configuration().is_none());
}

#[test]
fn test_activation_restarts_streaming() {
    let mut thread = BasebandThread::new();
    let mut front_end = RecordingFrontEnd::default();

    thread
        .set_configuration(Some(ais_config()), &mut front_end)
        .expect("AIS activation should succeed");

    assert!(thread.is_enabled());
    assert_eq!(thread.configuration(), Some(&ais_config()));
    assert_eq!(front_end.disables, 1, "streaming stops before the swap");
    assert_eq!(front_end.enables, vec![Direction::Receive]);
}

#[test]
fn test_unchanged_configuration_is_noop() {
    let mut thread = BasebandThread::new();
    let mut front_end = RecordingFrontEnd::default();

    thread.set_configuration(Some(ais_config()), &mut front_end).unwrap();
    thread.set_configuration(Some(ais_config()), &mut front_end).unwrap();

    assert_eq!(front_end.disables, 1, "same configuration must not bounce streaming");
    assert_eq!(front_end.enables.len(), 1);
}

#[test]
fn test_disable_stops_streaming() {
    let mut thread = BasebandThread::new();
    let mut front_end = RecordingFrontEnd::default();

    thread.set_configuration(Some(ais_config()), &mut front_end).unwrap();
    thread.set_configuration(None, &mut front_end).unwrap();

    assert!(!thread.is_enabled());
    assert!(thread.configuration().is_none());
    assert_eq!(front_end.disables, 2);
    assert_eq!(front_end.enables.len(), 1, "disable must not re-enable streaming");
}

#[test]
fn test_mode_switch_reconstructs_processor() {
    let mut thread = BasebandThread::new();
    let mut front_end = RecordingFrontEnd::default();
    let mut ticks = StepTicks { now: 0, step: 10 };
    let mut sink = VecSink::default();

    // A -> B -> A; each switch tears down and rebuilds.
    thread.set_configuration(Some(ais_config()), &mut front_end).unwrap();

    // Leave the first activation with partial statistics accumulated.
    let samples = quiet_block();
    let block = SampleBlock::new(&samples, NATIVE_RATE);
    for _ in 0..10 {
        thread.process_block(&block, Timestamp::from_ticks(0), &mut ticks, &mut sink);
    }

    thread.set_configuration(Some(tpms_config()), &mut front_end).unwrap();
    thread.set_configuration(Some(ais_config()), &mut front_end).unwrap();

    assert!(thread.is_enabled());
    assert_eq!(thread.configuration(), Some(&ais_config()));
    assert_eq!(front_end.disables, 3);
    assert_eq!(
        front_end.enables,
        vec![Direction::Receive; 3],
        "every activation re-enables streaming"
    );

    // No statistics may leak across the reconstruction: a fresh interval
    // needs a full second of stream time before the first report.
    sink.messages.clear();
    for _ in 0..10 {
        thread.process_block(&block, Timestamp::from_ticks(0), &mut ticks, &mut sink);
    }
    assert!(
        !sink.messages.iter().any(|m| matches!(m, Message::BasebandStatistics(_))),
        "statistics interval must restart with the new processor"
    );
}

// =============================================================================
// Block Processing Tests
// =============================================================================

#[test]
fn test_blocks_drained_when_disabled() {
    let mut thread = BasebandThread::new();
    let mut ticks = StepTicks { now: 0, step: 10 };
    let mut sink = VecSink::default();

    let samples = quiet_block();
    let block = SampleBlock::new(&samples, NATIVE_RATE);
    for _ in 0..50 {
        thread.process_block(&block, Timestamp::from_ticks(0), &mut ticks, &mut sink);
    }
    assert!(sink.messages.is_empty(), "discarded blocks must not produce messages");
}

#[test]
fn test_statistics_posted_once_per_interval() {
    let mut thread = BasebandThread::new();
    let mut front_end = RecordingFrontEnd::default();
    let mut ticks = StepTicks { now: 0, step: 7 };
    let mut sink = VecSink::default();

    thread.set_configuration(Some(ais_config()), &mut front_end).unwrap();

    // One second of stream time: 2.4576 MHz / 2048-sample blocks. One block
    // of slack absorbs float rounding in the stream-time accumulator.
    let samples = quiet_block();
    let block = SampleBlock::new(&samples, NATIVE_RATE);
    let blocks_per_second = (NATIVE_RATE / 2048) as usize;
    for _ in 0..=blocks_per_second {
        thread.process_block(&block, Timestamp::from_ticks(0), &mut ticks, &mut sink);
    }

    let stats: Vec<_> = sink
        .messages
        .iter()
        .filter_map(|m| match m {
            Message::BasebandStatistics(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(stats.len(), 1, "exactly one load report per interval");
    let blocks = stats[0].blocks as usize;
    assert!(
        (blocks_per_second..=blocks_per_second + 1).contains(&blocks),
        "unexpected block count {}",
        blocks
    );
    assert!(stats[0].busy_ticks > 0);
    assert!(stats[0].total_ticks >= stats[0].busy_ticks);

    let channel_stats = sink
        .messages
        .iter()
        .filter(|m| matches!(m, Message::ChannelStatistics(_)))
        .count();
    assert!(channel_stats >= 1, "channel power should also be reported");
}

// =============================================================================
// Message Queue Tests
// =============================================================================

#[test]
fn test_message_queue_is_fire_and_forget() {
    let mut queue = MessageQueue::new();
    // Push far past capacity; the producer must never block or fail.
    for i in 0..100 {
        queue.post(Message::RssiStatistics(sdr_baseband::message::RssiStatistics {
            accumulator: i,
            min: 0,
            max: 0,
            count: 1,
        }));
    }
    let drained = std::iter::from_fn(|| queue.pop()).count();
    assert!(drained < 100, "overflow must drop, not grow");
    assert!(drained > 0);
    assert!(queue.is_empty());
}

// =============================================================================
// RSSI Path Tests
// =============================================================================

#[test]
fn test_rssi_statistics_cadence_and_values() {
    let mut collector = RssiStatsCollector::with_interval(1000);
    let mut sink = VecSink::default();

    let samples: Vec<u8> = (0..2500).map(|i| (i % 256) as u8).collect();
    collector.add_samples(&samples, &mut sink);

    let reports: Vec<_> = sink
        .messages
        .iter()
        .filter_map(|m| match m {
            Message::RssiStatistics(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(reports.len(), 2, "two full intervals of 1000 samples");
    for report in &reports {
        assert_eq!(report.count, 1000);
        assert_eq!(report.min, 0);
        assert_eq!(report.max, 255);
        assert_eq!(report.mean(), report.accumulator / 1000);
    }
}
