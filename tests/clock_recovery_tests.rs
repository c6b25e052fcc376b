//! Gardner clock recovery tests
//!
//! These tests run on the host with std feature enabled.
//! Run with: cargo test --features std

use sdr_baseband::dsp::clock_recovery::ClockRecovery;
use sdr_baseband::types::ConfigError;

const SAMPLING_RATE: u32 = 38_400;
const SYMBOL_RATE: u32 = 9600;

fn pseudo_random_symbols(count: usize, mut seed: u32) -> Vec<f32> {
    (0..count)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (seed >> 16) & 1 != 0 {
                1.0
            } else {
                -1.0
            }
        })
        .collect()
}

/// Hold each symbol for `samples_per_symbol` samples (possibly fractional)
/// and run the whole stream through the loop.
fn recover(symbols: &[f32], samples_per_symbol: f64) -> Vec<f32> {
    let mut recovery = ClockRecovery::new(SAMPLING_RATE, SYMBOL_RATE).unwrap();
    let total_samples = (symbols.len() as f64 * samples_per_symbol) as usize;
    let mut recovered = Vec::new();
    for n in 0..total_samples {
        let index = (n as f64 / samples_per_symbol) as usize;
        let sample = symbols[index.min(symbols.len() - 1)];
        if let Some(symbol) = recovery.feed(sample) {
            recovered.push(symbol);
        }
    }
    recovered
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_increment_matches_rate_ratio() {
    let recovery = ClockRecovery::new(SAMPLING_RATE, SYMBOL_RATE).unwrap();
    // 9600 / 38400 of a full 2^32 turn per sample.
    assert_eq!(recovery.increment(), 1 << 30);
}

#[test]
fn test_rejects_degenerate_rates() {
    assert_eq!(
        ClockRecovery::new(SAMPLING_RATE, 0).unwrap_err(),
        ConfigError::SymbolRate
    );
    // Fewer than two samples per symbol.
    assert_eq!(
        ClockRecovery::new(SAMPLING_RATE, 30_000).unwrap_err(),
        ConfigError::SymbolRate
    );
}

// =============================================================================
// Lock Tests
// =============================================================================

#[test]
fn test_exact_rate_recovers_polarities() {
    let symbols = pseudo_random_symbols(60, 0xDEAD_BEEF);
    let recovered = recover(&symbols, 4.0);

    assert!(
        recovered.len() >= 55,
        "expected roughly one output per symbol, got {}",
        recovered.len()
    );

    // After a settling period the polarities must track the input.
    for (k, value) in recovered.iter().enumerate().skip(10) {
        assert_eq!(
            *value >= 0.0,
            symbols[k] >= 0.0,
            "polarity mismatch at symbol {}",
            k
        );
    }
}

#[test]
fn test_emits_at_most_one_symbol_per_sample() {
    let mut recovery = ClockRecovery::new(SAMPLING_RATE, SYMBOL_RATE).unwrap();
    let mut outputs = 0;
    for n in 0..400 {
        let sample = if (n / 4) % 2 == 0 { 1.0 } else { -1.0 };
        if recovery.feed(sample).is_some() {
            outputs += 1;
        }
    }
    // 400 samples at 4 samples/symbol.
    assert!(
        (95..=101).contains(&outputs),
        "unexpected symbol count {}",
        outputs
    );
}

#[test]
fn test_small_rate_offset_locks_without_slip() {
    // 0.25% slow symbol clock: boundaries drift by a whole sample every
    // 100 symbols; an unlocked loop would slip.
    let count = 300;
    let symbols: Vec<f32> = (0..count)
        .map(|k| if k % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let recovered = recover(&symbols, 4.01);

    assert!(
        recovered.len() >= count - 5,
        "lost symbols: got {}",
        recovered.len()
    );

    // Once locked, an alternating stream must keep alternating; a cycle
    // slip shows up as a repeated polarity.
    for window in recovered[50..250].windows(2) {
        assert_ne!(
            window[0] >= 0.0,
            window[1] >= 0.0,
            "cycle slip: consecutive symbols with equal polarity"
        );
    }
}
