//! Decimation cascade tests
//!
//! These tests run on the host with std feature enabled.
//! Run with: cargo test --features std

use sdr_baseband::buffer::SampleBlock;
use sdr_baseband::dsp::decimate::{ChannelDecimator, DecimationFactor};
use sdr_baseband::types::{ComplexS8, ConfigError};

const NATIVE_RATE: u32 = 2_457_600;

fn block_of(samples: &[ComplexS8]) -> SampleBlock<'_, i8> {
    SampleBlock::new(samples, NATIVE_RATE)
}

// =============================================================================
// Factor / Bookkeeping Tests
// =============================================================================

#[test]
fn test_supported_factors() {
    for factor in [4, 8, 16, 32] {
        let parsed = DecimationFactor::from_factor(factor).expect("factor should be supported");
        assert_eq!(parsed.factor(), factor);
    }
}

#[test]
fn test_unsupported_factors_rejected() {
    for factor in [0, 1, 2, 3, 5, 6, 64, 100] {
        assert_eq!(
            DecimationFactor::from_factor(factor),
            Err(ConfigError::UnsupportedDecimation(factor)),
            "factor {} should be rejected",
            factor
        );
    }
}

#[test]
fn test_output_length_is_input_over_factor() {
    let input = vec![ComplexS8::new(1, -1); 2048];
    for factor in [4, 8, 16, 32] {
        let parsed = DecimationFactor::from_factor(factor).unwrap();
        let mut decimator = ChannelDecimator::new(parsed, false);
        let output = decimator.execute(&block_of(&input));
        assert_eq!(
            output.len(),
            input.len() / factor,
            "wrong output count for factor {}",
            factor
        );
    }
}

#[test]
fn test_output_rate_is_input_rate_over_factor() {
    let input = vec![ComplexS8::new(0, 0); 512];
    for factor in [4, 8, 16, 32] {
        let parsed = DecimationFactor::from_factor(factor).unwrap();
        let mut decimator = ChannelDecimator::new(parsed, false);
        let output = decimator.execute(&block_of(&input));
        assert_eq!(output.sampling_rate(), NATIVE_RATE / factor as u32);
    }
}

#[test]
fn test_repeated_blocks_keep_producing() {
    let input = vec![ComplexS8::new(10, 0); 256];
    let mut decimator = ChannelDecimator::new(DecimationFactor::By8, false);
    for _ in 0..4 {
        let output = decimator.execute(&block_of(&input));
        assert_eq!(output.len(), 32);
    }
}

// =============================================================================
// Passband / Stopband Tests
// =============================================================================

#[test]
fn test_dc_gain_through_plain_cascade() {
    // DC gain: 8 * 32 in the first stage, unity in later stages.
    let input = vec![ComplexS8::new(100, 0); 512];
    let mut decimator = ChannelDecimator::new(DecimationFactor::By4, false);
    let output = decimator.execute(&block_of(&input));

    let settled = &output.samples()[8..];
    for sample in settled {
        assert_eq!(sample.re, 25600, "DC should pass at full cascade gain");
        assert_eq!(sample.im, 0);
    }
}

#[test]
fn test_passband_tone_survives() {
    // A tone well inside the passband keeps its amplitude to within the
    // cascade's documented droop.
    let amplitude = 100.0f64;
    let freq = NATIVE_RATE as f64 / 128.0;
    let input: Vec<ComplexS8> = (0..2048)
        .map(|n| {
            let phase = 2.0 * std::f64::consts::PI * freq * n as f64 / NATIVE_RATE as f64;
            ComplexS8::new(
                (amplitude * phase.cos()).round() as i8,
                (amplitude * phase.sin()).round() as i8,
            )
        })
        .collect();

    let mut decimator = ChannelDecimator::new(DecimationFactor::By4, false);
    let output = decimator.execute(&block_of(&input));

    let full_gain = 25600.0;
    let settled = &output.samples()[16..];
    let mean_mag: f64 = settled
        .iter()
        .map(|s| (f64::from(s.re).powi(2) + f64::from(s.im).powi(2)).sqrt())
        .sum::<f64>()
        / settled.len() as f64;

    assert!(
        mean_mag > 0.95 * full_gain,
        "passband tone attenuated too much: {} of {}",
        mean_mag,
        full_gain
    );
    assert!(
        mean_mag < 1.05 * full_gain,
        "passband tone grew unexpectedly: {}",
        mean_mag
    );
}

#[test]
fn test_translating_first_stage_rejects_dc() {
    // The quarter-rate mixer moves front-end DC to the decimated Nyquist
    // frequency, where the second CIC stage has a true null.
    let input = vec![ComplexS8::new(100, 0); 512];
    let mut decimator = ChannelDecimator::new(DecimationFactor::By4, true);
    let output = decimator.execute(&block_of(&input));

    let settled = &output.samples()[8..];
    for sample in settled {
        assert_eq!(
            (sample.re, sample.im),
            (0, 0),
            "translated DC should be nulled"
        );
    }
}

#[test]
fn test_translating_stage_passes_quarter_rate_tone() {
    // A tone at +fs/4 lands at DC after translation and passes at full gain.
    let input: Vec<ComplexS8> = (0..512)
        .map(|n| match n % 4 {
            0 => ComplexS8::new(100, 0),
            1 => ComplexS8::new(0, 100),
            2 => ComplexS8::new(-100, 0),
            _ => ComplexS8::new(0, -100),
        })
        .collect();

    let mut decimator = ChannelDecimator::new(DecimationFactor::By4, true);
    let output = decimator.execute(&block_of(&input));

    let settled = &output.samples()[8..];
    let mean_mag: f64 = settled
        .iter()
        .map(|s| (f64::from(s.re).powi(2) + f64::from(s.im).powi(2)).sqrt())
        .sum::<f64>()
        / settled.len() as f64;
    assert!(
        mean_mag > 0.9 * 25600.0,
        "quarter-rate tone should pass the translating cascade: {}",
        mean_mag
    );
}
