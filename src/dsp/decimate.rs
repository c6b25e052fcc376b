//! CIC decimation cascade
//!
//! Non-recursive 3rd-order CIC filters (taps 1, 3, 3, 1) decimating by two,
//! chained by `ChannelDecimator` to reach the configured channel rate.
//! Stage gain is fixed and data-independent; inputs are assumed to stay
//! within the designed headroom, so no saturation handling is performed.

use crate::buffer::SampleBlock;
use crate::config::DMA_BLOCK_SAMPLES;
use crate::types::{ComplexS16, ComplexS8, ConfigError};

/// Scale applied by the 8-bit first stage to normalize output to ±32768-ish.
const FIRST_STAGE_SCALE: i32 = 32;

/// Decimate-by-2 CIC3 over raw 8-bit samples, promoting to 16 bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Complex8DecimateBy2Cic3 {
    z1: ComplexS16,
    z2: ComplexS16,
}

impl Complex8DecimateBy2Cic3 {
    /// Create a stage with zeroed delay line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            z1: ComplexS16::new(0, 0),
            z2: ComplexS16::new(0, 0),
        }
    }

    /// Filter `src` into `dst`, producing `src.len() / 2` samples.
    ///
    /// `src.len()` must be even; `dst` must hold at least half of it.
    pub fn execute(&mut self, src: &[ComplexS8], dst: &mut [ComplexS16]) -> usize {
        let mut produced = 0;
        for pair in src.chunks_exact(2) {
            let x0 = promote(pair[0]);
            let x1 = promote(pair[1]);
            let (re, im) = cic3_sum(self.z1, self.z2, x0, x1);
            dst[produced] = ComplexS16::new(
                (re * FIRST_STAGE_SCALE) as i16,
                (im * FIRST_STAGE_SCALE) as i16,
            );
            self.z1 = x0;
            self.z2 = x1;
            produced += 1;
        }
        produced
    }
}

/// Translate by -fs/4 and decimate by 2 with a CIC3 in one pass.
///
/// The quarter-rate mixer moves the channel of interest away from zero
/// frequency before filtering, so the front end's DC artifact lands outside
/// the passband. The rotation sequence per input sample is
/// -1, +j, +1, -j, repeating.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranslateByFsOver4AndDecimateBy2Cic3 {
    z1: ComplexS16,
    z2: ComplexS16,
    rotation: u8,
}

impl TranslateByFsOver4AndDecimateBy2Cic3 {
    /// Create a stage with zeroed delay line and rotation phase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            z1: ComplexS16::new(0, 0),
            z2: ComplexS16::new(0, 0),
            rotation: 0,
        }
    }

    /// Mix, filter and decimate `src` into `dst`.
    pub fn execute(&mut self, src: &[ComplexS8], dst: &mut [ComplexS16]) -> usize {
        let mut produced = 0;
        for pair in src.chunks_exact(2) {
            let x0 = self.rotate(pair[0]);
            let x1 = self.rotate(pair[1]);
            let (re, im) = cic3_sum(self.z1, self.z2, x0, x1);
            dst[produced] = ComplexS16::new(
                (re * FIRST_STAGE_SCALE) as i16,
                (im * FIRST_STAGE_SCALE) as i16,
            );
            self.z1 = x0;
            self.z2 = x1;
            produced += 1;
        }
        produced
    }

    fn rotate(&mut self, sample: ComplexS8) -> ComplexS16 {
        let re = i16::from(sample.re);
        let im = i16::from(sample.im);
        let rotated = match self.rotation {
            0 => ComplexS16::new(-re, -im),
            1 => ComplexS16::new(-im, re),
            2 => ComplexS16::new(re, im),
            _ => ComplexS16::new(im, -re),
        };
        self.rotation = (self.rotation + 1) & 3;
        rotated
    }
}

/// Decimate-by-2 CIC3 over 16-bit samples. Gain of 8, removed at the output.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecimateBy2Cic3 {
    z1: ComplexS16,
    z2: ComplexS16,
}

impl DecimateBy2Cic3 {
    /// Create a stage with zeroed delay line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            z1: ComplexS16::new(0, 0),
            z2: ComplexS16::new(0, 0),
        }
    }

    /// Filter the first `count` samples of `buf` in place.
    ///
    /// Reads at index `2 * i`, writes at index `i`; the write index never
    /// passes the read index, so a single buffer serves the whole cascade.
    pub fn execute_in_place(&mut self, buf: &mut [ComplexS16], count: usize) -> usize {
        let mut produced = 0;
        let mut read = 0;
        while read + 1 < count {
            let x0 = buf[read];
            let x1 = buf[read + 1];
            let (re, im) = cic3_sum(self.z1, self.z2, x0, x1);
            buf[produced] = ComplexS16::new((re / 8) as i16, (im / 8) as i16);
            self.z1 = x0;
            self.z2 = x1;
            produced += 1;
            read += 2;
        }
        produced
    }
}

fn promote(sample: ComplexS8) -> ComplexS16 {
    ComplexS16::new(i16::from(sample.re), i16::from(sample.im))
}

/// One 1,3,3,1 sum over [z1, z2, x0, x1], before scaling.
fn cic3_sum(z1: ComplexS16, z2: ComplexS16, x0: ComplexS16, x1: ComplexS16) -> (i32, i32) {
    let re = i32::from(z1.re) + 3 * i32::from(z2.re) + 3 * i32::from(x0.re) + i32::from(x1.re);
    let im = i32::from(z1.im) + 3 * i32::from(z2.im) + 3 * i32::from(x0.im) + i32::from(x1.im);
    (re, im)
}

/// Supported total decimation factors for a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecimationFactor {
    /// Divide the native rate by 4
    By4,
    /// Divide the native rate by 8
    By8,
    /// Divide the native rate by 16
    By16,
    /// Divide the native rate by 32
    By32,
}

impl DecimationFactor {
    /// Map an integer factor to a supported value.
    ///
    /// # Errors
    /// `ConfigError::UnsupportedDecimation` for anything outside
    /// {4, 8, 16, 32}. This is the fail-fast activation check; the streaming
    /// path never revalidates.
    pub const fn from_factor(factor: usize) -> Result<Self, ConfigError> {
        match factor {
            4 => Ok(Self::By4),
            8 => Ok(Self::By8),
            16 => Ok(Self::By16),
            32 => Ok(Self::By32),
            other => Err(ConfigError::UnsupportedDecimation(other)),
        }
    }

    /// The integer factor.
    #[must_use]
    pub const fn factor(self) -> usize {
        match self {
            Self::By4 => 4,
            Self::By8 => 8,
            Self::By16 => 16,
            Self::By32 => 32,
        }
    }

    /// CIC stages beyond the first (each divides by 2).
    const fn extra_stages(self) -> usize {
        match self {
            Self::By4 => 1,
            Self::By8 => 2,
            Self::By16 => 3,
            Self::By32 => 4,
        }
    }
}

/// Decimation cascade from the native front-end rate to the channel rate.
///
/// Applies a first decimate-by-2 stage (plain, or combined with a
/// quarter-rate translation when `translate` is set) followed by up to four
/// more CIC3 decimate-by-2 stages, stopping once the configured factor is
/// reached. All stages after the first operate in place on one internally
/// owned scratch buffer; the returned view borrows it, so the borrow checker
/// enforces that a caller consumes each output before the next `execute`.
pub struct ChannelDecimator {
    first_plain: Complex8DecimateBy2Cic3,
    first_translate: TranslateByFsOver4AndDecimateBy2Cic3,
    stages: [DecimateBy2Cic3; 4],
    factor: DecimationFactor,
    translate: bool,
    scratch: [ComplexS16; DMA_BLOCK_SAMPLES / 2],
}

impl ChannelDecimator {
    /// Create a cascade for the given total factor.
    ///
    /// `translate` selects the quarter-rate-shifting first stage.
    #[must_use]
    pub fn new(factor: DecimationFactor, translate: bool) -> Self {
        Self {
            first_plain: Complex8DecimateBy2Cic3::new(),
            first_translate: TranslateByFsOver4AndDecimateBy2Cic3::new(),
            stages: [DecimateBy2Cic3::new(); 4],
            factor,
            translate,
            scratch: [ComplexS16::new(0, 0); DMA_BLOCK_SAMPLES / 2],
        }
    }

    /// Configured total decimation factor.
    #[must_use]
    pub const fn factor(&self) -> usize {
        self.factor.factor()
    }

    /// Decimate one raw block down to the channel rate.
    ///
    /// Returns a view into the internal scratch buffer holding
    /// `block.len() / factor` samples tagged with the divided rate.
    pub fn execute(&mut self, block: &SampleBlock<'_, i8>) -> SampleBlock<'_, i16> {
        let src = block.samples();
        let mut count = if self.translate {
            self.first_translate.execute(src, &mut self.scratch)
        } else {
            self.first_plain.execute(src, &mut self.scratch)
        };

        for stage in self.stages.iter_mut().take(self.factor.extra_stages()) {
            count = stage.execute_in_place(&mut self.scratch, count);
        }

        SampleBlock::new(
            &self.scratch[..count],
            block.sampling_rate() / self.factor.factor() as u32,
        )
    }
}
