//! Shared types used across the baseband core
//!
//! Domain-specific types for complex samples, receiver modes and capture
//! timestamps. Invariants are enforced at construction time wherever the
//! compiler can see them.

use core::fmt;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

/// A complex sample with real and imaginary components.
///
/// The pipeline carries three widths: raw 8-bit front-end samples,
/// 16-bit decimated samples, and float samples inside the matched filter
/// and timing loop. Samples are plain values, copied between stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Complex<T> {
    /// In-phase (real) component
    pub re: T,
    /// Quadrature (imaginary) component
    pub im: T,
}

impl<T> Complex<T> {
    /// Create a complex sample from components.
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Raw 8-bit front-end sample
pub type ComplexS8 = Complex<i8>;

/// Intermediate 16-bit sample
pub type ComplexS16 = Complex<i16>;

/// Float sample used in the matched filter and timing loop
pub type ComplexF32 = Complex<f32>;

impl ComplexF32 {
    /// Zero-valued sample.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Squared magnitude.
    #[must_use]
    pub fn mag_sq(self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude.
    #[must_use]
    pub fn mag(self) -> f32 {
        self.mag_sq().sqrt()
    }
}

impl From<ComplexS16> for ComplexF32 {
    fn from(value: ComplexS16) -> Self {
        Self {
            re: f32::from(value.re),
            im: f32::from(value.im),
        }
    }
}

impl core::ops::Add for ComplexF32 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl core::ops::AddAssign for ComplexF32 {
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl core::ops::Mul for ComplexF32 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

/// Streaming direction of the active processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Front end delivers buffers to the core
    #[default]
    Receive,
    /// Core fills buffers for the front end
    Transmit,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Receive => defmt::write!(f, "RX"),
            Self::Transmit => defmt::write!(f, "TX"),
        }
    }
}

/// Receiver mode, selecting which protocol processor is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Marine AIS, GMSK 9600 baud
    Ais,
    /// Tire-pressure telemetry, FSK 19200 baud
    Tpms,
    /// Utility-meter telemetry, OOK Manchester
    Ert,
}

impl Mode {
    /// Streaming direction for this mode. All shipped modes receive.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Ais | Self::Tpms | Self::Ert => Direction::Receive,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Mode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ais => defmt::write!(f, "AIS"),
            Self::Tpms => defmt::write!(f, "TPMS"),
            Self::Ert => defmt::write!(f, "ERT"),
        }
    }
}

/// Capture timestamp in platform ticks.
///
/// The core never reads a clock; the platform stamps each DMA block and the
/// stamp is carried through to completed packets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from a raw tick count.
    #[must_use]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Raw tick count.
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Timestamp {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "@{}", self.0);
    }
}

/// Activation-time configuration error.
///
/// Nothing in the streaming hot path returns this; it is produced only while
/// constructing a processor, and the driver refuses to activate on error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Total decimation factor is not one of 4, 8, 16, 32
    UnsupportedDecimation(usize),
    /// Tap kernel length is not compatible with its decimation factor
    /// and embedded sinusoid period
    KernelLength {
        /// Offending tap count
        taps: usize,
        /// Decimation factor the kernel was paired with
        decimation: usize,
    },
    /// Symbol rate does not fit the discriminant sample rate
    SymbolRate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDecimation(factor) => {
                write!(f, "unsupported decimation factor {factor}")
            }
            Self::KernelLength { taps, decimation } => {
                write!(f, "kernel of {taps} taps incompatible with decimation {decimation}")
            }
            Self::SymbolRate => write!(f, "symbol rate incompatible with sample rate"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UnsupportedDecimation(factor) => {
                defmt::write!(f, "unsupported decimation {}", factor);
            }
            Self::KernelLength { taps, decimation } => {
                defmt::write!(f, "kernel {} taps / decimation {}", taps, decimation);
            }
            Self::SymbolRate => defmt::write!(f, "bad symbol rate"),
        }
    }
}
