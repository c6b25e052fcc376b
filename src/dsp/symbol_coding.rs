//! Symbol coding
//!
//! Differential (NRZI) coding over single bits. The decoder retains one bit
//! of input history; a data one is the absence of a level transition.

/// NRZI decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct NrziDecoder {
    prev: bool,
}

impl NrziDecoder {
    /// Create a decoder with cleared history.
    #[must_use]
    pub const fn new() -> Self {
        Self { prev: false }
    }

    /// Decode one sliced symbol into a data bit.
    pub fn decode(&mut self, symbol: bool) -> bool {
        let bit = !(symbol ^ self.prev);
        self.prev = symbol;
        bit
    }
}

/// NRZI encoder, the decoder's inverse.
#[derive(Clone, Copy, Debug, Default)]
pub struct NrziEncoder {
    level: bool,
}

impl NrziEncoder {
    /// Create an encoder at the low line level.
    #[must_use]
    pub const fn new() -> Self {
        Self { level: false }
    }

    /// Encode one data bit into a line symbol. A zero toggles the level.
    pub fn encode(&mut self, bit: bool) -> bool {
        if !bit {
            self.level = !self.level;
        }
        self.level
    }
}
