//! Digital Signal Processing
//!
//! The receive pipeline's math stages:
//! - CIC decimation cascade (with optional quarter-rate translation)
//! - Matched filter producing a timing discriminant
//! - Gardner symbol-timing recovery
//! - Symbol coding (NRZI)
//!
//! Every stage is a plain struct with a `feed`/`execute` method; nothing
//! here allocates or blocks.

pub mod decimate;
pub mod taps;
pub mod matched_filter;
pub mod clock_recovery;
pub mod symbol_coding;
