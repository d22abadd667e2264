//! Error types for signal operations.

use lib_types::{Complex64, KindError};
use thiserror::Error;

/// Errors that can occur during signal operations.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Sample of the wrong kind for the signal.
    #[error("Invalid sample type: {0}")]
    InvalidType(#[from] KindError),

    /// Phase constant with a non-zero real part.
    #[error("Invalid sample type: phasor constant must be purely imaginary, got {0}")]
    NotImaginary(Complex64),

    /// Zero index outside the supplied samples.
    #[error("Invalid shape: zero index {zero_index} outside {len} samples")]
    InvalidShape { zero_index: usize, len: usize },

    /// More than one sample marked as the origin.
    #[error("Invalid shape: origin marked at positions {first} and {second}")]
    MultipleOrigins { first: usize, second: usize },

    /// Malformed index or range descriptor.
    #[error("Unsupported index: {0}")]
    UnsupportedIndex(String),

    /// Shift register too short to carry two taps.
    #[error("Shift register length must be at least 2, got {0}")]
    InvalidRegisterLength(usize),
}

/// Result type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;
