//! Pseudo-random bipolar sequences from a linear feedback shift register.
//!
//! The register of length `L` is kept as a [`Signal`] whose index 0 holds the
//! newest bit. Each step feeds back `reg[0] XOR reg[L-1]`, delays the whole
//! history by one sample and writes the feedback bit into index 0. This is
//! the recurrence
//!
//! ```text
//! b[n] = b[n-1] XOR b[n-L]
//! ```
//!
//! which yields a maximal-length sequence (period `2^L - 1`) whenever
//! `x^L + x^(L-1) + 1` is primitive, e.g. `L = 3, 4, 6, 7, 15`.

use crate::error::{SignalError, SignalResult};
use crate::signal::Signal;

/// Shift-register sequence generator with taps `{0, L-1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftRegister {
    /// Register length `L`.
    length: usize,
}

impl ShiftRegister {
    /// Create a generator for a register of `length` cells.
    pub fn new(length: usize) -> SignalResult<Self> {
        if length < 2 {
            return Err(SignalError::InvalidRegisterLength(length));
        }
        Ok(Self { length })
    }

    /// Register length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a bipolar (`+1`/`-1`) sequence of `length` samples.
    ///
    /// The oldest bit lands at index 0. The register is seeded with a single
    /// `1` followed by `L - 1` zeros, which are part of the output; a
    /// request shorter than `L` therefore still returns those `L` seed
    /// samples.
    ///
    /// # Arguments
    ///
    /// * `length` - Number of samples to produce
    ///
    /// # Returns
    ///
    /// A signal on indices `0..max(length, L)` holding `2 * bit - 1` for
    /// each register bit. The output depends only on `L` and `length`.
    ///
    /// # Example
    ///
    /// ```
    /// use lib_signal::ShiftRegister;
    ///
    /// let sequence = ShiftRegister::new(4).unwrap().generate(15);
    /// assert_eq!(
    ///     sequence.samples(),
    ///     vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0]
    /// );
    /// ```
    pub fn generate(&self, length: usize) -> Signal<f64> {
        let last = self.length as isize - 1;

        // 1 followed by L-1 zeros, newest first
        let mut register = Signal::from_samples(vec![1.0]) + Signal::new().shift(-last);

        while register.len() < length {
            let feedback = xor_bit(register.get(0), register.get(last));
            register.shift_in_place(-1);
            register.set(0, feedback);
            tracing::trace!("ShiftRegister step {}: fed back {}", register.len(), feedback);
        }

        tracing::debug!(
            "ShiftRegister: L={}, requested {} samples, generated {}",
            self.length,
            length,
            register.len()
        );

        let bipolar = register.map(|bit| 2.0 * bit - 1.0);
        bipolar.samples().into_iter().rev().collect()
    }
}

fn xor_bit(a: f64, b: f64) -> f64 {
    if (a != 0.0) ^ (b != 0.0) {
        1.0
    } else {
        0.0
    }
}
