//! Direct convolution and cross-correlation.
//!
//! Convolution is computed by plain double summation, O(W_a * W_b) in the
//! materialized widths of the operands. For signals with negative indices the
//! full linear convolution of the materialized windows starts at lag
//! `-(neg_a + neg_b)` and ends at lag `pos_a + pos_b - 2`, so the result's zero
//! index falls `neg_a + neg_b` samples into the output.
//!
//! Cross-correlation is convolution with the conjugated, time-reversed second
//! operand:
//!
//! ```text
//! (a % b)[n] = sum_k a[k] * conj(b[k - n])
//! ```

use crate::signal::Signal;
use lib_types::Sample;

impl<T: Sample> Signal<T> {
    /// Discrete convolution: `result[n] = sum_k self[k] * other[n - k]`.
    ///
    /// `k` runs over this signal's materialized window; lags cover the full
    /// range implied by both windows.
    ///
    /// # Arguments
    ///
    /// * `other` - The impulse response (or second operand); convolution commutes
    ///
    /// # Returns
    ///
    /// A signal of `self.len() + other.len() - 1` samples whose window runs
    /// from `-(self.zero_index() + other.zero_index())`. Explicit zero padding
    /// on either operand widens the window without changing any value.
    ///
    /// # Example
    ///
    /// ```
    /// use lib_signal::Signal;
    ///
    /// let x = Signal::from_samples(vec![1.0, 2.0, 3.0]);
    /// let mut delay = Signal::new();
    /// delay.set(1, 1.0);
    ///
    /// assert_eq!(x.convolve(&delay), x.shift(-1));
    /// ```
    pub fn convolve(&self, other: &Signal<T>) -> Signal<T> {
        let samples = direct_convolve(&self.samples(), &other.samples());
        let zero_index = self.zero_index() + other.zero_index();

        tracing::debug!(
            "convolve: widths {} x {}, lags {}..{}",
            self.len(),
            other.len(),
            -(zero_index as isize),
            samples.len() as isize - zero_index as isize
        );

        let (negative, non_negative) = samples.split_at(zero_index);
        Signal::from_sides(
            non_negative.iter().copied().collect(),
            negative.iter().rev().copied().collect(),
        )
    }

    /// Cross-correlation: `self.convolve(&!other.conjugate())`.
    ///
    /// The result's index is the lag of `other` relative to `self`.
    pub fn correlate(&self, other: &Signal<T>) -> Signal<T> {
        self.convolve(&other.conjugate().reverse())
    }
}

/// Direct linear convolution of two sample runs.
///
/// This is O(n*m). Output has `signal.len() + kernel.len() - 1` samples, or
/// none if either input is empty.
pub fn direct_convolve<T: Sample>(signal: &[T], kernel: &[T]) -> Vec<T> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }

    let output_len = signal.len() + kernel.len() - 1;
    let mut output = vec![T::zero(); output_len];

    for (i, &s) in signal.iter().enumerate() {
        for (j, &k) in kernel.iter().enumerate() {
            output[i + j] += s * k;
        }
    }

    output
}
