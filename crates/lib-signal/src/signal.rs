//! Bi-directional discrete-time signal.
//!
//! A [`Signal`] is a function from the integers to a sample value with
//! finite support. Only a window around the origin is materialized:
//!
//! ```text
//!   index:      ... -3   -2   -1  |  0    1    2  ...
//!   storage:         n[2] n[1] n[0] | p[0] p[1] p[2]
//! ```
//!
//! `p` (non-negative side) always holds at least the sample at index 0;
//! `n` (negative side) holds indices -1, -2, ... nearest-to-zero first.
//! Every index outside the window reads as zero. Reading never resizes;
//! writing past the window zero-fills up to the written index.

use crate::error::{SignalError, SignalResult};
use lib_types::{Complex64, Sample, Scalar};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

/// A discrete-time signal indexed by signed integers.
#[derive(Clone, Debug)]
pub struct Signal<T> {
    /// Samples at indices 0, 1, 2, ... (never empty).
    non_negative: VecDeque<T>,

    /// Samples at indices -1, -2, -3, ...
    negative: VecDeque<T>,
}

/// Input element for [`Signal::from_entries`].
///
/// `Origin` marks the sample that sits at index 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Entry<T> {
    Sample(T),
    Origin(T),
}

impl<T: Sample> Signal<T> {
    /// Create a signal holding a single zero sample at index 0.
    pub fn new() -> Self {
        Self {
            non_negative: VecDeque::from(vec![T::zero()]),
            negative: VecDeque::new(),
        }
    }

    /// Create a signal whose first sample sits at index 0.
    pub fn from_samples(samples: Vec<T>) -> Self {
        if samples.is_empty() {
            return Self::new();
        }
        Self {
            non_negative: samples.into(),
            negative: VecDeque::new(),
        }
    }

    /// Create a signal with `samples[zero_index]` at index 0.
    ///
    /// Samples before `zero_index` land on negative indices, so
    /// `samples[zero_index - k]` is read back with `get(-k)`.
    ///
    /// # Arguments
    ///
    /// * `samples` - Sample values in index order
    /// * `zero_index` - Position within `samples` of the sample at index 0
    ///
    /// # Errors
    ///
    /// [`SignalError::InvalidShape`] if `zero_index` is not a position in
    /// `samples`. An empty `samples` with `zero_index == 0` gives the default
    /// signal.
    ///
    /// # Example
    ///
    /// ```
    /// use lib_signal::Signal;
    ///
    /// let x = Signal::with_zero_index(vec![1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
    /// assert_eq!(x.get(-2), 1.0);
    /// assert_eq!(x.get(0), 3.0);
    /// assert_eq!(x.shape(), -2..3);
    /// ```
    pub fn with_zero_index(mut samples: Vec<T>, zero_index: usize) -> SignalResult<Self> {
        if samples.is_empty() {
            if zero_index != 0 {
                return Err(SignalError::InvalidShape { zero_index, len: 0 });
            }
            return Ok(Self::new());
        }
        if zero_index >= samples.len() {
            return Err(SignalError::InvalidShape {
                zero_index,
                len: samples.len(),
            });
        }

        let non_negative: VecDeque<T> = samples.split_off(zero_index).into();
        let negative: VecDeque<T> = samples.into_iter().rev().collect();
        Ok(Self {
            non_negative,
            negative,
        })
    }

    /// Create a signal from entries where at most one is marked as the origin.
    ///
    /// Without a marker the first entry sits at index 0.
    pub fn from_entries<I>(entries: I) -> SignalResult<Self>
    where
        I: IntoIterator<Item = Entry<T>>,
    {
        let mut samples = Vec::new();
        let mut origin: Option<usize> = None;

        for (position, entry) in entries.into_iter().enumerate() {
            match entry {
                Entry::Sample(value) => samples.push(value),
                Entry::Origin(value) => {
                    if let Some(first) = origin {
                        return Err(SignalError::MultipleOrigins {
                            first,
                            second: position,
                        });
                    }
                    origin = Some(position);
                    samples.push(value);
                }
            }
        }

        Self::with_zero_index(samples, origin.unwrap_or(0))
    }

    /// Create a signal from dynamically-typed scalars.
    ///
    /// Every scalar must be of this signal's sample kind.
    pub fn try_from_scalars(scalars: &[Scalar], zero_index: usize) -> SignalResult<Self> {
        let samples = scalars
            .iter()
            .map(|&s| T::from_scalar(s))
            .collect::<Result<Vec<T>, _>>()?;
        Self::with_zero_index(samples, zero_index)
    }

    /// Assemble from raw sides, restoring the non-empty invariant.
    pub(crate) fn from_sides(mut non_negative: VecDeque<T>, negative: VecDeque<T>) -> Self {
        if non_negative.is_empty() {
            non_negative.push_back(T::zero());
        }
        Self {
            non_negative,
            negative,
        }
    }

    pub(crate) fn non_negative(&self) -> &VecDeque<T> {
        &self.non_negative
    }

    pub(crate) fn negative(&self) -> &VecDeque<T> {
        &self.negative
    }

    /// Sample at `index`, or zero outside the materialized window.
    #[inline]
    pub fn get(&self, index: isize) -> T {
        let stored = if index >= 0 {
            self.non_negative.get(index as usize)
        } else {
            // !index == -index - 1
            self.negative.get(!index as usize)
        };
        stored.copied().unwrap_or_else(T::zero)
    }

    /// Store `value` at `index`, zero-filling the gap from the current window.
    pub fn set(&mut self, index: isize, value: T) {
        let (side, slot) = if index >= 0 {
            (&mut self.non_negative, index as usize)
        } else {
            (&mut self.negative, !index as usize)
        };
        if slot >= side.len() {
            side.resize(slot + 1, T::zero());
        }
        side[slot] = value;
    }

    /// Store a dynamically-typed scalar at `index`.
    ///
    /// The kind is checked before the window grows, so a rejected value
    /// leaves the signal untouched.
    pub fn set_scalar(&mut self, index: isize, value: Scalar) -> SignalResult<()> {
        let value = T::from_scalar(value)?;
        self.set(index, value);
        Ok(())
    }

    /// Samples at `start, start + step, ...` up to (excluding) `stop`.
    ///
    /// Bounds default to the materialized window, walked backwards for a
    /// negative step.
    pub fn slice(&self, start: Option<isize>, stop: Option<isize>, step: isize) -> SignalResult<Vec<T>> {
        if step == 0 {
            return Err(SignalError::UnsupportedIndex(
                "slice step cannot be zero".to_string(),
            ));
        }

        let shape = self.shape();
        let (start, stop) = if step > 0 {
            (start.unwrap_or(shape.start), stop.unwrap_or(shape.end))
        } else {
            (start.unwrap_or(shape.end - 1), stop.unwrap_or(shape.start - 1))
        };

        let mut values = Vec::new();
        let mut index = start;
        while (step > 0 && index < stop) || (step < 0 && index > stop) {
            values.push(self.get(index));
            match index.checked_add(step) {
                Some(next) => index = next,
                None => break,
            }
        }
        Ok(values)
    }

    /// All materialized samples in index order.
    pub fn samples(&self) -> Vec<T> {
        self.negative
            .iter()
            .rev()
            .chain(self.non_negative.iter())
            .copied()
            .collect()
    }

    /// Materialized index range `-len(negative) .. len(non_negative)`.
    #[inline]
    pub fn shape(&self) -> Range<isize> {
        -(self.negative.len() as isize)..self.non_negative.len() as isize
    }

    /// Number of materialized samples.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.negative.len() + self.non_negative.len()
    }

    /// Position of index 0 within [`Signal::samples`].
    #[inline]
    pub fn zero_index(&self) -> usize {
        self.negative.len()
    }

    /// Time-shifted copy: `result[i] = self[i + amount]`.
    ///
    /// A negative amount pulls samples from the negative side onto the front
    /// of the non-negative side; a positive amount pushes them the other way.
    /// Zeros are moved once the donor side runs out.
    pub fn shift(&self, amount: isize) -> Self {
        let mut clone = self.clone();
        clone.shift_in_place(amount);
        clone
    }

    pub(crate) fn shift_in_place(&mut self, amount: isize) {
        if amount < 0 {
            for _ in 0..amount.unsigned_abs() {
                let value = self.negative.pop_front().unwrap_or_else(T::zero);
                self.non_negative.push_front(value);
            }
        } else {
            for _ in 0..amount as usize {
                let value = self.non_negative.pop_front().unwrap_or_else(T::zero);
                self.negative.push_front(value);
            }
        }

        if self.non_negative.is_empty() {
            self.non_negative.push_back(T::zero());
        }
    }

    /// Copy with `amount` explicit zeros appended to the negative side.
    ///
    /// Only the materialized window grows; no sample value changes.
    pub fn pad(&self, amount: usize) -> Self {
        let mut clone = self.clone();
        clone
            .negative
            .extend(std::iter::repeat(T::zero()).take(amount));
        clone
    }

    /// Time-reversed copy: `result[i] = self[-i]`.
    pub fn reverse(&self) -> Self {
        let mut non_negative = VecDeque::with_capacity(self.negative.len() + 1);
        non_negative.push_back(self.get(0));
        non_negative.extend(self.negative.iter().copied());

        let negative = self.non_negative.iter().skip(1).copied().collect();

        Self {
            non_negative,
            negative,
        }
    }
}

impl<T: Sample> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> From<Vec<T>> for Signal<T> {
    fn from(samples: Vec<T>) -> Self {
        Self::from_samples(samples)
    }
}

impl<T: Sample> FromIterator<T> for Signal<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_samples(iter.into_iter().collect())
    }
}

impl From<&Signal<f64>> for Signal<Complex64> {
    fn from(signal: &Signal<f64>) -> Self {
        Self {
            non_negative: signal.non_negative.iter().map(|&v| Complex64::from_real(v)).collect(),
            negative: signal.negative.iter().map(|&v| Complex64::from_real(v)).collect(),
        }
    }
}

/// Equality over a bounded probe window.
///
/// Indices `0 .. max_non_negative + 2` and `-1 ..= -(max_negative + 2)` are
/// compared, where the maxima are taken over both operands' materialized
/// widths. Samples beyond that window are not inspected, so this is not a
/// proof of equality over the whole (infinite) domain. Since samples outside
/// the materialized windows always read as zero, explicit zero padding never
/// affects the result.
impl<T: Sample> PartialEq for Signal<T> {
    fn eq(&self, other: &Self) -> bool {
        let max_negative = self.negative.len().max(other.negative.len()) as isize;
        let max_non_negative = self.non_negative.len().max(other.non_negative.len()) as isize;

        (0..max_non_negative + 2).all(|i| self.get(i) == other.get(i))
            && (1..=max_negative + 2).all(|i| self.get(-i) == other.get(-i))
    }
}

/// Serializes as `{zero_index, shape: [start, end], samples}`, with samples in
/// index order as [`Scalar`] values.
impl<T: Sample> Serialize for Signal<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shape = self.shape();
        let samples: Vec<Scalar> = self.samples().into_iter().map(T::to_scalar).collect();

        let mut state = serializer.serialize_struct("Signal", 3)?;
        state.serialize_field("zero_index", &self.zero_index())?;
        state.serialize_field("shape", &[shape.start, shape.end])?;
        state.serialize_field("samples", &samples)?;
        state.end()
    }
}

impl<T: Sample> fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signal(")?;
        for value in self.negative.iter().rev() {
            write!(f, "{} ", value.to_scalar())?;
        }
        write!(f, "[{}]", self.get(0).to_scalar())?;
        for value in self.non_negative.iter().skip(1) {
            write!(f, " {}", value.to_scalar())?;
        }
        write!(f, ")")
    }
}
