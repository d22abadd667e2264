//! Elementwise arithmetic on signals.
//!
//! Operator overloads follow the usual DSP notation:
//!
//! | expression  | meaning                                  |
//! |-------------|------------------------------------------|
//! | `a + b`     | sum aligned at the zero index            |
//! | `a - b`     | `a + (b * -1)`                           |
//! | `-a`        | `a * -1`                                 |
//! | `a * k`     | scale every sample by `k` (also `k * a`) |
//! | `!a`        | time reversal, `result[i] = a[-i]`       |
//! | `a % b`     | cross-correlation (see `convolution`)    |
//! | `a >> n`    | pad `n` zeros on the negative side       |

use crate::signal::Signal;
use lib_types::{Complex64, Sample};
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Add, Mul, Neg, Not, Rem, Shr, Sub};

/// Right-hand operand of [`Signal::multiply`].
pub enum Multiplier<T> {
    /// Scale every sample by the same value.
    Scalar(T),

    /// Scale the sample at index `n` by `f(n)`.
    IndexFn(Box<dyn Fn(isize) -> T>),
}

impl<T> Multiplier<T> {
    /// Wrap an index function.
    pub fn index_fn<F>(f: F) -> Self
    where
        F: Fn(isize) -> T + 'static,
    {
        Multiplier::IndexFn(Box::new(f))
    }
}

impl<T: fmt::Debug> fmt::Debug for Multiplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplier::Scalar(k) => f.debug_tuple("Scalar").field(k).finish(),
            Multiplier::IndexFn(_) => f.write_str("IndexFn(..)"),
        }
    }
}

impl<T: Sample> Signal<T> {
    /// Apply `f` to every materialized sample.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self::from_sides(
            self.non_negative().iter().map(|&v| f(v)).collect(),
            self.negative().iter().map(|&v| f(v)).collect(),
        )
    }

    /// Scale every sample by `k`.
    pub fn scale(&self, k: T) -> Self {
        self.map(|v| v * k)
    }

    /// Scale the sample at each materialized index `n` by `f(n)`.
    ///
    /// `f` sees the true signed index, once per sample on each side.
    pub fn scale_by<F>(&self, f: F) -> Self
    where
        F: Fn(isize) -> T,
    {
        let non_negative = self
            .non_negative()
            .iter()
            .enumerate()
            .map(|(i, &v)| v * f(i as isize))
            .collect();
        let negative = self
            .negative()
            .iter()
            .enumerate()
            .map(|(i, &v)| v * f(-(i as isize) - 1))
            .collect();
        Self::from_sides(non_negative, negative)
    }

    /// Like [`Signal::scale_by`] with a fallible index function.
    ///
    /// Stops at the first error.
    pub fn try_scale_by<F, E>(&self, f: F) -> Result<Self, E>
    where
        F: Fn(isize) -> Result<T, E>,
    {
        let non_negative = self
            .non_negative()
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i as isize).map(|k| v * k))
            .collect::<Result<VecDeque<T>, E>>()?;
        let negative = self
            .negative()
            .iter()
            .enumerate()
            .map(|(i, &v)| f(-(i as isize) - 1).map(|k| v * k))
            .collect::<Result<VecDeque<T>, E>>()?;
        Ok(Self::from_sides(non_negative, negative))
    }

    /// Multiply by a scalar or an index function.
    pub fn multiply(&self, multiplier: &Multiplier<T>) -> Self {
        match multiplier {
            Multiplier::Scalar(k) => self.scale(*k),
            Multiplier::IndexFn(f) => self.scale_by(|n| f(n)),
        }
    }

    /// Zero-index aligned sum over the union of both windows.
    pub fn add_signal(&self, other: &Self) -> Self {
        Self::from_sides(
            sum_sides(self.non_negative(), other.non_negative()),
            sum_sides(self.negative(), other.negative()),
        )
    }

    /// `self + (other * -1)`.
    pub fn sub_signal(&self, other: &Self) -> Self {
        self.add_signal(&other.negate())
    }

    /// `self * -1`.
    pub fn negate(&self) -> Self {
        self.scale(-T::one())
    }

    /// Elementwise complex conjugate; real samples are unchanged.
    pub fn conjugate(&self) -> Self {
        self.map(T::conj)
    }

    /// Elementwise rounding to `digits` fractional digits.
    pub fn round(&self, digits: i32) -> Self {
        self.map(|v| v.round_to(digits))
    }
}

fn sum_sides<T: Sample>(a: &VecDeque<T>, b: &VecDeque<T>) -> VecDeque<T> {
    let width = a.len().max(b.len());
    (0..width)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or_else(T::zero);
            let y = b.get(i).copied().unwrap_or_else(T::zero);
            x + y
        })
        .collect()
}

impl<T: Sample> Add<&Signal<T>> for &Signal<T> {
    type Output = Signal<T>;
    fn add(self, rhs: &Signal<T>) -> Signal<T> {
        self.add_signal(rhs)
    }
}

impl<T: Sample> Add for Signal<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.add_signal(&rhs)
    }
}

impl<T: Sample> Sub<&Signal<T>> for &Signal<T> {
    type Output = Signal<T>;
    fn sub(self, rhs: &Signal<T>) -> Signal<T> {
        self.sub_signal(rhs)
    }
}

impl<T: Sample> Sub for Signal<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.sub_signal(&rhs)
    }
}

impl<T: Sample> Neg for &Signal<T> {
    type Output = Signal<T>;
    fn neg(self) -> Signal<T> {
        self.negate()
    }
}

impl<T: Sample> Neg for Signal<T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<T: Sample> Mul<T> for &Signal<T> {
    type Output = Signal<T>;
    fn mul(self, rhs: T) -> Signal<T> {
        self.scale(rhs)
    }
}

impl<T: Sample> Mul<T> for Signal<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl Mul<&Signal<f64>> for f64 {
    type Output = Signal<f64>;
    fn mul(self, rhs: &Signal<f64>) -> Signal<f64> {
        rhs.scale(self)
    }
}

impl Mul<Signal<f64>> for f64 {
    type Output = Signal<f64>;
    fn mul(self, rhs: Signal<f64>) -> Signal<f64> {
        rhs.scale(self)
    }
}

impl Mul<&Signal<Complex64>> for Complex64 {
    type Output = Signal<Complex64>;
    fn mul(self, rhs: &Signal<Complex64>) -> Signal<Complex64> {
        rhs.scale(self)
    }
}

impl Mul<Signal<Complex64>> for Complex64 {
    type Output = Signal<Complex64>;
    fn mul(self, rhs: Signal<Complex64>) -> Signal<Complex64> {
        rhs.scale(self)
    }
}

impl<T: Sample> Not for &Signal<T> {
    type Output = Signal<T>;
    fn not(self) -> Signal<T> {
        self.reverse()
    }
}

impl<T: Sample> Not for Signal<T> {
    type Output = Self;
    fn not(self) -> Self {
        self.reverse()
    }
}

impl<T: Sample> Rem<&Signal<T>> for &Signal<T> {
    type Output = Signal<T>;
    fn rem(self, rhs: &Signal<T>) -> Signal<T> {
        self.correlate(rhs)
    }
}

impl<T: Sample> Rem for Signal<T> {
    type Output = Self;
    fn rem(self, rhs: Self) -> Self {
        self.correlate(&rhs)
    }
}

impl<T: Sample> Shr<usize> for &Signal<T> {
    type Output = Signal<T>;
    fn shr(self, amount: usize) -> Signal<T> {
        self.pad(amount)
    }
}

impl<T: Sample> Shr<usize> for Signal<T> {
    type Output = Self;
    fn shr(self, amount: usize) -> Self {
        self.pad(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_add_sub_alignment() {
        let left = Signal::with_zero_index(vec![-2.0, -1.0, 0.0], 2).unwrap();
        let right = Signal::from_samples(vec![0.0, 1.0, 2.0]);

        let sum = &left + &right;
        assert_eq!(sum.samples(), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(sum.zero_index(), 2);

        let difference = &left - &right;
        assert_eq!(difference.samples(), vec![-2.0, -1.0, 0.0, -1.0, -2.0]);
        assert_eq!(difference, left.clone() + (right * -1.0));
    }

    #[test]
    fn test_add_widths() {
        let short = Signal::with_zero_index(vec![1.0, 1.0], 1).unwrap();
        let long = Signal::from_samples(vec![1.0, 1.0, 1.0, 1.0]);

        let sum = short + long;
        assert_eq!(sum.shape(), -1..4);
        assert_eq!(sum.samples(), vec![1.0, 2.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scale_commutes() {
        let signal = Signal::with_zero_index(vec![3.0, -1.5, 2.0, 0.25], 1).unwrap();

        for k in [-2.0, 0.0, 0.5, 7.0] {
            let left = &signal * k;
            let right = k * &signal;
            assert_eq!(left, right);
            for i in signal.shape() {
                assert_eq!(left.get(i), signal.get(i) * k);
            }
        }

        let z = Signal::from_samples(vec![c(1.0, 1.0), c(0.0, -2.0)]);
        assert_eq!(&z * c(0.0, 1.0), c(0.0, 1.0) * &z);
    }

    #[test]
    fn test_negate() {
        let signal = Signal::with_zero_index(vec![1.0, -2.0, 3.0], 1).unwrap();
        assert_eq!(-&signal, signal.scale(-1.0));
        assert_eq!((-signal.clone()).get(-1), -1.0);
    }

    #[test]
    fn test_index_function_multiply() {
        let signal = Signal::with_zero_index(vec![1.0, 1.0, 1.0, 1.0], 1).unwrap();
        let ramp = signal.multiply(&Multiplier::index_fn(|n| n as f64));

        assert_eq!(ramp.samples(), vec![-1.0, 0.0, 1.0, 2.0]);
        assert_eq!(ramp.shape(), signal.shape());
    }

    #[test]
    fn test_index_function_sees_signed_indices() {
        let signal = Signal::with_zero_index(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let doubled_index = signal.scale_by(|n| 2.0 * n as f64);

        assert_eq!(doubled_index.get(-2), -4.0);
        assert_eq!(doubled_index.get(-1), -4.0);
        assert_eq!(doubled_index.get(0), 0.0);
        assert_eq!(doubled_index.get(1), 8.0);
    }

    #[test]
    fn test_value_function_doubles_samples() {
        let signal = Signal::from_samples(vec![1.0, 2.0, 3.0, 4.0]);
        let doubled = signal.map(|x| 2.0 * x);
        assert_eq!(doubled, Signal::from_samples(vec![2.0, 4.0, 6.0, 8.0]));
    }

    #[test]
    fn test_scalar_multiplier() {
        let signal = Signal::from_samples(vec![1.0, 2.0]);
        assert_eq!(signal.multiply(&Multiplier::Scalar(3.0)).samples(), vec![3.0, 6.0]);
    }

    #[test]
    fn test_try_scale_by_stops_on_error() {
        let signal = Signal::with_zero_index(vec![1.0, 2.0, 3.0], 1).unwrap();

        let ok: Result<_, String> = signal.try_scale_by(|_| Ok(2.0));
        assert_eq!(ok.unwrap().samples(), vec![2.0, 4.0, 6.0]);

        let err = signal.try_scale_by(|n| if n < 0 { Err(n) } else { Ok(1.0) });
        assert_eq!(err.unwrap_err(), -1);
    }

    #[test]
    fn test_conjugate() {
        let signal = Signal::from_samples(vec![c(0.0, 1.0), c(1.0, 0.0), c(2.0, 2.0), c(0.0, -1.0)]);
        let expected = Signal::from_samples(vec![c(0.0, -1.0), c(1.0, 0.0), c(2.0, -2.0), c(0.0, 1.0)]);

        assert_eq!(signal.conjugate(), expected);
        assert_eq!(signal.conjugate().conjugate(), signal);

        let real = Signal::from_samples(vec![1.0, -2.0]);
        assert_eq!(real.conjugate(), real);
    }

    #[test]
    fn test_round() {
        let signal = Signal::with_zero_index(vec![c(1.004, 1e-12), c(-1e-9, 2.3456)], 1).unwrap();
        let rounded = signal.round(2);

        assert_eq!(rounded.get(-1), c(1.0, 0.0));
        assert_eq!(rounded.get(0), c(0.0, 2.35));

        let real = Signal::from_samples(vec![0.123456, 9.87654]).round(3);
        assert_eq!(real.samples(), vec![0.123, 9.877]);
    }

    #[test]
    fn test_round_keeps_extreme_values_finite() {
        let signal = Signal::from_samples(vec![1e300, 1.5]);

        assert_eq!(signal.round(10).samples(), vec![1e300, 1.5]);
        assert_eq!(signal.round(400).samples(), vec![1e300, 1.5]);
        assert_eq!(signal.round(-400).samples(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_multiplier_debug() {
        assert_eq!(format!("{:?}", Multiplier::Scalar(2.0)), "Scalar(2.0)");
        assert_eq!(format!("{:?}", Multiplier::<f64>::index_fn(|_| 1.0)), "IndexFn(..)");
    }
}
