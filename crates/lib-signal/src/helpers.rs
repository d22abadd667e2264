//! Small collaborators for signal arithmetic.
//!
//! [`Phasor`] supplies per-sample phase rotation, so that
//! `y[n] = e^(j*pi*n) * x[n]` becomes
//!
//! ```
//! use lib_signal::{Phasor, Signal, PI};
//! use lib_types::Complex64;
//!
//! let x = Signal::from_samples(vec![Complex64::new(1.0, 0.0); 4]);
//! let e = Phasor::new(Complex64::new(0.0, PI), Some(6)).unwrap();
//! let y = x.multiply(&e.multiplier());
//! assert_eq!(y.get(1), Complex64::new(-1.0, 0.0));
//! ```

use crate::error::{SignalError, SignalResult};
use crate::ops::Multiplier;
use crate::signal::Signal;
use lib_types::{Complex64, Sample};

pub use std::f64::consts::PI;

/// Complex exponential `n -> e^(j*omega*n)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phasor {
    /// Angular frequency in radians per sample.
    omega: f64,

    /// Fractional digits each component is rounded to.
    digits: Option<i32>,
}

impl Phasor {
    /// Create from a purely imaginary constant `j*omega`.
    pub fn new(j_omega: Complex64, digits: Option<i32>) -> SignalResult<Self> {
        if j_omega.re != 0.0 {
            return Err(SignalError::NotImaginary(j_omega));
        }
        Ok(Self {
            omega: j_omega.im,
            digits,
        })
    }

    /// Create from the angular frequency directly.
    pub fn from_omega(omega: f64) -> Self {
        Self {
            omega,
            digits: None,
        }
    }

    /// Round every evaluated component to `digits` fractional digits.
    pub fn with_digits(mut self, digits: i32) -> Self {
        self.digits = Some(digits);
        self
    }

    /// Angular frequency in radians per sample.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// `e^(j*omega*n)`, from `cos` and `sin` of the phase.
    pub fn eval(&self, n: isize) -> Complex64 {
        let phase = self.omega * n as f64;
        let z = Complex64::new(phase.cos(), phase.sin());
        match self.digits {
            Some(digits) => z.round_to(digits),
            None => z,
        }
    }

    /// Index-function multiplier rotating sample `n` by `eval(n)`.
    pub fn multiplier(&self) -> Multiplier<Complex64> {
        let phasor = *self;
        Multiplier::index_fn(move |n| phasor.eval(n))
    }

    /// Rotate every sample of `signal`.
    pub fn apply(&self, signal: &Signal<Complex64>) -> Signal<Complex64> {
        signal.scale_by(|n| self.eval(n))
    }
}

/// Values that have a complex conjugate.
pub trait Conjugate {
    fn conjugate(&self) -> Self;
}

impl<T: Sample> Conjugate for Signal<T> {
    fn conjugate(&self) -> Self {
        Signal::conjugate(self)
    }
}

/// Complex-conjugated copy of `value`.
pub fn cconj<C: Conjugate>(value: &C) -> C {
    value.conjugate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_rejects_real_part() {
        let err = Phasor::new(c(3.0, 4.0), None).unwrap_err();
        assert!(matches!(err, SignalError::NotImaginary(_)));
        assert!(Phasor::new(c(0.0, -2.0), None).is_ok());
    }

    #[test]
    fn test_eval_on_unit_circle() {
        let phasor = Phasor::from_omega(PI / 2.0);

        let z = phasor.eval(1);
        assert!(z.re.abs() < 1e-12);
        assert!((z.im - 1.0).abs() < 1e-12);

        let w = phasor.eval(-1);
        assert!((w.im + 1.0).abs() < 1e-12);
        assert!((phasor.eval(7).norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rounded_eval_is_exact() {
        let phasor = Phasor::new(c(0.0, PI), Some(6)).unwrap();

        assert_eq!(phasor.eval(0), c(1.0, 0.0));
        assert_eq!(phasor.eval(1), c(-1.0, 0.0));
        assert_eq!(phasor.eval(-3), c(-1.0, 0.0));
        assert_eq!(phasor.eval(2), c(1.0, 0.0));
    }

    #[test]
    fn test_alternating_modulation() {
        let ones = Signal::with_zero_index(vec![c(1.0, 0.0); 5], 2).unwrap();
        let phasor = Phasor::from_omega(PI).with_digits(9);

        let modulated = ones.multiply(&phasor.multiplier());
        assert_eq!(modulated, phasor.apply(&ones));
        for n in modulated.shape() {
            let expected = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert_eq!(modulated.get(n), c(expected, 0.0));
        }
    }

    #[test]
    fn test_cconj() {
        let signal = Signal::from_samples(vec![c(0.0, 1.0), c(1.0, 0.0), c(2.0, 2.0), c(0.0, -1.0)]);
        let expected = Signal::from_samples(vec![c(0.0, -1.0), c(1.0, 0.0), c(2.0, -2.0), c(0.0, 1.0)]);

        assert_eq!(cconj(&signal), expected);
        assert_eq!(cconj(&cconj(&signal)), signal);
    }
}
