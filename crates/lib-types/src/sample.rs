//! Sample kinds for discrete-time signals.
//!
//! A signal stores samples of a single kind, either real (`f64`) or complex
//! (`Complex64`). The [`Sample`] trait carries the arithmetic a signal needs
//! from its samples; [`Scalar`] is the dynamically-typed value used where
//! samples enter from outside the type system (configuration files, CLI).
//!
//! # Rounding
//!
//! [`Sample::round_to`] rounds half away from zero. For complex samples the
//! real and imaginary parts are rounded independently, and a part that rounds
//! to zero is stored as `+0.0`, so the sample reads back as a pure real or
//! pure imaginary value.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use thiserror::Error;

/// The kind of scalar stored in a signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    #[default]
    Real,
    Complex,
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKind::Real => write!(f, "real"),
            SampleKind::Complex => write!(f, "complex"),
        }
    }
}

/// A scalar of the wrong kind was supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("expected a {expected} sample, got a {found} one")]
pub struct KindError {
    pub expected: SampleKind,
    pub found: SampleKind,
}

/// A dynamically-typed scalar.
///
/// Deserializes from a plain number (real) or a `[re, im]` pair (complex).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Real(f64),
    Complex(Complex64),
}

impl Scalar {
    /// Kind of this scalar.
    pub fn kind(&self) -> SampleKind {
        match self {
            Scalar::Real(_) => SampleKind::Real,
            Scalar::Complex(_) => SampleKind::Complex,
        }
    }

    /// Real and imaginary parts.
    pub fn parts(&self) -> (f64, f64) {
        match *self {
            Scalar::Real(v) => (v, 0.0),
            Scalar::Complex(z) => (z.re, z.im),
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Real(v)
    }
}

impl From<Complex64> for Scalar {
    fn from(z: Complex64) -> Self {
        Scalar::Complex(z)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Real(v) => write!(f, "{}", v),
            Scalar::Complex(z) if z.re == 0.0 => write!(f, "{}j", z.im),
            Scalar::Complex(z) if z.im < 0.0 => write!(f, "({}-{}j)", z.re, -z.im),
            Scalar::Complex(z) => write!(f, "({}+{}j)", z.re, z.im),
        }
    }
}

/// Arithmetic required of a signal sample.
pub trait Sample:
    Copy
    + PartialEq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// Kind reported for this sample type.
    const KIND: SampleKind;

    /// Additive identity; the value of every non-materialized index.
    fn zero() -> Self;

    /// Multiplicative identity.
    fn one() -> Self;

    /// Lift a real number into this sample type.
    fn from_real(v: f64) -> Self;

    /// Complex conjugate (identity for real samples).
    fn conj(self) -> Self;

    /// Round to `digits` fractional digits.
    fn round_to(self, digits: i32) -> Self;

    /// Convert from a dynamically-typed scalar of the same kind.
    fn from_scalar(scalar: Scalar) -> Result<Self, KindError>;

    /// Convert into a dynamically-typed scalar.
    fn to_scalar(self) -> Scalar;
}

/// Largest magnitude below which an `f64` can still carry a fraction.
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round half away from zero, normalizing `-0.0` to `+0.0`.
///
/// Values already integral at the requested scale are returned unchanged, so
/// large magnitudes and large `digits` never overflow to `inf` or `NaN`.
/// Rounding to a scale coarser than any finite value gives zero.
#[inline]
pub fn round_digits(v: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    if factor == 0.0 {
        return 0.0;
    }

    let scaled = v * factor;
    if !factor.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return v;
    }
    scaled.round() / factor + 0.0
}

impl Sample for f64 {
    const KIND: SampleKind = SampleKind::Real;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_real(v: f64) -> Self {
        v
    }

    #[inline]
    fn conj(self) -> Self {
        self
    }

    fn round_to(self, digits: i32) -> Self {
        round_digits(self, digits)
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, KindError> {
        match scalar {
            Scalar::Real(v) => Ok(v),
            other => Err(KindError {
                expected: Self::KIND,
                found: other.kind(),
            }),
        }
    }

    fn to_scalar(self) -> Scalar {
        Scalar::Real(self)
    }
}

impl Sample for Complex64 {
    const KIND: SampleKind = SampleKind::Complex;

    #[inline]
    fn zero() -> Self {
        Complex64::new(0.0, 0.0)
    }

    #[inline]
    fn one() -> Self {
        Complex64::new(1.0, 0.0)
    }

    #[inline]
    fn from_real(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }

    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    fn round_to(self, digits: i32) -> Self {
        Complex64::new(round_digits(self.re, digits), round_digits(self.im, digits))
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, KindError> {
        match scalar {
            Scalar::Complex(z) => Ok(z),
            other => Err(KindError {
                expected: Self::KIND,
                found: other.kind(),
            }),
        }
    }

    fn to_scalar(self) -> Scalar {
        Scalar::Complex(self)
    }
}
