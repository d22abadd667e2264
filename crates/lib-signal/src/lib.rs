//! # lib-signal
//!
//! Bi-directional discrete-time signals for DSP prototyping.
//!
//! A [`Signal`] is indexed by signed integers and is zero outside a finite
//! materialized window, so signals like `x[n]` and operators like
//! `y[n] = x[n - k]` can be written without choosing an array length or an
//! origin offset up front.
//!
//! - **Signal**: indexed access, shifting, padding, time reversal
//! - **Arithmetic**: aligned addition, scaling, index-function multiply
//! - **Convolution**: direct convolution and cross-correlation
//! - **Shift register**: maximal-length bipolar sequences
//! - **Helpers**: phase rotation (`Phasor`) and conjugation (`cconj`)

pub mod error;
pub mod signal;
pub mod ops;
pub mod convolution;
pub mod shift_register;
pub mod helpers;

pub use error::{SignalError, SignalResult};
pub use signal::{Entry, Signal};
pub use ops::Multiplier;
pub use convolution::direct_convolve;
pub use shift_register::ShiftRegister;
pub use helpers::{cconj, Conjugate, Phasor, PI};
