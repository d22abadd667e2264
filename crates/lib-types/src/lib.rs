//! # lib-types
//!
//! Core type definitions for bi-directional discrete-time signals.
//!
//! This crate provides the foundational sample types used throughout the workspace:
//! - The [`Sample`] trait implemented by real (`f64`) and complex (`Complex64`) samples
//! - [`SampleKind`] and the dynamically-typed [`Scalar`] for values read from files

pub mod sample;

pub use sample::*;

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
