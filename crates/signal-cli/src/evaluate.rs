//! Workspace evaluation.

use crate::config::{Operation, OperationConfig, SignalConfig, WorkspaceConfig};
use anyhow::{Context, Result};
use lib_signal::{Phasor, Signal};
use lib_types::{Sample, Scalar};
use std::collections::HashMap;

/// Evaluates workspace operations over signals of one sample kind.
pub struct Evaluator<T: Sample> {
    signals: HashMap<String, Signal<T>>,

    /// Names in definition order.
    order: Vec<String>,
}

impl<T: Sample> Evaluator<T> {
    /// Create an empty evaluator.
    pub fn new() -> Self {
        Self {
            signals: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build an input signal.
    pub fn define(&mut self, name: &str, config: &SignalConfig) -> Result<()> {
        let signal = Signal::try_from_scalars(&config.samples, config.zero_index)
            .with_context(|| format!("Invalid signal '{}'", name))?;

        tracing::debug!("Defined '{}': {} samples, shape {:?}", name, signal.len(), signal.shape());
        self.insert(name, signal);
        Ok(())
    }

    /// Evaluate one operation and store its result.
    pub fn apply(&mut self, operation: &OperationConfig) -> Result<()> {
        let result = match &operation.op {
            Operation::Add { lhs, rhs } => self.lookup(lhs)? + self.lookup(rhs)?,
            Operation::Sub { lhs, rhs } => self.lookup(lhs)? - self.lookup(rhs)?,
            Operation::Convolve { lhs, rhs } => self.lookup(lhs)?.convolve(self.lookup(rhs)?),
            Operation::Correlate { lhs, rhs } => self.lookup(lhs)?.correlate(self.lookup(rhs)?),
            Operation::Reverse { input } => self.lookup(input)?.reverse(),
            Operation::Conjugate { input } => self.lookup(input)?.conjugate(),
            Operation::Negate { input } => -self.lookup(input)?,
            Operation::Shift { input, amount } => self.lookup(input)?.shift(*amount),
            Operation::Pad { input, amount } => self.lookup(input)?.pad(*amount),
            Operation::Scale { input, factor } => {
                let k = T::from_scalar(*factor)
                    .with_context(|| format!("Scale factor of '{}'", operation.name))?;
                self.lookup(input)? * k
            }
            Operation::Round { input, digits } => self.lookup(input)?.round(*digits),
            Operation::Phasor { input, omega, digits } => {
                let mut phasor = Phasor::from_omega(*omega);
                if let Some(digits) = digits {
                    phasor = phasor.with_digits(*digits);
                }
                self.lookup(input)?
                    .try_scale_by(|n| T::from_scalar(Scalar::Complex(phasor.eval(n))))
                    .with_context(|| format!("Phasor rotation of '{}'", input))?
            }
        };

        tracing::debug!(
            "Evaluated '{}': {} samples, shape {:?}",
            operation.name,
            result.len(),
            result.shape()
        );
        self.insert(&operation.name, result);
        Ok(())
    }

    /// Signals in definition order.
    pub fn into_results(mut self) -> Vec<(String, Signal<T>)> {
        self.order
            .into_iter()
            .filter_map(|name| self.signals.remove(&name).map(|signal| (name, signal)))
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<&Signal<T>> {
        self.signals
            .get(name)
            .with_context(|| format!("Undefined signal '{}'", name))
    }

    fn insert(&mut self, name: &str, signal: Signal<T>) {
        if self.signals.insert(name.to_string(), signal).is_none() {
            self.order.push(name.to_string());
        }
    }
}

impl<T: Sample> Default for Evaluator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate every signal and operation of a workspace.
pub fn evaluate<T: Sample>(config: &WorkspaceConfig) -> Result<Vec<(String, Signal<T>)>> {
    tracing::info!(
        "Evaluating workspace '{}': {} signals, {} operations",
        config.name,
        config.signals.len(),
        config.operations.len()
    );

    let mut evaluator = Evaluator::new();
    for (name, signal) in &config.signals {
        evaluator.define(name, signal)?;
    }
    for operation in &config.operations {
        evaluator
            .apply(operation)
            .with_context(|| format!("Operation '{}' failed", operation.name))?;
    }

    let mut results = evaluator.into_results();
    if let Some(digits) = config.output.digits {
        for (_, signal) in results.iter_mut() {
            *signal = signal.round(digits);
        }
    }

    Ok(results)
}
