//! Workspace configuration loading and validation.
//!
//! A workspace file names a set of input signals and an ordered list of
//! operations producing new named signals:
//!
//! ```toml
//! name = "echo"
//! kind = "real"
//!
//! [signals.x]
//! samples = [1, 2, 3, 4, 5]
//! zero_index = 2
//!
//! [[operations]]
//! name = "y"
//! op = "convolve"
//! lhs = "x"
//! rhs = "x"
//! ```

use anyhow::{Context, Result};
use lib_types::{SampleKind, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Top-level workspace configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Workspace name/description.
    pub name: String,

    /// Sample kind shared by every signal in the workspace.
    #[serde(default)]
    pub kind: SampleKind,

    /// Input signals by name.
    pub signals: BTreeMap<String, SignalConfig>,

    /// Operations, evaluated in order.
    #[serde(default)]
    pub operations: Vec<OperationConfig>,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// An input signal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Samples in index order.
    pub samples: Vec<Scalar>,

    /// Position of index 0 within `samples`.
    #[serde(default)]
    pub zero_index: usize,
}

/// A named operation result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Name of the produced signal.
    pub name: String,

    #[serde(flatten)]
    pub op: Operation,
}

/// Signal operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Add { lhs: String, rhs: String },
    Sub { lhs: String, rhs: String },
    Convolve { lhs: String, rhs: String },
    Correlate { lhs: String, rhs: String },
    Reverse { input: String },
    Conjugate { input: String },
    Negate { input: String },
    /// `result[i] = input[i + amount]`.
    Shift { input: String, amount: isize },
    Pad { input: String, amount: usize },
    Scale { input: String, factor: Scalar },
    Round { input: String, digits: i32 },
    /// Rotate sample `n` by `e^(j*omega*n)` (complex workspaces only).
    Phasor {
        input: String,
        omega: f64,
        #[serde(default)]
        digits: Option<i32>,
    },
}

impl Operation {
    /// Names of the signals this operation reads.
    pub fn operands(&self) -> Vec<&str> {
        match self {
            Operation::Add { lhs, rhs }
            | Operation::Sub { lhs, rhs }
            | Operation::Convolve { lhs, rhs }
            | Operation::Correlate { lhs, rhs } => vec![lhs.as_str(), rhs.as_str()],
            Operation::Reverse { input }
            | Operation::Conjugate { input }
            | Operation::Negate { input }
            | Operation::Shift { input, .. }
            | Operation::Pad { input, .. }
            | Operation::Scale { input, .. }
            | Operation::Round { input, .. }
            | Operation::Phasor { input, .. } => vec![input.as_str()],
        }
    }
}

/// Output configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Round samples to this many fractional digits before writing.
    #[serde(default)]
    pub digits: Option<i32>,
}

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<WorkspaceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: WorkspaceConfig = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| "Failed to parse config as JSON")?
    } else {
        // Assume TOML
        toml::from_str(&content)
            .with_context(|| "Failed to parse config as TOML")?
    };

    validate_config(&config)?;

    Ok(config)
}

/// Validate configuration.
pub fn validate_config(config: &WorkspaceConfig) -> Result<()> {
    if config.signals.is_empty() {
        anyhow::bail!("Workspace '{}' defines no signals", config.name);
    }

    for (name, signal) in &config.signals {
        if let Some(scalar) = signal.samples.iter().find(|s| s.kind() != config.kind) {
            anyhow::bail!(
                "Signal '{}' holds {} sample {} in a {} workspace",
                name,
                scalar.kind(),
                scalar,
                config.kind
            );
        }
        let len = signal.samples.len();
        if (len == 0 && signal.zero_index != 0) || (len > 0 && signal.zero_index >= len) {
            anyhow::bail!(
                "Signal '{}' has zero_index {} outside its {} samples",
                name,
                signal.zero_index,
                len
            );
        }
    }

    // Operands must name a signal defined earlier
    let mut defined: HashSet<&str> = config.signals.keys().map(String::as_str).collect();
    for operation in &config.operations {
        for operand in operation.op.operands() {
            if !defined.contains(operand) {
                anyhow::bail!(
                    "Operation '{}' reads undefined signal '{}'",
                    operation.name,
                    operand
                );
            }
        }

        match &operation.op {
            Operation::Phasor { .. } if config.kind != SampleKind::Complex => {
                anyhow::bail!(
                    "Operation '{}': phasor rotation needs a complex workspace",
                    operation.name
                );
            }
            Operation::Scale { factor, .. } if factor.kind() != config.kind => {
                anyhow::bail!(
                    "Operation '{}': {} scale factor in a {} workspace",
                    operation.name,
                    factor.kind(),
                    config.kind
                );
            }
            _ => {}
        }

        if !defined.insert(operation.name.as_str()) {
            anyhow::bail!("Signal '{}' is defined more than once", operation.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::Complex64;

    const ECHO: &str = r#"
        name = "echo"

        [signals.x]
        samples = [1, 2, 3, 4, 5]
        zero_index = 2

        [signals.h]
        samples = [1.0, 0.5]

        [[operations]]
        name = "y"
        op = "convolve"
        lhs = "x"
        rhs = "h"

        [[operations]]
        name = "late"
        op = "shift"
        input = "y"
        amount = -2

        [output]
        digits = 3
    "#;

    #[test]
    fn test_parse_toml() {
        let config: WorkspaceConfig = toml::from_str(ECHO).unwrap();

        assert_eq!(config.name, "echo");
        assert_eq!(config.kind, SampleKind::Real);
        assert_eq!(config.signals["x"].zero_index, 2);
        assert_eq!(config.signals["x"].samples[0], Scalar::Real(1.0));
        assert_eq!(config.operations.len(), 2);
        assert!(matches!(
            config.operations[1].op,
            Operation::Shift { amount: -2, .. }
        ));
        assert_eq!(config.output.digits, Some(3));
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_parse_json_complex() {
        let json = r#"{
            "name": "iq",
            "kind": "complex",
            "signals": {"z": {"samples": [[0.0, 1.0], [1.0, 0.0]]}},
            "operations": [{"name": "r", "op": "phasor", "input": "z", "omega": 3.14159}]
        }"#;
        let config: WorkspaceConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.kind, SampleKind::Complex);
        assert_eq!(
            config.signals["z"].samples[0],
            Scalar::Complex(Complex64::new(0.0, 1.0))
        );
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_rejects_undefined_operand() {
        let mut config: WorkspaceConfig = toml::from_str(ECHO).unwrap();
        config.operations[0].op = Operation::Reverse {
            input: "missing".to_string(),
        };

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("undefined signal 'missing'"));
    }

    #[test]
    fn test_rejects_forward_reference() {
        let mut config: WorkspaceConfig = toml::from_str(ECHO).unwrap();
        config.operations.swap(0, 1);

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let mut config: WorkspaceConfig = toml::from_str(ECHO).unwrap();
        config.operations[1].name = "x".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_mixed_kinds() {
        let mut config: WorkspaceConfig = toml::from_str(ECHO).unwrap();
        config
            .signals
            .get_mut("h")
            .unwrap()
            .samples
            .push(Scalar::Complex(Complex64::new(0.0, 1.0)));

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Signal 'h'"));
    }

    #[test]
    fn test_rejects_bad_zero_index() {
        let mut config: WorkspaceConfig = toml::from_str(ECHO).unwrap();
        config.signals.get_mut("x").unwrap().zero_index = 5;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_phasor_on_real_workspace() {
        let mut config: WorkspaceConfig = toml::from_str(ECHO).unwrap();
        config.operations[1].op = Operation::Phasor {
            input: "y".to_string(),
            omega: 1.0,
            digits: None,
        };

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("complex workspace"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("digisig-config-{}.toml", std::process::id()));
        std::fs::write(&path, ECHO).unwrap();

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.signals.len(), 2);
    }

    #[test]
    fn test_load_config_reports_parse_format() {
        let dir = std::env::temp_dir();
        let json_path = dir.join(format!("digisig-broken-{}.json", std::process::id()));
        let toml_path = dir.join(format!("digisig-broken-{}.toml", std::process::id()));
        std::fs::write(&json_path, "{\"name\": ").unwrap();
        std::fs::write(&toml_path, "name = ").unwrap();

        let json_err = load_config(&json_path).unwrap_err();
        let toml_err = load_config(&toml_path).unwrap_err();
        std::fs::remove_file(&json_path).ok();
        std::fs::remove_file(&toml_path).ok();

        assert_eq!(json_err.to_string(), "Failed to parse config as JSON");
        assert_eq!(toml_err.to_string(), "Failed to parse config as TOML");
    }
}
