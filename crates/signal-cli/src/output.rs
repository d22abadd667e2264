//! Result output formatting and writing.

use crate::OutputFormat;
use anyhow::Result;
use lib_signal::Signal;
use lib_types::Sample;
use std::io::Write;

/// Write named signals in the requested format.
pub fn write_results<T: Sample, W: Write>(
    results: &[(String, Signal<T>)],
    format: OutputFormat,
    mut out: W,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (name, signal) in results {
                writeln!(out, "{} = {}", name, signal)?;
            }
        }
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for (name, signal) in results {
                map.insert(name.clone(), serde_json::to_value(signal)?);
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&map)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "signal,index,re,im")?;
            for (name, signal) in results {
                for (index, value) in signal.shape().zip(signal.samples()) {
                    let (re, im) = value.to_scalar().parts();
                    writeln!(out, "{},{},{},{}", name, index, re, im)?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::Complex64;

    fn render<T: Sample>(results: &[(String, Signal<T>)], format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_results(results, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_results() -> Vec<(String, Signal<f64>)> {
        vec![(
            "x".to_string(),
            Signal::with_zero_index(vec![1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap(),
        )]
    }

    #[test]
    fn test_text_output() {
        let text = render(&sample_results(), OutputFormat::Text);
        assert_eq!(text, "x = Signal(1 2 [3] 4 5)\n");
    }

    #[test]
    fn test_json_output() {
        let text = render(&sample_results(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["x"]["zero_index"], 2);
        assert_eq!(value["x"]["shape"], serde_json::json!([-2, 3]));
        assert_eq!(value["x"]["samples"][2], 3.0);
    }

    #[test]
    fn test_csv_output() {
        let results = vec![(
            "z".to_string(),
            Signal::with_zero_index(vec![Complex64::new(0.0, 1.0), Complex64::new(2.0, -1.0)], 1)
                .unwrap(),
        )];

        let text = render(&results, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["signal,index,re,im", "z,-1,0,1", "z,0,2,-1"]);
    }
}
