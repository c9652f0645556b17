//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SentigeoArgs};
use crate::error::Result;
use crate::pipeline::BatchSummary;

/// Result structure for the process command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub input: String,
    pub output: String,
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub duration_ms: u64,
    pub posts_per_second: f64,
}

/// Result structure for language detection.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectionResult {
    pub text: String,
    pub language: String,
    pub detector: String,
}

/// Result structure for fixture generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResult {
    pub samples: usize,
    pub seed: u64,
    pub written: usize,
    pub processed: bool,
    pub output: String,
}

/// Result structure for the store command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResult {
    pub store: String,
    pub stored: usize,
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &SentigeoArgs,
    out: &mut dyn Write,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args, out),
        OutputFormat::Json => output_json(result, args, out),
    }
}

/// Write one value as a line of JSON.
pub fn write_json_line<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Output in human-readable format.
fn output_human<T: Serialize>(
    message: &str,
    result: &T,
    args: &SentigeoArgs,
    out: &mut dyn Write,
) -> Result<()> {
    if args.verbosity() > 0 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in &obj {
                writeln!(out, "{key}: {}", format_value(val))?;
            }
        }
        _ => writeln!(out, "{}", format_value(&value))?,
    }
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &SentigeoArgs, out: &mut dyn Write) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let formatted_values = obj
                .iter()
                .map(|(k, v)| format!("{k}={}", format_value(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{formatted_values}}}")
        }
        serde_json::Value::Null => "null".to_string(),
    }
}
