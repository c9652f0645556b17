//! Command line argument parsing for Sentigeo CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::fixture::{DEFAULT_SAMPLES, DEFAULT_SEED};

/// Sentigeo - sentiment and hashtag analysis of geotagged posts
#[derive(Parser, Debug, Clone)]
#[command(name = "sentigeo")]
#[command(about = "Sentiment and hashtag analysis of geotagged social-media posts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentigeoArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", env = "SENTIGEO_FORMAT")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SENTIGEO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentigeoArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyse posts from a JSONL file and write records as JSONL
    Process(ProcessArgs),

    /// Print the detected language of a text
    Detect(DetectArgs),

    /// Write synthetic posts (or their records) as JSONL
    Generate(GenerateArgs),

    /// Analyse posts and append the records to a JSONL store
    Store(StoreArgs),
}

/// Arguments for processing posts
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Input JSONL file, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Process on a pool of worker threads
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads (overrides the configuration)
    #[arg(short, long, env = "SENTIGEO_WORKERS")]
    pub workers: Option<usize>,

    /// Stop at the first post that fails
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for language detection
#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Explicit language code; detection is skipped when given
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for fixture generation
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of posts to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Random seed
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Run the posts through the pipeline and write records instead
    #[arg(long)]
    pub process: bool,
}

/// Arguments for storing records
#[derive(Parser, Debug, Clone)]
pub struct StoreArgs {
    /// Input JSONL file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Path of the JSONL store
    #[arg(value_name = "STORE_PATH", env = "SENTIGEO_STORE")]
    pub store_path: PathBuf,

    /// Records per insert batch
    #[arg(short, long, default_value = "500")]
    pub batch_size: usize,

    /// Connection attempts before giving up (0 retries forever)
    #[arg(long, default_value = "5")]
    pub connect_attempts: usize,

    /// Seconds between connection attempts
    #[arg(long, default_value = "2")]
    pub retry_interval: u64,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl ProcessArgs {
    /// Whether the input is read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_command() {
        let args = SentigeoArgs::try_parse_from([
            "sentigeo",
            "process",
            "posts.jsonl",
            "--output",
            "records.jsonl",
            "--parallel",
            "--workers",
            "4",
        ])
        .unwrap();

        if let Command::Process(process_args) = args.command {
            assert_eq!(process_args.input, "posts.jsonl");
            assert_eq!(process_args.output, Some(PathBuf::from("records.jsonl")));
            assert!(process_args.parallel);
            assert_eq!(process_args.workers, Some(4));
            assert!(!process_args.fail_fast);
            assert!(!process_args.reads_stdin());
        } else {
            panic!("Expected Process command");
        }
    }

    #[test]
    fn test_process_defaults_to_stdin() {
        let args = SentigeoArgs::try_parse_from(["sentigeo", "process"]).unwrap();

        if let Command::Process(process_args) = args.command {
            assert!(process_args.reads_stdin());
        } else {
            panic!("Expected Process command");
        }
    }

    #[test]
    fn test_generate_command() {
        let args = SentigeoArgs::try_parse_from([
            "sentigeo", "generate", "--samples", "10", "--seed", "3", "--process",
        ])
        .unwrap();

        if let Command::Generate(generate_args) = args.command {
            assert_eq!(generate_args.samples, 10);
            assert_eq!(generate_args.seed, 3);
            assert!(generate_args.process);
        } else {
            panic!("Expected Generate command");
        }

        let args = SentigeoArgs::try_parse_from(["sentigeo", "generate"]).unwrap();
        if let Command::Generate(generate_args) = args.command {
            assert_eq!(generate_args.samples, 750);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_store_command() {
        let args = SentigeoArgs::try_parse_from([
            "sentigeo",
            "store",
            "posts.jsonl",
            "/tmp/records.jsonl",
            "--batch-size",
            "50",
        ])
        .unwrap();

        if let Command::Store(store_args) = args.command {
            assert_eq!(store_args.store_path, PathBuf::from("/tmp/records.jsonl"));
            assert_eq!(store_args.batch_size, 50);
            assert_eq!(store_args.connect_attempts, 5);
        } else {
            panic!("Expected Store command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SentigeoArgs::try_parse_from(["sentigeo", "detect", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SentigeoArgs::try_parse_from(["sentigeo", "-vv", "detect", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = SentigeoArgs::try_parse_from(["sentigeo", "-q", "detect", "hi"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_global_flags() {
        let args = SentigeoArgs::try_parse_from([
            "sentigeo", "--format", "json", "--pretty", "--config", "pipeline.json", "detect", "hi",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert_eq!(args.config, Some(PathBuf::from("pipeline.json")));
    }
}
