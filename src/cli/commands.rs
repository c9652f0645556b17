//! Command implementations for Sentigeo CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::analysis::detector::{LanguageDetector, ProfileDetector};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SentigeoError};
use crate::fixture::FixtureGenerator;
use crate::ingest::JsonlSource;
use crate::pipeline::{BatchSummary, Pipeline, PipelineConfig, ProcessResult, StreamProcessor};
use crate::record::RawPost;
use crate::store::{JsonlStore, PersistenceStore, RetryPolicy, connect_with_retry};

type InputReader = Box<dyn BufRead + Send>;

/// Execute a CLI command.
pub fn execute_command(args: SentigeoArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Process(process_args) => process_posts(process_args.clone(), &config, &args),
        Command::Detect(detect_args) => detect_language(detect_args.clone(), &args),
        Command::Generate(generate_args) => generate_fixtures(generate_args.clone(), &config, &args),
        Command::Store(store_args) => store_records(store_args.clone(), &config, &args),
    }
}

fn load_config(args: &SentigeoArgs) -> Result<PipelineConfig> {
    match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            PipelineConfig::from_file(path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Analyse posts and write records as JSONL.
fn process_posts(args: ProcessArgs, config: &PipelineConfig, cli_args: &SentigeoArgs) -> Result<()> {
    let pipeline = Arc::new(Pipeline::from_config(config)?);
    let source = open_input(&args.input)?;
    let mut out = open_output(args.output.as_deref())?;
    let start = Instant::now();

    let fail_fast = args.fail_fast;
    let mut sink = |result: ProcessResult| -> Result<()> {
        match result {
            Ok(record) => write_json_line(out.as_mut(), &record),
            Err(failure) if fail_fast => Err(anyhow::Error::new(failure)
                .context("stopping at first failure")
                .into()),
            Err(_) => Ok(()),
        }
    };

    let summary = if args.parallel {
        let workers = args.workers.unwrap_or(config.workers);
        StreamProcessor::from_config(pipeline, config)
            .with_workers(workers)
            .run(source, &mut sink)?
    } else {
        run_sequential(&pipeline, source, &mut sink)?
    };
    out.flush()?;

    let duration = start.elapsed();
    let result = ProcessingResult {
        input: args.input.clone(),
        output: describe_output(args.output.as_deref()),
        posts_per_second: rate(summary.total(), duration),
        summary,
        duration_ms: duration.as_millis() as u64,
    };

    let mut report = report_writer(args.output.as_deref());
    output_result("Posts processed", &result, cli_args, report.as_mut())
}

/// Print the language of a text.
fn detect_language(args: DetectArgs, cli_args: &SentigeoArgs) -> Result<()> {
    let detector = ProfileDetector::new();
    let language = detector.detect(&args.text, args.language.as_deref())?;

    let result = DetectionResult {
        text: args.text,
        language,
        detector: detector.name().to_string(),
    };
    output_result("Language detected", &result, cli_args, &mut io::stdout())
}

/// Write fixture posts, or their records, as JSONL.
fn generate_fixtures(
    args: GenerateArgs,
    config: &PipelineConfig,
    cli_args: &SentigeoArgs,
) -> Result<()> {
    let generator = FixtureGenerator::new()
        .with_samples(args.samples)
        .with_seed(args.seed);
    let mut out = open_output(args.output.as_deref())?;

    let written = if args.process {
        let pipeline = Pipeline::from_config(config)?;
        let records = generator.generate_records(&pipeline)?;
        for record in &records {
            write_json_line(out.as_mut(), record)?;
        }
        records.len()
    } else {
        let posts = generator.generate()?;
        for post in &posts {
            write_json_line(out.as_mut(), post)?;
        }
        posts.len()
    };
    out.flush()?;

    let result = GenerationResult {
        samples: args.samples,
        seed: args.seed,
        written,
        processed: args.process,
        output: describe_output(args.output.as_deref()),
    };

    let mut report = report_writer(args.output.as_deref());
    output_result("Fixtures generated", &result, cli_args, report.as_mut())
}

/// Analyse posts and append the records to a JSONL store.
fn store_records(args: StoreArgs, config: &PipelineConfig, cli_args: &SentigeoArgs) -> Result<()> {
    let interval = Duration::from_secs(args.retry_interval);
    let policy = match args.connect_attempts {
        0 => RetryPolicy {
            interval,
            max_attempts: None,
        },
        attempts => RetryPolicy::bounded(interval, attempts),
    };
    let store = connect_with_retry(|| JsonlStore::open(&args.store_path), policy)?;
    info!("storing records in {}", store.path().display());

    let pipeline = Arc::new(Pipeline::from_config(config)?);
    let source = open_input(&args.input)?;
    let start = Instant::now();

    let batch_size = args.batch_size.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut stored = 0;

    let summary = StreamProcessor::from_config(pipeline, config).run(source, |result| {
        if let Ok(record) = result {
            batch.push(record);
        }
        if batch.len() >= batch_size {
            stored += store.insert_many(&batch)?.len();
            batch.clear();
        }
        Ok(())
    })?;
    if !batch.is_empty() {
        stored += store.insert_many(&batch)?.len();
    }

    let result = StoreResult {
        store: store.path().display().to_string(),
        stored,
        summary,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    output_result("Records stored", &result, cli_args, &mut io::stdout())
}

fn run_sequential<I, F>(pipeline: &Pipeline, source: I, mut sink: F) -> Result<BatchSummary>
where
    I: IntoIterator<Item = Result<RawPost>>,
    F: FnMut(ProcessResult) -> Result<()>,
{
    let mut summary = BatchSummary::default();
    for item in source {
        match item {
            Ok(post) => {
                let result = pipeline.process(&post);
                summary.record(&result);
                sink(result)?;
            }
            Err(error) => {
                warn!("skipping input item: {error}");
                summary.skipped += 1;
            }
        }
    }
    info!("sequential run: {summary}");
    Ok(summary)
}

fn open_input(input: &str) -> Result<JsonlSource<InputReader>> {
    let reader: InputReader = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input)
            .map_err(|e| SentigeoError::invalid_argument(format!("cannot open {input}: {e}")))?;
        Box::new(BufReader::new(file))
    };
    Ok(JsonlSource::new(reader))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

// Summaries go to stderr while records occupy stdout.
fn report_writer(output: Option<&Path>) -> Box<dyn Write> {
    match output {
        Some(_) => Box::new(io::stdout()),
        None => Box::new(io::stderr()),
    }
}

fn describe_output(output: Option<&Path>) -> String {
    output.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

fn rate(count: usize, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        count as f64 / seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;
    use crate::error::FailureKind;
    use crate::pipeline::Failure;
    use crate::record::AnalysisRecord;
    use crate::store::StoredRecord;

    const POSTS: &str = concat!(
        r#"{"author":"alice","text":"I love the new park #city","longitude":13.4,"latitude":52.5,"timestamp":"2020-05-01T10:00:00Z"}"#,
        "\n",
        r#"{"author":"bob","text":"Bonjour","longitude":2.3,"latitude":48.8,"language":"fr"}"#,
        "\n",
        r#"{"author":"carol","text":"Das Wetter ist heute schön","longitude":13.4,"latitude":52.5,"timestamp":"1588327200"}"#,
        "\n",
    );

    fn parse(argv: &[&str]) -> SentigeoArgs {
        SentigeoArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_process_command_writes_records() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("posts.jsonl");
        let output = dir.path().join("records.jsonl");
        std::fs::write(&input, POSTS).unwrap();

        for parallel in [false, true] {
            let mut argv = vec![
                "sentigeo",
                "-q",
                "process",
                input.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ];
            if parallel {
                argv.extend(["--parallel", "--workers", "2"]);
            }
            execute_command(parse(&argv)).unwrap();

            let content = std::fs::read_to_string(&output).unwrap();
            let records: Vec<AnalysisRecord> = content
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect();
            let authors: Vec<&str> = records.iter().map(|r| r.author()).collect();
            assert_eq!(authors, vec!["alice", "carol"]);
            assert_eq!(records[1].language(), "de");
        }
    }

    #[test]
    fn test_process_fail_fast() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("posts.jsonl");
        let output = dir.path().join("records.jsonl");
        std::fs::write(&input, POSTS).unwrap();

        let result = execute_command(parse(&[
            "sentigeo",
            "-q",
            "process",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--fail-fast",
        ]));

        let error = match result {
            Err(SentigeoError::Anyhow(error)) => error,
            other => panic!("expected a wrapped failure, got {other:?}"),
        };
        assert_eq!(error.to_string(), "stopping at first failure");
        let failure = error.root_cause().downcast_ref::<Failure>().unwrap();
        assert_eq!(failure.kind, FailureKind::UnsupportedLanguage);
        assert_eq!(failure.post.author, "bob");
    }

    #[test]
    fn test_store_command() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("posts.jsonl");
        let store_path = dir.path().join("store").join("records.jsonl");
        std::fs::write(&input, POSTS).unwrap();

        execute_command(parse(&[
            "sentigeo",
            "-q",
            "store",
            input.to_str().unwrap(),
            store_path.to_str().unwrap(),
            "--batch-size",
            "1",
        ]))
        .unwrap();

        let content = std::fs::read_to_string(&store_path).unwrap();
        let stored: Vec<StoredRecord> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].record.author(), "alice");
    }

    #[test]
    fn test_generate_command() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("posts.jsonl");

        execute_command(parse(&[
            "sentigeo",
            "-q",
            "generate",
            "--samples",
            "12",
            "--output",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let posts: Vec<RawPost> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(posts.len(), 12);
    }

    #[test]
    fn test_rate() {
        assert_eq!(rate(10, Duration::from_secs(2)), 5.0);
        assert_eq!(rate(10, Duration::ZERO), 0.0);
    }
}
