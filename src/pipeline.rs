//! The post analysis pipeline.
//!
//! A [`Pipeline`] turns one [`RawPost`] into one [`AnalysisRecord`]:
//!
//! 1. Detect the language, honouring the post's override
//! 2. Dispatch the text to the backend registered for that language
//! 3. Parse the timestamp (or ask the [`Clock`]) and validate the location
//! 4. Aggregate sentiment and filter words over the same document
//! 5. Build the record
//!
//! Any stage may fail, and the first failing stage decides the reported kind. A failure becomes a [`Failure`] value carrying the
//! offending post; it is logged and returned, and never aborts a batch.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use sentigeo::pipeline::Pipeline;
//! use sentigeo::pipeline::clock::FixedClock;
//! use sentigeo::record::RawPost;
//!
//! let clock = FixedClock(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
//! let pipeline = Pipeline::with_defaults().with_clock(clock);
//!
//! let post = RawPost::new("alice", "I love my cat #cats", 13.4, 52.5);
//! let record = pipeline.process(&post).unwrap();
//! assert_eq!(record.language(), "en");
//! assert!(record.words().contains(&"#cats".to_string()));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::backend::BackendRegistry;
use crate::analysis::detector::{LanguageDetector, ProfileDetector};
use crate::analysis::sentiment::SentimentAggregator;
use crate::analysis::token_filter::{HashtagFilter, WordFilter};
use crate::error::{FailureKind, Result, SentigeoError};
use crate::record::{AnalysisRecord, RawPost, RecordBuilder};

pub mod clock;
pub mod config;
pub mod stream;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PipelineConfig;
pub use stream::StreamProcessor;

/// A post that could not be analysed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    /// What went wrong
    pub kind: FailureKind,

    /// The post as it was received
    pub post: RawPost,

    /// Human-readable cause
    pub message: String,
}

impl Failure {
    /// Create a failure from the error that stopped the post.
    pub fn new(post: RawPost, error: &SentigeoError) -> Self {
        Failure {
            kind: error.kind(),
            post,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failure for post by '{}': {}",
            self.kind, self.post.author, self.message
        )
    }
}

impl std::error::Error for Failure {}

/// Outcome of processing one post.
pub type ProcessResult = std::result::Result<AnalysisRecord, Failure>;

/// Counts of a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Posts that produced a record
    pub succeeded: usize,

    /// Posts that produced a failure
    pub failed: usize,

    /// Input items that never became a post (e.g. malformed lines)
    pub skipped: usize,

    /// Failures per kind
    pub failures_by_kind: BTreeMap<String, usize>,
}

impl BatchSummary {
    /// Summarize a slice of results.
    pub fn from_results(results: &[ProcessResult]) -> Self {
        let mut summary = BatchSummary::default();
        for result in results {
            summary.record(result);
        }
        summary
    }

    /// Count one result.
    pub fn record(&mut self, result: &ProcessResult) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(failure) => {
                self.failed += 1;
                *self
                    .failures_by_kind
                    .entry(failure.kind.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    /// Number of posts that were processed.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} succeeded, {} failed",
            self.total(),
            self.succeeded,
            self.failed
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Analyses posts into records.
///
/// The pipeline holds no mutable state and is shared freely between threads.
#[derive(Clone)]
pub struct Pipeline {
    detector: Arc<dyn LanguageDetector>,
    registry: BackendRegistry,
    filter: Arc<dyn WordFilter>,
    aggregator: SentimentAggregator,
    builder: RecordBuilder,
    clock: Arc<dyn Clock>,
}

impl Pipeline {
    /// Create a pipeline from its collaborators, using the system clock.
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        registry: BackendRegistry,
        filter: Arc<dyn WordFilter>,
    ) -> Self {
        Pipeline {
            detector,
            registry,
            filter,
            aggregator: SentimentAggregator::new(),
            builder: RecordBuilder::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a pipeline with the profile detector, the built-in backends and
    /// the default hashtag filter.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(ProfileDetector::new()),
            BackendRegistry::with_defaults(),
            Arc::new(HashtagFilter::new()),
        )
    }

    /// Create a pipeline from a validated configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;

        let registry = BackendRegistry::for_languages(&config.languages, config.max_text_len)?;
        let filter = HashtagFilter::with_allowed(&config.allowed_classes)?;

        Ok(Self::new(
            Arc::new(ProfileDetector::new()),
            registry,
            Arc::new(filter),
        ))
    }

    /// Replace the clock that stamps posts without a timestamp.
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn detector(&self) -> &dyn LanguageDetector {
        self.detector.as_ref()
    }

    /// Process a single post.
    pub fn process(&self, post: &RawPost) -> ProcessResult {
        match self.analyse(post) {
            Ok(record) => {
                debug!(
                    "analysed post by '{}': language={} polarity={:.3} words={}",
                    record.author(),
                    record.language(),
                    record.polarity(),
                    record.words().len()
                );
                Ok(record)
            }
            Err(error) => {
                let failure = Failure::new(post.clone(), &error);
                warn!("{failure}");
                Err(failure)
            }
        }
    }

    /// Process posts in order on the calling thread.
    pub fn process_batch(&self, posts: &[RawPost]) -> Vec<ProcessResult> {
        let start = Instant::now();
        let results: Vec<ProcessResult> = posts.iter().map(|post| self.process(post)).collect();
        log_batch("batch", &results, start);
        results
    }

    /// Process posts on the rayon thread pool. Output order equals input order.
    pub fn process_batch_parallel(&self, posts: &[RawPost]) -> Vec<ProcessResult> {
        let start = Instant::now();
        let results: Vec<ProcessResult> =
            posts.par_iter().map(|post| self.process(post)).collect();
        log_batch("parallel batch", &results, start);
        results
    }

    fn analyse(&self, post: &RawPost) -> Result<AnalysisRecord> {
        let language = self.detector.detect(&post.text, post.language.as_deref())?;
        let document = self.registry.tokenize(&post.text, &language)?;

        let created_on = match post.created_on()? {
            Some(created_on) => created_on,
            None => self.clock.now(),
        };
        let location = post.location()?;

        let polarity = self.aggregator.aggregate(&document.sentences);
        let words = self.filter.filter(Box::new(document.tags()));

        Ok(self.builder.build(
            post.author.as_str(),
            created_on,
            location,
            words,
            polarity,
            document.language,
        ))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("detector", &self.detector.name())
            .field("registry", &self.registry)
            .field("filter", &self.filter.name())
            .field("clock", &self.clock)
            .finish()
    }
}

fn log_batch(label: &str, results: &[ProcessResult], start: Instant) {
    let summary = BatchSummary::from_results(results);
    info!("{label}: {summary} in {:?}", start.elapsed());
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::analysis::backend::LanguageBackend;
    use crate::analysis::detector::FixedDetector;
    use crate::analysis::token::{Document, Sentence, TaggedWord};

    #[derive(Debug)]
    struct StubBackend;

    impl LanguageBackend for StubBackend {
        fn tokenize(&self, _text: &str) -> Result<Document> {
            Ok(Document::new(
                "en",
                vec![Sentence::new(
                    0.8,
                    vec![
                        TaggedWord::new("I", "PRP"),
                        TaggedWord::new("love", "VBP"),
                        TaggedWord::new("#", "#"),
                        TaggedWord::new("cats", "NNS"),
                    ],
                )],
            ))
        }

        fn language(&self) -> &'static str {
            "en"
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn stub_pipeline() -> Pipeline {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(StubBackend));
        Pipeline::new(
            Arc::new(FixedDetector::new("en")),
            registry,
            Arc::new(HashtagFilter::new()),
        )
        .with_clock(FixedClock(Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()))
    }

    #[test]
    fn test_process_with_stub() {
        let post = RawPost::new("alice", "I love #cats", 13.4, 52.5);
        let record = stub_pipeline().process(&post).unwrap();

        assert_eq!(record.author(), "alice");
        assert_eq!(record.words(), ["love", "#cats"]);
        assert_eq!(record.polarity(), 0.8);
        assert_eq!(record.location().longitude(), 13.4);
        assert_eq!(record.created_on(), Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_process_failure_kinds() {
        let pipeline = stub_pipeline();

        let failure = pipeline
            .process(&RawPost::new("bob", "x", 0.0, 0.0).with_language("fr"))
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::UnsupportedLanguage);
        assert_eq!(failure.post.author, "bob");
        assert!(failure.message.contains("fr"));

        let failure = pipeline
            .process(&RawPost::new("bob", "x", 0.0, 0.0).with_timestamp("soon"))
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::MalformedTimestamp);

        let failure = pipeline
            .process(&RawPost::new("bob", "x", 10.0, 100.0))
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidLocation);
    }

    #[test]
    fn test_language_is_checked_before_metadata() {
        let pipeline = stub_pipeline();
        let post = RawPost::new("bob", "x", 10.0, 100.0)
            .with_timestamp("soon")
            .with_language("fr");

        let failure = pipeline.process(&post).unwrap_err();
        assert_eq!(failure.kind, FailureKind::UnsupportedLanguage);

        let post = RawPost::new("bob", "x", 10.0, 100.0).with_timestamp("soon");
        let failure = pipeline.process(&post).unwrap_err();
        assert_eq!(failure.kind, FailureKind::MalformedTimestamp);
    }

    #[test]
    fn test_batch_summary() {
        let pipeline = stub_pipeline();
        let posts = vec![
            RawPost::new("a", "x", 0.0, 0.0),
            RawPost::new("b", "x", 0.0, 0.0).with_language("fr"),
            RawPost::new("c", "x", 0.0, 0.0),
        ];

        let results = pipeline.process_batch(&posts);
        let summary = BatchSummary::from_results(&results);

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures_by_kind.get("unsupported_language"), Some(&1));
        assert_eq!(summary.to_string(), "3 processed, 2 succeeded, 1 failed");
    }

    #[test]
    fn test_from_config() {
        let config = PipelineConfig::default().with_languages(["de"]);
        let pipeline = Pipeline::from_config(&config).unwrap();

        assert!(pipeline.registry().supports("de"));
        assert!(!pipeline.registry().supports("en"));

        let failure = pipeline
            .process(&RawPost::new("carol", "I love cats", 0.0, 0.0).with_language("en"))
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::UnsupportedLanguage);
    }
}
