//! Configuration for the analysis pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::backend::BUILTIN_LANGUAGES;
use crate::analysis::backend::engine::DEFAULT_MAX_TEXT_LEN;
use crate::analysis::token_filter::hashtag::{DEFAULT_ALLOWED_CLASSES, HashtagFilter};
use crate::error::{Result, SentigeoError};

/// Configuration for [`Pipeline`](crate::pipeline::Pipeline) and
/// [`StreamProcessor`](crate::pipeline::stream::StreamProcessor).
///
/// Missing fields in a config file take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Grammatical class initials kept by the token filter.
    pub allowed_classes: String,

    /// Language codes with an enabled backend.
    pub languages: Vec<String>,

    /// Maximum accepted text length, in characters.
    pub max_text_len: usize,

    /// Number of stream worker threads.
    pub workers: usize,

    /// Capacity of the bounded stream channels.
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_classes: DEFAULT_ALLOWED_CLASSES.to_string(),
            languages: BUILTIN_LANGUAGES.iter().map(|c| c.to_string()).collect(),
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            workers: num_cpus::get(),
            queue_capacity: 1024,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SentigeoError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of stream workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the enabled languages.
    pub fn with_languages<S: Into<String>>(mut self, languages: impl IntoIterator<Item = S>) -> Self {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        HashtagFilter::with_allowed(&self.allowed_classes)?;

        if self.languages.is_empty() {
            return Err(SentigeoError::config("at least one language must be enabled"));
        }
        for code in &self.languages {
            if !BUILTIN_LANGUAGES.contains(&code.as_str()) {
                return Err(SentigeoError::config(format!(
                    "no built-in backend for language '{code}'"
                )));
            }
        }
        if self.max_text_len == 0 {
            return Err(SentigeoError::config("max_text_len must be positive"));
        }
        if self.workers == 0 {
            return Err(SentigeoError::config("workers must be positive"));
        }
        if self.queue_capacity == 0 {
            return Err(SentigeoError::config("queue_capacity must be positive"));
        }
        Ok(())
    }
}
