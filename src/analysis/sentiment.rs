//! Sentence-level sentiment aggregation.
//!
//! A post's polarity is the arithmetic mean of its sentence polarities,
//! counting only sentences whose polarity is exactly non-zero. A polarity of
//! exactly `0.0` means the backend detected no sentiment at all (typical for
//! hashtag runs or fragments), so it is excluded instead of diluting the
//! average. The comparison is exact; there is no tolerance band.
//!
//! # Examples
//!
//! ```
//! use sentigeo::analysis::sentiment::SentimentAggregator;
//!
//! let aggregator = SentimentAggregator::new();
//! let polarity = aggregator.aggregate_polarities([0.0, 0.5, -0.3]);
//! assert!((polarity - 0.1).abs() < 1e-12);
//!
//! assert_eq!(aggregator.aggregate_polarities([0.0, 0.0]), 0.0);
//! assert_eq!(aggregator.aggregate_polarities(std::iter::empty()), 0.0);
//! ```

use crate::analysis::token::Sentence;

/// Reduces per-sentence polarities to one scalar.
#[derive(Clone, Copy, Debug, Default)]
pub struct SentimentAggregator;

impl SentimentAggregator {
    pub fn new() -> Self {
        SentimentAggregator
    }

    /// Aggregate the polarities of the given sentences.
    pub fn aggregate(&self, sentences: &[Sentence]) -> f64 {
        self.aggregate_polarities(sentences.iter().map(|s| s.polarity))
    }

    /// Aggregate a sequence of raw polarities.
    #[allow(clippy::float_cmp)]
    pub fn aggregate_polarities<I>(&self, polarities: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = polarities
            .into_iter()
            .filter(|&p| p != 0.0)
            .fold((0.0_f64, 0_usize), |(sum, count), p| (sum + p, count + 1));

        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}
