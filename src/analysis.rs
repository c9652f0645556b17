//! Text analysis module for Sentigeo.
//!
//! This module holds everything that looks at the post text: language
//! detection, the language backends that split, tag and score sentences, the
//! sentiment aggregator and the token filter.
//!
//! ```text
//! text ─→ LanguageDetector ─→ BackendRegistry ─→ Document ─┬─→ SentimentAggregator ─→ polarity
//!                                                          └─→ HashtagFilter ───────→ words
//! ```

pub mod backend;
pub mod detector;
pub mod sentiment;
pub mod token;
pub mod token_filter;
