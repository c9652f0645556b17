//! Token filters that reduce tagged words to output tokens.
//!
//! Filters receive the tagged words of a [`Document`](crate::analysis::token::Document)
//! in text order and produce the ordered list of strings stored on the
//! analysis record.
//!
//! # Available Filters
//!
//! - [`hashtag::HashtagFilter`] - Grammatical-class filter with hashtag reattachment
//!
//! # Examples
//!
//! ```
//! use sentigeo::analysis::token::TaggedWord;
//! use sentigeo::analysis::token_filter::WordFilter;
//! use sentigeo::analysis::token_filter::hashtag::HashtagFilter;
//!
//! let filter = HashtagFilter::new();
//! let words = vec![
//!     TaggedWord::new("I", "PRP"),
//!     TaggedWord::new("love", "VBP"),
//!     TaggedWord::new("#", "#"),
//!     TaggedWord::new("cats", "NNS"),
//! ];
//!
//! let output = filter.filter(Box::new(words.iter()));
//! assert_eq!(output, vec!["love", "#cats"]);
//! ```

use crate::analysis::token::TaggedWord;

pub mod hashtag;

pub use hashtag::{FilterState, HashtagFilter};

/// Boxed iterator of tagged words borrowed from a document.
pub type TaggedStream<'a> = Box<dyn Iterator<Item = &'a TaggedWord> + 'a>;

/// Trait for filters that turn tagged words into output tokens.
///
/// The trait requires `Send + Sync` so a filter can be shared by pipeline
/// workers.
pub trait WordFilter: Send + Sync {
    /// Apply this filter to a stream of tagged words.
    fn filter<'a>(&self, words: TaggedStream<'a>) -> Vec<String>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}
