//! Grammatical-class filter with hashtag reattachment.
//!
//! Backends split `#cats` into a bare `#` marker followed by the word `cats`.
//! This filter walks the tagged words with a two-state automaton and glues
//! them back together, while dropping ordinary words whose grammatical class
//! is not allowed.
//!
//! | state          | word              | action                          | next           |
//! |----------------|-------------------|---------------------------------|----------------|
//! | Normal         | starts with `#`   | discard                         | PendingHashtag |
//! | Normal         | other             | emit if class initial allowed   | Normal         |
//! | PendingHashtag | starts with `#`   | discard                         | PendingHashtag |
//! | PendingHashtag | other             | emit `"#" + word` unconditionally | Normal       |
//!
//! Repeated markers collapse, so `##rust` reattaches to `#rust`. Input that ends in `PendingHashtag` emits nothing for the dangling marker.

use ahash::AHashSet;

use crate::analysis::token::TaggedWord;
use crate::analysis::token_filter::{TaggedStream, WordFilter};
use crate::error::{Result, SentigeoError};

/// Default allowed class initials: nouns, adjectives and verbs.
pub const DEFAULT_ALLOWED_CLASSES: &str = "NJV";

/// State of the hashtag automaton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterState {
    /// No marker is pending.
    #[default]
    Normal,
    /// The previous word was a `#` marker; the next word becomes a hashtag.
    PendingHashtag,
}

/// Filters words by grammatical class and reattaches hashtag markers.
#[derive(Clone, Debug)]
pub struct HashtagFilter {
    allowed: AHashSet<char>,
}

impl HashtagFilter {
    /// Create a filter that keeps nouns, adjectives and verbs.
    pub fn new() -> Self {
        Self::from_chars(DEFAULT_ALLOWED_CLASSES.chars())
    }

    /// Create a filter from a string of allowed class initials, e.g. `"NJV"`.
    pub fn with_allowed(classes: &str) -> Result<Self> {
        if classes.is_empty() {
            return Err(SentigeoError::config(
                "allowed grammatical classes must not be empty",
            ));
        }
        if let Some(c) = classes.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(SentigeoError::config(format!(
                "allowed grammatical class '{c}' is not an uppercase ASCII letter"
            )));
        }
        Ok(Self::from_chars(classes.chars()))
    }

    fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        HashtagFilter {
            allowed: chars.into_iter().collect(),
        }
    }

    /// Whether a word with this tag passes the class filter.
    pub fn is_allowed(&self, tag: &str) -> bool {
        tag.chars()
            .next()
            .is_some_and(|initial| self.allowed.contains(&initial))
    }

    /// Allowed class initials, sorted.
    pub fn allowed_classes(&self) -> String {
        let mut classes: Vec<char> = self.allowed.iter().copied().collect();
        classes.sort_unstable();
        classes.into_iter().collect()
    }

    /// Apply one transition of the automaton.
    pub fn step(&self, state: FilterState, word: &TaggedWord) -> (Option<String>, FilterState) {
        match state {
            _ if word.is_hashtag_marker() => (None, FilterState::PendingHashtag),
            FilterState::Normal => {
                let emitted = self.is_allowed(&word.tag).then(|| word.text.clone());
                (emitted, FilterState::Normal)
            }
            FilterState::PendingHashtag => (Some(hashtag(&word.text)), FilterState::Normal),
        }
    }
}

impl Default for HashtagFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordFilter for HashtagFilter {
    fn filter<'a>(&self, words: TaggedStream<'a>) -> Vec<String> {
        let mut state = FilterState::Normal;
        let mut output = Vec::new();

        for word in words {
            let (emitted, next) = self.step(state, word);
            output.extend(emitted);
            state = next;
        }

        if state == FilterState::PendingHashtag {
            log::trace!("dropping trailing hashtag marker");
        }

        output
    }

    fn name(&self) -> &'static str {
        "hashtag"
    }
}

// A hashtag entry starts with '#' and holds no other '#'.
fn hashtag(word: &str) -> String {
    let mut tag = String::with_capacity(word.len() + 1);
    tag.push('#');
    tag.extend(word.chars().filter(|&c| c != '#'));
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(pairs: &[(&str, &str)]) -> Vec<TaggedWord> {
        pairs.iter().map(|(w, t)| TaggedWord::new(*w, *t)).collect()
    }

    fn run(pairs: &[(&str, &str)]) -> Vec<String> {
        let words = tagged(pairs);
        HashtagFilter::new().filter(Box::new(words.iter()))
    }

    #[test]
    fn test_simple_reattachment() {
        assert_eq!(run(&[("#", "HT"), ("cats", "NNS")]), vec!["#cats"]);
    }

    #[test]
    fn test_reattachment_bypasses_class_filter() {
        assert_eq!(
            run(&[("run", "VB"), ("#", "HT"), ("fast", "RB")]),
            vec!["run", "#fast"]
        );
    }

    #[test]
    fn test_class_filtering() {
        assert_eq!(
            run(&[("the", "DT"), ("cat", "NN"), ("happy", "JJ"), ("run", "VB")]),
            vec!["cat", "happy", "run"]
        );
    }

    #[test]
    fn test_trailing_marker_is_dropped() {
        assert_eq!(run(&[("word", "NN"), ("#", "HT")]), vec!["word"]);
    }

    #[test]
    fn test_repeated_markers_collapse() {
        assert_eq!(run(&[("#", "#"), ("#", "#"), ("x", "NN")]), vec!["#x"]);
        assert_eq!(
            run(&[("#", "#"), ("#", "#"), ("#", "#"), ("rust", "NN"), ("rocks", "VBZ")]),
            vec!["#rust", "rocks"]
        );
        assert!(run(&[("#", "#"), ("#", "#")]).is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            run(&[("cat", "NN"), ("#", "#"), ("cat", "NN"), ("cat", "NN")]),
            vec!["cat", "#cat", "cat"]
        );
    }

    #[test]
    fn test_empty_tag_is_dropped() {
        assert!(run(&[("odd", "")]).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(
            run(&[
                ("dogs", "NNS"),
                ("and", "CC"),
                ("#", "#"),
                ("cats", "NNS"),
                ("are", "VBP"),
                ("great", "JJ"),
            ]),
            vec!["dogs", "#cats", "are", "great"]
        );
    }

    #[test]
    fn test_step_transitions() {
        let filter = HashtagFilter::new();
        let marker = TaggedWord::new("#", "#");
        let adverb = TaggedWord::new("fast", "RB");

        assert_eq!(
            filter.step(FilterState::Normal, &marker),
            (None, FilterState::PendingHashtag)
        );
        assert_eq!(
            filter.step(FilterState::Normal, &adverb),
            (None, FilterState::Normal)
        );
        assert_eq!(
            filter.step(FilterState::PendingHashtag, &adverb),
            (Some("#fast".to_string()), FilterState::Normal)
        );
        assert_eq!(
            filter.step(FilterState::PendingHashtag, &marker),
            (None, FilterState::PendingHashtag)
        );
    }

    #[test]
    fn test_custom_allowed_classes() {
        let filter = HashtagFilter::with_allowed("NR").unwrap();
        let words = tagged(&[("fast", "RB"), ("run", "VB"), ("cat", "NN")]);
        assert_eq!(filter.filter(Box::new(words.iter())), vec!["fast", "cat"]);
        assert_eq!(filter.allowed_classes(), "NR");
    }

    #[test]
    fn test_invalid_allowed_classes() {
        assert!(HashtagFilter::with_allowed("").is_err());
        assert!(HashtagFilter::with_allowed("n").is_err());
    }
}
