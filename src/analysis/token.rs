//! Tagged token types produced by language backends.
//!
//! A backend turns raw post text into a [`Document`]: an ordered list of
//! [`Sentence`]s, each carrying its own sentiment polarity and an ordered list
//! of [`TaggedWord`]s.
//!
//! # Examples
//!
//! ```
//! use sentigeo::analysis::token::{Document, Sentence, TaggedWord};
//!
//! let doc = Document::new(
//!     "en",
//!     vec![
//!         Sentence::new(0.8, vec![TaggedWord::new("love", "VBP")]),
//!         Sentence::new(0.0, vec![TaggedWord::new("#", "#"), TaggedWord::new("cats", "NNS")]),
//!     ],
//! );
//!
//! let words: Vec<_> = doc.tags().map(|w| w.text.as_str()).collect();
//! assert_eq!(words, vec!["love", "#", "cats"]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A surface form paired with its grammatical class code.
///
/// Tags follow Penn-Treebank conventions (`NN`, `VBZ`, `JJ`, ...). Only the
/// first character of the tag is inspected by the token filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    /// The word as it appears in the text
    pub text: String,

    /// The grammatical class code
    pub tag: String,
}

impl TaggedWord {
    /// Create a new tagged word.
    pub fn new<S: Into<String>, T: Into<String>>(text: S, tag: T) -> Self {
        TaggedWord {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// First character of the tag, if any.
    pub fn class_initial(&self) -> Option<char> {
        self.tag.chars().next()
    }

    /// Whether the surface form opens a hashtag.
    pub fn is_hashtag_marker(&self) -> bool {
        self.text.starts_with('#')
    }
}

impl fmt::Display for TaggedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.text, self.tag)
    }
}

/// A sentence with its precomputed polarity in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentiment polarity; exactly `0.0` means "not detected"
    pub polarity: f64,

    /// Tagged words in text order
    pub words: Vec<TaggedWord>,
}

impl Sentence {
    /// Create a new sentence.
    pub fn new(polarity: f64, words: Vec<TaggedWord>) -> Self {
        Sentence { polarity, words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The tokenized form of one post, produced by exactly one backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Language code of the backend that produced this document
    pub language: String,

    /// Sentences in text order
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(language: S, sentences: Vec<Sentence>) -> Self {
        Document {
            language: language.into(),
            sentences,
        }
    }

    /// Iterate over every tagged word of every sentence, in text order.
    pub fn tags(&self) -> impl Iterator<Item = &TaggedWord> + '_ {
        self.sentences.iter().flat_map(|s| s.words.iter())
    }

    /// Iterate over the sentence polarities, in text order.
    pub fn polarities(&self) -> impl Iterator<Item = f64> + '_ {
        self.sentences.iter().map(|s| s.polarity)
    }

    /// Total number of tagged words.
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}
