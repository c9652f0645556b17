//! Shared engine for the built-in lexicon backends.
//!
//! Processing order for one text:
//!
//! 1. Sentence split (UAX #29 sentence boundaries, symbol-only runs kept)
//! 2. Word split: a bare `#`, then word runs, then single symbols
//! 3. Tagging with a [`PosTagger`]
//! 4. Sentence polarity from a [`SentimentLexicon`]
//!
//! The word pattern emits `#` as a token of its own, so `#cats` arrives at the
//! token filter as `#` followed by `cats`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::backend::LanguageBackend;
use crate::analysis::backend::lexicon::SentimentLexicon;
use crate::analysis::backend::tagger::PosTagger;
use crate::analysis::token::{Document, Sentence, TaggedWord};
use crate::error::{Result, SentigeoError};

/// Default maximum accepted text length, in characters.
pub const DEFAULT_MAX_TEXT_LEN: usize = 10_000;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#|[\p{L}\p{N}_]+(?:['’\-][\p{L}\p{N}_]+)*|[^\s\p{L}\p{N}_#]")
        .expect("word pattern should be valid")
});

/// A backend assembled from a tagger and a sentiment lexicon.
#[derive(Clone)]
pub struct LexiconBackend {
    language: &'static str,
    name: &'static str,
    tagger: Arc<PosTagger>,
    lexicon: Arc<SentimentLexicon>,
    max_text_len: usize,
}

impl LexiconBackend {
    pub fn new(
        language: &'static str,
        name: &'static str,
        tagger: Arc<PosTagger>,
        lexicon: Arc<SentimentLexicon>,
    ) -> Self {
        LexiconBackend {
            language,
            name,
            tagger,
            lexicon,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Set the maximum accepted text length, in characters.
    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    pub fn max_text_len(&self) -> usize {
        self.max_text_len
    }

    pub fn lexicon(&self) -> &SentimentLexicon {
        &self.lexicon
    }

    fn sentence(&self, text: &str) -> Sentence {
        let tokens: Vec<&str> = WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let words = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| TaggedWord::new(*token, self.tagger.tag(token, i, &self.lexicon)))
            .collect();

        Sentence::new(self.lexicon.score_sentence(&lowered), words)
    }
}

impl LanguageBackend for LexiconBackend {
    fn tokenize(&self, text: &str) -> Result<Document> {
        let len = text.chars().count();
        if len > self.max_text_len {
            return Err(SentigeoError::tokenization(format!(
                "text has {len} characters, limit is {}",
                self.max_text_len
            )));
        }

        // Symbol-only and empty texts yield a document with no scored words.
        let sentences: Vec<Sentence> = text
            .split_sentence_bounds()
            .map(|s| self.sentence(s))
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Document::new(self.language, sentences))
    }

    fn language(&self) -> &'static str {
        self.language
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for LexiconBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconBackend")
            .field("language", &self.language)
            .field("name", &self.name)
            .field("lexicon_size", &self.lexicon.len())
            .field("max_text_len", &self.max_text_len)
            .finish()
    }
}
