//! Word-level sentiment lexicon and sentence scoring.
//!
//! A [`SentimentLexicon`] maps lowercased words to a polarity score and a
//! grammatical class. Sentence polarity is the mean score of the lexicon hits,
//! adjusted for nearby negations and intensifiers and clamped to `[-1, 1]`.
//! A sentence without a single hit scores exactly `0.0`.

use ahash::{AHashMap, AHashSet};

/// Grammatical class of a lexicon entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// Penn tag for the uninflected form.
    pub fn base_tag(&self) -> &'static str {
        match self {
            WordClass::Noun => "NN",
            WordClass::Verb => "VB",
            WordClass::Adjective => "JJ",
            WordClass::Adverb => "RB",
        }
    }

    /// Penn tag for a form reached by stripping `suffix` from the word.
    pub fn inflected_tag(&self, suffix: &str) -> &'static str {
        match (self, suffix) {
            (WordClass::Noun, _) => "NNS",
            (WordClass::Verb, "s" | "es" | "t" | "et") => "VBZ",
            (WordClass::Verb, "ed" | "d" | "te" | "ten") => "VBD",
            (WordClass::Verb, "ing") => "VBG",
            (WordClass::Verb, _) => "VBP",
            (WordClass::Adjective, "er" | "r") => "JJR",
            (WordClass::Adjective, "est" | "st" | "sten") => "JJS",
            (WordClass::Adjective, _) => "JJ",
            (WordClass::Adverb, _) => "RB",
        }
    }
}

/// A scored lexicon entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LexiconEntry {
    pub score: f64,
    pub class: WordClass,
}

/// How far back a negation still flips a sentiment word.
const NEGATION_WINDOW: usize = 2;

/// Score multiplier applied to a negated sentiment word.
const NEGATION_FACTOR: f64 = -0.5;

/// Sentiment lexicon for one language.
#[derive(Clone, Debug)]
pub struct SentimentLexicon {
    entries: AHashMap<&'static str, LexiconEntry>,
    negations: AHashSet<&'static str>,
    intensifiers: AHashMap<&'static str, f64>,
    suffixes: &'static [&'static str],
}

impl SentimentLexicon {
    /// Build a lexicon from static tables.
    ///
    /// `suffixes` are tried in order when a word has no exact entry, so the
    /// longest suffixes should come first.
    pub fn new(
        entries: &[(&'static str, f64, WordClass)],
        negations: &[&'static str],
        intensifiers: &[(&'static str, f64)],
        suffixes: &'static [&'static str],
    ) -> Self {
        SentimentLexicon {
            entries: entries
                .iter()
                .map(|&(word, score, class)| (word, LexiconEntry { score, class }))
                .collect(),
            negations: negations.iter().copied().collect(),
            intensifiers: intensifiers.iter().copied().collect(),
            suffixes,
        }
    }

    /// Exact lookup of a lowercased word.
    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    /// Lookup that falls back to stripping inflection suffixes.
    ///
    /// Returns the entry and the stripped suffix (empty for exact hits).
    pub fn lookup(&self, word: &str) -> Option<(&LexiconEntry, &'static str)> {
        if let Some(entry) = self.entries.get(word) {
            return Some((entry, ""));
        }
        self.suffixes.iter().find_map(|&suffix| {
            let stem = word.strip_suffix(suffix)?;
            if stem.chars().count() < 3 {
                return None;
            }
            self.entries.get(stem).map(|entry| (entry, suffix))
        })
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    /// Score a sentence given its lowercased words in order.
    pub fn score_sentence(&self, words: &[String]) -> f64 {
        let mut total = 0.0;
        let mut hits = 0_usize;

        for (i, word) in words.iter().enumerate() {
            let Some((entry, _)) = self.lookup(word) else {
                continue;
            };
            let mut score = entry.score;

            if let Some(factor) = i.checked_sub(1).and_then(|p| self.intensity(&words[p])) {
                score *= factor;
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if words[window_start..i].iter().any(|w| self.is_negation(w)) {
                score *= NEGATION_FACTOR;
            }

            total += score;
            hits += 1;
        }

        if hits == 0 {
            return 0.0;
        }
        (total / hits as f64).clamp(-1.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> SentimentLexicon {
        SentimentLexicon::new(
            &[
                ("good", 0.7, WordClass::Adjective),
                ("bad", -0.7, WordClass::Adjective),
                ("love", 0.5, WordClass::Verb),
            ],
            &["not", "never"],
            &[("very", 1.3), ("extremely", 2.0)],
            &["ing", "ed", "s"],
        )
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_no_hits_is_exactly_zero() {
        assert_eq!(lexicon().score_sentence(&words("the cat sat")), 0.0);
        assert_eq!(lexicon().score_sentence(&[]), 0.0);
    }

    #[test]
    fn test_mean_of_hits() {
        let score = lexicon().score_sentence(&words("good and bad and good"));
        assert!((score - 0.7 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_negation_flips() {
        let score = lexicon().score_sentence(&words("not really good"));
        assert!((score - (-0.35)).abs() < 1e-12);
        // Out of the window.
        let score = lexicon().score_sentence(&words("not at all so good"));
        assert!((score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_intensifier_and_clamp() {
        let score = lexicon().score_sentence(&words("very good"));
        assert!((score - 0.91).abs() < 1e-12);
        assert_eq!(lexicon().score_sentence(&words("extremely good")), 1.0);
        assert_eq!(lexicon().score_sentence(&words("extremely bad")), -1.0);
    }

    #[test]
    fn test_suffix_lookup() {
        let lex = lexicon();
        let (entry, suffix) = lex.lookup("loves").unwrap();
        assert_eq!(entry.class, WordClass::Verb);
        assert_eq!(suffix, "s");
        assert_eq!(entry.class.inflected_tag(suffix), "VBZ");
        assert!(lex.lookup("lo").is_none());
        assert_eq!(lex.lookup("good").unwrap().1, "");
    }

    #[test]
    fn test_inflected_tags() {
        assert_eq!(WordClass::Verb.inflected_tag("ing"), "VBG");
        assert_eq!(WordClass::Verb.inflected_tag("ed"), "VBD");
        assert_eq!(WordClass::Noun.inflected_tag("s"), "NNS");
        assert_eq!(WordClass::Adjective.inflected_tag("est"), "JJS");
        assert_eq!(WordClass::Adjective.base_tag(), "JJ");
    }
}
