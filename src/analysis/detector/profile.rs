//! Statistical language classifier based on function-word profiles.
//!
//! Each profile assigns a relative frequency to the most common function
//! words of a language plus a few characteristic letters. A text is scored
//! per profile as the sum of log-probabilities of its lowercased words (and
//! characteristic letters), with unseen words falling back to a fixed floor.
//! The highest score wins; ties resolve in profile order so the result is
//! deterministic.

use std::sync::LazyLock;

use ahash::AHashMap;
use regex::Regex;

use crate::analysis::detector::LanguageDetector;
use crate::error::{Result, SentigeoError};

/// Log-probability floor for words a profile does not know.
const UNSEEN_PROBABILITY: f64 = 1e-4;

/// Probability assigned to each characteristic letter occurrence.
const CHAR_PROBABILITY: f64 = 0.02;

struct LanguageProfile {
    code: &'static str,
    words: &'static [(&'static str, f64)],
    chars: &'static [char],
}

const ENGLISH_WORDS: &[(&str, f64)] = &[
    ("the", 0.060), ("and", 0.030), ("to", 0.028), ("of", 0.026), ("a", 0.024),
    ("i", 0.022), ("is", 0.018), ("in", 0.017), ("it", 0.016), ("you", 0.016),
    ("that", 0.013), ("my", 0.012), ("this", 0.011), ("for", 0.011), ("was", 0.010),
    ("with", 0.009), ("on", 0.009), ("are", 0.008), ("be", 0.008), ("have", 0.008),
    ("not", 0.007), ("but", 0.007), ("so", 0.006), ("we", 0.006), ("me", 0.006),
    ("they", 0.005), ("what", 0.005), ("at", 0.005), ("just", 0.005), ("all", 0.004),
    ("love", 0.004), ("today", 0.003), ("really", 0.003), ("very", 0.003), ("don't", 0.003),
];

const GERMAN_WORDS: &[(&str, f64)] = &[
    ("der", 0.040), ("die", 0.038), ("und", 0.030), ("das", 0.024), ("ist", 0.020),
    ("ich", 0.020), ("nicht", 0.016), ("es", 0.014), ("ein", 0.013), ("eine", 0.012),
    ("zu", 0.012), ("den", 0.011), ("mit", 0.010), ("sich", 0.009), ("auf", 0.009),
    ("für", 0.008), ("im", 0.008), ("dem", 0.008), ("von", 0.007), ("auch", 0.007),
    ("wir", 0.006), ("aber", 0.006), ("mein", 0.006), ("meine", 0.006), ("sehr", 0.005),
    ("heute", 0.004), ("sind", 0.005), ("war", 0.004), ("so", 0.004), ("noch", 0.004),
    ("hier", 0.003), ("schon", 0.003), ("wie", 0.003), ("bin", 0.003), ("nur", 0.003),
];

const FRENCH_WORDS: &[(&str, f64)] = &[
    ("le", 0.035), ("la", 0.033), ("de", 0.032), ("et", 0.025), ("les", 0.022),
    ("des", 0.018), ("est", 0.016), ("un", 0.015), ("une", 0.014), ("je", 0.014),
    ("du", 0.012), ("pas", 0.011), ("que", 0.011), ("pour", 0.009), ("dans", 0.009),
    ("en", 0.009), ("il", 0.008), ("qui", 0.008), ("sur", 0.007), ("avec", 0.007),
    ("ce", 0.006), ("mon", 0.005), ("ma", 0.005), ("c'est", 0.006), ("très", 0.004),
    ("nous", 0.004), ("vous", 0.004), ("mais", 0.004), ("aujourd'hui", 0.002), ("au", 0.005),
];

const SPANISH_WORDS: &[(&str, f64)] = &[
    ("de", 0.035), ("la", 0.033), ("que", 0.030), ("el", 0.030), ("en", 0.024),
    ("y", 0.024), ("los", 0.016), ("se", 0.014), ("del", 0.012), ("las", 0.011),
    ("un", 0.011), ("por", 0.010), ("con", 0.010), ("no", 0.010), ("una", 0.009),
    ("su", 0.008), ("para", 0.008), ("es", 0.008), ("al", 0.007), ("lo", 0.007),
    ("como", 0.006), ("más", 0.005), ("pero", 0.005), ("muy", 0.004), ("mi", 0.005),
    ("hoy", 0.003), ("esta", 0.004), ("estoy", 0.003), ("yo", 0.004), ("me", 0.004),
];

const DUTCH_WORDS: &[(&str, f64)] = &[
    ("de", 0.040), ("en", 0.025), ("het", 0.024), ("van", 0.022), ("een", 0.020),
    ("ik", 0.018), ("is", 0.015), ("dat", 0.014), ("niet", 0.012), ("op", 0.011),
    ("te", 0.010), ("zijn", 0.009), ("met", 0.009), ("voor", 0.008), ("die", 0.008),
    ("maar", 0.007), ("ook", 0.006), ("er", 0.006), ("wel", 0.005), ("mijn", 0.005),
    ("heel", 0.004), ("vandaag", 0.002), ("nog", 0.004), ("we", 0.004), ("zo", 0.004),
];

const ITALIAN_WORDS: &[(&str, f64)] = &[
    ("di", 0.035), ("e", 0.030), ("il", 0.028), ("la", 0.026), ("che", 0.025),
    ("a", 0.020), ("per", 0.014), ("un", 0.013), ("non", 0.013), ("in", 0.012),
    ("una", 0.011), ("sono", 0.009), ("mi", 0.008), ("con", 0.008), ("è", 0.012),
    ("del", 0.007), ("della", 0.007), ("ho", 0.006), ("ma", 0.006), ("molto", 0.004),
    ("oggi", 0.003), ("questo", 0.004), ("io", 0.004), ("lo", 0.005), ("gli", 0.005),
];

static PROFILES: &[LanguageProfile] = &[
    LanguageProfile { code: "en", words: ENGLISH_WORDS, chars: &[] },
    LanguageProfile { code: "de", words: GERMAN_WORDS, chars: &['ä', 'ö', 'ü', 'ß'] },
    LanguageProfile { code: "fr", words: FRENCH_WORDS, chars: &['é', 'è', 'ê', 'à', 'ç', 'ù'] },
    LanguageProfile { code: "es", words: SPANISH_WORDS, chars: &['ñ', 'á', 'í', 'ó', 'ú', '¿', '¡'] },
    LanguageProfile { code: "nl", words: DUTCH_WORDS, chars: &['ĳ'] },
    LanguageProfile { code: "it", words: ITALIAN_WORDS, chars: &['ò', 'ì'] },
];

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}+(?:['’]\p{L}+)?").expect("word pattern should be valid")
});

// Hashtags, mentions and links say nothing about the language of the post.
static NOISE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://\S+|[#@][\p{L}\p{N}_]+)").expect("noise pattern should be valid")
});

/// Log-probability tables derived from [`PROFILES`].
struct CompiledProfile {
    code: &'static str,
    words: AHashMap<&'static str, f64>,
    chars: &'static [char],
}

/// Statistical classifier over a fixed set of language profiles.
pub struct ProfileDetector {
    profiles: Vec<CompiledProfile>,
}

impl ProfileDetector {
    /// Create a detector over all built-in profiles.
    pub fn new() -> Self {
        let profiles = PROFILES
            .iter()
            .map(|p| CompiledProfile {
                code: p.code,
                words: p.words.iter().map(|(w, f)| (*w, f.ln())).collect(),
                chars: p.chars,
            })
            .collect();

        ProfileDetector { profiles }
    }

    /// Language codes this detector can answer.
    pub fn languages(&self) -> Vec<&'static str> {
        self.profiles.iter().map(|p| p.code).collect()
    }

    /// Score every profile; returns `(code, score, evidence)` in profile order.
    fn scores(&self, text: &str) -> Result<Vec<(&'static str, f64, usize)>> {
        let cleaned = NOISE_PATTERN.replace_all(text, " ");
        let lowered = cleaned.to_lowercase();
        let words: Vec<&str> = WORD_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        if words.is_empty() {
            return Err(SentigeoError::detection("text contains no words"));
        }

        let unseen = UNSEEN_PROBABILITY.ln();
        let char_score = CHAR_PROBABILITY.ln() - unseen;

        let scores = self
            .profiles
            .iter()
            .map(|profile| {
                let mut score = 0.0;
                let mut evidence = 0;
                for word in &words {
                    match profile.words.get(*word) {
                        Some(logp) => {
                            score += logp;
                            evidence += 1;
                        }
                        None => score += unseen,
                    }
                }
                for c in lowered.chars() {
                    if profile.chars.contains(&c) {
                        score += char_score;
                        evidence += 1;
                    }
                }
                (profile.code, score, evidence)
            })
            .collect();

        Ok(scores)
    }
}

impl Default for ProfileDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for ProfileDetector {
    fn classify(&self, text: &str) -> Result<String> {
        let scores = self.scores(text)?;

        let mut best: Option<(&'static str, f64)> = None;
        for (code, score, evidence) in scores {
            if evidence == 0 {
                continue;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((code, score));
            }
        }

        match best {
            Some((code, score)) => {
                log::trace!("classified text as {code} (score {score:.3})");
                Ok(code.to_string())
            }
            None => Err(SentigeoError::detection(
                "no language profile matched the text",
            )),
        }
    }

    fn name(&self) -> &'static str {
        "profile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english() {
        let detector = ProfileDetector::new();
        assert_eq!(
            detector
                .classify("I love my cat and the weather is great today")
                .unwrap(),
            "en"
        );
    }

    #[test]
    fn test_german() {
        let detector = ProfileDetector::new();
        assert_eq!(
            detector
                .classify("Ich liebe meine Katze und das Wetter ist heute schön")
                .unwrap(),
            "de"
        );
    }

    #[test]
    fn test_french_is_detected_even_without_backend() {
        let detector = ProfileDetector::new();
        assert_eq!(
            detector.classify("Je suis très content, c'est le meilleur jour").unwrap(),
            "fr"
        );
    }

    #[test]
    fn test_hashtags_are_ignored() {
        let detector = ProfileDetector::new();
        assert_eq!(
            detector.classify("#und #der #die the cat is on the mat").unwrap(),
            "en"
        );
    }

    #[test]
    fn test_no_words_fails() {
        let detector = ProfileDetector::new();
        let err = detector.classify("1234 !!! :)").unwrap_err();
        assert!(matches!(err, SentigeoError::DetectionFailure(_)));
    }

    #[test]
    fn test_no_evidence_fails() {
        let detector = ProfileDetector::new();
        let err = detector.classify("xyzzy plugh").unwrap_err();
        assert!(matches!(err, SentigeoError::DetectionFailure(_)));
    }

    #[test]
    fn test_deterministic() {
        let detector = ProfileDetector::new();
        let text = "the die de la";
        let first = detector.classify(text).unwrap();
        for _ in 0..10 {
            assert_eq!(detector.classify(text).unwrap(), first);
        }
    }

    #[test]
    fn test_languages() {
        let detector = ProfileDetector::new();
        assert_eq!(detector.languages(), vec!["en", "de", "fr", "es", "nl", "it"]);
    }
}
