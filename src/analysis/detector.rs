//! Language detection.
//!
//! A [`LanguageDetector`] resolves the language code that selects a backend.
//! An explicit, non-empty override always wins and the classifier is never
//! consulted for it.
//!
//! # Available Detectors
//!
//! - [`profile::ProfileDetector`] - Statistical function-word classifier
//! - [`FixedDetector`] - Always answers the same code
//!
//! # Examples
//!
//! ```
//! use sentigeo::analysis::detector::LanguageDetector;
//! use sentigeo::analysis::detector::profile::ProfileDetector;
//!
//! let detector = ProfileDetector::new();
//! assert_eq!(detector.detect("Das ist nicht schön", None).unwrap(), "de");
//! assert_eq!(detector.detect("anything at all", Some("en")).unwrap(), "en");
//! ```

use crate::error::Result;

pub mod profile;

pub use profile::ProfileDetector;

/// Trait for language detectors.
///
/// Implementors provide [`classify`](Self::classify); [`detect`](Self::detect)
/// handles the override and should not be overridden.
pub trait LanguageDetector: Send + Sync {
    /// Classify the text and return the best-guess language code.
    fn classify(&self, text: &str) -> Result<String>;

    /// Resolve the language of `text`, honouring an explicit override.
    fn detect(&self, text: &str, language_override: Option<&str>) -> Result<String> {
        match language_override {
            Some(code) if !code.is_empty() => Ok(code.to_string()),
            _ => self.classify(text),
        }
    }

    /// Get the name of this detector (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A detector that always returns the same language code.
#[derive(Clone, Debug)]
pub struct FixedDetector {
    code: String,
}

impl FixedDetector {
    pub fn new<S: Into<String>>(code: S) -> Self {
        FixedDetector { code: code.into() }
    }
}

impl LanguageDetector for FixedDetector {
    fn classify(&self, _text: &str) -> Result<String> {
        Ok(self.code.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::SentigeoError;

    struct CountingDetector {
        calls: AtomicUsize,
    }

    impl LanguageDetector for CountingDetector {
        fn classify(&self, _text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SentigeoError::detection("stub"))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn test_override_skips_classifier() {
        let detector = CountingDetector {
            calls: AtomicUsize::new(0),
        };

        assert_eq!(detector.detect("whatever", Some("de")).unwrap(), "de");
        assert_eq!(detector.detect("whatever", Some("xx")).unwrap(), "xx");
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_override_classifies() {
        let detector = CountingDetector {
            calls: AtomicUsize::new(0),
        };

        assert!(detector.detect("whatever", Some("")).is_err());
        assert!(detector.detect("whatever", None).is_err());
        assert_eq!(detector.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fixed_detector() {
        let detector = FixedDetector::new("en");
        assert_eq!(detector.detect("Ich bin hier", None).unwrap(), "en");
        assert_eq!(detector.name(), "fixed");
    }
}
