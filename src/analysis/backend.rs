//! Language backends and the registry that dispatches to them.
//!
//! A [`LanguageBackend`] is the language-specific part of the pipeline: it
//! splits text into sentences, tags every word with a grammatical class and
//! scores each sentence's polarity. The [`BackendRegistry`] maps language
//! codes to backends. It holds exactly what was registered; an unknown code is
//! an error, never a fallback to some default backend.
//!
//! # Available Backends
//!
//! - [`english::EnglishBackend`] - English lexicon sentiment with a Penn-style tagger
//! - [`german::GermanBackend`] - German lexicon sentiment with a Penn-style tagger
//!
//! # Examples
//!
//! ```
//! use sentigeo::analysis::backend::BackendRegistry;
//!
//! let registry = BackendRegistry::with_defaults();
//! let doc = registry.tokenize("I love #cats", "en").unwrap();
//! assert_eq!(doc.sentences.len(), 1);
//!
//! let err = registry.tokenize("Je t'aime", "fr").unwrap_err();
//! assert_eq!(err.to_string(), "Unsupported language: fr");
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::token::Document;
use crate::error::{Result, SentigeoError};

pub mod engine;
pub mod english;
pub mod german;
pub mod lexicon;
pub mod tagger;

pub use engine::LexiconBackend;
pub use english::EnglishBackend;
pub use german::GermanBackend;

/// Trait for language-specific tokenization, tagging and sentiment.
///
/// Output contract: every sentence polarity lies in `[-1, 1]`, and tags are
/// Penn-Treebank-style codes of which only the first character matters
/// downstream.
pub trait LanguageBackend: Send + Sync {
    /// Turn text into a document of tagged, scored sentences.
    fn tokenize(&self, text: &str) -> Result<Document>;

    /// The language code this backend serves.
    fn language(&self) -> &'static str;

    /// Get the name of this backend (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Language codes with a built-in backend.
pub const BUILTIN_LANGUAGES: &[&str] = &["en", "de"];

/// Lookup table from language code to backend.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: AHashMap<String, Arc<dyn LanguageBackend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in backend.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(EnglishBackend::new()));
        registry.register(Arc::new(GermanBackend::new()));
        registry
    }

    /// Create a registry with the built-in backends for the given codes.
    pub fn for_languages<S: AsRef<str>>(codes: &[S], max_text_len: usize) -> Result<Self> {
        let mut registry = Self::new();
        for code in codes {
            let backend = builtin_backend(code.as_ref(), max_text_len)?;
            registry.register(backend);
        }
        Ok(registry)
    }

    /// Register a backend under its own language code.
    ///
    /// Returns the backend previously registered for that code, if any.
    pub fn register(&mut self, backend: Arc<dyn LanguageBackend>) -> Option<Arc<dyn LanguageBackend>> {
        let code = backend.language().to_string();
        self.register_as(code, backend)
    }

    /// Register a backend under an explicit language code.
    pub fn register_as<S: Into<String>>(
        &mut self,
        code: S,
        backend: Arc<dyn LanguageBackend>,
    ) -> Option<Arc<dyn LanguageBackend>> {
        self.backends.insert(code.into(), backend)
    }

    /// Get the backend for a language code.
    pub fn get(&self, code: &str) -> Result<&Arc<dyn LanguageBackend>> {
        self.backends
            .get(code)
            .ok_or_else(|| SentigeoError::unsupported_language(code))
    }

    /// Whether a backend is registered for the code.
    pub fn supports(&self, code: &str) -> bool {
        self.backends.contains_key(code)
    }

    /// Registered language codes, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.backends.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Tokenize text with the backend registered for `code`.
    pub fn tokenize(&self, text: &str, code: &str) -> Result<Document> {
        self.get(code)?.tokenize(text)
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

fn builtin_backend(code: &str, max_text_len: usize) -> Result<Arc<dyn LanguageBackend>> {
    match code {
        "en" => Ok(Arc::new(EnglishBackend::with_max_text_len(max_text_len))),
        "de" => Ok(Arc::new(GermanBackend::with_max_text_len(max_text_len))),
        other => Err(SentigeoError::config(format!(
            "no built-in backend for language '{other}' (available: {})",
            BUILTIN_LANGUAGES.join(", ")
        ))),
    }
}
