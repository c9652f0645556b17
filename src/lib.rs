//! # Sentigeo
//!
//! Sentiment and hashtag analysis of geotagged social-media posts.
//!
//! ## Features
//!
//! - Statistical language detection with per-post override
//! - Pluggable per-language backends (English and German built in)
//! - Sentence-level sentiment aggregation
//! - Grammatical-class word filter with hashtag reattachment
//! - Sequential, rayon-parallel and channel-streamed processing
//! - In-memory and JSON Lines record stores with geo + time queries
//! - Seeded synthetic fixtures

pub mod analysis;
pub mod cli;
pub mod error;
pub mod fixture;
pub mod geo;
pub mod ingest;
pub mod pipeline;
pub mod record;
pub mod store;

pub mod prelude {
    pub use crate::analysis::backend::{BackendRegistry, LanguageBackend};
    pub use crate::analysis::detector::{LanguageDetector, ProfileDetector};
    pub use crate::analysis::token::{Document, Sentence, TaggedWord};
    pub use crate::analysis::token_filter::{HashtagFilter, WordFilter};
    pub use crate::error::{FailureKind, Result, SentigeoError};
    pub use crate::geo::GeoPoint;
    pub use crate::pipeline::{Failure, Pipeline, PipelineConfig, ProcessResult};
    pub use crate::record::{AnalysisRecord, RawPost};
    pub use crate::store::{GeoQuery, PersistenceStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
