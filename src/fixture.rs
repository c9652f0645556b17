//! Synthetic posts for tests, demos and benchmarks.
//!
//! Locations are drawn as Gaussian blobs around a set of cluster centers,
//! authors are fake usernames and texts come from a small built-in corpus of
//! English and German sentences. A fixed seed yields the same posts every
//! time.
//!
//! # Examples
//!
//! ```
//! use sentigeo::fixture::FixtureGenerator;
//!
//! # fn main() -> sentigeo::error::Result<()> {
//! let posts = FixtureGenerator::new().with_samples(30).with_seed(7).generate()?;
//! assert_eq!(posts.len(), 30);
//! assert_eq!(posts, FixtureGenerator::new().with_samples(30).with_seed(7).generate()?);
//! # Ok(())
//! # }
//! ```

use chrono::DateTime;
use fake::Fake;
use fake::faker::internet::en::Username;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{Result, SentigeoError};
use crate::pipeline::Pipeline;
use crate::record::{AnalysisRecord, RawPost};

pub const DEFAULT_SAMPLES: usize = 750;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CENTERS: [[f64; 2]; 3] = [[1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]];
pub const DEFAULT_STDS: [f64; 3] = [0.2, 0.35, 0.5];

// 2020-01-01T00:00:00Z
const START_SECONDS: i64 = 1_577_836_800;
const SPAN_SECONDS: i64 = 30 * 24 * 60 * 60;

const CORPUS: &[&str] = &[
    "I love the sunny weather today #summer",
    "The coffee in this place is really good #coffee",
    "This train is late again and I hate it #commute",
    "What a beautiful day at the beach #beach #sun",
    "I am so tired of this boring meeting",
    "The new album is awesome and I enjoy it #music",
    "My phone is broken and that is a disaster",
    "We had a wonderful dinner with friends #food",
    "It is cold and the bus was late #winter",
    "Just finished a great run in the park #running",
    "Ich liebe diesen Sommer #sommer",
    "Das Essen war heute sehr lecker #essen",
    "Der Zug ist schon wieder zu spät und das ist schlecht #bahn",
    "Ich bin so müde und das Wetter ist kalt",
    "Das Konzert war wirklich toll #musik",
    "Wir haben einen schönen Tag am See #urlaub",
    "Mein Fahrrad ist kaputt und ich habe keine Zeit",
    "Das ist eine großartige Idee für das Wochenende #wochenende",
];

/// Generates synthetic [`RawPost`]s.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    n_samples: usize,
    centers: Vec<[f64; 2]>,
    stds: Vec<f64>,
    seed: u64,
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self {
            n_samples: DEFAULT_SAMPLES,
            centers: DEFAULT_CENTERS.to_vec(),
            stds: DEFAULT_STDS.to_vec(),
            seed: DEFAULT_SEED,
        }
    }
}

impl FixtureGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cluster centers, as `[longitude, latitude]`, and one standard
    /// deviation per center.
    pub fn with_clusters(mut self, centers: Vec<[f64; 2]>, stds: Vec<f64>) -> Result<Self> {
        if centers.is_empty() {
            return Err(SentigeoError::config("at least one cluster center is required"));
        }
        if centers.len() != stds.len() {
            return Err(SentigeoError::config(format!(
                "{} centers but {} standard deviations",
                centers.len(),
                stds.len()
            )));
        }
        self.centers = centers;
        self.stds = stds;
        Ok(self)
    }

    /// Generate the posts. Sample `i` belongs to cluster `i % centers`.
    pub fn generate(&self) -> Result<Vec<RawPost>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let blobs = self
            .stds
            .iter()
            .map(|&std| {
                Normal::new(0.0, std).map_err(|e| {
                    SentigeoError::config(format!("invalid standard deviation {std}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut posts = Vec::with_capacity(self.n_samples);
        for i in 0..self.n_samples {
            let cluster = i % self.centers.len();
            let [center_lng, center_lat] = self.centers[cluster];
            let longitude = center_lng + blobs[cluster].sample(&mut rng);
            let latitude = center_lat + blobs[cluster].sample(&mut rng);

            let author: String = Username().fake_with_rng(&mut rng);
            let text = CORPUS
                .choose(&mut rng)
                .ok_or_else(|| SentigeoError::other("fixture corpus is empty"))?;
            let seconds = START_SECONDS + rng.random_range(0..SPAN_SECONDS);
            let timestamp = DateTime::from_timestamp(seconds, 0)
                .ok_or_else(|| SentigeoError::other("fixture timestamp out of range"))?;

            posts.push(
                RawPost::new(author, *text, longitude, latitude)
                    .with_timestamp(timestamp.to_rfc3339()),
            );
        }

        Ok(posts)
    }

    /// Generate posts and run them through the pipeline, dropping failures.
    pub fn generate_records(&self, pipeline: &Pipeline) -> Result<Vec<AnalysisRecord>> {
        let posts = self.generate()?;
        let mut records = Vec::with_capacity(posts.len());

        for result in pipeline.process_batch(&posts) {
            match result {
                Ok(record) => records.push(record),
                Err(failure) => warn!("dropping fixture post: {failure}"),
            }
        }

        info!(
            "generated {} fixture records from {} posts",
            records.len(),
            posts.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::detector::{LanguageDetector, ProfileDetector};

    #[test]
    fn test_default_parameters() {
        let posts = FixtureGenerator::new().generate().unwrap();
        assert_eq!(posts.len(), 750);
        assert!(posts.iter().all(|p| p.timestamp.is_some()));
    }

    #[test]
    fn test_clusters() {
        let posts = FixtureGenerator::new()
            .with_clusters(vec![[10.0, 50.0], [-70.0, -30.0]], vec![0.1, 0.1])
            .unwrap()
            .with_samples(100)
            .generate()
            .unwrap();

        for (i, post) in posts.iter().enumerate() {
            let (lng, lat) = if i % 2 == 0 { (10.0, 50.0) } else { (-70.0, -30.0) };
            assert!((post.longitude - lng).abs() < 1.0, "{post:?}");
            assert!((post.latitude - lat).abs() < 1.0, "{post:?}");
        }
    }

    #[test]
    fn test_invalid_clusters() {
        assert!(FixtureGenerator::new().with_clusters(vec![], vec![]).is_err());
        assert!(FixtureGenerator::new()
            .with_clusters(vec![[0.0, 0.0]], vec![0.1, 0.2])
            .is_err());
        assert!(FixtureGenerator::new()
            .with_clusters(vec![[0.0, 0.0]], vec![-1.0])
            .unwrap()
            .generate()
            .is_err());
    }

    #[test]
    fn test_seeds_differ() {
        let a = FixtureGenerator::new().with_samples(20).with_seed(1).generate().unwrap();
        let b = FixtureGenerator::new().with_samples(20).with_seed(2).generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_corpus_languages_detected() {
        let detector = ProfileDetector::new();
        for text in CORPUS {
            let code = detector.detect(text, None).unwrap();
            assert!(code == "en" || code == "de", "{text}: {code}");
        }
    }

    #[test]
    fn test_generate_records() {
        let records = FixtureGenerator::new()
            .with_samples(40)
            .generate_records(&Pipeline::with_defaults())
            .unwrap();
        assert_eq!(records.len(), 40);
    }
}
