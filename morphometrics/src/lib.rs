//! Morphometric analysis for breeding decisions.
//!
//! Everything here is qualified: a prediction or score always travels with
//! the confidence it deserves and the data it was based on. Missing data
//! pulls scores toward the neutral midpoint (50), never toward zero.
//!
//! # Key Components
//!
//! - [`statistics`]: herd mean / sample standard deviation, z-scores,
//!   percentiles and the [`HerdStatisticsSnapshot`]
//! - [`TraitPredictor`]: heritability-weighted offspring trait prediction
//! - [`PairScorer`]: expected morphometric quality of a sire × dam pairing
//! - [`score_animal_morphometrics`]: one animal against the herd distribution

pub mod animal;
pub mod config;
pub mod pair;
pub mod prediction;
pub mod statistics;

// Re-export main types
pub use animal::{score_animal_morphometrics, AnimalMorphometricScore, Classification, ZScore};
pub use config::{FallbackMeans, Heritability, MorphometricsConfig, ScoringWeights};
pub use pair::{score_pair_morphometrics, MorphometricPairScore, PairScorer};
pub use prediction::{predict_trait, DataBasis, PredictedTrait, TraitPredictor};
pub use statistics::{ClassificationDistribution, HerdStatisticsSnapshot, TraitStatistics};
