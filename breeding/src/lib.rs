//! Breeding decisions for sire × dam pairings.
//!
//! Combines the pedigree-based inbreeding coefficient with the predicted
//! morphometric quality of the offspring into a qualified score, then runs a
//! fixed set of expert rules that can lower confidence, override the
//! recommendation or mark the pairing as not computable.
//!
//! # Key Components
//!
//! - [`simulate_breeding`] / [`BreedingSimulator`]: one pairing, synchronous
//! - [`RuleEngine`]: ordered [`ExpertRule`]s over a [`BreedingContext`]
//! - [`BreedingSimulator::compatibility_matrix`]: many pairings in parallel
//! - [`BreedingService`]: async facade over a [`herdbook::HerdProvider`] and
//!   an optional [`StatisticsCache`]
//!
//! # Example
//!
//! ```ignore
//! use breeding::{simulate_breeding, Recommendation};
//!
//! let result = simulate_breeding("RAM-12", "EWE-40", &herd, 5)?;
//! if result.score.recommendation == Recommendation::NotRecommended {
//!     for warning in &result.warnings {
//!         println!("{warning}");
//!     }
//! }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod matrix;
pub mod rules;
pub mod score;
pub mod service;
pub mod simulation;

// Re-export main types
pub use cache::{InMemoryStatisticsCache, StatisticsCache};
pub use config::{BreedingConfig, EngineConfig, ServiceConfig};
pub use context::BreedingContext;
pub use error::{BreedingError, Result};
pub use matrix::CompatibilityCell;
pub use rules::{standard_rules, AppliedRule, ExpertRule, RuleEngine};
pub use score::{QualifiedBreedingScore, Recommendation, ScoreStatus};
pub use service::BreedingService;
pub use simulation::{simulate_breeding, BreedingSimulationResult, BreedingSimulator};
