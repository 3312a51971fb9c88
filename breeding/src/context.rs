//! Per-simulation state the expert rules operate on.

use genetics::InbreedingResult;
use morphometrics::MorphometricPairScore;

use crate::config::EngineConfig;
use crate::rules::AppliedRule;
use crate::score::{QualifiedBreedingScore, Recommendation};

/// Everything known about one pairing while rules are applied.
///
/// Created for a single simulation and consumed by it. `raw` keeps the score
/// as it was before any rule ran; rules change `score` only.
#[derive(Debug, Clone)]
pub struct BreedingContext {
    pub inbreeding: InbreedingResult,
    pub morphometrics: MorphometricPairScore,
    pub raw: QualifiedBreedingScore,
    pub score: QualifiedBreedingScore,
    pub warnings: Vec<String>,
    pub applied_rules: Vec<AppliedRule>,
    pub thresholds: EngineConfig,
}

impl BreedingContext {
    /// Build the context and its raw score.
    pub fn new(
        inbreeding: InbreedingResult,
        morphometrics: MorphometricPairScore,
        thresholds: EngineConfig,
    ) -> Self {
        let raw = QualifiedBreedingScore::raw(&inbreeding, &morphometrics, &thresholds);
        Self {
            inbreeding,
            morphometrics,
            score: raw.clone(),
            raw,
            warnings: Vec::new(),
            applied_rules: Vec::new(),
            thresholds,
        }
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn coefficient(&self) -> Option<f64> {
        self.inbreeding.coefficient
    }

    pub fn morphometric_confidence(&self) -> f64 {
        self.morphometrics.confidence
    }

    pub fn raw_recommendation(&self) -> Recommendation {
        self.raw.recommendation
    }
}
