//! Qualified breeding score.
//!
//! The raw score blends the pairing's morphometric score with an inbreeding
//! penalty. Missing inputs count as neutral (morphometrics 50, no penalty);
//! the confidence and status carry how much of it is actually known.

use serde::{Deserialize, Serialize};

use genetics::InbreedingResult;
use morphometrics::MorphometricPairScore;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::EngineConfig;

const MORPHOMETRIC_WEIGHT: f64 = 0.6;
const INBREEDING_WEIGHT: f64 = 0.4;
/// Score points lost per unit of inbreeding coefficient.
const INBREEDING_PENALTY: f64 = 50.0;
const NEUTRAL_MORPHOMETRIC_SCORE: f64 = 50.0;

const EXCELLENT_SCORE: f64 = 85.0;
const GOOD_SCORE: f64 = 70.0;
const CAUTION_SCORE: f64 = 50.0;

/// How far a score can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Reliable,
    LowConfidence,
    NotComputable,
}

impl ScoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reliable => "reliable",
            Self::LowConfidence => "low_confidence",
            Self::NotComputable => "not_computable",
        }
    }
}

/// Breeding recommendation for a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Excellent,
    Good,
    Caution,
    NotRecommended,
    InsufficientData,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Caution => "caution",
            Self::NotRecommended => "not_recommended",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

/// A breeding score qualified by confidence and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct QualifiedBreedingScore {
    /// 0-100, absent when not computable
    pub value: Option<f64>,
    pub confidence: f64,
    pub status: ScoreStatus,
    pub recommendation: Recommendation,
    pub explanation: String,
}

impl QualifiedBreedingScore {
    /// Score before any expert rule is applied.
    pub fn raw(
        inbreeding: &InbreedingResult,
        morphometrics: &MorphometricPairScore,
        config: &EngineConfig,
    ) -> Self {
        let morphometric_component = morphometrics
            .overall_score
            .unwrap_or(NEUTRAL_MORPHOMETRIC_SCORE)
            * MORPHOMETRIC_WEIGHT;
        let penalty = inbreeding.coefficient.unwrap_or(0.0) * INBREEDING_PENALTY;
        let inbreeding_component = (100.0 - penalty) * INBREEDING_WEIGHT;
        let value = (morphometric_component + inbreeding_component)
            .round()
            .clamp(0.0, 100.0);

        let confidence = morphometrics.confidence;
        let status = if confidence >= config.reliable_confidence {
            ScoreStatus::Reliable
        } else {
            ScoreStatus::LowConfidence
        };

        Self {
            value: Some(value),
            confidence,
            status,
            recommendation: recommend(value, confidence, inbreeding.coefficient, config),
            explanation: explain(inbreeding, morphometrics),
        }
    }

    /// Result for a pairing nothing is known about.
    pub fn not_computable(explanation: impl Into<String>) -> Self {
        Self {
            value: None,
            confidence: 0.0,
            status: ScoreStatus::NotComputable,
            recommendation: Recommendation::InsufficientData,
            explanation: explanation.into(),
        }
    }

    /// Lower a reliable score to low confidence; never raises it.
    pub fn downgrade(&mut self) {
        if self.status == ScoreStatus::Reliable {
            self.status = ScoreStatus::LowConfidence;
        }
    }
}

fn recommend(
    value: f64,
    confidence: f64,
    coefficient: Option<f64>,
    config: &EngineConfig,
) -> Recommendation {
    if coefficient.is_some_and(|c| c >= config.high_inbreeding) {
        Recommendation::NotRecommended
    } else if value >= EXCELLENT_SCORE && confidence >= config.reliable_confidence {
        Recommendation::Excellent
    } else if value >= GOOD_SCORE {
        Recommendation::Good
    } else if value >= CAUTION_SCORE {
        Recommendation::Caution
    } else {
        Recommendation::NotRecommended
    }
}

fn explain(inbreeding: &InbreedingResult, morphometrics: &MorphometricPairScore) -> String {
    let morphometric = match morphometrics.overall_score {
        Some(score) => format!(
            "morphometric score {score:.0}/100 ({:.0}% confidence)",
            morphometrics.confidence * 100.0
        ),
        None => "morphometric score unknown".to_string(),
    };
    let inbreeding = match inbreeding.percentage() {
        Some(pct) => format!("inbreeding {pct:.2}% ({} risk)", inbreeding.risk_level.as_str()),
        None => format!(
            "inbreeding unknown ({} of {} generations)",
            inbreeding.available_generations, inbreeding.required_generations
        ),
    };
    format!("Based on {morphometric} and {inbreeding}")
}
