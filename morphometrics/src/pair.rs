//! Pairing-level morphometric score.

use serde::{Deserialize, Serialize};

use herdbook::{Animal, BodyTrait, HerdSnapshot};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::MorphometricsConfig;
use crate::prediction::{PredictedTrait, TraitPredictor};
use crate::statistics::HerdStatisticsSnapshot;

/// Expected morphometric quality of a sire × dam pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MorphometricPairScore {
    pub height: PredictedTrait,
    pub length: PredictedTrait,
    pub chest: PredictedTrait,
    /// 0-100, absent when no trait could be predicted with enough confidence
    pub overall_score: Option<f64>,
    /// Mean confidence over all three traits
    pub confidence: f64,
}

impl MorphometricPairScore {
    pub fn traits(&self) -> [&PredictedTrait; 3] {
        [&self.height, &self.length, &self.chest]
    }

    /// Traits predicted with less than `threshold` confidence.
    pub fn weak_traits(&self, threshold: f64) -> Vec<BodyTrait> {
        self.traits()
            .into_iter()
            .filter(|t| t.confidence < threshold)
            .map(|t| t.body_trait)
            .collect()
    }
}

/// Scores pairings from predicted offspring traits.
#[derive(Debug, Clone, Default)]
pub struct PairScorer {
    config: MorphometricsConfig,
    predictor: TraitPredictor,
}

impl PairScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MorphometricsConfig) -> Self {
        let predictor = TraitPredictor::with_config(&config);
        Self { config, predictor }
    }

    pub fn config(&self) -> &MorphometricsConfig {
        &self.config
    }

    fn predict(
        &self,
        body_trait: BodyTrait,
        sire: &Animal,
        dam: &Animal,
        stats: &HerdStatisticsSnapshot,
    ) -> PredictedTrait {
        let heritability = self.config.heritability.get(body_trait).unwrap_or_default();
        self.predictor.predict(body_trait, sire, dam, stats, heritability)
    }

    /// Score the pairing against precomputed herd statistics.
    ///
    /// Each trait predicted with enough confidence contributes its relative
    /// improvement over the herd mean, weighted by its own confidence. The
    /// result is centred on 50.
    pub fn score(
        &self,
        sire: &Animal,
        dam: &Animal,
        stats: &HerdStatisticsSnapshot,
    ) -> MorphometricPairScore {
        let height = self.predict(BodyTrait::Height, sire, dam, stats);
        let length = self.predict(BodyTrait::Length, sire, dam, stats);
        let chest = self.predict(BodyTrait::Chest, sire, dam, stats);

        let mut weighted = 0.0;
        let mut total_confidence = 0.0;
        for predicted in [&height, &length, &chest] {
            if predicted.confidence < self.config.min_trait_confidence {
                continue;
            }
            let Some(mean) = predicted.mean else { continue };
            let baseline = stats
                .mean(predicted.body_trait)
                .or_else(|| self.config.fallback_means.get(predicted.body_trait));
            let Some(baseline) = baseline.filter(|b| *b > 0.0) else {
                continue;
            };
            weighted += (mean - baseline) / baseline * predicted.confidence;
            total_confidence += predicted.confidence;
        }

        let (overall_score, confidence) = if total_confidence > 0.0 {
            let score = (50.0 + weighted * 100.0 / total_confidence)
                .clamp(0.0, 100.0)
                .round();
            let confidence = (height.confidence + length.confidence + chest.confidence) / 3.0;
            (Some(score), confidence)
        } else {
            (None, 0.0)
        };

        tracing::debug!(
            sire_id = %sire.id,
            dam_id = %dam.id,
            overall_score = ?overall_score,
            confidence,
            "Scored pairing morphometrics"
        );

        MorphometricPairScore {
            height,
            length,
            chest,
            overall_score,
            confidence,
        }
    }
}

/// Score a pairing against a herd snapshot with the default configuration.
pub fn score_pair_morphometrics(
    sire: &Animal,
    dam: &Animal,
    herd: &HerdSnapshot,
) -> MorphometricPairScore {
    let stats = HerdStatisticsSnapshot::compute(herd);
    PairScorer::new().score(sire, dam, &stats)
}
