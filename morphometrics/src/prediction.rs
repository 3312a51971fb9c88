//! Offspring trait prediction.
//!
//! Parents' latest measurements are combined with the herd mean, weighted by
//! heritability. The less parental data there is, the more the prediction
//! regresses toward the herd and the lower its confidence.

use serde::{Deserialize, Serialize};

use herdbook::{Animal, BodyTrait, HerdSnapshot};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::{FallbackMeans, MorphometricsConfig};
use crate::statistics::{round_to, HerdStatisticsSnapshot, TraitStatistics};

const BOTH_PARENTS_CONFIDENCE: f64 = 0.75;
const BOTH_PARENTS_MAX_CONFIDENCE: f64 = 0.90;
const ONE_PARENT_CONFIDENCE: f64 = 0.45;
const ONE_PARENT_MAX_CONFIDENCE: f64 = 0.60;
const POPULATION_CONFIDENCE: f64 = 0.30;
const CONFIDENCE_BONUS: f64 = 0.15;
/// Half-width below which a two-parent interval earns the confidence bonus.
const NARROW_INTERVAL: f64 = 5.0;
const ONE_PARENT_WIDENING: f64 = 1.5;
const POPULATION_HALF_WIDTH: f64 = 10.0;

/// What a prediction was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum DataBasis {
    BothParentsMeasured,
    OneParentMeasured,
    PopulationOnly,
    InsufficientData,
}

/// Predicted offspring value for one trait.
///
/// `mean`, `min` and `max` are all present or all absent; they are absent
/// exactly when `data_basis` is `InsufficientData`, which is also exactly
/// when `confidence` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct PredictedTrait {
    pub body_trait: BodyTrait,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Confidence in [0, 1]
    pub confidence: f64,
    pub data_basis: DataBasis,
}

impl PredictedTrait {
    fn insufficient(body_trait: BodyTrait) -> Self {
        Self {
            body_trait,
            mean: None,
            min: None,
            max: None,
            confidence: 0.0,
            data_basis: DataBasis::InsufficientData,
        }
    }

    fn interval(
        body_trait: BodyTrait,
        mean: f64,
        half_width: f64,
        confidence: f64,
        data_basis: DataBasis,
    ) -> Self {
        Self {
            body_trait,
            mean: Some(round_to(mean, 1)),
            min: Some(round_to(mean - half_width, 1)),
            max: Some(round_to(mean + half_width, 1)),
            confidence,
            data_basis,
        }
    }

    /// Width of the predicted interval.
    pub fn spread(&self) -> Option<f64> {
        Some(self.max? - self.min?)
    }
}

/// Expected spread of offspring values around a prediction.
///
/// `herd_mean * 10% * (1 - h²)`, shrunk by the number of measured parents
/// but never below half.
pub fn variance(heritability: f64, parent_measures: &[f64], herd_mean: f64) -> f64 {
    let shrink = if parent_measures.is_empty() {
        1.0
    } else {
        (1.0 / (parent_measures.len() as f64).sqrt()).max(0.5)
    };
    herd_mean * 0.10 * (1.0 - heritability) * shrink
}

/// Predicts offspring traits from parents and herd baseline.
#[derive(Debug, Clone, Default)]
pub struct TraitPredictor {
    fallback_means: FallbackMeans,
}

impl TraitPredictor {
    /// Create a predictor with default fallback means.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from morphometrics configuration.
    pub fn with_config(config: &MorphometricsConfig) -> Self {
        Self {
            fallback_means: config.fallback_means.clone(),
        }
    }

    /// Predict a trait for the offspring of `sire` × `dam`.
    pub fn predict(
        &self,
        body_trait: BodyTrait,
        sire: &Animal,
        dam: &Animal,
        stats: &HerdStatisticsSnapshot,
        heritability: f64,
    ) -> PredictedTrait {
        self.predict_from(
            body_trait,
            sire.latest_value(body_trait),
            dam.latest_value(body_trait),
            stats.mean(body_trait),
            heritability,
        )
    }

    /// Decision table over the available values.
    ///
    /// `herd_mean` is the measured herd mean only. Fallback means are used as
    /// a scale for interval widths when the herd has no data; they never
    /// count as population evidence.
    pub fn predict_from(
        &self,
        body_trait: BodyTrait,
        sire_value: Option<f64>,
        dam_value: Option<f64>,
        herd_mean: Option<f64>,
        heritability: f64,
    ) -> PredictedTrait {
        let baseline = herd_mean.or_else(|| self.fallback_means.get(body_trait));

        match (sire_value, dam_value) {
            (Some(sire), Some(dam)) => {
                let mean = (sire + dam) / 2.0;
                let half_width = variance(heritability, &[sire, dam], baseline.unwrap_or(mean));
                let confidence = if half_width < NARROW_INTERVAL {
                    (BOTH_PARENTS_CONFIDENCE + CONFIDENCE_BONUS).min(BOTH_PARENTS_MAX_CONFIDENCE)
                } else {
                    BOTH_PARENTS_CONFIDENCE
                };
                PredictedTrait::interval(
                    body_trait,
                    mean,
                    half_width,
                    confidence,
                    DataBasis::BothParentsMeasured,
                )
            }
            (Some(parent), None) | (None, Some(parent)) => {
                let mean = match herd_mean {
                    Some(herd) => parent * heritability + herd * (1.0 - heritability),
                    None => parent,
                };
                let half_width = variance(heritability, &[parent], baseline.unwrap_or(parent))
                    * ONE_PARENT_WIDENING;
                let confidence = if herd_mean.is_some() {
                    (ONE_PARENT_CONFIDENCE + CONFIDENCE_BONUS).min(ONE_PARENT_MAX_CONFIDENCE)
                } else {
                    ONE_PARENT_CONFIDENCE
                };
                PredictedTrait::interval(
                    body_trait,
                    mean,
                    half_width,
                    confidence,
                    DataBasis::OneParentMeasured,
                )
            }
            (None, None) => match herd_mean {
                Some(herd) => PredictedTrait::interval(
                    body_trait,
                    herd,
                    POPULATION_HALF_WIDTH,
                    POPULATION_CONFIDENCE,
                    DataBasis::PopulationOnly,
                ),
                None => PredictedTrait::insufficient(body_trait),
            },
        }
    }
}

/// Predict one trait for a pairing against a herd snapshot.
pub fn predict_trait(
    body_trait: BodyTrait,
    sire: &Animal,
    dam: &Animal,
    herd: &HerdSnapshot,
    heritability: f64,
) -> PredictedTrait {
    let herd_mean = TraitStatistics::for_herd(herd, body_trait).mean();
    TraitPredictor::new().predict_from(
        body_trait,
        sire.latest_value(body_trait),
        dam.latest_value(body_trait),
        herd_mean,
        heritability,
    )
}
