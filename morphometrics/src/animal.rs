//! Per-animal morphometric scoring against the herd distribution.

use serde::{Deserialize, Serialize};

use herdbook::{Animal, BodyTrait};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::ScoringWeights;
use crate::statistics::{
    normalize_z_score, percentile, round_to, weighted_average, z_score, HerdStatisticsSnapshot,
};

/// Percentile from which a trait is called out as a strength.
const STRENGTH_PERCENTILE: u8 = 75;
const LONG_BODY_RATIO: f64 = 1.15;
const COMPACT_BODY_RATIO: f64 = 1.05;

/// Classification tier of a global morphometric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Elite,
    TresBon,
    Moyen,
    Faible,
}

impl Classification {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Elite
        } else if score >= 65.0 {
            Self::TresBon
        } else if score >= 50.0 {
            Self::Moyen
        } else {
            Self::Faible
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::TresBon => "Très bon",
            Self::Moyen => "Moyen",
            Self::Faible => "Faible",
        }
    }
}

/// Position of one measurement in the herd distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ZScore {
    pub raw_value: Option<f64>,
    pub z_score: f64,
    /// Percentile rank, 0-100
    pub percentile: u8,
    pub available: bool,
}

impl ZScore {
    /// A metric with no usable measurement: neutral z and median percentile.
    pub fn unavailable() -> Self {
        Self {
            raw_value: None,
            z_score: 0.0,
            percentile: 50,
            available: false,
        }
    }

    fn measured(value: f64, mean: f64, std_dev: f64) -> Self {
        let z = z_score(value, mean, std_dev);
        Self {
            raw_value: Some(value),
            z_score: z,
            percentile: percentile(z),
            available: true,
        }
    }
}

/// Morphometric score of one animal relative to its herd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AnimalMorphometricScore {
    pub animal_id: String,
    pub mass: ZScore,
    pub height: ZScore,
    pub length: ZScore,
    pub chest: ZScore,
    /// Functional traits are not scored yet; always unavailable
    pub functional: ZScore,
    pub weights: ScoringWeights,
    /// 0-100, one decimal; 50 when nothing is measured
    pub global_score: f64,
    pub classification: Classification,
    /// Share of the four body metrics that were available
    pub confidence: f64,
    pub available_metrics: usize,
    pub summary: String,
}

impl AnimalMorphometricScore {
    pub fn metric(&self, body_trait: BodyTrait) -> &ZScore {
        match body_trait {
            BodyTrait::Mass => &self.mass,
            BodyTrait::Height => &self.height,
            BodyTrait::Length => &self.length,
            BodyTrait::Chest => &self.chest,
        }
    }
}

/// Score an animal's latest measurements against herd statistics.
///
/// Each available metric is normalised from its z-score onto 0-100 and the
/// global score is their weighted average; metrics without a measurement
/// contribute nothing, not zero.
pub fn score_animal_morphometrics(
    animal: &Animal,
    stats: &HerdStatisticsSnapshot,
    weights: &ScoringWeights,
) -> AnimalMorphometricScore {
    let metric = |body_trait: BodyTrait| match animal.latest_value(body_trait) {
        Some(value) => {
            let trait_stats = stats.trait_stats(body_trait);
            ZScore::measured(value, trait_stats.mean, trait_stats.std_dev)
        }
        None => ZScore::unavailable(),
    };

    let mass = metric(BodyTrait::Mass);
    let height = metric(BodyTrait::Height);
    let length = metric(BodyTrait::Length);
    let chest = metric(BodyTrait::Chest);

    let scored: Vec<(BodyTrait, &ZScore)> = [
        (BodyTrait::Mass, &mass),
        (BodyTrait::Height, &height),
        (BodyTrait::Length, &length),
        (BodyTrait::Chest, &chest),
    ]
    .into_iter()
    .filter(|(_, z)| z.available)
    .collect();

    let pairs: Vec<(f64, f64)> = scored
        .iter()
        .map(|(body_trait, z)| (normalize_z_score(z.z_score), weights.get(*body_trait)))
        .collect();
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    let global_score = if pairs.is_empty() || total_weight == 0.0 {
        50.0
    } else {
        round_to(weighted_average(&pairs), 1)
    };

    let available_metrics = scored.len();
    let strengths: Vec<&str> = scored
        .iter()
        .filter(|(_, z)| z.percentile >= STRENGTH_PERCENTILE)
        .map(|(body_trait, _)| body_trait.as_str())
        .collect();
    let summary = summarize(&strengths, length.raw_value, height.raw_value);
    let classification = Classification::from_score(global_score);

    tracing::debug!(
        animal_id = %animal.id,
        global_score,
        classification = classification.label(),
        available_metrics,
        "Scored animal morphometrics"
    );

    AnimalMorphometricScore {
        animal_id: animal.id.clone(),
        mass,
        height,
        length,
        chest,
        functional: ZScore::unavailable(),
        weights: weights.clone(),
        global_score,
        classification,
        confidence: available_metrics as f64 / 4.0,
        available_metrics,
        summary,
    }
}

fn summarize(strengths: &[&str], length: Option<f64>, height: Option<f64>) -> String {
    let mut parts = Vec::new();
    if !strengths.is_empty() {
        parts.push(format!("Strong {}", strengths.join(", ")));
    }
    if let (Some(length), Some(height)) = (length, height) {
        let ratio = length / height;
        if ratio > LONG_BODY_RATIO {
            parts.push("longiligne".to_string());
        } else if ratio < COMPACT_BODY_RATIO {
            parts.push("compact".to_string());
        }
    }
    if parts.is_empty() {
        "Average conformation".to_string()
    } else {
        parts.join("; ")
    }
}
