//! Configuration for morphometric prediction and scoring.

use serde::{Deserialize, Serialize};

use herdbook::BodyTrait;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Narrow-sense heritability per predictable trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heritability {
    pub height: f64,
    pub length: f64,
    pub chest: f64,
}

impl Default for Heritability {
    fn default() -> Self {
        Self {
            height: 0.40,
            length: 0.35,
            chest: 0.30,
        }
    }
}

impl Heritability {
    /// Heritability of a trait; mass is not predicted for offspring.
    pub fn get(&self, body_trait: BodyTrait) -> Option<f64> {
        match body_trait {
            BodyTrait::Height => Some(self.height),
            BodyTrait::Length => Some(self.length),
            BodyTrait::Chest => Some(self.chest),
            BodyTrait::Mass => None,
        }
    }
}

/// Reference herd means used as a scale when a herd has no data for a trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackMeans {
    /// Height at withers (cm)
    pub height: f64,
    /// Body length (cm)
    pub length: f64,
    /// Chest girth (cm)
    pub chest: f64,
}

impl Default for FallbackMeans {
    fn default() -> Self {
        Self {
            height: 95.0,
            length: 105.0,
            chest: 100.0,
        }
    }
}

impl FallbackMeans {
    pub fn get(&self, body_trait: BodyTrait) -> Option<f64> {
        match body_trait {
            BodyTrait::Height => Some(self.height),
            BodyTrait::Length => Some(self.length),
            BodyTrait::Chest => Some(self.chest),
            BodyTrait::Mass => None,
        }
    }
}

/// Weights of each metric in an animal's global score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default)]
pub struct ScoringWeights {
    pub mass: f64,
    pub height: f64,
    pub length: f64,
    pub chest: f64,
    /// Reserved for functional traits; not scored yet
    pub functional: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            mass: 0.20,
            height: 0.20,
            length: 0.30,
            chest: 0.20,
            functional: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn get(&self, body_trait: BodyTrait) -> f64 {
        match body_trait {
            BodyTrait::Mass => self.mass,
            BodyTrait::Height => self.height,
            BodyTrait::Length => self.length,
            BodyTrait::Chest => self.chest,
        }
    }
}

/// Morphometrics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphometricsConfig {
    pub heritability: Heritability,
    pub fallback_means: FallbackMeans,
    pub weights: ScoringWeights,
    /// Predicted traits below this confidence are left out of pair scores
    pub min_trait_confidence: f64,
}

impl Default for MorphometricsConfig {
    fn default() -> Self {
        Self {
            heritability: Heritability::default(),
            fallback_means: FallbackMeans::default(),
            weights: ScoringWeights::default(),
            min_trait_confidence: 0.4,
        }
    }
}

impl MorphometricsConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
