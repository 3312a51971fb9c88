//! Configuration for breeding simulations and the service facade.

use serde::{Deserialize, Serialize};

use genetics::GeneticsConfig;
use morphometrics::MorphometricsConfig;

use crate::error::{BreedingError, Result};

/// Longest gestation accepted from configuration.
pub const MAX_GESTATION_DAYS: i64 = 400;

/// Thresholds of the scoring and rule pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days from simulation to expected lambing/kidding
    pub gestation_days: i64,
    /// Morphometric confidence needed for a reliable score or an Excellent rating
    pub reliable_confidence: f64,
    /// Morphometric confidence below which the score is flagged as weak
    pub low_morphometric_confidence: f64,
    /// Inbreeding coefficient from which a pairing is not recommended
    pub high_inbreeding: f64,
}

impl EngineConfig {
    /// Reject values the simulation cannot turn into a due date.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_GESTATION_DAYS).contains(&self.gestation_days) {
            return Err(BreedingError::InvalidConfig(format!(
                "gestation_days must be between 0 and {MAX_GESTATION_DAYS}, got {}",
                self.gestation_days
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gestation_days: 145,
            reliable_confidence: 0.7,
            low_morphometric_confidence: 0.5,
            high_inbreeding: genetics::inbreeding::HIGH_RISK_THRESHOLD,
        }
    }
}

/// Service facade settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// How long cached herd statistics stay valid (seconds)
    pub statistics_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            statistics_ttl_secs: 3600, // 1 hour
        }
    }
}

/// Complete breeding configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingConfig {
    pub genetics: GeneticsConfig,
    pub morphometrics: MorphometricsConfig,
    pub engine: EngineConfig,
    pub service: ServiceConfig,
}

impl BreedingConfig {
    /// Builder: set required pedigree generations.
    pub fn with_required_generations(mut self, generations: usize) -> Self {
        self.genetics.required_generations = generations;
        self
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
