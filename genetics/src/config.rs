//! Configuration for pedigree analysis.

use serde::{Deserialize, Serialize};

use crate::pedigree::MAX_PEDIGREE_DEPTH;

/// Pedigree analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Complete generations both parents need before a coefficient is reported
    pub required_generations: usize,
    /// Hard cap on ancestor traversal depth
    pub max_depth: usize,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            required_generations: 5,
            max_depth: MAX_PEDIGREE_DEPTH,
        }
    }
}

impl GeneticsConfig {
    /// Builder: set required generations.
    pub fn with_required_generations(mut self, generations: usize) -> Self {
        self.required_generations = generations;
        self
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
