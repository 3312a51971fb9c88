//! Inbreeding coefficient of a prospective offspring (Wright's path method).
//!
//! The coefficient is only reported when both parents have enough complete
//! generations of pedigree behind them. Otherwise the result says why it is
//! not computable instead of reporting 0, which would read as "unrelated".

use serde::{Deserialize, Serialize};
use tracing::debug;

use herdbook::HerdSnapshot;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::GeneticsConfig;
use crate::error::{GeneticsError, Result};
use crate::pedigree::PedigreeResolver;

/// Coefficient below which risk is low (first-cousin mating).
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.0625;
/// Coefficient from which risk is high (half-sibling mating).
pub const HIGH_RISK_THRESHOLD: f64 = 0.125;

const PARENT_OFFSPRING_COEFFICIENT: f64 = 0.25;
const GRANDPARENT_COEFFICIENT: f64 = 0.125;

/// Whether the pedigree supports a coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PedigreeStatus {
    /// Both parents meet the required depth
    Computable,
    /// At least one parent has no complete generation at all
    InsufficientPedigreeData,
    /// Some generations known, fewer than required
    IncompleteGenerations,
}

/// Inbreeding risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Coefficient not computable
    Unknown,
}

impl RiskLevel {
    /// Classify a coefficient.
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient < MEDIUM_RISK_THRESHOLD {
            Self::Low
        } else if coefficient < HIGH_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

/// How the coefficient was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// One animal is the parent of the other
    ParentOffspring,
    /// One animal is a grandparent of the other
    GrandparentGrandchild,
    /// Path counting found shared ancestry
    Related,
    /// No common ancestor within the generation cap
    Unrelated,
    /// Pedigree too shallow to tell
    Unknown,
}

/// Share of the coefficient coming from one common ancestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AncestorContribution {
    pub ancestor_id: String,
    /// Accepted sire-path × dam-path loops through this ancestor
    pub paths: usize,
    /// Sum of (1/2)^N over those loops
    pub contribution: f64,
}

/// Qualified inbreeding coefficient for a sire × dam pairing.
///
/// `coefficient` is present if and only if `status` is `Computable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct InbreedingResult {
    /// Coefficient in [0, 1], absent when not computable
    pub coefficient: Option<f64>,
    pub status: PedigreeStatus,
    pub required_generations: usize,
    /// Smaller of the two parents' pedigree depths
    pub available_generations: usize,
    pub risk_level: RiskLevel,
    pub relationship: Relationship,
    /// Per-ancestor breakdown (general case only)
    pub contributions: Vec<AncestorContribution>,
}

impl InbreedingResult {
    /// A computed coefficient, clamped to [0, 1] and classified.
    pub fn computable(
        coefficient: f64,
        relationship: Relationship,
        required_generations: usize,
        available_generations: usize,
    ) -> Self {
        let coefficient = coefficient.clamp(0.0, 1.0);
        Self {
            coefficient: Some(coefficient),
            status: PedigreeStatus::Computable,
            required_generations,
            available_generations,
            risk_level: RiskLevel::from_coefficient(coefficient),
            relationship,
            contributions: Vec::new(),
        }
    }

    /// Pedigree too shallow for a coefficient.
    pub fn not_computable(required_generations: usize, available_generations: usize) -> Self {
        let status = if available_generations == 0 {
            PedigreeStatus::InsufficientPedigreeData
        } else {
            PedigreeStatus::IncompleteGenerations
        };

        Self {
            coefficient: None,
            status,
            required_generations,
            available_generations,
            risk_level: RiskLevel::Unknown,
            relationship: Relationship::Unknown,
            contributions: Vec::new(),
        }
    }

    /// Grandparent pairings are reported as medium risk regardless of the
    /// coefficient thresholds.
    fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    fn with_contributions(mut self, contributions: Vec<AncestorContribution>) -> Self {
        self.contributions = contributions;
        self
    }

    pub fn is_computable(&self) -> bool {
        self.status == PedigreeStatus::Computable
    }

    /// Coefficient as a percentage.
    pub fn percentage(&self) -> Option<f64> {
        self.coefficient.map(|c| c * 100.0)
    }
}

/// Computes inbreeding coefficients against a herd snapshot.
#[derive(Debug, Clone, Default)]
pub struct InbreedingCalculator {
    config: GeneticsConfig,
}

impl InbreedingCalculator {
    /// Create a calculator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration.
    pub fn with_config(config: GeneticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneticsConfig {
        &self.config
    }

    /// Inbreeding coefficient of the offspring of `sire_id` × `dam_id`.
    ///
    /// Both ids must be in the snapshot. Missing pedigree behind them is
    /// reported in the result, never as an error.
    pub fn compute(
        &self,
        sire_id: &str,
        dam_id: &str,
        herd: &HerdSnapshot,
    ) -> Result<InbreedingResult> {
        for id in [sire_id, dam_id] {
            if !herd.contains(id) {
                return Err(GeneticsError::AnimalNotFound { id: id.to_string() });
            }
        }

        let required = self.config.required_generations;
        let resolver = PedigreeResolver::with_max_depth(herd, self.config.max_depth);

        let min_depth = resolver.depth(sire_id).min(resolver.depth(dam_id));
        if min_depth < required {
            debug!(
                sire_id = %sire_id,
                dam_id = %dam_id,
                available = min_depth,
                required,
                "Pedigree too shallow for inbreeding coefficient"
            );
            return Ok(InbreedingResult::not_computable(required, min_depth));
        }

        if resolver.is_parent_of(sire_id, dam_id) || resolver.is_parent_of(dam_id, sire_id) {
            debug!(sire_id = %sire_id, dam_id = %dam_id, "Parent/offspring pairing");
            return Ok(InbreedingResult::computable(
                PARENT_OFFSPRING_COEFFICIENT,
                Relationship::ParentOffspring,
                required,
                min_depth,
            ));
        }

        let grandparent = resolver.is_grandparent_of(sire_id, dam_id)
            || resolver.is_grandparent_of(dam_id, sire_id);
        if grandparent {
            debug!(sire_id = %sire_id, dam_id = %dam_id, "Grandparent/grandchild pairing");
            return Ok(InbreedingResult::computable(
                GRANDPARENT_COEFFICIENT,
                Relationship::GrandparentGrandchild,
                required,
                min_depth,
            )
            .with_risk_level(RiskLevel::Medium));
        }

        let (coefficient, contributions) = path_coefficient(&resolver, sire_id, dam_id);
        let relationship = if contributions.is_empty() {
            Relationship::Unrelated
        } else {
            Relationship::Related
        };

        debug!(
            sire_id = %sire_id,
            dam_id = %dam_id,
            coefficient,
            common_ancestors = contributions.len(),
            "Computed inbreeding coefficient"
        );

        Ok(InbreedingResult::computable(coefficient, relationship, required, min_depth)
            .with_contributions(contributions))
    }
}

/// Wright's path coefficient, with the inbreeding of each common ancestor
/// taken as zero.
///
/// A sire path and a dam path to the same ancestor form a loop only when the
/// ancestor is the single individual they share. This drops loops that pass
/// through a nearer common ancestor, which is already counted on its own.
pub(crate) fn path_coefficient(
    resolver: &PedigreeResolver<'_>,
    sire_id: &str,
    dam_id: &str,
) -> (f64, Vec<AncestorContribution>) {
    let mut total = 0.0;
    let mut contributions = Vec::new();

    for ancestor in resolver.common_ancestors(sire_id, dam_id) {
        let sire_paths = resolver.paths_to(sire_id, ancestor);
        let dam_paths = resolver.paths_to(dam_id, ancestor);

        let mut accepted = 0;
        let mut contribution = 0.0;
        for sire_path in &sire_paths {
            for dam_path in &dam_paths {
                let only_ancestor_shared = sire_path
                    .iter()
                    .filter(|id| dam_path.contains(*id))
                    .all(|id| *id == ancestor);
                if !only_ancestor_shared {
                    continue;
                }
                // individuals in the loop; the ancestor is counted once
                let n = sire_path.len() + dam_path.len() - 1;
                contribution += 0.5_f64.powi(n as i32);
                accepted += 1;
            }
        }

        if accepted > 0 {
            total += contribution;
            contributions.push(AncestorContribution {
                ancestor_id: ancestor.to_string(),
                paths: accepted,
                contribution,
            });
        }
    }

    (total.min(1.0), contributions)
}

/// Inbreeding coefficient for a pairing, with the default generation cap.
pub fn inbreeding_coefficient(
    sire_id: &str,
    dam_id: &str,
    herd: &HerdSnapshot,
    required_generations: usize,
) -> Result<InbreedingResult> {
    let config = GeneticsConfig::default().with_required_generations(required_generations);
    InbreedingCalculator::with_config(config).compute(sire_id, dam_id, herd)
}
