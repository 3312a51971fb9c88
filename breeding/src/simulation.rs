//! Breeding simulation for a sire × dam pairing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use genetics::{InbreedingCalculator, InbreedingResult};
use herdbook::{Animal, Gender, HerdSnapshot};
use morphometrics::{HerdStatisticsSnapshot, MorphometricPairScore, PairScorer};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::BreedingConfig;
use crate::context::BreedingContext;
use crate::error::{BreedingError, Result};
use crate::rules::{AppliedRule, RuleEngine};
use crate::score::QualifiedBreedingScore;

/// Outcome of simulating one pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct BreedingSimulationResult {
    pub simulation_id: Uuid,
    pub simulated_at: DateTime<Utc>,
    pub sire_id: String,
    pub dam_id: String,
    pub inbreeding: InbreedingResult,
    pub morphometrics: MorphometricPairScore,
    pub score: QualifiedBreedingScore,
    pub applied_rules: Vec<AppliedRule>,
    /// Always present, possibly empty
    pub warnings: Vec<String>,
    pub expected_due_date: DateTime<Utc>,
}

impl BreedingSimulationResult {
    /// Whether a rule with this id fired.
    pub fn rule_applied(&self, rule_id: &str) -> bool {
        self.applied_rules.iter().any(|r| r.rule_id == rule_id)
    }
}

/// Runs simulations with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct BreedingSimulator {
    config: BreedingConfig,
    calculator: InbreedingCalculator,
    scorer: PairScorer,
}

impl BreedingSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BreedingConfig) -> Self {
        Self {
            calculator: InbreedingCalculator::with_config(config.genetics.clone()),
            scorer: PairScorer::with_config(config.morphometrics.clone()),
            config,
        }
    }

    pub fn config(&self) -> &BreedingConfig {
        &self.config
    }

    /// Simulate a pairing, computing herd statistics from the snapshot.
    pub fn simulate(
        &self,
        sire_id: &str,
        dam_id: &str,
        herd: &HerdSnapshot,
    ) -> Result<BreedingSimulationResult> {
        let stats = HerdStatisticsSnapshot::compute_with_weights(
            herd,
            &self.config.morphometrics.weights,
        );
        self.simulate_with_stats(sire_id, dam_id, herd, &stats)
    }

    /// Simulate a pairing against precomputed herd statistics.
    pub fn simulate_with_stats(
        &self,
        sire_id: &str,
        dam_id: &str,
        herd: &HerdSnapshot,
        stats: &HerdStatisticsSnapshot,
    ) -> Result<BreedingSimulationResult> {
        let (sire, dam) = validate_pairing(sire_id, dam_id, herd)?;

        let inbreeding = self.calculator.compute(sire_id, dam_id, herd)?;
        let morphometrics = self.scorer.score(sire, dam, stats);

        let mut ctx = BreedingContext::new(inbreeding, morphometrics, self.config.engine);
        RuleEngine::standard().apply(&mut ctx);

        let simulated_at = Utc::now();
        let expected_due_date = self.due_date(simulated_at)?;
        let mut score = ctx.score;
        if !ctx.applied_rules.is_empty() {
            let rules: Vec<&str> = ctx.applied_rules.iter().map(|r| r.rule_id.as_str()).collect();
            score.explanation =
                format!("{}. Rules applied: {}", score.explanation, rules.join(", "));
        }

        info!(
            sire_id = %sire_id,
            dam_id = %dam_id,
            status = score.status.as_str(),
            recommendation = score.recommendation.as_str(),
            value = ?score.value,
            "Breeding simulation complete"
        );

        Ok(BreedingSimulationResult {
            simulation_id: Uuid::new_v4(),
            simulated_at,
            sire_id: sire_id.to_string(),
            dam_id: dam_id.to_string(),
            inbreeding: ctx.inbreeding,
            morphometrics: ctx.morphometrics,
            score,
            applied_rules: ctx.applied_rules,
            warnings: ctx.warnings,
            expected_due_date,
        })
    }

    fn due_date(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let days = self.config.engine.gestation_days;
        Duration::try_days(days)
            .and_then(|gestation| from.checked_add_signed(gestation))
            .ok_or_else(|| {
                BreedingError::InvalidConfig(format!("gestation_days out of range: {days}"))
            })
    }
}

/// Resolve both animals and check they can be paired.
pub(crate) fn validate_pairing<'a>(
    sire_id: &str,
    dam_id: &str,
    herd: &'a HerdSnapshot,
) -> Result<(&'a Animal, &'a Animal)> {
    if sire_id == dam_id {
        return Err(BreedingError::SelfPairing {
            id: sire_id.to_string(),
        });
    }

    let sire = herd.get(sire_id).ok_or_else(|| BreedingError::AnimalNotFound {
        id: sire_id.to_string(),
    })?;
    let dam = herd.get(dam_id).ok_or_else(|| BreedingError::AnimalNotFound {
        id: dam_id.to_string(),
    })?;

    if sire.gender != Gender::Male {
        return Err(BreedingError::RoleMismatch {
            id: sire_id.to_string(),
            expected: Gender::Male,
        });
    }
    if dam.gender != Gender::Female {
        return Err(BreedingError::RoleMismatch {
            id: dam_id.to_string(),
            expected: Gender::Female,
        });
    }

    Ok((sire, dam))
}

/// Simulate a pairing with the default configuration.
pub fn simulate_breeding(
    sire_id: &str,
    dam_id: &str,
    herd: &HerdSnapshot,
    required_generations: usize,
) -> Result<BreedingSimulationResult> {
    let config = BreedingConfig::default().with_required_generations(required_generations);
    BreedingSimulator::with_config(config).simulate(sire_id, dam_id, herd)
}
