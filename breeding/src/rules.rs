//! Expert rules over a breeding context.
//!
//! Rules are plain values: a predicate, a consequence and some metadata.
//! The standard set is built once and shared; the engine makes a single
//! pass over it in ascending priority order.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use genetics::PedigreeStatus;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::context::BreedingContext;
use crate::score::{QualifiedBreedingScore, Recommendation, ScoreStatus};

/// A rule in the rule engine.
#[derive(Debug, Clone)]
pub struct ExpertRule {
    /// Unique rule ID
    pub id: &'static str,
    /// Rule name
    pub name: &'static str,
    /// Priority (lower = evaluated first)
    pub priority: u8,
    /// Stop processing further rules once this one fires
    pub terminal: bool,
    pub explanation: &'static str,
    pub condition: fn(&BreedingContext) -> bool,
    pub consequence: fn(&mut BreedingContext),
}

/// Record of a rule that fired during a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AppliedRule {
    pub rule_id: String,
    pub name: String,
    pub priority: u8,
    pub explanation: String,
}

impl From<&ExpertRule> for AppliedRule {
    fn from(rule: &ExpertRule) -> Self {
        Self {
            rule_id: rule.id.to_string(),
            name: rule.name.to_string(),
            priority: rule.priority,
            explanation: rule.explanation.to_string(),
        }
    }
}

/// Ordered set of expert rules.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<ExpertRule>,
}

impl RuleEngine {
    /// Create a new empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard breeding rules, built on first use.
    pub fn standard() -> &'static RuleEngine {
        static STANDARD: OnceLock<RuleEngine> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut engine = RuleEngine::new();
            for rule in standard_rules() {
                engine.add_rule(rule);
            }
            engine
        })
    }

    /// Add a rule.
    pub fn add_rule(&mut self, rule: ExpertRule) {
        self.rules.push(rule);
        // Sort by priority (ascending), stable for equal priorities
        self.rules.sort_by_key(|r| r.priority);
    }

    /// Apply matching rules to the context, in priority order.
    pub fn apply(&self, ctx: &mut BreedingContext) {
        for rule in &self.rules {
            if !(rule.condition)(ctx) {
                continue;
            }

            debug!(
                rule_id = %rule.id,
                rule_name = %rule.name,
                priority = rule.priority,
                "Rule matched"
            );

            (rule.consequence)(ctx);
            ctx.applied_rules.push(AppliedRule::from(rule));

            if rule.terminal {
                break;
            }
        }
    }

    /// Get rule count.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[ExpertRule] {
        &self.rules
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// R4, R1, R2, R3, R5 in evaluation order.
pub fn standard_rules() -> Vec<ExpertRule> {
    vec![
        ExpertRule {
            id: "R4",
            name: "NOT_COMPUTABLE",
            priority: 0,
            terminal: true,
            explanation: "Neither inbreeding nor morphometrics could be evaluated",
            condition: |ctx| {
                ctx.coefficient().is_none() && ctx.morphometrics.overall_score.is_none()
            },
            consequence: |ctx| {
                ctx.score = QualifiedBreedingScore::not_computable(
                    "Not enough pedigree or measurement data to evaluate this pairing",
                );
                ctx.warn("No usable pedigree or measurements for this pairing");
            },
        },
        ExpertRule {
            id: "R1",
            name: "INSUFFICIENT_PEDIGREE",
            priority: 1,
            terminal: false,
            explanation: "Pedigree too shallow to compute inbreeding",
            condition: |ctx| ctx.inbreeding.status != PedigreeStatus::Computable,
            consequence: |ctx| {
                ctx.score.downgrade();
                let warning = format!(
                    "Incomplete pedigree: {} of {} required generations available",
                    ctx.inbreeding.available_generations, ctx.inbreeding.required_generations
                );
                ctx.warn(warning);
            },
        },
        ExpertRule {
            id: "R2",
            name: "HIGH_INBREEDING",
            priority: 2,
            terminal: false,
            explanation: "Inbreeding coefficient at or above the high-risk threshold",
            condition: |ctx| {
                ctx.coefficient()
                    .is_some_and(|c| c >= ctx.thresholds.high_inbreeding)
            },
            consequence: |ctx| {
                ctx.score.recommendation = Recommendation::NotRecommended;
                ctx.score.status = ScoreStatus::Reliable;
                let pct = ctx.inbreeding.percentage().unwrap_or_default();
                ctx.warn(format!("High inbreeding: {pct:.2}% expected for offspring"));
            },
        },
        ExpertRule {
            id: "R3",
            name: "LOW_MORPHOMETRIC_CONFIDENCE",
            priority: 3,
            terminal: false,
            explanation: "Offspring traits predicted with low confidence",
            condition: |ctx| {
                ctx.morphometric_confidence() < ctx.thresholds.low_morphometric_confidence
            },
            consequence: |ctx| {
                ctx.score.downgrade();
                let weak: Vec<&str> = ctx
                    .morphometrics
                    .weak_traits(ctx.thresholds.low_morphometric_confidence)
                    .iter()
                    .map(|t| t.as_str())
                    .collect();
                ctx.warn(format!(
                    "Low morphometric confidence; weak traits: {}",
                    weak.join(", ")
                ));
            },
        },
        ExpertRule {
            id: "R5",
            name: "EXCELLENT_REQUIRES_ALL",
            priority: 4,
            terminal: false,
            explanation: "Excellent requires known inbreeding and reliable morphometrics",
            condition: |ctx| {
                ctx.raw_recommendation() == Recommendation::Excellent
                    && (ctx.coefficient().is_none()
                        || ctx.morphometric_confidence() < ctx.thresholds.reliable_confidence)
            },
            consequence: |ctx| {
                ctx.score.recommendation = Recommendation::Good;
                ctx.score.status = ScoreStatus::LowConfidence;
                ctx.warn("Rated Good rather than Excellent: pedigree or measurements incomplete");
            },
        },
    ]
}
