//! Sire × dam compatibility matrix.
//!
//! Every cell is an independent simulation over the same read-only snapshot
//! and statistics, so cells are computed in parallel.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use herdbook::{Gender, HerdSnapshot};
use morphometrics::HerdStatisticsSnapshot;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::Result;
use crate::score::{Recommendation, ScoreStatus};
use crate::simulation::BreedingSimulator;

/// Summary of one simulated pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CompatibilityCell {
    pub sire_id: String,
    pub dam_id: String,
    pub score: Option<f64>,
    pub confidence: f64,
    pub status: ScoreStatus,
    pub recommendation: Recommendation,
    pub inbreeding_coefficient: Option<f64>,
    pub warnings: usize,
}

impl BreedingSimulator {
    /// Simulate every sire × dam combination.
    ///
    /// Self-pairings are skipped. Cells are sorted by descending score with
    /// non-computable cells last; equal scores keep input order.
    pub fn compatibility_matrix(
        &self,
        sire_ids: &[String],
        dam_ids: &[String],
        herd: &HerdSnapshot,
        stats: &HerdStatisticsSnapshot,
    ) -> Result<Vec<CompatibilityCell>> {
        let pairs: Vec<(&str, &str)> = sire_ids
            .iter()
            .flat_map(|sire| dam_ids.iter().map(move |dam| (sire.as_str(), dam.as_str())))
            .filter(|(sire, dam)| sire != dam)
            .collect();

        let mut cells = pairs
            .par_iter()
            .map(|(sire_id, dam_id)| -> Result<CompatibilityCell> {
                let result = self.simulate_with_stats(sire_id, dam_id, herd, stats)?;
                Ok(CompatibilityCell {
                    sire_id: result.sire_id,
                    dam_id: result.dam_id,
                    score: result.score.value,
                    confidence: result.score.confidence,
                    status: result.score.status,
                    recommendation: result.score.recommendation,
                    inbreeding_coefficient: result.inbreeding.coefficient,
                    warnings: result.warnings.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        cells.sort_by(|a, b| by_score_desc(a.score, b.score));

        info!(
            sires = sire_ids.len(),
            dams = dam_ids.len(),
            cells = cells.len(),
            "Compatibility matrix complete"
        );

        Ok(cells)
    }

    /// Matrix of every male against every female in the herd.
    pub fn herd_compatibility_matrix(
        &self,
        herd: &HerdSnapshot,
        stats: &HerdStatisticsSnapshot,
    ) -> Result<Vec<CompatibilityCell>> {
        self.compatibility_matrix(
            &ids_with_gender(herd, Gender::Male),
            &ids_with_gender(herd, Gender::Female),
            herd,
            stats,
        )
    }
}

pub(crate) fn ids_with_gender(herd: &HerdSnapshot, gender: Gender) -> Vec<String> {
    herd.iter()
        .filter(|a| a.gender == gender)
        .map(|a| a.id.clone())
        .collect()
}

fn by_score_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
