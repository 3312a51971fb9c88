//! Herd-level statistics.
//!
//! Per-trait mean and sample standard deviation over the animals that have
//! a valid measurement, plus the normalisation helpers used to place one
//! animal within that distribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use herdbook::{BodyTrait, HerdSnapshot};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::animal::{score_animal_morphometrics, Classification};
use crate::config::ScoringWeights;

/// Z-score range mapped onto 0-100 by [`normalize_z_score`].
const Z_RANGE: f64 = 3.0;

/// Mean and spread of one trait across a herd.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TraitStatistics {
    pub mean: f64,
    /// Sample standard deviation (N-1); 0 with fewer than two samples
    pub std_dev: f64,
    pub sample_count: usize,
}

impl TraitStatistics {
    /// Statistics over a set of valid measurements.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: sample_std_dev(values),
            sample_count: values.len(),
        }
    }

    /// Statistics of one trait over a herd.
    pub fn for_herd(herd: &HerdSnapshot, body_trait: BodyTrait) -> Self {
        Self::from_values(&herd.trait_values(body_trait))
    }

    /// Mean, absent when no animal was measured.
    pub fn mean(&self) -> Option<f64> {
        (self.sample_count > 0).then_some(self.mean)
    }
}

/// Share of herd animals per classification tier, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ClassificationDistribution {
    pub elite: f64,
    pub tres_bon: f64,
    pub moyen: f64,
    pub faible: f64,
    /// Animals with at least one usable measurement
    pub scored_animals: usize,
}

impl ClassificationDistribution {
    fn from_counts(counts: [usize; 4]) -> Self {
        let total: usize = counts.iter().sum();
        if total == 0 {
            return Self::default();
        }
        let pct = |n: usize| round_to(n as f64 * 100.0 / total as f64, 1);
        Self {
            elite: pct(counts[0]),
            tres_bon: pct(counts[1]),
            moyen: pct(counts[2]),
            faible: pct(counts[3]),
            scored_animals: total,
        }
    }

    pub fn get(&self, classification: Classification) -> f64 {
        match classification {
            Classification::Elite => self.elite,
            Classification::TresBon => self.tres_bon,
            Classification::Moyen => self.moyen,
            Classification::Faible => self.faible,
        }
    }
}

/// Statistics of a whole herd at one point in time.
///
/// `version` is the herd fingerprint the statistics were computed from, so a
/// cache can tell when they no longer describe the herd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct HerdStatisticsSnapshot {
    pub mass: TraitStatistics,
    pub height: TraitStatistics,
    pub length: TraitStatistics,
    pub chest: TraitStatistics,
    /// Number of animals in the herd, measured or not
    pub count: usize,
    pub distribution: ClassificationDistribution,
    pub version: String,
    pub last_updated: DateTime<Utc>,
}

impl HerdStatisticsSnapshot {
    /// Compute statistics with the default scoring weights.
    pub fn compute(herd: &HerdSnapshot) -> Self {
        Self::compute_with_weights(herd, &ScoringWeights::default())
    }

    /// Compute statistics; `weights` drive the classification distribution.
    pub fn compute_with_weights(herd: &HerdSnapshot, weights: &ScoringWeights) -> Self {
        let mut stats = Self {
            mass: TraitStatistics::for_herd(herd, BodyTrait::Mass),
            height: TraitStatistics::for_herd(herd, BodyTrait::Height),
            length: TraitStatistics::for_herd(herd, BodyTrait::Length),
            chest: TraitStatistics::for_herd(herd, BodyTrait::Chest),
            count: herd.len(),
            distribution: ClassificationDistribution::default(),
            version: herd.fingerprint(),
            last_updated: Utc::now(),
        };

        let mut counts = [0usize; 4];
        for animal in herd.iter() {
            let score = score_animal_morphometrics(animal, &stats, weights);
            if score.available_metrics == 0 {
                continue;
            }
            let slot = match score.classification {
                Classification::Elite => 0,
                Classification::TresBon => 1,
                Classification::Moyen => 2,
                Classification::Faible => 3,
            };
            counts[slot] += 1;
        }
        stats.distribution = ClassificationDistribution::from_counts(counts);

        tracing::debug!(
            animals = stats.count,
            scored = stats.distribution.scored_animals,
            version = %stats.version,
            "Computed herd statistics"
        );

        stats
    }

    pub fn trait_stats(&self, body_trait: BodyTrait) -> &TraitStatistics {
        match body_trait {
            BodyTrait::Mass => &self.mass,
            BodyTrait::Height => &self.height,
            BodyTrait::Length => &self.length,
            BodyTrait::Chest => &self.chest,
        }
    }

    /// Herd mean of a trait, absent when nobody was measured.
    pub fn mean(&self, body_trait: BodyTrait) -> Option<f64> {
        self.trait_stats(body_trait).mean()
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 denominator); 0 with fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Distance from the mean in standard deviations; 0 when there is no spread.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    (value - mean) / std_dev
}

/// Standard normal CDF (Abramowitz & Stegun 26.2.17, |error| < 7.5e-8).
pub fn normal_cdf(z: f64) -> f64 {
    const P: f64 = 0.231_641_9;
    const B1: f64 = 0.319_381_530;
    const B2: f64 = -0.356_563_782;
    const B3: f64 = 1.781_477_937;
    const B4: f64 = -1.821_255_978;
    const B5: f64 = 1.330_274_429;
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

    let t = 1.0 / (1.0 + P * z.abs());
    let density = INV_SQRT_2PI * (-z * z / 2.0).exp();
    let poly = t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
    let upper_tail = density * poly;

    if z >= 0.0 {
        1.0 - upper_tail
    } else {
        upper_tail
    }
}

/// Percentile rank (0-100) of a z-score under a normal distribution.
pub fn percentile(z: f64) -> u8 {
    (normal_cdf(z) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Map a z-score linearly from [-3, +3] onto [0, 100], clamped.
pub fn normalize_z_score(z: f64) -> f64 {
    ((z + Z_RANGE) / (2.0 * Z_RANGE) * 100.0).clamp(0.0, 100.0)
}

/// Weight-normalised mean of `(value, weight)` pairs; 0 if total weight is 0.
pub fn weighted_average(pairs: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return 0.0;
    }
    pairs.iter().map(|(v, w)| v * w).sum::<f64>() / total_weight
}

/// Round to a number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook::testing::PedigreeBuilder;
    use herdbook::{Animal, Gender};

    #[test]
    fn test_mean_and_sample_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        // population sd is 2.0; sample sd is sqrt(32/7)
        assert!((sample_std_dev(&values) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_samples() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[42.0]), 0.0);
        assert_eq!(TraitStatistics::from_values(&[]).mean(), None);
        assert_eq!(TraitStatistics::from_values(&[42.0]).mean(), Some(42.0));
    }

    #[test]
    fn test_z_score() {
        assert_eq!(z_score(110.0, 100.0, 5.0), 2.0);
        assert_eq!(z_score(90.0, 100.0, 5.0), -2.0);
        assert_eq!(z_score(130.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn test_normal_cdf_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.0) - 0.841_344_746).abs() < 1e-7);
        assert!((normal_cdf(-1.96) - 0.024_997_895).abs() < 1e-7);
        assert!((normal_cdf(3.0) - 0.998_650_102).abs() < 1e-7);
    }

    #[test]
    fn test_percentile() {
        assert_eq!(percentile(0.0), 50);
        assert_eq!(percentile(1.0), 84);
        assert_eq!(percentile(-1.0), 16);
        assert_eq!(percentile(8.0), 100);
        assert_eq!(percentile(-8.0), 0);
    }

    #[test]
    fn test_normalize_z_score() {
        assert_eq!(normalize_z_score(0.0), 50.0);
        assert_eq!(normalize_z_score(3.0), 100.0);
        assert_eq!(normalize_z_score(-3.0), 0.0);
        assert_eq!(normalize_z_score(1.5), 75.0);
        assert_eq!(normalize_z_score(9.0), 100.0);
        assert_eq!(normalize_z_score(-4.0), 0.0);
    }

    #[test]
    fn test_weighted_average() {
        assert_eq!(weighted_average(&[(80.0, 0.3), (40.0, 0.1)]), 70.0);
        assert_eq!(weighted_average(&[(80.0, 0.0)]), 0.0);
        assert_eq!(weighted_average(&[]), 0.0);
    }

    #[test]
    fn test_herd_statistics_skip_unmeasured() {
        let herd = HerdSnapshot::new(vec![
            Animal::new("A", Gender::Female).with_static(BodyTrait::Height, 90.0),
            Animal::new("B", Gender::Female).with_static(BodyTrait::Height, 100.0),
            Animal::new("C", Gender::Male).with_static(BodyTrait::Height, -1.0),
            Animal::new("D", Gender::Male),
        ]);
        let stats = HerdStatisticsSnapshot::compute(&herd);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.height.sample_count, 2);
        assert_eq!(stats.mean(BodyTrait::Height), Some(95.0));
        assert!((stats.height.std_dev - 50f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.mean(BodyTrait::Chest), None);
        assert_eq!(stats.version, herd.fingerprint());
    }

    #[test]
    fn test_distribution_over_scored_animals() {
        let mut builder = PedigreeBuilder::new();
        for (i, height) in [80.0, 90.0, 100.0, 110.0, 120.0].iter().enumerate() {
            let id = format!("E{i}");
            builder
                .animal(Animal::new(&id, Gender::Female))
                .measure(&id, BodyTrait::Height, *height);
        }
        builder.animal(Animal::new("UNMEASURED", Gender::Female));
        let stats = HerdStatisticsSnapshot::compute(&builder.build());

        let d = stats.distribution;
        assert_eq!(d.scored_animals, 5);
        let total = d.elite + d.tres_bon + d.moyen + d.faible;
        assert!((total - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_empty_herd_distribution() {
        let stats = HerdStatisticsSnapshot::compute(&HerdSnapshot::default());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.distribution, ClassificationDistribution::default());
    }
}
