//! BreedingService - entry point for herd-backed breeding decisions.
//!
//! Fetches a fresh herd snapshot from the [`HerdProvider`] for every call,
//! reuses cached herd statistics while they still describe that herd, and
//! delegates the computation to a [`BreedingSimulator`].

use std::sync::Arc;

use tracing::{debug, warn};

use herdbook::{Gender, HerdProvider, HerdSnapshot};
use morphometrics::{score_animal_morphometrics, AnimalMorphometricScore, HerdStatisticsSnapshot};

use crate::cache::StatisticsCache;
use crate::config::BreedingConfig;
use crate::error::{BreedingError, Result};
use crate::matrix::{ids_with_gender, CompatibilityCell};
use crate::simulation::{BreedingSimulationResult, BreedingSimulator};

/// Async facade over the herd provider, statistics cache and simulator.
pub struct BreedingService {
    /// Source of herd data
    provider: Arc<dyn HerdProvider>,
    /// Optional herd statistics cache
    cache: Option<Arc<dyn StatisticsCache>>,
    /// Simulator carrying the configuration
    simulator: Arc<BreedingSimulator>,
}

impl BreedingService {
    /// Create a service over a herd provider with default configuration.
    pub fn new(provider: Arc<dyn HerdProvider>) -> Self {
        Self {
            provider,
            cache: None,
            simulator: Arc::new(BreedingSimulator::new()),
        }
    }

    /// Use a statistics cache.
    pub fn with_cache(mut self, cache: Arc<dyn StatisticsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: BreedingConfig) -> Self {
        self.simulator = Arc::new(BreedingSimulator::with_config(config));
        self
    }

    pub fn config(&self) -> &BreedingConfig {
        self.simulator.config()
    }

    async fn snapshot(&self, farm_id: &str) -> Result<HerdSnapshot> {
        self.provider.snapshot(farm_id).await.map_err(|e| {
            warn!(farm_id = %farm_id, error = %e, "Herd provider failed");
            BreedingError::from(e)
        })
    }

    /// Statistics for a herd, from the cache when they match its fingerprint.
    async fn statistics_for(&self, farm_id: &str, herd: &HerdSnapshot) -> HerdStatisticsSnapshot {
        let fingerprint = herd.fingerprint();

        if let Some(cache) = &self.cache {
            match cache.get(farm_id).await {
                Some(cached) if cached.version == fingerprint => return cached,
                Some(_) => {
                    debug!(farm_id = %farm_id, "Cached statistics describe another herd version");
                    cache.invalidate(farm_id).await;
                }
                None => debug!(farm_id = %farm_id, "Statistics cache miss"),
            }
        }

        let stats = HerdStatisticsSnapshot::compute_with_weights(
            herd,
            &self.simulator.config().morphometrics.weights,
        );
        if let Some(cache) = &self.cache {
            cache.put(farm_id, stats.clone()).await;
        }
        stats
    }

    /// Current herd statistics for a farm.
    pub async fn herd_statistics(&self, farm_id: &str) -> Result<HerdStatisticsSnapshot> {
        let herd = self.snapshot(farm_id).await?;
        Ok(self.statistics_for(farm_id, &herd).await)
    }

    /// Simulate a pairing within a farm's herd.
    pub async fn simulate(
        &self,
        farm_id: &str,
        sire_id: &str,
        dam_id: &str,
    ) -> Result<BreedingSimulationResult> {
        let herd = self.snapshot(farm_id).await?;
        let stats = self.statistics_for(farm_id, &herd).await;
        self.simulator
            .simulate_with_stats(sire_id, dam_id, &herd, &stats)
            .map_err(|e| {
                warn!(
                    farm_id = %farm_id,
                    sire_id = %sire_id,
                    dam_id = %dam_id,
                    error = %e,
                    "Simulation rejected"
                );
                e
            })
    }

    /// Score one animal against its herd.
    pub async fn score_animal(
        &self,
        farm_id: &str,
        animal_id: &str,
    ) -> Result<AnimalMorphometricScore> {
        let herd = self.snapshot(farm_id).await?;
        let stats = self.statistics_for(farm_id, &herd).await;
        let animal = herd.get(animal_id).ok_or_else(|| {
            warn!(farm_id = %farm_id, animal_id = %animal_id, "Animal not in herd");
            BreedingError::AnimalNotFound {
                id: animal_id.to_string(),
            }
        })?;
        Ok(score_animal_morphometrics(
            animal,
            &stats,
            &self.simulator.config().morphometrics.weights,
        ))
    }

    /// Compatibility matrix for a farm.
    ///
    /// An empty id list stands for every animal of that sex in the herd.
    pub async fn compatibility_matrix(
        &self,
        farm_id: &str,
        sire_ids: &[String],
        dam_ids: &[String],
    ) -> Result<Vec<CompatibilityCell>> {
        let herd = self.snapshot(farm_id).await?;
        let stats = self.statistics_for(farm_id, &herd).await;

        let simulator = Arc::clone(&self.simulator);
        let sire_ids = sire_ids.to_vec();
        let dam_ids = dam_ids.to_vec();

        // CPU-bound; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            let sire_ids = if sire_ids.is_empty() {
                ids_with_gender(&herd, Gender::Male)
            } else {
                sire_ids
            };
            let dam_ids = if dam_ids.is_empty() {
                ids_with_gender(&herd, Gender::Female)
            } else {
                dam_ids
            };
            simulator.compatibility_matrix(&sire_ids, &dam_ids, &herd, &stats)
        })
        .await
        .map_err(|e| BreedingError::Internal(e.to_string()))?
    }
}
