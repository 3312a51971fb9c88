//! Herd data collaborators.
//!
//! The breeding core never reads a store itself. A [`HerdProvider`] hands it
//! the active animals of a farm; the core turns them into a [`HerdSnapshot`]
//! and works on that snapshot only.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::herd::HerdSnapshot;
use crate::types::Animal;

/// Error types for herd data retrieval.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Farm or herd is unknown to the store
    #[error("Farm not found: {0}")]
    FarmNotFound(String),

    /// Store could not be reached
    #[error("Herd store unavailable: {0}")]
    Unavailable(String),

    /// A record could not be decoded into an animal
    #[error("Invalid herd record: {0}")]
    InvalidRecord(String),
}

/// Source of herd data (database, API, fixture).
#[async_trait]
pub trait HerdProvider: Send + Sync {
    /// All active animals for a farm/herd.
    async fn animals(&self, farm_id: &str) -> Result<Vec<Animal>, ProviderError>;

    /// One animal by id, if it exists anywhere in the store.
    async fn animal(&self, animal_id: &str) -> Result<Option<Animal>, ProviderError>;

    /// Fresh snapshot of a farm's herd.
    async fn snapshot(&self, farm_id: &str) -> Result<HerdSnapshot, ProviderError> {
        let animals = self.animals(farm_id).await?;
        tracing::debug!(farm_id = %farm_id, animals = animals.len(), "Loaded herd snapshot");
        Ok(HerdSnapshot::new(animals))
    }
}

/// In-process herd store.
///
/// Used for tests and for embedding the breeding core where herd data is
/// already in memory.
#[derive(Default)]
pub struct InMemoryHerdProvider {
    farms: DashMap<String, Vec<Animal>>,
}

impl InMemoryHerdProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the herd of a farm.
    pub fn insert_farm(&self, farm_id: impl Into<String>, animals: Vec<Animal>) {
        self.farms.insert(farm_id.into(), animals);
    }

    /// Insert or replace a single animal on a farm.
    pub fn upsert_animal(&self, farm_id: &str, animal: Animal) {
        let mut herd = self.farms.entry(farm_id.to_string()).or_default();
        if let Some(pos) = herd.iter().position(|a| a.id == animal.id) {
            herd[pos] = animal;
        } else {
            herd.push(animal);
        }
    }

    /// Load a farm's herd from a JSON array of animals.
    ///
    /// Returns the number of animals loaded.
    pub fn load_json(&self, farm_id: &str, json: &str) -> Result<usize, ProviderError> {
        let animals: Vec<Animal> =
            serde_json::from_str(json).map_err(|e| ProviderError::InvalidRecord(e.to_string()))?;
        let count = animals.len();
        self.insert_farm(farm_id, animals);
        Ok(count)
    }
}

#[async_trait]
impl HerdProvider for InMemoryHerdProvider {
    async fn animals(&self, farm_id: &str) -> Result<Vec<Animal>, ProviderError> {
        self.farms
            .get(farm_id)
            .map(|herd| herd.value().clone())
            .ok_or_else(|| ProviderError::FarmNotFound(farm_id.to_string()))
    }

    async fn animal(&self, animal_id: &str) -> Result<Option<Animal>, ProviderError> {
        Ok(self
            .farms
            .iter()
            .find_map(|herd| herd.value().iter().find(|a| a.id == animal_id).cloned()))
    }
}
