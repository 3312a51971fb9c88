//! Immutable herd snapshot.
//!
//! A snapshot is handed to every calculation by the caller. It is never
//! mutated or persisted here; it only serves as an id-indexed adjacency
//! lookup (animal id -> parent ids) and as the measurement population.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{Animal, BodyTrait};

/// Read-only view over the animals of one herd.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Animal>", into = "Vec<Animal>")]
pub struct HerdSnapshot {
    animals: Vec<Animal>,
    index: HashMap<String, usize>,
}

impl HerdSnapshot {
    /// Build a snapshot. When an id appears twice the first record is kept.
    pub fn new(animals: Vec<Animal>) -> Self {
        let mut kept = Vec::with_capacity(animals.len());
        let mut index = HashMap::with_capacity(animals.len());

        for animal in animals {
            if index.contains_key(&animal.id) {
                tracing::debug!(
                    animal_id = %animal.id,
                    "Duplicate animal id in herd snapshot, ignoring"
                );
                continue;
            }
            index.insert(animal.id.clone(), kept.len());
            kept.push(animal);
        }

        Self {
            animals: kept,
            index,
        }
    }

    /// Look up an animal by id.
    pub fn get(&self, id: &str) -> Option<&Animal> {
        self.index.get(id).map(|&i| &self.animals[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All animals, in insertion order.
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter()
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Sire of an animal, only if it resolves within this snapshot.
    pub fn sire_of(&self, id: &str) -> Option<&Animal> {
        self.get(id)?.sire_id.as_deref().and_then(|s| self.get(s))
    }

    /// Dam of an animal, only if it resolves within this snapshot.
    pub fn dam_of(&self, id: &str) -> Option<&Animal> {
        self.get(id)?.dam_id.as_deref().and_then(|d| self.get(d))
    }

    /// Resolvable parent ids as `(sire, dam)`.
    pub fn parent_ids(&self, id: &str) -> (Option<&str>, Option<&str>) {
        (
            self.sire_of(id).map(|a| a.id.as_str()),
            self.dam_of(id).map(|a| a.id.as_str()),
        )
    }

    /// Latest valid value of a trait for an animal in this snapshot.
    pub fn latest_value(&self, id: &str, body_trait: BodyTrait) -> Option<f64> {
        self.get(id)?.latest_value(body_trait)
    }

    /// Latest valid values of a trait across the herd, one per measured animal.
    pub fn trait_values(&self, body_trait: BodyTrait) -> Vec<f64> {
        self.animals
            .iter()
            .filter_map(|a| a.latest_value(body_trait))
            .collect()
    }

    /// Content hash of the snapshot.
    ///
    /// Covers ids, resolvable parent links and latest trait values, in id
    /// order, so two snapshots with the same herd state hash identically
    /// regardless of the order animals were supplied in.
    pub fn fingerprint(&self) -> String {
        let mut ids: Vec<&str> = self.index.keys().map(String::as_str).collect();
        ids.sort_unstable();

        let mut hasher = Sha256::new();
        for id in ids {
            hasher.update(id.as_bytes());
            let (sire, dam) = self.parent_ids(id);
            hasher.update(sire.unwrap_or("-").as_bytes());
            hasher.update(dam.unwrap_or("-").as_bytes());
            for body_trait in BodyTrait::ALL {
                match self.latest_value(id, body_trait) {
                    Some(v) => hasher.update(v.to_le_bytes()),
                    None => hasher.update([0u8]),
                }
            }
        }

        hex::encode(hasher.finalize())
    }
}

impl From<Vec<Animal>> for HerdSnapshot {
    fn from(animals: Vec<Animal>) -> Self {
        Self::new(animals)
    }
}

impl From<HerdSnapshot> for Vec<Animal> {
    fn from(herd: HerdSnapshot) -> Self {
        herd.animals
    }
}

impl FromIterator<Animal> for HerdSnapshot {
    fn from_iter<I: IntoIterator<Item = Animal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
