//! Herd fixtures for test suites.
//!
//! Complete pedigrees get large quickly (a five-generation founder line is 63
//! animals), so tests describe herds in terms of founder lines and matings.

use crate::herd::HerdSnapshot;
use crate::types::{Animal, BodyTrait, Gender};

/// Incrementally builds a herd snapshot.
#[derive(Debug, Default, Clone)]
pub struct PedigreeBuilder {
    animals: Vec<Animal>,
}

impl PedigreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` together with a complete ancestry of `generations` generations.
    ///
    /// Ancestors are named `{id}.s` / `{id}.d` recursively and are unrelated
    /// to any other founder line. The top generation has no parents, so the
    /// animal's pedigree depth is exactly `generations`.
    pub fn founder_line(&mut self, id: &str, gender: Gender, generations: usize) -> &mut Self {
        let mut animal = Animal::new(id, gender);
        if generations > 0 {
            let sire = format!("{id}.s");
            let dam = format!("{id}.d");
            self.founder_line(&sire, Gender::Male, generations - 1);
            self.founder_line(&dam, Gender::Female, generations - 1);
            animal = animal.with_parents(sire, dam);
        }
        self.animals.push(animal);
        self
    }

    /// Add an offspring of two animals.
    pub fn offspring(&mut self, id: &str, gender: Gender, sire: &str, dam: &str) -> &mut Self {
        self.animals
            .push(Animal::new(id, gender).with_parents(sire, dam));
        self
    }

    /// Add an arbitrary animal.
    pub fn animal(&mut self, animal: Animal) -> &mut Self {
        self.animals.push(animal);
        self
    }

    /// Set a static measurement on an animal already added.
    pub fn measure(&mut self, id: &str, body_trait: BodyTrait, value: f64) -> &mut Self {
        if let Some(animal) = self.animals.iter_mut().find(|a| a.id == id) {
            *animal = animal.clone().with_static(body_trait, value);
        }
        self
    }

    /// Set the same static measurement on every animal whose id starts with `prefix`.
    pub fn measure_all(&mut self, prefix: &str, body_trait: BodyTrait, value: f64) -> &mut Self {
        for animal in self.animals.iter_mut().filter(|a| a.id.starts_with(prefix)) {
            *animal = animal.clone().with_static(body_trait, value);
        }
        self
    }

    pub fn build(&self) -> HerdSnapshot {
        HerdSnapshot::new(self.animals.clone())
    }
}
