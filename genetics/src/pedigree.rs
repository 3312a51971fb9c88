//! Pedigree traversal over a herd snapshot.
//!
//! The snapshot is an adjacency lookup (animal id -> sire/dam ids). Nothing
//! here assumes the pedigree is acyclic: every traversal carries an explicit
//! generation counter and stops at `max_depth`, which bounds both recursion
//! and path explosion.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use herdbook::{Animal, HerdSnapshot};

/// Hard cap on the number of generations any traversal looks at.
pub const MAX_PEDIGREE_DEPTH: usize = 5;

/// Resolved parents of an animal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parents<'a> {
    pub sire: Option<&'a Animal>,
    pub dam: Option<&'a Animal>,
}

impl<'a> Parents<'a> {
    /// Both parents resolvable.
    pub fn is_complete(&self) -> bool {
        self.sire.is_some() && self.dam.is_some()
    }
}

/// Resolved grandparents of an animal. Each slot may be absent through
/// either parental line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grandparents<'a> {
    pub paternal_grandsire: Option<&'a Animal>,
    pub paternal_granddam: Option<&'a Animal>,
    pub maternal_grandsire: Option<&'a Animal>,
    pub maternal_granddam: Option<&'a Animal>,
}

impl<'a> Grandparents<'a> {
    /// Ids of the resolvable grandparents.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> {
        [
            self.paternal_grandsire,
            self.paternal_granddam,
            self.maternal_grandsire,
            self.maternal_granddam,
        ]
        .into_iter()
        .flatten()
        .map(|a| a.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids().any(|gp| gp == id)
    }
}

/// Navigates parent links among the animals of one snapshot.
pub struct PedigreeResolver<'a> {
    herd: &'a HerdSnapshot,
    max_depth: usize,
}

impl<'a> PedigreeResolver<'a> {
    /// Create a resolver with the default generation cap.
    pub fn new(herd: &'a HerdSnapshot) -> Self {
        Self::with_max_depth(herd, MAX_PEDIGREE_DEPTH)
    }

    /// Create a resolver with a custom generation cap.
    pub fn with_max_depth(herd: &'a HerdSnapshot, max_depth: usize) -> Self {
        Self { herd, max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolve sire and dam of an animal.
    pub fn parents(&self, id: &str) -> Parents<'a> {
        match self.herd.get(id) {
            Some(animal) => self.parents_of(animal),
            None => Parents::default(),
        }
    }

    /// Resolve the four grandparents of an animal.
    pub fn grandparents(&self, id: &str) -> Grandparents<'a> {
        let parents = self.parents(id);
        let paternal = parents.sire.map(|s| self.parents_of(s)).unwrap_or_default();
        let maternal = parents.dam.map(|d| self.parents_of(d)).unwrap_or_default();

        Grandparents {
            paternal_grandsire: paternal.sire,
            paternal_granddam: paternal.dam,
            maternal_grandsire: maternal.sire,
            maternal_granddam: maternal.dam,
        }
    }

    /// Whether `parent_id` is the resolvable sire or dam of `child_id`.
    pub fn is_parent_of(&self, parent_id: &str, child_id: &str) -> bool {
        let parents = self.parents(child_id);
        [parents.sire, parents.dam]
            .into_iter()
            .flatten()
            .any(|p| p.id == parent_id)
    }

    /// Whether `grandparent_id` fills any of the four grandparent slots of `grandchild_id`.
    pub fn is_grandparent_of(&self, grandparent_id: &str, grandchild_id: &str) -> bool {
        self.grandparents(grandchild_id).contains(grandparent_id)
    }

    /// Number of consecutive complete generations behind an animal.
    ///
    /// A generation is complete when every individual in the generation
    /// below it has both parents resolvable. Counting stops at the first
    /// incomplete generation or at the generation cap. Unknown ids have
    /// depth 0.
    pub fn depth(&self, id: &str) -> usize {
        let Some(root) = self.herd.get(id) else {
            return 0;
        };

        let mut generation: Vec<&'a Animal> = vec![root];
        let mut depth = 0;

        while depth < self.max_depth {
            let mut next = Vec::with_capacity(generation.len() * 2);
            for animal in &generation {
                match (self.sire_of(animal), self.dam_of(animal)) {
                    (Some(sire), Some(dam)) => {
                        next.push(sire);
                        next.push(dam);
                    }
                    _ => return depth,
                }
            }
            depth += 1;
            generation = next;
        }

        depth
    }

    /// Every ancestor within the generation cap, mapped to the nearest
    /// generation it appears in.
    ///
    /// The animal itself is included at generation 0, so that an animal that
    /// is an ancestor of its mate is found as a common ancestor.
    pub fn ancestors(&self, id: &str) -> HashMap<&'a str, usize> {
        let mut seen = HashMap::new();
        let Some(root) = self.herd.get(id) else {
            return seen;
        };

        seen.insert(root.id.as_str(), 0);
        let mut frontier = vec![root];

        for generation in 1..=self.max_depth {
            let mut next = Vec::new();
            for animal in frontier {
                for parent in self.parent_list(animal) {
                    if let Entry::Vacant(slot) = seen.entry(parent.id.as_str()) {
                        slot.insert(generation);
                        next.push(parent);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        seen
    }

    /// Ancestors shared by two animals, within the generation cap.
    pub fn common_ancestors(&self, a: &str, b: &str) -> BTreeSet<&'a str> {
        let of_a = self.ancestors(a);
        let of_b = self.ancestors(b);

        of_a.into_keys().filter(|id| of_b.contains_key(id)).collect()
    }

    /// All simple paths from an animal up to one of its ancestors.
    ///
    /// Each path starts at `from`, ends at `ancestor` and follows sire/dam
    /// edges; no individual appears twice in a path and no path has more
    /// than `max_depth` edges. When `from == ancestor` the single path is
    /// `[from]`.
    pub fn paths_to(&self, from: &str, ancestor: &str) -> Vec<Vec<&'a str>> {
        let mut paths = Vec::new();
        let Some(start) = self.herd.get(from) else {
            return paths;
        };

        let mut path = vec![start.id.as_str()];
        self.walk_up(start, ancestor, &mut path, &mut paths);
        paths
    }

    fn walk_up(
        &self,
        current: &'a Animal,
        target: &str,
        path: &mut Vec<&'a str>,
        paths: &mut Vec<Vec<&'a str>>,
    ) {
        if current.id == target {
            paths.push(path.clone());
            return;
        }
        // path.len() - 1 edges walked so far
        if path.len() > self.max_depth {
            return;
        }

        for parent in self.parent_list(current) {
            if path.contains(&parent.id.as_str()) {
                continue;
            }
            path.push(parent.id.as_str());
            self.walk_up(parent, target, path, paths);
            path.pop();
        }
    }

    fn parents_of(&self, animal: &Animal) -> Parents<'a> {
        Parents {
            sire: self.sire_of(animal),
            dam: self.dam_of(animal),
        }
    }

    fn sire_of(&self, animal: &Animal) -> Option<&'a Animal> {
        animal.sire_id.as_deref().and_then(|id| self.herd.get(id))
    }

    fn dam_of(&self, animal: &Animal) -> Option<&'a Animal> {
        animal.dam_id.as_deref().and_then(|id| self.herd.get(id))
    }

    /// Resolvable parents, with a sire recorded twice counted once.
    fn parent_list(&self, animal: &Animal) -> Vec<&'a Animal> {
        let mut list = Vec::with_capacity(2);
        if let Some(sire) = self.sire_of(animal) {
            list.push(sire);
        }
        if let Some(dam) = self.dam_of(animal) {
            if list.first().map_or(true, |s| s.id != dam.id) {
                list.push(dam);
            }
        }
        list
    }
}

/// Pedigree depth of an animal, capped at `max_depth`.
pub fn pedigree_depth(animal_id: &str, herd: &HerdSnapshot, max_depth: usize) -> usize {
    PedigreeResolver::with_max_depth(herd, max_depth).depth(animal_id)
}
