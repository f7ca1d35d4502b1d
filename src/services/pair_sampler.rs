//! Per-session sampling of positive pairs without replacement.
//!
//! Each relationship type keeps its own set of pairs already drawn this
//! session. When a type's pool is exhausted only that type's set is cleared,
//! so repeats resume for that type alone.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use super::catalog::StimulusCatalog;
use crate::domain::models::{RelationshipType, StimulusPair};

#[derive(Debug, Clone, Default)]
pub struct PairSampler {
    used: HashMap<RelationshipType, HashSet<StimulusPair>>,
}

impl PairSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a positive pair for `kind`, uniformly among the pairs not yet
    /// drawn this session. Recycles the type's pool once it is exhausted.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        catalog: &StimulusCatalog,
        kind: RelationshipType,
        rng: &mut R,
    ) -> Option<StimulusPair> {
        let pool = catalog.positive_pairs(kind);
        if pool.is_empty() {
            return None;
        }

        let used = self.used.entry(kind).or_default();
        let available: Vec<&StimulusPair> = pool.iter().filter(|pair| !used.contains(*pair)).collect();

        let chosen = if available.is_empty() {
            tracing::debug!(relationship = %kind, pool_size = pool.len(), "pair pool exhausted, recycling");
            used.clear();
            pool[rng.random_range(0..pool.len())].clone()
        } else {
            available[rng.random_range(0..available.len())].clone()
        };

        used.insert(chosen.clone());
        Some(chosen)
    }

    /// Forget every drawn pair. Called at session start and on level changes.
    pub fn reset(&mut self) {
        self.used.clear();
    }

    /// Number of pairs currently marked as drawn for `kind`.
    pub fn used_count(&self, kind: RelationshipType) -> usize {
        self.used.get(&kind).map_or(0, HashSet::len)
    }

    pub fn total_used(&self) -> usize {
        self.used.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_draws_are_distinct_until_exhausted() {
        let catalog = StimulusCatalog::builtin();
        let mut sampler = PairSampler::new();
        let mut rng = SmallRng::seed_from_u64(42);

        let kind = RelationshipType::Antonym;
        let size = catalog.pool_size(kind);
        let drawn: HashSet<StimulusPair> = (0..size)
            .map(|_| sampler.draw(&catalog, kind, &mut rng).unwrap())
            .collect();
        assert_eq!(drawn.len(), size);
        assert_eq!(sampler.used_count(kind), size);
    }

    #[test]
    fn test_exhaustion_recycles_only_that_type() {
        let catalog = StimulusCatalog::builtin();
        let mut sampler = PairSampler::new();
        let mut rng = SmallRng::seed_from_u64(9);

        for _ in 0..5 {
            sampler.draw(&catalog, RelationshipType::SameTime, &mut rng);
        }

        let kind = RelationshipType::PartWhole;
        let size = catalog.pool_size(kind);
        let mut seen = HashSet::new();
        let mut repeats = 0;
        for _ in 0..=size {
            let pair = sampler.draw(&catalog, kind, &mut rng).unwrap();
            if !seen.insert(pair) {
                repeats += 1;
            }
        }

        assert_eq!(repeats, 1);
        assert_eq!(sampler.used_count(kind), 1);
        assert_eq!(sampler.used_count(RelationshipType::SameTime), 5);
    }

    #[test]
    fn test_reset_clears_all_types() {
        let catalog = StimulusCatalog::builtin();
        let mut sampler = PairSampler::new();
        let mut rng = SmallRng::seed_from_u64(1);
        for kind in RelationshipType::ALL {
            sampler.draw(&catalog, kind, &mut rng);
        }
        assert_eq!(sampler.total_used(), RelationshipType::ALL.len());
        sampler.reset();
        assert_eq!(sampler.total_used(), 0);
    }
}
