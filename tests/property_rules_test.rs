//! Property tests for the difficulty, sampling and reconciliation rules.

use std::collections::HashSet;

use cognate::domain::models::{GameMode, PersistedProgress, RelationshipType, SessionOutcome};
use cognate::services::difficulty::{evaluate, SessionTally, LEVEL_DOWN_ERROR_THRESHOLD};
use cognate::services::{deadline_ms, PairSampler, StimulusCatalog};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn progress() -> impl Strategy<Value = PersistedProgress> {
    (1u32..40, 1u32..40, 0u32..61).prop_map(|(current, highest, best)| PersistedProgress::new(current, highest, best))
}

fn relationship() -> impl Strategy<Value = RelationshipType> {
    prop::sample::select(RelationshipType::ALL.to_vec())
}

proptest! {
    /// Response windows never grow as the level rises and never drop below 50 ms.
    #[test]
    fn prop_deadline_is_monotonic(level in 1u32..200) {
        prop_assert!(deadline_ms(level + 1) <= deadline_ms(level));
        prop_assert!(deadline_ms(level) >= 50);
    }

    /// Merged progress dominates both sources field by field.
    #[test]
    fn prop_merge_never_regresses(local in progress(), remote in progress()) {
        let merged = PersistedProgress::merge(local, Some(remote));
        prop_assert!(merged.current_level >= local.current_level.max(remote.current_level));
        prop_assert!(merged.highest_level_reached >= merged.current_level);
        prop_assert!(merged.highest_level_reached >= local.highest_level_reached.max(remote.highest_level_reached));
        prop_assert_eq!(merged.best_score, local.best_score.max(remote.best_score));
    }

    /// Committing can only move the stored level and highest level upward.
    #[test]
    fn prop_commit_is_monotonic(stored in progress(), level in 1u32..40, score in 0u32..31) {
        let next = stored.apply_commit(level, score);
        prop_assert!(next.current_level >= stored.current_level);
        prop_assert!(next.highest_level_reached >= stored.highest_level_reached);
        if level <= stored.current_level {
            prop_assert!(next.best_score >= stored.best_score);
        }
    }

    /// Within one pool cycle the sampler never repeats a positive pair.
    #[test]
    fn prop_sampler_does_not_repeat_within_a_cycle(kind in relationship(), seed in any::<u64>()) {
        let catalog = StimulusCatalog::builtin();
        let mut sampler = PairSampler::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut seen = HashSet::new();
        for _ in 0..catalog.pool_size(kind) {
            let pair = sampler.draw(&catalog, kind, &mut rng).unwrap();
            prop_assert!(catalog.is_positive(kind, &pair));
            prop_assert!(seen.insert(pair));
        }
    }

    /// Lookalike pairs are never in the positive pool.
    #[test]
    fn prop_lookalikes_are_negative(kind in relationship(), seed in any::<u64>()) {
        let catalog = StimulusCatalog::builtin();
        let mut rng = SmallRng::seed_from_u64(seed);
        let pair = catalog.generate_lookalike(kind, &mut rng);
        prop_assert!(!catalog.is_positive(kind, &pair));
    }

    /// Adaptive sessions with enough errors always level down, never below 1.
    #[test]
    fn prop_error_threshold_levels_down(level in 1u32..30, errors in LEVEL_DOWN_ERROR_THRESHOLD..31) {
        let outcome = evaluate(SessionTally {
            mode: GameMode::Adaptive,
            level,
            score: 30 - errors,
            error_count: errors,
            task_total: 30,
        });
        prop_assert_eq!(outcome, SessionOutcome::LevelDown { new_level: level.saturating_sub(1).max(1) });
    }
}
