//! Clause reachability over the possibility set
//!
//! Tracks the input regions not yet covered by earlier clauses, as a
//! disjoint region decomposition. Each clause either carves coverage out of
//! the tracked set, arrives after the set is already exhausted (a dead
//! clause), or overlaps none of the remaining regions (its guard can never
//! hold). The decomposition can grow combinatorially with many boolean or
//! nullable parameters; past a fixed budget tracking is abandoned and later
//! clauses get no verdict rather than a wrong one.

use crate::ast::{Region, ValueConstraint};

/// Hard cap on tracked regions before precise tracking is abandoned
pub const MAX_TRACKED_REGIONS: usize = 300;

/// Input space not yet covered by the clauses processed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PossibilitySet {
    /// Exact disjoint decomposition of the remaining input space
    Tracked(Vec<Region>),
    /// Tracking was abandoned at the region budget
    Unknown,
}

/// Reachability verdict for one clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStatus {
    /// The clause covers some still-possible input
    Reachable,
    /// Earlier clauses already cover every input
    Unreachable,
    /// Some input is still possible, but none of it satisfies this clause
    NeverSatisfied,
    /// No verdict: tracking was abandoned, or a prior clause was already
    /// found unreachable
    Unknown,
}

/// State machine over the possibility set, fed clauses in declaration order
pub struct ReachabilityEngine {
    possible: PossibilitySet,
    halted: bool,
}

impl ReachabilityEngine {
    /// Seed with the universal region of the target function's arity
    pub fn new(arity: usize) -> Self {
        Self {
            possible: PossibilitySet::Tracked(vec![Region::universal(arity)]),
            halted: false,
        }
    }

    /// Whether the region budget was hit and precise tracking abandoned
    pub fn abandoned(&self) -> bool {
        matches!(self.possible, PossibilitySet::Unknown)
    }

    pub fn possibility_set(&self) -> &PossibilitySet {
        &self.possible
    }

    /// Feed the next clause's constraint tuple
    pub fn observe(&mut self, constraints: &[ValueConstraint]) -> ClauseStatus {
        if self.halted {
            return ClauseStatus::Unknown;
        }
        let PossibilitySet::Tracked(regions) = &self.possible else {
            return ClauseStatus::Unknown;
        };

        if regions.is_empty() {
            // Every later clause would be dead as well; one verdict suffices
            self.halted = true;
            return ClauseStatus::Unreachable;
        }

        if regions.iter().all(|r| r.intersect(constraints).is_none()) {
            return ClauseStatus::NeverSatisfied;
        }

        let mut remaining = Vec::new();
        let mut overflow = false;
        'build: for region in regions {
            for sub in region.exclude(constraints) {
                remaining.push(sub);
                if remaining.len() >= MAX_TRACKED_REGIONS {
                    overflow = true;
                    break 'build;
                }
            }
        }
        self.possible = if overflow {
            PossibilitySet::Unknown
        } else {
            PossibilitySet::Tracked(remaining)
        };
        ClauseStatus::Reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ValueConstraint::*;

    #[test]
    fn test_fresh_engine_is_tracked() {
        let engine = ReachabilityEngine::new(2);
        assert!(!engine.abandoned());
        assert_eq!(
            engine.possibility_set(),
            &PossibilitySet::Tracked(vec![Region::universal(2)])
        );
    }

    #[test]
    fn test_wildcard_clause_exhausts_the_space() {
        let mut engine = ReachabilityEngine::new(1);
        assert_eq!(engine.observe(&[Any]), ClauseStatus::Reachable);
        assert_eq!(engine.possibility_set(), &PossibilitySet::Tracked(vec![]));
        assert_eq!(engine.observe(&[Null]), ClauseStatus::Unreachable);
        // Terminal: no further verdicts after a dead clause
        assert_eq!(engine.observe(&[NotNull]), ClauseStatus::Unknown);
    }

    #[test]
    fn test_repeated_region_is_never_satisfied() {
        let mut engine = ReachabilityEngine::new(1);
        assert_eq!(engine.observe(&[Null]), ClauseStatus::Reachable);
        assert_eq!(engine.observe(&[Null]), ClauseStatus::NeverSatisfied);
        // The set is untouched, so the complement is still reachable
        assert_eq!(engine.observe(&[NotNull]), ClauseStatus::Reachable);
    }

    #[test]
    fn test_boolean_exhaustion_then_dead_clause() {
        let mut engine = ReachabilityEngine::new(1);
        assert_eq!(engine.observe(&[True]), ClauseStatus::Reachable);
        assert_eq!(engine.observe(&[False]), ClauseStatus::Reachable);
        assert_eq!(engine.observe(&[True]), ClauseStatus::Unreachable);
    }

    #[test]
    fn test_zero_arity_second_clause_is_dead() {
        let mut engine = ReachabilityEngine::new(0);
        assert_eq!(engine.observe(&[]), ClauseStatus::Reachable);
        assert_eq!(engine.observe(&[]), ClauseStatus::Unreachable);
    }

    #[test]
    fn test_partial_overlap_narrows_the_set() {
        let mut engine = ReachabilityEngine::new(2);
        assert_eq!(engine.observe(&[Null, True]), ClauseStatus::Reachable);
        assert_eq!(
            engine.possibility_set(),
            &PossibilitySet::Tracked(vec![
                Region::new(vec![NotNull, Any]),
                Region::new(vec![Null, False]),
            ])
        );
        assert_eq!(engine.observe(&[Null, True]), ClauseStatus::NeverSatisfied);
        assert_eq!(engine.observe(&[Null, False]), ClauseStatus::Reachable);
    }

    /// Clauses pinning successive disjoint slot pairs double the tracked
    /// region count each time: 2^k regions after k clauses.
    fn pair_clause(arity: usize, pair: usize) -> Vec<ValueConstraint> {
        let mut slots = vec![Any; arity];
        slots[2 * pair] = True;
        slots[2 * pair + 1] = True;
        slots
    }

    #[test]
    fn test_region_budget_abandons_tracking() {
        const ARITY: usize = 20;
        let mut engine = ReachabilityEngine::new(ARITY);

        // 2^8 = 256 tracked regions: still within the budget
        for pair in 0..8 {
            assert_eq!(
                engine.observe(&pair_clause(ARITY, pair)),
                ClauseStatus::Reachable
            );
        }
        assert!(!engine.abandoned());

        // The ninth doubling would cross 300 tracked regions
        assert_eq!(
            engine.observe(&pair_clause(ARITY, 8)),
            ClauseStatus::Reachable
        );
        assert!(engine.abandoned());

        // No verdicts past the abandonment point, even for a clause that
        // exact tracking would have flagged
        assert_eq!(
            engine.observe(&pair_clause(ARITY, 0)),
            ClauseStatus::Unknown
        );
    }
}
