//! Finite constraint domain and region algebra
//!
//! Each parameter slot carries one atomic constraint; a tuple of slot
//! constraints denotes the Cartesian-product region of parameter-value space
//! it covers. Regions support conjunctive intersection and disjoint
//! complement decomposition, which is what reachability tracking is built on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Atomic constraint over one parameter's runtime value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueConstraint {
    /// Matches any value
    Any,
    Null,
    NotNull,
    True,
    False,
}

impl ValueConstraint {
    /// Canonical DSL spelling
    pub fn token(self) -> &'static str {
        match self {
            Self::Any => "_",
            Self::Null => "null",
            Self::NotNull => "!null",
            Self::True => "true",
            Self::False => "false",
        }
    }

    /// Intersection of two constraints on the same slot.
    /// Distinct non-wildcard atoms never overlap.
    pub fn intersect(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Any, c) => Some(c),
            (c, Self::Any) => Some(c),
            (Self::Null, Self::Null) => Some(Self::Null),
            (Self::NotNull, Self::NotNull) => Some(Self::NotNull),
            (Self::True, Self::True) => Some(Self::True),
            (Self::False, Self::False) => Some(Self::False),
            _ => None,
        }
    }

    /// The single complementary atom, if one exists.
    /// Null/NotNull and True/False each form a two-value domain; the
    /// wildcard has no complement.
    pub fn negate(self) -> Option<Self> {
        match self {
            Self::Any => None,
            Self::Null => Some(Self::NotNull),
            Self::NotNull => Some(Self::Null),
            Self::True => Some(Self::False),
            Self::False => Some(Self::True),
        }
    }
}

impl fmt::Display for ValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// What the function does when a clause's constraints hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnOutcome {
    /// No promise about the result
    Any,
    Null,
    NotNull,
    True,
    False,
    /// The call throws or otherwise signals failure
    Fail,
    /// Identity return: the receiver itself
    This,
    /// A freshly constructed, therefore non-null, object
    New,
}

impl ReturnOutcome {
    /// Canonical DSL spelling
    pub fn token(self) -> &'static str {
        match self {
            Self::Any => "_",
            Self::Null => "null",
            Self::NotNull => "!null",
            Self::True => "true",
            Self::False => "false",
            Self::Fail => "fail",
            Self::This => "this",
            Self::New => "new",
        }
    }

    /// Whether the outcome refers to the receiver of the call
    pub fn references_receiver(self) -> bool {
        matches!(self, Self::This)
    }
}

impl fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A clause-shaped constraint tuple without an outcome: the set of
/// parameter-value tuples where slot `i` satisfies constraint `i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    slots: Vec<ValueConstraint>,
}

impl Region {
    pub fn new(slots: Vec<ValueConstraint>) -> Self {
        Region { slots }
    }

    /// The universal region: every slot unconstrained
    pub fn universal(arity: usize) -> Self {
        Region {
            slots: vec![ValueConstraint::Any; arity],
        }
    }

    pub fn slots(&self) -> &[ValueConstraint] {
        &self.slots
    }

    /// Slot-wise intersection, conjunctive across slots.
    /// `None` as soon as any slot pair is disjoint.
    pub fn intersect(&self, clause: &[ValueConstraint]) -> Option<Region> {
        debug_assert_eq!(self.slots.len(), clause.len());
        let mut slots = Vec::with_capacity(self.slots.len());
        for (&r, &x) in self.slots.iter().zip(clause) {
            slots.push(r.intersect(x)?);
        }
        Some(Region { slots })
    }

    /// Remove a clause's coverage from this region, producing disjoint
    /// sub-regions whose union is exactly the uncovered remainder.
    ///
    /// For each slot where the region is unconstrained and the clause pins a
    /// value, one sub-region keeps the complementary value there; slots to
    /// the left are narrowed to the slot intersection so emitted sub-regions
    /// never overlap each other or the removed part.
    pub fn exclude(&self, clause: &[ValueConstraint]) -> Vec<Region> {
        debug_assert_eq!(self.slots.len(), clause.len());
        if self.intersect(clause).is_none() {
            // Disjoint: nothing to remove
            return vec![self.clone()];
        }
        let mut out = Vec::new();
        let mut prefix = self.slots.clone();
        for (i, (&r, &x)) in self.slots.iter().zip(clause).enumerate() {
            if r == ValueConstraint::Any {
                if let Some(complement) = x.negate() {
                    let mut slots = prefix.clone();
                    slots[i] = complement;
                    out.push(Region { slots });
                }
            }
            // Non-empty: every slot pair intersects, checked above
            prefix[i] = if r == ValueConstraint::Any { x } else { r };
        }
        out
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}
