//! Contract data model

mod constraint;
mod span;

pub use constraint::{Region, ReturnOutcome, ValueConstraint};
pub use span::{Span, Spanned};

use std::fmt;

use serde::{Deserialize, Serialize};

/// One `constraints -> outcome` rule within a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    pub constraints: Vec<Spanned<ValueConstraint>>,
    pub outcome: Spanned<ReturnOutcome>,
    pub span: Span,
}

impl Clause {
    /// Number of parameter slots this clause constrains
    pub fn arity(&self) -> usize {
        self.constraints.len()
    }

    /// The bare constraint tuple, without source positions
    pub fn region(&self) -> Vec<ValueConstraint> {
        self.constraints.iter().map(|c| c.node).collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", constraint.node)?;
        }
        if !self.constraints.is_empty() {
            f.write_str(" ")?;
        }
        write!(f, "-> {}", self.outcome.node)
    }
}

/// Ordered clause list parsed from one contract string.
/// Clause order is semantically significant: the first matching clause wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub clauses: Vec<Clause>,
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
