//! Clause compatibility checking against the target signature

pub mod reachability;

use crate::ast::{Clause, ReturnOutcome, Spanned, ValueConstraint};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::sig::{FunctionSig, Nullability, Param};

/// Validates contract clauses against the function's declared parameter
/// types, nullability facts, and return type
pub struct SignatureChecker<'a> {
    sig: &'a FunctionSig,
}

impl<'a> SignatureChecker<'a> {
    pub fn new(sig: &'a FunctionSig) -> Self {
        Self { sig }
    }

    /// First incompatibility between the clause and the signature, if any.
    ///
    /// An arity mismatch is reported as a syntax problem; the parser has
    /// already enforced a single arity across clauses, so the caller treats
    /// it as terminal for the whole contract.
    pub fn check_clause(&self, index: usize, clause: &Clause) -> Option<Diagnostic> {
        if clause.arity() != self.sig.params.len() {
            return Some(Diagnostic::new(
                DiagnosticKind::Syntax,
                format!(
                    "contract clause `{}` has {} constraints but `{}` has {} parameters",
                    clause,
                    clause.arity(),
                    self.sig.name,
                    self.sig.params.len()
                ),
                Some(index),
                clause.span,
            ));
        }

        for (param, constraint) in self.sig.params.iter().zip(&clause.constraints) {
            if let Some(diagnostic) =
                self.check_constraint(index, param, constraint, clause.outcome.node)
            {
                return Some(diagnostic);
            }
        }

        self.check_outcome(index, clause)
    }

    fn check_constraint(
        &self,
        index: usize,
        param: &Param,
        constraint: &Spanned<ValueConstraint>,
        outcome: ReturnOutcome,
    ) -> Option<Diagnostic> {
        match constraint.node {
            ValueConstraint::Any => None,
            ValueConstraint::Null | ValueConstraint::NotNull => {
                if param.ty.value_type {
                    return Some(Diagnostic::new(
                        DiagnosticKind::TypeMismatch,
                        format!(
                            "constraint `{}` on parameter `{}` of value type `{}`, which can never be null",
                            constraint.node, param.name, param.ty.display
                        ),
                        Some(index),
                        constraint.span,
                    ));
                }
                match param.nullability {
                    Nullability::NotConstrained => None,
                    Nullability::NotNullInferred => {
                        // A defensive null check ahead of a value that is
                        // only inferred (never declared) not-null is legal
                        // when the clause promises failure
                        if constraint.node == ValueConstraint::Null
                            && outcome == ReturnOutcome::Fail
                        {
                            None
                        } else {
                            Some(Diagnostic::new(
                                DiagnosticKind::NullabilityConflict,
                                format!(
                                    "constraint `{}` contradicts the inferred not-null nullability of parameter `{}`",
                                    constraint.node, param.name
                                ),
                                Some(index),
                                constraint.span,
                            ))
                        }
                    }
                    Nullability::NotNullDeclared => Some(Diagnostic::new(
                        DiagnosticKind::NullabilityConflict,
                        format!(
                            "constraint `{}` contradicts the declared not-null nullability of parameter `{}`",
                            constraint.node, param.name
                        ),
                        Some(index),
                        constraint.span,
                    )),
                }
            }
            ValueConstraint::True | ValueConstraint::False => {
                if param.ty.boolean {
                    None
                } else {
                    Some(Diagnostic::new(
                        DiagnosticKind::TypeMismatch,
                        format!(
                            "boolean constraint `{}` on non-boolean parameter `{}` of type `{}`",
                            constraint.node, param.name, param.ty.display
                        ),
                        Some(index),
                        constraint.span,
                    ))
                }
            }
        }
    }

    /// Structural compatibility of the clause's outcome with the function
    fn check_outcome(&self, index: usize, clause: &Clause) -> Option<Diagnostic> {
        let outcome = clause.outcome.node;
        let ret = &self.sig.return_type;
        let problem = match outcome {
            ReturnOutcome::Any => None,
            ReturnOutcome::True | ReturnOutcome::False => (!ret.boolean).then(|| {
                format!(
                    "return value `{}` is incompatible with return type `{}`",
                    outcome, ret.display
                )
            }),
            ReturnOutcome::Null | ReturnOutcome::NotNull | ReturnOutcome::New => {
                (ret.value_type || ret.void).then(|| {
                    format!(
                        "return value `{}` is incompatible with return type `{}`",
                        outcome, ret.display
                    )
                })
            }
            ReturnOutcome::Fail => (!self.sig.can_fail).then(|| {
                format!(
                    "`{}` cannot signal failure, so return value `fail` is not allowed",
                    self.sig.name
                )
            }),
            ReturnOutcome::This => {
                if !self.sig.has_receiver {
                    Some(format!(
                        "return value `this` on `{}`, which has no receiver",
                        self.sig.name
                    ))
                } else if !self.sig.receiver_assignable {
                    Some(format!(
                        "return type `{}` is not assignable from the receiver type",
                        ret.display
                    ))
                } else {
                    None
                }
            }
        };
        problem.map(|message| {
            Diagnostic::new(
                DiagnosticKind::TypeMismatch,
                message,
                Some(index),
                clause.outcome.span,
            )
        })
    }
}
