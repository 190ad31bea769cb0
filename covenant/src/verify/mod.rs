//! Per-function contract validation
//!
//! Interleaves type checking and reachability clause-by-clause in
//! declaration order, since the reachability of a clause depends on the
//! exclusions produced by the clauses before it. Diagnostics are collected,
//! never thrown; one bad contract never aborts a validation pass.

use crate::ast::Span;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::parser;
use crate::sig::{ContractAnnotation, FunctionSig};
use crate::types::SignatureChecker;
use crate::types::reachability::{ClauseStatus, ReachabilityEngine};

/// Everything found while validating one function's annotation
#[derive(Debug, Default)]
pub struct CheckReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Region tracking hit its budget; reachability diagnostics were
    /// suppressed from that point on
    pub tracking_abandoned: bool,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validate a full annotation: contract text plus mutation attribute
pub fn check_annotation(sig: &FunctionSig, annotation: &ContractAnnotation) -> CheckReport {
    let mut report = match &annotation.contract {
        Some(text) if !text.trim().is_empty() => check_contract(sig, text),
        _ => CheckReport::default(),
    };

    if annotation.pure {
        if let Some(mutates) = &annotation.mutates {
            if !mutates.trim().is_empty() {
                report.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::MutationPurityConflict,
                    format!(
                        "`{}` is declared pure and cannot declare a mutation contract",
                        sig.name
                    ),
                    None,
                    Span::new(0, mutates.len()),
                ));
            }
        }
    }

    report
}

/// Validate one contract string against the signature
pub fn check_contract(sig: &FunctionSig, text: &str) -> CheckReport {
    let mut report = CheckReport::default();

    let contract = match parser::parse_contract(text) {
        Ok(contract) => contract,
        Err(error) => {
            // The first syntax error invalidates the whole contract
            let span = error.span().unwrap_or(Span::new(0, text.len()));
            report.diagnostics.push(Diagnostic::new(
                DiagnosticKind::Syntax,
                error.message().to_string(),
                None,
                span,
            ));
            return report;
        }
    };

    let checker = SignatureChecker::new(sig);
    let mut engine = ReachabilityEngine::new(sig.params.len());

    for (index, clause) in contract.clauses.iter().enumerate() {
        if let Some(diagnostic) = checker.check_clause(index, clause) {
            // An arity mismatch would repeat on every clause; one report
            // covers the contract
            let terminal = diagnostic.kind == DiagnosticKind::Syntax;
            report.diagnostics.push(diagnostic);
            if terminal {
                break;
            }
            // The clause is not applied to the possibility set
            continue;
        }

        match engine.observe(&clause.region()) {
            ClauseStatus::Reachable | ClauseStatus::Unknown => {}
            ClauseStatus::Unreachable => report.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnreachableClause,
                format!(
                    "contract clause `{clause}` is unreachable: the clauses before it cover every input"
                ),
                Some(index),
                clause.span,
            )),
            ClauseStatus::NeverSatisfied => report.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnsatisfiableClause,
                format!(
                    "contract clause `{clause}` can never be satisfied given the clauses before it"
                ),
                Some(index),
                clause.span,
            )),
        }
    }

    report.tracking_abandoned = engine.abandoned();
    report
}
