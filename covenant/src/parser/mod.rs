//! Contract parser
//!
//! Turns a token stream into an ordered [`Contract`]. The grammar is flat:
//! `contract := clause (";" clause)*` and
//! `clause := [constraint ("," constraint)*] "->" outcome`.
//! An empty constraint list is legal and describes a function without
//! parameters. All clauses of one contract must agree on their constraint
//! count; the first clause fixes it.


use crate::ast::{Clause, Contract, ReturnOutcome, Span, Spanned, ValueConstraint};
use crate::error::{ContractError, Result};
use crate::lexer::Token;

/// Tokenize and parse contract text
pub fn parse_contract(source: &str) -> Result<Contract> {
    let tokens = crate::lexer::tokenize(source)?;
    parse(source, tokens)
}

/// Parse a tokenized contract string
pub fn parse(source: &str, tokens: Vec<(Token, Span)>) -> Result<Contract> {
    if tokens.is_empty() {
        return Err(ContractError::syntax(
            "empty contract",
            Span::new(0, source.len()),
        ));
    }

    // Split into clause segments on `;`
    let mut segments: Vec<&[(Token, Span)]> = Vec::new();
    let mut semi_spans: Vec<Span> = Vec::new();
    let mut start = 0;
    for (i, (token, span)) in tokens.iter().enumerate() {
        if *token == Token::Semi {
            segments.push(&tokens[start..i]);
            semi_spans.push(*span);
            start = i + 1;
        }
    }
    segments.push(&tokens[start..]);

    // A trailing `;` leaves one empty segment at the end, which is
    // tolerated; an empty segment anywhere else is malformed
    if segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    let mut clauses = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(ContractError::syntax(
                "empty contract clause",
                semi_spans[index],
            ));
        }
        clauses.push(parse_clause(source, segment)?);

        let arity = clauses[0].arity();
        let clause = &clauses[index];
        if clause.arity() != arity {
            return Err(ContractError::syntax(
                format!(
                    "clause {} has {} constraints but clause 1 has {}",
                    index + 1,
                    clause.arity(),
                    arity
                ),
                clause.span,
            ));
        }
    }

    Ok(Contract { clauses })
}

fn parse_clause(source: &str, segment: &[(Token, Span)]) -> Result<Clause> {
    let clause_span = segment[0].1.merge(segment[segment.len() - 1].1);

    let mut constraints = Vec::new();
    let mut pos = 0;

    if segment[0].0 != Token::Arrow {
        loop {
            let Some((token, span)) = segment.get(pos) else {
                return Err(ContractError::syntax(
                    "missing `->` in contract clause",
                    clause_span,
                ));
            };
            if *token == Token::Arrow {
                return Err(ContractError::syntax(
                    "missing constraint before `->`",
                    *span,
                ));
            }
            let constraint = constraint_token(token).ok_or_else(|| {
                ContractError::syntax(
                    format!(
                        "`{}` is not a valid parameter constraint",
                        slice(source, *span)
                    ),
                    *span,
                )
            })?;
            constraints.push(Spanned::new(constraint, *span));
            pos += 1;

            match segment.get(pos) {
                Some((Token::Comma, _)) => pos += 1,
                Some((Token::Arrow, _)) => break,
                Some((_, span)) => {
                    return Err(ContractError::syntax(
                        format!("expected `,` or `->`, found `{}`", slice(source, *span)),
                        *span,
                    ));
                }
                None => {
                    return Err(ContractError::syntax(
                        "missing `->` in contract clause",
                        clause_span,
                    ));
                }
            }
        }
    }

    let arrow_span = segment[pos].1;
    pos += 1;

    let Some((token, span)) = segment.get(pos) else {
        return Err(ContractError::syntax(
            "missing return value after `->`",
            arrow_span,
        ));
    };
    let outcome = outcome_token(token).ok_or_else(|| {
        ContractError::syntax(
            format!("`{}` is not a valid return value", slice(source, *span)),
            *span,
        )
    })?;
    let outcome = Spanned::new(outcome, *span);
    pos += 1;

    if let Some((_, extra)) = segment.get(pos) {
        return Err(ContractError::syntax(
            format!("unexpected `{}` after return value", slice(source, *extra)),
            *extra,
        ));
    }

    Ok(Clause {
        constraints,
        outcome,
        span: clause_span,
    })
}

fn constraint_token(token: &Token) -> Option<ValueConstraint> {
    match token {
        Token::Any => Some(ValueConstraint::Any),
        Token::Null => Some(ValueConstraint::Null),
        Token::NotNull => Some(ValueConstraint::NotNull),
        Token::True => Some(ValueConstraint::True),
        Token::False => Some(ValueConstraint::False),
        _ => None,
    }
}

fn outcome_token(token: &Token) -> Option<ReturnOutcome> {
    match token {
        Token::Any => Some(ReturnOutcome::Any),
        Token::Null => Some(ReturnOutcome::Null),
        Token::NotNull => Some(ReturnOutcome::NotNull),
        Token::True => Some(ReturnOutcome::True),
        Token::False => Some(ReturnOutcome::False),
        Token::Fail => Some(ReturnOutcome::Fail),
        Token::This => Some(ReturnOutcome::This),
        Token::New => Some(ReturnOutcome::New),
        _ => None,
    }
}

fn slice(source: &str, span: Span) -> &str {
    &source[span.start..span.end]
}
