//! Token definitions for the contract DSL

use logos::Logos;

/// Contract DSL token
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Constraint and outcome vocabulary
    #[token("_")]
    #[token("any")]
    Any,
    #[token("null")]
    Null,
    #[token("!null")]
    NotNull,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Outcome-only vocabulary
    #[token("fail")]
    Fail,
    #[token("this")]
    This,
    #[token("new")]
    New,

    // Punctuation
    #[token("->")]
    Arrow,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    /// Any other word; rejected by the parser with its exact span
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),
}
