//! # lambda
//!
//! lambda is a small Lisp-style expression interpreter written in Rust.
//! It tokenizes and parses S-expressions and evaluates them against an
//! environment of operators and variables, with support for big integers,
//! string concatenation, conditionals and recursive user-defined functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, join_tokens, tokenize},
        parser::core::parse_expression,
    },
};
pub use crate::interpreter::{
    evaluator::core::{DEFAULT_RECURSION_LIMIT, Environment, EvalResult},
    value::core::Value,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum, a tree of token leaves and
/// parenthesized lists. The tree is built by the parser and walked by the
/// evaluator.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating code and standardizes their messages for user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Interactive read-eval-print loop.
pub mod repl;
/// General utilities.
///
/// # Responsibilities
/// - Grow the stack on demand during deep recursion.
pub mod util;

/// The outcome of evaluating the first expression of a piece of text.
///
/// Exactly one of `value` and `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Rendering of the resulting value.
    pub value:     Option<String>,
    /// Message of the error that aborted evaluation.
    pub error:     Option<String>,
    /// The tokens after the evaluated expression, joined by single spaces.
    pub remaining: String,
}

impl Evaluation {
    /// Returns `true` if the evaluation produced a value.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.value.is_some()
    }
}

/// Evaluates the first expression in `source`.
///
/// Only one root expression is consumed. Whatever follows it is returned in
/// [`Evaluation::remaining`] so that the caller can feed it back in. A result
/// that is a variable name is replaced by the variable's value.
///
/// Empty or whitespace-only input is a syntax error.
///
/// # Examples
/// ```
/// use lambda::{Environment, eval};
///
/// let mut env = Environment::new();
///
/// let result = eval("(+ 1 2) (* 3 4)", &mut env);
/// assert_eq!(result.value.as_deref(), Some("3"));
/// assert_eq!(result.remaining, "( * 3 4 )");
///
/// let result = eval("(/ 1 0)", &mut env);
/// assert!(result.error.is_some());
///
/// assert!(eval("   ", &mut env).error.is_some());
/// ```
pub fn eval(source: &str, env: &mut Environment) -> Evaluation {
    let tokens = tokenize(source);
    let mut iter = tokens.iter().peekable();

    let outcome = eval_next(&mut iter, env).and_then(|value| {
                                               value.ok_or_else(|| ParseError::NothingToEvaluate.into())
                                           });
    let remaining = join_tokens(iter);

    match outcome {
        Ok(value) => Evaluation { value: Some(value.to_string()),
                                  error: None,
                                  remaining },
        Err(error) => Evaluation { value: None,
                                   error: Some(error.to_string()),
                                   remaining },
    }
}

/// Evaluates every root expression in `source`, in order.
///
/// Definitions made by earlier expressions are visible to later ones.
///
/// # Errors
/// The first error encountered; expressions after it are not evaluated.
///
/// # Examples
/// ```
/// use lambda::{Environment, Value, eval_all};
///
/// let mut env = Environment::new();
/// let values = eval_all("(defvar x 4) (* x x)", &mut env).unwrap();
///
/// assert_eq!(values, vec![Value::Integer(4), Value::Integer(16)]);
/// ```
pub fn eval_all(source: &str, env: &mut Environment) -> EvalResult<Vec<Value>> {
    let tokens = tokenize(source);
    let mut iter = tokens.iter().peekable();
    let mut values = Vec::new();

    while let Some(value) = eval_next(&mut iter, env)? {
        values.push(value);
    }

    Ok(values)
}

/// Parses and evaluates the next root expression, or returns `None` when no
/// tokens are left.
fn eval_next<'a, I>(tokens: &mut Peekable<I>, env: &mut Environment) -> EvalResult<Option<Value>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(node) = parse_expression(tokens)? else {
        return Ok(None);
    };

    let value = env.evaluate(&node)?;
    env.resolve(value).map(Some)
}
