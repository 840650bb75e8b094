/// Core evaluation logic and environment management.
///
/// Contains the `Environment`, the recursive tree walk and symbol
/// resolution.
pub mod core;

/// Operator descriptors and the built-in operator table.
///
/// Declares arities, argument policies and the dispatch from a registered
/// operator to its implementation.
pub mod operator;

/// Utility functions for evaluation.
///
/// Applies operators to argument nodes and provides small helpers shared by
/// operator implementations.
pub mod utils;

/// `+`, `-`, `*` and `/`, including big integer promotion.
pub mod arithmetic;

/// `=` and the ordering operators.
pub mod comparison;

/// `and` and `or`.
pub mod logic;

/// Forms that bind names or control evaluation: `defvar`, `cond`, `defun`,
/// and calls to functions created by `defun`.
pub mod special_forms;
