/// The evaluator module executes syntax trees and computes results.
///
/// The evaluator walks a tree, applies operators to their arguments, manages
/// variable and function bindings, and produces values.
///
/// # Responsibilities
/// - Evaluates nodes, dispatching to built-in and user-defined operators.
/// - Handles `defvar`, `defun` and `cond`.
/// - Reports runtime errors such as division by zero or unknown operators.
pub mod evaluator;
/// The lexer module splits source text into tokens.
///
/// Parentheses are always tokens of their own; everything else is split on
/// whitespace. Lexing cannot fail.
pub mod lexer;
/// The parser module builds syntax trees from tokens.
///
/// # Responsibilities
/// - Builds one root node per call, leaving trailing tokens in place.
/// - Validates balanced parentheses.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the closed set of value types: strings, integers, big
/// integers, floats, booleans, symbols and unevaluated syntax. It also
/// provides literal classification and the coercion rules operators use to
/// bring their operands to a common type.
///
/// # Responsibilities
/// - Defines the `Value` enum and `ValueType` tags.
/// - Classifies token text into values.
/// - Converts between numeric types without silent precision loss.
pub mod value;
