/// Syntax errors.
///
/// Defines all error types that can occur while turning source text into a
/// tree: unbalanced delimiters, empty expressions and tokens that do not form
/// a literal of any known type.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// operators, arity and type mismatches, division by zero, unbound variables,
/// redefinitions and the recursion ceiling.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
