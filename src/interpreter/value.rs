/// Value type tags and literal classification.
///
/// Defines `ValueType`, the fixed order in which token text is tried against
/// each type's literal pattern, and the per-type parsers used to build values
/// from source tokens.
pub mod kind;
/// Operand coercion.
///
/// Given the operands of an operator and a table of accepted types ranked by
/// precedence, decides the common type all operands are converted to.
pub mod coercion;

/// The `Value` enum, symbols, conversions and rendering.
pub mod core;
