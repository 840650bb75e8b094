use std::collections::HashSet;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, kind::ValueType},
    },
};

/// Types accepted by an operator, each ranked by precedence. When operands
/// of several accepted types meet, all are converted to the present type
/// with the highest rank.
pub type Precedence = &'static [(ValueType, u8)];

/// Integers widen to big integers, both widen to floats.
pub const NUMERIC: Precedence = &[(ValueType::Integer, 1),
                                  (ValueType::BigInteger, 2),
                                  (ValueType::Float, 3)];
/// Strings only.
pub const STRING: Precedence = &[(ValueType::Str, 1)];
/// Booleans only.
pub const BOOLEAN: Precedence = &[(ValueType::Bool, 1)];

fn rank(precedence: &[(ValueType, u8)], kind: ValueType) -> Option<u8> {
    precedence.iter()
              .find(|(candidate, _)| *candidate == kind)
              .map(|(_, rank)| *rank)
}

/// Checks that every operand has a type listed in `precedence`.
fn accepts(precedence: &[(ValueType, u8)], operands: &[Value]) -> bool {
    operands.iter()
            .all(|operand| rank(precedence, operand.value_type()).is_some())
}

/// Converts all operands to one common type.
///
/// If all operands already share a type, nothing is converted. Otherwise the
/// present type with the highest precedence is chosen and every operand is
/// converted into it.
///
/// # Parameters
/// - `operator`: Operator name used in error messages.
/// - `operands`: The evaluated operands.
/// - `precedence`: The accepted types and their ranks.
///
/// # Returns
/// The chosen type and the converted operands, in their original order.
///
/// # Errors
/// - `TypeError` if an operand's type is not accepted.
/// - `Conversion` if an operand cannot be converted to the chosen type.
///
/// # Example
/// ```
/// use lambda::interpreter::value::{
///     coercion::{NUMERIC, coerce},
///     core::Value,
///     kind::ValueType,
/// };
///
/// let (kind, operands) = coerce("+", vec![Value::Integer(1), Value::Float(2.5)], NUMERIC).unwrap();
///
/// assert_eq!(kind, ValueType::Float);
/// assert_eq!(operands, vec![Value::Float(1.0), Value::Float(2.5)]);
/// ```
pub fn coerce(operator: &str,
              operands: Vec<Value>,
              precedence: Precedence)
              -> EvalResult<(ValueType, Vec<Value>)> {
    let mut target: Option<(ValueType, u8)> = None;
    let mut present = HashSet::new();

    for operand in &operands {
        let kind = operand.value_type();
        let Some(rank) = rank(precedence, kind) else {
            return Err(unexpected_type(operator, operand, precedence));
        };

        present.insert(kind);
        if target.is_none_or(|(_, best)| rank > best) {
            target = Some((kind, rank));
        }
    }

    let Some((target, _)) = target else {
        return Err(RuntimeError::TypeError { operator: operator.to_string(),
                                             details:  "no operands to coerce".to_string(), });
    };

    if present.len() == 1 {
        return Ok((target, operands));
    }

    Ok((target, convert_all(&operands, target)?))
}

/// Coerces operands using the first precedence table that accepts all of
/// their types.
///
/// Operators such as `+` and `<` work on numbers or on strings; they pass
/// both tables and the operands decide which one applies.
///
/// # Errors
/// - `TypeError` if no table accepts every operand.
/// - Any error from [`coerce`] with the selected table.
///
/// # Example
/// ```
/// use lambda::interpreter::value::{
///     coercion::{NUMERIC, STRING, coerce_chained},
///     core::Value,
///     kind::ValueType,
/// };
///
/// let operands = vec![Value::Str("a".to_string()), Value::Str("b".to_string())];
/// let (kind, _) = coerce_chained(">", operands, &[NUMERIC, STRING]).unwrap();
/// assert_eq!(kind, ValueType::Str);
///
/// let mixed = vec![Value::Str("a".to_string()), Value::Integer(1)];
/// assert!(coerce_chained(">", mixed, &[NUMERIC, STRING]).is_err());
/// ```
pub fn coerce_chained(operator: &str,
                      operands: Vec<Value>,
                      chain: &[Precedence])
                      -> EvalResult<(ValueType, Vec<Value>)> {
    match chain.iter()
               .copied()
               .find(|precedence| accepts(precedence, &operands))
    {
        Some(precedence) => coerce(operator, operands, precedence),
        None => {
            let types = operands.iter()
                                .map(|operand| operand.value_type().to_string())
                                .collect::<Vec<_>>()
                                .join(", ");
            Err(RuntimeError::TypeError { operator: operator.to_string(),
                                          details:  format!("unsupported combination of operand types ({types})"), })
        },
    }
}

/// Converts every operand to `target`.
///
/// # Errors
/// The first conversion error encountered.
pub fn convert_all(operands: &[Value], target: ValueType) -> EvalResult<Vec<Value>> {
    operands.iter().map(|operand| operand.to(target)).collect()
}

fn unexpected_type(operator: &str, operand: &Value, precedence: &[(ValueType, u8)]) -> RuntimeError {
    let allowed = precedence.iter()
                            .map(|(kind, _)| kind.to_string())
                            .collect::<Vec<_>>()
                            .join(", ");

    RuntimeError::TypeError { operator: operator.to_string(),
                              details:  format!("operand {operand} is of unexpected type {} (expected one of: {allowed})",
                                                operand.value_type()), }
}
