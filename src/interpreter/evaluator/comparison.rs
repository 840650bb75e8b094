use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::two},
        value::{
            coercion::{NUMERIC, Precedence, STRING, coerce_chained},
            core::Value,
        },
    },
};

const ORDERED: &[Precedence] = &[NUMERIC, STRING];

/// The ordering operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Comparison {
    /// The symbol the operator is registered under.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
        }
    }

    const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Greater => ordering.is_gt(),
            Self::GreaterEqual => ordering.is_ge(),
            Self::Less => ordering.is_lt(),
            Self::LessEqual => ordering.is_le(),
        }
    }
}

/// Tests two values for equality.
///
/// Both operands must have the same type; no coercion takes place, so
/// `(= 1 1.0)` is an error rather than `false`. Values of the same type are
/// equal when their renderings are.
///
/// # Errors
/// `TypeError` if the operand types differ.
///
/// # Example
/// ```
/// use lambda::interpreter::{evaluator::comparison::equal, value::core::Value};
///
/// let same = equal(vec![Value::Str("a".into()), Value::Str("a".into())]).unwrap();
/// assert_eq!(same, Value::Bool(true));
///
/// assert!(equal(vec![Value::Integer(1), Value::Float(1.0)]).is_err());
/// ```
pub fn equal(arguments: Vec<Value>) -> EvalResult<Value> {
    let (left, right) = two("=", arguments)?;

    if left.value_type() != right.value_type() {
        return Err(RuntimeError::TypeError { operator: "=".to_string(),
                                             details:  format!("cannot compare different types {} and {}",
                                                               left.value_type(),
                                                               right.value_type()), });
    }

    Ok(Value::Bool(left.to_string() == right.to_string()))
}

/// Orders two numbers or two strings.
///
/// Numbers of different types are coerced to a common type first. Strings
/// compare lexicographically by their contents.
///
/// # Errors
/// - `TypeError` if the operands are neither both numeric nor both strings.
/// - `Conversion` if the numbers cannot be brought to a common type.
///
/// # Example
/// ```
/// use lambda::interpreter::{
///     evaluator::comparison::{Comparison, compare},
///     value::core::Value,
/// };
///
/// let result = compare(Comparison::Less, vec![Value::Integer(2), Value::Float(2.5)]).unwrap();
/// assert_eq!(result, Value::Bool(true));
/// ```
pub fn compare(comparison: Comparison, arguments: Vec<Value>) -> EvalResult<Value> {
    let symbol = comparison.symbol();
    let (_, operands) = coerce_chained(symbol, arguments, ORDERED)?;
    let (left, right) = two(symbol, operands)?;

    let ordering = match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::BigInteger(a), Value::BigInteger(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => OrderedFloat(*a).cmp(&OrderedFloat(*b)),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => {
            return Err(RuntimeError::TypeError { operator: symbol.to_string(),
                                                 details:  format!("cannot order {left} and {right}"), });
        },
    };

    Ok(Value::Bool(comparison.holds(ordering)))
}
