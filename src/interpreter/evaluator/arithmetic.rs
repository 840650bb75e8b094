use num_bigint::BigInt;
use num_traits::Zero;
use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            coercion::{NUMERIC, Precedence, STRING, coerce_chained, convert_all},
            core::Value,
            kind::ValueType,
        },
    },
};

const NUMERIC_OR_STRING: &[Precedence] = &[NUMERIC, STRING];
const NUMERIC_ONLY: &[Precedence] = &[NUMERIC];

/// The four arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    /// The symbol the operator is registered under.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// `+` also concatenates strings; the others are numeric only.
    const fn accepted(self) -> &'static [Precedence] {
        match self {
            Self::Add => NUMERIC_OR_STRING,
            _ => NUMERIC_ONLY,
        }
    }
}

/// Folds an arithmetic operator over its operands from left to right.
///
/// Operands are first coerced to a common type. Integer arithmetic that
/// overflows 64 bits is redone on big integers, and big integer results that
/// fit into 64 bits are narrowed back. Integer division truncates toward
/// zero.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `arguments`: The resolved operands, at least two.
///
/// # Returns
/// The folded result.
///
/// # Errors
/// - `TypeError` if the operand types are not accepted by the operator.
/// - `Conversion` if the operands cannot be brought to a common type.
/// - `DivisionByZero` if a divisor is zero.
/// - `NonFiniteResult` if a float operation overflows.
///
/// # Example
/// ```
/// use lambda::interpreter::{
///     evaluator::arithmetic::{ArithmeticOp, arithmetic},
///     value::core::Value,
/// };
///
/// let sum = arithmetic(ArithmeticOp::Add, vec![Value::Integer(1), Value::Float(0.5)]).unwrap();
/// assert_eq!(sum, Value::Float(1.5));
///
/// let big = arithmetic(ArithmeticOp::Mul, vec![Value::Integer(i64::MAX), Value::Integer(2)]).unwrap();
/// assert_eq!(big.to_string(), "18446744073709551614");
///
/// assert!(arithmetic(ArithmeticOp::Div, vec![Value::Integer(1), Value::Integer(0)]).is_err());
/// ```
pub fn arithmetic(op: ArithmeticOp, arguments: Vec<Value>) -> EvalResult<Value> {
    let symbol = op.symbol();
    let (kind, operands) = coerce_chained(symbol, arguments, op.accepted())?;

    match kind {
        ValueType::Integer => match fold_integers(op, &operands)? {
            Some(result) => Ok(Value::Integer(result)),
            None => {
                debug!(operator = symbol, "integer overflow, promoting to bigint");
                fold_big_integers(op, &convert_all(&operands, ValueType::BigInteger)?)
            },
        },
        ValueType::BigInteger => fold_big_integers(op, &operands),
        ValueType::Float => fold_floats(op, &operands),
        ValueType::Str if op == ArithmeticOp::Add => concatenate(&operands),
        other => Err(RuntimeError::TypeError { operator: symbol.to_string(),
                                               details:  format!("cannot apply to operands of type {other}"), }),
    }
}

fn split(op: ArithmeticOp, operands: &[Value]) -> EvalResult<(&Value, &[Value])> {
    operands.split_first()
            .ok_or_else(|| RuntimeError::TypeError { operator: op.symbol().to_string(),
                                                     details:  "no operands".to_string(), })
}

/// Returns `None` on overflow, including `i64::MIN / -1`.
fn fold_integers(op: ArithmeticOp, operands: &[Value]) -> EvalResult<Option<i64>> {
    let symbol = op.symbol();
    let (first, rest) = split(op, operands)?;
    let mut acc = first.as_integer(symbol)?;

    for operand in rest {
        let rhs = operand.as_integer(symbol)?;
        let next = match op {
            ArithmeticOp::Add => acc.checked_add(rhs),
            ArithmeticOp::Sub => acc.checked_sub(rhs),
            ArithmeticOp::Mul => acc.checked_mul(rhs),
            ArithmeticOp::Div => {
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero { operator: symbol.to_string() });
                }
                acc.checked_div(rhs)
            },
        };

        match next {
            Some(value) => acc = value,
            None => return Ok(None),
        }
    }

    Ok(Some(acc))
}

fn fold_big_integers(op: ArithmeticOp, operands: &[Value]) -> EvalResult<Value> {
    let symbol = op.symbol();
    let (first, rest) = split(op, operands)?;
    let mut acc: BigInt = first.as_big_integer(symbol)?.clone();

    for operand in rest {
        let rhs = operand.as_big_integer(symbol)?;
        acc = match op {
            ArithmeticOp::Add => acc + rhs,
            ArithmeticOp::Sub => acc - rhs,
            ArithmeticOp::Mul => acc * rhs,
            ArithmeticOp::Div => {
                if rhs.is_zero() {
                    return Err(RuntimeError::DivisionByZero { operator: symbol.to_string() });
                }
                acc / rhs
            },
        };
    }

    Ok(Value::from(acc))
}

fn fold_floats(op: ArithmeticOp, operands: &[Value]) -> EvalResult<Value> {
    let symbol = op.symbol();
    let (first, rest) = split(op, operands)?;
    let mut acc = first.as_float(symbol)?;

    for operand in rest {
        let rhs = operand.as_float(symbol)?;
        acc = match op {
            ArithmeticOp::Add => acc + rhs,
            ArithmeticOp::Sub => acc - rhs,
            ArithmeticOp::Mul => acc * rhs,
            ArithmeticOp::Div => {
                if rhs == 0.0 {
                    return Err(RuntimeError::DivisionByZero { operator: symbol.to_string() });
                }
                acc / rhs
            },
        };

        if !acc.is_finite() {
            return Err(RuntimeError::NonFiniteResult { operator: symbol.to_string() });
        }
    }

    Ok(Value::Float(acc))
}

fn concatenate(operands: &[Value]) -> EvalResult<Value> {
    let mut buffer = String::new();
    for operand in operands {
        buffer.push_str(operand.as_str("+")?);
    }

    Ok(Value::Str(buffer))
}
