use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{
        coercion::{BOOLEAN, coerce},
        core::Value,
    },
};

/// The boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// The symbol the operator is registered under.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Folds `and` or `or` over boolean operands.
///
/// All operands are evaluated before the fold, so there is no short
/// circuiting.
///
/// # Errors
/// `TypeError` if an operand is not a boolean.
///
/// # Example
/// ```
/// use lambda::interpreter::{
///     evaluator::logic::{LogicOp, logic},
///     value::core::Value,
/// };
///
/// let v = logic(LogicOp::Or, vec![false.into(), false.into(), true.into()]).unwrap();
/// assert_eq!(v, Value::Bool(true));
///
/// assert!(logic(LogicOp::And, vec![true.into(), Value::Integer(1)]).is_err());
/// ```
pub fn logic(op: LogicOp, arguments: Vec<Value>) -> EvalResult<Value> {
    let symbol = op.symbol();
    let (_, operands) = coerce(symbol, arguments, BOOLEAN)?;

    let mut result = op == LogicOp::And;
    for operand in &operands {
        let b = operand.as_bool(symbol)?;
        result = match op {
            LogicOp::And => result && b,
            LogicOp::Or => result || b,
        };
    }

    Ok(Value::Bool(result))
}
