use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::kind::{ValueType, classify},
    },
};

/// A symbol produced by evaluating an identifier.
///
/// Identifiers evaluate to a `Variable` reference that is dereferenced
/// against the environment before an operator sees it. Dereferencing a name
/// that is bound as an operator instead yields a `Function` reference, which
/// is how operators are passed around as arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A not yet dereferenced name, e.g. `x`.
    Variable(String),
    /// A reference to the operator bound under this name.
    Function(String),
}

impl Symbol {
    /// The name the symbol refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(name) | Self::Function(name) => name,
        }
    }
}

/// Represents a runtime value in the interpreter.
///
/// The set of variants is closed: every value that can appear as an operand,
/// a variable binding or a result is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string literal. Holds the text without its quotes.
    Str(String),
    /// A 64 bit signed integer.
    Integer(i64),
    /// An integer outside the 64 bit range. Values produced by arithmetic are
    /// normalized back to `Integer` whenever they fit.
    BigInteger(BigInt),
    /// A double precision floating point number.
    Float(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An identifier, see [`Symbol`].
    Symbol(Symbol),
    /// Unevaluated syntax handed to special forms such as `cond` and `defun`.
    Raw(Vec<Node>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Big integers that fit into 64 bits become `Value::Integer`.
impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        v.to_i64().map_or(Self::BigInteger(v), Self::Integer)
    }
}

impl Value {
    /// Builds a value from the text of a source token.
    ///
    /// The text is tried against every type's literal pattern in the fixed
    /// order given by [`ValueType::INFERENCE_ORDER`] and the first match wins.
    ///
    /// # Example
    /// ```
    /// use lambda::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::parse("42").unwrap(), Value::Integer(42));
    /// assert_eq!(Value::parse("4.5").unwrap(), Value::Float(4.5));
    /// assert_eq!(Value::parse("'hi'").unwrap(), Value::Str("hi".to_string()));
    /// assert!(Value::parse("]]]").is_err());
    /// ```
    pub fn parse(text: &str) -> EvalResult<Self> {
        Ok(classify(text)?)
    }

    /// Returns the type tag of the value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Str(_) => ValueType::Str,
            Self::Integer(_) => ValueType::Integer,
            Self::BigInteger(_) => ValueType::BigInteger,
            Self::Float(_) => ValueType::Float,
            Self::Bool(_) => ValueType::Bool,
            Self::Symbol(_) => ValueType::Symbol,
            Self::Raw(_) => ValueType::Raw,
        }
    }

    /// Converts the value to another type.
    ///
    /// Identity conversions always succeed. Beyond those, integers convert to
    /// big integers and to floats. Integers above `2^53` in magnitude round
    /// to the nearest `f64`.
    ///
    /// # Errors
    /// `RuntimeError::Conversion` if the conversion is not defined.
    ///
    /// # Example
    /// ```
    /// use lambda::interpreter::value::{core::Value, kind::ValueType};
    ///
    /// let x = Value::Integer(2);
    /// assert_eq!(x.to(ValueType::Float).unwrap(), Value::Float(2.0));
    ///
    /// let big = Value::Integer(9_007_199_254_740_993);
    /// assert_eq!(big.to(ValueType::Float).unwrap(), Value::Float(9_007_199_254_740_992.0));
    ///
    /// assert!(Value::Bool(true).to(ValueType::Integer).is_err());
    /// ```
    pub fn to(&self, target: ValueType) -> EvalResult<Self> {
        if self.value_type() == target {
            return Ok(self.clone());
        }

        match (self, target) {
            (Self::Integer(n), ValueType::BigInteger) => Ok(Self::BigInteger(BigInt::from(*n))),
            #[allow(clippy::cast_precision_loss)]
            (Self::Integer(n), ValueType::Float) => Ok(Self::Float(*n as f64)),
            _ => Err(self.conversion_error(target)),
        }
    }

    fn conversion_error(&self, target: ValueType) -> RuntimeError {
        RuntimeError::Conversion { from:  self.value_type(),
                                   to:    target,
                                   value: self.to_string(), }
    }

    /// Returns the integer payload, or a type error naming `operator`.
    pub fn as_integer(&self, operator: &str) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(self.unexpected(operator, ValueType::Integer)),
        }
    }

    /// Returns the big integer payload, or a type error naming `operator`.
    pub fn as_big_integer(&self, operator: &str) -> EvalResult<&BigInt> {
        match self {
            Self::BigInteger(n) => Ok(n),
            _ => Err(self.unexpected(operator, ValueType::BigInteger)),
        }
    }

    /// Returns the float payload, or a type error naming `operator`.
    pub fn as_float(&self, operator: &str) -> EvalResult<f64> {
        match self {
            Self::Float(f) => Ok(*f),
            _ => Err(self.unexpected(operator, ValueType::Float)),
        }
    }

    /// Returns the string contents, or a type error naming `operator`.
    pub fn as_str(&self, operator: &str) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(self.unexpected(operator, ValueType::Str)),
        }
    }

    /// Returns the boolean payload, or a type error naming `operator`.
    pub fn as_bool(&self, operator: &str) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(self.unexpected(operator, ValueType::Bool)),
        }
    }

    fn unexpected(&self, operator: &str, expected: ValueType) -> RuntimeError {
        RuntimeError::TypeError { operator: operator.to_string(),
                                  details:  format!("expected {expected}, but {self} is of type {}",
                                                    self.value_type()), }
    }

    /// Returns `true` if the value is a [`Symbol`] of either kind.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(..))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Integer(n) => write!(f, "{n}"),
            Self::BigInteger(n) => write!(f, "{n}"),
            Self::Float(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Symbol(Symbol::Variable(name)) => write!(f, "{name}"),
            Self::Symbol(Symbol::Function(name)) => write!(f, "<function: {name}>"),
            Self::Raw(nodes) => {
                for (index, node) in nodes.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }

                    write!(f, "{node}")?;
                }

                Ok(())
            },
        }
    }
}
