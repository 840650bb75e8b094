use crate::{error::ParseError, interpreter::value::kind::ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A syntax error detected while evaluating (empty expression or a token
    /// that is not a literal of any type).
    Syntax(ParseError),
    /// The symbol in operator position has no registered operator.
    UnknownOperator {
        /// The symbol that was looked up.
        name: String,
    },
    /// The first element of an expression is not a symbol.
    ExpectedOperator {
        /// Rendering of what was found instead.
        found: String,
    },
    /// The wrong number of arguments was supplied to an operator.
    ArgumentCount {
        /// The operator being applied.
        operator: String,
        /// Smallest accepted count.
        min:      usize,
        /// Largest accepted count.
        max:      usize,
        /// The count that was supplied.
        found:    usize,
    },
    /// An operand had a type the operator does not accept.
    TypeError {
        /// The operator being applied.
        operator: String,
        /// Details about the type mismatch.
        details:  String,
    },
    /// A value cannot be converted to the requested type.
    Conversion {
        /// Type of the value.
        from:  ValueType,
        /// Requested type.
        to:    ValueType,
        /// Rendering of the value.
        value: String,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The operator being applied.
        operator: String,
    },
    /// A floating point operation produced an infinite or NaN result.
    NonFiniteResult {
        /// The operator being applied.
        operator: String,
    },
    /// A symbol was dereferenced without any binding.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A name is already bound as a kind that cannot be replaced.
    Redefinition {
        /// The name being defined.
        name:    String,
        /// What the name is currently bound as.
        details: String,
    },
    /// The depth of nested user function calls exceeded the ceiling.
    RecursionLimit {
        /// The configured ceiling.
        limit: usize,
    },
    /// No clause of a `cond` form had a true condition.
    NoConditionMatched,
    /// A special form received syntax of the wrong shape.
    MalformedForm {
        /// The form being evaluated.
        operator: String,
        /// What was wrong with it.
        details:  String,
    },
}

impl From<ParseError> for RuntimeError {
    fn from(error: ParseError) -> Self {
        Self::Syntax(error)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(error) => write!(f, "{error}"),
            Self::UnknownOperator { name } => write!(f, "Unknown operator '{name}'."),
            Self::ExpectedOperator { found } => {
                write!(f, "Expected an operator symbol, got '{found}'.")
            },
            Self::ArgumentCount { operator,
                                  min,
                                  max,
                                  found, } => {
                if min == max {
                    write!(f,
                           "Received {found} arguments for operator {operator}, expected: {min}.")
                } else if found < min {
                    write!(f,
                           "Received {found} arguments for operator {operator}, minimum expected arguments: {min}.")
                } else {
                    write!(f,
                           "Received {found} arguments for operator {operator}, maximum expected arguments: {max}.")
                }
            },
            Self::TypeError { operator, details } => {
                write!(f, "Type error in operator {operator}: {details}.")
            },
            Self::Conversion { from, to, value } => {
                write!(f, "Cannot convert {value} from {from} to {to}.")
            },
            Self::DivisionByZero { operator } => {
                write!(f, "Division by zero in operator {operator}.")
            },
            Self::NonFiniteResult { operator } => {
                write!(f, "Operator {operator} produced a result that is not a finite number.")
            },
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'."),
            Self::Redefinition { name, details } => {
                write!(f, "Cannot redefine '{name}': it is already defined as {details}.")
            },
            Self::RecursionLimit { limit } => {
                write!(f, "Reached the recursion limit of {limit}. Terminating.")
            },
            Self::NoConditionMatched => write!(f, "None of the arguments for cond evaluated to true."),
            Self::MalformedForm { operator, details } => {
                write!(f, "Malformed {operator} form: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(error) => Some(error),
            _ => None,
        }
    }
}
