#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all syntax errors of the language.
pub enum ParseError {
    /// The input held no tokens at all.
    NothingToEvaluate,
    /// A value was expected, but a lone delimiter was found.
    ExpectedValue {
        /// The delimiter encountered.
        found: String,
    },
    /// An expression with several tokens did not start with `(`.
    ExpectedOpenParen {
        /// The token found instead.
        found: String,
    },
    /// The input ended before a closing `)` was found.
    UnexpectedEndOfInput,
    /// An expression `()` with no children reached the evaluator.
    EmptyExpression,
    /// A token did not match the literal pattern of any value type.
    UnclassifiedToken {
        /// The offending token.
        token: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToEvaluate => write!(f, "Syntax error: Nothing to evaluate."),
            Self::ExpectedValue { found } => {
                write!(f, "Syntax error: Expected value, got delimiter '{found}'.")
            },
            Self::ExpectedOpenParen { found } => {
                write!(f, "Syntax error: Expected '(', got '{found}'.")
            },
            Self::UnexpectedEndOfInput => {
                write!(f, "Syntax error: Unexpected end of input, expected ')'.")
            },
            Self::EmptyExpression => write!(f, "Syntax error: Cannot evaluate an empty expression."),
            Self::UnclassifiedToken { token } => {
                write!(f, "Syntax error: Could not classify token '{token}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
