use num_bigint::BigInt;

use crate::{
    error::ParseError,
    interpreter::value::core::{Symbol, Value},
};

/// Characters allowed in a symbol besides ASCII letters and digits.
const SYMBOL_PUNCTUATION: &str = "_+-*/<>=!?%&^~.$";

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `"text"` or `'text'`
    Str,
    /// `42`
    Integer,
    /// `92233720368547758070`
    BigInteger,
    /// `4.2`
    Float,
    /// `true`
    Bool,
    /// `name`
    Symbol,
    /// Unevaluated syntax. Never produced from a single token.
    Raw,
}

impl ValueType {
    /// The order in which token text is matched against literal patterns.
    /// More specific types come first; `Symbol` is the fallback.
    pub const INFERENCE_ORDER: [Self; 6] = [Self::Str,
                                            Self::Integer,
                                            Self::BigInteger,
                                            Self::Float,
                                            Self::Bool,
                                            Self::Symbol];

    /// Returns `true` if `text` is a well-formed literal of this type.
    ///
    /// # Example
    /// ```
    /// use lambda::interpreter::value::kind::ValueType;
    ///
    /// assert!(ValueType::Integer.matches("-1"));
    /// assert!(!ValueType::Integer.matches("1.2"));
    /// assert!(ValueType::Float.matches("1"));
    /// assert!(ValueType::BigInteger.matches("123456789012345678901234567890"));
    /// assert!(!ValueType::Str.matches("\"unterminated"));
    /// ```
    #[must_use]
    pub fn matches(self, text: &str) -> bool {
        self.parse(text).is_some()
    }

    /// Builds a value of this type from `text`, or `None` if `text` is not a
    /// literal of this type.
    #[must_use]
    pub fn parse(self, text: &str) -> Option<Value> {
        match self {
            Self::Str => parse_string(text).map(Value::Str),
            Self::Integer => text.parse::<i64>().ok().map(Value::Integer),
            Self::BigInteger => text.parse::<BigInt>().ok().map(Value::BigInteger),
            Self::Float => parse_float(text).map(Value::Float),
            Self::Bool => match text {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            Self::Symbol => {
                is_symbol(text).then(|| Value::Symbol(Symbol::Variable(text.to_string())))
            },
            Self::Raw => None,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Str => "string",
            Self::Integer => "int",
            Self::BigInteger => "bigint",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Symbol => "symbol",
            Self::Raw => "ast",
        };
        write!(f, "{name}")
    }
}

/// Classifies the text of one token into the first matching value type.
///
/// # Errors
/// `ParseError::UnclassifiedToken` if no type accepts the text.
///
/// # Example
/// ```
/// use lambda::interpreter::value::{core::Value, kind::classify};
///
/// // Too large for 64 bits, but still an integer literal.
/// let big = classify("9223372036854775808").unwrap();
/// assert!(matches!(big, Value::BigInteger(_)));
///
/// assert_eq!(classify("true").unwrap(), Value::Bool(true));
/// ```
pub fn classify(text: &str) -> Result<Value, ParseError> {
    ValueType::INFERENCE_ORDER.iter()
                              .find_map(|kind| kind.parse(text))
                              .ok_or_else(|| ParseError::UnclassifiedToken { token: text.to_string() })
}

/// Strips matching single or double quotes.
fn parse_string(text: &str) -> Option<String> {
    ['"', '\''].into_iter().find_map(|quote| {
                              text.strip_prefix(quote)
                                  .and_then(|rest| rest.strip_suffix(quote))
                                  .map(str::to_string)
                          })
}

/// Accepts finite decimal literals only; `inf` and `NaN` are symbols.
fn parse_float(text: &str) -> Option<f64> {
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn is_symbol(text: &str) -> bool {
    let mut chars = text.chars();

    chars.next()
         .is_some_and(|c| c.is_alphabetic() || SYMBOL_PUNCTUATION.contains(c))
    && chars.all(|c| c.is_alphanumeric() || SYMBOL_PUNCTUATION.contains(c))
}
