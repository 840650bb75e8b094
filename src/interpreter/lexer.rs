use logos::Logos;

/// Represents a lexical token in the source input.
///
/// The language only distinguishes the two delimiters from everything else:
/// any run of characters that is neither whitespace nor a parenthesis forms
/// one opaque atom, which is classified into a value type later on.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Any other text fragment, such as `42`, `"hello"`, `defun` or `<=`.
    #[regex(r"[^ \t\r\n\f()]+", |lex| lex.slice().to_string(), allow_greedy = true)]
    Atom(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Atom(text) => write!(f, "{text}"),
        }
    }
}

/// Splits raw text into a flat sequence of tokens.
///
/// Parentheses always form tokens of their own, even without surrounding
/// whitespace. Tokenizing never fails: any input yields a (possibly empty)
/// token sequence.
///
/// # Example
/// ```
/// use lambda::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("(+ 1(* 2 3))");
///
/// assert_eq!(tokens.len(), 9);
/// assert_eq!(tokens[0], Token::LParen);
/// assert_eq!(tokens[3], Token::LParen);
/// assert_eq!(tokens[4], Token::Atom("*".to_string()));
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok),
            Err(()) => tokens.push(Token::Atom(lexer.slice().to_string())),
        }
    }

    tokens
}

/// Joins tokens back into text, separated by single spaces.
///
/// # Example
/// ```
/// use lambda::interpreter::lexer::{join_tokens, tokenize};
///
/// assert_eq!(join_tokens(&tokenize("  (foo   1)\n(bar)")), "( foo 1 ) ( bar )");
/// ```
#[must_use]
pub fn join_tokens<'a, I>(tokens: I) -> String
    where I: IntoIterator<Item = &'a Token>
{
    tokens.into_iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}
