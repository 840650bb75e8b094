use std::iter::Peekable;

use crate::{ast::Node, error::ParseError, interpreter::lexer::Token};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses one root expression from the front of the token stream.
///
/// This is the entry point for building a syntax tree. The stream is advanced
/// past the parsed expression only; whatever follows stays in the iterator for
/// the next call.
///
/// Rules:
/// - no tokens left: `Ok(None)`, the caller decides whether that is an error;
/// - exactly one token left: a leaf, unless that token is a delimiter;
/// - otherwise the expression must be a parenthesized list.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
///
/// # Returns
/// The parsed node, or `None` when the stream is exhausted.
///
/// # Errors
/// - `ExpectedValue` for a lone `(` or `)`.
/// - `ExpectedOpenParen` if a multi-token expression does not start with `(`.
/// - `UnexpectedEndOfInput` if a list is never closed.
///
/// # Example
/// ```
/// use lambda::interpreter::{lexer::tokenize, parser::core::parse_expression};
///
/// let tokens = tokenize("(+ 1 2) (* 3 4)");
/// let mut iter = tokens.iter().peekable();
///
/// let first = parse_expression(&mut iter).unwrap().unwrap();
/// assert_eq!(first.to_string(), "(+ 1 2)");
///
/// let second = parse_expression(&mut iter).unwrap().unwrap();
/// assert_eq!(second.to_string(), "(* 3 4)");
///
/// assert!(parse_expression(&mut iter).unwrap().is_none());
/// ```
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut ahead = tokens.clone();
    match (ahead.next(), ahead.next()) {
        (None, _) => Ok(None),
        (Some(_), None) => parse_single(tokens).map(Some),
        (Some(_), Some(_)) => parse_list(tokens).map(Some),
    }
}

/// Parses the only remaining token as a leaf.
fn parse_single<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token::Atom(text)) => Ok(Node::Leaf(text.clone())),
        Some(tok) => Err(ParseError::ExpectedValue { found: tok.to_string() }),
        None => Err(ParseError::UnexpectedEndOfInput),
    }
}

/// Parses a parenthesized list and all of its children.
///
/// Grammar: `list := "(" (atom | list)* ")"`
fn parse_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token::LParen) => {},
        Some(tok) => return Err(ParseError::ExpectedOpenParen { found: tok.to_string() }),
        None => return Err(ParseError::UnexpectedEndOfInput),
    }

    let mut children = Vec::new();

    loop {
        match tokens.peek() {
            Some(Token::RParen) => {
                tokens.next();
                return Ok(Node::List(children));
            },
            Some(Token::LParen) => children.push(parse_list(tokens)?),
            Some(Token::Atom(text)) => {
                children.push(Node::Leaf(text.clone()));
                tokens.next();
            },
            None => return Err(ParseError::UnexpectedEndOfInput),
        }
    }
}
