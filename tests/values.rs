use lambda::{
    Environment, Value,
    ast::Node,
    error::ParseError,
    eval_all,
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::parse_expression,
        value::{
            coercion::{BOOLEAN, NUMERIC, coerce},
            core::Symbol,
            kind::{ValueType, classify},
        },
    },
};
use num_bigint::BigInt;

#[test]
fn literals_are_classified_in_order() {
    assert_eq!(classify("\"hi\"").unwrap(), Value::Str("hi".to_string()));
    assert_eq!(classify("'hi'").unwrap(), Value::Str("hi".to_string()));
    assert_eq!(classify("-42").unwrap(), Value::Integer(-42));
    assert_eq!(classify("2.5").unwrap(), Value::Float(2.5));
    assert_eq!(classify("1e3").unwrap(), Value::Float(1000.0));
    assert_eq!(classify("false").unwrap(), Value::Bool(false));
    assert_eq!(classify("foo-bar?").unwrap(),
               Value::Symbol(Symbol::Variable("foo-bar?".to_string())));

    let big: BigInt = "99999999999999999999".parse().unwrap();
    assert_eq!(classify("99999999999999999999").unwrap(), Value::BigInteger(big));
}

#[test]
fn non_literals_are_rejected() {
    assert!(classify("]]]").is_err());
    assert!(classify("\"open").is_err());
    assert!(classify("'mixed\"").is_err());
    assert!(classify("1abc").is_err());
}

#[test]
fn infinity_and_nan_are_symbols() {
    assert!(matches!(classify("inf").unwrap(), Value::Symbol(_)));
    assert!(matches!(classify("NaN").unwrap(), Value::Symbol(_)));
}

#[test]
fn values_render_like_literals() {
    assert_eq!(Value::Str("a b".to_string()).to_string(), "\"a b\"");
    assert_eq!(Value::Integer(-3).to_string(), "-3");
    assert_eq!(Value::Float(2.0).to_string(), "2");
    assert_eq!(Value::Float(0.65).to_string(), "0.65");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Symbol(Symbol::Function("f".to_string())).to_string(), "<function: f>");

    let raw = Value::Raw(vec![Node::Leaf("x".into()),
                              Node::List(vec![Node::Leaf("+".into()), Node::Leaf("1".into())])]);
    assert_eq!(raw.to_string(), "x (+ 1)");
}

#[test]
fn conversions() {
    assert_eq!(Value::Integer(3).to(ValueType::BigInteger).unwrap(),
               Value::BigInteger(BigInt::from(3)));
    assert_eq!(Value::Integer(3).to(ValueType::Float).unwrap(), Value::Float(3.0));

    // Beyond 2^53 integers round to the nearest float.
    assert_eq!(Value::Integer(i64::MAX).to(ValueType::Float).unwrap(),
               Value::Float(9_223_372_036_854_775_808.0));
    assert!(Value::BigInteger(BigInt::from(1)).to(ValueType::Float).is_err());
    assert!(Value::Float(1.0).to(ValueType::Integer).is_err());
    assert!(Value::Str("1".into()).to(ValueType::Integer).is_err());
}

#[test]
fn big_integers_are_narrowed_when_they_fit() {
    assert_eq!(Value::from(BigInt::from(7)), Value::Integer(7));

    let big = BigInt::from(i64::MAX) + 1;
    assert!(matches!(Value::from(big), Value::BigInteger(_)));
}

#[test]
fn coercion_picks_highest_precedence() {
    let (kind, values) = coerce("+",
                                vec![Value::Integer(1), Value::BigInteger(BigInt::from(2))],
                                NUMERIC).unwrap();
    assert_eq!(kind, ValueType::BigInteger);
    assert_eq!(values,
               vec![Value::BigInteger(BigInt::from(1)), Value::BigInteger(BigInt::from(2))]);

    let (kind, values) = coerce("+", vec![Value::Integer(1), Value::Integer(2)], NUMERIC).unwrap();
    assert_eq!(kind, ValueType::Integer);
    assert_eq!(values, vec![Value::Integer(1), Value::Integer(2)]);

    assert!(coerce("and", vec![Value::Bool(true), Value::Integer(1)], BOOLEAN).is_err());
}

#[test]
fn lexer_separates_parentheses() {
    let tokens = tokenize("((a)b)");
    assert_eq!(tokens,
               vec![Token::LParen,
                    Token::LParen,
                    Token::Atom("a".to_string()),
                    Token::RParen,
                    Token::Atom("b".to_string()),
                    Token::RParen]);

    assert!(tokenize(" \t\n ").is_empty());
}

#[test]
fn parser_reads_one_root_at_a_time() {
    let tokens = tokenize("x");
    let mut iter = tokens.iter().peekable();
    assert_eq!(parse_expression(&mut iter).unwrap(), Some(Node::Leaf("x".to_string())));
    assert_eq!(parse_expression(&mut iter).unwrap(), None);

    // Several tokens must form a list.
    let tokens = tokenize("x y");
    assert_eq!(parse_expression(&mut tokens.iter().peekable()),
               Err(ParseError::ExpectedOpenParen { found: "x".to_string() }));

    let source = "(+ 1 1) ".repeat(20_000);
    let tokens = tokenize(&source);
    let mut iter = tokens.iter().peekable();
    let mut roots = 0;
    while parse_expression(&mut iter).unwrap().is_some() {
        roots += 1;
    }
    assert_eq!(roots, 20_000);
}

#[test]
fn long_buffers_evaluate_every_expression() {
    let mut env = Environment::new();
    let source = "(defvar x 1) ".to_string() + &"(+ x 1) ".repeat(20_000);

    let values = eval_all(&source, &mut env).unwrap();
    assert_eq!(values.len(), 20_001);
    assert_eq!(values.last(), Some(&Value::Integer(2)));
}
