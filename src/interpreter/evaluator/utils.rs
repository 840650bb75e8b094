use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Applies the operator named by `head` to `arguments`.
    ///
    /// The operator's arity is checked against the number of argument nodes
    /// before any of them is evaluated. Depending on the operator's argument
    /// policy the nodes are then:
    /// - wrapped unevaluated into a single `Value::Raw`,
    /// - evaluated left to right, keeping symbols,
    /// - evaluated left to right and dereferenced.
    ///
    /// # Parameters
    /// - `head`: The first child of the list; must be a leaf.
    /// - `arguments`: The remaining children.
    ///
    /// # Returns
    /// The value produced by the operator.
    ///
    /// # Errors
    /// - `ExpectedOperator` if `head` is a list.
    /// - `UnknownOperator` if `head` is not bound as an operator.
    /// - `ArgumentCount` if the arity does not match.
    /// - Any error raised while evaluating an argument or by the operator.
    ///
    /// # Example
    /// ```
    /// use lambda::{Environment, ast::Node, interpreter::value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// let args = [Node::Leaf("'a'".into()), Node::Leaf("'b'".into())];
    ///
    /// let v = env.eval_application(&Node::Leaf("+".into()), &args).unwrap();
    /// assert_eq!(v, Value::Str("ab".to_string()));
    /// ```
    pub fn eval_application(&mut self, head: &Node, arguments: &[Node]) -> EvalResult<Value> {
        let Some(symbol) = head.as_leaf() else {
            return Err(RuntimeError::ExpectedOperator { found: head.to_string() });
        };

        let operator = self.operator(symbol)
                           .cloned()
                           .ok_or_else(|| RuntimeError::UnknownOperator { name: symbol.to_string() })?;

        operator.arity.check(symbol, arguments.len())?;
        trace!(operator = symbol, arguments = arguments.len(), "dispatching");

        let values = if operator.wants_raw_ast() {
            vec![Value::Raw(arguments.to_vec())]
        } else {
            self.eval_arguments(arguments, operator.resolves_symbols())?
        };

        self.invoke(&operator, values)
    }

    /// Evaluates argument nodes from left to right, optionally dereferencing
    /// variable symbols. Stops at the first error.
    fn eval_arguments(&mut self, arguments: &[Node], resolve: bool) -> EvalResult<Vec<Value>> {
        arguments.iter()
                 .map(|argument| {
                     let value = self.evaluate(argument)?;
                     if resolve { self.resolve(value) } else { Ok(value) }
                 })
                 .collect()
    }
}

/// Splits the arguments of a two-operand operator.
///
/// The arity has already been checked by the dispatcher; a mismatch here is
/// still reported rather than trusted.
///
/// # Errors
/// `ArgumentCount` if there are not exactly two arguments.
pub fn two(operator: &str, arguments: Vec<Value>) -> EvalResult<(Value, Value)> {
    let found = arguments.len();
    let mut iter = arguments.into_iter();

    match (iter.next(), iter.next(), iter.next()) {
        (Some(left), Some(right), None) => Ok((left, right)),
        _ => Err(RuntimeError::ArgumentCount { operator: operator.to_string(),
                                               min: 2,
                                               max: 2,
                                               found }),
    }
}

/// Unwraps the syntax handed to a special form.
///
/// # Errors
/// `MalformedForm` if the arguments are not a single `Value::Raw`.
pub fn raw_nodes(operator: &str, arguments: Vec<Value>) -> EvalResult<Vec<Node>> {
    let mut iter = arguments.into_iter();

    match (iter.next(), iter.next()) {
        (Some(Value::Raw(nodes)), None) => Ok(nodes),
        _ => Err(RuntimeError::MalformedForm { operator: operator.to_string(),
                                               details:  "expected unevaluated syntax".to_string(), }),
    }
}
