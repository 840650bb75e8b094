use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::Node,
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::operator::{BUILTIN_TABLE, Operator},
        value::core::{Symbol, Value},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default ceiling for the depth of nested user function calls.
pub const DEFAULT_RECURSION_LIMIT: usize = 100_000;

/// Stores the bindings visible to an evaluation.
///
/// An environment maps symbols to operators and to variable values, and
/// tracks how deep in a chain of user function calls it sits.
///
/// ## Usage
///
/// One environment is created per session with [`Environment::new`], which
/// registers the built-in operators. `defvar` and `defun` add bindings to it
/// in place. Every user function call evaluates its body in a derived copy,
/// so bindings made or shadowed during the call never leak back out and later
/// changes to the caller cannot reach into a running call.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Operators by symbol, built-ins and user-defined functions alike.
    pub(crate) operators:       HashMap<String, Rc<Operator>>,
    /// Variable bindings.
    pub(crate) variables:       HashMap<String, Value>,
    /// Number of user function calls between the session and this scope.
    pub(crate) depth:           usize,
    /// Calls nested deeper than this fail with `RecursionLimit`.
    pub(crate) recursion_limit: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates a session environment with all built-in operators registered,
    /// no variables and the default recursion limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_recursion_limit(DEFAULT_RECURSION_LIMIT)
    }

    /// Creates a session environment with a custom recursion limit.
    ///
    /// # Example
    /// ```
    /// use lambda::{Environment, eval};
    ///
    /// let mut env = Environment::with_recursion_limit(10);
    /// eval("(defun down (n) (cond ((= n 0) 0) (true (down (- n 1)))))", &mut env);
    ///
    /// assert_eq!(eval("(down 5)", &mut env).value.as_deref(), Some("0"));
    /// assert!(eval("(down 50)", &mut env).error.is_some());
    /// ```
    #[must_use]
    pub fn with_recursion_limit(recursion_limit: usize) -> Self {
        let operators = BUILTIN_TABLE.iter()
                                     .map(|def| (def.symbol.to_string(), Rc::new(def.to_operator())))
                                     .collect();

        Self { operators,
               variables: HashMap::new(),
               depth: 0,
               recursion_limit }
    }

    /// Looks up the operator bound to `name`.
    #[must_use]
    pub fn operator(&self, name: &str) -> Option<&Rc<Operator>> {
        self.operators.get(name)
    }

    /// Looks up the value bound to the variable `name`.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Depth of nested user function calls this environment belongs to.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Binds a variable, replacing any previous value.
    ///
    /// # Errors
    /// `Redefinition` if `name` is bound as an operator.
    pub fn define_variable(&mut self, name: &str, value: Value) -> EvalResult<()> {
        if self.operators.contains_key(name) {
            return Err(RuntimeError::Redefinition { name:    name.to_string(),
                                                    details: "an operator".to_string(), });
        }

        debug!(name, %value, "defining variable");
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// Registers an operator under its symbol.
    ///
    /// User-defined functions may be replaced; built-in operators may not.
    ///
    /// # Errors
    /// `Redefinition` if the symbol is bound as a variable or a built-in.
    pub fn define_operator(&mut self, operator: Operator) -> EvalResult<()> {
        let name = operator.symbol.clone();

        if self.variables.contains_key(&name) {
            return Err(RuntimeError::Redefinition { name,
                                                    details: "a variable".to_string() });
        }
        if self.operators.get(&name).is_some_and(|existing| existing.is_builtin()) {
            return Err(RuntimeError::Redefinition { name,
                                                    details: "a built-in operator".to_string() });
        }

        debug!(name = %name, arity = %operator.arity, "defining operator");
        self.operators.insert(name, Rc::new(operator));
        Ok(())
    }

    /// Creates the environment for the body of a user function call: a copy
    /// of this one, one level deeper.
    ///
    /// # Errors
    /// `RecursionLimit` if the new depth exceeds the ceiling.
    pub(crate) fn derive(&self) -> EvalResult<Self> {
        let depth = self.depth + 1;
        if depth > self.recursion_limit {
            return Err(RuntimeError::RecursionLimit { limit: self.recursion_limit });
        }

        Ok(Self { operators: self.operators.clone(),
                  variables: self.variables.clone(),
                  depth,
                  recursion_limit: self.recursion_limit })
    }

    /// Evaluates a syntax tree and returns the resulting value.
    ///
    /// - A leaf is classified into a value; identifiers become
    ///   `Symbol::Variable` and are not dereferenced here.
    /// - An empty list is a syntax error.
    /// - A list with one child evaluates to that child.
    /// - Otherwise the first child names an operator that is applied to the
    ///   remaining children.
    ///
    /// The first error aborts the evaluation and is returned unchanged.
    ///
    /// # Example
    /// ```
    /// use lambda::{
    ///     Environment,
    ///     ast::Node,
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let mut env = Environment::new();
    /// let node = Node::List(vec![Node::Leaf("*".into()),
    ///                            Node::Leaf("6".into()),
    ///                            Node::Leaf("7".into())]);
    ///
    /// assert_eq!(env.evaluate(&node).unwrap(), Value::Integer(42));
    /// ```
    pub fn evaluate(&mut self, node: &Node) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match node {
            Node::Leaf(text) => Value::parse(text),
            Node::List(children) => match children.as_slice() {
                [] => Err(ParseError::EmptyExpression.into()),
                [only] => self.evaluate(only),
                [head, arguments @ ..] => self.eval_application(head, arguments),
            },
        })
    }

    /// Dereferences a variable symbol; other values are returned unchanged.
    ///
    /// A name bound as a variable yields its value. A name bound only as an
    /// operator yields a `Symbol::Function` referring to it.
    ///
    /// # Errors
    /// `UndefinedVariable` if the name has no binding of either kind.
    pub fn resolve(&self, value: Value) -> EvalResult<Value> {
        match value {
            Value::Symbol(Symbol::Variable(name)) => {
                if let Some(bound) = self.variables.get(&name) {
                    Ok(bound.clone())
                } else if self.operators.contains_key(&name) {
                    Ok(Value::Symbol(Symbol::Function(name)))
                } else {
                    Err(RuntimeError::UndefinedVariable { name })
                }
            },
            other => Ok(other),
        }
    }
}
