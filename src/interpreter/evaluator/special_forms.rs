use std::{collections::HashSet, rc::Rc};

use tracing::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            operator::{ArgumentPolicy, Arity, Handler, Operator, UserFunction},
            utils::{raw_nodes, two},
        },
        value::core::{Symbol, Value},
    },
};

impl Environment {
    /// Evaluates `(defvar name value)`.
    ///
    /// The name arrives as an unresolved symbol. The value must already be a
    /// concrete value; binding one variable directly to another name is
    /// rejected. An existing variable of the same name is overwritten.
    ///
    /// # Returns
    /// The bound value.
    ///
    /// # Errors
    /// - `TypeError` if the name is not a symbol or the value is one.
    /// - `Redefinition` if the name is bound as an operator.
    ///
    /// # Example
    /// ```
    /// use lambda::{Environment, eval};
    ///
    /// let mut env = Environment::new();
    ///
    /// assert_eq!(eval("(defvar x 2.0)", &mut env).value.as_deref(), Some("2"));
    /// assert_eq!(eval("(+ x 2.0)", &mut env).value.as_deref(), Some("4"));
    /// assert!(eval("(defvar y x)", &mut env).error.is_some());
    /// ```
    pub(crate) fn eval_defvar(&mut self, arguments: Vec<Value>) -> EvalResult<Value> {
        let (target, value) = two("defvar", arguments)?;

        let name = match target {
            Value::Symbol(Symbol::Variable(name)) => name,
            other => {
                return Err(RuntimeError::TypeError { operator: "defvar".to_string(),
                                                     details:  format!("expected {other} to be a symbol, but was {}",
                                                                       other.value_type()), });
            },
        };
        if value.is_symbol() {
            return Err(RuntimeError::TypeError { operator: "defvar".to_string(),
                                                 details:  format!("expected {value} to not be a symbol"), });
        }

        self.define_variable(&name, value.clone())?;
        Ok(value)
    }

    /// Evaluates `(cond (condition value) ...)`.
    ///
    /// Clauses are tried in order. The first condition that evaluates to
    /// `true` selects its value expression, which is evaluated and resolved.
    /// Later clauses are not looked at.
    ///
    /// # Errors
    /// - `MalformedForm` if a clause is not a two-element list.
    /// - `TypeError` if a condition does not evaluate to a boolean.
    /// - `NoConditionMatched` if every condition is `false`.
    ///
    /// # Example
    /// ```
    /// use lambda::{Environment, eval};
    ///
    /// let mut env = Environment::new();
    ///
    /// let r = eval("(cond ((> 2 3) 1) ((= 3 3) 2))", &mut env);
    /// assert_eq!(r.value.as_deref(), Some("2"));
    ///
    /// let r = eval("(cond (false 1) (false 2))", &mut env);
    /// assert!(r.error.is_some());
    /// ```
    pub(crate) fn eval_cond(&mut self, arguments: Vec<Value>) -> EvalResult<Value> {
        let clauses = raw_nodes("cond", arguments)?;

        for (index, clause) in clauses.iter().enumerate() {
            let [condition, value] = clause.as_list().unwrap_or_default() else {
                return Err(RuntimeError::MalformedForm { operator: "cond".to_string(),
                                                         details:  format!("clause {} should be of the format `(condition value)`",
                                                                           index + 1), });
            };

            let evaluated = self.evaluate(condition)?;
            let matched = match self.resolve(evaluated)? {
                Value::Bool(b) => b,
                other => {
                    return Err(RuntimeError::TypeError { operator: "cond".to_string(),
                                                         details:  format!("condition {} was of type {} instead of bool",
                                                                           index + 1,
                                                                           other.value_type()), });
                },
            };

            if matched {
                let result = self.evaluate(value)?;
                return self.resolve(result);
            }
        }

        Err(RuntimeError::NoConditionMatched)
    }

    /// Evaluates `(defun name (params...) body)`.
    ///
    /// Registers a user function taking exactly as many arguments as it has
    /// parameters. The body is kept unevaluated until the function is called.
    ///
    /// An empty parameter list is accepted, but such a function cannot be
    /// called: `(f)` has a single child and unwraps to the bare symbol `f`,
    /// which evaluates to the function value itself.
    ///
    /// # Returns
    /// A `Symbol::Function` referring to the new function.
    ///
    /// # Errors
    /// - `MalformedForm` if the name or a parameter is not a plain symbol, the
    ///   parameter list is not a list, or a parameter appears twice.
    /// - `Redefinition` if the name is bound as a variable or a built-in.
    ///
    /// # Example
    /// ```
    /// use lambda::{Environment, eval};
    ///
    /// let mut env = Environment::new();
    ///
    /// let r = eval("(defun add (a b) (+ a b))", &mut env);
    /// assert_eq!(r.value.as_deref(), Some("<function: add>"));
    /// assert_eq!(eval("(add 11 10)", &mut env).value.as_deref(), Some("21"));
    /// ```
    pub(crate) fn eval_defun(&mut self, arguments: Vec<Value>) -> EvalResult<Value> {
        let nodes = raw_nodes("defun", arguments)?;
        let [name, parameters, body] = nodes.as_slice() else {
            return Err(RuntimeError::MalformedForm { operator: "defun".to_string(),
                                                     details:  format!("expected a name, a parameter list and a body, got {} forms",
                                                                       nodes.len()), });
        };

        let name = symbol_name(name).ok_or_else(|| RuntimeError::MalformedForm { operator: "defun".to_string(),
                                                                                  details:  format!("expecting function name, got {name}"), })?;

        let Some(parameters) = parameters.as_list() else {
            return Err(RuntimeError::MalformedForm { operator: "defun".to_string(),
                                                     details:  format!("missing list of parameters for function {name}"), });
        };

        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let Some(parameter_name) = symbol_name(parameter) else {
                return Err(RuntimeError::MalformedForm { operator: "defun".to_string(),
                                                         details:  format!("malformed parameter {parameter} in function {name}"), });
            };
            if !seen.insert(parameter_name.clone()) {
                return Err(RuntimeError::MalformedForm { operator: "defun".to_string(),
                                                         details:  format!("duplicate parameter {parameter_name} in function {name}"), });
            }
            names.push(parameter_name);
        }

        let function = UserFunction { name:       name.clone(),
                                      parameters: names,
                                      body:       body.clone(), };

        self.define_operator(Operator { symbol:    name.clone(),
                                        arity:     Arity::Exact(function.parameters.len()),
                                        arguments: ArgumentPolicy::Resolved,
                                        handler:   Handler::User(Rc::new(function)), })?;

        Ok(Value::Symbol(Symbol::Function(name)))
    }

    /// Calls a user function with resolved arguments.
    ///
    /// The body runs in a derived environment where each parameter is bound
    /// to its argument. An argument that refers to an operator binds the
    /// parameter as an alias of that operator, so functions can be passed
    /// around by name. The result is resolved in the call's environment
    /// before it is returned.
    ///
    /// # Errors
    /// - `RecursionLimit` if the call would nest too deeply.
    /// - `ArgumentCount` if the argument count does not match.
    /// - Any error raised while evaluating the body.
    pub(crate) fn call_user_function(&self, function: &UserFunction, arguments: Vec<Value>) -> EvalResult<Value> {
        if arguments.len() != function.parameters.len() {
            return Err(RuntimeError::ArgumentCount { operator: function.name.clone(),
                                                     min:      function.parameters.len(),
                                                     max:      function.parameters.len(),
                                                     found:    arguments.len(), });
        }

        let mut scope = self.derive()?;
        debug!(function = %function.name, depth = scope.depth, "calling user function");

        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            scope.bind_parameter(parameter, argument)?;
        }

        let result = scope.evaluate(&function.body)?;
        scope.resolve(result)
    }

    fn bind_parameter(&mut self, parameter: &str, argument: Value) -> EvalResult<()> {
        if let Value::Symbol(Symbol::Function(target)) = &argument {
            let operator = self.operator(target)
                               .cloned()
                               .ok_or_else(|| RuntimeError::UnknownOperator { name: target.clone() })?;

            self.variables.remove(parameter);
            self.operators.insert(parameter.to_string(), operator);
            return Ok(());
        }

        self.operators.remove(parameter);
        self.variables.insert(parameter.to_string(), argument);
        Ok(())
    }
}

/// Returns the name if `node` is a leaf that classifies as a symbol.
fn symbol_name(node: &Node) -> Option<String> {
    match Value::parse(node.as_leaf()?) {
        Ok(Value::Symbol(symbol)) => Some(symbol.name().to_string()),
        _ => None,
    }
}
