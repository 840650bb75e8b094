use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            arithmetic::{ArithmeticOp, arithmetic},
            comparison::{Comparison, compare, equal},
            core::{Environment, EvalResult},
            logic::{LogicOp, logic},
        },
        value::core::Value,
    },
};

/// Upper bound on the argument count of variadic operators.
pub const VARIADIC_LIMIT: usize = 100;

/// Specifies the allowed number of arguments for an operator.
///
/// - `Exact(n)` means the operator must receive exactly `n` arguments.
/// - `Range(min, max)` accepts any count from `min` to `max`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
}

impl Arity {
    /// Smallest accepted argument count.
    #[must_use]
    pub const fn min(self) -> usize {
        match self {
            Self::Exact(n) | Self::Range(n, _) => n,
        }
    }

    /// Largest accepted argument count.
    #[must_use]
    pub const fn max(self) -> usize {
        match self {
            Self::Exact(n) | Self::Range(_, n) => n,
        }
    }

    /// Tests whether `found` arguments satisfy this arity.
    ///
    /// # Errors
    /// `ArgumentCount` naming `operator` if the count is out of bounds.
    pub fn check(self, operator: &str, found: usize) -> EvalResult<()> {
        if (self.min()..=self.max()).contains(&found) {
            return Ok(());
        }

        Err(RuntimeError::ArgumentCount { operator: operator.to_string(),
                                          min: self.min(),
                                          max: self.max(),
                                          found })
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Range(min, max) => write!(f, "{min}..={max}"),
        }
    }
}

/// How the evaluator prepares arguments before calling an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentPolicy {
    /// Evaluate every argument and dereference variable symbols.
    Resolved,
    /// Evaluate every argument but keep symbols as they are (`defvar` needs
    /// the name it binds).
    Unresolved,
    /// Do not evaluate; pass all argument nodes as one `Value::Raw`.
    Raw,
}

/// The built-in operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    DefVar,
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,
    Cond,
    Defun,
}

/// A function defined with `defun`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFunction {
    /// The name it was defined under.
    pub name:       String,
    /// Formal parameter names, in order.
    pub parameters: Vec<String>,
    /// The unevaluated body.
    pub body:       Node,
}

/// What runs when an operator is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    Builtin(Builtin),
    User(Rc<UserFunction>),
}

/// Describes an operator bound in an [`Environment`].
///
/// Descriptors are immutable once registered; environments share them
/// through `Rc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// The symbol the operator was registered under.
    pub symbol:    String,
    /// Accepted argument counts.
    pub arity:     Arity,
    /// How arguments are prepared.
    pub arguments: ArgumentPolicy,
    /// The implementation.
    pub handler:   Handler,
}

impl Operator {
    /// Returns `true` if arguments are passed as unevaluated syntax.
    #[must_use]
    pub fn wants_raw_ast(&self) -> bool {
        self.arguments == ArgumentPolicy::Raw
    }

    /// Returns `true` if variable symbols are dereferenced before dispatch.
    #[must_use]
    pub fn resolves_symbols(&self) -> bool {
        self.arguments == ArgumentPolicy::Resolved
    }

    /// Returns `true` for operators registered at environment creation.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        matches!(self.handler, Handler::Builtin(_))
    }
}

/// Defines built-in operators by generating a lookup table and a name list.
///
/// Each entry provides:
/// - the symbol,
/// - an arity specification,
/// - the argument policy,
/// - the `Builtin` implementing it.
///
/// The macro produces:
/// - `BuiltinDef` (registration metadata),
/// - `BUILTIN_TABLE` (static table read by `Environment::new`),
/// - `BUILTIN_OPERATORS` (public list of built-in symbols).
macro_rules! builtin_operators {
    (
        $(
            $symbol:literal => {
                arity: $arity:expr,
                arguments: $policy:ident,
                builtin: $builtin:ident $(,)?
            }
        ),* $(,)?
    ) => {
        pub(crate) struct BuiltinDef {
            pub(crate) symbol: &'static str,
            arity:             Arity,
            arguments:         ArgumentPolicy,
            builtin:           Builtin,
        }
        pub(crate) static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { symbol:    $symbol,
                             arity:     $arity,
                             arguments: ArgumentPolicy::$policy,
                             builtin:   Builtin::$builtin },
            )*
        ];
        pub const BUILTIN_OPERATORS: &[&str] = &[
            $($symbol,)*
        ];
    };
}

builtin_operators! {
    "+"      => { arity: Arity::Range(2, VARIADIC_LIMIT), arguments: Resolved,   builtin: Add },
    "-"      => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: Sub },
    "*"      => { arity: Arity::Range(2, VARIADIC_LIMIT), arguments: Resolved,   builtin: Mul },
    "/"      => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: Div },
    "defvar" => { arity: Arity::Exact(2),                 arguments: Unresolved, builtin: DefVar },
    "="      => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: Equal },
    ">"      => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: Greater },
    ">="     => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: GreaterEqual },
    "<"      => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: Less },
    "<="     => { arity: Arity::Exact(2),                 arguments: Resolved,   builtin: LessEqual },
    "and"    => { arity: Arity::Range(2, VARIADIC_LIMIT), arguments: Resolved,   builtin: And },
    "or"     => { arity: Arity::Range(2, VARIADIC_LIMIT), arguments: Resolved,   builtin: Or },
    "cond"   => { arity: Arity::Range(1, VARIADIC_LIMIT), arguments: Raw,        builtin: Cond },
    "defun"  => { arity: Arity::Exact(3),                 arguments: Raw,        builtin: Defun },
}

impl BuiltinDef {
    pub(crate) fn to_operator(&self) -> Operator {
        Operator { symbol:    self.symbol.to_string(),
                   arity:     self.arity,
                   arguments: self.arguments,
                   handler:   Handler::Builtin(self.builtin), }
    }
}

impl Environment {
    /// Calls the handler of `operator` with prepared arguments.
    ///
    /// Errors from the handler are returned untouched.
    pub(crate) fn invoke(&mut self, operator: &Operator, arguments: Vec<Value>) -> EvalResult<Value> {
        trace!(operator = %operator.symbol, arguments = arguments.len(), "invoking operator");

        match &operator.handler {
            Handler::Builtin(builtin) => self.apply_builtin(*builtin, arguments),
            Handler::User(function) => self.call_user_function(function, arguments),
        }
    }

    fn apply_builtin(&mut self, builtin: Builtin, arguments: Vec<Value>) -> EvalResult<Value> {
        match builtin {
            Builtin::Add => arithmetic(ArithmeticOp::Add, arguments),
            Builtin::Sub => arithmetic(ArithmeticOp::Sub, arguments),
            Builtin::Mul => arithmetic(ArithmeticOp::Mul, arguments),
            Builtin::Div => arithmetic(ArithmeticOp::Div, arguments),
            Builtin::Equal => equal(arguments),
            Builtin::Greater => compare(Comparison::Greater, arguments),
            Builtin::GreaterEqual => compare(Comparison::GreaterEqual, arguments),
            Builtin::Less => compare(Comparison::Less, arguments),
            Builtin::LessEqual => compare(Comparison::LessEqual, arguments),
            Builtin::And => logic(LogicOp::And, arguments),
            Builtin::Or => logic(LogicOp::Or, arguments),
            Builtin::DefVar => self.eval_defvar(arguments),
            Builtin::Cond => self.eval_cond(arguments),
            Builtin::Defun => self.eval_defun(arguments),
        }
    }
}
