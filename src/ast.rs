/// A node of the syntax tree built from a token stream.
///
/// A `Node` is either a leaf holding the text of one token, or a list of
/// child nodes written as `( ... )` in source code. Trees are built once per
/// root expression and only read afterwards; special forms such as `cond` and
/// `defun` keep clones of the children they receive unevaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single token, e.g. `42`, `"text"` or `defun`.
    Leaf(String),
    /// A parenthesized sequence of child nodes.
    List(Vec<Self>),
}

impl Node {
    /// Returns the token text if this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Returns the children if this node is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::Leaf(_) => None,
            Self::List(children) => Some(children),
        }
    }
}

/// Renders the node as a canonical S-expression: children separated by single
/// spaces, no padding inside the parentheses.
///
/// # Example
/// ```
/// use lambda::ast::Node;
///
/// let node = Node::List(vec![Node::Leaf("+".into()),
///                            Node::Leaf("1".into()),
///                            Node::List(vec![Node::Leaf("*".into()),
///                                            Node::Leaf("2".into()),
///                                            Node::Leaf("3".into())])]);
///
/// assert_eq!(node.to_string(), "(+ 1 (* 2 3))");
/// ```
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(text) => write!(f, "{text}"),
            Self::List(children) => {
                write!(f, "(")?;

                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }

                    write!(f, "{child}")?;
                }

                write!(f, ")")
            },
        }
    }
}
