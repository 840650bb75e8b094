/// Stack growth for deep recursion.
///
/// The evaluator recurses once per nested expression and once per user
/// function call. Each recursive step runs through
/// [`ensure_sufficient_stack`](stack::ensure_sufficient_stack) so that deep
/// call chains hit the interpreter's recursion ceiling rather than the end of
/// the native stack.
pub mod stack;
