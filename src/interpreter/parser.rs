/// Core parsing logic.
///
/// Builds one root [`Node`](crate::ast::Node) at a time from a token stream,
/// leaving any following tokens untouched so that a buffer holding several
/// sibling expressions can be consumed one expression per call.
pub mod core;
