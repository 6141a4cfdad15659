/// The parser state and the Pratt expression loop.
///
/// Holds the current/peek token window, the accumulated syntax errors and the
/// `parse_program` entry point.
pub mod core;

/// Block parsing.
///
/// Parses brace-delimited statement sequences used by `if` branches and
/// function bodies.
pub mod block;

/// Statement parsing.
///
/// Dispatches on the leading token to `let`, `return` or expression
/// statements.
pub mod statement;

/// Prefix parse rules.
///
/// Everything that can start an expression: literals, identifiers, prefix
/// operators, grouping, `if`, `fn`, arrays and hashes.
pub mod unary;

/// Infix parse rules and the precedence table.
///
/// Binary operators, call expressions and index expressions.
pub mod binary;

/// Shared helpers for comma-separated lists and identifiers.
pub mod utils;
