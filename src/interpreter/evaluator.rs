/// Core evaluation logic and context management.
///
/// Contains the statement and expression dispatch, block and program
/// sequencing, and the `Err`-as-control-flow convention every other
/// evaluator module follows.
pub mod core;

/// Prefix operator evaluation.
///
/// Implements `!` (truthiness negation) and `-` (integer negation).
pub mod unary;

/// Infix operator evaluation.
///
/// Integer arithmetic and comparison, boolean equality and string
/// concatenation, plus the type-mismatch and unknown-operator errors.
pub mod binary;

/// Function evaluation.
///
/// Closure creation, argument evaluation and application of user-defined
/// and builtin functions.
pub mod function;

/// Array and hash evaluation.
///
/// Builds array and hash literals and evaluates index expressions.
pub mod collection;

/// Builtin functions.
///
/// The fixed table of functions implemented by the interpreter itself
/// (`len`, `first`, `last`, `rest`, `push`, `puts`).
pub mod builtin;
