/// The environment module implements lexical scopes.
///
/// An environment maps names to values and links to the scope it is nested
/// in. Scopes are reference counted so a closure keeps its defining scope
/// alive after the call that created it has returned.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// applies operators and functions, manages bindings, and produces results.
/// It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every AST node variant.
/// - Handles bindings, closures and `return` unwinding.
/// - Reports runtime errors such as type mismatches or unknown identifiers.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens one at a time,
/// each corresponding to an identifier, literal, operator, delimiter or
/// keyword. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, literal and
///   line.
/// - Handles integer and string literals, identifiers and operators.
/// - Turns unrecognized input into `ILLEGAL` tokens instead of failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser pulls tokens from the lexer and constructs the AST with Pratt
/// parsing, recording syntax errors as it goes instead of stopping at the
/// first one.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares `Object`, the value every expression evaluates to,
/// together with the hash map type backing hash values and the canonical
/// keys used to index it.
///
/// # Responsibilities
/// - Defines the `Object` enum and all supported value variants.
/// - Provides type tags, truthiness and hash keys.
/// - Renders values the way programs see them.
pub mod value;
