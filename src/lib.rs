//! # monkey
//!
//! monkey is a tree-walking interpreter for the Monkey programming language,
//! written in Rust. It tokenizes, parses and evaluates programs with integers,
//! booleans, strings, arrays, hashes, first-class functions and closures.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        environment::{Env, Environment},
        evaluator::core::eval_program,
        lexer::Lexer,
        parser::core::Parser,
        value::core::Object,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expression` enums that represent
/// a program as a tree. The parser builds it, the evaluator walks it, and its
/// `Display` output re-parses to the same tree.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Syntax errors carry the line they were found on; runtime errors carry the
/// exact message a program sees.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, scopes and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the building blocks behind [`parse`] and [`run`].
pub mod interpreter;
/// General utilities shared by the parser and the evaluator.
///
/// Currently holds the stack-growth guard that keeps deep recursion on a
/// heap-allocated stack instead of overflowing the thread's own.
pub mod util;

/// Parses `source` into a [`Program`].
///
/// Fails with every syntax error found in the source when there is at least
/// one.
///
/// # Examples
/// ```
/// use monkey::parse;
///
/// let program = parse("a + b * c").unwrap();
/// assert_eq!(program.to_string(), "(a + (b * c))");
///
/// let errors = parse("let = 5; let x 5;").unwrap_err();
/// assert_eq!(errors.to_string().lines().count(), 2);
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    let errors = parser.into_errors();

    if errors.is_empty() {
        Ok(program)
    } else {
        tracing::debug!(count = errors.len(), "parse failed");
        Err(Error::Parse(errors))
    }
}

/// Parses and evaluates `source` in a fresh global environment and returns
/// the value of the program.
///
/// # Examples
/// ```
/// use monkey::{interpreter::value::core::Object, run};
///
/// let source = "let add = fn(a, b) { a + b }; add(2, 40)";
/// assert_eq!(run(source).unwrap(), Object::Integer(42));
///
/// let err = run("5 + true").unwrap_err();
/// assert_eq!(err.to_string(), "type mismatch: INTEGER + BOOLEAN");
/// ```
pub fn run(source: &str) -> Result<Object, Error> {
    run_in(source, &Environment::new())
}

/// Parses and evaluates `source` in `env`.
///
/// Bindings made before an error stay in `env`, so a caller can keep
/// evaluating further sources against the same scope.
///
/// # Examples
/// ```
/// use monkey::{interpreter::{environment::Environment, value::core::Object}, run_in};
///
/// let env = Environment::new();
/// run_in("let x = 20;", &env).unwrap();
/// assert_eq!(run_in("x + 22", &env).unwrap(), Object::Integer(42));
/// ```
pub fn run_in(source: &str, env: &Env) -> Result<Object, Error> {
    let program = parse(source)?;
    tracing::debug!(statements = program.statements.len(), "evaluating program");

    match eval_program(&program, env) {
        Object::Error(error) => Err(Error::Runtime(error)),
        value => Ok(value),
    }
}
