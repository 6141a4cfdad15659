/// Parsing errors.
///
/// Defines the syntax errors the parser records while it builds the AST.
/// Parsing never stops at the first one; every mismatch is collected so the
/// caller can report them all at once.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised during evaluation. They travel through the
/// evaluator inside `Object::Error` rather than as a separate channel, so a
/// failing expression never disturbs bindings made before it.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Everything [`crate::run`] and [`crate::parse`] can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The source did not parse; every recorded syntax error is included.
    #[error("{}", join_lines(.0))]
    Parse(Vec<ParseError>),
    /// Evaluation produced an error value at the top level.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn join_lines(errors: &[ParseError]) -> String {
    errors.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n")
}
