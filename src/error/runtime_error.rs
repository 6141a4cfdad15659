use crate::{
    ast::{InfixOperator, PrefixOperator},
    interpreter::value::core::ObjectType,
};

/// Represents all errors that can occur during evaluation.
///
/// The `Display` text is the exact message a program sees when the error
/// reaches the top level, e.g. `type mismatch: INTEGER + BOOLEAN`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A name is bound neither in any enclosing scope nor as a builtin.
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    /// A prefix operator was applied to an unsupported operand.
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        /// The operator.
        operator: PrefixOperator,
        /// Type of the operand.
        operand:  ObjectType,
    },
    /// An infix operator is not defined for these operand types.
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        /// Type of the left operand.
        left:     ObjectType,
        /// The operator.
        operator: InfixOperator,
        /// Type of the right operand.
        right:    ObjectType,
    },
    /// The operands of an infix operator have different types.
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        /// Type of the left operand.
        left:     ObjectType,
        /// The operator.
        operator: InfixOperator,
        /// Type of the right operand.
        right:    ObjectType,
    },
    /// Integer division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// Integer arithmetic left the 64-bit range.
    #[error("integer overflow: {0}")]
    Overflow(String),
    /// Function calls nested deeper than the evaluator allows.
    #[error("stack overflow: call depth exceeds {max_depth}")]
    StackOverflow {
        /// The call depth limit.
        max_depth: usize,
    },
    /// Something other than a function was called.
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    /// The value cannot be indexed.
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    /// The value cannot serve as a hash key.
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(ObjectType),
    /// A builtin received the wrong number of arguments.
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount {
        /// Number of arguments supplied.
        got:  usize,
        /// Number of arguments the builtin takes.
        want: usize,
    },
    /// A builtin does not accept this argument type at all.
    #[error("argument to `{function}` not supported, got {got}")]
    UnsupportedArgument {
        /// The builtin's name.
        function: &'static str,
        /// Type of the argument.
        got:      ObjectType,
    },
    /// A builtin requires a specific argument type.
    #[error("argument to `{function}` must be {expected}, got {got}")]
    ExpectedArgument {
        /// The builtin's name.
        function: &'static str,
        /// The required type.
        expected: ObjectType,
        /// Type of the argument.
        got:      ObjectType,
    },
}
