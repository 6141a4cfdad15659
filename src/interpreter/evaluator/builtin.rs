use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Object, ObjectType},
    },
};

/// Type alias for builtin function handlers.
///
/// A handler receives the evaluated arguments; the arity has already been
/// checked against the table.
type BuiltinFn = fn(&[Object]) -> EvalResult;

/// The number of arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments.
    Variadic,
}

/// A function implemented by the interpreter.
///
/// Builtins live in a static table and are resolved by name after the scope
/// chain, so a program may shadow them with its own bindings.
pub struct Builtin {
    name:  &'static str,
    arity: Arity,
    func:  BuiltinFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides a string name, an arity specification and a function
/// pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len"   => { arity: Arity::Exact(1), func: len },
    "first" => { arity: Arity::Exact(1), func: first },
    "last"  => { arity: Arity::Exact(1), func: last },
    "rest"  => { arity: Arity::Exact(1), func: rest },
    "push"  => { arity: Arity::Exact(2), func: push },
    "puts"  => { arity: Arity::Variadic, func: puts },
}

/// Finds the builtin called `name`.
///
/// # Example
/// ```
/// use monkey::interpreter::evaluator::builtin::lookup;
///
/// assert_eq!(lookup("len").map(|b| b.name()), Some("len"));
/// assert!(lookup("print").is_none());
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

impl Builtin {
    /// The name the builtin is bound to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// How many arguments the builtin takes.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Checks the argument count and runs the builtin.
    pub fn call(&self, arguments: &[Object]) -> EvalResult {
        if let Arity::Exact(want) = self.arity
           && arguments.len() != want
        {
            return Err(RuntimeError::WrongArgumentCount { got: arguments.len(),
                                                          want }.into());
        }
        tracing::trace!(builtin = self.name, arguments = arguments.len(), "calling builtin");
        (self.func)(arguments)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

fn length(n: usize) -> EvalResult {
    i64::try_from(n).map(Object::Integer)
                    .map_err(|_| RuntimeError::Overflow(format!("length {n}")).into())
}

fn array_argument<'a>(function: &'static str, argument: &'a Object) -> EvalResult<&'a Rc<Vec<Object>>> {
    match argument {
        Object::Array(elements) => Ok(elements),
        other => Err(RuntimeError::ExpectedArgument { function,
                                                      expected: ObjectType::Array,
                                                      got: other.object_type() }.into()),
    }
}

/// `len(string | array)`: characters of a string or elements of an array.
fn len(args: &[Object]) -> EvalResult {
    match &args[0] {
        Object::String(s) => length(s.chars().count()),
        Object::Array(elements) => length(elements.len()),
        other => Err(RuntimeError::UnsupportedArgument { function: "len",
                                                         got:      other.object_type() }.into()),
    }
}

fn first(args: &[Object]) -> EvalResult {
    let elements = array_argument("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or(Object::Null))
}

fn last(args: &[Object]) -> EvalResult {
    let elements = array_argument("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or(Object::Null))
}

/// `rest(array)`: a new array without the first element, `null` when empty.
fn rest(args: &[Object]) -> EvalResult {
    let elements = array_argument("rest", &args[0])?;
    match elements.split_first() {
        Some((_, tail)) => Ok(Object::from(tail.to_vec())),
        None => Ok(Object::Null),
    }
}

/// `push(array, value)`: a new array with `value` appended. The argument
/// array is left unchanged.
fn push(args: &[Object]) -> EvalResult {
    let elements = array_argument("push", &args[0])?;
    let mut pushed = Vec::with_capacity(elements.len() + 1);
    pushed.extend(elements.iter().cloned());
    pushed.push(args[1].clone());
    Ok(Object::from(pushed))
}

/// `puts(...)`: prints each argument on its own line.
fn puts(args: &[Object]) -> EvalResult {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Ok(Object::Null)
}
