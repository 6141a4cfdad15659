use std::cell::Cell;

use crate::{
    ast::Expression,
    error::RuntimeError,
    interpreter::{
        environment::{Env, Environment},
        evaluator::core::{Context, EvalResult},
        value::core::{Function, Object},
    },
};

/// How deeply calls to user-defined functions may nest.
pub const MAX_CALL_DEPTH: usize = 10_000;

thread_local! {
    static CALL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one active function call for as long as it is alive.
struct CallGuard;

impl CallGuard {
    fn enter() -> Result<Self, RuntimeError> {
        CALL_DEPTH.with(|depth| {
                      if depth.get() >= MAX_CALL_DEPTH {
                          return Err(RuntimeError::StackOverflow { max_depth: MAX_CALL_DEPTH });
                      }
                      depth.set(depth.get() + 1);
                      Ok(Self)
                  })
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        CALL_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

impl Context {
    /// Evaluates expressions left to right, stopping at the first `Err`.
    pub(super) fn eval_expressions(expressions: &[Expression], env: &Env) -> EvalResult<Vec<Object>> {
        expressions.iter()
                   .map(|expression| Self::eval_expression(expression, env))
                   .collect()
    }

    /// Applies a callee to already evaluated arguments.
    ///
    /// A user-defined function runs its body in a fresh scope enclosed by
    /// the scope it was defined in; a `return` inside the body ends the call
    /// with the returned value. Builtins check their arity and run directly.
    ///
    /// More than [`MAX_CALL_DEPTH`] nested calls of user-defined functions
    /// fail with a stack overflow error.
    ///
    /// # Example
    /// ```
    /// use monkey::{
    ///     interpreter::{evaluator::core::Context, value::core::Object},
    ///     run,
    /// };
    ///
    /// let square = run("fn(x) { x * x }").unwrap();
    /// let v = Context::apply_function(&square, vec![Object::Integer(7)]);
    /// assert_eq!(v, Ok(Object::Integer(49)));
    /// ```
    #[tracing::instrument(level = "trace", skip_all, fields(callee = %function.object_type(), arguments = arguments.len()))]
    pub fn apply_function(function: &Object, arguments: Vec<Object>) -> EvalResult {
        match function {
            Object::Function(function) => {
                let _guard = CallGuard::enter()?;
                let env = Self::extend_function_env(function, arguments);
                match Self::eval_block(&function.body, &env) {
                    Err(Object::ReturnValue(value)) => Ok(*value),
                    result => result,
                }
            },
            Object::Builtin(builtin) => builtin.call(&arguments),
            other => Err(RuntimeError::NotAFunction(other.object_type()).into()),
        }
    }

    /// Binds parameters positionally. Surplus arguments are dropped and
    /// parameters without an argument stay unbound.
    fn extend_function_env(function: &Function, arguments: Vec<Object>) -> Env {
        let env = Environment::new_enclosed(&function.env);
        {
            let mut scope = env.borrow_mut();
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                scope.set(parameter.value.clone(), argument);
            }
        }
        env
    }
}
