use crate::{
    ast::PrefixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Object,
    },
};

impl Context {
    /// Evaluates a prefix operator applied to an already evaluated operand.
    ///
    /// - `!` negates truthiness and works on every value.
    /// - `-` negates integers; negating `i64::MIN` is an overflow error.
    ///
    /// # Example
    /// ```
    /// use monkey::{
    ///     ast::PrefixOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Object},
    /// };
    ///
    /// let v = Context::eval_prefix(PrefixOperator::Minus, &Object::Integer(5)).unwrap();
    /// assert_eq!(v, Object::Integer(-5));
    ///
    /// let v = Context::eval_prefix(PrefixOperator::Bang, &Object::Null).unwrap();
    /// assert_eq!(v, Object::Boolean(true));
    /// ```
    pub fn eval_prefix(operator: PrefixOperator, right: &Object) -> EvalResult {
        match operator {
            PrefixOperator::Bang => Ok(Object::Boolean(!right.is_truthy())),
            PrefixOperator::Minus => match right {
                Object::Integer(n) => n.checked_neg()
                                       .map(Object::Integer)
                                       .ok_or_else(|| RuntimeError::Overflow(format!("-{n}")).into()),
                other => Err(RuntimeError::UnknownPrefixOperator { operator,
                                                                   operand: other.object_type() }.into()),
            },
        }
    }
}
