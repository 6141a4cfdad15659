use crate::{
    ast::InfixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Object,
    },
};

impl Context {
    /// Evaluates an infix operator applied to two evaluated operands.
    ///
    /// Integers support arithmetic and all comparisons. Booleans support
    /// `==` and `!=`. Strings support `+` only. Operands of different types
    /// are a type mismatch; any other combination is an unknown operator.
    ///
    /// # Example
    /// ```
    /// use monkey::{
    ///     ast::InfixOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Object},
    /// };
    ///
    /// let v = Context::eval_infix(InfixOperator::Plus, &Object::from("ab"), &Object::from("c"));
    /// assert_eq!(v, Ok(Object::from("abc")));
    ///
    /// let err = Context::eval_infix(InfixOperator::Eq, &Object::Integer(1), &Object::Boolean(true));
    /// assert_eq!(err.unwrap_err().inspect(), "type mismatch: INTEGER == BOOLEAN");
    /// ```
    pub fn eval_infix(operator: InfixOperator, left: &Object, right: &Object) -> EvalResult {
        match (left, right) {
            (Object::Integer(l), Object::Integer(r)) => Self::eval_integer_infix(operator, *l, *r),
            (Object::Boolean(l), Object::Boolean(r)) => match operator {
                InfixOperator::Eq => Ok(Object::Boolean(l == r)),
                InfixOperator::NotEq => Ok(Object::Boolean(l != r)),
                _ => Err(unknown_operator(operator, left, right)),
            },
            (Object::String(l), Object::String(r)) if operator == InfixOperator::Plus => {
                Ok(Object::from(format!("{l}{r}")))
            },
            _ if left.object_type() != right.object_type() => {
                Err(RuntimeError::TypeMismatch { left: left.object_type(),
                                                 operator,
                                                 right: right.object_type() }.into())
            },
            _ => Err(unknown_operator(operator, left, right)),
        }
    }

    /// Integer arithmetic is checked: overflow and division by zero are
    /// errors rather than wrapping or panicking.
    fn eval_integer_infix(operator: InfixOperator, l: i64, r: i64) -> EvalResult {
        let checked = |result: Option<i64>| -> EvalResult {
            result.map(Object::Integer)
                  .ok_or_else(|| RuntimeError::Overflow(format!("{l} {operator} {r}")).into())
        };

        match operator {
            InfixOperator::Plus => checked(l.checked_add(r)),
            InfixOperator::Minus => checked(l.checked_sub(r)),
            InfixOperator::Asterisk => checked(l.checked_mul(r)),
            InfixOperator::Slash if r == 0 => Err(RuntimeError::DivisionByZero.into()),
            InfixOperator::Slash => checked(l.checked_div(r)),
            InfixOperator::Lt => Ok(Object::Boolean(l < r)),
            InfixOperator::Gt => Ok(Object::Boolean(l > r)),
            InfixOperator::Eq => Ok(Object::Boolean(l == r)),
            InfixOperator::NotEq => Ok(Object::Boolean(l != r)),
        }
    }
}

fn unknown_operator(operator: InfixOperator, left: &Object, right: &Object) -> Object {
    RuntimeError::UnknownInfixOperator { left: left.object_type(),
                                         operator,
                                         right: right.object_type() }.into()
}
