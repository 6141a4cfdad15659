use std::rc::Rc;

use crate::{
    ast::{BlockStatement, Expression, Identifier, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Env, Environment},
        evaluator::builtin,
        value::core::{Function, Object},
    },
    util::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// `Ok` holds an ordinary value. `Err` holds a control-flow object, either
/// [`Object::ReturnValue`] or [`Object::Error`], so `?` forwards a `return`
/// or an error out of every enclosing expression until a function call or
/// the program unwraps it.
pub type EvalResult<T = Object> = Result<T, Object>;

/// Stores the runtime evaluation context.
///
/// Holds the top-level environment. Evaluating several programs with the
/// same context lets later programs see the bindings of earlier ones.
///
/// # Example
/// ```
/// use monkey::{interpreter::{evaluator::core::Context, value::core::Object}, parse};
///
/// let context = Context::new();
/// context.eval(&parse("let x = 2;").unwrap());
///
/// assert_eq!(context.eval(&parse("x * 21").unwrap()), Object::Integer(42));
/// ```
pub struct Context {
    env: Env,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with an empty global environment.
    #[must_use]
    pub fn new() -> Self {
        Self { env: Environment::new() }
    }

    /// Creates a context that evaluates in an existing environment.
    #[must_use]
    pub const fn with_environment(env: Env) -> Self {
        Self { env }
    }

    /// The global environment.
    #[must_use]
    pub const fn environment(&self) -> &Env {
        &self.env
    }

    /// Evaluates `program` in the global environment.
    pub fn eval(&self, program: &Program) -> Object {
        eval_program(program, &self.env)
    }

    /// Evaluates a single statement.
    ///
    /// `let` binds in `env` and yields `null`; `return` produces an
    /// `Err(ReturnValue)`.
    pub fn eval_statement(statement: &Statement, env: &Env) -> EvalResult {
        match statement {
            Statement::Expression { expression, .. } => Self::eval_expression(expression, env),
            Statement::Let { name, value, .. } => {
                let value = Self::eval_expression(value, env)?;
                env.borrow_mut().set(name.value.clone(), value);
                Ok(Object::Null)
            },
            Statement::Return { value, .. } => {
                let value = Self::eval_expression(value, env)?;
                Err(Object::ReturnValue(Box::new(value)))
            },
            Statement::Block(block) => Self::eval_block(block, env),
        }
    }

    /// Evaluates the statements of a block in order.
    ///
    /// The value of the last statement is the value of the block. A
    /// `ReturnValue` or `Error` stops the block and is passed up unchanged,
    /// so the enclosing call can unwrap it.
    pub fn eval_block(block: &BlockStatement, env: &Env) -> EvalResult {
        let mut result = Object::Null;
        for statement in &block.statements {
            result = Self::eval_statement(statement, env)?;
        }
        Ok(result)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant; sub-expressions are evaluated
    /// left to right and the first `Err` stops the expression.
    pub fn eval_expression(expression: &Expression, env: &Env) -> EvalResult {
        ensure_sufficient_stack(|| Self::eval_expression_inner(expression, env))
    }

    fn eval_expression_inner(expression: &Expression, env: &Env) -> EvalResult {
        match expression {
            Expression::Identifier(ident) => Self::eval_identifier(ident, env),
            Expression::IntegerLiteral { value, .. } => Ok(Object::Integer(*value)),
            Expression::Boolean { value, .. } => Ok(Object::Boolean(*value)),
            Expression::StringLiteral { value, .. } => Ok(Object::from(value.as_str())),
            Expression::Prefix { operator, right, .. } => {
                let right = Self::eval_expression(right, env)?;
                Self::eval_prefix(*operator, &right)
            },
            Expression::Infix { left,
                                operator,
                                right,
                                .. } => {
                let left = Self::eval_expression(left, env)?;
                let right = Self::eval_expression(right, env)?;
                Self::eval_infix(*operator, &left, &right)
            },
            Expression::If { condition,
                             consequence,
                             alternative,
                             .. } => {
                let condition = Self::eval_expression(condition, env)?;
                if condition.is_truthy() {
                    Self::eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    Self::eval_block(alternative, env)
                } else {
                    Ok(Object::Null)
                }
            },
            Expression::FunctionLiteral { parameters, body, .. } => {
                Ok(Object::Function(Rc::new(Function { parameters: parameters.clone(),
                                                       body:       body.clone(),
                                                       env:        Rc::clone(env), })))
            },
            Expression::Call { function,
                               arguments,
                               .. } => {
                let function = Self::eval_expression(function, env)?;
                let arguments = Self::eval_expressions(arguments, env)?;
                Self::apply_function(&function, arguments)
            },
            Expression::ArrayLiteral { elements, .. } => {
                Ok(Object::from(Self::eval_expressions(elements, env)?))
            },
            Expression::Index { left, index, .. } => {
                let left = Self::eval_expression(left, env)?;
                let index = Self::eval_expression(index, env)?;
                Self::eval_index(&left, &index)
            },
            Expression::HashLiteral { pairs, .. } => Self::eval_hash_literal(pairs, env),
        }
    }

    /// Resolves a name through the scope chain, then the builtin table.
    fn eval_identifier(ident: &Identifier, env: &Env) -> EvalResult {
        let bound = env.borrow().get(&ident.value);
        if let Some(value) = bound {
            return Ok(value);
        }

        builtin::lookup(&ident.value).map(Object::Builtin)
                                     .ok_or_else(|| {
                                         RuntimeError::IdentifierNotFound(ident.value.clone()).into()
                                     })
    }
}

/// Evaluates a whole program and returns its final value.
///
/// A top-level `return` ends the program and yields the returned value. An
/// error ends the program and is returned as an [`Object::Error`]; bindings
/// made by earlier statements stay in `env`.
///
/// # Example
/// ```
/// use monkey::{
///     interpreter::{environment::Environment, evaluator::core::eval_program},
///     parse,
/// };
///
/// let env = Environment::new();
/// let program = parse("let a = 1; a + b").unwrap();
///
/// assert_eq!(eval_program(&program, &env).inspect(), "identifier not found: b");
/// assert!(env.borrow().get("a").is_some());
/// ```
pub fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
        match Context::eval_statement(statement, env) {
            Ok(value) => result = value,
            Err(Object::ReturnValue(value)) => return *value,
            Err(error) => {
                tracing::debug!(%error, "evaluation stopped");
                return error;
            },
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse;

    fn eval(source: &str) -> Object {
        let program = parse(source).unwrap_or_else(|e| panic!("{source:?} did not parse: {e}"));
        eval_program(&program, &Environment::new())
    }

    fn assert_integer(source: &str, expected: i64) {
        assert_eq!(eval(source), Object::Integer(expected), "{source:?}");
    }

    fn assert_error(source: &str, message: &str) {
        match eval(source) {
            Object::Error(error) => assert_eq!(error.to_string(), message, "{source:?}"),
            other => panic!("{source:?} should fail with {message:?}, got {other:?}"),
        }
    }

    #[test]
    fn integer_expressions() {
        let cases = [("5", 5),
                     ("-10", -10),
                     ("5 + 5 + 5 + 5 - 10", 10),
                     ("2 * 2 * 2 * 2 * 2", 32),
                     ("-50 + 100 + -50", 0),
                     ("20 + 2 * -10", 0),
                     ("50 / 2 * 2 + 10", 60),
                     ("3 * (3 * 3) + 10", 37),
                     ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
                     ("7 / 2", 3),
                     ("-7 / 2", -3)];

        for (source, expected) in cases {
            assert_integer(source, expected);
        }
    }

    #[test]
    fn boolean_expressions() {
        let cases = [("true", true),
                     ("1 < 2", true),
                     ("1 > 2", false),
                     ("1 == 1", true),
                     ("1 != 1", false),
                     ("true == true", true),
                     ("true != false", true),
                     ("(1 < 2) == true", true),
                     ("(1 > 2) == true", false),
                     ("!true", false),
                     ("!5", false),
                     ("!!5", true),
                     ("!0", false),
                     ("!!false", false)];

        for (source, expected) in cases {
            assert_eq!(eval(source), Object::Boolean(expected), "{source:?}");
        }
    }

    #[test]
    fn if_else_uses_truthiness() {
        assert_integer("if (true) { 10 }", 10);
        assert_eq!(eval("if (false) { 10 }"), Object::Null);
        assert_integer("if (1) { 10 }", 10);
        assert_integer("if (0) { 1 } else { 2 }", 1);
        assert_integer("if (1 > 2) { 10 } else { 20 }", 20);
        assert_eq!(eval("if (if (false) { 1 }) { 10 }"), Object::Null);
        assert_integer(r#"if ("") { 1 } else { 2 }"#, 1);
    }

    #[test]
    fn return_statements() {
        assert_integer("return 10;", 10);
        assert_integer("return 10; 9;", 10);
        assert_integer("9; return 2 * 5; 9;", 10);
        assert_integer("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10);
        assert_integer("let f = fn(x) { return x; x + 10; }; f(10);", 10);
        assert_integer("let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
                       20);
    }

    #[test]
    fn return_inside_an_operand_leaves_the_function() {
        assert_integer("let f = fn() { 1 + if (true) { return 5; } }; f()", 5);
        assert_integer("let f = fn() { [1, if (true) { return 7; }] }; f()", 7);
    }

    #[test]
    fn error_handling() {
        let cases = [("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
                     ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
                     ("-true", "unknown operator: -BOOLEAN"),
                     ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
                     ("true > false;", "unknown operator: BOOLEAN > BOOLEAN"),
                     ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
                     ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
                     ("if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                      "unknown operator: BOOLEAN + BOOLEAN"),
                     ("foobar", "identifier not found: foobar"),
                     (r#""Hello" - "World""#, "unknown operator: STRING - STRING"),
                     (r#""a" == "a""#, "unknown operator: STRING == STRING"),
                     ("1 == true", "type mismatch: INTEGER == BOOLEAN"),
                     (r#"{"name": "Monkey"}[fn(x) { x }];"#, "unusable as hash key: FUNCTION"),
                     ("[1, 2][[1]]", "index operator not supported: ARRAY"),
                     ("5[0]", "index operator not supported: INTEGER"),
                     ("5()", "not a function: INTEGER"),
                     ("10 / 0", "division by zero"),
                     ("9223372036854775807 + 1", "integer overflow: 9223372036854775807 + 1")];

        for (source, message) in cases {
            assert_error(source, message);
        }
    }

    #[test]
    fn errors_in_arguments_stop_the_call() {
        assert_error("let f = fn(x) { -true }; f(missing)", "identifier not found: missing");
        assert_error("let f = fn(x, y) { -true }; f(1, 2 + true)",
                     "type mismatch: INTEGER + BOOLEAN");
        assert_error("[1, 2 + true, missing]", "type mismatch: INTEGER + BOOLEAN");
    }

    #[test]
    fn errors_in_the_callee_stop_before_the_arguments() {
        assert_error("nope(1 + true)", "identifier not found: nope");
    }

    #[test]
    fn deep_recursion() {
        assert_integer("let f = fn(n) { if (n == 0) { 0 } else { 1 + f(n - 1) } }; f(5000)",
                       5000);
    }

    #[test]
    fn unbounded_recursion_is_an_error() {
        let env = Environment::new();
        let program = parse("let f = fn() { f() }; f()").unwrap();

        assert_eq!(eval_program(&program, &env).inspect(),
                   "stack overflow: call depth exceeds 10000");

        let again = parse("let g = fn(n) { n * 2 }; g(21)").unwrap();
        assert_eq!(eval_program(&again, &env), Object::Integer(42));
    }

    #[test]
    fn deeply_nested_expressions() {
        let depth = 900;
        let source = format!("{}5", "-".repeat(depth));
        assert_integer(&source, 5);

        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(eval(&format!("len({source})")), Object::Integer(1));
    }

    #[test]
    fn bindings_survive_a_later_error() {
        let env = Environment::new();
        let program = parse("let a = 5; let b = a * 2; b + nope; let c = 1;").unwrap();

        assert!(eval_program(&program, &env).is_error());
        assert_eq!(env.borrow().get("b"), Some(Object::Integer(10)));
        assert_eq!(env.borrow().get("c"), None);
    }

    #[test]
    fn let_statements() {
        assert_integer("let a = 5; a;", 5);
        assert_integer("let a = 5 * 5; a;", 25);
        assert_integer("let a = 5; let b = a; b;", 5);
        assert_integer("let a = 5; let b = a; let c = a + b + 5; c;", 15);
        assert_integer("let a = 1; let a = a + 1; a", 2);
        assert_eq!(eval("let a = 5;"), Object::Null);
    }

    #[test]
    fn function_object() {
        match eval("fn(x) { x + 2; };") {
            Object::Function(function) => {
                assert_eq!(function.parameters.len(), 1);
                assert_eq!(function.parameters[0].value, "x");
                assert_eq!(function.body.to_string(), "{ (x + 2) }");
            },
            other => panic!("expected a function, got {other:?}"),
        }
        assert_eq!(eval("fn(x, y) { x + y; }").inspect(), "fn(x, y) {\n(x + y)\n}");
    }

    #[test]
    fn function_application() {
        assert_integer("let identity = fn(x) { x; }; identity(5);", 5);
        assert_integer("let identity = fn(x) { return x; }; identity(5);", 5);
        assert_integer("let double = fn(x) { x * 2; }; double(5);", 10);
        assert_integer("let add = fn(x, y) { x + y; }; add(5, 5);", 10);
        assert_integer("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20);
        assert_integer("fn(x) { x; }(5)", 5);
        assert_eq!(eval("fn() { }()"), Object::Null);
    }

    #[test]
    fn closures() {
        assert_integer("let newAdder = fn(x) { fn(y) { x + y } };
                        let addTwo = newAdder(2);
                        addTwo(3);",
                       5);
    }

    #[test]
    fn parameters_shadow_without_leaking() {
        assert_integer("let x = 10; let f = fn(x) { x * 2 }; f(1) + x", 12);
        assert_integer("let x = 10; let f = fn() { let x = 1; x }; f() + x", 11);
    }

    #[test]
    fn recursion_through_a_let_binding() {
        assert_integer("let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } };
                        fib(15)",
                       610);
    }

    #[test]
    fn closures_see_later_rebinding_of_their_scope() {
        assert_integer("let n = 1; let get = fn() { n }; let n = 2; get()", 2);
    }

    #[test]
    fn arity_mismatch_binds_positionally() {
        assert_integer("let f = fn(a, b) { a }; f(1)", 1);
        assert_integer("let f = fn(a) { a }; f(1, 2, 3)", 1);
        assert_error("let f = fn(a, b) { b }; f(1)", "identifier not found: b");
    }

    #[test]
    fn strings() {
        assert_eq!(eval(r#""Hello World!""#), Object::from("Hello World!"));
        assert_eq!(eval(r#""Hello" + " " + "World!""#), Object::from("Hello World!"));
    }
}
