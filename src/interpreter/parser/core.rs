use std::mem;

use crate::{
    ast::{Expression, Program},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token, TokenKind},
        parser::binary::{Precedence, precedence_of},
    },
    util::ensure_sufficient_stack,
};

/// How deeply expressions may nest before the parser gives up.
pub const MAX_NESTING_DEPTH: usize = 1_000;

/// A Pratt parser over the tokens of one [`Lexer`].
///
/// Syntax errors never abort the parse. They are recorded, the parser skips
/// to the end of the broken statement, and parsing carries on so that a single
/// pass reports as many problems as possible. Check [`Parser::errors`] before
/// trusting the returned [`Program`].
///
/// # Example
/// ```
/// use monkey::interpreter::{lexer::Lexer, parser::core::Parser};
///
/// let mut parser = Parser::new(Lexer::new("let x = 1 + 2 * 3;"));
/// let program = parser.parse_program();
///
/// assert!(parser.errors().is_empty());
/// assert_eq!(program.to_string(), "let x = (1 + (2 * 3));");
/// ```
pub struct Parser<'a> {
    lexer:              Lexer<'a>,
    pub(super) current: Token,
    pub(super) peek:    Token,
    errors:             Vec<ParseError>,
    depth:              usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes the current and peek tokens.
    #[must_use]
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self { lexer,
               current,
               peek,
               errors: Vec::new(),
               depth: 0 }
    }

    /// Syntax errors recorded so far, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser and returns its recorded errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parses every statement up to the end of input.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(statement) => statements.push(statement),
                None => self.synchronize(),
            }
            self.next_token();
        }

        Program { statements }
    }

    /// Parses an expression whose operators all bind tighter than
    /// `precedence`.
    ///
    /// Starts with the prefix rule for the current token, then keeps folding
    /// infix rules while the peek token binds tighter. Equal precedence stops
    /// the loop, which makes same-level chains left-associative.
    ///
    /// Nesting beyond [`MAX_NESTING_DEPTH`] records a
    /// [`ParseError::NestingTooDeep`] instead of recursing further.
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.record(ParseError::NestingTooDeep { max_depth: MAX_NESTING_DEPTH,
                                                     line:      self.current.line, });
            return None;
        }

        self.depth += 1;
        let expression = ensure_sufficient_stack(|| self.parse_operators(precedence));
        self.depth -= 1;

        expression
    }

    fn parse_operators(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    /// Shifts the token window by one.
    pub(super) fn next_token(&mut self) {
        self.current = mem::replace(&mut self.peek, self.lexer.next_token());
    }

    pub(super) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(super) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances if the peek token has the expected kind; records an
    /// `UnexpectedToken` error otherwise.
    pub(super) fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.record(ParseError::UnexpectedToken { expected: kind,
                                                      found:    self.peek.kind,
                                                      line:     self.peek.line, });
            None
        }
    }

    pub(super) fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    pub(super) fn current_precedence(&self) -> Precedence {
        precedence_of(self.current.kind)
    }

    pub(super) fn record(&mut self, error: ParseError) {
        tracing::debug!(%error, "syntax error");
        self.errors.push(error);
    }

    /// Skips the rest of a broken statement.
    ///
    /// Stops on the terminating `;`, at end of input, at the end of the
    /// line, or just before a `}`, `let` or `return`, so the next statement
    /// (or the enclosing block's closing brace) is parsed normally.
    pub(super) fn synchronize(&mut self) {
        while !self.current_is(TokenKind::Semicolon)
              && !self.current_is(TokenKind::Eof)
              && !self.peek_is(TokenKind::RBrace)
              && !self.peek_is(TokenKind::Let)
              && !self.peek_is(TokenKind::Return)
              && self.peek.line == self.current.line
        {
            self.next_token();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{InfixOperator, PrefixOperator, Statement};

    fn parse(source: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        let errors: Vec<_> = parser.errors().iter().map(ToString::to_string).collect();
        assert!(errors.is_empty(), "parser errors for {source:?}: {errors:#?}");
        program
    }

    fn parse_errors(source: &str) -> Vec<String> {
        let mut parser = Parser::new(Lexer::new(source));
        parser.parse_program();
        parser.errors().iter().map(ToString::to_string).collect()
    }

    fn single_expression(source: &str) -> Expression {
        let mut program = parse(source);
        assert_eq!(program.statements.len(), 1, "{source:?}");
        match program.statements.remove(0) {
            Statement::Expression { expression, .. } => expression,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    fn assert_identifier(expression: &Expression, name: &str) {
        match expression {
            Expression::Identifier(ident) => {
                assert_eq!(ident.value, name);
                assert_eq!(expression.token_literal(), name);
            },
            other => panic!("expected identifier {name}, got {other:?}"),
        }
    }

    fn assert_integer(expression: &Expression, expected: i64) {
        match expression {
            Expression::IntegerLiteral { value, .. } => {
                assert_eq!(*value, expected);
                assert_eq!(expression.token_literal(), expected.to_string());
            },
            other => panic!("expected integer {expected}, got {other:?}"),
        }
    }

    #[test]
    fn let_statements() {
        let program = parse("let x = 5;\nlet y = true;\nlet foobar = y;");
        let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];

        assert_eq!(program.statements.len(), 3);
        for (statement, (name, value)) in program.statements.iter().zip(expected) {
            match statement {
                Statement::Let { name: ident,
                                 value: expr,
                                 .. } => {
                    assert_eq!(statement.token_literal(), "let");
                    assert_eq!(ident.value, name);
                    assert_eq!(expr.to_string(), value);
                },
                other => panic!("expected let, got {other:?}"),
            }
        }
    }

    #[test]
    fn return_statements() {
        let program = parse("return 5;\nreturn x\nreturn add(1, 2);");

        assert_eq!(program.statements.len(), 3);
        for statement in &program.statements {
            assert!(matches!(statement, Statement::Return { .. }));
            assert_eq!(statement.token_literal(), "return");
        }
        assert_eq!(program.statements[2].to_string(), "return add(1, 2);");
    }

    #[test]
    fn literal_expressions() {
        assert_identifier(&single_expression("foobar;"), "foobar");
        assert_integer(&single_expression("5;"), 5);
        assert!(matches!(single_expression("true"), Expression::Boolean { value: true, .. }));
        match single_expression(r#""hello world";"#) {
            Expression::StringLiteral { value, .. } => assert_eq!(value, "hello world"),
            other => panic!("expected string literal, got {other:?}"),
        }
    }

    #[test]
    fn prefix_expressions() {
        for (source, op, operand) in [("!5;", PrefixOperator::Bang, "5"),
                                      ("-15;", PrefixOperator::Minus, "15"),
                                      ("!true;", PrefixOperator::Bang, "true")]
        {
            match single_expression(source) {
                Expression::Prefix { operator, right, .. } => {
                    assert_eq!(operator, op);
                    assert_eq!(right.to_string(), operand);
                },
                other => panic!("expected prefix, got {other:?}"),
            }
        }
    }

    #[test]
    fn infix_expressions() {
        let cases = [("5 + 5;", InfixOperator::Plus),
                     ("5 - 5;", InfixOperator::Minus),
                     ("5 * 5;", InfixOperator::Asterisk),
                     ("5 / 5;", InfixOperator::Slash),
                     ("5 > 5;", InfixOperator::Gt),
                     ("5 < 5;", InfixOperator::Lt),
                     ("5 == 5;", InfixOperator::Eq),
                     ("5 != 5;", InfixOperator::NotEq)];

        for (source, op) in cases {
            match single_expression(source) {
                Expression::Infix { left,
                                    operator,
                                    right,
                                    .. } => {
                    assert_integer(&left, 5);
                    assert_eq!(operator, op);
                    assert_integer(&right, 5);
                },
                other => panic!("expected infix, got {other:?}"),
            }
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        match single_expression("a + b * c") {
            Expression::Infix { left,
                                operator: InfixOperator::Plus,
                                right,
                                .. } => {
                assert_identifier(&left, "a");
                assert_eq!(right.to_string(), "(b * c)");
            },
            other => panic!("expected a + (b * c), got {other:?}"),
        }
    }

    #[test]
    fn same_precedence_is_left_associative() {
        match single_expression("a - b - c") {
            Expression::Infix { left,
                                operator: InfixOperator::Minus,
                                right,
                                .. } => {
                assert_eq!(left.to_string(), "(a - b)");
                assert_identifier(&right, "c");
            },
            other => panic!("expected (a - b) - c, got {other:?}"),
        }
    }

    #[test]
    fn operator_precedence_rendering() {
        let cases = [("-a * b", "((-a) * b)"),
                     ("!-a", "(!(-a))"),
                     ("a + b + c", "((a + b) + c)"),
                     ("a * b / c", "((a * b) / c)"),
                     ("a + b / c", "(a + (b / c))"),
                     ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
                     ("3 + 4; -5 * 5", "(3 + 4); ((-5) * 5)"),
                     ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
                     ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
                     ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
                     ("true", "true"),
                     ("3 > 5 == false", "((3 > 5) == false)"),
                     ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
                     ("(5 + 5) * 2", "((5 + 5) * 2)"),
                     ("-(5 + 5)", "(-(5 + 5))"),
                     ("!(true == true)", "(!(true == true))"),
                     ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
                     ("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                      "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"),
                     ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
                     ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
                     ("add(a * b[2], b[1], 2 * [1, 2][1])",
                      "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))")];

        for (source, expected) in cases {
            assert_eq!(parse(source).to_string(), expected, "{source:?}");
        }
    }

    #[test]
    fn if_expression() {
        match single_expression("if (x < y) { x }") {
            Expression::If { condition,
                             consequence,
                             alternative,
                             .. } => {
                assert_eq!(condition.to_string(), "(x < y)");
                assert_eq!(consequence.statements.len(), 1);
                assert_eq!(consequence.statements[0].to_string(), "x");
                assert!(alternative.is_none());
            },
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn if_else_expression() {
        match single_expression("if (x < y) { x } else { y }") {
            Expression::If { alternative: Some(alternative),
                             .. } => {
                assert_eq!(alternative.statements.len(), 1);
                assert_eq!(alternative.statements[0].to_string(), "y");
            },
            other => panic!("expected if/else, got {other:?}"),
        }
    }

    #[test]
    fn function_literal() {
        match single_expression("fn(x, y) { x + y; }") {
            Expression::FunctionLiteral { parameters, body, .. } => {
                let names: Vec<_> = parameters.iter().map(|p| p.value.as_str()).collect();
                assert_eq!(names, ["x", "y"]);
                assert_eq!(body.statements.len(), 1);
                assert_eq!(body.statements[0].to_string(), "(x + y)");
            },
            other => panic!("expected function literal, got {other:?}"),
        }
    }

    #[test]
    fn function_parameter_lists() {
        for (source, expected) in [("fn() {};", vec![]),
                                   ("fn(x) {};", vec!["x"]),
                                   ("fn(x, y, z) {};", vec!["x", "y", "z"])]
        {
            match single_expression(source) {
                Expression::FunctionLiteral { parameters, .. } => {
                    let names: Vec<_> = parameters.iter().map(|p| p.value.as_str()).collect();
                    assert_eq!(names, expected);
                },
                other => panic!("expected function literal, got {other:?}"),
            }
        }
    }

    #[test]
    fn call_expression() {
        match single_expression("add(1, 2 * 3, 4 + 5);") {
            Expression::Call { function,
                               arguments,
                               .. } => {
                assert_identifier(&function, "add");
                let rendered: Vec<_> = arguments.iter().map(ToString::to_string).collect();
                assert_eq!(rendered, ["1", "(2 * 3)", "(4 + 5)"]);
            },
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn array_and_index() {
        match single_expression("[1, 2 * 2, 3 + 3]") {
            Expression::ArrayLiteral { elements, .. } => assert_eq!(elements.len(), 3),
            other => panic!("expected array, got {other:?}"),
        }
        match single_expression("[]") {
            Expression::ArrayLiteral { elements, .. } => assert!(elements.is_empty()),
            other => panic!("expected empty array, got {other:?}"),
        }
        match single_expression("myArray[1 + 1]") {
            Expression::Index { left, index, .. } => {
                assert_identifier(&left, "myArray");
                assert_eq!(index.to_string(), "(1 + 1)");
            },
            other => panic!("expected index, got {other:?}"),
        }
    }

    #[test]
    fn hash_literals() {
        match single_expression(r#"{"one": 1, "two": 2, "three": 3}"#) {
            Expression::HashLiteral { pairs, .. } => {
                let rendered: Vec<_> = pairs.iter()
                                            .map(|(k, v)| format!("{k}={v}"))
                                            .collect();
                assert_eq!(rendered, [r#""one"=1"#, r#""two"=2"#, r#""three"=3"#]);
            },
            other => panic!("expected hash, got {other:?}"),
        }
        match single_expression("{}") {
            Expression::HashLiteral { pairs, .. } => assert!(pairs.is_empty()),
            other => panic!("expected empty hash, got {other:?}"),
        }
        match single_expression(r#"{"one": 0 + 1, true: 10 - 8, 4: 15 / 5}"#) {
            Expression::HashLiteral { pairs, .. } => {
                assert_eq!(pairs[0].1.to_string(), "(0 + 1)");
                assert!(matches!(pairs[1].0, Expression::Boolean { value: true, .. }));
                assert_integer(&pairs[2].0, 4);
            },
            other => panic!("expected hash, got {other:?}"),
        }
    }

    #[test]
    fn hash_keys_are_full_expressions() {
        assert_eq!(parse("{a + b: c}").to_string(), "{(a + b):c}");
    }

    #[test]
    fn let_errors_accumulate() {
        let errors = parse_errors("let = 5;\nlet x 10;\nlet 838383;");

        assert_eq!(errors,
                   ["Error on line 1: expected next token to be IDENT, got = instead",
                    "Error on line 2: expected next token to be =, got INT instead",
                    "Error on line 3: expected next token to be IDENT, got INT instead"]);
    }

    #[test]
    fn errors_accumulate_without_semicolons() {
        let errors = parse_errors("let x 5\nlet = 2\nlet z = 3");

        assert_eq!(errors,
                   ["Error on line 1: expected next token to be =, got INT instead",
                    "Error on line 2: expected next token to be IDENT, got = instead"]);
    }

    #[test]
    fn recovery_stops_at_the_next_statement_on_the_same_line() {
        let mut parser = Parser::new(Lexer::new("let x 5 let y = 2 return y"));
        let program = parser.parse_program();

        assert_eq!(parser.errors().len(), 1);
        assert_eq!(program.to_string(), "let y = 2; return y;");
    }

    #[test]
    fn deep_nesting_within_the_limit() {
        let depth = MAX_NESTING_DEPTH - 1;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        assert_integer(&single_expression(&source), 1);
    }

    #[test]
    fn nesting_too_deep_is_an_error() {
        let source = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));

        assert_eq!(parse_errors(&source),
                   ["Error on line 1: expression nested deeper than 1000 levels"]);
        assert_eq!(parse_errors(&format!("{}1", "-".repeat(50_000))),
                   ["Error on line 1: expression nested deeper than 1000 levels"]);
    }

    #[test]
    fn missing_prefix_rule() {
        assert_eq!(parse_errors("+5;"),
                   ["Error on line 1: no prefix parse function for + found"]);
        assert_eq!(parse_errors("let x = @;"),
                   ["Error on line 1: no prefix parse function for ILLEGAL found"]);
    }

    #[test]
    fn integer_literal_out_of_range() {
        assert_eq!(parse_errors("99999999999999999999"),
                   ["Error on line 1: could not parse 99999999999999999999 as integer"]);
    }

    #[test]
    fn missing_closing_brace() {
        let errors = parse_errors("let f = fn(x) {\n  x + 1;\n");
        assert_eq!(errors, ["Error on line 1: expected '}' before end of input"]);
    }

    #[test]
    fn parsing_continues_after_an_error() {
        let mut parser = Parser::new(Lexer::new("let = 1; let y = 2; y;"));
        let program = parser.parse_program();

        assert_eq!(parser.errors().len(), 1);
        assert_eq!(program.to_string(), "let y = 2; y");
    }

    #[test]
    fn rendering_reparses_to_the_same_tree() {
        let sources = ["a + b * c",
                       "-a * !b",
                       "add(1, 2)[0]",
                       r#"{"one": 1, true: [1, 2], 3: fn(x) { x }}"#,
                       "if (x > 1) { let y = x; y * 2 } else { return 0; }",
                       "fn(a, b) { a; -b }(1, 2)",
                       r#"let s = "hi" + " there"; s"#,
                       "if (x) { }"];

        for source in sources {
            let first = parse(source);
            let second = parse(&first.to_string());
            assert_eq!(first.to_string(), second.to_string(), "{source:?}");
            assert_eq!(parse(&second.to_string()), second, "{source:?}");
        }
    }
}
