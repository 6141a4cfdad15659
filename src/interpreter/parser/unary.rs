use crate::{
    ast::{Expression, PrefixOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{binary::Precedence, core::Parser},
    },
};

impl Parser<'_> {
    /// Applies the prefix rule of the current token.
    ///
    /// Expressions can start with:
    /// - identifiers, integers, strings and booleans
    /// - the prefix operators `!` and `-`
    /// - a parenthesized expression
    /// - `if` and `fn`
    /// - array (`[`) and hash (`{`) literals
    ///
    /// Any other token records a [`ParseError::NoPrefixParse`].
    pub(super) fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => self.parse_identifier().map(Expression::Identifier),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Some(Expression::StringLiteral { token: self.current.clone(),
                                                                  value: self.current
                                                                             .literal
                                                                             .clone(), }),
            TokenKind::True | TokenKind::False => {
                Some(Expression::Boolean { token: self.current.clone(),
                                           value: self.current_is(TokenKind::True), })
            },
            TokenKind::Bang => self.parse_prefix_expression(PrefixOperator::Bang),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOperator::Minus),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            token => {
                self.record(ParseError::NoPrefixParse { token,
                                                        line: self.current.line });
                None
            },
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        if let Ok(value) = self.current.literal.parse::<i64>() {
            Some(Expression::IntegerLiteral { token: self.current.clone(),
                                              value })
        } else {
            self.record(ParseError::InvalidInteger { literal: self.current.literal.clone(),
                                                     line:    self.current.line, });
            None
        }
    }

    /// Parses `!<expr>` or `-<expr>`.
    ///
    /// The operand is parsed at `Prefix` precedence, so `-a * b` is
    /// `(-a) * b` and `!-a` is `!(-a)`.
    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> Option<Expression> {
        let token = self.current.clone();
        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix { token,
                                  operator,
                                  right: Box::new(right) })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        Some(expression)
    }

    /// Parses an `if` expression with an optional `else` block.
    ///
    /// Syntax:
    /// ```text
    ///     if (<condition>) { <statements> }
    ///     if (<condition>) { <statements> } else { <statements> }
    /// ```
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If { token,
                              condition: Box::new(condition),
                              consequence,
                              alternative })
    }

    /// Parses `fn(<parameters>) { <body> }`.
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_comma_separated(TokenKind::RParen, Self::parse_identifier)?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Some(Expression::FunctionLiteral { token,
                                           parameters,
                                           body })
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let elements = self.parse_comma_separated(TokenKind::RBracket, |parser| {
                               parser.parse_expression(Precedence::Lowest)
                           })?;

        Some(Expression::ArrayLiteral { token, elements })
    }

    /// Parses `{<key>: <value>, ...}`.
    ///
    /// Keys and values are both full expressions; whether a key is usable is
    /// decided at evaluation time.
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let pairs = self.parse_comma_separated(TokenKind::RBrace, |parser| {
                            let key = parser.parse_expression(Precedence::Lowest)?;
                            parser.expect_peek(TokenKind::Colon)?;
                            parser.next_token();
                            let value = parser.parse_expression(Precedence::Lowest)?;
                            Some((key, value))
                        })?;

        Some(Expression::HashLiteral { token, pairs })
    }
}
