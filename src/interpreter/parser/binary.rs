use crate::{
    ast::{Expression, InfixOperator},
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

/// Binding power of operators, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Anything that is not an infix operator.
    Lowest,
    /// `==`, `!=`
    Equals,
    /// `<`, `>`
    LessGreater,
    /// `+`, `-`
    Sum,
    /// `*`, `/`
    Product,
    /// Prefix `!` and `-`.
    Prefix,
    /// Call `(` and index `[`.
    Call,
}

/// Looks up how tightly a token binds when it appears in infix position.
#[must_use]
pub const fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Maps a token to its corresponding binary operator.
///
/// # Example
/// ```
/// use monkey::{
///     ast::InfixOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_infix_operator},
/// };
///
/// assert_eq!(token_to_infix_operator(TokenKind::Plus), Some(InfixOperator::Plus));
/// assert_eq!(token_to_infix_operator(TokenKind::Bang), None);
/// ```
#[must_use]
pub const fn token_to_infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    match kind {
        TokenKind::Plus => Some(InfixOperator::Plus),
        TokenKind::Minus => Some(InfixOperator::Minus),
        TokenKind::Asterisk => Some(InfixOperator::Asterisk),
        TokenKind::Slash => Some(InfixOperator::Slash),
        TokenKind::Lt => Some(InfixOperator::Lt),
        TokenKind::Gt => Some(InfixOperator::Gt),
        TokenKind::Eq => Some(InfixOperator::Eq),
        TokenKind::NotEq => Some(InfixOperator::NotEq),
        _ => None,
    }
}

impl Parser<'_> {
    /// Applies the infix rule of the current token to `left`.
    ///
    /// Only tokens with a precedence above `Lowest` reach this point, and each
    /// of them has a rule.
    pub(super) fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.current.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            kind => match token_to_infix_operator(kind) {
                Some(operator) => self.parse_infix_expression(left, operator),
                None => Some(left),
            },
        }
    }

    /// Parses the right operand of a binary operator.
    ///
    /// The right side is parsed at the operator's own precedence, so
    /// `a - b - c` becomes `(a - b) - c`.
    fn parse_infix_expression(&mut self,
                              left: Expression,
                              operator: InfixOperator)
                              -> Option<Expression> {
        let token = self.current.clone();
        let precedence = self.current_precedence();
        self.next_token();

        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix { token,
                                 left: Box::new(left),
                                 operator,
                                 right: Box::new(right) })
    }

    /// Parses `<function>(<arguments>)` with `(` as the current token.
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_comma_separated(TokenKind::RParen, |parser| {
                                parser.parse_expression(Precedence::Lowest)
                            })?;

        Some(Expression::Call { token,
                                function: Box::new(function),
                                arguments })
    }

    /// Parses `<left>[<index>]` with `[` as the current token.
    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.clone();
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Some(Expression::Index { token,
                                 left: Box::new(left),
                                 index: Box::new(index) })
    }
}
