use crate::{
    ast::{Identifier, Statement},
    interpreter::{
        lexer::TokenKind,
        parser::{binary::Precedence, core::Parser},
    },
};

impl Parser<'_> {
    /// Parses a single statement starting at the current token.
    ///
    /// A statement may be one of:
    /// - a `let` binding,
    /// - a `return`,
    /// - an expression used as a statement.
    ///
    /// Each form accepts an optional trailing `;`. On success the current
    /// token is the last token of the statement.
    pub(super) fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses `let <identifier> = <expression>`.
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier { token: self.current.clone(),
                                value: self.current.literal.clone() };

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Let { token, name, value })
    }

    /// Parses `return <expression>`.
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Expression { token, expression })
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }
}
