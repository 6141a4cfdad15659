use crate::{
    ast::BlockStatement,
    error::ParseError,
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

impl Parser<'_> {
    /// Parses a block delimited by braces.
    ///
    /// Expects the current token to be the opening `{`. Statements are parsed
    /// until the matching `}`, which becomes the current token. If the input
    /// ends first, a [`ParseError::MissingBrace`] pointing at the opening
    /// brace is recorded and the statements read so far are kept.
    ///
    /// Grammar: `block := "{" statement* "}"`
    pub(super) fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.next_token();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                self.record(ParseError::MissingBrace { line: token.line });
                break;
            }

            match self.parse_statement() {
                Some(statement) => statements.push(statement),
                None => self.synchronize(),
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }
}
