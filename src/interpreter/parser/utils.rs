use crate::{
    ast::Identifier,
    error::ParseError,
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

impl Parser<'_> {
    /// Parses a comma-separated list of items up to a closing token.
    ///
    /// This utility is shared by array literals, call arguments, function
    /// parameters and hash literals. The current token must be the opening
    /// delimiter; `parse_item` is called with the current token on the first
    /// token of each item. An immediately encountered closing token produces
    /// an empty list. On success the closing token is current.
    ///
    /// Grammar (simplified): `list := (item ("," item)*)? closing`
    pub(super) fn parse_comma_separated<T>(&mut self,
                                           closing: TokenKind,
                                           parse_item: impl Fn(&mut Self) -> Option<T>)
                                           -> Option<Vec<T>> {
        let mut items = Vec::new();

        if self.peek_is(closing) {
            self.next_token();
            return Some(items);
        }

        loop {
            self.next_token();
            items.push(parse_item(self)?);

            if !self.peek_is(TokenKind::Comma) {
                break;
            }
            self.next_token();
        }

        self.expect_peek(closing)?;
        Some(items)
    }

    /// Turns the current token into an [`Identifier`].
    ///
    /// Records an error and returns `None` if the current token is not an
    /// identifier.
    pub(super) fn parse_identifier(&mut self) -> Option<Identifier> {
        if !self.current_is(TokenKind::Ident) {
            self.record(ParseError::UnexpectedToken { expected: TokenKind::Ident,
                                                      found:    self.current.kind,
                                                      line:     self.current.line, });
            return None;
        }

        Some(Identifier { token: self.current.clone(),
                          value: self.current.literal.clone() })
    }
}
