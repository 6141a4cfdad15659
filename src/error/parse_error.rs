use crate::interpreter::lexer::TokenKind;

/// Represents all errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The next token was not the one the grammar requires.
    #[error("Error on line {line}: expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        /// The token kind the grammar required.
        expected: TokenKind,
        /// The token kind actually found.
        found:    TokenKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No expression can start with this token.
    #[error("Error on line {line}: no prefix parse function for {token} found")]
    NoPrefixParse {
        /// The offending token kind.
        token: TokenKind,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("Error on line {line}: could not parse {literal} as integer")]
    InvalidInteger {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Expressions nested deeper than the parser allows.
    #[error("Error on line {line}: expression nested deeper than {max_depth} levels")]
    NestingTooDeep {
        /// The nesting limit.
        max_depth: usize,
        /// The source line where the limit was reached.
        line:      usize,
    },
    /// The input ended inside a block.
    #[error("Error on line {line}: expected '}}' before end of input")]
    MissingBrace {
        /// The line of the unclosed `{`.
        line: usize,
    },
}

impl ParseError {
    /// The source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::NoPrefixParse { line, .. }
            | Self::InvalidInteger { line, .. }
            | Self::NestingTooDeep { line, .. }
            | Self::MissingBrace { line } => *line,
        }
    }
}
