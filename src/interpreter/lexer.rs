use std::fmt;

use logos::Logos;

/// The kind of a lexical token.
///
/// Every operator, delimiter and keyword of the language has its own variant.
/// `Eof` and `Illegal` are never matched by a pattern: the [`Lexer`] produces
/// them when the input runs out or when no pattern applies.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\x0B\x0C]+")]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// A character (or unterminated string) no pattern accepts.
    Illegal,
    /// Identifier tokens such as `x` or `add_two`.
    #[regex(r"[a-zA-Z_]+")]
    Ident,
    /// Integer literal tokens such as `42`. Overflow is checked by the parser.
    #[regex(r"[0-9]+")]
    Int,
    /// String literal tokens such as `"hello"`.
    #[regex(r#""[^"]*""#, |lex| {
        lex.extras.line += lex.slice().matches('\n').count();
    })]
    String,
    /// A `"` that is never closed.
    #[regex(r#""[^"]*"#, |lex| {
        lex.extras.line += lex.slice().matches('\n').count();
    })]
    UnterminatedString,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `fn`
    #[token("fn")]
    Function,
    /// `let`
    #[token("let")]
    Let,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,

    /// Line breaks are skipped, but counted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eof => "EOF",
            Self::Illegal | Self::UnterminatedString => "ILLEGAL",
            Self::Ident => "IDENT",
            Self::Int => "INT",
            Self::String => "STRING",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Function => "FUNCTION",
            Self::Let => "LET",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Return => "RETURN",
            Self::NewLine => "NEWLINE",
        };
        f.write_str(name)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// A token produced by the [`Lexer`].
///
/// `literal` is the source text of the token, except for strings, whose
/// literal is the text between the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The source text the token was built from.
    pub literal: String,
    /// Line on which the token starts.
    pub line:    usize,
}

impl Token {
    /// Builds a token from its parts.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               line }
    }
}

/// Pull-based tokenizer over a source string.
///
/// Each call to [`Lexer::next_token`] yields exactly one token. Once the
/// input is exhausted the lexer keeps returning [`TokenKind::Eof`]; a second
/// pass over the same text needs a fresh lexer.
///
/// # Example
/// ```
/// use monkey::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("let x = 5;");
/// assert_eq!(lexer.next_token().kind, TokenKind::Let);
/// assert_eq!(lexer.next_token().literal, "x");
/// ```
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { inner: TokenKind::lexer_with_extras(source, LexerExtras::default()) }
    }

    /// Returns the next token and advances past it.
    pub fn next_token(&mut self) -> Token {
        let Some(next) = self.inner.next() else {
            return Token::new(TokenKind::Eof, "", self.inner.extras.line);
        };
        let slice = self.inner.slice();
        // String callbacks have already counted their own newlines.
        let line = self.inner.extras.line - slice.matches('\n').count();

        match next {
            Ok(TokenKind::String) => Token::new(TokenKind::String, &slice[1..slice.len() - 1], line),
            Ok(TokenKind::UnterminatedString) | Err(()) => {
                Token::new(TokenKind::Illegal, slice, line)
            },
            Ok(kind) => Token::new(kind, slice, line),
        }
    }
}
