use std::fmt;

use crate::interpreter::lexer::Token;

/// Prefix operators: `!` and `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Logical negation (`!`).
    Bang,
    /// Arithmetic negation (`-`).
    Minus,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Bang => "!",
                        Self::Minus => "-",
                    })
    }
}

/// Binary operators written between their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Plus => "+",
                        Self::Minus => "-",
                        Self::Asterisk => "*",
                        Self::Slash => "/",
                        Self::Lt => "<",
                        Self::Gt => ">",
                        Self::Eq => "==",
                        Self::NotEq => "!=",
                    })
    }
}

/// A name, either as an expression or as the target of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The `IDENT` token the name came from.
    pub token: Token,
    /// The name itself.
    pub value: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatement {
    /// The opening `{`.
    pub token:      Token,
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        fmt_statements(f, &self.statements)?;
        f.write_str(" }")
    }
}

/// An abstract syntax tree node representing a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let {
        /// The `let` keyword.
        token: Token,
        /// The bound name.
        name:  Identifier,
        /// The initializer.
        value: Expression,
    },
    /// `return <value>;`
    Return {
        /// The `return` keyword.
        token: Token,
        /// The returned expression.
        value: Expression,
    },
    /// An expression evaluated for its value.
    Expression {
        /// The first token of the expression.
        token:      Token,
        /// The expression itself.
        expression: Expression,
    },
    /// A nested block.
    Block(BlockStatement),
}

impl Statement {
    /// Returns the literal of the token the statement started with.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Let { token, .. } | Self::Return { token, .. } | Self::Expression { token, .. } => {
                &token.literal
            },
            Self::Block(block) => &block.token.literal,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Expression { expression, .. } => write!(f, "{expression}"),
            Self::Block(block) => write!(f, "{block}"),
        }
    }
}

/// Writes statements so that they re-parse as the same sequence.
///
/// An expression statement followed by another statement gets a `;`,
/// otherwise `a` and `(-b)` would fuse into the call `a((-b))`.
fn fmt_statements(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{statement}")?;
        if i + 1 < statements.len() && matches!(statement, Statement::Expression { .. }) {
            f.write_str(";")?;
        }
    }
    Ok(())
}

/// An abstract syntax tree node representing an expression.
///
/// Each variant keeps the token it was parsed from, so diagnostics and
/// [`Expression::token_literal`] can point back at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Reference to a binding by name.
    Identifier(Identifier),
    /// An integer literal such as `5`.
    IntegerLiteral {
        /// The `INT` token.
        token: Token,
        /// The parsed value.
        value: i64,
    },
    /// `true` or `false`.
    Boolean {
        /// The keyword token.
        token: Token,
        /// The literal value.
        value: bool,
    },
    /// A string literal; `value` excludes the quotes.
    StringLiteral {
        /// The `STRING` token.
        token: Token,
        /// The text between the quotes.
        value: String,
    },
    /// `<operator><right>`
    Prefix {
        /// The operator token.
        token:    Token,
        /// Which operator.
        operator: PrefixOperator,
        /// The operand.
        right:    Box<Self>,
    },
    /// `<left> <operator> <right>`
    Infix {
        /// The operator token.
        token:    Token,
        /// Left operand.
        left:     Box<Self>,
        /// Which operator.
        operator: InfixOperator,
        /// Right operand.
        right:    Box<Self>,
    },
    /// `if (<condition>) { ... } else { ... }`
    If {
        /// The `if` keyword.
        token:       Token,
        /// The condition.
        condition:   Box<Self>,
        /// Block evaluated when the condition is truthy.
        consequence: BlockStatement,
        /// Optional `else` block.
        alternative: Option<BlockStatement>,
    },
    /// `fn(<parameters>) { <body> }`
    FunctionLiteral {
        /// The `fn` keyword.
        token:      Token,
        /// Parameter names in order.
        parameters: Vec<Identifier>,
        /// The function body.
        body:       BlockStatement,
    },
    /// `<function>(<arguments>)`
    Call {
        /// The `(` token.
        token:     Token,
        /// The callee expression.
        function:  Box<Self>,
        /// Argument expressions in order.
        arguments: Vec<Self>,
    },
    /// `[<elements>]`
    ArrayLiteral {
        /// The `[` token.
        token:    Token,
        /// Element expressions in order.
        elements: Vec<Self>,
    },
    /// `<left>[<index>]`
    Index {
        /// The `[` token.
        token: Token,
        /// The indexed expression.
        left:  Box<Self>,
        /// The index expression.
        index: Box<Self>,
    },
    /// `{<key>: <value>, ...}`
    HashLiteral {
        /// The `{` token.
        token: Token,
        /// Key/value expression pairs in source order.
        pairs: Vec<(Self, Self)>,
    },
}

impl Expression {
    /// Returns the literal of the token the expression was parsed from.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Identifier(ident) => &ident.token.literal,
            Self::IntegerLiteral { token, .. }
            | Self::Boolean { token, .. }
            | Self::StringLiteral { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::If { token, .. }
            | Self::FunctionLiteral { token, .. }
            | Self::Call { token, .. }
            | Self::ArrayLiteral { token, .. }
            | Self::Index { token, .. }
            | Self::HashLiteral { token, .. } => &token.literal,
        }
    }
}

/// Writes `items` separated by `, `.
fn fmt_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::StringLiteral { value, .. } => write!(f, "\"{value}\""),
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { left,
                          operator,
                          right,
                          .. } => write!(f, "({left} {operator} {right})"),
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if ({condition}) {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            },
            Self::FunctionLiteral { parameters, body, .. } => {
                f.write_str("fn(")?;
                fmt_joined(f, parameters)?;
                write!(f, ") {body}")
            },
            Self::Call { function, arguments, .. } => {
                write!(f, "{function}(")?;
                fmt_joined(f, arguments)?;
                f.write_str(")")
            },
            Self::ArrayLiteral { elements, .. } => {
                f.write_str("[")?;
                fmt_joined(f, elements)?;
                f.write_str("]")
            },
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::HashLiteral { pairs, .. } => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("}")
            },
        }
    }
}

/// The root of every parsed source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Returns the literal of the first statement's token, or `""` when empty.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", Statement::token_literal)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_statements(f, &self.statements)
    }
}
