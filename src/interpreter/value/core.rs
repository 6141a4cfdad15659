use std::{fmt, ptr, rc::Rc};

use crate::{
    ast::{BlockStatement, Identifier},
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::builtin::Builtin,
        value::hash::{HashKey, HashObject},
    },
};

/// The type tag of an [`Object`], as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// `INTEGER`
    Integer,
    /// `BOOLEAN`
    Boolean,
    /// `STRING`
    String,
    /// `ARRAY`
    Array,
    /// `HASH`
    Hash,
    /// `FUNCTION`
    Function,
    /// `BUILTIN`
    Builtin,
    /// `NULL`
    Null,
    /// `RETURN_VALUE`
    ReturnValue,
    /// `ERROR`
    Error,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Integer => "INTEGER",
                        Self::Boolean => "BOOLEAN",
                        Self::String => "STRING",
                        Self::Array => "ARRAY",
                        Self::Hash => "HASH",
                        Self::Function => "FUNCTION",
                        Self::Builtin => "BUILTIN",
                        Self::Null => "NULL",
                        Self::ReturnValue => "RETURN_VALUE",
                        Self::Error => "ERROR",
                    })
    }
}

/// A user-defined function together with the environment it closes over.
///
/// `env` is shared, not copied: the closure sees bindings added to its
/// defining scope after the function value was created.
pub struct Function {
    /// Parameter names in order.
    pub parameters: Vec<Identifier>,
    /// The function body.
    pub body:       BlockStatement,
    /// The scope that was active where the literal was evaluated.
    pub env:        Env,
}

/// Functions are equal only to themselves.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

// The captured environment usually contains the function itself.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("parameters", &self.parameters)
         .field("body", &self.body)
         .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(") {\n")?;
        for statement in &self.body.statements {
            writeln!(f, "{statement}")?;
        }
        f.write_str("}")
    }
}

/// Represents a runtime value in the interpreter.
///
/// `ReturnValue` and `Error` are control-flow carriers: the evaluator never
/// stores them in a binding or a collection, it forwards them up to the
/// enclosing function call or to the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// A 64-bit signed integer.
    Integer(i64),
    /// `true` or `false`.
    Boolean(bool),
    /// An immutable string.
    String(Rc<str>),
    /// An ordered sequence of values.
    Array(Rc<Vec<Self>>),
    /// A map from hashable values to values.
    Hash(Rc<HashObject>),
    /// A closure.
    Function(Rc<Function>),
    /// A function implemented by the interpreter.
    Builtin(&'static Builtin),
    /// The absence of a value.
    Null,
    /// A `return` in flight towards its enclosing function call.
    ReturnValue(Box<Self>),
    /// An evaluation error in flight towards the top level.
    Error(RuntimeError),
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Object {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Object {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Self>> for Object {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<HashObject> for Object {
    fn from(v: HashObject) -> Self {
        Self::Hash(Rc::new(v))
    }
}

impl From<RuntimeError> for Object {
    fn from(e: RuntimeError) -> Self {
        Self::Error(e)
    }
}

impl Object {
    /// Returns the type tag of the value.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Integer(_) => ObjectType::Integer,
            Self::Boolean(_) => ObjectType::Boolean,
            Self::String(_) => ObjectType::String,
            Self::Array(_) => ObjectType::Array,
            Self::Hash(_) => ObjectType::Hash,
            Self::Function(_) => ObjectType::Function,
            Self::Builtin(_) => ObjectType::Builtin,
            Self::Null => ObjectType::Null,
            Self::ReturnValue(_) => ObjectType::ReturnValue,
            Self::Error(_) => ObjectType::Error,
        }
    }

    /// Whether the value selects the consequence of an `if`.
    ///
    /// `null` and `false` are falsy. Everything else is truthy, `0` and `""`
    /// included.
    ///
    /// # Example
    /// ```
    /// use monkey::interpreter::value::core::Object;
    ///
    /// assert!(Object::Integer(0).is_truthy());
    /// assert!(!Object::Null.is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    /// Returns the canonical map key for integers, booleans and strings.
    ///
    /// Every other type is unhashable and yields `None`.
    #[must_use]
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Self::Integer(_) | Self::Boolean(_) | Self::String(_) => {
                Some(HashKey::new(self.object_type(), self))
            },
            _ => None,
        }
    }

    /// Whether this is an [`Object::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The user-facing rendering of the value.
    #[must_use]
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            },
            Self::Hash(hash) => {
                f.write_str("{")?;
                for (i, pair) in hash.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            },
            Self::Function(function) => write!(f, "{function}"),
            Self::Builtin(_) => f.write_str("builtin function"),
            Self::Null => f.write_str("null"),
            Self::ReturnValue(value) => write!(f, "{value}"),
            Self::Error(error) => write!(f, "{error}"),
        }
    }
}
