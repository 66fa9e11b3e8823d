use crate::types::TypeTag;
use crate::value::Value;
use thiserror::Error;

/// Raised while defining a record type. Fatal to that one declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("attribute `{name}` already created")]
    Duplicate { name: String },

    #[error("`{name}` is not a valid attribute name")]
    InvalidName { name: String },

    #[error("type must be a concrete type but got `{type_name}`{}", abstract_suffix(.is_abstract))]
    NotConcrete { type_name: String, is_abstract: bool },

    #[error("attributes of type `{tag}` are not supported, use Integer instead")]
    Unsupported { tag: TypeTag },
}

fn abstract_suffix(is_abstract: &bool) -> &'static str {
    if *is_abstract {
        " (abstract)"
    } else {
        ""
    }
}

/// Raised while building a record instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("need arguments to build a `{record}`")]
    Empty { record: String },

    #[error("trying to assign non-existing member {key}={}", .value.inspect())]
    UnknownAttribute { key: String, value: Value },

    #[error("wrong number of arguments ({given} for {expected})")]
    Arity { given: usize, expected: usize },
}

/// Raised by the coercion engine. Always carries the offending value and the
/// requested target.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("directly converting to BigInteger is not supported, use Integer instead")]
    BigIntegerTarget { value: Value },

    #[error("can't convert `{}:{}` to `{to}`", .value.inspect(), .value.type_name())]
    Unsupported { value: Value, to: TypeTag },

    #[error("invalid value for {to}: `{}:{}` ({reason})", .value.inspect(), .value.type_name())]
    Malformed {
        value: Value,
        to: TypeTag,
        reason: String,
    },
}

impl CoercionError {
    pub fn unsupported(value: &Value, to: TypeTag) -> Self {
        CoercionError::Unsupported {
            value: value.clone(),
            to,
        }
    }

    pub fn malformed(value: &Value, to: TypeTag, reason: impl Into<String>) -> Self {
        CoercionError::Malformed {
            value: value.clone(),
            to,
            reason: reason.into(),
        }
    }

    /// The value the engine was asked to convert.
    pub fn value(&self) -> &Value {
        match self {
            CoercionError::BigIntegerTarget { value }
            | CoercionError::Unsupported { value, .. }
            | CoercionError::Malformed { value, .. } => value,
        }
    }

    /// The requested target type.
    pub fn target(&self) -> TypeTag {
        match self {
            CoercionError::BigIntegerTarget { .. } => TypeTag::BigInteger,
            CoercionError::Unsupported { to, .. } | CoercionError::Malformed { to, .. } => *to,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UTC offset `{0}`, expected `local`, `Z` or `+HH:MM`")]
    InvalidOffset(String),
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("attribute `{attribute}` only accepts `{declared}` but got `{}`:`{actual}` instead", .value.inspect())]
    TypeMismatch {
        attribute: String,
        declared: TypeTag,
        value: Value,
        actual: &'static str,
        #[source]
        cause: Option<CoercionError>,
    },

    #[error("`{record}` has no attribute `{name}`")]
    NoSuchAttribute { record: String, name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
