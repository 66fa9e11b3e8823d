//! # Type Tags
//!
//! The closed set of target types an attribute may declare and the coercion
//! engine can convert into.
//!
//! Hosts name a type either directly with a [`TypeTag`] or by name through a
//! [`TypeRef`] (`"integer"`, `"DateTime"`, ...). Names are resolved at
//! declaration time, so anything that is not a concrete, instantiable type is
//! rejected before a single value is written.
//!
//! ## Hierarchy
//!
//! Some tags overlap, mirroring the usual numeric and calendar hierarchies:
//!
//! | Tag | Is also a |
//! |-----|-----------|
//! | `BigInteger` | `Integer` |
//! | `DateTime` | `Date` |
//! | every tag | `Any` |
//!
//! The engine's rule order depends on this table: a `DateTime` rule must be
//! tried before a `Date` rule.

use crate::error::DeclarationError;
use std::fmt;
use std::str::FromStr;

/// A concrete target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Boolean,
    Integer,
    /// Arbitrary-precision integers. Never a valid declaration or coercion
    /// target; use `Integer`, which already admits big values.
    BigInteger,
    Float,
    Rational,
    Complex,
    Symbol,
    /// An instant in time, carried with the local offset.
    Time,
    /// A calendar date-time with offset. Refines `Date`.
    DateTime,
    /// A calendar date without time of day.
    Date,
    /// Untyped attribute: every value conforms.
    Any,
}

/// Every tag, in the order the CLI lists them.
pub const ALL_TAGS: &[TypeTag] = &[
    TypeTag::String,
    TypeTag::Boolean,
    TypeTag::Integer,
    TypeTag::BigInteger,
    TypeTag::Float,
    TypeTag::Rational,
    TypeTag::Complex,
    TypeTag::Symbol,
    TypeTag::Time,
    TypeTag::DateTime,
    TypeTag::Date,
    TypeTag::Any,
];

/// Names that refer to abstract types: they exist, but nothing can be an
/// instance of them directly.
const ABSTRACT_NAMES: &[&str] = &[
    "numeric",
    "comparable",
    "enumerable",
    "module",
    "class",
    "kernel",
];

impl TypeTag {
    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::String => "String",
            TypeTag::Boolean => "Boolean",
            TypeTag::Integer => "Integer",
            TypeTag::BigInteger => "BigInteger",
            TypeTag::Float => "Float",
            TypeTag::Rational => "Rational",
            TypeTag::Complex => "Complex",
            TypeTag::Symbol => "Symbol",
            TypeTag::Time => "Time",
            TypeTag::DateTime => "DateTime",
            TypeTag::Date => "Date",
            TypeTag::Any => "Any",
        }
    }

    /// Whether every value of `self` is also a value of `other`.
    pub fn is_subtype_of(self, other: TypeTag) -> bool {
        self == other
            || other == TypeTag::Any
            || matches!(
                (self, other),
                (TypeTag::BigInteger, TypeTag::Integer) | (TypeTag::DateTime, TypeTag::Date)
            )
    }

    /// Whether the tag may be used as an attribute's declared type.
    pub fn is_declarable(self) -> bool {
        self != TypeTag::BigInteger
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let tag = match key.as_str() {
            "string" | "str" => TypeTag::String,
            "boolean" | "bool" => TypeTag::Boolean,
            "integer" | "int" | "fixnum" => TypeTag::Integer,
            "biginteger" | "bigint" | "bignum" => TypeTag::BigInteger,
            "float" | "double" => TypeTag::Float,
            "rational" => TypeTag::Rational,
            "complex" => TypeTag::Complex,
            "symbol" | "atom" => TypeTag::Symbol,
            "time" | "instant" => TypeTag::Time,
            "datetime" => TypeTag::DateTime,
            "date" => TypeTag::Date,
            "any" | "object" => TypeTag::Any,
            _ => {
                return Err(DeclarationError::NotConcrete {
                    type_name: s.trim().to_string(),
                    is_abstract: ABSTRACT_NAMES.contains(&key.as_str()),
                })
            }
        };
        Ok(tag)
    }
}

/// A declared type as the host wrote it.
///
/// Tags are already concrete; names still need resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Tag(TypeTag),
    Named(String),
}

impl TypeRef {
    /// Resolves to a concrete tag or fails with a "not a concrete type" error.
    pub fn resolve(&self) -> Result<TypeTag, DeclarationError> {
        match self {
            TypeRef::Tag(tag) => Ok(*tag),
            TypeRef::Named(name) => name.parse(),
        }
    }
}

impl From<TypeTag> for TypeRef {
    fn from(tag: TypeTag) -> Self {
        TypeRef::Tag(tag)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Named(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        TypeRef::Named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!("Integer".parse::<TypeTag>().unwrap(), TypeTag::Integer);
        assert_eq!("integer".parse::<TypeTag>().unwrap(), TypeTag::Integer);
        assert_eq!("date_time".parse::<TypeTag>().unwrap(), TypeTag::DateTime);
        assert_eq!("DateTime".parse::<TypeTag>().unwrap(), TypeTag::DateTime);
        assert_eq!("Bignum".parse::<TypeTag>().unwrap(), TypeTag::BigInteger);
        assert_eq!("Object".parse::<TypeTag>().unwrap(), TypeTag::Any);
    }

    #[test]
    fn abstract_names_are_not_concrete() {
        let err = "Numeric".parse::<TypeTag>().unwrap_err();
        assert_eq!(
            err,
            DeclarationError::NotConcrete {
                type_name: "Numeric".into(),
                is_abstract: true,
            }
        );
    }

    #[test]
    fn unknown_names_are_not_concrete() {
        let err = "Widget".parse::<TypeTag>().unwrap_err();
        assert!(matches!(
            err,
            DeclarationError::NotConcrete {
                is_abstract: false,
                ..
            }
        ));
    }

    #[test]
    fn hierarchy() {
        assert!(TypeTag::DateTime.is_subtype_of(TypeTag::Date));
        assert!(!TypeTag::Date.is_subtype_of(TypeTag::DateTime));
        assert!(TypeTag::BigInteger.is_subtype_of(TypeTag::Integer));
        assert!(!TypeTag::Integer.is_subtype_of(TypeTag::BigInteger));
        assert!(TypeTag::Symbol.is_subtype_of(TypeTag::Any));
        assert!(!TypeTag::Time.is_subtype_of(TypeTag::DateTime));
    }

    #[test]
    fn big_integer_is_not_declarable() {
        assert!(!TypeTag::BigInteger.is_declarable());
        assert!(ALL_TAGS
            .iter()
            .filter(|t| **t != TypeTag::BigInteger)
            .all(|t| t.is_declarable()));
    }

    #[test]
    fn type_ref_resolves_tags_and_names() {
        assert_eq!(
            TypeRef::from(TypeTag::Float).resolve().unwrap(),
            TypeTag::Float
        );
        assert_eq!(TypeRef::from("symbol").resolve().unwrap(), TypeTag::Symbol);
        assert!(TypeRef::from("Comparable").resolve().is_err());
    }
}
