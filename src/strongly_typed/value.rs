//! Runtime values and the conformance predicate.
//!
//! [`Value`] is what a slot holds and what a setter receives. Whether a value
//! may be stored as-is in an attribute is answered by [`Value::conforms_to`],
//! which follows the tag hierarchy in [`crate::types`].

use crate::types::TypeTag;
use chrono::{DateTime, FixedOffset, NaiveDate};
use num::complex::Complex64;
use num::{BigInt, BigRational, ToPrimitive};
use std::fmt;

/// An interned-style name, distinct from a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runtime representation of any value a record can be offered.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    String(String),
    Boolean(bool),
    Integer(i64),
    /// Integers outside the `i64` range.
    BigInteger(BigInt),
    Float(f64),
    Rational(BigRational),
    Complex(Complex64),
    Symbol(Symbol),
    /// An instant, kept with the offset it was normalized to.
    Time(DateTime<FixedOffset>),
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    pub fn date_time(date_time: DateTime<FixedOffset>) -> Self {
        Value::DateTime(date_time)
    }

    /// Builds an integer value, narrowing to `Integer` when it fits.
    pub fn integer(n: BigInt) -> Self {
        match n.to_i64() {
            Some(small) => Value::Integer(small),
            None => Value::BigInteger(n),
        }
    }

    /// The tag of this value's own type. `Nil` has none.
    pub fn tag(&self) -> Option<TypeTag> {
        let tag = match self {
            Value::Nil => return None,
            Value::String(_) => TypeTag::String,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Integer(_) => TypeTag::Integer,
            Value::BigInteger(_) => TypeTag::BigInteger,
            Value::Float(_) => TypeTag::Float,
            Value::Rational(_) => TypeTag::Rational,
            Value::Complex(_) => TypeTag::Complex,
            Value::Symbol(_) => TypeTag::Symbol,
            Value::Time(_) => TypeTag::Time,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::Date(_) => TypeTag::Date,
        };
        Some(tag)
    }

    /// Name of the runtime type, as reported in error messages.
    pub fn type_name(&self) -> &'static str {
        self.tag().map(TypeTag::name).unwrap_or("Nil")
    }

    /// Whether this value may be stored as-is in a slot declared as `tag`.
    pub fn conforms_to(&self, tag: TypeTag) -> bool {
        match self.tag() {
            Some(own) => own.is_subtype_of(tag),
            None => tag == TypeTag::Any,
        }
    }

    /// Debug-friendly rendering: strings quoted, symbols prefixed, nil spelled out.
    pub fn inspect(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::String(s) => format!("{:?}", s),
            Value::Symbol(s) => format!(":{}", s),
            other => other.to_string(),
        }
    }
}

/// Natural textual representation, used when coercing to `String`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::BigInteger(n) => write!(f, "{}", n),
            // `{:?}` keeps the fractional part: 100.0, not 100
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Value::Complex(c) => write!(f, "{}", c),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S %z")),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<BigRational> for Value {
    fn from(r: BigRational) -> Self {
        Value::Rational(r)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Nil)
    }
}

/// Typed extraction from a stored value, used by `Record::get_as`.
///
/// Extraction follows conformance: an `i64` can be read from an `Integer`
/// slot, a `NaiveDate` from a `Date` or `DateTime` slot.
pub trait FromValue<'a>: Sized {
    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a Value {
    fn from_value(value: &'a Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue<'_> for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue<'_> for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue<'_> for BigInt {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(BigInt::from(*n)),
            Value::BigInteger(n) => Some(n.clone()),
            _ => None,
        }
    }
}

impl FromValue<'_> for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a str {
    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue<'_> for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue<'_> for Symbol {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Symbol(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue<'_> for BigRational {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }
}

impl FromValue<'_> for Complex64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromValue<'_> for NaiveDate {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }
}

impl FromValue<'_> for DateTime<FixedOffset> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Time(t) | Value::DateTime(t) => Some(*t),
            _ => None,
        }
    }
}
