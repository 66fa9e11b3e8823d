//! # Coercion Engine
//!
//! Converts a value into a requested [`TypeTag`], or fails with a
//! [`CoercionError`] naming the value, its type and the target. Nothing is
//! ever silently defaulted.
//!
//! ## Rules
//!
//! Dispatch is an exhaustive match on the target tag:
//!
//! | Target | Accepts |
//! |--------|---------|
//! | `String` | anything, via its natural text |
//! | `Boolean` | booleans, nil, numbers, truthy/falsy literals |
//! | `BigInteger` | nothing: always an error, use `Integer` |
//! | `Any` | nothing: not a primitive type |
//! | `Integer` / `Float` / `Rational` / `Complex` | finite numeric values and literals; times for `Integer` and `Float` |
//! | `Symbol` | strings |
//! | `Time` | epoch numbers, date-time strings |
//! | `DateTime` | times, dates, date-time strings, `YYYYMMDD` integers |
//! | `Date` | date strings, `YYYYMMDD` integers |
//!
//! A value that already conforms to the target is returned unchanged before
//! any rule runs. This is also what keeps the overlapping hierarchy honest:
//! a `DateTime` offered to a `Date` target is already a date and is never
//! reparsed.
//!
//! ## Local offset
//!
//! Times produced from epoch numbers or parsed strings are normalized to the
//! offset the engine was built with. [`Coercer::default`] uses the process's
//! local offset; tests and hosts that need determinism pass one explicitly.

mod numeric;
mod temporal;

use crate::config::{local_offset, CoercerConfig};
use crate::error::{CoercionError, ConfigError};
use crate::types::TypeTag;
use crate::value::{Symbol, Value};
use chrono::FixedOffset;
use log::{debug, trace};
use num::Zero;

const TRUTHY: &[&str] = &["true", "t", "yes", "y", "on", "1"];
const FALSY: &[&str] = &["false", "f", "no", "n", "off", "0"];

/// Stateless converter, parameterized only by the offset times normalize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coercer {
    local_offset: FixedOffset,
}

impl Default for Coercer {
    fn default() -> Self {
        Self::new(local_offset())
    }
}

impl Coercer {
    pub fn new(local_offset: FixedOffset) -> Self {
        Self { local_offset }
    }

    pub fn from_config(config: &CoercerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.resolve_offset()?))
    }

    pub fn local_offset(&self) -> FixedOffset {
        self.local_offset
    }

    /// Converts `value` to `target`.
    ///
    /// Returns a clone of `value` when it already conforms to `target`.
    /// `BigInteger` and `Any` are never valid targets.
    pub fn coerce(&self, value: &Value, target: TypeTag) -> Result<Value, CoercionError> {
        if target == TypeTag::BigInteger {
            return Err(CoercionError::BigIntegerTarget {
                value: value.clone(),
            });
        }
        if target == TypeTag::Any {
            return Err(CoercionError::unsupported(value, target));
        }
        if value.conforms_to(target) {
            trace!("{} already conforms to {}", value.inspect(), target);
            return Ok(value.clone());
        }

        debug!(
            "coercing {}:{} to {}",
            value.inspect(),
            value.type_name(),
            target
        );

        match target {
            TypeTag::String => Ok(Value::String(value.to_string())),
            TypeTag::Boolean => to_boolean(value),
            TypeTag::BigInteger => Err(CoercionError::BigIntegerTarget {
                value: value.clone(),
            }),
            TypeTag::Integer => numeric::to_integer(value),
            TypeTag::Float => numeric::to_float(value),
            TypeTag::Rational => numeric::to_rational(value),
            TypeTag::Complex => numeric::to_complex(value),
            TypeTag::Symbol => to_symbol(value),
            TypeTag::Time => temporal::to_time(value, self.local_offset),
            TypeTag::DateTime => temporal::to_date_time(value, self.local_offset),
            TypeTag::Date => temporal::to_date(value),
            TypeTag::Any => Err(CoercionError::unsupported(value, target)),
        }
    }
}

/// Converts with a default (local offset) engine.
pub fn coerce(value: &Value, target: TypeTag) -> Result<Value, CoercionError> {
    Coercer::default().coerce(value, target)
}

fn to_boolean(value: &Value) -> Result<Value, CoercionError> {
    let truthy = match value {
        Value::Nil => false,
        Value::Boolean(b) => *b,
        Value::Integer(n) => *n != 0,
        Value::BigInteger(n) => !n.is_zero(),
        Value::Float(x) => *x != 0.0,
        Value::Rational(r) => !r.is_zero(),
        Value::Complex(c) => !c.is_zero(),
        Value::String(s) => boolean_literal(value, s)?,
        Value::Symbol(s) => boolean_literal(value, s.as_str())?,
        _ => return Err(CoercionError::unsupported(value, TypeTag::Boolean)),
    };
    Ok(Value::Boolean(truthy))
}

fn boolean_literal(value: &Value, text: &str) -> Result<bool, CoercionError> {
    let key = text.trim().to_ascii_lowercase();
    if TRUTHY.contains(&key.as_str()) {
        Ok(true)
    } else if FALSY.contains(&key.as_str()) {
        Ok(false)
    } else {
        Err(CoercionError::malformed(
            value,
            TypeTag::Boolean,
            "not a boolean literal",
        ))
    }
}

/// Only values with a textual name have a symbol form; numbers never do.
fn to_symbol(value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::String(s) => Ok(Value::Symbol(Symbol::new(s.as_str()))),
        _ => Err(CoercionError::unsupported(value, TypeTag::Symbol)),
    }
}
