//! # Records
//!
//! A [`RecordType`] is defined once, through [`RecordTypeBuilder`], and frozen
//! into an `Arc` before any [`Record`] of it exists. From then on the type is
//! read-only and may be shared freely; each record owns its slots.
//!
//! ## Writes
//!
//! Every write, whether through [`Record::set`], an [`Accessor`] or one of the
//! constructors, goes through the same path:
//!
//! 1. A value that already conforms to the declared type is stored as-is.
//! 2. Otherwise the record type's [`Coercer`] converts it.
//! 3. A conversion failure, or a result that still does not conform, is a
//!    `TypeMismatch` naming the attribute, the declared type and the offered
//!    value. The slot keeps its previous content.
//!
//! ## Construction
//!
//! - [`Record::from_mapping`]: every key must name a declared attribute.
//!   Pairs are applied in iteration order and the first failure stops the
//!   build.
//! - [`Record::from_positional`]: values are applied in declaration order;
//!   trailing attributes stay unset. More values than attributes is an arity
//!   error.
//!
//! Both reject empty input.

use crate::attributes::{AttributeRegistry, AttributeSpec};
use crate::coercible::Coercer;
use crate::error::{CoercionError, ConstructionError, DeclarationError, ModelError, Result};
use crate::types::TypeRef;
use crate::value::{FromValue, Value};
use log::{trace, warn};
use std::fmt;
use std::sync::Arc;

/// A record type definition: a name, its attributes and the engine used by
/// their setters.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    name: String,
    registry: AttributeRegistry,
    coercer: Coercer,
}

impl RecordType {
    /// Starts defining a record type.
    pub fn define(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            registry: AttributeRegistry::new(),
            coercer: Coercer::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    /// Attribute names in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.registry.members()
    }

    pub fn spec(&self, name: &str) -> Result<&AttributeSpec> {
        self.registry
            .get(name)
            .ok_or_else(|| ModelError::NoSuchAttribute {
                record: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// The getter/setter pair for one attribute.
    pub fn accessor(self: &Arc<Self>, name: &str) -> Result<Accessor> {
        let spec = self.spec(name)?.clone();
        Ok(Accessor {
            record_type: Arc::clone(self),
            spec,
        })
    }

    /// One accessor per declared attribute, in declaration order.
    pub fn accessors(self: &Arc<Self>) -> Vec<Accessor> {
        self.registry
            .iter()
            .map(|spec| Accessor {
                record_type: Arc::clone(self),
                spec: spec.clone(),
            })
            .collect()
    }
}

/// Definition-time handle. Declarations happen here; `build` freezes them.
#[derive(Debug, Clone)]
pub struct RecordTypeBuilder {
    name: String,
    registry: AttributeRegistry,
    coercer: Coercer,
}

impl RecordTypeBuilder {
    /// Declares a typed attribute, consuming and returning the builder.
    pub fn attribute(
        mut self,
        name: &str,
        declared_type: impl Into<TypeRef>,
    ) -> std::result::Result<Self, DeclarationError> {
        self.registry.declare(name, declared_type)?;
        Ok(self)
    }

    /// Declares an attribute that accepts any value.
    pub fn untyped(mut self, name: &str) -> std::result::Result<Self, DeclarationError> {
        self.registry.declare_untyped(name)?;
        Ok(self)
    }

    /// Declares in place, for callers that build definitions in a loop.
    pub fn declare(
        &mut self,
        name: &str,
        declared_type: impl Into<TypeRef>,
    ) -> std::result::Result<&AttributeSpec, DeclarationError> {
        self.registry.declare(name, declared_type)
    }

    /// Sets the engine used by this type's setters.
    pub fn coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self
    }

    pub fn build(self) -> Arc<RecordType> {
        Arc::new(RecordType {
            name: self.name,
            registry: self.registry,
            coercer: self.coercer,
        })
    }
}

/// An instance: one slot per declared attribute, each unset or holding a
/// value that conforms to the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    record_type: Arc<RecordType>,
    slots: Vec<Option<Value>>,
}

impl Record {
    /// A record with every attribute unset.
    pub fn new(record_type: &Arc<RecordType>) -> Self {
        Self {
            record_type: Arc::clone(record_type),
            slots: vec![None; record_type.registry.len()],
        }
    }

    /// Builds a record from `(name, value)` pairs.
    pub fn from_mapping<I, K, V>(record_type: &Arc<RecordType>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return Err(empty(record_type));
        }

        let mut record = Self::new(record_type);
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.into();
            let Some(spec) = record_type.registry.get(key) else {
                return Err(ConstructionError::UnknownAttribute {
                    key: key.to_string(),
                    value,
                }
                .into());
            };
            record.write(spec, value)?;
        }
        Ok(record)
    }

    /// Builds a record from values in declaration order.
    pub fn from_positional<I, V>(record_type: &Arc<RecordType>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(empty(record_type));
        }
        let expected = record_type.registry.len();
        if values.len() > expected {
            return Err(ConstructionError::Arity {
                given: values.len(),
                expected,
            }
            .into());
        }

        let mut record = Self::new(record_type);
        for (spec, value) in record_type.registry.iter().zip(values) {
            record.write(spec, value)?;
        }
        Ok(record)
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Current value of `name`, or `None` when unset.
    pub fn get(&self, name: &str) -> Result<Option<&Value>> {
        let spec = self.record_type.spec(name)?;
        Ok(self.slots[spec.position()].as_ref())
    }

    /// Typed read. `None` when unset or when the stored value is not a `T`.
    pub fn get_as<'a, T: FromValue<'a>>(&'a self, name: &str) -> Result<Option<T>> {
        Ok(self.get(name)?.and_then(T::from_value))
    }

    /// Writes `value`, coercing it to the declared type when needed.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let record_type = Arc::clone(&self.record_type);
        let spec = record_type.spec(name)?;
        self.write(spec, value.into())
    }

    pub fn is_set(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// Clears a slot, returning what it held.
    pub fn unset(&mut self, name: &str) -> Result<Option<Value>> {
        let position = self.record_type.spec(name)?.position();
        Ok(self.slots[position].take())
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.record_type
            .registry
            .iter()
            .map(|spec| (spec.name(), self.slots[spec.position()].as_ref()))
    }

    fn write(&mut self, spec: &AttributeSpec, value: Value) -> Result<()> {
        let declared = spec.declared_type();
        let stored = if value.conforms_to(declared) {
            trace!("{}.{} <- {}", self.record_type.name, spec.name(), value.inspect());
            value
        } else {
            let coerced = self
                .record_type
                .coercer
                .coerce(&value, declared)
                .map_err(|cause| mismatch(spec, &value, Some(cause)))?;
            if !coerced.conforms_to(declared) {
                warn!(
                    "coercion of {} to {} produced {}",
                    value.inspect(),
                    declared,
                    coerced.type_name()
                );
                return Err(mismatch(spec, &value, None));
            }
            coerced
        };
        self.slots[spec.position()] = Some(stored);
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{}", self.record_type.name)?;
        for (i, (name, value)) in self.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            let shown = value.map(Value::inspect).unwrap_or_else(|| "nil".into());
            write!(f, "{}{}={}", sep, name, shown)?;
        }
        write!(f, ">")
    }
}

/// The getter/setter pair generated for one declared attribute.
#[derive(Debug, Clone)]
pub struct Accessor {
    record_type: Arc<RecordType>,
    spec: AttributeSpec,
}

impl Accessor {
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn spec(&self) -> &AttributeSpec {
        &self.spec
    }

    pub fn get<'r>(&self, record: &'r Record) -> Result<Option<&'r Value>> {
        self.check(record)?;
        Ok(record.slots[self.spec.position()].as_ref())
    }

    pub fn set(&self, record: &mut Record, value: impl Into<Value>) -> Result<()> {
        self.check(record)?;
        record.write(&self.spec, value.into())
    }

    fn check(&self, record: &Record) -> Result<()> {
        if Arc::ptr_eq(&self.record_type, &record.record_type) {
            Ok(())
        } else {
            Err(ModelError::NoSuchAttribute {
                record: record.record_type.name.clone(),
                name: self.spec.name().to_string(),
            })
        }
    }
}

fn empty(record_type: &RecordType) -> ModelError {
    ConstructionError::Empty {
        record: record_type.name.clone(),
    }
    .into()
}

fn mismatch(spec: &AttributeSpec, value: &Value, cause: Option<CoercionError>) -> ModelError {
    ModelError::TypeMismatch {
        attribute: spec.name().to_string(),
        declared: spec.declared_type(),
        value: value.clone(),
        actual: value.type_name(),
        cause,
    }
}
