//! # Attribute Registry
//!
//! Each record type owns one [`AttributeRegistry`]: an ordered map from a
//! normalized attribute name to its [`AttributeSpec`].
//!
//! ## Declaration rules
//!
//! [`AttributeRegistry::declare`] checks, in order:
//!
//! 1. The name normalizes to an identifier (`InvalidName` otherwise).
//! 2. The name is not already declared on this registry (`Duplicate`).
//! 3. The type resolves to a concrete tag (`NotConcrete`).
//! 4. The tag is declarable; `BigInteger` is not (`Unsupported`).
//!
//! A failed declaration leaves the registry untouched.
//!
//! ## Ordering
//!
//! Insertion order is the positional-argument order used by
//! `Record::from_positional`, and each spec remembers its position so that
//! slot lookup never has to search.

use crate::error::DeclarationError;
use crate::types::{TypeRef, TypeTag};
use indexmap::IndexMap;
use log::debug;
use std::borrow::Borrow;
use std::fmt;

/// A normalized attribute name: trimmed, `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: &str) -> Result<Self, DeclarationError> {
        let name = raw.trim();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DeclarationError::InvalidName {
                name: raw.to_string(),
            });
        }
        Ok(Identifier(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One declared field: name, type and position. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    name: Identifier,
    declared_type: TypeTag,
    position: usize,
}

impl AttributeSpec {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn declared_type(&self) -> TypeTag {
        self.declared_type
    }

    /// Index of this attribute in declaration order.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Ordered mapping of attribute names to their specs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRegistry {
    attributes: IndexMap<Identifier, AttributeSpec>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an attribute. See the module docs for the rules.
    pub fn declare(
        &mut self,
        name: &str,
        declared_type: impl Into<TypeRef>,
    ) -> Result<&AttributeSpec, DeclarationError> {
        let name = Identifier::new(name)?;
        if self.attributes.contains_key(name.as_str()) {
            return Err(DeclarationError::Duplicate {
                name: name.to_string(),
            });
        }

        let tag = declared_type.into().resolve()?;
        if !tag.is_declarable() {
            return Err(DeclarationError::Unsupported { tag });
        }

        debug!("declared attribute `{}` as {}", name, tag);
        let spec = AttributeSpec {
            name: name.clone(),
            declared_type: tag,
            position: self.attributes.len(),
        };
        let (index, _) = self.attributes.insert_full(name, spec);
        Ok(&self.attributes[index])
    }

    /// Registers an untyped attribute (every value conforms).
    pub fn declare_untyped(&mut self, name: &str) -> Result<&AttributeSpec, DeclarationError> {
        self.declare(name, TypeTag::Any)
    }

    /// Look up an attribute spec by name. Surrounding whitespace is ignored.
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name.trim())
    }

    pub fn at(&self, position: usize) -> Option<&AttributeSpec> {
        self.attributes.get_index(position).map(|(_, spec)| spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute names in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(Identifier::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.values()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
